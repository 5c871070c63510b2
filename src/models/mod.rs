pub mod analytics;
pub mod checkout;
pub mod currency;
pub mod error;
pub mod payment_status;
pub mod transaction;
