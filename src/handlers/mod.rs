pub mod analytics;
pub mod checkout;
pub mod currencies;
pub mod health;
pub mod payment_status;
