use crate::models::payment_status::PaymentOutcome;
use crate::models::transaction::TransactionStatus;

const SECRET_SEPARATOR: &str = "_secret_";
const INTENT_ID_PREFIX: &str = "pi_";

/// Intent id embedded in a client secret (`pi_123_secret_abc` -> `pi_123`).
///
/// The id ends up in the provider URL path, so only `pi_` followed by ASCII
/// alphanumerics is accepted.
pub fn intent_id_from_client_secret(client_secret: &str) -> Option<&str> {
    let (id, rest) = client_secret.split_once(SECRET_SEPARATOR)?;
    if rest.is_empty() || !is_intent_id(id) {
        return None;
    }
    Some(id)
}

fn is_intent_id(id: &str) -> bool {
    match id.strip_prefix(INTENT_ID_PREFIX) {
        Some(suffix) => !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_alphanumeric()),
        None => false,
    }
}

/// Map an intent status to what the return page shows.
pub fn describe_status(status: TransactionStatus) -> (PaymentOutcome, &'static str) {
    match status {
        TransactionStatus::Succeeded => (
            PaymentOutcome::Success,
            "Payment successful! Thank you for your purchase.",
        ),
        TransactionStatus::Processing => (
            PaymentOutcome::Pending,
            "Your payment is processing. This may take a few moments.",
        ),
        TransactionStatus::RequiresPaymentMethod => (
            PaymentOutcome::Error,
            "Payment failed. Please try another payment method.",
        ),
        _ => (
            PaymentOutcome::Error,
            "Something went wrong. Please contact support.",
        ),
    }
}
