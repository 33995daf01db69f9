use crate::error::AppError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes the gateway signature for an order/payment pair: HMAC-SHA256
/// over `"{order_id}|{payment_id}"`, lowercase hex. Pure, no side effects.
///
/// Errors only when the shared secret is missing, which is a deployment
/// problem rather than a bad request.
pub fn payment_signature(
    order_id: &str,
    payment_id: &str,
    secret: &str,
) -> Result<String, AppError> {
    if secret.is_empty() {
        return Err(AppError::Configuration(
            "payment key secret is not configured".to_string(),
        ));
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AppError::Configuration("payment key secret is unusable".to_string()))?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Checks a signature relayed by the checkout client against the one we
/// compute ourselves. A mismatch is an expected outcome (`Ok(false)`), not
/// an error.
pub fn verify_payment_signature(
    order_id: &str,
    payment_id: &str,
    signature: &str,
    secret: &str,
) -> Result<bool, AppError> {
    let expected = payment_signature(order_id, payment_id, secret)?;
    Ok(expected == signature)
}
