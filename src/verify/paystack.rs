use hmac::{Hmac, Mac};
use sha2::Sha512;

use super::{Freshness, Rejection};

/// `x-paystack-signature: <hex HMAC-SHA512(body)>` keyed with the secret key.
pub(super) fn verify(
    secret: &str,
    signature: Option<&str>,
    body: &[u8],
    _freshness: &Freshness,
) -> Result<(), Rejection> {
    if secret.is_empty() {
        return Err(Rejection::MissingSecret);
    }
    let signature = signature.ok_or(Rejection::MissingHeader)?;
    let digest = hex::decode(signature).map_err(|_| Rejection::SignatureMismatch)?;

    let mut mac =
        Hmac::<Sha512>::new_from_slice(secret.as_bytes()).map_err(|_| Rejection::MissingSecret)?;
    mac.update(body);
    mac.verify_slice(&digest)
        .map_err(|_| Rejection::SignatureMismatch)
}
