use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::{Freshness, Rejection};

const PREFIX: &str = "sha256=";

/// `X-Hub-Signature-256: sha256=<hex HMAC-SHA256(body)>`.
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
    let digest_hex = signature
        .strip_prefix(PREFIX)
        .ok_or(Rejection::InvalidScheme)?;
    let digest = hex::decode(digest_hex).map_err(|_| Rejection::SignatureMismatch)?;

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| Rejection::MissingSecret)?;
    mac.update(body);
    mac.verify_slice(&digest)
        .map_err(|_| Rejection::SignatureMismatch)
}
