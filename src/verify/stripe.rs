use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::{Freshness, Rejection};

/// `Stripe-Signature: t=<unix secs>,v1=<hex HMAC-SHA256("<t>.<body>")>[,v1=...]`.
///
/// Several `v1` entries may be present while a secret is being rolled; any one
/// matching is enough. Unknown keys (`v0`, future schemes) are ignored.
pub(super) fn verify(
    secret: &str,
    signature: Option<&str>,
    body: &[u8],
    freshness: &Freshness,
) -> Result<(), Rejection> {
    if secret.is_empty() {
        return Err(Rejection::MissingSecret);
    }
    let header = parse_header(signature.ok_or(Rejection::MissingHeader)?)?;

    let timestamp_secs = header
        .timestamp
        .parse::<i64>()
        .map_err(|_| Rejection::InvalidTimestamp)?;
    if freshness.is_stale(timestamp_secs) {
        return Err(Rejection::StaleTimestamp);
    }

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| Rejection::MissingSecret)?;
    mac.update(header.timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);

    let matched = header.signatures.iter().any(|candidate| {
        hex::decode(candidate).is_ok_and(|digest| mac.clone().verify_slice(&digest).is_ok())
    });
    if matched {
        Ok(())
    } else {
        Err(Rejection::SignatureMismatch)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct SignatureHeader<'a> {
    timestamp: &'a str,
    signatures: Vec<&'a str>,
}

fn parse_header(value: &str) -> Result<SignatureHeader<'_>, Rejection> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in value.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (key, value) = part.split_once('=').ok_or(Rejection::MalformedHeader)?;
        match key.trim() {
            "t" => timestamp = Some(value.trim()),
            "v1" => signatures.push(value.trim()),
            _ => {}
        }
    }

    let timestamp = timestamp
        .filter(|value| !value.is_empty())
        .ok_or(Rejection::MalformedHeader)?;
    signatures.retain(|value| !value.is_empty());
    if signatures.is_empty() {
        return Err(Rejection::MalformedHeader);
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}
