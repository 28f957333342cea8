//! Per-provider webhook signature verification.
//!
//! Every scheme is a pure function with the same shape: the endpoint's shared
//! secret, the value of the provider's signature header, the raw body and the
//! current time. [`verify`] is the only place that maps a [`ProviderKind`] to a
//! scheme, so adding a provider is an exhaustiveness error until it is wired in.

mod flutterwave;
mod github;
mod paystack;
mod stripe;

use std::time::Duration;

use axum::http::HeaderMap;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::types::ProviderKind;

/// Why a delivery was not accepted. Only ever logged, never returned to the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("endpoint has no shared secret")]
    MissingSecret,
    #[error("signature header missing")]
    MissingHeader,
    #[error("signature header malformed")]
    MalformedHeader,
    #[error("unsupported signature scheme")]
    InvalidScheme,
    #[error("signature timestamp unparsable")]
    InvalidTimestamp,
    #[error("signature timestamp outside tolerance")]
    StaleTimestamp,
    #[error("signature mismatch")]
    SignatureMismatch,
}

/// Clock and replay-window input for timestamped schemes.
#[derive(Debug, Clone, Copy)]
pub struct Freshness {
    pub now_secs: i64,
    /// `None` disables the window check.
    pub tolerance: Option<Duration>,
}

impl Freshness {
    pub fn at(now_secs: i64, tolerance: Option<Duration>) -> Self {
        Self {
            now_secs,
            tolerance,
        }
    }

    fn is_stale(&self, timestamp_secs: i64) -> bool {
        let Some(tolerance) = self.tolerance else {
            return false;
        };
        let tolerance = i64::try_from(tolerance.as_secs()).unwrap_or(i64::MAX);
        self.now_secs.saturating_sub(timestamp_secs) > tolerance
    }
}

pub fn verify(
    kind: ProviderKind,
    secret: &str,
    headers: &HeaderMap,
    body: &[u8],
    freshness: &Freshness,
) -> Result<(), Rejection> {
    if secret.is_empty() {
        return Err(Rejection::MissingSecret);
    }

    let signature = headers
        .get(kind.signature_header())
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match kind {
        ProviderKind::Stripe => stripe::verify(secret, signature, body, freshness),
        ProviderKind::Flutterwave => flutterwave::verify(secret, signature, body, freshness),
        ProviderKind::Paystack => paystack::verify(secret, signature, body, freshness),
        ProviderKind::Github => github::verify(secret, signature, body, freshness),
    }
}

/// Compares fixed-length digests so neither the contents nor the length of a
/// shared secret shows up in the timing.
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let a = Sha256::digest(a);
    let b = Sha256::digest(b);
    a.as_slice().ct_eq(b.as_slice()).into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{HeaderName, HeaderValue};
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    use super::*;

    fn github_signature(secret: &str, body: &[u8]) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
    }

    fn no_window() -> Freshness {
        Freshness::at(1_700_000_000, None)
    }

    #[test]
    fn dispatch_reads_the_provider_specific_header() {
        let body = br#"{"a":1}"#;
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-hub-signature-256",
            HeaderValue::from_str(&github_signature("s3cret", body)).unwrap(),
        );

        assert_eq!(
            verify(ProviderKind::Github, "s3cret", &headers, body, &no_window()),
            Ok(())
        );
        assert_eq!(
            verify(ProviderKind::Stripe, "s3cret", &headers, body, &no_window()),
            Err(Rejection::MissingHeader)
        );
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(b"Verif-Hash").unwrap(),
            HeaderValue::from_static("s3cret"),
        );

        assert_eq!(
            verify(ProviderKind::Flutterwave, "s3cret", &headers, b"{}", &no_window()),
            Ok(())
        );
    }

    #[test]
    fn empty_secret_rejects_every_provider() {
        let headers = HeaderMap::new();
        for kind in ProviderKind::ALL {
            assert_eq!(
                verify(kind, "", &headers, b"{}", &no_window()),
                Err(Rejection::MissingSecret),
                "{kind}"
            );
        }
    }

    #[test]
    fn blank_header_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert("x-paystack-signature", HeaderValue::from_static("   "));

        assert_eq!(
            verify(ProviderKind::Paystack, "s3cret", &headers, b"{}", &no_window()),
            Err(Rejection::MissingHeader)
        );
    }

    #[test]
    fn constant_time_eq_handles_differing_lengths() {
        assert!(constant_time_eq(b"flw-hash", b"flw-hash"));
        assert!(!constant_time_eq(b"flw-hash", b"flw-has"));
        assert!(!constant_time_eq(b"flw-hash", b"flw-hash-longer"));
        assert!(!constant_time_eq(b"", b"flw-hash"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn freshness_window() {
        let window = Freshness::at(1_000, Some(Duration::from_secs(300)));
        assert!(!window.is_stale(700));
        assert!(window.is_stale(699));
        assert!(!window.is_stale(2_000));
        assert!(!Freshness::at(1_000, None).is_stale(0));
    }
}
