use super::{Freshness, Rejection, constant_time_eq};

/// `verif-hash` must equal the secret hash configured on the Flutterwave
/// dashboard. This is a shared-token check, not a message signature: it proves
/// the sender knows the secret but does not bind the body.
pub(super) fn verify(
    secret: &str,
    signature: Option<&str>,
    _body: &[u8],
    _freshness: &Freshness,
) -> Result<(), Rejection> {
    if secret.is_empty() {
        return Err(Rejection::MissingSecret);
    }
    let supplied = signature.ok_or(Rejection::MissingHeader)?;

    if constant_time_eq(supplied.as_bytes(), secret.as_bytes()) {
        Ok(())
    } else {
        Err(Rejection::SignatureMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(secret: &str, signature: Option<&str>) -> Result<(), Rejection> {
        verify(secret, signature, b"{}", &Freshness::at(0, None))
    }

    #[test]
    fn accepts_matching_hash() {
        assert_eq!(check("flw-hash", Some("flw-hash")), Ok(()));
    }

    #[test]
    fn rejects_prefix_and_wrong_values() {
        assert_eq!(check("flw-hash", Some("flw-has")), Err(Rejection::SignatureMismatch));
        assert_eq!(check("flw-hash", Some("FLW-HASH")), Err(Rejection::SignatureMismatch));
        assert_eq!(check("flw-hash", None), Err(Rejection::MissingHeader));
    }
}
