//! # Payment Signature Primitive
//!
//! The trust boundary of the whole broker. The gateway signs
//! `order_id|payment_id` with a secret shared only between the gateway and
//! this server; a matching HMAC-SHA256 digest is the sole proof that a
//! payment claim came from the genuine gateway flow rather than a client
//! fabricating identifiers.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn signed_payload_mac(order_id: &str, payment_id: &str, secret: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac
}

/// Compute the expected signature as a lowercase hex digest
pub fn expected_signature(order_id: &str, payment_id: &str, secret: &str) -> String {
    let mac = signed_payload_mac(order_id, payment_id, secret);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a claimed signature against the recomputed digest.
///
/// The hex claim is decoded and compared via `Mac::verify_slice`, which is
/// constant-time. A claim that is not valid hex cannot match any digest and
/// is rejected outright.
pub fn verify_signature(order_id: &str, payment_id: &str, claimed: &str, secret: &str) -> bool {
    let claimed_bytes = match hex::decode(claimed) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let mac = signed_payload_mac(order_id, payment_id, secret);
    mac.verify_slice(&claimed_bytes).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_is_64_hex_chars() {
        let sig = expected_signature("order_abc", "pay_123", "s3cr3t");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(sig, sig.to_lowercase());
    }

    #[test]
    fn test_known_vector() {
        // hex(HMAC_SHA256("s3cr3t", "order_abc|pay_123"))
        let sig = expected_signature("order_abc", "pay_123", "s3cr3t");
        assert_eq!(
            sig,
            "070ea2f5813be979e4d4dd50f9840717bb01adf600c92662f401086c6cabbf9a"
        );
        assert!(verify_signature("order_abc", "pay_123", &sig, "s3cr3t"));
    }

    #[test]
    fn test_signature_is_deterministic() {
        let a = expected_signature("order_abc", "pay_123", "s3cr3t");
        let b = expected_signature("order_abc", "pay_123", "s3cr3t");
        assert_eq!(a, b);
    }

    #[test]
    fn test_correct_signature_verifies() {
        let sig = expected_signature("order_abc", "pay_123", "s3cr3t");
        assert!(verify_signature("order_abc", "pay_123", &sig, "s3cr3t"));
    }

    #[test]
    fn test_wrong_signature_rejected() {
        let sig = expected_signature("order_abc", "pay_123", "s3cr3t");

        // Flip one hex digit
        let mut tampered = sig.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == '0' { '1' } else { '0' });
        assert!(!verify_signature("order_abc", "pay_123", &tampered, "s3cr3t"));

        // Any other 64-hex-char string
        let other = "a".repeat(64);
        assert!(!verify_signature("order_abc", "pay_123", &other, "s3cr3t"));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let sig = expected_signature("order_abc", "pay_123", "s3cr3t");
        assert!(!verify_signature("order_abc", "pay_123", &sig, "other-secret"));
    }

    #[test]
    fn test_non_hex_claim_rejected() {
        assert!(!verify_signature("order_abc", "pay_123", "not-hex!", "s3cr3t"));
        assert!(!verify_signature("order_abc", "pay_123", "", "s3cr3t"));
    }

    #[test]
    fn test_identifiers_are_not_interchangeable() {
        // order_id and payment_id are joined with a separator, so swapping
        // them must produce a different digest
        let a = expected_signature("order_abc", "pay_123", "s3cr3t");
        let b = expected_signature("pay_123", "order_abc", "s3cr3t");
        assert_ne!(a, b);
    }
}
