//! Keyed signature codec.
//!
//! Computes and verifies an HMAC-SHA256 hex digest over a canonical
//! querystring encoding of ordered key/value data. Used for two things:
//! verifying inbound login notifications from the legacy site, and the
//! opaque token format (`urlencoded-fields&signature=<hex>`) carried by the
//! legacy callback path.
//!
//! # Canonical encoding
//!
//! Fields are encoded as `application/x-www-form-urlencoded` pairs in the
//! order they were provided. The legacy site signs its JSON payload in key
//! order, so callers must preserve that order (see [`fields_from_json`]).
//!
//! # Security
//!
//! Signature comparison is constant-time to avoid timing side-channels.
//! Malformed input never panics; it fails closed with a [`SignatureError`].

use hmac::{Hmac, Mac};
use indexmap::IndexMap;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use url::form_urlencoded;

type HmacSha256 = Hmac<Sha256>;

/// Ordered string-to-string field mapping.
pub type FieldMap = IndexMap<String, String>;

/// Marker separating the signed fields from the signature in opaque tokens.
const SIGNATURE_MARKER: &str = "&signature=";

/// Length of a hex-encoded SHA-256 digest.
const SIGNATURE_HEX_LEN: usize = 64;

/// Errors produced by the signature codec.
///
/// Deliberately coarse: callers at the HTTP boundary fold all of these into
/// a single rejection so the codec cannot be used as a probing oracle.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The opaque token has no `&signature=` marker.
    #[error("missing signature marker")]
    MissingMarker,

    /// The signature is not a well-formed SHA-256 hex digest.
    #[error("malformed signature")]
    MalformedSignature,

    /// The recomputed signature does not match the supplied one.
    #[error("signature mismatch")]
    Mismatch,
}

/// Encodes fields as a deterministic querystring, preserving order.
#[must_use]
pub fn canonical_query(fields: &FieldMap) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Computes the HMAC-SHA256 hex digest of the canonical field encoding.
#[must_use]
pub fn sign(fields: &FieldMap, secret: &str) -> String {
    sign_message(canonical_query(fields).as_bytes(), secret)
}

/// Computes the HMAC-SHA256 hex digest of a raw message.
#[must_use]
pub fn sign_message(message: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a signature over the canonical field encoding.
///
/// Comparison is constant-time; any malformed signature fails closed.
pub fn verify(fields: &FieldMap, secret: &str, signature: &str) -> Result<(), SignatureError> {
    verify_message(canonical_query(fields).as_bytes(), secret, signature)
}

/// Verifies a signature over a raw message.
pub fn verify_message(
    message: &[u8],
    secret: &str,
    signature: &str,
) -> Result<(), SignatureError> {
    if signature.len() != SIGNATURE_HEX_LEN || hex::decode(signature).is_err() {
        return Err(SignatureError::MalformedSignature);
    }
    let expected = sign_message(message, secret);
    if expected.as_bytes().ct_eq(signature.as_bytes()).into() {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

/// Packs a field mapping and its signature into one opaque string.
///
/// Format: `urlencoded-fields&signature=<hex>`.
#[must_use]
pub fn encode_token(fields: &FieldMap, secret: &str) -> String {
    let querystring = canonical_query(fields);
    let signature = sign_message(querystring.as_bytes(), secret);
    format!("{querystring}{SIGNATURE_MARKER}{signature}")
}

/// Unpacks and re-verifies an opaque signed token.
///
/// Splits on the final `&signature=` marker so a field value containing the
/// marker text cannot displace the real signature; such tokens simply fail
/// verification.
pub fn decode_token(token: &str, secret: &str) -> Result<FieldMap, SignatureError> {
    let (querystring, signature) = token
        .rsplit_once(SIGNATURE_MARKER)
        .ok_or(SignatureError::MissingMarker)?;
    verify_message(querystring.as_bytes(), secret, signature)?;

    let mut fields = FieldMap::new();
    for (key, value) in form_urlencoded::parse(querystring.as_bytes()) {
        fields.insert(key.into_owned(), value.into_owned());
    }
    Ok(fields)
}

/// Converts a JSON object into an ordered field mapping, stringifying
/// scalar values the way the legacy site does before signing.
#[must_use]
pub fn fields_from_json(object: &serde_json::Map<String, serde_json::Value>) -> FieldMap {
    let mut fields = FieldMap::with_capacity(object.len());
    for (key, value) in object {
        let rendered = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            other => other.to_string(),
        };
        fields.insert(key.clone(), rendered);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("user_id".to_string(), "2019513-AIR-G-48".to_string());
        fields.insert("email".to_string(), "ada@example.com".to_string());
        fields.insert("role".to_string(), "learner & admin".to_string());
        fields
    }

    #[test]
    fn test_canonical_query_preserves_order_and_escapes() {
        let query = canonical_query(&sample_fields());
        assert_eq!(
            query,
            "user_id=2019513-AIR-G-48&email=ada%40example.com&role=learner+%26+admin"
        );
    }

    #[test]
    fn test_canonical_query_escape_set() {
        // Pins the exact form-urlencoded escape set both sides must agree
        // on: space becomes `+`, `*` stays literal, `~` is escaped. Note
        // this differs from RFC 3986, which leaves `~` unreserved.
        let mut fields = FieldMap::new();
        fields.insert("v".to_string(), "a b*c~d".to_string());
        assert_eq!(canonical_query(&fields), "v=a+b*c%7Ed");
    }

    #[test]
    fn test_sign_verify_round_trip() {
        let fields = sample_fields();
        let signature = sign(&fields, "s3cret");
        assert_eq!(signature.len(), SIGNATURE_HEX_LEN);
        assert_eq!(verify(&fields, "s3cret", &signature), Ok(()));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let fields = sample_fields();
        let signature = sign(&fields, "s3cret");
        assert_eq!(
            verify(&fields, "other", &signature),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_verify_rejects_mutated_signature() {
        let fields = sample_fields();
        let mut signature = sign(&fields, "s3cret");
        // Flip one hex digit.
        let last = signature.pop().unwrap();
        signature.push(if last == '0' { '1' } else { '0' });
        assert_eq!(
            verify(&fields, "s3cret", &signature),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_verify_rejects_mutated_field() {
        let mut fields = sample_fields();
        let signature = sign(&fields, "s3cret");
        fields.insert("email".to_string(), "eve@example.com".to_string());
        assert_eq!(
            verify(&fields, "s3cret", &signature),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_verify_rejects_non_hex_signature() {
        let fields = sample_fields();
        assert_eq!(
            verify(&fields, "s3cret", &"z".repeat(SIGNATURE_HEX_LEN)),
            Err(SignatureError::MalformedSignature)
        );
        assert_eq!(
            verify(&fields, "s3cret", "deadbeef"),
            Err(SignatureError::MalformedSignature)
        );
    }

    #[test]
    fn test_token_round_trip() {
        let fields = sample_fields();
        let token = encode_token(&fields, "s3cret");
        let decoded = decode_token(&token, "s3cret").expect("token should verify");
        assert_eq!(decoded, fields);
    }

    #[test]
    fn test_decode_rejects_missing_marker() {
        assert_eq!(
            decode_token("user_id=abc", "s3cret"),
            Err(SignatureError::MissingMarker)
        );
    }

    #[test]
    fn test_decode_rejects_tampered_token() {
        let token = encode_token(&sample_fields(), "s3cret");
        let tampered = token.replace("2019513", "2019514");
        assert_eq!(
            decode_token(&tampered, "s3cret"),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_decode_splits_on_final_marker() {
        // A field value containing the literal marker text must not be able
        // to truncate the signed portion.
        let mut fields = FieldMap::new();
        fields.insert(
            "note".to_string(),
            "x&signature=0000000000000000000000000000000000000000000000000000000000000000"
                .to_string(),
        );
        fields.insert("user_id".to_string(), "abc".to_string());
        let token = encode_token(&fields, "s3cret");
        let decoded = decode_token(&token, "s3cret").expect("token should verify");
        assert_eq!(decoded, fields);

        // An unsigned inner marker fails closed.
        let forged = format!(
            "note=x{SIGNATURE_MARKER}{}",
            "0".repeat(SIGNATURE_HEX_LEN)
        );
        assert!(decode_token(&forged, "s3cret").is_err());
    }

    #[test]
    fn test_fields_from_json_stringifies_scalars() {
        let value = serde_json::json!({
            "unique_id": "2019513-AIR-G-48",
            "timestamp": 1700000000,
            "active": true,
        });
        let fields = fields_from_json(value.as_object().unwrap());
        assert_eq!(fields["unique_id"], "2019513-AIR-G-48");
        assert_eq!(fields["timestamp"], "1700000000");
        assert_eq!(fields["active"], "true");
    }
}
