//! Telegram Login Assertion
//!
//! The login widget hands the browser a set of fields plus a `hash`. The
//! hash is HMAC-SHA256 over the other fields, keyed with SHA-256 of the
//! bot token. See <https://core.telegram.org/widgets/login#checking-authorization>.

use std::collections::BTreeMap;

use platform::crypto::{constant_time_eq, hmac_sha256_hex, sha256};
use serde_json::{Map, Value};

/// Name of the signature field
pub const HASH_FIELD: &str = "hash";

/// Signed login payload, field name -> canonical string value
///
/// `BTreeMap` keeps fields in byte order of their names, which is the
/// order the check string needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginAssertion {
    fields: BTreeMap<String, String>,
}

impl LoginAssertion {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    /// Build from a decoded JSON object, stringifying each value canonically
    pub fn from_json(object: &Map<String, Value>) -> Self {
        let fields = object
            .iter()
            .map(|(name, value)| (name.clone(), canonical_value(value)))
            .collect();
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn hash(&self) -> Option<&str> {
        self.get(HASH_FIELD)
    }

    /// `name=value` lines for every field except `hash`, joined by `\n`
    pub fn check_string(&self) -> String {
        check_string(&self.fields)
    }

    /// Whether `hash` was produced by the holder of `bot_token`
    pub fn verify(&self, bot_token: &str) -> bool {
        verify(&self.fields, bot_token)
    }

    /// Provider-side account id
    pub fn telegram_id(&self) -> Option<i64> {
        self.get("id")?.parse().ok()
    }

    /// Unix seconds at which the provider signed the payload
    pub fn auth_date(&self) -> Option<i64> {
        self.get("auth_date")?.parse().ok()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.get("first_name")
    }

    pub fn last_name(&self) -> Option<&str> {
        self.get("last_name")
    }

    pub fn username(&self) -> Option<&str> {
        self.get("username")
    }
}

/// Verify a raw field map against the shared secret
pub fn verify(assertion: &BTreeMap<String, String>, shared_secret: &str) -> bool {
    let Some(received) = assertion.get(HASH_FIELD) else {
        return false;
    };
    let expected = signature(&check_string(assertion), shared_secret);
    constant_time_eq(expected.as_bytes(), received.as_bytes())
}

fn check_string(fields: &BTreeMap<String, String>) -> String {
    fields
        .iter()
        .filter(|(name, _)| name.as_str() != HASH_FIELD)
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lowercase hex HMAC-SHA256 of `check_string` keyed with SHA-256(secret)
pub fn signature(check_string: &str, shared_secret: &str) -> String {
    let key = sha256(shared_secret.as_bytes());
    hmac_sha256_hex(&key, check_string.as_bytes())
}

/// Text form of a JSON value as it appears in the check string
pub fn canonical_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &str = "s3cr3t";

    fn signed(pairs: &[(&str, &str)], secret: &str) -> BTreeMap<String, String> {
        let mut fields: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let check = LoginAssertion::new(fields.clone()).check_string();
        fields.insert(HASH_FIELD.to_string(), signature(&check, secret));
        fields
    }

    #[test]
    fn test_check_string_is_sorted_and_excludes_hash() {
        let fields = signed(
            &[("id", "42"), ("first_name", "Anna"), ("auth_date", "1600000000")],
            SECRET,
        );
        let assertion = LoginAssertion::new(fields);
        assert_eq!(
            assertion.check_string(),
            "auth_date=1600000000\nfirst_name=Anna\nid=42"
        );
    }

    #[test]
    fn test_known_round_trip() {
        let check = "auth_date=1600000000\nfirst_name=Anna\nid=42";
        // Key and MAC computed independently of the check-string builder
        let key = sha256(b"s3cr3t");
        let expected = hmac_sha256_hex(&key, check.as_bytes());

        let mut fields = BTreeMap::new();
        fields.insert("id".to_string(), "42".to_string());
        fields.insert("first_name".to_string(), "Anna".to_string());
        fields.insert("auth_date".to_string(), "1600000000".to_string());
        fields.insert("hash".to_string(), expected);

        assert!(verify(&fields, SECRET));
        assert!(LoginAssertion::new(fields).verify(SECRET));
    }

    #[test]
    fn test_tampered_hash_rejected() {
        let mut fields = signed(&[("id", "42"), ("first_name", "Anna")], SECRET);
        let hash = fields.get_mut(HASH_FIELD).unwrap();
        let flipped = if hash.ends_with('0') { '1' } else { '0' };
        hash.pop();
        hash.push(flipped);
        assert!(!verify(&fields, SECRET));
    }

    #[test]
    fn test_tampered_field_rejected() {
        let mut fields = signed(&[("id", "42"), ("first_name", "Anna")], SECRET);
        fields.insert("id".to_string(), "43".to_string());
        assert!(!verify(&fields, SECRET));
    }

    #[test]
    fn test_missing_hash_rejected() {
        let mut fields = signed(&[("id", "42")], SECRET);
        fields.remove(HASH_FIELD);
        assert!(!verify(&fields, SECRET));
        assert!(!LoginAssertion::new(fields).verify(SECRET));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let fields = signed(&[("id", "42")], SECRET);
        assert!(!verify(&fields, "another-bot-token"));
    }

    #[test]
    fn test_hash_only_signs_empty_string() {
        let fields = signed(&[], SECRET);
        assert_eq!(fields.len(), 1);
        assert!(verify(&fields, SECRET));
    }

    #[test]
    fn test_field_order_does_not_matter() {
        let a = json!({"id": 42, "first_name": "Anna", "auth_date": 1600000000});
        let b = json!({"auth_date": 1600000000, "id": 42, "first_name": "Anna"});
        let a = LoginAssertion::from_json(a.as_object().unwrap());
        let b = LoginAssertion::from_json(b.as_object().unwrap());
        assert_eq!(a.check_string(), b.check_string());
    }

    #[test]
    fn test_json_values_are_stringified_canonically() {
        let payload = json!({
            "id": 123456789,
            "first_name": "Anna",
            "allows_write": true,
            "auth_date": 1600000000
        });
        let assertion = LoginAssertion::from_json(payload.as_object().unwrap());
        assert_eq!(
            assertion.check_string(),
            "allows_write=true\nauth_date=1600000000\nfirst_name=Anna\nid=123456789"
        );
        assert_eq!(assertion.telegram_id(), Some(123456789));
        assert_eq!(assertion.auth_date(), Some(1600000000));
    }

    #[test]
    fn test_json_payload_verifies_like_string_payload() {
        let fields = signed(
            &[("id", "42"), ("first_name", "Anna"), ("auth_date", "1600000000")],
            SECRET,
        );
        let hash = fields[HASH_FIELD].clone();
        let payload = json!({
            "id": 42,
            "first_name": "Anna",
            "auth_date": 1600000000,
            "hash": hash
        });
        let assertion = LoginAssertion::from_json(payload.as_object().unwrap());
        assert!(assertion.verify(SECRET));
    }
}
