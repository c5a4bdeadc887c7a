use pairio_types::{Digest, Key};
use serde_json::{json, Value};
use sha1::{Digest as _, Sha1};

use crate::canonical::to_canonical_json;

/// SHA-1 digest over canonical serializations.
///
/// Hashing never fails for a legal key. Length and type validation is the
/// caller's job and happens before any digest is taken.
pub struct CanonicalHasher;

impl CanonicalHasher {
    /// Hash raw bytes.
    pub fn digest_bytes(data: &[u8]) -> Digest {
        let out = Sha1::digest(data);
        let mut bytes = [0u8; Digest::BYTES];
        bytes.copy_from_slice(&out);
        Digest::from_bytes(bytes)
    }

    /// Hash a string's UTF-8 bytes directly, bypassing serialization.
    pub fn digest_str(s: &str) -> Digest {
        Self::digest_bytes(s.as_bytes())
    }

    /// Hash the canonical serialization of a JSON value.
    pub fn digest_value(value: &Value) -> Digest {
        Self::digest_str(&to_canonical_json(value))
    }

    /// Text keys are treated as pre-canonical and hashed verbatim;
    /// structured keys go through canonical serialization.
    pub fn digest_key(key: &Key) -> Digest {
        match key {
            Key::Text(s) => Self::digest_str(s),
            Key::Structured(map) => Self::digest_value(&Value::Object(map.clone())),
        }
    }

    /// Local address of a storage key: digest of `{collection, key}`.
    pub fn local_digest(collection: &str, storage_key: &str) -> Digest {
        Self::digest_value(&json!({
            "collection": collection,
            "key": storage_key,
        }))
    }

    /// Remote address of a storage key: digest of the key alone. The
    /// collection travels separately in the request path.
    pub fn remote_digest(storage_key: &str) -> Digest {
        Self::digest_str(storage_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::Map;

    #[test]
    fn string_digest_matches_known_vector() {
        assert_eq!(
            CanonicalHasher::digest_str("alpha").as_str(),
            "be76331b95dfc399cd776d2fc68021e0db03cc4f"
        );
        assert_eq!(
            CanonicalHasher::digest_str("").as_str(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn structured_digest_matches_known_vector() {
        let d = CanonicalHasher::digest_value(&json!({"b": 2, "a": 1}));
        assert_eq!(d.as_str(), "4acc71e0547112eb432f0a36fb1924c4a738cb49");
    }

    #[test]
    fn non_ascii_digest_matches_known_vector() {
        let d = CanonicalHasher::digest_value(&json!({"name": "é"}));
        assert_eq!(d.as_str(), "1478f28f3a969f00354acc799090c8bb4f8ff0de");
    }

    #[test]
    fn local_digest_covers_collection_and_key() {
        assert_eq!(
            CanonicalHasher::local_digest("default", "alpha").as_str(),
            "4563d6ec3d01466e262a40d7eac4289e8c8a32f7"
        );
        assert_ne!(
            CanonicalHasher::local_digest("default", "alpha"),
            CanonicalHasher::local_digest("other", "alpha")
        );
    }

    #[test]
    fn local_and_remote_schemes_differ() {
        let local = CanonicalHasher::local_digest("default", "alpha");
        let remote = CanonicalHasher::remote_digest("alpha");
        assert_ne!(local, remote);
        assert_eq!(remote, CanonicalHasher::digest_str("alpha"));
    }

    #[test]
    fn text_key_bypasses_serialization() {
        let key = Key::from("x");
        assert_eq!(CanonicalHasher::digest_key(&key), CanonicalHasher::digest_str("x"));
        assert_ne!(
            CanonicalHasher::digest_key(&key),
            CanonicalHasher::digest_value(&json!("x"))
        );
    }

    fn arb_fields() -> impl Strategy<Value = Vec<(String, i64)>> {
        prop::collection::btree_map("[a-z]{1,6}", any::<i64>(), 0..8)
            .prop_map(|m| m.into_iter().collect())
    }

    proptest! {
        #[test]
        fn structured_digest_ignores_insertion_order(fields in arb_fields()) {
            let forward: Map<String, Value> =
                fields.iter().map(|(k, v)| (k.clone(), json!(v))).collect();
            let backward: Map<String, Value> =
                fields.iter().rev().map(|(k, v)| (k.clone(), json!(v))).collect();
            prop_assert_eq!(
                CanonicalHasher::digest_key(&Key::Structured(forward)),
                CanonicalHasher::digest_key(&Key::Structured(backward))
            );
        }

        #[test]
        fn digests_are_forty_hex_chars(s in ".*") {
            let d = CanonicalHasher::digest_str(&s);
            prop_assert_eq!(d.as_str().len(), 40);
            prop_assert!(d.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
