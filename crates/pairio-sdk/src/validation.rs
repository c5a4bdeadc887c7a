use pairio_crypto::CanonicalHasher;
use pairio_types::{Key, MAX_KEY_LENGTH, MAX_VALUE_LENGTH};

use crate::error::{SdkError, SdkResult};

/// The string a key is stored under: the text of a text key, or the digest
/// of a structured key.
pub fn storage_key(key: &Key) -> SdkResult<String> {
    let resolved = match key {
        Key::Text(s) => s.clone(),
        Key::Structured(_) => CanonicalHasher::digest_key(key).to_string(),
    };
    let actual = resolved.chars().count();
    if actual > MAX_KEY_LENGTH {
        return Err(SdkError::KeyTooLong {
            max: MAX_KEY_LENGTH,
            actual,
        });
    }
    Ok(resolved)
}

/// Values are capped at [`MAX_VALUE_LENGTH`] characters. `None` (delete) is
/// always accepted.
pub fn check_value(value: Option<&str>) -> SdkResult<()> {
    let Some(value) = value else {
        return Ok(());
    };
    let actual = value.chars().count();
    if actual > MAX_VALUE_LENGTH {
        return Err(SdkError::ValueTooLong {
            max: MAX_VALUE_LENGTH,
            actual,
        });
    }
    Ok(())
}
