//! Field validators shared by the domain entities.
//!
//! Keys follow `^[\w-]+$` and names `^[\w\- ]+$`, both between 1 and 32
//! characters, where `\w` is any Unicode alphanumeric character or `_`.

use std::collections::HashSet;

use validator::ValidationError;

/// Maximum number of characters allowed in keys and names.
pub const MAX_KEY_LENGTH: usize = 32;
/// Maximum number of characters allowed in a vote item icon (flags are two code points).
pub const MAX_ICON_LENGTH: usize = 2;

/// Entities identified by a key, compared by that key alone.
pub trait Keyed {
    /// Identifier of the entity.
    fn key(&self) -> &str;
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_key_char(c: char) -> bool {
    is_word_char(c) || c == '-'
}

fn is_name_char(c: char) -> bool {
    is_key_char(c) || c == ' '
}

fn check_length(value: &str, code: &'static str, max: usize) -> Result<(), ValidationError> {
    let length = value.chars().count();
    if length == 0 || length > max {
        let mut err = ValidationError::new(code);
        err.message = Some(format!("must be between 1 and {max} characters (got {length})").into());
        err.add_param("value".into(), &value);
        return Err(err);
    }
    Ok(())
}

/// Validates that `key` only holds word characters and hyphens.
///
/// ```ignore
/// validate_key("eurovision24") // Ok
/// validate_key("no spaces")    // Err
/// ```
pub fn validate_key(key: &str) -> Result<(), ValidationError> {
    check_length(key, "key_length", MAX_KEY_LENGTH)?;
    if !key.chars().all(is_key_char) {
        let mut err = ValidationError::new("key_format");
        err.message = Some("key must contain only word characters and hyphens".into());
        err.add_param("value".into(), &key);
        return Err(err);
    }
    Ok(())
}

/// Validates a player name: word characters, hyphens and spaces.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    check_length(name, "name_length", MAX_KEY_LENGTH)?;
    if !name.chars().all(is_name_char) {
        let mut err = ValidationError::new("name_format");
        err.message = Some("name must contain only word characters, hyphens and spaces".into());
        err.add_param("value".into(), &name);
        return Err(err);
    }
    Ok(())
}

/// Validates a vote item icon.
pub fn validate_icon(icon: &str) -> Result<(), ValidationError> {
    check_length(icon, "icon_length", MAX_ICON_LENGTH)
}

/// Fails when two entries of `entries` share the same key.
pub fn validate_unique_keys<T: Keyed>(entries: &[T]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.key()) {
            let mut err = ValidationError::new("unique_keys");
            err.message = Some(format!("duplicate key `{}`", entry.key()).into());
            err.add_param("key".into(), &entry.key());
            return Err(err);
        }
    }
    Ok(())
}

/// Derive a key from free text.
///
/// The text is lower-cased, every run of characters that cannot appear in a
/// key becomes a single hyphen, and hyphens at either end are trimmed.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if is_key_char(c) {
            slug.push(c);
            in_run = false;
        } else if !in_run {
            slug.push('-');
            in_run = true;
        }
    }
    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry(&'static str);

    impl Keyed for Entry {
        fn key(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_validate_key_valid() {
        assert!(validate_key("eurovision24").is_ok());
        assert!(validate_key("is-this_ok").is_ok());
        assert!(validate_key("a").is_ok());
        assert!(validate_key(&"k".repeat(32)).is_ok());
        assert!(validate_key("größe").is_ok());
    }

    #[test]
    fn test_validate_key_invalid() {
        assert!(validate_key("").is_err());
        assert!(validate_key(&"k".repeat(33)).is_err());
        assert!(validate_key("This should fail").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("semi;colon").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("My Name").is_ok());
        assert!(validate_name("jean-luc_2").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("who?").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name(&"n".repeat(33)).is_err());
    }

    #[test]
    fn test_validate_icon_counts_characters() {
        assert!(validate_icon("🇭🇷").is_ok()); // two regional indicators
        assert!(validate_icon("x").is_ok());
        assert!(validate_icon("").is_err());
        assert!(validate_icon("abc").is_err());
    }

    #[test]
    fn test_validate_unique_keys() {
        assert!(validate_unique_keys::<Entry>(&[]).is_ok());
        assert!(validate_unique_keys(&[Entry("a"), Entry("b")]).is_ok());

        let err = validate_unique_keys(&[Entry("a"), Entry("b"), Entry("a")]).unwrap_err();
        assert_eq!(err.code, "unique_keys");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(
            slugify("Is this correct?   Not really."),
            "is-this-correct-not-really"
        );
        assert_eq!(slugify("United Kingdom"), "united-kingdom");
        assert_eq!(slugify("a - b"), "a---b");
        assert_eq!(slugify("--Already-a-key--"), "already-a-key");
        assert_eq!(slugify("?!"), "");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for text in ["Eurovision 2024", "Is this correct?   Not really.", "x"] {
            let once = slugify(text);
            assert_eq!(slugify(&once), once);
        }
    }
}
