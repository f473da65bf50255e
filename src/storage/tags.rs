//! Delimited storage form for tag lists
//!
//! Only backends that keep tags in a single text column use this. Tags are
//! validated upstream never to contain the delimiter, which is what makes
//! `decode_tags(encode_tags(tags)) == tags` hold.

use crate::validation::TAG_DELIMITER;

/// Join tags into their stored form; an empty list is stored as `None`
pub fn encode_tags(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        return None;
    }
    Some(tags.join(&TAG_DELIMITER.to_string()))
}

/// Split the stored form back into a list; absent or empty means no tags
pub fn decode_tags(stored: Option<&str>) -> Vec<String> {
    match stored {
        Some(s) if !s.is_empty() => s.split(TAG_DELIMITER).map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        let tags = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let stored = encode_tags(&tags);
        assert_eq!(stored.as_deref(), Some("a,b,c"));
        assert_eq!(decode_tags(stored.as_deref()), tags);
    }

    #[test]
    fn test_empty_tags() {
        assert_eq!(encode_tags(&[]), None);
        assert!(decode_tags(None).is_empty());
        assert!(decode_tags(Some("")).is_empty());
    }

    #[test]
    fn test_tags_keep_inner_spaces() {
        let tags = vec!["heaven official".to_string(), "xie lian".to_string()];
        assert_eq!(decode_tags(encode_tags(&tags).as_deref()), tags);
    }
}
