//! Validation rules and column limits

use crate::error::{ArchiveError, ArchiveResult};

/// Separator used when tags are stored as a single string
pub const TAG_DELIMITER: char = ',';

pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_LOCATION_LEN: usize = 255;
pub const MAX_URL_LEN: usize = 512;

/// Trim the title and reject it when empty or too long
pub fn validate_title(title: &str) -> ArchiveResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ArchiveError::validation("title", "must not be empty"));
    }
    check_len("title", title, MAX_TITLE_LEN)?;
    Ok(title.to_string())
}

/// Trim an optional text field; blank values collapse to `None`
pub fn normalize_optional(
    field: &str,
    value: Option<String>,
    max_len: Option<usize>,
) -> ArchiveResult<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Some(max) = max_len {
        check_len(field, trimmed, max)?;
    }
    Ok(Some(trimmed.to_string()))
}

/// Tags are trimmed; blank tags and tags containing the delimiter are
/// rejected so the stored form always splits back into the same list.
pub fn validate_tags(tags: Vec<String>) -> ArchiveResult<Vec<String>> {
    tags.into_iter()
        .map(|tag| {
            let tag = tag.trim();
            if tag.is_empty() {
                return Err(ArchiveError::validation("tags", "tags must not be blank"));
            }
            if tag.contains(TAG_DELIMITER) {
                return Err(ArchiveError::validation(
                    "tags",
                    format!("tag '{}' must not contain '{}'", tag, TAG_DELIMITER),
                ));
            }
            Ok(tag.to_string())
        })
        .collect()
}

/// Convert a caller-supplied limit, rejecting zero and negatives
pub fn validate_limit(limit: i64) -> ArchiveResult<usize> {
    if limit <= 0 {
        return Err(ArchiveError::validation(
            "limit",
            format!("must be a positive number, got {}", limit),
        ));
    }
    usize::try_from(limit)
        .map_err(|_| ArchiveError::validation("limit", format!("{} is too large", limit)))
}

fn check_len(field: &str, value: &str, max: usize) -> ArchiveResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(ArchiveError::validation(
            field,
            format!("must be at most {} characters, got {}", max, len),
        ));
    }
    Ok(())
}
