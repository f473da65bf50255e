//! Field validation for event writes
//!
//! The store runs every create and update through these rules before
//! anything reaches a backend.

mod rules;

pub use rules::{
    normalize_optional, validate_limit, validate_tags, validate_title,
    MAX_LOCATION_LEN, MAX_TITLE_LEN, MAX_URL_LEN, TAG_DELIMITER,
};
