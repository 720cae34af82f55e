//! Short-link slug validation.
//!
//! Slugs are the path segment of a short link (`https://glynk.to/<slug>`).
//! They are restricted to lowercase ASCII letters, digits and single inner
//! hyphens so that a slug can never impersonate another one through
//! homograph characters.

use std::sync::LazyLock;

use super::lists::{LOOKALIKE_CHARS, LOOKALIKE_RANGES, RESERVED_SLUGS};

/// Minimum slug length in characters.
pub const MIN_SLUG_LENGTH: usize = 3;

/// Maximum slug length in characters.
pub const MAX_SLUG_LENGTH: usize = 30;

/// Reasons a slug fails format validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("Slug is required")]
    Empty,

    #[error("Slug must be at least {min} characters long (got {length})", min = MIN_SLUG_LENGTH)]
    TooShort { length: usize },

    #[error("Slug must be at most {max} characters long (got {length})", max = MAX_SLUG_LENGTH)]
    TooLong { length: usize },

    #[error(
        "Slug contains the look-alike character '{character}' ({}); use plain Latin letters",
        codepoint(.character)
    )]
    Lookalike { character: char },

    #[error(
        "Slug contains the invalid character '{character}'; only a-z, 0-9 and hyphens are allowed"
    )]
    InvalidCharacter { character: char },

    #[error("Slug cannot start or end with a hyphen")]
    EdgeHyphen,

    #[error("Slug cannot contain consecutive hyphens")]
    ConsecutiveHyphens,

    #[error("The slug '{slug}' is reserved and cannot be used")]
    Reserved { slug: String },
}

fn codepoint(c: &char) -> String {
    format!("U+{:04X}", u32::from(*c))
}

/// Homograph and reserved-name tables used by [`validate_slug_format_with`].
#[derive(Debug, Clone)]
pub struct SlugRules {
    pub lookalike_ranges: Vec<(char, char)>,
    pub lookalike_chars: Vec<char>,
    pub reserved_slugs: Vec<String>,
}

impl Default for SlugRules {
    fn default() -> Self {
        Self {
            lookalike_ranges: LOOKALIKE_RANGES.to_vec(),
            lookalike_chars: LOOKALIKE_CHARS.to_vec(),
            reserved_slugs: RESERVED_SLUGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

static DEFAULT_RULES: LazyLock<SlugRules> = LazyLock::new(SlugRules::default);

impl SlugRules {
    /// Returns true if `c` belongs to a confusable block or the explicit list.
    pub fn is_lookalike(&self, c: char) -> bool {
        self.lookalike_chars.contains(&c)
            || self
                .lookalike_ranges
                .iter()
                .any(|&(start, end)| (start..=end).contains(&c))
    }

    pub fn is_reserved(&self, slug: &str) -> bool {
        self.reserved_slugs.iter().any(|reserved| reserved == slug)
    }
}

/// Validates a user-chosen slug with the built-in tables.
///
/// See [`validate_slug_format_with`].
pub fn validate_slug_format(input: &str) -> Result<String, SlugError> {
    validate_slug_format_with(input, &DEFAULT_RULES)
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
}

/// Validates a user-chosen slug and returns its normalized form.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed and the slug is lowercased
/// 2. Look-alike characters (Cyrillic, Greek, fullwidth, ...) are rejected
/// 3. Only ASCII `a-z`, `0-9` and `-` are allowed
/// 4. Length must be 3-30 characters
/// 5. No leading, trailing or consecutive hyphens
/// 6. Not one of the reserved route names (`api`, `health`, ...)
///
/// Character errors are reported before length errors and always name the
/// character as typed, even when its lowercase form differs. The normalized
/// output validates to itself.
///
/// # Errors
///
/// Returns the first [`SlugError`] encountered.
pub fn validate_slug_format_with(input: &str, rules: &SlugRules) -> Result<String, SlugError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SlugError::Empty);
    }

    if let Some(character) = trimmed
        .chars()
        .find(|&c| rules.is_lookalike(c) || c.to_lowercase().any(|l| rules.is_lookalike(l)))
    {
        return Err(SlugError::Lookalike { character });
    }

    if let Some(character) = trimmed
        .chars()
        .find(|&c| !c.to_lowercase().all(is_slug_char))
    {
        return Err(SlugError::InvalidCharacter { character });
    }

    let slug = trimmed.to_lowercase();

    // ASCII only from here, so byte length equals character count.
    let length = slug.len();
    if length < MIN_SLUG_LENGTH {
        return Err(SlugError::TooShort { length });
    }
    if length > MAX_SLUG_LENGTH {
        return Err(SlugError::TooLong { length });
    }

    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(SlugError::EdgeHyphen);
    }
    if slug.contains("--") {
        return Err(SlugError::ConsecutiveHyphens);
    }

    if rules.is_reserved(&slug) {
        return Err(SlugError::Reserved { slug });
    }

    Ok(slug)
}
