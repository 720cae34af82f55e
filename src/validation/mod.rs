//! Input validation for slugs, custom domains and destination URLs.
//!
//! Every validator is a pure function returning `Result<normalized, Error>`:
//! the `Ok` value is the sanitized form to store, the error enum carries a
//! user-facing message. No validator performs I/O.
//!
//! Reference tables (TLDs, reserved domains, look-alike characters, ...) live
//! in [`lists`] and reach the validators through the `*Rules` structs, so they
//! can be swapped in tests or updated without touching the checks.

pub mod domain;
pub mod lists;
pub mod slug;
pub mod url;

pub use self::domain::{
    DomainError, DomainOptions, DomainRules, sanitize_domain, validate_domain,
    validate_domain_with,
};
pub use self::slug::{SlugError, SlugRules, validate_slug_format, validate_slug_format_with};
pub use self::url::{UrlError, UrlRules, validate_url, validate_url_with};
