//! Android resource tooling for droidtools
//!
//! This crate provides:
//! - Key extraction from `strings.xml` resource files
//! - Translation consistency audits against a default-language baseline

#![warn(missing_docs)]

pub mod resources;
pub mod translations;

pub use resources::{extract_keys, extract_keys_from_str, KeySet};
pub use translations::{audit, AuditSummary, Auditor, TranslationReport};
