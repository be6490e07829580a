//! Request validation
//!
//! Payload structs derive `validator::Validate`; the extractor runs the
//! validation and the validators module holds the custom rules they share.

pub mod extractor;
pub mod validators;

pub use extractor::{OptionalJson, ValidatedJson};
