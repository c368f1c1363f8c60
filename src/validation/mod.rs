//! Input sanitization and validation
//!
//! Pure functions from a raw JSON body to the typed store inputs. The
//! store trusts whatever these produce and does not re-validate.

mod errors;
mod sanitize;

pub use errors::ValidationError;
pub use sanitize::{parse_age, sanitize_and_validate, sanitize_patch, sanitize_text};
