//! Parser error handling module
//!
//! This module provides error handling for the ORCA input parser:
//! - Categorized error codes for filtering and documentation
//! - Hints for common mistakes
//! - Related span tracking (e.g., the line that interrupted a block)

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::{RelatedInfo, SyntaxError};
