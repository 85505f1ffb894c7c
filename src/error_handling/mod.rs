//! Error handling.
//!
//! This module provides the error types for the two halves of the tool:
//! - **Generation errors**: returned to the caller, fatal to that call
//! - **Lookup errors**: converted into validation statuses, never propagated
//!
//! Initialization errors cover logger setup in the binary.

mod types;

// Re-export public API
pub use types::{GenerationError, InitializationError, LookupError};
