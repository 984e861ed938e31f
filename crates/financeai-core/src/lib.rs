//! FinanceAI Core Library
//!
//! Error taxonomy, port traits (storage and content generation), request
//! validation and prompt construction for the FinanceAI backend.

// Re-export pure types from financeai-types
pub use financeai_types::*;

pub mod error;
pub mod ports;
pub mod prompts;
pub mod utils;
pub mod validation;

pub use error::{FinanceError, Result};
pub use validation::Validate;
