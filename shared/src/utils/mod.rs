//! Common utility functions

pub mod identity_numbers;
pub mod phone;
pub mod validation;

// Re-export commonly used utilities
pub use identity_numbers::*;
pub use phone::*;
pub use validation::*;
