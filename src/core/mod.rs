//! Request/result types, input validation, and minor-unit rounding.

mod error;
mod rounding;
mod types;
mod validation;

pub use error::*;
pub use rounding::vat_component;
pub use types::*;
pub use validation::*;
