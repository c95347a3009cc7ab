//! Form data accumulated across wizard steps.

mod accumulator;
pub mod validate;
mod value;

pub use accumulator::{merge, FormAccumulator};
pub use value::FieldValue;
