//! Domain inputs with validation at construction
//!
//! Request bodies arrive as untyped JSON. They become typed inputs here or
//! fail with a [`ValidationError`] listing every offending field.

pub mod validation;
pub mod member;
pub mod workout;

pub use validation::{FieldReader, ValidationError};
pub use member::MemberInput;
pub use workout::WorkoutInput;
