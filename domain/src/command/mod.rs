//! Command domain module
//!
//! A **command** is the schema-validated entry point a conversational
//! workflow uses to reach exactly one airline tool. The domain side holds the
//! declared signature and the validation rules; the wrappers themselves live
//! in the application layer.
//!
//! ```text
//! params (JSON) ──▶ validate(signature) ──▶ NOT_FOUND → None ──▶ tool
//!                          │                                      │
//!                   CommandError                        response template
//!                          └────────────▶ CommandOutcome ◀────────┘
//! ```

pub mod entities;
pub mod validation;
pub mod value_objects;

pub use entities::{CommandSignature, FieldConstraint, FieldSpec};
pub use validation::{field_value, optional_str, require, validate};
pub use value_objects::{CommandError, CommandOutcome, NOT_FOUND};
