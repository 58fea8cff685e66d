//! Error types for the two failure classes of the engine.
//!
//! Data-level findings ([`ValidationError`], [`ValidationErrors`]) are
//! accumulated and never interrupt a run; configuration failures
//! ([`ValidatorError`]) abort the call that detected them.

mod validation_error;
mod validator_error;

pub use validation_error::{ValidationError, ValidationErrors};
pub use validator_error::ValidatorError;
