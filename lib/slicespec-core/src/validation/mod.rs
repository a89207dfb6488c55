//! Seven-phase validation of extracted documents.
//!
//! Phases run strictly in order and stop at the first failure:
//!
//! 1. file structure
//! 2. operation integrity
//! 3. response integrity
//! 4. reference resolution
//! 5. component completeness (implied by phase 4)
//! 6. payload equivalence against the source document (skipped without one)
//! 7. version validation
//!
//! Failures are values ([`ValidationResult`]), not errors.

mod refs;
mod result;
mod validator;

pub use result::{ValidationPhase, ValidationResult};
pub use validator::{Validator, validate};
