//! Fail-fast variable checks
//!
//! Every check returns `Ok(())` when the value is acceptable and the first
//! failure otherwise. Nothing is cached between calls.

pub mod numeric;
pub mod shape;
pub mod types;

pub use numeric::{nantest, notnegativetest, postest, Element, NumericContainer};
pub use shape::{dimtest, ExpectedShape, Shaped};
pub use types::{typetest, typetest_array, Expected, Kind, Typed, TypedElements};

use crate::error::ValidationError;

/// Emit a debug event for a failed check and hand the error back
pub(crate) fn traced(check: &'static str, err: ValidationError) -> ValidationError {
    tracing::debug!(
        check,
        kind = ?err.kind(),
        label = err.label().unwrap_or_default(),
        "{err}"
    );
    err
}
