#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

//! # vartest
//!
//! Fail-fast checks for the properties a caller assumes about a variable:
//! its runtime type, its number of axes and their extents, its sign, and
//! whether it holds NaN or infinite entries.
//!
//! Each check returns `Ok(())` or the first [`ValidationError`] found, so call
//! sites propagate with `?`:
//!
//! ```rust
//! use vartest::{dimtest, nantest, postest, typetest, Kind};
//! use ndarray::array;
//!
//! # fn main() -> vartest::Result<()> {
//! let wavelengths = array![[500.1, 500.2, 500.3], [600.1, 600.2, 600.3]];
//!
//! dimtest(&wavelengths, &[2, 0], "wavelengths")?; // two orders, any number of pixels
//! nantest(&wavelengths, "wavelengths")?;
//! postest(&wavelengths, "wavelengths")?;
//! typetest(&1.5_f64, [Kind::Int, Kind::Float], "velocity step")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Values and expectations
//!
//! - [`NumericContainer`]: scalars, slices, arrays, nested `Vec`s and
//!   `ndarray` arrays of primitive numbers (`nantest`, `postest`,
//!   `notnegativetest`)
//! - [`Typed`]: anything that reports a [`Kind`], including
//!   `serde_json::Value` for heterogeneous data (`typetest`, `typetest_array`)
//! - [`Shaped`]: anything with a shape (`dimtest`)
//!
//! [`Expected`] and [`ExpectedShape`] deserialize with serde, so expectations
//! can live in configuration files.
//!
//! ## Logging
//!
//! Failed checks emit a `debug` event through `tracing`; passing checks emit
//! `trace`. The default `subscriber` feature adds `TracingConfig`.

pub mod error;
#[cfg(feature = "subscriber")]
pub mod tracing_config;
pub mod utils;

pub use error::{Bound, ErrorKind, Result, ValidationError};
pub use utils::validation::{
    dimtest, nantest, notnegativetest, postest, typetest, typetest_array, Element, Expected,
    ExpectedShape, Kind, NumericContainer, Shaped, Typed, TypedElements,
};

#[cfg(feature = "subscriber")]
pub use tracing_config::{init_env_tracing, TracingConfig, TracingFormat};
