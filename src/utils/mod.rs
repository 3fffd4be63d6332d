//! Utility modules for common operations

pub mod validation;

pub use validation::{
    dimtest, nantest, notnegativetest, postest, typetest, typetest_array, Element, Expected,
    ExpectedShape, Kind, NumericContainer, Shaped, Typed,
};
