//! Dimensionality checks

use super::traced;
use super::types::{typetest, typetest_array, Kind};
use crate::error::{Result, ValidationError};
use ndarray::{ArrayBase, Data, Dimension};
use serde::{Deserialize, Serialize};

/// A value with a number of axes and an extent along each of them
pub trait Shaped {
    /// Extent of every axis, outermost first; empty for scalars
    fn shape(&self) -> Vec<usize>;

    fn ndim(&self) -> usize {
        self.shape().len()
    }
}

macro_rules! impl_shaped_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Shaped for $ty {
                fn shape(&self) -> Vec<usize> {
                    Vec::new()
                }
            }
        )+
    };
}

impl_shaped_scalar!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, str,
    String,
);

/// Shape of a sequence of `len` items whose own shapes are `inner`
///
/// Axes are kept only as far as every item agrees, so ragged input stops
/// at the first axis where the items differ.
fn sequence_shape<I>(len: usize, inner: I) -> Vec<usize>
where
    I: IntoIterator<Item = Vec<usize>>,
{
    let mut common: Option<Vec<usize>> = None;
    for shape in inner {
        match common.as_mut() {
            None => common = Some(shape),
            Some(prefix) => {
                let agreed = prefix
                    .iter()
                    .zip(&shape)
                    .take_while(|(a, b)| a == b)
                    .count();
                prefix.truncate(agreed);
            }
        }
    }

    let mut shape = vec![len];
    shape.extend(common.unwrap_or_default());
    shape
}

impl<T: Shaped + ?Sized> Shaped for &T {
    fn shape(&self) -> Vec<usize> {
        (**self).shape()
    }
}

impl<T: Shaped> Shaped for [T] {
    fn shape(&self) -> Vec<usize> {
        sequence_shape(self.len(), self.iter().map(Shaped::shape))
    }
}

impl<T: Shaped, const N: usize> Shaped for [T; N] {
    fn shape(&self) -> Vec<usize> {
        self.as_slice().shape()
    }
}

impl<T: Shaped> Shaped for Vec<T> {
    fn shape(&self) -> Vec<usize> {
        self.as_slice().shape()
    }
}

impl<S, D> Shaped for ArrayBase<S, D>
where
    S: Data,
    D: Dimension,
{
    fn shape(&self) -> Vec<usize> {
        ArrayBase::shape(self).to_vec()
    }

    fn ndim(&self) -> usize {
        ArrayBase::ndim(self)
    }
}

impl Shaped for serde_json::Value {
    fn shape(&self) -> Vec<usize> {
        match self {
            serde_json::Value::Array(items) => items.as_slice().shape(),
            _ => Vec::new(),
        }
    }
}

const SIZES_LABEL: &str = "sizes in dimtest";

/// Expected extent of every axis; `0` leaves an axis unconstrained
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpectedShape(Vec<i64>);

impl ExpectedShape {
    pub fn new<S: Into<Vec<i64>>>(sizes: S) -> Self {
        Self(sizes.into())
    }

    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    pub fn sizes(&self) -> &[i64] {
        &self.0
    }
}

impl From<Vec<i64>> for ExpectedShape {
    fn from(sizes: Vec<i64>) -> Self {
        Self(sizes)
    }
}

impl From<&[i64]> for ExpectedShape {
    fn from(sizes: &[i64]) -> Self {
        Self(sizes.to_vec())
    }
}

impl<const N: usize> From<[i64; N]> for ExpectedShape {
    fn from(sizes: [i64; N]) -> Self {
        Self(sizes.to_vec())
    }
}

impl AsRef<[i64]> for ExpectedShape {
    fn as_ref(&self) -> &[i64] {
        &self.0
    }
}

impl TryFrom<&serde_json::Value> for ExpectedShape {
    type Error = ValidationError;

    /// Read sizes from untyped data, which must be a sequence of integers
    ///
    /// Booleans count as integers here, as they do for [`Kind::Int`], and
    /// read as `0` and `1`.
    fn try_from(value: &serde_json::Value) -> Result<Self> {
        typetest(value, Kind::Sequence, SIZES_LABEL)?;
        typetest_array(value, Kind::Int, SIZES_LABEL)?;

        let items = value.as_array().map(Vec::as_slice).unwrap_or_default();
        items
            .iter()
            .enumerate()
            .map(|(axis, item)| match item {
                serde_json::Value::Bool(flag) => Ok(i64::from(*flag)),
                _ => item.as_i64().ok_or_else(|| {
                    ValidationError::input(
                        "dimtest",
                        format!("size {item} at axis {axis} does not fit in a signed 64-bit integer"),
                    )
                }),
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

/// Check the number of axes and the extent of each axis of `value`
///
/// `sizes` holds one entry per expected axis. A positive entry must match the
/// actual extent exactly and `0` accepts any extent. Negative entries make the
/// expectation malformed and are rejected before `value` is looked at.
///
/// # Errors
/// [`ValidationError::Input`] for a negative entry,
/// [`ValidationError::RankMismatch`] when the number of axes differs, and
/// [`ValidationError::AxisMismatch`] for the first axis whose extent differs.
pub fn dimtest<V: Shaped + ?Sized>(value: &V, sizes: &[i64], label: &str) -> Result<()> {
    if let Some((axis, &size)) = sizes.iter().enumerate().find(|&(_, &size)| size < 0) {
        return Err(traced(
            "dimtest",
            ValidationError::input(
                format!("dimtest of '{label}'"),
                format!("sizes contains negative value {size} at axis {axis}"),
            ),
        ));
    }

    let shape = value.shape();
    if shape.len() != sizes.len() {
        return Err(traced(
            "dimtest",
            ValidationError::RankMismatch {
                label: label.to_string(),
                actual: shape.len(),
                expected: sizes.len(),
            },
        ));
    }

    for (axis, (&size, &actual)) in sizes.iter().zip(&shape).enumerate() {
        let Ok(expected) = usize::try_from(size) else {
            continue;
        };
        if expected > 0 && expected != actual {
            return Err(traced(
                "dimtest",
                ValidationError::AxisMismatch {
                    label: label.to_string(),
                    axis,
                    actual,
                    expected,
                },
            ));
        }
    }

    tracing::trace!(label, ?shape, "dimtest passed");
    Ok(())
}
