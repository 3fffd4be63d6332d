//! Numeric content checks
//!
//! Checks for NaN and infinite entries and lower bounds on the minimum
//! element of a scalar or container of numbers.

use super::traced;
use crate::error::{Bound, Result, ValidationError};
use ndarray::{ArrayBase, Data, Dimension};
use std::fmt::{Debug, Display};

/// A numeric scalar that the checks can inspect
pub trait Element: Copy + PartialOrd + Display + Debug {
    fn is_nan(self) -> bool;
    fn is_infinite(self) -> bool;
    fn zero() -> Self;
}

macro_rules! impl_element_float {
    ($($ty:ty),+) => {
        $(
            impl Element for $ty {
                fn is_nan(self) -> bool {
                    <$ty>::is_nan(self)
                }

                fn is_infinite(self) -> bool {
                    <$ty>::is_infinite(self)
                }

                fn zero() -> Self {
                    0.0
                }
            }
        )+
    };
}

macro_rules! impl_element_int {
    ($($ty:ty),+) => {
        $(
            impl Element for $ty {
                fn is_nan(self) -> bool {
                    false
                }

                fn is_infinite(self) -> bool {
                    false
                }

                fn zero() -> Self {
                    0
                }
            }
        )+
    };
}

impl_element_float!(f32, f64);
impl_element_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Iterator over the flattened elements of a [`NumericContainer`]
pub type NumericElements<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// A scalar or (possibly nested) container of numbers
pub trait NumericContainer {
    type Elem: Element;

    /// All elements, flattened in logical order
    fn elements(&self) -> NumericElements<'_, Self::Elem>;

    /// Smallest element, `None` when the container is empty
    ///
    /// NaN propagates: if any element is NaN the result is NaN.
    fn minimum(&self) -> Option<Self::Elem> {
        let mut elements = self.elements();
        let first = elements.next()?;
        Some(elements.fold(first, |min, x| {
            if min.is_nan() {
                min
            } else if x.is_nan() || x < min {
                x
            } else {
                min
            }
        }))
    }
}

macro_rules! impl_container_scalar {
    ($($ty:ty),+) => {
        $(
            impl NumericContainer for $ty {
                type Elem = $ty;

                fn elements(&self) -> NumericElements<'_, $ty> {
                    Box::new(std::iter::once(*self))
                }
            }
        )+
    };
}

impl_container_scalar!(
    f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

impl<C: NumericContainer + ?Sized> NumericContainer for &C {
    type Elem = C::Elem;

    fn elements(&self) -> NumericElements<'_, C::Elem> {
        (**self).elements()
    }
}

impl<C: NumericContainer> NumericContainer for [C] {
    type Elem = C::Elem;

    fn elements(&self) -> NumericElements<'_, C::Elem> {
        Box::new(self.iter().flat_map(|item| item.elements()))
    }
}

impl<C: NumericContainer, const N: usize> NumericContainer for [C; N] {
    type Elem = C::Elem;

    fn elements(&self) -> NumericElements<'_, C::Elem> {
        self.as_slice().elements()
    }
}

impl<C: NumericContainer> NumericContainer for Vec<C> {
    type Elem = C::Elem;

    fn elements(&self) -> NumericElements<'_, C::Elem> {
        self.as_slice().elements()
    }
}

impl<S, D> NumericContainer for ArrayBase<S, D>
where
    S: Data,
    S::Elem: Element,
    D: Dimension,
{
    type Elem = S::Elem;

    fn elements(&self) -> NumericElements<'_, S::Elem> {
        Box::new(self.iter().copied())
    }
}

/// Reject values that contain NaN or infinite entries
///
/// Both conditions are evaluated; when both hold only the NaN failure is
/// reported.
///
/// # Errors
/// [`ValidationError::NaN`] or [`ValidationError::NonFinite`].
pub fn nantest<V: NumericContainer + ?Sized>(value: &V, label: &str) -> Result<()> {
    let (has_nan, has_infinite) = value
        .elements()
        .fold((false, false), |(nan, inf), x| {
            (nan || x.is_nan(), inf || x.is_infinite())
        });

    if has_nan {
        return Err(traced(
            "nantest",
            ValidationError::NaN {
                label: label.to_string(),
            },
        ));
    }
    if has_infinite {
        return Err(traced(
            "nantest",
            ValidationError::NonFinite {
                label: label.to_string(),
            },
        ));
    }

    tracing::trace!(label, "nantest passed");
    Ok(())
}

/// Reject values whose minimum element is zero or negative
///
/// # Errors
/// [`ValidationError::Range`] carrying the minimum, or
/// [`ValidationError::Input`] for an empty container.
pub fn postest<V: NumericContainer + ?Sized>(value: &V, label: &str) -> Result<()> {
    check_minimum("postest", value, Bound::Positive, label)
}

/// Reject values whose minimum element is negative; zero is allowed
///
/// # Errors
/// [`ValidationError::Range`] carrying the minimum, or
/// [`ValidationError::Input`] for an empty container.
pub fn notnegativetest<V: NumericContainer + ?Sized>(value: &V, label: &str) -> Result<()> {
    check_minimum("notnegativetest", value, Bound::NonNegative, label)
}

fn check_minimum<V: NumericContainer + ?Sized>(
    check: &'static str,
    value: &V,
    bound: Bound,
    label: &str,
) -> Result<()> {
    let Some(minimum) = value.minimum() else {
        return Err(traced(
            check,
            ValidationError::input(
                check,
                format!("variable '{label}' is empty, so it has no minimum"),
            ),
        ));
    };

    let zero = <V::Elem as Element>::zero();
    let violated = match bound {
        Bound::Positive => minimum <= zero,
        Bound::NonNegative => minimum < zero,
    };
    if violated {
        return Err(traced(check, ValidationError::range(label, bound, minimum)));
    }

    tracing::trace!(label, %minimum, "{check} passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use ndarray::{array, Array2};

    #[test]
    fn test_nantest_finite_values() {
        assert!(nantest(&1.0_f64, "x").is_ok());
        assert!(nantest(&[1.0, -2.0, 3.5], "x").is_ok());
        assert!(nantest(&vec![vec![0.0_f32, 1.0], vec![2.0, 3.0]], "nested").is_ok());
        assert!(nantest(&array![[1_i32, 2], [3, 4]], "ints").is_ok());
        assert!(nantest(&Vec::<f64>::new(), "empty").is_ok());
    }

    #[test]
    fn test_nantest_nan() {
        let err = nantest(&[1.0, f64::NAN, 3.0], "flux").unwrap_err();
        assert_eq!(
            err,
            ValidationError::NaN {
                label: "flux".into()
            }
        );
        assert!(err.to_string().contains("flux"));
    }

    #[test]
    fn test_nantest_infinite() {
        let err = nantest(&array![1.0, f64::NEG_INFINITY], "flux").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonFinite);
    }

    #[test]
    fn test_nantest_reports_nan_before_infinity() {
        let err = nantest(&[f64::INFINITY, f64::NAN], "both").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NaN);
    }

    #[test]
    fn test_minimum() {
        assert_eq!([3_i32, 1, 2].minimum(), Some(1));
        assert_eq!(Vec::<f64>::new().minimum(), None);
        assert!([1.0, f64::NAN, -5.0].minimum().unwrap().is_nan());
        assert_eq!(array![[4.0, -1.5], [0.0, 2.0]].minimum(), Some(-1.5));
    }

    #[test]
    fn test_postest() {
        assert!(postest(&[0.1, 2.0, 3.0], "wl").is_ok());
        assert!(postest(&7_u32, "n").is_ok());

        let err = postest(&[1.0, 0.0, 2.0], "wl").unwrap_err();
        assert_eq!(err, ValidationError::range("wl", Bound::Positive, 0.0));

        let err = postest(&vec![3, -4, 5], "wl").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert!(err.to_string().contains("-4"));
    }

    #[test]
    fn test_notnegativetest() {
        assert!(notnegativetest(&[0.0, 2.0], "w").is_ok());
        assert!(notnegativetest(&0_i64, "w").is_ok());
        assert!(notnegativetest(&Array2::<f32>::zeros((3, 3)), "w").is_ok());

        let err = notnegativetest(&[0.0, -1e-9], "w").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_range_checks_on_empty_input() {
        let err = postest(&Vec::<f64>::new(), "empty").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
        assert!(notnegativetest(&[0_u8; 0], "empty").is_err());
    }
}
