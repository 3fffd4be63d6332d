//! Runtime type checks
//!
//! Values report a concrete [`Kind`]; expectations are a single kind or a
//! set of kinds ([`Expected`]). A kind satisfies an expectation when it is
//! the expected kind or one of its descendants, so `bool` passes as `int`
//! and `int` passes as `number`.

use super::traced;
use crate::error::{Result, ValidationError};
use ndarray::{ArrayBase, Axis, Data, Dimension};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Type descriptor used both for the actual type of a value and for expectations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    List,
    Tuple,
    /// n-dimensional numeric array
    Array,
    Map,
    /// Any numeric scalar (`int`, `float`, `bool`)
    Number,
    /// Any ordered container (`list`, `tuple`, `array`)
    Sequence,
    Any,
}

impl Kind {
    /// Direct ancestor in the kind hierarchy, `None` for [`Kind::Any`]
    pub fn parent(self) -> Option<Kind> {
        match self {
            Self::Any => None,
            Self::Bool => Some(Self::Int),
            Self::Int | Self::Float => Some(Self::Number),
            Self::List | Self::Tuple | Self::Array => Some(Self::Sequence),
            Self::Null | Self::Str | Self::Map | Self::Number | Self::Sequence => Some(Self::Any),
        }
    }

    /// Whether a value of kind `actual` is an instance of `self`
    pub fn accepts(self, actual: Kind) -> bool {
        let mut current = Some(actual);
        while let Some(kind) = current {
            if kind == self {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::List => "list",
            Self::Tuple => "tuple",
            Self::Array => "array",
            Self::Map => "map",
            Self::Number => "number",
            Self::Sequence => "sequence",
            Self::Any => "any",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Expected type of a value: one kind, or any of several (OR logic)
///
/// Deserializes from either `"int"` or `["int", "str"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expected {
    One(Kind),
    AnyOf(Vec<Kind>),
}

impl Expected {
    pub fn satisfied_by(&self, actual: Kind) -> bool {
        match self {
            Self::One(kind) => kind.accepts(actual),
            Self::AnyOf(kinds) => kinds.iter().any(|kind| kind.accepts(actual)),
        }
    }
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One(kind) => write!(f, "{kind}"),
            Self::AnyOf(kinds) => {
                f.write_str("any of ")?;
                for (i, kind) in kinds.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{kind}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<Kind> for Expected {
    fn from(kind: Kind) -> Self {
        Self::One(kind)
    }
}

impl From<Vec<Kind>> for Expected {
    fn from(kinds: Vec<Kind>) -> Self {
        Self::AnyOf(kinds)
    }
}

impl From<&[Kind]> for Expected {
    fn from(kinds: &[Kind]) -> Self {
        Self::AnyOf(kinds.to_vec())
    }
}

impl<const N: usize> From<[Kind; N]> for Expected {
    fn from(kinds: [Kind; N]) -> Self {
        Self::AnyOf(kinds.to_vec())
    }
}

/// Iterator over the elements of a sequence-like [`Typed`] value
///
/// Items are boxed so that containers can yield views they build on the fly,
/// such as the rows of a 2-D array.
pub type TypedElements<'a> = Box<dyn Iterator<Item = Box<dyn Typed + 'a>> + 'a>;

/// A value that can report its runtime [`Kind`]
pub trait Typed {
    fn kind(&self) -> Kind;

    /// Elements in order, for sequence-like values
    fn elements(&self) -> Option<TypedElements<'_>> {
        None
    }
}

impl<T: Typed + ?Sized> Typed for &T {
    fn kind(&self) -> Kind {
        (**self).kind()
    }

    fn elements(&self) -> Option<TypedElements<'_>> {
        (**self).elements()
    }
}

impl<T: Typed + ?Sized> Typed for Box<T> {
    fn kind(&self) -> Kind {
        (**self).kind()
    }

    fn elements(&self) -> Option<TypedElements<'_>> {
        (**self).elements()
    }
}

macro_rules! impl_typed_scalar {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Typed for $ty {
                fn kind(&self) -> Kind {
                    $kind
                }
            }
        )+
    };
}

impl_typed_scalar!(Kind::Int => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_typed_scalar!(Kind::Float => f32, f64);
impl_typed_scalar!(Kind::Bool => bool);
impl_typed_scalar!(Kind::Str => char, str, String);
impl_typed_scalar!(Kind::Null => ());

impl<T: Typed> Typed for Option<T> {
    fn kind(&self) -> Kind {
        self.as_ref().map_or(Kind::Null, Typed::kind)
    }

    fn elements(&self) -> Option<TypedElements<'_>> {
        self.as_ref().and_then(Typed::elements)
    }
}

impl<T: Typed> Typed for [T] {
    fn kind(&self) -> Kind {
        Kind::List
    }

    fn elements(&self) -> Option<TypedElements<'_>> {
        Some(Box::new(self.iter().map(|item| Box::new(item) as Box<dyn Typed + '_>)))
    }
}

impl<T: Typed, const N: usize> Typed for [T; N] {
    fn kind(&self) -> Kind {
        Kind::List
    }

    fn elements(&self) -> Option<TypedElements<'_>> {
        self.as_slice().elements()
    }
}

impl<T: Typed> Typed for Vec<T> {
    fn kind(&self) -> Kind {
        Kind::List
    }

    fn elements(&self) -> Option<TypedElements<'_>> {
        self.as_slice().elements()
    }
}

macro_rules! impl_typed_tuple {
    ($($ty:ident $var:ident),+) => {
        impl<$($ty: Typed),+> Typed for ($($ty,)+) {
            fn kind(&self) -> Kind {
                Kind::Tuple
            }

            fn elements(&self) -> Option<TypedElements<'_>> {
                let ($($var,)+) = self;
                let items: Vec<Box<dyn Typed + '_>> =
                    vec![$(Box::new($var) as Box<dyn Typed + '_>),+];
                Some(Box::new(items.into_iter()))
            }
        }
    };
}

impl_typed_tuple!(A a);
impl_typed_tuple!(A a, B b);
impl_typed_tuple!(A a, B b, C c);
impl_typed_tuple!(A a, B b, C c, D d);

impl<K, V, S> Typed for HashMap<K, V, S> {
    fn kind(&self) -> Kind {
        Kind::Map
    }
}

impl<K, V> Typed for BTreeMap<K, V> {
    fn kind(&self) -> Kind {
        Kind::Map
    }
}

impl<S, D> Typed for ArrayBase<S, D>
where
    S: Data,
    S::Elem: Typed,
    D: Dimension,
{
    fn kind(&self) -> Kind {
        Kind::Array
    }

    /// Rows (axis-0 views) for arrays of two or more axes, scalars otherwise
    fn elements(&self) -> Option<TypedElements<'_>> {
        if self.ndim() > 1 {
            let view = self.view().into_dyn();
            let rows = view.len_of(Axis(0));
            return Some(Box::new((0..rows).map(move |row| {
                Box::new(view.clone().index_axis_move(Axis(0), row)) as Box<dyn Typed + '_>
            })));
        }
        Some(Box::new(self.iter().map(|item| Box::new(item) as Box<dyn Typed + '_>)))
    }
}

impl Typed for serde_json::Value {
    fn kind(&self) -> Kind {
        use serde_json::Value;
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => Kind::Int,
            Value::Number(_) => Kind::Float,
            Value::String(_) => Kind::Str,
            Value::Array(_) => Kind::List,
            Value::Object(_) => Kind::Map,
        }
    }

    fn elements(&self) -> Option<TypedElements<'_>> {
        match self {
            serde_json::Value::Array(items) => items.as_slice().elements(),
            _ => None,
        }
    }
}

/// Check that `value` is an instance of the expected kind(s)
///
/// # Errors
/// [`ValidationError::TypeMismatch`] listing every expected kind and the actual one.
pub fn typetest<V, E>(value: &V, expected: E, label: &str) -> Result<()>
where
    V: Typed + ?Sized,
    E: Into<Expected>,
{
    check_kind(value, &expected.into(), label)
}

/// Check every element of a sequence against the expected kind(s)
///
/// `value` itself must be a list, tuple or array. Elements are checked in
/// order and the first mismatch is reported with the label
/// `element {index} of {label}`.
///
/// # Errors
/// [`ValidationError::TypeMismatch`] for a non-sequence value or the first
/// mismatching element.
pub fn typetest_array<V, E>(value: &V, expected: E, label: &str) -> Result<()>
where
    V: Typed + ?Sized,
    E: Into<Expected>,
{
    let expected = expected.into();
    check_kind(value, &Expected::One(Kind::Sequence), label)?;

    let Some(elements) = value.elements() else {
        return Err(traced(
            "typetest_array",
            ValidationError::type_mismatch(label, Expected::One(Kind::Sequence), value.kind()),
        ));
    };

    for (index, element) in elements.enumerate() {
        check_kind(&*element, &expected, &format!("element {index} of {label}"))?;
    }

    tracing::trace!(label, %expected, "typetest_array passed");
    Ok(())
}

fn check_kind<V: Typed + ?Sized>(value: &V, expected: &Expected, label: &str) -> Result<()> {
    let actual = value.kind();
    if !expected.satisfied_by(actual) {
        return Err(traced(
            "typetest",
            ValidationError::type_mismatch(label, expected.clone(), actual),
        ));
    }
    tracing::trace!(label, %expected, %actual, "typetest passed");
    Ok(())
}
