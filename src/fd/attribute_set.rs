use super::Attribute;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fmt,
    ops::{BitAnd, BitOr, Sub},
};

/// A set of attributes.
///
/// Only shared access to the underlying set is exposed. Set operations build a new set,
/// so one value can be observed by several branches of a computation.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Deref,
    derive_more::AsRef,
    derive_more::From,
)]
#[serde(transparent)]
#[as_ref(forward)]
pub struct AttributeSet<T: Attribute>(pub(crate) BTreeSet<T>);

impl<T: Attribute> AttributeSet<T> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn singleton(attr: T) -> Self {
        Self(BTreeSet::from([attr]))
    }

    /// A copy of the set with `attr` removed.
    pub fn without(&self, attr: &T) -> Self {
        let mut set = self.0.clone();
        set.remove(attr);
        Self(set)
    }

    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.len() < other.len() && self.is_subset(other)
    }

    /// Return the element if the set holds exactly one.
    pub fn single(&self) -> Option<&T> {
        if self.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    pub fn into_inner(self) -> BTreeSet<T> {
        self.0
    }
}

impl<T: Attribute> Default for AttributeSet<T> {
    fn default() -> Self {
        Self(BTreeSet::new())
    }
}

impl<T: Attribute> FromIterator<T> for AttributeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(BTreeSet::from_iter(iter))
    }
}

impl<T: Attribute> IntoIterator for AttributeSet<T> {
    type Item = <BTreeSet<T> as IntoIterator>::Item;
    type IntoIter = <BTreeSet<T> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T: Attribute> IntoIterator for &'a AttributeSet<T> {
    type Item = &'a T;
    type IntoIter = std::collections::btree_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Attribute> fmt::Display for AttributeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{{}}");
        }

        for (i, v) in self.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Union.
impl<'a, 'b, T: Attribute> BitOr<&'b AttributeSet<T>> for &'a AttributeSet<T> {
    type Output = AttributeSet<T>;

    fn bitor(self, rhs: &'b AttributeSet<T>) -> Self::Output {
        self.0.union(&rhs.0).cloned().collect()
    }
}

/// Intersection.
impl<'a, 'b, T: Attribute> BitAnd<&'b AttributeSet<T>> for &'a AttributeSet<T> {
    type Output = AttributeSet<T>;

    fn bitand(self, rhs: &'b AttributeSet<T>) -> Self::Output {
        self.0.intersection(&rhs.0).cloned().collect()
    }
}

/// Difference.
impl<'a, 'b, T: Attribute> Sub<&'b AttributeSet<T>> for &'a AttributeSet<T> {
    type Output = AttributeSet<T>;

    fn sub(self, rhs: &'b AttributeSet<T>) -> Self::Output {
        self.0.difference(&rhs.0).cloned().collect()
    }
}

/// Build an `AttributeSet<String>` from identifiers, e.g. `attrs!(A B C)`.
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::fd::AttributeSet::<String>::new()
    };
    ($($x: ident)+) => {{
        let set: $crate::fd::AttributeSet<String> =
            [$(stringify!($x).to_string()),+].into_iter().collect();
        set
    }};
}
