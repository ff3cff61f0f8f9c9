use super::{Attribute, AttributeSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The schema of one decomposed table.
///
/// Two relations are equal iff their attribute sets are equal.
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
    derive_more::Into,
    ref_cast::RefCast,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Relation<T: Attribute>(pub AttributeSet<T>);

impl<T: Attribute> Relation<T> {
    pub fn attributes(&self) -> &AttributeSet<T> {
        &self.0
    }
}

impl<T: Attribute> FromIterator<T> for Relation<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(AttributeSet::from_iter(iter))
    }
}

impl<T: Attribute> fmt::Display for Relation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0)
    }
}
