use super::{closure, Attribute, AttributeSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `lhs -> rhs`.
///
/// A multi-attribute `rhs` stands for one dependency per attribute sharing the same `lhs`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FunctionalDependency<T: Attribute> {
    #[serde(rename = "left")]
    pub lhs: AttributeSet<T>,
    #[serde(rename = "right")]
    pub rhs: AttributeSet<T>,
}

impl<T: Attribute> FunctionalDependency<T> {
    pub fn new(lhs: AttributeSet<T>, rhs: AttributeSet<T>) -> Self {
        Self { lhs, rhs }
    }

    /// Every attribute of `rhs` is already in `lhs`.
    pub fn is_trivial(&self) -> bool {
        self.rhs.is_subset(&self.lhs)
    }

    /// Split into singleton-RHS dependencies, one per attribute of `rhs`.
    pub fn split(&self) -> impl Iterator<Item = Self> + '_ {
        self.rhs
            .iter()
            .map(|r| Self::new(self.lhs.clone(), AttributeSet::singleton(r.clone())))
    }

    pub fn single_rhs(&self) -> Option<&T> {
        self.rhs.single()
    }

    /// Both sides lie inside `relation`.
    pub fn is_within(&self, relation: &AttributeSet<T>) -> bool {
        self.lhs.is_subset(relation) && self.rhs.is_subset(relation)
    }

    pub fn attributes(&self) -> AttributeSet<T> {
        &self.lhs | &self.rhs
    }
}

impl<T: Attribute> fmt::Display for FunctionalDependency<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.lhs, self.rhs)
    }
}

/// An ordered list of functional dependencies.
///
/// The order carries no meaning for the dependencies themselves, but it is the order in
/// which every algorithm visits them.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Deref,
    derive_more::AsRef,
    derive_more::From,
)]
#[serde(transparent)]
#[as_ref(forward)]
pub struct FdSet<T: Attribute>(pub(crate) Vec<FunctionalDependency<T>>);

impl<T: Attribute> FdSet<T> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Replace every dependency by its singleton-RHS parts, keeping the order.
    pub fn split_rhs(&self) -> FdSet<T> {
        self.iter().flat_map(|fd| fd.split()).collect()
    }

    /// Dependencies that lie entirely inside `relation`.
    pub fn project(&self, relation: &AttributeSet<T>) -> FdSet<T> {
        project(self, relation)
    }

    /// `fd` follows from this set.
    pub fn implies(&self, fd: &FunctionalDependency<T>) -> bool {
        fd.rhs.is_subset(&closure(&fd.lhs, self))
    }

    /// Both sets imply each other.
    pub fn is_equivalent(&self, other: &FdSet<T>) -> bool {
        self.iter().all(|fd| other.implies(fd)) && other.iter().all(|fd| self.implies(fd))
    }

    pub fn into_inner(self) -> Vec<FunctionalDependency<T>> {
        self.0
    }
}

/// Keep the dependencies of `fds` whose LHS and RHS both lie inside `relation`.
pub fn project<T: Attribute>(
    fds: &[FunctionalDependency<T>],
    relation: &AttributeSet<T>,
) -> FdSet<T> {
    fds.iter()
        .filter(|fd| fd.is_within(relation))
        .cloned()
        .collect()
}

impl<T: Attribute> Default for FdSet<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: Attribute> FromIterator<FunctionalDependency<T>> for FdSet<T> {
    fn from_iter<I: IntoIterator<Item = FunctionalDependency<T>>>(iter: I) -> Self {
        Self(Vec::from_iter(iter))
    }
}

impl<T: Attribute> IntoIterator for FdSet<T> {
    type Item = FunctionalDependency<T>;
    type IntoIter = std::vec::IntoIter<FunctionalDependency<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T: Attribute> IntoIterator for &'a FdSet<T> {
    type Item = &'a FunctionalDependency<T>;
    type IntoIter = std::slice::Iter<'a, FunctionalDependency<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Attribute> fmt::Display for FdSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fd) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{fd}")?;
        }
        Ok(())
    }
}

/// Build a `FunctionalDependency<String>`, e.g. `fd!(A B => C)`.
#[macro_export]
macro_rules! fd {
    ($($l: ident)+ => $($r: ident)+) => {
        $crate::fd::FunctionalDependency::new($crate::attrs!($($l)+), $crate::attrs!($($r)+))
    };
}

/// Build an `FdSet<String>`, e.g. `fds!(A B => C, C => D)`.
#[macro_export]
macro_rules! fds {
    () => {
        $crate::fd::FdSet::<String>::new()
    };
    ($($($l: ident)+ => $($r: ident)+),+ $(,)?) => {{
        let fds: $crate::fd::FdSet<String> = vec![$($crate::fd!($($l)+ => $($r)+)),+]
            .into_iter()
            .collect();
        fds
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;

    #[test]
    fn test_display() {
        assert_eq!("A B -> C", format!("{}", fd!(B A => C)));
        assert_eq!("A -> B, B -> C", format!("{}", fds!(A => B, B => C)));
    }

    #[test]
    fn test_split() {
        let parts: Vec<_> = fd!(A => B C).split().collect();
        assert_eq!(vec![fd!(A => B), fd!(A => C)], parts);
        assert_eq!(
            fds!(A => B, A => C, C => D),
            fds!(A => B C, C => D).split_rhs()
        );
    }

    #[test]
    fn test_trivial() {
        assert!(fd!(A B => A).is_trivial());
        assert!(!fd!(A B => C).is_trivial());
        assert!(!fd!(A => A B).is_trivial());
    }

    #[test]
    fn test_project() {
        let fds = fds!(A => B, B => C, A C => D, A => B D);
        assert_eq!(fds!(A => B), fds.project(&attrs!(A B)));
        assert_eq!(fds!(A => B, B => C), fds.project(&attrs!(A B C)));
        assert_eq!(fds!(A => B, A => B D), fds.project(&attrs!(A B D)));
        assert_eq!(fds, fds.project(&attrs!(A B C D)));
    }

    #[test]
    fn test_implies_equivalent() {
        let fds = fds!(A => B, B => C);
        assert!(fds.implies(&fd!(A => C)));
        assert!(!fds.implies(&fd!(C => A)));
        assert!(fds.is_equivalent(&fds!(A => B C, B => C)));
        assert!(!fds.is_equivalent(&fds!(A => B)));
    }
}
