//! Functional dependency algebra: attribute closure, minimal cover and candidate keys.
//!
//! Every algorithm visits attributes of a set in their `Ord` order and FDs in the order
//! they were given, so results are reproducible for identical input.

mod attribute_set;
mod candidate_key;
mod closure;
mod dependency;
mod minimal_cover;
mod relation;

pub use attribute_set::AttributeSet;
pub use candidate_key::{candidate_key, candidate_keys, is_superkey};
pub use closure::closure;
pub(crate) use closure::closure_with;
pub use dependency::{project, FdSet, FunctionalDependency};
pub use minimal_cover::minimal_cover;
pub use relation::Relation;

use std::{fmt, hash::Hash};

/// Trait for an attribute identifier.
pub trait Attribute: Clone + Ord + Eq + Hash + fmt::Debug + fmt::Display + Sync + Send {}
impl<T: Clone + Ord + Eq + Hash + fmt::Debug + fmt::Display + Sync + Send> Attribute for T {}
