use crate::{
    error::{NormalizeError, Result},
    fd::{closure, Attribute, AttributeSet, FdSet, FunctionalDependency, Relation},
};
use ptree::{Style, TreeItem};
use ref_cast::RefCast;
use std::{borrow::Cow, io};

/// How a relation was split during BCNF decomposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BcnfTree<T: Attribute> {
    /// A relation in BCNF.
    Leaf(Relation<T>),
    /// A relation split on `violation` into the closure part and the remainder.
    Split {
        relation: Relation<T>,
        violation: FunctionalDependency<T>,
        parts: Vec<BcnfTree<T>>,
    },
}

impl<T: Attribute> BcnfTree<T> {
    pub fn relation(&self) -> &Relation<T> {
        match self {
            Self::Leaf(relation) | Self::Split { relation, .. } => relation,
        }
    }

    /// Leaves from left to right.
    pub fn leaves(&self) -> Vec<&Relation<T>> {
        match self {
            Self::Leaf(relation) => vec![relation],
            Self::Split { parts, .. } => parts.iter().flat_map(|p| p.leaves()).collect(),
        }
    }

    /// Leaves from left to right, repeats removed.
    pub fn into_relations(self) -> Vec<Relation<T>> {
        let mut relations: Vec<Relation<T>> = Vec::new();
        for leaf in self.leaves() {
            if !relations.contains(leaf) {
                relations.push(leaf.clone());
            }
        }
        relations
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Split { parts, .. } => 1 + parts.iter().map(|p| p.depth()).max().unwrap_or(0),
        }
    }
}

impl<T: Attribute> TreeItem for BcnfTree<T> {
    type Child = Self;

    fn write_self<W: io::Write>(&self, f: &mut W, style: &Style) -> io::Result<()> {
        match self {
            Self::Leaf(relation) => write!(f, "{}", style.paint(relation)),
            Self::Split {
                relation,
                violation,
                ..
            } => write!(f, "{}", style.paint(format!("{relation} split on {violation}"))),
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        match self {
            Self::Leaf(_) => Cow::from(vec![]),
            Self::Split { parts, .. } => Cow::from(parts),
        }
    }
}

/// BCNF decomposition, returning the relations only.
///
/// See [`bcnf_tree`].
pub fn decompose_bcnf<T: Attribute>(
    attrs: &AttributeSet<T>,
    fds: &[FunctionalDependency<T>],
) -> Result<Vec<Relation<T>>> {
    Ok(bcnf_tree(attrs, fds)?.into_relations())
}

/// Recursively split `attrs` on BCNF violations.
///
/// Dependencies are split into single-attribute RHS first. Each relation R is checked
/// against the dependencies of `fds` that lie inside R; on the first violation `L -> r`
/// it is split into `closure(L) ∩ R` and `R - (closure(L) - L)`, which share `L`, so the
/// split is lossless. Every branch is checked against the original `fds`. The result is
/// not always dependency preserving.
pub fn bcnf_tree<T: Attribute>(
    attrs: &AttributeSet<T>,
    fds: &[FunctionalDependency<T>],
) -> Result<BcnfTree<T>> {
    if attrs.is_empty() {
        return Err(NormalizeError::InvalidInput(
            "attribute universe is empty".to_string(),
        ));
    }
    if let Some(i) = fds.iter().position(|fd| fd.lhs.is_empty()) {
        return Err(NormalizeError::InvalidInput(format!(
            "FD #{i} has an empty left-hand side"
        )));
    }

    let fds: FdSet<T> = fds.iter().flat_map(|fd| fd.split()).collect();
    split(attrs.clone(), &fds)
}

fn split<T: Attribute>(relation: AttributeSet<T>, fds: &FdSet<T>) -> Result<BcnfTree<T>> {
    let projected = fds.project(&relation);
    let violation = match first_violation(Relation::ref_cast(&relation), &projected) {
        Some(violation) => violation,
        None => return Ok(BcnfTree::Leaf(relation.into())),
    };

    let derived = closure(&violation.lhs, &projected);
    let left = &derived & &relation;
    let right = &relation - &(&derived - &violation.lhs);
    if left.is_empty()
        || right.is_empty()
        || left.len() >= relation.len()
        || right.len() >= relation.len()
    {
        return Err(NormalizeError::InvariantViolation(format!(
            "splitting {relation} on {violation} gives {left} and {right}"
        )));
    }
    debug!("split {} on {} into {} and {}", relation, violation, left, right);

    let parts = vec![split(left, fds)?, split(right, fds)?];
    Ok(BcnfTree::Split {
        relation: relation.into(),
        violation,
        parts,
    })
}

/// First non-trivial dependency of `fds` inside `relation` whose LHS is not a superkey
/// of `relation`. Only the dependencies inside `relation` count towards the closure.
pub fn find_violation<T: Attribute>(
    relation: &Relation<T>,
    fds: &[FunctionalDependency<T>],
) -> Option<FunctionalDependency<T>> {
    first_violation(relation, &crate::fd::project(fds, relation))
}

/// [`find_violation`] over dependencies already projected onto `relation`.
fn first_violation<T: Attribute>(
    relation: &Relation<T>,
    projected: &[FunctionalDependency<T>],
) -> Option<FunctionalDependency<T>> {
    projected
        .iter()
        .find(|fd| !fd.is_trivial() && !closure(&fd.lhs, projected).is_superset(relation))
        .cloned()
}
