//! Checks on a finished decomposition: lossless join, dependency preservation and the
//! normal form of each relation.

mod unionfind;

use crate::{
    fd::{
        candidate_keys, closure, project, Attribute, AttributeSet, FdSet, FunctionalDependency,
        Relation,
    },
};
use unionfind::UnionFind;

/// Largest relation [`is_3nf`] will enumerate candidate keys for.
pub const PRIME_SEARCH_LIMIT: usize = 16;

/// Chase test for a lossless join of `relations` over `universe`.
///
/// Builds a tableau with one row per relation, where a cell holds the distinguished
/// symbol of its column iff the relation has that attribute. Each dependency then unifies
/// the RHS symbols of every pair of rows agreeing on the LHS, until nothing changes. The
/// join is lossless iff some row becomes entirely distinguished.
pub fn is_lossless_join<T: Attribute>(
    universe: &AttributeSet<T>,
    relations: &[Relation<T>],
    fds: &[FunctionalDependency<T>],
) -> bool {
    let columns: Vec<&T> = universe.iter().collect();
    let (rows, cols) = (relations.len(), columns.len());
    if rows == 0 {
        return cols == 0;
    }

    // Symbol of row r, column c is `r * cols + c`; the distinguished symbol of column c is
    // `rows * cols + c`.
    let cell = |r: usize, c: usize| r * cols + c;
    let distinguished = |c: usize| rows * cols + c;

    let mut symbols = UnionFind::new((rows + 1) * cols);
    for (r, relation) in relations.iter().enumerate() {
        for (c, a) in columns.iter().enumerate() {
            if relation.contains(*a) {
                symbols.union(cell(r, c), distinguished(c));
            }
        }
    }

    let column_of = |a: &T| columns.iter().position(|x| *x == a);
    let fds: Vec<(Vec<usize>, Vec<usize>)> = fds
        .iter()
        .filter_map(|fd| {
            let lhs = fd.lhs.iter().map(column_of).collect::<Option<Vec<_>>>()?;
            let rhs = fd.rhs.iter().filter_map(column_of).collect();
            Some((lhs, rhs))
        })
        .collect();

    loop {
        if (0..rows).any(|r| (0..cols).all(|c| symbols.equiv(cell(r, c), distinguished(c)))) {
            return true;
        }

        let mut changed = false;
        for (lhs, rhs) in &fds {
            for r1 in 0..rows {
                for r2 in r1 + 1..rows {
                    if lhs.iter().all(|&c| symbols.equiv(cell(r1, c), cell(r2, c))) {
                        for &c in rhs {
                            changed |= symbols.union(cell(r1, c), cell(r2, c));
                        }
                    }
                }
            }
        }
        if !changed {
            return false;
        }
    }
}

/// Every dependency of `fds` follows from the dependencies that hold inside the
/// individual relations.
///
/// Uses the projected-closure test, so the projections are never materialized.
pub fn is_dependency_preserving<T: Attribute>(
    relations: &[Relation<T>],
    fds: &[FunctionalDependency<T>],
) -> bool {
    fds.iter().all(|fd| {
        let mut z = fd.lhs.clone();
        loop {
            let mut next = z.clone();
            for r in relations {
                let derived = closure(&(&next & r.attributes()), fds);
                next = &next | &(&derived & r.attributes());
            }
            if next == z {
                break;
            }
            z = next;
        }
        fd.rhs.is_subset(&z)
    })
}

/// Non-trivial dependencies inside `relation`, split to a single RHS attribute, whose
/// LHS is not a superkey of `relation`.
pub fn bcnf_violations<T: Attribute>(
    relation: &Relation<T>,
    fds: &[FunctionalDependency<T>],
) -> Vec<FunctionalDependency<T>> {
    let split: FdSet<T> = fds.iter().flat_map(|fd| fd.split()).collect();
    let projected = project(&split, relation);
    projected
        .iter()
        .filter(|fd| !fd.is_trivial() && !closure(&fd.lhs, &projected).is_superset(relation))
        .cloned()
        .collect()
}

pub fn is_bcnf<T: Attribute>(relation: &Relation<T>, fds: &[FunctionalDependency<T>]) -> bool {
    bcnf_violations(relation, fds).is_empty()
}

/// Every non-trivial dependency inside `relation` has a superkey LHS or a prime RHS.
///
/// Finding the prime attributes needs every candidate key, so `None` is returned for
/// relations wider than [`PRIME_SEARCH_LIMIT`].
pub fn is_3nf<T: Attribute>(
    relation: &Relation<T>,
    fds: &[FunctionalDependency<T>],
) -> Option<bool> {
    if relation.len() > PRIME_SEARCH_LIMIT {
        return None;
    }

    let split: FdSet<T> = fds.iter().flat_map(|fd| fd.split()).collect();
    let projected = project(&split, relation);
    let prime = candidate_keys(relation, &projected)
        .iter()
        .fold(AttributeSet::new(), |acc, key| &acc | key);

    Some(projected.iter().all(|fd| {
        fd.is_trivial()
            || closure(&fd.lhs, &projected).is_superset(relation)
            || fd.rhs.is_subset(&prime)
    }))
}
