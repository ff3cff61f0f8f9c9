use super::{closure, project, Attribute, AttributeSet, FunctionalDependency};
use itertools::Itertools;

/// `x` determines every attribute of `attrs`, using only the dependencies of `fds` that
/// lie inside `attrs`.
///
/// For the full attribute universe the restriction keeps every dependency. Every LHS in
/// `fds` must be non-empty, as for [`closure`].
pub fn is_superkey<T: Attribute>(
    x: &AttributeSet<T>,
    attrs: &AttributeSet<T>,
    fds: &[FunctionalDependency<T>],
) -> bool {
    let fds = project(fds, attrs);
    closure(x, &fds).is_superset(attrs)
}

/// Find a candidate key of `attrs`.
///
/// Starting from `attrs`, each attribute is dropped for good when the rest is still a
/// superkey. Attributes are tried in their `Ord` order, not in the order a schema lists
/// them, so with attributes `[B, A]` and both `A` and `B` keys, `A` is tried first and the
/// key returned is `B`. The result is always minimal. The superkey test is the one of
/// [`is_superkey`], and every LHS in `fds` must be non-empty.
pub fn candidate_key<T: Attribute>(
    attrs: &AttributeSet<T>,
    fds: &[FunctionalDependency<T>],
) -> AttributeSet<T> {
    let fds = project(fds, attrs);
    let mut key = attrs.clone();
    for a in attrs.iter() {
        let reduced = key.without(a);
        if closure(&reduced, &fds).is_superset(attrs) {
            key = reduced;
        }
    }
    key
}

/// Enumerate every candidate key of `attrs`, smallest first.
///
/// Exponential in `attrs.len()`.
pub fn candidate_keys<T: Attribute>(
    attrs: &AttributeSet<T>,
    fds: &[FunctionalDependency<T>],
) -> Vec<AttributeSet<T>> {
    let fds = project(fds, attrs);
    let mut keys: Vec<AttributeSet<T>> = Vec::new();
    for k in 0..=attrs.len() {
        for combination in attrs.iter().cloned().combinations(k) {
            let x: AttributeSet<T> = combination.into_iter().collect();
            if keys.iter().any(|key| key.is_subset(&x)) {
                continue;
            }
            if closure(&x, &fds).is_superset(attrs) {
                keys.push(x);
            }
        }
    }
    keys
}
