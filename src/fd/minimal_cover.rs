use super::{closure, closure_with, Attribute, FdSet, FunctionalDependency};
use crate::error::{NormalizeError, Result};

/// Compute a minimal (canonical) cover of `fds`.
///
/// The result is equivalent to `fds`, every RHS is a single attribute, no LHS attribute
/// is extraneous and no dependency follows from the others. It is built in three passes:
///
/// 1. split every RHS into single attributes;
/// 2. for each dependency in order, drop each LHS attribute (in order) whose removal keeps
///    the RHS inside the closure of the remaining LHS under the current set;
/// 3. repeatedly drop the first dependency implied by all the others, until none is.
///
/// When several minimal covers exist, the one returned is fixed by the input order.
pub fn minimal_cover<T: Attribute>(fds: &[FunctionalDependency<T>]) -> Result<FdSet<T>> {
    if let Some(i) = fds.iter().position(|fd| fd.lhs.is_empty()) {
        return Err(NormalizeError::InvalidInput(format!(
            "FD #{i} has an empty left-hand side"
        )));
    }

    let mut cover: Vec<FunctionalDependency<T>> = fds.iter().flat_map(|fd| fd.split()).collect();
    reduce_lhs(&mut cover)?;
    remove_redundant(&mut cover);
    Ok(FdSet(cover))
}

fn reduce_lhs<T: Attribute>(cover: &mut [FunctionalDependency<T>]) -> Result<()> {
    for i in 0..cover.len() {
        let attrs: Vec<T> = cover[i].lhs.iter().cloned().collect();
        for a in attrs {
            let reduced = cover[i].lhs.without(&a);
            if cover[i].rhs.is_subset(&closure(&reduced, cover)) {
                trace!("extraneous {} in {}", a, cover[i]);
                cover[i].lhs = reduced;
            }
        }

        if cover[i].lhs.is_empty() {
            return Err(NormalizeError::InvariantViolation(format!(
                "left-hand side of {} reduced to nothing",
                cover[i]
            )));
        }
    }
    Ok(())
}

fn remove_redundant<T: Attribute>(cover: &mut Vec<FunctionalDependency<T>>) {
    while let Some(i) = find_redundant(cover) {
        let fd = cover.remove(i);
        trace!("redundant {}", fd);
    }
}

/// Index of the first dependency implied by the rest of `cover`.
fn find_redundant<T: Attribute>(cover: &[FunctionalDependency<T>]) -> Option<usize> {
    (0..cover.len()).find(|&i| {
        let others = cover
            .iter()
            .enumerate()
            .filter(move |(j, _)| *j != i)
            .map(|(_, fd)| fd);
        cover[i]
            .rhs
            .is_subset(&closure_with(&cover[i].lhs, others))
    })
}
