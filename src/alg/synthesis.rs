use crate::{
    error::{NormalizeError, Result},
    fd::{candidate_key, minimal_cover, Attribute, AttributeSet, FunctionalDependency, Relation},
};

/// 3NF synthesis.
///
/// One relation per distinct LHS of the minimal cover (LHS plus every RHS sharing it, in
/// order of first appearance), plus a candidate key when no relation already contains
/// one. Relations contained in another one are dropped. The result is lossless and
/// preserves every dependency of `fds`.
pub fn synthesize_3nf<T: Attribute>(
    attrs: &AttributeSet<T>,
    fds: &[FunctionalDependency<T>],
) -> Result<Vec<Relation<T>>> {
    if attrs.is_empty() {
        return Err(NormalizeError::InvalidInput(
            "attribute universe is empty".to_string(),
        ));
    }

    let cover = minimal_cover(fds)?;

    let mut groups: Vec<(&AttributeSet<T>, AttributeSet<T>)> = Vec::new();
    for fd in cover.iter() {
        match groups.iter().position(|(lhs, _)| *lhs == &fd.lhs) {
            Some(i) => groups[i].1 = &groups[i].1 | &fd.rhs,
            None => groups.push((&fd.lhs, fd.attributes())),
        }
    }
    let mut relations: Vec<AttributeSet<T>> = groups.into_iter().map(|(_, r)| r).collect();

    let key = candidate_key(attrs, &cover);
    if !relations.iter().any(|r| key.is_subset(r)) {
        debug!("add key relation {}", key);
        relations.push(key);
    }

    Ok(keep_maximal(relations)
        .into_iter()
        .map(Relation::from)
        .collect())
}

/// Keep each relation that is neither a proper subset of another one nor a repeat of an
/// earlier one.
fn keep_maximal<T: Attribute>(relations: Vec<AttributeSet<T>>) -> Vec<AttributeSet<T>> {
    let mut kept = Vec::with_capacity(relations.len());
    for (i, r) in relations.iter().enumerate() {
        let subsumed = relations
            .iter()
            .enumerate()
            .any(|(j, other)| r.is_proper_subset(other) || (j < i && r == other));
        if subsumed {
            trace!("drop subsumed relation {}", r);
        } else {
            kept.push(r.clone());
        }
    }
    kept
}
