//! Infer functional dependencies from sample rows.
//!
//! A dependency `X -> y` is reported when no two sample rows agree on `X` but differ on
//! `y`. Sample rows can only refute a dependency, so the result is an upper bound of what
//! holds on the full data.

use crate::{
    fd::{AttributeSet, FdSet, FunctionalDependency},
    Schema, SchemaLimits,
};
use anyhow::{ensure, Context, Result};
use itertools::Itertools;
use std::{collections::HashMap, path::Path};

/// Infer the dependencies with at most `max_lhs` LHS attributes that hold on `rows`.
///
/// Targets are visited in header order and candidate LHS in combination order, smallest
/// first. Only minimal LHS are reported: a candidate containing an LHS already found for
/// the same target is skipped.
pub fn infer_fds(header: &[String], rows: &[Vec<String>], max_lhs: usize) -> FdSet<String> {
    let mut fds = Vec::new();
    for target in 0..header.len() {
        let others: Vec<usize> = (0..header.len()).filter(|&i| i != target).collect();
        let mut found: Vec<Vec<usize>> = Vec::new();
        for k in 1..=max_lhs.min(others.len()) {
            for lhs in others.iter().copied().combinations(k) {
                if found.iter().any(|f| f.iter().all(|i| lhs.contains(i))) {
                    continue;
                }
                if determines(rows, &lhs, target) {
                    found.push(lhs);
                }
            }
        }

        for lhs in found {
            trace!("{:?} determines {}", lhs, header[target]);
            fds.push(FunctionalDependency::new(
                lhs.iter().map(|&i| header[i].clone()).collect(),
                AttributeSet::singleton(header[target].clone()),
            ));
        }
    }
    FdSet::from(fds)
}

/// No two rows agree on the `lhs` columns and differ on `target`.
fn determines(rows: &[Vec<String>], lhs: &[usize], target: usize) -> bool {
    let mut seen: HashMap<Vec<&str>, &str> = HashMap::new();
    for row in rows {
        let key: Vec<&str> = lhs.iter().map(|&i| row[i].as_str()).collect();
        let value = row[target].as_str();
        match seen.get(&key) {
            Some(&v) if v != value => return false,
            Some(_) => {}
            None => {
                seen.insert(key, value);
            }
        }
    }
    true
}

/// Build a schema from a CSV file of sample rows.
///
/// The header names the attributes and the file stem names the relation. A header wider
/// than `limits` allows is rejected before any row is read.
pub fn infer_from_csv(
    path: impl AsRef<Path>,
    max_lhs: usize,
    limits: &SchemaLimits,
) -> Result<Schema> {
    let path = path.as_ref();
    info!("infer dependencies from {}...", path.display());

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    let header: Vec<String> = reader
        .headers()
        .with_context(|| format!("cannot read header of {}", path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    ensure!(!header.is_empty(), "{} has no header", path.display());
    limits.check_width(header.len())?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("cannot read {}", path.display()))?;
        rows.push(record.iter().map(|v| v.to_string()).collect::<Vec<_>>());
    }
    if rows.len() < 2 {
        warn!(
            "{} has {} rows, every candidate dependency holds",
            path.display(),
            rows.len()
        );
    }

    let fds = infer_fds(&header, &rows, max_lhs);
    info!("{} dependencies from {} rows", fds.len(), rows.len());

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "R".to_string());
    Ok(Schema::new(name, header, fds.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fd, fds, tests::strings, utils::test_data_dir};

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter().map(|row| strings(row)).collect()
    }

    #[test]
    fn test_single_attribute_lhs() {
        let header = strings(&["A", "B", "C"]);
        let rows = rows(&[&["1", "x", "p"], &["2", "x", "p"], &["3", "y", "q"]]);
        assert_eq!(
            fds!(A => B, C => B, A => C, B => C),
            infer_fds(&header, &rows, 1)
        );
    }

    #[test]
    fn test_composite_lhs() {
        // Neither A nor B alone determines C, the pair does.
        let header = strings(&["A", "B", "C"]);
        let rows = rows(&[
            &["1", "1", "a"],
            &["1", "2", "b"],
            &["2", "1", "c"],
            &["2", "2", "a"],
        ]);
        let fds = infer_fds(&header, &rows, 2);
        assert!(fds.contains(&fd!(A B => C)));
        assert!(!fds.contains(&fd!(A => C)));
        assert!(!fds.contains(&fd!(B => C)));
        assert!(infer_fds(&header, &rows, 1).is_empty());
    }

    #[test]
    fn test_only_minimal_lhs() {
        let header = strings(&["A", "B", "C"]);
        let rows = rows(&[&["1", "1", "1"], &["2", "1", "2"], &["3", "2", "3"]]);
        let fds = infer_fds(&header, &rows, 2);
        assert!(fds.contains(&fd!(A => C)));
        assert!(!fds.contains(&fd!(A B => C)));
    }

    #[test]
    fn test_infer_from_csv() {
        let path = test_data_dir().join("enrollment.csv");
        let schema = infer_from_csv(path, 2, &SchemaLimits::default()).unwrap();
        assert_eq!("enrollment", schema.relation_name);
        assert_eq!(
            strings(&["student", "course", "instructor", "room"]),
            schema.attributes
        );
        assert_eq!(
            fds!(course => instructor, room => instructor, course => room, instructor => room),
            schema.fds()
        );
    }
}
