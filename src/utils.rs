use anyhow::{ensure, Error, Result};
use glob::glob;
use std::{io, path::PathBuf};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Events go to stderr so stdout can carry the result.
pub fn init_tracing_subscriber(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(Error::msg)
}

pub fn setup_rayon(num_threads: Option<usize>) -> Result<()> {
    if let Some(num_threads) = num_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()?;
    }
    Ok(())
}

#[cfg(test)]
pub fn test_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Expand input arguments into file paths.
///
/// An argument with glob metacharacters must match at least one file; any other argument
/// is taken as a path as is. Order of arguments is kept, repeats are dropped.
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for pattern in patterns {
        let matched: Vec<PathBuf> = if pattern.contains(&['*', '?', '['][..]) {
            let mut matched = glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
            matched.sort();
            ensure!(!matched.is_empty(), "no file matches {pattern}");
            matched
        } else {
            vec![PathBuf::from(pattern)]
        };

        for path in matched {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_inputs() {
        let dir = test_data_dir();
        let pattern = dir.join("*.json").to_string_lossy().to_string();
        let plain = dir.join("chain.json").to_string_lossy().to_string();

        let paths = expand_inputs(&[plain.clone(), pattern]).unwrap();
        assert_eq!(dir.join("chain.json"), paths[0]);
        assert_eq!(1, paths.iter().filter(|p| p.ends_with("chain.json")).count());
        assert!(paths.iter().any(|p| p.ends_with("address.json")));
        assert!(paths.iter().all(|p| !p.ends_with("enrollment.csv")));
    }

    #[test]
    fn test_expand_inputs_no_match() {
        let pattern = test_data_dir().join("*.none").to_string_lossy().to_string();
        assert!(expand_inputs(&[pattern]).is_err());
    }
}
