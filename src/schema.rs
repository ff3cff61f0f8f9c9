use crate::{
    error::NormalizeError,
    fd::{AttributeSet, FdSet, FunctionalDependency},
    infer,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs::File, io::BufReader, path::Path};

/// A relation schema: its name, attribute universe and functional dependencies.
///
/// Read from a JSON document such as
/// `{"relationName": "R", "attributes": ["A", "B"], "functionalDependencies": [{"left": ["A"], "right": ["B"]}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default = "default_relation_name")]
    pub relation_name: String,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub functional_dependencies: Vec<FunctionalDependency<String>>,
}

fn default_relation_name() -> String {
    "R".to_string()
}

/// What [`Schema::validate`] accepts beyond well-formedness.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaLimits {
    /// Reject a dependency with more than one RHS attribute instead of splitting it.
    pub strict_rhs: bool,
    /// Reject schemas with more attributes than this.
    pub max_attributes: Option<usize>,
}

impl SchemaLimits {
    /// Fail when `width` attributes exceed [`SchemaLimits::max_attributes`].
    pub fn check_width(&self, width: usize) -> Result<(), NormalizeError> {
        match self.max_attributes {
            Some(max) if width > max => Err(NormalizeError::InvalidInput(format!(
                "{width} attributes exceed the limit of {max}"
            ))),
            _ => Ok(()),
        }
    }
}

impl Schema {
    pub fn new(
        relation_name: impl Into<String>,
        attributes: Vec<String>,
        functional_dependencies: Vec<FunctionalDependency<String>>,
    ) -> Self {
        Self {
            relation_name: relation_name.into(),
            attributes,
            functional_dependencies,
        }
    }

    /// Load a schema from `path`.
    ///
    /// A `.csv` file is read as sample rows and its dependencies are inferred with LHS of
    /// at most `max_lhs` attributes; anything else is read as a JSON schema. The width of
    /// a CSV header is checked against `limits` before any row is read.
    pub fn load(
        path: impl AsRef<Path>,
        max_lhs: usize,
        limits: &SchemaLimits,
    ) -> Result<Self> {
        let path = path.as_ref();
        let is_csv = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            infer::infer_from_csv(path, max_lhs, limits)
        } else {
            Self::from_json_file(path)
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("cannot parse schema {}", path.display()))
    }

    /// Check the schema before any normalization runs.
    pub fn validate(&self, limits: &SchemaLimits) -> Result<(), NormalizeError> {
        if self.attributes.is_empty() {
            return Err(NormalizeError::InvalidInput(
                "attributes must be a non-empty list".to_string(),
            ));
        }
        limits.check_width(self.attributes.len())?;

        let mut known = HashSet::new();
        for a in &self.attributes {
            if !known.insert(a.as_str()) {
                return Err(NormalizeError::InvalidInput(format!(
                    "attribute '{a}' is listed twice"
                )));
            }
        }

        for (i, fd) in self.functional_dependencies.iter().enumerate() {
            if fd.lhs.is_empty() || fd.rhs.is_empty() {
                return Err(NormalizeError::InvalidInput(format!(
                    "FD #{i} must have non-empty left and right"
                )));
            }
            if limits.strict_rhs && fd.rhs.len() != 1 {
                return Err(NormalizeError::UnsupportedShape(format!(
                    "FD #{i} right side must have exactly one attribute"
                )));
            }
            let unknown = fd
                .lhs
                .iter()
                .chain(fd.rhs.iter())
                .find(|a| !known.contains(a.as_str()));
            if let Some(a) = unknown {
                return Err(NormalizeError::InvalidInput(format!(
                    "FD #{i} contains unknown attribute '{a}'"
                )));
            }
        }
        Ok(())
    }

    pub fn universe(&self) -> AttributeSet<String> {
        self.attributes.iter().cloned().collect()
    }

    pub fn fds(&self) -> FdSet<String> {
        self.functional_dependencies.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attrs, fd, fds, tests::strings, utils::test_data_dir};

    fn schema(attributes: &[&str], fds: FdSet<String>) -> Schema {
        Schema::new("R", strings(attributes), fds.into_inner())
    }

    #[test]
    fn test_parse() {
        let json = r#"{
            "relationName": "Enrollment",
            "attributes": ["A", "B", "C"],
            "functionalDependencies": [
                {"left": ["A"], "right": ["B"]},
                {"left": ["B", "A"], "right": ["C"]}
            ]
        }"#;
        let schema: Schema = serde_json::from_str(json).unwrap();
        assert_eq!("Enrollment", schema.relation_name);
        assert_eq!(attrs!(A B C), schema.universe());
        assert_eq!(fds!(A => B, A B => C), schema.fds());
    }

    #[test]
    fn test_parse_defaults() {
        let schema: Schema = serde_json::from_str(r#"{"attributes": ["A"]}"#).unwrap();
        assert_eq!("R", schema.relation_name);
        assert!(schema.functional_dependencies.is_empty());
    }

    #[test]
    fn test_parse_missing_side() {
        let json = r#"{"attributes": ["A"], "functionalDependencies": [{"left": ["A"]}]}"#;
        assert!(serde_json::from_str::<Schema>(json).is_err());
    }

    #[test]
    fn test_load_json() {
        let path = test_data_dir().join("chain.json");
        let schema = Schema::load(path, 2, &SchemaLimits::default()).unwrap();
        assert_eq!("Chain", schema.relation_name);
        assert_eq!(strings(&["A", "B", "C", "D"]), schema.attributes);
        assert_eq!(fds!(A => B, B => C, C => D), schema.fds());
        schema.validate(&SchemaLimits::default()).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let path = test_data_dir().join("missing.json");
        assert!(Schema::load(path, 2, &SchemaLimits::default()).is_err());
    }

    #[test]
    fn test_load_csv_checks_width_first() {
        // The only row of wide.csv is short, so reading rows fails; the width check
        // has to reject the header before that.
        let path = test_data_dir().join("wide.csv");
        let narrow = SchemaLimits {
            max_attributes: Some(3),
            ..Default::default()
        };
        let err = Schema::load(&path, 2, &narrow).unwrap_err();
        assert_eq!(
            Some(&NormalizeError::InvalidInput(
                "6 attributes exceed the limit of 3".to_string()
            )),
            err.downcast_ref::<NormalizeError>()
        );

        let err = Schema::load(&path, 2, &SchemaLimits::default()).unwrap_err();
        assert!(err.downcast_ref::<NormalizeError>().is_none());
    }

    #[test]
    fn test_validate() {
        let limits = SchemaLimits::default();
        assert!(schema(&["A", "B"], fds!(A => B)).validate(&limits).is_ok());

        assert!(matches!(
            schema(&[], fds!()).validate(&limits),
            Err(NormalizeError::InvalidInput(_))
        ));
        assert!(matches!(
            schema(&["A", "A"], fds!()).validate(&limits),
            Err(NormalizeError::InvalidInput(_))
        ));
        assert_eq!(
            Err(NormalizeError::InvalidInput(
                "FD #1 contains unknown attribute 'C'".to_string()
            )),
            schema(&["A", "B"], fds!(A => B, A => C)).validate(&limits)
        );

        let empty_lhs = FdSet::from(vec![FunctionalDependency::new(attrs!(), attrs!(A))]);
        assert_eq!(
            Err(NormalizeError::InvalidInput(
                "FD #0 must have non-empty left and right".to_string()
            )),
            schema(&["A"], empty_lhs).validate(&limits)
        );
    }

    #[test]
    fn test_validate_limits() {
        let compound = schema(&["A", "B", "C"], fds!(A => B C));
        assert!(compound.validate(&SchemaLimits::default()).is_ok());

        let strict = SchemaLimits {
            strict_rhs: true,
            ..Default::default()
        };
        assert!(matches!(
            compound.validate(&strict),
            Err(NormalizeError::UnsupportedShape(_))
        ));

        let narrow = SchemaLimits {
            max_attributes: Some(2),
            ..Default::default()
        };
        assert!(matches!(
            compound.validate(&narrow),
            Err(NormalizeError::InvalidInput(_))
        ));

        let single = schema(&["A", "B"], FdSet::from(vec![fd!(A => B)]));
        assert!(single.validate(&strict).is_ok());
    }
}
