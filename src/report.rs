use crate::{
    alg::{bcnf::bcnf_tree, synthesis::synthesize_3nf},
    fd::{candidate_key, minimal_cover, AttributeSet, FdSet, Relation},
    verify::{is_3nf, is_bcnf, is_dependency_preserving, is_lossless_join},
    BcnfTree, Schema,
};
use anyhow::Result;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Which decompositions to compute.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub third_nf: bool,
    pub bcnf: bool,
    pub verify: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            third_nf: true,
            bcnf: true,
            verify: false,
        }
    }
}

/// The result document for one schema.
///
/// Relations are written as sorted attribute lists, and each list of relations is sorted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub relation_name: String,
    pub attributes: Vec<String>,
    pub minimal_cover: FdSet<String>,
    pub candidate_key: AttributeSet<String>,
    #[serde(rename = "3nf", skip_serializing_if = "Option::is_none")]
    pub third_nf: Option<Vec<Relation<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcnf: Option<Vec<Relation<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verification>,
    #[serde(with = "serde_time")]
    pub elapsed: Duration,
    #[serde(skip)]
    pub bcnf_tree: Option<BcnfTree<String>>,
}

#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    #[serde(rename = "3nf", skip_serializing_if = "Option::is_none")]
    pub third_nf: Option<FormCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcnf: Option<FormCheck>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormCheck {
    pub lossless_join: bool,
    pub dependency_preserving: bool,
    /// `None` when the check was too expensive to run.
    pub normal_form: Option<bool>,
}

impl Report {
    /// Normalize a validated schema.
    pub fn build(schema: &Schema, options: &ReportOptions) -> Result<Self> {
        let begin = Instant::now();
        let attrs = schema.universe();
        let fds = schema.fds();

        let minimal_cover = minimal_cover(&fds)?;
        let candidate_key = candidate_key(&attrs, &minimal_cover);

        let third_nf = if options.third_nf {
            Some(synthesize_3nf(&attrs, &fds)?)
        } else {
            None
        };
        let bcnf_tree = if options.bcnf {
            Some(bcnf_tree(&attrs, &fds)?)
        } else {
            None
        };
        let bcnf = bcnf_tree.clone().map(BcnfTree::into_relations);

        let verification = options.verify.then(|| {
            let check = |relations: &[Relation<String>], normal_form: Option<bool>| FormCheck {
                lossless_join: is_lossless_join(&attrs, relations, &fds),
                dependency_preserving: is_dependency_preserving(relations, &fds),
                normal_form,
            };
            Verification {
                third_nf: third_nf.as_deref().map(|relations| {
                    let normal_form = relations
                        .iter()
                        .map(|r| is_3nf(r, &fds))
                        .collect::<Option<Vec<bool>>>()
                        .map(|checks| checks.into_iter().all(|ok| ok));
                    check(relations, normal_form)
                }),
                bcnf: bcnf.as_deref().map(|relations| {
                    check(relations, Some(relations.iter().all(|r| is_bcnf(r, &fds))))
                }),
            }
        });

        let elapsed = Instant::now() - begin;
        debug!("{} normalized in {:?}", schema.relation_name, elapsed);

        Ok(Self {
            relation_name: schema.relation_name.clone(),
            attributes: schema.attributes.clone(),
            minimal_cover,
            candidate_key,
            third_nf: third_nf.map(sorted),
            bcnf: bcnf.map(sorted),
            verification,
            elapsed,
            bcnf_tree,
        })
    }
}

fn sorted(mut relations: Vec<Relation<String>>) -> Vec<Relation<String>> {
    relations.sort();
    relations
}

mod serde_time {
    use serde::ser::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(t: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(t.as_secs_f64())
    }
}
