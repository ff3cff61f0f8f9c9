#[macro_use]
extern crate tracing;

pub mod alg;
pub mod error;
pub mod fd;
pub mod infer;
pub mod report;
pub mod schema;
pub mod utils;
pub mod verify;


pub use alg::{
    bcnf::{bcnf_tree, decompose_bcnf, BcnfTree},
    synthesis::synthesize_3nf,
};
pub use error::NormalizeError;
pub use fd::{
    candidate_key, closure, is_superkey, minimal_cover, Attribute, AttributeSet, FdSet,
    FunctionalDependency, Relation,
};
pub use report::{Report, ReportOptions};
pub use schema::{Schema, SchemaLimits};
