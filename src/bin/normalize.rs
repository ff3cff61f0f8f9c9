#[macro_use]
extern crate tracing;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fd_normalize::{utils, Report, ReportOptions, Schema, SchemaLimits};
use rayon::prelude::*;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    time::Instant,
};

#[derive(Debug, Parser)]
#[clap(about = "Compute 3NF and BCNF decompositions of a relation from its functional dependencies")]
struct Args {
    /// Input schema files (JSON) or sample rows (CSV), glob patterns allowed
    #[clap(value_parser, required = true)]
    inputs: Vec<String>,

    /// Output file, stdout if absent
    #[clap(short, long, value_parser)]
    output: Option<PathBuf>,

    /// Normal form to compute
    #[clap(short, long, value_enum, default_value = "both")]
    form: Form,

    /// Reject dependencies with more than one right-hand side attribute
    #[clap(long)]
    strict_rhs: bool,

    /// Reject schemas with more attributes than this
    #[clap(long)]
    max_attributes: Option<usize>,

    /// Largest left-hand side tried when inferring dependencies from CSV rows
    #[clap(long, default_value_t = 2)]
    max_lhs: usize,

    /// Check lossless join, dependency preservation and normal form of the result
    #[clap(long)]
    verify: bool,

    /// Print the BCNF split tree to stderr
    #[clap(long)]
    tree: bool,

    /// Number of threads
    #[clap(short = 't', long)]
    num_threads: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Form {
    /// Both 3NF synthesis and BCNF decomposition
    Both,
    /// 3NF synthesis
    #[clap(name = "3nf", alias("third"))]
    ThirdNf,
    /// BCNF decomposition
    Bcnf,
}

fn main() -> Result<()> {
    utils::init_tracing_subscriber("info")?;
    let args = Args::parse();
    info!("args: {:#?}", args);
    utils::setup_rayon(args.num_threads)?;

    let begin = Instant::now();
    let paths = utils::expand_inputs(&args.inputs)?;
    let limits = SchemaLimits {
        strict_rhs: args.strict_rhs,
        max_attributes: args.max_attributes,
    };
    let options = ReportOptions {
        third_nf: args.form != Form::Bcnf,
        bcnf: args.form != Form::ThirdNf,
        verify: args.verify,
    };

    let reports = paths
        .par_iter()
        .map(|path| normalize(path, args.max_lhs, &limits, &options))
        .collect::<Result<Vec<_>>>()?;
    info!("{} schemas done in {:?}", reports.len(), Instant::now() - begin);

    if args.tree {
        for report in &reports {
            if let Some(tree) = &report.bcnf_tree {
                eprintln!("{}:", report.relation_name);
                ptree::write_tree(tree, io::stderr())?;
            }
        }
    }

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    match reports.as_slice() {
        [report] => serde_json::to_writer_pretty(&mut out, report)?,
        reports => serde_json::to_writer_pretty(&mut out, reports)?,
    }
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

fn normalize(
    path: &Path,
    max_lhs: usize,
    limits: &SchemaLimits,
    options: &ReportOptions,
) -> Result<Report> {
    let schema = Schema::load(path, max_lhs, limits)?;
    schema
        .validate(limits)
        .with_context(|| format!("invalid schema {}", path.display()))?;
    debug!(
        "{}: {} attributes, {} dependencies",
        schema.relation_name,
        schema.attributes.len(),
        schema.functional_dependencies.len()
    );
    Report::build(&schema, options).with_context(|| format!("cannot normalize {}", path.display()))
}
