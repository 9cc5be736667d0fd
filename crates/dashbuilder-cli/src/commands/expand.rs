//! Implementation of the `dashbuilder expand` command.

use std::path::PathBuf;

use dashbuilder::{Dashbuilder, ExpandOptions, DEFAULT_MAX_DEPTH};
use miette::IntoDiagnostic;

use crate::commands::load_document;
use crate::output::BuildDiagnostic;

/// Arguments for the expand command.
#[derive(Debug, clap::Args)]
pub struct ExpandArgs {
    /// Document to expand (.yaml, .yml or .json)
    pub path: PathBuf,

    /// Output as JSON instead of YAML
    #[arg(long)]
    pub json: bool,

    /// Maximum template expansion depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Run the expand command.
pub fn run_expand(args: ExpandArgs) -> miette::Result<i32> {
    let document = load_document(&args.path)?;

    let builder = Dashbuilder::builder()
        .expand_options(ExpandOptions::builder().max_depth(args.max_depth).build())
        .build();
    let expanded = match builder.expand(&document) {
        Ok(expanded) => expanded,
        Err(e) => return Err(BuildDiagnostic::from_error(&args.path, &e).into()),
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&expanded).into_diagnostic()?
        );
    } else {
        print!("{}", serde_yaml::to_string(&expanded).into_diagnostic()?);
    }
    Ok(exitcode::OK)
}
