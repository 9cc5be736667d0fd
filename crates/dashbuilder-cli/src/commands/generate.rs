//! Implementation of the `dashbuilder generate` command.

use std::fs::write;
use std::path::PathBuf;

use dashbuilder::{Dashbuilder, ExpandOptions, XmlOptions, DEFAULT_MAX_DEPTH};
use miette::miette;
use tracing::info;

use crate::commands::load_document;
use crate::output::BuildDiagnostic;

/// Arguments for the generate command.
#[derive(Debug, clap::Args)]
pub struct GenerateArgs {
    /// Dashboard document (.yaml, .yml or .json)
    pub path: PathBuf,

    /// Write the markup to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Spaces per indentation level (0 renders a single line)
    #[arg(long, default_value_t = 2)]
    pub indent: usize,

    /// Omit the XML declaration
    #[arg(long)]
    pub no_declaration: bool,

    /// Maximum template expansion depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Run the generate command.
pub fn run_generate(args: GenerateArgs) -> miette::Result<i32> {
    let document = load_document(&args.path)?;

    let builder = Dashbuilder::builder()
        .expand_options(ExpandOptions::builder().max_depth(args.max_depth).build())
        .xml_options(
            XmlOptions::builder()
                .indent(args.indent)
                .declaration(!args.no_declaration)
                .build(),
        )
        .build();

    let markup = match builder.render(&document) {
        Ok(markup) => markup,
        Err(e) => return Err(BuildDiagnostic::from_error(&args.path, &e).into()),
    };

    match &args.output {
        Some(output) => {
            write(output, format!("{markup}\n"))
                .map_err(|e| miette!("Cannot write {}: {}", output.display(), e))?;
            info!(path = %output.display(), "wrote dashboard");
        }
        None => println!("{}", markup),
    }
    Ok(exitcode::OK)
}
