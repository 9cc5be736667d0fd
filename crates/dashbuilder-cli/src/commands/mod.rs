//! CLI command implementations.

mod check;
mod expand;
mod generate;

use std::fs::read_to_string;
use std::path::Path;

use dashbuilder::{load_str, ConfigValue};
use miette::miette;

use crate::output::LoadDiagnostic;

pub use check::{run_check, CheckArgs};
pub use expand::{run_expand, ExpandArgs};
pub use generate::{run_generate, GenerateArgs};

/// Read and parse a document, reporting syntax errors against its source.
pub(crate) fn load_document(path: &Path) -> miette::Result<ConfigValue> {
    let content = read_to_string(path)
        .map_err(|e| miette!("Cannot read document {}: {}", path.display(), e))?;
    load_str(&content).map_err(|e| LoadDiagnostic::from_load_error(path, &content, &e).into())
}
