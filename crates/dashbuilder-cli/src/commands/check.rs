//! Implementation of the `dashbuilder check` command.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use dashbuilder::{load_str, Dashbuilder, Error};
use miette::IntoDiagnostic;
use owo_colors::{OwoColorize, Stream};
use tracing::debug;

use crate::output::table::{format_check_table, FileReport};

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Documents to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the check command.
///
/// Every document is built independently; a failure in one does not stop
/// the others from being checked.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let builder = Dashbuilder::new();
    let reports: Vec<FileReport> = args
        .files
        .iter()
        .map(|path| check_file(&builder, path))
        .collect();
    let failed = reports.iter().filter(|r| !r.is_ok()).count();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).into_diagnostic()?
        );
    } else {
        println!("{}", format_check_table(&reports));

        for report in reports.iter().filter(|r| !r.is_ok()) {
            if let Some(error) = &report.error {
                println!("\n{}:", report.path);
                println!("  {}", error);
            }
        }

        let summary = format!("{} of {} documents built", reports.len() - failed, reports.len());
        if failed == 0 {
            println!("\n{}", summary.if_supports_color(Stream::Stdout, |s| s.green()));
        } else {
            println!("\n{}", summary.if_supports_color(Stream::Stdout, |s| s.red()));
        }
    }

    if failed > 0 {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

fn check_file(builder: &Dashbuilder, path: &Path) -> FileReport {
    let mut report = FileReport {
        path: path.display().to_string(),
        elements: None,
        kind: None,
        error: None,
    };

    let content = match read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            report.error = Some(e.to_string());
            return report;
        }
    };

    let result = load_str(&content)
        .map_err(Error::from)
        .and_then(|document| builder.build(&document));
    match result {
        Ok(root) => report.elements = Some(root.count()),
        Err(e) => {
            debug!(path = %report.path, error = %e, "document failed");
            report.kind = e.kind().map(|kind| kind.to_string());
            report.error = Some(e.to_string());
        }
    }
    report
}
