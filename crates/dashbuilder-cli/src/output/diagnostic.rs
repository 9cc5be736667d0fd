//! Miette diagnostic wrappers for load and build errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::path::Path;

use dashbuilder::{Error, LoadError};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for documents that fail to load.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid document: {message}")]
#[diagnostic(code(dashbuilder::load))]
pub struct LoadDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: Option<SourceSpan>,

    message: String,
}

impl LoadDiagnostic {
    /// Create a diagnostic from a LoadError with source context.
    pub fn from_load_error(path: &Path, content: &str, err: &LoadError) -> Self {
        let (span, message) = match err {
            LoadError::Parse {
                offset, message, ..
            } => {
                // Clamp offset to content length to avoid miette panic on out-of-bounds
                let offset = (*offset).min(content.len());
                (Some((offset, 1).into()), message.clone())
            }
            LoadError::Io { .. } | LoadError::UnsupportedKey { .. } => (None, err.to_string()),
        };

        LoadDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span,
            message,
        }
    }
}

/// A miette-compatible diagnostic for documents that load but fail to
/// expand, build or render.
#[derive(Debug, Error, Diagnostic)]
#[error("{path}: {message}")]
#[diagnostic(code(dashbuilder::build))]
pub struct BuildDiagnostic {
    path: String,

    message: String,

    #[help]
    help: Option<String>,
}

impl BuildDiagnostic {
    pub fn from_error(path: &Path, err: &Error) -> Self {
        BuildDiagnostic {
            path: path.display().to_string(),
            message: err.to_string(),
            help: err.kind().map(|kind| format!("error kind: {kind}")),
        }
    }
}
