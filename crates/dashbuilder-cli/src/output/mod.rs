//! Terminal output: diagnostics and summary tables.

mod diagnostic;
pub mod table;

pub use diagnostic::{BuildDiagnostic, LoadDiagnostic};
