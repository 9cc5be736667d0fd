//! Crate-level error type and error classification.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::expander::ExpandError;
use crate::loader::LoadError;
use crate::schema::BuildError;
use crate::xml::XmlError;

/// The kind of a failed build, independent of which stage raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    CyclicSubstitution,
    PathLookupFailure,
    MalformedTemplate,
    ArgumentScopeCollision,
    DepthLimitExceeded,
    MissingRequiredField,
    InvalidFieldShape,
    AbsentBuiltElement,
    AmbiguousOrUnknownVariant,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            ErrorKind::CyclicSubstitution => "cyclic substitution",
            ErrorKind::PathLookupFailure => "path lookup failure",
            ErrorKind::MalformedTemplate => "malformed template",
            ErrorKind::ArgumentScopeCollision => "argument scope collision",
            ErrorKind::DepthLimitExceeded => "depth limit exceeded",
            ErrorKind::MissingRequiredField => "missing required field",
            ErrorKind::InvalidFieldShape => "invalid field shape",
            ErrorKind::AbsentBuiltElement => "absent built element",
            ErrorKind::AmbiguousOrUnknownVariant => "ambiguous or unknown variant",
        };
        write!(f, "{name}")
    }
}

/// Any error raised while turning a document into markup.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Expand(#[from] ExpandError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Xml(#[from] XmlError),
}

impl Error {
    /// The classification of a transform error, or `None` for errors raised by
    /// the loader or serializer.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Expand(e) => Some(e.kind()),
            Error::Build(e) => Some(e.kind()),
            Error::Load(_) | Error::Xml(_) => None,
        }
    }
}
