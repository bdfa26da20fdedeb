use std::{fmt, path::PathBuf};

use crate::outcome::OutcomeKind;

/// Fatal startup error.
///
/// File and JSON access never produce this type (they return outcome records);
/// it is raised once the config loader decides startup cannot continue.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create sample config: {path}: {outcome}")]
    SampleConfig { path: PathBuf, outcome: OutcomeKind },

    #[error("failed to load config file: {path}: {outcome}")]
    LoadConfig { path: PathBuf, outcome: OutcomeKind },

    #[error("invalid data in config file: {}", join_issues(.issues))]
    InvalidConfig { issues: Vec<FieldIssue> },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("external error: {0}")]
    External(String),
}

impl Error {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Error::SampleConfig { .. } => "SampleConfig",
            Error::LoadConfig { .. } => "LoadConfig",
            Error::InvalidConfig { .. } => "InvalidConfig",
            Error::Io(_) => "Io",
            Error::External(_) => "External",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A single config field that failed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub problem: FieldProblem,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    /// Value still equals the uppercased field name from the sample file.
    Placeholder,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.problem {
            FieldProblem::Missing => write!(f, "{} (missing)", self.field),
            FieldProblem::Placeholder => write!(f, "{} (placeholder value)", self.field),
        }
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
