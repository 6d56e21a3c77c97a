//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{AcquireError, AggregateError, SingleIoError};

/// A diagnostic wrapper for acquisition errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct AcquireDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

fn help_for(error: &AcquireError) -> &'static str {
    match error {
        AcquireError::Pattern(_) => "The pattern must be a valid regular expression",
        AcquireError::Fetch { .. } | AcquireError::HttpClient(_) => {
            "Check the URL and that the remote endpoint is reachable"
        }
        AcquireError::Interrupted { .. } => {
            "The source looked valid at first but is truncated or corrupted"
        }
        AcquireError::Consume { .. } => "The handle consumer returned an error",
        _ => "Check that the source path exists and is readable",
    }
}

impl From<AcquireError> for AcquireDiagnostic {
    fn from(e: AcquireError) -> Self {
        AcquireDiagnostic {
            message: e.to_string(),
            help: Some(help_for(&e).into()),
            source: Some(Box::new(e)),
            severity: Severity::Error,
        }
    }
}

impl From<SingleIoError> for AcquireDiagnostic {
    fn from(e: SingleIoError) -> Self {
        let help = e
            .error
            .downcast_ref::<AcquireError>()
            .map(help_for)
            .unwrap_or("Check your source arguments");
        AcquireDiagnostic {
            message: format!("[{}] on '{}'", e.stage, e.target),
            source: Some(e.error),
            help: Some(help.into()),
            severity: Severity::Error,
        }
    }
}

impl From<AggregateError> for AcquireDiagnostic {
    fn from(agg: AggregateError) -> Self {
        let first = agg.errors.into_iter().next();
        if let Some(e) = first {
            AcquireDiagnostic::from(e)
        } else {
            AcquireDiagnostic {
                message: "Unknown acquisition error".into(),
                source: None,
                help: None,
                severity: Severity::Error,
            }
        }
    }
}

impl From<AggregateError> for miette::Report {
    fn from(agg: AggregateError) -> Self {
        miette::Report::new(AcquireDiagnostic::from(agg))
    }
}
