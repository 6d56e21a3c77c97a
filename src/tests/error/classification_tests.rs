use std::io;

use crate::error::AcquireError;
use crate::strategy::StrategyKind;

fn io_err() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "probe")
}

#[test]
fn format_mismatches_are_unsupported() {
    assert!(AcquireError::unsupported(StrategyKind::Tar, "x", "bad header").is_unsupported());
    assert!(
        AcquireError::GzipValidation {
            target: "x".into(),
            source: io_err(),
        }
        .is_unsupported()
    );
    assert!(
        AcquireError::Bzip2Validation {
            target: "x".into(),
            source: io_err(),
        }
        .is_unsupported()
    );
}

#[test]
fn genuine_failures_are_not_unsupported() {
    let interrupted = AcquireError::Interrupted {
        strategy: StrategyKind::Zip,
        target: "x".into(),
        handles: 1,
        source: Box::new(AcquireError::unsupported(StrategyKind::Zip, "x", "truncated")),
    };
    assert!(!interrupted.is_unsupported());
    assert!(
        !AcquireError::Io {
            target: "x".into(),
            source: io_err(),
        }
        .is_unsupported()
    );
    assert!(!AcquireError::UnknownStrategy("rar".into()).is_unsupported());
}

#[test]
fn messages_name_the_strategy_and_target() {
    let err = AcquireError::unsupported(StrategyKind::Directory, "/tmp/a.txt", "not a directory");
    assert_eq!(
        err.to_string(),
        "directory does not apply to '/tmp/a.txt': not a directory"
    );

    let err = AcquireError::Interrupted {
        strategy: StrategyKind::Tar,
        target: "a.tar".into(),
        handles: 2,
        source: Box::new(AcquireError::unsupported(StrategyKind::Tar, "a.tar", "eof")),
    };
    assert_eq!(err.to_string(), "tar failed on 'a.tar' after delivering 2 handle(s)");
}

#[cfg(feature = "miette")]
#[test]
fn diagnostics_carry_help_for_unmatched_formats() {
    use crate::error::AcquireDiagnostic;

    let diag: AcquireDiagnostic = AcquireError::GzipValidation {
        target: "x.gz".into(),
        source: io_err(),
    }
    .into();
    assert!(diag.to_string().contains("x.gz"));
    assert!(diag.help.is_some());
}
