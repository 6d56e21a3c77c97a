use crate::error::AcquireError;
use crate::strategy::StrategyKind;
use crate::tests::fixtures::{collect, write};

#[test]
fn text_file_falls_through_to_plaintext() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = write(dir.path(), "notes.txt", b"hello world");

    let (outcome, files) = collect(&source, "").expect("resolve should succeed");
    assert_eq!(outcome.strategy(), Some(StrategyKind::Plaintext));
    assert_eq!(outcome.handles(), 1);
    assert_eq!(files[0].text(), "hello world");
    assert_eq!(files[0].origin, source);
    assert_eq!(files[0].entry, None);
}

#[test]
fn empty_file_yields_one_empty_handle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = write(dir.path(), "empty", b"");

    let (outcome, files) = collect(&source, "").expect("resolve should succeed");
    assert_eq!(outcome.strategy(), Some(StrategyKind::Plaintext));
    assert_eq!(files.len(), 1);
    assert!(files[0].bytes.is_empty());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = dir.path().join("absent.txt").to_string_lossy().into_owned();

    match collect(&source, "") {
        Err(AcquireError::Io { target, source: err }) => {
            assert_eq!(target, source);
            assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Io error, got: {other:?}"),
    }
}

#[cfg(not(feature = "gzip"))]
#[test]
fn non_matching_name_yields_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = write(dir.path(), "notes.txt", b"hello");

    let (outcome, files) = collect(&source, r".*\.csv").expect("resolve should succeed");
    assert_eq!(outcome.strategy(), Some(StrategyKind::Plaintext));
    assert!(files.is_empty());
}
