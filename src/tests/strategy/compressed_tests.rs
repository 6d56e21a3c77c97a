use crate::strategy::StrategyKind;
use crate::tests::fixtures::{collect, write};

#[cfg(feature = "gzip")]
mod gzip {
    use super::*;
    use crate::tests::fixtures::gzip_bytes;

    #[test]
    fn gzip_file_yields_one_decompressed_handle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = write(dir.path(), "report.csv.gz", &gzip_bytes(b"a,b\n1,2\n"));

        let (outcome, files) = collect(&source, "").expect("resolve should succeed");
        assert_eq!(outcome.strategy(), Some(StrategyKind::Gzip));
        assert_eq!(outcome.handles(), 1);
        assert_eq!(files[0].text(), "a,b\n1,2\n");
        assert_eq!(files[0].origin, source);
    }

    #[test]
    fn concatenated_gzip_members_are_read_through() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut bytes = gzip_bytes(b"first ");
        bytes.extend(gzip_bytes(b"second"));
        let source = write(dir.path(), "multi.gz", &bytes);

        let (_, files) = collect(&source, "").expect("resolve should succeed");
        assert_eq!(files[0].text(), "first second");
    }

    #[test]
    fn text_with_gz_name_falls_through_to_plaintext() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = write(dir.path(), "fake.gz", b"just some text");

        let (outcome, files) = collect(&source, "").expect("resolve should succeed");
        assert_eq!(outcome.strategy(), Some(StrategyKind::Plaintext));
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].text(), "just some text");
    }

    #[test]
    fn gzip_probe_rejects_text_with_validation_error() {
        use std::ops::ControlFlow;

        use crate::dispatch::{Context, FetchCache};
        use crate::error::AcquireError;
        use crate::io::OfflineFetcher;
        use crate::strategy::{GzipStrategy, Strategy, StrategyRegistry};

        let dir = tempfile::tempdir().expect("tempdir");
        let source = write(dir.path(), "fake.gz", b"just some text");

        let registry = StrategyRegistry::new();
        let cache = FetchCache::default();
        let ctx = Context::new(&registry, None, false, &OfflineFetcher, &cache);

        let mut visit = |_: crate::Handle<'_>| -> std::io::Result<ControlFlow<()>> {
            Ok(ControlFlow::Continue(()))
        };
        match GzipStrategy.open(&ctx, &source, &mut visit) {
            Err(err @ AcquireError::GzipValidation { .. }) => assert!(err.is_unsupported()),
            other => panic!("expected GzipValidation, got: {other:?}"),
        }
    }

    #[test]
    fn name_not_matching_pattern_is_an_empty_gzip_match() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = write(dir.path(), "notes.txt", b"hello");

        let (outcome, files) = collect(&source, r".*\.csv").expect("resolve should succeed");
        assert_eq!(outcome.strategy(), Some(StrategyKind::Gzip));
        assert_eq!(outcome.handles(), 0);
        assert!(files.is_empty());
    }
}

#[cfg(feature = "bzip2")]
mod bzip2 {
    use super::*;
    use crate::tests::fixtures::bzip2_bytes;

    #[test]
    fn bzip2_file_yields_one_decompressed_handle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = write(dir.path(), "log.txt.bz2", &bzip2_bytes(b"compressed log"));

        let (outcome, files) = collect(&source, "").expect("resolve should succeed");
        assert_eq!(outcome.strategy(), Some(StrategyKind::Bzip2));
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].text(), "compressed log");
    }

    #[test]
    fn bzip2_probe_rejects_bad_input_with_validation_error() {
        use std::ops::ControlFlow;

        use crate::dispatch::{Context, FetchCache};
        use crate::error::AcquireError;
        use crate::io::OfflineFetcher;
        use crate::strategy::{Bzip2Strategy, Strategy, StrategyRegistry};

        let dir = tempfile::tempdir().expect("tempdir");
        let registry = StrategyRegistry::new();
        let cache = FetchCache::default();
        let ctx = Context::new(&registry, None, false, &OfflineFetcher, &cache);

        let mut visit = |_: crate::Handle<'_>| -> std::io::Result<ControlFlow<()>> {
            Ok(ControlFlow::Continue(()))
        };
        for (name, bytes) in [
            ("plain.bz2", &b"just some text"[..]),
            ("truncated.bz2", &b"BZh9 is not really bzip2"[..]),
        ] {
            let source = write(dir.path(), name, bytes);
            match Bzip2Strategy.open(&ctx, &source, &mut visit) {
                Err(err @ AcquireError::Bzip2Validation { .. }) => assert!(err.is_unsupported()),
                other => panic!("expected Bzip2Validation for {name}, got: {other:?}"),
            }
        }
    }

    #[test]
    fn bzip2_magic_without_valid_stream_falls_through() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = write(dir.path(), "fake.bz2", b"BZh9 is not really bzip2");

        let (outcome, files) = collect(&source, "").expect("resolve should succeed");
        assert_eq!(outcome.strategy(), Some(StrategyKind::Plaintext));
        assert_eq!(files[0].text(), "BZh9 is not really bzip2");
    }
}
