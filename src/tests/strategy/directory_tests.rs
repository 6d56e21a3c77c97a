use crate::dispatch::Outcome;
use crate::strategy::StrategyKind;
use crate::tests::fixtures::{collect, names, write};

#[test]
fn empty_directory_matches_with_zero_handles() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = dir.path().to_string_lossy().into_owned();

    let (outcome, files) = collect(&source, "").expect("resolve should succeed");
    assert_eq!(
        outcome,
        Outcome::Matched {
            strategy: StrategyKind::Directory,
            handles: 0,
            stopped: false,
        }
    );
    assert!(files.is_empty());
}

#[test]
fn directory_walk_is_recursive_and_sorted() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "b.txt", b"b");
    write(dir.path(), "a.txt", b"a");
    write(dir.path(), "sub/c.txt", b"c");
    let source = dir.path().to_string_lossy().into_owned();

    let (outcome, files) = collect(&source, "").expect("resolve should succeed");
    assert_eq!(outcome.strategy(), Some(StrategyKind::Directory));
    assert_eq!(outcome.handles(), 3);
    assert_eq!(names(&files), vec!["a.txt", "b.txt", "c.txt"]);
    assert!(files.iter().all(|f| f.strategy == StrategyKind::Plaintext));
}

#[test]
fn pattern_filters_files_by_base_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "keep1.csv", b"1");
    write(dir.path(), "keep2.csv", b"2");
    write(dir.path(), "nested/keep3.csv", b"3");
    write(dir.path(), "skip.txt", b"x");
    write(dir.path(), "skip.csv.bak", b"y");
    let source = dir.path().to_string_lossy().into_owned();

    let (outcome, files) = collect(&source, r".*\.csv").expect("resolve should succeed");
    assert_eq!(outcome.handles(), 3);
    assert_eq!(names(&files), vec!["keep1.csv", "keep2.csv", "keep3.csv"]);
}

#[test]
fn origins_are_absolute_paths() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "a.txt", b"a");
    let source = dir.path().to_string_lossy().into_owned();

    let (_, files) = collect(&source, "").expect("resolve should succeed");
    assert_eq!(files.len(), 1);
    assert!(std::path::Path::new(&files[0].origin).is_absolute());
    assert!(files[0].origin.ends_with("a.txt"));
}

#[cfg(feature = "zip")]
#[test]
fn archives_inside_a_directory_are_expanded() {
    use crate::tests::fixtures::zip_bytes;

    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "bundle.zip",
        &zip_bytes(&[("inner1.txt", b"one"), ("inner2.txt", b"two")]),
    );
    write(dir.path(), "plain.txt", b"three");
    let source = dir.path().to_string_lossy().into_owned();

    let (outcome, files) = collect(&source, "").expect("resolve should succeed");
    assert_eq!(outcome.strategy(), Some(StrategyKind::Directory));
    assert_eq!(outcome.handles(), 3);

    let kinds: Vec<_> = files.iter().map(|f| f.strategy).collect();
    assert_eq!(
        kinds,
        vec![StrategyKind::Zip, StrategyKind::Zip, StrategyKind::Plaintext]
    );
    assert_eq!(files[0].text(), "one");
    assert_eq!(files[2].text(), "three");
}

#[cfg(unix)]
#[test]
fn symlinks_to_files_are_followed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = write(dir.path(), "real.txt", b"data");
    std::os::unix::fs::symlink(&target, dir.path().join("link.txt")).expect("symlink");
    let source = dir.path().to_string_lossy().into_owned();

    let (_, files) = collect(&source, "").expect("resolve should succeed");
    assert_eq!(names(&files), vec!["link.txt", "real.txt"]);
    assert!(files.iter().all(|f| f.bytes == b"data"));
}
