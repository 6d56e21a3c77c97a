//! Source classification and provenance helpers.
//!
//! A source is an unclassified string: a filesystem path or a URL. Its
//! nature is discovered by probing, except for the local/remote split which
//! is decided here.

use std::path::Path;

use url::Url;

/// Returns `true` if `source` parses as a URL with a scheme, a host and a path.
///
/// Malformed input is never an error; it simply is not remote.
pub fn is_remote(source: &str) -> bool {
    match Url::parse(source) {
        Ok(url) => {
            !url.scheme().is_empty()
                && url.host_str().is_some_and(|h| !h.is_empty())
                && has_path(source)
        }
        Err(_) => false,
    }
}

/// Whether the text after the authority carries a path. `Url` normalises
/// `http://host` to the path `/`, so this looks at the raw string.
fn has_path(source: &str) -> bool {
    let Some((_, rest)) = source.split_once("://") else {
        return false;
    };
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    rest[..end].contains('/')
}

/// Base file name of a source: the last URL path segment for remote
/// sources, the final path component for local ones.
pub fn base_name(source: &str) -> &str {
    if is_remote(source) {
        let path = source
            .split(['?', '#'])
            .next()
            .unwrap_or(source)
            .trim_end_matches('/');
        return path.rsplit('/').next().unwrap_or(path);
    }
    Path::new(source)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(source)
}

/// Base name of an archive entry. Entry names always use `/`.
pub fn entry_base_name(entry: &str) -> &str {
    let trimmed = entry.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Provenance of an entry inside a container source.
pub fn join_origin(source: &str, entry: &str) -> String {
    if is_remote(source) {
        format!("{}/{}", source.trim_end_matches('/'), entry)
    } else {
        Path::new(source).join(entry).to_string_lossy().into_owned()
    }
}
