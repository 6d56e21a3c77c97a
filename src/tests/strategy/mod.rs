//! Strategy module tests.

mod directory_tests;
mod plaintext_tests;
mod registry_tests;

#[cfg(any(feature = "gzip", feature = "bzip2"))]
mod compressed_tests;
