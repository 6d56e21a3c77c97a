//! I/O module tests.
