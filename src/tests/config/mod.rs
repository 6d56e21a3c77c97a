//! Config module tests.

mod pipeline_tests;
