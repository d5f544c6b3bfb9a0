//! Test utilities for the client crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`). Only
//! compiled for tests or with the `test-support` feature.

pub mod doubles;
