//! Inbound adapters that translate user input into workflow calls while
//! keeping front-end details at the edge.
//!
//! The command-line shell lives under [`cli`].

pub mod cli;
