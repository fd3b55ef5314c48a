//! avl-bst-util - test and benchmark helpers for the `avl-bst` trees.
//!
//! Provides a seeded [`Fuzzer`] that produces reproducible key sets and
//! insert/remove sequences.

pub mod fuzzer;

pub use fuzzer::{Fuzzer, Op};
