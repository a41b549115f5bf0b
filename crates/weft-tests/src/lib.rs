//! Integration test suite for the weft protocol.
//!
//! Exercises the chain store and node loop across crate boundaries:
//! convergence under arbitrary delivery orders, fork choice, and real
//! gossip over localhost UDP.

pub mod helpers;
