//! Test vectors, integration tests and benchmarks for the dbls library
//!
//! The JSON fixtures under `src/vectors/json` are loaded once and shared by
//! the integration tests in `tests/` and the benchmarks in `benches/`.

pub mod vectors;

pub use vectors::{
    aggregate_vectors, g1_signature_vectors, g2_signature_vectors, known_answer_vectors,
    verify_vectors, AggregateVector, SignVector, VectorError, VerifyVector,
};
