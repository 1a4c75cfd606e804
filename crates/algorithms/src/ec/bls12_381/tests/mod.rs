//! BLS12-381 test suite, split by layer

mod field;
mod pairings;
mod serialization;
