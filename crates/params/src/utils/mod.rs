//! Constants for the building blocks the curve code consumes

pub mod hash;
