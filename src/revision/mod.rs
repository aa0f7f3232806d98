//! Revision specifications and their expansion into revision sequences.

pub mod range;

pub use range::expand;
