//! Space-filling-curve keys.
//!
//! Interleaves the bits of integer coordinates into a single sortable
//! integer (a Morton / z-order code) and maps geographic or Web Mercator
//! positions onto 64-bit keys of that form.

pub mod geo;
pub mod morton;
pub mod tables;
