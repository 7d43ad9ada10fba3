//! Use cases

pub mod scanning;

pub use scanning::*;
