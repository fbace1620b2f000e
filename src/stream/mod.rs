//! Async stream utilities

mod paced;

pub use paced::{PaceExt, Paced};
