//! Terminal front end: command parsing and board rendering.

#![cfg(feature = "std")]

pub mod input;
pub mod render;

pub use input::*;
pub use render::*;
