//! # Play Model
//!
//! The source text side of Playgraph - play scripts, character rosters, scene grouping
//! and mention extraction. This crate knows nothing about relations; it hands
//! `relation_core` an ordered list of annotated lines per play.

pub mod error;
pub mod lines;
pub mod mentions;
pub mod script;

pub use error::*;
pub use lines::*;
pub use mentions::*;
pub use script::*;
