//! # Relation Core
//!
//! Turns a play's annotated lines into a weighted character relation graph and
//! records how that graph grows scene by scene.
//!
//! ## Core Components
//!
//! - **relations**: name resolution and explicit/implicit relation counting
//! - **timeline**: cumulative snapshots after each scene, with JSON persistence
//! - **graph**: petgraph assembly and GraphML export
//! - **pipeline**: per-play runs, batch processing and configuration
//!
//! ## Credit Rules
//!
//! - A speaker mentioning another character earns the pair one explicit credit per mention
//! - Characters sharing a scene earn one implicit credit per scene, unless the
//!   pair was already credited explicitly in that scene
//! - Raw names are only mapped to the roster when results are read

pub mod error;
pub mod graph;
pub mod pipeline;
pub mod relations;
pub mod timeline;

pub use error::*;
pub use graph::*;
pub use pipeline::*;
pub use relations::*;
pub use timeline::*;
