//! Row transformation.
//!
//! - Template: `{{name}}` placeholder scanning and substitution
//! - Options: typed option bag
//! - Stages: the six per-row steps
//! - Pipeline: runs the stages and builds the envelope

pub mod options;
pub mod pipeline;
pub mod stages;
pub mod template;

pub use options::*;
pub use pipeline::*;
