//! Tool management framework for the investment research agent
//!
//! This crate provides the seam consumed by the LLM agent runtime: a trait
//! for named, schema-described callables and a registry to look them up by
//! name.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::Tool;
