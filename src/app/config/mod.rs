//! Loading of run inputs and tool configuration from disk.

mod load_metadata;
mod load_tool_config;

pub use load_metadata::{PathOverrides, load_inputs, load_metadata};
pub use load_tool_config::load_tool_config;
