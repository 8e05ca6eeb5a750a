pub mod clean;
pub mod dedup;
pub mod error;
pub mod io;
pub mod merge;
pub mod model;
pub mod pipeline;

pub use error::{Result, ToolError};
