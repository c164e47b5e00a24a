//! Data types shared across the pipeline stages.

pub mod bookmark;
pub mod classified;
pub mod fetch;
pub mod vault;
