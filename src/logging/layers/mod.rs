//! Console and file sinks composed by [`crate::logging::init`].
pub mod console;
pub mod file;
