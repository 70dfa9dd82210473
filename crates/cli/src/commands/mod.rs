//! Command implementations for the bget CLI

pub mod get;
pub mod get_file;
pub mod mode;
