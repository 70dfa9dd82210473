//! Output configuration and formatting

mod formatter;

pub use formatter::Formatter;

/// Global output options shared by all commands
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit strict JSON instead of human-readable text
    pub json: bool,
    /// Suppress everything except errors
    pub quiet: bool,
    /// Disable terminal colors
    pub no_color: bool,
}
