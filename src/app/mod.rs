//! Main application modules.
//!
//! Console reporting and exit-status mapping used by the binary.

pub mod exit;
pub mod report;

// Re-export public API
pub use exit::exit_code;
pub use report::{print_report, render_report};
