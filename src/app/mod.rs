//! Caller-side helpers shared by the CLI, the HTTP API and batch processing.

mod shutdown;
mod statistics;
mod url;

pub use shutdown::cancel_on_ctrl_c;
pub use statistics::{log_progress, print_error_statistics};
pub use url::{derive_hostname, validate_url};
