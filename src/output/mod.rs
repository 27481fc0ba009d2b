mod progress;
mod styling;
mod summary;
mod tables;

pub use progress::DownloadProgress;
pub use styling::bright_red;
use styling::{dim, magenta_bold};
pub use summary::print_summary;

/// Prints the banner to stderr.
///
/// Displays the tool name, version, and description at the start of execution.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("📦 ciartifacts"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("GitLab CI Artifact Downloader")
    );
}
