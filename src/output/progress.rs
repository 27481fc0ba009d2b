use indicatif::{HumanBytes, ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::styling::{bright_green, bright_yellow};

/// Progress indicator for a single artifact download.
///
/// Renders a byte bar when the server announces a content length and a
/// spinner otherwise. Hidden entirely when `visible` is false.
pub struct DownloadProgress {
    pb: ProgressBar,
}

impl DownloadProgress {
    pub fn start(label: &str, total: Option<u64>, visible: bool) -> Self {
        let pb = match total {
            Some(len) => {
                let pb = ProgressBar::new(len);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("  {msg} [{bar:30}] {bytes}/{total_bytes}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("=> "),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("  {msg} {spinner} {bytes}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                pb.enable_steady_tick(std::time::Duration::from_millis(100));
                pb
            }
        };

        pb.set_draw_target(if visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        });
        pb.set_message(bright_yellow(format!("Downloading {label}")).to_string());

        Self { pb }
    }

    pub fn advance(&self, bytes: u64) {
        self.pb.inc(bytes);
    }

    pub fn finish(self, bytes: u64) {
        self.pb.finish_with_message(
            bright_green(format!("Downloaded {} ✓", HumanBytes(bytes))).to_string(),
        );
    }
}
