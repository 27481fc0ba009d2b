mod artifacts;
mod client;
mod jobs;
mod projects;
mod provider;
mod types;
mod urls;

pub use artifacts::{DownloadSettings, DownloadedArtifact};
pub use projects::DEFAULT_MAX_PAGES;
pub use provider::GitLabProvider;
