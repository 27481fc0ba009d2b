use log::{debug, info, warn};

use super::artifacts::{DownloadSettings, DownloadedArtifact};
use super::client::GitLabClient;
use crate::auth::Token;
use crate::error::Result;

/// GitLab artifact provider.
///
/// Resolves one project and then, branch by branch, downloads the artifacts
/// of the jobs in the requested stage of each branch's last pipeline.
pub struct GitLabProvider {
    client: GitLabClient,
    project_path: String,
    max_pages: u32,
}

impl GitLabProvider {
    /// Creates a new GitLab provider for the specified project.
    ///
    /// # Arguments
    ///
    /// * `base_url` - GitLab instance base URL (e.g., <https://gitlab.com>)
    /// * `project_path` - Project path (e.g., "group/project")
    /// * `token` - Private access token used for every request
    /// * `max_pages` - Upper bound on project listing pages to search
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is malformed or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, project_path: String, token: &Token, max_pages: u32) -> Result<Self> {
        let client = GitLabClient::new(base_url, token)?;
        debug!("Using API root {}", client.urls().root());

        Ok(Self {
            client,
            project_path,
            max_pages,
        })
    }

    /// Downloads stage artifacts for each branch, in the order given.
    ///
    /// The project is located once before any branch is touched. The first
    /// failure aborts the run; branches after it are not processed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The project cannot be found
    /// - Any branch, commit, pipeline or artifact request fails
    /// - An output file cannot be created or written
    pub async fn download_artifacts(
        &self,
        branches: &[String],
        stage: &str,
        settings: &DownloadSettings,
    ) -> Result<Vec<DownloadedArtifact>> {
        let project_id = self
            .client
            .locate_project(&self.project_path, self.max_pages)
            .await?;

        let mut downloaded = Vec::new();

        for branch in branches {
            info!("Resolving last pipeline of branch {branch}");

            let jobs = self.client.resolve_jobs(project_id, branch).await?;

            let files = self
                .client
                .download_stage_artifacts(project_id, branch, &jobs, stage, settings)
                .await?;

            if files.is_empty() {
                warn!("No {stage} jobs with artifacts on branch {branch}");
            }

            downloaded.extend(files);
        }

        info!("Downloaded {} artifact archives", downloaded.len());

        Ok(downloaded)
    }
}
