use std::path::{Path, PathBuf};

use log::{debug, info};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use super::client::GitLabClient;
use super::types::{GitLabJob, JobArtifact};
use super::urls::encode_segment;
use crate::error::Result;
use crate::output::DownloadProgress;

/// Where and how artifact archives are written.
#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub output_dir: PathBuf,
    pub show_progress: bool,
}

/// An artifact archive written to disk.
#[derive(Debug, Clone)]
pub struct DownloadedArtifact {
    pub branch: String,
    pub job_id: u64,
    pub job_name: String,
    pub stage: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Jobs in `stage` that produced at least one artifact, in API order.
pub fn select_jobs<'a>(
    jobs: &'a [GitLabJob],
    stage: &'a str,
) -> impl Iterator<Item = &'a GitLabJob> + 'a {
    jobs.iter()
        .filter(move |job| job.stage == stage && job.has_artifacts())
}

/// `<encoded-branch>-<job-id>.zip`, unique per branch and job.
pub fn artifact_file_name(branch: &str, job_id: u64) -> String {
    format!("{}-{job_id}.zip", encode_segment(branch))
}

fn describe_artifacts(artifacts: &[JobArtifact]) -> String {
    artifacts
        .iter()
        .map(|artifact| {
            let kind = artifact.file_type.as_deref().unwrap_or("unknown");
            match (&artifact.filename, artifact.size) {
                (Some(name), Some(size)) => format!("{kind} {name} ({size} bytes)"),
                (Some(name), None) => format!("{kind} {name}"),
                _ => kind.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl GitLabClient {
    /// Downloads the archive of every job in `stage` that has artifacts.
    ///
    /// Stops at the first failure; files already written are left in place.
    pub async fn download_stage_artifacts(
        &self,
        project_id: u64,
        branch: &str,
        jobs: &[GitLabJob],
        stage: &str,
        settings: &DownloadSettings,
    ) -> Result<Vec<DownloadedArtifact>> {
        let mut downloaded = Vec::new();

        for job in select_jobs(jobs, stage) {
            debug!("Job {} artifacts: {}", job.id, describe_artifacts(&job.artifacts));

            let path = settings
                .output_dir
                .join(artifact_file_name(branch, job.id));

            let bytes = self
                .download_job_artifacts(project_id, job.id, &path, settings.show_progress)
                .await?;

            info!(
                "Saved artifacts of job {} ({}) to {} ({bytes} bytes)",
                job.id,
                job.name,
                path.display()
            );

            downloaded.push(DownloadedArtifact {
                branch: branch.to_string(),
                job_id: job.id,
                job_name: job.name.clone(),
                stage: job.stage.clone(),
                path,
                bytes,
            });
        }

        Ok(downloaded)
    }

    /// Streams the archive of one job into `path`, returning the byte count.
    ///
    /// The file is created before the request is sent. Both the file and the
    /// response body are dropped when this returns, on success or error.
    async fn download_job_artifacts(
        &self,
        project_id: u64,
        job_id: u64,
        path: &Path,
        show_progress: bool,
    ) -> Result<u64> {
        let mut file = File::create(path).await?;

        let mut response = self
            .fetch_stream(self.urls().job_artifacts(project_id, job_id)?)
            .await?;

        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| job_id.to_string());
        let progress = DownloadProgress::start(&label, response.content_length(), show_progress);

        let mut bytes: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            bytes += chunk.len() as u64;
            progress.advance(chunk.len() as u64);
        }
        file.flush().await?;

        progress.finish(bytes);
        debug!("Job {job_id}: copied {bytes} bytes");

        Ok(bytes)
    }
}
