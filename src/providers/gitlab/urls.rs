use url::Url;

use crate::error::{ArtifactError, Result};

const API_PATH: &str = "api/v4/";

/// Percent-encodes a user-supplied path component (branch name, commit SHA)
/// so it stays a single segment: `feature/login` becomes `feature%2Flogin`.
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Resolves GitLab REST resources relative to the `api/v4/` root.
#[derive(Debug, Clone)]
pub struct ApiUrls {
    api_url: Url,
}

impl ApiUrls {
    /// Builds the API root from an instance base URL.
    ///
    /// A missing trailing slash is added first, so both
    /// `https://host/gitlab` and `https://host/gitlab/` resolve to
    /// `https://host/gitlab/api/v4/`.
    pub fn from_base(base_url: &str) -> Result<Self> {
        let mut root = Url::parse(base_url)
            .map_err(|e| ArtifactError::Usage(format!("bad base URL: {e}")))?;

        if root.cannot_be_a_base() {
            return Err(ArtifactError::Usage(format!(
                "bad base URL: {base_url} cannot carry a path"
            )));
        }

        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }

        let api_url = root.join(API_PATH)?;

        Ok(Self { api_url })
    }

    pub fn root(&self) -> &Url {
        &self.api_url
    }

    /// `projects?page=<n>`
    pub fn projects(&self, page: u32) -> Result<Url> {
        let mut url = self.api_url.join("projects")?;
        url.set_query(Some(&format!("page={page}")));
        Ok(url)
    }

    /// `projects/<id>/repository/branches/<branch>`
    pub fn branch(&self, project_id: u64, branch: &str) -> Result<Url> {
        self.project_resource(
            project_id,
            &format!("repository/branches/{}", encode_segment(branch)),
        )
    }

    /// `projects/<id>/repository/commits/<sha>`
    pub fn commit(&self, project_id: u64, commit_id: &str) -> Result<Url> {
        self.project_resource(
            project_id,
            &format!("repository/commits/{}", encode_segment(commit_id)),
        )
    }

    /// `projects/<id>/pipelines/<pipeline>/jobs`
    pub fn pipeline_jobs(&self, project_id: u64, pipeline_id: u64) -> Result<Url> {
        self.project_resource(project_id, &format!("pipelines/{pipeline_id}/jobs"))
    }

    /// `projects/<id>/jobs/<job>/artifacts`
    pub fn job_artifacts(&self, project_id: u64, job_id: u64) -> Result<Url> {
        self.project_resource(project_id, &format!("jobs/{job_id}/artifacts"))
    }

    fn project_resource(&self, project_id: u64, path: &str) -> Result<Url> {
        Ok(self.api_url.join(&format!("projects/{project_id}/{path}"))?)
    }
}
