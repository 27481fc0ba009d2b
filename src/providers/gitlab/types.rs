use serde::Deserialize;

/// A GitLab project as returned by the `projects` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabProject {
    /// Numeric project ID
    pub id: u64,
    /// Namespaced path (e.g., "group/project")
    pub path_with_namespace: String,
}

/// A repository branch; only the tip commit is needed.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabBranch {
    pub commit: CommitRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitRef {
    /// Commit SHA
    pub id: String,
}

/// A single commit with a reference to its most recent pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabCommit {
    /// `null` when no pipeline ever ran for this commit
    #[serde(default)]
    pub last_pipeline: Option<PipelineRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineRef {
    pub id: u64,
}

/// A job within a GitLab CI/CD pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabJob {
    /// Numeric job ID
    pub id: u64,
    /// Job name as defined in .gitlab-ci.yml
    #[serde(default)]
    pub name: String,
    /// Stage this job belongs to
    pub stage: String,
    /// Files attached to the job (archive, metadata, trace, ...)
    #[serde(default)]
    pub artifacts: Vec<JobArtifact>,
}

impl GitLabJob {
    pub fn has_artifacts(&self) -> bool {
        !self.artifacts.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobArtifact {
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}
