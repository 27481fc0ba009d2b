use log::debug;

use super::client::GitLabClient;
use super::types::{GitLabBranch, GitLabCommit, GitLabJob};
use crate::error::{ArtifactError, Result};

impl GitLabClient {
    /// Returns every job of the last pipeline on `branch`.
    ///
    /// Walks branch → tip commit → last pipeline → jobs, one request each.
    pub async fn resolve_jobs(&self, project_id: u64, branch: &str) -> Result<Vec<GitLabJob>> {
        let tip: GitLabBranch = self
            .fetch_json(self.urls().branch(project_id, branch)?)
            .await?;
        debug!("Branch {branch} is at {}", tip.commit.id);

        let commit: GitLabCommit = self
            .fetch_json(self.urls().commit(project_id, &tip.commit.id)?)
            .await?;

        let pipeline = commit
            .last_pipeline
            .ok_or_else(|| ArtifactError::NoPipeline {
                branch: branch.to_string(),
                commit: tip.commit.id.clone(),
            })?;
        debug!("Commit {} has pipeline {}", tip.commit.id, pipeline.id);

        let jobs: Vec<GitLabJob> = self
            .fetch_json(self.urls().pipeline_jobs(project_id, pipeline.id)?)
            .await?;
        debug!("Pipeline {} has {} jobs", pipeline.id, jobs.len());

        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Token;

    fn client_for(server: &mockito::ServerGuard) -> GitLabClient {
        GitLabClient::new(&server.url(), &Token::from("glpat-test")).unwrap()
    }

    async fn mock_json(server: &mut mockito::ServerGuard, path: &str, body: &str) -> mockito::Mock {
        server
            .mock("GET", path)
            .match_header("private-token", "glpat-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_walks_branch_commit_pipeline() {
        let mut server = mockito::Server::new_async().await;
        let branch = mock_json(
            &mut server,
            "/api/v4/projects/4/repository/branches/feature%2Flogin",
            r#"{"name": "feature/login", "commit": {"id": "c0ffee"}}"#,
        )
        .await;
        let commit = mock_json(
            &mut server,
            "/api/v4/projects/4/repository/commits/c0ffee",
            r#"{"id": "c0ffee", "last_pipeline": {"id": 77, "status": "success"}}"#,
        )
        .await;
        let jobs = mock_json(
            &mut server,
            "/api/v4/projects/4/pipelines/77/jobs",
            r#"[
                {"id": 1, "name": "unit", "stage": "test", "artifacts": [{"file_type": "archive"}]},
                {"id": 2, "name": "compile", "stage": "build", "artifacts": []}
            ]"#,
        )
        .await;

        let resolved = client_for(&server)
            .resolve_jobs(4, "feature/login")
            .await
            .unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].id, 1);
        assert_eq!(resolved[1].stage, "build");
        branch.assert_async().await;
        commit.assert_async().await;
        jobs.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_pipeline_is_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        mock_json(
            &mut server,
            "/api/v4/projects/4/repository/branches/main",
            r#"{"commit": {"id": "abc"}}"#,
        )
        .await;
        mock_json(
            &mut server,
            "/api/v4/projects/4/repository/commits/abc",
            r#"{"last_pipeline": {"id": 5}}"#,
        )
        .await;
        mock_json(&mut server, "/api/v4/projects/4/pipelines/5/jobs", "[]").await;

        let resolved = client_for(&server).resolve_jobs(4, "main").await.unwrap();

        assert!(resolved.is_empty());
    }

    #[tokio::test]
    async fn test_commit_without_pipeline() {
        let mut server = mockito::Server::new_async().await;
        mock_json(
            &mut server,
            "/api/v4/projects/4/repository/branches/main",
            r#"{"commit": {"id": "abc"}}"#,
        )
        .await;
        mock_json(
            &mut server,
            "/api/v4/projects/4/repository/commits/abc",
            r#"{"id": "abc", "last_pipeline": null}"#,
        )
        .await;

        let err = client_for(&server).resolve_jobs(4, "main").await.unwrap_err();

        assert!(matches!(err, ArtifactError::NoPipeline { ref commit, .. } if commit == "abc"));
    }

    #[tokio::test]
    async fn test_missing_branch_stops_resolution() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v4/projects/4/repository/branches/gone")
            .with_status(404)
            .with_body(r#"{"message": "404 Branch Not Found"}"#)
            .create_async()
            .await;
        let commit = server
            .mock("GET", mockito::Matcher::Regex("/repository/commits/".into()))
            .expect(0)
            .create_async()
            .await;

        let err = client_for(&server).resolve_jobs(4, "gone").await.unwrap_err();

        assert!(matches!(err, ArtifactError::ApiError { status: 404, .. }));
        commit.assert_async().await;
    }
}
