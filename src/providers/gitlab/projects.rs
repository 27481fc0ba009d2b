use log::{debug, info};

use super::client::GitLabClient;
use super::types::GitLabProject;
use crate::error::{ArtifactError, Result};

pub const DEFAULT_MAX_PAGES: u32 = 1000;

impl GitLabClient {
    /// Finds the numeric ID of the project whose namespaced path equals
    /// `project_path`, walking `projects?page=1,2,...` until it shows up.
    ///
    /// Pagination stops at the first match, at the first empty page
    /// (`ProjectNotFound`), after `max_pages` pages (`PageLimitExceeded`), or
    /// when the API hands back the same page twice in a row
    /// (`PaginationStalled`).
    pub async fn locate_project(&self, project_path: &str, max_pages: u32) -> Result<u64> {
        let mut previous_ids: Vec<u64> = Vec::new();

        for page in 1..=max_pages {
            let projects: Vec<GitLabProject> =
                self.fetch_json(self.urls().projects(page)?).await?;

            debug!("Projects page {page}: {} entries", projects.len());

            if projects.is_empty() {
                return Err(ArtifactError::ProjectNotFound(project_path.to_string()));
            }

            if let Some(project) = projects
                .iter()
                .find(|p| p.path_with_namespace == project_path)
            {
                info!("Located project {project_path} (id {})", project.id);
                return Ok(project.id);
            }

            let ids: Vec<u64> = projects.iter().map(|p| p.id).collect();
            if ids == previous_ids {
                return Err(ArtifactError::PaginationStalled { page });
            }
            previous_ids = ids;
        }

        Err(ArtifactError::PageLimitExceeded {
            project: project_path.to_string(),
            pages: max_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Token;
    use mockito::Matcher;

    fn page_body(entries: &[(u64, &str)]) -> String {
        let projects: Vec<_> = entries
            .iter()
            .map(|(id, path)| serde_json::json!({"id": id, "path_with_namespace": path}))
            .collect();
        serde_json::Value::Array(projects).to_string()
    }

    async fn mock_page(
        server: &mut mockito::ServerGuard,
        page: u32,
        entries: &[(u64, &str)],
        hits: usize,
    ) -> mockito::Mock {
        server
            .mock("GET", "/api/v4/projects")
            .match_query(Matcher::UrlEncoded("page".into(), page.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(page_body(entries))
            .expect(hits)
            .create_async()
            .await
    }

    fn client_for(server: &mockito::ServerGuard) -> GitLabClient {
        GitLabClient::new(&server.url(), &Token::from("glpat-test")).unwrap()
    }

    #[tokio::test]
    async fn test_locates_project_on_first_page() {
        let mut server = mockito::Server::new_async().await;
        let page1 = mock_page(&mut server, 1, &[(3, "other/repo"), (9, "group/app")], 1).await;
        let page2 = mock_page(&mut server, 2, &[(11, "group/app-two")], 0).await;

        let id = client_for(&server)
            .locate_project("group/app", DEFAULT_MAX_PAGES)
            .await
            .unwrap();

        assert_eq!(id, 9);
        page1.assert_async().await;
        page2.assert_async().await;
    }

    #[tokio::test]
    async fn test_stops_paginating_on_the_page_with_the_match() {
        let mut server = mockito::Server::new_async().await;
        let page1 = mock_page(&mut server, 1, &[(1, "a/one"), (2, "a/two")], 1).await;
        let page2 = mock_page(&mut server, 2, &[(3, "b/three"), (4, "b/four")], 1).await;
        let page3 = mock_page(&mut server, 3, &[(5, "c/five"), (6, "group/app")], 1).await;
        let page4 = mock_page(&mut server, 4, &[], 0).await;

        let id = client_for(&server)
            .locate_project("group/app", DEFAULT_MAX_PAGES)
            .await
            .unwrap();

        assert_eq!(id, 6);
        page1.assert_async().await;
        page2.assert_async().await;
        page3.assert_async().await;
        page4.assert_async().await;
    }

    #[tokio::test]
    async fn test_path_comparison_is_exact() {
        let mut server = mockito::Server::new_async().await;
        mock_page(&mut server, 1, &[(1, "Group/App"), (2, "group/app/sub")], 1).await;
        mock_page(&mut server, 2, &[], 1).await;

        let err = client_for(&server)
            .locate_project("group/app", DEFAULT_MAX_PAGES)
            .await
            .unwrap_err();

        assert!(matches!(err, ArtifactError::ProjectNotFound(ref p) if p == "group/app"));
    }

    #[tokio::test]
    async fn test_empty_page_ends_search_without_further_requests() {
        let mut server = mockito::Server::new_async().await;
        let page1 = mock_page(&mut server, 1, &[(1, "a/one")], 1).await;
        let page2 = mock_page(&mut server, 2, &[], 1).await;
        let page3 = mock_page(&mut server, 3, &[(2, "group/app")], 0).await;

        let err = client_for(&server)
            .locate_project("group/app", DEFAULT_MAX_PAGES)
            .await
            .unwrap_err();

        assert!(matches!(err, ArtifactError::ProjectNotFound(_)));
        page1.assert_async().await;
        page2.assert_async().await;
        page3.assert_async().await;
    }

    #[tokio::test]
    async fn test_repeated_page_is_reported_as_stalled() {
        let mut server = mockito::Server::new_async().await;
        let echo = server
            .mock("GET", "/api/v4/projects")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(page_body(&[(1, "a/one"), (2, "a/two")]))
            .expect(2)
            .create_async()
            .await;

        let err = client_for(&server)
            .locate_project("group/app", DEFAULT_MAX_PAGES)
            .await
            .unwrap_err();

        assert!(matches!(err, ArtifactError::PaginationStalled { page: 2 }));
        echo.assert_async().await;
    }

    #[tokio::test]
    async fn test_page_ceiling() {
        let mut server = mockito::Server::new_async().await;
        mock_page(&mut server, 1, &[(1, "a/one")], 1).await;
        mock_page(&mut server, 2, &[(2, "a/two")], 1).await;
        let page3 = mock_page(&mut server, 3, &[(3, "group/app")], 0).await;

        let err = client_for(&server)
            .locate_project("group/app", 2)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ArtifactError::PageLimitExceeded { pages: 2, .. }
        ));
        page3.assert_async().await;
    }
}
