use std::{
    error::Error,
    fmt::{Display, Formatter},
    future::Future,
};

use anyhow::Result;
use reqwest::{header::CONTENT_TYPE, Client, Response};
use serde::{de::DeserializeOwned, Serialize};

use super::{
    models::{NewPlaneIssue, NewPlaneLabel, PlaneId, PlaneIssue, PlaneLabel, PlanePage, PlaneProject},
    workspace::PlaneWorkspace,
};

const API_KEY_HEADER: &str = "x-api-key";

/// A trait for the Plane API calls needed to create a ticket.
pub trait PlaneClient {
    /// Returns every project in the workspace.
    fn projects(&self) -> impl Future<Output = Result<Vec<PlaneProject>>> + Send;

    /// Returns the labels of a project.
    fn labels(&self, project_id: &PlaneId) -> impl Future<Output = Result<Vec<PlaneLabel>>> + Send;

    /// Creates a label on a project and returns it.
    fn create_label(
        &self,
        project_id: &PlaneId,
        label: &NewPlaneLabel,
    ) -> impl Future<Output = Result<PlaneLabel>> + Send;

    /// Creates an issue on a project and returns it.
    fn create_issue(
        &self,
        project_id: &PlaneId,
        issue: &NewPlaneIssue,
    ) -> impl Future<Output = Result<PlaneIssue>> + Send;
}

/// An error returned when Plane responds with a non-success status code.
#[derive(Debug)]
pub struct PlaneApiError {
    status: u16,
    body: String,
}

impl Display for PlaneApiError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Plane API Error ({}): {}", self.status, self.body)
    }
}

impl Error for PlaneApiError {}

/// A `PlaneClient` that talks to the Plane REST API, authenticated with a static API key.
#[derive(Clone)]
pub struct PlaneHttpClient {
    http_client: Client,
    workspace: PlaneWorkspace,
    api_key: String,
}

impl PlaneHttpClient {
    pub fn new(http_client: Client, workspace: PlaneWorkspace, api_key: &str) -> Self {
        Self { http_client, workspace, api_key: api_key.to_string() }
    }
}

impl PlaneHttpClient {
    async fn get_results<T: DeserializeOwned + Send>(&self, path: &str) -> Result<Vec<T>> {
        let response = self
            .http_client
            .get(self.workspace.api_url(path))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        let page = Self::success(response).await?.json::<PlanePage<T>>().await?;
        Ok(page.results)
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned + Send>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .http_client
            .post(self.workspace.api_url(path))
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;
        Ok(Self::success(response).await?.json::<T>().await?)
    }

    async fn success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(anyhow::Error::new(PlaneApiError { status: status.as_u16(), body }))
    }
}

impl PlaneClient for PlaneHttpClient {
    async fn projects(&self) -> Result<Vec<PlaneProject>> {
        self.get_results("projects/").await
    }

    async fn labels(&self, project_id: &PlaneId) -> Result<Vec<PlaneLabel>> {
        self.get_results(&format!("projects/{}/labels/", project_id)).await
    }

    async fn create_label(&self, project_id: &PlaneId, label: &NewPlaneLabel) -> Result<PlaneLabel> {
        self.post(&format!("projects/{}/labels/", project_id), label).await
    }

    async fn create_issue(&self, project_id: &PlaneId, issue: &NewPlaneIssue) -> Result<PlaneIssue> {
        self.post(&format!("projects/{}/issues/", project_id), issue).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    const API_KEY: &str = "plane_api_test";

    async fn client_for(server: &MockServer) -> PlaneHttpClient {
        PlaneHttpClient::new(Client::new(), PlaneWorkspace::new(&server.uri(), "speer"), API_KEY)
    }

    #[tokio::test]
    async fn lists_projects_with_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/workspaces/speer/projects/"))
            .and(header(API_KEY_HEADER, API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "id": 42, "name": "Engineering" }]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let projects = client_for(&server).await.projects().await.unwrap();
        assert_eq!(projects, vec![PlaneProject::new(42, "Engineering")])
    }

    #[tokio::test]
    async fn lists_labels_of_project() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/workspaces/speer/projects/42/labels/"))
            .and(header(API_KEY_HEADER, API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "id": "l-1", "name": "via Slack", "color": "#36a64f" }]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let labels = client_for(&server).await.labels(&PlaneId::from(42)).await.unwrap();
        assert_eq!(labels, vec![PlaneLabel::new("l-1", "via Slack")])
    }

    #[tokio::test]
    async fn creates_label_with_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/workspaces/speer/projects/42/labels/"))
            .and(header(API_KEY_HEADER, API_KEY))
            .and(body_json(json!({ "name": "via Slack", "color": "#36a64f" })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({ "id": 7, "name": "via Slack" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        let label = client_for(&server)
            .await
            .create_label(&PlaneId::from(42), &NewPlaneLabel::via_slack())
            .await
            .unwrap();
        assert_eq!(label, PlaneLabel::new(7, "via Slack"))
    }

    #[tokio::test]
    async fn creates_issue_with_labels() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/workspaces/speer/projects/42/issues/"))
            .and(header(API_KEY_HEADER, API_KEY))
            .and(body_json(json!({ "name": "Fix login bug", "labels": [7] })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({ "id": 99, "priority": "high" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        let issue = client_for(&server)
            .await
            .create_issue(
                &PlaneId::from(42),
                &NewPlaneIssue::new("Fix login bug", vec![PlaneId::from(7)]),
            )
            .await
            .unwrap();
        assert_eq!(issue, PlaneIssue::new(99, "high"))
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/workspaces/speer/projects/42/issues/"))
            .respond_with(ResponseTemplate::new(400).set_body_string("name is required"))
            .mount(&server)
            .await;
        let error = client_for(&server)
            .await
            .create_issue(&PlaneId::from(42), &NewPlaneIssue::new("", vec![]))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Plane API Error (400): name is required")
    }

    #[tokio::test]
    async fn non_success_label_creation_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/workspaces/speer/projects/42/labels/"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .expect(1)
            .mount(&server)
            .await;
        let error = client_for(&server)
            .await
            .create_label(&PlaneId::from(42), &NewPlaneLabel::via_slack())
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Plane API Error (403): forbidden")
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/workspaces/speer/projects/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;
        assert!(client_for(&server).await.projects().await.is_err())
    }
}
