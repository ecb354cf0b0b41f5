use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::sync::Mutex;

use super::{
    client::PlaneClient,
    models::{NewPlaneIssue, NewPlaneLabel, PlaneId, PlaneIssue, PlaneLabel, PlaneProject},
};

/// A call made to a `TestPlaneClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaneCall {
    Projects,
    Labels(PlaneId),
    CreateLabel(PlaneId, NewPlaneLabel),
    CreateIssue(PlaneId, NewPlaneIssue),
}

/// An in-memory `PlaneClient` that records every call made to it.
///
/// Clones share the same call log.
#[derive(Clone)]
pub struct TestPlaneClient {
    projects: Option<Vec<PlaneProject>>,
    labels: Option<Vec<PlaneLabel>>,
    created_label_id: Option<PlaneId>,
    created_issue: Option<PlaneIssue>,
    calls: Arc<Mutex<Vec<PlaneCall>>>,
}

impl TestPlaneClient {
    /// A client with no projects or labels, that hands out label id 7 and issue 99 with a
    /// "high" priority.
    pub fn new() -> Self {
        Self {
            projects: Some(vec![]),
            labels: Some(vec![]),
            created_label_id: Some(PlaneId::from(7)),
            created_issue: Some(PlaneIssue::new(99, "high")),
            calls: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn with_project(mut self, project: PlaneProject) -> Self {
        if let Some(projects) = self.projects.as_mut() {
            projects.push(project)
        }
        self
    }

    pub fn with_label(mut self, label: PlaneLabel) -> Self {
        if let Some(labels) = self.labels.as_mut() {
            labels.push(label)
        }
        self
    }

    pub fn creating_issue(self, issue: PlaneIssue) -> Self {
        Self { created_issue: Some(issue), ..self }
    }

    pub fn failing_projects(self) -> Self {
        Self { projects: None, ..self }
    }

    pub fn failing_labels(self) -> Self {
        Self { labels: None, ..self }
    }

    pub fn failing_label_creation(self) -> Self {
        Self { created_label_id: None, ..self }
    }

    pub fn failing_issue_creation(self) -> Self {
        Self { created_issue: None, ..self }
    }
}

impl TestPlaneClient {
    pub async fn calls(&self) -> Vec<PlaneCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: PlaneCall) {
        self.calls.lock().await.push(call)
    }
}

impl PlaneClient for TestPlaneClient {
    async fn projects(&self) -> Result<Vec<PlaneProject>> {
        self.record(PlaneCall::Projects).await;
        self.projects.clone().ok_or_else(|| anyhow!("Projects are unavailable"))
    }

    async fn labels(&self, project_id: &PlaneId) -> Result<Vec<PlaneLabel>> {
        self.record(PlaneCall::Labels(project_id.clone())).await;
        self.labels.clone().ok_or_else(|| anyhow!("Labels are unavailable"))
    }

    async fn create_label(&self, project_id: &PlaneId, label: &NewPlaneLabel) -> Result<PlaneLabel> {
        self.record(PlaneCall::CreateLabel(project_id.clone(), label.clone())).await;
        self.created_label_id
            .clone()
            .map(|id| PlaneLabel::new(id, label.name()))
            .ok_or_else(|| anyhow!("Failed to create label"))
    }

    async fn create_issue(&self, project_id: &PlaneId, issue: &NewPlaneIssue) -> Result<PlaneIssue> {
        self.record(PlaneCall::CreateIssue(project_id.clone(), issue.clone())).await;
        self.created_issue.clone().ok_or_else(|| anyhow!("Failed to create issue"))
    }
}
