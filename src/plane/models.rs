use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The name of the label attached to every ticket created from slack.
pub const VIA_SLACK_LABEL_NAME: &str = "via Slack";

/// The color used when the "via Slack" label needs to be created on a board.
pub const VIA_SLACK_LABEL_COLOR: &str = "#36a64f";

/// An identifier assigned by Plane.
///
/// Plane hands out UUID strings, but some deployments (and fixtures) use integers. The id is
/// always echoed back to Plane in the same JSON form it was received in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlaneId {
    Number(u64),
    Text(String),
}

impl Display for PlaneId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{}", id),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for PlaneId {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for PlaneId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// A paginated list response from the Plane API.
#[derive(Debug, Deserialize)]
pub struct PlanePage<T> {
    pub results: Vec<T>,
}

/// A project in Plane, which slack users refer to as a board.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaneProject {
    id: PlaneId,
    name: String,
}

impl PlaneProject {
    pub fn new(id: impl Into<PlaneId>, name: &str) -> Self {
        Self { id: id.into(), name: name.to_string() }
    }

    pub fn id(&self) -> &PlaneId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaneLabel {
    id: PlaneId,
    name: String,
}

impl PlaneLabel {
    pub fn new(id: impl Into<PlaneId>, name: &str) -> Self {
        Self { id: id.into(), name: name.to_string() }
    }

    pub fn id(&self) -> &PlaneId {
        &self.id
    }

    pub fn is_via_slack(&self) -> bool {
        self.name == VIA_SLACK_LABEL_NAME
    }
}

/// An issue in Plane, which slack users refer to as a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaneIssue {
    id: PlaneId,
    #[serde(default)]
    priority: Option<String>,
}

impl PlaneIssue {
    pub fn new(id: impl Into<PlaneId>, priority: &str) -> Self {
        Self { id: id.into(), priority: Some(priority.to_string()) }
    }

    pub fn id(&self) -> &PlaneId {
        &self.id
    }

    /// The priority Plane assigned to this issue, "none" if Plane didn't report one.
    pub fn priority(&self) -> &str {
        self.priority.as_deref().unwrap_or("none")
    }
}

/// The body of a request to create a label on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPlaneLabel {
    name: String,
    color: String,
}

impl NewPlaneLabel {
    /// The "via Slack" label.
    pub fn via_slack() -> Self {
        Self {
            name: VIA_SLACK_LABEL_NAME.to_string(),
            color: VIA_SLACK_LABEL_COLOR.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The body of a request to create an issue on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPlaneIssue {
    name: String,
    labels: Vec<PlaneId>,
}

impl NewPlaneIssue {
    pub fn new(name: &str, labels: Vec<PlaneId>) -> Self {
        Self { name: name.to_string(), labels }
    }
}
