use super::models::PlaneId;

pub const DEFAULT_PLANE_BASE_URL: &str = "https://pm.speer.io";
pub const DEFAULT_PLANE_WORKSPACE: &str = "speer";

/// The Plane workspace that tickets are created in.
///
/// Holds the base url of the Plane deployment and the workspace slug, and builds both the REST
/// endpoints and the web links that are shown to slack users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaneWorkspace {
    base_url: String,
    slug: String,
}

impl PlaneWorkspace {
    pub fn new(base_url: &str, slug: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            slug: slug.to_string(),
        }
    }

    /// The speer workspace on pm.speer.io.
    pub fn speer() -> Self {
        Self::new(DEFAULT_PLANE_BASE_URL, DEFAULT_PLANE_WORKSPACE)
    }
}

impl PlaneWorkspace {
    /// The REST endpoint for `path` relative to this workspace.
    ///
    /// `path` must not start with a slash, and should end with one since Plane redirects
    /// otherwise.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1/workspaces/{}/{}", self.base_url, self.slug, path)
    }

    /// The web link to the issues list of a board.
    pub fn board_link(&self, board_id: &PlaneId) -> String {
        format!("{}/{}/projects/{}/issues/", self.base_url, self.slug, board_id)
    }

    /// The web link to an issue on a board.
    pub fn issue_link(&self, board_id: &PlaneId, issue_id: &PlaneId) -> String {
        format!("{}{}", self.board_link(board_id), issue_id)
    }
}
