//! Blocking HTTP client for the GitLab REST API.

use crate::error::{Result, SyncError};
use reqwest::blocking::{Client, Response};
use serde::Serialize;
use std::time::Duration;

use super::types::{
    DiscussionPosition, MergeRequest, MergeRequestChanges, Note, Project,
};

/// Notes are fetched in pages of this size until a short page appears.
const NOTES_PAGE_SIZE: usize = 100;

/// Connection settings for a GitLab instance.
///
/// Constructed once at startup from config and environment; the client
/// never reads ambient process state.
#[derive(Debug, Clone)]
pub struct GitLabConfig {
    /// Base URL of the instance, e.g. `https://gitlab.com`.
    pub base_url: String,
    /// Personal access token with `api` scope.
    pub token: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Client for the GitLab v4 REST API.
pub struct GitLabClient {
    http: Client,
    base_url: String,
    token: String,
}

impl GitLabClient {
    /// Build a client from explicit connection settings.
    ///
    /// # Returns
    ///
    /// * `Ok(GitLabClient)` - Ready to use
    /// * `Err(SyncError::ApiError)` - HTTP client construction failed
    pub fn new(config: GitLabConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SyncError::ApiError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    /// Look up a project by numeric id or full path.
    pub fn project(&self, project: &str) -> Result<Project> {
        let url = self.api_url(&format!("projects/{}", encode_project_id(project)));
        self.get_json(&url, &[], &format!("project lookup for '{}'", project))
    }

    /// List open merge requests whose source branch matches.
    pub fn open_merge_requests(
        &self,
        project_id: u64,
        source_branch: &str,
    ) -> Result<Vec<MergeRequest>> {
        let url = self.api_url(&format!("projects/{}/merge_requests", project_id));
        self.get_json(
            &url,
            &[("source_branch", source_branch), ("state", "opened")],
            &format!("merge request lookup for branch '{}'", source_branch),
        )
    }

    /// Fetch a single merge request by IID.
    pub fn merge_request(&self, project_id: u64, iid: u64) -> Result<MergeRequest> {
        let url = self.api_url(&format!("projects/{}/merge_requests/{}", project_id, iid));
        self.get_json(&url, &[], &format!("merge request !{}", iid))
    }

    /// Fetch the changed files and diff refs of a merge request.
    ///
    /// Callers fetch this once per run and reuse the snapshot for every
    /// positional post.
    pub fn merge_request_changes(&self, project_id: u64, iid: u64) -> Result<MergeRequestChanges> {
        let url = self.api_url(&format!(
            "projects/{}/merge_requests/{}/changes",
            project_id, iid
        ));
        self.get_json(&url, &[], &format!("changes of merge request !{}", iid))
    }

    /// Create an inline discussion anchored at a diff position.
    pub fn create_discussion(
        &self,
        project_id: u64,
        iid: u64,
        body: &str,
        position: &DiscussionPosition,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct Payload<'a> {
            body: &'a str,
            position: &'a DiscussionPosition,
        }

        let url = self.api_url(&format!(
            "projects/{}/merge_requests/{}/discussions",
            project_id, iid
        ));

        let response = self
            .http
            .post(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .json(&Payload { body, position })
            .send()
            .map_err(|e| SyncError::ApiError(format!("discussion POST failed: {}", e)))?;

        check_status(response, "discussion creation").map(|_| ())
    }

    /// Create a plain (non-positional) note on a merge request.
    pub fn create_note(&self, project_id: u64, iid: u64, body: &str) -> Result<()> {
        #[derive(Serialize)]
        struct Payload<'a> {
            body: &'a str,
        }

        let url = self.api_url(&format!(
            "projects/{}/merge_requests/{}/notes",
            project_id, iid
        ));

        let response = self
            .http
            .post(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .json(&Payload { body })
            .send()
            .map_err(|e| SyncError::ApiError(format!("note POST failed: {}", e)))?;

        check_status(response, "note creation").map(|_| ())
    }

    /// List all notes on a merge request, following pagination.
    pub fn list_notes(&self, project_id: u64, iid: u64) -> Result<Vec<Note>> {
        let url = self.api_url(&format!(
            "projects/{}/merge_requests/{}/notes",
            project_id, iid
        ));

        let per_page = NOTES_PAGE_SIZE.to_string();
        let mut notes = Vec::new();
        let mut page: usize = 1;

        loop {
            let page_param = page.to_string();
            let batch: Vec<Note> = self.get_json(
                &url,
                &[("per_page", per_page.as_str()), ("page", page_param.as_str())],
                &format!("notes of merge request !{}", iid),
            )?;

            let batch_len = batch.len();
            notes.extend(batch);

            if batch_len < NOTES_PAGE_SIZE {
                return Ok(notes);
            }
            page += 1;
        }
    }

    /// Delete a note from a merge request.
    pub fn delete_note(&self, project_id: u64, iid: u64, note_id: u64) -> Result<()> {
        let url = self.api_url(&format!(
            "projects/{}/merge_requests/{}/notes/{}",
            project_id, iid, note_id
        ));

        let response = self
            .http
            .delete(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .map_err(|e| SyncError::ApiError(format!("note DELETE failed: {}", e)))?;

        check_status(response, &format!("deletion of note {}", note_id)).map(|_| ())
    }

    /// Build a full API URL from a path fragment.
    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v4/{}", self.base_url, path)
    }

    /// GET a URL and deserialize the JSON response.
    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        context: &str,
    ) -> Result<T> {
        let response = self
            .http
            .get(url)
            .header("PRIVATE-TOKEN", &self.token)
            .query(query)
            .send()
            .map_err(|e| SyncError::ApiError(format!("{} failed: {}", context, e)))?;

        let response = check_status(response, context)?;

        response
            .json()
            .map_err(|e| SyncError::ApiError(format!("{} returned unexpected JSON: {}", context, e)))
    }
}

/// Convert a non-2xx response into an ApiError carrying the status and a
/// snippet of the body (GitLab error payloads are short JSON messages).
fn check_status(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let snippet: String = body.chars().take(200).collect();

    Err(SyncError::ApiError(format!(
        "{} returned {}: {}",
        context, status, snippet
    )))
}

/// Encode a project identifier for use in a URL path.
///
/// Numeric ids pass through unchanged; project paths need their slashes
/// percent-encoded (`group/name` -> `group%2Fname`).
pub(super) fn encode_project_id(project: &str) -> String {
    project.replace('/', "%2F")
}
