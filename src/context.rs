//! Run context resolution for mrsync commands.
//!
//! This module provides the "environment resolution" layer shared by the
//! sync and preview commands: find the repository, load config, read the
//! token, resolve the project, and locate the merge request. Commands
//! receive everything through this struct; nothing downstream reads
//! ambient process state.

use crate::config::{CONFIG_FILE_NAME, Config};
use crate::error::{Result, SyncError};
use crate::git;
use crate::gitlab::{GitLabClient, GitLabConfig, MergeRequest, Project};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved context for one mrsync run.
pub struct RunContext {
    /// Absolute path to the repository root.
    pub repo_root: PathBuf,

    /// Loaded configuration (defaults if `.mrsync.yaml` is absent).
    pub config: Config,

    /// Authenticated API client.
    pub client: GitLabClient,

    /// The resolved project (numeric id and web URL).
    pub project: Project,

    /// Source branch the merge request was looked up by.
    pub branch: String,

    /// The merge request comments are synced into.
    pub mr: MergeRequest,
}

impl RunContext {
    /// Resolve the full run context from the current working directory.
    ///
    /// # Arguments
    ///
    /// * `branch_override` - Use this branch instead of the checked-out one
    /// * `mr_iid` - Use this merge request directly, skipping branch lookup
    /// * `project_override` - Project path or id, overriding config/remote detection
    pub fn resolve(
        branch_override: Option<&str>,
        mr_iid: Option<u64>,
        project_override: Option<&str>,
    ) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            SyncError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Self::resolve_from(&cwd, branch_override, mr_iid, project_override)
    }

    /// Resolve the run context from a specific directory.
    pub fn resolve_from<P: AsRef<Path>>(
        cwd: P,
        branch_override: Option<&str>,
        mr_iid: Option<u64>,
        project_override: Option<&str>,
    ) -> Result<Self> {
        let repo_root = git::repo_root(cwd)?;
        let config = Config::load_or_default(repo_root.join(CONFIG_FILE_NAME))?;

        let token = env::var(&config.token_env).map_err(|_| {
            SyncError::UserError(format!(
                "access token not found.\n\n\
                 Set the {} environment variable to a GitLab personal access\n\
                 token with `api` scope (configurable via token_env in {}).",
                config.token_env, CONFIG_FILE_NAME
            ))
        })?;

        let project_ref = resolve_project_ref(&repo_root, &config, project_override)?;

        let client = GitLabClient::new(GitLabConfig {
            base_url: config.gitlab_url.clone(),
            token,
            timeout: Duration::from_secs(config.api_timeout_secs),
        })?;

        let project = client.project(&project_ref)?;

        let branch = match branch_override {
            Some(branch) => branch.to_string(),
            None => git::current_branch(&repo_root)?,
        };

        let mr = find_merge_request(&client, &project, &branch, mr_iid)?;

        Ok(Self {
            repo_root,
            config,
            client,
            project,
            branch,
            mr,
        })
    }
}

/// Determine the project reference (path or numeric id) to look up.
///
/// Precedence: CLI override, then config, then the remote URL.
fn resolve_project_ref(
    repo_root: &Path,
    config: &Config,
    project_override: Option<&str>,
) -> Result<String> {
    if let Some(project) = project_override {
        return Ok(project.to_string());
    }

    if let Some(project) = &config.project {
        return Ok(project.clone());
    }

    let url = git::remote_url(repo_root, &config.remote)?;

    git::project_path_from_remote(&url).ok_or_else(|| {
        SyncError::UserError(format!(
            "could not derive a project path from remote '{}' ({}).\n\n\
             Set the project explicitly in {} (project: group/name) or pass --project.",
            config.remote, url, CONFIG_FILE_NAME
        ))
    })
}

/// Locate the merge request to sync into.
fn find_merge_request(
    client: &GitLabClient,
    project: &Project,
    branch: &str,
    mr_iid: Option<u64>,
) -> Result<MergeRequest> {
    if let Some(iid) = mr_iid {
        return client.merge_request(project.id, iid);
    }

    let mut candidates = client.open_merge_requests(project.id, branch)?;

    if candidates.is_empty() {
        return Err(SyncError::UserError(format!(
            "no open merge request found for branch '{}' in {}.\n\n\
             Create the merge request first, or pass --mr <iid> to target\n\
             a specific one.",
            branch, project.path_with_namespace
        )));
    }

    if candidates.len() > 1 {
        // Several open MRs can share a source branch (different targets).
        println!(
            "note: {} open merge requests for branch '{}'; using !{} (pass --mr to override)",
            candidates.len(),
            branch,
            candidates[0].iid
        );
    }

    Ok(candidates.remove(0))
}
