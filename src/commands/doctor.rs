//! Implementation of the `mrsync doctor` command.
//!
//! Walks the chain a sync run depends on (git checkout, config, token,
//! project detection, API reachability, merge request lookup) and reports
//! what is missing, with a remediation hint per issue. Checks later in
//! the chain are skipped once a prerequisite fails.

use crate::config::{CONFIG_FILE_NAME, Config};
use crate::context::RunContext;
use crate::error::{Result, SyncError};
use crate::git;
use std::env;

/// An issue found by doctor.
struct Issue {
    description: String,
    remediation: String,
}

/// Execute the `mrsync doctor` command.
///
/// Returns a user error (exit 1) when issues were found, so scripts can
/// gate on the exit code.
pub fn cmd_doctor() -> Result<()> {
    let mut issues: Vec<Issue> = Vec::new();

    println!("mrsync doctor");
    println!("=============");
    println!();

    // Each check prints one line; failures collect an issue and skip the
    // checks that depend on them.
    run_checks(&mut issues);

    println!();
    if issues.is_empty() {
        println!("Everything looks good.");
        return Ok(());
    }

    println!("Issues detected ({}):", issues.len());
    println!();
    for (i, issue) in issues.iter().enumerate() {
        println!("  {}. {}", i + 1, issue.description);
        println!("     Fix: {}", issue.remediation);
        println!();
    }

    Err(SyncError::UserError(format!(
        "doctor found {} issue(s)",
        issues.len()
    )))
}

fn run_checks(issues: &mut Vec<Issue>) {
    // Git repository
    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            report(issues, false, "working directory", &e.to_string(), "run mrsync from a readable directory");
            return;
        }
    };

    let repo_root = match git::repo_root(&cwd) {
        Ok(root) => {
            println!("  ok: git repository at {}", root.display());
            root
        }
        Err(_) => {
            report(
                issues,
                false,
                "git repository",
                "not inside a git repository",
                "run mrsync from within the repository the merge request belongs to",
            );
            return;
        }
    };

    // Config
    let config = match Config::load_or_default(repo_root.join(CONFIG_FILE_NAME)) {
        Ok(config) => {
            println!("  ok: configuration loaded");
            config
        }
        Err(e) => {
            report(
                issues,
                false,
                "configuration",
                &e.to_string(),
                &format!("fix or remove {}", CONFIG_FILE_NAME),
            );
            return;
        }
    };

    // Token
    let token_present = env::var(&config.token_env).is_ok();
    if token_present {
        println!("  ok: {} is set", config.token_env);
    } else {
        report(
            issues,
            true,
            "access token",
            &format!("{} is not set", config.token_env),
            &format!(
                "export {}=<personal access token with api scope>",
                config.token_env
            ),
        );
    }

    // Branch
    let branch = match git::current_branch(&repo_root) {
        Ok(branch) => {
            println!("  ok: on branch '{}'", branch);
            Some(branch)
        }
        Err(e) => {
            report(
                issues,
                true,
                "branch detection",
                &e.to_string(),
                "check out the merge request branch, or pass --branch to sync",
            );
            None
        }
    };

    // Project detection
    let project_configured = config.project.is_some();
    if let Some(project) = &config.project {
        println!("  ok: project '{}' (from config)", project);
    } else {
        match git::remote_url(&repo_root, &config.remote) {
            Ok(url) => match git::project_path_from_remote(&url) {
                Some(path) => println!("  ok: project '{}' (from remote '{}')", path, config.remote),
                None => report(
                    issues,
                    true,
                    "project detection",
                    &format!("cannot derive a project path from '{}'", url),
                    &format!("set project: group/name in {}", CONFIG_FILE_NAME),
                ),
            },
            Err(e) => report(
                issues,
                true,
                "project detection",
                &e.to_string(),
                &format!(
                    "add the '{}' remote or set project: group/name in {}",
                    config.remote, CONFIG_FILE_NAME
                ),
            ),
        }
    }

    // API reachability and MR lookup need a token and a project.
    if !token_present {
        println!("  --  skipping API checks (no token)");
        return;
    }
    if !project_configured && issues.iter().any(|i| i.description.contains("project detection")) {
        println!("  --  skipping API checks (no project)");
        return;
    }

    match RunContext::resolve_from(&cwd, branch.as_deref(), None, None) {
        Ok(ctx) => {
            println!(
                "  ok: GitLab reachable, project id {} ({})",
                ctx.project.id, ctx.project.path_with_namespace
            );
            println!(
                "  ok: open merge request !{} for branch '{}'",
                ctx.mr.iid, ctx.branch
            );
        }
        Err(e) => {
            report(
                issues,
                true,
                "GitLab lookup",
                &e.to_string(),
                "check gitlab_url, token scope, and that an open merge request exists for the branch",
            );
        }
    }
}

/// Print a failing check line and record the issue.
///
/// `continuing` marks checks whose failure does not stop the chain.
fn report(issues: &mut Vec<Issue>, continuing: bool, check: &str, problem: &str, fix: &str) {
    // Multi-line error messages flatten to their first line in the checklist.
    let first_line = problem.lines().next().unwrap_or(problem);
    println!("  issue: {}: {}", check, first_line);
    if !continuing {
        println!("  --  skipping remaining checks");
    }

    issues.push(Issue {
        description: format!("{}: {}", check, first_line),
        remediation: fix.to_string(),
    });
}
