//! GitHub remote discovery.
//!
//! Opens the repository at the project root (without searching parent
//! directories) and extracts the GitHub owner/repo of its remotes, plus
//! the checked-out branch.

use crate::error::DiscoveryError;
use crate::models::GitInfo;
use git2::Repository;
use std::path::Path;
use tracing::debug;

const DEFAULT_BRANCH: &str = "main";

/// Parse a GitHub URL to extract owner and repo name.
pub fn parse_github_url(url: &str) -> Option<(String, String)> {
    let url = url.trim().trim_end_matches('/').trim_end_matches(".git");

    let rest = url
        .strip_prefix("https://github.com/")
        .or_else(|| url.strip_prefix("http://github.com/"))
        .or_else(|| url.strip_prefix("ssh://git@github.com/"))
        .or_else(|| url.strip_prefix("git@github.com:"))?;

    let mut parts = rest.split('/');
    match (parts.next(), parts.next()) {
        (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
            Some((owner.to_string(), repo.to_string()))
        }
        _ => None,
    }
}

/// Get the current branch name, including an unborn one.
pub fn get_current_branch(repo: &Repository) -> Option<String> {
    match repo.head() {
        Ok(head) => head.shorthand().map(String::from),
        Err(_) => repo
            .find_reference("HEAD")
            .ok()?
            .symbolic_target()?
            .strip_prefix("refs/heads/")
            .map(String::from),
    }
}

/// Remote names with `origin` first.
fn ordered_remotes(repo: &Repository) -> Result<Vec<String>, DiscoveryError> {
    let mut names: Vec<String> = repo.remotes()?.iter().flatten().map(String::from).collect();
    if let Some(pos) = names.iter().position(|n| n == "origin") {
        let origin = names.remove(pos);
        names.insert(0, origin);
    }
    Ok(names)
}

fn inspect(root: &Path) -> Result<Option<GitInfo>, DiscoveryError> {
    let repo = Repository::open(root)?;

    for name in ordered_remotes(&repo)? {
        let remote = repo.find_remote(&name)?;
        if let Some((owner, repo_name)) = remote.url().and_then(parse_github_url) {
            return Ok(Some(GitInfo {
                owner,
                repo: repo_name,
                branch: get_current_branch(&repo).unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            }));
        }
    }

    Ok(None)
}

/// Detect GitHub coordinates of the project, if any.
///
/// Every failure (no repository, no GitHub remote) yields `None`.
pub fn detect_git_info(root: &Path) -> Option<GitInfo> {
    match inspect(root) {
        Ok(info) => info,
        Err(e) => {
            debug!("No git info for {}: {}", root.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_github_url_https() {
        let result = parse_github_url("https://github.com/rust-lang/rust");
        assert_eq!(result, Some(("rust-lang".to_string(), "rust".to_string())));
    }

    #[test]
    fn test_parse_github_url_https_with_git() {
        let result = parse_github_url("https://github.com/rust-lang/rust.git");
        assert_eq!(result, Some(("rust-lang".to_string(), "rust".to_string())));
    }

    #[test]
    fn test_parse_github_url_ssh() {
        let result = parse_github_url("git@github.com:rust-lang/rust.git");
        assert_eq!(result, Some(("rust-lang".to_string(), "rust".to_string())));
    }

    #[test]
    fn test_parse_github_url_invalid() {
        assert_eq!(parse_github_url("https://gitlab.com/user/repo"), None);
        assert_eq!(parse_github_url("https://github.com/only-owner"), None);
    }

    #[test]
    fn test_detect_git_info_from_origin() {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();
        repo.remote("upstream", "https://gitlab.com/mirror/widgets.git")
            .unwrap();
        repo.remote("origin", "git@github.com:acme/widgets.git")
            .unwrap();

        let info = detect_git_info(temp_dir.path()).unwrap();
        assert_eq!(info.owner, "acme");
        assert_eq!(info.repo, "widgets");
        // Unborn HEAD still names a branch.
        assert!(!info.branch.is_empty());
    }

    #[test]
    fn test_detect_git_info_without_github_remote() {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();
        repo.remote("origin", "https://gitlab.com/acme/widgets.git")
            .unwrap();

        assert!(detect_git_info(temp_dir.path()).is_none());
    }

    #[test]
    fn test_detect_git_info_not_a_repo() {
        let temp_dir = TempDir::new().unwrap();
        assert!(detect_git_info(temp_dir.path()).is_none());
    }
}
