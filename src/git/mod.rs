use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("not in a git repository")]
    NotARepo,
    #[error("git command failed: {0}")]
    CommandFailed(String),
    #[error("invalid git ref: {0}")]
    InvalidRef(String),
    #[error("utf-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GitError>;

/// Whether a `git` executable can be spawned at all.
pub fn exec_exists() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

/// Find the root of the git repository.
pub fn find_repo_root() -> Result<PathBuf> {
    let output = Command::new("git")
        .arg("rev-parse")
        .arg("--show-toplevel")
        .output()?;

    if !output.status.success() {
        return Err(GitError::NotARepo);
    }

    let path = String::from_utf8(output.stdout)?.trim().to_string();

    Ok(PathBuf::from(path))
}

/// Validate a git ref to prevent shell injection (only for user-supplied refs).
pub fn validate_git_ref(ref_str: &str) -> Result<()> {
    if ref_str.is_empty() {
        return Err(GitError::InvalidRef("Empty git ref".to_string()));
    }

    // Check for shell metacharacters
    for ch in ref_str.chars() {
        if !ch.is_alphanumeric()
            && !matches!(
                ch,
                '-' | '_' | '/' | '.' | '~' | '^' | '@' | ':' | '{' | '}'
            )
        {
            return Err(GitError::InvalidRef(format!(
                "Invalid character in git ref: '{}'",
                ch
            )));
        }
    }

    Ok(())
}

/// Get the current branch name (empty string in detached HEAD).
pub fn current_branch() -> Result<String> {
    let output = Command::new("git")
        .arg("branch")
        .arg("--show-current")
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::CommandFailed(format!(
            "git branch --show-current failed: {}",
            stderr
        )));
    }

    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Get the raw `git stash list` output.
pub fn stash_list() -> Result<String> {
    let output = Command::new("git").arg("stash").arg("list").output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::CommandFailed(format!(
            "git stash list failed: {}",
            stderr
        )));
    }

    String::from_utf8(output.stdout).map_err(GitError::from)
}

/// Get the full-patch diff against a rev.
///
/// `None` diffs against HEAD, i.e. the pending changes in the working
/// tree and index.
pub fn diff(rev: Option<&str>) -> Result<String> {
    let rev = rev.unwrap_or("HEAD");
    validate_git_ref(rev)?;

    let output = Command::new("git")
        .arg("diff")
        .arg("--no-color")
        .arg("-p")
        .arg(rev)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::CommandFailed(format!(
            "git diff failed: {}",
            stderr
        )));
    }

    String::from_utf8(output.stdout).map_err(GitError::from)
}

/// First candidate rev the repository actually knows about.
///
/// Empty and unresolvable candidates are skipped; `None` means the
/// caller should fall back to the default comparison target.
pub fn first_valid_rev(revs: &[String]) -> Option<String> {
    revs.iter()
        .filter(|rev| !rev.is_empty())
        .find(|rev| {
            validate_git_ref(rev).is_ok()
                && Command::new("git")
                    .arg("rev-parse")
                    .arg("--verify")
                    .arg("--quiet")
                    .arg(rev)
                    .output()
                    .is_ok_and(|output| output.status.success())
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_git_ref_valid() {
        assert!(validate_git_ref("main").is_ok());
        assert!(validate_git_ref("feature/foo").is_ok());
        assert!(validate_git_ref("HEAD~1").is_ok());
        assert!(validate_git_ref("main..HEAD").is_ok());
        assert!(validate_git_ref("v1.2.3").is_ok());
        assert!(validate_git_ref("origin/main").is_ok());
        assert!(validate_git_ref("HEAD^").is_ok());
        assert!(validate_git_ref("@{-1}").is_ok());
    }

    #[test]
    fn test_validate_git_ref_invalid() {
        assert!(validate_git_ref(";rm -rf").is_err());
        assert!(validate_git_ref("$(cmd)").is_err());
        assert!(validate_git_ref("|pipe").is_err());
        assert!(validate_git_ref("&bg").is_err());
        assert!(validate_git_ref("foo bar").is_err());
        assert!(validate_git_ref("foo\nbar").is_err());
    }

    #[test]
    fn test_validate_git_ref_empty() {
        assert!(validate_git_ref("").is_err());
    }

    #[test]
    fn first_valid_rev_skips_empty_candidates() {
        assert_eq!(first_valid_rev(&[String::new()]), None);
        assert_eq!(first_valid_rev(&[]), None);
    }
}
