use crate::git::{self, GitError};
use crate::parser::{self, DiffParseError};
use crate::stash::{self, StashParseError};
use crate::{CheckReport, DiffFile, Flag, StashEntry, indent};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Why a check run could not produce a report.
///
/// The variant distinguishes the failure domain: repository access,
/// diff parsing, stash parsing, or a file read for baseline
/// indentation. Findings are never errors; they live in `CheckReport`.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Git(#[from] GitError),
    #[error(transparent)]
    DiffParse(#[from] DiffParseError),
    #[error(transparent)]
    StashParse(#[from] StashParseError),
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
}

/// Keywords that should block a commit outright.
const ERROR_KEYWORDS: &[&str] = &["NOCHECKIN"];
/// Keywords worth surfacing but fine to commit.
const WARN_KEYWORDS: &[&str] = &["TODO"];

// One combined whole-word pattern over both classes; membership in the
// class lists decides severity after matching.
static KEYWORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let words: Vec<&str> = ERROR_KEYWORDS
        .iter()
        .chain(WARN_KEYWORDS.iter())
        .copied()
        .collect();
    Regex::new(&format!(r"\b({})\b", words.join("|"))).unwrap()
});

/// Everything the rules need: the snapshot of one pending change set.
#[derive(Debug, Clone)]
pub struct CheckState {
    pub current_branch: String,
    pub files: Vec<DiffFile>,
    pub stash_entries: Vec<StashEntry>,
}

/// Gather repository state and run every rule over it.
///
/// `rev` is the comparison target for the diff; `None` compares the
/// pending changes against HEAD. Any git, parse, or file-read failure
/// aborts the run; there are no retries and no partial reports.
pub fn check_changes(rev: Option<&str>) -> Result<CheckReport, CheckError> {
    let repo_root = git::find_repo_root()?;
    let current_branch = git::current_branch()?;
    let stash_entries = stash::parse_stash_list(&git::stash_list()?)?;
    let mut files = parser::parse_diff(&git::diff(rev)?)?;

    for file in &mut files {
        // Deletions and binary changes parse to zero changed lines; no
        // rule consumes a baseline then, and the path may no longer
        // exist on disk (or not hold text at all).
        if file.changed_lines.is_empty() {
            continue;
        }
        let on_disk = repo_root.join(&file.path);
        file.baseline =
            indent::file_baseline(&on_disk).map_err(|source| CheckError::FileRead {
                path: file.path.clone(),
                source,
            })?;
    }

    Ok(run_checks(&CheckState {
        current_branch,
        files,
        stash_entries,
    }))
}

/// Apply the three rules, in order, over an already-gathered snapshot.
///
/// Stash findings come first, then per-file findings in the order the
/// files were supplied, lines in input order. Errors and warnings stay
/// in separate sequences throughout.
pub fn run_checks(state: &CheckState) -> CheckReport {
    let mut report = CheckReport::default();

    for entry in &state.stash_entries {
        if entry.branch == state.current_branch {
            report.warnings.push(Flag::StashEntry {
                number: entry.number,
                raw: entry.raw.clone(),
            });
        }
    }

    for file in &state.files {
        for line in &file.changed_lines {
            if file.baseline.conflicts_with(line.indent) {
                report.errors.push(Flag::LineIndent {
                    path: file.path.clone(),
                    line: line.number,
                    file_indent: file.baseline,
                    line_indent: line.indent,
                });
            }

            // Only the leftmost keyword on a line counts.
            if let Some(found) = KEYWORD_PATTERN.find(&line.content) {
                let flag = Flag::Keyword {
                    path: file.path.clone(),
                    line: line.number,
                    keyword: found.as_str().to_string(),
                    content: line.content.clone(),
                };
                if ERROR_KEYWORDS.contains(&found.as_str()) {
                    report.errors.push(flag);
                } else {
                    report.warnings.push(flag);
                }
            }
        }
    }

    report
}
