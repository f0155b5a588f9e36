use crate::StashEntry;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// A stash listing line that does not match the expected grammar.
///
/// The listing comes from a trusted upstream tool, so a mismatch means
/// the format changed underneath us; the whole parse fails rather than
/// silently dropping entries.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized stash entry: {0:?}")]
pub struct StashParseError(pub String);

// Matches `stash@{N}: WIP on <branch>: ...` and `stash@{N}: On
// <branch>: ...`; the branch runs up to the next colon.
static STASH_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^stash@\{(\d+)\}:(?: WIP)? [Oo]n ([^:]+):").unwrap());

/// Parse one line of `git stash list` output.
pub fn parse_stash_entry(line: &str) -> Result<StashEntry, StashParseError> {
    let caps = STASH_LINE
        .captures(line)
        .ok_or_else(|| StashParseError(line.to_string()))?;

    let number = caps[1]
        .parse::<u32>()
        .map_err(|_| StashParseError(line.to_string()))?;

    Ok(StashEntry {
        number,
        branch: caps[2].to_string(),
        raw: line.to_string(),
    })
}

/// Parse a full stash listing, one entry per line, in input order.
///
/// Fails on the first malformed line with no partial results.
pub fn parse_stash_list(input: &str) -> Result<Vec<StashEntry>, StashParseError> {
    input
        .lines()
        .filter(|line| !line.is_empty())
        .map(parse_stash_entry)
        .collect()
}
