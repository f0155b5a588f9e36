use crate::indent::classify_line;
use crate::{ChangedLine, DiffFile, IndentKind};
use std::collections::HashMap;
use thiserror::Error;

/// A diff body line that is neither a header nor one of the three
/// recognized hunk markers. The upstream tool is trusted to emit
/// well-formed output, so this aborts the whole parse.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized diff line: {0:?}")]
pub struct DiffParseError(pub String);

/// Target path git emits for the post-change side of a pure deletion.
const NULL_PATH: &str = "/dev/null";

/// Parse raw `git diff --no-color -p` output into per-file records of
/// added lines.
///
/// Only added (`+`) hunk lines are recorded; each carries its 1-based
/// line number on the post-change side and the indentation
/// classification of its text. Files appear in first-seen order, lines
/// in input order. Pure function: no I/O, deterministic.
pub fn parse_diff(input: &str) -> Result<Vec<DiffFile>, DiffParseError> {
    let mut files: Vec<DiffFile> = Vec::new();
    let mut by_path: HashMap<String, usize> = HashMap::new();

    // Index of the file the upcoming lines belong to. None while inside
    // a skipped pure-deletion entry or before the first file header.
    let mut current: Option<usize> = None;
    // Set between a file header and its first hunk header, where every
    // line is an extended header (index, modes, ---/+++, renames,
    // binary markers) to be skipped.
    let mut in_headers = true;
    // Running post-change line counter. None when the active hunk
    // declared no new-side range, which disables tracking until the
    // next hunk header.
    let mut next_line: Option<u32> = None;

    for line in input.lines() {
        // The collaborator never emits empty lines inside a patch; an
        // empty hunk line (e.g. from trailing-whitespace stripping)
        // carries no marker to classify.
        if line.is_empty() {
            continue;
        }

        if line.starts_with("diff --git ") {
            // The target path is everything after the last b/ marker. A
            // pure deletion has no post-change file: its target is the
            // bare /dev/null sentinel, with no b/ marker at all.
            let path = match line.rfind("b/") {
                Some(pos) => &line[pos + 2..],
                None if line.split_whitespace().next_back() == Some(NULL_PATH) => NULL_PATH,
                None => return Err(DiffParseError(line.to_string())),
            };
            current = if path == NULL_PATH {
                None
            } else if let Some(&idx) = by_path.get(path) {
                Some(idx)
            } else {
                by_path.insert(path.to_string(), files.len());
                files.push(DiffFile {
                    path: path.to_string(),
                    baseline: IndentKind::Unknown,
                    changed_lines: Vec::new(),
                });
                Some(files.len() - 1)
            };
            in_headers = true;
            next_line = None;
            continue;
        }

        if line.starts_with("@@") {
            next_line = parse_new_start(line)?;
            in_headers = false;
            continue;
        }

        if in_headers {
            continue;
        }

        match line.as_bytes()[0] {
            b' ' => {
                if let Some(n) = next_line.as_mut() {
                    *n += 1;
                }
            }
            b'-' => {}
            b'+' => {
                if let (Some(idx), Some(n)) = (current, next_line.as_mut()) {
                    files[idx].changed_lines.push(ChangedLine {
                        number: *n,
                        indent: classify_line(&line[1..]),
                        content: line.to_string(),
                    });
                    *n += 1;
                }
            }
            // "\ No newline at end of file"
            b'\\' => {}
            _ => return Err(DiffParseError(line.to_string())),
        }
    }

    Ok(files)
}

/// Extract the new-side start from a `@@ -old[,n] +new[,n] @@` header.
///
/// Returns `None` when the header carries no `+` range (a hunk that
/// only removes content).
fn parse_new_start(line: &str) -> Result<Option<u32>, DiffParseError> {
    let body = line.strip_prefix("@@").unwrap_or(line);
    let body = match body.find("@@") {
        Some(pos) => &body[..pos],
        None => body,
    };

    for token in body.split_whitespace() {
        if let Some(range) = token.strip_prefix('+') {
            let digits = range.split(',').next().unwrap_or(range);
            let start = digits
                .parse::<u32>()
                .map_err(|_| DiffParseError(line.to_string()))?;
            return Ok(Some(start));
        }
    }

    Ok(None)
}
