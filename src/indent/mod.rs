use crate::IndentKind;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Classify the leading whitespace of a single line.
///
/// Scans only up to the first non-whitespace character. Lines with no
/// leading whitespace (including empty lines) classify as `Unknown`.
pub fn classify_line(text: &str) -> IndentKind {
    let mut kind = IndentKind::Unknown;
    for ch in text.chars() {
        kind = match ch {
            ' ' => kind.combine(IndentKind::Space),
            '\t' => kind.combine(IndentKind::Tab),
            _ => break,
        };
    }
    kind
}

/// Infer a file's indentation style from its lines.
///
/// Returns the classification of the first line with any leading
/// whitespace, or `Unknown` if no line has one. A single sample is a
/// deliberately cheap approximation of the file's style, not a
/// majority vote.
pub fn classify_baseline<'a>(lines: impl IntoIterator<Item = &'a str>) -> IndentKind {
    for line in lines {
        let kind = classify_line(line);
        if kind != IndentKind::Unknown {
            return kind;
        }
    }
    IndentKind::Unknown
}

/// Read a file from disk and infer its baseline indentation.
///
/// The file is scanned sequentially and closed as soon as the first
/// classifiable line is found.
pub fn file_baseline(path: &Path) -> std::io::Result<IndentKind> {
    let reader = BufReader::new(File::open(path)?);
    for line in reader.lines() {
        let kind = classify_line(&line?);
        if kind != IndentKind::Unknown {
            return Ok(kind);
        }
    }
    Ok(IndentKind::Unknown)
}
