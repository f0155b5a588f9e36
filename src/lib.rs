pub mod checks;
pub mod cli;
pub mod git;
pub mod indent;
pub mod parser;
pub mod stash;

use std::fmt;

/// Indentation style of a line or a whole file.
///
/// Combination is a monoid: `Unknown` is the identity (no information),
/// `MixedLine` is absorbing, and two differing known kinds collapse to
/// `MixedLine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentKind {
    Unknown,
    Tab,
    Space,
    MixedLine,
}

impl IndentKind {
    pub fn combine(self, other: IndentKind) -> IndentKind {
        use IndentKind::*;
        match (self, other) {
            (Unknown, x) | (x, Unknown) => x,
            (MixedLine, _) | (_, MixedLine) => MixedLine,
            (a, b) if a == b => a,
            _ => MixedLine,
        }
    }

    /// Whether a line's indentation conflicts with this baseline.
    ///
    /// `Unknown` on either side is treated as compatible, never as a
    /// conflict.
    pub fn conflicts_with(self, line: IndentKind) -> bool {
        if self == IndentKind::Unknown || line == IndentKind::Unknown {
            return false;
        }
        self != line
    }
}

impl fmt::Display for IndentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IndentKind::Unknown => "unknown",
            IndentKind::Tab => "tabs",
            IndentKind::Space => "spaces",
            IndentKind::MixedLine => "mixed tabs and spaces",
        };
        f.write_str(text)
    }
}

/// A single added line from a diff.
///
/// `content` keeps the raw diff line, leading `+` marker included; the
/// marker is only stripped when the line is rendered as context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedLine {
    /// 1-based line number on the post-change side of the diff.
    pub number: u32,
    pub indent: IndentKind,
    pub content: String,
}

/// One file touched by a diff, with its added lines in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffFile {
    pub path: String,
    /// Indentation style of the on-disk file. `Unknown` until the file
    /// has been inspected.
    pub baseline: IndentKind,
    pub changed_lines: Vec<ChangedLine>,
}

/// A parsed `git stash list` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StashEntry {
    pub number: u32,
    pub branch: String,
    /// The unmodified source line, kept for diagnostics.
    pub raw: String,
}

/// A single finding produced by the check engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flag {
    StashEntry {
        number: u32,
        raw: String,
    },
    LineIndent {
        path: String,
        line: u32,
        file_indent: IndentKind,
        line_indent: IndentKind,
    },
    Keyword {
        path: String,
        line: u32,
        keyword: String,
        content: String,
    },
}

/// Longest context line printed before truncation kicks in.
const CONTEXT_MAX_CHARS: usize = 80;

impl Flag {
    pub fn message(&self) -> String {
        match self {
            Flag::StashEntry { number, .. } => format!(
                "Stash entry {{{number}}} has stashed changes from your current branch"
            ),
            Flag::LineIndent {
                path,
                line,
                file_indent,
                line_indent,
            } => format!(
                "{path}:{line} | line has indentation ({line_indent}) \
                 inconsistent with the rest of the file ({file_indent})"
            ),
            Flag::Keyword {
                path,
                line,
                keyword,
                ..
            } => format!("{path}:{line} | line contains keyword \"{keyword}\""),
        }
    }

    /// Extra context printed under the message, where one exists.
    pub fn context(&self) -> Option<String> {
        match self {
            Flag::StashEntry { raw, .. } => Some(raw.clone()),
            Flag::LineIndent { .. } => None,
            Flag::Keyword { content, .. } => {
                let text = content.strip_prefix('+').unwrap_or(content).trim();
                let mut shown: String = text.chars().take(CONTEXT_MAX_CHARS).collect();
                if text.chars().count() > CONTEXT_MAX_CHARS {
                    shown.push_str("...");
                }
                Some(shown)
            }
        }
    }
}

/// The outcome of one check run: findings split by severity.
///
/// Errors are block-worthy, warnings informational. The two sequences
/// are never interleaved; the driver decides how to present them and
/// picks the process exit code from `has_errors`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub errors: Vec<Flag>,
    pub warnings: Vec<Flag>,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [IndentKind; 4] = [
        IndentKind::Unknown,
        IndentKind::Tab,
        IndentKind::Space,
        IndentKind::MixedLine,
    ];

    #[test]
    fn combine_unknown_is_identity() {
        for kind in ALL_KINDS {
            assert_eq!(IndentKind::Unknown.combine(kind), kind);
            assert_eq!(kind.combine(IndentKind::Unknown), kind);
        }
    }

    #[test]
    fn combine_mixed_is_absorbing() {
        for kind in ALL_KINDS {
            assert_eq!(IndentKind::MixedLine.combine(kind), IndentKind::MixedLine);
            assert_eq!(kind.combine(IndentKind::MixedLine), IndentKind::MixedLine);
        }
    }

    #[test]
    fn combine_differing_known_kinds_yield_mixed() {
        assert_eq!(
            IndentKind::Tab.combine(IndentKind::Space),
            IndentKind::MixedLine
        );
        assert_eq!(
            IndentKind::Space.combine(IndentKind::Tab),
            IndentKind::MixedLine
        );
    }

    #[test]
    fn combine_is_commutative_and_associative() {
        for a in ALL_KINDS {
            for b in ALL_KINDS {
                assert_eq!(a.combine(b), b.combine(a));
                for c in ALL_KINDS {
                    assert_eq!(a.combine(b).combine(c), a.combine(b.combine(c)));
                }
            }
        }
    }

    #[test]
    fn conflicts_require_both_sides_known() {
        assert!(IndentKind::Tab.conflicts_with(IndentKind::Space));
        assert!(!IndentKind::Tab.conflicts_with(IndentKind::Tab));
        assert!(!IndentKind::Unknown.conflicts_with(IndentKind::Space));
        assert!(!IndentKind::Tab.conflicts_with(IndentKind::Unknown));
    }

    #[test]
    fn keyword_context_strips_marker_and_trims() {
        let flag = Flag::Keyword {
            path: "src/lib.rs".to_string(),
            line: 3,
            keyword: "TODO".to_string(),
            content: "+    // TODO: rewrite   ".to_string(),
        };
        assert_eq!(flag.context().unwrap(), "// TODO: rewrite");
    }

    #[test]
    fn keyword_context_truncates_long_lines() {
        let flag = Flag::Keyword {
            path: "a".to_string(),
            line: 1,
            keyword: "TODO".to_string(),
            content: format!("+{}", "x".repeat(120)),
        };
        assert_eq!(flag.context().unwrap(), format!("{}...", "x".repeat(80)));
    }

    #[test]
    fn keyword_context_at_exactly_eighty_chars_is_untouched() {
        let flag = Flag::Keyword {
            path: "a".to_string(),
            line: 1,
            keyword: "TODO".to_string(),
            content: "y".repeat(80),
        };
        assert_eq!(flag.context().unwrap(), "y".repeat(80));
    }

    #[test]
    fn indent_flag_has_no_context() {
        let flag = Flag::LineIndent {
            path: "a".to_string(),
            line: 1,
            file_indent: IndentKind::Tab,
            line_indent: IndentKind::Space,
        };
        assert!(flag.context().is_none());
    }

    #[test]
    fn stash_flag_message_names_slot() {
        let flag = Flag::StashEntry {
            number: 3,
            raw: "stash@{3}: WIP on main: abc".to_string(),
        };
        assert_eq!(
            flag.message(),
            "Stash entry {3} has stashed changes from your current branch"
        );
        assert_eq!(flag.context().unwrap(), "stash@{3}: WIP on main: abc");
    }
}
