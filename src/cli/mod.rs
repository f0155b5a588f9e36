use clap::Parser;

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
  Some options can also be set in environment variables; a value given
  on the command line wins over the environment.

  CHCK_CHNG_REVS    corresponds to the --revs option";

#[derive(Parser, Debug)]
#[command(
    name = "check-changes",
    about = "Check pending changes for things you may not want to commit",
    long_about = "Reads the current state of a git repository in the working directory, \
checking for any potential things which you may want to know about before \
checking in your code. Examples include added TODOs, mismatched indents, \
and stash entries shadowing work on your current branch.\n\n\
Flagged issues are divided into two levels of severity. Major issues are \
almost always incorrect to commit; if any is found, check-changes exits \
with a non-zero status code, so it can block the commit when used as a \
git hook. Everything else is printed but exits with status zero.",
    after_help = ENV_HELP
)]
pub struct Cli {
    /// Do not print additional context information with flagged issues.
    #[arg(long)]
    pub no_context: bool,

    /// An optional git rev to diff against. You may pass a list of revs,
    /// separated by colons (:); the first valid rev will be used. If no
    /// valid rev is matched, the diff is taken against HEAD.
    #[arg(long, env = "CHCK_CHNG_REVS", value_name = "REVS")]
    pub revs: Option<String>,
}

impl Cli {
    /// The candidate revs, split on colons, in preference order.
    pub fn parsed_revs(&self) -> Vec<String> {
        self.revs
            .as_deref()
            .unwrap_or_default()
            .split(':')
            .filter(|rev| !rev.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Parse CLI arguments.
pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty() {
        let cli = Cli::try_parse_from(["check-changes"]).unwrap();
        assert!(!cli.no_context);
        assert!(cli.parsed_revs().is_empty());
    }

    #[test]
    fn revs_split_on_colons() {
        let cli = Cli::try_parse_from(["check-changes", "--revs", "main:origin/main"]).unwrap();
        assert_eq!(cli.parsed_revs(), vec!["main", "origin/main"]);
    }

    #[test]
    fn empty_rev_segments_are_dropped() {
        let cli = Cli::try_parse_from(["check-changes", "--revs", ":main::"]).unwrap();
        assert_eq!(cli.parsed_revs(), vec!["main"]);
    }

    #[test]
    fn no_context_flag_parses() {
        let cli = Cli::try_parse_from(["check-changes", "--no-context"]).unwrap();
        assert!(cli.no_context);
    }
}
