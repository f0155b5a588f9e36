use anyhow::{Result, bail};

use check_changes::cli::{self, Cli};
use check_changes::{CheckReport, Flag, checks, git};

fn main() -> Result<()> {
    let args = cli::parse_args();

    if !git::exec_exists() {
        bail!("\"git\" executable not found on system PATH");
    }

    let rev = git::first_valid_rev(&args.parsed_revs());
    let report = checks::check_changes(rev.as_deref())?;

    print_results(&args, &report);

    // Warnings alone are fine to commit; errors block.
    if report.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_results(args: &Cli, report: &CheckReport) {
    if report.has_errors() {
        println!("POTENTIAL MAJOR ISSUES:");
        for flag in &report.errors {
            print_flag(args, flag);
        }
        if !report.warnings.is_empty() {
            println!();
        }
    }

    if !report.warnings.is_empty() {
        println!("POTENTIAL ISSUES:");
        for flag in &report.warnings {
            print_flag(args, flag);
        }
    }
}

fn print_flag(args: &Cli, flag: &Flag) {
    println!("  - {}", flag.message());
    if !args.no_context
        && let Some(context) = flag.context()
    {
        println!("    {context}");
    }
}
