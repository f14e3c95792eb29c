//! Output formatting for batch results.
//!
//! Two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: the batch wire shape, for programmatic consumption

use colored::*;

use crate::issue::{BatchReport, FileStatus, Priority};

/// Write the batch report as pretty-printed JSON to stdout.
pub fn write_json(report: &BatchReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

/// Write the batch report in human-readable form.
pub fn write_pretty(report: &BatchReport) {
    println!();
    print!("  {}", "faultline".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    for result in &report.results {
        match result.status {
            FileStatus::Error => {
                print!("  {} ", "ERROR".red());
                print!("{}", result.file.blue());
                println!(
                    "  {}",
                    result.error.as_deref().unwrap_or("unknown failure").dimmed()
                );
                println!();
                continue;
            }
            FileStatus::Success if result.issues.is_empty() => {
                print!("  {} ", "CLEAN".green());
                println!("{}", result.file.blue());
                println!();
                continue;
            }
            FileStatus::Success => {
                print!("  {} ", "FOUND".yellow());
                print!("{}", result.file.blue());
                println!("  ({} issues)", result.issues.len());
            }
        }

        for issue in &result.issues {
            print!("    ");
            write_priority_tag(issue.priority);
            print!("  {}", issue.title);
            println!("  {}", format!("[{}]", issue.tags.join(", ")).dimmed());
        }
        println!();
    }

    write_summary(report);
    println!();
}

fn write_priority_tag(priority: Priority) {
    match priority {
        Priority::Critical => print!("{}", "CRIT".red().bold()),
        Priority::High => print!("{}", "HIGH".red()),
        Priority::Medium => print!("{}", "MED ".yellow()),
        Priority::Low => print!("{}", "LOW ".blue()),
    }
}

fn write_summary(report: &BatchReport) {
    let s = &report.summary;
    print!(
        "  {}",
        format!(
            "{} files, {} issues, {} files with issues",
            s.total_files, s.total_issues, s.files_with_issues
        )
        .dimmed()
    );
    println!();
}
