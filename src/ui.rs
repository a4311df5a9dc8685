use crate::release::ReleaseReport;

pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message); // Red color
}

pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message); // Green color
}

pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message); // Yellow color
}

pub fn display_warning(message: &str) {
    println!("\x1b[33mWARNING:\x1b[0m {}", message);
}

pub fn display_bump(previous: &str, next: &str) {
    println!("\n\x1b[1mProposed version bump:\x1b[0m");
    println!("  From: \x1b[31m{}\x1b[0m", previous);
    println!("  To:   \x1b[32m{}\x1b[0m", next);
}

/// Show the changelog diff, warning when it is empty (a real bump always
/// changes at least the two placeholder lines).
pub fn display_diff(diff: &str) {
    println!("\n\x1b[1mChangelog diff:\x1b[0m");
    if diff.is_empty() {
        display_warning("The rewrite produced no textual change");
    } else {
        println!("{}", diff);
    }
}

pub fn display_body(body: &str) {
    println!("\n\x1b[1mRelease notes:\x1b[0m");
    println!("{}", body);
}

/// Print the local commands a real publish would have run.
pub fn display_dry_run(report: &ReleaseReport) {
    println!("\nWould call:");
    for command in &report.commands {
        println!("{}", command);
    }
    println!(
        "\nTHIS WAS A DRY RUN! To make an actual release use the --yes flag."
    );
}
