//! Terminal output helpers

use console::style;

use crate::engine::RunOutcome;
use crate::window::ChangeWindow;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_window(window: &ChangeWindow) {
    display_status(&format!(
        "Looking for commits from {}, until {}",
        window.since, window.until
    ));
}

/// Print the run summary the way the action reports it
pub fn display_outcome(outcome: &RunOutcome, dry_run: bool) {
    if dry_run {
        println!("Is dry run? Yes");
    }

    if let Some(tag) = &outcome.previous_release_tag {
        display_status(&format!("Previous release: {}", tag));
    } else {
        display_status("No existing releases for component, will use initial version");
    }

    display_window(&outcome.window);

    display_status(&format!(
        "Considered {} commits in window, {} matched the component",
        outcome.commits_considered, outcome.matching_records
    ));

    match outcome.version_string() {
        None => println!("New version generated? No"),
        Some(version) => {
            println!("New version generated? Yes");
            println!(
                "Is pre-release? {}",
                if outcome.is_prerelease() { "true" } else { "false" }
            );
            println!("New version: {}", version);

            if let Some(release) = &outcome.release {
                if dry_run {
                    display_status(&format!("Would create release tag: {}", release.tag));
                } else {
                    display_success(&format!("Created release tag: {}", release.tag));
                }
            }
        }
    }
}
