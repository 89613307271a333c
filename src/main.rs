use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use clap::Parser;

use mono_version::engine::{self, ReleaseContext};
use mono_version::store::GitStore;
use mono_version::{config, ui};

#[derive(clap::Parser)]
#[command(
    name = "mono-version",
    about = "Compute per-component semantic versions and changelogs for a monorepo"
)]
struct Args {
    #[arg(short, long, help = "Component identifier (commit scope)")]
    component: Option<String>,

    #[arg(long, help = "Human-readable component label for release titles")]
    label: Option<String>,

    #[arg(short, long, help = "Branch or ref being released")]
    branch: Option<String>,

    #[arg(short, long, help = "Full hash of the commit being released")]
    revision: Option<String>,

    #[arg(long, help = "Default branch producing definitive versions")]
    default_branch: Option<String>,

    #[arg(long, help = "Version to assign on the component's first release")]
    initial_version: Option<String>,

    #[arg(long, help = "Compute the decision without creating a release")]
    dry_run: bool,

    #[arg(long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Path to the repository (defaults to current directory)")]
    repo: Option<String>,

    #[arg(short, long, help = "File to append machine-readable results to")]
    output: Option<String>,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("mono-version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    // CLI flags win; the action-style environment variables fill the gaps
    let component_name = require(args.component, "INPUT_COMPONENT", "component");
    let branch = require(args.branch, "GITHUB_REF_NAME", "branch");
    let revision = require(args.revision, "GITHUB_SHA", "revision");
    let default_branch = args
        .default_branch
        .or_else(|| env_value("INPUT_DEFAULT-BRANCH"))
        .unwrap_or_else(|| config.default_branch.clone());
    let initial_version = args
        .initial_version
        .or_else(|| env_value("INPUT_INITIAL-VERSION"));
    let dry_run = args.dry_run || is_truthy(&env_value("INPUT_DRY-RUN").unwrap_or_default());
    let output_path = args.output.or_else(|| env_value("GITHUB_OUTPUT"));

    let component = match config.component(&component_name, args.label, initial_version) {
        Ok(component) => component,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let store = match GitStore::open(args.repo.as_deref().unwrap_or(".")) {
        Ok(store) => store,
        Err(e) => {
            ui::display_error(&format!("Repository error: {}", e));
            std::process::exit(1);
        }
    };

    let ctx = ReleaseContext {
        component,
        branch,
        default_branch,
        revision,
    };

    ui::display_status(&format!(
        "Resolving next version for component '{}' on branch '{}'",
        ctx.component.name, ctx.branch
    ));

    let outcome = match engine::generate_version(&ctx, &store, &store, dry_run) {
        Ok(outcome) => outcome,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    ui::display_outcome(&outcome, dry_run);

    if let Some(path) = output_path {
        // Only append when the output file already exists
        if Path::new(&path).exists() {
            write_output(&path, &outcome)?;
        }
    }

    Ok(())
}

/// Append the machine-readable result lines to the output file
fn write_output(path: &str, outcome: &engine::RunOutcome) -> Result<()> {
    let mut output = OpenOptions::new().append(true).open(path)?;

    match outcome.version_string() {
        None => {
            writeln!(output, "new_version_created=no")?;
            writeln!(output, "version=0.0.0-none")?;
            writeln!(output, "prerelease=no")?;
        }
        Some(version) => {
            writeln!(output, "new_version_created=yes")?;
            writeln!(output, "version={}", version)?;
            writeln!(
                output,
                "prerelease={}",
                if outcome.is_prerelease() { "yes" } else { "no" }
            )?;
        }
    }

    Ok(())
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn require(cli: Option<String>, env_key: &str, name: &str) -> String {
    match cli.or_else(|| env_value(env_key)) {
        Some(value) => value,
        None => {
            ui::display_error(&format!(
                "Missing required {} (pass --{} or set {})",
                name, name, env_key
            ));
            std::process::exit(1);
        }
    }
}

fn is_truthy(input: &str) -> bool {
    input.eq_ignore_ascii_case("yes") || input.eq_ignore_ascii_case("true")
}
