use anyhow::Result;
use clap::Parser;

use releasegh::config;
use releasegh::forge::GitHubForge;
use releasegh::git::Git2Repository;
use releasegh::notes::RstNotes;
use releasegh::release::ReleaseRunner;
use releasegh::ui;
use releasegh::version;

#[derive(clap::Parser)]
#[command(
    name = "releasegh",
    about = "Bump the changelog and publish a release to GitHub"
)]
struct Args {
    #[arg(help = "Type of increment: major, minor or patch")]
    increment: String,

    #[arg(
        long,
        help = "Actually publish to GitHub; without this flag only a dry run happens"
    )]
    yes: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let dry_run = !args.yes;

    if let Err(e) = version::validate_level(&args.increment) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    // Load configuration
    let config = match config::load_config(None) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let token = match std::env::var(&config.token_var) {
        Ok(token) => token,
        Err(_) => {
            ui::display_error(&format!(
                "Environment variable {} is not set",
                config.token_var
            ));
            std::process::exit(1);
        }
    };

    let git = match Git2Repository::new() {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let forge = GitHubForge::new(config.api_base.clone(), token);
    let runner = ReleaseRunner::new(config, &git, &forge, &RstNotes);

    if dry_run {
        ui::display_status("Dry run (pass --yes to publish)");
    }

    let report = match runner.run(&args.increment, dry_run) {
        Ok(report) => report,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    ui::display_status(&format!("Branch = {}", report.branch));
    ui::display_bump(&report.previous, &report.next);
    ui::display_diff(&report.diff);
    ui::display_body(&report.body);

    if report.published {
        ui::display_success(&format!("Published release {}", report.next));
    } else {
        ui::display_dry_run(&report);
    }

    Ok(())
}
