use std::fs;
use std::io::ErrorKind;

use crate::changelog;
use crate::config::Config;
use crate::diff;
use crate::error::Result;
use crate::forge::{Forge, ReleasePayload};
use crate::git::GitOps;
use crate::notes::{NotesOptions, NotesRenderer};
use crate::version::{self, Version};

/// Everything the operator needs to review a run.
///
/// `commands` lists the local steps a publish performs; on a dry run they are
/// printed instead of executed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseReport {
    pub previous: String,
    pub next: String,
    pub branch: String,
    pub diff: String,
    pub body: String,
    pub commands: Vec<String>,
    pub published: bool,
}

/// Sequences one release: fetch latest tag, bump, rewrite the changelog into
/// a staging file, diff and render for review, then either publish or report
/// the dry run. The staging file is removed on every handled exit.
pub struct ReleaseRunner<'a> {
    config: Config,
    git: &'a dyn GitOps,
    forge: &'a dyn Forge,
    notes: &'a dyn NotesRenderer,
}

impl<'a> ReleaseRunner<'a> {
    pub fn new(
        config: Config,
        git: &'a dyn GitOps,
        forge: &'a dyn Forge,
        notes: &'a dyn NotesRenderer,
    ) -> Self {
        ReleaseRunner {
            config,
            git,
            forge,
            notes,
        }
    }

    /// Run one release operation.
    ///
    /// The increment name is validated before any network call. When
    /// `dry_run` is set, all local computation and reporting happens but the
    /// changelog, the repository, and the forge are left untouched.
    ///
    /// A failed release creation after a successful push is not rolled back:
    /// the `Release <version>` commit stays on the remote and the error is
    /// reported for manual intervention.
    pub fn run(&self, increment: &str, dry_run: bool) -> Result<ReleaseReport> {
        version::validate_level(increment)?;

        let (owner, repo) = self.git.owner_and_repo(&self.config.remote)?;
        let branch = self.git.current_branch()?;

        let latest = self.forge.latest_release(&owner, &repo)?;
        let previous = Version::parse(&latest.tag_name)?;
        let mut next = previous.clone();
        next.bump(increment)?;

        let lines = changelog::read_lines(&self.config.changelog)?;
        let rewritten = changelog::rewrite(&lines, &next)?;
        changelog::write_lines(&self.config.staging, &rewritten)?;

        // The staging file exists from here on; remove it on every handled
        // exit, without masking an earlier error.
        let result = self.review_and_publish(
            &owner, &repo, &branch, &previous, &next, &lines, &rewritten, dry_run,
        );
        match fs::remove_file(&self.config.staging) {
            Ok(()) => result,
            Err(e) if e.kind() == ErrorKind::NotFound => result,
            Err(e) => result.and(Err(e.into())),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn review_and_publish(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        previous: &Version,
        next: &Version,
        original: &[String],
        rewritten: &[String],
        dry_run: bool,
    ) -> Result<ReleaseReport> {
        let original_text = format!("{}\n", original.join("\n"));
        let staged_text = format!("{}\n", rewritten.join("\n"));
        let diff = diff::unified(&original_text, &staged_text, &self.config.changelog);

        let fragments = self.notes.render(
            &self.config.staging,
            &NotesOptions {
                entries: 1,
                min_heading_level: 0,
                exclude_top_heading: true,
            },
        )?;
        let body = fragments.join("\n");

        let commands = vec![
            format!(
                "cp {} {}",
                self.config.staging.display(),
                self.config.changelog.display()
            ),
            format!("git add {}", self.config.changelog.display()),
            format!("git commit -m 'Release {}'", next),
            "git push".to_string(),
        ];

        let mut report = ReleaseReport {
            previous: previous.to_string(),
            next: next.to_string(),
            branch: branch.to_string(),
            diff,
            body,
            commands,
            published: false,
        };

        if dry_run {
            return Ok(report);
        }

        // Promote the staged document, commit, push, then create the release.
        fs::copy(&self.config.staging, &self.config.changelog)?;
        let message = format!("Release {}", next);
        self.git.commit_file(&self.config.changelog, &message)?;
        self.git.push(&self.config.remote, branch)?;

        let payload = ReleasePayload::new(&report.next, branch, &report.body);
        self.forge.create_release(owner, repo, &payload)?;

        report.published = true;
        Ok(report)
    }
}
