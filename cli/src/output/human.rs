//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;
use release_common::{CleanupReport, CleanupStatus, DetachmentReport};

use crate::domain::config::ReleaseConfig;
use crate::infra::config::CONFIG_ENV;
use crate::infra::settings::SETTINGS_ENV;
use crate::infra::svn::SVN_PROGRAM_ENV;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the outcome of a detachment run.
    pub fn render_detachment(&self, report: &DetachmentReport) {
        if self.ctx.quiet || report.detached.is_empty() {
            return;
        }
        println!();
        self.ctx.header("Detached:");
        for artifact in &report.detached {
            let classifier = artifact
                .classifier
                .as_deref()
                .map(|c| format!(" [{c}]"))
                .unwrap_or_default();
            println!(
                "    {:<8} {}{classifier}",
                artifact.artifact_type.style(self.ctx.styles.dim),
                artifact.file.display()
            );
        }
        println!();
        self.ctx.kv(
            "Copied to:",
            &format!(
                "{} ({} file(s))",
                report.working_directory.display(),
                report.copied.len()
            ),
        );
        self.ctx
            .kv("Still attached:", &report.kept.len().to_string());
    }

    /// Render the outcome of a staging cleanup run.
    pub fn render_cleanup(&self, report: &CleanupReport) {
        if self.ctx.quiet {
            return;
        }
        match report.status {
            // The service already explained the skip or the empty area.
            CleanupStatus::Skipped | CleanupStatus::AlreadyEmpty => {}
            CleanupStatus::DryRun | CleanupStatus::Committed => {
                println!();
                self.ctx.header(if report.status == CleanupStatus::DryRun {
                    "Scheduled for removal (not committed):"
                } else {
                    "Removed:"
                });
                for path in &report.removed {
                    let name = path
                        .file_name()
                        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
                    println!("    {name}");
                }
                println!();
                self.ctx.kv("Staging area:", &report.staging_url);
                if let Some(revision) = report.revision {
                    self.ctx.kv("Revision:", &revision.to_string());
                }
            }
        }
    }

    /// Render the effective release configuration.
    pub fn render_config(&self, config: &ReleaseConfig, path: &Path) {
        let or_unset = |v: &str| {
            if v.is_empty() {
                "(not set)".to_string()
            } else {
                v.to_string()
            }
        };

        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<30} {}", "artifact_id:", or_unset(&config.artifact_id));
        println!(
            "  {:<30} {}",
            "build_directory:",
            config.build_directory.display()
        );
        println!(
            "  {:<30} {}",
            "working_directory:",
            config.working_directory().display()
        );
        println!(
            "  {:<30} {}",
            "detach.manifest:",
            config.manifest_path().display()
        );
        println!(
            "  {:<30} {}",
            "detach.archive_suffixes:",
            config.detach.archive_suffixes.join(", ")
        );
        println!(
            "  {:<30} {}",
            "detach.side_suffixes:",
            config.detach.side_suffixes.join(", ")
        );
        println!("  {:<30} {}", "staging.url:", or_unset(&config.staging.url));
        println!(
            "  {:<30} {}",
            "staging.cleanup_directory:",
            config.cleanup_directory().display()
        );
        println!("  {:<30} {}", "staging.dry_run:", config.staging.dry_run);
        println!(
            "  {:<30} {}",
            "staging.is_dist_module:", config.staging.is_dist_module
        );
        println!(
            "  {:<30} {}",
            "staging.dist_server:",
            or_unset(config.staging.dist_server.as_deref().unwrap_or_default())
        );
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in [CONFIG_ENV, SETTINGS_ENV, SVN_PROGRAM_ENV, "NO_COLOR"] {
            println!(
                "    {:<28} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }
}
