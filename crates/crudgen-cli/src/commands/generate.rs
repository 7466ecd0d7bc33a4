use crudgen_config::CrudgenConfig;

use crate::cli::{GenerateArgs, GlobalFlags, PlanArgs};
use crate::output::output_with_rows;
use crate::pipeline::{self, RunOptions, RunSummary};

/// Handle `crudgen generate`.
pub fn handle(args: &GenerateArgs, config: &CrudgenConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let summary = pipeline::run(
        config,
        RunOptions {
            dry_run: args.dry_run,
            prune: args.prune,
        },
    )?;
    print_summary(&summary, flags)
}

/// Handle `crudgen plan`.
pub fn handle_plan(args: &PlanArgs, config: &CrudgenConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let summary = pipeline::run(
        config,
        RunOptions {
            dry_run: true,
            prune: args.prune,
        },
    )?;
    print_summary(&summary, flags)
}

fn print_summary(summary: &RunSummary, flags: &GlobalFlags) -> anyhow::Result<()> {
    if summary.report.has_conflicts() {
        tracing::warn!(
            count = summary.report.conflicts.len(),
            "hand-edited blocks were left untouched; reconcile them and rerun"
        );
    } else if summary.report.is_clean() {
        tracing::info!(artifact = %summary.artifact, "artifact already up to date");
    }
    output_with_rows(summary, &["model", "outcome"], &summary.rows(), flags.format)
}
