use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Generate service blocks and merge them into the target file (default).
    Generate(GenerateArgs),
    /// Show what `generate` would do without writing anything.
    Plan(PlanArgs),
    /// List the models the schema normalizes to.
    Models,
}

impl Default for Commands {
    fn default() -> Self {
        Self::Generate(GenerateArgs::default())
    }
}

#[derive(Clone, Debug, Default, Args)]
pub struct GenerateArgs {
    /// Compute the report without touching any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Remove unedited blocks for models no longer in the schema.
    #[arg(long)]
    pub prune: bool,
}

#[derive(Clone, Debug, Default, Args)]
pub struct PlanArgs {
    /// Include pruning of orphaned blocks in the plan.
    #[arg(long)]
    pub prune: bool,
}
