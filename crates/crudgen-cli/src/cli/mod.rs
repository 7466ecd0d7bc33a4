use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::{Commands, GenerateArgs, PlanArgs};

/// Top-level CLI parser for the `crudgen` binary.
#[derive(Debug, Parser)]
#[command(
    name = "crudgen",
    version,
    about = "Generate CRUD service blocks from a Prisma-style schema"
)]
pub struct Cli {
    /// Command to run; `generate` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Schema file to read
    #[arg(long, global = true)]
    pub schema: Option<PathBuf>,

    /// Generated file to merge into
    #[arg(long, global = true)]
    pub out: Option<PathBuf>,

    /// Hash ledger file (defaults to <out>.ledger.toml)
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Config file to use instead of ./crudgen.toml
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Colour table output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Quiet mode (errors only in the log)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            color: self.color,
            quiet: self.quiet,
            config: self.config.clone(),
            schema: self.schema.clone(),
            out: self.out.clone(),
            ledger: self.ledger.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_generate() {
        let cli = Cli::try_parse_from(["crudgen"]).expect("cli should parse");
        assert!(cli.command.is_none());
        assert!(matches!(
            cli.command.unwrap_or_default(),
            Commands::Generate(args) if !args.dry_run && !args.prune
        ));
    }

    #[test]
    fn path_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "crudgen",
            "--schema",
            "db/schema.prisma",
            "--out",
            "src/services.ts",
            "--ledger",
            "src/.ledger.toml",
            "generate",
            "--dry-run",
        ])
        .expect("cli should parse");

        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.schema, Some(PathBuf::from("db/schema.prisma")));
        assert_eq!(flags.out, Some(PathBuf::from("src/services.ts")));
        assert_eq!(flags.ledger, Some(PathBuf::from("src/.ledger.toml")));
        assert!(matches!(cli.command, Some(Commands::Generate(args)) if args.dry_run));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["crudgen", "plan", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Some(Commands::Plan(_))));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["crudgen", "--format", "xml", "models"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn output_format_accepts_all_supported_values() {
        for value in ["json", "table", "raw"] {
            let cli = Cli::try_parse_from(["crudgen", "--format", value, "models"])
                .expect("cli should parse");
            assert!(matches!(cli.command, Some(Commands::Models)));
        }
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["crudgen", "-q", "-v"]).is_err());
    }

    #[test]
    fn short_config_flag() {
        let cli = Cli::try_parse_from(["crudgen", "-C", "ci.toml", "models"]).expect("cli should parse");
        assert_eq!(cli.global_flags().config, Some(PathBuf::from("ci.toml")));
    }
}
