//! Parse → normalize → emit → write, as one all-or-nothing run.
//!
//! Every stage before the writer is pure; any failure there aborts the run
//! before a file is opened for writing.

use std::path::Path;

use anyhow::Context;
use crudgen_config::CrudgenConfig;
use crudgen_core::{GeneratedUnit, GenerationReport, NormalizedModel};
use crudgen_emit::{EmitOptions, RUNTIME_BLOCK, emit_all, emit_preamble, emit_runtime};
use crudgen_schema::{normalize_schema, parse_schema_file};
use crudgen_writer::{IdempotentWriter, WriteOptions};
use serde::Serialize;

/// Per-invocation switches on top of the loaded config.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunOptions {
    pub dry_run: bool,
    pub prune: bool,
}

/// What one run did, as printed to stdout.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub artifact: String,
    pub ledger: String,
    pub dry_run: bool,
    pub models: usize,
    #[serde(flatten)]
    pub report: GenerationReport,
}

impl RunSummary {
    /// `(model, outcome)` rows, grouped by outcome.
    pub fn rows(&self) -> Vec<Vec<String>> {
        let report = &self.report;
        [
            ("written", &report.written),
            ("skipped", &report.skipped),
            ("conflict", &report.conflicts),
            ("orphaned", &report.orphaned),
            ("pruned", &report.pruned),
        ]
        .into_iter()
        .flat_map(|(outcome, models)| {
            models
                .iter()
                .map(move |model| vec![model.clone(), outcome.to_string()])
        })
        .collect()
    }
}

/// Read and normalize the schema.
pub fn load_models(schema_path: &Path) -> anyhow::Result<Vec<NormalizedModel>> {
    let schema = parse_schema_file(schema_path)
        .with_context(|| format!("failed to parse schema '{}'", schema_path.display()))?;
    let models = normalize_schema(&schema).context("failed to normalize schema")?;
    tracing::debug!(count = models.len(), "schema normalized");
    Ok(models)
}

#[must_use]
pub fn emit_options(config: &CrudgenConfig) -> EmitOptions {
    EmitOptions {
        client_ident: config.emit.client_ident.clone(),
        client_import: config.emit.client_import.clone(),
        prisma_module: config.emit.prisma_module.clone(),
    }
}

/// Emit the runtime unit followed by one unit per model, in schema order.
pub fn generate_units(config: &CrudgenConfig) -> anyhow::Result<Vec<GeneratedUnit>> {
    let models = load_models(&config.paths.schema)?;
    let options = emit_options(config);
    let mut units = Vec::with_capacity(models.len() + 1);
    units.push(emit_runtime(&options));
    units.extend(emit_all(&models, &options));
    Ok(units)
}

/// Run the full pipeline and merge the result into the target artifact.
pub fn run(config: &CrudgenConfig, options: RunOptions) -> anyhow::Result<RunSummary> {
    let units = generate_units(config)?;

    let ledger = config.paths.ledger_path();
    let writer = IdempotentWriter::new(
        &config.paths.out,
        &ledger,
        WriteOptions {
            prune: options.prune || config.writer.prune_orphans,
            dry_run: options.dry_run,
            lock_timeout: config.writer.lock_timeout(),
        },
    );
    let report = writer
        .write(&units, &emit_preamble())
        .with_context(|| format!("failed to update '{}'", config.paths.out.display()))?;

    Ok(RunSummary {
        artifact: config.paths.out.display().to_string(),
        ledger: ledger.display().to_string(),
        dry_run: options.dry_run,
        models: units
            .iter()
            .filter(|unit| unit.model_name != RUNTIME_BLOCK)
            .count(),
        report,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crudgen_schema::{NormalizeError, SchemaError};
    use pretty_assertions::assert_eq;

    use super::*;

    fn config_in(dir: &Path, schema: &str) -> CrudgenConfig {
        let schema_path = dir.join("schema.prisma");
        std::fs::write(&schema_path, schema).expect("write schema");
        let mut config = CrudgenConfig::default();
        config.paths.schema = schema_path;
        config.paths.out = dir.join("lib/services.ts");
        config
    }

    #[test]
    fn run_writes_then_skips() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let config = config_in(temp.path(), "model User { id Int name String }");

        let first = run(&config, RunOptions::default()).expect("first run");
        let second = run(&config, RunOptions::default()).expect("second run");

        assert_eq!(first.models, 1);
        assert!(first.report.written.contains("User"));
        assert!(second.report.written.is_empty());
        assert!(second.report.skipped.contains("User"));
        assert_eq!(
            second.rows(),
            vec![
                vec![RUNTIME_BLOCK.to_string(), "skipped".to_string()],
                vec!["User".to_string(), "skipped".to_string()],
            ]
        );
        assert!(PathBuf::from(&second.ledger).is_file());
    }

    #[test]
    fn dry_run_creates_nothing() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let config = config_in(temp.path(), "model User { id Int }");

        let summary = run(
            &config,
            RunOptions {
                dry_run: true,
                prune: false,
            },
        )
        .expect("dry run");

        assert!(summary.dry_run);
        assert!(summary.report.written.contains("User"));
        assert!(!config.paths.out.exists());
    }

    #[test]
    fn normalize_failure_writes_nothing() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let config = config_in(temp.path(), "model Good { id Int }\nmodel Bad { key Int }");

        let err = run(&config, RunOptions::default()).expect_err("should fail");

        assert!(err.chain().any(|e| e.downcast_ref::<NormalizeError>().is_some()));
        assert!(!config.paths.out.exists());
        assert!(!config.paths.ledger_path().exists());
    }

    #[test]
    fn duplicate_model_is_a_schema_error() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let config = config_in(temp.path(), "model User { id Int }\nmodel User { id Int }");

        let err = run(&config, RunOptions::default()).expect_err("should fail");

        assert!(err.chain().any(|e| e.downcast_ref::<SchemaError>().is_some()));
    }

    #[test]
    fn runtime_unit_leads_the_generated_units() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let config = config_in(temp.path(), "model User { id Int }\nmodel Post { id Int }");

        let units = generate_units(&config).expect("units");

        let names: Vec<&str> = units.iter().map(|u| u.model_name.as_str()).collect();
        assert_eq!(names, vec![RUNTIME_BLOCK, "User", "Post"]);
    }

    #[test]
    fn emit_options_follow_config() {
        let mut config = CrudgenConfig::default();
        config.emit.client_ident = "db".to_string();
        assert_eq!(emit_options(&config).client_ident, "db");
    }
}
