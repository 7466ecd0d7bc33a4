use anyhow::Context;
use crudgen_config::CrudgenConfig;

use crate::cli::GlobalFlags;

/// Load layered config, then apply command-line path overrides on top.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<CrudgenConfig> {
    let mut config = CrudgenConfig::load_from(flags.config.as_deref())
        .context("failed to load crudgen configuration")?;
    apply_overrides(&mut config, flags);
    config
        .validate()
        .context("invalid configuration after command-line overrides")?;

    tracing::debug!(
        schema = %config.paths.schema.display(),
        out = %config.paths.out.display(),
        ledger = %config.paths.ledger_path().display(),
        "resolved configuration"
    );
    Ok(config)
}

fn apply_overrides(config: &mut CrudgenConfig, flags: &GlobalFlags) {
    if let Some(schema) = &flags.schema {
        config.paths.schema.clone_from(schema);
    }
    if let Some(out) = &flags.out {
        config.paths.out.clone_from(out);
    }
    if let Some(ledger) = &flags.ledger {
        config.paths.ledger = Some(ledger.clone());
    }
}
