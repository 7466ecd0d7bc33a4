use std::path::PathBuf;

use crudgen_config::CrudgenConfig;
use figment::Jail;
use pretty_assertions::assert_eq;

#[test]
fn env_overrides_nested_fields() {
    Jail::expect_with(|jail| {
        jail.set_env("CRUDGEN_PATHS__LEDGER", ".crudgen/ledger.toml");
        jail.set_env("CRUDGEN_EMIT__CLIENT_IDENT", "db");
        jail.set_env("CRUDGEN_WRITER__PRUNE_ORPHANS", "true");

        let config = CrudgenConfig::load().expect("config loads");
        assert_eq!(config.paths.ledger_path(), PathBuf::from(".crudgen/ledger.toml"));
        assert_eq!(config.emit.client_ident, "db");
        assert!(config.writer.prune_orphans);
        Ok(())
    });
}

#[test]
fn env_beats_local_file() {
    Jail::expect_with(|jail| {
        jail.create_file("crudgen.toml", "[paths]\nout = \"from-file.ts\"\n")?;
        jail.set_env("CRUDGEN_PATHS__OUT", "from-env.ts");

        let config = CrudgenConfig::load().expect("config loads");
        assert_eq!(config.paths.out, PathBuf::from("from-env.ts"));
        Ok(())
    });
}

#[test]
fn log_filter_variable_does_not_disturb_config() {
    Jail::expect_with(|jail| {
        jail.set_env("CRUDGEN_LOG", "debug");

        let config = CrudgenConfig::load().expect("config loads");
        assert_eq!(config, CrudgenConfig::default());
        Ok(())
    });
}
