pub mod generate;
pub mod models;

use crudgen_config::CrudgenConfig;

use crate::cli::{Commands, GlobalFlags};

/// Route a parsed command to its handler.
pub fn dispatch(command: Commands, config: &CrudgenConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Generate(args) => generate::handle(&args, config, flags),
        Commands::Plan(args) => generate::handle_plan(&args, config, flags),
        Commands::Models => models::handle(config, flags),
    }
}
