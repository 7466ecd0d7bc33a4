use crudgen_config::CrudgenConfig;
use crudgen_core::{IdStrategy, NormalizedModel};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output_with_rows;
use crate::pipeline;

#[derive(Debug, Serialize)]
struct ModelRow {
    model: String,
    accessor: String,
    primary_key: String,
    id_strategy: IdStrategy,
    fields: usize,
    generated_fields: usize,
}

impl From<&NormalizedModel> for ModelRow {
    fn from(model: &NormalizedModel) -> Self {
        Self {
            model: model.type_name.clone(),
            accessor: model.accessor_name.clone(),
            primary_key: model.primary_key_field.clone(),
            id_strategy: model.id_strategy,
            fields: model.fields.len(),
            generated_fields: model.record_fields().count(),
        }
    }
}

impl ModelRow {
    fn cells(&self) -> Vec<String> {
        let strategy = match self.id_strategy {
            IdStrategy::Int => "int",
            IdStrategy::BigInt => "big_int",
            IdStrategy::Text => "text",
        };
        vec![
            self.model.clone(),
            self.accessor.clone(),
            self.primary_key.clone(),
            strategy.to_string(),
            self.fields.to_string(),
            self.generated_fields.to_string(),
        ]
    }
}

/// Handle `crudgen models`: parse and normalize only, no file is written.
pub fn handle(config: &CrudgenConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let models = pipeline::load_models(&config.paths.schema)?;
    let rows: Vec<ModelRow> = models.iter().map(ModelRow::from).collect();
    let cells: Vec<Vec<String>> = rows.iter().map(ModelRow::cells).collect();
    output_with_rows(
        &rows,
        &["model", "accessor", "primary_key", "id_strategy", "fields", "generated"],
        &cells,
        flags.format,
    )
}
