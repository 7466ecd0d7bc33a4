//! Model normalization: canonical identifiers and field classification.

use crudgen_core::{
    Field, FieldKind, IdStrategy, Model, NormalizedField, NormalizedModel, ScalarType, Schema,
};

use crate::error::NormalizeError;

/// Field that identifies a record. Never guessed from `@id` elsewhere.
const PRIMARY_KEY: &str = "id";

/// Lower-case the first character of a type name; the rest is unchanged.
///
/// `User` → `user`, `BlogPost` → `blogPost`, `URL` → `uRL`.
#[must_use]
pub fn accessor_name(type_name: &str) -> String {
    let mut chars = type_name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalize every model of a schema, stopping at the first error.
pub fn normalize_schema(schema: &Schema) -> Result<Vec<NormalizedModel>, NormalizeError> {
    schema
        .models
        .iter()
        .map(|model| normalize_model(model, schema))
        .collect()
}

/// Derive the generation-ready view of one model.
///
/// `schema` is the type environment used to tell enum and relation fields
/// apart from unsupported types.
pub fn normalize_model(model: &Model, schema: &Schema) -> Result<NormalizedModel, NormalizeError> {
    let id = model
        .field(PRIMARY_KEY)
        .ok_or_else(|| NormalizeError::NoPrimaryKey {
            model: model.name.clone(),
        })?;
    let id_strategy = id_strategy(model, id)?;

    let fields = model
        .fields
        .iter()
        .map(|field| normalize_field(field, schema))
        .collect();

    let normalized = NormalizedModel {
        type_name: model.name.clone(),
        accessor_name: accessor_name(&model.name),
        primary_key_field: id.name.clone(),
        id_strategy,
        fields,
    };
    tracing::debug!(
        model = %normalized.type_name,
        accessor = %normalized.accessor_name,
        id_strategy = ?normalized.id_strategy,
        "normalized model"
    );
    Ok(normalized)
}

fn id_strategy(model: &Model, id: &Field) -> Result<IdStrategy, NormalizeError> {
    let unsupported = || NormalizeError::UnsupportedPrimaryKey {
        model: model.name.clone(),
        type_hint: id.type_hint.clone(),
    };
    if id.is_optional() || id.is_list() {
        return Err(unsupported());
    }
    ScalarType::from_token(id.base_type())
        .and_then(IdStrategy::from_scalar)
        .ok_or_else(unsupported)
}

fn normalize_field(field: &Field, schema: &Schema) -> NormalizedField {
    let base = field.base_type();
    let kind = if let Some(scalar) = ScalarType::from_token(base) {
        FieldKind::Scalar { scalar }
    } else if let Some(decl) = schema.enum_decl(base) {
        FieldKind::Enum {
            name: decl.name.clone(),
            variants: decl.variants.clone(),
        }
    } else if schema.model(base).is_some() {
        FieldKind::Relation {
            model: base.to_string(),
        }
    } else {
        FieldKind::Unsupported {
            type_name: base.to_string(),
        }
    };

    NormalizedField {
        name: field.name.clone(),
        kind,
        optional: field.is_optional(),
        list: field.is_list(),
        defaulted: field.has_attribute("@default") || field.has_attribute("@updatedAt"),
    }
}
