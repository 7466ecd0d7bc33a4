use serde::Serialize;

/// Scalar column types understood by the emitter.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    Int,
    BigInt,
    Float,
    Decimal,
    String,
    Boolean,
    DateTime,
    Json,
    Bytes,
}

impl ScalarType {
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "Int" => Self::Int,
            "BigInt" => Self::BigInt,
            "Float" => Self::Float,
            "Decimal" => Self::Decimal,
            "String" => Self::String,
            "Boolean" => Self::Boolean,
            "DateTime" => Self::DateTime,
            "Json" => Self::Json,
            "Bytes" => Self::Bytes,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Scalar { scalar: ScalarType },
    Enum { name: String, variants: Vec<String> },
    /// Points at another model. Not part of the generated record types.
    Relation { model: String },
    /// Not exposed by the ORM client; omitted from generated record types.
    Unsupported { type_name: String },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NormalizedField {
    pub name: String,
    pub kind: FieldKind,
    pub optional: bool,
    pub list: bool,
    /// Has `@default(..)` or `@updatedAt`; optional on create.
    pub defaulted: bool,
}

impl NormalizedField {
    /// Scalar or enum: part of the record the ORM client returns.
    #[must_use]
    pub const fn is_record_field(&self) -> bool {
        matches!(self.kind, FieldKind::Scalar { .. } | FieldKind::Enum { .. })
    }
}

/// How generated code coerces caller-supplied identifiers.
///
/// Numeric ids accept numbers or numeric strings and reject everything else
/// with `TypeCoercionError`. Text ids accept non-empty strings only.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    Int,
    BigInt,
    Text,
}

impl IdStrategy {
    #[must_use]
    pub const fn from_scalar(scalar: ScalarType) -> Option<Self> {
        match scalar {
            ScalarType::Int => Some(Self::Int),
            ScalarType::BigInt => Some(Self::BigInt),
            ScalarType::String => Some(Self::Text),
            _ => None,
        }
    }
}

/// Generation-ready view of a `Model`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NormalizedModel {
    pub type_name: String,
    pub accessor_name: String,
    pub primary_key_field: String,
    pub id_strategy: IdStrategy,
    pub fields: Vec<NormalizedField>,
}

impl NormalizedModel {
    /// Scalar and enum fields, in declaration order.
    pub fn record_fields(&self) -> impl Iterator<Item = &NormalizedField> {
        self.fields.iter().filter(|field| field.is_record_field())
    }
}
