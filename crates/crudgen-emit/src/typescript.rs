//! TypeScript service template, one block per model.

use crudgen_core::{FieldKind, GeneratedUnit, IdStrategy, NormalizedField, NormalizedModel, ScalarType};

use crate::options::EmitOptions;

/// Only plain decimal digits convert; `Number()` would also take hex,
/// binary, exponent and fractional forms.
const DECIMAL_INTEGER: &str = r"/^-?\d+$/";

/// Emit the service block for every model, in input order.
#[must_use]
pub fn emit_all(models: &[NormalizedModel], options: &EmitOptions) -> Vec<GeneratedUnit> {
    models.iter().map(|model| emit_unit(model, options)).collect()
}

/// Emit the service block for one model.
///
/// The block holds the record interface, create/update input types, the id
/// coercion helper, and the five operations: `get<Name>ById`,
/// `getAll<Names>`, `create<Name>`, `update<Name>`, `delete<Name>`.
#[must_use]
pub fn emit_unit(model: &NormalizedModel, options: &EmitOptions) -> GeneratedUnit {
    let mut out = Block::default();
    record_interface(&mut out, model);
    input_types(&mut out, model);
    id_coercion(&mut out, model);
    operations(&mut out, model, options);

    let unit = GeneratedUnit::new(&model.type_name, out.finish());
    tracing::debug!(
        model = %unit.model_name,
        hash = %unit.content_hash.short(),
        "emitted service block"
    );
    unit
}

#[derive(Default)]
struct Block {
    lines: Vec<String>,
}

impl Block {
    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

fn record_interface(out: &mut Block, model: &NormalizedModel) {
    let name = &model.type_name;
    out.line(format!("/** Record shape of a `{name}` row. */"));
    out.line(format!("export interface {name} {{"));
    for field in model.record_fields() {
        out.line(format!("  {}: {};", field.name, output_type(field)));
    }
    out.line("}");
    out.blank();
}

fn input_types(out: &mut Block, model: &NormalizedModel) {
    let name = &model.type_name;
    out.line(format!("export type {name}CreateInput = {{"));
    for field in model.record_fields() {
        let marker = if optional_on_create(field) { "?" } else { "" };
        out.line(format!("  {}{marker}: {};", field.name, input_type(field)));
    }
    out.line("};");
    out.blank();
    out.line(format!(
        "export type {name}UpdateInput = Partial<Omit<{name}CreateInput, \"{}\">>;",
        model.primary_key_field
    ));
    out.blank();
}

fn id_coercion(out: &mut Block, model: &NormalizedModel) {
    let name = &model.type_name;
    let key = &model.primary_key_field;
    let fail = format!("throw new TypeCoercionError(\"{name}\", \"{key}\", id);");
    match model.id_strategy {
        IdStrategy::Int => {
            out.line(format!("function {}(id: unknown): number {{", coerce_fn(model)));
            out.line(format!(
                r#"  const value = typeof id === "string" && {DECIMAL_INTEGER}.test(id.trim()) ? Number(id.trim()) : id;"#
            ));
            out.line(r#"  if (typeof value !== "number" || !Number.isSafeInteger(value)) {"#);
            out.line(format!("    {fail}"));
            out.line("  }");
            out.line("  return value;");
        }
        IdStrategy::BigInt => {
            out.line(format!("function {}(id: unknown): bigint {{", coerce_fn(model)));
            out.line(r#"  if (typeof id === "bigint") {"#);
            out.line("    return id;");
            out.line("  }");
            out.line(r#"  if (typeof id === "number" && Number.isSafeInteger(id)) {"#);
            out.line("    return BigInt(id);");
            out.line("  }");
            out.line(format!(
                r#"  if (typeof id === "string" && {DECIMAL_INTEGER}.test(id.trim())) {{"#
            ));
            out.line("    return BigInt(id.trim());");
            out.line("  }");
            out.line(format!("  {fail}"));
        }
        IdStrategy::Text => {
            out.line(format!("function {}(id: unknown): string {{", coerce_fn(model)));
            out.line(r#"  if (typeof id !== "string" || id.trim() === "") {"#);
            out.line(format!("    {fail}"));
            out.line("  }");
            out.line("  return id;");
        }
    }
    out.line("}");
    out.blank();
}

fn operations(out: &mut Block, model: &NormalizedModel, options: &EmitOptions) {
    let name = &model.type_name;
    let key = &model.primary_key_field;
    let delegate = format!("{}.{}", options.client_ident, model.accessor_name);
    let id_param = id_param_type(model.id_strategy);
    let coerce = coerce_fn(model);

    out.line(format!(
        "/** Fetch one `{name}` by {key}; resolves to null when it does not exist. */"
    ));
    out.line(format!(
        "export async function get{name}ById(id: {id_param}): Promise<{name} | null> {{"
    ));
    out.line(format!(
        "  return {delegate}.findUnique({{ where: {{ {key}: {coerce}(id) }} }});"
    ));
    out.line("}");
    out.blank();

    out.line(format!(
        "/** Fetch every `{name}` ordered by {key}. Not paginated. */"
    ));
    out.line(format!(
        "export async function getAll{}(): Promise<{name}[]> {{",
        pluralize(name)
    ));
    out.line(format!(
        "  return {delegate}.findMany({{ orderBy: {{ {key}: \"asc\" }} }});"
    ));
    out.line("}");
    out.blank();

    out.line(format!(
        "/** Create a `{name}`; the database assigns the {key} and other defaults. */"
    ));
    out.line(format!(
        "export async function create{name}(data: {name}CreateInput): Promise<{name}> {{"
    ));
    out.line(format!("  return {delegate}.create({{ data }});"));
    out.line("}");
    out.blank();

    out.line(format!(
        "/** Update a `{name}`; resolves to null when it does not exist. */"
    ));
    out.line(format!(
        "export async function update{name}(id: {id_param}, data: {name}UpdateInput): Promise<{name} | null> {{"
    ));
    not_found_guard(
        out,
        &format!("{delegate}.update({{ where: {{ {key}: key }}, data }})"),
        &coerce,
    );
    out.blank();

    out.line(format!(
        "/** Delete a `{name}`; resolves to the deleted record, or null when it does not exist. */"
    ));
    out.line(format!(
        "export async function delete{name}(id: {id_param}): Promise<{name} | null> {{"
    ));
    not_found_guard(
        out,
        &format!("{delegate}.delete({{ where: {{ {key}: key }} }})"),
        &coerce,
    );
}

/// Body shared by update and delete: coerce first, map `P2025` to null.
fn not_found_guard(out: &mut Block, call: &str, coerce: &str) {
    out.line(format!("  const key = {coerce}(id);"));
    out.line("  try {");
    out.line(format!("    return await {call};"));
    out.line("  } catch (error) {");
    out.line("    if (isRecordNotFound(error)) {");
    out.line("      return null;");
    out.line("    }");
    out.line("    throw error;");
    out.line("  }");
    out.line("}");
}

fn coerce_fn(model: &NormalizedModel) -> String {
    format!("coerce{}Id", model.type_name)
}

const fn id_param_type(strategy: IdStrategy) -> &'static str {
    match strategy {
        IdStrategy::Int => "number | string",
        IdStrategy::BigInt => "bigint | number | string",
        IdStrategy::Text => "string",
    }
}

const fn optional_on_create(field: &NormalizedField) -> bool {
    field.optional || field.list || field.defaulted
}

/// Type of a field as returned by the client.
fn output_type(field: &NormalizedField) -> String {
    let base = match &field.kind {
        FieldKind::Scalar { scalar } => scalar_output(*scalar).to_string(),
        FieldKind::Enum { variants, .. } => enum_union(variants),
        FieldKind::Relation { .. } | FieldKind::Unsupported { .. } => "unknown".to_string(),
    };
    decorate(field, base, "null")
}

/// Type of a field as accepted on create/update.
fn input_type(field: &NormalizedField) -> String {
    let base = match &field.kind {
        FieldKind::Scalar { scalar } => scalar_input(*scalar).to_string(),
        FieldKind::Enum { variants, .. } => enum_union(variants),
        FieldKind::Relation { .. } | FieldKind::Unsupported { .. } => "unknown".to_string(),
    };
    let null = match &field.kind {
        FieldKind::Scalar {
            scalar: ScalarType::Json,
        } => "Prisma.NullableJsonNullValueInput",
        _ => "null",
    };
    decorate(field, base, null)
}

fn decorate(field: &NormalizedField, base: String, null: &str) -> String {
    let ty = if field.list {
        if base.contains(' ') {
            format!("({base})[]")
        } else {
            format!("{base}[]")
        }
    } else {
        base
    };
    if field.optional {
        format!("{ty} | {null}")
    } else {
        ty
    }
}

const fn scalar_output(scalar: ScalarType) -> &'static str {
    match scalar {
        ScalarType::Int | ScalarType::Float => "number",
        ScalarType::BigInt => "bigint",
        ScalarType::Decimal => "Prisma.Decimal",
        ScalarType::String => "string",
        ScalarType::Boolean => "boolean",
        ScalarType::DateTime => "Date",
        ScalarType::Json => "Prisma.JsonValue",
        ScalarType::Bytes => "Buffer",
    }
}

const fn scalar_input(scalar: ScalarType) -> &'static str {
    match scalar {
        ScalarType::Int | ScalarType::Float => "number",
        ScalarType::BigInt => "bigint | number",
        ScalarType::Decimal => "Prisma.Decimal | number | string",
        ScalarType::String => "string",
        ScalarType::Boolean => "boolean",
        ScalarType::DateTime => "Date | string",
        ScalarType::Json => "Prisma.InputJsonValue",
        ScalarType::Bytes => "Buffer",
    }
}

fn enum_union(variants: &[String]) -> String {
    if variants.is_empty() {
        return "never".to_string();
    }
    variants
        .iter()
        .map(|variant| format!("\"{variant}\""))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// English plural for operation names: `User` → `Users`, `Address` →
/// `Addresses`, `Category` → `Categories`.
fn pluralize(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return format!("{name}es");
    }
    let mut chars = lower.chars().rev();
    if chars.next() == Some('y') && chars.next().is_some_and(|c| !"aeiou".contains(c)) {
        return format!("{}ies", &name[..name.len() - 1]);
    }
    format!("{name}s")
}
