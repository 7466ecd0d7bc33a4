use crudgen_emit::{EmitOptions, RUNTIME_BLOCK, emit_all, emit_preamble, emit_runtime, markers};
use crudgen_schema::{normalize_schema, parse_schema};
use pretty_assertions::assert_eq;

const SCHEMA: &str = r#"
generator client {
  provider = "prisma-client-js"
}

enum InvoiceStatus {
  DRAFT
  SENT
  PAID
}

model Client {
  id        Int       @id @default(autoincrement())
  company   String
  invoices  Invoice[]
}

model Invoice {
  id        String        @id @default(cuid())
  status    InvoiceStatus @default(DRAFT)
  total     Decimal
  clientId  Int
  client    Client        @relation(fields: [clientId], references: [id])
}

model AuditEntry {
  id      BigInt @id @default(autoincrement())
  payload Json
}
"#;

#[test]
fn every_block_targets_its_own_delegate() {
    let schema = parse_schema(SCHEMA).expect("schema should parse");
    let models = normalize_schema(&schema).expect("schema should normalize");
    let units = emit_all(&models, &EmitOptions::default());

    let names: Vec<&str> = units.iter().map(|u| u.model_name.as_str()).collect();
    assert_eq!(names, vec!["Client", "Invoice", "AuditEntry"]);

    for (unit, accessor) in units.iter().zip(["client", "invoice", "auditEntry"]) {
        let delegate = format!("prisma.{accessor}.");
        assert_eq!(
            unit.source_text.matches(&delegate).count(),
            5,
            "{} should call {delegate} five times",
            unit.model_name
        );
        assert!(unit.source_text.contains("orderBy: { id: \"asc\" }"));
    }
}

#[test]
fn relation_scalars_stay_and_relation_objects_go() {
    let schema = parse_schema(SCHEMA).expect("schema should parse");
    let models = normalize_schema(&schema).expect("schema should normalize");
    let invoice = &emit_all(&models, &EmitOptions::default())[1];

    assert!(invoice.source_text.contains("  clientId: number;\n"));
    assert!(invoice.source_text.contains("  status: \"DRAFT\" | \"SENT\" | \"PAID\";\n"));
    assert!(invoice.source_text.contains("  total: Prisma.Decimal;\n"));
    assert!(!invoice.source_text.contains("  client:"));
    assert!(invoice.source_text.contains("getAllInvoices"));
}

#[test]
fn preamble_and_wrapped_blocks_form_an_artifact() {
    let schema = parse_schema(SCHEMA).expect("schema should parse");
    let models = normalize_schema(&schema).expect("schema should normalize");
    let options = EmitOptions::default();

    let mut artifact = emit_preamble();
    let units = std::iter::once(emit_runtime(&options)).chain(emit_all(&models, &options));
    for unit in units {
        artifact.push('\n');
        artifact.push_str(&markers::wrap(&unit));
    }

    let begins: Vec<_> = artifact
        .lines()
        .filter_map(markers::parse)
        .collect();
    assert_eq!(begins.len(), 8);
    assert_eq!(begins[0], markers::Marker::Begin(RUNTIME_BLOCK));
    assert_eq!(artifact.matches("export class TypeCoercionError").count(), 1);
    assert_eq!(artifact.matches("function isRecordNotFound").count(), 1);
}
