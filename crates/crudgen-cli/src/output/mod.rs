use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a response: `value` as JSON, or `rows` under `headers` when a table
/// was requested.
pub fn render<T: Serialize>(
    value: &T,
    headers: &[&str],
    rows: &[Vec<String>],
    format: OutputFormat,
    options: table::TableOptions,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Raw => serde_json::to_string(value)?,
        OutputFormat::Table if rows.is_empty() => String::from("(no rows)"),
        OutputFormat::Table => table::render_table(headers, rows, options),
    })
}

/// Print a response in the requested format.
pub fn output_with_rows<T: Serialize>(
    value: &T,
    headers: &[&str],
    rows: &[Vec<String>],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rendered = render(value, headers, rows, format, table_options())?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}
