//! Comment lines that delimit a managed block inside the target artifact.
//!
//! ```text
//! // <crudgen:begin User>
//! ...generated body...
//! // <crudgen:end User>
//! ```
//!
//! The content hash covers only the body between the two lines.

use crudgen_core::GeneratedUnit;

const BEGIN_PREFIX: &str = "// <crudgen:begin ";
const END_PREFIX: &str = "// <crudgen:end ";
const SUFFIX: &str = ">";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker<'a> {
    Begin(&'a str),
    End(&'a str),
}

#[must_use]
pub fn begin(model: &str) -> String {
    format!("{BEGIN_PREFIX}{model}{SUFFIX}")
}

#[must_use]
pub fn end(model: &str) -> String {
    format!("{END_PREFIX}{model}{SUFFIX}")
}

/// Recognize a marker line. Surrounding whitespace (including a CR left over
/// from CRLF endings) is ignored.
#[must_use]
pub fn parse(line: &str) -> Option<Marker<'_>> {
    let line = line.trim();
    if let Some(name) = strip(line, BEGIN_PREFIX) {
        return Some(Marker::Begin(name));
    }
    strip(line, END_PREFIX).map(Marker::End)
}

fn strip<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let name = line.strip_prefix(prefix)?.strip_suffix(SUFFIX)?.trim();
    (!name.is_empty()).then_some(name)
}

/// Full block text for a unit: begin marker, body, end marker.
///
/// The body is copied verbatim (emitted bodies always end in a newline), so
/// reading the block back yields exactly `unit.source_text`.
#[must_use]
pub fn wrap(unit: &GeneratedUnit) -> String {
    let mut block = begin(&unit.model_name);
    block.push('\n');
    block.push_str(&unit.source_text);
    block.push_str(&end(&unit.model_name));
    block.push('\n');
    block
}
