//! Target artifact as a sequence of free text and managed blocks.
//!
//! Parsing then rendering an untouched document reproduces the input byte for
//! byte, marker lines included, so only blocks the merge actually changes can
//! differ on disk.

use crudgen_core::GeneratedUnit;
use crudgen_emit::markers::{self, Marker};
use thiserror::Error;

/// Marker structure problem, with the 1-based line where it was found.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("line {line}: {reason}")]
pub struct DocumentError {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Hand-maintained text, kept verbatim.
    Text(String),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Block {
    model: String,
    /// Raw begin marker line, including its line terminator.
    begin: String,
    body: String,
    /// Raw end marker line, including its terminator if the file had one.
    end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactDocument {
    segments: Vec<Segment>,
}

impl ArtifactDocument {
    /// A document holding only hand-maintained text (e.g. a fresh preamble).
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            segments: vec![Segment::Text(text)],
        }
    }

    /// Split artifact text into free text and managed blocks.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let mut segments = Vec::new();
        let mut free = String::new();
        let mut open: Option<(String, String, usize)> = None;
        let mut body = String::new();

        for (index, line) in text.split_inclusive('\n').enumerate() {
            let line_no = index + 1;
            match (markers::parse(line), open.as_ref()) {
                (Some(Marker::Begin(model)), None) => {
                    if segments.iter().any(|s| matches!(s, Segment::Block(b) if b.model == model)) {
                        return Err(DocumentError {
                            line: line_no,
                            reason: format!("second block for model '{model}'"),
                        });
                    }
                    if !free.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut free)));
                    }
                    open = Some((model.to_string(), line.to_string(), line_no));
                }
                (Some(Marker::Begin(model)), Some((outer, _, _))) => {
                    return Err(DocumentError {
                        line: line_no,
                        reason: format!("block '{model}' begins inside unfinished block '{outer}'"),
                    });
                }
                (Some(Marker::End(model)), Some(_)) => {
                    if let Some((outer, begin, _)) = open.take() {
                        if model != outer {
                            return Err(DocumentError {
                                line: line_no,
                                reason: format!("end marker for '{model}' closes block '{outer}'"),
                            });
                        }
                        segments.push(Segment::Block(Block {
                            model: outer,
                            begin,
                            body: std::mem::take(&mut body),
                            end: line.to_string(),
                        }));
                    }
                }
                (Some(Marker::End(model)), None) => {
                    return Err(DocumentError {
                        line: line_no,
                        reason: format!("end marker for '{model}' without a begin marker"),
                    });
                }
                (None, Some(_)) => body.push_str(line),
                (None, None) => free.push_str(line),
            }
        }

        if let Some((model, _, line)) = open {
            return Err(DocumentError {
                line,
                reason: format!("block '{model}' is never closed"),
            });
        }
        if !free.is_empty() {
            segments.push(Segment::Text(free));
        }

        Ok(Self { segments })
    }

    /// Body of the managed block for `model`, if present.
    #[must_use]
    pub fn block(&self, model: &str) -> Option<&str> {
        self.blocks()
            .find(|block| block.model == model)
            .map(|block| block.body.as_str())
    }

    /// Names of all managed blocks, in file order.
    pub fn block_names(&self) -> impl Iterator<Item = &str> {
        self.blocks().map(|block| block.model.as_str())
    }

    /// Append a block for a model that has none yet, separated from the
    /// preceding content by one blank line.
    pub fn append(&mut self, unit: &GeneratedUnit) {
        let rendered = self.render();
        if !rendered.is_empty() {
            let mut separator = String::new();
            if !rendered.ends_with('\n') {
                separator.push('\n');
            }
            if !rendered.ends_with("\n\n") {
                separator.push('\n');
            }
            self.segments.push(Segment::Text(separator));
        }
        self.segments.push(Segment::Block(canonical(unit)));
        self.coalesce();
    }

    /// Insert a block ahead of every managed block, after any leading text,
    /// with one blank line on each side. Appends when there are no blocks.
    pub fn insert_before_blocks(&mut self, unit: &GeneratedUnit) {
        let Some(index) = self
            .segments
            .iter()
            .position(|s| matches!(s, Segment::Block(_)))
        else {
            self.append(unit);
            return;
        };

        let mut lead = String::new();
        if let Some(Segment::Text(text)) = index.checked_sub(1).and_then(|i| self.segments.get(i)) {
            if !text.ends_with('\n') {
                lead.push('\n');
            }
            if !text.ends_with("\n\n") {
                lead.push('\n');
            }
        }
        let tail = self.segments.split_off(index);
        self.segments.extend([
            Segment::Text(lead),
            Segment::Block(canonical(unit)),
            Segment::Text("\n".to_string()),
        ]);
        self.segments.extend(tail);
        self.coalesce();
    }

    /// Replace the body of an existing block. Returns false if absent.
    pub fn replace(&mut self, unit: &GeneratedUnit) -> bool {
        for segment in &mut self.segments {
            if let Segment::Block(block) = segment
                && block.model == unit.model_name
            {
                *block = canonical(unit);
                return true;
            }
        }
        false
    }

    /// Drop the block for `model` along with one blank separator line before
    /// it. Returns false if absent.
    pub fn remove(&mut self, model: &str) -> bool {
        let Some(index) = self
            .segments
            .iter()
            .position(|s| matches!(s, Segment::Block(b) if b.model == model))
        else {
            return false;
        };
        self.segments.remove(index);
        // The text before and after the block may now be adjacent.
        self.coalesce();

        if index > 0 {
            if let Some(Segment::Text(text)) = self.segments.get_mut(index - 1)
                && text.ends_with("\n\n")
            {
                text.pop();
            }
        } else if let Some(Segment::Text(text)) = self.segments.first_mut()
            && text.starts_with('\n')
        {
            text.remove(0);
        }
        self.segments
            .retain(|segment| !matches!(segment, Segment::Text(text) if text.is_empty()));
        true
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Block(block) => {
                    out.push_str(&block.begin);
                    out.push_str(&block.body);
                    out.push_str(&block.end);
                }
            }
        }
        out
    }

    fn coalesce(&mut self) {
        let mut merged: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for segment in std::mem::take(&mut self.segments) {
            if matches!(&segment, Segment::Text(text) if text.is_empty()) {
                continue;
            }
            if let Segment::Text(next) = &segment
                && let Some(Segment::Text(prev)) = merged.last_mut()
            {
                prev.push_str(next);
                continue;
            }
            merged.push(segment);
        }
        self.segments = merged;
    }

    fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Block(block) => Some(block),
            Segment::Text(_) => None,
        })
    }
}

fn canonical(unit: &GeneratedUnit) -> Block {
    Block {
        model: unit.model_name.clone(),
        begin: format!("{}\n", markers::begin(&unit.model_name)),
        body: unit.source_text.clone(),
        end: format!("{}\n", markers::end(&unit.model_name)),
    }
}
