//! Line-by-line builder for the branch model.
//!
//! Each non-blank `key:value` line is routed to the branch record or to the
//! workstation block being built. A blank line closes the block. A block with
//! one bad field is dropped as a whole; its siblings are untouched.

use crate::domain::model::{DiscardedRecord, RecordModel, WorkstationDraft};
use crate::utils::error::Result;
use crate::utils::validation::{is_branch_field, is_workstation_field, validate_workstation_value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseState {
    /// Building a workstation block with no invalid field so far.
    Accumulating,
    /// The current block has an invalid field; its remaining lines are read and thrown away.
    Skipping { reason: String },
}

/// What a single line did to the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEffect {
    Branch,
    Workstation,
    Rejected,
    Ignored,
    BlockCommitted,
    BlockDiscarded,
    BlankLine,
}

#[derive(Debug)]
pub struct ModelBuilder {
    model: RecordModel,
    current: WorkstationDraft,
    state: ParseState,
    line_number: usize,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self {
            model: RecordModel::default(),
            current: WorkstationDraft::default(),
            state: ParseState::Accumulating,
            line_number: 0,
        }
    }

    pub fn state(&self) -> &ParseState {
        &self.state
    }

    pub fn model(&self) -> &RecordModel {
        &self.model
    }

    pub fn insert_line(&mut self, line: &str) -> LineEffect {
        self.line_number += 1;
        let line = line.trim();

        if line.is_empty() {
            return self.close_block();
        }

        let Some((key, value)) = line.split_once(':') else {
            tracing::warn!("line {}: no ':' separator, ignoring '{}'", self.line_number, line);
            return LineEffect::Ignored;
        };
        let (key, value) = (key.trim(), value.trim());

        if is_branch_field(key) {
            self.model.branch.set(key, value);
            return LineEffect::Branch;
        }

        if !is_workstation_field(key) {
            tracing::debug!("line {}: unrecognized key '{}' ignored", self.line_number, key);
            return LineEffect::Ignored;
        }

        if let ParseState::Skipping { .. } = self.state {
            if key == "cn" {
                self.current.cn = Some(value.to_string());
            }
            return LineEffect::Rejected;
        }

        match validate_workstation_value(key, value) {
            Ok(()) => {
                self.current.set(key, value);
                LineEffect::Workstation
            }
            Err(reason) => {
                tracing::debug!("line {}: {}", self.line_number, reason);
                self.state = ParseState::Skipping { reason };
                LineEffect::Rejected
            }
        }
    }

    fn close_block(&mut self) -> LineEffect {
        let draft = std::mem::take(&mut self.current);
        let state = std::mem::replace(&mut self.state, ParseState::Accumulating);

        match state {
            ParseState::Skipping { reason } => {
                self.discard(draft.cn, reason);
                LineEffect::BlockDiscarded
            }
            ParseState::Accumulating if draft.is_empty() => LineEffect::BlankLine,
            ParseState::Accumulating => {
                let cn = draft.cn.clone();
                match draft.finalize() {
                    Ok(record) => {
                        tracing::debug!("workstation '{}' accepted", record.cn);
                        self.model.workstations.push(record);
                        LineEffect::BlockCommitted
                    }
                    Err(missing) => {
                        self.discard(cn, format!("missing {}", missing.join(", ")));
                        LineEffect::BlockDiscarded
                    }
                }
            }
        }
    }

    fn discard(&mut self, cn: Option<String>, reason: String) {
        tracing::warn!(
            "discarding workstation block ending at line {} ({}): {}",
            self.line_number,
            cn.as_deref().unwrap_or("no cn"),
            reason
        );
        self.model.discarded.push(DiscardedRecord {
            line: self.line_number,
            cn,
            reason,
        });
    }

    /// True iff all four branch fields have been seen.
    pub fn validate(&self) -> bool {
        self.model.validate()
    }

    /// Ends the input. With `flush_trailing_block` the last block is closed as if a
    /// blank line followed it; without, an unterminated block is recorded as discarded.
    pub fn finish(mut self, flush_trailing_block: bool) -> RecordModel {
        if flush_trailing_block {
            self.close_block();
        } else {
            let draft = std::mem::take(&mut self.current);
            match std::mem::replace(&mut self.state, ParseState::Accumulating) {
                ParseState::Skipping { reason } => self.discard(draft.cn, reason),
                ParseState::Accumulating if !draft.is_empty() => {
                    self.discard(draft.cn, "no terminating blank line".to_string())
                }
                ParseState::Accumulating => {}
            }
        }
        self.model
    }
}

pub fn parse_str(input: &str, flush_trailing_block: bool) -> RecordModel {
    let mut builder = ModelBuilder::new();
    for line in input.lines() {
        builder.insert_line(line);
    }
    builder.finish(flush_trailing_block)
}

/// Parses and requires a complete branch record.
pub fn parse_complete(input: &str, flush_trailing_block: bool) -> Result<RecordModel> {
    let model = parse_str(input, flush_trailing_block);
    model.ensure_complete()?;
    Ok(model)
}
