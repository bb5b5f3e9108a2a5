//! Clone Group Representation
//!
//! The set of all occurrences considered mutual duplicates of one
//! fragment, plus a designated origin. Built by the aggregation pass from
//! index query results; immutable once built.

use super::clone_part::ClonePart;
use crate::error::{DupIndexError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable group of mutually-duplicate clone parts
///
/// Equality compares the match length in blocks, the origin part, and the
/// parts pairwise in order. `length_in_units` is derived presentation data
/// and does not participate in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneGroup {
    /// Match length in blocks
    clone_unit_length: u32,

    /// Match length in source units
    length_in_units: u32,

    /// The occurrence the group was discovered from
    origin: ClonePart,

    /// Every occurrence in the group, origin included
    parts: Vec<ClonePart>,
}

impl CloneGroup {
    /// Start building a clone group
    pub fn builder() -> CloneGroupBuilder {
        CloneGroupBuilder {
            clone_unit_length: 0,
            length_in_units: 0,
            origin: None,
            parts: Vec::new(),
        }
    }

    /// Match length in blocks
    pub fn clone_unit_length(&self) -> u32 {
        self.clone_unit_length
    }

    /// Match length in source units
    pub fn length_in_units(&self) -> u32 {
        self.length_in_units
    }

    /// The designated origin occurrence
    pub fn origin(&self) -> &ClonePart {
        &self.origin
    }

    /// All occurrences in the group
    pub fn parts(&self) -> &[ClonePart] {
        &self.parts
    }
}

impl PartialEq for CloneGroup {
    fn eq(&self, other: &Self) -> bool {
        self.clone_unit_length == other.clone_unit_length
            && self.origin == other.origin
            && self.parts == other.parts
    }
}

impl Eq for CloneGroup {}

impl fmt::Display for CloneGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CloneGroup(len {} blocks, parts [", self.clone_unit_length)?;
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", part)?;
        }
        write!(f, "])")
    }
}

/// Builder for [`CloneGroup`]
#[derive(Debug, Clone)]
pub struct CloneGroupBuilder {
    clone_unit_length: u32,
    length_in_units: u32,
    origin: Option<ClonePart>,
    parts: Vec<ClonePart>,
}

impl CloneGroupBuilder {
    /// Set the match length in blocks
    pub fn clone_unit_length(mut self, length: u32) -> Self {
        self.clone_unit_length = length;
        self
    }

    /// Set the match length in source units
    pub fn length_in_units(mut self, length: u32) -> Self {
        self.length_in_units = length;
        self
    }

    /// Set the origin occurrence
    pub fn origin(mut self, origin: ClonePart) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Append one occurrence
    pub fn add_part(mut self, part: ClonePart) -> Self {
        self.parts.push(part);
        self
    }

    /// Replace the occurrence list wholesale
    pub fn parts(mut self, parts: Vec<ClonePart>) -> Self {
        self.parts = parts;
        self
    }

    /// Finish the group, validating structural invariants
    pub fn build(self) -> Result<CloneGroup> {
        let origin = self
            .origin
            .ok_or_else(|| DupIndexError::invalid_clone_group("origin part not set"))?;
        if self.parts.is_empty() {
            return Err(DupIndexError::invalid_clone_group(
                "group must contain at least one part",
            ));
        }

        Ok(CloneGroup {
            clone_unit_length: self.clone_unit_length,
            length_in_units: self.length_in_units,
            origin,
            parts: self.parts,
        })
    }
}
