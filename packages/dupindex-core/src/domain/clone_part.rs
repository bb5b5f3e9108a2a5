//! Clone Part Representation
//!
//! One located occurrence of a duplicated fragment. Parts are produced by
//! the aggregation pass from matched blocks; the index itself only ever
//! returns blocks. The type lives here as the agreed data shape between
//! the index core and its consumers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A located occurrence of a duplicate fragment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClonePart {
    /// Identifier of the source file containing the occurrence
    pub resource_id: String,

    /// Token/statement offset where the occurrence starts
    pub start_unit: u32,

    /// First source line of the occurrence (1-based, inclusive)
    pub start_line: u32,

    /// Last source line of the occurrence (1-based, inclusive)
    pub end_line: u32,
}

impl ClonePart {
    /// Create a new clone part
    pub fn new(
        resource_id: impl Into<String>,
        start_unit: u32,
        start_line: u32,
        end_line: u32,
    ) -> Self {
        Self {
            resource_id: resource_id.into(),
            start_unit,
            start_line,
            end_line,
        }
    }
}

impl fmt::Display for ClonePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}':[{}|{}-{}]",
            self.resource_id, self.start_unit, self.start_line, self.end_line
        )
    }
}
