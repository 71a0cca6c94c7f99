//! Core data model types for the merged table.
//!
//! The merged table is a [`HeaderSet`] (ordered, distinct column names) plus a list of [`Row`]s
//! whose cells line up by position with the header set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Ordered set of distinct column names.
///
/// The first time a name is inserted fixes its position permanently. Names are never removed or
/// reordered (short of [`HeaderSet::clear`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl HeaderSet {
    /// Create an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `name` at the end if it is not already present.
    ///
    /// Returns `true` if the name was newly added.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.positions.contains_key(name) {
            return false;
        }
        self.positions.insert(name.to_owned(), self.names.len());
        self.names.push(name.to_owned());
        true
    }

    /// Returns the position of a header by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate header names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Header names in insertion order.
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn clear(&mut self) {
        self.names.clear();
        self.positions.clear();
    }
}

/// One data record of the merged table.
///
/// A row holds one cell per header that existed when it was ingested. Headers added later have no
/// stored cell; [`Row::cell`] reports those positions as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    /// Create a row from cells aligned to the header set.
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell at header position `index`, or `""` when this row predates that header.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// Number of stored cells (may be less than the current header count).
    pub fn stored_len(&self) -> usize {
        self.cells.len()
    }

    /// Cells padded with `""` to `width` positions.
    pub fn padded(&self, width: usize) -> Vec<String> {
        (0..width).map(|i| self.cell(i).to_owned()).collect()
    }
}

/// Owned copy of the table state with every row padded to the full header width.
///
/// This is what a renderer or a JSON consumer reads; it never aliases the merger's state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Header names in order.
    pub headers: Vec<String>,
    /// Row-major cell storage, each row exactly `headers.len()` long.
    pub rows: Vec<Vec<String>>,
}
