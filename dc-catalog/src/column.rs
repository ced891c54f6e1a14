// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Column definitions

use dc_common::LogicalType;
use serde::{Deserialize, Serialize};

/// Column metadata as reported by the delegate engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,

    /// Logical type
    pub logical_type: LogicalType,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, logical_type: LogicalType) -> Self {
        Self {
            name: name.into(),
            logical_type,
        }
    }
}

/// Ordered column list of a table; names are unique ignoring ASCII case
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnList {
    columns: Vec<ColumnDefinition>,
}

impl ColumnList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column_exists(&self, name: &str) -> bool {
        self.get_column(name).is_some()
    }

    /// Get column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|col| col.name.eq_ignore_ascii_case(name))
    }

    /// Append a column. Returns false (and leaves the list untouched) when the
    /// name is already present.
    pub fn add_column(&mut self, column: ColumnDefinition) -> bool {
        if self.column_exists(&column.name) {
            return false;
        }
        self.columns.push(column);
        true
    }

    /// Append every column of `other` not already present, keeping existing order.
    /// Returns how many columns were added.
    pub fn merge_missing<'a, I>(&mut self, other: I) -> usize
    where
        I: IntoIterator<Item = &'a ColumnDefinition>,
    {
        other
            .into_iter()
            .filter(|col| self.add_column((*col).clone()))
            .count()
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|col| col.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn to_vec(&self) -> Vec<ColumnDefinition> {
        self.columns.clone()
    }
}

impl FromIterator<ColumnDefinition> for ColumnList {
    fn from_iter<I: IntoIterator<Item = ColumnDefinition>>(iter: I) -> Self {
        let mut list = ColumnList::new();
        for column in iter {
            list.add_column(column);
        }
        list
    }
}
