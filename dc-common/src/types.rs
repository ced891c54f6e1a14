// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Common type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction ID type
pub type TransactionId = u64;

/// Access mode of an attached database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessMode {
    /// Let the host decide
    #[default]
    Automatic,
    ReadOnly,
    ReadWrite,
}

/// Behaviour when attaching under a name that is already registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnCreateConflict {
    #[default]
    ErrorOnConflict,
    IgnoreOnConflict,
    ReplaceOnConflict,
}

/// Behaviour of a lookup that finds nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnEntryNotFound {
    /// Soft lookup: absent result
    ReturnNull,
    /// Hard lookup: user-facing error
    ThrowException,
}

/// Kind of catalog object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogType {
    Table,
    View,
    Index,
    Sequence,
    ScalarFunction,
    AggregateFunction,
    TableFunction,
    CopyFunction,
    PragmaFunction,
    Collation,
    Type,
}

/// Logical column type reported by the delegate engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalType {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Double,
    Decimal { precision: u8, scale: u8 },
    Date,
    Timestamp,
    TimestampTz,
    Varchar,
    Blob,
    List(Box<LogicalType>),
    Map { key: Box<LogicalType>, value: Box<LogicalType> },
    Struct { fields: Vec<(String, LogicalType)> },
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::Boolean => write!(f, "BOOLEAN"),
            LogicalType::TinyInt => write!(f, "TINYINT"),
            LogicalType::SmallInt => write!(f, "SMALLINT"),
            LogicalType::Integer => write!(f, "INTEGER"),
            LogicalType::BigInt => write!(f, "BIGINT"),
            LogicalType::Float => write!(f, "FLOAT"),
            LogicalType::Double => write!(f, "DOUBLE"),
            LogicalType::Decimal { precision, scale } => write!(f, "DECIMAL({},{})", precision, scale),
            LogicalType::Date => write!(f, "DATE"),
            LogicalType::Timestamp => write!(f, "TIMESTAMP"),
            LogicalType::TimestampTz => write!(f, "TIMESTAMP WITH TIME ZONE"),
            LogicalType::Varchar => write!(f, "VARCHAR"),
            LogicalType::Blob => write!(f, "BLOB"),
            LogicalType::List(child) => write!(f, "{}[]", child),
            LogicalType::Map { key, value } => write!(f, "MAP({}, {})", key, value),
            LogicalType::Struct { fields } => {
                write!(f, "STRUCT(")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", name, ty)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Value of an attach option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Boolean(bool),
    Varchar(String),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Varchar(s) => Some(s),
            OptionValue::Boolean(_) => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Varchar(value.to_string())
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Boolean(value)
    }
}
