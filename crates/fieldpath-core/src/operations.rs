// SPDX-License-Identifier: MIT OR Apache-2.0
//! Operations applied at the end of a path.

use crate::error::PathError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Operation applied to the terminal step of a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Read the value
    Get,
    /// Write the value, creating missing containers on the way
    Set(Value),
    /// Remove the value, pruning one emptied container level
    Delete,
}

impl Operation {
    /// The kind of this operation
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::Get => OperationKind::Get,
            Self::Set(_) => OperationKind::Set,
            Self::Delete => OperationKind::Delete,
        }
    }

    /// Returns `true` if the operation mutates the document
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(self, Self::Get)
    }
}

/// Operation kind without a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Read
    Get,
    /// Write
    Set,
    /// Remove
    Delete,
}

impl OperationKind {
    /// Attach a payload, turning the kind into an [`Operation`].
    ///
    /// The value is ignored for get and delete.
    #[must_use]
    pub fn with_value(self, value: Option<Value>) -> Operation {
        match self {
            Self::Get => Operation::Get,
            Self::Set => Operation::Set(value.unwrap_or(Value::Null)),
            Self::Delete => Operation::Delete,
        }
    }
}

impl FromStr for OperationKind {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "set" => Ok(Self::Set),
            "delete" | "del" | "remove" => Ok(Self::Delete),
            _ => Err(PathError::UnsupportedOperation(s.to_string())),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Delete => "delete",
        })
    }
}
