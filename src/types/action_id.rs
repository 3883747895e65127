//! Fully-qualified IAM action identifiers.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::IngestError;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?P<prefix>[^:]*):(?P<action>.*)$").expect("identifier pattern is valid")
});

/// An IAM action in its `prefix:ActionName` form, e.g. `s3:GetObject`.
///
/// Equality, hashing and ordering all operate on the full string, so a
/// sorted sequence of identifiers is byte-wise sorted as text. Note that
/// this differs from ordering by `(prefix, action)`: `a-b:X` sorts before
/// `a:X` because `-` < `:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActionIdentifier {
    value: String,
    split: usize,
}

impl ActionIdentifier {
    /// Join a service prefix and an action name.
    ///
    /// The action is taken verbatim. Only a prefix containing `:` is
    /// rejected, since the joined form could not be split back.
    pub fn new(prefix: &str, action: &str) -> Result<Self, IngestError> {
        if prefix.contains(':') {
            return Err(IngestError::schema(
                format!("action identifier {prefix:?}:{action:?}"),
                format!("service prefix {prefix:?} contains ':'"),
            ));
        }
        Ok(ActionIdentifier {
            value: format!("{prefix}:{action}"),
            split: prefix.len(),
        })
    }

    /// The service prefix, e.g. `s3`.
    pub fn prefix(&self) -> &str {
        &self.value[..self.split]
    }

    /// The action name, e.g. `GetObject`.
    pub fn action(&self) -> &str {
        &self.value[self.split + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Display for ActionIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.value)
    }
}

impl Ord for ActionIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.as_bytes().cmp(other.value.as_bytes())
    }
}

impl PartialOrd for ActionIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for ActionIdentifier {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = IDENTIFIER.captures(s).ok_or_else(|| {
            IngestError::schema(
                format!("action identifier {s:?}"),
                "expected format: prefix:ActionName",
            )
        })?;
        ActionIdentifier::new(&captures["prefix"], &captures["action"])
    }
}

impl TryFrom<String> for ActionIdentifier {
    type Error = IngestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ActionIdentifier> for String {
    fn from(id: ActionIdentifier) -> Self {
        id.value
    }
}
