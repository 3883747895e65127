use serde::{Deserialize, Serialize};

/// One service as published in the service map.
///
/// Other keys the publisher includes (ARN formats, condition keys, ...) are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    #[serde(rename = "StringPrefix")]
    pub string_prefix: String,
    #[serde(rename = "Actions")]
    pub actions: Vec<String>,
}
