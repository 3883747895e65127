use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An AWS managed policy, carried opaquely apart from its name and ARN.
///
/// Index-style listings carry only metadata, so `document` is optional.
/// Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedPolicyDocument {
    #[serde(alias = "PolicyName")]
    pub name: String,
    #[serde(alias = "Arn")]
    pub arn: String,
    #[serde(
        default,
        alias = "Description",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        alias = "PolicyDocument",
        alias = "policy",
        skip_serializing_if = "Option::is_none"
    )]
    pub document: Option<Value>,
}
