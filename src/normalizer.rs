//! Typed views over the parsed datasets.
//!
//! Every structural surprise is a `SchemaError` naming the service or policy
//! it was found in; nothing is skipped silently.

use serde_json::Value;
use tracing::debug;

use crate::error::IngestError;
use crate::types::{ActionIdentifier, ManagedPolicyDocument, RawDataset, ServiceEntry};

pub const SERVICE_MAP_KEY: &str = "serviceMap";
pub const POLICIES_KEY: &str = "policies";

/// Extract the `(service name, entry)` pairs from the actions dataset.
///
/// The service map is the root's `serviceMap` member, or the root itself
/// when that member is absent (`var serviceMap = {...}`).
pub fn service_entries(dataset: &RawDataset) -> Result<Vec<(String, ServiceEntry)>, IngestError> {
    let root = dataset
        .value()
        .as_object()
        .ok_or_else(|| IngestError::schema("dataset root", "expected an object"))?;

    let service_map = match root.get(SERVICE_MAP_KEY) {
        Some(member) => member
            .as_object()
            .ok_or_else(|| IngestError::schema(SERVICE_MAP_KEY, "expected an object"))?,
        None => root,
    };

    service_map
        .iter()
        .map(|(name, value)| {
            let entry: ServiceEntry = serde_json::from_value(value.clone())
                .map_err(|e| IngestError::schema(format!("service `{name}`"), e.to_string()))?;
            Ok((name.clone(), entry))
        })
        .collect()
}

/// Flatten service entries into `prefix:Action` identifiers.
///
/// The result holds one identifier per input action, duplicates included;
/// ordering is left to the catalog.
pub fn flatten(entries: &[(String, ServiceEntry)]) -> Result<Vec<ActionIdentifier>, IngestError> {
    let mut identifiers = Vec::with_capacity(entries.iter().map(|(_, e)| e.actions.len()).sum());

    for (name, entry) in entries {
        for action in &entry.actions {
            let id = ActionIdentifier::new(&entry.string_prefix, action).map_err(|err| match err {
                IngestError::SchemaError { detail, .. } => {
                    IngestError::schema(format!("service `{name}`"), detail)
                }
                other => other,
            })?;
            identifiers.push(id);
        }
        debug!(
            event = "Actions",
            phase = "Normalize",
            service = name.as_str(),
            prefix = entry.string_prefix.as_str(),
            actions = entry.actions.len()
        );
    }

    Ok(identifiers)
}

/// Extract the managed policies. The root is either the array of policies
/// itself or an object holding it under `policies`.
pub fn managed_policies(dataset: &RawDataset) -> Result<Vec<ManagedPolicyDocument>, IngestError> {
    let policies = match dataset.value() {
        Value::Array(items) => items,
        Value::Object(root) => root
            .get(POLICIES_KEY)
            .ok_or_else(|| IngestError::schema("dataset root", format!("missing `{POLICIES_KEY}`")))?
            .as_array()
            .ok_or_else(|| IngestError::schema(POLICIES_KEY, "expected an array"))?,
        _ => {
            return Err(IngestError::schema(
                "dataset root",
                "expected an array or an object",
            ));
        }
    };

    policies
        .iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value.clone())
                .map_err(|e| IngestError::schema(policy_context(index, value), e.to_string()))
        })
        .collect()
}

fn policy_context(index: usize, value: &Value) -> String {
    match value
        .get("PolicyName")
        .or_else(|| value.get("name"))
        .and_then(Value::as_str)
    {
        Some(name) => format!("policy #{index} `{name}`"),
        None => format!("policy #{index}"),
    }
}
