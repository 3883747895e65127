//! Deduplicated, deterministically ordered collections ready for emission.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use tracing::warn;

use crate::types::{ActionIdentifier, ManagedPolicyDocument};

/// The unique action identifiers of one run, sorted byte-wise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionCatalog {
    identifiers: Vec<ActionIdentifier>,
    duplicates: usize,
}

impl ActionCatalog {
    /// Build from the flattened identifiers; any multiset with the same
    /// members produces the same catalog.
    pub fn from_identifiers(identifiers: impl IntoIterator<Item = ActionIdentifier>) -> Self {
        let mut seen = 0usize;
        let unique: BTreeSet<ActionIdentifier> = identifiers.into_iter().inspect(|_| seen += 1).collect();
        let duplicates = seen - unique.len();
        if duplicates > 0 {
            warn!(
                event = "Actions",
                phase = "Dedupe",
                duplicates,
                unique = unique.len(),
                "duplicate action identifiers dropped"
            );
        }
        ActionCatalog {
            duplicates,
            identifiers: unique.into_iter().collect(),
        }
    }

    pub fn identifiers(&self) -> &[ActionIdentifier] {
        &self.identifiers
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// How many input identifiers were dropped as duplicates.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Identifiers grouped by service prefix, prefixes sorted.
    ///
    /// Identifiers sharing `prefix:` are contiguous in byte order, so each
    /// group keeps catalog order.
    pub fn by_prefix(&self) -> BTreeMap<&str, Vec<&ActionIdentifier>> {
        let chunks = self.identifiers.iter().chunk_by(|&id| id.prefix());
        let grouped: BTreeMap<&str, Vec<&ActionIdentifier>> = chunks
            .into_iter()
            .map(|(prefix, group)| (prefix, group.collect()))
            .collect();
        grouped
    }
}

/// Managed policies, one per ARN, ordered by name then ARN.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ManagedPolicyCatalog {
    policies: Vec<ManagedPolicyDocument>,
    duplicates: usize,
}

impl ManagedPolicyCatalog {
    /// The first occurrence of an ARN wins. Later ones carrying a different
    /// document are logged and dropped.
    pub fn from_policies(policies: impl IntoIterator<Item = ManagedPolicyDocument>) -> Self {
        let mut by_arn: BTreeMap<String, ManagedPolicyDocument> = BTreeMap::new();
        let mut duplicates = 0;

        for policy in policies {
            match by_arn.entry(policy.arn.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(policy);
                }
                Entry::Occupied(existing) => {
                    duplicates += 1;
                    if existing.get() != &policy {
                        warn!(
                            event = "ManagedPolicies",
                            phase = "Dedupe",
                            arn = policy.arn.as_str(),
                            "duplicate ARN with a different document, keeping the first"
                        );
                    }
                }
            }
        }

        let policies = by_arn
            .into_values()
            .sorted_by(|a, b| {
                a.name
                    .as_bytes()
                    .cmp(b.name.as_bytes())
                    .then_with(|| a.arn.as_bytes().cmp(b.arn.as_bytes()))
            })
            .collect();

        ManagedPolicyCatalog {
            policies,
            duplicates,
        }
    }

    pub fn policies(&self) -> &[ManagedPolicyDocument] {
        &self.policies
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn ids(values: &[&str]) -> Vec<ActionIdentifier> {
        values
            .iter()
            .map(|v| ActionIdentifier::from_str(v).unwrap())
            .collect()
    }

    fn strings(catalog: &ActionCatalog) -> Vec<&str> {
        catalog.identifiers().iter().map(ActionIdentifier::as_str).collect()
    }

    #[test]
    fn test_dedupe_and_sort() {
        let catalog = ActionCatalog::from_identifiers(ids(&[
            "s3:PutObject",
            "s3:GetObject",
            "s3:GetObject",
        ]));
        assert_eq!(strings(&catalog), vec!["s3:GetObject", "s3:PutObject"]);
        assert_eq!(catalog.duplicates(), 1);
    }

    #[test]
    fn test_cross_service_dedupe() {
        let catalog = ActionCatalog::from_identifiers(ids(&["x:Do", "x:Do"]));
        assert_eq!(strings(&catalog), vec!["x:Do"]);
    }

    #[test]
    fn test_ordering_is_bytewise() {
        let catalog = ActionCatalog::from_identifiers(ids(&[
            "s3:alpha",
            "a:X",
            "s3:Zeta",
            "a-b:X",
            "ab:X",
        ]));
        assert_eq!(
            strings(&catalog),
            vec!["a-b:X", "a:X", "ab:X", "s3:Zeta", "s3:alpha"]
        );
        assert!(catalog.identifiers().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let forward = ids(&["b:One", "a:Two", "a:One", "b:One"]);
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(
            ActionCatalog::from_identifiers(forward),
            ActionCatalog::from_identifiers(backward)
        );
    }

    #[test]
    fn test_by_prefix_groups_contiguously() {
        let catalog = ActionCatalog::from_identifiers(ids(&[
            "a:X", "a-b:Y", "a:W", "ab:Z", "a-b:X",
        ]));
        let groups: Vec<(&str, Vec<&str>)> = catalog
            .by_prefix()
            .into_iter()
            .map(|(p, ids)| (p, ids.into_iter().map(ActionIdentifier::as_str).collect()))
            .collect();
        assert_eq!(
            groups,
            vec![
                ("a", vec!["a:W", "a:X"]),
                ("a-b", vec!["a-b:X", "a-b:Y"]),
                ("ab", vec!["ab:Z"]),
            ]
        );
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = ActionCatalog::from_identifiers(Vec::new());
        assert!(catalog.is_empty());
        assert!(catalog.by_prefix().is_empty());
    }

    fn policy(name: &str, arn: &str, version: &str) -> ManagedPolicyDocument {
        ManagedPolicyDocument {
            name: name.to_string(),
            arn: arn.to_string(),
            description: None,
            document: Some(json!({ "Version": version })),
        }
    }

    #[test]
    fn test_managed_policies_sorted_by_name() {
        let catalog = ManagedPolicyCatalog::from_policies(vec![
            policy("ReadOnlyAccess", "arn:aws:iam::aws:policy/ReadOnlyAccess", "1"),
            policy("AdministratorAccess", "arn:aws:iam::aws:policy/AdministratorAccess", "1"),
        ]);
        let names: Vec<&str> = catalog.policies().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["AdministratorAccess", "ReadOnlyAccess"]);
    }

    #[test]
    fn test_managed_policies_first_arn_wins() {
        let catalog = ManagedPolicyCatalog::from_policies(vec![
            policy("A", "arn:aws:iam::aws:policy/A", "first"),
            policy("A", "arn:aws:iam::aws:policy/A", "second"),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.duplicates(), 1);
        assert_eq!(catalog.policies()[0].document.as_ref().unwrap()["Version"], "first");
    }
}
