//! End-to-end runs against canned documents and throwaway output roots.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::config::{ACTIONS_URL, MANAGED_POLICIES_URL};
use crate::{Pipeline, PipelineConfig, StaticFetcher};


const POLICIES_BODY: &str = r#"[
    { "PolicyName": "ReadOnlyAccess", "Arn": "arn:aws:iam::aws:policy/ReadOnlyAccess", "PolicyDocument": { "Version": "2012-10-17" } },
]"#;

/// Index-style listing in the layout published at `MANAGED_POLICIES_URL`.
const POLICIES_INDEX: &str = include_str!("fixtures/managed_policies_index.json");

fn pipeline_for(root: &Path, actions_body: &str) -> Pipeline<StaticFetcher> {
    pipeline_with(root, actions_body, POLICIES_BODY)
}

fn pipeline_with(root: &Path, actions_body: &str, policies_body: &str) -> Pipeline<StaticFetcher> {
    let fetcher = StaticFetcher::new()
        .with_body(ACTIONS_URL, actions_body)
        .with_body(MANAGED_POLICIES_URL, policies_body);
    Pipeline::new(PipelineConfig::default().with_output_root(root), fetcher)
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap()
}

fn methods_list(root: &TempDir) -> String {
    read(root.path().join("methods_list.txt"))
}

fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir).unwrap().next().is_none()
}
