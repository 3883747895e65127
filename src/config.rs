//! Fixed sources, headers and output paths for a pipeline run.
//!
//! The defaults are the production values. Overrides exist so the library
//! can be embedded (and tested) against other locations; the binary itself
//! always runs with [`PipelineConfig::default`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub const ACTIONS_URL: &str = "https://awspolicygen.s3.amazonaws.com/js/policies.js";
pub const MANAGED_POLICIES_URL: &str =
    "https://raw.githubusercontent.com/iann0036/iam-dataset/main/aws/managed_policies.json";
pub const POLICY_GENERATOR_REFERER: &str = "https://awspolicygen.s3.amazonaws.com/policygen.html";

/// How the embedded JSON literal is wrapped in the published text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Envelope {
    /// `<anything> = <literal>`, split at the first `=`.
    Assignment,
    /// The body is the literal itself.
    Bare,
}

/// A remote document and how to request it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    pub envelope: Envelope,
    pub headers: Vec<(String, String)>,
}

impl Source {
    pub fn new(url: impl Into<String>, envelope: Envelope) -> Self {
        Source {
            url: url.into(),
            envelope,
            headers: default_headers(),
        }
    }
}

/// The header set sent with every request.
pub fn default_headers() -> Vec<(String, String)> {
    [
        ("Connection", "keep-alive"),
        ("Pragma", "no-cache"),
        ("Cache-Control", "no-cache"),
        ("Accept", "*/*"),
        ("Referer", POLICY_GENERATOR_REFERER),
        ("Accept-Language", "en-US,en;q=0.9"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Where the generated artifacts land, relative to `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub methods_list: PathBuf,
    pub actions_registry: PathBuf,
    pub managed_policies_registry: PathBuf,
}

impl Default for OutputLayout {
    fn default() -> Self {
        OutputLayout {
            root: PathBuf::from("."),
            methods_list: PathBuf::from("methods_list.txt"),
            actions_registry: PathBuf::from("src/actions.json"),
            managed_policies_registry: PathBuf::from("src/managed_policies.json"),
        }
    }
}

impl OutputLayout {
    pub fn methods_list_path(&self) -> PathBuf {
        self.root.join(&self.methods_list)
    }

    pub fn actions_registry_path(&self) -> PathBuf {
        self.root.join(&self.actions_registry)
    }

    pub fn managed_policies_registry_path(&self) -> PathBuf {
        self.root.join(&self.managed_policies_registry)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub actions: Source,
    pub managed_policies: Source,
    pub output: OutputLayout,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            actions: Source::new(ACTIONS_URL, Envelope::Assignment),
            managed_policies: Source::new(MANAGED_POLICIES_URL, Envelope::Bare),
            output: OutputLayout::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_output_root(mut self, root: impl AsRef<Path>) -> Self {
        self.output.root = root.as_ref().to_path_buf();
        self
    }

    pub fn with_actions_source(mut self, source: Source) -> Self {
        self.actions = source;
        self
    }

    pub fn with_managed_policies_source(mut self, source: Source) -> Self {
        self.managed_policies = source;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources() {
        let config = PipelineConfig::default();
        assert_eq!(config.actions.url, ACTIONS_URL);
        assert_eq!(config.actions.envelope, Envelope::Assignment);
        assert_eq!(config.managed_policies.envelope, Envelope::Bare);
    }

    #[test]
    fn test_default_headers_are_fixed() {
        let headers = default_headers();
        let names: Vec<&str> = headers.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Connection",
                "Pragma",
                "Cache-Control",
                "Accept",
                "Referer",
                "Accept-Language"
            ]
        );
        assert!(headers.contains(&("Referer".to_string(), POLICY_GENERATOR_REFERER.to_string())));
    }

    #[test]
    fn test_output_root_override() {
        let config = PipelineConfig::default().with_output_root("/tmp/out");
        assert_eq!(
            config.output.methods_list_path(),
            PathBuf::from("/tmp/out/methods_list.txt")
        );
        assert_eq!(
            config.output.actions_registry_path(),
            PathBuf::from("/tmp/out/src/actions.json")
        );
    }

    #[test]
    fn test_config_serialization() {
        let config = PipelineConfig::default();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["actions"]["envelope"], "assignment");
        let back: PipelineConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, config);
    }
}
