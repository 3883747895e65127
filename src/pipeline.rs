//! The two dataset pipelines and their prepare/commit run.
//!
//! Each pipeline goes fetch → unwrap → parse → normalize → sort → render and
//! produces [`Artifact`]s in memory. Nothing touches the filesystem until
//! every requested pipeline has prepared successfully.

use std::thread;

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{ActionCatalog, ManagedPolicyCatalog};
use crate::config::{PipelineConfig, Source};
use crate::emitter::{self, Artifact};
use crate::envelope::extract_embedded_literal;
use crate::error::IngestError;
use crate::fetcher::Fetcher;
use crate::normalizer;
use crate::parser::parse_jsonc;
use crate::timers::{StageTimings, timed};
use crate::types::RawDataset;

/// Counts and timings for the actions dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionsReport {
    pub services: usize,
    pub raw_actions: usize,
    pub unique_actions: usize,
    pub duplicates: usize,
    pub timings: StageTimings,
}

/// Counts and timings for the managed-policies dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManagedPoliciesReport {
    pub policies: usize,
    pub duplicates: usize,
    pub timings: StageTimings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub actions: ActionsReport,
    pub managed_policies: ManagedPoliciesReport,
}

/// A rendered actions dataset awaiting commit.
#[derive(Debug, Clone)]
pub struct PreparedActions {
    pub catalog: ActionCatalog,
    pub artifacts: Vec<Artifact>,
    pub report: ActionsReport,
}

/// A rendered managed-policies dataset awaiting commit.
#[derive(Debug, Clone)]
pub struct PreparedManagedPolicies {
    pub catalog: ManagedPolicyCatalog,
    pub artifacts: Vec<Artifact>,
    pub report: ManagedPoliciesReport,
}

pub struct Pipeline<F: Fetcher> {
    config: PipelineConfig,
    fetcher: F,
}

impl<F: Fetcher> Pipeline<F> {
    pub fn new(config: PipelineConfig, fetcher: F) -> Self {
        Pipeline { config, fetcher }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn load(
        &self,
        dataset: &'static str,
        source: &Source,
        timings: &mut StageTimings,
    ) -> Result<RawDataset, IngestError> {
        let body = timed(&mut timings.fetch, || self.fetcher.fetch(source))?;
        let literal = timed(&mut timings.unwrap, || {
            extract_embedded_literal(&body, source.envelope)
        })?;
        debug!(
            event = dataset,
            phase = "Unwrap",
            envelope = %source.envelope,
            bytes = literal.len()
        );
        timed(&mut timings.parse, || parse_jsonc(literal))
    }

    /// Fetch, normalize and render the actions dataset without writing it.
    pub fn prepare_actions(&self) -> Result<PreparedActions, IngestError> {
        let mut timings = StageTimings::default();
        let dataset = self.load("Actions", &self.config.actions, &mut timings)?;

        let (services, identifiers) = timed(&mut timings.normalize, || {
            let entries = normalizer::service_entries(&dataset)?;
            let identifiers = normalizer::flatten(&entries)?;
            Ok::<_, IngestError>((entries.len(), identifiers))
        })?;
        drop(dataset);

        let raw_actions = identifiers.len();
        let catalog = timed(&mut timings.sort, || ActionCatalog::from_identifiers(identifiers));

        let output = &self.config.output;
        let artifacts = timed(&mut timings.render, || {
            let registry_path = output.actions_registry_path();
            let registry = emitter::render_actions_registry(&catalog, &registry_path)?;
            Ok::<_, IngestError>(vec![
                Artifact::new(output.methods_list_path(), emitter::render_methods_list(&catalog)),
                Artifact::new(registry_path, registry),
            ])
        })?;

        let report = ActionsReport {
            services,
            raw_actions,
            unique_actions: catalog.len(),
            duplicates: catalog.duplicates(),
            timings,
        };
        info!(
            event = "Actions",
            phase = "Prepared",
            services = report.services,
            raw_actions = report.raw_actions,
            unique_actions = report.unique_actions,
            duplicates = report.duplicates,
            elapsed_ms = report.timings.total().as_millis() as u64
        );

        Ok(PreparedActions {
            catalog,
            artifacts,
            report,
        })
    }

    /// Fetch, normalize and render the managed policies without writing them.
    pub fn prepare_managed_policies(&self) -> Result<PreparedManagedPolicies, IngestError> {
        let mut timings = StageTimings::default();
        let dataset = self.load(
            "ManagedPolicies",
            &self.config.managed_policies,
            &mut timings,
        )?;

        let policies = timed(&mut timings.normalize, || {
            normalizer::managed_policies(&dataset)
        })?;
        drop(dataset);

        let catalog = timed(&mut timings.sort, || {
            ManagedPolicyCatalog::from_policies(policies)
        });

        let path = self.config.output.managed_policies_registry_path();
        let registry = timed(&mut timings.render, || {
            emitter::render_managed_policies(&catalog, &path)
        })?;

        let report = ManagedPoliciesReport {
            policies: catalog.len(),
            duplicates: catalog.duplicates(),
            timings,
        };
        info!(
            event = "ManagedPolicies",
            phase = "Prepared",
            policies = report.policies,
            duplicates = report.duplicates,
            elapsed_ms = report.timings.total().as_millis() as u64
        );

        Ok(PreparedManagedPolicies {
            catalog,
            artifacts: vec![Artifact::new(path, registry)],
            report,
        })
    }

    /// Run the actions pipeline alone and write its artifacts.
    pub fn run_actions(&self) -> Result<ActionsReport, IngestError> {
        let prepared = self.prepare_actions()?;
        emitter::commit(&prepared.artifacts)?;
        Ok(prepared.report)
    }

    /// Run the managed-policies pipeline alone and write its artifact.
    pub fn run_managed_policies(&self) -> Result<ManagedPoliciesReport, IngestError> {
        let prepared = self.prepare_managed_policies()?;
        emitter::commit(&prepared.artifacts)?;
        Ok(prepared.report)
    }

    /// Prepare both datasets concurrently, then write every artifact.
    ///
    /// If either pipeline fails no output path is touched. When both fail,
    /// the actions error is returned.
    pub fn run(&self) -> Result<RunReport, IngestError> {
        let (actions, managed_policies) = thread::scope(|scope| {
            let actions = scope.spawn(|| self.prepare_actions());
            let managed_policies = self.prepare_managed_policies();
            match actions.join() {
                Ok(actions) => (actions, managed_policies),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        });
        let (actions, managed_policies) = (actions?, managed_policies?);

        let artifacts: Vec<Artifact> = actions
            .artifacts
            .into_iter()
            .chain(managed_policies.artifacts)
            .collect();
        emitter::commit(&artifacts)?;

        Ok(RunReport {
            actions: actions.report,
            managed_policies: managed_policies.report,
        })
    }
}
