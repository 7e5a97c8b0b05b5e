//! The per-model generation loop.
//!
//! Every model input is handled on its own: a failed scan or a failed emit is
//! recorded as a [`Diagnostic`] and the loop moves on. Nothing here aborts a
//! run.

use derive_more::Display;
use log::{debug, info, warn};

use crate::{
    config::GeneratorConfig,
    emit::ArtifactEmitter,
    error::ScanError,
    generate::{Artifact, build_descriptor, build_mapper},
    model::ModelDefinition,
    render::SourceUnit,
    scan::validate,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DiagnosticKind {
    #[display("scan")]
    Scan,
    #[display("emit")]
    Emit,
}

/// A problem with one input or one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("[{kind}] {subject}: {message}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Model input (`input #2`) or qualified artifact name.
    pub subject: String,
    pub message: String,
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Models that scanned successfully.
    pub models: Vec<String>,
    /// Qualified names of the artifacts that reached the emitter successfully.
    pub emitted: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    fn scan_failed(&mut self, index: usize, error: &ScanError) {
        warn!("Skipping model input #{index}: {error}");
        self.diagnostics.push(Diagnostic {
            kind: DiagnosticKind::Scan,
            subject: format!("input #{index}"),
            message: error.to_string(),
        });
    }
}

/// Turns model definitions into source units and hands them to an emitter.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Render the enabled artifacts for one model, descriptor first.
    ///
    /// The model is expected to be valid; see [`validate`].
    pub fn generate(&self, model: &ModelDefinition) -> Vec<SourceUnit> {
        let mut units = Vec::with_capacity(2);
        if self.config.generate_descriptor {
            units.push(build_descriptor(model, &self.config).render(&self.config));
        }
        if self.config.generate_mapper {
            units.push(build_mapper(model, &self.config).render(&self.config));
        }
        units
    }

    /// Run every input through scan results, generation and emission.
    pub fn run<I, E>(&self, inputs: I, emitter: &mut E) -> GenerationReport
    where
        I: IntoIterator<Item = Result<ModelDefinition, ScanError>>,
        E: ArtifactEmitter + ?Sized,
    {
        let mut report = GenerationReport::default();

        for (index, input) in inputs.into_iter().enumerate() {
            let model = match input.and_then(|model| validate(&model).map(|()| model)) {
                Ok(model) => model,
                Err(error) => {
                    report.scan_failed(index, &error);
                    continue;
                }
            };
            debug!(
                "Generating {} ({} fields, table `{}`)",
                model.qualified_entity(),
                model.fields.len(),
                model.table_name()
            );
            report.models.push(model.qualified_entity());

            for unit in self.generate(&model) {
                match emitter.emit(&unit) {
                    Ok(()) => {
                        debug!("Emitted {unit}");
                        report.emitted.push(unit.to_string());
                    }
                    Err(error) => {
                        warn!("{error}");
                        report.diagnostics.push(Diagnostic {
                            kind: DiagnosticKind::Emit,
                            subject: unit.to_string(),
                            message: error.to_string(),
                        });
                    }
                }
            }
        }

        info!(
            "Generated {} artifacts for {} models ({} diagnostics)",
            report.emitted.len(),
            report.models.len(),
            report.diagnostics.len()
        );
        report
    }
}

/// Run with a one-off [`Generator`].
pub fn run<I, E>(inputs: I, config: &GeneratorConfig, emitter: &mut E) -> GenerationReport
where
    I: IntoIterator<Item = Result<ModelDefinition, ScanError>>,
    E: ArtifactEmitter + ?Sized,
{
    Generator::new(config.clone()).run(inputs, emitter)
}
