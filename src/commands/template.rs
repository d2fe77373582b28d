//! @acp:module "Template Command"
//! @acp:summary "Render a release manifest from metadata and a template"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `galasabld template`. The pipeline is linear: validate
//! arguments, load metadata, resolve the artifact type, filter, compile the
//! template, render, write. Rendering finishes in memory before the output
//! file is touched, so a failed run leaves no output behind.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;

use crate::error::BuildError;
use crate::filter::resolve_artifacts;
use crate::metadata::ReleaseMetadata;
use crate::render::{RenderModel, TemplateRenderer};
use crate::selection::ModeFlags;

/// Options for the template command
#[derive(Debug, Clone, Default)]
pub struct TemplateOptions {
    /// Template source file
    pub template: Option<PathBuf>,
    /// Release metadata file
    pub release_metadata: Option<PathBuf>,
    /// Destination file; standard output when absent
    pub output: Option<PathBuf>,
    /// Artifact type flags
    pub modes: ModeFlags,
}

/// A rendered manifest, not yet written anywhere
#[derive(Debug, Clone)]
pub struct GeneratedManifest {
    pub model: RenderModel,
    pub document: String,
}

/// Where progress lines go. They move to stderr when stdout carries the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Progress {
    Stdout,
    Stderr,
    Silent,
}

impl Progress {
    fn line(&self, message: impl Display) {
        match self {
            Progress::Stdout => println!("{}", message),
            Progress::Stderr => eprintln!("{}", message),
            Progress::Silent => {}
        }
    }
}

/// Execute the template command
pub fn execute_template(options: TemplateOptions) -> Result<()> {
    let progress = if options.output.is_some() {
        Progress::Stdout
    } else {
        Progress::Stderr
    };
    progress.line(style("Galasa Build - Template").bold());

    let (metadata_path, template_path) = required_paths(&options)?;
    if options.output.is_none() {
        tracing::warn!("No output file given; writing manifest to standard output");
        progress.line(format!(
            "{} Output file has not been provided, writing to standard output",
            style("!").yellow()
        ));
    }

    let manifest = generate(metadata_path, template_path, &options.modes, progress)?;

    match &options.output {
        Some(path) => {
            write_output(path, &manifest.document)?;
            progress.line(format!(
                "{} Wrote {} artifacts to {}",
                style("✓").green(),
                manifest.model.artifacts.len(),
                path.display()
            ));
        }
        None => {
            print!("{}", manifest.document);
        }
    }

    Ok(())
}

/// Run the pipeline up to and including rendering.
fn generate(
    metadata_path: &Path,
    template_path: &Path,
    modes: &ModeFlags,
    progress: Progress,
) -> Result<GeneratedManifest> {
    let metadata = ReleaseMetadata::load(metadata_path)?;

    for mode in modes.requested() {
        progress.line(format!("{} artifact type requested", mode.name()));
    }
    let mode = modes.resolve()?;

    let model = resolve_artifacts(&metadata, mode, |group, artifact| {
        progress.line(format!(
            "    Added {} artifact {}",
            group,
            artifact.coordinates()
        ));
    });

    let renderer = TemplateRenderer::load(template_path)?;
    let document = renderer
        .render(&model)
        .with_context(|| format!("Failed to render template {}", template_path.display()))?;

    Ok(GeneratedManifest { model, document })
}

/// Render without printing progress or writing anything
pub fn render_manifest(options: &TemplateOptions) -> Result<GeneratedManifest> {
    let (metadata_path, template_path) = required_paths(options)?;
    generate(metadata_path, template_path, &options.modes, Progress::Silent)
}

fn required_paths(options: &TemplateOptions) -> Result<(&Path, &Path), BuildError> {
    let metadata = options
        .release_metadata
        .as_deref()
        .ok_or(BuildError::MissingArgument("Release metadata file"))?;
    let template = options
        .template
        .as_deref()
        .ok_or(BuildError::MissingArgument("Template file"))?;
    Ok((metadata, template))
}

fn write_output(path: &Path, document: &str) -> Result<()> {
    std::fs::write(path, document).map_err(|e| BuildError::io(path, e))?;
    tracing::debug!("Wrote {} bytes to {:?}", document.len(), path);
    Ok(())
}
