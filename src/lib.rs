#![forbid(unsafe_code)]

//! @acp:module "galasabld Library"
//! @acp:summary "Release manifest generation from Galasa release metadata"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # galasabld
//!
//! Build utilities for the Galasa release. The `template` pipeline reads the
//! release metadata, keeps the bundles that belong in one kind of manifest
//! (OBR, BOM, MVP zip, isolated zip, javadoc, manager docs) and renders them
//! through a Handlebars template.
//!
//! ## Example
//!
//! ```rust,no_run
//! use galasabld::{resolve_artifacts, ReleaseMetadata, SelectionMode, TemplateRenderer};
//!
//! fn main() -> anyhow::Result<()> {
//!     let metadata = ReleaseMetadata::load("release.yaml")?;
//!     let model = resolve_artifacts(&metadata, SelectionMode::Bom, |_, _| {});
//!
//!     let renderer = TemplateRenderer::load("bom.hbs")?;
//!     std::fs::write("pom.xml", renderer.render(&model)?)?;
//!
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod error;
pub mod filter;
pub mod logging;
pub mod metadata;
pub mod render;
pub mod selection;

// Re-exports
pub use commands::{execute_template, render_manifest, GeneratedManifest, TemplateOptions};
pub use error::{BuildError, Result};
pub use filter::{inclusion, resolve_artifacts, Inclusion};
pub use metadata::{
    ArtifactGroup, BundleEntry, GroupKind, ReleaseInfo, ReleaseMetadata, DEFAULT_GROUP_ID,
};
pub use render::{RenderModel, ResolvedArtifact, TemplateRenderer};
pub use selection::{ModeFlags, SelectionMode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
