//! @acp:module "Manifest Renderer"
//! @acp:summary "Handlebars rendering of the resolved artifact list"
//! @acp:domain cli
//! @acp:layer output
//!
//! Templates see the model with the field names below:
//!
//! ```handlebars
//! {{Release}}
//! {{#each Artifacts}}{{GroupId}}:{{ArtifactId}}:{{Version}}:{{Type}}
//! {{/each}}
//! ```
//!
//! Strict mode is on, so a reference to a field that does not exist fails
//! the render instead of producing an empty string. HTML escaping is off;
//! manifests are XML and text, and the template author controls quoting.

use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{BuildError, Result};
use crate::metadata::BundleEntry;

const TEMPLATE_NAME: &str = "manifest";

/// Data handed to the template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RenderModel {
    pub release: String,
    pub artifacts: Vec<ResolvedArtifact>,
}

impl RenderModel {
    pub fn new(release: impl Into<String>) -> Self {
        Self {
            release: release.into(),
            artifacts: Vec::new(),
        }
    }
}

/// One selected artifact with its group resolved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResolvedArtifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(rename = "Type")]
    pub artifact_type: String,
}

impl ResolvedArtifact {
    pub fn from_bundle(bundle: &BundleEntry) -> Self {
        Self {
            group_id: bundle.group_id().to_string(),
            artifact_id: bundle.artifact.clone(),
            version: bundle.version.clone(),
            artifact_type: bundle.artifact_type.clone(),
        }
    }

    /// `group:artifact:version`, as printed in progress output
    pub fn coordinates(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// @acp:summary "Compiled manifest template"
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRenderer").finish_non_exhaustive()
    }
}

impl TemplateRenderer {
    /// Compile template source; syntax errors surface here
    pub fn from_source(source: &str) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_template_string(TEMPLATE_NAME, source)?;
        Ok(Self { registry })
    }

    /// Read and compile a template file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;
        tracing::debug!("Compiling template {:?} ({} bytes)", path, source.len());
        Self::from_source(&source)
    }

    pub fn render(&self, model: &RenderModel) -> Result<String> {
        Ok(self.registry.render(TEMPLATE_NAME, model)?)
    }
}
