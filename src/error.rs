//! @acp:module "Errors"
//! @acp:summary "Error taxonomy for release manifest generation"
//! @acp:domain cli
//! @acp:layer model

use std::path::PathBuf;

use thiserror::Error;

use crate::selection::SelectionMode;

/// @acp:summary "Every failure the generator can report; all of them are fatal"
#[derive(Debug, Error)]
pub enum BuildError {
    /// A required path option was not supplied
    #[error("{0} has not been provided")]
    MissingArgument(&'static str),

    /// None of the artifact type flags were set
    #[error("Artifact type has not been provided")]
    NoArtifactType,

    /// More than one artifact type flag was set
    #[error("Too many artifact types have been requested: {}", join_modes(.0))]
    AmbiguousArtifactType(Vec<SelectionMode>),

    #[error("Failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid release metadata in {}", .path.display())]
    MetadataYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid release metadata in {}", .path.display())]
    MetadataJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The template could not be parsed
    #[error("Template syntax error")]
    TemplateSyntax(#[source] Box<handlebars::TemplateError>),

    /// The template referenced something the render model does not have
    #[error("Template render error")]
    TemplateRender(#[source] Box<handlebars::RenderError>),
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by the command line rather than by file content
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            BuildError::MissingArgument(_)
                | BuildError::NoArtifactType
                | BuildError::AmbiguousArtifactType(_)
        )
    }
}

impl From<handlebars::TemplateError> for BuildError {
    fn from(err: handlebars::TemplateError) -> Self {
        BuildError::TemplateSyntax(Box::new(err))
    }
}

impl From<handlebars::RenderError> for BuildError {
    fn from(err: handlebars::RenderError) -> Self {
        BuildError::TemplateRender(Box::new(err))
    }
}

fn join_modes(modes: &[SelectionMode]) -> String {
    modes
        .iter()
        .map(|m| m.flag())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, BuildError>;
