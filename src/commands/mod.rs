//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Each command is in its own submodule.

pub mod template;

pub use template::{execute_template, render_manifest, GeneratedManifest, TemplateOptions};
