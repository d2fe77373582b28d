//! @acp:module "Artifact Type Selection"
//! @acp:summary "Single artifact type mode chosen from mutually exclusive flags"
//! @acp:domain cli
//! @acp:layer model

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, Result};

/// The kind of manifest being generated. Exactly one is active per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Obr,
    Bom,
    Mvp,
    Isolated,
    Javadoc,
    Managerdoc,
}

impl SelectionMode {
    /// All modes, in command-line flag order
    pub fn all() -> &'static [SelectionMode] {
        &[
            SelectionMode::Obr,
            SelectionMode::Bom,
            SelectionMode::Mvp,
            SelectionMode::Isolated,
            SelectionMode::Javadoc,
            SelectionMode::Managerdoc,
        ]
    }

    /// Command-line flag name (without the leading dashes)
    pub fn flag(&self) -> &'static str {
        match self {
            SelectionMode::Obr => "obr",
            SelectionMode::Bom => "bom",
            SelectionMode::Mvp => "mvp",
            SelectionMode::Isolated => "isolated",
            SelectionMode::Javadoc => "javadoc",
            SelectionMode::Managerdoc => "managerdoc",
        }
    }

    /// Human-readable name used in progress output
    pub fn name(&self) -> &'static str {
        match self {
            SelectionMode::Obr => "OBR",
            SelectionMode::Bom => "BOM",
            SelectionMode::Mvp => "MVP",
            SelectionMode::Isolated => "Isolated",
            SelectionMode::Javadoc => "Javadoc",
            SelectionMode::Managerdoc => "Manager Docs",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flag())
    }
}

impl std::str::FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SelectionMode::all()
            .iter()
            .copied()
            .find(|m| m.flag().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown artifact type: {}", s))
    }
}

/// Raw state of the six artifact type flags as given on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeFlags {
    pub obr: bool,
    pub bom: bool,
    pub mvp: bool,
    pub isolated: bool,
    pub javadoc: bool,
    pub managerdoc: bool,
}

impl ModeFlags {
    /// Flags set for exactly the given modes
    pub fn of(modes: &[SelectionMode]) -> Self {
        let mut flags = ModeFlags::default();
        for mode in modes {
            *flags.slot(*mode) = true;
        }
        flags
    }

    fn slot(&mut self, mode: SelectionMode) -> &mut bool {
        match mode {
            SelectionMode::Obr => &mut self.obr,
            SelectionMode::Bom => &mut self.bom,
            SelectionMode::Mvp => &mut self.mvp,
            SelectionMode::Isolated => &mut self.isolated,
            SelectionMode::Javadoc => &mut self.javadoc,
            SelectionMode::Managerdoc => &mut self.managerdoc,
        }
    }

    pub fn is_set(&self, mode: SelectionMode) -> bool {
        match mode {
            SelectionMode::Obr => self.obr,
            SelectionMode::Bom => self.bom,
            SelectionMode::Mvp => self.mvp,
            SelectionMode::Isolated => self.isolated,
            SelectionMode::Javadoc => self.javadoc,
            SelectionMode::Managerdoc => self.managerdoc,
        }
    }

    /// Every mode whose flag is set, in flag order
    pub fn requested(&self) -> Vec<SelectionMode> {
        SelectionMode::all()
            .iter()
            .copied()
            .filter(|m| self.is_set(*m))
            .collect()
    }

    /// Resolve the flags to the single selected mode
    pub fn resolve(&self) -> Result<SelectionMode> {
        let requested = self.requested();
        match requested.len() {
            0 => Err(BuildError::NoArtifactType),
            1 => Ok(requested[0]),
            _ => Err(BuildError::AmbiguousArtifactType(requested)),
        }
    }
}
