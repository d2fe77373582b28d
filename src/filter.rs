//! @acp:module "Artifact Filter"
//! @acp:summary "Select bundles for the requested manifest type"
//! @acp:domain cli
//! @acp:layer service
//!
//! Each metadata group has its own rule for each artifact type. The rules
//! live in one table, [`inclusion`], so the groups cannot drift apart.

use crate::metadata::{BundleEntry, GroupKind, ReleaseMetadata};
use crate::render::{RenderModel, ResolvedArtifact};
use crate::selection::SelectionMode;

/// How a group decides membership for one artifact type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    /// Every bundle in the group is included
    Always,
    /// Included when the bundle's flag for the mode is set
    Flagged,
    /// No bundle in the group is included
    Never,
}

impl Inclusion {
    pub fn admits(self, bundle: &BundleEntry, mode: SelectionMode) -> bool {
        match self {
            Inclusion::Always => true,
            Inclusion::Never => false,
            Inclusion::Flagged => flag(bundle, mode),
        }
    }
}

/// @acp:summary "The (group, artifact type) inclusion table"
pub fn inclusion(group: GroupKind, mode: SelectionMode) -> Inclusion {
    use GroupKind::*;
    use SelectionMode::*;

    match (group, mode) {
        // framework and api bundles always ship in the OBR and isolated zip
        (Framework | Api, Obr | Isolated) => Inclusion::Always,
        (Framework | Api, Bom | Mvp | Javadoc | Managerdoc) => Inclusion::Flagged,

        (Managers, Mvp) => Inclusion::Flagged,
        (Managers, Obr | Bom | Isolated | Javadoc | Managerdoc) => Inclusion::Always,

        (External, Obr | Bom | Mvp | Isolated) => Inclusion::Flagged,
        (External, Javadoc | Managerdoc) => Inclusion::Never,
    }
}

fn flag(bundle: &BundleEntry, mode: SelectionMode) -> bool {
    match mode {
        SelectionMode::Obr => bundle.obr,
        SelectionMode::Bom => bundle.bom,
        SelectionMode::Mvp => bundle.mvp,
        SelectionMode::Isolated => bundle.isolated,
        SelectionMode::Javadoc => bundle.javadoc,
        SelectionMode::Managerdoc => bundle.managerdoc,
    }
}

/// Build the render model for `mode`.
///
/// Groups are visited framework, api, managers, external; bundles keep their
/// document order. `on_added` is called once per included artifact.
pub fn resolve_artifacts<F>(
    metadata: &ReleaseMetadata,
    mode: SelectionMode,
    mut on_added: F,
) -> RenderModel
where
    F: FnMut(GroupKind, &ResolvedArtifact),
{
    let mut model = RenderModel::new(metadata.release.version.clone());

    for &group in GroupKind::all() {
        let rule = inclusion(group, mode);
        for bundle in &metadata.group(group).bundles {
            if !rule.admits(bundle, mode) {
                tracing::debug!("Skipped {} bundle {} for {}", group, bundle.artifact, mode);
                continue;
            }

            let artifact = ResolvedArtifact::from_bundle(bundle);
            on_added(group, &artifact);
            model.artifacts.push(artifact);
        }
    }

    model
}
