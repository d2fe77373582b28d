//! @acp:module "Release Metadata"
//! @acp:summary "Release metadata document model and loading"
//! @acp:domain cli
//! @acp:layer io
//!
//! The release metadata file describes every artifact in a Galasa release,
//! split into four groups. Each bundle record carries flags saying which
//! manifests it belongs in:
//!
//! ```yaml
//! release:
//!   version: 0.31.0
//! framework:
//!   bundles:
//!     - artifact: dev.galasa.framework
//!       version: 0.31.0
//!       obr: true
//!       bom: true
//!       javadoc: true
//! ```

mod lenient;

use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::{BuildError, Result};

/// Namespace used for bundles that don't declare a `group`
pub const DEFAULT_GROUP_ID: &str = "dev.galasa";

/// @acp:summary "Root of the release metadata document"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseMetadata {
    #[serde(default)]
    pub release: ReleaseInfo,
    #[serde(default)]
    pub framework: ArtifactGroup,
    #[serde(default)]
    pub api: ArtifactGroup,
    #[serde(default)]
    pub managers: ArtifactGroup,
    #[serde(default)]
    pub external: ArtifactGroup,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    #[serde(default, deserialize_with = "lenient::string")]
    pub version: String,
}

/// The four artifact groups of a release, in manifest order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Framework,
    Api,
    Managers,
    External,
}

impl GroupKind {
    /// Groups in the order their artifacts appear in the render model
    pub fn all() -> &'static [GroupKind] {
        &[
            GroupKind::Framework,
            GroupKind::Api,
            GroupKind::Managers,
            GroupKind::External,
        ]
    }

    /// Key of this group in the metadata document
    pub fn key(&self) -> &'static str {
        match self {
            GroupKind::Framework => "framework",
            GroupKind::Api => "api",
            GroupKind::Managers => "managers",
            GroupKind::External => "external",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// @acp:summary "Ordered bundle records of one group"
///
/// Accepts the `{ bundles: [...] }` layout of release.yaml as well as a bare
/// sequence. A missing or null group is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArtifactGroup {
    pub bundles: Vec<BundleEntry>,
}

impl ArtifactGroup {
    pub fn new(bundles: Vec<BundleEntry>) -> Self {
        Self { bundles }
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }
}

impl<'de> Deserialize<'de> for ArtifactGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct GroupVisitor;

        impl<'de> Visitor<'de> for GroupVisitor {
            type Value = ArtifactGroup;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map with a `bundles` list, or a list of bundles")
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(ArtifactGroup::default())
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(ArtifactGroup::default())
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut bundles = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(bundle) = seq.next_element::<BundleEntry>()? {
                    bundles.push(bundle);
                }
                Ok(ArtifactGroup { bundles })
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut bundles: Option<Vec<BundleEntry>> = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key == "bundles" {
                        if bundles.is_some() {
                            return Err(de::Error::duplicate_field("bundles"));
                        }
                        let list = map.next_value::<Option<Vec<BundleEntry>>>()?;
                        bundles = Some(list.unwrap_or_default());
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(ArtifactGroup {
                    bundles: bundles.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(GroupVisitor)
    }
}

/// @acp:summary "One artifact record with its per-manifest inclusion flags"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleEntry {
    /// Maven group; empty or absent means [`DEFAULT_GROUP_ID`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub artifact: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub version: String,
    #[serde(default, rename = "type", deserialize_with = "lenient::string")]
    pub artifact_type: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub obr: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub bom: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub mvp: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub isolated: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub javadoc: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub managerdoc: bool,
}

impl BundleEntry {
    pub fn new(artifact: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            artifact: artifact.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// The bundle's group, falling back to [`DEFAULT_GROUP_ID`]
    pub fn group_id(&self) -> &str {
        match self.group.as_deref() {
            Some(group) if !group.is_empty() => group,
            _ => DEFAULT_GROUP_ID,
        }
    }
}

impl ReleaseMetadata {
    /// @acp:summary "Load release metadata, decoding JSON or YAML by extension"
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let metadata = if is_json {
            Self::from_json_str(&content).map_err(|source| BuildError::MetadataJson {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::from_yaml_str(&content).map_err(|source| BuildError::MetadataYaml {
                path: path.to_path_buf(),
                source,
            })?
        };

        tracing::debug!(
            "Loaded release {} from {:?}: {} framework, {} api, {} managers, {} external",
            metadata.release.version,
            path,
            metadata.framework.len(),
            metadata.api.len(),
            metadata.managers.len(),
            metadata.external.len()
        );

        Ok(metadata)
    }

    pub fn from_yaml_str(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document decodes to null rather than an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn from_json_str(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn group(&self, kind: GroupKind) -> &ArtifactGroup {
        match kind {
            GroupKind::Framework => &self.framework,
            GroupKind::Api => &self.api,
            GroupKind::Managers => &self.managers,
            GroupKind::External => &self.external,
        }
    }
}
