//! Template command integration tests
//!
//! Drives the full pipeline against metadata and templates on disk.

use std::fs;
use std::path::{Path, PathBuf};

use galasabld::commands::{execute_template, render_manifest, TemplateOptions};
use galasabld::{BuildError, ModeFlags, SelectionMode};
use tempfile::TempDir;

const RELEASE_YAML: &str = r#"
release:
  version: 0.31.0
framework:
  bundles:
    - artifact: dev.galasa.framework
      version: 0.31.0
      bom: true
      javadoc: true
    - artifact: dev.galasa.framework.internal
      version: 0.31.0
api:
  bundles:
    - artifact: dev.galasa.api
      version: 0.31.0
      mvp: true
      managerdoc: true
managers:
  bundles:
    - artifact: dev.galasa.zos.manager
      version: 0.31.0
    - artifact: dev.galasa.docker.manager
      version: 0.30.0
      mvp: true
external:
  bundles:
    - group: org.apache.felix
      artifact: org.apache.felix.scr
      version: 2.1.14
      type: jar
      obr: false
      bom: true
      isolated: true
      javadoc: true
    - group: com.google.code.gson
      artifact: gson
      version: 2.8.5
      obr: true
"#;

const COORDS: &str = "{{#each Artifacts}}{{GroupId}}:{{ArtifactId}}:{{Version}}\n{{/each}}";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(metadata: &str, template: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("release.yaml"), metadata).unwrap();
        fs::write(dir.path().join("manifest.hbs"), template).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn output(&self) -> PathBuf {
        self.path("out.txt")
    }

    fn options(&self, modes: &[SelectionMode]) -> TemplateOptions {
        TemplateOptions {
            template: Some(self.path("manifest.hbs")),
            release_metadata: Some(self.path("release.yaml")),
            output: Some(self.output()),
            modes: ModeFlags::of(modes),
        }
    }

    fn run(&self, mode: SelectionMode) -> String {
        execute_template(self.options(&[mode])).unwrap();
        fs::read_to_string(self.output()).unwrap()
    }
}

fn build_error(err: &anyhow::Error) -> &BuildError {
    err.downcast_ref::<BuildError>()
        .unwrap_or_else(|| panic!("not a BuildError: {:?}", err))
}

fn assert_no_file(path: &Path) {
    assert!(!path.exists(), "{} should not exist", path.display());
}

// =============================================================================
// Selection per artifact type
// =============================================================================

mod selection_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_obr() {
        let fx = Fixture::new(RELEASE_YAML, COORDS);
        assert_eq!(
            fx.run(SelectionMode::Obr),
            "dev.galasa:dev.galasa.framework:0.31.0\n\
             dev.galasa:dev.galasa.framework.internal:0.31.0\n\
             dev.galasa:dev.galasa.api:0.31.0\n\
             dev.galasa:dev.galasa.zos.manager:0.31.0\n\
             dev.galasa:dev.galasa.docker.manager:0.30.0\n\
             com.google.code.gson:gson:2.8.5\n"
        );
    }

    #[test]
    fn test_bom() {
        let fx = Fixture::new(RELEASE_YAML, COORDS);
        assert_eq!(
            fx.run(SelectionMode::Bom),
            "dev.galasa:dev.galasa.framework:0.31.0\n\
             dev.galasa:dev.galasa.zos.manager:0.31.0\n\
             dev.galasa:dev.galasa.docker.manager:0.30.0\n\
             org.apache.felix:org.apache.felix.scr:2.1.14\n"
        );
    }

    #[test]
    fn test_mvp() {
        let fx = Fixture::new(RELEASE_YAML, COORDS);
        assert_eq!(
            fx.run(SelectionMode::Mvp),
            "dev.galasa:dev.galasa.api:0.31.0\n\
             dev.galasa:dev.galasa.docker.manager:0.30.0\n"
        );
    }

    #[test]
    fn test_isolated() {
        let fx = Fixture::new(RELEASE_YAML, COORDS);
        assert_eq!(
            fx.run(SelectionMode::Isolated),
            "dev.galasa:dev.galasa.framework:0.31.0\n\
             dev.galasa:dev.galasa.framework.internal:0.31.0\n\
             dev.galasa:dev.galasa.api:0.31.0\n\
             dev.galasa:dev.galasa.zos.manager:0.31.0\n\
             dev.galasa:dev.galasa.docker.manager:0.30.0\n\
             org.apache.felix:org.apache.felix.scr:2.1.14\n"
        );
    }

    #[test]
    fn test_javadoc_never_includes_external() {
        let fx = Fixture::new(RELEASE_YAML, COORDS);
        assert_eq!(
            fx.run(SelectionMode::Javadoc),
            "dev.galasa:dev.galasa.framework:0.31.0\n\
             dev.galasa:dev.galasa.zos.manager:0.31.0\n\
             dev.galasa:dev.galasa.docker.manager:0.30.0\n"
        );
    }

    #[test]
    fn test_managerdoc() {
        let fx = Fixture::new(RELEASE_YAML, COORDS);
        assert_eq!(
            fx.run(SelectionMode::Managerdoc),
            "dev.galasa:dev.galasa.api:0.31.0\n\
             dev.galasa:dev.galasa.zos.manager:0.31.0\n\
             dev.galasa:dev.galasa.docker.manager:0.30.0\n"
        );
    }

    #[test]
    fn test_external_obr_false_is_excluded() {
        let yaml = "release:\n  version: '1'\nexternal:\n  bundles:\n    - artifact: x\n      version: '1'\n      obr: false\n      bom: true\n      mvp: true\n      isolated: true\n";
        let fx = Fixture::new(yaml, "[{{#each Artifacts}}{{ArtifactId}}{{/each}}]");
        assert_eq!(fx.run(SelectionMode::Obr), "[]");
    }
}

// =============================================================================
// Rendering
// =============================================================================

mod render_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reference_scenario() {
        let yaml = "release:\n  version: 0.31.0\nframework:\n  bundles:\n    - artifact: a\n      version: 1.0\n      bom: true\n";
        let fx = Fixture::new(
            yaml,
            "{{Release}}: {{#each Artifacts}}{{GroupId}}:{{ArtifactId}}:{{Version}} {{/each}}",
        );
        assert_eq!(fx.run(SelectionMode::Bom), "0.31.0: dev.galasa:a:1.0 ");
    }

    #[test]
    fn test_xml_bom_template() {
        let template = r#"<project>
  <version>{{Release}}</version>
{{#each Artifacts}}  <dependency>
    <groupId>{{GroupId}}</groupId>
    <artifactId>{{ArtifactId}}</artifactId>
    <version>{{Version}}</version>
{{#if Type}}    <type>{{Type}}</type>
{{/if}}  </dependency>
{{/each}}</project>
"#;
        let yaml = "release:\n  version: 2.0.0\nexternal:\n  bundles:\n    - group: g\n      artifact: lib\n      version: '3'\n      type: jar\n      bom: true\n";
        let fx = Fixture::new(yaml, template);
        assert_eq!(
            fx.run(SelectionMode::Bom),
            "<project>\n  <version>2.0.0</version>\n  <dependency>\n    <groupId>g</groupId>\n    <artifactId>lib</artifactId>\n    <version>3</version>\n    <type>jar</type>\n  </dependency>\n</project>\n"
        );
    }

    #[test]
    fn test_unquoted_versions_render_as_written() {
        let yaml = "release:\n  version: 0.30\nframework:\n  bundles:\n    - artifact: a\n      version: 1.10\n      bom: yes\n";
        let fx = Fixture::new(yaml, "{{Release}} {{#each Artifacts}}{{Version}}{{/each}}");
        assert_eq!(fx.run(SelectionMode::Bom), "0.30 1.10");
    }

    #[test]
    fn test_output_is_idempotent() {
        let fx = Fixture::new(RELEASE_YAML, COORDS);
        let first = fx.run(SelectionMode::Obr);
        let second = fx.run(SelectionMode::Obr);
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_metadata() {
        let fx = Fixture::new("", "{{Release}}|{{#each Artifacts}}{{ArtifactId}}{{/each}}");
        fs::write(
            fx.path("release.json"),
            r#"{"release":{"version":"9"},"managers":{"bundles":[{"artifact":"m","version":"1"}]}}"#,
        )
        .unwrap();

        let mut options = fx.options(&[SelectionMode::Bom]);
        options.release_metadata = Some(fx.path("release.json"));
        let manifest = render_manifest(&options).unwrap();
        assert_eq!(manifest.document, "9|m");
        assert_eq!(manifest.model.artifacts.len(), 1);
    }

    #[test]
    fn test_missing_output_still_renders() {
        let fx = Fixture::new(RELEASE_YAML, "{{Release}}");
        let mut options = fx.options(&[SelectionMode::Mvp]);
        options.output = None;
        let manifest = render_manifest(&options).unwrap();
        assert_eq!(manifest.document, "0.31.0");
        assert_no_file(&fx.output());
    }
}

// =============================================================================
// Failures
// =============================================================================

mod failure_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_artifact_type() {
        let fx = Fixture::new(RELEASE_YAML, COORDS);
        let err = execute_template(fx.options(&[])).unwrap_err();
        assert!(matches!(build_error(&err), BuildError::NoArtifactType));
        assert_no_file(&fx.output());
    }

    #[test]
    fn test_multiple_artifact_types() {
        let fx = Fixture::new(RELEASE_YAML, COORDS);
        let err =
            execute_template(fx.options(&[SelectionMode::Obr, SelectionMode::Bom])).unwrap_err();
        assert!(matches!(
            build_error(&err),
            BuildError::AmbiguousArtifactType(_)
        ));
        assert!(build_error(&err).is_configuration());
        assert_no_file(&fx.output());
    }

    #[test]
    fn test_missing_metadata_argument() {
        let fx = Fixture::new(RELEASE_YAML, COORDS);
        let mut options = fx.options(&[SelectionMode::Bom]);
        options.release_metadata = None;
        let err = execute_template(options).unwrap_err();
        assert!(matches!(
            build_error(&err),
            BuildError::MissingArgument("Release metadata file")
        ));
        assert_no_file(&fx.output());
    }

    #[test]
    fn test_missing_template_argument() {
        let fx = Fixture::new(RELEASE_YAML, COORDS);
        let mut options = fx.options(&[SelectionMode::Bom]);
        options.template = None;
        let err = execute_template(options).unwrap_err();
        assert!(build_error(&err).is_configuration());
    }

    #[test]
    fn test_undefined_field_writes_nothing() {
        let fx = Fixture::new(RELEASE_YAML, "{{#each Artifacts}}{{Classifier}}{{/each}}");
        let err = execute_template(fx.options(&[SelectionMode::Obr])).unwrap_err();
        assert!(matches!(build_error(&err), BuildError::TemplateRender(_)));
        assert_no_file(&fx.output());
    }

    #[test]
    fn test_template_syntax_error() {
        let fx = Fixture::new(RELEASE_YAML, "{{#each Artifacts}}{{ArtifactId}}");
        let err = execute_template(fx.options(&[SelectionMode::Obr])).unwrap_err();
        assert!(matches!(build_error(&err), BuildError::TemplateSyntax(_)));
        assert_no_file(&fx.output());
    }

    #[test]
    fn test_unreadable_metadata() {
        let fx = Fixture::new(RELEASE_YAML, COORDS);
        let mut options = fx.options(&[SelectionMode::Obr]);
        options.release_metadata = Some(fx.path("missing.yaml"));
        let err = execute_template(options).unwrap_err();
        assert!(matches!(build_error(&err), BuildError::Io { .. }));
        assert_no_file(&fx.output());
    }

    #[test]
    fn test_malformed_metadata() {
        let fx = Fixture::new("framework:\n  bundles:\n    - version: 1\n", COORDS);
        let err = execute_template(fx.options(&[SelectionMode::Obr])).unwrap_err();
        assert!(matches!(build_error(&err), BuildError::MetadataYaml { .. }));
        assert_no_file(&fx.output());
    }

    #[test]
    fn test_unwritable_output() {
        let fx = Fixture::new(RELEASE_YAML, COORDS);
        let mut options = fx.options(&[SelectionMode::Obr]);
        options.output = Some(fx.path("no-such-dir").join("out.txt"));
        let err = execute_template(options).unwrap_err();
        assert!(matches!(build_error(&err), BuildError::Io { .. }));
    }
}
