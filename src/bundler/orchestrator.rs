//! Bundle orchestration
//!
//! For one unit kind: discover manifests, validate them, render every
//! requested template variant, write the artifacts and refresh the docs.
//! Every failure is scoped to its unit; the run always continues with the
//! next manifest and ends with a summary.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::docs::{self, DocRenderer};
use crate::error::{UnitIssue, unit};
use crate::manifest::{self, Manifest, UnitKind, discovery, validation};
use crate::path_utils;
use crate::project;
use crate::ui::Reporter;

use super::filter::CommentFilter;
use super::header::BundleHeader;
use super::loader::{UnitLoader, UnitStatus};
use super::template;
use super::wrap::RenderContext;
use super::writer::{self, PendingWrite};

/// Requesting this template name renders every template of a manifest
pub const ALL_TEMPLATES: &str = "*";

/// Counts for one or more unit kinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub found: usize,
    pub updated: usize,
    pub failed: usize,
}

impl BuildReport {
    pub fn merge(&mut self, other: BuildReport) {
        self.found += other.found;
        self.updated += other.updated;
        self.failed += other.failed;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitResult {
    Skipped,
    Updated,
    Failed,
}

/// Everything one variant needs written, plus what it found
#[derive(Debug)]
struct RenderedVariant {
    writes: Vec<PendingWrite>,
    status: UnitStatus,
    files: Vec<PathBuf>,
    notices: Vec<UnitIssue>,
}

/// Drives bundling for the units below one root directory
pub struct Orchestrator<'a> {
    root: PathBuf,
    repository: Option<String>,
    renderer: Option<&'a dyn DocRenderer>,
    reporter: &'a mut dyn Reporter,
    now: DateTime<Utc>,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator; `renderer` of `None` disables doc generation
    pub fn new(
        root: &Path,
        renderer: Option<&'a dyn DocRenderer>,
        reporter: &'a mut dyn Reporter,
    ) -> Self {
        Self {
            root: root.to_path_buf(),
            repository: project::repository_url(root),
            renderer,
            reporter,
            now: Utc::now(),
        }
    }

    /// Use a fixed build time for headers
    #[cfg(test)]
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Process every manifest of `kind`, optionally filtered by unit name
    pub fn build_kind(
        &mut self,
        kind: UnitKind,
        name: Option<&str>,
        template: Option<&str>,
    ) -> BuildReport {
        self.reporter.searching(kind);

        let manifests = discovery::discover_manifests(&self.root, kind.manifest_file_name());
        let mut report = BuildReport {
            found: manifests.len(),
            ..BuildReport::default()
        };

        for path in &manifests {
            match self.process_manifest(kind, path, name, template) {
                UnitResult::Skipped => {}
                UnitResult::Updated => report.updated += 1,
                UnitResult::Failed => report.failed += 1,
            }
        }

        self.reporter.summary(kind, &report);
        report
    }

    fn process_manifest(
        &mut self,
        kind: UnitKind,
        path: &Path,
        name_filter: Option<&str>,
        template: Option<&str>,
    ) -> UnitResult {
        let unit_dir = path.parent().unwrap_or(self.root.as_path()).to_path_buf();
        let unit_path = path_utils::relative_to(&self.root, &unit_dir);

        let raw = match manifest::read_manifest(path) {
            Ok(raw) => raw,
            Err(e) => {
                self.reporter.unit(&unit_path);
                self.reporter.issue(&UnitIssue::Unreadable(e));
                self.reporter.not_updated(&rerun_command(kind, None, template));
                return UnitResult::Failed;
            }
        };

        let unit_name = raw.get("name").and_then(|n| n.as_str()).map(str::to_string);
        if let Some(wanted) = name_filter {
            if unit_name.as_deref() != Some(wanted) {
                return UnitResult::Skipped;
            }
        }

        self.reporter.unit(&unit_path);

        let validation = validation::validate(&raw);
        if !validation.is_ok() {
            for message in validation.errors {
                self.reporter.issue(&UnitIssue::Invalid { message });
            }
            self.reporter
                .not_updated(&rerun_command(kind, unit_name.as_deref(), template));
            return UnitResult::Failed;
        }

        let manifest = match Manifest::from_value(path, raw) {
            Ok(manifest) => manifest,
            Err(e) => {
                self.reporter.issue(&UnitIssue::Unreadable(e));
                self.reporter
                    .not_updated(&rerun_command(kind, unit_name.as_deref(), template));
                return UnitResult::Failed;
            }
        };

        let (variants, notice) = select_variants(&manifest, template);
        if let Some(notice) = notice {
            self.reporter.issue(&notice);
        }

        let name = manifest.name.as_str();
        let mut failed = false;
        let mut last_status = None;

        for variant in &variants {
            let variant = variant.as_deref();
            match self.render_variant(kind, &manifest, &unit_dir, &unit_path, variant) {
                Ok(rendered) => {
                    for notice in &rendered.notices {
                        self.reporter.issue(notice);
                    }
                    if let Some(mode) = rendered.status.lib_mode {
                        self.reporter.detail(&format!("library mode: {}", mode.as_str()));
                    }
                    for file in &rendered.files {
                        let rel = path_utils::relative_to(&unit_dir, file);
                        self.reporter.detail(&format!("included {rel}"));
                    }
                    match writer::write_all(&rendered.writes) {
                        Ok(()) => {
                            for write in &rendered.writes {
                                let rel = path_utils::relative_to(&self.root, &write.path);
                                self.reporter.detail(&format!("wrote {rel}"));
                            }
                            self.reporter.updated(variant);
                            last_status = Some(rendered.status);
                        }
                        Err(e) => {
                            failed = true;
                            self.reporter.issue(&UnitIssue::Write(e));
                            self.reporter
                                .not_updated(&rerun_command(kind, Some(name), variant));
                        }
                    }
                }
                Err(issues) => {
                    failed = true;
                    for issue in &issues {
                        self.reporter.issue(issue);
                    }
                    self.reporter
                        .not_updated(&rerun_command(kind, Some(name), variant));
                }
            }
        }

        if let Some(status) = last_status {
            self.refresh_docs(&unit_dir, &status);
        }

        if failed {
            UnitResult::Failed
        } else {
            UnitResult::Updated
        }
    }

    fn render_variant(
        &self,
        kind: UnitKind,
        manifest: &Manifest,
        unit_dir: &Path,
        unit_path: &str,
        variant: Option<&str>,
    ) -> Result<RenderedVariant, Vec<UnitIssue>> {
        let loader = UnitLoader::new(
            manifest,
            unit_dir,
            CommentFilter::new(kind.strips_html_comments()),
        );

        let mut ctx = RenderContext::new(&manifest.server);
        let outcome = loader.load(&mut ctx);
        let mut issues = outcome.issues;
        let mut files = outcome.files;

        let server_config = manifest.server.config.as_deref().filter(|s| !s.is_empty());
        let dest_config = manifest.dest_config.as_deref().filter(|s| !s.is_empty());
        let fragment = match (server_config, dest_config) {
            (Some(source), Some(dest)) => {
                let mut config_ctx = RenderContext::new(&manifest.server);
                let fragment = loader.load_fragment(source, &mut config_ctx);
                issues.extend(fragment.issues);
                files.extend(fragment.files);
                Some((fragment.content, dest))
            }
            (Some(_), None) => {
                issues.push(UnitIssue::ConfigPairing {
                    message: "\"server.config\" is set but \"destConfig\" is missing".to_string(),
                });
                None
            }
            (None, Some(_)) => {
                issues.push(UnitIssue::ConfigPairing {
                    message: "\"destConfig\" is set but \"server.config\" is missing".to_string(),
                });
                None
            }
            (None, None) => None,
        };

        if unit::any_blocking(&issues) {
            return Err(issues);
        }

        let header = BundleHeader {
            manifest_file: kind.manifest_file_name(),
            target: &manifest.name,
            template: variant,
            author: &manifest.author,
            repository: self.repository.as_deref(),
            unit_path,
            lib_mode: outcome.status.lib_mode,
        };

        let mut writes = vec![PendingWrite {
            path: unit_dir.join(template::derive_file_name(manifest, variant, &manifest.dest)),
            content: template::apply_template(
                manifest,
                variant,
                &format!("{}{}", header.render(self.now), outcome.content),
            ),
        }];

        if let Some((content, dest)) = fragment {
            let config_header = BundleHeader {
                lib_mode: None,
                ..header
            };
            writes.push(PendingWrite {
                path: unit_dir.join(template::derive_file_name(manifest, variant, dest)),
                content: template::apply_template(
                    manifest,
                    variant,
                    &format!("{}{content}", config_header.render(self.now)),
                ),
            });
        }

        Ok(RenderedVariant {
            writes,
            status: outcome.status,
            files,
            notices: issues,
        })
    }

    fn refresh_docs(&mut self, unit_dir: &Path, status: &UnitStatus) {
        let Some(renderer) = self.renderer else {
            return;
        };

        let outcome = docs::refresh_docs(unit_dir, status, renderer);
        for issue in &outcome.issues {
            self.reporter.issue(issue);
        }
        for path in &outcome.written {
            let rel = path_utils::relative_to(&self.root, path);
            self.reporter.detail(&format!("documented {rel}"));
        }
        for path in &outcome.removed {
            let rel = path_utils::relative_to(&self.root, path);
            self.reporter.detail(&format!("removed stale {rel}"));
        }
    }
}

/// Template variants to render for a manifest
///
/// No request renders the untouched bundle. `*` renders every defined
/// template (or the untouched bundle if there are none). An undefined name
/// falls back to the untouched bundle with a notice.
fn select_variants(
    manifest: &Manifest,
    requested: Option<&str>,
) -> (Vec<Option<String>>, Option<UnitIssue>) {
    match requested {
        None => (vec![None], None),
        Some(ALL_TEMPLATES) if manifest.template.is_empty() => (vec![None], None),
        Some(ALL_TEMPLATES) => (
            manifest.template_names().into_iter().map(Some).collect(),
            None,
        ),
        Some(name) if manifest.template.get(name).is_some() => {
            (vec![Some(name.to_string())], None)
        }
        Some(name) => (
            vec![None],
            Some(UnitIssue::TemplateNotDefined {
                template: name.to_string(),
            }),
        ),
    }
}

/// The exact command that re-runs one unit (and variant)
fn rerun_command(kind: UnitKind, name: Option<&str>, template: Option<&str>) -> String {
    let mut command = format!("sfmc-build {}", kind.command());
    match name {
        Some(name) => command.push_str(&format!(" \"{name}\"")),
        // the template is positional after the name
        None if template.is_some() => command.push_str(" \"*\""),
        None => {}
    }
    if let Some(template) = template {
        command.push_str(&format!(" \"{template}\""));
    }
    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingReporter {
        lines: Vec<String>,
    }

    impl Reporter for RecordingReporter {
        fn searching(&mut self, kind: UnitKind) {
            self.lines.push(format!("searching {}", kind.manifest_file_name()));
        }
        fn unit(&mut self, unit_path: &str) {
            self.lines.push(format!("unit {unit_path}"));
        }
        fn issue(&mut self, issue: &UnitIssue) {
            self.lines.push(format!("issue {issue}"));
        }
        fn not_updated(&mut self, rerun_command: &str) {
            self.lines.push(format!("not updated: {rerun_command}"));
        }
        fn updated(&mut self, template: Option<&str>) {
            self.lines.push(format!("updated {}", template.unwrap_or("-")));
        }
        fn detail(&mut self, message: &str) {
            self.lines.push(format!("detail {message}"));
        }
        fn summary(&mut self, kind: UnitKind, report: &BuildReport) {
            self.lines
                .push(format!("found {} {}", report.found, kind.plural()));
        }
    }

    struct Project {
        temp: TempDir,
    }

    impl Project {
        fn new() -> Self {
            Self {
                temp: TempDir::new().unwrap(),
            }
        }

        fn root(&self) -> &Path {
            self.temp.path()
        }

        fn write(&self, rel: &str, content: &str) {
            let path = self.root().join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }

        fn read(&self, rel: &str) -> String {
            std::fs::read_to_string(self.root().join(rel)).unwrap()
        }

        fn exists(&self, rel: &str) -> bool {
            self.root().join(rel).exists()
        }

        fn build(
            &self,
            kind: UnitKind,
            name: Option<&str>,
            template: Option<&str>,
        ) -> (BuildReport, Vec<String>) {
            let mut reporter = RecordingReporter::default();
            let report = Orchestrator::new(self.root(), None, &mut reporter)
                .at(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
                .build_kind(kind, name, template);
            (report, reporter.lines)
        }
    }

    fn page(dir: &str, manifest: serde_json::Value, files: &[(&str, &str)]) -> Project {
        let project = Project::new();
        project.write(&format!("{dir}/cloudpage.json"), &manifest.to_string());
        for (name, content) in files {
            project.write(&format!("{dir}/src/{name}"), content);
        }
        project
    }

    fn basic_manifest() -> serde_json::Value {
        json!({
            "name": "landing",
            "author": "jane",
            "dest": "dist/landing.html",
            "server": { "src": ["main.ssjs"] },
            "public": ["style.css"]
        })
    }

    #[test]
    fn test_untemplated_unit_writes_dest() {
        let project = page(
            "pages/landing",
            basic_manifest(),
            &[("main.ssjs", "run();"), ("style.css", "p { color: red }")],
        );

        let (report, lines) = project.build(UnitKind::CloudPage, None, None);

        assert_eq!(
            report,
            BuildReport {
                found: 1,
                updated: 1,
                failed: 0
            }
        );
        let out = project.read("pages/landing/dist/landing.html");
        assert!(out.starts_with("%%[\n/*\n * source:     cloudpage.json\n * target:     landing\n"));
        assert!(out.contains(" * built:      2024-01-02 03:04:05 GMT\n"));
        assert!(out.contains(" * path:       pages/landing\n"));
        assert!(out.contains("run();"));
        assert!(out.contains("<style>\np { color: red }\n</style>"));
        assert!(lines.contains(&"unit pages/landing".to_string()));
        assert!(lines.contains(&"updated -".to_string()));
        assert!(lines.contains(&"found 1 cloudpages".to_string()));
    }

    #[test]
    fn test_missing_author_writes_nothing() {
        let mut manifest = basic_manifest();
        manifest.as_object_mut().unwrap().remove("author");
        let project = page(
            "p",
            manifest,
            &[("main.ssjs", "run();"), ("style.css", "p{}")],
        );

        let (report, lines) = project.build(UnitKind::CloudPage, None, None);

        assert_eq!(report.failed, 1);
        assert!(!project.exists("p/dist/landing.html"));
        assert!(lines.contains(&"issue Invalid manifest: \"author\" is required".to_string()));
        assert!(lines.contains(&"not updated: sfmc-build cloudPages \"landing\"".to_string()));
    }

    #[test]
    fn test_missing_files_abort_write() {
        let project = page("p", basic_manifest(), &[("style.css", "p{}")]);
        std::fs::create_dir_all(project.root().join("p/dist")).unwrap();
        project.write("p/dist/landing.html", "previous");

        let (report, lines) = project.build(UnitKind::CloudPage, None, None);

        assert_eq!(report.failed, 1);
        assert_eq!(project.read("p/dist/landing.html"), "previous");
        assert!(lines.contains(&"issue File not found (server.src): main.ssjs".to_string()));
    }

    #[test]
    fn test_config_without_dest_config_writes_nothing() {
        let mut manifest = basic_manifest();
        manifest["server"]["config"] = json!("conf.amp");
        let project = page(
            "p",
            manifest,
            &[("main.ssjs", "run();"), ("style.css", "p{}"), ("conf.amp", "SET @a = 1")],
        );

        let (report, lines) = project.build(UnitKind::CloudPage, None, None);

        assert_eq!(report.failed, 1);
        assert!(!project.exists("p/dist/landing.html"));
        assert!(!project.exists("p/dist/conf.amp"));
        assert!(lines.iter().any(|l| l.starts_with("issue Configuration error")));
    }

    #[test]
    fn test_config_fragment_written_alongside() {
        let mut manifest = basic_manifest();
        manifest["server"]["config"] = json!("conf.amp");
        manifest["destConfig"] = json!("dist/config.amp");
        let project = page(
            "p",
            manifest,
            &[("main.ssjs", "run();"), ("style.css", "p{}"), ("conf.amp", "SET @a = 1")],
        );

        let (report, _) = project.build(UnitKind::CloudPage, None, None);

        assert_eq!(report.updated, 1);
        let config = project.read("p/dist/config.amp");
        assert!(config.contains("%%[\nSET @a = 1\n]%%"));
        assert!(!project.read("p/dist/landing.html").contains("SET @a = 1"));
    }

    #[test]
    fn test_failed_config_write_keeps_previous_bundle() {
        let mut manifest = basic_manifest();
        manifest["server"]["config"] = json!("conf.amp");
        manifest["destConfig"] = json!("blocker/conf.amp");
        let project = page(
            "p",
            manifest,
            &[("main.ssjs", "run();"), ("style.css", "p{}"), ("conf.amp", "SET @a = 1")],
        );
        project.write("p/blocker", "");
        project.write("p/dist/landing.html", "previous");

        let (report, lines) = project.build(UnitKind::CloudPage, None, None);

        assert_eq!(
            report,
            BuildReport {
                found: 1,
                updated: 0,
                failed: 1
            }
        );
        assert_eq!(project.read("p/dist/landing.html"), "previous");
        assert!(!project.exists("p/blocker/conf.amp"));
        assert!(lines.iter().any(|l| l.starts_with("issue Failed to write file")));
    }

    #[test]
    fn test_named_template_variant() {
        let mut manifest = basic_manifest();
        manifest["template"] = json!({
            "prod": { "{{env}}": "production" },
            "dev": { "{{env}}": "development" }
        });
        let project = page(
            "p",
            manifest,
            &[("main.ssjs", "var env = '{{env}}';"), ("style.css", "p{}")],
        );

        let (report, _) = project.build(UnitKind::CloudPage, None, Some("prod"));

        assert_eq!(report.updated, 1);
        let out = project.read("p/dist/landing-prod.html");
        assert!(out.contains("var env = 'production';"));
        assert!(out.contains(" * template:   prod\n"));
        assert!(!project.exists("p/dist/landing.html"));
        assert!(!project.exists("p/dist/landing-dev.html"));
    }

    #[test]
    fn test_all_templates_reset_core_flag() {
        let manifest = json!({
            "name": "landing",
            "author": "jane",
            "dest": "out.html",
            "server": {
                "dependencies": { "ssjs": ["lib.ssjs"] },
                "src": ["main.ssjs"],
                "coreVersion": "1.1.5"
            },
            "template": { "a": { "X": "1" }, "b": { "X": "2" } }
        });
        let project = page("p", manifest, &[("lib.ssjs", "lib(X);"), ("main.ssjs", "main();")]);

        let (report, lines) = project.build(UnitKind::CloudPage, None, Some("*"));

        assert_eq!(report.updated, 1);
        for (file, value) in [("p/out-a.html", "lib(1);"), ("p/out-b.html", "lib(2);")] {
            let out = project.read(file);
            assert_eq!(out.matches("Platform.Load(\"core\", \"1.1.5\");").count(), 1);
            assert!(out.contains(value));
        }
        assert!(lines.contains(&"updated a".to_string()));
        assert!(lines.contains(&"updated b".to_string()));
    }

    #[test]
    fn test_undefined_template_falls_back() {
        let project = page(
            "p",
            basic_manifest(),
            &[("main.ssjs", "run();"), ("style.css", "p{}")],
        );

        let (report, lines) = project.build(UnitKind::CloudPage, None, Some("qa"));

        assert_eq!(report.updated, 1);
        assert!(project.exists("p/dist/landing.html"));
        assert!(
            lines.contains(
                &"issue Template 'qa' is not defined, bundling untouched content".to_string()
            )
        );
    }

    #[test]
    fn test_name_filter_skips_silently() {
        let project = page(
            "p",
            basic_manifest(),
            &[("main.ssjs", "run();"), ("style.css", "p{}")],
        );

        let (report, lines) = project.build(UnitKind::CloudPage, Some("other"), None);

        assert_eq!(
            report,
            BuildReport {
                found: 1,
                updated: 0,
                failed: 0
            }
        );
        assert!(!lines.iter().any(|l| l.starts_with("unit ")));
        assert!(!project.exists("p/dist/landing.html"));
    }

    #[test]
    fn test_invalid_json_does_not_stop_run() {
        let project = page(
            "b",
            basic_manifest(),
            &[("main.ssjs", "run();"), ("style.css", "p{}")],
        );
        project.write("a/cloudpage.json", "{ not json");

        let (report, lines) = project.build(UnitKind::CloudPage, None, None);

        assert_eq!(
            report,
            BuildReport {
                found: 2,
                updated: 1,
                failed: 1
            }
        );
        assert!(lines.iter().any(|l| l.contains("Failed to parse manifest")));
        assert!(project.exists("b/dist/landing.html"));
    }

    #[test]
    fn test_none_found() {
        let project = Project::new();
        let (report, lines) = project.build(UnitKind::Email, None, None);
        assert_eq!(report, BuildReport::default());
        assert_eq!(lines, vec!["searching email.json", "found 0 emails"]);
    }

    #[test]
    fn test_rebuild_is_byte_identical() {
        let project = page(
            "p",
            basic_manifest(),
            &[("main.ssjs", "run(); // go"), ("style.css", "p { }")],
        );

        project.build(UnitKind::CloudPage, None, None);
        let first = project.read("p/dist/landing.html");
        project.build(UnitKind::CloudPage, None, None);
        let second = project.read("p/dist/landing.html");

        assert_eq!(first, second);
    }

    #[test]
    fn test_library_header_is_raw() {
        let project = Project::new();
        project.write(
            "lib/sfmc-lib.json",
            &json!({
                "name": "helpers",
                "author": "jane",
                "dest": "dist/helpers.ssjs",
                "server": {},
                "lib": { "ssjs": ["a.ssjs"] }
            })
            .to_string(),
        );
        project.write("lib/src/a.ssjs", "function a() {}");

        let (report, _) = project.build(UnitKind::Library, None, None);

        assert_eq!(report.updated, 1);
        let out = project.read("lib/dist/helpers.ssjs");
        assert!(out.starts_with("/*\n * source:     sfmc-lib.json\n"));
        assert!(out.ends_with("function a() {}"));
    }

    #[test]
    fn test_select_variants() {
        let manifest: Manifest = serde_json::from_value(json!({
            "name": "n", "author": "a", "dest": "d.html", "server": {},
            "template": { "x": {}, "y": {} }
        }))
        .unwrap();

        assert_eq!(select_variants(&manifest, None).0, vec![None]);
        assert_eq!(
            select_variants(&manifest, Some("*")).0,
            vec![Some("x".to_string()), Some("y".to_string())]
        );
        assert_eq!(
            select_variants(&manifest, Some("y")).0,
            vec![Some("y".to_string())]
        );
        let (variants, notice) = select_variants(&manifest, Some("z"));
        assert_eq!(variants, vec![None]);
        assert!(notice.is_some());
    }

    #[test]
    fn test_rerun_command() {
        assert_eq!(
            rerun_command(UnitKind::Email, Some("news"), None),
            "sfmc-build emails \"news\""
        );
        assert_eq!(
            rerun_command(UnitKind::CloudPage, Some("landing"), Some("prod")),
            "sfmc-build cloudPages \"landing\" \"prod\""
        );
        assert_eq!(
            rerun_command(UnitKind::Library, None, Some("prod")),
            "sfmc-build library \"*\" \"prod\""
        );
        assert_eq!(rerun_command(UnitKind::Library, None, None), "sfmc-build library");
    }
}
