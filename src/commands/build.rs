//! Build commands: `all`, `library`, `cloudPages` and `emails`

use std::path::{Path, PathBuf};

use crate::bundler::{BuildReport, Orchestrator};
use crate::cli::{AllArgs, Cli, UnitArgs};
use crate::docs::{DEFAULT_DOCS_CONFIG, DocRenderer, DocsConfig, JsDocRenderer};
use crate::error::{BuildError, Result, fs as fs_err};
use crate::manifest::UnitKind;
use crate::ui::ConsoleReporter;

/// Global options that apply to every build command
#[derive(Debug, Clone, Default)]
pub struct BuildSettings {
    pub root: Option<PathBuf>,
    pub verbose: bool,
    pub quiet: bool,
    pub no_docs: bool,
    pub docs_config: Option<PathBuf>,
}

impl BuildSettings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            root: cli.root.clone(),
            verbose: cli.verbose,
            quiet: cli.quiet,
            no_docs: cli.no_docs,
            docs_config: cli.docs_config.clone(),
        }
    }
}

/// Build every cloud page, then every email
pub fn run_all(settings: &BuildSettings, args: AllArgs) -> Result<()> {
    run(
        settings,
        &[UnitKind::CloudPage, UnitKind::Email],
        None,
        args.template.as_deref(),
    )
}

/// Build the units of a single kind
pub fn run_kind(settings: &BuildSettings, kind: UnitKind, args: UnitArgs) -> Result<()> {
    run(settings, &[kind], args.name_filter(), args.template.as_deref())
}

fn run(
    settings: &BuildSettings,
    kinds: &[UnitKind],
    name: Option<&str>,
    template: Option<&str>,
) -> Result<()> {
    let root = resolve_root(settings.root.as_deref())?;

    let renderer = if settings.no_docs {
        None
    } else {
        let config_path = settings
            .docs_config
            .clone()
            .unwrap_or_else(|| root.join(DEFAULT_DOCS_CONFIG));
        Some(JsDocRenderer::new(DocsConfig::load(&config_path)?))
    };

    let mut reporter = ConsoleReporter::new(settings.verbose, settings.quiet);
    let mut orchestrator = Orchestrator::new(
        &root,
        renderer.as_ref().map(|r| r as &dyn DocRenderer),
        &mut reporter,
    );

    let mut report = BuildReport::default();
    for kind in kinds {
        report.merge(orchestrator.build_kind(*kind, name, template));
    }

    if report.failed > 0 {
        return Err(BuildError::UnitsFailed {
            failed: report.failed,
            found: report.found,
        });
    }

    Ok(())
}

/// Resolve the invocation root to an absolute, existing directory
fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    let root = match root {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };

    if !root.is_dir() {
        return Err(fs_err::root_not_found(root.display().to_string()));
    }

    dunce::canonicalize(&root).map_err(|e| fs_err::read_failed(root.display().to_string(), e))
}
