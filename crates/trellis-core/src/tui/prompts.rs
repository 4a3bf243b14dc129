//! Charm-style CLI prompts using cliclack

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;

use crate::product::ProductConfig;
use crate::render::TokenMap;
use crate::tasks::{
    git_title, init_repository, install_fallback, install_primary, TaskReport, TaskStatus,
    INSTALL_FALLBACK_TITLE, INSTALL_PRIMARY_TITLE,
};
use crate::templates::{
    bundled_root, copy_tree, fetch_remote, resolve_builtin, scratch_dir, validate_link, Language,
    RootKind, Selection, TemplateEntry, TemplateRegistry,
};

const COPY_TITLE: &str = "copy template files";

/// Value of the pseudo-entry that lets the user paste a git link instead of
/// picking a bundled template.
const LINK_CHOICE: &str = "link";

/// Preset answers collected from the command line. Anything left `None` is
/// asked interactively.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    /// Local directory to use as the template root
    pub template_dir: Option<PathBuf>,

    /// Template key to use without prompting
    pub template: Option<String>,

    /// Language variant to use without prompting
    pub language: Option<String>,

    /// Remote git link to clone instead of a bundled template
    pub link: Option<String>,

    /// Skip the repository-init step
    pub skip_git: bool,

    /// Skip the dependency-install steps
    pub skip_install: bool,
}

/// What the user ended up choosing as the template source.
enum TemplateChoice {
    Builtin(Selection),
    Remote(String),
}

/// Run the interactive `create` flow: scaffold a project at `dir`.
pub async fn run_create<C: ProductConfig>(
    config: &C,
    options: ScaffoldOptions,
    dir: &str,
) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let destination = destination_path(dir);
    if destination.exists() {
        cliclack::log::info(format!(
            "{} already exists, nothing to do",
            destination.display()
        ))?;
        return Ok(());
    }

    let root = bundled_root(config, options.template_dir.as_deref(), RootKind::Templates)?;
    let registry = TemplateRegistry::scan(&root)?;
    let choice = select_source(&options, &registry)?;
    let tokens = TokenMap::for_name(config.project_token(), &dir_basename(&destination));

    let mut report = TaskReport::new();
    let template_path = match choice {
        TemplateChoice::Builtin(selection) => resolve_builtin(&registry, &root, &selection)?,
        TemplateChoice::Remote(link) => match clone_step(config, &link, &mut report).await? {
            Some(path) => path,
            None => return finish_create(config, &report, dir),
        },
    };

    if !copy_step(&template_path, &destination, &tokens, &mut report)? {
        return finish_create(config, &report, dir);
    }

    if options.skip_git {
        report.record(git_title(&destination), TaskStatus::Skipped("--skip-git".into()));
    } else if !git_step(&destination, &mut report).await? {
        return finish_create(config, &report, dir);
    }

    if options.skip_install {
        report.record(
            INSTALL_PRIMARY_TITLE,
            TaskStatus::Skipped("--skip-install".into()),
        );
    } else if !install_step(&destination, &mut report).await? {
        return finish_create(config, &report, dir);
    }

    finish_create(config, &report, dir)
}

/// Run the interactive `generate` flow: scaffold one component at `dir`.
///
/// Same machinery as `create` against the widget root, but a component
/// lands inside an existing project, so there is no repository init and no
/// dependency install.
pub async fn run_generate<C: ProductConfig>(
    config: &C,
    options: ScaffoldOptions,
    dir: &str,
) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let destination = destination_path(dir);
    if destination.exists() {
        cliclack::log::info(format!(
            "{} already exists, nothing to do",
            destination.display()
        ))?;
        return Ok(());
    }

    let root = bundled_root(config, options.template_dir.as_deref(), RootKind::Widgets)?;
    let registry = TemplateRegistry::scan(&root)?;
    let choice = select_source(&options, &registry)?;
    let tokens = TokenMap::for_name(config.component_token(), &dir_basename(&destination));

    let mut report = TaskReport::new();
    let template_path = match choice {
        TemplateChoice::Builtin(selection) => resolve_builtin(&registry, &root, &selection)?,
        TemplateChoice::Remote(link) => match clone_step(config, &link, &mut report).await? {
            Some(path) => path,
            None => return finish_generate(&report, dir),
        },
    };

    copy_step(&template_path, &destination, &tokens, &mut report)?;
    finish_generate(&report, dir)
}

/// Resolve the destination against the working directory.
fn destination_path(dir: &str) -> PathBuf {
    let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    current_dir.join(dir)
}

/// The last path component, which is what tokens are bound to.
fn dir_basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Decide where the template comes from, prompting only for what the
/// command line did not already answer.
fn select_source(
    options: &ScaffoldOptions,
    registry: &TemplateRegistry,
) -> Result<TemplateChoice> {
    if let Some(link) = &options.link {
        validate_link(link)?;
        return Ok(TemplateChoice::Remote(link.clone()));
    }

    let preset_language = parse_language_arg(options.language.as_deref())?;

    if let Some(key) = &options.template {
        // Preset keys skip all prompts; the resolver validates the pair.
        return Ok(TemplateChoice::Builtin(Selection::new(
            key.clone(),
            preset_language,
        )));
    }

    let mut select = cliclack::select("Select a template");
    for (idx, entry) in registry.entries().iter().enumerate() {
        select = select.item(idx, &entry.key, variant_hint(entry));
    }
    select = select.item(
        registry.len(),
        LINK_CHOICE,
        "clone a template from a git link",
    );
    let choice: usize = select.interact()?;

    if choice == registry.len() {
        let link: String = cliclack::input("template link:").interact()?;
        validate_link(&link)?;
        return Ok(TemplateChoice::Remote(link));
    }

    let entry = &registry.entries()[choice];
    let language = narrow_language(entry, preset_language)?;
    Ok(TemplateChoice::Builtin(Selection::new(
        entry.key.clone(),
        language,
    )))
}

fn parse_language_arg(raw: Option<&str>) -> Result<Option<Language>> {
    match raw {
        None => Ok(None),
        Some(tag) => Language::from_tag(tag).map(Some).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown language '{}'; expected javascript or typescript",
                tag
            )
        }),
    }
}

/// Pick the language variant for a chosen template entry.
fn narrow_language(entry: &TemplateEntry, preset: Option<Language>) -> Result<Option<Language>> {
    let language = match (entry.variants.as_slice(), preset) {
        (_, Some(language)) => Some(language),
        ([], None) => None,
        ([only], None) => {
            cliclack::log::info(format!("Using the {} variant", only))?;
            Some(*only)
        }
        (variants, None) => {
            let mut select = cliclack::select("Pick a language");
            for (idx, language) in variants.iter().enumerate() {
                select = select.item(idx, language, "");
            }
            let idx: usize = select.interact()?;
            Some(variants[idx])
        }
    };
    Ok(language)
}

fn variant_hint(entry: &TemplateEntry) -> String {
    entry
        .variants
        .iter()
        .map(Language::tag)
        .collect::<Vec<_>>()
        .join(", ")
}

async fn clone_step<C: ProductConfig>(
    config: &C,
    link: &str,
    report: &mut TaskReport,
) -> Result<Option<PathBuf>> {
    let scratch = scratch_dir(config.scratch_dir_name());
    let title = format!("fetch template from {}", link);

    let spinner = cliclack::spinner();
    spinner.start(format!("Cloning {}...", link));
    match fetch_remote(link, &scratch).await {
        Ok(path) => {
            spinner.stop(format!("Template ready in {}", path.display()));
            report.record(title, TaskStatus::Completed);
            Ok(Some(path))
        }
        Err(e) => {
            spinner.stop("Clone failed");
            cliclack::log::error(e.to_string())?;
            report.record(title, TaskStatus::Failed(e.to_string()));
            Ok(None)
        }
    }
}

fn copy_step(
    template_path: &Path,
    destination: &Path,
    tokens: &TokenMap,
    report: &mut TaskReport,
) -> Result<bool> {
    let spinner = cliclack::spinner();
    spinner.start("Copying template files...");
    match copy_tree(template_path, destination, tokens) {
        Ok(records) => {
            spinner.stop(format!(
                "Created {} files in {}",
                records.len(),
                destination.display()
            ));
            for record in &records {
                println!(
                    "  {}",
                    format!(
                        "copy {} -> {}",
                        record.source.display(),
                        record.destination.display()
                    )
                    .dimmed()
                );
            }
            report.record(COPY_TITLE, TaskStatus::Completed);
            Ok(true)
        }
        Err(e) => {
            spinner.stop("Copy failed");
            cliclack::log::error(e.to_string())?;
            report.record(COPY_TITLE, TaskStatus::Failed(e.to_string()));
            Ok(false)
        }
    }
}

async fn git_step(destination: &Path, report: &mut TaskReport) -> Result<bool> {
    let title = git_title(destination);
    cliclack::log::info(&title)?;

    let status = init_repository(destination).await;
    match &status {
        TaskStatus::Completed => cliclack::log::success("Repository initialized")?,
        TaskStatus::Failed(detail) => cliclack::log::error(detail)?,
        TaskStatus::Skipped(_) => {}
    }

    let ok = !status.is_failure();
    report.record(title, status);
    Ok(ok)
}

async fn install_step(destination: &Path, report: &mut TaskReport) -> Result<bool> {
    cliclack::log::info(INSTALL_PRIMARY_TITLE)?;
    let (status, ctx) = install_primary(destination).await;
    if let TaskStatus::Skipped(reason) = &status {
        cliclack::log::warning(reason)?;
    }
    report.record(INSTALL_PRIMARY_TITLE, status);

    if !ctx.use_fallback {
        cliclack::log::success("Dependencies installed")?;
        return Ok(true);
    }

    cliclack::log::info(INSTALL_FALLBACK_TITLE)?;
    let status = install_fallback(destination).await;
    match &status {
        TaskStatus::Completed => cliclack::log::success("Dependencies installed")?,
        TaskStatus::Failed(detail) => cliclack::log::error(detail)?,
        TaskStatus::Skipped(_) => {}
    }

    let ok = !status.is_failure();
    report.record(INSTALL_FALLBACK_TITLE, status);
    Ok(ok)
}

fn finish_create<C: ProductConfig>(config: &C, report: &TaskReport, dir: &str) -> Result<()> {
    print_report(report);
    if report.has_failure() {
        cliclack::outro("Setup did not finish; see the report above.")?;
        return Ok(());
    }
    print_next_steps(config, dir)
}

fn finish_generate(report: &TaskReport, dir: &str) -> Result<()> {
    print_report(report);
    if report.has_failure() {
        cliclack::outro("Generation did not finish; see the report above.")?;
    } else {
        cliclack::outro(format!("Generated {}", dir))?;
    }
    Ok(())
}

fn print_report(report: &TaskReport) {
    println!();
    for (title, status) in report.entries() {
        let line = match status {
            TaskStatus::Completed => format!("{} {}", "done".green(), title),
            TaskStatus::Skipped(reason) => {
                format!("{} {} ({})", "skip".yellow(), title, reason)
            }
            TaskStatus::Failed(detail) => format!("{} {} ({})", "fail".red(), title, detail),
        };
        println!("  {}", line);
    }
}

fn print_next_steps<C: ProductConfig>(config: &C, dir: &str) -> Result<()> {
    let steps = config.next_steps(dir);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
