//! trellis CLI - Project scaffolding from template directories

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use trellis_core::tui::ScaffoldOptions;
use trellis_core::ProductConfig;

const BANNER: &str = r#"
 _____  ____   _____  _      _      ___  ____
|_   _||  _ \ | ____|| |    | |    |_ _|/ ___|
  | |  | |_) ||  _|  | |    | |     | | \___ \
  | |  |  _ < | |___ | |___ | |___  | |  ___) |
  |_|  |_| \_\|_____||_____||_____||___||____/
"#;

/// trellis product configuration
#[derive(Clone)]
pub struct TrellisConfig;

impl ProductConfig for TrellisConfig {
    fn name(&self) -> &'static str {
        "trellis"
    }

    fn display_name(&self) -> &'static str {
        "trellis"
    }

    fn banner(&self) -> &'static str {
        BANNER
    }

    fn cli_description(&self) -> &'static str {
        "CLI for scaffolding web projects from templates"
    }

    fn template_dir_env(&self) -> &'static str {
        "TRELLIS_TEMPLATE_DIR"
    }

    fn widget_dir_env(&self) -> &'static str {
        "TRELLIS_WIDGET_DIR"
    }

    fn scratch_dir_name(&self) -> &'static str {
        "trellis-template-repo"
    }

    fn next_steps(&self, dir: &str) -> Vec<String> {
        vec![
            format!("cd {}", dir),
            "Open README.md to get started".to_string(),
        ]
    }
}

#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(about = "CLI for scaffolding web projects from templates")]
#[command(version, disable_version_flag = true)]
pub struct Args {
    /// Print version information
    #[arg(
        short = 'v',
        long = "version",
        action = clap::ArgAction::Version,
        value_parser = clap::value_parser!(bool)
    )]
    version: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project from a template
    Create(CreateCliArgs),
    /// Generate a reusable component from a widget template
    Generate(GenerateCliArgs),
}

#[derive(Parser, Debug)]
pub struct CreateCliArgs {
    /// Project directory to create
    pub dir: Option<String>,

    /// Local directory to use as the template root
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Template key to use without prompting
    #[arg(short, long)]
    pub template: Option<String>,

    /// Language variant (javascript or typescript)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Git link to clone a template from instead of using a bundled one
    #[arg(long)]
    pub link: Option<String>,

    /// Skip the git init step
    #[arg(long = "skip-git")]
    pub skip_git: bool,

    /// Skip the dependency install step
    #[arg(long = "skip-install")]
    pub skip_install: bool,
}

impl From<CreateCliArgs> for ScaffoldOptions {
    fn from(args: CreateCliArgs) -> Self {
        ScaffoldOptions {
            template_dir: args.template_dir,
            template: args.template,
            language: args.language,
            link: args.link,
            skip_git: args.skip_git,
            skip_install: args.skip_install,
        }
    }
}

#[derive(Parser, Debug)]
pub struct GenerateCliArgs {
    /// Component directory to create
    pub dir: Option<String>,

    /// Local directory to use as the widget root
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Widget template key to use without prompting
    #[arg(short, long)]
    pub template: Option<String>,

    /// Language variant (javascript or typescript)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Git link to clone a widget template from
    #[arg(long)]
    pub link: Option<String>,
}

impl From<GenerateCliArgs> for ScaffoldOptions {
    fn from(args: GenerateCliArgs) -> Self {
        ScaffoldOptions {
            template_dir: args.template_dir,
            template: args.template,
            language: args.language,
            link: args.link,
            ..ScaffoldOptions::default()
        }
    }
}

fn print_subcommand_help(name: &str) -> Result<()> {
    let mut root = Args::command();
    if let Some(sub) = root.find_subcommand_mut(name) {
        sub.print_help()?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let config = TrellisConfig;
    println!("{}", config.banner().green());

    let args = Args::parse();

    match args.command {
        Some(Command::Create(create_args)) => {
            let dir = create_args.dir.clone().unwrap_or_default();
            if dir.is_empty() {
                print_subcommand_help("create")
            } else {
                let result = trellis_core::run_create(&config, create_args.into(), &dir).await;

                // Ensure cursor is visible on normal exit
                let _ = console::Term::stderr().show_cursor();

                result
            }
        }
        Some(Command::Generate(generate_args)) => {
            let dir = generate_args.dir.clone().unwrap_or_default();
            if dir.is_empty() {
                print_subcommand_help("generate")
            } else {
                let result = trellis_core::run_generate(&config, generate_args.into(), &dir).await;

                let _ = console::Term::stderr().show_cursor();

                result
            }
        }
        None => {
            Args::command().print_help()?;
            Ok(())
        }
    }
}
