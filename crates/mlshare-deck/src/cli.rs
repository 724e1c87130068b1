use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

use clap::{Args, Parser, Subcommand};
use mlshare_core::logging::{self, LogFormat};
use mlshare_core::section::SectionId;
use mlshare_runtime::step::StepProgram;
use mlshare_runtime::viewport::ScrollBehavior;
use mlshare_runtime::virtual_viewport::VirtualViewport;

use crate::app::{DeckModel, Msg};
use crate::config::DeckConfig;
use crate::content::DECK;
use crate::error::{DeckError, Result};
use crate::markup::render_html;
use crate::state::PageState;

#[derive(Debug, Parser)]
#[command(
    name = "mlshare",
    about = "ML Tech Sharing deck: browse in the terminal, dump frames, export HTML",
    version
)]
pub struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit log records as JSON.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse the deck interactively (default).
    Run,

    /// Render one window of the deck as plain text.
    Dump(DumpArgs),

    /// Export the deck as a standalone HTML page.
    Html(HtmlArgs),
}

#[derive(Debug, Clone, Args)]
pub struct DumpArgs {
    #[arg(long, default_value_t = 100)]
    pub width: u16,

    #[arg(long, default_value_t = 30)]
    pub height: u16,

    /// Navigate to this section before rendering.
    #[arg(long)]
    pub section: Option<String>,

    /// Print the whole document instead of the visible window.
    #[arg(long)]
    pub full: bool,
}

#[derive(Debug, Clone, Args)]
pub struct HtmlArgs {
    /// Output file. Defaults to stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Section highlighted in the nav. Defaults to the first one.
    #[arg(long)]
    pub active: Option<String>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => DeckConfig::from_toml_file(path)?,
        None => DeckConfig::default(),
    };
    let command = cli.command.unwrap_or(Commands::Run);
    init_logging(cli.log_json, cli.log_file.as_ref(), &command)?;
    tracing::debug!(?command, "dispatch");

    match command {
        Commands::Run => run_terminal(&config),
        Commands::Dump(args) => dump(&config, &args, &mut io::stdout().lock()),
        Commands::Html(args) => match &args.output {
            Some(path) => {
                let mut file = File::create(path)?;
                html(&args, &mut file)?;
                tracing::info!(path = %path.display(), "html written");
                Ok(())
            }
            None => html(&args, &mut io::stdout().lock()),
        },
    }
}

/// The interactive host owns the screen, so it only logs to a file.
fn init_logging(json: bool, file: Option<&PathBuf>, command: &Commands) -> Result<()> {
    let format = if json { LogFormat::Json } else { LogFormat::Text };
    match file {
        Some(path) => {
            logging::init_file(format, File::create(path)?);
        }
        None if !matches!(command, Commands::Run) => {
            logging::init_stderr(format);
        }
        None => {}
    }
    Ok(())
}

fn run_terminal(config: &DeckConfig) -> Result<()> {
    let mut model = DeckModel::new(config.scroll_behavior())?;
    if config.nav.focus_on_start {
        model = model.with_nav_focus();
    }
    crate::terminal::run(model, config)
}

fn known_section(id: &str) -> Result<SectionId> {
    let registry = DECK.registry()?;
    if registry.contains(id) {
        Ok(SectionId::from(id))
    } else {
        let known: Vec<&str> = registry.ids().map(SectionId::as_str).collect();
        Err(DeckError::invalid(format!(
            "unknown section `{id}` (expected one of: {})",
            known.join(", ")
        )))
    }
}

/// Render the deck headless and print it as text.
pub fn dump(config: &DeckConfig, args: &DumpArgs, out: &mut impl Write) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        return Err(DeckError::invalid("width and height must be > 0"));
    }
    let section = args.section.as_deref().map(known_section).transpose()?;

    let model = DeckModel::new(ScrollBehavior::Instant)?;
    let viewport = Rc::new(VirtualViewport::new(args.height));
    let mut program = StepProgram::with_config(
        model,
        viewport,
        args.width,
        args.height,
        config.program_config(),
    );
    program.init();
    if let Some(id) = section {
        program.send(Msg::Activate(id));
        program.step();
    }

    let rows = if args.full {
        program.frame().buffer.to_text()
    } else {
        program.window_text()
    };
    for row in rows {
        writeln!(out, "{row}")?;
    }
    Ok(())
}

/// Write the static HTML page.
pub fn html(args: &HtmlArgs, out: &mut impl Write) -> Result<()> {
    let registry = DECK.registry()?;
    let active = match args.active.as_deref() {
        Some(id) => known_section(id)?,
        None => registry.first().id.clone(),
    };
    let page = render_html(&DECK, &registry, &PageState::new(&active));
    out.write_all(page.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump_text(args: DumpArgs) -> String {
        let mut out = Vec::new();
        dump(&DeckConfig::default(), &args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn dump_args(section: Option<&str>) -> DumpArgs {
        DumpArgs {
            width: 160,
            height: 30,
            section: section.map(str::to_owned),
            full: false,
        }
    }

    #[test]
    fn dump_prints_one_window() {
        let text = dump_text(dump_args(None));
        assert_eq!(text.lines().count(), 30);
        assert!(text.lines().next().unwrap().contains("ML Tech Sharing"));
    }

    #[test]
    fn dump_navigates_to_section() {
        let text = dump_text(dump_args(Some("agents")));
        assert!(text.contains("Section 4"));
        assert!(!text.contains("Section 3"));
    }

    #[test]
    fn dump_full_prints_every_section() {
        let text = dump_text(DumpArgs {
            full: true,
            ..dump_args(None)
        });
        for badge in ["Section 1", "Section 2", "Section 3", "Section 4", "Section 5"] {
            assert!(text.contains(badge), "missing {badge}");
        }
    }

    #[test]
    fn dump_rejects_unknown_section() {
        let mut out = Vec::new();
        let err = dump(
            &DeckConfig::default(),
            &dump_args(Some("nonexistent")),
            &mut out,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("foundations, architectures"));
    }

    #[test]
    fn dump_rejects_zero_size() {
        let mut out = Vec::new();
        let args = DumpArgs {
            width: 0,
            ..dump_args(None)
        };
        assert!(dump(&DeckConfig::default(), &args, &mut out).is_err());
    }

    #[test]
    fn html_defaults_to_first_section() {
        let mut out = Vec::new();
        html(
            &HtmlArgs {
                output: None,
                active: None,
            },
            &mut out,
        )
        .unwrap();
        let page = String::from_utf8(out).unwrap();
        assert!(page.contains("<button class=\"text-blue-400\" data-section=\"foundations\">"));
    }

    #[test]
    fn html_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.html");
        run(Cli {
            config: None,
            log_json: false,
            log_file: None,
            command: Some(Commands::Html(HtmlArgs {
                output: Some(path.clone()),
                active: Some("practice".into()),
            })),
        })
        .unwrap();
        let page = std::fs::read_to_string(path).unwrap();
        assert!(page.contains("<button class=\"text-blue-400\" data-section=\"practice\">"));
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["mlshare", "dump", "--width", "80", "--section", "future"])
            .unwrap();
        let Some(Commands::Dump(args)) = cli.command else {
            panic!("expected dump");
        };
        assert_eq!(args.width, 80);
        assert_eq!(args.height, 30);
        assert_eq!(args.section.as_deref(), Some("future"));

        let cli = Cli::try_parse_from(["mlshare", "--config", "deck.toml"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("deck.toml")));
    }
}
