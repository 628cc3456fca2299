//! folio - Portfolio page interaction runner
//!
//! Loads an HTML page, attaches the interaction controller and replays a
//! scripted session (scrolls, pointer moves, clicks) on a virtual clock,
//! then reports what the page looks like.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use folio_dom::BlockLayout;
use folio_interactions::{Controller, InteractionConfig};
use folio_runtime::{Page, PageOptions};

mod snapshot;

use snapshot::Snapshot;

/// folio - page interaction runner
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Run portfolio page interactions against an HTML page", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a page and replay a session against it
    Run(RunArgs),

    /// Print the default interaction configuration as JSON
    Config,
}

#[derive(Args)]
struct RunArgs {
    /// HTML page to load
    page: PathBuf,

    /// JSON file overriding the default configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Viewport size
    #[arg(long, default_value = "1280x720", value_parser = parse_viewport)]
    viewport: (f64, f64),

    /// Scroll (as the user) to Y; ignored while the menu locks scrolling
    #[arg(long, value_name = "Y")]
    scroll: Vec<f64>,

    /// Move the pointer to viewport coordinates X,Y
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    hover: Vec<(f64, f64)>,

    /// Click the first element matching SELECTOR
    #[arg(long, value_name = "SELECTOR")]
    click: Vec<String>,

    /// Virtual time to let pass after loading and after each action (ms)
    #[arg(long, default_value_t = 2500.0, value_name = "MS")]
    settle: f64,

    /// Print the snapshot as JSON
    #[arg(long)]
    json: bool,
}

/// One step of a scripted session
#[derive(Debug, Clone, PartialEq)]
enum Action {
    Scroll(f64),
    Hover(f64, f64),
    Click(String),
}

fn parse_viewport(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s.split_once('x').ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let parse = |v: &str| v.trim().parse::<f64>().map_err(|e| format!("{v:?}: {e}"));
    let (w, h) = (parse(w)?, parse(h)?);
    if w <= 0.0 || h <= 0.0 {
        return Err(format!("viewport must be positive, got {s:?}"));
    }
    Ok((w, h))
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let parse = |v: &str| v.trim().parse::<f64>().map_err(|e| format!("{v:?}: {e}"));
    Ok((parse(x)?, parse(y)?))
}

/// Actions in command-line order
fn scripted_actions(args: &RunArgs, matches: &ArgMatches) -> Vec<Action> {
    let indices = |id: &str| -> Vec<usize> { matches.indices_of(id).map(|i| i.collect()).unwrap_or_default() };

    let mut actions: Vec<(usize, Action)> = Vec::new();
    actions.extend(indices("scroll").into_iter().zip(args.scroll.iter().map(|&y| Action::Scroll(y))));
    actions.extend(indices("hover").into_iter().zip(args.hover.iter().map(|&(x, y)| Action::Hover(x, y))));
    actions.extend(indices("click").into_iter().zip(args.click.iter().cloned().map(Action::Click)));
    actions.sort_by_key(|(index, _)| *index);
    actions.into_iter().map(|(_, action)| action).collect()
}

fn load_config(path: Option<&Path>) -> Result<InteractionConfig> {
    let Some(path) = path else {
        return Ok(InteractionConfig::default());
    };
    let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    InteractionConfig::from_json(&json).with_context(|| format!("Invalid configuration in {}", path.display()))
}

fn run(args: &RunArgs, matches: &ArgMatches) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let html = std::fs::read_to_string(&args.page).with_context(|| format!("Failed to read {}", args.page.display()))?;
    let url = match std::fs::canonicalize(&args.page) {
        Ok(path) => format!("file://{}", path.display()),
        Err(_) => format!("file://{}", args.page.display()),
    };

    let mut document = folio_html::HtmlParser::new()
        .parse_with_url(&html, &url)
        .with_context(|| format!("Failed to parse {}", args.page.display()))?;
    let (width, height) = args.viewport;
    let content_height = BlockLayout::new(width).apply(&mut document);
    tracing::info!("Loaded {} ({}px tall)", url, content_height);

    let options = PageOptions { viewport_width: width, viewport_height: height, ..PageOptions::default() };
    let mut page = Page::new(document, options);
    let mut controller = Controller::new(config);
    controller.attach(&mut page);
    page.load(&mut controller);
    page.advance(args.settle, &mut controller);

    for action in scripted_actions(args, matches) {
        tracing::info!("{:?}", action);
        match &action {
            Action::Scroll(y) => {
                if !page.user_scroll_by(y - page.scroll_y()) {
                    tracing::warn!("Scroll to {} blocked: scrolling is locked", y);
                }
            }
            Action::Hover(x, y) => page.pointer_move(*x, *y, &mut controller),
            Action::Click(selector) => {
                let Some(node) = page
                    .document()
                    .query_selector(selector)
                    .with_context(|| format!("Invalid selector {selector:?}"))?
                else {
                    bail!("No element matches {selector:?}");
                };
                page.click(node, &mut controller);
            }
        }
        page.advance(args.settle, &mut controller);
    }

    let snapshot = Snapshot::capture(&page, controller.config(), controller.behavior_names());
    page.unload(&mut controller);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{snapshot}");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    match &cli.command {
        Commands::Run(args) => {
            let run_matches = matches.subcommand_matches("run").context("missing run arguments")?;
            run(args, run_matches)
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&InteractionConfig::default())?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_viewport() {
        assert_eq!(parse_viewport("1280x720"), Ok((1280.0, 720.0)));
        assert!(parse_viewport("1280").is_err());
        assert!(parse_viewport("0x720").is_err());
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("200, 174"), Ok((200.0, 174.0)));
        assert!(parse_point("200").is_err());
    }

    #[test]
    fn test_actions_keep_command_line_order() {
        let matches = Cli::command()
            .try_get_matches_from([
                "folio", "run", "page.html", "--click", ".nav-toggle", "--scroll", "800", "--hover", "10,20",
                "--scroll", "0",
            ])
            .unwrap();
        let cli = Cli::from_arg_matches(&matches).unwrap();
        let Commands::Run(args) = &cli.command else { panic!("expected run") };
        let actions = scripted_actions(args, matches.subcommand_matches("run").unwrap());

        assert_eq!(
            actions,
            vec![
                Action::Click(".nav-toggle".into()),
                Action::Scroll(800.0),
                Action::Hover(10.0, 20.0),
                Action::Scroll(0.0),
            ]
        );
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
