//! `specgraph` command-line entry point.
//!
//! Every command prints exactly one JSON line on stdout; logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use specgraph::output::{DiagramOutput, Outcome};
use specgraph::upload::client::ConfluenceClient;
use specgraph::upload::{self, config};
use specgraph::{DiagramKind, Error, Graph, RenderConfig, RenderRequest, ScanMode, extract, read_document, render};

#[derive(Parser, Debug)]
#[command(name = "specgraph", version, about = "Extract diagrams from specification documents")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one diagram from a document.
    Diagram(DiagramCommand),
    /// Print the extracted graph as JSON.
    Extract(ExtractCommand),
    /// Attach files to a wiki page.
    Upload(UploadCommand),
}

#[derive(Args, Debug)]
struct DiagramCommand {
    /// architecture, dependency, er, interaction, or domain.
    #[arg(long = "type")]
    kind: String,

    #[arg(long)]
    input: PathBuf,

    /// Image path; `.png` is appended when missing.
    #[arg(long)]
    output: PathBuf,

    #[arg(long)]
    title: Option<String>,

    /// Also read capitalized sub-headings outside entity sections as entities.
    #[arg(long)]
    relaxed: bool,

    #[arg(long, env = "SPECGRAPH_DOT", default_value = "dot")]
    dot: PathBuf,

    #[arg(long, env = "SPECGRAPH_ICON_DIR")]
    icon_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ExtractCommand {
    #[arg(long)]
    input: PathBuf,

    #[arg(long)]
    relaxed: bool,
}

#[derive(Args, Debug)]
struct UploadCommand {
    /// Server entry in the host configuration file.
    #[arg(long)]
    server: String,

    #[arg(long)]
    page_id: String,

    #[arg(long = "file", required = true)]
    files: Vec<PathBuf>,

    /// Host configuration file; defaults to `$HOME/.claude.json`.
    #[arg(long, env = "SPECGRAPH_HOST_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Command::Diagram(args) => Outcome::from_result(diagram(args), Outcome::succeeded),
        Command::Extract(args) => Outcome::from_result(extract_graph(&args), Outcome::succeeded),
        Command::Upload(args) => Outcome::from_result(upload_files(args), Outcome::upload),
    };

    println!("{}", outcome.line);
    if outcome.success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn scan_mode(relaxed: bool) -> ScanMode {
    if relaxed { ScanMode::Relaxed } else { ScanMode::Strict }
}

// =============================================================================
// COMMANDS
// =============================================================================

fn diagram(args: DiagramCommand) -> Result<DiagramOutput, Error> {
    let kind: DiagramKind = args.kind.parse()?;
    let text = read_document(&args.input)?;
    let graph = extract(&text, scan_mode(args.relaxed));

    let request = RenderRequest { kind, title: args.title, output: args.output };
    let config = RenderConfig { dot: args.dot, icon_dir: args.icon_dir };
    let written = render::render(&graph, &request, &config)?;

    Ok(DiagramOutput { output: written.display().to_string(), kind })
}

fn extract_graph(args: &ExtractCommand) -> Result<Graph, Error> {
    let text = read_document(&args.input)?;
    Ok(extract(&text, scan_mode(args.relaxed)))
}

fn upload_files(args: UploadCommand) -> Result<upload::UploadReport, Error> {
    let path = match args.config {
        Some(path) => path,
        None => config::default_config_path()
            .ok_or_else(|| Error::Config("HOME is not set; pass --config".to_owned()))?,
    };
    debug!(config = %path.display(), server = %args.server, "loading credentials");
    let credentials = config::load(&path, &args.server)?;
    let client = ConfluenceClient::new(&credentials)?;

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(upload::run(&client, &args.page_id, &args.files))
}
