// classfront: tokenizer, parser and token/tree viewer for a small class language

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use thiserror::Error;
use tracing::{debug, Level};

use classfront::analysis::{analyze, Analysis, Outcome};
use classfront::config::{AnalyzerConfig, CommentStyle};
use classfront::parser::{AstNode, NodeKind, SourceLocation, Token};
use classfront::report;
use classfront::ui::App;

#[derive(Parser)]
#[command(name = "classfront", version, about = "Tokenize and parse class-language sources")]
struct Cli {
    /// How `//` comments end
    #[arg(long, global = true, value_enum, default_value_t = CommentArg::RestOfLine)]
    comments: CommentArg,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a source file
    Tokens {
        /// Source file path
        file: PathBuf,
        /// Only list tokens the lexer could not classify
        #[arg(long)]
        unknown_only: bool,
        #[arg(long, value_enum, default_value_t = TokenFormat::Table)]
        format: TokenFormat,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse a source file and print its syntax tree
    Parse {
        /// Source file path
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = TreeFormat::Tree)]
        format: TreeFormat,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Browse source, tokens and tree in the terminal
    View {
        /// Source file path
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CommentArg {
    RestOfLine,
    Delimited,
}

impl From<CommentArg> for CommentStyle {
    fn from(arg: CommentArg) -> Self {
        match arg {
            CommentArg::RestOfLine => CommentStyle::RestOfLine,
            CommentArg::Delimited => CommentStyle::Delimited,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TokenFormat {
    Table,
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TreeFormat {
    Tree,
    Json,
}

#[derive(Debug, Error)]
enum CommandError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write output: {0}")]
    Write(#[source] io::Error),
    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),
    #[error("cannot serialize output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("analysis reported {0} error(s)")]
    Failed(usize),
}

impl CommandError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CommandError::Failed(_) => ExitCode::from(1),
            _ => ExitCode::from(2),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AnalyzerConfig::default().with_comment_style(cli.comments.into());

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            err.exit_code()
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}

fn run(command: Commands, config: &AnalyzerConfig) -> Result<(), CommandError> {
    match command {
        Commands::Tokens {
            file,
            unknown_only,
            format,
            output,
        } => {
            let source = read_source(&file)?;
            let analysis = analyze(&source, config);

            let tokens: Vec<Token> = if unknown_only {
                analysis.unknown_tokens().cloned().collect()
            } else {
                analysis.tokens.clone()
            };

            let rendered = match format {
                TokenFormat::Table => report::render_token_table(&tokens),
                TokenFormat::Csv => report::tokens_to_csv(&tokens),
                TokenFormat::Json => report::to_json(&tokens)? + "\n",
            };
            write_output(output.as_deref(), &rendered)?;

            match &analysis.outcome {
                Outcome::LexicalFailure(_) => report_failure(&file, &analysis),
                _ => Ok(()),
            }
        }
        Commands::Parse {
            file,
            format,
            output,
        } => {
            let source = read_source(&file)?;
            let analysis = analyze(&source, config);

            let ast = match &analysis.outcome {
                Outcome::Parsed(ast) => ast.clone(),
                Outcome::Empty => AstNode::new(NodeKind::Program, Vec::new(), SourceLocation::default()),
                Outcome::LexicalFailure(_) | Outcome::SyntaxFailure(_) => {
                    return report_failure(&file, &analysis);
                }
            };

            let rendered = match format {
                TreeFormat::Tree => report::render_tree(&ast),
                TreeFormat::Json => report::to_json(&ast)? + "\n",
            };
            write_output(output.as_deref(), &rendered)
        }
        Commands::View { file } => {
            let source = read_source(&file)?;
            let analysis = analyze(&source, config);
            run_viewer(&file, source, analysis).map_err(CommandError::Terminal)
        }
    }
}

fn read_source(path: &Path) -> Result<String, CommandError> {
    debug!(path = %path.display(), "reading source");
    fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<(), CommandError> {
    match path {
        Some(path) => fs::write(path, contents).map_err(CommandError::Write),
        None => io::stdout()
            .lock()
            .write_all(contents.as_bytes())
            .map_err(CommandError::Write),
    }
}

/// Print every diagnostic prefixed with the file name, then fail.
fn report_failure(file: &Path, analysis: &Analysis) -> Result<(), CommandError> {
    let diagnostics = analysis.diagnostics();
    for diag in &diagnostics {
        eprintln!("{}: {}: {}", file.display(), diag.stage, diag);
    }
    Err(CommandError::Failed(diagnostics.len()))
}

fn run_viewer(file: &Path, source: String, analysis: Analysis) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(file.display().to_string(), source, analysis);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
