//! `ox-find`: run search and substitution commands over a file.
//!
//! The file is loaded into a buffer shown by a single view, the requested
//! commands are dispatched in order (`--find`, then each `--expr`, then each
//! `--command`), and the result is printed, highlighted, or written back.
//! Status messages go to stderr; any error-level message makes the process
//! exit non-zero.

use anyhow::{Context, Result, bail};
use clap::Parser;
use core_actions::io_ops::{OpenFileResult, WriteFileResult, open_file, write_file};
use core_actions::{SearchSession, execute_command};
use core_config::{Config, load_from, load_required};
use core_model::{EditorModel, View, ViewId};
use core_state::{EditorState, Severity};
use core_text::Position;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod output;

const LOG_FILE: &str = "ox-find.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "ox-find", version, about = "Regex search and substitution over a file")]
struct Args {
    /// File to load.
    pub path: PathBuf,
    /// Search for PATTERN and move the cursor to the next match.
    #[arg(long = "find", value_name = "PATTERN")]
    pub find: Option<String>,
    /// Substitution expression `[scope]s/find/replace/[flags]`; repeatable.
    #[arg(long = "expr", value_name = "EXPR")]
    pub expr: Vec<String>,
    /// Raw editor command line, e.g. `find-next-in-buffer`; repeatable.
    #[arg(long = "command", value_name = "CMD")]
    pub command: Vec<String>,
    /// Cursor line (1-based) the commands start from.
    #[arg(long = "line", default_value_t = 1)]
    pub line: usize,
    /// Configuration file path (overrides discovery of `ox-find.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Write the result back to the file instead of printing it.
    #[arg(long = "in-place", conflicts_with = "highlight")]
    pub in_place: bool,
    /// Print the buffer with the current matches highlighted.
    #[arg(long = "highlight")]
    pub highlight: bool,
}

impl Args {
    /// Command lines to dispatch, in execution order.
    fn command_lines(&self) -> Vec<String> {
        let find = self
            .find
            .iter()
            .map(|p| format!("find-in-buffer {}", quote(p)));
        let exprs = self
            .expr
            .iter()
            .map(|e| format!("find-and-replace {}", quote(e)));
        find.chain(exprs).chain(self.command.iter().cloned()).collect()
    }
}

/// Quote an argument for the command tokenizer.
fn quote(arg: &str) -> String {
    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');
    for ch in arg.chars() {
        if matches!(ch, '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global tracing subscriber already installed; drop guard so writer shuts down.
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => load_required(path),
        None => load_from(None),
    }
}

fn load_model(args: &Args) -> Result<EditorModel> {
    let opened = match open_file(&args.path) {
        OpenFileResult::Success(s) => s,
        OpenFileResult::Error => bail!("cannot open {}", args.path.display()),
    };
    let mut state = EditorState::new(opened.buffer);
    state.file_name = Some(opened.file_name);
    let cursor = Position::new(args.line.max(1), 0);
    let mut model = EditorModel::with_view(View::new(ViewId(0), 0, cursor), state);
    model.clamp_cursor();
    Ok(model)
}

/// Dispatch every command. Returns true when any of them reported an error.
fn run_commands(lines: &[String], session: &mut SearchSession, model: &mut EditorModel) -> bool {
    for line in lines {
        execute_command(line, session, model);
    }
    let mut failed = false;
    for entry in model.state_mut().drain_messages() {
        failed |= entry.severity == Severity::Error;
        eprintln!("{}", entry.text);
    }
    failed
}

fn run(args: Args) -> Result<bool> {
    let config = load_config(&args)?;
    let mut model = load_model(&args)?;
    let mut session = SearchSession::from_config(&config);
    let lines = args.command_lines();
    info!(
        target: "runtime.startup",
        path = %args.path.display(),
        commands = lines.len(),
        config_override = args.config.is_some(),
        "bootstrap_complete"
    );

    let failed = run_commands(&lines, &mut session, &mut model);

    if args.in_place {
        match write_file(model.state_mut(), None) {
            WriteFileResult::Success => {}
            other => bail!("write to {} failed: {other:?}", args.path.display()),
        }
    } else {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if args.highlight {
            output::write_highlighted(&mut out, &model, &session, config.file.render.styled)?;
        } else {
            output::write_plain(&mut out, &model)?;
        }
        out.flush().context("flushing output")?;
    }
    info!(target: "runtime", failed, "shutdown");
    Ok(failed)
}

fn main() -> Result<ExitCode> {
    let _log_guard = configure_logging();
    install_panic_hook();
    let args = Args::parse();
    let failed = run(args)?;
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
