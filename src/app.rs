use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::{error, info};

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::layout::TableLayout;
use crate::loader::{self, DataSource, LoadState, LoaderOptions};
use crate::output::{self, Renderer};
use crate::session::Session;
use crate::signal::Collection;
use crate::view::ViewState;

/// How a run ended when it did not fail outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Shown,
    LoadFailed,
}

fn format_kv_line(label: &str, value: &str) {
    eprintln!(":: {:<10}: {}", label, value);
}

#[derive(Clone, Debug)]
struct RunConfig {
    source: DataSource,
    loader: LoaderOptions,
    no_color: bool,
    verbose: u8,
    filter: String,
    page: usize,
    select: Option<usize>,
    interactive: bool,
    output: Option<String>,
    output_format: Option<String>,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let source = args
        .data
        .or(cfg.data)
        .map(|d| DataSource::parse(&d))
        .unwrap_or_default();

    let timeout_seconds = args.timeout.or(cfg.timeout).unwrap_or(10);
    if timeout_seconds == 0 {
        return Err("invalid timeout, expected positive number of seconds".to_string());
    }
    let proxy = args.proxy.or(cfg.proxy).filter(|p| !p.trim().is_empty());

    let page = args.page.or(cfg.page).unwrap_or(1);
    if page == 0 {
        return Err("invalid page, expected positive integer".to_string());
    }
    let filter = args.filter.or(cfg.filter).unwrap_or_default();

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = args.output_format.or(cfg.output_format);
    if let Some(raw) = output_format.as_deref() {
        if output::OutputFormat::parse(raw).is_none() {
            return Err(format!("invalid output format '{raw}', expected text or json"));
        }
    }

    Ok(RunConfig {
        source,
        loader: LoaderOptions {
            timeout_seconds,
            proxy,
        },
        no_color,
        verbose: args.verbose,
        filter,
        page,
        select: args.select,
        interactive: args.interactive,
        output,
        output_format,
    })
}

fn initial_state(run: &RunConfig) -> ViewState {
    ViewState {
        filter_text: run.filter.clone(),
        current_page: run.page,
        ..ViewState::default()
    }
}

async fn load_with_spinner(run: &RunConfig) -> Result<LoadState, String> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_draw_target(ProgressDrawTarget::stderr());
    spinner.set_style(
        ProgressStyle::with_template(":: {spinner} {msg}")
            .map_err(|e| format!("failed to build spinner style: {e}"))?,
    );
    spinner.set_message(format!("loading {}", run.source.describe()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let state: LoadState = loader::load(&run.source, &run.loader).await.into();
    spinner.finish_and_clear();
    Ok(state)
}

fn write_export(
    run: &RunConfig,
    layout: &TableLayout,
    state: &ViewState,
    collection: &Collection,
) -> Result<(), String> {
    let Some(path) = run.output.as_deref() else {
        return Ok(());
    };
    let format = output::resolve_format(run.output_format.as_deref(), path);
    let view = state.derive(collection);
    let rendered = output::render_export(format, &layout.columns, &view.rows);
    std::fs::write(path, rendered)
        .map_err(|e| format!("failed to write output file '{path}': {e}"))?;
    info!(path, rows = view.rows.len(), "exported visible rows");
    format_kv_line("Output", &format!("{} rows -> {}", view.rows.len(), path));
    Ok(())
}

fn present<W: Write>(
    run: &RunConfig,
    layout: &TableLayout,
    collection: &Collection,
    out: &mut W,
) -> Result<(), String> {
    let renderer = Renderer::new(!run.no_color);
    let mut state = initial_state(run);

    if run.interactive {
        let stdin = std::io::stdin();
        let mut session = Session::new(collection, layout, renderer, state);
        session
            .run(stdin.lock(), &mut *out)
            .map_err(|e| format!("interactive session failed: {e}"))?;
        return write_export(run, layout, session.state(), collection);
    }

    if let Some(row) = run.select {
        let view = state.derive(collection);
        let signal = row
            .checked_sub(1)
            .and_then(|idx| view.rows.get(idx))
            .cloned()
            .ok_or_else(|| {
                format!("row {row} is not visible ({} rows shown)", view.rows.len())
            })?;
        state.select_row(signal);
    }

    let view = state.derive(collection);
    write!(out, "{}", renderer.frame(layout, &state, &view))
        .and_then(|_| out.flush())
        .map_err(|e| format!("failed to write to stdout: {e}"))?;

    write_export(run, layout, &state, collection)
}

/// Writes what a finished load produces: the board on success, only the
/// error panel on failure.
fn show<W: Write>(
    run: &RunConfig,
    layout: &TableLayout,
    state: LoadState,
    out: &mut W,
) -> Result<Status, String> {
    match state {
        LoadState::Success(collection) => {
            format_kv_line(
                "Source",
                &format!("{} ({} signals)", run.source.describe(), collection.len()),
            );
            present(run, layout, &collection, out)?;
            Ok(Status::Shown)
        }
        LoadState::Error(e) => {
            error!(error = %e, "failed to load signals");
            write!(out, "{}", Renderer::new(!run.no_color).error_panel())
                .and_then(|_| out.flush())
                .map_err(|e| format!("failed to write to stdout: {e}"))?;
            Ok(Status::LoadFailed)
        }
        LoadState::Pending => Err("load finished without a result".to_string()),
    }
}

async fn run_async(run: RunConfig) -> Result<Status, String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    let layout = TableLayout::embedded()?;
    let state = load_with_spinner(&run).await?;
    show(&run, &layout, state, &mut std::io::stdout().lock())
}

fn config_path(args: &CliArgs) -> Option<(PathBuf, bool)> {
    match args.config.as_deref() {
        Some(p) => Some((config::expand_tilde(p), false)),
        None => config::default_config_path().map(|p| (p, true)),
    }
}

pub fn run_cli() -> Result<Status, String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                return Ok(Status::Shown);
            }
            _ => return Err(e.to_string()),
        },
    };

    crate::logging::init(args.verbose, args.no_color && !args.color);

    if args.init_config {
        let (path, _) = config_path(&args)
            .ok_or_else(|| "could not determine a config location, pass --config".to_string())?;
        config::ensure_default_config_file(&path)?;
        format_kv_line("Config", &path.display().to_string());
        return Ok(Status::Shown);
    }

    let cfg = match config_path(&args) {
        Some((path, allow_missing)) => config::load_config(&path, allow_missing)?,
        None => ConfigFile::default(),
    };

    let run = build_run_config(args, cfg)?;
    info!(source = %run.source.describe(), verbose = run.verbose, "starting");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
