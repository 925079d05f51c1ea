use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use threadview_core::{
    USER_ROLE, ViewerConfig, Windows, load_archive, render_document, render_window,
    render_window_to_raw_json, render_windows_to_raw_json,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_PAGE_TITLE: &str = "Conversations";

#[derive(Debug, Parser)]
#[command(
    name = "threadview",
    version,
    about = "Render exported conversation archives as HTML"
)]
struct Cli {
    /// Path to an exported conversations JSON file
    archive: PathBuf,

    /// Only show messages written by the user
    #[arg(long, conflicts_with = "role")]
    user_only: bool,

    /// Only show messages with this author role (user, assistant, system, tool, ...)
    #[arg(long)]
    role: Option<String>,

    /// Index of the first thread to render
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Threads per window [default: THREADVIEW_BATCH_SIZE or 10]
    #[arg(long)]
    count: Option<NonZeroUsize>,

    /// Keep loading windows until the archive is exhausted
    #[arg(long)]
    all: bool,

    /// Output render units as JSON instead of HTML
    #[arg(long)]
    raw: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> threadview_core::Result<()> {
    let role_override = if cli.user_only {
        Some(USER_ROLE.to_string())
    } else {
        cli.role
    };
    let config = ViewerConfig::from_env()?.with_overrides(cli.count, role_override);
    let archive = load_archive(&cli.archive)?;
    let title = page_title(&cli.archive);

    info!(
        threads = archive.len(),
        batch_size = config.batch_size.get(),
        role_filter = config.role_filter().unwrap_or("<all>"),
        "rendering archive"
    );

    if cli.all {
        let windows = Windows::new(
            &archive,
            cli.start,
            config.batch_size,
            config.role_filter(),
        )
        .collect::<Vec<_>>();

        if cli.raw {
            print!("{}", render_windows_to_raw_json(&windows)?);
        } else {
            print!("{}", render_document(&title, &windows));
        }
        return Ok(());
    }

    let window = render_window(
        &archive,
        cli.start,
        config.batch_size,
        config.role_filter(),
    );

    if cli.raw {
        print!("{}", render_window_to_raw_json(&window)?);
    } else {
        print!(
            "{}",
            render_document(&title, std::slice::from_ref(&window))
        );
    }

    Ok(())
}

fn page_title(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or_else(
            || DEFAULT_PAGE_TITLE.to_string(),
            |name| format!("{DEFAULT_PAGE_TITLE}: {name}"),
        )
}
