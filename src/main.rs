#![forbid(unsafe_code)]
#![deny(warnings, clippy::all, clippy::pedantic)]

use std::path::PathBuf;
use std::process::ExitCode;

use backdate::{
    CommitWriter, DateSampler, DefaultClock, DefaultFsOps, DefaultGitRunner, Error, Overrides,
    RewriteOutcome, Settings, commits_by_date, commits_by_range, delete_last, filter_by_date,
    filter_by_range, load_settings,
    output::{Preview, TabStyle, format_tab, to_json},
    read_log,
    rewrite::{EditorCommand, HistoryRewriter, edit_todo_file},
};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Tab,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Fill a contribution graph with backdated commits, or remove them again."
)]
struct Args {
    /// Rebase instruction list to edit (invoked by git as the sequence editor)
    #[arg(long, value_name = "TODO_FILE", hide = true, requires = "deletion_set")]
    editor: Option<PathBuf>,

    /// Deletion set consulted in editor mode
    #[arg(long, value_name = "FILE", hide = true)]
    deletion_set: Option<PathBuf>,

    /// Delete all commits dated on this day
    #[arg(long, value_name = "YYYY-MM-DD", group = "mode")]
    delete_date: Option<NaiveDate>,

    /// Delete all commits dated between START and END, both inclusive
    #[arg(long, num_args = 2, value_names = ["START", "END"], group = "mode")]
    delete_range: Option<Vec<NaiveDate>>,

    /// Days to keep inside --delete-range (comma-separated YYYY-MM-DD)
    #[arg(
        long,
        value_name = "DATES",
        value_delimiter = ',',
        requires = "delete_range"
    )]
    exclude_date: Vec<NaiveDate>,

    /// Delete the last N commits with a hard reset
    #[arg(long, value_name = "N", group = "mode")]
    delete: Option<u64>,

    /// Create N backdated commits (default mode, count from config)
    #[arg(long, value_name = "N", group = "mode")]
    add: Option<u64>,

    /// Repository to operate on
    #[arg(long, value_name = "DIR")]
    repo: Option<PathBuf>,

    /// Config file (default: <repo>/backdate.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Remote to push to (overrides config)
    #[arg(long)]
    remote: Option<String>,

    /// Show the commits a delete would remove without changing anything
    #[arg(long, conflicts_with = "add")]
    dry_run: bool,

    /// Output format for --dry-run
    #[arg(long, value_enum, default_value_t = OutputFormat::Tab)]
    output: OutputFormat,

    /// Table style to use with --output tab
    #[arg(long, value_enum, default_value_t = TabStyle::Rounded)]
    tab_style: TabStyle,

    /// Print debug logs
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args);
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(args: &Args) {
    let default_level = if args.debug {
        "debug"
    } else if args.editor.is_some() {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn run(args: &Args) -> Result<(), Error> {
    // clap requires --deletion-set alongside --editor
    if let (Some(todo), Some(set)) = (&args.editor, &args.deletion_set) {
        edit_todo_file(set, todo)?;
        return Ok(());
    }

    let deleting =
        args.delete_date.is_some() || args.delete_range.is_some() || args.delete.is_some();
    if args.dry_run && !deleting {
        return Err(Error::InvalidInput {
            message: "--dry-run needs --delete-date, --delete-range or --delete".to_string(),
        });
    }

    let overrides = Overrides {
        repo: args.repo.clone(),
        config: args.config.clone(),
        remote: args.remote.clone(),
    };
    let settings = load_settings(&overrides, &DefaultFsOps)?;
    let git = DefaultGitRunner;

    if let Some(day) = args.delete_date {
        if args.dry_run {
            let log = read_log(&settings.repo, &git, None)?;
            let commits = filter_by_date(&log, day, &Local).into_iter().cloned().collect();
            print_preview(args, format!("Commits on {day}"), commits);
            return Ok(());
        }
        let hashes = commits_by_date(&settings.repo, &git, day)?;
        return delete_hashes(&settings, &git, &hashes);
    }

    if let Some(&[start, end]) = args.delete_range.as_deref() {
        if args.dry_run {
            let log = read_log(&settings.repo, &git, None)?;
            let commits = filter_by_range(&log, start, end, &args.exclude_date, &Local)
                .into_iter()
                .cloned()
                .collect();
            print_preview(args, format!("Commits from {start} to {end}"), commits);
            return Ok(());
        }
        let hashes = commits_by_range(&settings.repo, &git, start, end, &args.exclude_date)?;
        return delete_hashes(&settings, &git, &hashes);
    }

    if let Some(n) = args.delete {
        if args.dry_run {
            let commits = read_log(&settings.repo, &git, Some(n))?;
            print_preview(args, format!("Last {n} commits"), commits);
            return Ok(());
        }
        return delete_last(&settings, &git, n);
    }

    let count = args.add.unwrap_or(settings.default_count);
    let sampler = DateSampler::new(rand::thread_rng());
    CommitWriter::new(&settings, &git, &DefaultClock, sampler).run(count)
}

fn delete_hashes(
    settings: &Settings,
    git: &DefaultGitRunner,
    hashes: &[String],
) -> Result<(), Error> {
    let mut rewriter = HistoryRewriter::new(settings, git, EditorCommand::current_exe()?);
    match rewriter.delete_by_hashes(hashes)? {
        RewriteOutcome::NothingToDelete => println!("No commits found to delete."),
        RewriteOutcome::Rewritten { selected } => {
            println!("Deleted {selected} commits and force pushed.");
        }
    }
    Ok(())
}

fn print_preview(args: &Args, title: String, commits: Vec<backdate::Commit>) {
    let preview = Preview { title, commits };
    let out = match args.output {
        OutputFormat::Tab => format_tab(&preview, args.tab_style),
        OutputFormat::Json => to_json(&preview),
    };
    println!("{out}");
}
