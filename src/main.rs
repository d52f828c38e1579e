mod build_cmd;
mod history_cmd;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use gdork::config::Config;

use build_cmd::FieldArgs;
use history_cmd::Session;

#[derive(Parser)]
#[command(
    name = "gdork",
    version,
    about = "Compose, preview and keep Google dork search queries"
)]
struct Cli {
    /// Show diagnostic details on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// History file to use instead of the configured one
    #[arg(long, global = true, env = "GDORK_HISTORY_PATH", value_name = "PATH")]
    history_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the assembled query
    Build {
        #[command(flatten)]
        fields: FieldArgs,
        /// Print the search URL instead of the bare query
        #[arg(long)]
        url: bool,
    },
    /// Open the assembled query in the default browser
    Open {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Save the assembled query to history
    Save {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// List recognised fields, their operators and filetype presets
    Fields,
    /// Browse and manage saved queries
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved queries in the order they were saved
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Case-insensitive search over saved queries
    Search {
        /// Text to look for (empty matches everything)
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a saved query and the fields that produced it
    Show {
        /// Entry ID as shown by `history list`
        id: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete one or more saved queries
    Delete {
        /// Entry IDs as shown by `history list`
        #[arg(required = true)]
        ids: Vec<usize>,
    },
    /// Write every saved query to a plain-text file, one per line
    Export {
        /// Target file (default: `[history] export_file`, else dork_history.txt)
        path: Option<PathBuf>,
    },
}

fn or_exit(r: anyhow::Result<i32>) -> i32 {
    r.unwrap_or_else(|e| {
        eprintln!("[gdork] error: {e:#}");
        1
    })
}

fn main() {
    let cli = Cli::parse();
    gdork::logging::init(cli.verbose);

    let session = Session {
        config: Config::load(),
        history_file: cli.history_file.clone(),
    };
    tracing::debug!(
        "history file: {:?}",
        session.config.history_file(session.history_file.as_deref())
    );

    let exit_code = match &cli.command {
        Commands::Build { fields, url } => or_exit(build_cmd::cmd_build(fields, *url, &session)),
        Commands::Open { fields } => or_exit(build_cmd::cmd_open(fields, &session)),
        Commands::Save { fields } => or_exit(build_cmd::cmd_save(fields, &session)),
        Commands::Fields => build_cmd::cmd_fields(),
        Commands::History { action } => or_exit(match action {
            HistoryAction::List { json } => history_cmd::cmd_history_list(&session, *json),
            HistoryAction::Search { query, json } => {
                history_cmd::cmd_history_search(&session, query, *json)
            }
            HistoryAction::Show { id, json } => {
                history_cmd::cmd_history_show(&session, *id, *json)
            }
            HistoryAction::Delete { ids } => history_cmd::cmd_history_delete(&session, ids),
            HistoryAction::Export { path } => {
                history_cmd::cmd_history_export(&session, path.as_deref())
            }
        }),
    };
    std::process::exit(exit_code);
}
