// Rust guideline compliant 2026-08-03

//! Cairn CLI Application
//!
//! Command-line interface for the Cairn issue tracking system.

use clap::Parser;

mod commands;
mod context;
mod output;

#[derive(Parser, Debug)]
#[command(
    name = "cairn",
    version,
    about = "Cairn: git-backed file-per-record issue tracking",
    long_about = "Cairn stores issues and threaded comments as YAML files in a sharded \
directory tree inside your repository, with the status workflow defined by a small \
state-diagram file.",
    after_help = "Examples:\n  cairn init\n  cairn create \"Fix login flow\" --severity high --label auth,login\n  cairn list --status open\n  cairn show abc1234\n  cairn comment abc1234 \"Reproduced on main\" --reply-to ddd5678\n  cairn status abc1234 active\n  cairn history abc1234 --diff HEAD~1\n"
)]
struct Cli {
    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Initialize a Cairn repository
    Init,

    /// Create a new issue
    Create {
        /// Title of the issue
        title: String,

        /// Markdown body
        #[arg(long)]
        body: Option<String>,

        /// Severity (low, medium, high, critical)
        #[arg(long)]
        severity: Option<String>,

        /// Assignee username
        #[arg(long)]
        assignee: Option<String>,

        /// Labels to assign
        #[arg(long, value_delimiter = ',')]
        label: Vec<String>,

        /// Author override
        #[arg(long)]
        author: Option<String>,
    },

    /// List issues
    List {
        /// Only issues in this status
        #[arg(long)]
        status: Option<String>,

        /// Include closed issues
        #[arg(long)]
        all: bool,
    },

    /// Show an issue and its comment thread
    Show {
        /// Issue ID
        id: String,
    },

    /// Add a comment to an issue
    Comment {
        /// Issue ID
        id: String,

        /// Comment text
        body: String,

        /// Parent comment ID
        #[arg(long)]
        reply_to: Option<String>,

        /// Author override
        #[arg(long)]
        author: Option<String>,
    },

    /// Change an issue's status
    Status {
        /// Issue ID
        id: String,

        /// Target state
        state: String,
    },

    /// Show the revision history of an issue's metadata file
    History {
        /// Issue ID
        id: String,

        /// Print the diff against this revision instead
        #[arg(long)]
        diff: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(cli.json),
        Commands::Create {
            title,
            body,
            severity,
            assignee,
            label,
            author,
        } => commands::create::execute(title, body, severity, assignee, label, author, cli.json),
        Commands::List { status, all } => commands::list::execute(status, all, cli.json),
        Commands::Show { id } => commands::show::execute(id, cli.json),
        Commands::Comment {
            id,
            body,
            reply_to,
            author,
        } => commands::comment::execute(id, body, reply_to, author, cli.json),
        Commands::Status { id, state } => commands::status::execute(id, state, cli.json),
        Commands::History { id, diff } => commands::history::execute(id, diff, cli.json),
    };

    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
