use clap::{Parser, Subcommand};

/// Command-line interface definition for agavelog
/// Field operations CLI for tequila sampling staff backed by SQLite
#[derive(Parser)]
#[command(
    name = "agavelog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track sampling shifts, tallies and consumer feedback in a local SQLite store",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override session file path
    #[arg(global = true, long = "session")]
    pub session: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration, database and schema
    Init,

    /// Register a new employee account and sign in
    Register {
        #[arg(long, help = "Work email, used to sign in")]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long = "first-name")]
        first_name: String,

        #[arg(long = "last-name")]
        last_name: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "ambassador", help = "ambassador or supervisor")]
        role: String,
    },

    /// Sign in with email and password
    Login {
        email: String,
        password: String,
    },

    /// Clear the persisted session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List the sampling store locations
    Stores,

    /// Start a shift at a store (requires a session)
    Start {
        #[arg(long, help = "Store id, see 'agavelog stores'")]
        store: i64,
    },

    /// Update the activity counters of your open shift
    Tally {
        #[arg(long, help = "Sample cups used")]
        cups: Option<i64>,

        #[arg(long, help = "Cans used")]
        cans: Option<i64>,

        #[arg(long, help = "Blanco units sold")]
        blanco: Option<i64>,

        #[arg(long, help = "Reposado units sold")]
        reposado: Option<i64>,
    },

    /// End your open shift and record consumer feedback
    End {
        #[arg(long, help = "Questions consumers asked during the shift")]
        question: Option<String>,

        #[arg(long, help = "General consumer feedback")]
        feedback: Option<String>,
    },

    /// Show the consumer feedback recorded for a shift
    Feedback {
        #[arg(long, help = "Shift id, see 'agavelog shifts'")]
        shift: i64,
    },

    /// List recorded shifts
    Shifts {
        #[arg(long, help = "List shifts for all employees, not only yours")]
        all: bool,
    },
}
