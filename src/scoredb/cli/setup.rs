use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "scoredb",
    bin_name = "scoredb",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Manage a database of LilyPond score excerpts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Database root (defaults to the nearest directory holding scoredb.json)
    #[arg(long, global = true, env = "SCOREDB_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Database,
    Score,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Database => "Database Commands:",
            CommandGroup::Score => "Per-Score Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "checkout" | "check_integrity" | "export_all" => Some(CommandGroup::Database),
            "view" | "export" | "listen" => Some(CommandGroup::Score),
            "init" | "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::Database, CommandGroup::Score, CommandGroup::Misc]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("scoredb {version}\n"));
    output.push_str("Manage a database of LilyPond score excerpts\n");
    output.push('\n');
    output.push_str("Usage: scoredb [OPTIONS] <COMMAND>\n");
    output.push_str("       scoredb help <COMMAND>\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<16} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --root <DIR>  Database root [env: SCOREDB_ROOT]\n");
    output.push_str("  -v, --verbose     Verbose output\n");
    output.push_str("  -h, --help        Print help\n");
    output.push_str("  -V, --version     Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a command by name, accepting aliases.
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name || subcmd.get_all_aliases().any(|alias| alias == name) {
            let help = subcmd.render_long_help();
            print!("{}", help);
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    eprint!("{}", get_grouped_help());
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all excerpt IDs in the database
    #[command(display_order = 1)]
    List,

    /// Copy the excerpts named in a list file into a new database
    #[command(
        display_order = 2,
        long_about = "Check out all related excerpts as defined by LISTFILE.\n\n\
            LISTFILE is a whitespace-separated list of IDs. DESTINATION must not\n\
            exist; it is created along with its data directory, a scoredb.json\n\
            and the database documentation.\n\n\
            Example: LISTFILE contains \"1 2 123\" and SEPARATOR is \"_\".\n\
            These files are checked out: 1_1, 1_2, 2_1_2, 123_1, etc."
    )]
    Checkout {
        /// File listing the IDs to check out
        #[arg(value_name = "LISTFILE")]
        list_file: PathBuf,

        /// Directory to create
        #[arg(value_name = "DESTINATION")]
        dest: PathBuf,

        /// Delimiter between an ID and its variant [default: from scoredb.json, "_"]
        separator: Option<String>,
    },

    /// Render scores to find broken files
    #[command(
        name = "check_integrity",
        alias = "check-integrity",
        display_order = 3,
        long_about = "Run every score through LilyPond to find broken files. Broken\n\
            files are invalid LilyPond, or produce no PDF or no MIDI output.\n\n\
            Both \"123_1\" and \"123_1.ly\" are valid IDs. Without IDs, every file\n\
            in the database is checked."
    )]
    CheckIntegrity {
        /// Excerpts to check (default: all)
        #[arg(value_name = "ID")]
        ids: Vec<String>,
    },

    /// Render all scores and concatenate them into one PDF
    #[command(
        name = "export_all",
        alias = "export-all",
        display_order = 4,
        long_about = "Export all excerpts as PDF in a temporary directory, and concatenate\n\
            them into DESTINATION.\n\n\
            If KEEP_TEMP_FILES is \"keep\", the temporary directory is not deleted\n\
            after concatenation. Useful for generating individual PDFs and MIDIs."
    )]
    ExportAll {
        /// Output PDF (".pdf" is appended when missing)
        #[arg(value_name = "DESTINATION")]
        dest: String,

        /// "keep" or "discard"
        #[arg(value_name = "KEEP_TEMP_FILES", default_value = "discard")]
        keep_temp_files: String,
    },

    /// Generate a PDF and open it in the system viewer
    #[command(display_order = 10)]
    View {
        /// Excerpt ID
        id: String,
    },

    /// Export one score as PDF
    #[command(display_order = 11)]
    Export {
        /// Excerpt ID
        id: String,

        /// Output PDF [default: <ID>.pdf]
        #[arg(value_name = "DESTINATION")]
        dest: Option<String>,
    },

    /// Generate MIDI and play it with COMMAND
    #[command(
        display_order = 12,
        long_about = "Call COMMAND to play the MIDI generated from the score. The MIDI\n\
            file name is appended to COMMAND.\n\n\
            Example: scoredb listen 123_1 \"aplaymidi --port=129:0\""
    )]
    Listen {
        /// Excerpt ID
        id: String,

        /// Player command line
        command: String,
    },

    /// Create scoredb.json, the data directory and a README
    #[command(display_order = 20)]
    Init,

    /// Get or set configuration
    #[command(display_order = 21)]
    Config {
        /// data-dir, extension, separator, render-tool or merge-tool
        key: Option<String>,

        /// New value
        value: Option<String>,
    },

    /// Print help for a command
    #[command(display_order = 22)]
    Help {
        /// Command to describe
        #[arg(value_name = "ACTION")]
        action: Option<String>,
    },
}
