use clap::Subcommand;
use std::path::PathBuf;

pub mod find;
pub mod info;
pub mod list;
pub mod show;

#[derive(Subcommand)]
pub enum Commands {
    /// Show header information and statistics for a package
    Info {
        /// Package file
        source: PathBuf,
    },

    /// List resources in a package
    List {
        /// Package file
        source: PathBuf,

        /// Only list resources of this type id (hex, e.g. "0333406C")
        #[arg(short = 't', long = "type")]
        type_id: Option<String>,

        /// Show offsets, sizes and compression
        #[arg(short, long)]
        detailed: bool,

        /// Only show count of matching resources
        #[arg(short, long)]
        count: bool,

        /// Print the decoded index as JSON
        #[arg(long, conflicts_with_all = ["detailed", "count"])]
        json: bool,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show a single resource by TGI key
    Show {
        /// Package file
        source: PathBuf,

        /// Resource key as TYPE:GROUP:INSTANCE
        key: String,
    },

    /// Find package files in a directory
    Find {
        /// Directory to search (recursive)
        dir: PathBuf,
    },
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Info { source } => info::execute(source),
            Commands::List {
                source,
                type_id,
                detailed,
                count,
                json,
                quiet,
            } => list::execute(
                source,
                type_id.as_deref(),
                *detailed,
                *count,
                *json,
                *quiet,
            ),
            Commands::Show { source, key } => show::execute(source, key),
            Commands::Find { dir } => find::execute(dir),
        }
    }
}

/// Format byte size for display
pub(crate) fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
