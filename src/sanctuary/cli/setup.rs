use clap::{Parser, Subcommand};
use sanctuary::model::ResourceKind;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.0" for releases, "0.3.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

fn parse_kind(s: &str) -> Result<ResourceKind, String> {
    s.parse().map_err(|e: sanctuary::error::SanctuaryError| {
        format!("{} (expected one of video, book, article, course, tool)", e)
    })
}

#[derive(Parser, Debug)]
#[command(name = "sanctuary", bin_name = "sanctuary", version = get_version())]
#[command(about = "A curated library of learning resources", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $SANCTUARY_DATA_DIR, then the OS data dir)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List resources
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only resources of this type
        #[arg(short = 't', long = "type", value_parser = parse_kind)]
        kind: Option<ResourceKind>,

        /// Only resources carrying this tag (name or id, repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Search term matched against title and description
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one resource
    #[command(alias = "v", display_order = 2)]
    Show { id: String },

    /// Add a resource
    #[command(alias = "n", display_order = 3)]
    Add {
        /// video, book, article, course or tool
        #[arg(value_parser = parse_kind)]
        kind: ResourceKind,

        title: String,

        url: String,

        #[arg(short = 'D', long)]
        description: Option<String>,

        /// Tag name or id (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Use this id instead of a generated one
        #[arg(long)]
        id: Option<String>,
    },

    /// Change fields of a resource
    #[command(alias = "e", display_order = 4)]
    Update {
        id: String,

        #[arg(short = 't', long = "type", value_parser = parse_kind)]
        kind: Option<ResourceKind>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        url: Option<String>,

        #[arg(short = 'D', long)]
        description: Option<String>,

        /// Replace the tags (name or id, repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Remove all tags
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,
    },

    /// Delete one or more resources
    #[command(alias = "rm", display_order = 5)]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Manage tags (lists them without a subcommand)
    #[command(display_order = 10)]
    Tags {
        #[command(subcommand)]
        command: Option<TagCommands>,
    },

    /// Browse the video catalogue
    #[command(display_order = 20)]
    Videos {
        /// Search term matched against titles
        #[arg(short, long)]
        search: Option<String>,

        /// Only videos carrying this tag (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Print the player link of this video
        #[arg(long, value_name = "ID", conflicts_with = "import")]
        open: Option<String>,

        /// Add the catalogue to the library as video resources
        #[arg(long)]
        import: bool,
    },

    /// Submit a YouTube video to the catalogue
    #[command(display_order = 21)]
    Submit {
        url: String,

        /// Tag for the video (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },

    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (e.g., video-source)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// List tags
    #[command(alias = "ls")]
    List {
        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        search: Option<String>,
    },

    /// Add a tag
    Add {
        name: String,

        #[arg(short, long)]
        category: Option<String>,
    },

    /// Rename or recategorize a tag
    Update {
        /// Tag name or id
        tag: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(short, long, conflicts_with = "uncategorize")]
        category: Option<String>,

        /// Remove the category
        #[arg(long)]
        uncategorize: bool,
    },

    /// Delete one or more tags
    #[command(alias = "rm")]
    Delete {
        /// Tag names or ids
        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,
    },

    /// List categories in use
    Categories,
}
