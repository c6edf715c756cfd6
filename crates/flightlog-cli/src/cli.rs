use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use flightlog_core::VERSION;

/// Flightlog - checklist-style flight reports for drone operations
#[derive(Parser)]
#[command(name = "flightlog")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the report database
    #[arg(long, global = true, env = "FLIGHTLOG_DB")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colors
    #[arg(long, global = true)]
    pub no_color: bool,

    /// ASCII-only symbols
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Database path to record in the config
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// City used for weather lookups
    #[arg(long)]
    pub city: Option<String>,

    /// Skip seeding the demo drones and templates
    #[arg(long)]
    pub no_demo: bool,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `new` command
#[derive(Args)]
pub struct NewArgs {
    /// Report name (default: "Report from <date>")
    #[arg(long)]
    pub name: Option<String>,

    /// Report date, dd.mm.yyyy (default: today)
    #[arg(long)]
    pub date: Option<String>,

    /// Drone id or model
    #[arg(long)]
    pub drone: String,

    /// Report template id to start from
    #[arg(long)]
    pub template: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Author recorded on the report
    #[arg(long)]
    pub created_by: Option<String>,

    /// Read weather from a file instead of the weather service
    #[arg(long, value_name = "FILE")]
    pub weather_file: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Sort key accepted by `list`
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SortKey {
    Date,
    Drone,
}

/// Sort direction accepted by `list`
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Earliest report date, dd.mm.yyyy (inclusive)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest report date, dd.mm.yyyy (inclusive)
    #[arg(long)]
    pub to: Option<String>,

    /// Exact drone model ("_all" for every model)
    #[arg(long)]
    pub drone: Option<String>,

    /// Sort key
    #[arg(long, value_enum, default_value = "date")]
    pub sort: SortKey,

    /// Sort order
    #[arg(long, value_enum, default_value = "desc")]
    pub order: SortDirection,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Report ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Report ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New date, dd.mm.yyyy
    #[arg(long)]
    pub date: Option<String>,

    /// New notes (empty string clears them)
    #[arg(long)]
    pub notes: Option<String>,

    /// Replace the drone (id or model)
    #[arg(long)]
    pub drone: Option<String>,
}

/// Arguments for the `section` command
#[derive(Args)]
pub struct SectionArgs {
    /// Report ID
    #[arg(value_name = "REPORT")]
    pub report: String,

    #[command(subcommand)]
    pub command: SectionSubcommand,
}

#[derive(Subcommand)]
pub enum SectionSubcommand {
    /// Append an empty section
    Add {
        /// Section title (default: "New section <n>")
        #[arg(long)]
        title: Option<String>,
    },

    /// Append a copy of a section template
    AddTemplate {
        /// Section template ID
        #[arg(value_name = "TEMPLATE")]
        template: String,
    },

    /// Remove a section
    Remove {
        #[arg(value_name = "SECTION")]
        section: String,
    },

    /// Rename a section
    Rename {
        #[arg(value_name = "SECTION")]
        section: String,

        #[arg(value_name = "TITLE")]
        title: String,
    },

    /// Move a section from one position to another (0-based)
    Move {
        #[arg(value_name = "FROM")]
        from: usize,

        #[arg(value_name = "TO")]
        to: usize,
    },
}

/// Item type accepted on the command line
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ItemType {
    Checkbox,
    Text,
    Number,
    Select,
}

/// Arguments for the `item` command
#[derive(Args)]
pub struct ItemArgs {
    /// Report ID
    #[arg(value_name = "REPORT")]
    pub report: String,

    #[command(subcommand)]
    pub command: ItemSubcommand,
}

#[derive(Subcommand)]
pub enum ItemSubcommand {
    /// Append an item to a section
    Add {
        #[arg(value_name = "SECTION")]
        section: String,

        /// Item type
        #[arg(long = "type", value_enum, default_value = "checkbox")]
        kind: ItemType,

        /// Content (default: "New item <n>")
        #[arg(long)]
        content: Option<String>,
    },

    /// Remove a top-level item from a section
    Remove {
        #[arg(value_name = "SECTION")]
        section: String,

        #[arg(value_name = "ITEM")]
        item: String,
    },

    /// Update fields of a top-level item
    Set(ItemSetArgs),

    /// Move an item between positions or sections (0-based)
    Move {
        #[arg(value_name = "FROM_SECTION")]
        from_section: String,

        #[arg(value_name = "FROM_INDEX")]
        from_index: usize,

        #[arg(value_name = "TO_SECTION")]
        to_section: String,

        #[arg(value_name = "TO_INDEX")]
        to_index: usize,
    },
}

/// Arguments for `item set`
#[derive(Args)]
pub struct ItemSetArgs {
    #[arg(value_name = "SECTION")]
    pub section: String,

    #[arg(value_name = "ITEM")]
    pub item: String,

    /// New content
    #[arg(long)]
    pub content: Option<String>,

    /// Mark checked
    #[arg(long, conflicts_with = "uncheck")]
    pub check: bool,

    /// Mark unchecked
    #[arg(long)]
    pub uncheck: bool,

    /// Change the item type
    #[arg(long = "type", value_enum)]
    pub kind: Option<ItemType>,

    /// Value for text, number and select items
    #[arg(long)]
    pub value: Option<String>,

    /// Options for select items (repeatable)
    #[arg(long = "option", value_name = "OPTION")]
    pub options: Vec<String>,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Report ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Report ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output format (json, text)
    #[arg(long, default_value = "json")]
    pub format: String,

    /// Directory to write into (default: config or current directory)
    #[arg(long, value_name = "DIR")]
    pub out: Option<String>,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// JSON export file
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Replace a stored report with the same ID
    #[arg(long)]
    pub replace: bool,
}

/// Template catalog selector
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TemplateKind {
    Drones,
    Sections,
    Reports,
}

/// Arguments for the `templates` command
#[derive(Args)]
pub struct TemplatesArgs {
    /// Catalog to list
    #[arg(value_enum)]
    pub kind: TemplateKind,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `weather` command
#[derive(Args)]
pub struct WeatherArgs {
    /// Ignore the cache and fetch now
    #[arg(long)]
    pub refresh: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default config, create the database and seed demo data
    Init(InitArgs),

    /// Create and save a new report
    New(NewArgs),

    /// List reports
    List(ListArgs),

    /// Show a report
    Show(ShowArgs),

    /// Edit report name, date, notes or drone
    Edit(EditArgs),

    /// Edit the sections of a report
    Section(SectionArgs),

    /// Edit the items of a report
    Item(ItemArgs),

    /// Delete a report
    Delete(DeleteArgs),

    /// Export a report to a file
    Export(ExportArgs),

    /// Import a report from a JSON export
    Import(ImportArgs),

    /// List drones and templates
    Templates(TemplatesArgs),

    /// Show current weather
    Weather(WeatherArgs),

    /// Check database integrity
    Check,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
