use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "signalboard",
    version,
    about = "terminal viewer for ranked company signal datasets",
    long_about = "Signalboard loads a JSON dataset of company signals and shows it as a filterable, paginated table with a detail view per row.\n\nExamples:\n  signalboard -d ./data/specterData.json\n  signalboard -d ./data/specterData.json --filter acme --page 2 --select 1\n  signalboard -d https://example.com/signals.json --interactive\n\nTip: Use --config to persist the dataset location and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v debug, -vv trace)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'd',
        long = "ds",
        visible_aliases = ["data", "dataset"],
        value_name = "PATH|URL",
        help_heading = "Input",
        help = "JSON dataset to load, a file path or an http(s) URL (defaults to ./data/specterData.json)."
    )]
    pub data: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.signalboard/config.yml if present)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Input",
        help = "Write a commented default config file and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Request timeout in seconds for URL datasets."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'f',
        long = "flt",
        visible_alias = "filter",
        value_name = "TEXT",
        help_heading = "View",
        help = "Only show signals whose name or domain contains TEXT (case-sensitive)."
    )]
    pub filter: Option<String>,

    #[arg(
        short = 'P',
        long = "pg",
        visible_alias = "page",
        value_name = "N",
        help_heading = "View",
        help = "Page to show (1-based)."
    )]
    pub page: Option<usize>,

    #[arg(
        short = 's',
        long = "sel",
        visible_alias = "select",
        value_name = "ROW",
        help_heading = "View",
        help = "Open the detail view for visible row ROW (1-based)."
    )]
    pub select: Option<usize>,

    #[arg(
        short = 'i',
        long = "int",
        visible_alias = "interactive",
        help_heading = "View",
        help = "Start an interactive session (type 'help' for commands)."
    )]
    pub interactive: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the visible rows to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text or json)."
    )]
    pub output_format: Option<String>,
}
