use clap::Parser;

#[derive(Parser)]
#[command(name = "omnilate")]
#[command(about = "Type text, get a translation. Falls back across services when one fails.")]
#[command(version)]
pub struct Cli {
    /// Source language (overrides the input prefix and the configured default)
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// Target language (overrides the input prefix and the configured default)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Use only this service, without fallback (google, lingva, deepl)
    #[arg(short = 's', long)]
    pub service: Option<String>,

    /// Don't use cached result
    #[arg(short = 'n', long)]
    pub nocache: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Choose color theme
    #[arg(short = 'T', long)]
    pub theme: Option<String>,

    /// Validate and store the API key of a service (key read from --key or the config)
    #[arg(long, value_name = "SERVICE")]
    pub validate: Option<String>,

    /// API key used with --validate
    #[arg(long, requires = "validate")]
    pub key: Option<String>,

    /// List the known translation services
    #[arg(long)]
    pub list_services: bool,

    /// Remove expired entries from the result cache
    #[arg(long)]
    pub prune_cache: bool,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    /// Text to translate, optionally starting with `src:tgt`
    #[arg(num_args = 1..)]
    pub query: Vec<String>,
}
