use clap::Parser;

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "A terminal Pokédex for the original 151.")]
#[command(version)]
pub struct Cli {
    /// Print the roster and exit
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Print roster entries whose name or number contains TERM
    #[arg(short = 's', long, value_name = "TERM")]
    pub search: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Also download and open the entry's cry
    #[arg(short = 'c', long)]
    pub cry: bool,

    /// Choose color theme
    #[arg(short = 'T', long)]
    pub theme: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    /// Entry number or name; omit to start the interactive browser
    #[arg(num_args = 1..)]
    pub query: Vec<String>,
}
