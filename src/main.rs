use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use discogs2xlsx::{
    Verbosity, cli, config, error, info,
    types::{CatalogKind, Currency},
    utils,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Only print warnings and errors
    #[clap(short, long, global = true, conflicts_with = "debug")]
    quiet: bool,

    /// Print request-level details
    #[clap(long, global = true)]
    debug: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Export the Discogs collection
    Collection(ExportOptions),

    /// Export the Discogs wantlist
    Wantlist(ExportOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ExportOptions {
    /// Discogs personal access token
    #[clap(short, long, env = "DISCOGS_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Currency of the lowest price and price suggestions
    #[clap(
        short,
        long,
        default_value_t = Currency::default(),
        value_parser = utils::parse_currency
    )]
    pub currency: Currency,

    /// Fetch release details (community counts, notes, lowest price)
    #[clap(short, long)]
    pub details: bool,

    /// Fetch price suggestions per media grade
    #[clap(short, long)]
    pub prices: bool,

    /// Output file [default: discogs-collection.xlsx or discogs-wantlist.xlsx]
    #[clap(short, long)]
    pub file: Option<PathBuf>,
}

impl From<ExportOptions> for cli::ExportSettings {
    fn from(opt: ExportOptions) -> Self {
        cli::ExportSettings {
            token: opt.token,
            currency: opt.currency,
            details: opt.details,
            prices: opt.prices,
            file: opt.file,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    discogs2xlsx::set_verbosity(match (cli.quiet, cli.debug) {
        (true, _) => Verbosity::Quiet,
        (_, true) => Verbosity::Debug,
        _ => Verbosity::Normal,
    });

    match cli.command {
        Command::Collection(opt) => {
            header();
            cli::export(CatalogKind::Collection, opt.into()).await
        }
        Command::Wantlist(opt) => {
            header();
            cli::export(CatalogKind::Wantlist, opt.into()).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

fn header() {
    info!(
        "{} version {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
}
