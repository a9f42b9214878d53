use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playsort::{cli, config, error};

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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Split a playlist into lyrical and instrumental playlists
    Vibe(VibeArgs),

    /// Sort liked songs into Indian and international playlists
    Cultura(CulturaArgs),

    /// Show the active rule tables or export the built-in ones
    Rules(RulesArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct VibeArgs {
    /// Name of the playlist to split
    #[clap(long)]
    pub playlist: String,

    /// Clear existing target playlists without asking
    #[clap(long, conflicts_with = "keep")]
    pub clear: bool,

    /// Keep tracks already in the target playlists without asking
    #[clap(long)]
    pub keep: bool,

    /// Classify and report only, do not touch any playlist
    #[clap(long)]
    pub dry_run: bool,

    /// Skip audio features and artist genres
    #[clap(long)]
    pub no_enrich: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CulturaArgs {
    /// Clear existing target playlists without asking
    #[clap(long, conflicts_with = "keep")]
    pub clear: bool,

    /// Keep tracks already in the target playlists without asking
    #[clap(long)]
    pub keep: bool,

    /// Classify and report only, do not touch any playlist
    #[clap(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RulesArgs {
    /// Write the built-in rules to the rules file for editing
    #[clap(long)]
    pub export: bool,

    /// Overwrite an existing rules file on export
    #[clap(long, requires = "export")]
    pub force: bool,
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

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Vibe(opt) => {
            cli::vibe(cli::VibeOptions {
                playlist: opt.playlist,
                clear: cli::ClearMode::from_flags(opt.clear, opt.keep),
                dry_run: opt.dry_run,
                enrich: !opt.no_enrich,
            })
            .await
        }
        Command::Cultura(opt) => {
            cli::cultura(cli::CulturaOptions {
                clear: cli::ClearMode::from_flags(opt.clear, opt.keep),
                dry_run: opt.dry_run,
            })
            .await
        }
        Command::Rules(opt) => cli::rules(opt.export, opt.force).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
