mod input;
mod session;
mod storage;
mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use yahtzee_core::settings::{DiceColor, DiceVelocity};

use crate::session::PlayOptions;
use crate::storage::Storage;

/// Yahtzee - dice game for one player or two at the same keyboard
#[derive(Parser, Debug)]
#[command(name = "yahtzee", version, about)]
struct Args {
    /// Directory for settings, the saved game and history
    /// (defaults to $YAHTZEE_DATA_DIR, then ./.yahtzee)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Play a game (default)
    Play {
        /// Number of players (1 or 2)
        #[arg(short, long, default_value_t = 1)]
        players: usize,

        /// Continue the saved game
        #[arg(short, long)]
        resume: bool,

        /// Seed the dice for a reproducible game
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List finished games
    History {
        /// Delete all recorded games
        #[arg(long)]
        clear: bool,
    },
    /// Show or change settings
    Settings {
        #[arg(long)]
        dark_theme: Option<bool>,

        #[arg(long)]
        sound: Option<bool>,

        /// white, red, blue, green, yellow or purple
        #[arg(long)]
        dice_color: Option<DiceColor>,

        /// slow, medium or fast
        #[arg(long)]
        velocity: Option<DiceVelocity>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yahtzee_cli=info,yahtzee_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let data_dir = args
        .data_dir
        .or_else(|| std::env::var_os("YAHTZEE_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(".yahtzee"));
    let storage = Storage::new(data_dir);

    let command = args.command.unwrap_or(Cmd::Play {
        players: 1,
        resume: false,
        seed: None,
    });

    match command {
        Cmd::Play {
            players,
            resume,
            seed,
        } => {
            let settings = storage.load_settings().await?;
            if !resume && storage.has_saved_game().await {
                tracing::info!("Starting fresh; `play --resume` continues the saved game instead");
            }
            session::run(
                &storage,
                settings,
                PlayOptions {
                    players,
                    resume,
                    seed,
                },
            )
            .await
        }
        Cmd::History { clear } => {
            let mut history = storage.load_history().await?;
            if clear {
                history.clear();
                storage.save_history(&history).await?;
                println!("History cleared.");
            } else {
                println!("{}", ui::render_history(&history));
            }
            Ok(())
        }
        Cmd::Settings {
            dark_theme,
            sound,
            dice_color,
            velocity,
        } => {
            let mut settings = storage.load_settings().await?;
            let changed = dark_theme.is_some()
                || sound.is_some()
                || dice_color.is_some()
                || velocity.is_some();
            if let Some(dark) = dark_theme {
                settings.dark_theme = dark;
            }
            if let Some(sound) = sound {
                settings.sound_enabled = sound;
            }
            if let Some(color) = dice_color {
                settings.dice_color = color;
            }
            if let Some(velocity) = velocity {
                settings.dice_velocity = velocity;
            }
            if changed {
                storage.save_settings(&settings).await?;
                tracing::info!("Settings saved");
            }
            println!("{}", ui::render_settings(&settings));
            Ok(())
        }
    }
}
