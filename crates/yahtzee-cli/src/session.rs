use chrono::Utc;
use futures::StreamExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio_util::codec::{FramedRead, LinesCodec};

use yahtzee_core::game::GameState;
use yahtzee_core::history::GameRecord;
use yahtzee_core::settings::Settings;

use crate::input::{self, Command};
use crate::storage::Storage;
use crate::ui;

/// What the play loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Show(String),
    Rolled(String),
    Committed(String),
    Finished(String),
    Quit,
}

pub struct Session {
    game: GameState,
    settings: Settings,
    rng: StdRng,
}

impl Session {
    pub fn new(game: GameState, settings: Settings, rng: StdRng) -> Self {
        Self {
            game,
            settings,
            rng,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Apply one command to the game. Refused moves come back as a message
    /// and leave the game untouched.
    pub fn handle(&mut self, command: Command) -> Step {
        match command {
            Command::Roll => match self.game.roll(&mut self.rng) {
                Ok(_) => Step::Rolled(ui::render_dice(
                    self.game.dice(),
                    self.game.rolls_used(),
                    &self.settings,
                )),
                Err(e) => Step::Show(format!("Cannot roll: {}", e)),
            },
            Command::Lock(indices) => match self.game.toggle_locks(&indices) {
                Ok(_) => Step::Show(ui::render_dice(
                    self.game.dice(),
                    self.game.rolls_used(),
                    &self.settings,
                )),
                Err(e) => Step::Show(format!("Cannot lock: {}", e)),
            },
            Command::Select(category) => match self.game.select_category(category) {
                Ok(score) => Step::Show(format!(
                    "{} for {}: `commit` to bank it",
                    score,
                    ui::category_label(category)
                )),
                Err(e) => Step::Show(format!("Cannot select: {}", e)),
            },
            Command::Commit => match self.game.commit_score() {
                Ok(commit) => {
                    let line = format!(
                        "Player {} scored {} for {}",
                        commit.player + 1,
                        commit.score,
                        ui::category_label(commit.category)
                    );
                    if self.game.is_finished() {
                        Step::Finished(format!(
                            "{}\n{}\n{}",
                            line,
                            ui::render_board(&self.game),
                            ui::render_results(&self.game)
                        ))
                    } else {
                        Step::Committed(format!("{}\n{}", line, ui::render_board(&self.game)))
                    }
                }
                Err(e) => Step::Show(format!("Cannot commit: {}", e)),
            },
            Command::Board => Step::Show(ui::render_board(&self.game)),
            Command::Help => Step::Show(ui::help_text()),
            Command::Again => {
                if self.game.is_finished() {
                    self.game.reset();
                    Step::Show(format!("New game!\n{}", ui::render_board(&self.game)))
                } else {
                    Step::Show("The current game is still running.".to_string())
                }
            }
            Command::Quit => Step::Quit,
        }
    }
}

pub struct PlayOptions {
    pub players: usize,
    pub resume: bool,
    pub seed: Option<u64>,
}

/// Interactive loop over stdin lines until `quit` or end of input.
pub async fn run(storage: &Storage, settings: Settings, options: PlayOptions) -> anyhow::Result<()> {
    let fast_dice = settings.dice_velocity.fast_dice();
    let game = match storage.load_game().await? {
        Some(snapshot) if options.resume => GameState::restore(snapshot, fast_dice)?,
        None if options.resume => anyhow::bail!("no saved game to resume"),
        _ => GameState::new(options.players, fast_dice)?,
    };
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(
        "Starting game: {} player(s), round {}",
        game.players().len(),
        game.round() + 1
    );

    let mut session = Session::new(game, settings, rng);
    println!("{}", ui::render_board(session.game()));
    println!("Type `help` for commands.");

    let mut lines = FramedRead::new(tokio::io::stdin(), LinesCodec::new());
    while let Some(line) = lines.next().await {
        let line = line?;
        let command = match input::parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match session.handle(command) {
            Step::Show(text) => println!("{}", text),
            Step::Rolled(text) => {
                if settings.sound_enabled {
                    print!("\x07"); // Bell
                }
                tokio::time::sleep(settings.dice_velocity.settle_delay()).await;
                println!("{}", text);
            }
            Step::Committed(text) => {
                println!("{}", text);
                storage.save_game(&session.game().snapshot()).await?;
            }
            Step::Finished(text) => {
                println!("{}", text);
                if let Some(record) = GameRecord::from_game(session.game(), Utc::now()) {
                    storage.append_record(record).await?;
                }
                storage.clear_game().await?;
                tracing::info!("Game recorded in {}", storage.dir().display());
                println!("Type `again` for a new game or `quit` to leave.");
            }
            Step::Quit => break,
        }
    }

    if session.game().is_finished() {
        storage.clear_game().await?;
    } else {
        storage.save_game(&session.game().snapshot()).await?;
        tracing::info!("Game saved to {}", storage.dir().display());
    }
    Ok(())
}
