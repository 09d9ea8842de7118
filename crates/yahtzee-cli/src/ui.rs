use yahtzee_core::dice::{DiceSet, MAX_ROLLS};
use yahtzee_core::game::{GameState, Outcome, TOTAL_ROUNDS};
use yahtzee_core::history::History;
use yahtzee_core::scoring::{Category, UPPER_BONUS_THRESHOLD, UPPER_BONUS_VALUE};
use yahtzee_core::settings::{DiceColor, Settings};

pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::Ones => "Ones",
        Category::Twos => "Twos",
        Category::Threes => "Threes",
        Category::Fours => "Fours",
        Category::Fives => "Fives",
        Category::Sixes => "Sixes",
        Category::ThreeOfAKind => "3 of a Kind",
        Category::FourOfAKind => "4 of a Kind",
        Category::FullHouse => "Full House",
        Category::SmallStraight => "Sm. Straight",
        Category::LargeStraight => "Lg. Straight",
        Category::Yahtzee => "YAHTZEE",
        Category::Chance => "Chance",
    }
}

pub fn category_help(category: Category) -> &'static str {
    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => "sum of the dice showing that face",
        Category::ThreeOfAKind | Category::FourOfAKind => {
            "sum of all dice when enough of them match"
        }
        Category::FullHouse => "three of one face and two of another: 25",
        Category::SmallStraight => "four faces in a row: 30",
        Category::LargeStraight => "five faces in a row: 40",
        Category::Yahtzee => "all five dice equal: 50; afterwards another one scores 50 anywhere",
        Category::Chance => "sum of all dice",
    }
}

pub fn help_text() -> String {
    let mut out = String::new();
    out.push_str("Commands:\n");
    out.push_str("  roll | r              roll the unlocked dice\n");
    out.push_str("  lock | l <1-5>...     lock or unlock dice\n");
    out.push_str("  select | s <category> choose a category (name or 1-13)\n");
    out.push_str("  commit | c            bank the selected category\n");
    out.push_str("  board | b             show the scoreboard\n");
    out.push_str("  again                 start over once a game is finished\n");
    out.push_str("  quit | q              save and leave\n\n");
    out.push_str("Categories:\n");
    for (i, category) in Category::ALL.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2} {:<13} {}\n",
            i + 1,
            category_label(*category),
            category_help(*category)
        ));
    }
    out.push_str(&format!(
        "  Bonus: upper section worth {} or more adds {}\n",
        UPPER_BONUS_THRESHOLD, UPPER_BONUS_VALUE
    ));
    out
}

// ANSI foreground for dice faces; dark theme swaps the background.
fn paint(text: &str, settings: &Settings) -> String {
    let fg = match settings.dice_color {
        DiceColor::White => 97,
        DiceColor::Red => 91,
        DiceColor::Blue => 94,
        DiceColor::Green => 92,
        DiceColor::Yellow => 93,
        DiceColor::Purple => 95,
    };
    let bg = if settings.dark_theme { 40 } else { 47 };
    format!("\x1b[{};{}m{}\x1b[0m", fg, bg, text)
}

pub fn render_dice(dice: &DiceSet, rolls_used: u8, settings: &Settings) -> String {
    let faces: Vec<String> = dice
        .dice
        .iter()
        .enumerate()
        .map(|(i, die)| {
            let face = if die.locked {
                format!("{}:[{}]*", i + 1, die.value)
            } else {
                format!("{}:[{}] ", i + 1, die.value)
            };
            paint(&face, settings)
        })
        .collect();
    format!(
        "{}   rolls left: {}",
        faces.join(" "),
        MAX_ROLLS.saturating_sub(rolls_used)
    )
}

pub fn render_board(game: &GameState) -> String {
    let mut out = String::new();
    let current = game.current_player();
    let preview = game.preview();
    let pending = game.pending();

    out.push_str(&format!("{:<16}", ""));
    for index in 0..game.players().len() {
        let marker = if index == current && !game.is_finished() { ">" } else { " " };
        out.push_str(&format!("{}{:<9}", marker, format!("Player {}", index + 1)));
    }
    out.push('\n');

    for (row, category) in Category::ALL.iter().enumerate() {
        out.push_str(&format!("{:>2} {:<13}", row + 1, category_label(*category)));
        for (index, sheet) in game.players().iter().enumerate() {
            let cell = match sheet.score(*category) {
                Some(score) => format!("{}", score),
                None if index == current => match preview[row] {
                    Some(score) if pending.is_some_and(|p| p.category == *category) => {
                        format!("<{}>", score)
                    }
                    Some(score) => format!("({})", score),
                    None => "-".to_string(),
                },
                None => "-".to_string(),
            };
            out.push_str(&format!(" {:<9}", cell));
        }
        out.push('\n');
        if *category == Category::Sixes {
            out.push_str(&format!("   {:<13}", "Bonus"));
            for sheet in game.players() {
                let cell = if sheet.bonus_reached {
                    format!("+{}", UPPER_BONUS_VALUE)
                } else {
                    format!("{}/{}", sheet.upper_subtotal(), UPPER_BONUS_THRESHOLD)
                };
                out.push_str(&format!(" {:<9}", cell));
            }
            out.push('\n');
        }
    }

    out.push_str(&format!("   {:<13}", "Total"));
    for total in game.totals() {
        out.push_str(&format!(" {:<9}", total));
    }
    out.push('\n');
    if !game.is_finished() {
        out.push_str(&format!(
            "Round {}/{}, player {} to play\n",
            game.round() + 1,
            TOTAL_ROUNDS,
            current + 1
        ));
    }
    out
}

pub fn render_results(game: &GameState) -> String {
    let totals = game.totals();
    match game.winner() {
        None => format!(
            "Game finished! Your score: {}",
            totals.first().copied().unwrap_or(0)
        ),
        Some(Outcome::Winner(index)) => format!(
            "Game finished! Player {} wins with {} ({})",
            index + 1,
            totals[index],
            join_totals(&totals)
        ),
        Some(Outcome::Draw) => format!("Game finished! Draw ({})", join_totals(&totals)),
    }
}

fn join_totals(totals: &[u16]) -> String {
    totals
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn render_history(history: &History) -> String {
    if history.is_empty() {
        return "No games played yet.".to_string();
    }
    let mut out = String::new();
    for record in history.newest_first() {
        let when = record.finished_at.format("%Y-%m-%d %H:%M");
        let line = match record.player2_score {
            None => format!("{}  solo     {}\n", when, record.player1_score),
            Some(p2) => format!("{}  2 player {} - {}\n", when, record.player1_score, p2),
        };
        out.push_str(&line);
    }
    if let Some(best) = history.best_score() {
        out.push_str(&format!("Best score: {} ({} games)\n", best, history.len()));
    }
    out
}

pub fn render_settings(settings: &Settings) -> String {
    format!(
        "dark theme: {}\nsound: {}\ndice color: {:?}\ndice velocity: {:?}",
        settings.dark_theme, settings.sound_enabled, settings.dice_color, settings.dice_velocity
    )
}
