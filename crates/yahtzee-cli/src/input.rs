use yahtzee_core::scoring::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Roll,
    /// Zero-based dice indices.
    Lock(Vec<usize>),
    Select(Category),
    Commit,
    Board,
    Help,
    Again,
    Quit,
}

/// Parse one line typed at the game prompt. Blank lines yield `None`.
pub fn parse_command(line: &str) -> anyhow::Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "roll" | "r" => Command::Roll,
        "lock" | "l" | "hold" | "h" => {
            if rest.is_empty() {
                anyhow::bail!("which dice? e.g. `lock 1 3`");
            }
            let indices = rest
                .iter()
                .map(|w| parse_die(w))
                .collect::<anyhow::Result<Vec<_>>>()?;
            Command::Lock(indices)
        }
        "select" | "s" => {
            if rest.is_empty() {
                anyhow::bail!("which category? e.g. `select chance`");
            }
            Command::Select(parse_category(&rest.join(" "))?)
        }
        "commit" | "c" | "save" => Command::Commit,
        "board" | "b" => Command::Board,
        "help" | "?" => Command::Help,
        "again" | "new" => Command::Again,
        "quit" | "q" | "exit" => Command::Quit,
        other => anyhow::bail!("unknown command `{}` (type `help`)", other),
    };
    Ok(Some(command))
}

// Dice are numbered from 1 at the prompt. Indices past the fifth die are
// passed through and refused by the game.
fn parse_die(word: &str) -> anyhow::Result<usize> {
    match word.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => anyhow::bail!("`{}` is not a die number", word),
    }
}

/// Accepts a 1-based category number or one of its names.
pub fn parse_category(text: &str) -> anyhow::Result<Category> {
    let key: String = text
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .to_ascii_lowercase();

    if let Ok(n) = key.parse::<usize>() {
        if n == 0 {
            anyhow::bail!("categories are numbered from 1");
        }
        return Ok(Category::from_index(n - 1)?);
    }

    let category = match key.as_str() {
        "ones" | "one" | "aces" => Category::Ones,
        "twos" | "two" => Category::Twos,
        "threes" | "three" => Category::Threes,
        "fours" | "four" => Category::Fours,
        "fives" | "five" => Category::Fives,
        "sixes" | "six" => Category::Sixes,
        "threeofakind" | "3ofakind" | "3k" | "tris" => Category::ThreeOfAKind,
        "fourofakind" | "4ofakind" | "4k" | "poker" => Category::FourOfAKind,
        "fullhouse" | "full" | "fh" => Category::FullHouse,
        "smallstraight" | "small" | "ss" => Category::SmallStraight,
        "largestraight" | "large" | "ls" => Category::LargeStraight,
        "yahtzee" | "y" => Category::Yahtzee,
        "chance" => Category::Chance,
        _ => anyhow::bail!("unknown category `{}`", text),
    };
    Ok(category)
}
