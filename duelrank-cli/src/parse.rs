/// Answer parsing for the terminal duel.
///
/// The left side is always the already-ranked challenger, the right side the
/// item being placed. Picking right means "prefer the challengee".

/// Default key for "left item is better".
pub const DEFAULT_LEFT_KEY: &str = "j";
/// Default key for "right item is better".
pub const DEFAULT_RIGHT_KEY: &str = "k";
/// Default key for abandoning the session.
pub const DEFAULT_QUIT_KEY: &str = "q";

/// One line of user input, interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Left,
    Right,
    Quit,
}

impl Answer {
    /// `Some(prefer_challengee)` for a real choice, `None` for quit.
    pub fn prefer_challengee(self) -> Option<bool> {
        match self {
            Answer::Left => Some(false),
            Answer::Right => Some(true),
            Answer::Quit => None,
        }
    }
}

/// Which keys mean what. Matching is case-insensitive on trimmed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinds {
    pub left: String,
    pub right: String,
    pub quit: String,
}

impl Default for Keybinds {
    fn default() -> Self {
        Keybinds {
            left: DEFAULT_LEFT_KEY.to_string(),
            right: DEFAULT_RIGHT_KEY.to_string(),
            quit: DEFAULT_QUIT_KEY.to_string(),
        }
    }
}

impl Keybinds {
    /// Build keybinds, rejecting empty or clashing keys.
    pub fn new(left: &str, right: &str, quit: &str) -> Result<Self, String> {
        let keys = [left.trim(), right.trim(), quit.trim()];
        if keys.iter().any(|k| k.is_empty()) {
            return Err("keybinds must not be empty".to_string());
        }
        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                if keys[i].eq_ignore_ascii_case(keys[j]) {
                    return Err(format!("keybind \"{}\" is assigned twice", keys[i]));
                }
            }
        }
        Ok(Keybinds {
            left: keys[0].to_string(),
            right: keys[1].to_string(),
            quit: keys[2].to_string(),
        })
    }
}

/// Parse one line of input. Besides the configured keys, "1"/"2" and
/// "left"/"right" always work. Returns `None` for anything else.
pub fn parse_answer(line: &str, keys: &Keybinds) -> Option<Answer> {
    let input = line.trim();
    if input.is_empty() {
        return None;
    }

    if input.eq_ignore_ascii_case(&keys.left) || input == "1" || input.eq_ignore_ascii_case("left") {
        Some(Answer::Left)
    } else if input.eq_ignore_ascii_case(&keys.right) || input == "2" || input.eq_ignore_ascii_case("right") {
        Some(Answer::Right)
    } else if input.eq_ignore_ascii_case(&keys.quit) || input.eq_ignore_ascii_case("quit") {
        Some(Answer::Quit)
    } else {
        None
    }
}
