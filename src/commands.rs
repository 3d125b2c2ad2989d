/// Command vocabulary for the terminal surface
///
/// Commands represent requests to perform actions (imperative). They are
/// parsed from input lines and applied synchronously to the session state;
/// there is no queue and no background executor, every command runs to
/// completion before the next one is read.

/// Session commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Draw the next sign
    Draw,

    /// Add a ball to the count
    Ball,

    /// Add a strike to the count
    Strike,

    /// Reset the count to 0-0
    ResetCount,

    /// Toggle one pitch's selection flag
    Toggle { category: usize, pitch: usize },

    /// Show the catalog with selection flags
    Pitches,

    /// Save the current selection under a name
    Save { name: String },

    /// Load a saved combination by index
    Load { index: usize },

    /// Delete a saved combination by index
    Delete { index: usize },

    /// Show saved combinations
    Combos,

    /// Show the sign history
    History,

    /// Show usage help
    Help,

    /// Quit the session
    Quit,
}

impl Command {
    /// Parse an input line. An empty line means "draw again".
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Draw);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "draw" | "d" => Ok(Command::Draw),
            "ball" | "b" => Ok(Command::Ball),
            "strike" | "k" => Ok(Command::Strike),
            "reset" => Ok(Command::ResetCount),
            "toggle" | "t" => {
                let mut parts = rest.split_whitespace();
                let category = Self::parse_index(parts.next(), "category")?;
                let pitch = Self::parse_index(parts.next(), "pitch")?;
                Ok(Command::Toggle { category, pitch })
            }
            "pitches" | "p" => Ok(Command::Pitches),
            // Name validation happens in the session so blank names are
            // rejected there, like every other command failure
            "save" | "s" => Ok(Command::Save {
                name: rest.to_string(),
            }),
            "load" | "l" => Ok(Command::Load {
                index: Self::parse_index(Some(rest).filter(|r| !r.is_empty()), "combination")?,
            }),
            "delete" | "del" => Ok(Command::Delete {
                index: Self::parse_index(Some(rest).filter(|r| !r.is_empty()), "combination")?,
            }),
            "combos" | "c" => Ok(Command::Combos),
            "history" | "h" => Ok(Command::History),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command: '{}' (try 'help')", other)),
        }
    }

    fn parse_index(part: Option<&str>, what: &str) -> Result<usize, String> {
        let part = part.ok_or_else(|| format!("Missing {} index", what))?;
        part.parse()
            .map_err(|_| format!("Invalid {} index: '{}'", what, part))
    }

    /// Get a human-readable description of the command
    pub fn description(&self) -> String {
        match self {
            Command::Draw => "Draw sign".to_string(),
            Command::Ball => "Add ball".to_string(),
            Command::Strike => "Add strike".to_string(),
            Command::ResetCount => "Reset count".to_string(),
            Command::Toggle { category, pitch } => {
                format!("Toggle pitch {} in category {}", pitch, category)
            }
            Command::Pitches => "Show pitch catalog".to_string(),
            Command::Save { name } => format!("Save combination: {}", name),
            Command::Load { index } => format!("Load combination {}", index),
            Command::Delete { index } => format!("Delete combination {}", index),
            Command::Combos => "Show saved combinations".to_string(),
            Command::History => "Show sign history".to_string(),
            Command::Help => "Show help".to_string(),
            Command::Quit => "Quit session".to_string(),
        }
    }
}
