use std::io::{BufRead, Write};

/// The human side of the game.
pub trait Console {
    /// Shows a line of text to the player.
    fn show(&mut self, text: &str);

    /// Prompts the player and reads one line, without the line ending.
    /// Returns `None` once the input is closed.
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;
}

/// What the player typed when asked for a hint or a guess.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerInput {
    /// Give up on the current card.
    Pass,
    /// Leave the game.
    Quit,
    Text(String),
}

impl PlayerInput {
    /// Returns `None` for blank input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let input = match line.to_uppercase().as_str() {
            "PASO" | "PASS" => PlayerInput::Pass,
            "SALIR" | "QUIT" => PlayerInput::Quit,
            _ => PlayerInput::Text(String::from(line)),
        };
        Some(input)
    }
}

/// Asks until the player types something. A closed input counts as quitting.
pub fn ask_player<C: Console + ?Sized>(console: &mut C, prompt: &str) -> anyhow::Result<PlayerInput> {
    loop {
        match console.read_line(prompt)? {
            None => return Ok(PlayerInput::Quit),
            Some(line) => {
                if let Some(input) = PlayerInput::parse(&line) {
                    return Ok(input);
                }
            }
        }
    }
}

/// A [`Console`] on stdin/stdout.
pub struct Terminal {
    stdin: std::io::StdinLock<'static>,
    stdout: std::io::Stdout,
    buf: String,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            stdin: std::io::stdin().lock(),
            stdout: std::io::stdout(),
            buf: String::new(),
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for Terminal {
    fn show(&mut self, text: &str) {
        // Nothing sensible to do if the terminal is gone
        let _ = writeln!(self.stdout, "{}", text);
    }

    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        write!(self.stdout, "{}: ", prompt)?;
        self.stdout.flush()?;
        self.buf.clear();
        let num_bytes_read = self.stdin.read_line(&mut self.buf)?;
        if num_bytes_read == 0 {
            return Ok(None);
        }
        Ok(Some(String::from(self.buf.trim_end_matches(['\r', '\n']))))
    }
}
