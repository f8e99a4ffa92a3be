use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use taboo::{Guess, GuessVerdict, Hint, MainWords, Okay, Request};
use tracing::trace;

/// The CPU side of the game: produces hints and guesses, and judges guesses.
pub trait Oracle {
    fn new_game(&mut self, model: &str) -> anyhow::Result<()>;
    fn give_hint(
        &mut self,
        target: &str,
        forbidden: &[String],
        previous_hints: &[String],
    ) -> anyhow::Result<String>;
    fn guess(&mut self, hints: &[String], previous_guesses: &[String]) -> anyhow::Result<String>;
    fn judge_guess(&mut self, target: &str, guess: &str) -> anyhow::Result<bool>;
    fn extract_main_words(&mut self, sentence: &str) -> anyhow::Result<Vec<String>>;

    /// Ends the conversation. No request may follow.
    fn close(&mut self) -> anyhow::Result<()>;
}

/// How to start an oracle process.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Short name used in logs.
    pub nick: String,
    /// The executable followed by its arguments.
    pub cmd: Vec<String>,
}

impl OracleConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Could not open oracle config '{}'", path.display()))?;
        let config: OracleConfig = serde_json::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("Invalid oracle config '{}'", path.display()))?;
        if config.cmd.is_empty() {
            anyhow::bail!("Oracle config '{}' has an empty 'cmd'", path.display());
        }
        Ok(config)
    }
}

/// An oracle running as a child process, talking JSON lines over
/// stdin/stdout.
pub struct OracleProcess {
    pub name: String,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after perform_request().
    buf: String,
}

impl OracleProcess {
    pub fn spawn(config: &OracleConfig) -> anyhow::Result<Self> {
        let (program, args) = config
            .cmd
            .split_first()
            .context("Oracle command is empty")?;
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("Could not start oracle '{}'", program))?;
        let stdin = child.stdin.take().context("Could not access stdin")?;
        let stdout = child.stdout.take().context("Could not access stdout")?;

        Ok(Self {
            name: config.nick.clone(),
            child,
            stdin,
            stdout: BufReader::new(stdout),
            buf: String::new(),
        })
    }

    fn send(&mut self, req: &Request) -> anyhow::Result<()> {
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", oracle = &self.name, request = %req_json);
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        Ok(())
    }

    fn perform_request<T: serde::de::DeserializeOwned + std::fmt::Debug>(
        &mut self,
        req: &Request,
    ) -> anyhow::Result<T> {
        self.send(req)?;
        self.buf.clear();
        let num_bytes_read = self.stdout.read_line(&mut self.buf)?;
        if num_bytes_read == 0 {
            anyhow::bail!("Oracle '{}' closed its output", self.name);
        }
        let serialized_response = self.buf.trim_end();
        trace!(name: "Received response", oracle = &self.name, response = %serialized_response);
        let response = serde_json::from_str::<T>(serialized_response).with_context(|| {
            format!(
                "Oracle '{}' sent an unexpected response: {}",
                self.name, serialized_response
            )
        })?;
        self.buf.clear();
        Ok(response)
    }
}

impl Oracle for OracleProcess {
    fn new_game(&mut self, model: &str) -> anyhow::Result<()> {
        let _: Okay = self.perform_request(&Request::NewGame {
            model: String::from(model),
        })?;
        Ok(())
    }

    fn give_hint(
        &mut self,
        target: &str,
        forbidden: &[String],
        previous_hints: &[String],
    ) -> anyhow::Result<String> {
        let hint: Hint = self.perform_request(&Request::GiveHint {
            target: String::from(target),
            forbidden: forbidden.to_vec(),
            previous_hints: previous_hints.to_vec(),
        })?;
        Ok(hint.text)
    }

    fn guess(&mut self, hints: &[String], previous_guesses: &[String]) -> anyhow::Result<String> {
        let guess: Guess = self.perform_request(&Request::Guess {
            hints: hints.to_vec(),
            previous_guesses: previous_guesses.to_vec(),
        })?;
        Ok(guess.word)
    }

    fn judge_guess(&mut self, target: &str, guess: &str) -> anyhow::Result<bool> {
        let verdict: GuessVerdict = self.perform_request(&Request::JudgeGuess {
            target: String::from(target),
            guess: String::from(guess),
        })?;
        Ok(verdict.correct)
    }

    fn extract_main_words(&mut self, sentence: &str) -> anyhow::Result<Vec<String>> {
        let main_words: MainWords = self.perform_request(&Request::ExtractMainWords {
            sentence: String::from(sentence),
        })?;
        Ok(main_words.words)
    }

    /// Tells the oracle to exit and waits for it.
    fn close(&mut self) -> anyhow::Result<()> {
        self.send(&Request::Bye)?;
        let status = self.child.wait()?;
        trace!(oracle = &self.name, %status, "Oracle exited");
        Ok(())
    }
}
