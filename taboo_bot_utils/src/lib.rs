use std::io::{BufRead, Write};

use taboo::{Annotator, Guess, GuessVerdict, Hint, MainWords, Okay, Request, StopwordAnnotator};

/// A trait to simplify writing oracles.
pub trait Bot {
    fn new_game(&mut self, model: &str);
    fn give_hint(&mut self, target: &str, forbidden: &[String], previous_hints: &[String]) -> String;
    fn guess(&mut self, hints: &[String], previous_guesses: &[String]) -> String;
    fn judge_guess(&mut self, target: &str, guess: &str) -> bool;

    fn main_words(&mut self, sentence: &str) -> Vec<String> {
        StopwordAnnotator.main_words(sentence)
    }

    fn run(&mut self) -> anyhow::Result<()>
    where
        Self: Sized,
    {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let stdin = std::io::stdin().lock();
        let stdout = std::io::stdout().lock();
        self.serve(stdin, stdout)
    }

    /// Answers requests read from `input` until `Bye` or EOF.
    fn serve<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> anyhow::Result<()>
    where
        Self: Sized,
    {
        let mut buf = String::new();

        loop {
            buf.clear(); // because read_line() appends to the buffer
            let num_bytes_read = input.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the moderator has exited.
                break Ok(());
            }

            let req = serde_json::from_str::<Request>(buf.trim_end())?;

            match req {
                Request::NewGame { model } => {
                    self.new_game(&model);
                    serde_json::to_writer(&mut output, &Okay())?;
                }
                Request::GiveHint {
                    target,
                    forbidden,
                    previous_hints,
                } => {
                    let text = self.give_hint(&target, &forbidden, &previous_hints);
                    serde_json::to_writer(&mut output, &Hint { text })?;
                }
                Request::Guess {
                    hints,
                    previous_guesses,
                } => {
                    let word = self.guess(&hints, &previous_guesses);
                    serde_json::to_writer(&mut output, &Guess { word })?;
                }
                Request::JudgeGuess { target, guess } => {
                    let correct = self.judge_guess(&target, &guess);
                    serde_json::to_writer(&mut output, &GuessVerdict { correct })?;
                }
                Request::ExtractMainWords { sentence } => {
                    let words = self.main_words(&sentence);
                    serde_json::to_writer(&mut output, &MainWords { words })?;
                }
                Request::Bye => break Ok(()),
            }
            writeln!(output)?;
            output.flush()?;
        }
    }
}
