use anyhow::Context;
use clap::ValueEnum;
use rand::Rng;
use taboo::{
    check_hint, Announcement, Annotator, Card, Game, GameSummary, Outcome, RoundResult, Side,
    StopwordAnnotator, TurnHandler, TurnType, Violation,
};
use tracing::{debug, warn};

use crate::console::{ask_player, Console, PlayerInput};
use crate::oracle::Oracle;
use crate::recording::{CardRecord, Recorder};

/// Hint→guess→evaluation cycles allowed per card.
pub const MAX_ATTEMPTS: u32 = 10;

/// Who picks the content words out of a hint before it is checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AnnotatorChoice {
    /// The built-in stopword filter.
    #[default]
    Builtin,
    /// The oracle, falling back to the stopword filter if it fails.
    Oracle,
}

/// Hints and guesses for the card in play.
#[derive(Default)]
struct Transcript {
    hints: Vec<String>,
    guesses: Vec<String>,
    attempts: u32,
}

/// Runs the turns of a game between the person at the console and an
/// oracle.
pub struct Table<'a, O: Oracle + ?Sized, C: Console + ?Sized> {
    oracle: &'a mut O,
    console: &'a mut C,
    annotator: AnnotatorChoice,
    recorder: &'a mut Option<Recorder>,
}

impl<'a, O: Oracle + ?Sized, C: Console + ?Sized> Table<'a, O, C> {
    pub fn new(
        oracle: &'a mut O,
        console: &'a mut C,
        annotator: AnnotatorChoice,
        recorder: &'a mut Option<Recorder>,
    ) -> Self {
        Self {
            oracle,
            console,
            annotator,
            recorder,
        }
    }

    /// Plays the game to the end, then closes the oracle whether or not the
    /// game could be finished.
    pub fn play_game<R: Rng + ?Sized>(
        &mut self,
        game: &mut Game,
        rng: &mut R,
    ) -> anyhow::Result<GameSummary> {
        let played = game.play(rng, self);
        let closed = self.oracle.close();
        let summary = played.context("Game aborted")?;
        closed?;
        Ok(summary)
    }

    fn main_words(&mut self, sentence: &str) -> Vec<String> {
        match self.annotator {
            AnnotatorChoice::Builtin => StopwordAnnotator.main_words(sentence),
            AnnotatorChoice::Oracle => match self.oracle.extract_main_words(sentence) {
                Ok(words) => words,
                Err(err) => {
                    warn!("Oracle could not extract main words, using stopwords: {:#}", err);
                    StopwordAnnotator.main_words(sentence)
                }
            },
        }
    }

    /// The target word counts as forbidden too.
    fn screen_hint(&mut self, card: &Card, hint: &str) -> Option<Violation> {
        let main_words = self.main_words(hint);
        let violation = check_hint(&card.target, &card.forbidden, &main_words);
        if let Some(violation) = &violation {
            debug!(%violation, hint, "Forbidden hint");
        }
        violation
    }

    fn show_card(&mut self, card: &Card) {
        self.console.show(&format!("WORD: {}", card.target));
        self.console
            .show(&format!("FORBIDDEN WORDS: {}", card.forbidden.join(", ")));
    }

    fn player_gives_hint(
        &mut self,
        card: &Card,
        transcript: &mut Transcript,
    ) -> anyhow::Result<RoundResult> {
        for attempt in 1..=MAX_ATTEMPTS {
            transcript.attempts = attempt;
            self.show_card(card);
            let prompt = if attempt == 1 {
                "Give a hint"
            } else {
                "Give another hint"
            };
            let hint = match ask_player(&mut *self.console, prompt)? {
                PlayerInput::Pass => return Ok(RoundResult::new(Outcome::Passed, attempt)),
                PlayerInput::Quit => return Ok(RoundResult::new(Outcome::Quit, attempt)),
                PlayerInput::Text(hint) => hint,
            };
            let violation = self.screen_hint(card, &hint);
            transcript.hints.push(hint);
            if let Some(violation) = violation {
                self.console.show(&violation.to_string());
                return Ok(RoundResult::new(Outcome::ForbiddenHint, attempt));
            }

            let guess = self.oracle.guess(&transcript.hints, &transcript.guesses)?;
            self.console.show(&format!("CPU GUESS: {}", guess));
            let correct = self.oracle.judge_guess(&card.target, &guess)?;
            transcript.guesses.push(guess);
            if correct {
                return Ok(RoundResult::new(Outcome::Correct, attempt));
            }
            self.console.show("WRONG ANSWER");
        }
        Ok(RoundResult::new(Outcome::AttemptsExhausted, MAX_ATTEMPTS))
    }

    fn player_guesses(
        &mut self,
        card: &Card,
        transcript: &mut Transcript,
    ) -> anyhow::Result<RoundResult> {
        for attempt in 1..=MAX_ATTEMPTS {
            transcript.attempts = attempt;
            let hint = self
                .oracle
                .give_hint(&card.target, &card.forbidden, &transcript.hints)?;
            // The player must not see a hint that gives the word away
            let violation = self.screen_hint(card, &hint);
            transcript.hints.push(hint);
            if violation.is_some() {
                return Ok(RoundResult::new(Outcome::ForbiddenHint, attempt));
            }

            self.console.show("HINTS SO FAR:");
            for hint in &transcript.hints {
                self.console.show(&format!("- {}", hint));
            }
            let guess = match ask_player(&mut *self.console, "Your guess")? {
                PlayerInput::Pass => return Ok(RoundResult::new(Outcome::Passed, attempt)),
                PlayerInput::Quit => return Ok(RoundResult::new(Outcome::Quit, attempt)),
                PlayerInput::Text(guess) => guess,
            };
            let correct = self.oracle.judge_guess(&card.target, &guess)?;
            transcript.guesses.push(guess);
            if correct {
                return Ok(RoundResult::new(Outcome::Correct, attempt));
            }
            self.console.show("WRONG ANSWER");
        }
        Ok(RoundResult::new(Outcome::AttemptsExhausted, MAX_ATTEMPTS))
    }

    fn cpu_plays(&mut self, card: &Card, transcript: &mut Transcript) -> anyhow::Result<RoundResult> {
        self.show_card(card);
        for attempt in 1..=MAX_ATTEMPTS {
            transcript.attempts = attempt;
            let hint = self
                .oracle
                .give_hint(&card.target, &card.forbidden, &transcript.hints)?;
            self.console.show(&format!("CPU HINT: {}", hint));
            let violation = self.screen_hint(card, &hint);
            transcript.hints.push(hint);
            if let Some(violation) = violation {
                self.console.show(&violation.to_string());
                return Ok(RoundResult::new(Outcome::ForbiddenHint, attempt));
            }

            let guess = self.oracle.guess(&transcript.hints, &transcript.guesses)?;
            self.console.show(&format!("CPU GUESS: {}", guess));
            let correct = self.oracle.judge_guess(&card.target, &guess)?;
            transcript.guesses.push(guess);
            if correct {
                return Ok(RoundResult::new(Outcome::Correct, attempt));
            }
        }
        Ok(RoundResult::new(Outcome::AttemptsExhausted, MAX_ATTEMPTS))
    }
}

impl<O: Oracle + ?Sized, C: Console + ?Sized> TurnHandler for Table<'_, O, C> {
    fn run_turn(&mut self, turn_type: TurnType, card: &Card) -> RoundResult {
        self.console.show(&turn_type.to_string());
        let mut transcript = Transcript::default();
        let played = match turn_type {
            TurnType::PlayerGivesHint => self.player_gives_hint(card, &mut transcript),
            TurnType::PlayerGuesses => self.player_guesses(card, &mut transcript),
            TurnType::CpuPlays => self.cpu_plays(card, &mut transcript),
        };
        let result = match played {
            Ok(result) => result,
            Err(err) => {
                warn!(card_id = card.id, "Giving up on card: {:#}", err);
                RoundResult::new(Outcome::AttemptsExhausted, transcript.attempts)
            }
        };

        if let Some(recorder) = self.recorder.as_mut() {
            recorder.store_card(CardRecord::new(
                turn_type,
                card,
                transcript.hints,
                transcript.guesses,
                result,
            ));
        }
        result
    }

    fn announce(&mut self, announcement: Announcement<'_>) {
        match announcement {
            Announcement::Scored { side, points } => {
                let who = match side {
                    Side::Player => "THE PLAYER",
                    Side::Cpu => "THE CPU",
                };
                self.console
                    .show(&format!("CORRECT! {} POINTS FOR {}.", points, who));
            }
            Announcement::Passed { target } => {
                self.console.show(&format!("The word was {}", target));
            }
            Announcement::ForbiddenHint => {
                self.console
                    .show("FORBIDDEN HINT. NO POINTS FOR THIS CARD.");
            }
            Announcement::AttemptsExhausted { target } => {
                self.console.show(&format!("The word was {}", target));
                self.console
                    .show("MAXIMUM NUMBER OF ATTEMPTS REACHED. NO POINTS FOR THIS CARD.");
            }
        }
        self.console.show("");
    }
}
