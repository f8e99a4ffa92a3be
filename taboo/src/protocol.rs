use serde::{Deserialize, Serialize};

/// Request for an oracle to do something.
///
/// Requests and responses are exchanged as single lines of JSON over the
/// oracle's stdin and stdout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the oracle's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame {
        /// Which language model to use, if the oracle uses one.
        model: String,
    },
    /// Request for a hint that leads to `target` without using any of the
    /// `forbidden` words or the target itself.
    ///
    /// The response should be a [`Hint`].
    GiveHint {
        target: String,
        forbidden: Vec<String>,
        /// Hints already given for this card, oldest first. A new hint
        /// should add information.
        previous_hints: Vec<String>,
    },
    /// Request to guess the word behind the hints.
    ///
    /// The response should be a [`Guess`].
    Guess {
        /// All hints for this card, oldest first.
        hints: Vec<String>,
        /// Guesses already made for this card, which were all wrong.
        previous_guesses: Vec<String>,
    },
    /// Request to decide whether `guess` is the same as, or means exactly
    /// the same as, `target`.
    ///
    /// The response should be a [`GuessVerdict`].
    JudgeGuess { target: String, guess: String },
    /// Request for the content words of a sentence.
    ///
    /// The response should be [`MainWords`].
    ExtractMainWords { sentence: String },
    /// The oracle should shut down.
    Bye,
}

/// Dummy struct for use in oracle communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    pub word: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessVerdict {
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainWords {
    pub words: Vec<String>,
}
