use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Card, Deck, DeckExhausted, NotEnoughCards, Scores, Side, TurnOrder, TurnType, TURNS_PER_ROUND,
};

/// How a single card ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Correct,
    Passed,
    Quit,
    ForbiddenHint,
    AttemptsExhausted,
}

/// What a [`TurnHandler`] reports back for one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub outcome: Outcome,
    /// Always at least 1.
    pub attempts: u32,
}

impl RoundResult {
    /// Counts zero attempts as one.
    pub fn new(outcome: Outcome, attempts: u32) -> Self {
        Self {
            outcome,
            attempts: attempts.max(1),
        }
    }
}

/// Observer-facing news about a card that has just been settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Announcement<'a> {
    Scored { side: Side, points: u32 },
    Passed { target: &'a str },
    ForbiddenHint,
    AttemptsExhausted { target: &'a str },
}

/// Plays out one card: produces hints and guesses until the card is
/// settled.
///
/// Implementations must not let their own failures escape; an oracle that
/// cannot be reached ends the card as [`Outcome::AttemptsExhausted`].
pub trait TurnHandler {
    fn run_turn(&mut self, turn_type: TurnType, card: &Card) -> RoundResult;

    /// Called once per card after the score has been updated, except when
    /// the card ended with [`Outcome::Quit`].
    fn announce(&mut self, _announcement: Announcement<'_>) {}
}

/// The shape of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub rounds: usize,
    pub cards_per_turn: usize,
}

impl GameSettings {
    /// Cards drawn by a game that nobody quits.
    pub fn cards_needed(&self) -> usize {
        self.rounds * TURNS_PER_ROUND * self.cards_per_turn
    }

    pub fn check_deck(&self, deck: &Deck) -> Result<(), NotEnoughCards> {
        let needed = self.cards_needed();
        if deck.len() < needed {
            Err(NotEnoughCards {
                needed,
                available: deck.len(),
            })
        } else {
            Ok(())
        }
    }
}

/// Where the game stands: the card that will be played next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub round: usize,
    pub turn: usize,
    pub card: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    InProgress,
    Finished,
    Quit,
}

/// The final scores, and whether the game was cut short.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub scores: Scores,
    pub quit: bool,
    pub cards_played: usize,
}

impl std::fmt::Display for GameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.quit {
            writeln!(f, "YOU LEFT THE GAME")?;
        }
        write!(
            f,
            "RESULTS:\n PLAYER: {}\n CPU: {}",
            self.scores.player, self.scores.cpu
        )
    }
}

/// Result of [`Game::step()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Continue,
    Over(GameSummary),
}

/// Drives rounds, turns and cards, and keeps the score.
///
/// Each round has [`TURNS_PER_ROUND`] turns taken in the order given by the
/// [`TurnOrder`], which keeps cycling across rounds. Each turn plays
/// `cards_per_turn` cards.
pub struct Game {
    settings: GameSettings,
    deck: Deck,
    turn_order: TurnOrder,
    scores: Scores,
    position: Position,
    /// The type of the turn in progress, `None` between turns.
    current_turn: Option<TurnType>,
    status: Status,
    cards_played: usize,
}

impl Game {
    pub fn new(settings: GameSettings, deck: Deck, turn_order: TurnOrder) -> Self {
        let status = if settings.cards_needed() == 0 {
            Status::Finished
        } else {
            Status::InProgress
        };
        Self {
            settings,
            deck,
            turn_order,
            scores: Scores::default(),
            position: Position::default(),
            current_turn: None,
            status,
            cards_played: 0,
        }
    }

    /// Plays the next card.
    ///
    /// Returns an error only when the deck runs out, which leaves the game
    /// where it was before the failed draw.
    pub fn step<R, H>(&mut self, rng: &mut R, handler: &mut H) -> Result<Progress, DeckExhausted>
    where
        R: Rng + ?Sized,
        H: TurnHandler + ?Sized,
    {
        if self.status != Status::InProgress {
            return Ok(Progress::Over(self.summary()));
        }

        let turn_type = match self.current_turn {
            Some(turn_type) => turn_type,
            None => {
                let turn_type = self.turn_order.next();
                debug!(
                    round = self.position.round,
                    turn = self.position.turn,
                    ?turn_type,
                    "Starting turn"
                );
                self.current_turn = Some(turn_type);
                turn_type
            }
        };

        let card = self.deck.draw(rng)?;
        debug!(card_id = card.id, target = %card.target, "Drew card");
        let result = handler.run_turn(turn_type, &card);
        self.cards_played += 1;
        debug!(outcome = ?result.outcome, attempts = result.attempts, "Card settled");

        match result.outcome {
            Outcome::Correct => {
                let side = turn_type.side();
                let points = self.scores.award(side, result.attempts);
                info!(?side, points, "Card guessed");
                handler.announce(Announcement::Scored { side, points });
            }
            Outcome::Passed => handler.announce(Announcement::Passed {
                target: &card.target,
            }),
            Outcome::ForbiddenHint => handler.announce(Announcement::ForbiddenHint),
            Outcome::AttemptsExhausted => handler.announce(Announcement::AttemptsExhausted {
                target: &card.target,
            }),
            Outcome::Quit => {
                info!(cards_played = self.cards_played, "Game quit");
                self.status = Status::Quit;
                return Ok(Progress::Over(self.summary()));
            }
        }

        self.advance();
        if self.status == Status::Finished {
            Ok(Progress::Over(self.summary()))
        } else {
            Ok(Progress::Continue)
        }
    }

    /// Plays until every card has been played or someone quits.
    pub fn play<R, H>(&mut self, rng: &mut R, handler: &mut H) -> Result<GameSummary, DeckExhausted>
    where
        R: Rng + ?Sized,
        H: TurnHandler + ?Sized,
    {
        loop {
            if let Progress::Over(summary) = self.step(rng, handler)? {
                return Ok(summary);
            }
        }
    }

    fn advance(&mut self) {
        let Position { round, turn, card } = &mut self.position;
        *card += 1;
        if *card < self.settings.cards_per_turn {
            return;
        }
        *card = 0;
        self.current_turn = None;
        *turn += 1;
        if *turn < TURNS_PER_ROUND {
            return;
        }
        *turn = 0;
        *round += 1;
        if *round == self.settings.rounds {
            self.status = Status::Finished;
        }
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            scores: self.scores,
            quit: self.status == Status::Quit,
            cards_played: self.cards_played,
        }
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn is_over(&self) -> bool {
        self.status != Status::InProgress
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::arbitrary::numbered_cards;
    use crate::PlayerRole;

    /// Replays canned results and remembers what it was asked to play.
    #[derive(Default)]
    struct ScriptedHandler {
        results: VecDeque<RoundResult>,
        played: Vec<(TurnType, u32)>,
        announcements: Vec<String>,
    }

    impl ScriptedHandler {
        fn new(results: impl IntoIterator<Item = (Outcome, u32)>) -> Self {
            Self {
                results: results
                    .into_iter()
                    .map(|(outcome, attempts)| RoundResult::new(outcome, attempts))
                    .collect(),
                ..Default::default()
            }
        }
    }

    impl TurnHandler for ScriptedHandler {
        fn run_turn(&mut self, turn_type: TurnType, card: &Card) -> RoundResult {
            self.played.push((turn_type, card.id));
            self.results
                .pop_front()
                .unwrap_or(RoundResult::new(Outcome::Passed, 1))
        }

        fn announce(&mut self, announcement: Announcement<'_>) {
            self.announcements.push(format!("{:?}", announcement));
        }
    }

    fn settings(rounds: usize, cards_per_turn: usize) -> GameSettings {
        GameSettings {
            rounds,
            cards_per_turn,
        }
    }

    #[test]
    fn one_round_one_card_plays_four_cards() {
        let mut rng = StdRng::seed_from_u64(0);
        let turn_order = TurnOrder::new(Side::Player, PlayerRole::GivesHint);
        let mut game = Game::new(settings(1, 1), Deck::new(numbered_cards(10)), turn_order.clone());
        let mut handler = ScriptedHandler::default();
        let summary = game.play(&mut rng, &mut handler).unwrap();

        assert_eq!(summary.cards_played, 4);
        assert!(!summary.quit);
        assert_eq!(summary.scores, Scores::default());
        let turn_types: Vec<TurnType> = handler.played.iter().map(|&(t, _)| t).collect();
        assert_eq!(turn_types, turn_order.order());
        assert_eq!(game.deck().remaining(), 6);
        assert!(game.is_over());
    }

    #[test]
    fn every_turn_plays_its_cards_and_no_card_repeats() {
        let mut rng = StdRng::seed_from_u64(42);
        let turn_order = TurnOrder::new(Side::Cpu, PlayerRole::Guesses);
        let mut game = Game::new(settings(2, 3), Deck::new(numbered_cards(24)), turn_order.clone());
        let mut handler = ScriptedHandler::default();
        let summary = game.play(&mut rng, &mut handler).unwrap();

        assert_eq!(summary.cards_played, 24);
        let ids: BTreeSet<u32> = handler.played.iter().map(|&(_, id)| id).collect();
        assert_eq!(ids.len(), 24);
        let order = turn_order.order();
        for (idx, &(turn_type, _)) in handler.played.iter().enumerate() {
            assert_eq!(turn_type, order[(idx / 3) % TURNS_PER_ROUND]);
        }
    }

    #[test]
    fn correct_guesses_score_for_the_side_of_the_turn() {
        let mut rng = StdRng::seed_from_u64(1);
        // Player hint, cpu, player guess, cpu
        let turn_order = TurnOrder::new(Side::Player, PlayerRole::GivesHint);
        let mut game = Game::new(settings(1, 1), Deck::new(numbered_cards(4)), turn_order);
        let mut handler = ScriptedHandler::new([
            (Outcome::Correct, 1),
            (Outcome::Correct, 3),
            (Outcome::AttemptsExhausted, 10),
            (Outcome::Correct, 8),
        ]);
        let summary = game.play(&mut rng, &mut handler).unwrap();

        assert_eq!(summary.scores, Scores { player: 5, cpu: 4 });
        assert_eq!(handler.announcements.len(), 4);
        assert_eq!(
            handler.announcements[0],
            format!("{:?}", Announcement::Scored { side: Side::Player, points: 5 })
        );
        assert!(handler.announcements[2].starts_with("AttemptsExhausted"));
    }

    #[test]
    fn passes_and_forbidden_hints_score_nothing() {
        let mut rng = StdRng::seed_from_u64(2);
        let turn_order = TurnOrder::new(Side::Cpu, PlayerRole::GivesHint);
        let mut game = Game::new(settings(1, 1), Deck::new(numbered_cards(4)), turn_order);
        let mut handler = ScriptedHandler::new([
            (Outcome::ForbiddenHint, 1),
            (Outcome::Passed, 2),
            (Outcome::ForbiddenHint, 4),
            (Outcome::Passed, 1),
        ]);
        let summary = game.play(&mut rng, &mut handler).unwrap();

        assert_eq!(summary.scores, Scores::default());
        assert_eq!(handler.announcements[0], "ForbiddenHint");
        assert!(handler.announcements[1].starts_with("Passed"));
    }

    #[test]
    fn quit_freezes_the_scores() {
        let mut rng = StdRng::seed_from_u64(3);
        let turn_order = TurnOrder::new(Side::Player, PlayerRole::Guesses);
        let mut game = Game::new(settings(2, 2), Deck::new(numbered_cards(16)), turn_order);
        let mut handler = ScriptedHandler::new([
            (Outcome::Correct, 2),
            (Outcome::Correct, 1),
            (Outcome::Quit, 1),
            (Outcome::Correct, 1),
        ]);
        let summary = game.play(&mut rng, &mut handler).unwrap();

        assert!(summary.quit);
        assert_eq!(summary.cards_played, 3);
        assert_eq!(summary.scores, Scores { player: 9, cpu: 0 });
        // The quitting card is not announced
        assert_eq!(handler.announcements.len(), 2);
        assert_eq!(game.deck().remaining(), 13);
        assert_eq!(
            game.step(&mut rng, &mut handler).unwrap(),
            Progress::Over(summary)
        );
        assert_eq!(handler.played.len(), 3);
        assert_eq!(
            summary.to_string(),
            "YOU LEFT THE GAME\nRESULTS:\n PLAYER: 9\n CPU: 0"
        );
    }

    #[test]
    fn running_out_of_cards_is_an_error() {
        let mut rng = StdRng::seed_from_u64(4);
        let turn_order = TurnOrder::new(Side::Player, PlayerRole::GivesHint);
        let game_settings = settings(1, 2);
        let deck = Deck::new(numbered_cards(5));
        assert_eq!(
            game_settings.check_deck(&deck),
            Err(NotEnoughCards {
                needed: 8,
                available: 5
            })
        );
        let mut game = Game::new(game_settings, deck, turn_order);
        let mut handler = ScriptedHandler::default();
        assert_eq!(game.play(&mut rng, &mut handler), Err(DeckExhausted));
        assert_eq!(handler.played.len(), 5);
        assert_eq!(game.position(), Position { round: 0, turn: 2, card: 1 });
    }

    #[test]
    fn empty_game_is_over_immediately() {
        let mut rng = StdRng::seed_from_u64(5);
        let turn_order = TurnOrder::new(Side::Player, PlayerRole::GivesHint);
        let mut game = Game::new(settings(0, 5), Deck::new(Vec::new()), turn_order);
        let mut handler = ScriptedHandler::default();
        let summary = game.play(&mut rng, &mut handler).unwrap();
        assert_eq!(summary.cards_played, 0);
        assert_eq!(summary.to_string(), "RESULTS:\n PLAYER: 0\n CPU: 0");
    }

    #[test]
    fn step_walks_the_nested_counters() {
        let mut rng = StdRng::seed_from_u64(6);
        let turn_order = TurnOrder::new(Side::Player, PlayerRole::GivesHint);
        let mut game = Game::new(settings(2, 2), Deck::new(numbered_cards(16)), turn_order);
        let mut handler = ScriptedHandler::default();
        assert_eq!(game.step(&mut rng, &mut handler), Ok(Progress::Continue));
        assert_eq!(game.position(), Position { round: 0, turn: 0, card: 1 });
        assert_eq!(game.step(&mut rng, &mut handler), Ok(Progress::Continue));
        assert_eq!(game.position(), Position { round: 0, turn: 1, card: 0 });
        for _ in 0..6 {
            game.step(&mut rng, &mut handler).unwrap();
        }
        assert_eq!(game.position(), Position { round: 1, turn: 0, card: 0 });
        assert_eq!(game.settings().cards_needed(), 16);
    }
}
