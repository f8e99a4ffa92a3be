use rand::Rng;
use serde::{Deserialize, Serialize};

/// One of the two teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Cpu,
}

/// Who gives hints and who guesses during a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnType {
    /// The human gives hints, the CPU guesses.
    PlayerGivesHint,
    /// The CPU gives hints, the human guesses.
    PlayerGuesses,
    /// The CPU gives hints to itself.
    CpuPlays,
}

impl TurnType {
    /// The side that scores when a card is guessed during this turn.
    pub fn side(self) -> Side {
        match self {
            TurnType::PlayerGivesHint | TurnType::PlayerGuesses => Side::Player,
            TurnType::CpuPlays => Side::Cpu,
        }
    }
}

impl std::fmt::Display for TurnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnType::PlayerGivesHint => write!(f, "THE PLAYER GIVES HINTS"),
            TurnType::PlayerGuesses => write!(f, "THE PLAYER GUESSES"),
            TurnType::CpuPlays => write!(f, "THE CPU PLAYS"),
        }
    }
}

/// The role the player takes in their first turn of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerRole {
    GivesHint,
    Guesses,
}

impl PlayerRole {
    pub fn turn_type(self) -> TurnType {
        match self {
            PlayerRole::GivesHint => TurnType::PlayerGivesHint,
            PlayerRole::Guesses => TurnType::PlayerGuesses,
        }
    }

    /// The role of the player's other turn.
    pub fn other(self) -> Self {
        match self {
            PlayerRole::GivesHint => PlayerRole::Guesses,
            PlayerRole::Guesses => PlayerRole::GivesHint,
        }
    }
}

/// Number of turns in a round: two per side.
pub const TURNS_PER_ROUND: usize = 4;

/// The order in which turns are taken, repeated for as long as the game lasts.
///
/// The sides alternate, and the two player turns cover both roles, so there
/// are exactly four possible orders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOrder {
    order: [TurnType; TURNS_PER_ROUND],
    cursor: usize,
}

impl TurnOrder {
    /// Builds the order from which side starts and which player role
    /// comes first.
    pub fn new(starting_side: Side, first_player_role: PlayerRole) -> Self {
        let first = first_player_role.turn_type();
        let second = first_player_role.other().turn_type();
        let order = match starting_side {
            Side::Player => [first, TurnType::CpuPlays, second, TurnType::CpuPlays],
            Side::Cpu => [TurnType::CpuPlays, first, TurnType::CpuPlays, second],
        };
        Self { order, cursor: 0 }
    }

    /// Picks one of the four orders with equal probability.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let starting_side = if rng.gen::<bool>() {
            Side::Player
        } else {
            Side::Cpu
        };
        let first_player_role = if rng.gen::<bool>() {
            PlayerRole::GivesHint
        } else {
            PlayerRole::Guesses
        };
        Self::new(starting_side, first_player_role)
    }

    /// The next turn type, wrapping around after the fourth.
    pub fn next(&mut self) -> TurnType {
        let turn_type = self.order[self.cursor];
        self.cursor = (self.cursor + 1) % TURNS_PER_ROUND;
        turn_type
    }

    pub fn order(&self) -> [TurnType; TURNS_PER_ROUND] {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn all_four_orders() {
        use TurnType::*;
        assert_eq!(
            TurnOrder::new(Side::Player, PlayerRole::GivesHint).order(),
            [PlayerGivesHint, CpuPlays, PlayerGuesses, CpuPlays]
        );
        assert_eq!(
            TurnOrder::new(Side::Player, PlayerRole::Guesses).order(),
            [PlayerGuesses, CpuPlays, PlayerGivesHint, CpuPlays]
        );
        assert_eq!(
            TurnOrder::new(Side::Cpu, PlayerRole::GivesHint).order(),
            [CpuPlays, PlayerGivesHint, CpuPlays, PlayerGuesses]
        );
        assert_eq!(
            TurnOrder::new(Side::Cpu, PlayerRole::Guesses).order(),
            [CpuPlays, PlayerGuesses, CpuPlays, PlayerGivesHint]
        );
    }

    #[test]
    fn player_roles_cover_both_player_turns() {
        for role in [PlayerRole::GivesHint, PlayerRole::Guesses] {
            assert_eq!(role.other().other(), role);
            assert_ne!(role.turn_type(), role.other().turn_type());
            assert_eq!(role.turn_type().side(), Side::Player);
            assert_eq!(TurnOrder::new(Side::Player, role).order()[0], role.turn_type());
            assert_eq!(TurnOrder::new(Side::Cpu, role).order()[3], role.other().turn_type());
        }
    }

    #[test]
    fn cycles_without_resetting() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut turn_order = TurnOrder::roll(&mut rng);
        let first: Vec<TurnType> = (0..4).map(|_| turn_order.next()).collect();
        let second: Vec<TurnType> = (0..4).map(|_| turn_order.next()).collect();
        assert_eq!(first, second);
        assert_eq!(first, turn_order.order());
        for _ in 0..1000 {
            turn_order.next();
        }
        assert_eq!(turn_order.next(), first[0]);
    }

    #[test]
    fn every_round_has_two_turns_per_side() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let order = TurnOrder::roll(&mut rng).order();
            let cpu_turns = order.iter().filter(|t| t.side() == Side::Cpu).count();
            assert_eq!(cpu_turns, 2);
            assert!(order.contains(&TurnType::PlayerGivesHint));
            assert!(order.contains(&TurnType::PlayerGuesses));
            assert_ne!(order[0].side(), order[1].side());
        }
    }

    #[test]
    fn roll_reaches_every_order() {
        let mut rng = StdRng::seed_from_u64(5);
        let orders: BTreeSet<String> = (0..100)
            .map(|_| format!("{:?}", TurnOrder::roll(&mut rng).order()))
            .collect();
        assert_eq!(orders.len(), 4);
    }
}
