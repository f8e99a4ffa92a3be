use serde::{Deserialize, Serialize};

use crate::Side;

/// Points for a card guessed on the first attempt.
pub const MAX_POINTS: u32 = 5;

/// Points for guessing a card after the given number of attempts.
///
/// One attempt is worth [`MAX_POINTS`], each further attempt costs a point,
/// and anything past the fifth attempt is still worth 1.
pub fn points_for(attempts: u32) -> u32 {
    match attempts {
        0 | 1 => MAX_POINTS,
        2..=5 => MAX_POINTS + 1 - attempts,
        _ => 1,
    }
}

/// Running totals of both sides. Totals only ever grow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub player: u32,
    pub cpu: u32,
}

impl Scores {
    /// Credits a guessed card to `side` and returns the points added.
    pub fn award(&mut self, side: Side, attempts: u32) -> u32 {
        let points = points_for(attempts);
        match side {
            Side::Player => self.player += points,
            Side::Cpu => self.cpu += points,
        }
        points
    }

    pub fn of(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Cpu => self.cpu,
        }
    }
}
