pub use annotate::*;
pub use cards::*;
pub use containment::*;
pub use deck::*;
pub use distance::*;
pub use errors::*;
pub use game::*;
pub use matcher::*;
pub use normalize::*;
pub use protocol::*;
pub use score::*;
pub use turn::*;

mod annotate;
#[cfg(test)]
mod arbitrary;
mod cards;
mod containment;
mod deck;
mod distance;
mod errors;
mod game;
mod matcher;
mod normalize;
mod protocol;
mod score;
mod turn;
