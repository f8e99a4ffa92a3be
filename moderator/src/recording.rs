use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use taboo::{Card, GameSummary, Outcome, RoundResult, TurnType};

/// Collects what happened to every card and writes it out as JSON.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    cards: Vec<CardRecord>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            cards: Vec::new(),
        })
    }

    pub fn store_card(&mut self, record: CardRecord) {
        self.cards.push(record);
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    /// Writes the stored cards into the next free `game_NNNNNN.json` and
    /// returns its path.
    pub fn write_game_recording(
        &mut self,
        seed: u64,
        model: &str,
        summary: &GameSummary,
    ) -> anyhow::Result<PathBuf> {
        let mut filepath = self.filepath();
        while filepath.exists() {
            self.num += 1;
            filepath = self.filepath();
        }
        let recording = GameRecording {
            seed,
            model: String::from(model),
            cards: std::mem::take(&mut self.cards),
            summary: *summary,
        };
        let mut writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(&mut writer, &recording)?;
        writeln!(writer)?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }

    fn filepath(&self) -> PathBuf {
        self.directory.join(format!("game_{:0>6}.json", self.num))
    }
}

#[derive(Serialize, Deserialize)]
pub struct GameRecording {
    pub seed: u64,
    pub model: String,
    pub cards: Vec<CardRecord>,
    pub summary: GameSummary,
}

/// Everything that was said while playing one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub turn_type: TurnType,
    pub card_id: u32,
    pub target: String,
    pub hints: Vec<String>,
    pub guesses: Vec<String>,
    pub outcome: Outcome,
    pub attempts: u32,
}

impl CardRecord {
    pub fn new(
        turn_type: TurnType,
        card: &Card,
        hints: Vec<String>,
        guesses: Vec<String>,
        result: RoundResult,
    ) -> Self {
        Self {
            turn_type,
            card_id: card.id,
            target: card.target.clone(),
            hints,
            guesses,
            outcome: result.outcome,
            attempts: result.attempts,
        }
    }
}
