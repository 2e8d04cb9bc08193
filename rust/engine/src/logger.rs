use serde::{Deserialize, Serialize};

use crate::blackjack_table::BlackjackTable;
use crate::cards::Card;
use crate::game::{HoldemStage, HoldemTable};
use crate::player::PlayerAction;
use crate::pot::PotAward;

/// Records a single action during a hold'em hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat that acted
    pub seat: usize,
    /// The betting street when this action occurred
    pub street: HoldemStage,
    /// The action as requested
    pub action: PlayerAction,
    /// Chips that left the stack
    pub paid: u32,
}

/// Complete record of a hold'em hand: actions, board and payouts.
/// Serialized to JSONL for hand history storage and replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// Seed used for the deck shuffle
    pub seed: Option<u64>,
    pub dealer: usize,
    /// Hole cards per seat, empty for seats that were out
    pub holes: Vec<Vec<Card>>,
    pub actions: Vec<ActionRecord>,
    pub board: Vec<Card>,
    pub awards: Vec<PotAward>,
    /// Stacks after the payouts
    pub stacks: Vec<u32>,
    /// Timestamp when the hand was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl HandRecord {
    pub fn from_table(hand_id: String, seed: Option<u64>, table: &HoldemTable) -> Self {
        Self {
            hand_id,
            seed,
            dealer: table.dealer_index,
            holes: table.players.iter().map(|p| p.hand.clone()).collect(),
            actions: table.history.clone(),
            board: table.community.clone(),
            awards: table.winners.clone(),
            stacks: table.players.iter().map(|p| p.chips).collect(),
            ts: None,
        }
    }
}

/// Outcome of one seat in a blackjack round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatOutcome {
    pub seat: usize,
    pub hand: Vec<Card>,
    pub total: u32,
    pub bet: u32,
    pub result: String,
    pub chips: u32,
}

/// Complete record of a blackjack round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round_id: String,
    pub seed: Option<u64>,
    pub dealer_hand: Vec<Card>,
    pub dealer_total: u32,
    pub seats: Vec<SeatOutcome>,
    pub winners: Vec<usize>,
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    pub fn from_table(round_id: String, seed: Option<u64>, table: &BlackjackTable) -> Self {
        let dealer = &table.players[table.dealer_index];
        let seats = table
            .players
            .iter()
            .filter(|p| !p.is_dealer)
            .map(|p| SeatOutcome {
                seat: p.seat_index,
                hand: p.hand.clone(),
                total: crate::blackjack::hand_value(&p.hand),
                bet: p.bet,
                result: p.result.to_string(),
                chips: p.chips,
            })
            .collect();
        Self {
            round_id,
            seed,
            dealer_hand: dealer.hand.clone(),
            dealer_total: crate::blackjack::hand_value(&dealer.hand),
            seats,
            winners: table.winners.clone(),
            ts: None,
        }
    }
}

/// A record the [`HandLogger`] can stamp and write.
pub trait LogRecord: Serialize {
    fn ts_mut(&mut self) -> &mut Option<String>;
}

impl LogRecord for HandRecord {
    fn ts_mut(&mut self) -> &mut Option<String> {
        &mut self.ts
    }
}

impl LogRecord for RoundRecord {
    fn ts_mut(&mut self) -> &mut Option<String> {
        &mut self.ts
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends records as JSON lines and hands out sequential ids.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Logger that numbers records but writes nothing.
    pub fn detached(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write<R: LogRecord + Clone>(&mut self, record: &R) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        let ts = rec.ts_mut();
        if ts.is_none() {
            *ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_date_and_zero_padded_sequence() {
        let mut logger = HandLogger::detached("20250102");
        assert_eq!(logger.next_id(), "20250102-000001");
        assert_eq!(logger.next_id(), "20250102-000002");
    }

    #[test]
    fn action_record_serializes_street_lowercase() {
        let rec = ActionRecord {
            seat: 2,
            street: HoldemStage::Flop,
            action: PlayerAction::Raise(40),
            paid: 60,
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"street\":\"flop\""), "{}", json);
        let back: ActionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }
}
