//! Match record: the authoritative, set-by-set result of one contested node.

use crate::models::bracket::BracketError;
use crate::models::node::{Node, NodeId, PlayerId, Side};
use crate::models::round::{MatchFormat, Round};
use crate::models::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match record.
pub type MatchId = Uuid;

/// Score of one set as submitted by the caller.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub player_1_score: u32,
    pub player_2_score: u32,
}

impl SetScore {
    pub fn new(player_1_score: u32, player_2_score: u32) -> Self {
        Self {
            player_1_score,
            player_2_score,
        }
    }
}

/// Who took a set. A tied set is a draw and counts for nobody.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetWinner {
    Player1,
    Player2,
    Draw,
}

/// A recorded set.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetResult {
    pub player_1_score: u32,
    pub player_2_score: u32,
    pub winner: SetWinner,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// Result of one contest between the two participants of a node.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub node_id: NodeId,
    pub player_1: PlayerId,
    pub player_2: PlayerId,
    pub round: Round,
    pub match_number: u32,
    pub format: MatchFormat,
    pub status: MatchStatus,
    pub sets: Vec<SetResult>,
    pub winner: Option<PlayerId>,
    pub loser: Option<PlayerId>,
    /// Decided by declaration rather than by set wins.
    pub is_walkover: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl MatchRecord {
    /// Open a record for a node. None unless both participants are known.
    pub fn for_node(tournament_id: TournamentId, node: &Node) -> Option<Self> {
        Some(Self {
            id: Uuid::new_v4(),
            tournament_id,
            node_id: node.id,
            player_1: node.player_1?,
            player_2: node.player_2?,
            round: node.round,
            match_number: node.match_number,
            format: node.round.format(),
            status: MatchStatus::Scheduled,
            sets: Vec::new(),
            winner: None,
            loser: None,
            is_walkover: false,
            created_at: Utc::now(),
            completed_at: None,
        })
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Sets won so far by (player 1, player 2).
    pub fn set_wins(&self) -> (u32, u32) {
        self.sets.iter().fold((0, 0), |(p1, p2), set| match set.winner {
            SetWinner::Player1 => (p1 + 1, p2),
            SetWinner::Player2 => (p1, p2 + 1),
            SetWinner::Draw => (p1, p2),
        })
    }

    fn player(&self, side: Side) -> PlayerId {
        match side {
            Side::One => self.player_1,
            Side::Two => self.player_2,
        }
    }

    /// Append one set. Completes the match once a side reaches the format's set wins.
    pub fn add_set(&mut self, score: SetScore, max_score: u32) -> Result<(), BracketError> {
        match self.status {
            MatchStatus::Completed => return Err(BracketError::MatchAlreadyDecided(self.node_id)),
            MatchStatus::Cancelled => return Err(BracketError::MatchCancelled(self.node_id)),
            MatchStatus::Scheduled | MatchStatus::InProgress => {}
        }
        if score.player_1_score > max_score || score.player_2_score > max_score {
            return Err(BracketError::ScoreOutOfRange {
                player_1_score: score.player_1_score,
                player_2_score: score.player_2_score,
                max: max_score,
            });
        }
        let winner = match score.player_1_score.cmp(&score.player_2_score) {
            std::cmp::Ordering::Greater => SetWinner::Player1,
            std::cmp::Ordering::Less => SetWinner::Player2,
            std::cmp::Ordering::Equal => SetWinner::Draw,
        };
        self.sets.push(SetResult {
            player_1_score: score.player_1_score,
            player_2_score: score.player_2_score,
            winner,
        });
        self.status = MatchStatus::InProgress;

        let (p1_wins, p2_wins) = self.set_wins();
        let needed = self.format.sets_to_win;
        if p1_wins >= needed {
            self.decide(Side::One, false);
        } else if p2_wins >= needed {
            self.decide(Side::Two, false);
        }
        Ok(())
    }

    /// Complete the match for `winner` without further sets (retirement, no-show).
    pub fn declare_winner(&mut self, winner: PlayerId) -> Result<(), BracketError> {
        let side = if winner == self.player_1 {
            Side::One
        } else if winner == self.player_2 {
            Side::Two
        } else {
            return Err(BracketError::WinnerNotInMatch {
                node: self.node_id,
                winner,
            });
        };
        self.decide(side, true);
        Ok(())
    }

    fn decide(&mut self, side: Side, walkover: bool) {
        let other = match side {
            Side::One => Side::Two,
            Side::Two => Side::One,
        };
        self.winner = Some(self.player(side));
        self.loser = Some(self.player(other));
        self.is_walkover = walkover;
        self.status = MatchStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    pub fn cancel(&mut self) {
        self.status = MatchStatus::Cancelled;
    }
}
