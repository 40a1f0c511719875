//! Bracket node: one match slot in one round, plus its layout position.

use crate::models::match_record::MatchId;
use crate::models::round::Round;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a bracket node.
pub type NodeId = Uuid;

/// Unique identifier for a participant (issued by the registration system).
pub type PlayerId = Uuid;

/// Which participant slot of a node.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    One,
    Two,
}

/// Layout position: `y` is the round index, `x` the match's slot within that round.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Index of the next-round node this slot feeds.
    pub fn destination_index(&self) -> usize {
        self.x / 2
    }

    /// Slot the winner takes in the next-round node.
    pub fn destination_side(&self) -> Side {
        if self.x % 2 == 0 {
            Side::One
        } else {
            Side::Two
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// A single match slot in the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub round: Round,
    /// 1-based, unique across the whole bracket.
    pub match_number: u32,
    pub position: Position,
    pub player_1: Option<PlayerId>,
    pub player_2: Option<PlayerId>,
    pub winner: Option<PlayerId>,
    /// Match record holding the set scores, once a contested result was recorded.
    pub match_id: Option<MatchId>,
    pub status: NodeStatus,
    /// Only one participant will ever reach this node.
    pub is_bye: bool,
}

impl Node {
    /// Create an empty pending node.
    pub fn new(round: Round, match_number: u32, position: Position) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            match_number,
            position,
            player_1: None,
            player_2: None,
            winner: None,
            match_id: None,
            status: NodeStatus::Pending,
            is_bye: false,
        }
    }

    pub fn player(&self, side: Side) -> Option<PlayerId> {
        match side {
            Side::One => self.player_1,
            Side::Two => self.player_2,
        }
    }

    pub fn set_player(&mut self, side: Side, player: PlayerId) {
        match side {
            Side::One => self.player_1 = Some(player),
            Side::Two => self.player_2 = Some(player),
        }
    }

    pub fn has_participant(&self, player: PlayerId) -> bool {
        self.player_1 == Some(player) || self.player_2 == Some(player)
    }

    /// The sole participant of a bye node, once it has arrived.
    pub fn bye_participant(&self) -> Option<PlayerId> {
        if !self.is_bye {
            return None;
        }
        match (self.player_1, self.player_2) {
            (Some(p), None) | (None, Some(p)) => Some(p),
            _ => None,
        }
    }

    /// Both participants present.
    pub fn is_contested(&self) -> bool {
        self.player_1.is_some() && self.player_2.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.status == NodeStatus::Completed
    }

    /// Settle the node. The only place a node's winner is written.
    pub(crate) fn complete(&mut self, winner: PlayerId) {
        debug_assert!(self.has_participant(winner));
        self.winner = Some(winner);
        self.status = NodeStatus::Completed;
    }
}
