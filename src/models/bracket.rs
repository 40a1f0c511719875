//! Bracket, BracketStatus and BracketError.

use crate::models::match_record::{MatchId, MatchRecord};
use crate::models::node::{Node, NodeId, PlayerId};
use crate::models::round::Round;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament (owned by the tournament system).
pub type TournamentId = Uuid;

/// Unique identifier for a bracket.
pub type BracketId = Uuid;

/// Broad classification of a `BracketError`, for callers that only need to know the category.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    InsufficientParticipants,
    InvalidScore,
    InconsistentWinner,
}

/// Errors that can occur during bracket operations. None leave the bracket modified.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// No bracket with this id.
    BracketNotFound(BracketId),
    /// The tournament has no bracket yet.
    NoBracketForTournament(TournamentId),
    /// No node with this id in the bracket.
    NodeNotFound(NodeId),
    /// The tournament already has a bracket (one per tournament).
    AlreadyExists(TournamentId),
    /// Bracket is not in the status this action requires.
    WrongStatus {
        expected: BracketStatus,
        actual: BracketStatus,
    },
    /// Fewer confirmed participants than the configured minimum.
    NotEnoughParticipants { required: usize, actual: usize },
    /// More confirmed participants than the largest bracket holds.
    TooManyParticipants { max: usize, actual: usize },
    /// Seed order is not a permutation of the bracket's participants.
    SeedOrderLength { expected: usize, actual: usize },
    /// Seed order names someone who is not in the bracket.
    UnknownSeedPlayer(PlayerId),
    /// Seed order names the same participant twice.
    DuplicateSeedPlayer(PlayerId),
    /// The node's result is already final.
    MatchAlreadyCompleted(NodeId),
    /// The node's match was cancelled.
    MatchCancelled(NodeId),
    /// The node still waits for its participants.
    AwaitingParticipants(NodeId),
    /// A set score is above the allowed maximum.
    ScoreOutOfRange {
        player_1_score: u32,
        player_2_score: u32,
        max: u32,
    },
    /// More sets were submitted after the match was already decided.
    MatchAlreadyDecided(NodeId),
    /// A bye has no opponent, so it cannot carry set scores.
    SetsOnBye(NodeId),
    /// The declared winner does not play in this node.
    WinnerNotInMatch { node: NodeId, winner: PlayerId },
    /// The declared winner differs from the one the set scores decide.
    WinnerDisagreesWithSets {
        node: NodeId,
        declared: PlayerId,
        decided: PlayerId,
    },
}

impl BracketError {
    pub fn kind(&self) -> ErrorKind {
        use BracketError::*;
        match self {
            BracketNotFound(_) | NoBracketForTournament(_) | NodeNotFound(_) => ErrorKind::NotFound,
            AlreadyExists(_)
            | WrongStatus { .. }
            | TooManyParticipants { .. }
            | SeedOrderLength { .. }
            | UnknownSeedPlayer(_)
            | DuplicateSeedPlayer(_)
            | MatchAlreadyCompleted(_)
            | MatchCancelled(_)
            | AwaitingParticipants(_) => ErrorKind::InvalidState,
            NotEnoughParticipants { .. } => ErrorKind::InsufficientParticipants,
            ScoreOutOfRange { .. } | MatchAlreadyDecided(_) | SetsOnBye(_) => ErrorKind::InvalidScore,
            WinnerNotInMatch { .. } | WinnerDisagreesWithSets { .. } => ErrorKind::InconsistentWinner,
        }
    }
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::BracketNotFound(id) => write!(f, "Tournament bracket {} not found", id),
            BracketError::NoBracketForTournament(id) => {
                write!(f, "Tournament {} has no bracket", id)
            }
            BracketError::NodeNotFound(id) => write!(f, "Match node {} not found", id),
            BracketError::AlreadyExists(_) => write!(f, "Tournament bracket already exists"),
            BracketError::WrongStatus { expected, actual } => write!(
                f,
                "Bracket must be in {} status (currently {})",
                expected.as_str(),
                actual.as_str()
            ),
            BracketError::NotEnoughParticipants { required, actual } => write!(
                f,
                "Minimum {} participants required to generate bracket (have {})",
                required, actual
            ),
            BracketError::TooManyParticipants { max, actual } => write!(
                f,
                "Maximum {} participants allowed (have {})",
                max, actual
            ),
            BracketError::SeedOrderLength { expected, actual } => write!(
                f,
                "Seed order must list all {} participants (got {})",
                expected, actual
            ),
            BracketError::UnknownSeedPlayer(_) => {
                write!(f, "Seed order contains a player who is not in the bracket")
            }
            BracketError::DuplicateSeedPlayer(_) => {
                write!(f, "Seed order lists the same player twice")
            }
            BracketError::MatchAlreadyCompleted(_) => write!(f, "Match is already completed"),
            BracketError::MatchCancelled(_) => write!(f, "Match is cancelled"),
            BracketError::AwaitingParticipants(_) => {
                write!(f, "Match is still waiting for its participants")
            }
            BracketError::ScoreOutOfRange {
                player_1_score,
                player_2_score,
                max,
            } => write!(
                f,
                "Invalid scores {}-{}. Scores must be between 0 and {}",
                player_1_score, player_2_score, max
            ),
            BracketError::MatchAlreadyDecided(_) => {
                write!(f, "Sets submitted after the match was already decided")
            }
            BracketError::SetsOnBye(_) => write!(f, "A bye cannot carry set scores"),
            BracketError::WinnerNotInMatch { .. } => {
                write!(f, "Winner is not a participant of this match")
            }
            BracketError::WinnerDisagreesWithSets { .. } => {
                write!(f, "Winner does not match the set scores")
            }
        }
    }
}

impl std::error::Error for BracketError {}

/// Lifecycle of a bracket.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketStatus {
    /// Nodes are being laid out.
    #[default]
    Generating,
    /// All nodes exist; seeding may still reorder the first round.
    Generated,
    /// Results are being played.
    Active,
    /// The final has a winner.
    Completed,
}

impl BracketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BracketStatus::Generating => "generating",
            BracketStatus::Generated => "generated",
            BracketStatus::Active => "active",
            BracketStatus::Completed => "completed",
        }
    }
}

/// Full single-elimination bracket for one tournament: nodes, match records and round pointer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bracket {
    pub id: BracketId,
    pub tournament_id: TournamentId,
    /// Confirmed participants in registration order.
    pub participants: Vec<PlayerId>,
    /// Contiguous suffix of `Round::CATALOG`, earliest first.
    pub rounds: Vec<Round>,
    /// Round currently being played. Only moves forward, via `advance_round`.
    pub current_round: Round,
    pub status: BracketStatus,
    pub is_seeded: bool,
    /// All nodes, in generation order (round by round, `x` ascending).
    pub nodes: Vec<Node>,
    /// Match records referenced by `Node::match_id`.
    pub match_records: Vec<MatchRecord>,
    pub created_at: DateTime<Utc>,
}

impl Bracket {
    /// Create an empty bracket in Generating status. `rounds` must not be empty.
    pub fn new(tournament_id: TournamentId, participants: Vec<PlayerId>, rounds: Vec<Round>) -> Self {
        let current_round = rounds.first().copied().unwrap_or(Round::Final);
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            participants,
            rounds,
            current_round,
            status: BracketStatus::Generating,
            is_seeded: false,
            nodes: Vec::new(),
            match_records: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn total_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn first_round(&self) -> Round {
        self.rounds.first().copied().unwrap_or(Round::Final)
    }

    pub fn has_round(&self, round: Round) -> bool {
        self.rounds.contains(&round)
    }

    /// Round after `round` within this bracket.
    pub fn next_round(&self, round: Round) -> Option<Round> {
        round.next().filter(|next| self.has_round(*next))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Nodes of one round, ordered by `position.x`.
    pub fn nodes_in_round(&self, round: Round) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(move |n| n.round == round)
    }

    pub fn match_record(&self, id: MatchId) -> Option<&MatchRecord> {
        self.match_records.iter().find(|m| m.id == id)
    }

    /// Every node of `round` is completed.
    pub fn is_round_complete(&self, round: Round) -> bool {
        self.nodes_in_round(round).all(Node::is_completed)
    }

    /// Move `current_round` to the next round if the current one is complete.
    /// Returns the new round, or None when the round is still open or is the last one.
    pub fn advance_round(&mut self) -> Option<Round> {
        if !self.is_round_complete(self.current_round) {
            return None;
        }
        let next = self.next_round(self.current_round)?;
        self.current_round = next;
        Some(next)
    }

    pub fn final_node(&self) -> Option<&Node> {
        self.nodes_in_round(Round::Final).next()
    }

    /// Winner of the final, once decided.
    pub fn champion(&self) -> Option<PlayerId> {
        self.final_node().and_then(|n| n.winner)
    }
}
