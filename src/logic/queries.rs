//! Read-only views over a bracket: resolved nodes, round filter, statistics.

use crate::models::{
    Bracket, BracketId, BracketStatus, MatchRecord, Node, NodeStatus, PlayerId, Round,
    TournamentId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A node with its match record looked up.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    #[serde(flatten)]
    pub node: Node,
    pub match_record: Option<MatchRecord>,
}

/// The whole bracket as served to readers.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketView {
    pub id: BracketId,
    pub tournament_id: TournamentId,
    pub rounds: Vec<Round>,
    pub total_rounds: usize,
    pub current_round: Round,
    pub status: BracketStatus,
    pub is_seeded: bool,
    pub champion: Option<PlayerId>,
    pub created_at: DateTime<Utc>,
    pub nodes: Vec<NodeView>,
}

/// Counts for one round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundStats {
    pub round: Round,
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketStats {
    pub total_matches: usize,
    pub completed_matches: usize,
    pub pending_matches: usize,
    pub in_progress_matches: usize,
    pub current_round: Round,
    pub total_rounds: usize,
    pub is_seeded: bool,
    pub status: BracketStatus,
    /// Only rounds present in the bracket, in play order.
    pub round_stats: Vec<RoundStats>,
}

fn count_status<'a>(nodes: impl Iterator<Item = &'a Node>, status: NodeStatus) -> usize {
    nodes.filter(|n| n.status == status).count()
}

/// Resolve match records and, optionally, keep only one round.
pub fn bracket_view(bracket: &Bracket, round: Option<Round>) -> BracketView {
    let nodes = bracket
        .nodes
        .iter()
        .filter(|n| round.map_or(true, |r| n.round == r))
        .map(|n| NodeView {
            node: n.clone(),
            match_record: n.match_id.and_then(|id| bracket.match_record(id)).cloned(),
        })
        .collect();
    BracketView {
        id: bracket.id,
        tournament_id: bracket.tournament_id,
        rounds: bracket.rounds.clone(),
        total_rounds: bracket.total_rounds(),
        current_round: bracket.current_round,
        status: bracket.status,
        is_seeded: bracket.is_seeded,
        champion: bracket.champion(),
        created_at: bracket.created_at,
        nodes,
    }
}

/// Nodes of one round, ordered by position.
pub fn nodes_by_round(bracket: &Bracket, round: Round) -> Vec<Node> {
    bracket.nodes_in_round(round).cloned().collect()
}

pub fn bracket_stats(bracket: &Bracket) -> BracketStats {
    let round_stats = Round::CATALOG
        .into_iter()
        .filter_map(|round| {
            let total = bracket.nodes_in_round(round).count();
            (total > 0).then(|| RoundStats {
                round,
                total,
                completed: count_status(bracket.nodes_in_round(round), NodeStatus::Completed),
                pending: count_status(bracket.nodes_in_round(round), NodeStatus::Pending),
            })
        })
        .collect();
    BracketStats {
        total_matches: bracket.nodes.len(),
        completed_matches: count_status(bracket.nodes.iter(), NodeStatus::Completed),
        pending_matches: count_status(bracket.nodes.iter(), NodeStatus::Pending),
        in_progress_matches: count_status(bracket.nodes.iter(), NodeStatus::InProgress),
        current_round: bracket.current_round,
        total_rounds: bracket.total_rounds(),
        is_seeded: bracket.is_seeded,
        status: bracket.status,
        round_stats,
    }
}
