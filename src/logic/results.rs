//! Match results: validate and record one node's outcome, then advance the bracket.

use crate::logic::advancement::{close_rounds, place_winner, Placement};
use crate::models::{
    Bracket, BracketError, BracketStatus, MatchRecord, Node, NodeId, NodeStatus, PlayerId, Round,
    SetScore,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// What recording a result changed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResultOutcome {
    /// The node as it stands after the result.
    pub node: Node,
    /// None for byes, which are never played.
    pub match_record: Option<MatchRecord>,
    /// Set when the node completed and its winner moved on.
    pub placement: Option<Placement>,
    /// Rounds the bracket's current round moved to, in order.
    pub rounds_advanced: Vec<Round>,
    /// Set once the final is decided.
    pub champion: Option<PlayerId>,
}

/// How a node gets decided.
enum Decision {
    /// Sole participant of a bye moves on.
    Bye(PlayerId),
    /// Contested match, possibly still undecided after these sets.
    Match(MatchRecord),
}

/// Record a result for `node_id`.
///
/// With `sets`, they are appended to the node's match record; the node completes only once a
/// side reaches the round's set wins, and that side must be `winner`. Without sets the match is
/// decided for `winner` directly. A bye is decided by naming its sole participant.
///
/// Byes are never advanced on their own: until their sole participant is recorded, the round
/// they sit in stays open, so a bracket with an odd field waits on its bye nodes.
///
/// Everything is validated before the bracket is touched.
pub fn record_result(
    bracket: &mut Bracket,
    node_id: NodeId,
    winner: PlayerId,
    sets: Option<&[SetScore]>,
    max_set_score: u32,
) -> Result<ResultOutcome, BracketError> {
    if bracket.status == BracketStatus::Completed {
        return Err(BracketError::WrongStatus {
            expected: BracketStatus::Active,
            actual: bracket.status,
        });
    }
    let node = bracket
        .node(node_id)
        .ok_or(BracketError::NodeNotFound(node_id))?;
    match node.status {
        NodeStatus::Completed => return Err(BracketError::MatchAlreadyCompleted(node_id)),
        NodeStatus::Cancelled => return Err(BracketError::MatchCancelled(node_id)),
        NodeStatus::Pending | NodeStatus::InProgress => {}
    }
    let sets = sets.unwrap_or_default();

    let decision = if let Some(sole) = node.bye_participant() {
        if sole != winner {
            return Err(BracketError::WinnerNotInMatch {
                node: node_id,
                winner,
            });
        }
        if !sets.is_empty() {
            return Err(BracketError::SetsOnBye(node_id));
        }
        Decision::Bye(sole)
    } else {
        let existing = node.match_id.and_then(|id| bracket.match_record(id)).cloned();
        let mut record = match existing {
            Some(record) => record,
            None => MatchRecord::for_node(bracket.tournament_id, node)
                .ok_or(BracketError::AwaitingParticipants(node_id))?,
        };
        if !node.has_participant(winner) {
            return Err(BracketError::WinnerNotInMatch {
                node: node_id,
                winner,
            });
        }
        if sets.is_empty() {
            record.declare_winner(winner)?;
        } else {
            for &score in sets {
                record.add_set(score, max_set_score)?;
            }
            if let Some(decided) = record.winner.filter(|&w| w != winner) {
                return Err(BracketError::WinnerDisagreesWithSets {
                    node: node_id,
                    declared: winner,
                    decided,
                });
            }
        }
        Decision::Match(record)
    };

    // Validated: apply.
    if bracket.status == BracketStatus::Generated {
        bracket.status = BracketStatus::Active;
        info!("Bracket {} is now active", bracket.id);
    }
    let (settled, match_record) = match decision {
        Decision::Bye(player) => (Some(player), None),
        Decision::Match(record) => {
            let settled = record.winner;
            store_record(bracket, node_id, record.clone());
            (settled, Some(record))
        }
    };

    let bracket_id = bracket.id;
    let node = bracket
        .node_mut(node_id)
        .ok_or(BracketError::NodeNotFound(node_id))?;
    let mut placement = None;
    let mut rounds_advanced = Vec::new();
    match settled {
        Some(player) => {
            node.complete(player);
            debug!(
                "Bracket {}: {} match {} won by {}",
                bracket_id, node.round, node.match_number, player
            );
            placement = place_winner(bracket, node_id);
            rounds_advanced = close_rounds(bracket);
        }
        None => {
            node.status = NodeStatus::InProgress;
            debug!(
                "Bracket {}: {} match {} in progress",
                bracket_id, node.round, node.match_number
            );
        }
    }

    let node = bracket
        .node(node_id)
        .cloned()
        .ok_or(BracketError::NodeNotFound(node_id))?;
    Ok(ResultOutcome {
        node,
        match_record,
        placement,
        rounds_advanced,
        champion: bracket.champion(),
    })
}

/// Insert or replace the node's match record and link it.
fn store_record(bracket: &mut Bracket, node_id: NodeId, record: MatchRecord) {
    let record_id = record.id;
    match bracket.match_records.iter_mut().find(|m| m.id == record_id) {
        Some(slot) => *slot = record,
        None => bracket.match_records.push(record),
    }
    if let Some(node) = bracket.node_mut(node_id) {
        node.match_id = Some(record_id);
    }
}

/// Cancel a node's match. Completed matches cannot be cancelled; a cancelled node accepts no
/// further results.
pub fn cancel_match(bracket: &mut Bracket, node_id: NodeId) -> Result<Node, BracketError> {
    let node = bracket
        .node_mut(node_id)
        .ok_or(BracketError::NodeNotFound(node_id))?;
    match node.status {
        NodeStatus::Completed => return Err(BracketError::MatchAlreadyCompleted(node_id)),
        NodeStatus::Cancelled => return Err(BracketError::MatchCancelled(node_id)),
        NodeStatus::Pending | NodeStatus::InProgress => {}
    }
    node.status = NodeStatus::Cancelled;
    let node = node.clone();
    if let Some(record) = node
        .match_id
        .and_then(|id| bracket.match_records.iter_mut().find(|m| m.id == id))
    {
        record.cancel();
    }
    info!(
        "Bracket {}: {} match {} cancelled",
        bracket.id, node.round, node.match_number
    );
    Ok(node)
}
