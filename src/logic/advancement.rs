//! Advancement: move a winner into the next round and close finished rounds.

use crate::models::{Bracket, BracketStatus, NodeId, PlayerId, Round, Side};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Where a winner was placed in the next round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub node_id: NodeId,
    pub round: Round,
    pub side: Side,
    pub player: PlayerId,
}

/// Place the winner of completed node `source` into its next-round node.
///
/// The destination is node `x / 2` of the next round, player 1 for even `x` and player 2 for
/// odd. Returns None after the final, or when the destination does not exist.
pub fn place_winner(bracket: &mut Bracket, source: NodeId) -> Option<Placement> {
    let (round, position, winner) = {
        let node = bracket.node(source)?;
        (node.round, node.position, node.winner?)
    };
    let next_round = bracket.next_round(round)?;
    let index = position.destination_index();
    let side = position.destination_side();

    let Some(destination) = bracket
        .nodes
        .iter_mut()
        .filter(|n| n.round == next_round)
        .nth(index)
    else {
        warn!(
            "Bracket {}: no {} match at index {} for the winner of {} match x={}; not advanced",
            bracket.id, next_round, index, round, position.x
        );
        return None;
    };
    // Status is left as is: a cancelled destination stays cancelled.
    destination.set_player(side, winner);
    Some(Placement {
        node_id: destination.id,
        round: next_round,
        side,
        player: winner,
    })
}

/// Advance `current_round` past every completed round and complete the bracket once the final
/// has a winner. Returns the rounds the pointer moved to, in order.
pub fn close_rounds(bracket: &mut Bracket) -> Vec<Round> {
    let mut advanced = Vec::new();
    while let Some(next) = bracket.advance_round() {
        info!("Bracket {}: advanced to {}", bracket.id, next);
        advanced.push(next);
    }
    if bracket.status != BracketStatus::Completed {
        if let Some(champion) = bracket.champion() {
            bracket.status = BracketStatus::Completed;
            info!("Bracket {} completed, champion {}", bracket.id, champion);
        }
    }
    advanced
}
