//! Bracket generation: lay out every node of every round from the confirmed participants.

use crate::config::EngineConfig;
use crate::logic::topology::round_topology;
use crate::models::{Bracket, BracketError, BracketStatus, Node, PlayerId, Position, TournamentId};
use log::info;

/// Build a bracket for `participants` (registration order).
///
/// 1. Reject fields outside the configured limits.
/// 2. First round: node `i` gets participants `2i` and `2i+1`; a missing second one is a bye.
/// 3. Later rounds: empty placeholder nodes, filled in as winners advance. A placeholder whose
///    second feeder match does not exist can only ever receive one participant and is a bye.
///
/// Match numbers run from 1 across the whole bracket in generation order.
pub fn build_bracket(
    tournament_id: TournamentId,
    participants: &[PlayerId],
    config: &EngineConfig,
) -> Result<Bracket, BracketError> {
    if participants.len() < config.min_participants {
        return Err(BracketError::NotEnoughParticipants {
            required: config.min_participants,
            actual: participants.len(),
        });
    }
    if participants.len() > config.max_participants {
        return Err(BracketError::TooManyParticipants {
            max: config.max_participants,
            actual: participants.len(),
        });
    }
    let topology = round_topology(participants.len())?;

    let mut bracket = Bracket::new(
        tournament_id,
        participants.to_vec(),
        topology.round_names.clone(),
    );
    let mut nodes = Vec::with_capacity(topology.total_matches());
    let mut match_number = 1;

    for (x, pair) in participants.chunks(2).enumerate() {
        let mut node = Node::new(topology.round_names[0], match_number, Position { x, y: 0 });
        node.player_1 = pair.first().copied();
        node.player_2 = pair.get(1).copied();
        node.is_bye = node.player_2.is_none();
        nodes.push(node);
        match_number += 1;
    }

    for (y, &round) in topology.round_names.iter().enumerate().skip(1) {
        let feeders = topology.matches_in_round(y - 1);
        for x in 0..topology.matches_in_round(y) {
            let mut node = Node::new(round, match_number, Position { x, y });
            node.is_bye = 2 * x + 1 >= feeders;
            nodes.push(node);
            match_number += 1;
        }
    }

    bracket.nodes = nodes;
    bracket.status = BracketStatus::Generated;
    info!(
        "Generated bracket {} for tournament {}: {} participants, {} rounds, {} matches",
        bracket.id,
        tournament_id,
        participants.len(),
        bracket.total_rounds(),
        bracket.nodes.len()
    );
    Ok(bracket)
}
