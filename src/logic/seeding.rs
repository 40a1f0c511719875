//! Seeding: optionally reorder first-round pairings, then open the bracket for play.

use crate::models::{Bracket, BracketError, BracketStatus, PlayerId};
use log::info;
use std::collections::HashSet;

/// Apply `seed_order` to the first round (index 2i -> player 1, 2i+1 -> player 2 of node i)
/// and activate the bracket. With no order (or an empty one) the generated pairings stand.
///
/// The order must list every participant exactly once.
pub fn seed_bracket(
    bracket: &mut Bracket,
    seed_order: Option<&[PlayerId]>,
) -> Result<(), BracketError> {
    if bracket.status != BracketStatus::Generated {
        return Err(BracketError::WrongStatus {
            expected: BracketStatus::Generated,
            actual: bracket.status,
        });
    }
    let seed_order = seed_order.filter(|order| !order.is_empty());
    if let Some(order) = seed_order {
        validate_seed_order(bracket, order)?;
        let first_round = bracket.first_round();
        for node in bracket.nodes.iter_mut().filter(|n| n.round == first_round) {
            let i = node.position.x;
            node.player_1 = order.get(2 * i).copied();
            node.player_2 = order.get(2 * i + 1).copied();
        }
    }

    bracket.is_seeded = true;
    bracket.status = BracketStatus::Active;
    info!(
        "Seeded bracket {} ({})",
        bracket.id,
        if seed_order.is_some() {
            "custom order"
        } else {
            "registration order"
        }
    );
    Ok(())
}

fn validate_seed_order(bracket: &Bracket, order: &[PlayerId]) -> Result<(), BracketError> {
    if order.len() != bracket.participants.len() {
        return Err(BracketError::SeedOrderLength {
            expected: bracket.participants.len(),
            actual: order.len(),
        });
    }
    let known: HashSet<_> = bracket.participants.iter().copied().collect();
    let mut seen = HashSet::with_capacity(order.len());
    for &id in order {
        if !known.contains(&id) {
            return Err(BracketError::UnknownSeedPlayer(id));
        }
        if !seen.insert(id) {
            return Err(BracketError::DuplicateSeedPlayer(id));
        }
    }
    Ok(())
}
