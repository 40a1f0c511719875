//! Round topology: participant count to round names and match counts.

use crate::models::{BracketError, Round};

/// Round-name buckets, checked in order: the first whose bound is >= n wins.
const ROUND_BUCKETS: [(usize, &[Round]); 4] = [
    (
        16,
        &[Round::RoundOf16, Round::QuarterFinals, Round::SemiFinals, Round::Final],
    ),
    (
        32,
        &[
            Round::RoundOf32,
            Round::RoundOf16,
            Round::QuarterFinals,
            Round::SemiFinals,
            Round::Final,
        ],
    ),
    (
        64,
        &[
            Round::RoundOf64,
            Round::RoundOf32,
            Round::RoundOf16,
            Round::QuarterFinals,
            Round::SemiFinals,
            Round::Final,
        ],
    ),
    (MAX_FIELD, &Round::CATALOG),
];

/// Largest field the round catalog can lay out.
pub const MAX_FIELD: usize = 128;

/// Shape of a bracket for a given participant count.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Topology {
    pub round_names: Vec<Round>,
    pub first_round_matches: usize,
}

impl Topology {
    pub fn total_rounds(&self) -> usize {
        self.round_names.len()
    }

    /// Matches in round `index` (0 = first round): ceil(first_round_matches / 2^index).
    pub fn matches_in_round(&self, index: usize) -> usize {
        let mut count = self.first_round_matches;
        for _ in 0..index {
            count = count.div_ceil(2);
        }
        count
    }

    pub fn total_matches(&self) -> usize {
        (0..self.total_rounds()).map(|r| self.matches_in_round(r)).sum()
    }
}

/// Compute the topology for `n` participants. Fewer than two cannot form a match, and more than
/// [`MAX_FIELD`] would need rounds the catalog does not have.
pub fn round_topology(n: usize) -> Result<Topology, BracketError> {
    if n < 2 {
        return Err(BracketError::NotEnoughParticipants {
            required: 2,
            actual: n,
        });
    }
    let round_names = ROUND_BUCKETS
        .iter()
        .find(|(bound, _)| n <= *bound)
        .map(|(_, names)| names.to_vec())
        .ok_or(BracketError::TooManyParticipants {
            max: MAX_FIELD,
            actual: n,
        })?;
    Ok(Topology {
        round_names,
        first_round_matches: n.div_ceil(2),
    })
}
