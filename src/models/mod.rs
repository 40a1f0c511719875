//! Data structures for the knockout bracket: rounds, nodes, match records, bracket state.

mod bracket;
mod match_record;
mod node;
mod round;

pub use bracket::{Bracket, BracketError, BracketId, BracketStatus, ErrorKind, TournamentId};
pub use match_record::{MatchId, MatchRecord, MatchStatus, SetResult, SetScore, SetWinner};
pub use node::{Node, NodeId, NodeStatus, PlayerId, Position, Side};
pub use round::{MatchFormat, Round, UnknownRound};
