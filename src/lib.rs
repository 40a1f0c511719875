//! Knockout bracket engine: library with models, bracket logic and an in-memory registry.

pub mod config;
pub mod logic;
pub mod models;
pub mod registry;

pub use config::EngineConfig;
pub use logic::{
    bracket_csv, bracket_stats, bracket_view, build_bracket, cancel_match, close_rounds,
    nodes_by_round, place_winner, record_result, round_topology, seed_bracket, write_bracket_csv,
    BracketStats, BracketView, NodeView, Placement, ResultOutcome, RoundStats, Topology, MAX_FIELD,
};
pub use models::{
    Bracket, BracketError, BracketId, BracketStatus, ErrorKind, MatchFormat, MatchId, MatchRecord,
    MatchStatus, Node, NodeId, NodeStatus, PlayerId, Position, Round, SetResult, SetScore,
    SetWinner, Side, TournamentId, UnknownRound,
};
pub use registry::BracketRegistry;
