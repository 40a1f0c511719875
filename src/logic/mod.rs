//! Bracket business logic: topology, generation, seeding, results, advancement, queries.

mod advancement;
mod builder;
mod export;
mod queries;
mod results;
mod seeding;
mod topology;

pub use advancement::{close_rounds, place_winner, Placement};
pub use builder::build_bracket;
pub use export::{bracket_csv, write_bracket_csv};
pub use queries::{
    bracket_stats, bracket_view, nodes_by_round, BracketStats, BracketView, NodeView, RoundStats,
};
pub use results::{cancel_match, record_result, ResultOutcome};
pub use seeding::seed_bracket;
pub use topology::{round_topology, Topology, MAX_FIELD};
