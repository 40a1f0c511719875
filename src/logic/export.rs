//! CSV export of a bracket's nodes, one row per match.

use crate::models::{Bracket, NodeStatus, PlayerId};
use serde::Serialize;
use std::io;

#[derive(Serialize)]
struct NodeRow {
    match_number: u32,
    round: &'static str,
    x: usize,
    y: usize,
    player_1: Option<PlayerId>,
    player_2: Option<PlayerId>,
    winner: Option<PlayerId>,
    status: NodeStatus,
    is_bye: bool,
}

/// Write every node in match-number order, with a header row.
pub fn write_bracket_csv<W: io::Write>(bracket: &Bracket, writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    let mut nodes: Vec<_> = bracket.nodes.iter().collect();
    nodes.sort_by_key(|n| n.match_number);
    for node in nodes {
        out.serialize(NodeRow {
            match_number: node.match_number,
            round: node.round.as_str(),
            x: node.position.x,
            y: node.position.y,
            player_1: node.player_1,
            player_2: node.player_2,
            winner: node.winner,
            status: node.status,
            is_bye: node.is_bye,
        })?;
    }
    out.flush()?;
    Ok(())
}

/// Bracket as a CSV string.
pub fn bracket_csv(bracket: &Bracket) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    write_bracket_csv(bracket, &mut buf)?;
    String::from_utf8(buf).map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
}
