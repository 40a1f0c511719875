//! In-memory bracket store: one bracket per tournament, one writer per bracket.

use crate::config::EngineConfig;
use crate::logic::{
    bracket_stats, bracket_view, build_bracket, cancel_match, nodes_by_round, record_result,
    seed_bracket, BracketStats, BracketView, ResultOutcome,
};
use crate::models::{
    Bracket, BracketError, BracketId, Node, NodeId, PlayerId, Round, SetScore, TournamentId,
};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type SharedBracket = Arc<RwLock<Bracket>>;

/// Every mutation takes the bracket's write lock for its whole record -> place -> advance
/// sequence; queries take the read lock. Distinct brackets never contend.
#[derive(Debug, Default)]
pub struct BracketRegistry {
    config: EngineConfig,
    by_tournament: RwLock<HashMap<TournamentId, BracketId>>,
    brackets: RwLock<HashMap<BracketId, SharedBracket>>,
}

// Logic validates before mutating, so a poisoned lock still guards consistent data.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl BracketRegistry {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of brackets held.
    pub fn len(&self) -> usize {
        read(&self.brackets).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn shared(&self, bracket_id: BracketId) -> Result<SharedBracket, BracketError> {
        read(&self.brackets)
            .get(&bracket_id)
            .cloned()
            .ok_or(BracketError::BracketNotFound(bracket_id))
    }

    fn shared_for_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> Result<SharedBracket, BracketError> {
        let bracket_id = read(&self.by_tournament)
            .get(&tournament_id)
            .copied()
            .ok_or(BracketError::NoBracketForTournament(tournament_id))?;
        self.shared(bracket_id)
    }

    /// Generate the tournament's bracket. Fails if it already has one.
    pub fn build(
        &self,
        tournament_id: TournamentId,
        participants: &[PlayerId],
    ) -> Result<Bracket, BracketError> {
        // Held across generation so two builds for one tournament cannot both pass the check.
        let mut by_tournament = write(&self.by_tournament);
        if by_tournament.contains_key(&tournament_id) {
            return Err(BracketError::AlreadyExists(tournament_id));
        }
        let bracket = build_bracket(tournament_id, participants, &self.config)?;
        by_tournament.insert(tournament_id, bracket.id);
        write(&self.brackets).insert(bracket.id, Arc::new(RwLock::new(bracket.clone())));
        Ok(bracket)
    }

    pub fn seed(
        &self,
        bracket_id: BracketId,
        seed_order: Option<&[PlayerId]>,
    ) -> Result<Bracket, BracketError> {
        let shared = self.shared(bracket_id)?;
        let mut bracket = write(&shared);
        seed_bracket(&mut bracket, seed_order)?;
        Ok(bracket.clone())
    }

    pub fn record_result(
        &self,
        bracket_id: BracketId,
        node_id: NodeId,
        winner: PlayerId,
        sets: Option<&[SetScore]>,
    ) -> Result<ResultOutcome, BracketError> {
        let shared = self.shared(bracket_id)?;
        let mut bracket = write(&shared);
        record_result(&mut bracket, node_id, winner, sets, self.config.max_set_score)
    }

    pub fn cancel_match(&self, bracket_id: BracketId, node_id: NodeId) -> Result<Node, BracketError> {
        let shared = self.shared(bracket_id)?;
        let mut bracket = write(&shared);
        cancel_match(&mut bracket, node_id)
    }

    /// Snapshot of a bracket by id.
    pub fn bracket(&self, bracket_id: BracketId) -> Result<Bracket, BracketError> {
        let shared = self.shared(bracket_id)?;
        let bracket = read(&shared).clone();
        Ok(bracket)
    }

    /// Snapshot of the tournament's bracket.
    pub fn bracket_for_tournament(&self, tournament_id: TournamentId) -> Result<Bracket, BracketError> {
        let shared = self.shared_for_tournament(tournament_id)?;
        let bracket = read(&shared).clone();
        Ok(bracket)
    }

    /// Resolved view of the tournament's bracket, optionally limited to one round.
    pub fn view_for_tournament(
        &self,
        tournament_id: TournamentId,
        round: Option<Round>,
    ) -> Result<BracketView, BracketError> {
        let shared = self.shared_for_tournament(tournament_id)?;
        let view = bracket_view(&read(&shared), round);
        Ok(view)
    }

    pub fn nodes_for_tournament(
        &self,
        tournament_id: TournamentId,
        round: Round,
    ) -> Result<Vec<Node>, BracketError> {
        let shared = self.shared_for_tournament(tournament_id)?;
        let nodes = nodes_by_round(&read(&shared), round);
        Ok(nodes)
    }

    pub fn node(&self, bracket_id: BracketId, node_id: NodeId) -> Result<Node, BracketError> {
        let shared = self.shared(bracket_id)?;
        let node = read(&shared)
            .node(node_id)
            .cloned()
            .ok_or(BracketError::NodeNotFound(node_id));
        node
    }

    pub fn stats_for_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> Result<BracketStats, BracketError> {
        let shared = self.shared_for_tournament(tournament_id)?;
        let stats = bracket_stats(&read(&shared));
        Ok(stats)
    }
}
