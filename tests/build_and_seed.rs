//! Integration tests for bracket generation and seeding.

use knockout_bracket::{
    build_bracket, record_result, seed_bracket, Bracket, BracketError, BracketStatus,
    EngineConfig, ErrorKind, NodeStatus, PlayerId, Position, Round,
};
use uuid::Uuid;

fn players(n: usize) -> Vec<PlayerId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn bracket_with(participants: &[PlayerId]) -> Bracket {
    build_bracket(Uuid::new_v4(), participants, &EngineConfig::default()).unwrap()
}

#[test]
fn sixteen_players_make_fifteen_numbered_nodes() {
    let p = players(16);
    let b = bracket_with(&p);

    assert_eq!(b.status, BracketStatus::Generated);
    assert_eq!(b.current_round, Round::RoundOf16);
    assert!(!b.is_seeded);
    assert_eq!(b.total_rounds(), 4);
    assert_eq!(b.nodes.len(), 15);

    let numbers: Vec<u32> = b.nodes.iter().map(|n| n.match_number).collect();
    assert_eq!(numbers, (1..=15).collect::<Vec<_>>());

    let per_round: Vec<usize> = b.rounds.iter().map(|r| b.nodes_in_round(*r).count()).collect();
    assert_eq!(per_round, vec![8, 4, 2, 1]);

    for (y, round) in b.rounds.iter().enumerate() {
        for (x, node) in b.nodes_in_round(*round).enumerate() {
            assert_eq!(node.position, Position { x, y });
            assert_eq!(node.status, NodeStatus::Pending);
        }
    }
}

#[test]
fn first_round_pairs_in_registration_order() {
    let p = players(16);
    let b = bracket_with(&p);
    for (i, node) in b.nodes_in_round(Round::RoundOf16).enumerate() {
        assert_eq!(node.player_1, Some(p[2 * i]));
        assert_eq!(node.player_2, Some(p[2 * i + 1]));
        assert!(!node.is_bye);
    }
    for round in [Round::QuarterFinals, Round::SemiFinals, Round::Final] {
        for node in b.nodes_in_round(round) {
            assert_eq!(node.player_1, None);
            assert_eq!(node.player_2, None);
            assert_eq!(node.winner, None);
        }
    }
}

#[test]
fn odd_field_gets_a_bye_and_ghost_byes_upstream() {
    let p = players(17);
    let b = bracket_with(&p);
    assert_eq!(b.current_round, Round::RoundOf32);
    assert_eq!(b.nodes.len(), 9 + 5 + 3 + 2 + 1);

    let last = b.nodes_in_round(Round::RoundOf32).last().unwrap();
    assert_eq!(last.position.x, 8);
    assert_eq!(last.player_1, Some(p[16]));
    assert_eq!(last.player_2, None);
    assert!(last.is_bye);

    let byes = |round| -> Vec<usize> {
        b.nodes_in_round(round)
            .filter(|n| n.is_bye)
            .map(|n| n.position.x)
            .collect()
    };
    assert_eq!(byes(Round::RoundOf16), vec![4]);
    assert_eq!(byes(Round::QuarterFinals), vec![2]);
    assert_eq!(byes(Round::SemiFinals), vec![1]);
    assert!(byes(Round::Final).is_empty());
}

#[test]
fn participant_limits_are_enforced() {
    let err = build_bracket(Uuid::new_v4(), &players(15), &EngineConfig::default()).unwrap_err();
    assert_eq!(
        err,
        BracketError::NotEnoughParticipants {
            required: 16,
            actual: 15
        }
    );
    assert_eq!(err.kind(), ErrorKind::InsufficientParticipants);

    let err = build_bracket(Uuid::new_v4(), &players(129), &EngineConfig::default()).unwrap_err();
    assert!(matches!(err, BracketError::TooManyParticipants { max: 128, actual: 129 }));

    // A raised limit cannot stretch the bracket past the round catalog.
    let wide = EngineConfig {
        max_participants: 200,
        ..EngineConfig::default()
    };
    let err = build_bracket(Uuid::new_v4(), &players(200), &wide).unwrap_err();
    assert_eq!(
        err,
        BracketError::TooManyParticipants {
            max: 128,
            actual: 200
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert_eq!(wide.clamped().max_participants, 128);

    let small = EngineConfig {
        min_participants: 4,
        ..EngineConfig::default()
    };
    let b = build_bracket(Uuid::new_v4(), &players(4), &small).unwrap();
    assert_eq!(b.nodes.len(), 2 + 1 + 1 + 1);
}

#[test]
fn seed_order_overwrites_first_round_pairwise() {
    let p = players(16);
    let mut b = bracket_with(&p);
    let order: Vec<PlayerId> = p.iter().rev().copied().collect();

    seed_bracket(&mut b, Some(order.as_slice())).unwrap();

    assert!(b.is_seeded);
    assert_eq!(b.status, BracketStatus::Active);
    for (i, node) in b.nodes_in_round(Round::RoundOf16).enumerate() {
        assert_eq!(node.player_1, Some(order[2 * i]));
        assert_eq!(node.player_2, Some(order[2 * i + 1]));
    }
}

#[test]
fn seeding_without_order_keeps_generated_pairings() {
    let p = players(16);
    let mut b = bracket_with(&p);
    let before: Vec<_> = b.nodes.clone();

    seed_bracket(&mut b, None).unwrap();
    assert_eq!(b.nodes, before);
    assert_eq!(b.status, BracketStatus::Active);

    let mut b = bracket_with(&p);
    seed_bracket(&mut b, Some(&[][..])).unwrap();
    assert_eq!(
        b.nodes_in_round(Round::RoundOf16).next().unwrap().player_1,
        Some(p[0])
    );
}

#[test]
fn reseeding_an_active_bracket_fails() {
    let p = players(16);
    let mut b = bracket_with(&p);
    seed_bracket(&mut b, None).unwrap();

    let err = seed_bracket(&mut b, Some(p.as_slice())).unwrap_err();
    assert_eq!(
        err,
        BracketError::WrongStatus {
            expected: BracketStatus::Generated,
            actual: BracketStatus::Active
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn first_result_activates_and_locks_out_seeding() {
    let p = players(16);
    let mut b = bracket_with(&p);
    let node = b.nodes[0].id;
    record_result(&mut b, node, p[0], None, 11).unwrap();
    assert_eq!(b.status, BracketStatus::Active);
    assert!(!b.is_seeded);

    let err = seed_bracket(&mut b, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn invalid_seed_orders_leave_the_bracket_untouched() {
    let p = players(16);
    let mut b = bracket_with(&p);
    let before = b.nodes.clone();

    let mut short = p.clone();
    short.pop();
    assert!(matches!(
        seed_bracket(&mut b, Some(short.as_slice())),
        Err(BracketError::SeedOrderLength {
            expected: 16,
            actual: 15
        })
    ));

    let mut stranger = p.clone();
    let outsider = Uuid::new_v4();
    stranger[3] = outsider;
    assert_eq!(
        seed_bracket(&mut b, Some(stranger.as_slice())),
        Err(BracketError::UnknownSeedPlayer(outsider))
    );

    let mut twice = p.clone();
    twice[5] = p[4];
    assert_eq!(
        seed_bracket(&mut b, Some(twice.as_slice())),
        Err(BracketError::DuplicateSeedPlayer(p[4]))
    );

    assert_eq!(b.nodes, before);
    assert_eq!(b.status, BracketStatus::Generated);
    assert!(!b.is_seeded);
}
