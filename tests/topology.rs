//! Integration tests for round topology and the round catalog.

use knockout_bracket::{round_topology, BracketError, ErrorKind, MatchFormat, Round, MAX_FIELD};

fn matches_per_round(n: usize) -> Vec<usize> {
    let t = round_topology(n).unwrap();
    (0..t.total_rounds()).map(|r| t.matches_in_round(r)).collect()
}

#[test]
fn sixteen_players_play_four_rounds() {
    let t = round_topology(16).unwrap();
    assert_eq!(t.total_rounds(), 4);
    assert_eq!(
        t.round_names,
        vec![Round::RoundOf16, Round::QuarterFinals, Round::SemiFinals, Round::Final]
    );
    assert_eq!(t.first_round_matches, 8);
    assert_eq!(matches_per_round(16), vec![8, 4, 2, 1]);
    assert_eq!(t.total_matches(), 15);
}

#[test]
fn boundaries_are_inclusive_upper_bounds() {
    let expected = [
        (16, 4, Round::RoundOf16),
        (17, 5, Round::RoundOf32),
        (32, 5, Round::RoundOf32),
        (33, 6, Round::RoundOf64),
        (64, 6, Round::RoundOf64),
        (65, 7, Round::RoundOf128),
        (128, 7, Round::RoundOf128),
    ];
    for (n, rounds, first) in expected {
        let t = round_topology(n).unwrap();
        assert_eq!(t.total_rounds(), rounds, "n = {n}");
        assert_eq!(t.round_names[0], first, "n = {n}");
        assert_eq!(t.round_names.last(), Some(&Round::Final), "n = {n}");
        assert_eq!(t.first_round_matches, n.div_ceil(2), "n = {n}");
    }
}

#[test]
fn round_names_are_a_suffix_of_the_catalog() {
    for n in [16, 32, 64, 128] {
        let t = round_topology(n).unwrap();
        let skip = Round::CATALOG.len() - t.total_rounds();
        assert_eq!(t.round_names, Round::CATALOG[skip..].to_vec());
    }
}

#[test]
fn odd_counts_round_up_at_every_level() {
    assert_eq!(matches_per_round(17), vec![9, 5, 3, 2, 1]);
    assert_eq!(matches_per_round(20), vec![10, 5, 3, 2, 1]);
    assert_eq!(matches_per_round(128), vec![64, 32, 16, 8, 4, 2, 1]);
}

#[test]
fn fewer_than_two_participants_is_rejected() {
    for n in [0, 1] {
        let err = round_topology(n).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientParticipants);
    }
    // Degenerate but well defined.
    assert_eq!(matches_per_round(2), vec![1, 1, 1, 1]);
}

#[test]
fn round_catalog_order_and_names() {
    assert_eq!(Round::RoundOf64.next(), Some(Round::RoundOf32));
    assert_eq!(Round::SemiFinals.next(), Some(Round::Final));
    assert_eq!(Round::Final.next(), None);
    assert_eq!("quarter_finals".parse::<Round>(), Ok(Round::QuarterFinals));
    assert!("third_place".parse::<Round>().is_err());
    assert_eq!(
        serde_json::to_string(&Round::RoundOf128).unwrap(),
        "\"round_of_128\""
    );
    assert_eq!(
        serde_json::from_str::<Round>("\"semi_finals\"").unwrap(),
        Round::SemiFinals
    );
}

#[test]
fn match_format_deepens_towards_the_final() {
    assert_eq!(Round::RoundOf128.format().sets_to_win, 1);
    assert_eq!(Round::RoundOf16.format().sets_to_win, 1);
    assert_eq!(Round::QuarterFinals.format().sets_to_win, 2);
    assert_eq!(Round::SemiFinals.format().sets_to_win, 3);
    assert_eq!(Round::Final.format().sets_to_win, 4);
    assert_eq!(Round::RoundOf32.format().label(), "1 set knockout");
    assert_eq!(Round::Final.format().label(), "Best of 7 sets");
}

#[test]
fn fields_beyond_the_catalog_are_rejected() {
    assert_eq!(round_topology(MAX_FIELD).unwrap().total_rounds(), 7);
    let err = round_topology(MAX_FIELD + 1).unwrap_err();
    assert_eq!(
        err,
        BracketError::TooManyParticipants {
            max: 128,
            actual: 129
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn match_format_serializes_its_label() {
    let json = serde_json::to_value(Round::QuarterFinals.format()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "sets_to_win": 2, "label": "Best of 3 sets" })
    );
    let back: MatchFormat = serde_json::from_value(json).unwrap();
    assert_eq!(back, Round::QuarterFinals.format());
}
