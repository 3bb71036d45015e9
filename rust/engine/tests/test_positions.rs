use seatread_engine::errors::{AdvisorError, ErrorKind};
use seatread_engine::player::Player;
use seatread_engine::position::{
    labels_for, resolve, resolve_from_dealer, rotate, small_blind_index, PositionLabel,
    MAX_SEATS, MIN_SEATS,
};

fn table(n: usize, dealer: usize) -> Vec<Player> {
    (0..n)
        .map(|i| {
            let p = Player::new(format!("P{}", i), 100, i as u32 + 1);
            if i == dealer {
                p.dealer()
            } else {
                p
            }
        })
        .collect()
}

fn names(labels: &[PositionLabel]) -> Vec<&'static str> {
    labels.iter().map(|l| l.short_name()).collect()
}

#[test]
fn label_table_matches_small_blind_first_convention() {
    let expected: [&[&str]; 8] = [
        &["BTN/SB", "BB"],
        &["SB", "BB", "BTN"],
        &["SB", "BB", "UTG", "BTN"],
        &["SB", "BB", "UTG", "CO", "BTN"],
        &["SB", "BB", "UTG", "HJ", "CO", "BTN"],
        &["SB", "BB", "UTG", "MP", "HJ", "CO", "BTN"],
        &["SB", "BB", "UTG", "UTG+1", "MP", "HJ", "CO", "BTN"],
        &["SB", "BB", "UTG", "UTG+1", "UTG+2", "MP", "HJ", "CO", "BTN"],
    ];
    for (n, want) in (MIN_SEATS..=MAX_SEATS).zip(expected) {
        assert_eq!(names(labels_for(n)), want, "labels for {} seats", n);
    }
}

#[test]
fn every_seat_count_and_dealer_resolves_one_label_per_seat() {
    for n in MIN_SEATS..=MAX_SEATS {
        for dealer in 0..n {
            let map = resolve(&table(n, dealer)).expect("resolve");
            assert_eq!(map.labels().len(), n);
            assert!(map.is_determinable());

            let mut sorted = map.labels();
            sorted.sort_by_key(|l| l.short_name());
            let mut want = labels_for(n).to_vec();
            want.sort_by_key(|l| l.short_name());
            assert_eq!(sorted, want);

            let sb = small_blind_index(n, dealer);
            let expected_sb = if n == 2 {
                PositionLabel::ButtonSmallBlind
            } else {
                PositionLabel::SmallBlind
            };
            assert_eq!(map.label_of(sb), Some(expected_sb));
            assert_eq!(map.seats()[0].index, sb);
        }
    }
}

#[test]
fn dealer_is_always_the_button() {
    for n in 3..=MAX_SEATS {
        for dealer in 0..n {
            let map = resolve_from_dealer(n, dealer);
            assert_eq!(map.label_of(dealer), Some(PositionLabel::Button));
            assert_eq!(map.dealer_index(), dealer);
        }
    }
}

#[test]
fn heads_up_dealer_posts_small_blind() {
    let map = resolve(&table(2, 1)).expect("resolve");
    assert_eq!(map.seats()[0].index, 1);
    assert_eq!(map.label_of(1), Some(PositionLabel::ButtonSmallBlind));
    assert_eq!(map.label_of(0), Some(PositionLabel::BigBlind));
}

#[test]
fn six_handed_rotation_starts_after_the_button() {
    let map = resolve(&table(6, 2)).expect("resolve");
    let order: Vec<usize> = map.seats().iter().map(|s| s.index).collect();
    assert_eq!(order, vec![3, 4, 5, 0, 1, 2]);
    assert_eq!(names(&map.labels()), ["SB", "BB", "UTG", "HJ", "CO", "BTN"]);
}

#[test]
fn rotation_by_seat_count_is_identity() {
    for n in 1..=12usize {
        let seats: Vec<usize> = (0..n).collect();
        assert_eq!(rotate(&seats, n), seats);
        for k in 0..n {
            let once = rotate(&seats, k);
            assert_eq!(rotate(&once, n - k), seats, "k={} n={}", k, n);
        }
    }
}

#[test]
fn ten_seats_are_undeterminable_not_a_panic() {
    assert!(labels_for(10).is_empty());
    let map = resolve(&table(10, 4)).expect("rotation still works");
    assert_eq!(map.len(), 10);
    assert!(map.labels().is_empty());
    assert!(!map.is_determinable());
    assert_eq!(map.label_of(4), None);
}

#[test]
fn missing_dealer_is_a_resolution_failure() {
    let players = vec![Player::new("A", 10, 1), Player::new("B", 10, 2)];
    let err = resolve(&players).unwrap_err();
    assert_eq!(err, AdvisorError::NoDealer);
    assert_eq!(err.kind(), ErrorKind::Resolution);
    assert!(err.to_string().contains("Position unknown"));
}

#[test]
fn first_of_several_dealers_wins() {
    let mut players = table(4, 1);
    players[3].is_dealer = true;
    let map = resolve(&players).expect("resolve");
    assert_eq!(map.dealer_index(), 1);
    assert_eq!(map.label_of(1), Some(PositionLabel::Button));
}
