//! Advisory legality prediction.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use trickline_core::cards::{suit_of, Card, Rank, Suit};
use trickline_core::model::{PlayedCard, Snapshot};
use trickline_core::rules::{can_act, predict_card_legality, IllegalReason};

fn snapshot(hand: &[&str], trick: &[(u32, &str)], lead: Option<Suit>, to_act: u32) -> Snapshot {
    Snapshot {
        table_id: "table-1".into(),
        viewer: 1,
        leader: 2,
        to_act,
        trick_index: 0,
        lead_suit: lead,
        current_trick: trick.iter().map(|(p, c)| PlayedCard::new(*p, *c)).collect(),
        hand: hand.iter().map(|c| c.to_string()).collect(),
        seats: vec![],
    }
}

fn full_deck() -> Vec<String> {
    let mut out = Vec::new();
    for suit in [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades] {
        for rank in Rank::ALL {
            out.push(Card::new(rank, suit).to_string());
        }
    }
    out
}

#[test]
fn no_snapshot_is_not_your_turn() {
    let res = predict_card_legality(None, "AH");
    assert!(!res.allowed);
    assert_eq!(res.reason, Some(IllegalReason::NotYourTurn));
    assert!(!can_act(None));
}

#[test]
fn other_players_turn_is_not_your_turn() {
    let snap = snapshot(&["AH"], &[], None, 2);
    let res = predict_card_legality(Some(&snap), "AH");
    assert_eq!(res.reason, Some(IllegalReason::NotYourTurn));
    assert_eq!(res.reason.unwrap().to_string(), "not your turn");
}

#[test]
fn empty_hand_is_not_your_turn() {
    let snap = snapshot(&[], &[], None, 1);
    assert_eq!(
        predict_card_legality(Some(&snap), "AH").reason,
        Some(IllegalReason::NotYourTurn)
    );
}

#[test]
fn every_held_card_allowed_when_nothing_led() {
    let snap = snapshot(&["9H", "KS", "AH", "2C", "10D"], &[], None, 1);
    for card in &snap.hand {
        assert!(predict_card_legality(Some(&snap), card).allowed, "card={card}");
    }
}

#[test]
fn off_suit_denied_when_holding_lead_suit() {
    let snap = snapshot(&["9H", "KS", "AH"], &[(2, "7H")], Some(Suit::Hearts), 1);
    for card in full_deck() {
        if suit_of(&card) == Some(Suit::Hearts) {
            continue;
        }
        let res = predict_card_legality(Some(&snap), &card);
        assert!(!res.allowed, "card={card}");
    }
    let ks = predict_card_legality(Some(&snap), "KS");
    assert_eq!(ks.reason, Some(IllegalReason::MustFollowSuit));
    assert_eq!(ks.reason.unwrap().as_str(), "must follow suit");
    assert!(predict_card_legality(Some(&snap), "AH").allowed);
    assert!(predict_card_legality(Some(&snap), "9H").allowed);
}

#[test]
fn any_card_allowed_when_void_in_lead_suit() {
    let snap = snapshot(&["KS", "2C"], &[(2, "7H")], Some(Suit::Hearts), 1);
    assert!(predict_card_legality(Some(&snap), "KS").allowed);
    assert!(predict_card_legality(Some(&snap), "2C").allowed);
}

#[test]
fn lead_suit_falls_back_to_first_trick_card() {
    let snap = snapshot(&["9H", "KS"], &[(2, "7H"), (3, "2S")], None, 1);
    assert_eq!(
        predict_card_legality(Some(&snap), "KS").reason,
        Some(IllegalReason::MustFollowSuit)
    );
}

#[test]
fn candidate_is_normalized_and_must_be_held() {
    let snap = snapshot(&["9H", "AH"], &[], None, 1);
    assert!(predict_card_legality(Some(&snap), " ah ").allowed);
    assert_eq!(
        predict_card_legality(Some(&snap), "QD").reason,
        Some(IllegalReason::NotInHand)
    );
}

#[test]
fn card_tokens_round_trip_through_display() {
    let card: Card = "10D".parse().unwrap();
    assert_eq!(card, Card::new(Rank::Ten, Suit::Diamonds));
    assert_eq!(card.to_string(), "10D");
    assert!("1D".parse::<Card>().is_err());
    assert_eq!(Suit::from_wire("H"), Some(Suit::Hearts));
    assert_eq!(Suit::from_wire(""), None);
    assert_eq!(Suit::Hearts.name(), "Hearts");
}
