//! Navigation state machine and detail materialization tests.

mod common;

use vehicle_finance_sdk::models::InstallmentStatus;
use vehicle_finance_sdk::navigation::{decode_token, encode_token};
use vehicle_finance_sdk::{BuyerBlock, DetailLookup, NavigationController, ViewState};

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[test]
fn token_encodes_vehicle_id() {
    assert_eq!(encode_token("V42"), "vehicle-V42");
    assert_eq!(decode_token("vehicle-V42"), Some("V42"));
    assert_eq!(decode_token("#vehicle-V42"), Some("V42"));
}

#[test]
fn unrelated_tokens_decode_to_none() {
    assert_eq!(decode_token(""), None);
    assert_eq!(decode_token("#"), None);
    assert_eq!(decode_token("vehicle-"), None);
    assert_eq!(decode_token("buyer-B1"), None);
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

#[test]
fn starts_in_list_view_with_empty_token() {
    let nav = NavigationController::new();
    assert_eq!(nav.state(), &ViewState::ListView);
    assert_eq!(nav.token(), "");
}

#[test]
fn select_sets_detail_and_token() {
    let mut nav = NavigationController::new();
    nav.select("V42");
    assert_eq!(nav.state(), &ViewState::DetailView("V42".into()));
    assert_eq!(nav.token(), "vehicle-V42");
}

#[test]
fn empty_selection_matches_bare_token() {
    let mut selected = NavigationController::new();
    selected.select("V1");
    selected.select("");
    assert_eq!(selected.state(), &ViewState::ListView);
    assert_eq!(selected.token(), "");

    let mut linked = NavigationController::new();
    linked.on_external_token_change(&encode_token(""));
    assert_eq!(linked.state(), selected.state());
}

#[test]
fn select_from_detail_switches_record() {
    let mut nav = NavigationController::new();
    nav.select("V1");
    nav.select("V2");
    assert_eq!(nav.state(), &ViewState::DetailView("V2".into()));
    assert_eq!(nav.token(), "vehicle-V2");
}

#[test]
fn back_clears_token() {
    let mut nav = NavigationController::new();
    nav.select("V1");
    nav.back();
    assert_eq!(nav.state(), &ViewState::ListView);
    assert_eq!(nav.token(), "");
}

#[test]
fn token_round_trip_reproduces_selection() {
    let mut selected = NavigationController::new();
    selected.select("V42");
    let token = selected.token().to_string();

    let mut linked = NavigationController::new();
    linked.on_external_token_change(&token);

    assert_eq!(linked.state(), &ViewState::DetailView("V42".into()));
    assert_eq!(linked.state(), selected.state());
    assert_eq!(linked.token(), selected.token());
}

#[test]
fn unrecognized_token_returns_to_list() {
    let mut nav = NavigationController::new();
    nav.select("V1");
    nav.on_external_token_change("something-else");
    assert_eq!(nav.state(), &ViewState::ListView);
    assert_eq!(nav.token(), "");
}

// ---------------------------------------------------------------------------
// materialize
// ---------------------------------------------------------------------------

#[test]
fn list_view_materializes_to_no_selection() {
    let store = common::sample_store();
    let nav = NavigationController::new();
    assert_eq!(nav.materialize(&store, common::today()), DetailLookup::NoSelection);
}

#[test]
fn sold_vehicle_has_buyer_and_ordered_installments() {
    let store = common::sample_store();
    let mut nav = NavigationController::new();
    nav.select("V1");

    let DetailLookup::Found(detail) = nav.materialize(&store, common::today()) else {
        panic!("expected V1 to resolve");
    };
    assert_eq!(detail.vehicle.vehicle_id, "V1");
    assert_eq!(detail.seller.seller_name, "Ravi");
    assert_eq!(detail.seller.seller_city, "Hyderabad");

    let BuyerBlock::Sold { buyer, installments } = detail.buyer else {
        panic!("expected a buyer block");
    };
    assert_eq!(buyer.buyer_id, "B1");
    assert_eq!(buyer.buyer_name, "Suresh");
    let numbers: Vec<&str> = installments.iter().map(|e| e.installment.emi_no.as_str()).collect();
    assert_eq!(numbers, vec!["1", "2", "3"]);
}

#[test]
fn installments_carry_status_as_of_today() {
    let store = common::sample_store();
    let mut nav = NavigationController::new();
    nav.select("V1");

    let DetailLookup::Found(detail) = nav.materialize(&store, common::today()) else {
        panic!("expected V1 to resolve");
    };
    let BuyerBlock::Sold { installments, .. } = detail.buyer else {
        panic!("expected a buyer block");
    };
    let statuses: Vec<InstallmentStatus> = installments.iter().map(|e| e.derived_status).collect();
    assert_eq!(
        statuses,
        vec![InstallmentStatus::Paid, InstallmentStatus::Paid, InstallmentStatus::Overdue]
    );
    assert_eq!(installments[2].installment.status, "Unpaid");
}

#[test]
fn stock_vehicle_has_no_buyer_marker_and_seller() {
    let store = common::sample_store();
    let mut nav = NavigationController::new();
    nav.select("V2");

    let DetailLookup::Found(detail) = nav.materialize(&store, common::today()) else {
        panic!("expected V2 to resolve");
    };
    assert_eq!(detail.buyer, BuyerBlock::NoBuyer);
    assert_eq!(detail.seller.seller_name, "Anil");
    assert_eq!(detail.seller.buy_value, "350000");
}

#[test]
fn sold_without_installments_is_not_no_buyer() {
    let store = common::sample_store();
    let mut nav = NavigationController::new();
    nav.select("V4");

    let DetailLookup::Found(detail) = nav.materialize(&store, common::today()) else {
        panic!("expected V4 to resolve");
    };
    match detail.buyer {
        BuyerBlock::Sold { buyer, installments } => {
            assert_eq!(buyer.buyer_name, "Lakshmi");
            assert!(installments.is_empty());
        }
        BuyerBlock::NoBuyer => panic!("V4 has a buyer_id"),
    }
}

#[test]
fn buyer_id_wins_over_stale_status() {
    let store = common::sample_store();
    let mut nav = NavigationController::new();
    // V5 is marked Stock but carries buyer_id B3
    nav.select("V5");

    let DetailLookup::Found(detail) = nav.materialize(&store, common::today()) else {
        panic!("expected V5 to resolve");
    };
    let BuyerBlock::Sold { installments, .. } = detail.buyer else {
        panic!("expected a buyer block for V5");
    };
    assert_eq!(installments.len(), 1);
}

#[test]
fn unknown_id_materializes_to_not_found() {
    let store = common::sample_store();
    let mut nav = NavigationController::new();
    nav.select("V1");
    assert!(matches!(nav.materialize(&store, common::today()), DetailLookup::Found(_)));

    nav.select("does-not-exist");
    assert_eq!(
        nav.materialize(&store, common::today()),
        DetailLookup::NotFound("does-not-exist".into())
    );
}

#[test]
fn deep_link_and_selection_materialize_identically() {
    let store = common::sample_store();

    let mut selected = NavigationController::new();
    selected.select("V1");

    let mut linked = NavigationController::new();
    linked.on_external_token_change("#vehicle-V1");

    assert_eq!(selected.materialize(&store, common::today()), linked.materialize(&store, common::today()));
}
