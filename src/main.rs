//! matchmarkets - Demo Binary
//!
//! Runs each engine on a small worked market and certifies the results.
//! Set `RUST_LOG=matchmarkets=trace` to watch the engines deliberate.

use matchmarkets::engine::{gale_shapley, stable_roommates, top_trading_cycle};
use matchmarkets::stability::{check_stability, check_stability_roommate, check_stability_ttc};
use matchmarkets::types::{digest_assignment, Matrix};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("===========================================");
    println!("  matchmarkets - stable matching engines");
    println!("===========================================");
    println!();

    two_sided_demo();
    roommate_demo();
    trading_demo();
}

fn two_sided_demo() {
    println!("Gale-Shapley: three proposers court three reviewers");

    let pref = Matrix::from_cols(vec![vec![1, 0, 2], vec![0, 1, 2], vec![2, 1, 0]])
        .expect("valid preference columns");
    let reviewer_utils = Matrix::from_cols(vec![
        vec![2.0, 1.0, 0.0],
        vec![1.0, 2.0, 0.0],
        vec![0.0, 1.0, 2.0],
    ])
    .expect("valid utility columns");
    // Proposer utilities derived from the same rankings, for the checker.
    let proposer_utils = Matrix::from_cols(vec![
        vec![2.0, 3.0, 1.0],
        vec![3.0, 2.0, 1.0],
        vec![1.0, 2.0, 3.0],
    ])
    .expect("valid utility columns");

    let outcome = gale_shapley(&pref, &reviewer_utils).expect("shapes agree");
    println!("  proposals:   {:?}", outcome.proposals);
    println!("  engagements: {:?}", outcome.engagements);
    println!("  digest:      {}", outcome.digest_hex());

    let proposals = Matrix::from_col_major(3, 1, outcome.proposals.clone()).expect("shape");
    let engagements = Matrix::from_col_major(3, 1, outcome.engagements.clone()).expect("shape");
    let stable = check_stability(&proposer_utils, &reviewer_utils, &proposals, &engagements)
        .expect("shapes agree");
    println!("  stable:      {}", stable);
    println!();
}

fn roommate_demo() {
    println!("Stable roommates: four agents with cyclic first choices");

    let pref = Matrix::from_cols(vec![
        vec![1, 2, 3],
        vec![2, 3, 0],
        vec![3, 0, 1],
        vec![0, 1, 2],
    ])
    .expect("valid preference columns");

    match stable_roommates(&pref).expect("valid shape") {
        Some(matching) => {
            println!("  matching: {:?}", matching);
            println!("  digest:   {}", hex::encode(digest_assignment(&matching)));
            let stable = check_stability_roommate(&pref, &matching).expect("shapes agree");
            println!("  stable:   {}", stable);
        }
        None => println!("  no stable matching exists"),
    }
    println!();
}

fn trading_demo() {
    println!("Top trading cycles: three owners, one three-way trade");

    let pref = Matrix::from_cols(vec![vec![1, 2, 0], vec![2, 0, 1], vec![0, 1, 2]])
        .expect("valid preference columns");

    let matching = top_trading_cycle(&pref).expect("valid shape");
    println!("  matching: {:?}", matching);
    println!("  digest:   {}", hex::encode(digest_assignment(&matching)));
    let stable = check_stability_ttc(&pref, &matching).expect("shapes agree");
    println!("  stable:   {}", stable);
    println!();
}
