use gift_draw::core::validator::is_valid_assignment;
use gift_draw::{
    check_feasibility, generate_assignment, generate_assignment_with_rng, Assignment, DrawError, DrawOptions,
    ExclusionPair, Feasibility, ImpossibleReason, Participant,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn people(ids: &[&str]) -> Vec<Participant> {
    ids.iter().map(|id| Participant::new(*id, *id)).collect()
}

fn numbered(count: usize) -> Vec<Participant> {
    (0..count)
        .map(|i| Participant::new(format!("p{}", i), format!("Person {}", i)))
        .collect()
}

fn assert_valid(assignment: &Assignment, participants: &[Participant], exclusions: &[ExclusionPair]) {
    let ids: HashSet<&str> = participants.iter().map(|p| p.id.as_str()).collect();
    let givers: HashSet<&str> = assignment.iter().map(|(g, _)| g).collect();
    let receivers: HashSet<&str> = assignment.iter().map(|(_, r)| r).collect();

    // 雙射
    assert_eq!(assignment.len(), participants.len());
    assert_eq!(givers, ids);
    assert_eq!(receivers, ids);

    for (giver, receiver) in assignment.iter() {
        assert_ne!(giver, receiver, "{} assigned to themselves", giver);
    }

    for pair in exclusions {
        assert_ne!(assignment.receiver_of(&pair.first), Some(pair.second.as_str()));
        assert_ne!(assignment.receiver_of(&pair.second), Some(pair.first.as_str()));
    }
}

#[test]
fn test_minimal_infeasible_case() {
    let participants = people(&["A", "B"]);
    let exclusions = vec![ExclusionPair::new("A", "B")];

    for _ in 0..20 {
        let err = generate_assignment(&participants, &exclusions, &DrawOptions::default()).unwrap_err();
        match err {
            DrawError::ImpossibleAssignment { reason, .. } => {
                assert!(matches!(reason, ImpossibleReason::ProvenInfeasible(_)))
            }
            other => panic!("expected ImpossibleAssignment, got {:?}", other),
        }
    }
}

#[test]
fn test_minimal_feasible_case() {
    let participants = people(&["A", "B"]);

    for _ in 0..20 {
        let assignment = generate_assignment(&participants, &[], &DrawOptions::default()).unwrap();
        assert_eq!(assignment.receiver_of("A"), Some("B"));
        assert_eq!(assignment.receiver_of("B"), Some("A"));
    }
}

#[test]
fn test_two_disjoint_exclusion_pairs() {
    let participants = people(&["A", "B", "C", "D"]);
    let exclusions = vec![ExclusionPair::new("A", "B"), ExclusionPair::new("C", "D")];

    for _ in 0..200 {
        let assignment = generate_assignment(&participants, &exclusions, &DrawOptions::default()).unwrap();
        assert_valid(&assignment, &participants, &exclusions);
    }
}

#[test]
fn test_three_with_one_exclusion_exhausts_budget() {
    let participants = people(&["A", "B", "C"]);
    let exclusions = vec![ExclusionPair::new("A", "B")];

    // 兩個 3-cycle 都會用到 A→B 或 B→A；啟發式檢查不到，只能耗盡嘗試次數
    let err = generate_assignment(&participants, &exclusions, &DrawOptions::default()).unwrap_err();

    assert_eq!(
        err.impossible_reason(),
        Some(&ImpossibleReason::AttemptBudgetExhausted { attempts: 1000 })
    );
}

#[test]
fn test_four_with_one_exclusion_succeeds() {
    let participants = people(&["A", "B", "C", "D"]);
    let exclusions = vec![ExclusionPair::new("A", "B")];

    for _ in 0..200 {
        let assignment = generate_assignment(&participants, &exclusions, &DrawOptions::default()).unwrap();
        assert_valid(&assignment, &participants, &exclusions);
    }
}

#[test]
fn test_repeated_draws_vary() {
    let participants = numbered(6);
    let mut rng = StdRng::seed_from_u64(17);

    let distinct: HashSet<Vec<(String, String)>> = (0..50)
        .map(|_| {
            generate_assignment_with_rng(&participants, &[], 1000, &mut rng)
                .unwrap()
                .iter()
                .map(|(g, r)| (g.to_string(), r.to_string()))
                .collect()
        })
        .collect();

    assert!(distinct.len() > 1);
}

#[test]
fn test_large_group_succeeds_quickly() {
    let participants = numbered(100);
    let options = DrawOptions::default().with_seed(1).with_max_attempts(50);

    let outcome = gift_draw::DrawEngine::new(options)
        .draw(&participants, &[])
        .unwrap();

    assert_valid(&outcome.assignment, &participants, &[]);
    assert!(outcome.attempts <= 50);
}

/// Every ordering of `ids`, by recursive swapping.
fn all_permutations(ids: &[String]) -> Vec<Vec<String>> {
    fn permute(prefix: usize, current: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
        if prefix == current.len() {
            out.push(current.clone());
            return;
        }
        for i in prefix..current.len() {
            current.swap(prefix, i);
            permute(prefix + 1, current, out);
            current.swap(prefix, i);
        }
    }

    let mut out = Vec::new();
    permute(0, &mut ids.to_vec(), &mut out);
    out
}

fn has_any_valid_assignment(ids: &[String], exclusions: &[ExclusionPair]) -> bool {
    all_permutations(ids)
        .into_iter()
        .any(|receivers| is_valid_assignment(&Assignment::from_columns(ids, receivers), exclusions))
}

#[test]
fn test_permutation_enumeration_is_complete() {
    let ids: Vec<String> = (0..4).map(|i| format!("p{}", i)).collect();
    let perms = all_permutations(&ids);
    let distinct: HashSet<&Vec<String>> = perms.iter().collect();
    assert_eq!(perms.len(), 24);
    assert_eq!(distinct.len(), 24);
}

#[test]
fn test_infeasible_verdicts_hold_for_every_small_group() {
    // 窮舉：n = 2..=4 的所有排除組合
    for n in 2..=4usize {
        let ids: Vec<String> = (0..n).map(|i| format!("p{}", i)).collect();
        let all_pairs: Vec<ExclusionPair> = (0..n)
            .flat_map(|a| ((a + 1)..n).map(move |b| (a, b)))
            .map(|(a, b)| ExclusionPair::new(ids[a].clone(), ids[b].clone()))
            .collect();

        for mask in 0u32..(1 << all_pairs.len()) {
            let exclusions: Vec<ExclusionPair> = all_pairs
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, pair)| pair.clone())
                .collect();

            if check_feasibility(n, &exclusions).is_infeasible() {
                assert!(
                    !has_any_valid_assignment(&ids, &exclusions),
                    "n = {} with {:?} flagged infeasible but has a valid assignment",
                    n,
                    exclusions
                );
            }
        }
    }
}

fn dense_exclusions() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2usize..=6).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..=(n * n))))
}

fn draw_input() -> impl Strategy<Value = (usize, Vec<(usize, usize)>, u64)> {
    (3usize..12).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n), 0..(n / 2)),
            any::<u64>(),
        )
    })
}

proptest! {
    #[test]
    fn prop_successful_draws_satisfy_invariants((n, raw_pairs, seed) in draw_input()) {
        let participants = numbered(n);
        let exclusions: Vec<ExclusionPair> = raw_pairs
            .iter()
            .map(|&(a, b)| ExclusionPair::new(format!("p{}", a), format!("p{}", b)))
            .collect();
        let mut rng = StdRng::seed_from_u64(seed);

        match generate_assignment_with_rng(&participants, &exclusions, 1000, &mut rng) {
            Ok(assignment) => assert_valid(&assignment, &participants, &exclusions),
            Err(DrawError::ImpossibleAssignment { participants: p, exclusions: e, .. }) => {
                prop_assert_eq!(p, participants);
                prop_assert_eq!(e, exclusions);
            }
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    #[test]
    fn prop_infeasible_verdict_has_no_valid_assignment((n, raw_pairs) in dense_exclusions()) {
        let ids: Vec<String> = (0..n).map(|i| format!("p{}", i)).collect();
        let exclusions: Vec<ExclusionPair> = raw_pairs
            .iter()
            .map(|&(a, b)| ExclusionPair::new(ids[a].clone(), ids[b].clone()))
            .collect();

        if let Feasibility::ProvablyInfeasible(why) = check_feasibility(n, &exclusions) {
            prop_assert!(
                !has_any_valid_assignment(&ids, &exclusions),
                "flagged infeasible ({}) but a valid assignment exists",
                why
            );
        }
    }
}
