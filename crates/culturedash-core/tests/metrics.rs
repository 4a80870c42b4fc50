use culturedash_core::metrics::{
    aggregate, correlation, extremum, ratio, top_n, AggregateOp, ExtremumKind, MetricError,
    MetricRecord, NaturalKey, SortOrder,
};
use culturedash_parser::{
    ConservationComponent, ConservationField, FundsField, FundsRecord, InstituteField,
    InstituteRecord,
};

fn funds_2010_2020() -> Vec<FundsRecord> {
    (0..11)
        .map(|i| FundsRecord {
            year: 2010 + i,
            funds_allocated: Some(100.0 + 10.0 * i as f64),
            funds_utilized: Some(90.0 + 5.0 * i as f64),
        })
        .collect()
}

fn institute(state: &str, count: Option<i64>, capacity: Option<i64>) -> InstituteRecord {
    InstituteRecord {
        state_or_territory: state.to_string(),
        institute_count: count,
        intake_capacity: capacity,
    }
}

fn states<R: MetricRecord>(records: &[R]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.natural_key().to_string())
        .collect()
}

#[test]
fn funds_scenario_max_allocated_and_utilized_sum() {
    let funds = funds_2010_2020();

    let max = extremum(&funds, FundsField::Allocated, ExtremumKind::Max).expect("non-empty");
    assert_eq!(max.record().year, 2020);
    assert_eq!(max.value, 200.0);
    assert!(!max.is_tied());

    let expected: f64 = (0..11).map(|i| 90.0 + 5.0 * i as f64).sum();
    let total = aggregate(&funds, FundsField::Utilized, AggregateOp::Sum).unwrap();
    assert_eq!(total, expected);
    assert_eq!(total, 1265.0);
}

#[test]
fn institute_scenario_top_two_by_capacity() {
    let institutes = vec![
        institute("A", Some(5), Some(500)),
        institute("B", Some(9), Some(900)),
        institute("C", Some(3), Some(300)),
    ];
    let top = top_n(&institutes, InstituteField::IntakeCapacity, 2, SortOrder::Desc);
    assert_eq!(states(&top), vec!["B", "A"]);
}

#[test]
fn sum_is_independent_of_input_order() {
    let costs = [1e16, 1.0, -1e16, 0.1, 0.2, 0.3, 1.0, 42.5];
    let component = |cost: f64| ConservationComponent {
        component: format!("c{cost}"),
        description: String::new(),
        estimated_cost: Some(cost),
    };
    let forward: Vec<_> = costs.iter().copied().map(component).collect();
    let mut reversed = forward.clone();
    reversed.reverse();
    let mut rotated = forward.clone();
    rotated.rotate_left(3);
    let mut interleaved: Vec<_> = forward.iter().step_by(2).cloned().collect();
    interleaved.extend(forward.iter().skip(1).step_by(2).cloned());

    let field = ConservationField::EstimatedCost;
    let expected = aggregate(&forward, field, AggregateOp::Sum).unwrap();
    for shuffled in [&reversed, &rotated, &interleaved] {
        let total = aggregate(shuffled, field, AggregateOp::Sum).unwrap();
        assert_eq!(total.to_bits(), expected.to_bits());
    }
}

#[test]
fn average_of_empty_collection_is_an_error() {
    let empty: Vec<FundsRecord> = Vec::new();
    assert_eq!(
        aggregate(&empty, FundsField::Allocated, AggregateOp::Avg),
        Err(MetricError::EmptyCollection {
            field: "funds_allocated_cr".to_string()
        })
    );
    assert_eq!(
        aggregate(&empty, FundsField::Allocated, AggregateOp::Sum),
        Ok(0.0)
    );
}

#[test]
fn average_divides_by_record_count() {
    let funds = funds_2010_2020();
    let avg = aggregate(&funds, FundsField::Allocated, AggregateOp::Avg).unwrap();
    assert_eq!(avg, 150.0);
}

#[test]
fn top_n_is_idempotent() {
    let institutes: Vec<_> = (0..15)
        .map(|i| institute(&format!("S{i:02}"), Some(i), Some((i * 37) % 11 * 100)))
        .collect();
    let field = InstituteField::IntakeCapacity;

    let once = top_n(&institutes, field, 10, SortOrder::Desc);
    let twice = top_n(&once, field, 10, SortOrder::Desc);
    assert_eq!(once.len(), 10);
    assert_eq!(states(&once), states(&twice));
}

#[test]
fn top_n_is_stable_for_equal_values() {
    let institutes = vec![
        institute("Zeta", None, Some(100)),
        institute("Alpha", None, Some(200)),
        institute("Mid", None, Some(100)),
    ];
    let asc = top_n(&institutes, InstituteField::IntakeCapacity, 3, SortOrder::Asc);
    assert_eq!(states(&asc), vec!["Zeta", "Mid", "Alpha"]);
    let desc = top_n(&institutes, InstituteField::IntakeCapacity, 3, SortOrder::Desc);
    assert_eq!(states(&desc), vec!["Alpha", "Zeta", "Mid"]);
}

#[test]
fn extremum_max_dominates_every_value() {
    let institutes: Vec<_> = [430, 120, 999, 5, 998]
        .iter()
        .enumerate()
        .map(|(i, capacity)| institute(&format!("S{i}"), Some(1), Some(*capacity)))
        .collect();
    let field = InstituteField::IntakeCapacity;
    let max = extremum(&institutes, field, ExtremumKind::Max).unwrap();
    for record in &institutes {
        assert!(max.record().value(field).unwrap() >= record.value(field).unwrap());
    }
    let min = extremum(&institutes, field, ExtremumKind::Min).unwrap();
    assert_eq!(min.record().state_or_territory, "S3");
}

#[test]
fn extremum_ties_resolve_to_smallest_natural_key() {
    let institutes = vec![
        institute("Kerala", Some(10), Some(900)),
        institute("Bihar", Some(4), Some(900)),
        institute("Assam", Some(4), Some(100)),
    ];
    let max = extremum(&institutes, InstituteField::IntakeCapacity, ExtremumKind::Max).unwrap();
    assert!(max.is_tied());
    assert_eq!(max.record().state_or_territory, "Bihar");
    assert_eq!(states(&max.holders), vec!["Bihar", "Kerala"]);

    let mut funds = funds_2010_2020();
    funds.reverse();
    funds[0].funds_utilized = Some(500.0);
    funds[5].funds_utilized = Some(500.0);
    let max = extremum(&funds, FundsField::Utilized, ExtremumKind::Max).unwrap();
    assert_eq!(max.record().natural_key(), NaturalKey::Year(2015));
}

#[test]
fn missing_values_follow_the_empty_cell_policy() {
    let institutes = vec![
        institute("A", Some(2), None),
        institute("B", Some(3), Some(50)),
        institute("C", None, Some(10)),
    ];
    let capacity = InstituteField::IntakeCapacity;

    let min = extremum(&institutes, capacity, ExtremumKind::Min).unwrap();
    assert_eq!(min.record().state_or_territory, "C");

    let asc = top_n(&institutes, capacity, 3, SortOrder::Asc);
    assert_eq!(states(&asc), vec!["C", "B", "A"]);
    let desc = top_n(&institutes, capacity, 3, SortOrder::Desc);
    assert_eq!(states(&desc), vec!["B", "C", "A"]);

    assert_eq!(aggregate(&institutes, capacity, AggregateOp::Sum), Ok(60.0));
    assert_eq!(aggregate(&institutes, capacity, AggregateOp::Avg), Ok(20.0));

    let blank = vec![institute("A", None, None)];
    assert!(extremum(&blank, capacity, ExtremumKind::Max).is_none());
}

#[test]
fn extremum_skips_non_finite_values() {
    let nan_only = vec![FundsRecord {
        year: 2015,
        funds_allocated: Some(f64::NAN),
        funds_utilized: None,
    }];
    assert!(extremum(&nan_only, FundsField::Allocated, ExtremumKind::Max).is_none());

    let mut funds = funds_2010_2020();
    funds[3].funds_allocated = Some(f64::NAN);
    funds[7].funds_allocated = Some(f64::INFINITY);
    let max = extremum(&funds, FundsField::Allocated, ExtremumKind::Max).unwrap();
    assert_eq!(max.record().year, 2020);
    let min = extremum(&funds, FundsField::Allocated, ExtremumKind::Min).unwrap();
    assert_eq!(min.record().year, 2010);
}

#[test]
fn ratio_rejects_zero_denominator() {
    let institutes = vec![institute("A", Some(0), Some(10))];
    assert_eq!(
        ratio(
            &institutes,
            InstituteField::IntakeCapacity,
            InstituteField::InstituteCount
        ),
        Err(MetricError::ZeroDenominator {
            field: "institute_count".to_string()
        })
    );

    let empty: Vec<InstituteRecord> = Vec::new();
    assert!(matches!(
        ratio(&empty, InstituteField::IntakeCapacity, InstituteField::InstituteCount),
        Err(MetricError::EmptyCollection { .. })
    ));
}

#[test]
fn correlation_tracks_linear_relationships() {
    let linear = vec![
        institute("A", Some(1), Some(100)),
        institute("B", Some(2), Some(200)),
        institute("C", Some(4), Some(400)),
        institute("D", None, Some(999)),
    ];
    let count = InstituteField::InstituteCount;
    let capacity = InstituteField::IntakeCapacity;
    let r = correlation(&linear, count, capacity).unwrap();
    assert!((r - 1.0).abs() < 1e-12);

    let inverse = vec![
        institute("A", Some(1), Some(300)),
        institute("B", Some(2), Some(200)),
        institute("C", Some(3), Some(100)),
    ];
    let r = correlation(&inverse, count, capacity).unwrap();
    assert!((r + 1.0).abs() < 1e-12);

    let constant = vec![institute("A", Some(5), Some(1)), institute("B", Some(5), Some(2))];
    assert_eq!(correlation(&constant, count, capacity), None);
    assert_eq!(correlation(&linear[..1], count, capacity), None);
}
