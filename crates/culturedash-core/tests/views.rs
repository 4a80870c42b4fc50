use std::path::PathBuf;

use culturedash_core::metrics::MetricError;
use culturedash_core::views::{Dashboard, InstituteMetrics, TOP_STATES};
use culturedash_core::{DashboardConfig, Snapshot};
use culturedash_parser::InstituteRecord;

fn fixture_snapshot() -> Snapshot {
    let config = DashboardConfig {
        data_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../culturedash-parser/tests/data"),
        ..DashboardConfig::default()
    };
    Snapshot::load(&config).expect("fixture snapshot loads")
}

#[test]
fn funds_view_highlights_extremes_and_totals() {
    let dashboard = Dashboard::build(fixture_snapshot());
    let funds = dashboard.funds.as_ref().expect("funds metrics");

    assert_eq!(funds.max_funds_allocated.year, 2018);
    assert_eq!(funds.min_funds_allocated.year, 2014);
    assert_eq!(funds.max_funds_utilized.funds_utilized, Some(2711.15));
    assert_eq!(funds.min_funds_utilized.year, 2014);
    assert!((funds.total_funds_allocated - 11868.53).abs() < 1e-6);
    let rate = funds.utilization_rate.expect("allocated is non-zero");
    assert!(rate > 0.9 && rate < 1.0);
}

#[test]
fn tourism_view_reports_min_and_max_years() {
    let dashboard = Dashboard::build(fixture_snapshot());
    let tourism = dashboard.tourism.as_ref().expect("tourism metrics");

    assert_eq!(tourism.min_domestic_visits.year, 2015);
    assert_eq!(tourism.max_domestic_visits.domestic_visits, Some(2_321_982_663));
    assert_eq!(tourism.min_foreign_arrivals.foreign_arrivals, Some(8_027_133));
    assert_eq!(tourism.max_foreign_arrivals.year, 2019);
}

#[test]
fn conservation_view_totals_estimated_cost() {
    let dashboard = Dashboard::build(fixture_snapshot());
    let conservation = dashboard.conservation.as_ref().expect("conservation metrics");

    assert_eq!(conservation.component_count, 5);
    assert_eq!(conservation.total_estimated_cost, 136.95);
    assert_eq!(conservation.costliest_component.component, "Darbar Hall");
}

#[test]
fn institute_view_ranks_states() {
    let dashboard = Dashboard::build(fixture_snapshot());
    let institutes = dashboard.institutes.as_ref().expect("institute metrics");

    assert_eq!(
        institutes.top_state_by_intake_capacity.state_or_territory,
        "Uttar Pradesh"
    );
    assert_eq!(
        institutes.top_state_by_institute_count.state_or_territory,
        "Andhra Pradesh"
    );
    assert_eq!(institutes.total_institute_count, 4003);
    assert_eq!(institutes.total_intake_capacity, 598_684);
    assert_eq!(institutes.average_intake_per_institute, 149.56);
    let r = institutes.count_capacity_correlation.expect("states vary");
    assert!((r - 0.9381).abs() < 1e-3);

    let order: Vec<&str> = institutes
        .sorted_by_intake_capacity
        .iter()
        .map(|record| record.state_or_territory.as_str())
        .collect();
    assert_eq!(
        order,
        vec![
            "Uttar Pradesh",
            "Andhra Pradesh",
            "Maharashtra",
            "Tamil Nadu",
            "Kerala",
            "Bihar"
        ]
    );
    assert_eq!(institutes.top10_by_intake_capacity.len(), 6);
    assert_eq!(
        institutes.top10_by_institute_count[1].state_or_territory,
        "Uttar Pradesh"
    );
}

#[test]
fn top_lists_are_capped() {
    let records: Vec<InstituteRecord> = (0..25)
        .map(|i| InstituteRecord {
            state_or_territory: format!("State {i:02}"),
            institute_count: Some(i + 1),
            intake_capacity: Some(100 * (i + 1)),
        })
        .collect();
    let metrics = InstituteMetrics::compute(&records).unwrap();
    assert_eq!(metrics.top10_by_intake_capacity.len(), TOP_STATES);
    assert_eq!(metrics.sorted_by_intake_capacity.len(), 25);
    assert_eq!(
        metrics.top10_by_intake_capacity[0].state_or_territory,
        "State 24"
    );
    assert_eq!(metrics.average_intake_per_institute, 100.0);
}

#[test]
fn failed_view_does_not_block_the_others() {
    let mut snapshot = fixture_snapshot();
    snapshot.tourism.clear();

    let dashboard = Dashboard::build(snapshot);
    assert!(matches!(
        dashboard.tourism,
        Err(MetricError::EmptyCollection { .. })
    ));
    assert!(dashboard.funds.is_ok());
    assert_eq!(dashboard.failures().len(), 1);
    assert_eq!(dashboard.failures()[0].0, "tourism");

    let json = dashboard.metrics_json();
    assert!(json["tourism"]["error"].is_string());
    assert_eq!(json["funds"]["maxFundsAllocated"]["year"], 2018);
    assert_eq!(json["institutes"]["totalInstituteCount"], 4003);
    assert!(json["institutes"]["top10ByIntakeCapacity"].is_array());
    assert_eq!(json["institutes"]["averageIntakePerInstitute"], 149.56);
}
