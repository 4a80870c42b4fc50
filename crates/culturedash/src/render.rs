use std::fmt::{self, Write};

use clap::ValueEnum;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use culturedash_core::metrics::MetricError;
use culturedash_core::views::{ConservationMetrics, FundsMetrics, InstituteMetrics, TourismMetrics};
use culturedash_core::{Dashboard, DashboardConfig, Dataset, SourceSpec};
use culturedash_parser::{
    ConservationField, FundsField, FundsRecord, InstituteField, InstituteRecord, TourismField,
    TourismRecord,
};

const BAR_WIDTH: usize = 40;
const MISSING: &str = "-";

const HERITAGE_OVERVIEW: &[(&str, &str)] = &[
    ("Location", "Jammu, Jammu & Kashmir, India"),
    ("Heritage Site", "Mubarak Mandi Palace Complex"),
    (
        "Scope",
        "Conservation of historic structures, public amenities, landscaping and infrastructure",
    ),
    ("Total Project Outlay", "₹486.62 Cr"),
    ("Project Duration", "Initiated in March 2018; ongoing"),
    ("Client", "Mubarak Mandi Jammu Heritage Society"),
    ("Consultants", "Architecture Heritage Division, INTACH"),
    ("Area", "Approximately 15 acres"),
    ("Status", "Ongoing conservation and revitalization efforts"),
];

const HERITAGE_HISTORY: &str = "The complex dates back to the early 19th century and served as \
the royal residence of the Dogra dynasty, blending Rajasthani, Mughal and European styles. \
Its structures include the Darbar Hall, Sheesh Mahal, Pink Palace, Royal Courts and Rani Charak Palace.";

const HERITAGE_EFFORTS: &[(&str, &str)] = &[
    (
        "Structural Restoration",
        "Stabilizing and restoring deteriorated structures within the complex",
    ),
    (
        "Infrastructure Development",
        "Battery-operated vehicles, signage and parking for better access",
    ),
    ("Landscape Revitalization", "Gardens and open spaces"),
    (
        "Adaptive Reuse",
        "Museums, cultural centers and conference facilities within the complex",
    ),
    (
        "Connectivity Enhancement",
        "A proposed ropeway linking the complex with Bahu Fort",
    ),
];

const HERITAGE_CHALLENGES: &[(&str, &str)] = &[
    (
        "Structural Degradation",
        "Damage from more than 36 fires and from earthquakes",
    ),
    (
        "Neglect and Encroachment",
        "Unauthorized modifications after years of neglect",
    ),
    (
        "Resource Constraints",
        "Limited funding and skilled manpower slow the restoration",
    ),
    (
        "Mitigation Measures",
        "Phased plans with 33 projects in Phase I and 73 more identified for Phase II",
    ),
];

const HERITAGE_CONCLUSION: &str = "The project aims to restore the complex as a hub for cultural \
tourism and community engagement while preserving Jammu's architectural heritage.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum View {
    Funds,
    Tourism,
    Heritage,
    Training,
    All,
}

impl View {
    const EACH: [View; 4] = [View::Funds, View::Tourism, View::Heritage, View::Training];
}

pub fn write_views<W: Write>(writer: &mut W, dashboard: &Dashboard, view: View) -> fmt::Result {
    let views = match view {
        View::All => View::EACH.to_vec(),
        one => vec![one],
    };
    for (index, view) in views.into_iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
        }
        match view {
            View::Funds => write_funds(writer, dashboard)?,
            View::Tourism => write_tourism(writer, dashboard)?,
            View::Heritage => write_heritage(writer, dashboard)?,
            View::Training => write_training(writer, dashboard)?,
            View::All => {}
        }
    }
    Ok(())
}

/// Per-dataset source, row count and metric status.
pub fn write_check<W: Write>(
    writer: &mut W,
    config: &DashboardConfig,
    dashboard: &Dashboard,
) -> fmt::Result {
    let failures = dashboard.failures();
    let mut table = new_table(&["dataset", "source", "rows", "metrics"]);
    for dataset in Dataset::ALL {
        let source = match config.source(dataset) {
            SourceSpec::File { path, .. } => config.resolve_path(path).display().to_string(),
            SourceSpec::Database { table } => format!("postgres: {table}"),
        };
        let status = failures
            .iter()
            .find(|(view, _)| *view == dataset.as_str())
            .map(|(_, error)| error.to_string())
            .unwrap_or_else(|| "ok".to_string());
        table.add_row(vec![
            Cell::new(dataset),
            Cell::new(source),
            right(thousands(dashboard.snapshot.dataset_len(dataset) as i64)),
            Cell::new(status),
        ]);
    }
    writeln!(writer, "{table}")
}

fn write_funds<W: Write>(writer: &mut W, dashboard: &Dashboard) -> fmt::Result {
    write_heading(writer, "Ministry of Culture: Funds Allocation vs Utilization (₹ Cr)")?;

    let records = &dashboard.snapshot.funds;
    let mut table = new_table(&[
        "year",
        FundsField::Allocated.canonical_name(),
        FundsField::Utilized.canonical_name(),
    ]);
    for record in records {
        table.add_row(vec![
            Cell::new(record.year),
            right(optional(record.funds_allocated, decimal)),
            right(optional(record.funds_utilized, decimal)),
        ]);
    }
    writeln!(writer, "{table}")?;

    match &dashboard.funds {
        Ok(metrics) => write_funds_summary(writer, metrics, records),
        Err(error) => write_unavailable(writer, error),
    }
}

fn write_funds_summary<W: Write>(
    writer: &mut W,
    metrics: &FundsMetrics,
    records: &[FundsRecord],
) -> fmt::Result {
    let year_of = |record: &FundsRecord, value: Option<f64>| {
        format!("{} in {}", optional(value, decimal), record.year)
    };
    writeln!(writer)?;
    write_fact(
        writer,
        "Highest Allocation",
        &year_of(&metrics.max_funds_allocated, metrics.max_funds_allocated.funds_allocated),
    )?;
    write_fact(
        writer,
        "Lowest Allocation",
        &year_of(&metrics.min_funds_allocated, metrics.min_funds_allocated.funds_allocated),
    )?;
    write_fact(
        writer,
        "Highest Utilization",
        &year_of(&metrics.max_funds_utilized, metrics.max_funds_utilized.funds_utilized),
    )?;
    write_fact(
        writer,
        "Lowest Utilization",
        &year_of(&metrics.min_funds_utilized, metrics.min_funds_utilized.funds_utilized),
    )?;
    write_fact(writer, "Total Allocated", &decimal(metrics.total_funds_allocated))?;
    write_fact(writer, "Total Utilized", &decimal(metrics.total_funds_utilized))?;
    write_fact(
        writer,
        "Utilization Rate",
        &optional(metrics.utilization_rate, |rate| format!("{:.1}%", rate * 100.0)),
    )?;

    writeln!(writer)?;
    let bars: Vec<_> = records
        .iter()
        .map(|record| (record.year.to_string(), record.funds_utilized))
        .collect();
    write_bars(writer, "Funds utilized per year (₹ Cr)", &bars, decimal)
}

fn write_tourism<W: Write>(writer: &mut W, dashboard: &Dashboard) -> fmt::Result {
    write_heading(writer, "Tourism Trends Over Years")?;

    let records = &dashboard.snapshot.tourism;
    let mut table = new_table(&[
        "year",
        TourismField::ForeignArrivals.canonical_name(),
        TourismField::EarningsLocal.canonical_name(),
        TourismField::EarningsForeign.canonical_name(),
        TourismField::DomesticVisits.canonical_name(),
    ]);
    for record in records {
        table.add_row(vec![
            Cell::new(record.year),
            right(optional(record.foreign_arrivals, thousands)),
            right(optional(record.earnings_local, decimal)),
            right(optional(record.earnings_foreign, decimal)),
            right(optional(record.domestic_visits, thousands)),
        ]);
    }
    writeln!(writer, "{table}")?;

    match &dashboard.tourism {
        Ok(metrics) => write_tourism_summary(writer, metrics, records),
        Err(error) => write_unavailable(writer, error),
    }
}

fn write_tourism_summary<W: Write>(
    writer: &mut W,
    metrics: &TourismMetrics,
    records: &[TourismRecord],
) -> fmt::Result {
    let visits = |record: &TourismRecord, value: Option<i64>| {
        format!("{} ({})", optional(value, thousands), record.year)
    };
    writeln!(writer)?;
    write_fact(
        writer,
        "Domestic Tourist Visits",
        &format!(
            "Min = {}, Max = {}",
            visits(&metrics.min_domestic_visits, metrics.min_domestic_visits.domestic_visits),
            visits(&metrics.max_domestic_visits, metrics.max_domestic_visits.domestic_visits),
        ),
    )?;
    write_fact(
        writer,
        "Foreign Tourist Arrivals",
        &format!(
            "Min = {}, Max = {}",
            visits(&metrics.min_foreign_arrivals, metrics.min_foreign_arrivals.foreign_arrivals),
            visits(&metrics.max_foreign_arrivals, metrics.max_foreign_arrivals.foreign_arrivals),
        ),
    )?;
    write_fact(
        writer,
        "Total Foreign Exchange Earnings",
        &format!("₹{} Cr", decimal(metrics.total_earnings_local)),
    )?;

    writeln!(writer)?;
    let bars: Vec<_> = records
        .iter()
        .map(|record| {
            (
                record.year.to_string(),
                record.foreign_arrivals.map(|value| value as f64),
            )
        })
        .collect();
    write_bars(writer, "Foreign tourist arrivals", &bars, |value| {
        thousands(value as i64)
    })
}

fn write_heritage<W: Write>(writer: &mut W, dashboard: &Dashboard) -> fmt::Result {
    write_heading(
        writer,
        "Case Study: Conservation of Mubarak Mandi Palace Complex, Jammu",
    )?;

    let records = &dashboard.snapshot.conservation;
    let mut table = new_table(&[
        "component",
        "description",
        ConservationField::EstimatedCost.canonical_name(),
    ]);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.component),
            Cell::new(&record.description),
            right(optional(record.estimated_cost, decimal)),
        ]);
    }
    writeln!(writer, "{table}")?;

    match &dashboard.conservation {
        Ok(metrics) => write_conservation_summary(writer, metrics, dashboard)?,
        Err(error) => write_unavailable(writer, error)?,
    }

    writeln!(writer)?;
    writeln!(writer, "### Project Overview")?;
    for (label, value) in HERITAGE_OVERVIEW {
        write_fact(writer, label, value)?;
    }
    writeln!(writer)?;
    writeln!(writer, "### Historical Significance")?;
    writeln!(writer, "{HERITAGE_HISTORY}")?;
    writeln!(writer)?;
    writeln!(writer, "### Conservation Efforts")?;
    for (label, value) in HERITAGE_EFFORTS {
        write_fact(writer, label, value)?;
    }
    writeln!(writer)?;
    writeln!(writer, "### Challenges and Mitigation")?;
    for (label, value) in HERITAGE_CHALLENGES {
        write_fact(writer, label, value)?;
    }
    writeln!(writer)?;
    writeln!(writer, "### Conclusion")?;
    writeln!(writer, "{HERITAGE_CONCLUSION}")
}

fn write_conservation_summary<W: Write>(
    writer: &mut W,
    metrics: &ConservationMetrics,
    dashboard: &Dashboard,
) -> fmt::Result {
    let costliest = &metrics.costliest_component;
    writeln!(writer)?;
    write_fact(writer, "Components", &metrics.component_count.to_string())?;
    write_fact(
        writer,
        "Estimated Cost of Listed Components",
        &format!("₹{} Cr", decimal(metrics.total_estimated_cost)),
    )?;
    write_fact(
        writer,
        "Costliest Component",
        &format!(
            "{} (₹{} Cr)",
            costliest.component,
            optional(costliest.estimated_cost, decimal)
        ),
    )?;

    writeln!(writer)?;
    let bars: Vec<_> = dashboard
        .snapshot
        .conservation
        .iter()
        .map(|record| (record.component.clone(), record.estimated_cost))
        .collect();
    write_bars(writer, "Estimated cost per component (₹ Cr)", &bars, decimal)
}

fn write_training<W: Write>(writer: &mut W, dashboard: &Dashboard) -> fmt::Result {
    write_heading(writer, "State-wise ITI/ITC Distribution")?;

    let metrics = match &dashboard.institutes {
        Ok(metrics) => metrics,
        Err(error) => {
            writeln!(writer, "{}", institute_table(&dashboard.snapshot.institutes))?;
            return write_unavailable(writer, error);
        }
    };
    writeln!(writer, "{}", institute_table(&metrics.sorted_by_intake_capacity))?;
    write_institute_summary(writer, metrics)
}

fn institute_table(records: &[InstituteRecord]) -> Table {
    let mut table = new_table(&[
        "state_or_territory",
        InstituteField::InstituteCount.canonical_name(),
        InstituteField::IntakeCapacity.canonical_name(),
    ]);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.state_or_territory),
            right(optional(record.institute_count, thousands)),
            right(optional(record.intake_capacity, thousands)),
        ]);
    }
    table
}

fn write_institute_summary<W: Write>(writer: &mut W, metrics: &InstituteMetrics) -> fmt::Result {
    let by_capacity = &metrics.top_state_by_intake_capacity;
    let by_count = &metrics.top_state_by_institute_count;

    writeln!(writer)?;
    writeln!(writer, "#### Key Insights")?;
    write_fact(
        writer,
        "Top State by Intake Capacity",
        &format!(
            "{} with {} seats",
            by_capacity.state_or_territory,
            optional(by_capacity.intake_capacity, thousands)
        ),
    )?;
    write_fact(
        writer,
        "Top State by Number of ITIs",
        &format!(
            "{} with {} institutes",
            by_count.state_or_territory,
            optional(by_count.institute_count, thousands)
        ),
    )?;
    write_fact(writer, "Total ITIs", &thousands(metrics.total_institute_count))?;
    write_fact(
        writer,
        "Total Intake Capacity",
        &thousands(metrics.total_intake_capacity),
    )?;
    write_fact(
        writer,
        "Average Capacity per ITI",
        &metrics.average_intake_per_institute.to_string(),
    )?;

    let bars = |records: &[InstituteRecord], field: fn(&InstituteRecord) -> Option<i64>| {
        records
            .iter()
            .map(|record| {
                (
                    record.state_or_territory.clone(),
                    field(record).map(|value| value as f64),
                )
            })
            .collect::<Vec<_>>()
    };
    let whole = |value: f64| thousands(value as i64);

    writeln!(writer)?;
    write_bars(
        writer,
        "Top 10 States by Intake Capacity",
        &bars(&metrics.top10_by_intake_capacity, |record| record.intake_capacity),
        whole,
    )?;
    writeln!(writer)?;
    write_bars(
        writer,
        "Top 10 States by Number of ITIs",
        &bars(&metrics.top10_by_institute_count, |record| record.institute_count),
        whole,
    )?;

    writeln!(writer)?;
    writeln!(writer, "### Correlation between ITI Count and Intake Capacity")?;
    write_fact(
        writer,
        "Pearson r",
        &optional(metrics.count_capacity_correlation, |r| {
            format!("{r:.3} ({})", correlation_strength(r))
        }),
    )
}

fn correlation_strength(r: f64) -> &'static str {
    match r.abs() {
        strength if strength >= 0.7 => "strong",
        strength if strength >= 0.4 => "moderate",
        _ => "weak",
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn right(content: String) -> Cell {
    Cell::new(content).set_alignment(CellAlignment::Right)
}

fn write_heading<W: Write>(writer: &mut W, title: &str) -> fmt::Result {
    writeln!(writer, "## {title}")?;
    writeln!(writer)
}

fn write_fact<W: Write>(writer: &mut W, label: &str, value: &str) -> fmt::Result {
    writeln!(writer, "- **{label}**: {value}")
}

fn write_unavailable<W: Write>(writer: &mut W, error: &MetricError) -> fmt::Result {
    writeln!(writer)?;
    writeln!(writer, "> metrics unavailable: {error}")
}

/// Horizontal bars scaled to the largest value; missing values get no bar.
fn write_bars<W: Write>(
    writer: &mut W,
    title: &str,
    bars: &[(String, Option<f64>)],
    format: impl Fn(f64) -> String,
) -> fmt::Result {
    writeln!(writer, "{title}")?;
    let label_width = bars
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let peak = bars
        .iter()
        .filter_map(|(_, value)| *value)
        .fold(0.0_f64, f64::max);

    for (label, value) in bars {
        let (drawn, shown) = match value {
            Some(value) => (bar(*value, peak), format(*value)),
            None => (String::new(), MISSING.to_string()),
        };
        writeln!(writer, "  {label:<label_width$} │{drawn} {shown}")?;
    }
    Ok(())
}

fn bar(value: f64, peak: f64) -> String {
    if peak <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / peak) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.max(1))
}

fn optional<T>(value: Option<T>, format: impl Fn(T) -> String) -> String {
    value.map(format).unwrap_or_else(|| MISSING.to_string())
}

fn decimal(value: f64) -> String {
    format!("{value:.2}")
}

fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use culturedash_core::Snapshot;

    use super::*;

    fn funds_only() -> Dashboard {
        Dashboard::build(Snapshot {
            funds: vec![
                FundsRecord {
                    year: 2015,
                    funds_allocated: Some(2001.21),
                    funds_utilized: Some(1854.43),
                },
                FundsRecord {
                    year: 2016,
                    funds_allocated: Some(2500.0),
                    funds_utilized: None,
                },
            ],
            ..Snapshot::default()
        })
    }

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(2_321_982_663), "2,321,982,663");
        assert_eq!(thousands(-45_000), "-45,000");
    }

    #[test]
    fn bars_scale_to_the_peak() {
        assert_eq!(bar(10.0, 10.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(5.0, 10.0).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(0.001, 10.0).chars().count(), 1);
        assert!(bar(0.0, 10.0).is_empty());
        assert!(bar(3.0, 0.0).is_empty());
    }

    #[test]
    fn failed_views_render_their_error_next_to_the_others() {
        let dashboard = funds_only();
        let mut out = String::new();
        write_views(&mut out, &dashboard, View::All).unwrap();

        assert!(out.contains("Funds Allocation vs Utilization"));
        assert!(out.contains("Highest Allocation**: 2500.00 in 2016"));
        assert!(out.contains("Tourism Trends Over Years"));
        assert!(out.contains("> metrics unavailable"));
        assert!(out.contains("Mubarak Mandi Jammu Heritage Society"));
        assert!(out.contains("### Challenges and Mitigation"));
        assert!(out.contains("### Conclusion"));
    }

    #[test]
    fn training_view_reports_count_capacity_correlation() {
        let institute = |state: &str, count: i64, capacity: i64| InstituteRecord {
            state_or_territory: state.to_string(),
            institute_count: Some(count),
            intake_capacity: Some(capacity),
        };
        let dashboard = Dashboard::build(Snapshot {
            institutes: vec![
                institute("Kerala", 553, 75_812),
                institute("Bihar", 61, 13_796),
                institute("Tamil Nadu", 718, 80_024),
            ],
            ..Snapshot::default()
        });
        let mut out = String::new();
        write_views(&mut out, &dashboard, View::Training).unwrap();

        assert!(out.contains("Correlation between ITI Count and Intake Capacity"));
        assert!(out.contains("(strong)"));
        assert_eq!(correlation_strength(-0.5), "moderate");
        assert_eq!(correlation_strength(0.1), "weak");
    }

    #[test]
    fn single_view_renders_alone() {
        let dashboard = funds_only();
        let mut out = String::new();
        write_views(&mut out, &dashboard, View::Funds).unwrap();

        assert!(out.contains("funds_allocated_cr"));
        assert!(!out.contains("Tourism Trends"));
    }

    #[test]
    fn check_reports_rows_and_status_per_dataset() {
        let dashboard = funds_only();
        let mut out = String::new();
        write_check(&mut out, &DashboardConfig::default(), &dashboard).unwrap();

        assert!(out.contains("RS_Session_250_AU186.csv"));
        assert!(out.contains("ok"));
        assert!(out.contains("empty collection"));
    }
}
