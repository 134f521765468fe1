use anyhow::{Context, anyhow};
use serde::Serialize;

use crate::cli::QueryArgs;
use crate::dataset::{self, HospitalRecord, HospitalTable, Severity};
use crate::storage::StoragePaths;

pub const NO_HOSPITALS_WITHIN_DISTANCE: &str = "No hospitals found within the specified distance.";

#[derive(Debug, Clone, PartialEq)]
pub struct QueryCriteria {
    pub min_beds: u32,
    pub min_oxy_cyl: u32,
    pub min_ventilators: u32,
    pub min_staff: u32,
    pub min_doctors: u32,
    pub required_severity: Severity,
    pub max_distance: u32,
}

impl QueryCriteria {
    fn within_distance(&self, h: &HospitalRecord) -> bool {
        h.distance <= f64::from(self.max_distance)
    }

    fn satisfied_by(&self, h: &HospitalRecord) -> bool {
        h.beds >= self.min_beds
            && h.oxy_cyl >= self.min_oxy_cyl
            && h.ventilators >= self.min_ventilators
            && h.staff >= self.min_staff
            && h.doctors >= self.min_doctors
            && h.severity == self.required_severity
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult<'a> {
    /// No hospital at all lies within `max_distance`.
    NoneWithinDistance,
    /// Hospitals meeting every criterion, nearest first. May be empty.
    Matches(Vec<&'a HospitalRecord>),
}

/// Filters by distance, then by resource thresholds and exact severity.
///
/// Sorting is stable, so hospitals at equal distance keep table order.
pub fn find<'a>(table: &'a HospitalTable, criteria: &QueryCriteria) -> QueryResult<'a> {
    let nearby: Vec<&HospitalRecord> = table
        .records()
        .iter()
        .filter(|h| criteria.within_distance(h))
        .collect();
    if nearby.is_empty() {
        return QueryResult::NoneWithinDistance;
    }

    let mut hits: Vec<&HospitalRecord> = nearby
        .into_iter()
        .filter(|h| criteria.satisfied_by(h))
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    QueryResult::Matches(hits)
}

#[derive(Debug, Serialize)]
struct MessageOutput<'a> {
    message: &'a str,
}

pub fn run(opts: QueryArgs) -> anyhow::Result<()> {
    let paths = StoragePaths::from_args(&opts.data);
    let table = dataset::load(&paths.dataset_path).context("load hospital dataset")?;

    let required_severity: Severity = opts
        .severity
        .parse()
        .map_err(|e| anyhow!("--severity: {e}"))?;
    let criteria = QueryCriteria {
        min_beds: opts.beds,
        min_oxy_cyl: opts.oxy_cyl,
        min_ventilators: opts.ventilators,
        min_staff: opts.staff,
        min_doctors: opts.doctors,
        required_severity,
        max_distance: opts.distance,
    };
    tracing::debug!("criteria={:?}", criteria);

    let result = find(&table, &criteria);
    if let QueryResult::Matches(hits) = &result {
        tracing::debug!("{} hospitals match", hits.len());
    }
    println!("{}", render_json(&result)?);
    Ok(())
}

/// JSON form of a result: a `message` object when nothing is in range,
/// otherwise the matching hospitals as an array.
pub fn render_json(result: &QueryResult<'_>) -> anyhow::Result<String> {
    let out = match result {
        QueryResult::NoneWithinDistance => serde_json::to_string_pretty(&MessageOutput {
            message: NO_HOSPITALS_WITHIN_DISTANCE,
        })?,
        QueryResult::Matches(hits) => serde_json::to_string_pretty(hits)?,
    };
    Ok(out)
}
