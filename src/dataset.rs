use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};

const REQUIRED_COLUMNS: [&str; 7] = [
    "beds",
    "oxy_cyl",
    "ventilators",
    "staff",
    "doctors",
    "severity",
    "distance",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity '{0}' (expected low, medium or high)")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err(UnknownSeverity(s.to_string())),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = UnknownSeverity;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One hospital row. Counts are unsigned so negative values fail at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalRecord {
    #[serde(default)]
    pub name: Option<String>,
    pub beds: u32,
    pub oxy_cyl: u32,
    pub ventilators: u32,
    pub staff: u32,
    pub doctors: u32,
    pub severity: Severity,
    /// Precomputed distance from the fixed reference point.
    pub distance: f64,
}

/// Read-only hospital table, in file order.
#[derive(Debug)]
pub struct HospitalTable {
    records: Vec<HospitalRecord>,
}

impl HospitalTable {
    pub fn new(records: Vec<HospitalRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[HospitalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn load(path: &Path) -> anyhow::Result<HospitalTable> {
    let file = File::open(path)
        .with_context(|| format!("open hospital dataset {}", path.display()))?;
    let table = from_reader(file, &path.display().to_string())?;
    if table.is_empty() {
        tracing::warn!("Hospital dataset {} has no rows", path.display());
    }
    tracing::info!("Loaded {} hospitals from {}", table.len(), path.display());
    Ok(table)
}

pub fn from_reader<R: Read>(rdr: R, source: &str) -> anyhow::Result<HospitalTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let headers = reader
        .headers()
        .with_context(|| format!("read headers from {source}"))?
        .clone();
    for name in REQUIRED_COLUMNS {
        header_index(&headers, name).with_context(|| format!("invalid dataset {source}"))?;
    }

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<HospitalRecord>().enumerate() {
        let record = row.with_context(|| format!("parse row {} of {source}", i + 1))?;
        if !record.distance.is_finite() || record.distance < 0.0 {
            return Err(anyhow!(
                "row {} of {source}: distance must be a non-negative number, got {}",
                i + 1,
                record.distance
            ));
        }
        records.push(record);
    }
    Ok(HospitalTable::new(records))
}

fn header_index(headers: &csv::StringRecord, name: &str) -> anyhow::Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("CSV missing required header '{name}'"))
}


#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "name,beds,oxy_cyl,ventilators,staff,doctors,severity,distance\n";

    fn parse(body: &str) -> anyhow::Result<HospitalTable> {
        from_reader(format!("{HEADER}{body}").as_bytes(), "inline")
    }

    #[test]
    fn loads_rows_in_file_order() {
        let table = parse("City General,10,5,2,20,3,high,5\nNorth Clinic,3,1,0,5,1,low,2.5\n")
            .unwrap();
        assert_eq!(table.len(), 2);
        let first = &table.records()[0];
        assert_eq!(first.name.as_deref(), Some("City General"));
        assert_eq!(first.beds, 10);
        assert_eq!(first.severity, Severity::High);
        assert_eq!(table.records()[1].distance, 2.5);
    }

    #[test]
    fn name_column_is_optional_and_extra_columns_are_ignored() {
        let csv = ",beds,oxy_cyl,ventilators,staff,doctors,severity,distance\n0,1,1,1,1,1,Medium,4\n";
        let table = from_reader(csv.as_bytes(), "inline").unwrap();
        let row = &table.records()[0];
        assert_eq!(row.name, None);
        assert_eq!(row.severity, Severity::Medium);
    }

    #[test]
    fn trims_whitespace_around_fields() {
        let table = parse(" Lakeside , 4 , 2 , 1 , 9 , 2 , HIGH , 7 \n").unwrap();
        let row = &table.records()[0];
        assert_eq!(row.name.as_deref(), Some("Lakeside"));
        assert_eq!(row.beds, 4);
        assert_eq!(row.severity, Severity::High);
    }

    #[test]
    fn header_only_file_is_an_empty_table() {
        let table = parse("").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn missing_required_header_is_rejected() {
        let csv = "name,beds,oxy_cyl,ventilators,staff,doctors,severity\nA,1,1,1,1,1,low\n";
        let err = from_reader(csv.as_bytes(), "inline").unwrap_err();
        assert!(format!("{err:#}").contains("'distance'"));
    }

    #[test]
    fn negative_count_is_rejected() {
        let err = parse("A,-1,1,1,1,1,low,3\n").unwrap_err();
        assert!(format!("{err:#}").contains("row 1"));
    }

    #[test]
    fn negative_distance_is_rejected() {
        assert!(parse("A,1,1,1,1,1,low,-0.5\n").is_err());
    }

    #[test]
    fn non_finite_distance_is_rejected() {
        for raw in ["inf", "NaN", "-inf"] {
            let err = parse(&format!("A,1,1,1,1,1,low,{raw}\n")).unwrap_err();
            assert!(format!("{err:#}").contains("distance"), "input {raw:?}");
        }
    }

    #[test]
    fn unknown_severity_is_rejected() {
        let err = parse("A,1,1,1,1,1,critical,3\n").unwrap_err();
        assert!(format!("{err:#}").contains("critical"));
    }

    #[test]
    fn missing_file_fails() {
        assert!(load(Path::new("/definitely/not/here.csv")).is_err());
    }

    #[test]
    fn bundled_dataset_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/hospital_data.csv");
        let table = load(&path).unwrap();
        assert!(!table.is_empty());
        assert!(table.records().iter().all(|r| r.distance >= 0.0));
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("Low".parse::<Severity>(), Ok(Severity::Low));
        assert_eq!(" medium ".parse::<Severity>(), Ok(Severity::Medium));
        assert!("urgent".parse::<Severity>().is_err());
        assert_eq!(Severity::High.to_string(), "high");
    }
}
