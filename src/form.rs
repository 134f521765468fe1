use serde::Deserialize;

use crate::dataset::Severity;
use crate::query::QueryCriteria;

/// Raw `/predict` submission. Every field is optional so that missing input
/// reaches validation instead of being rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct PredictForm {
    pub beds: Option<String>,
    pub oxy_cyl: Option<String>,
    pub ventilators: Option<String>,
    pub staff: Option<String>,
    pub doctors: Option<String>,
    pub severity: Option<String>,
    pub distance: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Beds,
    OxyCyl,
    Ventilators,
    Staff,
    Doctors,
    Severity,
    Distance,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Beds => "Beds",
            Field::OxyCyl => "Oxygen cylinders",
            Field::Ventilators => "Ventilators",
            Field::Staff => "Staff",
            Field::Doctors => "Doctors",
            Field::Severity => "Severity",
            Field::Distance => "Distance",
        }
    }

    fn noun(self) -> String {
        self.label().to_ascii_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{} field is empty", .0.label())]
    Empty(Field),
    #[error("Invalid {} value", .0.noun())]
    Invalid(Field),
}

impl PredictForm {
    /// Validates distance first, then the counts in form order, then severity.
    pub fn into_criteria(self) -> Result<QueryCriteria, ValidationError> {
        let max_distance = parse_count(self.distance.as_deref(), Field::Distance)?;
        let min_beds = parse_count(self.beds.as_deref(), Field::Beds)?;
        let min_oxy_cyl = parse_count(self.oxy_cyl.as_deref(), Field::OxyCyl)?;
        let min_ventilators = parse_count(self.ventilators.as_deref(), Field::Ventilators)?;
        let min_staff = parse_count(self.staff.as_deref(), Field::Staff)?;
        let min_doctors = parse_count(self.doctors.as_deref(), Field::Doctors)?;
        let required_severity = parse_severity(self.severity.as_deref())?;

        Ok(QueryCriteria {
            min_beds,
            min_oxy_cyl,
            min_ventilators,
            min_staff,
            min_doctors,
            required_severity,
            max_distance,
        })
    }
}

fn non_empty(raw: Option<&str>, field: Field) -> Result<&str, ValidationError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::Empty(field))
}

fn parse_count(raw: Option<&str>, field: Field) -> Result<u32, ValidationError> {
    non_empty(raw, field)?
        .parse::<u32>()
        .map_err(|_| ValidationError::Invalid(field))
}

fn parse_severity(raw: Option<&str>) -> Result<Severity, ValidationError> {
    non_empty(raw, Field::Severity)?
        .parse()
        .map_err(|_| ValidationError::Invalid(Field::Severity))
}
