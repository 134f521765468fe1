use crate::dataset::HospitalRecord;
use crate::query::QueryCriteria;

const HOME_HTML: &str = include_str!("../templates/home.html");

pub fn home() -> &'static str {
    HOME_HTML
}

pub fn results(criteria: &QueryCriteria, hits: &[&HospitalRecord]) -> String {
    let mut rows = String::new();
    for h in hits {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(h.name.as_deref().unwrap_or("")),
            h.beds,
            h.oxy_cyl,
            h.ventilators,
            h.staff,
            h.doctors,
            h.severity,
            h.distance,
        ));
    }
    if hits.is_empty() {
        rows.push_str(
            "<tr><td colspan=\"8\">No hospital within range meets all of the requested criteria.</td></tr>\n",
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Hospital Finder: results</title>
  <style>
    body {{ font-family: sans-serif; margin: 2rem; }}
    table {{ border-collapse: collapse; }}
    th, td {{ border: 1px solid #999; padding: 0.3rem 0.6rem; text-align: left; }}
  </style>
</head>
<body>
  <h1>Matching hospitals</h1>
  <p>Severity {severity}, within distance {distance}; at least {beds} beds, {oxy} oxygen cylinders, {vent} ventilators, {staff} staff, {doctors} doctors.</p>
  <p>{count} found, nearest first.</p>
  <table>
    <thead>
      <tr><th>Name</th><th>Beds</th><th>Oxygen cylinders</th><th>Ventilators</th><th>Staff</th><th>Doctors</th><th>Severity</th><th>Distance</th></tr>
    </thead>
    <tbody>
{rows}    </tbody>
  </table>
  <p><a href="/">New search</a></p>
</body>
</html>
"#,
        severity = criteria.required_severity,
        distance = criteria.max_distance,
        beds = criteria.min_beds,
        oxy = criteria.min_oxy_cyl,
        vent = criteria.min_ventilators,
        staff = criteria.min_staff,
        doctors = criteria.min_doctors,
        count = hits.len(),
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
