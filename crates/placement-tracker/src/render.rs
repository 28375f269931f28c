//! Text rendering for applications and summaries.
//!
//! Everything here returns a `String`; the caller decides where it goes.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::application::{ApplicationRecord, Summary};
use crate::error::{Error, Result};

/// Shown in place of the table when there is nothing to list.
pub const NO_APPLICATIONS: &str = "No applications yet. Add your first one with `placetrack add`.";

const HEADERS: [&str; 6] = ["Company", "Role", "Stage", "Result", "Applied", "ID"];

/// Format an applied date with a `strftime` pattern.
///
/// # Errors
///
/// Returns [`Error::DateFormat`] if the pattern has an unknown specifier or
/// asks for a field a date does not carry, such as `%H`.
pub fn format_date(date: NaiveDate, pattern: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).map_err(|_| Error::DateFormat {
        pattern: pattern.to_string(),
    })?;
    Ok(out)
}

/// Render records as an aligned table, or [`NO_APPLICATIONS`] if empty.
///
/// # Errors
///
/// Returns an error if `date_format` cannot render an applied date.
pub fn render_table(records: &[ApplicationRecord], date_format: &str) -> Result<String> {
    if records.is_empty() {
        return Ok(format!("{NO_APPLICATIONS}\n"));
    }

    let rows = records
        .iter()
        .map(|record| {
            Ok([
                record.company_name.clone(),
                record.role.clone(),
                record.stage.to_string(),
                record.result.to_string(),
                format_date(record.applied_date, date_format)?,
                record.id.to_string(),
            ])
        })
        .collect::<Result<Vec<[String; 6]>>>()?;

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    push_row(&mut out, &widths.map(|w| "-".repeat(w)), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    Ok(out)
}

fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Render one line per record, suitable for piping.
///
/// # Errors
///
/// Returns an error if `date_format` cannot render an applied date.
pub fn render_plain(records: &[ApplicationRecord], date_format: &str) -> Result<String> {
    if records.is_empty() {
        return Ok(format!("{NO_APPLICATIONS}\n"));
    }

    records
        .iter()
        .map(|record| {
            Ok(format!(
                "{}\t{}\t{}\t{}\t{}\t{}\n",
                record.id,
                record.company_name,
                record.role,
                record.stage,
                record.result,
                format_date(record.applied_date, date_format)?
            ))
        })
        .collect()
}

/// Render records as a pretty-printed JSON array in the slot format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(records: &[ApplicationRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Render the summary panel.
#[must_use]
pub fn render_summary(summary: &Summary) -> String {
    format!(
        "Total Applications:  {}\nInterviews:          {}\nOffers:              {}\nRejections:          {}\n",
        summary.total_applications,
        summary.total_interviews,
        summary.total_offers,
        summary.total_rejections
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{Outcome, Stage};

    const FORMAT: &str = "%b %-d, %Y";

    fn record(id: i64, company: &str, stage: Stage) -> ApplicationRecord {
        ApplicationRecord {
            id,
            company_name: company.to_string(),
            role: "Data Analyst".to_string(),
            stage,
            result: Outcome::Pending,
            applied_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        }
    }

    #[test]
    fn test_format_date_like_browser_locale() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(format_date(date, FORMAT).unwrap(), "Oct 19, 2026");

        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date, FORMAT).unwrap(), "Mar 5, 2024");
    }

    #[test]
    fn test_format_date_rejects_time_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let err = format_date(date, "%H:%M").unwrap_err();
        assert!(matches!(err, Error::DateFormat { ref pattern } if pattern == "%H:%M"));
        assert!(format_date(date, "%Q").is_err());
    }

    #[test]
    fn test_listing_with_time_format_is_an_error() {
        let records = vec![record(1, "Acme", Stage::Applied)];
        assert!(render_table(&records, "%H").is_err());
        assert!(render_plain(&records, "%H").is_err());
    }

    #[test]
    fn test_table_empty_shows_message() {
        assert_eq!(render_table(&[], FORMAT).unwrap().trim_end(), NO_APPLICATIONS);
        assert_eq!(render_plain(&[], FORMAT).unwrap().trim_end(), NO_APPLICATIONS);
    }

    #[test]
    fn test_table_has_header_and_rows_in_order() {
        let records = vec![
            record(2, "Zeta", Stage::Applied),
            record(1, "Alpha", Stage::OnlineAssessment),
        ];
        let table = render_table(&records, FORMAT).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Company"));
        assert!(lines[1].starts_with("-------"));
        assert!(lines[2].starts_with("Zeta"));
        assert!(lines[3].starts_with("Alpha"));
        assert!(lines[3].contains("Online Assessment (OA)"));
        assert!(lines[3].contains("Mar 5, 2024"));
    }

    #[test]
    fn test_table_columns_align() {
        let records = vec![
            record(1, "A", Stage::Applied),
            record(2, "A much longer company", Stage::Applied),
        ];
        let table = render_table(&records, FORMAT).unwrap();
        let role_columns: Vec<usize> = table
            .lines()
            .filter(|line| !line.starts_with('-') && !line.starts_with("Company"))
            .map(|line| line.find("Data Analyst").unwrap())
            .collect();
        assert_eq!(role_columns[0], role_columns[1]);
    }

    #[test]
    fn test_plain_is_tab_separated() {
        let plain = render_plain(&[record(9, "Acme", Stage::Offer)], FORMAT).unwrap();
        assert_eq!(plain, "9\tAcme\tData Analyst\tOffer\tPending\tMar 5, 2024\n");
    }

    #[test]
    fn test_json_uses_slot_format() {
        let json = render_json(&[record(9, "Acme", Stage::Offer)]).unwrap();
        assert!(json.contains("\"companyName\": \"Acme\""));
        assert!(json.contains("\"appliedDate\": \"2024-03-05\""));
    }

    #[test]
    fn test_summary_panel() {
        let summary = Summary {
            total_applications: 5,
            total_interviews: 3,
            total_offers: 2,
            total_rejections: 1,
        };
        let text = render_summary(&summary);
        assert!(text.contains("Total Applications:  5"));
        assert!(text.contains("Interviews:          3"));
        assert!(text.contains("Offers:              2"));
        assert!(text.contains("Rejections:          1"));
    }
}
