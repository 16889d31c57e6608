//! Spreadsheet import types.

use serde::{Deserialize, Serialize};

/// Sheet name the importer looks for before falling back to the first sheet.
pub const APPEALS_SHEET_NAME: &str = "Обращения";

/// Column header aliases for the topic code.
pub const CODE_COLUMNS: &[&str] = &["Код темы", "Код"];
/// Column header aliases for the external appeal id.
pub const GIS_ID_COLUMNS: &[&str] = &["ID", "Идентификатор"];
/// Column header aliases for the appeal number.
pub const NUMBER_COLUMNS: &[&str] = &["Номер", "№"];
/// Column header aliases for the topic name.
pub const TOPIC_COLUMNS: &[&str] = &["Тема", "Тема обращения"];
/// Column header aliases for the appeal text.
pub const APPEAL_TEXT_COLUMNS: &[&str] = &["Текст обращения", "Содержание"];
/// Column header aliases for the response text.
pub const RESPONSE_TEXT_COLUMNS: &[&str] = &["Текст ответа"];
/// Column header aliases for the address.
pub const ADDRESS_COLUMNS: &[&str] = &["Адрес"];

/// A spreadsheet row after column-alias resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRow {
    pub code: Option<String>,
    pub gis_id: Option<String>,
    pub number: Option<String>,
    pub topic: Option<String>,
    pub appeal_text: Option<String>,
    pub response_text: Option<String>,
    pub address: Option<String>,
}

/// Accumulated outcome of an import run.
///
/// Rows are processed independently: a failing row increments `errors` and
/// appends a detail line, then processing continues with the next row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub success: u32,
    pub errors: u32,
    pub skipped: u32,
    pub details: Vec<String>,
}

impl ImportSummary {
    pub fn record_success(&mut self) {
        self.success += 1;
    }

    pub fn record_skipped(&mut self, detail: impl Into<String>) {
        self.skipped += 1;
        self.details.push(detail.into());
    }

    pub fn record_error(&mut self, row: usize, error: impl std::fmt::Display) {
        self.errors += 1;
        self.details.push(format!("Row {}: {}", row, error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_accumulation() {
        let mut summary = ImportSummary::default();
        summary.record_success();
        summary.record_success();
        summary.record_error(3, "bad category code");
        summary.record_skipped("Row 4: empty row");

        assert_eq!(summary.success, 2);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.details.len(), 2);
        assert!(summary.details[0].starts_with("Row 3:"));
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = ImportSummary::default();
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["success"], 0);
        assert_eq!(json["errors"], 0);
        assert_eq!(json["skipped"], 0);
    }
}
