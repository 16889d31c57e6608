//! Excel appeal import.
//!
//! Parses an uploaded .xlsx workbook, resolves column headers against the
//! known aliases, and upserts one appeal per data row. Rows are independent:
//! a bad row is counted and reported, then processing moves on.

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};
use chrono::Utc;
use rand::Rng;
use sqlx::PgPool;
use thiserror::Error;

use domain::models::{
    ImportRow, ImportSummary, ADDRESS_COLUMNS, APPEALS_SHEET_NAME, APPEAL_TEXT_COLUMNS,
    CODE_COLUMNS, GIS_ID_COLUMNS, NUMBER_COLUMNS, RESPONSE_TEXT_COLUMNS, TOPIC_COLUMNS,
};
use persistence::repositories::{AppealRepository, CategoryRepository, NewCategory, UpsertAppeal};
use shared::slug::slugify;

use crate::middleware::record_appeals_imported;

/// Errors that abort the whole import, as opposed to per-row failures.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid workbook: {0}")]
    InvalidWorkbook(String),

    #[error("Workbook contains no sheets")]
    NoSheets,

    #[error("Sheet has no header row")]
    MissingHeader,
}

/// Topic code assigned to rows whose sheet carries no usable code cell.
const FALLBACK_CODE: &str = "0.0";

pub struct ImportService {
    categories: CategoryRepository,
    appeals: AppealRepository,
}

impl ImportService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            categories: CategoryRepository::new(pool.clone()),
            appeals: AppealRepository::new(pool),
        }
    }

    /// Import appeals from xlsx bytes and return the per-row outcome.
    pub async fn import_xlsx(&self, bytes: &[u8]) -> Result<ImportSummary, ImportError> {
        let mut workbook = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| ImportError::InvalidWorkbook(e.to_string()))?;
        let range = appeals_sheet(&mut workbook)?;

        let mut rows = range.rows();
        let header = rows.next().ok_or(ImportError::MissingHeader)?;
        let columns = ColumnMap::from_header(header);

        let mut summary = ImportSummary::default();
        for (index, raw) in rows.enumerate() {
            // 1-based spreadsheet numbering, header on row 1
            let row_number = index + 2;
            let row = columns.extract(raw);

            if row == ImportRow::default() {
                summary.record_skipped(format!("Row {}: empty row", row_number));
                continue;
            }

            match self.import_row(&row).await {
                Ok(()) => summary.record_success(),
                Err(err) => {
                    tracing::warn!(row = row_number, error = %err, "Appeal row failed");
                    summary.record_error(row_number, err);
                }
            }
        }

        record_appeals_imported(summary.success as u64);
        tracing::info!(
            success = summary.success,
            errors = summary.errors,
            skipped = summary.skipped,
            "Appeal import finished"
        );
        Ok(summary)
    }

    /// Historical sheets omit columns freely, so missing cells fall back
    /// instead of failing the row: code defaults to [`FALLBACK_CODE`], the
    /// appeal text and number to empty strings.
    async fn import_row(&self, row: &ImportRow) -> Result<(), sqlx::Error> {
        let code = row.code.as_deref().unwrap_or(FALLBACK_CODE);
        let appeal_text = row.appeal_text.clone().unwrap_or_default();

        let category = match self.categories.find_by_code(code).await? {
            Some(existing) => existing,
            None => {
                let name = row
                    .topic
                    .clone()
                    .unwrap_or_else(|| format!("Тема {}", code));
                let mut slug = slugify(&name);
                if slug.is_empty() {
                    slug = slugify(code);
                }
                self.categories
                    .create(NewCategory {
                        code: code.to_string(),
                        name,
                        slug,
                        description: None,
                        icon: None,
                        parent_id: None,
                        sort_order: 0,
                    })
                    .await?
            }
        };

        let gis_id = row.gis_id.clone().unwrap_or_else(synthesize_gis_id);

        self.appeals
            .upsert(UpsertAppeal {
                gis_id,
                number: row.number.clone().unwrap_or_default(),
                category_id: category.id,
                appeal_text,
                response_text: row.response_text.clone(),
                address: row.address.clone(),
            })
            .await?;

        Ok(())
    }
}

/// The "Обращения" sheet when present, otherwise the first sheet.
fn appeals_sheet(workbook: &mut Xlsx<Cursor<&[u8]>>) -> Result<Range<Data>, ImportError> {
    if let Ok(range) = workbook.worksheet_range(APPEALS_SHEET_NAME) {
        return Ok(range);
    }
    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ImportError::NoSheets)?;
    workbook
        .worksheet_range(&first)
        .map_err(|e| ImportError::InvalidWorkbook(e.to_string()))
}

/// Resolved column positions for one sheet.
#[derive(Debug, Default)]
struct ColumnMap {
    code: Option<usize>,
    gis_id: Option<usize>,
    number: Option<usize>,
    topic: Option<usize>,
    appeal_text: Option<usize>,
    response_text: Option<usize>,
    address: Option<usize>,
}

impl ColumnMap {
    fn from_header(header: &[Data]) -> Self {
        let mut map = ColumnMap::default();
        for (index, cell) in header.iter().enumerate() {
            let Some(name) = cell_to_string(cell) else {
                continue;
            };
            if matches_alias(&name, CODE_COLUMNS) {
                map.code.get_or_insert(index);
            } else if matches_alias(&name, GIS_ID_COLUMNS) {
                map.gis_id.get_or_insert(index);
            } else if matches_alias(&name, NUMBER_COLUMNS) {
                map.number.get_or_insert(index);
            } else if matches_alias(&name, TOPIC_COLUMNS) {
                map.topic.get_or_insert(index);
            } else if matches_alias(&name, APPEAL_TEXT_COLUMNS) {
                map.appeal_text.get_or_insert(index);
            } else if matches_alias(&name, RESPONSE_TEXT_COLUMNS) {
                map.response_text.get_or_insert(index);
            } else if matches_alias(&name, ADDRESS_COLUMNS) {
                map.address.get_or_insert(index);
            }
        }
        map
    }

    fn extract(&self, row: &[Data]) -> ImportRow {
        let value = |index: Option<usize>| index.and_then(|i| row.get(i)).and_then(cell_to_string);
        ImportRow {
            code: value(self.code),
            gis_id: value(self.gis_id),
            number: value(self.number),
            topic: value(self.topic),
            appeal_text: value(self.appeal_text),
            response_text: value(self.response_text),
            address: value(self.address),
        }
    }
}

fn matches_alias(name: &str, aliases: &[&str]) -> bool {
    let name = name.to_lowercase();
    aliases.iter().any(|alias| alias.to_lowercase() == name)
}

/// Non-empty trimmed string form of a cell.
///
/// Numeric ids come out of Excel as floats; Display on f64 already drops a
/// whole-number fraction, so 12345.0 becomes "12345".
fn cell_to_string(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Empty | Data::Error(_) => String::new(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Rows without an external id still need a stable-enough key for upsert.
fn synthesize_gis_id() -> String {
    format!(
        "gen-{}-{}",
        Utc::now().timestamp_millis(),
        rand::thread_rng().gen_range(1000..10000)
    )
}
