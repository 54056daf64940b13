use chrono::Utc;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use rust_xlsxwriter::{Format, Workbook};

use crate::app_state::AppState;
use crate::repositories::AuditStore;
use crate::services::log_query_service::LogQueryService;
use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::dtos::log_dto::{ExportFormat, LogFilter, LogKind};
use counseldesk_primitives::utility::format_status;

/// A fully materialized export: header row plus stringified data rows. The
/// same table feeds every output format.
#[derive(Debug)]
pub struct ExportTable {
    pub title: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// Renders filtered log listings as downloadable documents. Exports are
/// unpaginated: the full filtered set goes into the file.
pub struct ExportService;

impl ExportService {
    pub fn export(
        state: &AppState,
        kind: LogKind,
        format: ExportFormat,
        filter: &LogFilter,
    ) -> Result<(Vec<u8>, String, &'static str), ApiError> {
        let table = Self::build_table(state, kind, format, filter)?;
        let bytes = match format {
            ExportFormat::Csv => Self::to_csv(&table)?,
            ExportFormat::Xlsx => Self::to_xlsx(&table)?,
            ExportFormat::Pdf => Self::to_pdf(&table)?,
        };
        Ok((bytes, Self::filename(kind, format), Self::content_type(format)))
    }

    /// Collects the filtered rows for one log kind. The paginated document
    /// format drops the free-text Details column; the tabular formats keep
    /// every column.
    pub fn build_table(
        state: &AppState,
        kind: LogKind,
        format: ExportFormat,
        filter: &LogFilter,
    ) -> Result<ExportTable, ApiError> {
        let mut conn = state.conn()?;
        let table = match kind {
            LogKind::All => {
                let rows = LogQueryService::audit_rows(AuditStore::audit_all(&mut conn, filter)?);
                ExportTable {
                    title: "Audit Logs".to_string(),
                    columns: Self::columns(kind, format),
                    rows: rows
                        .into_iter()
                        .map(|r| {
                            vec![
                                r.id.to_string(),
                                r.user_name,
                                r.user_role.unwrap_or_default(),
                                r.action,
                                r.target_type.unwrap_or_default(),
                                format_status(r.is_success).to_string(),
                                r.timestamp,
                                r.ip_address.unwrap_or_default(),
                            ]
                        })
                        .collect(),
                }
            }
            LogKind::Student => {
                let rows =
                    LogQueryService::student_rows(AuditStore::student_all(&mut conn, filter)?);
                ExportTable {
                    title: "Student Activity Logs".to_string(),
                    columns: Self::columns(kind, format),
                    rows: rows
                        .into_iter()
                        .map(|r| {
                            vec![
                                r.id.to_string(),
                                r.student_name,
                                r.student_email,
                                r.action,
                                r.related_type.unwrap_or_default(),
                                format_status(r.is_success).to_string(),
                                r.timestamp,
                                r.ip_address.unwrap_or_default(),
                            ]
                        })
                        .collect(),
                }
            }
            LogKind::Office => {
                let rows = LogQueryService::office_rows(AuditStore::office_all(&mut conn, filter)?);
                ExportTable {
                    title: "Office Login Logs".to_string(),
                    columns: Self::columns(kind, format),
                    rows: rows
                        .into_iter()
                        .map(|r| {
                            vec![
                                r.id.to_string(),
                                r.admin_name,
                                r.admin_email,
                                r.office_name,
                                r.login_time,
                                r.logout_time.unwrap_or_default(),
                                r.session_duration
                                    .map(|d| d.to_string())
                                    .unwrap_or_default(),
                                format_status(r.is_success).to_string(),
                                r.ip_address.unwrap_or_default(),
                            ]
                        })
                        .collect(),
                }
            }
            LogKind::Superadmin => {
                let include_details = format != ExportFormat::Pdf;
                let rows = LogQueryService::super_admin_rows(AuditStore::super_admin_all(
                    &mut conn, filter,
                )?);
                ExportTable {
                    title: "Super Admin Activity Logs".to_string(),
                    columns: Self::columns(kind, format),
                    rows: rows
                        .into_iter()
                        .map(|r| {
                            let mut row = vec![
                                r.id.to_string(),
                                r.admin_name,
                                r.admin_email.unwrap_or_default(),
                                r.action,
                                r.target_type.unwrap_or_default(),
                            ];
                            if include_details {
                                row.push(r.details.unwrap_or_default());
                            }
                            row.extend([
                                format_status(r.is_success).to_string(),
                                r.timestamp,
                                r.ip_address.unwrap_or_default(),
                            ]);
                            row
                        })
                        .collect(),
                }
            }
        };
        Ok(table)
    }

    /// Fixed header schema per log kind. These names are part of the export
    /// contract; downstream tooling parses them.
    pub fn columns(kind: LogKind, format: ExportFormat) -> Vec<&'static str> {
        match kind {
            LogKind::All => vec![
                "ID",
                "User",
                "Role",
                "Action",
                "Target Type",
                "Status",
                "Timestamp",
                "IP Address",
            ],
            LogKind::Student => vec![
                "ID",
                "Student Name",
                "Email",
                "Action",
                "Related Type",
                "Status",
                "Timestamp",
                "IP Address",
            ],
            LogKind::Office => vec![
                "ID",
                "Admin Name",
                "Email",
                "Office",
                "Login Time",
                "Logout Time",
                "Duration (sec)",
                "Status",
                "IP Address",
            ],
            LogKind::Superadmin => {
                let mut columns = vec!["ID", "Admin Name", "Email", "Action", "Target Type"];
                if format != ExportFormat::Pdf {
                    columns.push("Details");
                }
                columns.extend(["Status", "Timestamp", "IP Address"]);
                columns
            }
        }
    }

    pub fn to_csv(table: &ExportTable) -> Result<Vec<u8>, ApiError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(&table.columns)
            .map_err(|e| ApiError::Internal(format!("CSV write failed: {e}")))?;
        for row in &table.rows {
            writer
                .write_record(row)
                .map_err(|e| ApiError::Internal(format!("CSV write failed: {e}")))?;
        }
        writer
            .into_inner()
            .map_err(|e| ApiError::Internal(format!("CSV finalize failed: {e}")))
    }

    pub fn to_xlsx(table: &ExportTable) -> Result<Vec<u8>, ApiError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let header = Format::new().set_bold();

        for (col, name) in table.columns.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *name, &header)
                .map_err(|e| ApiError::Internal(format!("XLSX write failed: {e}")))?;
        }
        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                worksheet
                    .write_string(row_idx as u32 + 1, col as u16, cell)
                    .map_err(|e| ApiError::Internal(format!("XLSX write failed: {e}")))?;
            }
        }

        workbook
            .save_to_buffer()
            .map_err(|e| ApiError::Internal(format!("XLSX finalize failed: {e}")))
    }

    /// Landscape A4 with evenly divided columns and the builtin Helvetica
    /// faces, so no font assets ship with the binary. Long cells are
    /// truncated to the column width; the header repeats on every page.
    pub fn to_pdf(table: &ExportTable) -> Result<Vec<u8>, ApiError> {
        const PAGE_WIDTH: f64 = 297.0;
        const PAGE_HEIGHT: f64 = 210.0;
        const MARGIN: f64 = 12.0;
        const ROW_HEIGHT: f64 = 6.0;

        let (doc, page, layer) =
            PdfDocument::new(&table.title, Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "table");
        let body_font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ApiError::Internal(format!("PDF font failed: {e}")))?;
        let header_font = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ApiError::Internal(format!("PDF font failed: {e}")))?;

        let column_width = (PAGE_WIDTH - 2.0 * MARGIN) / table.columns.len() as f64;
        let max_chars = (column_width / 1.7) as usize;

        let mut current = doc.get_page(page).get_layer(layer);
        let mut y = PAGE_HEIGHT - MARGIN - ROW_HEIGHT;

        current.use_text(&table.title, 14.0, Mm(MARGIN as f32), Mm(y as f32), &header_font);
        y -= 2.0 * ROW_HEIGHT;
        Self::pdf_row(&current, &header_font, &table.columns, column_width, max_chars, y);
        y -= ROW_HEIGHT;

        for row in &table.rows {
            if y < MARGIN {
                let (next_page, next_layer) =
                    doc.add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "table");
                current = doc.get_page(next_page).get_layer(next_layer);
                y = PAGE_HEIGHT - MARGIN - ROW_HEIGHT;
                Self::pdf_row(&current, &header_font, &table.columns, column_width, max_chars, y);
                y -= ROW_HEIGHT;
            }
            Self::pdf_row(&current, &body_font, row, column_width, max_chars, y);
            y -= ROW_HEIGHT;
        }

        drop(current);
        doc.save_to_bytes()
            .map_err(|e| ApiError::Internal(format!("PDF finalize failed: {e}")))
    }

    fn pdf_row<S: AsRef<str>>(
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        cells: &[S],
        column_width: f64,
        max_chars: usize,
        y: f64,
    ) {
        const MARGIN: f64 = 12.0;
        for (idx, cell) in cells.iter().enumerate() {
            let text: String = cell.as_ref().chars().take(max_chars).collect();
            let x = MARGIN + idx as f64 * column_width;
            layer.use_text(text, 8.0, Mm(x as f32), Mm(y as f32), font);
        }
    }

    pub fn filename(kind: LogKind, format: ExportFormat) -> String {
        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let ext = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        };
        format!("{}_logs_{}.{}", kind.as_str(), stamp, ext)
    }

    pub fn content_type(format: ExportFormat) -> &'static str {
        match format {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }
}
