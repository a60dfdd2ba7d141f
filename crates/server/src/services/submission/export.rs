use chrono::{DateTime, NaiveDate, Utc};
use database::UserRecord;
use utils::{AppError, AppResult};

/// 导出文件的表头，顺序固定
pub const EXPORT_HEADERS: [&str; 6] = ["Position", "Email", "Referral Code", "Referrals", "Link Visits", "Joined"];

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// 待下载的导出文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// `submissions-YYYY-MM-DD.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("submissions-{}.csv", date.format("%Y-%m-%d"))
}

/// 加入日期，只保留日历日（MM/DD/YYYY，UTC）
pub fn format_joined(created_at: &DateTime<Utc>) -> String {
    created_at.format("%m/%d/%Y").to_string()
}

/// 把整份记录编码成 CSV
///
/// 含逗号、引号或换行的字段会被加引号转义
pub fn encode_csv(records: &[UserRecord]) -> AppResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS).map_err(csv_error)?;

    for record in records {
        writer
            .write_record([
                record.position.to_string(),
                record.email.clone(),
                record.referral_code.clone(),
                record.referral_count.to_string(),
                record.link_visits.to_string(),
                format_joined(&record.created_at),
            ])
            .map_err(csv_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::InternalServerError(format!("Failed to flush export: {}", e)))
}

pub fn export_records(records: &[UserRecord], today: NaiveDate) -> AppResult<ExportFile> {
    Ok(ExportFile {
        filename: export_filename(today),
        content_type: CSV_CONTENT_TYPE,
        bytes: encode_csv(records)?,
    })
}

fn csv_error(err: csv::Error) -> AppError {
    AppError::InternalServerError(format!("Failed to encode export: {}", err))
}
