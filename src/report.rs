//! Cashflow spreadsheet export.
//!
//! Transactions are grouped into one sheet per period, newest period first.
//! Monthly buckets are labeled with Indonesian month names ("Januari 2024");
//! the sort key is reconstructed from that label.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::entities::{tipe_transaksi, transaksi};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const HEADERS: [&str; 6] = [
    "No",
    "Nama Transaksi",
    "Deskripsi",
    "Tipe",
    "Jumlah",
    "Tanggal",
];

const BULAN_INDO: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Monthly,
    Yearly,
}

impl GroupBy {
    /// Parse the `group_by` query parameter; anything other than "yearly"
    /// falls back to the monthly default.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("yearly") => GroupBy::Yearly,
            _ => GroupBy::Monthly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Monthly => "monthly",
            GroupBy::Yearly => "yearly",
        }
    }
}

/// Period label a transaction date falls into.
fn bucket_key(tanggal: NaiveDate, group_by: GroupBy) -> String {
    match group_by {
        GroupBy::Yearly => tanggal.year().to_string(),
        GroupBy::Monthly => format!(
            "{} {}",
            BULAN_INDO[tanggal.month0() as usize],
            tanggal.year()
        ),
    }
}

/// Comparable value for a period label, used to order sheets newest-first.
/// Unparsable labels sort last.
fn bucket_rank(key: &str, group_by: GroupBy) -> i64 {
    match group_by {
        GroupBy::Yearly => key.parse::<i64>().unwrap_or(0),
        GroupBy::Monthly => {
            let mut parts = key.split(' ');
            let month = parts
                .next()
                .and_then(|name| BULAN_INDO.iter().position(|bulan| *bulan == name))
                .map(|idx| idx as i64 + 1)
                .unwrap_or(1);
            let year = parts.next().and_then(|y| y.parse::<i64>().ok()).unwrap_or(0);
            year * 12 + month
        }
    }
}

/// Sheet names may be at most 31 characters and must not contain
/// `: \ / ? * [ ]`.
fn sanitize_sheet_title(title: &str) -> String {
    title
        .chars()
        .take(31)
        .filter(|c| !matches!(c, ':' | '\\' | '/' | '?' | '*' | '[' | ']'))
        .collect()
}

type TransaksiRow = (transaksi::Model, Option<tipe_transaksi::Model>);

/// Group rows into ordered period buckets, newest first. Rows are expected
/// to already be sorted by descending date; insertion order is preserved
/// within a bucket.
fn bucketize(rows: &[TransaksiRow], group_by: GroupBy) -> Vec<(String, Vec<&TransaksiRow>)> {
    let mut buckets: Vec<(String, Vec<&TransaksiRow>)> = Vec::new();
    for row in rows {
        let key = bucket_key(row.0.tanggal, group_by);
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, items)) => items.push(row),
            None => buckets.push((key, vec![row])),
        }
    }
    buckets.sort_by_key(|(key, _)| std::cmp::Reverse(bucket_rank(key, group_by)));
    buckets
}

/// Display cells for one data row of a sheet.
struct ReportRow {
    no: usize,
    nama: String,
    deskripsi: String,
    tipe: String,
    jumlah: f64,
    jumlah_text: String,
    tanggal: String,
}

/// Build the display cells for one bucket. `no` restarts at 1 per sheet and
/// a missing type renders as "-". Each sheet holds one header row plus one
/// row per transaction in the bucket.
fn report_rows(items: &[&TransaksiRow]) -> Vec<ReportRow> {
    items
        .iter()
        .enumerate()
        .map(|(idx, row)| ReportRow {
            no: idx + 1,
            nama: row.0.nama.clone(),
            deskripsi: row.0.deskripsi.clone(),
            tipe: row
                .1
                .as_ref()
                .map(|t| t.nama.clone())
                .unwrap_or_else(|| "-".to_string()),
            // Display only; the stored amount stays an exact decimal.
            jumlah: row.0.jumlah.to_f64().unwrap_or_default(),
            jumlah_text: row.0.jumlah.to_string(),
            tanggal: row.0.tanggal.to_string(),
        })
        .collect()
}

/// Build the cashflow workbook: one sheet per period bucket, bold header
/// row, 1-indexed rows, auto-sized columns. An empty data set still yields
/// one sheet ("No Data") because the format requires at least one.
pub fn build_cashflow_workbook(
    rows: &[TransaksiRow],
    group_by: GroupBy,
) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let buckets = bucketize(rows, group_by);
    if buckets.is_empty() {
        workbook.add_worksheet().set_name("No Data")?;
        return Ok(workbook);
    }

    for (key, items) in buckets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sanitize_sheet_title(&key))?;

        let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.len()).collect();
        let mut track = |col: usize, value: &str| {
            if value.len() > widths[col] {
                widths[col] = value.len();
            }
        };

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
        }

        for (idx, cells) in report_rows(&items).iter().enumerate() {
            let row = idx as u32 + 1;

            worksheet.write_number(row, 0, cells.no as f64)?;
            worksheet.write_string(row, 1, &cells.nama)?;
            worksheet.write_string(row, 2, &cells.deskripsi)?;
            worksheet.write_string(row, 3, &cells.tipe)?;
            worksheet.write_number(row, 4, cells.jumlah)?;
            worksheet.write_string(row, 5, &cells.tanggal)?;

            track(0, &cells.no.to_string());
            track(1, &cells.nama);
            track(2, &cells.deskripsi);
            track(3, &cells.tipe);
            track(4, &cells.jumlah_text);
            track(5, &cells.tanggal);
        }

        for (col, width) in widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, (width + 2) as f64)?;
        }
    }

    Ok(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn row(id: i32, tanggal: NaiveDate, tipe_nama: Option<&str>) -> TransaksiRow {
        let now = Utc::now().fixed_offset();
        (
            transaksi::Model {
                id,
                nama: format!("Transaksi {id}"),
                tipe_transaksi_id: 1,
                deskripsi: "test".into(),
                jumlah: Decimal::new(150_000_00, 2),
                tanggal,
                created_at: now,
                updated_at: now,
            },
            tipe_nama.map(|nama| tipe_transaksi::Model {
                id: 1,
                nama: nama.into(),
                created_at: now,
                updated_at: now,
            }),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn group_by_param_defaults_to_monthly() {
        assert_eq!(GroupBy::from_param(None), GroupBy::Monthly);
        assert_eq!(GroupBy::from_param(Some("weekly")), GroupBy::Monthly);
        assert_eq!(GroupBy::from_param(Some("yearly")), GroupBy::Yearly);
    }

    #[test]
    fn monthly_bucket_uses_indonesian_label() {
        assert_eq!(
            bucket_key(date(2024, 1, 15), GroupBy::Monthly),
            "Januari 2024"
        );
        assert_eq!(
            bucket_key(date(2024, 12, 1), GroupBy::Monthly),
            "Desember 2024"
        );
        assert_eq!(bucket_key(date(2024, 3, 1), GroupBy::Yearly), "2024");
    }

    #[test]
    fn buckets_are_ordered_newest_first() {
        let rows = vec![
            row(1, date(2024, 3, 10), Some("Pemasukan")),
            row(2, date(2024, 1, 5), Some("Pengeluaran")),
            row(3, date(2024, 3, 1), Some("Pemasukan")),
        ];
        let buckets = bucketize(&rows, GroupBy::Monthly);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].0, "Maret 2024");
        assert_eq!(buckets[0].1.len(), 2);
        assert_eq!(buckets[1].0, "Januari 2024");
        assert_eq!(buckets[1].1.len(), 1);
    }

    #[test]
    fn yearly_buckets_sort_descending() {
        let rows = vec![
            row(1, date(2023, 6, 1), None),
            row(2, date(2025, 2, 1), None),
            row(3, date(2024, 9, 1), None),
        ];
        let buckets = bucketize(&rows, GroupBy::Yearly);
        let keys: Vec<&str> = buckets.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["2025", "2024", "2023"]);
    }

    #[test]
    fn monthly_order_spans_year_boundary() {
        let rows = vec![
            row(1, date(2023, 12, 31), None),
            row(2, date(2024, 1, 1), None),
        ];
        let buckets = bucketize(&rows, GroupBy::Monthly);
        assert_eq!(buckets[0].0, "Januari 2024");
        assert_eq!(buckets[1].0, "Desember 2023");
    }

    #[test]
    fn sheet_titles_are_sanitized() {
        assert_eq!(sanitize_sheet_title("Januari 2024"), "Januari 2024");
        assert_eq!(sanitize_sheet_title("a:b\\c/d?e*f[g]h"), "abcdefgh");
        assert_eq!(
            sanitize_sheet_title("0123456789012345678901234567890123456789").len(),
            31
        );
    }

    #[test]
    fn sheets_hold_one_row_per_transaction_plus_header() {
        let rows = vec![
            row(1, date(2024, 3, 10), Some("Pemasukan")),
            row(2, date(2024, 1, 5), Some("Pengeluaran")),
            row(3, date(2024, 3, 1), None),
        ];
        let buckets = bucketize(&rows, GroupBy::Monthly);

        let maret = report_rows(&buckets[0].1);
        assert_eq!(maret.len(), buckets[0].1.len());
        assert_eq!(maret.len() + 1, 3); // header row plus two transactions
        assert_eq!(maret[0].no, 1);
        assert_eq!(maret[1].no, 2);
        assert_eq!(maret[0].tipe, "Pemasukan");
        assert_eq!(maret[1].tipe, "-");

        let januari = report_rows(&buckets[1].1);
        assert_eq!(januari.len() + 1, 2); // header row plus one transaction
        assert_eq!(januari[0].no, 1);
        assert_eq!(januari[0].nama, "Transaksi 2");
        assert_eq!(januari[0].tanggal, "2024-01-05");
    }

    #[test]
    fn workbook_builds_for_grouped_rows() {
        let rows = vec![
            row(1, date(2024, 3, 10), Some("Pemasukan")),
            row(2, date(2024, 1, 5), Some("Pengeluaran")),
            row(3, date(2024, 3, 1), None),
        ];
        let mut workbook = build_cashflow_workbook(&rows, GroupBy::Monthly).unwrap();
        let buffer = workbook.save_to_buffer().unwrap();
        assert!(!buffer.is_empty());
    }

    #[test]
    fn empty_data_emits_no_data_sheet() {
        let mut workbook = build_cashflow_workbook(&[], GroupBy::Monthly).unwrap();
        // A workbook with zero sheets would fail to save at all.
        let buffer = workbook.save_to_buffer().unwrap();
        assert!(!buffer.is_empty());
    }
}
