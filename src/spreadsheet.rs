//! xlsx output for a finished export.
//!
//! One worksheet, one row per release, sorted by artist and then by
//! instance id. Detail and price columns stay empty for records that were
//! not enriched.

use std::path::Path;

use chrono::Utc;
use rust_xlsxwriter::{Color, DocProperties, Format, FormatAlign, Url, Workbook, Worksheet, XlsxError};

use crate::{
    discogs::ProgressReporter,
    types::{CanonicalRecord, CatalogExport, CatalogKind},
};

pub const COLUMNS: [&str; 18] = [
    "Band",
    "Year",
    "Album",
    "Cat Number",
    "Format",
    "Format Quantity",
    "Styles",
    "Have",
    "Want",
    "Notes",
    "For Sale",
    "Lowest Price",
    "Mint (M)",
    "Near Mint (NM or M-)",
    "Very Good Plus (VG+)",
    "Very Good (VG)",
    "Good Plus (G+)",
    "Good (G)",
];

/// Grade keys of the price columns, starting at column 12.
pub const GRADE_COLUMNS: [&str; 6] = [
    "mint",
    "near_mint",
    "very_good_plus",
    "very_good",
    "good_plus",
    "good",
];

const ROW_HEIGHT: f64 = 25.0;
const PRICE_COLUMN: u16 = 12;
// Excel rejects longer cell strings
const MAX_CELL_CHARS: usize = 32_767;

struct Formats {
    header: Format,
    default: Format,
    link: Format,
    note: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            default: Format::new()
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter),
            link: Format::new()
                .set_font_color(Color::Blue)
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter),
            note: Format::new()
                .set_text_wrap()
                .set_align(FormatAlign::Justify)
                .set_align(FormatAlign::VerticalCenter),
        }
    }
}

fn workbook_title(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::Collection => "Discogs Collection",
        CatalogKind::Wantlist => "Discogs Wantlist",
    }
}

/// Writes `export` to an xlsx file at `path`, replacing an existing file.
///
/// Returns the number of data rows written.
pub fn write_catalog(
    export: &CatalogExport,
    path: impl AsRef<Path>,
    progress: &mut dyn ProgressReporter,
) -> Result<u32, XlsxError> {
    let mut workbook = Workbook::new();

    let properties = DocProperties::new()
        .set_title(workbook_title(export.kind))
        .set_subject(format!("{} {}", export.username, export.kind.label()))
        .set_comment(format!(
            "Exported by {} {} on {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));
    workbook.set_properties(&properties);

    let formats = Formats::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(export.kind.label())?;

    worksheet.set_row_height(0, ROW_HEIGHT)?;
    for (col, title) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &formats.header)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    progress.start("Writing", export.aggregate.count_artists() as u64);

    let mut row: u32 = 1;
    for (artist, releases) in export.aggregate.artists() {
        for record in releases.values() {
            write_record(worksheet, &formats, row, artist, record)?;
            row += 1;
        }
        progress.advance();
    }

    progress.finish();
    workbook.save(path)?;

    Ok(row - 1)
}

fn write_record(
    worksheet: &mut Worksheet,
    formats: &Formats,
    row: u32,
    artist: &str,
    record: &CanonicalRecord,
) -> Result<(), XlsxError> {
    worksheet.set_row_height(row, ROW_HEIGHT)?;

    worksheet.write_string_with_format(row, 0, artist, &formats.default)?;
    worksheet.write_number_with_format(row, 1, record.year, &formats.default)?;
    worksheet.write_string_with_format(row, 3, &record.catno, &formats.default)?;
    worksheet.write_string_with_format(row, 4, &record.format, &formats.default)?;
    worksheet.write_string_with_format(row, 5, &record.quantity, &formats.default)?;
    worksheet.write_string_with_format(row, 6, &record.styles, &formats.default)?;

    match record.uri.as_deref().filter(|u| !u.is_empty()) {
        Some(uri) => {
            let link = Url::new(uri).set_text(&record.album);
            worksheet.write_url_with_format(row, 2, link, &formats.link)?;
        }
        None => {
            worksheet.write_string_with_format(row, 2, &record.album, &formats.default)?;
        }
    }

    if record.has_details() {
        if let Some(have) = record.have {
            worksheet.write_number_with_format(row, 7, have as f64, &formats.default)?;
        }
        if let Some(want) = record.want {
            worksheet.write_number_with_format(row, 8, want as f64, &formats.default)?;
        }
        if let Some(notes) = &record.notes {
            worksheet.write_string_with_format(row, 9, cell_text(notes), &formats.note)?;
        }
        if let Some(for_sale) = record.num_for_sale {
            worksheet.write_number_with_format(row, 10, for_sale as f64, &formats.default)?;
        }
        if let Some(lowest) = &record.lowest_price {
            worksheet.write_string_with_format(row, 11, lowest, &formats.default)?;
        }
    }

    if let Some(prices) = &record.prices {
        for (offset, grade) in GRADE_COLUMNS.iter().enumerate() {
            if let Some(price) = prices.get(*grade) {
                let col = PRICE_COLUMN + offset as u16;
                worksheet.write_string_with_format(row, col, price, &formats.default)?;
            }
        }
    }

    Ok(())
}

fn cell_text(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
