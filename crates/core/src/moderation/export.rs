//! CSV export of the item collection.
//!
//! The writer never quotes. Values containing commas, quotes or newlines
//! are written as-is and will shift columns in the output; this is a known
//! defect of the export format kept for compatibility.

use std::io;

use chrono::{NaiveDate, SecondsFormat};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::item::Item;

pub const CSV_HEADER: [&str; 9] = [
    "ID",
    "Name",
    "Type",
    "Category",
    "Status",
    "Location",
    "Description",
    "Email",
    "Date",
];

/// Header plus one row per item, rows separated by `\n` with no trailing
/// newline.
pub fn items_to_csv(items: &[Item]) -> csv::Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for item in items {
        let date = item.date.to_rfc3339_opts(SecondsFormat::Millis, true);
        writer.write_record([
            item.id.as_str(),
            item.name.as_str(),
            item.kind.as_str(),
            item.category.as_str(),
            item.status.as_str(),
            item.location.as_str(),
            item.description.as_str(),
            item.contact_email.as_str(),
            date.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    let mut out = String::from_utf8(bytes)
        .map_err(|err| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, err)))?;
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

pub fn export_filename(today: NaiveDate) -> String {
    format!("lost-found-items-{}.csv", today.format("%Y-%m-%d"))
}
