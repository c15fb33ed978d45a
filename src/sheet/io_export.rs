// Writers for the exported files.

use serde_json::{json, Value as JSValue};
use std::path::Path;

use crate::sheet::{io_common::strip_bom, *};

const BOM: &[u8] = "\u{feff}".as_bytes();

/// Formats rows as CSV, the way spreadsheet programs expect it: a byte-order mark, every
/// field quoted, CRLF line endings.
pub fn csv_bytes(rows: &[Vec<String>], path: &str) -> TranksResult<Vec<u8>> {
    let mut buffer: Vec<u8> = BOM.to_vec();
    {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::CRLF)
            .from_writer(&mut buffer);
        for row in rows.iter() {
            wtr.write_record(row).context(CsvWriteSnafu { path })?;
        }
        wtr.flush().context(IoSnafu { path })?;
    }
    debug!("csv_bytes: {:?}: {} bytes", path, buffer.len());
    Ok(buffer)
}

/// The text of an exported CSV file, without its byte-order mark.
pub fn csv_text(bytes: &[u8]) -> String {
    strip_bom(&String::from_utf8_lossy(bytes)).to_string()
}

pub fn write_bytes(path: &Path, bytes: &[u8]) -> TranksResult<()> {
    info!("Writing {:?}", path);
    fs::write(path, bytes).context(IoSnafu {
        path: path.display().to_string(),
    })
}

fn text_box_to_json(tb: &TextBox) -> JSValue {
    json!({
        "text": tb.text,
        "x": tb.x,
        "y": tb.y,
        "w": tb.w,
        "h": tb.h,
        "fontSize": tb.font_size,
    })
}

pub fn slides_to_json(slides: &[Slide], contest: &str) -> JSValue {
    let slides_js: Vec<JSValue> = slides
        .iter()
        .map(|s| {
            json!({
                "title": text_box_to_json(&s.title),
                "lines": s.lines.iter().map(text_box_to_json).collect::<Vec<JSValue>>(),
            })
        })
        .collect();
    json!({
        "contest": contest,
        "slides": slides_js,
    })
}
