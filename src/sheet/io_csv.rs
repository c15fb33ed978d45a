// Primitives for reading CSV files.

use crate::sheet::{io_common::strip_bom, *};

/// Reads every line of a CSV file as a row of strings, header included.
///
/// Blank lines are skipped. Rows of different lengths are passed through so that the
/// importer can report them.
pub fn read_csv_grid(path: &str) -> TranksResult<Vec<Vec<String>>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let mut res: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        let row: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        debug!("read_csv_grid: lineno: {:?} row: {:?}", lineno, row);
        res.push(row);
    }

    // Files saved by spreadsheet programs often start with a byte-order mark.
    if let Some(first) = res.first_mut().and_then(|r| r.first_mut()) {
        *first = strip_bom(first).to_string();
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_tmp(name: &str, contents: &str) -> String {
        let p = std::env::temp_dir().join(format!("tranks-csv-{}-{}", std::process::id(), name));
        fs::write(&p, contents).unwrap();
        p.display().to_string()
    }

    #[test]
    fn reads_quoted_fields_and_skips_blank_lines() {
        let p = write_tmp(
            "quoted.csv",
            "\u{feff}Team number,Team name,\"Robot Tour, Div B\"\n\n12,\"Owls, Jr.\",31\n",
        );
        let grid = read_csv_grid(&p).unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0], vec!["Team number", "Team name", "Robot Tour, Div B"]);
        assert_eq!(grid[1], vec!["12", "Owls, Jr.", "31"]);
    }

    #[test]
    fn keeps_ragged_rows() {
        let p = write_tmp("ragged.csv", "a,b,c\n1,2\n");
        let grid = read_csv_grid(&p).unwrap();
        assert_eq!(grid[1], vec!["1", "2"]);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_csv_grid("/nonexistent/tranks/scores.csv"),
            Err(TranksError::CsvOpen { .. })
        ));
    }
}
