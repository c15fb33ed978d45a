use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::sheet::*;

fn get_range(path: &str, worksheet: Option<&str>) -> TranksResult<calamine::Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    match worksheet {
        // A worksheet name was provided, use it.
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { path, name })?
            .context(OpeningExcelSnafu { path }),
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path }),
    }
}

fn read_cell(cell: &DataType, path: &str, row: usize, column: usize) -> TranksResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok("".to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Bool(b) => Ok(b.to_string()),
        x => ExcelWrongCellTypeSnafu {
            path,
            row,
            column,
            content: format!("{:?}", x),
        }
        .fail(),
    }
}

/// Reads a worksheet as a grid of strings, the header included.
///
/// Numbers are written the way a spreadsheet shows them (`12`, `3.5`). Rows where every
/// cell is empty are dropped.
pub fn read_excel_grid(path: &str, worksheet: Option<&str>) -> TranksResult<Vec<Vec<String>>> {
    let wrange = get_range(path, worksheet)?;
    // The range starts at the first used cell, not at A1.
    let col_offset = wrange.start().map(|(_, c)| c as usize).unwrap_or(0);

    let mut res: Vec<Vec<String>> = Vec::new();
    for (idx, row) in wrange.rows().enumerate() {
        if row.iter().all(|c| *c == DataType::Empty) {
            debug!("read_excel_grid: skipping empty row {:?}", idx);
            continue;
        }
        let mut cells: Vec<String> = vec!["".to_string(); col_offset];
        for (col_idx, cell) in row.iter().enumerate() {
            cells.push(read_cell(cell, path, idx, col_offset + col_idx)?);
        }
        debug!("read_excel_grid: idx: {:?} row: {:?}", idx, cells);
        res.push(cells);
    }
    Ok(res)
}
