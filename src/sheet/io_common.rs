use std::path::Path;

pub fn simplify_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|f| f.to_str())
        .map(|f| f.to_string())
        .unwrap_or_else(|| path.display().to_string())
}

const BOM: char = '\u{feff}';

pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(BOM).unwrap_or(s)
}

/// Drops the byte-order mark and turns CRLF line endings into LF.
pub fn normalize_text(s: &str) -> String {
    strip_bom(s).replace("\r\n", "\n")
}

/// Lays out rows as left-aligned columns, one line per row.
pub fn format_table(rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = vec![];
    for row in rows.iter() {
        for (idx, cell) in row.iter().enumerate() {
            let w = cell.chars().count();
            match widths.get_mut(idx) {
                Some(cur) if *cur < w => *cur = w,
                Some(_) => {}
                None => widths.push(w),
            }
        }
    }
    let mut res = String::new();
    for row in rows.iter() {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(idx, cell)| format!("{:<width$}", cell, width = widths[idx]))
            .collect();
        res.push_str(line.join("  ").trim_end());
        res.push('\n');
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_layout() {
        let rows = vec![
            vec!["Team number".to_string(), "Team name".to_string(), "E".to_string()],
            vec!["7".to_string(), "Owls".to_string(), "12".to_string()],
        ];
        assert_eq!(
            format_table(&rows),
            "Team number  Team name  E\n7            Owls       12\n"
        );
    }

    #[test]
    fn text_normalization() {
        assert_eq!(normalize_text("\u{feff}a\r\nb\n"), "a\nb\n");
        assert_eq!(strip_bom("plain"), "plain");
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name(Path::new("/tmp/x/scores.csv")), "scores.csv");
    }
}
