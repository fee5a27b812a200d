//! CSV loading and column addressing for the CLI.

use std::io::Read;
use std::path::Path;

use tallygrid_engine::{CellValue, TableRegion};

/// Load a CSV file into a table region. Row 0 is the header.
pub fn load_region(path: &Path, delimiter: char) -> Result<TableRegion, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    region_from_str(&content, delimiter)
}

/// Load a region from stdin.
pub fn load_region_stdin(delimiter: char) -> Result<TableRegion, String> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| format!("cannot read stdin: {e}"))?;
    region_from_str(&content, delimiter)
}

pub fn region_from_str(content: &str, delimiter: char) -> Result<TableRegion, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| format!("CSV parse error: {e}"))?;
        rows.push(record.iter().map(CellValue::from_input).collect());
    }
    Ok(TableRegion::new(rows))
}

/// Write rows back out as CSV.
pub fn write_rows<W: std::io::Write>(
    out: W,
    rows: &[Vec<CellValue>],
) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        if row.is_empty() {
            continue;
        }
        let fields: Vec<String> = row.iter().map(CellValue::canonical_string).collect();
        writer
            .write_record(&fields)
            .map_err(|e| format!("CSV write error: {e}"))?;
    }
    writer.flush().map_err(|e| format!("CSV write error: {e}"))
}

/// Resolve a column given either a 0-based index or a header name
/// (case-insensitive).
pub fn resolve_column(region: &TableRegion, spec: &str) -> Result<usize, String> {
    if let Ok(index) = spec.parse::<usize>() {
        return Ok(index);
    }
    for col in 0..region.column_count() {
        if region.header_text(col).eq_ignore_ascii_case(spec) {
            return Ok(col);
        }
    }
    Err(format!("no column named '{spec}'"))
}

/// Parse a `COLUMN=V1,V2,...` keep-list.
pub fn parse_keep_spec(spec: &str) -> Result<(String, Vec<String>), String> {
    let (column, values) = spec
        .split_once('=')
        .ok_or_else(|| format!("bad keep spec '{spec}', expected COLUMN=V1,V2"))?;
    if column.trim().is_empty() {
        return Err(format!("bad keep spec '{spec}', empty column"));
    }
    let values = values.split(',').map(str::to_string).collect();
    Ok((column.trim().to_string(), values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_become_typed_cells() {
        let region = region_from_str("id,amt\n1,¥100\n2,\n", ',').unwrap();
        assert_eq!(region.data_row_count(), 2);
        assert_eq!(region.cell(1, 0), Some(&CellValue::Number(1.0)));
        assert_eq!(region.cell(1, 1), Some(&CellValue::Text("¥100".into())));
        assert_eq!(region.cell(2, 1), Some(&CellValue::Empty));
    }

    #[test]
    fn ragged_csv_is_normalized() {
        let region = region_from_str("a,b,c\nx\n", ',').unwrap();
        assert_eq!(region.column_count(), 3);
        assert_eq!(region.cell(1, 2), Some(&CellValue::Empty));
    }

    #[test]
    fn columns_resolve_by_index_or_header() {
        let region = region_from_str("id,Amount\n1,2\n", ',').unwrap();
        assert_eq!(resolve_column(&region, "1").unwrap(), 1);
        assert_eq!(resolve_column(&region, "amount").unwrap(), 1);
        assert!(resolve_column(&region, "missing").is_err());
    }

    #[test]
    fn keep_specs_parse() {
        let (col, values) = parse_keep_spec("Region=East,West").unwrap();
        assert_eq!(col, "Region");
        assert_eq!(values, vec!["East", "West"]);
        assert!(parse_keep_spec("no-equals").is_err());
        assert!(parse_keep_spec("=x").is_err());
    }
}
