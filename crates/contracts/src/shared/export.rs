/// CSV rendering for the "Excel" export button
///
/// The browser side only wraps the produced text in a Blob and downloads it.

/// Types that can be exported as one spreadsheet row per record.
pub trait ExcelExportable {
    /// Human-readable column headers.
    fn headers() -> Vec<&'static str>;

    /// Cell values, in the same order as `headers`.
    fn to_csv_row(&self) -> Vec<String>;
}

/// Renders `;`-separated CSV with a UTF-8 BOM so spreadsheet apps pick the right encoding.
pub fn render_csv<T: ExcelExportable>(data: &[T]) -> Result<String, String> {
    if data.is_empty() {
        return Err("No hay datos para exportar".to_string());
    }

    let mut csv_content = String::new();
    csv_content.push('\u{FEFF}');

    csv_content.push_str(&T::headers().join(";"));
    csv_content.push('\n');

    for item in data {
        let escaped_row: Vec<String> = item
            .to_csv_row()
            .iter()
            .map(|cell| escape_csv_cell(cell))
            .collect();
        csv_content.push_str(&escaped_row.join(";"));
        csv_content.push('\n');
    }

    Ok(csv_content)
}

/// Quotes a cell containing the separator, quotes or line breaks.
fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(';') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// `"<prefix>_YYYY-MM-DD.csv"`
pub fn export_filename(prefix: &str, date: chrono::NaiveDate) -> String {
    format!("{}_{}.csv", prefix, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl ExcelExportable for Row {
        fn headers() -> Vec<&'static str> {
            vec!["Nombre", "Motivo"]
        }

        fn to_csv_row(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn test_render_csv_escapes_cells() {
        let csv = render_csv(&[Row("Hotel \"Sol\"", "cierre; obras"), Row("Posada", "ok")]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("\u{FEFF}Nombre;Motivo"));
        assert_eq!(lines.next(), Some("\"Hotel \"\"Sol\"\"\";\"cierre; obras\""));
        assert_eq!(lines.next(), Some("Posada;ok"));
    }

    #[test]
    fn test_render_csv_rejects_empty() {
        assert!(render_csv::<Row>(&[]).is_err());
    }

    #[test]
    fn test_export_filename() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(export_filename("hoteles", date), "hoteles_2024-03-05.csv");
    }
}
