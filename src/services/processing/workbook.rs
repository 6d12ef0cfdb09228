use super::color::FillProbe;
use super::errors::ImportError;
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;

/// An uploaded spreadsheet, decoded once and addressed by zero-based
/// (row, column) coordinates.
///
/// Values come from calamine, which reads both `.xlsx` and legacy `.xls`.
/// Fill styles come from a second pass with umya-spreadsheet, which only
/// understands `.xlsx`; when that pass fails the grid still works, cells just
/// carry no colour information.
pub struct WorkbookGrid {
    values: Range<Data>,
    styles: Option<umya_spreadsheet::Spreadsheet>,
}

impl WorkbookGrid {
    pub fn load(bytes: &[u8]) -> Result<Self, ImportError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| ImportError::InvalidWorkbook(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::InvalidWorkbook("workbook has no sheets".to_string()))?;
        let values = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::InvalidWorkbook(e.to_string()))?;

        let styles = match umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true) {
            Ok(book) => Some(book),
            Err(e) => {
                tracing::debug!("no style information available for upload: {e}");
                None
            }
        };

        Ok(WorkbookGrid { values, styles })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        values: Range<Data>,
        styles: Option<umya_spreadsheet::Spreadsheet>,
    ) -> Self {
        WorkbookGrid { values, styles }
    }

    /// Trimmed text content of a cell. Numbers are rendered the way they
    /// display in Excel, so a day header stored as `5.0` reads back as "5".
    pub fn cell_text(&self, row: u32, col: u32) -> Option<String> {
        let text = match self.values.get_value((row, col))? {
            Data::String(s) => s.trim().to_string(),
            Data::Float(f) => {
                if f.fract() == 0.0 {
                    format!("{}", *f as i64)
                } else {
                    f.to_string()
                }
            }
            Data::Int(i) => i.to_string(),
            _ => return None,
        };
        if text.is_empty() { None } else { Some(text) }
    }

    pub fn cell_number(&self, row: u32, col: u32) -> Option<f64> {
        match self.values.get_value((row, col))? {
            Data::Float(f) => Some(*f),
            Data::Int(i) => Some(*i as f64),
            Data::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Capture every fill representation of a cell in one probe. Returns an
    /// empty probe when the style pass was unavailable or the cell is
    /// unstyled.
    pub fn fill_probe(&self, row: u32, col: u32) -> FillProbe {
        let Some(sheet) = self
            .styles
            .as_ref()
            .and_then(|book| book.get_sheet_collection().first())
        else {
            return FillProbe::default();
        };

        // umya coordinates are one-based (column, row)
        let style = sheet.get_style((col + 1, row + 1));
        let mut probe = FillProbe::default();

        if let Some(color) = style.get_background_color() {
            let argb = color.get_argb();
            if !argb.is_empty() {
                probe.background_argb = Some(argb.to_string());
            }
            let indexed = color.get_indexed().to_owned();
            if indexed != 0 {
                probe.background_indexed = Some(indexed);
            }
            let theme = color.get_theme_index().to_owned();
            if theme != 0 {
                probe.background_theme = Some(theme);
            }
        }

        if let Some(pattern) = style.get_fill().and_then(|fill| fill.get_pattern_fill()) {
            if let Some(color) = pattern.get_background_color() {
                let argb = color.get_argb();
                if !argb.is_empty() {
                    probe.pattern_background_argb = Some(argb.to_string());
                }
                let indexed = color.get_indexed().to_owned();
                if indexed != 0 {
                    probe.pattern_indexed = Some(indexed);
                }
            }
            if let Some(color) = pattern.get_foreground_color() {
                let argb = color.get_argb();
                if !argb.is_empty() {
                    probe.foreground_argb = Some(argb.to_string());
                }
                let indexed = color.get_indexed().to_owned();
                if probe.pattern_indexed.is_none() && indexed != 0 {
                    probe.pattern_indexed = Some(indexed);
                }
            }
        }

        probe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from_rows(rows: Vec<Vec<Data>>) -> WorkbookGrid {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut range = Range::new(
            (0, 0),
            (rows.len() as u32 - 1, width.saturating_sub(1) as u32),
        );
        for (r, row) in rows.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                range.set_value((r as u32, c as u32), value);
            }
        }
        WorkbookGrid::from_parts(range, None)
    }

    #[test]
    fn numeric_cells_render_like_excel_displays_them() {
        let grid = grid_from_rows(vec![vec![
            Data::Float(5.0),
            Data::Float(7.5),
            Data::Int(12),
        ]]);
        assert_eq!(grid.cell_text(0, 0).as_deref(), Some("5"));
        assert_eq!(grid.cell_text(0, 1).as_deref(), Some("7.5"));
        assert_eq!(grid.cell_text(0, 2).as_deref(), Some("12"));
    }

    #[test]
    fn text_cells_are_trimmed_and_blank_is_none() {
        let grid = grid_from_rows(vec![vec![
            Data::String("  Ion Popescu ".to_string()),
            Data::String("   ".to_string()),
            Data::Empty,
        ]]);
        assert_eq!(grid.cell_text(0, 0).as_deref(), Some("Ion Popescu"));
        assert_eq!(grid.cell_text(0, 1), None);
        assert_eq!(grid.cell_text(0, 2), None);
        assert_eq!(grid.cell_text(5, 5), None);
    }

    #[test]
    fn cell_number_parses_numeric_strings() {
        let grid = grid_from_rows(vec![vec![
            Data::String("14".to_string()),
            Data::Float(3.0),
            Data::String("shift".to_string()),
        ]]);
        assert_eq!(grid.cell_number(0, 0), Some(14.0));
        assert_eq!(grid.cell_number(0, 1), Some(3.0));
        assert_eq!(grid.cell_number(0, 2), None);
    }

    #[test]
    fn missing_styles_yield_empty_probes() {
        let grid = grid_from_rows(vec![vec![Data::String("x".to_string())]]);
        assert!(grid.fill_probe(0, 0).is_empty());
    }

    #[test]
    fn styled_cell_probe_carries_the_background_argb() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        sheet
            .get_style_mut((3, 2))
            .set_background_color("FF4472C4");

        let range = Range::new((0, 0), (1, 2));
        let grid = WorkbookGrid::from_parts(range, Some(book));

        // style at umya (col 3, row 2) is grid (row 1, col 2)
        let probe = grid.fill_probe(1, 2);
        assert_eq!(probe.background_argb.as_deref(), Some("FF4472C4"));
        assert!(grid.fill_probe(0, 0).is_empty());
    }
}
