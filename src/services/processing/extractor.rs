use super::color;
use super::errors::ImportError;
use super::layout::LayoutProfile;
use super::legend;
use super::workbook::WorkbookGrid;
use crate::routes::color_legends::models as color_legends;
use crate::services::models::ScheduleEntry;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Latin letters with the Romanian diacritics, spaces, hyphens and
    /// periods. Anything else in the name column is a stray formula artifact
    /// or a numeric leftover, not an employee.
    static ref NAME_PATTERN: Regex =
        Regex::new(r"^[A-Za-zĂÂÎȘȚăâîșț .\-]+$").expect("name pattern is valid");
}

/// Romanian weekday initials that some templates repeat inside the grid.
const WEEKDAY_INITIALS: [char; 6] = ['l', 'm', 'j', 'v', 's', 'd'];

/// Pull every shift entry out of a sheet for the target month.
///
/// Structural failures (no dates, no names) abort the call. Cell-level
/// anomalies never do: a bad cell is skipped and extraction continues, so a
/// single malformed cell cannot void a whole sheet.
pub fn extract(
    grid: &WorkbookGrid,
    profile: &LayoutProfile,
    legends: &[color_legends::Model],
    month: u32,
    year: i32,
) -> Result<Vec<ScheduleEntry>, ImportError> {
    let dates = scan_date_row(grid, profile);
    if dates.is_empty() {
        return Err(ImportError::NoDatesFound);
    }

    let names = scan_name_column(grid, profile);
    if names.is_empty() {
        return Err(ImportError::NoNamesFound);
    }

    tracing::debug!(
        dates = dates.len(),
        names = names.len(),
        "scanning shift grid"
    );

    let mut entries = Vec::new();
    for (name_row, name) in &names {
        for (date_col, day) in &dates {
            let Some(text) = grid.cell_text(*name_row, *date_col) else {
                continue;
            };
            if is_weekday_initial(&text) || profile.should_skip(&text) {
                continue;
            }

            let Some(date) = NaiveDate::from_ymd_opt(year, month, *day) else {
                // e.g. a "31" header column in a 30-day month
                tracing::debug!(day, month, year, "day does not exist in target month");
                continue;
            };

            let shift_color = color::extract_color(&grid.fill_probe(*name_row, *date_col));
            let resolved = shift_color
                .as_ref()
                .and_then(|c| legend::resolve(c, legends));

            entries.push(ScheduleEntry {
                name: name.clone(),
                date,
                shift_hours: Some(text),
                shift_color,
                shift_name: resolved.map(|l| l.shift_name.clone()),
                time_range: resolved.map(|l| format!("{}-{}", l.start_time, l.end_time)),
                matched_user_id: None,
                matched_user_name: None,
                duplicate: false,
            });
        }
    }

    Ok(entries)
}

/// A date-row cell counts only when it holds a whole number in [1, 31].
fn scan_date_row(grid: &WorkbookGrid, profile: &LayoutProfile) -> Vec<(u32, u32)> {
    let mut dates = Vec::new();
    for col in profile.first_date_column..=profile.last_date_column {
        let Some(value) = grid.cell_number(profile.date_row, col) else {
            continue;
        };
        if value.fract() == 0.0 && (1.0..=31.0).contains(&value) {
            dates.push((col, value as u32));
        }
    }
    dates
}

/// A name-column cell counts only when it is text longer than two characters
/// made of name-like characters.
fn scan_name_column(grid: &WorkbookGrid, profile: &LayoutProfile) -> Vec<(u32, String)> {
    let mut names = Vec::new();
    for row in profile.first_name_row..=profile.last_name_row {
        let Some(text) = grid.cell_text(row, profile.name_column) else {
            continue;
        };
        if text.chars().count() > 2 && NAME_PATTERN.is_match(&text) {
            names.push((row, text));
        }
    }
    names
}

fn is_weekday_initial(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => WEEKDAY_INITIALS.contains(&c.to_ascii_lowercase()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::users::models::UserRole;
    use calamine::{Data, Range};
    use chrono::Utc;
    use uuid::Uuid;

    // Minimal sheet in the producer layout: date row 4, names in rows 5-7
    // column 1, dates from column 2.
    fn producer_grid(cells: Vec<(u32, u32, Data)>) -> WorkbookGrid {
        let mut range = Range::new((0, 0), (10, 33));
        for (row, col, value) in cells {
            range.set_value((row, col), value);
        }
        WorkbookGrid::from_parts(range, None)
    }

    fn base_cells() -> Vec<(u32, u32, Data)> {
        vec![
            (4, 2, Data::Float(1.0)),
            (4, 3, Data::Float(2.0)),
            (5, 1, Data::String("Ion Popescu".to_string())),
            (6, 1, Data::String("Maria Ionescu".to_string())),
        ]
    }

    fn profile() -> LayoutProfile {
        LayoutProfile::builtin(UserRole::Producer).unwrap()
    }

    fn legend(code: &str, shift: &str) -> color_legends::Model {
        color_legends::Model {
            id: Uuid::new_v4(),
            role: UserRole::Producer,
            color_code: code.to_string(),
            color_name: code.to_string(),
            shift_name: shift.to_string(),
            start_time: "08:00".to_string(),
            end_time: "16:00".to_string(),
            description: None,
            created_at: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn extracts_one_entry_per_filled_intersection() {
        let mut cells = base_cells();
        cells.push((5, 2, Data::String("08-16".to_string())));
        cells.push((6, 3, Data::String("12-20".to_string())));
        let grid = producer_grid(cells);

        let entries = extract(&grid, &profile(), &[], 3, 2026).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Ion Popescu");
        assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(entries[0].shift_hours.as_deref(), Some("08-16"));
        assert_eq!(entries[1].name, "Maria Ionescu");
        assert_eq!(entries[1].date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    }

    #[test]
    fn empty_date_row_is_fatal() {
        let cells = vec![(5, 1, Data::String("Ion Popescu".to_string()))];
        let grid = producer_grid(cells);
        assert!(matches!(
            extract(&grid, &profile(), &[], 3, 2026),
            Err(ImportError::NoDatesFound)
        ));
    }

    #[test]
    fn empty_name_column_is_fatal() {
        let cells = vec![(4, 2, Data::Float(1.0))];
        let grid = producer_grid(cells);
        assert!(matches!(
            extract(&grid, &profile(), &[], 3, 2026),
            Err(ImportError::NoNamesFound)
        ));
    }

    #[test]
    fn date_row_rejects_out_of_range_and_fractional_values() {
        let mut cells = base_cells();
        cells.push((4, 4, Data::Float(32.0)));
        cells.push((4, 5, Data::Float(0.0)));
        cells.push((4, 6, Data::Float(2.5)));
        cells.push((5, 4, Data::String("x".to_string())));
        cells.push((5, 5, Data::String("x".to_string())));
        cells.push((5, 6, Data::String("x".to_string())));
        let grid = producer_grid(cells);

        let entries = extract(&grid, &profile(), &[], 3, 2026).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn name_column_rejects_short_and_non_name_values() {
        let mut cells = vec![(4, 2, Data::Float(1.0))];
        cells.push((5, 1, Data::String("Io".to_string())));
        cells.push((6, 1, Data::String("=SUM(A1:A3)".to_string())));
        cells.push((7, 1, Data::String("Ștefan Brâncuși".to_string())));
        cells.push((7, 2, Data::String("08-16".to_string())));
        let grid = producer_grid(cells);

        let entries = extract(&grid, &profile(), &[], 3, 2026).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Ștefan Brâncuși");
    }

    #[test]
    fn skip_values_and_weekday_initials_are_ignored() {
        let mut cells = base_cells();
        cells.push((5, 2, Data::String("co".to_string())));
        cells.push((5, 3, Data::String("L".to_string())));
        cells.push((6, 2, Data::String("08-16".to_string())));
        let grid = producer_grid(cells);

        let entries = extract(&grid, &profile(), &[], 3, 2026).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Maria Ionescu");
    }

    #[test]
    fn nonexistent_day_in_target_month_is_dropped_silently() {
        let mut cells = base_cells();
        cells.push((4, 4, Data::Float(31.0)));
        cells.push((5, 4, Data::String("08-16".to_string())));
        let grid = producer_grid(cells);

        // April has 30 days; the day-31 column yields nothing.
        let entries = extract(&grid, &profile(), &[], 4, 2026).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn colored_cell_resolves_shift_through_the_legend() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        // umya is one-based (col, row): grid (5, 2) -> (3, 6)
        sheet.get_style_mut((3, 6)).set_background_color("FF4472C4");

        let mut range = Range::new((0, 0), (10, 33));
        for (row, col, value) in base_cells() {
            range.set_value((row, col), value);
        }
        range.set_value((5, 2), Data::String("08-16".to_string()));
        let grid = WorkbookGrid::from_parts(range, Some(book));

        let legends = vec![legend("#4472C4", "Morning")];
        let entries = extract(&grid, &profile(), &legends, 3, 2026).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].shift_color.as_ref().unwrap().to_string(), "#4472C4");
        assert_eq!(entries[0].shift_name.as_deref(), Some("Morning"));
        assert_eq!(entries[0].time_range.as_deref(), Some("08:00-16:00"));
    }
}
