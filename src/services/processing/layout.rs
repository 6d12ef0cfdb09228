use super::errors::ImportError;
use crate::routes::excel_configs::models as excel_configs;
use crate::routes::users::models::UserRole;

/// Where a rota spreadsheet keeps its date header row, its employee-name
/// column and the shift grid. All coordinates are zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutProfile {
    pub role: UserRole,
    pub date_row: u32,
    pub name_column: u32,
    pub first_name_row: u32,
    pub last_name_row: u32,
    pub first_date_column: u32,
    pub last_date_column: u32,
    /// Case-insensitive literal cell values to ignore (holiday codes etc.).
    pub skip_values: Vec<String>,
}

impl LayoutProfile {
    /// The historical fixed layouts for the operator and producer templates.
    /// These coordinates are load-bearing for backward compatibility with
    /// spreadsheets that are still in circulation; do not adjust them.
    pub fn builtin(role: UserRole) -> Option<Self> {
        match role {
            UserRole::Operator => Some(LayoutProfile {
                role,
                date_row: 12,
                name_column: 1,
                first_name_row: 14,
                last_name_row: 17,
                first_date_column: 2,
                last_date_column: 32,
                skip_values: Vec::new(),
            }),
            UserRole::Producer => Some(LayoutProfile {
                role,
                date_row: 4,
                name_column: 1,
                first_name_row: 5,
                last_name_row: 7,
                first_date_column: 2,
                last_date_column: 32,
                skip_values: vec!["co".to_string()],
            }),
            UserRole::Admin => None,
        }
    }

    /// Build a profile from an admin-defined configuration row. Negative or
    /// inverted coordinate ranges are configuration mistakes and reject the
    /// import rather than silently scanning nothing.
    pub fn from_config(config: &excel_configs::Model) -> Result<Self, ImportError> {
        let coord = |value: i32, field: &str| -> Result<u32, ImportError> {
            u32::try_from(value).map_err(|_| {
                ImportError::UnsupportedRole(format!(
                    "layout profile '{}' has a negative {field}",
                    config.name
                ))
            })
        };

        let profile = LayoutProfile {
            role: config.role,
            date_row: coord(config.date_row, "date row")?,
            name_column: coord(config.name_column, "name column")?,
            first_name_row: coord(config.first_name_row, "first name row")?,
            last_name_row: coord(config.last_name_row, "last name row")?,
            first_date_column: coord(config.first_date_column, "first date column")?,
            last_date_column: coord(config.last_date_column, "last date column")?,
            skip_values: config
                .skip_values
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect(),
        };

        if profile.first_name_row > profile.last_name_row
            || profile.first_date_column > profile.last_date_column
        {
            return Err(ImportError::UnsupportedRole(format!(
                "layout profile '{}' has an inverted coordinate range",
                config.name
            )));
        }

        Ok(profile)
    }

    /// Resolve the profile for a role: a stored admin-defined configuration
    /// wins over the built-in template.
    pub fn resolve(
        role: UserRole,
        stored: Option<&excel_configs::Model>,
    ) -> Result<Self, ImportError> {
        match stored {
            Some(config) => Self::from_config(config),
            None => Self::builtin(role)
                .ok_or_else(|| ImportError::UnsupportedRole(role.as_str().to_string())),
        }
    }

    pub fn should_skip(&self, cell_text: &str) -> bool {
        self.skip_values
            .iter()
            .any(|skip| skip.eq_ignore_ascii_case(cell_text))
    }
}
