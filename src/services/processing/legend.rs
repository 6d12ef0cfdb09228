use super::color::{ExtractedColor, Rgb};
use crate::routes::color_legends::models as color_legends;

/// Colours closer than this (Euclidean RGB, max ~441) to a legend entry are
/// treated as the same shift. Absorbs the small drift different Excel writers
/// introduce when re-saving a sheet.
pub const SIMILARITY_THRESHOLD: f64 = 50.0;

/// Find the legend entry for an extracted colour.
///
/// A case-insensitive exact match on the stored colour code always wins, even
/// when another entry is closer by distance; this also lets sentinel codes
/// (`#INDEX<n>`, `#PATTERN<n>`) resolve once an admin has registered them.
/// Similarity matching applies only to real RGB colours.
pub fn resolve<'a>(
    color: &ExtractedColor,
    legends: &'a [color_legends::Model],
) -> Option<&'a color_legends::Model> {
    let code = color.to_string();
    if let Some(exact) = legends
        .iter()
        .find(|legend| legend.color_code.eq_ignore_ascii_case(&code))
    {
        return Some(exact);
    }

    let rgb = color.as_rgb()?;
    nearest_within(rgb, legends, SIMILARITY_THRESHOLD)
}

fn nearest_within(
    rgb: Rgb,
    legends: &[color_legends::Model],
    threshold: f64,
) -> Option<&color_legends::Model> {
    let mut best: Option<(f64, &color_legends::Model)> = None;
    for legend in legends {
        let Some(candidate) = Rgb::parse(&legend.color_code) else {
            continue; // sentinel or malformed code carries no RGB information
        };
        let distance = rgb.distance(candidate);
        if distance < threshold && best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, legend));
        }
    }
    best.map(|(_, legend)| legend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::users::models::UserRole;
    use chrono::Utc;
    use uuid::Uuid;

    fn legend(code: &str, shift: &str) -> color_legends::Model {
        color_legends::Model {
            id: Uuid::new_v4(),
            role: UserRole::Operator,
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
    fn exact_match_is_case_insensitive() {
        let legends = vec![legend("#ff0000", "Morning")];
        let color = ExtractedColor::parse("#FF0000").unwrap();
        assert_eq!(resolve(&color, &legends).unwrap().shift_name, "Morning");
    }

    #[test]
    fn exact_match_beats_a_closer_similarity_match() {
        // #FF0005 is distance 5 from the query; the exact entry still wins.
        let legends = vec![legend("#FF0005", "Near"), legend("#FF0000", "Exact")];
        let color = ExtractedColor::parse("#FF0000").unwrap();
        assert_eq!(resolve(&color, &legends).unwrap().shift_name, "Exact");
    }

    #[test]
    fn nearest_entry_within_threshold_wins() {
        let legends = vec![legend("#FF0030", "Far"), legend("#FF0010", "Close")];
        let color = ExtractedColor::parse("#FF0000").unwrap();
        assert_eq!(resolve(&color, &legends).unwrap().shift_name, "Close");
    }

    #[test]
    fn distance_at_threshold_does_not_match() {
        // Distance is exactly 50 (0x32), which is not strictly below the cap.
        let legends = vec![legend("#FF0032", "Edge")];
        let color = ExtractedColor::parse("#FF0000").unwrap();
        assert!(resolve(&color, &legends).is_none());

        let legends = vec![legend("#FF0031", "Inside")];
        assert_eq!(resolve(&color, &legends).unwrap().shift_name, "Inside");
    }

    #[test]
    fn sentinels_never_match_by_similarity() {
        let legends = vec![legend("#000000", "Black-ish")];
        let color = ExtractedColor::Indexed(12);
        assert!(resolve(&color, &legends).is_none());
    }

    #[test]
    fn registered_sentinel_matches_exactly() {
        let legends = vec![legend("#INDEX12", "Legacy blue")];
        let color = ExtractedColor::Indexed(12);
        assert_eq!(resolve(&color, &legends).unwrap().shift_name, "Legacy blue");
    }

    #[test]
    fn sentinel_legend_codes_are_skipped_during_similarity() {
        let legends = vec![legend("#INDEX9", "Noise"), legend("#FF0010", "Close")];
        let color = ExtractedColor::parse("#FF0000").unwrap();
        assert_eq!(resolve(&color, &legends).unwrap().shift_name, "Close");
    }
}
