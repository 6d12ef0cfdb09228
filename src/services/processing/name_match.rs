use crate::routes::users::models as users;
use strsim::jaro_winkler;

/// A match is accepted only when its distance is strictly below this value.
/// Zero is an exact match; lower thresholds are stricter.
pub const MAX_DISTANCE: f64 = 0.4;

/// Lowercase, split on whitespace and sort the tokens, so "Ion Popescu" and
/// "popescu ion" normalise identically regardless of name order.
fn normalize(name: &str) -> String {
    let mut tokens: Vec<String> = name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    tokens.sort();
    tokens.join(" ")
}

/// Token-sorted Jaro-Winkler distance between two names (0 = identical).
pub fn distance(a: &str, b: &str) -> f64 {
    1.0 - jaro_winkler(&normalize(a), &normalize(b))
}

/// Pick the single best directory match for a raw spreadsheet name.
///
/// Candidates without a name are excluded up front. Equal-distance ties break
/// to the lexicographically smallest user id so the result does not depend on
/// the order the directory query happened to return rows in.
pub fn best_match<'a>(raw_name: &str, candidates: &'a [users::Model]) -> Option<&'a users::Model> {
    if raw_name.trim().is_empty() {
        return None;
    }

    let mut best: Option<(f64, &users::Model)> = None;
    for user in candidates {
        let Some(name) = user.name.as_deref() else {
            continue;
        };
        if name.trim().is_empty() {
            continue;
        }
        let d = distance(raw_name, name);
        if d >= MAX_DISTANCE {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_d, best_user)) => {
                d < best_d || (d == best_d && user.id < best_user.id)
            }
        };
        if better {
            best = Some((d, user));
        }
    }
    best.map(|(_, user)| user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::users::models::UserRole;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(id: Uuid, name: Option<&str>) -> users::Model {
        users::Model {
            id,
            name: name.map(ToString::to_string),
            email: format!("{id}@example.com"),
            role: UserRole::Operator,
            created_at: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn token_order_does_not_matter() {
        // Token-sorted Jaro-Winkler: reversed first/last name normalises to
        // the identical string, so the distance is exactly zero.
        assert!(distance("Ion Popescu", "popescu ion") < f64::EPSILON);

        let directory = vec![user(Uuid::new_v4(), Some("popescu ion"))];
        let matched = best_match("Ion Popescu", &directory).unwrap();
        assert_eq!(matched.name.as_deref(), Some("popescu ion"));
    }

    #[test]
    fn matching_is_idempotent() {
        let directory = vec![
            user(Uuid::new_v4(), Some("Maria Ionescu")),
            user(Uuid::new_v4(), Some("Ion Popescu")),
        ];
        let first = best_match("ion popescu", &directory).map(|u| u.id);
        let second = best_match("ion popescu", &directory).map(|u| u.id);
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn nameless_candidates_are_excluded() {
        let directory = vec![user(Uuid::new_v4(), None), user(Uuid::new_v4(), Some(" "))];
        assert!(best_match("Ion Popescu", &directory).is_none());
    }

    #[test]
    fn dissimilar_names_do_not_match() {
        let directory = vec![user(Uuid::new_v4(), Some("Alexandru Georgescu"))];
        assert!(best_match("Ion Popescu", &directory).is_none());
    }

    #[test]
    fn small_typos_still_match() {
        let directory = vec![user(Uuid::new_v4(), Some("Ion Popescu"))];
        assert!(best_match("Ion Popesc", &directory).is_some());
    }

    #[test]
    fn ties_break_to_smallest_id() {
        let low = Uuid::from_u128(1);
        let high = Uuid::from_u128(u128::MAX);
        // Same name on both records: identical distance either way.
        let directory = vec![
            user(high, Some("Ion Popescu")),
            user(low, Some("Ion Popescu")),
        ];
        assert_eq!(best_match("Ion Popescu", &directory).unwrap().id, low);
    }

    #[test]
    fn empty_query_matches_nothing() {
        let directory = vec![user(Uuid::new_v4(), Some("Ion Popescu"))];
        assert!(best_match("  ", &directory).is_none());
    }
}
