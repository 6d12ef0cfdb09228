use sea_orm::DbErr;

/// Whether a database error is a unique-constraint violation. Used by the
/// import reconciler to count a conflicting schedule row as skipped rather
/// than failing the whole import.
pub fn is_unique_violation(err: &DbErr) -> bool {
    if matches!(err, DbErr::RecordNotInserted) {
        return true;
    }
    let message = err.to_string();
    message.contains("UNIQUE constraint")
        || message.contains("duplicate key")
        || message.contains("1062") // MySQL duplicate entry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_inserted_counts_as_unique_violation() {
        assert!(is_unique_violation(&DbErr::RecordNotInserted));
    }

    #[test]
    fn sqlite_unique_message_detected() {
        let err = DbErr::Custom(
            "UNIQUE constraint failed: schedules.user_id, schedules.date".to_string(),
        );
        assert!(is_unique_violation(&err));
        let other = DbErr::Custom("connection reset".to_string());
        assert!(!is_unique_violation(&other));
    }
}
