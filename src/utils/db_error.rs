use sqlx::error::DatabaseError;

/// Maps a unique-constraint name to the message returned to the client.
pub fn conflict_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("users_name_key") => "Name Already Taken",
        Some("users_email_key") => "Email Already Taken",
        Some("posts_title_key") => "Title Already Taken",
        _ => "Unique constraint violation",
    }
}

pub fn is_foreign_key_violation(db_err: &dyn DatabaseError) -> bool {
    db_err.is_foreign_key_violation()
}
