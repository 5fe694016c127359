use crate::database::manager::DatabaseError;

/// Hash a password with bcrypt; the salt and cost are embedded in the returned string
pub fn hash_password(password: &str) -> Result<String, DatabaseError> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

/// Check a password against a stored bcrypt hash. Values that are not bcrypt hashes never match.
pub fn verify_password(stored: &str, password: &str) -> bool {
    match bcrypt::verify(password, stored) {
        Ok(matched) => matched,
        Err(e) => {
            tracing::debug!("Stored password is not a usable bcrypt hash: {}", e);
            false
        }
    }
}
