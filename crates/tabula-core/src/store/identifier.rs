use crate::store::StoreError;

/// Maximum identifier length accepted for table and column names.
pub const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Reject identifiers that cannot be quoted safely.
///
/// Identifiers cannot be bound as parameters, so table and column names are
/// spliced into statement text. Empty names, NUL bytes, and oversized names
/// are refused before quoting.
pub fn validate_identifier(name: &str) -> Result<(), StoreError> {
    let reason = if name.is_empty() {
        "identifier is empty"
    } else if name.contains('\0') {
        "identifier contains a NUL byte"
    } else if name.len() > MAX_IDENTIFIER_LENGTH {
        "identifier exceeds maximum length"
    } else {
        return Ok(());
    };

    Err(StoreError::InvalidIdentifier {
        name: name.to_string(),
        reason,
    })
}

/// Quote an identifier with double quotes, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> Result<String, StoreError> {
    validate_identifier(name)?;

    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

///
/// TESTS
///
