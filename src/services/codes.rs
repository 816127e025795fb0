use crate::error::ApiError;

/// Maximum stored length for tenant and sport codes.
const MAX_CODE_LEN: usize = 10;

/// Normalize a business code: trimmed, upper-cased, alphanumeric and
/// underscore only. `label` names the field in error messages.
pub fn normalize_code(label: &str, raw: &str) -> Result<String, ApiError> {
    let code = raw.trim().to_uppercase();
    if code.is_empty() {
        return Err(ApiError::bad_request(format!("{} must not be empty", label)));
    }
    if code.len() > MAX_CODE_LEN {
        return Err(ApiError::bad_request(format!(
            "{} must be at most {} characters",
            label, MAX_CODE_LEN
        )));
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ApiError::bad_request(format!(
            "{} may only contain letters, digits and underscores",
            label
        )));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_trimmed_and_uppercased() {
        assert_eq!(normalize_code("Tenant code", "  acme_1 ").unwrap(), "ACME_1");
    }

    #[test]
    fn empty_code_is_rejected() {
        let err = normalize_code("Tenant code", "   ").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn overlong_code_is_rejected() {
        assert!(normalize_code("Sport code", "ABCDEFGHIJK").is_err());
        assert!(normalize_code("Sport code", "ABCDEFGHIJ").is_ok());
    }

    #[test]
    fn punctuation_is_rejected() {
        assert!(normalize_code("Sport code", "BAD-CODE").is_err());
        assert!(normalize_code("Sport code", "BAD CODE").is_err());
    }
}
