//! Field validators shared across records.

use validator::ValidationError;

/// Phone numbers are exactly ten ASCII digits.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        let mut error = ValidationError::new("phone");
        error.message = Some("Phone number must be exactly 10 digits".into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("0911223344").is_ok());
        assert!(validate_phone("091122334").is_err());
        assert!(validate_phone("09112233445").is_err());
        assert!(validate_phone("09112233a4").is_err());
        assert!(validate_phone("+251911223").is_err());
        assert!(validate_phone("").is_err());
    }
}
