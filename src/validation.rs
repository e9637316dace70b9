use validator::ValidationError;

/// Indian mobile number: an optional "+91", "91" or "0" prefix followed by
/// ten digits, the first of which is 6-9.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let national = phone
        .strip_prefix("+91")
        .or_else(|| phone.strip_prefix("91").filter(|rest| rest.len() == 10))
        .or_else(|| phone.strip_prefix('0').filter(|rest| rest.len() == 10))
        .unwrap_or(phone);

    let valid = national.len() == 10
        && national.bytes().all(|b| b.is_ascii_digit())
        && matches!(national.as_bytes()[0], b'6'..=b'9');

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("Invalid phone number format".into());
        Err(err)
    }
}

pub fn validate_otp_code(otp: &str) -> Result<(), ValidationError> {
    if otp.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("otp");
        err.message = Some("OTP must be 6 digits".into());
        Err(err)
    }
}

/// Length is checked on the trimmed name so leading/trailing whitespace
/// cannot smuggle an effectively-empty value through.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if (2..=100).contains(&len) {
        Ok(())
    } else {
        let mut err = ValidationError::new("name");
        err.message = Some("Name must be between 2-100 characters".into());
        Err(err)
    }
}

pub fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    match gender {
        "male" | "female" | "other" => Ok(()),
        _ => {
            let mut err = ValidationError::new("gender");
            err.message = Some("Invalid gender".into());
            Err(err)
        }
    }
}
