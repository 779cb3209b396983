//! Field rules for the code upload and registration forms.
//!
//! Each field reports at most one message, the first rule it breaks.
//! Validation never touches the network.

use chrono::{NaiveDateTime, NaiveTime};
use validator::ValidateEmail;

use super::campaign::CampaignWindow;
use super::errors::{Field, ValidationErrors, ValidationResult};
use super::messages::*;
use super::models::{Registration, RegistrationInput, Submission, UploadInput};

/// Number of characters in a purchase code.
pub const CODE_LENGTH_CHARS: usize = 8;

/// Validates the code upload form against the campaign window at `now`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use promo_upload::domain::{validate_submission, CampaignWindow, Field, UploadInput};
///
/// let now = NaiveDate::from_ymd_opt(2022, 8, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
/// let input = UploadInput {
///     email: "not-an-email".to_string(),
///     code: "ABCD1234".to_string(),
///     day: NaiveDate::from_ymd_opt(2022, 7, 15),
///     hour: Some(12),
///     minute: Some(30),
/// };
///
/// let errors = validate_submission(&input, &CampaignWindow::default(), now).unwrap_err();
/// assert_eq!(errors.message_for(Field::Email), Some("Az email nem megfelelő formátumú."));
/// ```
pub fn validate_submission(
    input: &UploadInput,
    window: &CampaignWindow,
    now: NaiveDateTime,
) -> ValidationResult<Submission> {
    let mut errors = ValidationErrors::new();

    validate_email(&input.email, &mut errors);
    validate_code(&input.code, &mut errors);

    match input.day {
        None => errors.add(Field::Day, DAY_REQUIRED),
        Some(day) => {
            let midnight = day.and_time(NaiveTime::default());
            if midnight < window.start {
                errors.add(Field::Day, DAY_TOO_EARLY);
            } else if midnight > window.end {
                errors.add(Field::Day, DAY_TOO_LATE);
            } else if midnight > now {
                errors.add(Field::Day, DAY_IN_FUTURE);
            }
        }
    }

    validate_clock(input.hour, 23, Field::Hour, HOUR_REQUIRED, HOUR_RANGE, &mut errors);
    validate_clock(input.minute, 59, Field::Minute, MINUTE_REQUIRED, MINUTE_RANGE, &mut errors);

    match (input.day, input.hour, input.minute) {
        (Some(purchase_day), Some(purchase_hour), Some(purchase_minute)) if errors.is_empty() => {
            Ok(Submission {
                email: input.email.clone(),
                code: input.code.clone(),
                purchase_day,
                purchase_hour,
                purchase_minute,
            })
        }
        _ => Err(errors),
    }
}

/// Validates the registration form.
pub fn validate_registration(input: &RegistrationInput) -> ValidationResult<Registration> {
    let mut errors = ValidationErrors::new();

    validate_email(&input.email, &mut errors);

    // A name of at least one non-blank character is enough
    if input.name.trim().is_empty() {
        errors.add(Field::Name, NAME_REQUIRED);
    }

    if !input.agreement {
        errors.add(Field::Agreement, AGREEMENT_REQUIRED);
    }

    if errors.is_empty() {
        Ok(Registration {
            email: input.email.clone(),
            name: input.name.clone(),
        })
    } else {
        Err(errors)
    }
}

fn validate_email(email: &str, errors: &mut ValidationErrors) {
    if email.is_empty() {
        errors.add(Field::Email, EMAIL_REQUIRED);
    } else if !email.validate_email() {
        errors.add(Field::Email, EMAIL_FORMAT);
    }
}

fn validate_code(code: &str, errors: &mut ValidationErrors) {
    if code.is_empty() {
        errors.add(Field::Code, CODE_REQUIRED);
    } else if code.chars().count() != CODE_LENGTH_CHARS {
        errors.add(Field::Code, CODE_LENGTH);
    } else if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.add(Field::Code, CODE_CHARACTERS);
    }
}

fn validate_clock(
    value: Option<u32>,
    max: u32,
    field: Field,
    required: &str,
    range: &str,
    errors: &mut ValidationErrors,
) {
    match value {
        None => errors.add(field, required),
        Some(v) if v > max => errors.add(field, range),
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 8, 10).unwrap().and_hms_opt(15, 0, 0).unwrap()
    }

    fn valid_input() -> UploadInput {
        UploadInput {
            email: "vasarlo@example.hu".to_string(),
            code: "AbCd1234".to_string(),
            day: NaiveDate::from_ymd_opt(2022, 7, 20),
            hour: Some(9),
            minute: Some(5),
        }
    }

    fn upload_error(input: &UploadInput, field: Field) -> Option<String> {
        validate_submission(input, &CampaignWindow::default(), now())
            .err()
            .and_then(|errors| errors.message_for(field).map(str::to_string))
    }

    #[test]
    fn test_valid_submission() {
        let submission = validate_submission(&valid_input(), &CampaignWindow::default(), now()).unwrap();

        assert_eq!(submission.email, "vasarlo@example.hu");
        assert_eq!(submission.code, "AbCd1234");
        assert_eq!(submission.purchase_time(), "2022-07-20 09:05");
    }

    #[test]
    fn test_email_rules() {
        let mut input = valid_input();

        input.email = String::new();
        assert_eq!(upload_error(&input, Field::Email).as_deref(), Some(EMAIL_REQUIRED));

        for bad in ["plainaddress", "@example.com", "a@", "a b@example.com", "a@@example.com"] {
            input.email = bad.to_string();
            assert_eq!(upload_error(&input, Field::Email).as_deref(), Some(EMAIL_FORMAT), "{bad}");
        }
    }

    #[test]
    fn test_code_rules() {
        let mut input = valid_input();

        input.code = String::new();
        assert_eq!(upload_error(&input, Field::Code).as_deref(), Some(CODE_REQUIRED));

        for bad in ["ABC123", "ABCD12345", "A"] {
            input.code = bad.to_string();
            assert_eq!(upload_error(&input, Field::Code).as_deref(), Some(CODE_LENGTH), "{bad}");
        }

        for bad in ["ABCD-123", "ABCD 123", "ÁBCD1234", "abcd123_"] {
            input.code = bad.to_string();
            assert_eq!(upload_error(&input, Field::Code).as_deref(), Some(CODE_CHARACTERS), "{bad}");
        }
    }

    #[test]
    fn test_purchase_day_rules() {
        let mut input = valid_input();

        input.day = None;
        assert_eq!(upload_error(&input, Field::Day).as_deref(), Some(DAY_REQUIRED));

        input.day = NaiveDate::from_ymd_opt(2022, 6, 30);
        assert_eq!(upload_error(&input, Field::Day).as_deref(), Some(DAY_TOO_EARLY));

        input.day = NaiveDate::from_ymd_opt(2022, 9, 1);
        assert_eq!(upload_error(&input, Field::Day).as_deref(), Some(DAY_TOO_LATE));

        input.day = NaiveDate::from_ymd_opt(2022, 8, 11);
        assert_eq!(upload_error(&input, Field::Day).as_deref(), Some(DAY_IN_FUTURE));

        // Window bounds themselves are accepted
        input.day = NaiveDate::from_ymd_opt(2022, 7, 1);
        assert!(upload_error(&input, Field::Day).is_none());
        input.day = NaiveDate::from_ymd_opt(2022, 8, 10);
        assert!(upload_error(&input, Field::Day).is_none());
    }

    #[test]
    fn test_clock_rules() {
        let mut input = valid_input();

        input.hour = None;
        input.minute = None;
        assert_eq!(upload_error(&input, Field::Hour).as_deref(), Some(HOUR_REQUIRED));
        assert_eq!(upload_error(&input, Field::Minute).as_deref(), Some(MINUTE_REQUIRED));

        input.hour = Some(24);
        input.minute = Some(60);
        assert_eq!(upload_error(&input, Field::Hour).as_deref(), Some(HOUR_RANGE));
        assert_eq!(upload_error(&input, Field::Minute).as_deref(), Some(MINUTE_RANGE));

        input.hour = Some(0);
        input.minute = Some(59);
        assert!(validate_submission(&input, &CampaignWindow::default(), now()).is_ok());
    }

    #[test]
    fn test_all_failing_fields_reported() {
        let input = UploadInput::default();
        let errors = validate_submission(&input, &CampaignWindow::default(), now()).unwrap_err();

        let fields: Vec<Field> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, [Field::Email, Field::Code, Field::Day, Field::Hour, Field::Minute]);
    }

    #[test]
    fn test_registration_rules() {
        let valid = RegistrationInput {
            email: "uj@example.hu".to_string(),
            name: "Kovács Éva".to_string(),
            agreement: true,
        };
        let registration = validate_registration(&valid).unwrap();
        assert_eq!(registration.name, "Kovács Éva");

        let single_letter = RegistrationInput { name: "É".to_string(), ..valid.clone() };
        assert!(validate_registration(&single_letter).is_ok());

        let blank = RegistrationInput { name: "   ".to_string(), agreement: false, ..valid.clone() };
        let errors = validate_registration(&blank).unwrap_err();
        assert_eq!(errors.message_for(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(errors.message_for(Field::Agreement), Some(AGREEMENT_REQUIRED));
        assert_eq!(errors.message_for(Field::Email), None);
    }
}
