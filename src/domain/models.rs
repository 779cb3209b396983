use chrono::NaiveDate;

use super::campaign::format_purchase_time;

/// Raw values of the code upload form as the user entered them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadInput {
    pub email: String,
    pub code: String,
    pub day: Option<NaiveDate>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
}

/// A validated code upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub email: String,
    pub code: String,
    pub purchase_day: NaiveDate,
    pub purchase_hour: u32,
    pub purchase_minute: u32,
}

impl Submission {
    /// The `YYYY-MM-DD HH:MM` purchase time sent to the server.
    pub fn purchase_time(&self) -> String {
        format_purchase_time(self.purchase_day, self.purchase_hour, self.purchase_minute)
    }
}

/// Raw values of the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationInput {
    pub email: String,
    pub name: String,
    pub agreement: bool,
}

/// A validated registration. The agreement is implied by validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_purchase_time() {
        let submission = Submission {
            email: "a@example.com".to_string(),
            code: "ABCD1234".to_string(),
            purchase_day: NaiveDate::from_ymd_opt(2022, 7, 9).unwrap(),
            purchase_hour: 7,
            purchase_minute: 45,
        };

        assert_eq!(submission.purchase_time(), "2022-07-09 07:45");
    }
}
