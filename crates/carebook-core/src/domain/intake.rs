use crate::domain::email::is_valid_email;
use crate::domain::phone::{is_valid_phone_format, MIN_PHONE_LEN};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_FULL_NAME_LEN: usize = 2;

/// Contact details a patient enters before paying.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PatientIntake {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeField {
    FullName,
    Email,
    Phone,
}

impl IntakeField {
    pub fn as_str(self) -> &'static str {
        match self {
            IntakeField::FullName => "full_name",
            IntakeField::Email => "email",
            IntakeField::Phone => "phone",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeFieldError {
    pub field: IntakeField,
    pub message: &'static str,
}

/// Every failing field, at most one message per field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct IntakeErrors(Vec<IntakeFieldError>);

impl IntakeErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn message_for(&self, field: IntakeField) -> Option<&'static str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    fn push(&mut self, field: IntakeField, message: &'static str) {
        self.0.push(IntakeFieldError { field, message });
    }
}

impl fmt::Display for IntakeErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field.as_str(), error.message)?;
        }
        Ok(())
    }
}

impl PatientIntake {
    pub fn validate(&self) -> Result<(), IntakeErrors> {
        let mut errors = IntakeErrors::default();

        if self.full_name.chars().count() < MIN_FULL_NAME_LEN {
            errors.push(
                IntakeField::FullName,
                "Full name must be at least 2 characters.",
            );
        }

        if !is_valid_email(&self.email) {
            errors.push(IntakeField::Email, "Please enter a valid email address.");
        }

        if self.phone.chars().count() < MIN_PHONE_LEN {
            errors.push(
                IntakeField::Phone,
                "Phone number must be at least 10 digits.",
            );
        } else if !is_valid_phone_format(&self.phone) {
            errors.push(IntakeField::Phone, "Invalid phone number format.");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IntakeField, PatientIntake};

    fn jane() -> PatientIntake {
        PatientIntake {
            full_name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "1234567890".to_string(),
            notes: None,
        }
    }

    #[test]
    fn valid_intake_passes() {
        assert!(jane().validate().is_ok());
    }

    #[test]
    fn short_phone_reports_length() {
        let intake = PatientIntake {
            phone: "123".to_string(),
            ..jane()
        };
        let errors = intake.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.message_for(IntakeField::Phone),
            Some("Phone number must be at least 10 digits.")
        );
    }

    #[test]
    fn long_phone_with_letters_reports_format() {
        let intake = PatientIntake {
            phone: "555-0101-ext9".to_string(),
            ..jane()
        };
        let errors = intake.validate().unwrap_err();
        assert_eq!(
            errors.message_for(IntakeField::Phone),
            Some("Invalid phone number format.")
        );
    }

    #[test]
    fn name_is_not_trimmed_before_length_check() {
        let intake = PatientIntake {
            full_name: " J".to_string(),
            ..jane()
        };
        assert!(intake.validate().is_ok());

        let intake = PatientIntake {
            full_name: "J".to_string(),
            ..jane()
        };
        assert!(intake.validate().is_err());
    }

    #[test]
    fn collects_every_failing_field() {
        let errors = PatientIntake::default().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.to_string(),
            "full_name: Full name must be at least 2 characters.; \
             email: Please enter a valid email address.; \
             phone: Phone number must be at least 10 digits."
        );
    }

    #[test]
    fn notes_are_unconstrained() {
        let intake = PatientIntake {
            notes: Some("x".repeat(10_000)),
            ..jane()
        };
        assert!(intake.validate().is_ok());
    }
}
