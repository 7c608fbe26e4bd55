use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use models::employee::{self, EmployeeData, Gender};

use crate::errors::ServiceError;

pub const HIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Employee fields as submitted by a client. Every field is optional here so
/// that missing values surface as field-level validation errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeInput {
    #[serde(default, alias = "fio")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "probation")]
    pub on_probation: Option<bool>,
    #[serde(default)]
    pub hire_date: Option<String>,
}

fn required(field: &str, value: Option<String>) -> Result<String, ServiceError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ServiceError::validation(field, "required")),
    }
}

impl EmployeeInput {
    /// Validate into a complete record. Optional fields take their defaults:
    /// empty phone and email, not on probation.
    pub fn validate(self) -> Result<EmployeeData, ServiceError> {
        let full_name = required("full_name", self.full_name)?;
        let position = required("position", self.position)?;
        let gender = self
            .gender
            .as_deref()
            .and_then(Gender::parse)
            .ok_or_else(|| ServiceError::validation("gender", "must be male or female"))?;
        let hire_date = required("hire_date", self.hire_date)?;
        let hire_date = NaiveDate::parse_from_str(&hire_date, HIRE_DATE_FORMAT)
            .map_err(|_| ServiceError::validation("hire_date", "expected YYYY-MM-DD"))?;

        let data = EmployeeData {
            full_name,
            position,
            gender,
            phone: self.phone.map(|p| p.trim().to_string()).unwrap_or_default(),
            email: self.email.map(|e| e.trim().to_string()).unwrap_or_default(),
            on_probation: self.on_probation.unwrap_or(false),
            hire_date,
        };
        employee::validate_email(&data.email)?;
        Ok(data)
    }
}

impl From<&employee::Model> for EmployeeInput {
    fn from(m: &employee::Model) -> Self {
        Self {
            full_name: Some(m.full_name.clone()),
            position: Some(m.position.clone()),
            gender: Some(m.gender.label().to_string()),
            phone: Some(m.phone.clone()),
            email: Some(m.email.clone()),
            on_probation: Some(m.on_probation),
            hire_date: Some(m.hire_date.format(HIRE_DATE_FORMAT).to_string()),
        }
    }
}

/// Yes/no vocabulary for the probation flag; `None` for anything else.
pub fn parse_flag(term: &str) -> Option<bool> {
    match term.trim().to_lowercase().as_str() {
        "yes" | "true" | "1" | "да" => Some(true),
        "no" | "false" | "0" | "нет" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> EmployeeInput {
        EmployeeInput {
            full_name: Some("  Ivanov Ivan ".into()),
            position: Some("Engineer".into()),
            gender: Some("male".into()),
            phone: None,
            email: None,
            on_probation: None,
            hire_date: Some("2024-02-01".into()),
        }
    }

    fn field_of(err: ServiceError) -> String {
        match err {
            ServiceError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn defaults_apply_to_optional_fields() {
        let data = valid().validate().unwrap();
        assert_eq!(data.full_name, "Ivanov Ivan");
        assert_eq!(data.gender, Gender::Male);
        assert_eq!(data.phone, "");
        assert_eq!(data.email, "");
        assert!(!data.on_probation);
        assert_eq!(data.hire_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn missing_required_fields_are_reported_by_name() {
        let mut input = valid();
        input.full_name = Some("   ".into());
        assert_eq!(field_of(input.validate().unwrap_err()), "full_name");

        let mut input = valid();
        input.position = None;
        assert_eq!(field_of(input.validate().unwrap_err()), "position");

        let mut input = valid();
        input.hire_date = None;
        assert_eq!(field_of(input.validate().unwrap_err()), "hire_date");
    }

    #[test]
    fn gender_must_be_known() {
        let mut input = valid();
        input.gender = Some("x".into());
        assert_eq!(field_of(input.validate().unwrap_err()), "gender");

        let mut input = valid();
        input.gender = Some("ж".into());
        assert_eq!(input.validate().unwrap().gender, Gender::Female);
    }

    #[test]
    fn hire_date_must_be_iso() {
        let mut input = valid();
        input.hire_date = Some("01.02.2024".into());
        assert_eq!(field_of(input.validate().unwrap_err()), "hire_date");
    }

    #[test]
    fn email_needs_an_at_sign() {
        let mut input = valid();
        input.email = Some("ivanov.example.com".into());
        assert_eq!(field_of(input.validate().unwrap_err()), "email");
    }

    #[test]
    fn legacy_aliases_deserialize() {
        let input: EmployeeInput = serde_json::from_value(serde_json::json!({
            "fio": "Sidorova Maria",
            "position": "HR",
            "gender": "ж",
            "probation": true,
            "hire_date": "2022-09-01"
        }))
        .unwrap();
        let data = input.validate().unwrap();
        assert_eq!(data.full_name, "Sidorova Maria");
        assert!(data.on_probation);
    }

    #[test]
    fn flag_vocabulary() {
        for t in ["yes", "TRUE", "1", "да", " Да "] {
            assert_eq!(parse_flag(t), Some(true), "{t}");
        }
        for t in ["no", "false", "0", "нет", "НЕТ"] {
            assert_eq!(parse_flag(t), Some(false), "{t}");
        }
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag(""), None);
    }
}
