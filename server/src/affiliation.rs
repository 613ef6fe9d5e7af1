//! Membership form payload and field validation.
//!
//! Validation stays at presence/format level on purpose: the form feeds an
//! email to the membership desk, not an account system.
use serde::{Deserialize, Serialize};

use crate::email::{extract_age_from_sa_id, validate_sa_id};

pub const PROVINCES: [&str; 9] = [
    "Eastern Cape",
    "Free State",
    "Gauteng",
    "KwaZulu-Natal",
    "Limpopo",
    "Mpumalanga",
    "North West",
    "Northern Cape",
    "Western Cape",
];

pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

pub const SECTORS: [&str; 2] = ["Government", "Private"];

pub const MINIMUM_AGE: i32 = 18;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AffiliationForm {
    pub name: String,
    pub surname: String,
    pub id_number: String,
    pub gender: String,
    pub sector: String,
    pub disability: String,
    pub nationality: String,
    pub province: String,
    pub municipality: String,
    pub ward: String,
    #[serde(default)]
    pub qualifications: String,
}

impl AffiliationForm {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        check_min_length(&mut errors, "Name", &self.name, 2);
        check_min_length(&mut errors, "Surname", &self.surname, 2);
        check_min_length(&mut errors, "Nationality", &self.nationality, 2);
        check_min_length(&mut errors, "Municipality", &self.municipality, 2);

        if !validate_sa_id(&self.id_number) {
            errors.push("ID number must be a valid 13-digit South African ID".to_string());
        } else {
            match extract_age_from_sa_id(&self.id_number) {
                Some(age) if age >= MINIMUM_AGE => {}
                _ => errors.push(format!("Applicants must be at least {MINIMUM_AGE}")),
            }
        }

        if self.gender.trim().is_empty() {
            errors.push("Please select your gender".to_string());
        }

        if self.sector.trim().is_empty() {
            errors.push("Please select your sector".to_string());
        }

        if self.disability.trim().is_empty() {
            errors.push("Please specify if you have a disability".to_string());
        }

        if !PROVINCES.contains(&self.province.as_str()) {
            errors.push("Please select your province".to_string());
        }

        if self.ward.trim().is_empty() {
            errors.push("Ward must be at least 1 character".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_min_length(errors: &mut Vec<String>, field: &str, value: &str, min: usize) {
    if value.trim().chars().count() < min {
        errors.push(format!("{field} must be at least {min} characters"));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_form() -> AffiliationForm {
        AffiliationForm {
            name: "Thabo".to_string(),
            surname: "Mokoena".to_string(),
            id_number: "9001015009087".to_string(),
            gender: "Male".to_string(),
            sector: "Private".to_string(),
            disability: "No".to_string(),
            nationality: "South African".to_string(),
            province: "KwaZulu-Natal".to_string(),
            municipality: "Msunduzi".to_string(),
            ward: "23".to_string(),
            qualifications: String::new(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(sample_form().validate().is_ok());
    }

    #[test]
    fn short_name_is_rejected() {
        let mut form = sample_form();
        form.name = "T".to_string();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors, vec!["Name must be at least 2 characters"]);
    }

    #[test]
    fn unknown_province_is_rejected() {
        let mut form = sample_form();
        form.province = "Atlantis".to_string();

        let errors = form.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("province")));
    }

    #[test]
    fn bad_id_number_is_rejected() {
        let mut form = sample_form();
        form.id_number = "123".to_string();

        let errors = form.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("13-digit")));
    }

    #[test]
    fn underage_applicant_is_rejected() {
        let mut form = sample_form();
        // Birth year within the last two calendar years.
        let recent = chrono::Utc::now().format("%y").to_string();
        form.id_number = format!("{recent}01015009087");

        let errors = form.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("at least 18")));
    }

    #[test]
    fn multiple_problems_are_all_reported() {
        let mut form = sample_form();
        form.surname = "M".to_string();
        form.gender = String::new();
        form.ward = "  ".to_string();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
