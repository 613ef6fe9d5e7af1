//! # Outbound Mail
//!
//! Delivery of affiliation submissions to the membership mailbox.
//!
//! There is no transactional mail account behind this site; delivery is a
//! best-effort POST to a relay API (or a logged simulation in development).
//! Anything that fails delivery lands in the pending queue
//! ([`crate::pending`]) for a later retry, so this module never retries on
//! its own.
use std::time::Duration;

use chrono::{Datelike, Utc};
use reqwest::Client;
use serde::Serialize;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    affiliation::AffiliationForm,
    config::{MailConfig, MailMode},
};

pub const SUBJECT: &str = "New MNU Affiliation Form Submission";

const SIMULATED_DELAY: Duration = Duration::from_millis(50);
const RELAY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct OutboundMail<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

pub enum Mailer {
    Http {
        client: Client,
        endpoint: String,
        api_key: String,
        to: String,
    },
    Simulated {
        fail: bool,
    },
}

impl Mailer {
    pub fn new(config: &MailConfig) -> Self {
        match config.mode {
            MailMode::Http => Self::Http {
                client: Client::new(),
                endpoint: config.endpoint.clone(),
                api_key: config.api_key.clone(),
                to: config.to.clone(),
            },
            MailMode::Simulated => Self::Simulated { fail: false },
        }
    }

    pub async fn send_affiliation(&self, form: &AffiliationForm) -> Result<(), String> {
        let body = format_affiliation_body(form);
        self.send(SUBJECT, &body).await
    }

    async fn send(&self, subject: &str, body: &str) -> Result<(), String> {
        match self {
            Self::Http {
                client,
                endpoint,
                api_key,
                to,
            } => {
                let mail = OutboundMail { to, subject, body };

                let response = client
                    .post(endpoint)
                    .bearer_auth(api_key)
                    .timeout(RELAY_TIMEOUT)
                    .json(&mail)
                    .send()
                    .await
                    .map_err(|e| format!("mail relay unreachable: {e}"))?;

                if !response.status().is_success() {
                    return Err(format!("mail relay returned {}", response.status()));
                }

                info!("Delivered submission to {to}");
                Ok(())
            }
            Self::Simulated { fail } => {
                sleep(SIMULATED_DELAY).await;

                if *fail {
                    warn!("Simulated delivery failure");
                    return Err("simulated delivery failure".to_string());
                }

                info!("Simulated delivery, no mail sent");
                Ok(())
            }
        }
    }
}

pub fn format_affiliation_body(form: &AffiliationForm) -> String {
    let qualifications = if form.qualifications.trim().is_empty() {
        "None provided"
    } else {
        form.qualifications.trim()
    };

    format!(
        "New MNU Affiliation Form Submission:\n\
         ====================================\n\
         \n\
         Personal Information:\n\
         - Name: {}\n\
         - Surname: {}\n\
         - ID Number: {}\n\
         - Gender: {}\n\
         - Sector: {}\n\
         - Disability: {}\n\
         \n\
         Location:\n\
         - Nationality: {}\n\
         - Province: {}\n\
         - Municipality: {}\n\
         - Ward: {}\n\
         \n\
         Qualifications:\n\
         {}\n\
         \n\
         Submission Date: {}\n",
        form.name,
        form.surname,
        form.id_number,
        form.gender,
        form.sector,
        form.disability,
        form.nationality,
        form.province,
        form.municipality,
        form.ward,
        qualifications,
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

/// Basic plausibility check for a South African ID number: 13 digits with a
/// sensible embedded birth month and day. No Luhn check digit verification.
pub fn validate_sa_id(id_number: &str) -> bool {
    if id_number.len() != 13 || !id_number.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let month: u32 = id_number[2..4].parse().unwrap_or(0);
    let day: u32 = id_number[4..6].parse().unwrap_or(0);

    (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// Age derived from the ID's two birth-year digits. The century is picked so
/// the birth year is never in the future.
pub fn extract_age_from_sa_id(id_number: &str) -> Option<i32> {
    if id_number.len() != 13 {
        return None;
    }

    let birth_digits: i32 = id_number[0..2].parse().ok()?;
    let current_year = Utc::now().year();

    let century = if birth_digits <= current_year % 100 {
        2000
    } else {
        1900
    };

    Some(current_year - (century + birth_digits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affiliation::tests::sample_form;
    use crate::config::MailMode;

    #[test]
    fn accepts_plausible_id() {
        assert!(validate_sa_id("9001015009087"));
    }

    #[test]
    fn rejects_wrong_length_and_letters() {
        assert!(!validate_sa_id("900101500908"));
        assert!(!validate_sa_id("90010150090871"));
        assert!(!validate_sa_id("90010150O9087"));
    }

    #[test]
    fn rejects_impossible_birth_date() {
        assert!(!validate_sa_id("9013015009087"));
        assert!(!validate_sa_id("9001325009087"));
        assert!(!validate_sa_id("9000015009087"));
    }

    #[test]
    fn age_uses_the_right_century() {
        let current_year = Utc::now().year();

        // "99" is ahead of the current two-digit year, so born 1999.
        assert_eq!(
            extract_age_from_sa_id("9901015009087"),
            Some(current_year - 1999)
        );
        // "01" is behind it, so born 2001.
        assert_eq!(
            extract_age_from_sa_id("0101015009087"),
            Some(current_year - 2001)
        );
        assert_eq!(extract_age_from_sa_id("123"), None);
    }

    #[test]
    fn body_lists_every_field() {
        let body = format_affiliation_body(&sample_form());

        assert!(body.starts_with("New MNU Affiliation Form Submission:"));
        assert!(body.contains("- Name: Thabo"));
        assert!(body.contains("- Surname: Mokoena"));
        assert!(body.contains("- ID Number: 9001015009087"));
        assert!(body.contains("- Province: KwaZulu-Natal"));
        assert!(body.contains("- Ward: 23"));
        assert!(body.contains("Submission Date: "));
    }

    #[test]
    fn empty_qualifications_become_placeholder() {
        let body = format_affiliation_body(&sample_form());
        assert!(body.contains("Qualifications:\nNone provided"));

        let mut form = sample_form();
        form.qualifications = "Matric, forklift licence".to_string();
        let body = format_affiliation_body(&form);
        assert!(body.contains("Qualifications:\nMatric, forklift licence"));
    }

    #[tokio::test]
    async fn simulated_mailer_reports_both_outcomes() {
        let ok = Mailer::Simulated { fail: false };
        assert!(ok.send_affiliation(&sample_form()).await.is_ok());

        let failing = Mailer::Simulated { fail: true };
        assert!(failing.send_affiliation(&sample_form()).await.is_err());
    }

    #[test]
    fn mailer_mode_follows_config() {
        let config = crate::config::MailConfig {
            mode: MailMode::Simulated,
            endpoint: String::new(),
            api_key: String::new(),
            to: String::new(),
        };

        assert!(matches!(
            Mailer::new(&config),
            Mailer::Simulated { fail: false }
        ));
    }
}
