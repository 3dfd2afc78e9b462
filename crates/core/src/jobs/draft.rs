//! Turning an extraction preview into a job the backend can save

use applymate_domain::constants::{UNKNOWN_COMPANY, UNTITLED_JOB};
use applymate_domain::{JobDescription, NewJob};

/// Job being prepared from pasted text or a link
///
/// Holds what the user typed plus the backend's extraction. The user may
/// correct the extracted title and company before saving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobDraft {
    /// Posting link the draft was extracted from
    pub url: String,
    /// Pasted job description text
    pub jd_text: String,
    /// Fields extracted by the backend
    pub extracted: JobDescription,
    title: Option<String>,
    company: Option<String>,
}

impl JobDraft {
    /// Draft over an extraction result
    pub fn new(url: impl Into<String>, jd_text: impl Into<String>, extracted: JobDescription) -> Self {
        Self { url: url.into(), jd_text: jd_text.into(), extracted, title: None, company: None }
    }

    /// Override the extracted title; blank input clears the override
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_blank(title.into());
        self
    }

    /// Override the extracted company; blank input clears the override
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = non_blank(company.into());
        self
    }

    /// Title that will be saved
    pub fn title(&self) -> &str {
        pick(self.title.as_deref(), &self.extracted.title, UNTITLED_JOB)
    }

    /// Company name that will be saved
    pub fn company(&self) -> &str {
        pick(self.company.as_deref(), &self.extracted.company, UNKNOWN_COMPANY)
    }

    /// Body for `POST /jobs/`
    pub fn to_new_job(&self) -> NewJob {
        NewJob {
            company_id: None,
            company_name: Some(self.company().to_string()),
            title: self.title().to_string(),
            location: self.extracted.location.clone(),
            seniority: self.extracted.seniority.clone(),
            url: self.url.clone(),
            jd_raw: self.jd_text.clone(),
            jd_struct: self.extracted.clone(),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn pick<'a>(user: Option<&'a str>, extracted: &'a str, fallback: &'static str) -> &'a str {
    match user {
        Some(value) => value,
        None if !extracted.trim().is_empty() => extracted,
        None => fallback,
    }
}
