//! Job posting entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::DomainResult;

/// A job posting collected by an external producer.
///
/// `id` is assigned by the store on insert and is `None` until then. The
/// posting URL is the producer's natural dedup key; uniqueness is enforced by
/// a store-side index, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Job {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "company is required"))]
    pub company: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    /// Ordered set: first occurrence wins, order is kept
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_skills: Vec<String>,
    pub posted_date: DateTime<Utc>,
    #[validate(url(message = "url must be an absolute URL"))]
    pub url: String,
    pub last_updated: DateTime<Utc>,
}

impl Job {
    /// Create a posting with the required fields; optional fields start empty.
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
        description: impl Into<String>,
        posted_date: DateTime<Utc>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            company: company.into(),
            location: location.into(),
            description: description.into(),
            salary: None,
            job_type: None,
            experience_level: None,
            required_skills: Vec::new(),
            posted_date,
            url: url.into(),
            last_updated: Utc::now(),
        }
    }

    pub fn with_salary(mut self, salary: impl Into<String>) -> Self {
        self.salary = Some(salary.into());
        self
    }

    pub fn with_job_type(mut self, job_type: impl Into<String>) -> Self {
        self.job_type = Some(job_type.into());
        self
    }

    pub fn with_experience_level(mut self, level: impl Into<String>) -> Self {
        self.experience_level = Some(level.into());
        self
    }

    pub fn with_required_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_skills = dedup_ordered(skills.into_iter().map(Into::into));
        self
    }

    /// Check the field rules that must hold before the posting is written.
    pub fn check(&self) -> DomainResult<()> {
        self.validate()?;
        Ok(())
    }
}

/// Drop repeated entries, keeping the first occurrence of each.
pub fn dedup_ordered(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DomainError;

    fn sample() -> Job {
        Job::new(
            "Software Engineer",
            "Tech Corp",
            "Remote",
            "Exciting opportunity for a software engineer",
            Utc::now(),
            "https://example.com/job",
        )
    }

    #[test]
    fn test_valid_job_passes_check() {
        assert!(sample().check().is_ok());
    }

    #[test]
    fn test_empty_required_field_fails_check() {
        let mut job = sample();
        job.company = String::new();

        let err = job.check().unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref msg) if msg.contains("company")));
    }

    #[test]
    fn test_relative_url_fails_check() {
        let mut job = sample();
        job.url = "/jobs/42".to_string();

        assert!(job.check().is_err());
    }

    #[test]
    fn test_required_skills_keep_first_occurrence() {
        let job = sample().with_required_skills(["rust", "go", "rust", "sql", "go"]);
        assert_eq!(job.required_skills, vec!["rust", "go", "sql"]);
    }

    #[test]
    fn test_json_omits_absent_optionals() {
        let json = serde_json::to_value(sample()).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("id"));
        assert!(!object.contains_key("salary"));
        assert!(!object.contains_key("required_skills"));
        assert_eq!(object["title"], "Software Engineer");
        assert!(object.contains_key("posted_date"));
    }

    #[test]
    fn test_json_includes_present_optionals() {
        let mut job = sample().with_salary("100k").with_required_skills(["rust"]);
        job.id = Some("65f0c0ffee0000000000abcd".to_string());

        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["id"], "65f0c0ffee0000000000abcd");
        assert_eq!(json["salary"], "100k");
        assert_eq!(json["required_skills"][0], "rust");
    }
}
