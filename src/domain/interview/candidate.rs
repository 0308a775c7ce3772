//! Candidate profile value object.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::ValidationError;

/// Maximum length for the candidate name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Who is being interviewed, and for what.
///
/// Immutable once the session starts; the session only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    #[serde(default)]
    pub years_experience: u32,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    pub target_position: String,
    #[serde(default)]
    pub current_company: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
}

impl CandidateProfile {
    /// Creates a validated profile.
    pub fn new(
        name: impl Into<String>,
        years_experience: u32,
        skills: impl IntoIterator<Item = impl Into<String>>,
        target_position: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let profile = Self {
            name: name.into(),
            years_experience,
            skills: skills.into_iter().map(Into::into).collect(),
            target_position: target_position.into(),
            current_company: None,
            education: None,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn with_current_company(mut self, company: impl Into<String>) -> Self {
        self.current_company = Some(company.into());
        self
    }

    pub fn with_education(mut self, education: impl Into<String>) -> Self {
        self.education = Some(education.into());
        self
    }

    /// Checks required fields. Profiles arriving over the wire are
    /// validated here before a session is created.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(ValidationError::invalid_format(
                "name",
                format!("must be at most {} characters", MAX_NAME_LENGTH),
            ));
        }
        if self.target_position.trim().is_empty() {
            return Err(ValidationError::empty_field("target_position"));
        }
        if self.skills.iter().any(|s| s.trim().is_empty()) {
            return Err(ValidationError::invalid_format(
                "skills",
                "skill names cannot be blank",
            ));
        }
        Ok(())
    }

    /// Skills joined for prompts and summaries.
    pub fn skills_summary(&self) -> String {
        self.skills.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> CandidateProfile {
        CandidateProfile::new("Ada", 5, ["rust", "sql"], "Backend Engineer").unwrap()
    }

    #[test]
    fn new_collects_skills_as_set() {
        let p = CandidateProfile::new("Ada", 3, ["rust", "rust", "go"], "Engineer").unwrap();
        assert_eq!(p.skills.len(), 2);
        assert_eq!(p.skills_summary(), "go, rust");
    }

    #[test]
    fn rejects_blank_name() {
        let err = CandidateProfile::new("  ", 1, Vec::<String>::new(), "Engineer").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("name"));
    }

    #[test]
    fn rejects_blank_target_position() {
        let err = CandidateProfile::new("Ada", 1, Vec::<String>::new(), "").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("target_position"));
    }

    #[test]
    fn rejects_blank_skill() {
        assert!(CandidateProfile::new("Ada", 1, ["rust", " "], "Engineer").is_err());
    }

    #[test]
    fn optional_fields_are_builders() {
        let p = profile().with_current_company("Acme").with_education("BSc");
        assert_eq!(p.current_company.as_deref(), Some("Acme"));
        assert_eq!(p.education.as_deref(), Some("BSc"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{"name":"Ada","target_position":"Engineer"}"#;
        let p: CandidateProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.years_experience, 0);
        assert!(p.skills.is_empty());
        assert!(p.validate().is_ok());
    }
}
