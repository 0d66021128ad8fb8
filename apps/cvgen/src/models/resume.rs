use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CvError;

/// The content document compiled into the binary; rendered when no
/// `CV_CONTENT` override is configured.
const BUILTIN_CONTENT: &str = include_str!("../../content/resume.json");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    /// Icon path, relative to the resource directory.
    pub icon: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
    /// Title lines, rendered one per line under the name.
    pub title: Vec<String>,
    /// Photo path, relative to the resource directory.
    pub photo: String,
    pub contacts: Vec<Contact>,
}

/// One item of an education, certificate, experience or project section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionEntry {
    /// Degree, role, certificate or project title.
    pub title: String,
    /// Institution or company.
    #[serde(default)]
    pub organization: Option<String>,
    /// Free-form date range, e.g. "02/2023 - Present".
    pub date: String,
    /// CGPA or percentage.
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Language {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resume {
    pub profile: Profile,
    #[serde(default)]
    pub education: Vec<SectionEntry>,
    #[serde(default)]
    pub certificates: Vec<SectionEntry>,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<SectionEntry>,
    #[serde(default)]
    pub projects: Vec<SectionEntry>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl Resume {
    /// Parses the built-in content document.
    pub fn builtin() -> Result<Self, CvError> {
        Resume::from_json(BUILTIN_CONTENT)
    }

    pub fn from_json(json: &str) -> Result<Self, CvError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, CvError> {
        let json = std::fs::read_to_string(path).map_err(|e| CvError::io(path, e))?;
        Resume::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_content_parses() {
        let resume = Resume::builtin().expect("built-in content must parse");
        assert_eq!(resume.profile.name, "Ubaid Bin Waris");
        assert_eq!(resume.profile.title.len(), 3);
        assert_eq!(resume.profile.contacts.len(), 6);
        assert_eq!(resume.skills.len(), 14);
        assert_eq!(resume.interests.len(), 2);
        assert_eq!(resume.education.len(), 2);
        assert_eq!(resume.certificates.len(), 3);
        assert_eq!(resume.languages.len(), 3);
        assert_eq!(resume.experience.len(), 2);
        assert_eq!(resume.projects.len(), 2);
    }

    #[test]
    fn test_builtin_sections_keep_authoring_order() {
        let resume = Resume::builtin().unwrap();
        assert_eq!(resume.education[0].title, "BSCS");
        assert_eq!(resume.education[0].grade.as_deref(), Some("3.65"));
        assert_eq!(resume.education[0].details[0], "Digital Logic Design");
        assert_eq!(resume.experience[1].organization.as_deref(), Some("BluCentric"));
        assert_eq!(resume.skills.last().map(String::as_str), Some("Responsive Web Design"));
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "profile": {"name": "A", "title": [], "photo": "p.jpg", "contacts": []},
            "projects": [{"title": "X", "date": "2024"}]
        }"#;
        let resume = Resume::from_json(json).unwrap();
        assert!(resume.education.is_empty());
        assert!(resume.skills.is_empty());
        let project = &resume.projects[0];
        assert!(project.organization.is_none());
        assert!(project.description.is_none());
        assert!(project.details.is_empty());
    }

    #[test]
    fn test_malformed_content_is_an_error() {
        let err = Resume::from_json("{\"profile\": 3}").unwrap_err();
        assert!(matches!(err, CvError::Content(_)));
    }

    #[test]
    fn test_missing_content_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Resume::from_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.is_not_found());
    }
}
