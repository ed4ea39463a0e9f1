use serde::{Deserialize, Serialize};

/// Structured profile extracted from free-text resume content by the model.
///
/// Scalar fields absent from the source text deserialize to `None` — they are
/// never backfilled with fabricated defaults. Collections are always present,
/// possibly empty (`#[serde(default)]` covers models that omit empty arrays
/// despite the prompt).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub name: Option<String>,
    pub headline: Option<String>,
    pub contact_info: Option<ContactInfo>,
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub role: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub dates: Option<String>,
    #[serde(default)]
    pub description_points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub dates: Option<String>,
}

impl ResumeProfile {
    /// A parse is only usable downstream if it recovered a name or at least
    /// one experience entry. A whitespace-only name counts as absent.
    pub fn is_substantive(&self) -> bool {
        let has_name = self
            .name
            .as_deref()
            .is_some_and(|n| !n.trim().is_empty());
        has_name || !self.experience.is_empty()
    }
}
