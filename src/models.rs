use std::fmt;

use serde::{Deserialize, Serialize};

/// Sections of the page, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Hero,
    Skills,
    Projects,
    Research,
    Awards,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Hero,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Research,
        SectionId::Awards,
        SectionId::Contact,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Research => "research",
            SectionId::Awards => "awards",
            SectionId::Contact => "contact",
        }
    }

    pub fn anchor(self) -> Anchor {
        Anchor(format!("#{}", self.name()))
    }
}

/// In-page anchor of the form `#section-name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Anchor(pub String);

impl Anchor {
    pub fn new(href: impl Into<String>) -> Self {
        Self(href.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the anchor to the section it targets, if any.
    pub fn section(&self) -> Option<SectionId> {
        let name = self.0.strip_prefix('#')?;
        SectionId::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub tagline: String,
    pub phone: String,
    pub email: String,
    pub linkedin: String,
    pub location: String,
}

impl Profile {
    /// Initials shown as the header logo.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub label: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status label attached to projects and research items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    Completed,
    Published,
    InProgress,
    Other(String),
}

impl From<String> for ProjectStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Completed" => ProjectStatus::Completed,
            "Published" => ProjectStatus::Published,
            "In Progress" => ProjectStatus::InProgress,
            _ => ProjectStatus::Other(value),
        }
    }
}

impl From<ProjectStatus> for String {
    fn from(value: ProjectStatus) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Completed => f.write_str("Completed"),
            ProjectStatus::Published => f.write_str("Published"),
            ProjectStatus::InProgress => f.write_str("In Progress"),
            ProjectStatus::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub impact: String,
    pub category: String,
    pub status: ProjectStatus,
    pub description: String,
    pub key_features: Vec<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchItem {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub title: String,
    pub organization: String,
    pub year: String,
}

/// Admired company. Illustrative only, no employment relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub description: String,
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    pub name: String,
    pub href: Anchor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatMetric {
    pub label: String,
    pub value: String,
}
