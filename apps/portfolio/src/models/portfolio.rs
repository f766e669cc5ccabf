use anyhow::{Context, Result};
use serde::Deserialize;

/// Portfolio content baked into the binary at build time.
const PORTFOLIO_JSON: &str = include_str!("../../data/portfolio.json");

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    pub personal: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education_projects: Vec<EducationProject>,
    pub education: Education,
    pub skills: Skills,
    #[serde(default)]
    pub internships: Vec<Internship>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub location: String,
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceEntry {
    pub id: u32,
    pub company: String,
    pub position: String,
    pub duration: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub featured: bool,
    pub projects: Vec<WorkProject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkProject {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub achievements: Vec<String>,
    pub link: String,
    pub image: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EducationProject {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub duration: String,
    pub achievements: Vec<String>,
    pub link: String,
    pub image: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub duration: String,
    pub cgpa: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Skills {
    pub frontend: Vec<String>,
    pub backend: Vec<String>,
    pub cloud: Vec<String>,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillCategory {
    Frontend,
    Backend,
    Cloud,
    Tools,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Frontend,
        SkillCategory::Backend,
        SkillCategory::Cloud,
        SkillCategory::Tools,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Frontend => "Frontend",
            SkillCategory::Backend => "Backend",
            SkillCategory::Cloud => "Cloud & DevOps",
            SkillCategory::Tools => "Tools & Practices",
        }
    }
}

impl Skills {
    pub fn for_category(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::Frontend => &self.frontend,
            SkillCategory::Backend => &self.backend,
            SkillCategory::Cloud => &self.cloud,
            SkillCategory::Tools => &self.tools,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Internship {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub achievements: Vec<String>,
}

impl PortfolioData {
    /// Parses the embedded portfolio record. Called once at startup.
    pub fn load() -> Result<Self> {
        Self::from_json(PORTFOLIO_JSON)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Embedded portfolio data is not valid")
    }

    /// The featured professional experience, falling back to the first entry.
    pub fn featured_experience(&self) -> Option<&ExperienceEntry> {
        self.experience
            .iter()
            .find(|e| e.featured)
            .or_else(|| self.experience.first())
    }
}
