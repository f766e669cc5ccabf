use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The two visual variants of the site. Both render the same content; only
/// class names, copy, and a few density choices differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Monochrome,
    Colorful,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown theme '{0}' (expected 'monochrome' or 'colorful')")]
pub struct UnknownTheme(pub String);

/// Theme-specific copy and class names.
#[derive(Debug, Clone, Copy)]
pub struct ThemeStyle {
    pub root_class: &'static str,
    pub primary_button: &'static str,
    pub secondary_button: &'static str,
    pub secondary_cta: &'static str,
    pub about_title: &'static str,
    pub about_subtitle: &'static str,
    pub experience_title: &'static str,
    pub education_subtitle: &'static str,
    pub contact_title: &'static str,
    /// Cap on backend skills shown in the about section.
    pub backend_skill_limit: Option<usize>,
    /// Cap on achievements shown per project card.
    pub achievements_per_project: Option<usize>,
}

const MONOCHROME: ThemeStyle = ThemeStyle {
    root_class: "monochrome-portfolio",
    primary_button: "btn-primary",
    secondary_button: "btn-secondary",
    secondary_cta: "Get In Touch",
    about_title: "About Me",
    about_subtitle: "Passionate developer crafting digital solutions",
    experience_title: "Professional Experience",
    education_subtitle: "Academic and learning projects",
    contact_title: "Let's Work Together",
    backend_skill_limit: Some(8),
    achievements_per_project: Some(2),
};

const COLORFUL: ThemeStyle = ThemeStyle {
    root_class: "colorful-portfolio",
    primary_button: "btn-primary-colorful",
    secondary_button: "btn-secondary-colorful",
    secondary_cta: "Let's Connect",
    about_title: "Crafting Digital Experiences",
    about_subtitle: "Passionate about creating innovative solutions that make a difference",
    experience_title: "Production Projects",
    education_subtitle: "Learning and development projects during my academic journey",
    contact_title: "Let's Build Something Amazing",
    backend_skill_limit: None,
    achievements_per_project: None,
};

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Monochrome => "monochrome",
            Theme::Colorful => "colorful",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Monochrome => "Modern Monochrome",
            Theme::Colorful => "Tech Colorful",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Monochrome => Theme::Colorful,
            Theme::Colorful => Theme::Monochrome,
        }
    }

    pub fn style(&self) -> &'static ThemeStyle {
        match self {
            Theme::Monochrome => &MONOCHROME,
            Theme::Colorful => &COLORFUL,
        }
    }

    /// Picks the theme for one request: an explicit choice wins over the
    /// configured default. Blank values count as "no choice".
    pub fn resolve(requested: Option<&str>, default: Theme) -> Result<Theme, UnknownTheme> {
        match requested.map(str::trim).filter(|s| !s.is_empty()) {
            Some(name) => name.parse(),
            None => Ok(default),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monochrome" => Ok(Theme::Monochrome),
            "colorful" => Ok(Theme::Colorful),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}
