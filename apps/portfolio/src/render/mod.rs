// Page rendering: one renderer for both themes. All text that reaches the
// markup goes through `html::escape`.

mod html;
pub mod theme;

pub use theme::{Theme, UnknownTheme};

use crate::api_client::health::BackendStatus;
use crate::contact::{ContactField, FormView, SubmissionStatus};
use crate::models::portfolio::{PortfolioData, SkillCategory};
use html::{achievements, escape, tags};

/// Locks the form in the browser as soon as it is submitted. Inputs become
/// read-only rather than disabled so their values are still posted.
const LOCK_ON_SUBMIT: &str = "for(const el of this.elements){if(el.type==='submit'){el.disabled=true;el.textContent='Sending...';}else{el.readOnly=true;}}";

const HERO_IMAGE: &str =
    "https://images.unsplash.com/photo-1517180102446-f3ece451e9d8?w=1920&h=1080&fit=crop";

/// Everything the page needs besides the portfolio data itself.
#[derive(Debug, Clone, Copy)]
pub struct PageOptions<'a> {
    pub theme: Theme,
    /// Show the link that switches to the other theme.
    pub show_theme_toggle: bool,
    pub backend_status: Option<&'a BackendStatus>,
    pub form: &'a FormView,
}

/// Renders the full single-page document.
pub fn render_page(data: &PortfolioData, opts: &PageOptions<'_>) -> String {
    let theme = opts.theme;
    let style = theme.style();

    let mut body = String::new();
    if opts.show_theme_toggle {
        body.push_str(&theme_toggle(theme));
    }
    if let Some(status) = opts.backend_status {
        body.push_str(&status_banner(status));
    }
    body.push_str(&format!(r#"<div class="{}">"#, style.root_class));
    body.push_str(&nav(data));
    body.push_str(&hero(data, theme));
    body.push_str(&about(data, theme));
    body.push_str(&experience(data, theme));
    body.push_str(&education_projects(data, theme));
    body.push_str(&background(data));
    body.push_str(&contact(data, theme, opts.form));
    body.push_str(&footer(data));
    body.push_str("</div>");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{name} | {title}</title>
</head>
<body class="App theme-{theme}">
{body}
</body>
</html>
"#,
        name = escape(&data.personal.name),
        title = escape(&data.personal.title),
        theme = theme.as_str(),
    )
}

fn theme_toggle(theme: Theme) -> String {
    let next = theme.toggled();
    format!(
        r#"<div class="theme-toggle-container"><a class="theme-toggle-btn" href="/?theme={}">Switch to {} Design</a></div>"#,
        next.as_str(),
        next.display_name()
    )
}

fn status_banner(status: &BackendStatus) -> String {
    let class = if status.reachable { "ok" } else { "down" };
    format!(
        r#"<div class="backend-status {class}" data-checked-at="{}">{}</div>"#,
        status.checked_at.to_rfc3339(),
        escape(&status.summary())
    )
}

fn nav(data: &PortfolioData) -> String {
    format!(
        r##"<nav class="portfolio-nav"><div class="nav-container"><div class="nav-brand"><span class="brand-text">{}</span></div><div class="nav-links"><a href="#hero" class="nav-link">Home</a><a href="#about" class="nav-link">About</a><a href="#experience" class="nav-link">Experience</a><a href="#projects" class="nav-link">Projects</a><a href="#contact" class="nav-link">Contact</a></div></div></nav>"##,
        escape(&data.personal.name)
    )
}

fn hero(data: &PortfolioData, theme: Theme) -> String {
    let style = theme.style();
    let p = &data.personal;
    let visual = match theme {
        Theme::Monochrome => format!(
            r#"<div class="hero-background"><img src="{HERO_IMAGE}" alt="Developer workspace" class="hero-image"><div class="hero-overlay"></div></div>"#
        ),
        Theme::Colorful => {
            let projects: usize = data.experience.iter().map(|e| e.projects.len()).sum::<usize>()
                + data.education_projects.len();
            format!(
                r#"<div class="hero-stats"><div class="stat"><span class="stat-number">{projects}+</span><span class="stat-label">Projects</span></div><div class="stat"><span class="stat-number">{}</span><span class="stat-label">CGPA</span></div></div>"#,
                escape(&data.education.cgpa)
            )
        }
    };
    format!(
        r##"<section id="hero" class="hero-section">{visual}<div class="hero-content"><div class="hero-text"><h1 class="hero-title">{}</h1><p class="hero-subtitle">{}</p><p class="hero-description">{}</p><div class="hero-cta"><a href="#experience" class="{}">View My Work</a><a href="#contact" class="{}">{}</a></div></div></div></section>"##,
        escape(&p.name),
        escape(&p.title),
        escape(&p.summary),
        style.primary_button,
        style.secondary_button,
        style.secondary_cta,
    )
}

fn about(data: &PortfolioData, theme: Theme) -> String {
    let style = theme.style();
    let p = &data.personal;

    let skills: String = SkillCategory::ALL
        .iter()
        .map(|&category| {
            let items = data.skills.for_category(category);
            let shown = match (category, style.backend_skill_limit) {
                (SkillCategory::Backend, Some(limit)) => &items[..limit.min(items.len())],
                _ => items,
            };
            format!(
                r#"<div class="skill-category"><div class="skill-header"><h3>{}</h3></div><div class="skill-tags">{}</div></div>"#,
                category.label(),
                tags("skill-tag", shown)
            )
        })
        .collect();

    format!(
        r#"<section id="about" class="about-section"><div class="container"><div class="section-header"><h2 class="section-title">{}</h2><p class="section-subtitle">{}</p></div><div class="about-grid"><div class="about-content"><div class="contact-info"><div class="contact-item">{}</div><div class="contact-item">{}</div><div class="contact-item">{}</div></div></div><div class="skills-section">{skills}</div></div></div></section>"#,
        style.about_title,
        style.about_subtitle,
        escape(&p.email),
        escape(&p.phone),
        escape(&p.location),
    )
}

fn experience(data: &PortfolioData, theme: Theme) -> String {
    let style = theme.style();
    let Some(featured) = data.featured_experience() else {
        return String::new();
    };

    let cards: String = featured
        .projects
        .iter()
        .map(|project| {
            format!(
                r#"<div class="project-card"><div class="project-image"><img src="{}" alt="{}"><div class="project-overlay"><a href="{}" class="project-link">Open</a></div></div><div class="project-content"><div class="project-header"><h3 class="project-title">{}</h3><span class="company-badge">{}</span></div><p class="project-description">{}</p><div class="project-tech">{}</div><div class="project-achievements">{}</div></div></div>"#,
                escape(&project.image),
                escape(&project.name),
                escape(&project.link),
                escape(&project.name),
                escape(&featured.company),
                escape(&project.description),
                tags("tech-tag", &project.technologies),
                achievements(&project.achievements, style.achievements_per_project),
            )
        })
        .collect();

    format!(
        r#"<section id="experience" class="experience-section"><div class="container"><div class="section-header"><h2 class="section-title">{}</h2><p class="section-subtitle">{} at {}, {}</p></div><div class="experience-grid">{cards}</div></div></section>"#,
        style.experience_title,
        escape(&featured.position),
        escape(&featured.company),
        escape(&featured.duration),
    )
}

fn education_projects(data: &PortfolioData, theme: Theme) -> String {
    let style = theme.style();
    let cards: String = data
        .education_projects
        .iter()
        .map(|project| {
            format!(
                r#"<div class="education-project-card"><div class="project-image"><img src="{}" alt="{}"></div><div class="project-content"><div class="project-header"><h3 class="project-title">{}</h3><span class="duration-badge">{}</span></div><p class="project-description">{}</p><div class="project-tech">{}</div><div class="project-achievements">{}</div></div></div>"#,
                escape(&project.image),
                escape(&project.name),
                escape(&project.name),
                escape(&project.duration),
                escape(&project.description),
                tags("tech-tag", &project.technologies),
                achievements(&project.achievements, style.achievements_per_project),
            )
        })
        .collect();

    let inner = format!(
        r#"<div class="section-header"><h2 class="section-title">Education Projects</h2><p class="section-subtitle">{}</p></div><div class="education-projects-grid">{cards}</div>"#,
        style.education_subtitle
    );

    // Monochrome keeps academic work behind a disclosure, colorful shows it inline.
    let body = match theme {
        Theme::Monochrome => format!(
            r#"<details class="all-projects-section"><summary class="toggle-projects-btn">View All Projects</summary>{inner}</details>"#
        ),
        Theme::Colorful => inner,
    };

    format!(
        r#"<section id="projects" class="projects-section"><div class="container">{body}</div></section>"#
    )
}

fn background(data: &PortfolioData) -> String {
    let edu = &data.education;
    let mut out = format!(
        r#"<section id="background" class="background-section"><div class="container"><div class="education-card"><h3>{}</h3><p>{}</p><p>{} | CGPA {}</p></div>"#,
        escape(&edu.degree),
        escape(&edu.institution),
        escape(&edu.duration),
        escape(&edu.cgpa),
    );

    if !data.internships.is_empty() {
        out.push_str(r#"<div class="internships"><h3>Internships</h3>"#);
        for internship in &data.internships {
            out.push_str(&format!(
                r#"<div class="internship"><h4>{} at {}</h4><span class="duration-badge">{}</span>{}</div>"#,
                escape(&internship.position),
                escape(&internship.company),
                escape(&internship.duration),
                achievements(&internship.achievements, None),
            ));
        }
        out.push_str("</div>");
    }

    for (title, class, items) in [
        ("Achievements", "achievements", &data.achievements),
        ("Certifications", "certifications", &data.certifications),
        ("Activities", "activities", &data.activities),
    ] {
        if items.is_empty() {
            continue;
        }
        let list: String = items
            .iter()
            .map(|i| format!("<li>{}</li>", escape(i)))
            .collect();
        out.push_str(&format!(
            r#"<div class="{class}"><h3>{title}</h3><ul>{list}</ul></div>"#
        ));
    }

    out.push_str("</div></section>");
    out
}

fn contact(data: &PortfolioData, theme: Theme, form: &FormView) -> String {
    let style = theme.style();
    let p = &data.personal;
    format!(
        r#"<section id="contact" class="contact-section"><div class="container"><div class="contact-grid"><div class="contact-content"><h2 class="contact-title">{}</h2><p class="contact-description">Ready to bring your next project to life? Let's discuss how we can create something amazing together.</p><div class="contact-methods"><a href="mailto:{email}" class="contact-method">{email}</a><a href="tel:{phone}" class="contact-method">{phone}</a><a href="{}" class="contact-method">LinkedIn Profile</a><a href="{}" class="contact-method">GitHub Profile</a></div></div>{}</div></div></section>"#,
        style.contact_title,
        escape(&p.linkedin),
        escape(&p.github),
        contact_form(theme, form),
        email = escape(&p.email),
        phone = escape(&p.phone),
    )
}

/// The contact form. Inputs and the submit button are disabled while a
/// submission is in flight, both in the served markup and in the browser
/// once the visitor submits.
fn contact_form(theme: Theme, form: &FormView) -> String {
    let disabled = if form.is_submitting { " disabled" } else { "" };

    let notice = match &form.notice {
        Some(text) => {
            let class = if form.status == SubmissionStatus::Succeeded {
                "success"
            } else {
                "error"
            };
            format!(
                r#"<div class="form-notice {class}" role="status">{}</div>"#,
                escape(text)
            )
        }
        None => String::new(),
    };

    let groups: String = ContactField::ALL
        .iter()
        .map(|&field| {
            let value = escape(form.fields.get(field));
            let error = form.errors.get(&field);
            let error_class = if error.is_some() { " error" } else { "" };
            let name = field.as_str();
            let control = match field {
                ContactField::Name => format!(
                    r#"<input type="text" name="{name}" class="form-input{error_class}" placeholder="Your name" value="{value}"{disabled}>"#
                ),
                ContactField::Email => format!(
                    r#"<input type="email" name="{name}" class="form-input{error_class}" placeholder="your.email@example.com" value="{value}"{disabled}>"#
                ),
                ContactField::Message => format!(
                    r#"<textarea name="{name}" class="form-textarea{error_class}" rows="4" placeholder="Tell me about your project..."{disabled}>{value}</textarea>"#
                ),
            };
            let error_html = error
                .map(|msg| format!(r#"<span class="error-message">{}</span>"#, escape(msg)))
                .unwrap_or_default();
            format!(
                r#"<div class="form-group"><label class="form-label">{}</label>{control}{error_html}</div>"#,
                field.label()
            )
        })
        .collect();

    let button_label = if form.is_submitting {
        "Sending..."
    } else {
        "Send Message"
    };

    format!(
        r#"<div class="contact-form-container"><form class="contact-form" method="post" action="/contact" onsubmit="{LOCK_ON_SUBMIT}">{notice}<input type="hidden" name="form_id" value="{}"><input type="hidden" name="theme" value="{}">{groups}<button type="submit" class="{} contact-submit"{disabled}>{button_label}</button></form></div>"#,
        form.form_id,
        theme.as_str(),
        theme.style().primary_button,
    )
}

fn footer(data: &PortfolioData) -> String {
    format!(
        r#"<footer class="portfolio-footer"><p>{} | {}</p></footer>"#,
        escape(&data.personal.name),
        escape(&data.personal.title)
    )
}
