use axum::{extract::State, response::Html, Form};
use tracing::{debug, info};
use uuid::Uuid;

use crate::contact::SubmitOutcome;
use crate::errors::AppError;
use crate::render::{render_page, Theme};
use crate::state::AppState;

/// POST /contact
///
/// The posted `form_id` selects the form instance. Posts for a form that is
/// already being handled share its controller, so a resubmit during the
/// network call is refused and answered with the in-flight (disabled) form.
/// Posted values are replayed through the controller as edits, submitted, and
/// the page is re-rendered with whatever errors or notice resulted. Unknown
/// form keys are ignored by the controller.
pub async fn handle_contact_submit(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let lookup = |name: &str| {
        pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    };
    let theme = Theme::resolve(lookup("theme"), state.config.default_theme)?;
    let form_id = lookup("form_id")
        .and_then(|raw| raw.parse::<Uuid>().ok())
        .unwrap_or_else(Uuid::new_v4);

    let form = state.open_forms.checkout(form_id);
    for (key, value) in &pairs {
        if key != "theme" && key != "form_id" {
            form.handle_input_change(key, value.as_str());
        }
    }

    match form.handle_submit().await {
        SubmitOutcome::Sent(result) => {
            info!(form_id = %form_id, success = result.success, "Contact form processed");
        }
        SubmitOutcome::Invalid(errors) => {
            debug!(invalid_fields = errors.len(), "Contact form rejected locally");
        }
        SubmitOutcome::AlreadySubmitting => {
            info!(form_id = %form_id, "Duplicate contact post while a submission is in flight");
        }
    }

    let view = form.view();
    drop(form);
    Ok(Html(render_page(
        &state.portfolio,
        &state.page_options(theme, &view),
    )))
}
