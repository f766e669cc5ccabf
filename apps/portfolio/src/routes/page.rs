use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::render::{render_page, Theme};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub theme: Option<String>,
}

/// GET /
/// Renders the portfolio with an empty contact form.
pub async fn page_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let theme = Theme::resolve(query.theme.as_deref(), state.config.default_theme)?;
    let form = state.new_contact_form().view();
    Ok(Html(render_page(
        &state.portfolio,
        &state.page_options(theme, &form),
    )))
}
