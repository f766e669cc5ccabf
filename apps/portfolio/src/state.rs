use std::sync::Arc;

use crate::api_client::health::BackendStatus;
use crate::api_client::ContactApi;
use crate::config::{AppVariant, Config};
use crate::contact::{ContactFormController, FormView, OpenForms, ValidationRules};
use crate::models::portfolio::PortfolioData;
use crate::render::{PageOptions, Theme};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once at startup, never mutated.
    pub portfolio: Arc<PortfolioData>,
    /// Contact backend. `ApiClient` in production, scripted in tests.
    pub contact_api: Arc<dyn ContactApi>,
    pub rules: ValidationRules,
    /// Set only in the health-check variant, after the startup probe.
    pub backend_status: Option<Arc<BackendStatus>>,
    /// Forms with a post currently being handled.
    pub open_forms: Arc<OpenForms>,
}

impl AppState {
    pub fn new(
        config: Config,
        portfolio: PortfolioData,
        contact_api: Arc<dyn ContactApi>,
        rules: ValidationRules,
        backend_status: Option<BackendStatus>,
    ) -> Self {
        let open_forms = Arc::new(OpenForms::new(contact_api.clone(), rules));
        Self {
            config,
            portfolio: Arc::new(portfolio),
            contact_api,
            rules,
            backend_status: backend_status.map(Arc::new),
            open_forms,
        }
    }

    /// A fresh form instance bound to the shared contact backend.
    pub fn new_contact_form(&self) -> ContactFormController {
        ContactFormController::new(self.contact_api.clone(), self.rules)
    }

    pub fn page_options<'a>(&'a self, theme: Theme, form: &'a FormView) -> PageOptions<'a> {
        PageOptions {
            theme,
            show_theme_toggle: self.config.variant == AppVariant::ThemeToggle,
            backend_status: self.backend_status.as_deref(),
            form,
        }
    }
}
