// Contact form: field model, validation rules, the submission state machine
// with its registry of open instances, and the HTTP handler that drives it.

pub mod controller;
pub mod fields;
pub mod handlers;
pub mod registry;
pub mod validation;

pub use controller::{ContactFormController, FormView, SubmissionStatus, SubmitOutcome};
pub use fields::ContactField;
pub use registry::OpenForms;
pub use validation::ValidationRules;
