//! Form instances shared across requests.
//!
//! Every rendered form carries a `form_id`. Posts with the same id share one
//! controller while any of them is still being handled, so a double submit
//! hits the controller's in-flight gate instead of starting a second call.
//! An entry is dropped as soon as its last request finishes, which keeps the
//! map bounded by the number of requests in progress.

use std::collections::HashMap;
use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;
use uuid::Uuid;

use crate::api_client::ContactApi;
use crate::contact::controller::ContactFormController;
use crate::contact::validation::ValidationRules;

struct Entry {
    form: Arc<ContactFormController>,
    holders: usize,
}

pub struct OpenForms {
    api: Arc<dyn ContactApi>,
    rules: ValidationRules,
    forms: Mutex<HashMap<Uuid, Entry>>,
}

impl OpenForms {
    pub fn new(api: Arc<dyn ContactApi>, rules: ValidationRules) -> Self {
        Self {
            api,
            rules,
            forms: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Entry>> {
        self.forms.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the open controller for `id`, mounting a fresh one if no
    /// request currently holds it. The entry lives until the returned handle
    /// and every other handle for the same id are dropped.
    pub fn checkout(&self, id: Uuid) -> OpenForm<'_> {
        let mut forms = self.lock();
        let entry = forms.entry(id).or_insert_with(|| Entry {
            form: Arc::new(ContactFormController::with_id(
                id,
                self.api.clone(),
                self.rules,
            )),
            holders: 0,
        });
        entry.holders += 1;
        if entry.holders > 1 {
            debug!(form_id = %id, holders = entry.holders, "Form already open");
        }

        OpenForm {
            registry: self,
            id,
            form: entry.form.clone(),
        }
    }

    fn release(&self, id: Uuid) {
        let mut forms = self.lock();
        if let Some(entry) = forms.get_mut(&id) {
            entry.holders = entry.holders.saturating_sub(1);
            if entry.holders == 0 {
                forms.remove(&id);
            }
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().len()
    }
}

/// A checked-out form. Dereferences to its controller; dropping it releases
/// the registry entry, including when the request is cancelled mid-submit.
pub struct OpenForm<'a> {
    registry: &'a OpenForms,
    id: Uuid,
    form: Arc<ContactFormController>,
}

impl Deref for OpenForm<'_> {
    type Target = ContactFormController;

    fn deref(&self) -> &ContactFormController {
        &self.form
    }
}

impl Drop for OpenForm<'_> {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::models::contact::{ContactPayload, FailureKind, FieldErrors, SubmissionResult};

    struct NeverCalled;

    #[async_trait]
    impl ContactApi for NeverCalled {
        async fn submit_contact(&self, _contact: &ContactPayload) -> SubmissionResult {
            SubmissionResult::failed(
                FailureKind::UnexpectedClientFailure,
                "should not be called",
                FieldErrors::new(),
            )
        }
    }

    fn registry() -> OpenForms {
        OpenForms::new(Arc::new(NeverCalled), ValidationRules::default())
    }

    #[test]
    fn test_same_id_shares_one_controller() {
        let forms = registry();
        let id = Uuid::new_v4();
        let first = forms.checkout(id);
        let second = forms.checkout(id);

        assert!(Arc::ptr_eq(&first.form, &second.form));
        assert_eq!(first.id(), id);
        assert_eq!(forms.len(), 1);

        first.handle_input_change("name", "Ada");
        assert_eq!(second.view().fields.name, "Ada");
    }

    #[test]
    fn test_entry_lives_until_last_holder_drops() {
        let forms = registry();
        let id = Uuid::new_v4();
        let first = forms.checkout(id);
        let second = forms.checkout(id);

        drop(second);
        assert_eq!(forms.len(), 1);

        drop(first);
        assert_eq!(forms.len(), 0);
    }

    #[test]
    fn test_released_id_mounts_a_fresh_form() {
        let forms = registry();
        let id = Uuid::new_v4();
        {
            let form = forms.checkout(id);
            form.handle_input_change("name", "Ada");
        }
        let again = forms.checkout(id);
        assert_eq!(again.view().fields.name, "");
    }

    #[test]
    fn test_distinct_ids_are_independent() {
        let forms = registry();
        let a = forms.checkout(Uuid::new_v4());
        let b = forms.checkout(Uuid::new_v4());
        assert!(!Arc::ptr_eq(&a.form, &b.form));
        assert_eq!(forms.len(), 2);
    }
}
