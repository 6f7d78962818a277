/// Form validator bound to a view
use crate::security::{SessionStore, verify_csrf_token};
use crate::view::FormView;
use contactflow_core::models::{Field, FormFields};
use contactflow_core::rules::validate_field;
use std::sync::Arc;
use tracing::debug;

/// Runs the fixed rule table against a form and mirrors the result onto the view
#[derive(Clone, Default)]
pub struct FormValidator {
    session: Option<Arc<dyn SessionStore>>,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator that also requires the form token issued for this session
    pub fn with_session(session: Arc<dyn SessionStore>) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Validates one field of `fields`, showing or clearing its error
    pub fn check_field(&self, field: Field, fields: &FormFields, view: &dyn FormView) -> bool {
        let result = validate_field(field, &fields.value(field));
        match &result.error {
            Some(message) => view.show_field_error(field, message),
            None => view.clear_field_error(field),
        }
        result.valid
    }

    /// Validates every field without stopping early
    ///
    /// A token mismatch makes the form invalid without marking any field.
    pub fn validate_form(&self, fields: &FormFields, view: &dyn FormView) -> bool {
        let mut valid = true;
        for field in Field::ALL {
            if !self.check_field(field, fields, view) {
                debug!(field = %field, "Field failed validation");
                valid = false;
            }
        }

        if let Some(session) = &self.session {
            if verify_csrf_token(session.as_ref(), view.csrf_token().as_deref()).is_err() {
                valid = false;
            }
        }

        valid
    }
}
