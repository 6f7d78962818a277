/// Form view abstraction
///
/// Everything the validator and dispatcher do to the page goes through
/// [`FormView`]. [`HeadlessForm`] keeps the page state in memory and is used
/// by the CLI and by tests.
use contactflow_core::models::{Field, FormFields};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Page side effects of the contact form
pub trait FormView: Send + Sync {
    /// Current field values as typed by the user
    fn values(&self) -> FormFields;

    /// Replaces one field value; services take a `, `-separated list
    fn set_value(&self, field: Field, value: &str);

    /// Marks the field's container as errored and shows the message
    fn show_field_error(&self, field: Field, message: &str);

    fn clear_field_error(&self, field: Field);

    /// Toggles the busy indicator; entering loading hides any banner
    fn set_loading(&self, loading: bool);

    fn show_success(&self, message: &str);

    fn show_error(&self, message: &str);

    fn hide_messages(&self);

    /// Clears every value and every field error
    fn reset(&self);

    /// Hidden form token, if one was attached
    fn csrf_token(&self) -> Option<String>;

    fn set_csrf_token(&self, token: &str);
}

/// Banner shown above the submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

#[derive(Debug, Default)]
struct HeadlessState {
    values: FormFields,
    errors: BTreeMap<Field, String>,
    loading: bool,
    banner: Option<Banner>,
    history: Vec<Banner>,
    resets: usize,
    csrf_token: Option<String>,
}

/// In-memory form
#[derive(Debug, Default)]
pub struct HeadlessForm {
    state: Mutex<HeadlessState>,
}

impl HeadlessForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form prefilled with the given values
    pub fn with_values(values: FormFields) -> Self {
        let form = Self::default();
        form.lock().values = values;
        form
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HeadlessState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn field_error(&self, field: Field) -> Option<String> {
        self.lock().errors.get(&field).cloned()
    }

    pub fn field_errors(&self) -> BTreeMap<Field, String> {
        self.lock().errors.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Banner currently visible
    pub fn banner(&self) -> Option<Banner> {
        self.lock().banner.clone()
    }

    /// Every banner ever shown, oldest first
    pub fn banner_history(&self) -> Vec<Banner> {
        self.lock().history.clone()
    }

    pub fn reset_count(&self) -> usize {
        self.lock().resets
    }
}

impl FormView for HeadlessForm {
    fn values(&self) -> FormFields {
        self.lock().values.clone()
    }

    fn set_value(&self, field: Field, value: &str) {
        let mut state = self.lock();
        let values = &mut state.values;
        match field {
            Field::Name => values.name = value.to_string(),
            Field::Email => values.email = value.to_string(),
            Field::Phone => values.phone = value.to_string(),
            Field::BusinessType => values.business_type = value.to_string(),
            Field::Services => {
                values.services = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            }
            Field::Message => values.message = value.to_string(),
        }
    }

    fn show_field_error(&self, field: Field, message: &str) {
        self.lock().errors.insert(field, message.to_string());
    }

    fn clear_field_error(&self, field: Field) {
        self.lock().errors.remove(&field);
    }

    fn set_loading(&self, loading: bool) {
        let mut state = self.lock();
        state.loading = loading;
        if loading {
            state.banner = None;
        }
    }

    fn show_success(&self, message: &str) {
        let mut state = self.lock();
        let banner = Banner::Success(message.to_string());
        state.history.push(banner.clone());
        state.banner = Some(banner);
    }

    fn show_error(&self, message: &str) {
        let mut state = self.lock();
        let banner = Banner::Error(message.to_string());
        state.history.push(banner.clone());
        state.banner = Some(banner);
    }

    fn hide_messages(&self) {
        self.lock().banner = None;
    }

    fn reset(&self) {
        let mut state = self.lock();
        state.values = FormFields::default();
        state.errors.clear();
        state.resets += 1;
    }

    fn csrf_token(&self) -> Option<String> {
        self.lock().csrf_token.clone()
    }

    fn set_csrf_token(&self, token: &str) {
        self.lock().csrf_token = Some(token.to_string());
    }
}
