//! Initial state for form submission flows.

use serde::{Deserialize, Serialize};

/// UI state of a form submission: in flight, last status, and the messages
/// to render. Callers copy `FORM_ACTION_DEFAULT` and update their own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormActionState {
    pub form_process: bool,
    pub form_status: u16,
    pub form_error_message: String,
    pub form_success_message: String,
}

pub const FORM_ACTION_DEFAULT: FormActionState = FormActionState {
    form_process: false,
    form_status: 200,
    form_error_message: String::new(),
    form_success_message: String::new(),
};

impl Default for FormActionState {
    fn default() -> Self {
        FORM_ACTION_DEFAULT
    }
}

impl FormActionState {
    /// Submission started; previous messages are dropped.
    pub fn processing(&self) -> Self {
        Self {
            form_process: true,
            form_error_message: String::new(),
            form_success_message: String::new(),
            ..self.clone()
        }
    }

    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            form_process: false,
            form_status: 200,
            form_error_message: String::new(),
            form_success_message: message.into(),
        }
    }

    pub fn failed(status: u16, message: impl Into<String>) -> Self {
        Self {
            form_process: false,
            form_status: status,
            form_error_message: message.into(),
            form_success_message: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_template() {
        let state = FormActionState::default();
        assert!(!state.form_process);
        assert_eq!(state.form_status, 200);
        assert_eq!(state.form_error_message, "");
        assert_eq!(state.form_success_message, "");
        assert_eq!(state, FORM_ACTION_DEFAULT);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(FORM_ACTION_DEFAULT).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "formProcess": false,
                "formStatus": 200,
                "formErrorMessage": "",
                "formSuccessMessage": "",
            })
        );
    }

    #[test]
    fn transitions_leave_template_untouched() {
        let template = FormActionState::default();
        let busy = template.processing();
        assert!(busy.form_process);

        let failed = FormActionState::failed(422, "email already registered");
        assert!(!failed.form_process);
        assert_eq!(failed.form_status, 422);
        assert_eq!(failed.form_error_message, "email already registered");

        let retried = failed.processing();
        assert_eq!(retried.form_error_message, "");
        assert!(retried.form_process);
        assert_eq!(retried.form_status, 422);

        let done = FormActionState::succeeded("saved");
        assert_eq!(done.form_status, 200);
        assert_eq!(done.form_success_message, "saved");

        assert_eq!(template, FORM_ACTION_DEFAULT);
    }
}
