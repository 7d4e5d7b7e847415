//! Actions: form intents, lookup results, and UI housekeeping

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::LookupError;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Form category =====
    /// ZIP input text changed
    FormZipChange(String),

    /// Submit the form (triggers the SOAP call)
    FormSubmit,

    // ===== Lookup category =====
    /// Result: raw response body
    LookupDidLoad(String),

    /// Result: lookup failed with a user-facing message
    LookupDidError(String),

    // ===== UI category =====
    /// Scroll the response block up one line
    UiScrollUp,

    /// Scroll the response block down one line
    UiScrollDown,

    /// Jump back to the first line of the response
    UiScrollTop,

    /// Terminal resized to (columns, rows)
    UiResize(u16, u16),

    /// Force a re-render (cursor movement etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Spinner frame
    Tick,

    /// Exit the application
    Quit,
}

impl Action {
    /// Turn a finished lookup into the action that ends the loading state.
    pub fn from_lookup(result: Result<String, LookupError>) -> Self {
        match result {
            Ok(raw) => Action::LookupDidLoad(raw),
            Err(err) => Action::LookupDidError(err.user_message()),
        }
    }
}
