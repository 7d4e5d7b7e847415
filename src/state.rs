//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::layout::{DEFAULT_VIEWPORT, max_result_scroll, result_text_area};
use crate::soap::ZipEncoding;

/// What the output region below the form is showing.
///
/// Exactly one variant is active, so a loading form can never also carry
/// an error or a stale response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ViewState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A lookup is in flight; the submit control is disabled
    Loading,
    /// The last lookup failed with this message
    Error(String),
    /// Raw response body of the last lookup, shown verbatim
    Result(String),
}

impl ViewState {
    pub fn is_idle(&self) -> bool {
        matches!(self, ViewState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&str> {
        match self {
            ViewState::Result(raw) => Some(raw),
            _ => None,
        }
    }
}

/// Spinner frame interval while a lookup is in flight.
pub const SPINNER_TICK_MS: u64 = 80;

/// Message shown when submit is pressed on an empty ZIP field.
pub const ZIP_REQUIRED_HINT: &str = "Please fill out this field.";

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Current contents of the ZIP input
    #[debug(section = "Form", label = "ZIP")]
    pub zip: String,

    /// Whether the required-field hint is showing
    #[debug(section = "Form", label = "Missing")]
    pub zip_missing: bool,

    /// How the ZIP is written into the envelope
    #[debug(section = "Form", label = "Encoding", debug_fmt)]
    pub zip_encoding: ZipEncoding,

    /// Idle → Loading → Error/Result
    #[debug(section = "Lookup", label = "View", debug_fmt)]
    pub view: ViewState,

    // --- UI internals (skipped) ---
    /// Spinner frame counter
    #[debug(skip)]
    pub tick_count: u32,

    /// First visible line of the result block
    #[debug(skip)]
    pub result_scroll: u16,

    /// Terminal size (columns, rows); bounds result scrolling
    #[debug(skip)]
    pub viewport: (u16, u16),
}

impl AppState {
    pub fn new(zip: impl Into<String>, zip_encoding: ZipEncoding) -> Self {
        Self {
            zip: zip.into(),
            zip_missing: false,
            zip_encoding,
            view: ViewState::Idle,
            tick_count: 0,
            result_scroll: 0,
            viewport: DEFAULT_VIEWPORT,
        }
    }

    /// Submit is disabled while a lookup is in flight.
    pub fn can_submit(&self) -> bool {
        !self.view.is_loading()
    }

    /// Largest result scroll offset for the current terminal size.
    pub fn max_result_scroll(&self) -> u16 {
        self.view.result().map_or(0, |raw| {
            max_result_scroll(raw, result_text_area(self.viewport))
        })
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(String::new(), ZipEncoding::default())
    }
}
