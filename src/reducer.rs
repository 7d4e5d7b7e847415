//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::soap::build_envelope;
use crate::state::{AppState, ViewState};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Form actions =====
        Action::FormZipChange(zip) => {
            state.zip = zip;
            state.zip_missing = false;
            DispatchResult::changed()
        }

        Action::FormSubmit => {
            if !state.can_submit() {
                return DispatchResult::unchanged();
            }
            if state.zip.is_empty() {
                if state.zip_missing {
                    return DispatchResult::unchanged();
                }
                state.zip_missing = true;
                return DispatchResult::changed();
            }

            state.zip_missing = false;
            state.view = ViewState::Loading;
            state.tick_count = 0;
            state.result_scroll = 0;
            DispatchResult::changed_with(Effect::PostEnvelope {
                envelope: build_envelope(&state.zip, state.zip_encoding),
            })
        }

        // ===== Lookup actions =====
        Action::LookupDidLoad(raw) => {
            state.view = ViewState::Result(raw);
            state.result_scroll = 0;
            DispatchResult::changed()
        }

        Action::LookupDidError(msg) => {
            state.view = ViewState::Error(msg);
            state.result_scroll = 0;
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiScrollUp => {
            if state.view.result().is_none() || state.result_scroll == 0 {
                return DispatchResult::unchanged();
            }
            state.result_scroll -= 1;
            DispatchResult::changed()
        }

        Action::UiScrollDown => {
            if state.result_scroll >= state.max_result_scroll() {
                return DispatchResult::unchanged();
            }
            state.result_scroll += 1;
            DispatchResult::changed()
        }

        Action::UiScrollTop => {
            if state.result_scroll == 0 {
                return DispatchResult::unchanged();
            }
            state.result_scroll = 0;
            DispatchResult::changed()
        }

        Action::UiResize(width, height) => {
            state.viewport = (width, height);
            state.result_scroll = state.result_scroll.min(state.max_result_scroll());
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.view.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}
