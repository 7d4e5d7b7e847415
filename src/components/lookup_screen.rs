use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, LookupForm, LookupFormProps, ResponsePanel, ResponsePanelProps};
use crate::action::Action;
use crate::layout::screen_layout;
use crate::state::AppState;

pub const TITLE: &str = "Weather SOAP API Demo";

/// Props for LookupScreen - read-only view of state
pub struct LookupScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Title, form, response panel and key hints
#[derive(Default)]
pub struct LookupScreen {
    form: LookupForm,
    response: ResponsePanel,
}

impl LookupScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for LookupScreen {
    type Props<'a> = LookupScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Esc => return vec![Action::Quit],
                KeyCode::Char('c') if ctrl => return vec![Action::Quit],
                KeyCode::Up | KeyCode::PageUp => return vec![Action::UiScrollUp],
                KeyCode::Down | KeyCode::PageDown => return vec![Action::UiScrollDown],
                KeyCode::Home if ctrl => return vec![Action::UiScrollTop],
                _ => {}
            }
        }

        let state = props.state;
        let form_props = LookupFormProps {
            zip: &state.zip,
            zip_missing: state.zip_missing,
            is_loading: state.view.is_loading(),
            tick_count: state.tick_count,
            is_focused: true,
        };
        self.form
            .handle_event(event, form_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: LookupScreenProps<'_>) {
        let state = props.state;
        let layout = screen_layout(area);

        let title = Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(title), layout.title);

        self.form.render(
            frame,
            layout.form,
            LookupFormProps {
                zip: &state.zip,
                zip_missing: state.zip_missing,
                is_loading: state.view.is_loading(),
                tick_count: state.tick_count,
                is_focused: props.is_focused,
            },
        );

        self.response.render(
            frame,
            layout.response,
            ResponsePanelProps {
                view: &state.view,
                scroll: state.result_scroll,
            },
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            layout.status,
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "submit"),
                    StatusBarHint::new("pgup/pgdn", "scroll"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
