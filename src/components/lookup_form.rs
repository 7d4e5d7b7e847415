use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;
use crate::state::ZIP_REQUIRED_HINT;

pub const ZIP_LABEL: &str = "Enter ZIP Code";
pub const ZIP_PLACEHOLDER: &str = "Enter ZIP code";
pub const SUBMIT_LABEL: &str = "Get Weather";

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const ACCENT: Color = Color::Rgb(37, 99, 235);
const ACCENT_DIM: Color = Color::Rgb(96, 125, 180);

/// ZIP field plus submit control
pub struct LookupForm {
    input: TextInput,
}

pub struct LookupFormProps<'a> {
    pub zip: &'a str,
    pub zip_missing: bool,
    pub is_loading: bool,
    pub tick_count: u32,
    pub is_focused: bool,
}

impl Default for LookupForm {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl LookupForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn submit_line(is_loading: bool, tick_count: u32) -> Line<'static> {
        if is_loading {
            let frame = SPINNER_FRAMES[tick_count as usize % SPINNER_FRAMES.len()];
            let style = Style::default()
                .fg(Color::White)
                .bg(ACCENT_DIM)
                .add_modifier(Modifier::DIM);
            Line::from(Span::styled(format!("      {frame}      "), style)).centered()
        } else {
            let style = Style::default()
                .fg(Color::White)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD);
            Line::from(Span::styled(format!("  {SUBMIT_LABEL}  "), style)).centered()
        }
    }
}

fn submit(_: String) -> Action {
    Action::FormSubmit
}

impl Component<Action> for LookupForm {
    type Props<'a> = LookupFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            if key.code == crossterm::event::KeyCode::Enter {
                // Disabled while a lookup is in flight
                return if props.is_loading {
                    Vec::new()
                } else {
                    vec![Action::FormSubmit]
                };
            }
        }

        let input_props = TextInputProps {
            value: props.zip,
            placeholder: ZIP_PLACEHOLDER,
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::xy(1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: Action::FormZipChange,
            on_submit: submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Label
            Constraint::Length(3), // Input
            Constraint::Length(1), // Required hint
            Constraint::Length(1), // Submit
        ])
        .split(area);

        let label = Line::from(Span::styled(
            ZIP_LABEL,
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(label), chunks[0]);

        let border = if props.is_focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);
        let input_props = TextInputProps {
            value: props.zip,
            placeholder: ZIP_PLACEHOLDER,
            is_focused: props.is_focused,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::xy(1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: Action::FormZipChange,
            on_submit: submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, inner, input_props);

        if props.zip_missing {
            let hint = Line::from(Span::styled(
                ZIP_REQUIRED_HINT,
                Style::default().fg(Color::Yellow),
            ));
            frame.render_widget(Paragraph::new(hint), chunks[2]);
        }

        frame.render_widget(
            Paragraph::new(Self::submit_line(props.is_loading, props.tick_count)),
            chunks[3],
        );
    }
}
