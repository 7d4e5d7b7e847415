use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::Component;
use crate::action::Action;
use crate::layout::{result_layout, wrap_rows};
use crate::state::ViewState;

pub const RESPONSE_HEADING: &str = "Response:";

const ERROR_FG: Color = Color::Rgb(185, 28, 28);
const ERROR_BORDER: Color = Color::Rgb(248, 113, 113);

/// Error block or raw response, below the form
#[derive(Default)]
pub struct ResponsePanel;

pub struct ResponsePanelProps<'a> {
    pub view: &'a ViewState,
    pub scroll: u16,
}

impl ResponsePanel {
    fn render_error(frame: &mut Frame, area: Rect, message: &str) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ERROR_BORDER));
        let line = Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(ERROR_FG),
        ));
        let text_width = area.width.saturating_sub(2).max(1) as usize;
        let rows = line.width().div_ceil(text_width).max(1);
        let height = (rows as u16).saturating_add(2).min(area.height);
        let paragraph = Paragraph::new(line)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, Rect { height, ..area });
    }

    fn render_result(frame: &mut Frame, area: Rect, raw: &str, scroll: u16) {
        let (heading_area, body_area) = result_layout(area);

        let heading = Line::from(Span::styled(
            RESPONSE_HEADING,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(heading), heading_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let text_area = block.inner(body_area);
        frame.render_widget(block, body_area);

        // Verbatim: no trimming, no parsing. Rows are pre-wrapped so the
        // offset lines up with the reducer's scroll bound.
        let rows = wrap_rows(raw, text_area.width);
        let visible = usize::from(text_area.height);
        let start = usize::from(scroll).min(rows.len().saturating_sub(visible));
        let lines: Vec<Line> = rows
            .into_iter()
            .skip(start)
            .take(visible)
            .map(Line::from)
            .collect();
        frame.render_widget(Paragraph::new(lines), text_area);
    }
}

impl Component<Action> for ResponsePanel {
    type Props<'a> = ResponsePanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.height < 3 {
            return;
        }
        match props.view {
            ViewState::Error(message) => Self::render_error(frame, area, message),
            ViewState::Result(raw) if !raw.is_empty() => {
                Self::render_result(frame, area, raw, props.scroll)
            }
            ViewState::Result(_) | ViewState::Idle | ViewState::Loading => {}
        }
    }
}
