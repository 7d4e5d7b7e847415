//! Screen geometry shared by the components and the reducer
//!
//! The reducer bounds result scrolling with the same numbers the response
//! panel draws with, so both go through these functions.

use ratatui::{
    layout::{Constraint, Flex, Layout, Margin, Rect},
    text::Span,
};

/// Rows the form needs: label, bordered input, hint, submit control.
pub const FORM_HEIGHT: u16 = 6;

/// Widest the form column gets on large terminals.
pub const MAX_COLUMN_WIDTH: u16 = 72;

/// Terminal size assumed until the first resize event arrives.
pub const DEFAULT_VIEWPORT: (u16, u16) = (80, 24);

pub struct ScreenLayout {
    pub title: Rect,
    pub form: Rect,
    pub response: Rect,
    pub status: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let rows = Layout::vertical([
        Constraint::Min(1),    // Main content
        Constraint::Length(1), // Help bar
    ])
    .split(area);

    let [column] = Layout::horizontal([Constraint::Max(MAX_COLUMN_WIDTH)])
        .flex(Flex::Center)
        .areas(rows[0]);
    let chunks = Layout::vertical([
        Constraint::Length(1),           // Spacer
        Constraint::Length(1),           // Title
        Constraint::Length(1),           // Spacer
        Constraint::Length(FORM_HEIGHT), // Form
        Constraint::Length(1),           // Spacer
        Constraint::Min(0),              // Response
    ])
    .split(column.inner(Margin::new(2, 0)));

    ScreenLayout {
        title: chunks[1],
        form: chunks[3],
        response: chunks[5],
        status: rows[1],
    }
}

/// Heading row and bordered body of the result block.
pub fn result_layout(response: Rect) -> (Rect, Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Heading
        Constraint::Min(1),    // Body
    ])
    .split(response);
    (chunks[0], chunks[1])
}

/// Text area inside the result body border, for a terminal of `viewport` size.
pub fn result_text_area(viewport: (u16, u16)) -> Rect {
    let (width, height) = viewport;
    let screen = screen_layout(Rect::new(0, 0, width, height));
    let (_, body) = result_layout(screen.response);
    body.inner(Margin::new(1, 1))
}

/// Break `raw` into rows of at most `width` columns.
///
/// Every character is kept, and a long line breaks anywhere rather than at
/// word boundaries, so the row count is exact.
pub fn wrap_rows(raw: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    for line in raw.lines() {
        let mut row = String::new();
        let mut row_width = 0;
        for ch in line.chars() {
            let ch_width = char_width(ch);
            if row_width + ch_width > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push(ch);
            row_width += ch_width;
        }
        rows.push(row);
    }
    rows
}

/// Largest scroll offset that still fills the result body.
pub fn max_result_scroll(raw: &str, text_area: Rect) -> u16 {
    let rows = wrap_rows(raw, text_area.width).len();
    let hidden = rows.saturating_sub(usize::from(text_area.height));
    u16::try_from(hidden).unwrap_or(u16::MAX)
}

fn char_width(ch: char) -> usize {
    let mut buf = [0u8; 4];
    Span::raw(&*ch.encode_utf8(&mut buf)).width()
}
