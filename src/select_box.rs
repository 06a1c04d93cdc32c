use std::io;

use crate::hosts::Record;
use crate::input::InputBuffer;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const INFO_TEXT: &str =
    "(↑/↓) move | (PgUp/PgDn) page | (Enter) select | (Esc) clear filter / quit | (Ctrl+C) quit";
const FILTER_PROMPT: &str = "Filter: ";
const ITEM_HEIGHT: u16 = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionResult {
    Chosen(String),
    Cancelled,
}

impl SelectionResult {
    pub fn host(&self) -> Option<&str> {
        match self {
            SelectionResult::Chosen(host) => Some(host),
            SelectionResult::Cancelled => None,
        }
    }
}

/// Filterable single-selection list over a fixed set of records.
///
/// The filter is always in editing mode, so typing narrows the list right
/// away. Event handling is split from drawing: [`SelectBox::handle_event`]
/// performs one state transition and [`SelectBox::select`] runs it against a
/// terminal until a result is reached.
pub struct SelectBox {
    title: String,
    data: Vec<Record>,
    // indices into `data`, in load order
    visible: Vec<usize>,
    state: ListState,
    input_buffer: InputBuffer,
    page_size: usize,
    outcome: Option<SelectionResult>,
}

impl SelectBox {
    pub fn new(title: impl Into<String>, data: Vec<Record>) -> Self {
        let visible: Vec<usize> = (0..data.len()).collect();
        let selected = if visible.is_empty() { None } else { Some(0) };
        Self {
            title: title.into(),
            visible,
            state: ListState::default().with_selected(selected),
            input_buffer: InputBuffer::new(FILTER_PROMPT.to_string()),
            page_size: 1,
            outcome: None,
            data,
        }
    }

    pub fn filter_text(&self) -> &str {
        self.input_buffer.value()
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &Record> + '_ {
        self.visible.iter().map(|&i| &self.data[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Index into the visible items, `None` when nothing is visible.
    pub fn cursor(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn current(&self) -> Option<&Record> {
        self.state
            .selected()
            .and_then(|i| self.visible.get(i))
            .map(|&i| &self.data[i])
    }

    pub fn select<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut next_event: impl FnMut() -> io::Result<Event>,
    ) -> io::Result<SelectionResult> {
        if let Some(outcome) = &self.outcome {
            return Result::Ok(outcome.clone());
        }

        loop {
            self.draw(terminal)?;
            if let Some(outcome) = self.handle_event(next_event()?) {
                // the outcome stands even if the screen cannot be cleared
                let _ = terminal.clear();
                return Result::Ok(outcome);
            }
        }
    }

    /// Applies one input event. Returns the result once the selection has
    /// finished; later events are ignored and the same result is returned.
    pub fn handle_event(&mut self, event: Event) -> Option<SelectionResult> {
        if self.outcome.is_some() {
            return self.outcome.clone();
        }

        // resize and focus events only need a redraw
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return self.finish(SelectionResult::Cancelled),
            KeyCode::Esc => {
                if self.input_buffer.value().is_empty() {
                    return self.finish(SelectionResult::Cancelled);
                }
                self.input_buffer.reset();
                self.refilter();
            }
            KeyCode::Enter => {
                // nothing to pick while the filter hides every item
                if let Some(record) = self.current() {
                    let host = record.host().to_string();
                    return self.finish(SelectionResult::Chosen(host));
                }
            }
            KeyCode::Up => self.up(),
            KeyCode::Char('p') if ctrl => self.up(),
            KeyCode::Down => self.down(),
            KeyCode::Char('n') if ctrl => self.down(),
            KeyCode::PageUp => self.move_by(-(self.page_size as isize)),
            KeyCode::PageDown => self.move_by(self.page_size as isize),
            _ => self.edit_filter(key),
        }

        None
    }

    fn finish(&mut self, outcome: SelectionResult) -> Option<SelectionResult> {
        if outcome == SelectionResult::Cancelled {
            self.input_buffer.reset();
        }
        self.outcome = Some(outcome);
        self.outcome.clone()
    }

    fn edit_filter(&mut self, key: KeyEvent) {
        if self.input_buffer.handle_event(&Event::Key(key)) {
            self.refilter();
        }
    }

    fn refilter(&mut self) {
        let needle = self.input_buffer.value().to_lowercase();
        self.visible = self
            .data
            .iter()
            .enumerate()
            .filter(|(_, record)| record.matches_filter(&needle))
            .map(|(i, _)| i)
            .collect();

        let selected = if self.visible.is_empty() { None } else { Some(0) };
        self.state.select(selected);
        *self.state.offset_mut() = 0;
    }

    fn up(&mut self) {
        self.move_by(-1);
    }

    fn down(&mut self) {
        self.move_by(1);
    }

    // clamps at both ends, no wraparound
    fn move_by(&mut self, delta: isize) {
        let Some(last) = self.visible.len().checked_sub(1) else {
            self.state.select(None);
            return;
        };
        let current = self.state.selected().unwrap_or(0);
        let next = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            current.saturating_add(delta as usize).min(last)
        };
        self.state.select(Some(next));
    }

    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| {
            self.ui(frame);
        })?;
        Result::Ok(())
    }

    fn ui(&mut self, f: &mut Frame) {
        let area = f.size().inner(&Margin {
            vertical: 1,
            horizontal: 2,
        });
        let recs = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(1),
            Constraint::Length(1), // filter
            Constraint::Length(1), // status
            Constraint::Length(1),
            Constraint::Min(0), // list
            Constraint::Length(1), // info
        ])
        .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            format!(" {} ", self.title),
            Style::default()
                .fg(Color::Rgb(0xFF, 0xFD, 0xF5))
                .bg(Color::Rgb(0x5A, 0x56, 0xE0)),
        )));

        let filter =
            Paragraph::new(self.input_buffer.line()).style(Style::default().fg(Color::Cyan));

        let status =
            Paragraph::new(self.status_text()).style(Style::default().fg(Color::DarkGray));

        let needle = self.input_buffer.value().to_lowercase();
        let host_style = Style::default().fg(Color::DarkGray);
        let items: Vec<ListItem> = self
            .visible
            .iter()
            .map(|&i| {
                let record = &self.data[i];
                ListItem::new(vec![
                    highlight_match(record.name(), &needle, Style::default()),
                    highlight_match(record.host(), &needle, host_style),
                ])
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Rgb(0xEE, 0x6F, 0xF8)))
            .highlight_symbol("│ ")
            .highlight_spacing(HighlightSpacing::Always);

        let info = Paragraph::new(Line::from(INFO_TEXT))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);

        self.page_size = usize::from((recs[5].height / ITEM_HEIGHT).max(1));

        title.render(recs[0], f.buffer_mut());
        filter.render(recs[2], f.buffer_mut());
        status.render(recs[3], f.buffer_mut());
        StatefulWidget::render(list, recs[5], f.buffer_mut(), &mut self.state);
        info.render(recs[6], f.buffer_mut());

        f.set_cursor(
            recs[2].x + self.input_buffer.visual_cursor() as u16,
            recs[2].y,
        );
    }

    fn status_text(&self) -> String {
        let noun = |n: usize| if n == 1 { "item" } else { "items" };
        if self.data.is_empty() || self.visible.is_empty() {
            "No items".to_string()
        } else if self.input_buffer.value().is_empty() {
            format!("{} {}", self.data.len(), noun(self.data.len()))
        } else {
            format!(
                "{} of {} {}",
                self.visible.len(),
                self.data.len(),
                noun(self.data.len())
            )
        }
    }
}

/// Splits `text` into spans with every occurrence of `needle` highlighted.
/// `needle` must already be lowercase.
fn highlight_match<'a>(text: &'a str, needle: &str, base: Style) -> Line<'a> {
    let lower_text = text.to_lowercase();
    // offsets in `lower_text` only line up with `text` when lowercasing kept byte lengths
    if needle.is_empty() || lower_text.len() != text.len() {
        return Line::from(Span::styled(text, base));
    }

    let match_style = base.fg(Color::Green).add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(start) = lower_text[pos..].find(needle) {
        let abs_start = pos + start;
        let abs_end = abs_start + needle.len();
        if !text.is_char_boundary(abs_start) || !text.is_char_boundary(abs_end) {
            break;
        }

        if abs_start > pos {
            spans.push(Span::styled(&text[pos..abs_start], base));
        }
        spans.push(Span::styled(&text[abs_start..abs_end], match_style));
        pos = abs_end;
    }

    if pos < text.len() {
        spans.push(Span::styled(&text[pos..], base));
    }

    Line::from(spans)
}
