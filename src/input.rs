use crossterm::event::Event;
use std::ops::{Deref, DerefMut};
use unicode_width::UnicodeWidthStr;

use tui_input::{backend::crossterm::EventHandler, Input};

pub(crate) struct InputBuffer {
    pub(crate) input: Input,
    pub(crate) prompt: String,
}

impl Deref for InputBuffer {
    type Target = Input;

    fn deref(&self) -> &Self::Target {
        &self.input
    }
}

impl DerefMut for InputBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.input
    }
}

impl InputBuffer {
    pub fn new(prompt: String) -> Self {
        Self {
            input: Input::default(),
            prompt,
        }
    }

    /// Prompt followed by the typed text, as rendered.
    pub(crate) fn line(&self) -> String {
        self.prompt.clone() + self.input.value()
    }

    pub(crate) fn visual_cursor(&self) -> usize {
        UnicodeWidthStr::width(self.prompt.as_str()) + self.input.visual_cursor()
    }

    /// Returns true when the typed text changed.
    pub(crate) fn handle_event(&mut self, event: &Event) -> bool {
        self.input
            .handle_event(event)
            .map(|changed| changed.value)
            .unwrap_or(false)
    }
}
