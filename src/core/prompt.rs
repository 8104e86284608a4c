//! Show/hide text prompt surface shared by interactables and transition zones.
use bevy::{log::debug, prelude::*};

/// A surface able to display a single line of prompt text.
pub trait PromptSurface: Send + Sync {
    fn show(&mut self, text: &str);

    fn hide(&mut self);

    fn current(&self) -> Option<&str>;
}

/// Keeps the visible prompt text for the HUD to render.
#[derive(Debug, Default)]
pub struct ScreenPrompt {
    text: Option<String>,
}

impl PromptSurface for ScreenPrompt {
    fn show(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }

    fn hide(&mut self) {
        self.text = None;
    }

    fn current(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Resource wrapping the active prompt surface.
#[derive(Resource)]
pub struct PromptService {
    surface: Box<dyn PromptSurface>,
}

impl PromptService {
    pub fn new(surface: Box<dyn PromptSurface>) -> Self {
        Self { surface }
    }

    pub fn show(&mut self, text: &str) {
        debug!(target: "prompt", "show: {}", text);
        self.surface.show(text);
    }

    pub fn hide(&mut self) {
        debug!(target: "prompt", "hide");
        self.surface.hide();
    }

    pub fn current(&self) -> Option<&str> {
        self.surface.current()
    }
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new(Box::new(ScreenPrompt::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_prompt_tracks_latest_text() {
        let mut prompt = PromptService::default();
        assert_eq!(prompt.current(), None);

        prompt.show("Press E to pick up");
        prompt.show("Press E to place");
        assert_eq!(prompt.current(), Some("Press E to place"));

        prompt.hide();
        assert_eq!(prompt.current(), None);
    }
}
