use std::fmt;

use crate::domain::Story;
use crate::presenter::StoryView;

/// Why the list has nothing to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoConnection,
    NoStories,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            EmptyState::NoConnection => "No internet connection.",
            EmptyState::NoStories => "No news found.",
        }
    }
}

impl fmt::Display for EmptyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// In-memory model of the story list.
///
/// Every delivery replaces the previous contents, so re-delivering the same
/// result never duplicates rows.
#[derive(Debug, Clone, Default)]
pub struct StoryList {
    stories: Vec<Story>,
    empty_state: Option<EmptyState>,
    loading: bool,
}

impl StoryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn get(&self, index: usize) -> Option<&Story> {
        self.stories.get(index)
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        self.empty_state
    }

    /// Text to show in place of the list, if any
    pub fn message(&self) -> Option<&'static str> {
        self.empty_state.map(EmptyState::message)
    }

    fn clear(&mut self) {
        self.stories.clear();
        self.empty_state = None;
        self.loading = false;
    }
}

impl StoryView for StoryList {
    fn on_load_finished(&mut self, stories: &[Story]) {
        self.clear();
        self.stories.extend_from_slice(stories);
        if self.stories.is_empty() {
            self.empty_state = Some(EmptyState::NoStories);
        }
    }

    fn on_reset(&mut self) {
        self.clear();
    }

    fn on_no_connection(&mut self) {
        self.clear();
        self.empty_state = Some(EmptyState::NoConnection);
    }

    fn on_load_started(&mut self) {
        self.loading = true;
    }
}
