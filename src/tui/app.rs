use crate::domain::{QueryParams, Story};
use crate::presenter::{StoryList, StoryView};

pub struct TuiApp {
    pub params: QueryParams,
    pub list: StoryList,
    pub story_index: usize,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Section being typed at the prompt, if the prompt is open
    pub section_input: Option<String>,
}

impl TuiApp {
    pub fn new(params: QueryParams) -> Self {
        Self {
            params,
            list: StoryList::new(),
            story_index: 0,
            should_quit: false,
            status_message: None,
            section_input: None,
        }
    }

    pub fn selected_story(&self) -> Option<&Story> {
        self.list.get(self.story_index)
    }

    pub fn move_up(&mut self) {
        self.story_index = self.story_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if !self.list.is_empty() && self.story_index < self.list.len() - 1 {
            self.story_index += 1;
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn is_editing_section(&self) -> bool {
        self.section_input.is_some()
    }

    /// Open the section prompt, prefilled with the current section.
    pub fn begin_section_edit(&mut self) {
        self.section_input = Some(self.params.section.clone());
    }

    pub fn push_section_char(&mut self, c: char) {
        if let Some(input) = &mut self.section_input {
            input.push(c);
        }
    }

    pub fn pop_section_char(&mut self) {
        if let Some(input) = &mut self.section_input {
            input.pop();
        }
    }

    pub fn cancel_section_edit(&mut self) {
        self.section_input = None;
    }

    /// Close the prompt and apply the typed section.
    ///
    /// Returns true if the section changed. Blank input keeps the current one.
    pub fn confirm_section_edit(&mut self) -> bool {
        let Some(input) = self.section_input.take() else {
            return false;
        };
        let section = input.trim();
        if section.is_empty() || section == self.params.section {
            return false;
        }
        self.params.section = section.to_string();
        true
    }
}

impl StoryView for TuiApp {
    fn on_load_finished(&mut self, stories: &[Story]) {
        self.list.on_load_finished(stories);
        self.story_index = 0;
        self.set_status(format!("Loaded {} stories", stories.len()));
    }

    fn on_reset(&mut self) {
        self.list.on_reset();
        self.story_index = 0;
    }

    fn on_no_connection(&mut self) {
        self.list.on_no_connection();
        self.story_index = 0;
    }

    fn on_load_started(&mut self) {
        self.list.on_load_started();
        self.clear_status();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_app() -> TuiApp {
        let mut app = TuiApp::new(QueryParams::default());
        app.on_load_finished(&[
            Story::new("Sport", "Story A", "http://x/a"),
            Story::new("Sport", "Story B", "http://x/b"),
        ]);
        app
    }

    #[test]
    fn test_move_within_bounds() {
        let mut app = loaded_app();
        app.move_up();
        assert_eq!(app.story_index, 0);

        app.move_down();
        app.move_down();
        assert_eq!(app.story_index, 1);
        assert_eq!(app.selected_story().map(Story::title), Some("Story B"));
    }

    #[test]
    fn test_move_on_empty_list() {
        let mut app = TuiApp::new(QueryParams::default());
        app.move_down();
        assert_eq!(app.story_index, 0);
        assert!(app.selected_story().is_none());
    }

    #[test]
    fn test_new_delivery_resets_selection() {
        let mut app = loaded_app();
        app.move_down();
        app.on_load_finished(&[Story::new("Sport", "Story C", "http://x/c")]);

        assert_eq!(app.story_index, 0);
        assert_eq!(app.list.len(), 1);
        assert_eq!(app.status_message.as_deref(), Some("Loaded 1 stories"));
    }

    #[test]
    fn test_section_edit_applies_trimmed_input() {
        let mut app = TuiApp::new(QueryParams::default());
        app.begin_section_edit();
        assert_eq!(app.section_input.as_deref(), Some("sport"));

        for _ in 0.."sport".len() {
            app.pop_section_char();
        }
        for c in " technology ".chars() {
            app.push_section_char(c);
        }

        assert!(app.confirm_section_edit());
        assert_eq!(app.params.section, "technology");
        assert!(!app.is_editing_section());
    }

    #[test]
    fn test_section_edit_keeps_section_when_unchanged_or_blank() {
        let mut app = TuiApp::new(QueryParams::default());

        app.begin_section_edit();
        assert!(!app.confirm_section_edit());

        app.begin_section_edit();
        app.section_input = Some("   ".into());
        assert!(!app.confirm_section_edit());
        assert_eq!(app.params.section, "sport");
    }

    #[test]
    fn test_section_edit_cancel() {
        let mut app = TuiApp::new(QueryParams::default());
        app.begin_section_edit();
        app.push_section_char('x');
        app.cancel_section_edit();

        assert!(!app.is_editing_section());
        assert!(!app.confirm_section_edit());
        assert_eq!(app.params.section, "sport");
    }

    #[test]
    fn test_typing_without_prompt_is_ignored() {
        let mut app = TuiApp::new(QueryParams::default());
        app.push_section_char('x');
        app.pop_section_char();
        assert!(app.section_input.is_none());
    }

    #[test]
    fn test_load_started_shows_loading() {
        let mut app = loaded_app();
        app.on_load_started();

        assert!(app.list.is_loading());
        assert!(app.status_message.is_none());
    }
}
