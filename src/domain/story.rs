/// A single news story as returned by the search API.
///
/// Fields that were absent in the payload are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    section: String,
    title: String,
    url: String,
}

impl Story {
    pub fn new(
        section: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            title: title.into(),
            url: url.into(),
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    /// Whether the story carries a link worth opening
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}
