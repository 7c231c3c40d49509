use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::error;

use crate::domain::Story;

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Value>,
}

/// Turns a search API payload into stories.
///
/// The envelope (`response.results`) is all-or-nothing: if it does not
/// match, nothing is returned. Inside `results` each field is optional.
#[derive(Debug, Clone, Default)]
pub struct StoryParser;

impl StoryParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, body: &str) -> Vec<Story> {
        if body.trim().is_empty() {
            return Vec::new();
        }

        let envelope: SearchEnvelope = match serde_json::from_str(body) {
            Ok(envelope) => envelope,
            Err(e) => {
                error!("Problem parsing the story JSON results: {}", e);
                return Vec::new();
            }
        };

        let results = envelope.response.results;
        let mut stories = Vec::with_capacity(results.len());

        for (index, result) in results.iter().enumerate() {
            let Some(fields) = result.as_object() else {
                error!(
                    "Problem parsing the story JSON results: element {} is not an object",
                    index
                );
                break;
            };

            stories.push(Story::new(
                text_field(fields, "sectionName"),
                text_field(fields, "webTitle"),
                text_field(fields, "webUrl"),
            ));
        }

        stories
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    }
}
