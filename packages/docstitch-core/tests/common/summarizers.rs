//! Summarizer test doubles

use std::collections::HashSet;
use std::sync::Mutex;

use docstitch_core::{DocstitchError, Result, Summarizer, SummaryRequest};

/// Answers "<name> documented." and fails for the listed names
#[derive(Debug, Default)]
pub struct ScriptedSummarizer {
    failing: HashSet<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(names: &[&str]) -> Self {
        Self {
            failing: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }

    /// (name, code) pairs in call order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Summarizer for ScriptedSummarizer {
    fn summarize(&self, request: &SummaryRequest<'_>) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((request.name.to_string(), request.code.to_string()));

        if self.failing.contains(request.name) {
            return Err(DocstitchError::summarization(request.name, "model unavailable"));
        }
        Ok(format!("{} documented.", request.name))
    }
}
