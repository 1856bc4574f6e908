use regex::{Regex, RegexBuilder};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("dictionary {0} has no entries")]
    EmptyDictionary(String),
    #[error("dictionary {0} is declared more than once")]
    DuplicateDictionary(String),
    #[error("dictionary {name} does not compile: {source}")]
    Compile {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// One labeled keyword group compiled to a single case-insensitive alternation.
#[derive(Debug, Clone)]
pub struct KeywordPattern<L> {
    pub label: L,
    regex: Regex,
}

impl<L> KeywordPattern<L> {
    pub fn compile(label: L, name: &str, entries: &[&str]) -> Result<Self, PatternError> {
        Ok(Self {
            label,
            regex: compile_alternation(name, entries)?,
        })
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    /// Non-overlapping, leftmost-first matches.
    pub fn count(&self, haystack: &str) -> u32 {
        self.regex.find_iter(haystack).count() as u32
    }
}

/// Builds `(?:e1)|(?:e2)|...` so entries with embedded alternation stay self-contained.
pub fn compile_alternation(name: &str, entries: &[&str]) -> Result<Regex, PatternError> {
    let parts = entries
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .map(|e| format!("(?:{e})"))
        .collect::<Vec<_>>();
    if parts.is_empty() {
        return Err(PatternError::EmptyDictionary(name.to_string()));
    }
    RegexBuilder::new(&parts.join("|"))
        .case_insensitive(true)
        .build()
        .map_err(|source| PatternError::Compile {
            name: name.to_string(),
            source,
        })
}
