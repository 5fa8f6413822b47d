use crate::error::{Result, WikiPlexError};
use crate::services::slug::section_id;
use crate::types::{CitationEntry, ParsedArticle, ParsingStats, Section};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

pub const CITATION_MARKER: &str = "suggested citations";
pub const DEFAULT_CITATION: &str = "Generated using Perplexity AI";

/// Turns the answer service's markdown-flavored text into sections and citations.
///
/// Section boundaries are the literal sequence `"\n#"` only. The answer
/// service is prompted to emit `#` headers, so no general markdown heading
/// parsing is attempted.
#[derive(Debug, Clone)]
pub struct ArticleParser {
    citation_marker: String,
    default_citation: String,
}

impl ArticleParser {
    pub fn new(citation_marker: &str, default_citation: &str) -> Result<Self> {
        if citation_marker.trim().is_empty() || !citation_marker.is_ascii() {
            return Err(WikiPlexError::InvalidInput {
                reason: format!("citation marker must be non-empty ASCII: {:?}", citation_marker),
            });
        }

        Ok(Self {
            citation_marker: citation_marker.to_string(),
            default_citation: default_citation.to_string(),
        })
    }

    pub fn parse(&self, raw_text: &str) -> ParsedArticle {
        let (main_body, citations) = match rfind_ignore_ascii_case(raw_text, &self.citation_marker) {
            Some(idx) => {
                let citations = self.extract_citations(&raw_text[idx..]);
                (raw_text[..idx].trim(), citations)
            }
            None => (raw_text.trim(), self.default_citations()),
        };

        let sections = Self::split_sections(main_body);

        debug!(
            "Parsed {} sections and {} citations",
            sections.len(),
            citations.len()
        );

        ParsedArticle { sections, citations }
    }

    /// Entry point for dynamically typed input such as a JSON request body.
    pub fn parse_value(&self, raw: &Value) -> Result<ParsedArticle> {
        match raw {
            Value::String(text) => Ok(self.parse(text)),
            Value::Null => Err(WikiPlexError::InvalidInput {
                reason: "expected a string, got null".to_string(),
            }),
            other => Err(WikiPlexError::InvalidInput {
                reason: format!("expected a string, got {}", json_kind(other)),
            }),
        }
    }

    fn extract_citations(&self, block: &str) -> Vec<CitationEntry> {
        let citations: Vec<CitationEntry> = block
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| rfind_ignore_ascii_case(line, &self.citation_marker).is_none())
            .enumerate()
            .map(|(idx, line)| CitationEntry {
                id: (idx + 1).to_string(),
                content: line.to_string(),
            })
            .collect();

        if citations.is_empty() {
            self.default_citations()
        } else {
            citations
        }
    }

    fn default_citations(&self) -> Vec<CitationEntry> {
        vec![CitationEntry {
            id: "1".to_string(),
            content: self.default_citation.clone(),
        }]
    }

    fn split_sections(main_body: &str) -> Vec<Section> {
        main_body
            .split("\n#")
            .filter(|fragment| !fragment.trim().is_empty())
            .map(|fragment| {
                let mut lines = fragment.lines();
                let title = lines
                    .next()
                    .unwrap_or_default()
                    .trim_start_matches('#')
                    .trim()
                    .to_string();
                let body = lines.collect::<Vec<_>>().join("\n").trim().to_string();

                Section {
                    id: section_id(&title),
                    title,
                    body,
                }
            })
            .collect()
    }

    pub fn get_parsing_stats(&self, parsed: &ParsedArticle) -> ParsingStats {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for section in &parsed.sections {
            *seen.entry(section.id.as_str()).or_insert(0) += 1;
        }

        ParsingStats {
            total_sections: parsed.sections.len(),
            total_citations: parsed.citations.len(),
            sections_without_citation: parsed.sections.len().saturating_sub(parsed.citations.len()),
            duplicate_section_ids: seen.values().filter(|count| **count > 1).count(),
        }
    }
}

impl Default for ArticleParser {
    fn default() -> Self {
        Self {
            citation_marker: CITATION_MARKER.to_string(),
            default_citation: DEFAULT_CITATION.to_string(),
        }
    }
}

/// Byte index of the last ASCII-case-insensitive occurrence of `needle`.
///
/// `needle` is ASCII, so every match starts on a char boundary.
fn rfind_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || needle.len() > hay.len() {
        return None;
    }

    (0..=hay.len() - needle.len())
        .rev()
        .find(|&start| hay[start..start + needle.len()].eq_ignore_ascii_case(needle))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
