use serde::{Deserialize, Serialize};

/// Raw text body returned by the answer service for one search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnswer {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationEntry {
    pub id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickFact {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    pub title: String,
    pub href: String,
}

/// Parser output: sections in source order plus the citation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedArticle {
    pub sections: Vec<Section>,
    pub citations: Vec<CitationEntry>,
}

/// Counts reported by `parse` on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsingStats {
    pub total_sections: usize,
    pub total_citations: usize,
    pub sections_without_citation: usize,
    /// Ids shared by more than one section, counted once each.
    pub duplicate_section_ids: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub sections: Vec<Section>,
    pub citations: Vec<CitationEntry>,
    pub quick_facts: Vec<QuickFact>,
    pub navigation: Vec<NavigationEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Article {
    /// Citation shown beside the section at `index`, if the list reaches that far.
    pub fn citation_for(&self, index: usize) -> Option<&CitationEntry> {
        self.citations.get(index)
    }
}

/// Body of `POST /api/search` responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchApiResponse {
    pub content: String,
    #[serde(default)]
    pub citations: Vec<CitationEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<RawAnswer> for SearchApiResponse {
    fn from(answer: RawAnswer) -> Self {
        Self {
            content: answer.text,
            citations: Vec::new(),
            image_url: answer.image_url,
        }
    }
}

impl From<SearchApiResponse> for RawAnswer {
    fn from(response: SearchApiResponse) -> Self {
        Self {
            text: response.content,
            image_url: response.image_url,
        }
    }
}
