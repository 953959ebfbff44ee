//! Search capabilities backed by daedra (DuckDuckGo).

use crate::types::{AppError, Result};
use daedra::{SearchArgs, SearchOptions, VisitPageArgs};

/// General web search returning titled result snippets.
pub struct WebSearchTool {
    num_results: usize,
}

impl WebSearchTool {
    /// Create a search tool with the default result count.
    pub fn new() -> Self {
        Self { num_results: 8 }
    }

    /// Stable capability name.
    pub fn name(&self) -> &str {
        "web_search"
    }

    /// Description advertised to the completion engine.
    pub fn description(&self) -> &str {
        "Search the web with DuckDuckGo for fresh information. Input: a search query."
    }

    /// Search and return titled result snippets, one block per result.
    pub async fn invoke(&self, query: &str) -> Result<String> {
        let args = SearchArgs {
            query: query.to_string(),
            options: Some(SearchOptions {
                num_results: self.num_results,
                ..Default::default()
            }),
        };

        let response = daedra::tools::search::perform_search(&args)
            .await
            .map_err(|e| self.error(e.to_string()))?;

        if response.data.is_empty() {
            return Err(self.error(format!("no results for '{}'", query)));
        }

        let lines: Vec<String> = response
            .data
            .iter()
            .map(|result| format!("{} ({})\n{}", result.title, result.url, result.description))
            .collect();
        Ok(lines.join("\n\n"))
    }

    fn error(&self, message: String) -> AppError {
        AppError::Tool {
            name: self.name().to_string(),
            message,
        }
    }
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Targeted query that opens the best-ranked page and returns its content.
///
/// Covers questions where result snippets are too thin and the answer has to
/// come from the page itself.
pub struct SiteQueryTool {
    max_chars: usize,
}

impl SiteQueryTool {
    /// Create a site-query tool with the default page-content cap.
    pub fn new() -> Self {
        Self { max_chars: 4000 }
    }

    /// Stable capability name.
    pub fn name(&self) -> &str {
        "site_query"
    }

    /// Description advertised to the completion engine.
    pub fn description(&self) -> &str {
        "Run a targeted search and read the top-ranked page for a direct answer. \
         Input: a specific question."
    }

    /// Search, open the top-ranked page, and return its content.
    pub async fn invoke(&self, query: &str) -> Result<String> {
        let search = daedra::tools::search::perform_search(&SearchArgs {
            query: query.to_string(),
            options: Some(SearchOptions {
                num_results: 3,
                ..Default::default()
            }),
        })
        .await
        .map_err(|e| self.error(e.to_string()))?;

        let top = search
            .data
            .first()
            .ok_or_else(|| self.error(format!("no results for '{}'", query)))?;

        let page = daedra::tools::fetch::fetch_page(&VisitPageArgs {
            url: top.url.clone(),
            include_images: false,
            selector: None,
        })
        .await
        .map_err(|e| self.error(e.to_string()))?;

        let mut content = page.content;
        if content.chars().count() > self.max_chars {
            content = content.chars().take(self.max_chars).collect();
        }
        Ok(format!("{} ({})\n{}", page.title, page.url, content))
    }

    fn error(&self, message: String) -> AppError {
        AppError::Tool {
            name: self.name().to_string(),
            message,
        }
    }
}

impl Default for SiteQueryTool {
    fn default() -> Self {
        Self::new()
    }
}
