//! View state and the controller methods that mutate it.
//!
//! [`ViewState`] is the single owner of what the page displays: the current
//! articles, the loading flag, the search input and the selected category.
//! Its methods are the only mutation path.
//!
//! Fetching is split in two halves so that several requests may be in
//! flight at once:
//! 1. A user action (`mount`, `set_category`, `submit_search`) returns a
//!    [`FetchRequest`] ticket and flips `loading` on.
//! 2. The caller performs the fetch and hands the outcome to
//!    [`ViewState::complete`] together with the ticket's sequence number.
//!
//! Only the result of the most recently issued ticket is applied; results of
//! superseded tickets are dropped no matter in which order they resolve.

use crate::api::NewsError;
use crate::models::{Article, Category, Query};
use tracing::{debug, info, warn};

/// A fetch the caller is expected to perform on behalf of [`ViewState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub query: Query,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    articles: Vec<Article>,
    loading: bool,
    search_term: String,
    category: Category,
    last_issued: u64,
    pending_query: Option<Query>,
    /// Query of the last applied result, for labelling exports.
    shown_query: Option<Query>,
}

impl ViewState {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Query whose results are currently displayed, if any fetch has settled.
    pub fn shown_query(&self) -> Option<&Query> {
        self.shown_query.as_ref()
    }

    /// Initial listing for the current category.
    ///
    /// # Returns
    ///
    /// The section request to perform; the view is marked loading.
    pub fn mount(&mut self) -> FetchRequest {
        self.issue(Query::Section(self.category))
    }

    /// Select a category and list it, ignoring any search text.
    ///
    /// # Arguments
    ///
    /// * `category` - Section to show
    ///
    /// # Returns
    ///
    /// The section request to perform, or `None` when `category` is already
    /// selected. Re-selecting the current category changes nothing.
    pub fn set_category(&mut self, category: Category) -> Option<FetchRequest> {
        if category == self.category {
            debug!(%category, "Category unchanged; not refetching");
            return None;
        }
        self.category = category;
        Some(self.issue(Query::Section(category)))
    }

    /// Edit the search input without submitting it.
    pub fn set_search_term(&mut self, text: impl Into<String>) {
        self.search_term = text.into();
    }

    /// Submit `text` as a search.
    ///
    /// # Arguments
    ///
    /// * `text` - Search box contents; stored as typed, sent trimmed
    ///
    /// # Returns
    ///
    /// The search request to perform, or `None` for blank text, which leaves
    /// the displayed results alone. The selected category is kept but not
    /// used for this request.
    pub fn submit_search(&mut self, text: &str) -> Option<FetchRequest> {
        self.search_term = text.to_string();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("Blank search submitted; ignoring");
            return None;
        }
        Some(self.issue(Query::Search(trimmed.to_string())))
    }

    /// Apply the outcome of the fetch issued as `seq`.
    ///
    /// # Arguments
    ///
    /// * `seq` - Sequence number from the [`FetchRequest`] that was performed
    /// * `result` - What the fetch produced
    ///
    /// # Returns
    ///
    /// `true` if the outcome was applied, `false` if a newer request has been
    /// issued since. A failed fetch displays an empty list.
    pub fn complete(&mut self, seq: u64, result: Result<Vec<Article>, NewsError>) -> bool {
        if seq != self.last_issued {
            debug!(seq, latest = self.last_issued, "Discarding stale fetch result");
            return false;
        }

        self.articles = match result {
            Ok(articles) => {
                info!(seq, count = articles.len(), "Applied fetch result");
                articles
            }
            Err(e) => {
                warn!(seq, error = %e, "Error fetching news");
                Vec::new()
            }
        };
        self.loading = false;
        self.shown_query = self.pending_query.take();
        true
    }

    fn issue(&mut self, query: Query) -> FetchRequest {
        self.last_issued += 1;
        self.loading = true;
        self.pending_query = Some(query.clone());
        debug!(seq = self.last_issued, %query, "Issuing fetch");
        FetchRequest {
            seq: self.last_issued,
            query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str) -> Article {
        Article {
            id: id.to_string(),
            ..Article::default()
        }
    }

    fn ids(state: &ViewState) -> Vec<&str> {
        state.articles().iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_new_state_defaults() {
        let state = ViewState::new(Category::default());
        assert_eq!(state.category(), Category::World);
        assert!(!state.is_loading());
        assert!(state.articles().is_empty());
        assert_eq!(state.search_term(), "");
    }

    #[test]
    fn test_mount_fetches_current_category() {
        let mut state = ViewState::new(Category::Culture);
        let req = state.mount();
        assert_eq!(req.query, Query::Section(Category::Culture));
        assert!(state.is_loading());

        assert!(state.complete(req.seq, Ok(vec![article("a")])));
        assert!(!state.is_loading());
        assert_eq!(ids(&state), vec!["a"]);
        assert_eq!(state.shown_query(), Some(&Query::Section(Category::Culture)));
    }

    #[test]
    fn test_set_category_ignores_search_term() {
        let mut state = ViewState::new(Category::World);
        state.set_search_term("elections");
        let req = state.set_category(Category::Technology).expect("fetch issued");
        assert_eq!(req.query, Query::Section(Category::Technology));
        assert_eq!(state.category(), Category::Technology);
        assert_eq!(state.search_term(), "elections");
    }

    #[test]
    fn test_set_same_category_does_not_refetch() {
        let mut state = ViewState::new(Category::World);
        assert_eq!(state.set_category(Category::World), None);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_submit_search_keeps_category() {
        let mut state = ViewState::new(Category::Business);
        let req = state.submit_search("  climate change ").expect("fetch issued");
        assert_eq!(req.query, Query::Search("climate change".to_string()));
        assert_eq!(state.category(), Category::Business);
        assert_eq!(state.search_term(), "  climate change ");
    }

    #[test]
    fn test_blank_search_leaves_results_unchanged() {
        let mut state = ViewState::new(Category::World);
        let req = state.mount();
        state.complete(req.seq, Ok(vec![article("a"), article("b")]));

        assert_eq!(state.submit_search("   "), None);
        assert_eq!(state.submit_search(""), None);
        assert!(!state.is_loading());
        assert_eq!(ids(&state), vec!["a", "b"]);
    }

    #[test]
    fn test_prior_results_remain_while_loading() {
        let mut state = ViewState::new(Category::World);
        let req = state.mount();
        state.complete(req.seq, Ok(vec![article("a")]));

        let _pending = state.set_category(Category::Sport).unwrap();
        assert!(state.is_loading());
        assert_eq!(ids(&state), vec!["a"]);
    }

    #[test]
    fn test_failure_clears_articles_and_loading() {
        let mut state = ViewState::new(Category::World);
        let req = state.mount();
        state.complete(req.seq, Ok(vec![article("a")]));

        let req = state.set_category(Category::Science).unwrap();
        let err = NewsError::Decode(serde_json::from_str::<u8>("x").unwrap_err());
        assert!(state.complete(req.seq, Err(err)));
        assert!(state.articles().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_missing_results_yield_empty_list() {
        let mut state = ViewState::new(Category::World);
        let req = state.mount();
        let envelope: crate::models::SearchEnvelope =
            serde_json::from_str(r#"{"response": {}}"#).unwrap();
        state.complete(req.seq, Ok(envelope.into_articles()));
        assert!(state.articles().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_stale_result_is_discarded_when_it_resolves_last() {
        let mut state = ViewState::new(Category::World);
        let first = state.set_category(Category::Business).unwrap();
        let second = state.set_category(Category::Culture).unwrap();
        assert!(second.seq > first.seq);

        assert!(state.complete(second.seq, Ok(vec![article("culture")])));
        assert!(!state.complete(first.seq, Ok(vec![article("business")])));

        assert_eq!(ids(&state), vec!["culture"]);
        assert!(!state.is_loading());
        assert_eq!(state.shown_query(), Some(&Query::Section(Category::Culture)));
    }

    #[test]
    fn test_stale_result_resolving_first_keeps_loading() {
        let mut state = ViewState::new(Category::World);
        let first = state.set_category(Category::Business).unwrap();
        let second = state.submit_search("markets").unwrap();

        assert!(!state.complete(first.seq, Ok(vec![article("business")])));
        assert!(state.is_loading());
        assert!(state.articles().is_empty());

        assert!(state.complete(second.seq, Ok(vec![article("markets")])));
        assert_eq!(ids(&state), vec!["markets"]);
        assert!(!state.is_loading());
    }
}
