//! Search state machine.
//!
//! SearchState is a sum type with two states:
//! - Inactive: keys go to navigation; the last submitted query is remembered
//!   for find-next
//! - Editing: keys go to the query editor
//!
//! All transitions are pure functions taking and returning the state.

// ===== SearchState =====

/// Search state machine.
/// Sum type enforces exactly one state at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// Not editing. `last` is the query find-next repeats.
    Inactive {
        /// Last submitted query, if any.
        last: Option<SearchQuery>,
    },
    /// User is typing a query.
    Editing {
        /// Query text typed so far.
        query: String,
    },
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::Inactive { last: None }
    }
}

impl SearchState {
    /// Whether the query editor owns the keyboard.
    pub fn is_active(&self) -> bool {
        matches!(self, SearchState::Editing { .. })
    }

    /// Text of the query being typed or last submitted.
    pub fn query(&self) -> &str {
        match self {
            SearchState::Editing { query } => query,
            SearchState::Inactive { last: Some(q) } => q.as_str(),
            SearchState::Inactive { last: None } => "",
        }
    }

    /// Query find-next would use right now, if non-empty.
    pub fn current_query(&self) -> Option<SearchQuery> {
        match self {
            SearchState::Editing { query } => SearchQuery::new(query.as_str()),
            SearchState::Inactive { last } => last.clone(),
        }
    }
}

// ===== SearchQuery =====

/// Validated search query. Never empty.
/// Smart constructor enforces non-empty invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Smart constructor: returns None for an empty query.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let s = raw.into();
        if s.is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// The query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ===== Transitions =====

/// Open the editor with a fresh, empty query.
///
/// Any remembered query is dropped. No-op when already editing.
pub fn activate_search_input(state: SearchState) -> SearchState {
    match state {
        SearchState::Inactive { .. } => SearchState::Editing {
            query: String::new(),
        },
        editing => editing,
    }
}

/// Append a character to the query. No-op if not editing.
pub fn handle_char_input(state: SearchState, ch: char) -> SearchState {
    match state {
        SearchState::Editing { mut query } => {
            query.push(ch);
            SearchState::Editing { query }
        }
        other => other,
    }
}

/// Delete the last character of the query. No-op if not editing.
pub fn handle_backspace(state: SearchState) -> SearchState {
    match state {
        SearchState::Editing { mut query } => {
            query.pop();
            SearchState::Editing { query }
        }
        other => other,
    }
}

/// Cancel: clear the query and leave the editor.
pub fn cancel_search(_state: SearchState) -> SearchState {
    SearchState::Inactive { last: None }
}

/// Leave the editor, keeping a non-empty query for find-next.
///
/// Returns the query to execute, or None when the query was empty (in which
/// case no search runs). Inactive states pass through with None.
pub fn submit_search(state: SearchState) -> (SearchState, Option<SearchQuery>) {
    match state {
        SearchState::Editing { query } => {
            let query = SearchQuery::new(query);
            (
                SearchState::Inactive {
                    last: query.clone(),
                },
                query,
            )
        }
        inactive => (inactive, None),
    }
}

// ===== Search Execution =====

/// Find the next slide containing `query` (case-insensitive substring).
///
/// Scans from the slide after `current` to the end, then wraps to slide 0
/// and stops before `current`. Returns None when no other slide matches.
pub fn find_next(slides: &[String], current: usize, query: &SearchQuery) -> Option<usize> {
    let needle = query.as_str().to_lowercase();
    let total = slides.len();
    if total == 0 {
        return None;
    }
    let current = current.min(total - 1);

    (current + 1..total)
        .chain(0..current)
        .find(|&i| slides[i].to_lowercase().contains(&needle))
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
