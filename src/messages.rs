use crate::lyrics::Query;

/// Messages sent from a fetch task to the TUI
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// Final display text for a query: lyrics, not-found message or error.
    /// `fetch_id` is the generation the form assigned when it submitted the query.
    LyricsReady {
        fetch_id: u64,
        query: Query,
        text: String,
    },
}
