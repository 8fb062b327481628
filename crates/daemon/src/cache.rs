use std::collections::HashMap;
use std::time::{Duration, Instant};

/// In-memory store of raw provider response bodies keyed by request URL.
///
/// A response is reused until its age exceeds the configured TTL; stale
/// entries are evicted on read.
pub struct ResponseCache {
    ttl: Duration,
    entries: HashMap<String, CachedResponse>,
}

struct CachedResponse {
    fetched_at: Instant,
    body: String,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        ResponseCache {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Returns the cached body for `url` if it is still within its TTL
    pub fn fresh(&mut self, url: &str) -> Option<String> {
        let stale = match self.entries.get(url) {
            Some(entry) if entry.fetched_at.elapsed() < self.ttl => {
                return Some(entry.body.clone());
            }
            Some(_) => true,
            None => false,
        };
        if stale {
            self.entries.remove(url);
        }
        None
    }

    pub fn store(&mut self, url: &str, body: String) {
        self.entries.insert(
            url.to_string(),
            CachedResponse {
                fetched_at: Instant::now(),
                body,
            },
        );
    }
}
