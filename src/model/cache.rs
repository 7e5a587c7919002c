//! In-memory cache of category listing pages
//!
//! Keyed by (category, language, page). Bounded: once full, the oldest
//! inserted page is evicted. Search and discover results are not cached.
//! Whole envelopes are stored so pagination totals survive cache hits.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::movie::PageEnvelope;
use super::types::MovieCategory;

const MAX_CACHED_PAGES: usize = 64;

type PageKey = (MovieCategory, String, u32);

/// Session-scoped page cache for category listings
#[derive(Clone)]
pub struct PageCache {
    pages: Arc<RwLock<HashMap<PageKey, PageEnvelope>>>,
    insertion_order: Arc<RwLock<VecDeque<PageKey>>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(RwLock::new(HashMap::new())),
            insertion_order: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    pub async fn get(
        &self,
        category: MovieCategory,
        language: &str,
        page: u32,
    ) -> Option<PageEnvelope> {
        let pages = self.pages.read().await;
        pages.get(&(category, language.to_string(), page)).cloned()
    }

    pub async fn insert(
        &self,
        category: MovieCategory,
        language: &str,
        page: u32,
        envelope: PageEnvelope,
    ) {
        let key = (category, language.to_string(), page);
        let mut pages = self.pages.write().await;
        let mut order = self.insertion_order.write().await;

        if pages.insert(key.clone(), envelope).is_none() {
            order.push_back(key);
            while order.len() > MAX_CACHED_PAGES {
                if let Some(oldest) = order.pop_front() {
                    pages.remove(&oldest);
                }
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.pages.read().await.len()
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new()
    }
}
