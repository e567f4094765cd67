//! In-memory cache of rendered problem views.
//!
//! The submit path invalidates these through the pipeline's `ViewCache`
//! port, so a freshly solved problem never serves a stale solved flag.

use std::collections::HashMap;
use std::sync::RwLock;

use codeforge_core::domain::ProblemId;
use judge_orchestrator::ViewCache;
use serde_json::Value;

#[derive(Debug, Default)]
pub struct ProblemViewCache {
    // Solved flags are per-user; only the anonymous list view is cached.
    list: RwLock<Option<Value>>,
    details: RwLock<HashMap<ProblemId, Value>>,
}

impl ProblemViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached_list(&self) -> Option<Value> {
        self.list.read().ok()?.clone()
    }

    pub fn store_list(&self, value: Value) {
        if let Ok(mut list) = self.list.write() {
            *list = Some(value);
        }
    }

    pub fn cached_problem(&self, problem_id: ProblemId) -> Option<Value> {
        self.details.read().ok()?.get(&problem_id).cloned()
    }

    pub fn store_problem(&self, problem_id: ProblemId, value: Value) {
        if let Ok(mut details) = self.details.write() {
            details.insert(problem_id, value);
        }
    }
}

impl ViewCache for ProblemViewCache {
    fn invalidate_problem_list(&self) {
        if let Ok(mut list) = self.list.write() {
            *list = None;
        }
    }

    fn invalidate_problem(&self, problem_id: ProblemId) {
        if let Ok(mut details) = self.details.write() {
            details.remove(&problem_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use codeforge_core::domain::ProblemId;
    use judge_orchestrator::ViewCache;
    use serde_json::json;

    use super::ProblemViewCache;

    #[test]
    fn list_view_is_dropped_on_invalidation() {
        let cache = ProblemViewCache::new();
        cache.store_list(json!({"success": true}));
        assert!(cache.cached_list().is_some());

        cache.invalidate_problem_list();
        assert!(cache.cached_list().is_none());
    }

    #[test]
    fn detail_invalidation_only_touches_the_given_problem() {
        let cache = ProblemViewCache::new();
        let first = ProblemId::new();
        let second = ProblemId::new();
        cache.store_problem(first, json!({"id": 1}));
        cache.store_problem(second, json!({"id": 2}));

        cache.invalidate_problem(first);

        assert!(cache.cached_problem(first).is_none());
        assert!(cache.cached_problem(second).is_some());
    }
}
