//! Post-resolution user filters

use std::sync::Arc;

use crate::errors::DomainResult;

/// Transform applied to a freshly resolved user before it is cached
///
/// * `Ok(Some(user))` - continue with (possibly modified) `user`
/// * `Ok(None)` - reject; resolution yields no user
/// * `Err(e)` - abort; `e` reaches the caller unchanged
///
/// Any `Fn(U) -> DomainResult<Option<U>>` closure is a filter.
pub trait UserFilter<U>: Send + Sync {
    fn apply(&self, user: U) -> DomainResult<Option<U>>;
}

impl<U, F> UserFilter<U> for F
where
    F: Fn(U) -> DomainResult<Option<U>> + Send + Sync,
{
    fn apply(&self, user: U) -> DomainResult<Option<U>> {
        self(user)
    }
}

/// Ordered list of filters, fixed once the owning engine is shared
pub struct FilterChain<U> {
    filters: Vec<Arc<dyn UserFilter<U>>>,
}

impl<U> FilterChain<U> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    pub fn push(&mut self, filter: impl UserFilter<U> + 'static) {
        self.filters.push(Arc::new(filter));
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Runs the filters in registration order, stopping at the first rejection or error
    pub fn apply(&self, user: U) -> DomainResult<Option<U>> {
        let mut current = user;
        for filter in &self.filters {
            match filter.apply(current)? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }
}

impl<U> Default for FilterChain<U> {
    fn default() -> Self {
        Self::new()
    }
}
