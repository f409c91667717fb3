//! Deduplicating store of Label resources.
//!
//! A label is identified by its (type, value) pair. The first request for a
//! pair mints a Label URN; later requests get the same URN back. A
//! [`LabelCache`] is a cheap, cloneable handle: clones share one store, so a
//! cache can be handed to several builders (possibly on different threads)
//! to deduplicate labels across documents.
//!
//! Sharing contract: when a label is found in the cache it is returned
//! without any triples being written, even if the document asking for it
//! never received the label's declaration. Builders that share a cache are
//! expected to end up in the same published topology.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::error::Result;
use crate::model::{Iri, Literal};

type LabelKey = (Iri, Literal);

/// Handle to a (label type, label value) -> Label URN store.
#[derive(Debug, Clone, Default)]
pub struct LabelCache {
    inner: Arc<Mutex<HashMap<LabelKey, Iri>>>,
}

impl LabelCache {
    /// Creates an empty, unshared cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide cache. Every builder that installs it shares
    /// labels with every other such builder for the lifetime of the process.
    #[must_use]
    pub fn global() -> LabelCache {
        static GLOBAL: OnceLock<LabelCache> = OnceLock::new();
        GLOBAL.get_or_init(LabelCache::new).clone()
    }

    /// Returns the Label URN for `(label_type, value)`, calling `mint` to
    /// create it on first use. The lock is held across `mint`, so two racing
    /// callers never mint the same pair twice.
    ///
    /// The boolean is true when `mint` ran.
    ///
    /// # Errors
    ///
    /// Propagates any error from `mint`; nothing is stored in that case.
    pub fn resolve_with<F>(&self, label_type: &Iri, value: &Literal, mint: F) -> Result<(Iri, bool)>
    where
        F: FnOnce() -> Result<Iri>,
    {
        let mut map = self.inner.lock();
        if let Some(urn) = map.get(&(label_type.clone(), value.clone())) {
            return Ok((urn.clone(), false));
        }
        let urn = mint()?;
        map.insert((label_type.clone(), value.clone()), urn.clone());
        Ok((urn, true))
    }

    /// Looks up a label without minting.
    #[must_use]
    pub fn get(&self, label_type: &Iri, value: &Literal) -> Option<Iri> {
        self.inner
            .lock()
            .get(&(label_type.clone(), value.clone()))
            .cloned()
    }

    /// Number of distinct labels recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// True when no label has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// True when both handles refer to the same store.
    #[must_use]
    pub fn shares_store_with(&self, other: &LabelCache) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
