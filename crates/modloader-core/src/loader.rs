use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::error::{LoadError, LoadResult};
use crate::exports::Exports;
use crate::id::ModuleId;
use crate::record::ModuleRecord;
use crate::table::ModuleTable;

/// Owns a module table and the cache of everything instantiated from it
///
/// Resolution is lazy and memoized: the first `resolve` of an id creates
/// that module's record, runs its initializer, and caches the result;
/// every later `resolve` of the same id returns the same exports handle
/// without running anything. A record is registered in the cache before
/// its initializer runs, which is what lets dependency cycles resolve to
/// the in-progress exports instead of recursing without bound.
///
/// Loaders are independent: two loaders never share a cache, so module
/// sets can be instantiated side by side without interference.
///
/// Resolution is strictly synchronous and single-threaded; the interior
/// cell types make a loader neither `Send` nor `Sync`. Sharing one
/// across threads would take per-id synchronization around the
/// check-then-register step to keep initializers at-most-once.
pub struct ModuleLoader<E> {
    /// The immutable definition table supplied at construction
    table: ModuleTable<E>,

    /// The identifier `run` resolves
    entry: ModuleId,

    /// Instantiation cache: one record per identifier ever resolved
    cache: RefCell<FxHashMap<ModuleId, Rc<ModuleRecord<E>>>>,
}

impl<E> ModuleLoader<E> {
    /// Create a loader over `table` with `entry` as the top-level module
    ///
    /// Construction performs no resolution; the cache starts empty and
    /// the entry id is not checked against the table until `run` or
    /// `resolve` is called.
    pub fn new(table: ModuleTable<E>, entry: impl Into<ModuleId>) -> Self {
        Self {
            table,
            entry: entry.into(),
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Resolve the configured entry module and return its exports
    pub fn run(&self) -> LoadResult<Exports<E>>
    where
        E: Default,
    {
        debug!("Resolving entry module {}", self.entry);
        self.resolve(&self.entry)
    }

    /// Resolve `id` to its exports, instantiating the module on first use
    ///
    /// A cached id returns its exports handle immediately, loaded or not;
    /// the not-yet-loaded case is how a cyclic dependency observes the
    /// partially populated exports of a module further up the call chain.
    /// An id absent from the table fails with `LoadError::UnknownModule`
    /// before any record is created. An error returned by the initializer
    /// propagates unmodified; the record stays cached, never loaded, and
    /// the initializer is never retried.
    pub fn resolve(&self, id: impl Into<ModuleId>) -> LoadResult<Exports<E>>
    where
        E: Default,
    {
        let id = id.into();

        if let Some(record) = self.cache.borrow().get(&id) {
            debug!("Cache hit for module {}", id);
            return Ok(record.exports().clone());
        }

        let init = match self.table.get(&id) {
            Some(init) => init,
            None => return Err(LoadError::UnknownModule { id }),
        };

        debug!("Instantiating module {}", id);
        let record = Rc::new(ModuleRecord::new(id.clone()));

        // Registered before the initializer runs so a cyclic resolve
        // finds the record instead of recursing. The cache borrow is
        // released before the call below.
        self.cache.borrow_mut().insert(id, Rc::clone(&record));

        if let Err(e) = init(&record, record.exports(), Resolver { loader: self }) {
            warn!("Initializer for module {} failed: {}", record.id(), e);
            return Err(e);
        }

        record.mark_loaded();
        debug!("Module {} loaded", record.id());
        Ok(record.exports().clone())
    }

    /// The identifier `run` resolves
    pub fn entry(&self) -> &ModuleId {
        &self.entry
    }

    /// The definition table this loader was built over
    pub fn table(&self) -> &ModuleTable<E> {
        &self.table
    }

    /// Check whether a record exists for `id`, pending or loaded
    pub fn is_cached(&self, id: impl Into<ModuleId>) -> bool {
        self.cache.borrow().contains_key(&id.into())
    }

    /// Check whether `id` has finished initializing
    pub fn is_loaded(&self, id: impl Into<ModuleId>) -> bool {
        self.cache
            .borrow()
            .get(&id.into())
            .map(|record| record.is_loaded())
            .unwrap_or(false)
    }

    /// Get the cached record for `id`, if one exists
    pub fn record(&self, id: impl Into<ModuleId>) -> Option<Rc<ModuleRecord<E>>> {
        self.cache.borrow().get(&id.into()).map(Rc::clone)
    }

    /// Number of records in the instantiation cache
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<E> fmt::Debug for ModuleLoader<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleLoader")
            .field("entry", &self.entry)
            .field("table", &self.table)
            .field("cached", &self.cache.borrow().len())
            .finish()
    }
}

/// The require capability handed to module initializers
///
/// A copyable borrow of the owning loader: nested resolutions go through
/// that loader's cache, so a dependency resolved from inside a module
/// body is the same instantiation a top-level `resolve` would see.
pub struct Resolver<'a, E> {
    loader: &'a ModuleLoader<E>,
}

impl<E> Resolver<'_, E> {
    /// Resolve `id` through the owning loader
    pub fn resolve(&self, id: impl Into<ModuleId>) -> LoadResult<Exports<E>>
    where
        E: Default,
    {
        self.loader.resolve(id)
    }

    /// Check whether a record exists for `id`, pending or loaded
    pub fn is_cached(&self, id: impl Into<ModuleId>) -> bool {
        self.loader.is_cached(id)
    }

    /// Check whether `id` has finished initializing
    pub fn is_loaded(&self, id: impl Into<ModuleId>) -> bool {
        self.loader.is_loaded(id)
    }
}

impl<E> Clone for Resolver<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Resolver<'_, E> {}

impl<E> fmt::Debug for Resolver<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_resolves_nothing() {
        let mut table: ModuleTable<i64> = ModuleTable::new();
        table.define("m", |_module, exports, _require| {
            *exports.borrow_mut() = 7;
            Ok(())
        });

        let loader = ModuleLoader::new(table, "m");

        assert_eq!(loader.cached_len(), 0);
        assert!(!loader.is_cached("m"));
    }

    #[test]
    fn test_resolve_populates_exports() {
        let mut table: ModuleTable<i64> = ModuleTable::new();
        table.define("m", |_module, exports, _require| {
            *exports.borrow_mut() = 7;
            Ok(())
        });

        let loader = ModuleLoader::new(table, "m");
        let exports = loader.resolve("m").unwrap();

        assert_eq!(*exports.borrow(), 7);
        assert!(loader.is_loaded("m"));
        assert_eq!(loader.cached_len(), 1);
    }

    #[test]
    fn test_resolve_unknown_module() {
        let table: ModuleTable<i64> = ModuleTable::new();
        let loader = ModuleLoader::new(table, "entry");

        let err = loader.resolve("ghost").unwrap_err();
        assert_eq!(
            err,
            LoadError::UnknownModule {
                id: ModuleId::new("ghost")
            }
        );

        // The eager table check means no record was created
        assert!(!loader.is_cached("ghost"));
        assert_eq!(loader.cached_len(), 0);
    }

    #[test]
    fn test_record_reports_state() {
        let mut table: ModuleTable<i64> = ModuleTable::new();
        table.define("m", |_module, _exports, _require| Ok(()));

        let loader = ModuleLoader::new(table, "m");
        assert!(loader.record("m").is_none());

        loader.run().unwrap();
        let record = loader.record("m").unwrap();
        assert_eq!(record.id().as_str(), "m");
        assert!(record.is_loaded());
    }

    #[test]
    fn test_entry_accessor() {
        let table: ModuleTable<i64> = ModuleTable::new();
        let loader = ModuleLoader::new(table, "main");

        assert_eq!(loader.entry().as_str(), "main");
    }
}
