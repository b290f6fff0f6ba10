use std::fmt;

use indexmap::IndexMap;

use crate::error::LoadResult;
use crate::exports::Exports;
use crate::id::ModuleId;
use crate::loader::Resolver;
use crate::record::ModuleRecord;

/// A module initializer: the body that populates one module's exports
///
/// Receives the record under initialization, that record's exports
/// container, and a resolver bound to the owning loader for pulling in
/// dependencies. The Ok value carries no information; the error channel
/// is how a module body signals failure.
pub type Initializer<E> =
    Box<dyn Fn(&ModuleRecord<E>, &Exports<E>, Resolver<'_, E>) -> LoadResult<()>>;

/// The immutable mapping from module identifier to initializer
///
/// Built once by the packaging step that produced the module set, then
/// handed to a loader, which never mutates it. Iteration order is
/// definition order.
pub struct ModuleTable<E> {
    modules: IndexMap<ModuleId, Initializer<E>>,
}

impl<E> ModuleTable<E> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            modules: IndexMap::new(),
        }
    }

    /// Define the module `id` with its initializer
    ///
    /// Defining the same id twice keeps the later initializer, matching
    /// flat-table key semantics.
    pub fn define<F>(&mut self, id: impl Into<ModuleId>, init: F)
    where
        F: Fn(&ModuleRecord<E>, &Exports<E>, Resolver<'_, E>) -> LoadResult<()> + 'static,
    {
        self.modules.insert(id.into(), Box::new(init));
    }

    pub(crate) fn get(&self, id: &ModuleId) -> Option<&Initializer<E>> {
        self.modules.get(id)
    }

    /// Check whether `id` has a definition
    pub fn contains(&self, id: &ModuleId) -> bool {
        self.modules.contains_key(id)
    }

    /// Number of defined modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if the table has no definitions
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Iterate the defined ids in definition order
    pub fn ids(&self) -> impl Iterator<Item = &ModuleId> {
        self.modules.keys()
    }
}

impl<E> Default for ModuleTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for ModuleTable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleTable")
            .field("modules", &self.modules.keys().collect::<Vec<_>>())
            .finish()
    }
}
