use std::cell::Cell;
use std::fmt;

use crate::exports::Exports;
use crate::id::ModuleId;

/// One cached instantiation of a module
///
/// Created the moment a module is first resolved, before its initializer
/// runs. `loaded` stays false until the initializer returns successfully,
/// so a record observed with `is_loaded() == false` belongs to a module
/// that is mid-initialization or whose initializer failed.
pub struct ModuleRecord<E> {
    /// The identifier this record was created for
    id: ModuleId,

    /// Whether the initializer has run to completion
    loaded: Cell<bool>,

    /// The exports container, identity-stable for the record's lifetime
    exports: Exports<E>,
}

impl<E> ModuleRecord<E> {
    pub(crate) fn new(id: ModuleId) -> Self
    where
        E: Default,
    {
        Self {
            id,
            loaded: Cell::new(false),
            exports: Exports::default(),
        }
    }

    /// The identifier this record belongs to
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    /// Whether the initializer has finished successfully
    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    /// The module's exports container
    pub fn exports(&self) -> &Exports<E> {
        &self.exports
    }

    /// Only the loader flips this, and only after the initializer
    /// returns Ok
    pub(crate) fn mark_loaded(&self) {
        self.loaded.set(true);
    }
}

impl<E> fmt::Debug for ModuleRecord<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRecord")
            .field("id", &self.id)
            .field("loaded", &self.loaded.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_starts_pending() {
        let record: ModuleRecord<i64> = ModuleRecord::new(ModuleId::new("m"));

        assert_eq!(record.id().as_str(), "m");
        assert!(!record.is_loaded());
        assert_eq!(*record.exports().borrow(), 0);
    }

    #[test]
    fn test_mark_loaded_is_sticky() {
        let record: ModuleRecord<i64> = ModuleRecord::new(ModuleId::new("m"));

        record.mark_loaded();
        assert!(record.is_loaded());
    }
}
