//! Invocation counting for memoization assertions

use std::cell::Cell;
use std::rc::Rc;

use modloader_core::{Exports, LoadResult, ModuleRecord, Resolver};

/// Counts how many times an initializer body actually ran
///
/// Clones share the count, so a test keeps one handle while the module
/// table owns the other.
#[derive(Debug, Clone, Default)]
pub struct InvocationCounter(Rc<Cell<usize>>);

impl InvocationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one invocation
    pub fn bump(&self) {
        self.0.set(self.0.get() + 1);
    }

    /// How many invocations were recorded
    pub fn count(&self) -> usize {
        self.0.get()
    }
}

/// Wrap an initializer so every run bumps `counter` before the body
pub fn counted<E, F>(
    counter: &InvocationCounter,
    init: F,
) -> impl Fn(&ModuleRecord<E>, &Exports<E>, Resolver<'_, E>) -> LoadResult<()> + 'static
where
    E: 'static,
    F: Fn(&ModuleRecord<E>, &Exports<E>, Resolver<'_, E>) -> LoadResult<()> + 'static,
{
    let counter = counter.clone();
    move |module, exports, require| {
        counter.bump();
        init(module, exports, require)
    }
}
