//! A minimal synchronous module-loading runtime.
//! Module bodies are definition functions keyed by identifier; resolution
//! is lazy, memoized per loader, and tolerant of dependency cycles.

pub mod error;
pub mod exports;
pub mod id;
pub mod loader;
pub mod record;
pub mod table;

pub use error::{LoadError, LoadResult};
pub use exports::Exports;
pub use id::ModuleId;
pub use loader::{ModuleLoader, Resolver};
pub use record::ModuleRecord;
pub use table::{Initializer, ModuleTable};
