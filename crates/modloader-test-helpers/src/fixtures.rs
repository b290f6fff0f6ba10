//! Test fixtures - prebuilt module tables exercising the loader

use modloader_core::{LoadError, ModuleTable};

use crate::counters::InvocationCounter;

/// Payload used by the narrative fixtures: an append-only event log
pub type Log = Vec<String>;

/// A linear dependency chain of `depth` modules with entry "0"
///
/// Module `i` resolves module `i + 1`; the last module exports 1 and each
/// module above exports one more, so resolving "0" yields `depth` and
/// instantiates every module along the way.
pub fn chain(depth: usize) -> ModuleTable<i64> {
    let mut table = ModuleTable::new();
    for i in 0..depth {
        let next = i + 1;
        if next == depth {
            table.define(i.to_string(), |_module, exports, _require| {
                *exports.borrow_mut() = 1;
                Ok(())
            });
        } else {
            table.define(i.to_string(), move |_module, exports, require| {
                let below = *require.resolve(next.to_string())?.borrow();
                *exports.borrow_mut() = below + 1;
                Ok(())
            });
        }
    }
    table
}

/// A diamond: "entry" resolves "left" and "right", both resolve "shared"
///
/// Returns the table plus the counter behind "shared", for asserting the
/// shared corner runs once.
pub fn diamond() -> (ModuleTable<Log>, InvocationCounter) {
    let counter = InvocationCounter::new();
    let mut table: ModuleTable<Log> = ModuleTable::new();

    table.define("entry", |_module, exports, require| {
        require.resolve("left")?;
        require.resolve("right")?;
        exports.borrow_mut().push("entry".to_string());
        Ok(())
    });
    table.define("left", |_module, exports, require| {
        require.resolve("shared")?;
        exports.borrow_mut().push("left".to_string());
        Ok(())
    });
    table.define("right", |_module, exports, require| {
        require.resolve("shared")?;
        exports.borrow_mut().push("right".to_string());
        Ok(())
    });

    let shared_counter = counter.clone();
    table.define("shared", move |_module, exports, _require| {
        shared_counter.bump();
        exports.borrow_mut().push("shared".to_string());
        Ok(())
    });

    (table, counter)
}

/// Two modules that resolve each other mid-initialization, entry "a"
///
/// "a" logs an entry, resolves "b", then logs again; "b" resolves "a"
/// back and records the partial state it observed at that moment.
pub fn cycle() -> ModuleTable<Log> {
    let mut table: ModuleTable<Log> = ModuleTable::new();

    table.define("a", |_module, exports, require| {
        exports.borrow_mut().push("a:first".to_string());
        require.resolve("b")?;
        exports.borrow_mut().push("a:second".to_string());
        Ok(())
    });
    table.define("b", |_module, exports, require| {
        let seen = require.resolve("a")?.borrow().join(",");
        exports.borrow_mut().push(format!("b saw [{}]", seen));
        Ok(())
    });

    table
}

/// A module that writes one entry and then fails, plus a caller above it
///
/// "boom" logs, then returns `failing_error()`; "caller" logs, resolves
/// "boom", and would log again if the resolve succeeded. The counter
/// proves the failing body never reruns.
pub fn failing() -> (ModuleTable<Log>, InvocationCounter) {
    let counter = InvocationCounter::new();
    let mut table: ModuleTable<Log> = ModuleTable::new();

    let boom_counter = counter.clone();
    table.define("boom", move |_module, exports, _require| {
        boom_counter.bump();
        exports.borrow_mut().push("boom:partial".to_string());
        Err(failing_error())
    });
    table.define("caller", |_module, exports, require| {
        exports.borrow_mut().push("caller:before".to_string());
        require.resolve("boom")?;
        exports.borrow_mut().push("caller:after".to_string());
        Ok(())
    });

    (table, counter)
}

/// The exact error value the "boom" fixture fails with
pub fn failing_error() -> LoadError {
    LoadError::init("deliberate failure")
}
