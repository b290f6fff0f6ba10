// Wire up the smallest interesting module set and run it end to end.
// Set RUST_LOG=debug to watch the loader instantiate and cache modules.
use modloader_core::{ModuleLoader, ModuleTable};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Payload {
    value: i64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let mut table: ModuleTable<Payload> = ModuleTable::new();
    table.define("1", |_module, exports, _require| {
        exports.borrow_mut().value = 42;
        Ok(())
    });
    table.define("2", |_module, exports, require| {
        let base = require.resolve("1")?.borrow().value;
        exports.borrow_mut().value = base + 1;
        Ok(())
    });

    let loader = ModuleLoader::new(table, "2");
    let exports = loader.run()?;
    println!("entry exports: {:?}", exports.borrow());

    // Every id is now cached; a second resolve is a pure lookup
    let again = loader.resolve("1")?;
    println!("dependency exports: {:?}", again.borrow());
    println!("cached records: {}", loader.cached_len());

    Ok(())
}
