//! Libras Play entry point
//!
//! The browser build starts from the library's wasm start hook. Natively this
//! opens a directory-backed game store and lists its catalog.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use libras_play::definition::GameDefinition;
    use libras_play::store::{FileStore, GameStore, catalog};

    env_logger::init();
    log::info!("Libras Play (native) starting...");

    let dir = std::env::args().nth(1).unwrap_or_else(|| "games".to_string());
    let store = match FileStore::open(&dir) {
        Ok(store) => store,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let names = match catalog(&store) {
        Ok(names) => names,
        Err(e) => {
            log::error!("Failed to list games: {}", e);
            std::process::exit(1);
        }
    };

    if names.is_empty() {
        log::info!("No games found in {}", dir);
    }
    for name in names {
        match store.get(&name).map(|r| GameDefinition::from_bytes(&r.payload)) {
            Ok(Ok(def)) => log::info!(
                "{} - '{}' ({}, {} signals)",
                name,
                def.name,
                def.difficulty.as_str(),
                def.items.len()
            ),
            Ok(Err(e)) => log::warn!("{} - unplayable: {}", name, e),
            Err(e) => log::warn!("{} - {}", name, e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the library start hook, this is just to satisfy the compiler
}
