//! Hello Component - register on the host, instantiate from the module side.
//!
//! Run with: RUST_LOG=spark_bridge=debug cargo run --example hello_component

use std::cell::RefCell;

use spark_bridge::{BridgeError, ClassLoader, ClassTable, HostContext, Props};
use tracing_subscriber::EnvFilter;

/// Stand-in for a DOM element: records what got mounted into it.
#[derive(Default)]
struct Element {
    id: &'static str,
    children: RefCell<Vec<String>>,
}

fn main() -> Result<(), BridgeError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let host: HostContext<Element> = HostContext::new();

    // Host setup
    let bridge = host.initialize();
    host.register_component("Greeting", |target: &Element, _props: &Props| {
        target.children.borrow_mut().push("Hello from the host!".to_string());
    })?;

    // Module side
    let imports = host.imports()?;
    let root = Element {
        id: "app",
        ..Default::default()
    };

    if imports.component_exists("Greeting") {
        let instance = imports.instantiate("Greeting", &root)?;
        println!("mounted {instance} into #{}", root.id);
    }

    match imports.instantiate("Missing", &root) {
        Err(err) => println!("expected failure: {err}"),
        Ok(instance) => println!("unexpected instance {instance}"),
    }

    // Lazy class load
    let loader = ClassLoader::from_host(&host)?;
    let mut table = ClassTable::new();
    let load = loader.load(&mut table, &["Clock"], "./clock.js")?;
    println!("host module source:\n{}", load.source);

    bridge.register_component("Clock", |target: &Element, _props: &Props| {
        target.children.borrow_mut().push("12:00".to_string());
    })?;
    loader.tracker().mark_loaded();

    for &handle in load.pending.handles() {
        table.attach_new_instance(handle, &bridge, &root)?;
    }

    println!("loading progress: {}", imports.loading_progress());
    println!("#{} children: {:?}", root.id, root.children.borrow());
    Ok(())
}
