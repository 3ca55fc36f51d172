//! Example: watch a simulated driver and print device changes.

use std::sync::Arc;
use std::time::Duration;

use portpair_core::{DeviceEngine, MockBackend, PortKind};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let backend = MockBackend::new();
    let engine = Arc::new(DeviceEngine::new(Arc::new(backend.clone())));

    engine.add_listener(|pairs| {
        println!("Available devices: {}", pairs.len());
        for pair in pairs {
            println!("  {}", pair);
        }
    });

    let interval = engine.config().scan_interval();
    engine.start(interval);

    // Simulate devices coming and going.
    tokio::time::sleep(Duration::from_millis(150)).await;
    backend.add_port(PortKind::Input, "Launchpad");
    backend.add_port(PortKind::Output, "Launchpad");

    tokio::time::sleep(Duration::from_millis(150)).await;
    backend.add_port(PortKind::Input, "Keystation");

    tokio::time::sleep(Duration::from_millis(150)).await;
    backend.remove_port(PortKind::Input, "Keystation");

    tokio::time::sleep(Duration::from_millis(150)).await;
    engine.stop().unwrap();
}
