//! List vehicles page by page with request logging.
//!
//! ```sh
//! FLEETDESK_BASE_URL=http://localhost:3001 FLEETDESK_TOKEN=... \
//!     RUST_LOG=fleetdesk=debug cargo run --example list_vehicles --features trace
//! ```

use fleetdesk::{Client, Pagination};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = Client::from_env()?;
    let mut pagination = Pagination::default();

    loop {
        let page = match client.vehicles().list(pagination.params(None)).await {
            Ok(page) => page,
            Err(err) => {
                let classified = err.classify();
                eprintln!("[{}] {}", classified.category(), classified.message);
                break;
            }
        };

        for vehicle in &page.items {
            println!("#{:<5} {} {}", vehicle.id, vehicle.brand, vehicle.model);
        }

        if !page.has_more() {
            println!("~{} vehicles", page.total);
            break;
        }
        pagination.next();
    }

    Ok(())
}
