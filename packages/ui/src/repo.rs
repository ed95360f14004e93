//! The console's record store, shared by every screen through context.
//!
//! [`Console`] bundles the [`Records`] repository with the photo pipeline. The
//! backend is chosen from [`ConsoleConfig`]:
//! - **URL configured**: PostgREST via [`api::RestStore`]
//! - **No URL** (demo mode): an in-process [`store::MemoryStore`] seeded with a
//!   small sample so every screen has something to show
//!
//! Native launchers read `<config_dir>/retirement-console/console.toml` and
//! then `RECORD_STORE_URL` / `RECORD_STORE_API_KEY` (a `.env` file is honoured).
//! Web builds take the same two variables at compile time.

use api::{PhotoPipeline, RestStore};
use dioxus::prelude::*;
use serde_json::json;
use store::{ConsoleConfig, Filter, MemoryStore, Query, RecordStore, Repository, Row, StoreError, Table};

/// Either backend behind one type, so screens stay non-generic.
#[derive(Clone, Debug)]
pub enum ConsoleStore {
    Rest(RestStore),
    Memory(MemoryStore),
}

impl RecordStore for ConsoleStore {
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Row>, StoreError> {
        match self {
            ConsoleStore::Rest(s) => s.select(table, query).await,
            ConsoleStore::Memory(s) => s.select(table, query).await,
        }
    }

    async fn insert(&self, table: Table, row: Row) -> Result<(), StoreError> {
        match self {
            ConsoleStore::Rest(s) => s.insert(table, row).await,
            ConsoleStore::Memory(s) => s.insert(table, row).await,
        }
    }

    async fn update(&self, table: Table, row: Row, filter: &Filter) -> Result<(), StoreError> {
        match self {
            ConsoleStore::Rest(s) => s.update(table, row, filter).await,
            ConsoleStore::Memory(s) => s.update(table, row, filter).await,
        }
    }

    async fn delete(&self, table: Table, filter: &Filter) -> Result<(), StoreError> {
        match self {
            ConsoleStore::Rest(s) => s.delete(table, filter).await,
            ConsoleStore::Memory(s) => s.delete(table, filter).await,
        }
    }
}

pub type Records = Repository<ConsoleStore>;

#[derive(Clone, Debug)]
pub struct Console {
    pub records: Records,
    pub photos: PhotoPipeline,
    pub demo: bool,
}

impl PartialEq for Console {
    fn eq(&self, other: &Self) -> bool {
        self.demo == other.demo && self.photos == other.photos
    }
}

impl Console {
    pub fn from_config(config: &ConsoleConfig) -> Self {
        let photos = PhotoPipeline::from_config(&config.photo);
        if config.is_demo() {
            tracing::warn!("no record store configured, running against demo data");
            Self {
                records: Repository::new(ConsoleStore::Memory(demo_store())),
                photos,
                demo: true,
            }
        } else {
            tracing::info!(url = %config.record_store.url, "using record store");
            Self {
                records: Repository::new(ConsoleStore::Rest(RestStore::from_config(
                    &config.record_store,
                ))),
                photos,
                demo: false,
            }
        }
    }
}

/// Consume the [`Console`] from context.
pub fn use_console() -> Console {
    use_context::<Console>()
}

/// The shared repository, from inside an event handler or task.
pub fn records() -> Records {
    consume_context::<Console>().records
}

/// The photo pipeline, from inside an event handler or task.
pub fn photos() -> PhotoPipeline {
    consume_context::<Console>().photos
}

/// Resolve configuration for this platform.
pub fn load_config() -> ConsoleConfig {
    #[cfg(target_arch = "wasm32")]
    {
        ConsoleConfig::default().with_overrides(
            option_env!("RECORD_STORE_URL").map(str::to_string),
            option_env!("RECORD_STORE_API_KEY").map(str::to_string),
        )
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        dotenvy::dotenv().ok();
        let path = dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("retirement-console")
            .join(ConsoleConfig::filename());
        let file = match std::fs::read_to_string(&path) {
            Ok(raw) => ConsoleConfig::from_toml(&raw).unwrap_or_else(|e| {
                tracing::error!(path = %path.display(), "ignoring malformed config: {e}");
                ConsoleConfig::default()
            }),
            Err(_) => {
                tracing::debug!(path = %path.display(), "no config file");
                ConsoleConfig::default()
            }
        };
        file.with_overrides(
            std::env::var("RECORD_STORE_URL").ok(),
            std::env::var("RECORD_STORE_API_KEY").ok(),
        )
    }
}

fn row(value: serde_json::Value) -> Row {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Row::new(),
    }
}

/// Sample data for demo mode.
pub fn demo_store() -> MemoryStore {
    MemoryStore::new()
        .with_rows(
            Table::Client,
            [
                row(json!({
                    "id": "demo-client-1", "name": "Evergreen Living", "status": "Active",
                    "contact_name": "Priya Raman", "contact_designation": "Operations Head",
                    "contact_email": "priya@evergreen.example", "contact_phone": "+91 98450 11111",
                    "website": "https://evergreen.example", "subscription_plan_id": null
                })),
                row(json!({
                    "id": "demo-client-2", "name": "Harbour Homes", "status": "In Discussion",
                    "contact_name": "Tom Ellis", "subscription_plan_id": null
                })),
            ],
        )
        .with_rows(
            Table::Community,
            [row(json!({
                "id": "demo-community-1", "client_id": "demo-client-1", "name": "Maple Court",
                "address_line1": "12 Lake Road", "locality": "Bengaluru",
                "country_subdivision": "Karnataka", "postal_code": "560001", "country": "India",
                "status": "Active", "onboarding_status": "Live", "timezone": "Asia/Kolkata",
                "onboarding_date": "2024-01-15"
            }))],
        )
        .with_rows(
            Table::Unit,
            [
                row(json!({
                    "id": "demo-unit-1", "community_id": "demo-community-1", "unit_number": "A101",
                    "unit_name": "Garden View", "unit_type": "1BHK", "block": "A", "floor": "1",
                    "area": 54.0, "bedroom": 1, "bathroom": 1, "status": "Occupied",
                    "monthly_rent": 42000.0, "resident_capacity": 2, "is_accessible": true
                })),
                row(json!({
                    "id": "demo-unit-2", "community_id": "demo-community-1", "unit_number": "A102",
                    "unit_type": "Studio", "status": "Available", "is_accessible": false
                })),
            ],
        )
        .with_rows(
            Table::Resident,
            [row(json!({
                "id": "demo-resident-1", "community_id": "demo-community-1",
                "first_name": "Meera", "last_name": "Iyer", "preferred_name": "Meera",
                "date_of_birth": "1946-08-02", "status": "Active"
            }))],
        )
        .with_rows(
            Table::UnitResident,
            [row(json!({
                "unit_id": "demo-unit-1", "resident_id": "demo-resident-1",
                "move_in_date": "2024-02-01"
            }))],
        )
        .with_rows(
            Table::Staff,
            [row(json!({
                "id": "demo-staff-1", "community_id": "demo-community-1",
                "first_name": "Arjun", "last_name": "Das", "job_title": "Care Coordinator",
                "department": "Care", "employment_type": "Full-time", "status": "Active",
                "hire_date": "2023-06-01"
            }))],
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::models::{Resident, Unit};

    #[tokio::test]
    async fn test_demo_data_is_consistent() {
        let console = Console::from_config(&ConsoleConfig::default());
        assert!(console.demo);

        let records = console.records;
        let owned = records.communities_of_client("demo-client-1").await.unwrap();
        assert_eq!(owned.len(), 1);

        let units: Vec<Unit> = records.units_in(&owned[0].id).await.unwrap();
        assert_eq!(units[0].unit_number, "A101");

        let residents: Vec<Resident> = records.residents_in(&owned[0].id).await.unwrap();
        let assigned = records
            .assignments_of(residents[0].id.as_deref().unwrap())
            .await
            .unwrap();
        assert_eq!(assigned[0].unit_id, "demo-unit-1");
    }

    #[test]
    fn test_configured_url_selects_rest() {
        let console = Console::from_config(&ConsoleConfig::new("https://x.example", "anon"));
        assert!(!console.demo);
        assert!(matches!(console.records.store(), ConsoleStore::Rest(_)));
    }
}
