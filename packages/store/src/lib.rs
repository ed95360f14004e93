pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod repo;

mod memory;
pub use memory::MemoryStore;

pub use config::{ConsoleConfig, PhotoConfig, RecordStoreConfig};
pub use error::StoreError;
pub use models::{NamedRef, Record};
pub use query::{Columns, Filter, Order, Query, Row, Table};
pub use repo::{RecordStore, Repository};
