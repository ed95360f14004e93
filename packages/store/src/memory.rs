use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::StoreError;
use crate::query::{Filter, Query, Row, Table};
use crate::repo::RecordStore;

/// In-memory RecordStore for tests and demo mode.
///
/// Rows keep insertion order; ids are generated as v4 UUIDs the way the
/// backend would.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<HashMap<Table, Vec<Row>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `table` with rows, assigning ids to rows that lack one.
    pub fn with_rows(self, table: Table, rows: impl IntoIterator<Item = Row>) -> Self {
        if let Ok(mut tables) = self.tables.lock() {
            let entries = tables.entry(table).or_default();
            entries.extend(rows.into_iter().map(with_id));
        }
        self
    }

    /// Number of rows currently held in `table`.
    pub fn len(&self, table: Table) -> usize {
        self.tables
            .lock()
            .map(|t| t.get(&table).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Table, Vec<Row>>>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Transport("memory store poisoned".to_string()))
    }
}

fn with_id(mut row: Row) -> Row {
    let missing = !matches!(row.get("id"), Some(Value::String(s)) if !s.is_empty());
    if missing {
        row.insert(
            "id".to_string(),
            Value::String(uuid::Uuid::new_v4().to_string()),
        );
    }
    row
}

/// Strings compare lexically, numbers numerically; nulls sort last.
fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

impl RecordStore for MemoryStore {
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Row>, StoreError> {
        let tables = self.lock()?;
        let mut rows: Vec<Row> = tables
            .get(&table)
            .map(|rows| rows.iter().filter(|r| query.matches(r)).cloned().collect())
            .unwrap_or_default();
        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare(
                    a.get(&order.column).unwrap_or(&Value::Null),
                    b.get(&order.column).unwrap_or(&Value::Null),
                );
                if order.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        Ok(rows.iter().map(|r| query.project(r)).collect())
    }

    async fn insert(&self, table: Table, row: Row) -> Result<(), StoreError> {
        self.lock()?.entry(table).or_default().push(with_id(row));
        Ok(())
    }

    async fn update(&self, table: Table, row: Row, filter: &Filter) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        for existing in tables.entry(table).or_default().iter_mut() {
            if filter.matches(existing) {
                for (column, value) in &row {
                    existing.insert(column.clone(), value.clone());
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, table: Table, filter: &Filter) -> Result<(), StoreError> {
        self.lock()?
            .entry(table)
            .or_default()
            .retain(|r| !filter.matches(r));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Client, ClientStatus, Community, Resident, Staff, StaffStatus, Unit, UnitStatus, UnitType,
    };
    use crate::repo::Repository;
    use chrono::NaiveDate;
    use serde_json::json;

    /// Records every call before delegating to a MemoryStore.
    #[derive(Clone, Default)]
    struct RecordingStore {
        inner: MemoryStore,
        updates: Arc<Mutex<Vec<(Table, Row, Filter)>>>,
        calls: Arc<Mutex<usize>>,
    }

    impl RecordingStore {
        fn bump(&self) {
            *self.calls.lock().unwrap() += 1;
        }
    }

    impl RecordStore for RecordingStore {
        async fn select(&self, table: Table, query: &Query) -> Result<Vec<Row>, StoreError> {
            self.bump();
            self.inner.select(table, query).await
        }

        async fn insert(&self, table: Table, row: Row) -> Result<(), StoreError> {
            self.bump();
            self.inner.insert(table, row).await
        }

        async fn update(&self, table: Table, row: Row, filter: &Filter) -> Result<(), StoreError> {
            self.bump();
            self.updates
                .lock()
                .unwrap()
                .push((table, row.clone(), filter.clone()));
            self.inner.update(table, row, filter).await
        }

        async fn delete(&self, table: Table, filter: &Filter) -> Result<(), StoreError> {
            self.bump();
            self.inner.delete(table, filter).await
        }
    }

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn staff(first: &str, last: &str) -> Staff {
        Staff {
            community_id: "c1".into(),
            first_name: first.into(),
            last_name: last.into(),
            job_title: "Nurse".into(),
            hire_date: day(2022, 5, 1),
            ..Staff::default()
        }
    }

    #[tokio::test]
    async fn test_created_unit_appears_with_generated_id() {
        let repo = Repository::new(MemoryStore::new());
        assert!(repo.units_in("c1").await.unwrap().is_empty());

        let unit = Unit {
            community_id: "c1".into(),
            unit_number: "A101".into(),
            unit_type: UnitType::Studio,
            status: UnitStatus::Available,
            ..Unit::default()
        };
        repo.save(None, &unit).await.unwrap();

        let units = repo.units_in("c1").await.unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].unit_number, "A101");
        assert_eq!(units[0].unit_type, UnitType::Studio);
        assert_eq!(units[0].status, UnitStatus::Available);
        assert!(units[0].id.as_deref().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn test_units_are_scoped_to_community_and_ordered() {
        let repo = Repository::new(MemoryStore::new());
        for (community, number) in [("c1", "B2"), ("c2", "Z9"), ("c1", "A1")] {
            let unit = Unit {
                community_id: community.into(),
                unit_number: number.into(),
                ..Unit::default()
            };
            repo.create(&unit).await.unwrap();
        }

        let numbers: Vec<_> = repo
            .units_in("c1")
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.unit_number)
            .collect();
        assert_eq!(numbers, vec!["A1", "B2"]);
    }

    #[tokio::test]
    async fn test_update_overwrites_record() {
        let repo = Repository::new(MemoryStore::new());
        repo.create(&Client {
            name: "Acme".into(),
            ..Client::default()
        })
        .await
        .unwrap();
        let mut client = repo.clients().await.unwrap().remove(0);
        let id = client.id.clone().unwrap();

        client.status = ClientStatus::Active;
        client.contact_name = Some("Jo".into());
        repo.save(Some(&id), &client).await.unwrap();

        let fetched: Client = repo.get(&id).await.unwrap();
        assert_eq!(fetched.status, ClientStatus::Active);
        assert_eq!(fetched.contact_name.as_deref(), Some("Jo"));
        assert_eq!(fetched.id.as_deref(), Some(id.as_str()));
    }

    #[tokio::test]
    async fn test_get_missing_record() {
        let repo = Repository::new(MemoryStore::new());
        let err = repo.get::<Resident>("nope").await.unwrap_err();
        assert_eq!(
            err,
            StoreError::NotFound {
                table: Table::Resident
            }
        );
    }

    #[tokio::test]
    async fn test_delete_removes_only_matching_row() {
        let store = MemoryStore::new();
        let repo = Repository::new(store.clone());
        repo.create(&staff("Ann", "Lee")).await.unwrap();
        repo.create(&staff("Bob", "Kay")).await.unwrap();

        let listed = repo.staff_in("c1").await.unwrap();
        assert_eq!(listed[0].last_name, "Kay");
        repo.delete::<Staff>(listed[0].id.as_deref().unwrap())
            .await
            .unwrap();

        assert_eq!(store.len(Table::Staff), 1);
        assert_eq!(repo.staff_in("c1").await.unwrap()[0].last_name, "Lee");
    }

    #[tokio::test]
    async fn test_staff_update_never_sends_hire_date() {
        let store = RecordingStore::default();
        let repo = Repository::new(store.clone());
        repo.create(&staff("Ann", "Lee")).await.unwrap();
        let mut member = repo.staff_in("c1").await.unwrap().remove(0);
        let id = member.id.clone().unwrap();

        member.hire_date = day(1999, 1, 1);
        member.job_title = "Head Nurse".into();
        repo.save(Some(&id), &member).await.unwrap();

        let updates = store.updates.lock().unwrap().clone();
        assert_eq!(updates.len(), 1);
        assert!(!updates[0].1.contains_key("hire_date"));
        assert!(!updates[0].1.contains_key("id"));

        let fetched: Staff = repo.get(&id).await.unwrap();
        assert_eq!(fetched.hire_date, day(2022, 5, 1));
        assert_eq!(fetched.job_title, "Head Nurse");
    }

    #[tokio::test]
    async fn test_terminate_rejected_without_backend_call() {
        let store = RecordingStore::default();
        let repo = Repository::new(store.clone());

        let err = repo
            .terminate_staff("s1", day(2022, 5, 1), day(2022, 4, 30))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::Validation("End date must be after hire date.".into())
        );
        let same_day = repo
            .terminate_staff("s1", day(2022, 5, 1), day(2022, 5, 1))
            .await;
        assert!(same_day.is_err());
        assert_eq!(*store.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_terminate_sends_status_and_end_date_only() {
        let store = RecordingStore::default();
        let repo = Repository::new(store.clone());
        repo.create(&staff("Ann", "Lee")).await.unwrap();
        let id = repo.staff_in("c1").await.unwrap()[0].id.clone().unwrap();
        store.updates.lock().unwrap().clear();

        repo.terminate_staff(&id, day(2022, 5, 1), day(2023, 1, 31))
            .await
            .unwrap();

        let updates = store.updates.lock().unwrap().clone();
        assert_eq!(updates.len(), 1);
        let (table, row, filter) = &updates[0];
        assert_eq!(*table, Table::Staff);
        assert_eq!(
            Value::Object(row.clone()),
            json!({"status": "Inactive", "end_date": "2023-01-31"})
        );
        assert_eq!(filter, &Filter::id(&id));

        let fetched: Staff = repo.get(&id).await.unwrap();
        assert_eq!(fetched.status, StaffStatus::Inactive);
        assert_eq!(fetched.end_date, day(2023, 1, 31));
    }

    #[tokio::test]
    async fn test_communities_owned_by_client() {
        let repo = Repository::new(MemoryStore::new());
        for (client, name) in [("k1", "Maple"), ("k2", "Oak"), ("k1", "Birch")] {
            repo.create(&Community {
                client_id: client.into(),
                name: name.into(),
                ..Community::default()
            })
            .await
            .unwrap();
        }

        let owned = repo.communities_of_client("k1").await.unwrap();
        let names: Vec<_> = owned.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Birch", "Maple"]);
        assert!(owned.iter().all(|c| !c.id.is_empty()));
    }

    #[tokio::test]
    async fn test_unit_assignments() {
        let repo = Repository::new(MemoryStore::new());
        repo.assign_unit("r1", "u1", day(2024, 2, 1)).await.unwrap();
        repo.assign_unit("r1", "u2", None).await.unwrap();
        repo.assign_unit("r2", "u1", None).await.unwrap();
        assert!(repo.assign_unit("r1", "", None).await.unwrap_err().is_validation());

        let assigned = repo.assignments_of("r1").await.unwrap();
        assert_eq!(assigned.len(), 2);
        assert_eq!(assigned[0].unit_id, "u1");
        assert_eq!(assigned[0].move_in_date, day(2024, 2, 1));

        repo.unassign(assigned[0].id.as_deref().unwrap())
            .await
            .unwrap();
        let remaining = repo.assignments_of("r1").await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].unit_id, "u2");
    }

    #[tokio::test]
    async fn test_seeded_rows_get_ids() {
        let row = json!({"name": "Seeded"}).as_object().cloned().unwrap();
        let store = MemoryStore::new().with_rows(Table::Client, [row]);
        let clients = Repository::new(store).clients().await.unwrap();
        assert_eq!(clients[0].name, "Seeded");
        assert!(clients[0].id.is_some());
    }
}
