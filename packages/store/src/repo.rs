//! # Repository: typed record access over an abstract record store
//!
//! [`RecordStore`] is the table-level CRUD seam: four async operations keyed by
//! [`Table`], exchanging JSON [`Row`]s and reporting failures as [`StoreError`]
//! values. Implementations live in [`crate::memory`] (in-process) and in the
//! `api` crate (PostgREST over HTTP).
//!
//! [`Repository`] wraps any store and speaks in [`Record`] types instead of rows.
//!
//! ## Generic operations
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`list`](Repository::list) | Select rows matching a [`Query`] and decode them. |
//! | [`refs`](Repository::refs) | `id, name` projection of a table, for pickers. |
//! | [`get`](Repository::get) | Fetch one record by id; [`StoreError::NotFound`] when absent. |
//! | [`create`](Repository::create) | Insert a record; the backend assigns its id. |
//! | [`update`](Repository::update) | Full-record overwrite filtered on id, minus [`Record::IMMUTABLE`] columns. |
//! | [`save`](Repository::save) | `update` when editing an existing id, otherwise `create`. |
//! | [`delete`](Repository::delete) | Delete by id. |
//!
//! ## Domain operations
//!
//! Per-screen queries (`clients`, `units_in`, `residents_in`, ...) fix the filter
//! and ordering each manager screen uses. [`terminate_staff`](Repository::terminate_staff)
//! validates the end date before anything is sent, and the unit assignment
//! helpers manage the `unit_resident` join table.

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::error::StoreError;
use crate::models::{
    check_termination, Client, Community, NamedRef, Record, Resident, Staff, StaffStatus, Unit,
    UnitResident,
};
use crate::query::{Filter, Query, Row, Table};

/// Async table-level CRUD accessor.
pub trait RecordStore {
    fn select(
        &self,
        table: Table,
        query: &Query,
    ) -> impl std::future::Future<Output = Result<Vec<Row>, StoreError>>;
    fn insert(
        &self,
        table: Table,
        row: Row,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn update(
        &self,
        table: Table,
        row: Row,
        filter: &Filter,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn delete(
        &self,
        table: Table,
        filter: &Filter,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
}

/// Typed access to the record store.
#[derive(Clone, Debug)]
pub struct Repository<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Select records of type `T` matching `query`.
    pub async fn list<T: Record>(&self, query: &Query) -> Result<Vec<T>, StoreError> {
        let rows = self.store.select(T::TABLE, query).await?;
        rows.into_iter().map(from_row::<T>).collect()
    }

    /// `id, name` of every row of `table`, ordered by name.
    pub async fn refs(&self, table: Table, query: Query) -> Result<Vec<NamedRef>, StoreError> {
        let rows = self.store.select(table, &query).await?;
        rows.into_iter()
            .map(|row| {
                serde_json::from_value(Value::Object(row)).map_err(|e| StoreError::Decode {
                    table,
                    message: e.to_string(),
                })
            })
            .collect()
    }

    /// Fetch a single record by id.
    pub async fn get<T: Record>(&self, id: &str) -> Result<T, StoreError> {
        let rows = self.store.select(T::TABLE, &Query::all().eq("id", id)).await?;
        match rows.into_iter().next() {
            Some(row) => from_row(row),
            None => Err(StoreError::NotFound { table: T::TABLE }),
        }
    }

    pub async fn create<T: Record>(&self, record: &T) -> Result<(), StoreError> {
        let row = to_row(record)?;
        tracing::debug!(table = %T::TABLE, "insert");
        self.store.insert(T::TABLE, row).await
    }

    /// Overwrite every mutable column of the record with id `id`.
    pub async fn update<T: Record>(&self, id: &str, record: &T) -> Result<(), StoreError> {
        let mut row = to_row(record)?;
        for column in T::IMMUTABLE {
            row.remove(*column);
        }
        tracing::debug!(table = %T::TABLE, id, "update");
        self.store.update(T::TABLE, row, &Filter::id(id)).await
    }

    /// Insert-or-update as submitted by a form.
    pub async fn save<T: Record>(&self, editing: Option<&str>, record: &T) -> Result<(), StoreError> {
        match editing {
            Some(id) => self.update(id, record).await,
            None => self.create(record).await,
        }
    }

    pub async fn delete<T: Record>(&self, id: &str) -> Result<(), StoreError> {
        tracing::debug!(table = %T::TABLE, id, "delete");
        self.store.delete(T::TABLE, &Filter::id(id)).await
    }

    pub async fn clients(&self) -> Result<Vec<Client>, StoreError> {
        self.list(&Query::all().order_by(Client::ORDER_BY)).await
    }

    pub async fn client_refs(&self) -> Result<Vec<NamedRef>, StoreError> {
        self.refs(Table::Client, Query::columns(&["id", "name"]).order_by("name"))
            .await
    }

    pub async fn communities(&self) -> Result<Vec<Community>, StoreError> {
        self.list(&Query::all().order_by(Community::ORDER_BY)).await
    }

    /// Communities owned by a client.
    pub async fn communities_of_client(&self, client_id: &str) -> Result<Vec<NamedRef>, StoreError> {
        self.refs(
            Table::Community,
            Query::columns(&["id", "name"])
                .eq("client_id", client_id)
                .order_by("name"),
        )
        .await
    }

    pub async fn units_in(&self, community_id: &str) -> Result<Vec<Unit>, StoreError> {
        self.list(
            &Query::all()
                .eq("community_id", community_id)
                .order_by(Unit::ORDER_BY),
        )
        .await
    }

    pub async fn residents_in(&self, community_id: &str) -> Result<Vec<Resident>, StoreError> {
        self.list(
            &Query::all()
                .eq("community_id", community_id)
                .order_by(Resident::ORDER_BY),
        )
        .await
    }

    pub async fn staff_in(&self, community_id: &str) -> Result<Vec<Staff>, StoreError> {
        self.list(
            &Query::all()
                .eq("community_id", community_id)
                .order_by(Staff::ORDER_BY),
        )
        .await
    }

    /// Mark a staff member as having left.
    ///
    /// Rejected without contacting the store unless `end_date` is after
    /// `hire_date`. Sends exactly `{status: "Inactive", end_date}`.
    pub async fn terminate_staff(
        &self,
        id: &str,
        hire_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<(), StoreError> {
        let end = check_termination(hire_date, end_date)?;
        let mut row = Row::new();
        row.insert("status".to_string(), json!(StaffStatus::Inactive));
        row.insert(
            "end_date".to_string(),
            json!(end.format("%Y-%m-%d").to_string()),
        );
        tracing::info!(id, end_date = %end, "terminating staff member");
        self.store.update(Table::Staff, row, &Filter::id(id)).await
    }

    /// Unit assignments of one resident.
    pub async fn assignments_of(&self, resident_id: &str) -> Result<Vec<UnitResident>, StoreError> {
        self.list(
            &Query::all()
                .eq("resident_id", resident_id)
                .order_by(UnitResident::ORDER_BY),
        )
        .await
    }

    pub async fn assign_unit(
        &self,
        resident_id: &str,
        unit_id: &str,
        move_in_date: Option<NaiveDate>,
    ) -> Result<(), StoreError> {
        if unit_id.is_empty() {
            return Err(StoreError::validation("Select a unit to assign."));
        }
        self.create(&UnitResident {
            id: None,
            unit_id: unit_id.to_string(),
            resident_id: resident_id.to_string(),
            move_in_date,
        })
        .await
    }

    pub async fn unassign(&self, assignment_id: &str) -> Result<(), StoreError> {
        self.delete::<UnitResident>(assignment_id).await
    }
}

fn to_row<T: Record>(record: &T) -> Result<Row, StoreError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(mut row)) => {
            row.remove("id");
            Ok(row)
        }
        Ok(other) => Err(StoreError::Decode {
            table: T::TABLE,
            message: format!("expected an object, got {other}"),
        }),
        Err(e) => Err(StoreError::Decode {
            table: T::TABLE,
            message: e.to_string(),
        }),
    }
}

fn from_row<T: Record>(row: Row) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(row)).map_err(|e| StoreError::Decode {
        table: T::TABLE,
        message: e.to_string(),
    })
}
