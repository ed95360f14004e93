//! PostgREST record store.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `select`  | `GET {url}/rest/v1/{table}?select=*&col=eq.v&order=col.asc` |
//! | `insert`  | `POST {url}/rest/v1/{table}` with a one-element JSON array |
//! | `update`  | `PATCH {url}/rest/v1/{table}?col=eq.v` with a JSON object |
//! | `delete`  | `DELETE {url}/rest/v1/{table}?col=eq.v` |
//!
//! Every request carries `apikey` and `Authorization: Bearer` headers; writes
//! ask for `Prefer: return=minimal` so the backend answers with an empty body.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use store::{Filter, Query, RecordStore, RecordStoreConfig, Row, StoreError, Table};

#[derive(Clone, Debug)]
pub struct RestStore {
    base_url: String,
    api_key: String,
    http: Client,
}

/// Error body returned by PostgREST.
#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &RecordStoreConfig) -> Self {
        Self::new(&config.url, &config.api_key)
    }

    pub fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.name())
    }

    fn request(&self, method: Method, table: Table) -> RequestBuilder {
        self.http
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn send(&self, table: Table, builder: RequestBuilder) -> Result<Response, StoreError> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!(%table, "record store unreachable: {e}");
            StoreError::Transport(e.to_string())
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = backend_error(status.as_u16(), &body);
        tracing::warn!(%table, status = status.as_u16(), "record store rejected request: {err}");
        Err(err)
    }
}

/// Query-string pairs for a select.
pub fn select_params(query: &Query) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), query.columns.to_select())];
    params.extend(query.filters.iter().map(filter_param));
    if let Some(order) = &query.order {
        params.push(("order".to_string(), order.wire_value()));
    }
    params
}

pub fn filter_param(filter: &Filter) -> (String, String) {
    (filter.column.clone(), filter.wire_value())
}

/// Turn a non-2xx response body into a [`StoreError::Backend`].
///
/// Uses the PostgREST `message` (with `details` appended when present), then
/// the raw body, then the bare status.
pub fn backend_error(status: u16, body: &str) -> StoreError {
    let parsed: PostgrestError = serde_json::from_str(body).unwrap_or_default();
    let message = match (parsed.message, parsed.details) {
        (Some(message), Some(details)) if !message.is_empty() && !details.is_empty() => {
            format!("{message} ({details})")
        }
        (Some(message), _) if !message.is_empty() => message,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => format!("request failed with status {status}"),
    };
    StoreError::backend(Some(status), message)
}

impl RecordStore for RestStore {
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Row>, StoreError> {
        let builder = self.request(Method::GET, table).query(&select_params(query));
        let response = self.send(table, builder).await?;
        let rows: Vec<Row> = response.json().await.map_err(|e| StoreError::Decode {
            table,
            message: e.to_string(),
        })?;
        tracing::debug!(%table, rows = rows.len(), "selected");
        Ok(rows)
    }

    async fn insert(&self, table: Table, row: Row) -> Result<(), StoreError> {
        let builder = self
            .request(Method::POST, table)
            .header("Prefer", "return=minimal")
            .json(&[Value::Object(row)]);
        self.send(table, builder).await?;
        Ok(())
    }

    async fn update(&self, table: Table, row: Row, filter: &Filter) -> Result<(), StoreError> {
        let builder = self
            .request(Method::PATCH, table)
            .header("Prefer", "return=minimal")
            .query(&[filter_param(filter)])
            .json(&Value::Object(row));
        self.send(table, builder).await?;
        Ok(())
    }

    async fn delete(&self, table: Table, filter: &Filter) -> Result<(), StoreError> {
        let builder = self
            .request(Method::DELETE, table)
            .query(&[filter_param(filter)]);
        self.send(table, builder).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(params: &[(String, String)]) -> Vec<(&str, &str)> {
        params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let store = RestStore::new("https://demo.supabase.co/", "anon");
        assert_eq!(
            store.table_url(Table::UnitResident),
            "https://demo.supabase.co/rest/v1/unit_resident"
        );
    }

    #[test]
    fn test_select_params() {
        let query = Query::all().eq("community_id", "c1").order_by("unit_number");
        assert_eq!(
            pairs(&select_params(&query)),
            vec![
                ("select", "*"),
                ("community_id", "eq.c1"),
                ("order", "unit_number.asc"),
            ]
        );

        let refs = Query::columns(&["id", "name"]).order_by_desc("name");
        assert_eq!(
            pairs(&select_params(&refs)),
            vec![("select", "id,name"), ("order", "name.desc")]
        );
    }

    #[test]
    fn test_backend_error_prefers_postgrest_message() {
        let err = backend_error(
            409,
            r#"{"code":"23505","message":"duplicate key value","details":"Key (unit_number)=(A101) already exists.","hint":null}"#,
        );
        assert_eq!(
            err,
            StoreError::Backend {
                status: Some(409),
                message: "duplicate key value (Key (unit_number)=(A101) already exists.)".into(),
            }
        );

        let err = backend_error(400, r#"{"message":"bad filter","details":null}"#);
        assert_eq!(err.to_string(), "bad filter");
    }

    #[test]
    fn test_backend_error_falls_back_to_body_then_status() {
        assert_eq!(
            backend_error(502, "Bad Gateway\n").to_string(),
            "Bad Gateway"
        );
        assert_eq!(
            backend_error(500, "").to_string(),
            "request failed with status 500"
        );
    }

    #[test]
    fn test_backend_error_ignores_empty_message() {
        let body = r#"{"message":"","details":"row is locked"}"#;
        let err = backend_error(423, body);
        assert_eq!(err.to_string(), body);
        assert!(!err.to_string().starts_with(" ("));
    }
}
