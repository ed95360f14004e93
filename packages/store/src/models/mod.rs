//! # Record models
//!
//! One struct per backend table, mirrored field-for-field. Every record type
//! implements [`Record`], which ties it to its [`Table`] and to the column the
//! manager screens sort by; [`crate::Repository`] uses that to read and write
//! records generically.
//!
//! | Struct | Table | Sorted by |
//! |--------|-------|-----------|
//! | [`Client`] | `client` | `name` |
//! | [`Community`] | `community` | `name` |
//! | [`Unit`] | `unit` | `unit_number` |
//! | [`Resident`] | `resident` | `last_name` |
//! | [`UnitResident`] | `unit_resident` | `move_in_date` |
//! | [`Staff`] | `staff` | `last_name` |
//!
//! Status-like columns are closed enums whose serialized form is the exact label
//! stored by the backend (`"In Discussion"`, `"1BHK"`, `"On Leave"`, ...).
//!
//! Identifiers are optional: a record built from an "Add" form has no `id`
//! until the backend assigns one, and the `id` is never serialized when absent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::query::Table;

/// Declares a closed set of backend labels as a Rust enum.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident default $default:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The label stored by the backend and shown in forms.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

mod client;
mod community;
mod resident;
mod staff;
mod unit;

pub use client::{Client, ClientStatus};
pub use community::{Community, CommunityStatus, OnboardingStatus};
pub use resident::{Resident, ResidentStatus, UnitResident};
pub use staff::{check_termination, EmploymentType, Staff, StaffStatus};
pub use unit::{Unit, UnitStatus, UnitType};

/// A row type stored in one backend table.
pub trait Record: Serialize + DeserializeOwned + Clone + PartialEq + 'static {
    const TABLE: Table;
    /// Default ordering column for list screens.
    const ORDER_BY: &'static str;
    /// Columns written on insert but never sent by an update.
    const IMMUTABLE: &'static [&'static str] = &[];

    fn id(&self) -> Option<&str>;
}

/// `id, name` projection used for pickers and child lists.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Calendar dates as `YYYY-MM-DD`.
///
/// The backend may hand back timestamps for date columns
/// (`2024-03-01T00:00:00+00:00`); only the date part is kept.
pub(crate) mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => {
                let day = s.get(..10).unwrap_or(s);
                NaiveDate::parse_from_str(day, FORMAT)
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        }
    }
}

/// Parse a form date value; empty means "not set".
pub fn parse_date(value: &str) -> Result<Option<chrono::NaiveDate>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("Invalid date: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_labels_roundtrip_through_serde() {
        let status: ClientStatus = serde_json::from_value(json!("In Discussion")).unwrap();
        assert_eq!(status, ClientStatus::InDiscussion);
        assert_eq!(serde_json::to_value(UnitType::OneBhk).unwrap(), json!("1BHK"));
        assert_eq!(StaffStatus::from_label("On Leave"), Some(StaffStatus::OnLeave));
        assert_eq!(StaffStatus::from_label("Retired"), None);
        assert_eq!(OnboardingStatus::default().to_string(), "Setup Required");
        assert_eq!(UnitStatus::ALL.len(), 5);
    }

    #[test]
    fn test_dates_accept_timestamps() {
        let community: Community = serde_json::from_value(json!({
            "id": "c1",
            "client_id": "k1",
            "name": "Oakwood",
            "onboarding_date": "2024-03-01T00:00:00+00:00",
        }))
        .unwrap();
        assert_eq!(
            community.onboarding_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );

        let encoded = serde_json::to_value(&community).unwrap();
        assert_eq!(encoded["onboarding_date"], json!("2024-03-01"));
    }

    #[test]
    fn test_missing_id_is_not_serialized() {
        let client = Client {
            name: "Acme Care".to_string(),
            ..Client::default()
        };
        let encoded = serde_json::to_value(&client).unwrap();
        assert!(encoded.get("id").is_none());
        assert_eq!(encoded["status"], json!("Lead"));
        assert_eq!(encoded["subscription_plan_id"], json!(null));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("  "), Ok(None));
        assert_eq!(
            parse_date("2023-12-31"),
            Ok(NaiveDate::from_ymd_opt(2023, 12, 31))
        );
        assert!(parse_date("31/12/2023").is_err());
    }
}
