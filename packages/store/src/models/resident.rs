use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{iso_date, Record};
use crate::query::Table;

labelled_enum! {
    ResidentStatus default Active {
        Active => "Active",
        Inactive => "Inactive",
    }
}

/// A person living in a community.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub community_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub preferred_name: Option<String>,
    #[serde(default, with = "iso_date")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub primary_phone: Option<String>,
    #[serde(default)]
    pub primary_email: Option<String>,
    #[serde(default)]
    pub status: ResidentStatus,
    /// Base64 JPEG without the `data:` prefix.
    #[serde(default)]
    pub photo_blob: Option<String>,
}

impl Resident {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Displayable `data:` URL for the stored photo.
    pub fn photo_data_url(&self) -> Option<String> {
        self.photo_blob
            .as_deref()
            .filter(|b| !b.is_empty())
            .map(|b| format!("data:image/jpeg;base64,{b}"))
    }
}

impl Record for Resident {
    const TABLE: Table = Table::Resident;
    const ORDER_BY: &'static str = "last_name";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Assignment of a resident to a unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitResident {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub unit_id: String,
    pub resident_id: String,
    #[serde(default, with = "iso_date")]
    pub move_in_date: Option<NaiveDate>,
}

impl Record for UnitResident {
    const TABLE: Table = Table::UnitResident;
    const ORDER_BY: &'static str = "move_in_date";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
