use serde::{Deserialize, Serialize};

use super::Record;
use crate::query::Table;

labelled_enum! {
    UnitType default Studio {
        Studio => "Studio",
        OneBhk => "1BHK",
        TwoBhk => "2BHK",
        Shared => "Shared",
        Villa => "Villa",
    }
}

labelled_enum! {
    UnitStatus default Available {
        Available => "Available",
        Occupied => "Occupied",
        Reserved => "Reserved",
        Maintenance => "Maintenance",
        Unavailable => "Unavailable",
    }
}

/// A lettable unit inside a community.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub community_id: String,
    #[serde(default)]
    pub unit_number: String,
    #[serde(default)]
    pub unit_name: Option<String>,
    #[serde(default)]
    pub unit_type: UnitType,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub bedroom: Option<i32>,
    #[serde(default)]
    pub bathroom: Option<i32>,
    #[serde(default)]
    pub status: UnitStatus,
    #[serde(default)]
    pub monthly_rent: Option<f64>,
    #[serde(default)]
    pub resident_capacity: Option<i32>,
    #[serde(default)]
    pub is_accessible: bool,
}

impl Unit {
    /// `A101 - Garden View`, or just the number when unnamed.
    pub fn title(&self) -> String {
        match self.unit_name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => format!("{} - {name}", self.unit_number),
            None => self.unit_number.clone(),
        }
    }
}

impl Record for Unit {
    const TABLE: Table = Table::Unit;
    const ORDER_BY: &'static str = "unit_number";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
