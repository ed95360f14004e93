use serde::{Deserialize, Serialize};

use super::Record;
use crate::query::Table;

labelled_enum! {
    /// Sales pipeline stage of a client organisation.
    ClientStatus default Lead {
        Lead => "Lead",
        InDiscussion => "In Discussion",
        Confirmed => "Confirmed",
        Active => "Active",
        Inactive => "Inactive",
    }
}

/// An organisation that owns one or more communities.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: ClientStatus,
    /// Sent as `null` when no plan is chosen.
    #[serde(default)]
    pub subscription_plan_id: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_designation: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl Record for Client {
    const TABLE: Table = Table::Client;
    const ORDER_BY: &'static str = "name";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
