use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{iso_date, Record};
use crate::query::Table;

labelled_enum! {
    CommunityStatus default Active {
        Active => "Active",
        Inactive => "Inactive",
    }
}

labelled_enum! {
    /// How far a community has progressed through onboarding.
    OnboardingStatus default SetupRequired {
        SetupRequired => "Setup Required",
        DataImport => "Data Import",
        StaffTraining => "Staff Training",
        Live => "Live",
    }
}

/// A retirement community operated on behalf of a client.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Community {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub address_line3: Option<String>,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub country_subdivision: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub status: CommunityStatus,
    #[serde(default)]
    pub onboarding_status: OnboardingStatus,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default, with = "iso_date")]
    pub onboarding_date: Option<NaiveDate>,
}

impl Community {
    /// `Locality, Subdivision Postcode` line of the postal address.
    pub fn locality_line(&self) -> String {
        format!(
            "{}, {} {}",
            self.locality, self.country_subdivision, self.postal_code
        )
        .trim()
        .to_string()
    }
}

impl Record for Community {
    const TABLE: Table = Table::Community;
    const ORDER_BY: &'static str = "name";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
