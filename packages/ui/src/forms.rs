//! Editable form models behind the Add/Update modals.
//!
//! Inputs are bound to plain strings; [`RecordForm::to_record`] is where they
//! are trimmed, parsed and checked for required values before anything is sent.
//! Empty optional inputs become `None` (sent as `null`).

use std::fmt::Display;
use std::str::FromStr;

use api::{CapturedPhoto, PhotoError};
use chrono::NaiveDate;
use store::models::{
    parse_date, Client, ClientStatus, Community, CommunityStatus, EmploymentType,
    OnboardingStatus, Resident, ResidentStatus, Staff, StaffStatus, Unit, UnitResident, UnitStatus,
    UnitType,
};
use store::{Record, StoreError};

use crate::request_gate::{RequestGate, Ticket};

pub trait RecordForm: Clone + Default + PartialEq + 'static {
    type Record: Record;

    fn from_record(record: &Self::Record) -> Self;

    fn to_record(&self) -> Result<Self::Record, StoreError>;

    /// Id of the record being edited; `None` for an Add form.
    fn editing(&self) -> Option<&str>;
}

/// `(value, label)` pairs for a select over a label enum.
pub fn choices<E: Copy + Display>(all: &[E]) -> Vec<(String, String)> {
    all.iter()
        .map(|e| (e.to_string(), e.to_string()))
        .collect()
}

/// Units a resident can still be assigned to, as `(id, title)` pairs.
pub fn assignable_units(units: &[Unit], assigned: &[UnitResident]) -> Vec<(String, String)> {
    units
        .iter()
        .filter_map(|u| u.id.as_ref().map(|id| (id, u)))
        .filter(|(id, _)| !assigned.iter().any(|a| &a.unit_id == *id))
        .map(|(id, u)| (id.clone(), u.title()))
        .collect()
}

fn text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn required(value: &str, label: &str) -> Result<String, StoreError> {
    text(value).ok_or_else(|| StoreError::validation(format!("{label} is required.")))
}

fn date(value: &str, label: &str) -> Result<Option<NaiveDate>, StoreError> {
    parse_date(value).map_err(|_| StoreError::validation(format!("{label} must be a date.")))
}

fn number<T: FromStr>(value: &str, label: &str) -> Result<Option<T>, StoreError> {
    match text(value) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| StoreError::validation(format!("{label} must be a number."))),
    }
}

fn shown<T: Display>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn shown_date(value: &Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientForm {
    pub id: Option<String>,
    pub name: String,
    pub status: ClientStatus,
    pub subscription_plan_id: String,
    pub contact_name: String,
    pub contact_designation: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub website: String,
}

impl RecordForm for ClientForm {
    type Record = Client;

    fn from_record(c: &Client) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            status: c.status,
            subscription_plan_id: shown(&c.subscription_plan_id),
            contact_name: shown(&c.contact_name),
            contact_designation: shown(&c.contact_designation),
            contact_email: shown(&c.contact_email),
            contact_phone: shown(&c.contact_phone),
            website: shown(&c.website),
        }
    }

    fn to_record(&self) -> Result<Client, StoreError> {
        Ok(Client {
            id: self.id.clone(),
            name: required(&self.name, "Name")?,
            status: self.status,
            subscription_plan_id: text(&self.subscription_plan_id),
            contact_name: text(&self.contact_name),
            contact_designation: text(&self.contact_designation),
            contact_email: text(&self.contact_email),
            contact_phone: text(&self.contact_phone),
            website: text(&self.website),
        })
    }

    fn editing(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommunityForm {
    pub id: Option<String>,
    pub client_id: String,
    pub name: String,
    pub address_line1: String,
    pub address_line2: String,
    pub address_line3: String,
    pub locality: String,
    pub country_subdivision: String,
    pub postal_code: String,
    pub country: String,
    pub status: CommunityStatus,
    pub onboarding_status: OnboardingStatus,
    pub timezone: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub logo_url: String,
    pub onboarding_date: String,
}

impl RecordForm for CommunityForm {
    type Record = Community;

    fn from_record(c: &Community) -> Self {
        Self {
            id: c.id.clone(),
            client_id: c.client_id.clone(),
            name: c.name.clone(),
            address_line1: c.address_line1.clone(),
            address_line2: shown(&c.address_line2),
            address_line3: shown(&c.address_line3),
            locality: c.locality.clone(),
            country_subdivision: c.country_subdivision.clone(),
            postal_code: c.postal_code.clone(),
            country: c.country.clone(),
            status: c.status,
            onboarding_status: c.onboarding_status,
            timezone: shown(&c.timezone),
            contact_email: shown(&c.contact_email),
            contact_phone: shown(&c.contact_phone),
            logo_url: shown(&c.logo_url),
            onboarding_date: shown_date(&c.onboarding_date),
        }
    }

    fn to_record(&self) -> Result<Community, StoreError> {
        if self.client_id.trim().is_empty() {
            return Err(StoreError::validation("Select the client that owns this community."));
        }
        Ok(Community {
            id: self.id.clone(),
            client_id: self.client_id.trim().to_string(),
            name: required(&self.name, "Name")?,
            address_line1: required(&self.address_line1, "Address line 1")?,
            address_line2: text(&self.address_line2),
            address_line3: text(&self.address_line3),
            locality: required(&self.locality, "Locality")?,
            country_subdivision: required(&self.country_subdivision, "State / province")?,
            postal_code: required(&self.postal_code, "Postal code")?,
            country: required(&self.country, "Country")?,
            status: self.status,
            onboarding_status: self.onboarding_status,
            timezone: text(&self.timezone),
            contact_email: text(&self.contact_email),
            contact_phone: text(&self.contact_phone),
            logo_url: text(&self.logo_url),
            onboarding_date: date(&self.onboarding_date, "Onboarding date")?,
        })
    }

    fn editing(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnitForm {
    pub id: Option<String>,
    pub community_id: String,
    pub unit_number: String,
    pub unit_name: String,
    pub unit_type: UnitType,
    pub block: String,
    pub floor: String,
    pub area: String,
    pub bedroom: String,
    pub bathroom: String,
    pub status: UnitStatus,
    pub monthly_rent: String,
    pub resident_capacity: String,
    pub is_accessible: bool,
}

impl UnitForm {
    pub fn for_community(community_id: &str) -> Self {
        Self {
            community_id: community_id.to_string(),
            ..Self::default()
        }
    }
}

impl RecordForm for UnitForm {
    type Record = Unit;

    fn from_record(u: &Unit) -> Self {
        Self {
            id: u.id.clone(),
            community_id: u.community_id.clone(),
            unit_number: u.unit_number.clone(),
            unit_name: shown(&u.unit_name),
            unit_type: u.unit_type,
            block: shown(&u.block),
            floor: shown(&u.floor),
            area: shown(&u.area),
            bedroom: shown(&u.bedroom),
            bathroom: shown(&u.bathroom),
            status: u.status,
            monthly_rent: shown(&u.monthly_rent),
            resident_capacity: shown(&u.resident_capacity),
            is_accessible: u.is_accessible,
        }
    }

    fn to_record(&self) -> Result<Unit, StoreError> {
        Ok(Unit {
            id: self.id.clone(),
            community_id: self.community_id.clone(),
            unit_number: required(&self.unit_number, "Unit number")?,
            unit_name: text(&self.unit_name),
            unit_type: self.unit_type,
            block: text(&self.block),
            floor: text(&self.floor),
            area: number(&self.area, "Area")?,
            bedroom: number(&self.bedroom, "Bedrooms")?,
            bathroom: number(&self.bathroom, "Bathrooms")?,
            status: self.status,
            monthly_rent: number(&self.monthly_rent, "Monthly rent")?,
            resident_capacity: number(&self.resident_capacity, "Resident capacity")?,
            is_accessible: self.is_accessible,
        })
    }

    fn editing(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResidentForm {
    pub id: Option<String>,
    pub community_id: String,
    pub first_name: String,
    pub last_name: String,
    pub preferred_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub primary_phone: String,
    pub primary_email: String,
    pub status: ResidentStatus,
    /// Base64 JPEG, replaced when a new photo is captured.
    pub photo_blob: Option<String>,
}

impl ResidentForm {
    pub fn for_community(community_id: &str) -> Self {
        Self {
            community_id: community_id.to_string(),
            ..Self::default()
        }
    }
}

impl RecordForm for ResidentForm {
    type Record = Resident;

    fn from_record(r: &Resident) -> Self {
        Self {
            id: r.id.clone(),
            community_id: r.community_id.clone(),
            first_name: r.first_name.clone(),
            last_name: r.last_name.clone(),
            preferred_name: shown(&r.preferred_name),
            date_of_birth: shown_date(&r.date_of_birth),
            gender: shown(&r.gender),
            primary_phone: shown(&r.primary_phone),
            primary_email: shown(&r.primary_email),
            status: r.status,
            photo_blob: r.photo_blob.clone(),
        }
    }

    fn to_record(&self) -> Result<Resident, StoreError> {
        Ok(Resident {
            id: self.id.clone(),
            community_id: self.community_id.clone(),
            first_name: required(&self.first_name, "First name")?,
            last_name: required(&self.last_name, "Last name")?,
            preferred_name: text(&self.preferred_name),
            date_of_birth: date(&self.date_of_birth, "Date of birth")?,
            gender: text(&self.gender),
            primary_phone: text(&self.primary_phone),
            primary_email: text(&self.primary_email),
            status: self.status,
            photo_blob: self.photo_blob.clone().filter(|b| !b.is_empty()),
        })
    }

    fn editing(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaffForm {
    pub id: Option<String>,
    pub community_id: String,
    pub first_name: String,
    pub last_name: String,
    pub preferred_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub nationality: String,
    pub job_title: String,
    pub department: String,
    pub employment_type: EmploymentType,
    pub status: StaffStatus,
    /// Read-only once the record exists.
    pub hire_date: String,
    pub end_date: String,
    pub primary_phone: String,
    pub primary_email: String,
    pub notes: String,
}

impl StaffForm {
    pub fn for_community(community_id: &str) -> Self {
        Self {
            community_id: community_id.to_string(),
            ..Self::default()
        }
    }
}

impl RecordForm for StaffForm {
    type Record = Staff;

    fn from_record(s: &Staff) -> Self {
        Self {
            id: s.id.clone(),
            community_id: s.community_id.clone(),
            first_name: s.first_name.clone(),
            last_name: s.last_name.clone(),
            preferred_name: shown(&s.preferred_name),
            date_of_birth: shown_date(&s.date_of_birth),
            gender: shown(&s.gender),
            nationality: shown(&s.nationality),
            job_title: s.job_title.clone(),
            department: shown(&s.department),
            employment_type: s.employment_type,
            status: s.status,
            hire_date: shown_date(&s.hire_date),
            end_date: shown_date(&s.end_date),
            primary_phone: shown(&s.primary_phone),
            primary_email: shown(&s.primary_email),
            notes: shown(&s.notes),
        }
    }

    fn to_record(&self) -> Result<Staff, StoreError> {
        Ok(Staff {
            id: self.id.clone(),
            community_id: self.community_id.clone(),
            first_name: required(&self.first_name, "First name")?,
            last_name: required(&self.last_name, "Last name")?,
            preferred_name: text(&self.preferred_name),
            date_of_birth: date(&self.date_of_birth, "Date of birth")?,
            gender: text(&self.gender),
            nationality: text(&self.nationality),
            job_title: required(&self.job_title, "Job title")?,
            department: text(&self.department),
            employment_type: self.employment_type,
            status: self.status,
            hire_date: date(&self.hire_date, "Hire date")?,
            end_date: date(&self.end_date, "End date")?,
            primary_phone: text(&self.primary_phone),
            primary_email: text(&self.primary_email),
            notes: text(&self.notes),
        })
    }

    fn editing(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Progress of the photo field on the resident form.
///
/// A newer selection supersedes one still being processed; its result is
/// dropped when it arrives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhotoState {
    pub busy: bool,
    pub error: Option<String>,
    pub preview: Option<String>,
    gate: RequestGate,
}

impl PhotoState {
    /// State for a form opened on an existing photo.
    pub fn from_blob(blob: Option<&str>) -> Self {
        Self {
            preview: blob
                .filter(|b| !b.is_empty())
                .map(|b| format!("data:image/jpeg;base64,{b}")),
            ..Self::default()
        }
    }

    pub fn begin(&mut self) -> Ticket {
        self.busy = true;
        self.error = None;
        self.gate.begin()
    }

    /// Apply a finished capture. Returns the base64 payload to store, or
    /// `None` when the capture failed or was superseded.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        result: Result<CapturedPhoto, PhotoError>,
    ) -> Option<String> {
        if !self.gate.is_current(ticket) {
            return None;
        }
        self.busy = false;
        match result {
            Ok(photo) => {
                self.preview = Some(photo.preview_data_url());
                Some(photo.to_base64())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Fail the current capture before it reached the pipeline.
    pub fn fail(&mut self, ticket: Ticket, message: impl Into<String>) {
        if self.gate.is_current(ticket) {
            self.busy = false;
            self.error = Some(message.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::PhotoPipeline;

    #[test]
    fn test_client_form_optional_fields_become_null() {
        let form = ClientForm {
            name: "  Acme Care ".into(),
            subscription_plan_id: "".into(),
            website: "https://acme.example".into(),
            ..ClientForm::default()
        };
        let client = form.to_record().unwrap();
        assert_eq!(client.name, "Acme Care");
        assert_eq!(client.subscription_plan_id, None);
        assert_eq!(client.website.as_deref(), Some("https://acme.example"));
        assert_eq!(client.status, ClientStatus::Lead);

        let err = ClientForm::default().to_record().unwrap_err();
        assert_eq!(err.to_string(), "Name is required.");
    }

    #[test]
    fn test_form_roundtrips_record() {
        let client = Client {
            id: Some("k1".into()),
            name: "Acme".into(),
            status: ClientStatus::InDiscussion,
            contact_email: Some("a@acme.example".into()),
            ..Client::default()
        };
        let form = ClientForm::from_record(&client);
        assert_eq!(form.editing(), Some("k1"));
        assert_eq!(form.to_record().unwrap(), client);
    }

    #[test]
    fn test_community_requires_owner_and_address() {
        let mut form = CommunityForm {
            name: "Maple Court".into(),
            address_line1: "1 Main St".into(),
            locality: "Springfield".into(),
            country_subdivision: "IL".into(),
            postal_code: "62701".into(),
            country: "US".into(),
            ..CommunityForm::default()
        };
        assert!(form.to_record().unwrap_err().is_validation());

        form.client_id = "k1".into();
        form.onboarding_date = "2024-03-01".into();
        let community = form.to_record().unwrap();
        assert_eq!(community.onboarding_date, NaiveDate::from_ymd_opt(2024, 3, 1));

        form.postal_code = " ".into();
        assert_eq!(
            form.to_record().unwrap_err().to_string(),
            "Postal code is required."
        );
    }

    #[test]
    fn test_unit_numbers_parsed() {
        let mut form = UnitForm::for_community("c1");
        form.unit_number = "A101".into();
        form.area = "42.5".into();
        form.bedroom = "1".into();
        form.monthly_rent = "".into();
        let unit = form.to_record().unwrap();
        assert_eq!(unit.community_id, "c1");
        assert_eq!(unit.area, Some(42.5));
        assert_eq!(unit.bedroom, Some(1));
        assert_eq!(unit.monthly_rent, None);
        assert_eq!(unit.unit_type, UnitType::Studio);
        assert_eq!(unit.status, UnitStatus::Available);

        form.bathroom = "two".into();
        assert_eq!(
            form.to_record().unwrap_err().to_string(),
            "Bathrooms must be a number."
        );
    }

    #[test]
    fn test_staff_hire_date_optional() {
        let mut form = StaffForm::for_community("c1");
        form.first_name = "Ann".into();
        form.last_name = "Lee".into();
        form.job_title = "Nurse".into();
        let staff = form.to_record().unwrap();
        assert_eq!(staff.hire_date, None);
        assert_eq!(staff.community_id, "c1");

        form.hire_date = "2022-05-01".into();
        assert_eq!(
            form.to_record().unwrap().hire_date,
            NaiveDate::from_ymd_opt(2022, 5, 1)
        );

        form.hire_date = "05/01/2022".into();
        assert_eq!(
            form.to_record().unwrap_err().to_string(),
            "Hire date must be a date."
        );
    }

    #[test]
    fn test_choices_use_backend_labels() {
        let options = choices(UnitType::ALL);
        assert_eq!(options[1], ("1BHK".to_string(), "1BHK".to_string()));
        assert_eq!(options.len(), 5);
    }

    #[test]
    fn test_assigned_units_not_offered_again() {
        let unit = |id: &str, number: &str| Unit {
            id: Some(id.into()),
            unit_number: number.into(),
            ..Unit::default()
        };
        let units = [unit("u1", "A101"), unit("u2", "A102"), unit("u3", "B201")];
        let assigned = [UnitResident {
            id: Some("a1".into()),
            unit_id: "u2".into(),
            resident_id: "r1".into(),
            move_in_date: None,
        }];

        let offered = assignable_units(&units, &assigned);
        assert_eq!(
            offered,
            vec![
                ("u1".to_string(), "A101".to_string()),
                ("u3".to_string(), "B201".to_string()),
            ]
        );
        assert_eq!(assignable_units(&units, &[]).len(), 3);
    }

    #[test]
    fn test_corrupt_photo_clears_busy() {
        let mut state = PhotoState::default();
        let ticket = state.begin();
        assert!(state.busy);

        let stored = state.finish(ticket, PhotoPipeline::default().process(b"garbage"));
        assert_eq!(stored, None);
        assert!(!state.busy);
        assert!(state.error.is_some());
        assert_eq!(state.preview, None);
    }

    #[test]
    fn test_newer_photo_supersedes_older() {
        let photo = CapturedPhoto {
            width: 1,
            height: 1,
            jpeg: vec![0xFF, 0xD8, 0xFF],
        };
        let mut state = PhotoState::from_blob(Some("b2xk"));
        assert_eq!(state.preview.as_deref(), Some("data:image/jpeg;base64,b2xk"));

        let first = state.begin();
        let second = state.begin();
        assert_eq!(state.finish(first, Ok(photo.clone())), None);
        assert!(state.busy);

        assert_eq!(state.finish(second, Ok(photo.clone())), Some(photo.to_base64()));
        assert!(!state.busy);
        assert_eq!(state.preview, Some(photo.preview_data_url()));
    }
}
