use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{iso_date, Record};
use crate::error::StoreError;
use crate::query::Table;

labelled_enum! {
    StaffStatus default Active {
        Active => "Active",
        Inactive => "Inactive",
        OnLeave => "On Leave",
    }
}

labelled_enum! {
    EmploymentType default FullTime {
        FullTime => "Full-time",
        PartTime => "Part-time",
        Contract => "Contract",
    }
}

/// A member of staff employed at a community.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Staff {
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
    pub nationality: Option<String>,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub status: StaffStatus,
    /// Immutable once the record exists.
    #[serde(default, with = "iso_date")]
    pub hire_date: Option<NaiveDate>,
    #[serde(default, with = "iso_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub primary_phone: Option<String>,
    #[serde(default)]
    pub primary_email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Staff {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl Record for Staff {
    const TABLE: Table = Table::Staff;
    const ORDER_BY: &'static str = "last_name";
    const IMMUTABLE: &'static [&'static str] = &["hire_date"];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Validate a termination date against the hire date.
///
/// The end date must be set and strictly after the hire date. Staff without a
/// recorded hire date accept any end date.
pub fn check_termination(
    hire_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<NaiveDate, StoreError> {
    let end = end_date.ok_or_else(|| StoreError::validation("End date must be after hire date."))?;
    match hire_date {
        Some(hire) if end <= hire => Err(StoreError::validation(
            "End date must be after hire date.",
        )),
        _ => Ok(end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_termination_requires_later_end_date() {
        let hire = day(2022, 5, 1);
        assert!(check_termination(hire, day(2022, 5, 1)).unwrap_err().is_validation());
        assert!(check_termination(hire, day(2021, 1, 1)).is_err());
        assert!(check_termination(hire, None).is_err());
        assert_eq!(check_termination(hire, day(2022, 5, 2)), Ok(day(2022, 5, 2).unwrap()));
    }

    #[test]
    fn test_termination_without_hire_date() {
        assert!(check_termination(None, day(2020, 1, 1)).is_ok());
    }
}
