//! Load board rows and their validation rules.
//!
//! Drafts are validated caller-side before any backend call; a failed
//! validation never issues the call and reports every problem in one
//! combined message.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use freightline_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::{BoardRecord, Principal};

/// Trailer required to move a load or offered by a truck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailerType {
    /// Dry van.
    Van,
    /// Refrigerated trailer.
    Reefer,
    /// Flatbed.
    Flatbed,
    /// Step deck.
    StepDeck,
    /// Power only (tractor without trailer).
    PowerOnly,
    /// Hotshot (medium-duty expedited).
    Hotshot,
}

impl TrailerType {
    /// Returns a stable storage value for this trailer type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Van => "van",
            Self::Reefer => "reefer",
            Self::Flatbed => "flatbed",
            Self::StepDeck => "step_deck",
            Self::PowerOnly => "power_only",
            Self::Hotshot => "hotshot",
        }
    }
}

impl FromStr for TrailerType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "van" => Ok(Self::Van),
            "reefer" => Ok(Self::Reefer),
            "flatbed" => Ok(Self::Flatbed),
            "step_deck" => Ok(Self::StepDeck),
            "power_only" => Ok(Self::PowerOnly),
            "hotshot" => Ok(Self::Hotshot),
            _ => Err(AppError::Validation(format!(
                "unknown trailer type '{value}'"
            ))),
        }
    }
}

/// Lifecycle status of a posted load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// Posted and open for booking.
    Available,
    /// A booking is being negotiated.
    Pending,
    /// Booked with a carrier.
    Booked,
    /// Picked up and moving.
    InTransit,
    /// Delivered to the consignee.
    Delivered,
    /// Cancelled before delivery.
    Cancelled,
}

impl LoadStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Booked => "booked",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for LoadStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(Self::Available),
            "pending" => Ok(Self::Pending),
            "booked" => Ok(Self::Booked),
            "in_transit" => Ok(Self::InTransit),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(AppError::Validation(format!("unknown load status '{value}'"))),
        }
    }
}

/// Highest rate accepted on a posted load, in dollars.
pub const LOAD_RATE_MAX: f64 = 1_000_000.0;

/// Validated input for posting a load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadDraft {
    /// Firm-assigned load number.
    pub load_number: String,
    /// Origin city/state.
    pub origin: String,
    /// Destination city/state.
    pub destination: String,
    /// Pickup date.
    pub pickup_date: NaiveDate,
    /// Delivery date; never earlier than pickup.
    pub delivery_date: NaiveDate,
    /// Offered rate in dollars.
    pub rate: f64,
    /// Required trailer.
    pub trailer_type: TrailerType,
    /// Extra equipment requirement, if any.
    pub equipment_requirement: Option<String>,
    /// Free-form comment, if any.
    pub comment: Option<String>,
}

impl LoadDraft {
    /// Validates the draft, reporting every failed rule in one message.
    pub fn validate(&self) -> AppResult<()> {
        let mut problems = Vec::new();

        if self.load_number.trim().is_empty() {
            problems.push("load number is required".to_owned());
        }
        if self.origin.trim().is_empty() {
            problems.push("origin is required".to_owned());
        }
        if self.destination.trim().is_empty() {
            problems.push("destination is required".to_owned());
        }
        if self.delivery_date < self.pickup_date {
            problems.push("delivery date must not be earlier than pickup date".to_owned());
        }
        if self.rate <= 0.0 {
            problems.push("rate must be greater than zero".to_owned());
        } else if self.rate > LOAD_RATE_MAX {
            problems.push(format!("rate must not exceed {LOAD_RATE_MAX}"));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(problems.join("; ")))
        }
    }
}

/// A posted load as held by the load board cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    /// Stable row id.
    pub id: String,
    /// Firm-assigned load number.
    pub load_number: String,
    /// Origin city/state.
    pub origin: String,
    /// Destination city/state.
    pub destination: String,
    /// Pickup date.
    pub pickup_date: NaiveDate,
    /// Delivery date.
    pub delivery_date: NaiveDate,
    /// Offered rate in dollars.
    pub rate: f64,
    /// Required trailer.
    pub trailer_type: TrailerType,
    /// Lifecycle status.
    pub status: LoadStatus,
    /// Extra equipment requirement, if any.
    pub equipment_requirement: Option<String>,
    /// Free-form comment, if any.
    pub comment: Option<String>,
    /// Identity id of the posting user.
    pub posted_by: String,
    /// Legacy owner key kept for pre-identity rows.
    pub created_by: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl BoardRecord for Load {
    type Draft = LoadDraft;

    fn validate_draft(draft: &LoadDraft) -> AppResult<()> {
        draft.validate()
    }

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn owner_markers(&self) -> Vec<&str> {
        let mut markers = vec![self.posted_by.as_str()];
        if let Some(created_by) = self.created_by.as_deref() {
            markers.push(created_by);
        }
        markers
    }

    fn search_haystack(&self) -> Vec<&str> {
        let mut fields = vec![
            self.load_number.as_str(),
            self.origin.as_str(),
            self.destination.as_str(),
            self.trailer_type.as_str(),
            self.status.as_str(),
        ];
        if let Some(equipment) = self.equipment_requirement.as_deref() {
            fields.push(equipment);
        }
        if let Some(comment) = self.comment.as_deref() {
            fields.push(comment);
        }
        fields
    }

    fn from_draft(
        draft: &LoadDraft,
        id: String,
        created_at: DateTime<Utc>,
        posted_by: &Principal,
    ) -> Self {
        Self {
            id,
            load_number: draft.load_number.clone(),
            origin: draft.origin.clone(),
            destination: draft.destination.clone(),
            pickup_date: draft.pickup_date,
            delivery_date: draft.delivery_date,
            rate: draft.rate,
            trailer_type: draft.trailer_type,
            status: LoadStatus::Available,
            equipment_requirement: draft.equipment_requirement.clone(),
            comment: draft.comment.clone(),
            posted_by: posted_by.identity_id().to_owned(),
            created_by: None,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use proptest::prelude::*;

    use super::{LOAD_RATE_MAX, LoadDraft, TrailerType};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
    }

    fn draft() -> LoadDraft {
        LoadDraft {
            load_number: "L-1042".to_owned(),
            origin: "Chicago, IL".to_owned(),
            destination: "Dallas, TX".to_owned(),
            pickup_date: date(2026, 9, 1),
            delivery_date: date(2026, 9, 3),
            rate: 2450.0,
            trailer_type: TrailerType::Van,
            equipment_requirement: None,
            comment: None,
        }
    }

    #[test]
    fn complete_draft_is_accepted() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn delivery_before_pickup_is_rejected() {
        let mut bad = draft();
        bad.delivery_date = date(2026, 8, 30);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn validation_combines_every_problem_into_one_message() {
        let mut bad = draft();
        bad.load_number = " ".to_owned();
        bad.origin = String::new();
        bad.rate = 0.0;

        let error = bad.validate();
        assert!(error.is_err());
        let message = error.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(message.contains("load number is required"));
        assert!(message.contains("origin is required"));
        assert!(message.contains("rate must be greater than zero"));
    }

    proptest! {
        #[test]
        fn positive_bounded_rates_are_accepted(rate in 0.01f64..LOAD_RATE_MAX) {
            let mut candidate = draft();
            candidate.rate = rate;
            prop_assert!(candidate.validate().is_ok());
        }

        #[test]
        fn non_positive_rates_are_rejected(rate in -LOAD_RATE_MAX..=0.0f64) {
            let mut candidate = draft();
            candidate.rate = rate;
            prop_assert!(candidate.validate().is_err());
        }
    }
}
