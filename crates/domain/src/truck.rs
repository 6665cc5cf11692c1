//! Truck board rows and their validation rules.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use freightline_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::{BoardRecord, Principal, TrailerType};

/// Availability status of a posted truck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruckStatus {
    /// Open for booking.
    Available,
    /// Booked against a load.
    Booked,
    /// Temporarily out of service.
    OutOfService,
}

impl TruckStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Booked => "booked",
            Self::OutOfService => "out_of_service",
        }
    }
}

impl FromStr for TruckStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(Self::Available),
            "booked" => Ok(Self::Booked),
            "out_of_service" => Ok(Self::OutOfService),
            _ => Err(AppError::Validation(format!(
                "unknown truck status '{value}'"
            ))),
        }
    }
}

/// Validated input for posting a truck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruckDraft {
    /// Firm-assigned truck number.
    pub truck_number: String,
    /// City/state where the truck frees up.
    pub current_city: String,
    /// Preferred destination region, if any.
    pub destination_preference: Option<String>,
    /// Date the truck becomes available.
    pub available_date: NaiveDate,
    /// Trailer offered.
    pub trailer_type: TrailerType,
    /// Free-form comment, if any.
    pub comment: Option<String>,
}

impl TruckDraft {
    /// Validates the draft, reporting every failed rule in one message.
    pub fn validate(&self) -> AppResult<()> {
        let mut problems = Vec::new();

        if self.truck_number.trim().is_empty() {
            problems.push("truck number is required".to_owned());
        }
        if self.current_city.trim().is_empty() {
            problems.push("current city is required".to_owned());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(problems.join("; ")))
        }
    }
}

/// A posted truck as held by the truck board cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Truck {
    /// Stable row id.
    pub id: String,
    /// Firm-assigned truck number.
    pub truck_number: String,
    /// City/state where the truck frees up.
    pub current_city: String,
    /// Preferred destination region, if any.
    pub destination_preference: Option<String>,
    /// Date the truck becomes available.
    pub available_date: NaiveDate,
    /// Trailer offered.
    pub trailer_type: TrailerType,
    /// Availability status.
    pub status: TruckStatus,
    /// Free-form comment, if any.
    pub comment: Option<String>,
    /// Identity id of the posting user.
    pub posted_by: String,
    /// Legacy owner key kept for pre-identity rows.
    pub created_by: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl BoardRecord for Truck {
    type Draft = TruckDraft;

    fn validate_draft(draft: &TruckDraft) -> AppResult<()> {
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
            self.truck_number.as_str(),
            self.current_city.as_str(),
            self.trailer_type.as_str(),
            self.status.as_str(),
        ];
        if let Some(destination) = self.destination_preference.as_deref() {
            fields.push(destination);
        }
        if let Some(comment) = self.comment.as_deref() {
            fields.push(comment);
        }
        fields
    }

    fn from_draft(
        draft: &TruckDraft,
        id: String,
        created_at: DateTime<Utc>,
        posted_by: &Principal,
    ) -> Self {
        Self {
            id,
            truck_number: draft.truck_number.clone(),
            current_city: draft.current_city.clone(),
            destination_preference: draft.destination_preference.clone(),
            available_date: draft.available_date,
            trailer_type: draft.trailer_type,
            status: TruckStatus::Available,
            comment: draft.comment.clone(),
            posted_by: posted_by.identity_id().to_owned(),
            created_by: None,
            created_at,
        }
    }
}
