use chrono::{DateTime, Utc};
use freightline_core::AppResult;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Principal;

/// A row reconciled by a board cache (a load or a truck).
///
/// Rows are owned by exactly one cache instance per board, are unique by
/// id, and are never mutated in place, only replaced wholesale from a
/// fresher source.
pub trait BoardRecord:
    Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Validated input used to create a row.
    type Draft: Clone + Send + Sync + 'static;

    /// Checks a draft before any backend call is issued, combining every
    /// failed rule into one human-readable message.
    fn validate_draft(draft: &Self::Draft) -> AppResult<()>;

    /// Stable row identifier.
    fn id(&self) -> &str;

    /// Creation timestamp assigned by the backend.
    fn created_at(&self) -> DateTime<Utc>;

    /// Owner keys carried by the row, newest vocabulary first.
    ///
    /// Up to two markers: the posting user's identity id and a legacy
    /// created-by value kept for rows written before identity ids existed.
    fn owner_markers(&self) -> Vec<&str>;

    /// Text fields searched by the in-memory board filter.
    fn search_haystack(&self) -> Vec<&str>;

    /// Materializes a row from a draft with an assigned id and timestamp.
    ///
    /// Used by backends accepting a create, and by boards configured with
    /// an offline create fallback to stash an unpersisted local row.
    fn from_draft(
        draft: &Self::Draft,
        id: String,
        created_at: DateTime<Utc>,
        posted_by: &Principal,
    ) -> Self;
}
