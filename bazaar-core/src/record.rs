//! Core traits for record representation and serialization.
//!
//! Every entity a store keeps (users, listings, orders) implements [`Record`].
//! The trait tells a store how to stamp a record when it is created and how to
//! carry state over from the stored copy when it is replaced.

use std::fmt::Debug;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, from_value, to_value};

use crate::{error::StoreResult, id::RecordId};

/// Core trait that all records kept by a store must implement.
///
/// # Example
///
/// ```ignore
/// use bazaar::record::Record;
///
/// impl Record for Tag {
///     type Id = TagId;
///
///     fn resource_name() -> &'static str { "Tag" }
///     fn id(&self) -> TagId { self.id }
///     fn set_id(&mut self, id: TagId) { self.id = id; }
/// }
/// ```
pub trait Record: Serialize + for<'de> Deserialize<'de> + Debug + Clone + Send + Sync + 'static {
    /// The identifier type handed out by this record's collection.
    type Id: RecordId;

    /// Human readable name of the record kind, used in error reports.
    fn resource_name() -> &'static str;

    /// Returns this record's identifier.
    fn id(&self) -> Self::Id;

    /// Overwrites this record's identifier.
    fn set_id(&mut self, id: Self::Id);

    /// Called once when the record is inserted, after its identifier is assigned.
    fn on_create(&mut self, _now: DateTime<Utc>) {}

    /// Called when the record replaces `existing`, after its identifier is restored.
    ///
    /// Implementations copy over whatever must survive a whole-record replace,
    /// such as the creation timestamp.
    fn on_replace(&mut self, _existing: &Self, _now: DateTime<Utc>) {}
}

/// Extension trait providing JSON conversions for records.
///
/// This trait is automatically implemented for all types that implement [`Record`].
pub trait RecordExt: Record {
    /// Converts this record to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn to_json(&self) -> StoreResult<Value>;

    /// Creates a record from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure is invalid.
    fn from_json(value: Value) -> StoreResult<Self>;
}

impl<R: Record> RecordExt for R {
    fn to_json(&self) -> StoreResult<Value> {
        Ok(to_value(self)?)
    }

    fn from_json(value: Value) -> StoreResult<Self> {
        Ok(from_value(value)?)
    }
}
