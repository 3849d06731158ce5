//! A single in-memory collection of records plus its identifier counter.
//!
//! Collections do no locking of their own; [`InMemoryStore`](crate::InMemoryStore)
//! guards them. Records are kept in a `BTreeMap`, so iteration is always in
//! ascending identifier order.

use std::collections::BTreeMap;
use chrono::{DateTime, Utc};

use bazaar_core::{
    error::{StoreError, StoreResult},
    record::Record,
};

#[derive(Debug)]
pub(crate) struct Collection<R: Record> {
    records: BTreeMap<R::Id, R>,
    next_id: i32,
}

impl<R: Record> Default for Collection<R> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<R: Record> Collection<R> {
    /// The identifier the next successful insert will receive.
    pub(crate) fn next_id(&self) -> R::Id {
        R::Id::from(self.next_id)
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// Assigns the next identifier, stamps the record and stores it.
    ///
    /// Fails with [`StoreError::Exhausted`] once the counter reaches `i32::MAX`,
    /// which is never handed out. The counter never wraps.
    pub(crate) fn insert(&mut self, mut record: R, now: DateTime<Utc>) -> StoreResult<R> {
        let id = self.next_id();
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(StoreError::Exhausted {
                resource: R::resource_name(),
            })?;

        record.set_id(id);
        record.on_create(now);
        self.records.insert(id, record.clone());

        Ok(record)
    }

    pub(crate) fn get(&self, id: R::Id) -> StoreResult<&R> {
        self.records
            .get(&id)
            .ok_or_else(|| StoreError::not_found(R::resource_name(), id))
    }

    /// Whole-record replace keeping the stored identifier and whatever
    /// [`Record::on_replace`] carries over.
    pub(crate) fn replace(&mut self, id: R::Id, mut record: R, now: DateTime<Utc>) -> StoreResult<R> {
        let stored = self
            .records
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(R::resource_name(), id))?;

        record.set_id(id);
        record.on_replace(stored, now);
        *stored = record.clone();

        Ok(record)
    }

    pub(crate) fn remove(&mut self, id: R::Id) -> StoreResult<R> {
        self.records
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(R::resource_name(), id))
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &R> {
        self.records.values()
    }
}
