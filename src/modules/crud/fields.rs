//! Field decoders shared by the entity models.
//!
//! An explicit `null` decodes like an omitted field: to the zero value.
//! Timestamps are cut to microseconds, the precision `TIMESTAMPTZ` stores,
//! so what a write echoes back is what a later read returns.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer};

pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub fn timestamp_micros<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    nullable::<D, DateTime<Utc>>(deserializer).map(|at| at.trunc_subsecs(6))
}
