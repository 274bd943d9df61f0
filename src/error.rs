// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for calendar and period operations.

use crate::chunk::TimeUnit;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The requested fields (or parsed text) do not name a real calendar date.
    #[error("Invalid calendar date: {0}")]
    InvalidCalendarDate(String),

    /// A chunk carrying months cannot be flattened into a single unit.
    #[error("Cannot convert a chunk with {months} month(s) to {unit}: months have no fixed length")]
    UnsupportedConversion { months: i64, unit: TimeUnit },

    /// Applying a chunk would leave chrono's representable range.
    #[error("Instant out of range: {0}")]
    OutOfRange(String),

    #[error("Unsupported mutation: {0}")]
    UnsupportedMutation(&'static str),

    #[error("Invalid chain insert: {0}")]
    InvalidChainInsert(&'static str),

    #[error("Index {index} out of range for a group of {len} periods")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid format pattern: '{0}'")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
