// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// A stable, non-negative integer identifier.
///
/// The tag parameter keeps room ids and content ids from being mixed up; both
/// are plain `u32` values on the wire (solver facts and JSON documents).
pub struct Id<T> {
    value: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub const fn new(value: u32) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn get(self) -> u32 {
        self.value
    }
}

// Manual impls: derives would put bounds on the tag type.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<T> From<u32> for Id<T> {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self::new)
            .map_err(|_| IdError::NotANumber(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    NotANumber(String),
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(raw) => write!(f, "id must be a non-negative integer, got {raw:?}"),
        }
    }
}

impl std::error::Error for IdError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoomIdTag {}
pub type RoomId = Id<RoomIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentIdTag {}
pub type ContentId = Id<ContentIdTag>;

#[cfg(test)]
mod tests {
    use super::{IdError, RoomId};

    #[test]
    fn parses_numeric_ids() {
        assert_eq!("17".parse::<RoomId>(), Ok(RoomId::new(17)));
        assert_eq!(" 3 ".parse::<RoomId>(), Ok(RoomId::new(3)));
    }

    #[test]
    fn rejects_negative_and_non_numeric_ids() {
        assert_eq!("-1".parse::<RoomId>(), Err(IdError::NotANumber("-1".to_owned())));
        assert_eq!("a".parse::<RoomId>(), Err(IdError::NotANumber("a".to_owned())));
    }

    #[test]
    fn orders_by_value() {
        let mut ids = vec![RoomId::new(3), RoomId::new(0), RoomId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![RoomId::new(0), RoomId::new(2), RoomId::new(3)]);
    }
}
