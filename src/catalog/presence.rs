//! Optional field value that remembers how it appeared in the document.
//!
//! A catalog key can be missing, present with `null`, or present with a value.
//! All three survive a load/save cycle; rules only care whether a value exists.

use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence<T> {
    /// Key not in the document. Never serialized.
    Absent,
    /// Key present with an explicit `null`.
    Null,
    Present(T),
}

impl<T> Default for Presence<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<T> for Presence<T> {
    fn from(value: T) -> Self {
        Self::Present(value)
    }
}

impl<T> Presence<T> {
    /// Used by `skip_serializing_if` so absent keys stay absent.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// True for both `Absent` and `Null`.
    pub fn is_missing(&self) -> bool {
        !matches!(self, Self::Present(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Deref> Presence<T> {
    pub fn as_deref(&self) -> Option<&T::Target> {
        self.as_option().map(Deref::deref)
    }
}

impl<T> Presence<Vec<T>> {
    /// Items of an optional collection; empty when the collection is missing.
    pub fn items(&self) -> &[T] {
        match self {
            Self::Present(items) => items.as_slice(),
            _ => &[],
        }
    }

    pub fn items_mut(&mut self) -> &mut [T] {
        match self {
            Self::Present(items) => items.as_mut_slice(),
            _ => &mut [],
        }
    }
}

impl<T: Serialize> Serialize for Presence<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(value) => serializer.serialize_some(value),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Presence<T> {
    // Only called when the key exists; missing keys go through `Default`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Present(value),
            None => Self::Null,
        })
    }
}
