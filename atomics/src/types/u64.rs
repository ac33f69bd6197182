// Copyright 2019-2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::*;

#[cfg(feature = "serde")]
use serde::{de::Visitor, Deserialize, Deserializer, Serialize, Serializer};

native!(
    /// An unsigned 64 bit integer which can be shared between threads
    pub struct AtomicU64: u64 = core::sync::atomic::AtomicU64;
);

// additional traits
arithmetic!(AtomicU64, u64);
bitwise!(AtomicU64, u64);
fetch_compare_store!(AtomicU64, u64);
saturating_arithmetic!(AtomicU64, u64);

impl Unsigned for AtomicU64 {}

#[cfg(feature = "serde")]
struct AtomicU64Visitor;

#[cfg(feature = "serde")]
impl<'de> Visitor<'de> for AtomicU64Visitor {
    type Value = AtomicU64;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("an unsigned 64bit integer")
    }

    fn visit_i8<E>(self, value: i8) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        use std::convert::TryFrom;
        if let Ok(value) = u64::try_from(value) {
            Ok(Self::Value::new(value))
        } else {
            Err(E::custom(format!("u64 is out of range: {}", value)))
        }
    }

    fn visit_i16<E>(self, value: i16) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        use std::convert::TryFrom;
        if let Ok(value) = u64::try_from(value) {
            Ok(Self::Value::new(value))
        } else {
            Err(E::custom(format!("u64 is out of range: {}", value)))
        }
    }

    fn visit_i32<E>(self, value: i32) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        use std::convert::TryFrom;
        if let Ok(value) = u64::try_from(value) {
            Ok(Self::Value::new(value))
        } else {
            Err(E::custom(format!("u64 is out of range: {}", value)))
        }
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        use std::convert::TryFrom;
        if let Ok(value) = u64::try_from(value) {
            Ok(Self::Value::new(value))
        } else {
            Err(E::custom(format!("u64 is out of range: {}", value)))
        }
    }

    fn visit_u8<E>(self, value: u8) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Self::Value::new(u64::from(value)))
    }

    fn visit_u16<E>(self, value: u16) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Self::Value::new(u64::from(value)))
    }

    fn visit_u32<E>(self, value: u32) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Self::Value::new(u64::from(value)))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Self::Value::new(value))
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for AtomicU64 {
    fn deserialize<D>(deserializer: D) -> Result<AtomicU64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AtomicU64Visitor)
    }
}

#[cfg(feature = "serde")]
impl Serialize for AtomicU64 {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_some(&self.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load() {
        let atomic = AtomicU64::new(0);
        assert_eq!(atomic.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn store() {
        let atomic = AtomicU64::new(0);
        atomic.store(1, Ordering::SeqCst);
        assert_eq!(atomic.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn fetch_add() {
        let atomic = AtomicU64::new(0);
        assert_eq!(atomic.fetch_add(1, Ordering::SeqCst), 0);
        assert_eq!(atomic.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn compare_and_swap() {
        let atomic = AtomicU64::new(0);
        assert_eq!(atomic.compare_and_swap(0, 1, Ordering::SeqCst), 0);
        assert_eq!(atomic.compare_and_swap(0, 2, Ordering::SeqCst), 1);
    }
}
