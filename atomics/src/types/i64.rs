// Copyright 2019-2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::*;

#[cfg(feature = "serde")]
use serde::{de::Visitor, Deserialize, Deserializer, Serialize, Serializer};

native!(
    /// A signed 64 bit integer which can be shared between threads
    pub struct AtomicI64: i64 = core::sync::atomic::AtomicI64;
);

// additional traits
arithmetic!(AtomicI64, i64);
bitwise!(AtomicI64, i64);
fetch_compare_store!(AtomicI64, i64);
saturating_arithmetic!(AtomicI64, i64);

impl Signed for AtomicI64 {}

#[cfg(feature = "serde")]
struct AtomicI64Visitor;

#[cfg(feature = "serde")]
impl<'de> Visitor<'de> for AtomicI64Visitor {
    type Value = AtomicI64;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a signed 64bit integer")
    }

    fn visit_i8<E>(self, value: i8) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Self::Value::new(i64::from(value)))
    }

    fn visit_i16<E>(self, value: i16) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Self::Value::new(i64::from(value)))
    }

    fn visit_i32<E>(self, value: i32) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Self::Value::new(i64::from(value)))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Self::Value::new(value))
    }

    fn visit_u8<E>(self, value: u8) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Self::Value::new(i64::from(value)))
    }

    fn visit_u16<E>(self, value: u16) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Self::Value::new(i64::from(value)))
    }

    fn visit_u32<E>(self, value: u32) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Self::Value::new(i64::from(value)))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        use std::convert::TryFrom;
        if let Ok(value) = i64::try_from(value) {
            Ok(Self::Value::new(value))
        } else {
            Err(E::custom(format!("i64 is out of range: {}", value)))
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for AtomicI64 {
    fn deserialize<D>(deserializer: D) -> Result<AtomicI64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_i64(AtomicI64Visitor)
    }
}

#[cfg(feature = "serde")]
impl Serialize for AtomicI64 {
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
        let atomic = AtomicI64::new(0);
        assert_eq!(atomic.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn store() {
        let atomic = AtomicI64::new(0);
        atomic.store(1, Ordering::SeqCst);
        assert_eq!(atomic.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn fetch_add() {
        let atomic = AtomicI64::new(0);
        assert_eq!(atomic.fetch_add(1, Ordering::SeqCst), 0);
        assert_eq!(atomic.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn fetch_max() {
        let atomic = AtomicI64::new(5);
        assert_eq!(atomic.fetch_max(3, Ordering::SeqCst), 5);
        assert_eq!(atomic.fetch_max(9, Ordering::SeqCst), 5);
        assert_eq!(atomic.load(Ordering::SeqCst), 9);
    }

    #[test]
    fn fetch_saturating_sub() {
        let atomic = AtomicI64::new(i64::MIN + 1);
        atomic.fetch_saturating_sub(10, Ordering::SeqCst);
        assert_eq!(atomic.load(Ordering::SeqCst), i64::MIN);
    }

    #[test]
    fn compare_exchange() {
        let atomic = AtomicI64::new(0);
        assert_eq!(
            atomic.compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst),
            Ok(0)
        );
        assert_eq!(
            atomic.compare_exchange(0, 2, Ordering::SeqCst, Ordering::SeqCst),
            Err(1)
        );
    }
}
