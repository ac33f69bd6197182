// Copyright 2019-2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

macro_rules! saturating_arithmetic {
    ($name:ident, $type:ty) => {
        impl SaturatingArithmetic for $name {
            fn fetch_saturating_add(
                &self,
                value: <Self as Atomic>::Primitive,
                ordering: Ordering,
            ) -> <Self as Atomic>::Primitive {
                let load_ordering = match ordering {
                    Ordering::AcqRel => Ordering::Acquire,
                    Ordering::Release => Ordering::Relaxed,
                    _ => ordering,
                };
                let mut previous = self.load(load_ordering);
                loop {
                    let new = previous.saturating_add(value);
                    match self.compare_exchange_weak(previous, new, ordering, load_ordering) {
                        Ok(previous) => return previous,
                        Err(actual) => previous = actual,
                    }
                }
            }

            fn fetch_saturating_sub(
                &self,
                value: <Self as Atomic>::Primitive,
                ordering: Ordering,
            ) -> <Self as Atomic>::Primitive {
                let load_ordering = match ordering {
                    Ordering::AcqRel => Ordering::Acquire,
                    Ordering::Release => Ordering::Relaxed,
                    _ => ordering,
                };
                let mut previous = self.load(load_ordering);
                loop {
                    let new = previous.saturating_sub(value);
                    match self.compare_exchange_weak(previous, new, ordering, load_ordering) {
                        Ok(previous) => return previous,
                        Err(actual) => previous = actual,
                    }
                }
            }
        }
    };
}
