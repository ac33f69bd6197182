// Copyright 2019-2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod bool;
pub use self::bool::*;

mod f32;
pub use self::f32::*;

mod f64;
pub use self::f64::*;

mod i8;
pub use self::i8::*;

mod i16;
pub use self::i16::*;

mod i32;
pub use self::i32::*;

mod i64;
pub use self::i64::*;

mod isize;
pub use self::isize::*;

mod u8;
pub use self::u8::*;

mod u16;
pub use self::u16::*;

mod u32;
pub use self::u32::*;

mod u64;
pub use self::u64::*;

mod usize;
pub use self::usize::*;
