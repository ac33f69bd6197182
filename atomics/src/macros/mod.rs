// Copyright 2019-2020 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
mod arithmetic;

#[macro_use]
mod bitwise;

#[macro_use]
mod fetch_compare_store;

#[macro_use]
mod float;

#[macro_use]
mod float_arithmetic;

#[macro_use]
mod native;

#[macro_use]
mod saturating_arithmetic;
