// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod rand;

pub use self::rand::RandomSource;
