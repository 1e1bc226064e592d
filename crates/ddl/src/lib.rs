// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod builder;
pub mod column;
pub mod extract;
mod literal;
pub mod naming;
pub mod predicate;
pub mod time;

pub use builder::{Builder, build, builder_for};
pub use naming::{NameGenerator, QualifiedName, TableKind};
