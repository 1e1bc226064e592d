// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod catalog;
pub mod config;
pub mod execute;
pub mod provision;
pub mod rollback;
pub mod test_utils;
pub mod view;

pub use catalog::DatabaseLookup;
pub use config::ProvisionerConfig;
pub use execute::{ExecuteError, Executor};
pub use provision::{PipelineStatements, ProvisionError, Provisioner};
pub use rollback::{NoRollback, ViewRollback};
pub use view::{ViewError, ViewOperator, ViewRequest, ViewState};
