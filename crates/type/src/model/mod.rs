// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod database;
mod index;
mod mode;
mod pipeline;
mod stage;
mod view;

pub use database::{Database, DatabaseId, TableId};
pub use index::{HashKind, IndexDefinition, IndexSet, ValueType};
pub use mode::{DeploymentMode, ReplicaStatus};
pub use pipeline::{PipelineConfig, TimeFieldType};
pub use stage::Stage;
pub use view::ViewDefinition;
