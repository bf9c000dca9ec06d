// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod entry_point;
pub mod stop_condition;

pub use entry_point::{EntryPoint, StatusCode, STATUS_OK, STATUS_TRAPPED};
pub use stop_condition::StopCondition;
