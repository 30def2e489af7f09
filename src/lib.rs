// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod demo;
pub mod error;
pub mod llm;
pub mod models;
pub mod period;
pub mod requesters;
pub mod store;
pub mod summary;
pub mod utils;
pub mod workflow;
