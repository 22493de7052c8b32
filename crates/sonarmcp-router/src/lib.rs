// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query classification and request routing for sonarmcp.
//!
//! This crate provides:
//! - [`QueryClassifier`]: keyword heuristic mapping a query to a [`Mode`](sonarmcp_core::Mode)
//! - [`RequestRouter`]: mode preset selection and request payload assembly
//!
//! Both are pure and synchronous; the only I/O happens in the provider.

pub mod classifier;
pub mod router;

pub use classifier::{Category, Classification, KeywordSets, QueryClassifier};
pub use router::{Preset, RequestRouter};
