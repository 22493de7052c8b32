// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for sonarmcp integration tests.
//!
//! - [`MockProvider`] - scripted completion provider that records requests

pub mod mock_provider;

pub use mock_provider::MockProvider;
