// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the dispatcher and external services.
//!
//! Traits use `#[async_trait]` so implementations can be held as
//! `Arc<dyn ...>` and swapped for fakes in tests.

pub mod provider;

pub use provider::CompletionProvider;
