// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Mailsearch

//! IMAP dialect for `mailsearch-query` trees.
//!
//! This crate provides:
//! - The reference [`QueryOptimizer`] for RFC 3501 servers via the
//!   [`optimizer`] module
//! - Rendering of an optimized tree as the argument list of a `SEARCH`
//!   command via the [`format`] module
//!
//! [`QueryOptimizer`]: mailsearch_query::QueryOptimizer

pub mod error;
pub mod format;
pub mod optimizer;

pub use error::ImapError;
pub use format::format_query;
pub use optimizer::ImapQueryOptimizer;
