// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Mailsearch

//! Immutable search-query expression trees.
//!
//! This crate provides:
//! - The term enumeration via the [`term`] module
//! - The query node data model and builder surface via the [`query`] module
//! - The optimizer protocol and bottom-up optimize pass via the
//!   [`optimize`] module
//!
//! A client builds a tree of [`SearchQuery`] nodes, optimizes the root
//! against a [`QueryOptimizer`] implementation, and hands the result to a
//! protocol-specific serializer. Trees are never evaluated locally.

pub mod error;
pub mod optimize;
pub mod query;
pub mod term;

pub use error::QueryError;
pub use optimize::QueryOptimizer;
pub use query::{
	BinaryQuery, DateQuery, FlagQuery, HeaderQuery, Query, SearchQuery, SizeQuery, TextQuery,
	UidQuery, UnaryQuery,
};
pub use term::SearchTerm;
