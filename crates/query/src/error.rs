// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Mailsearch

use crate::term::SearchTerm;

/// Errors raised when constructing query nodes or running the optimize
/// pass.
///
/// Construction either fully succeeds or fails with one of these before
/// any node exists; no node is ever observable half-built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
	#[error("`term`: {term} is not a binary operator")]
	NotBinaryOperator { term: SearchTerm },

	#[error("`term`: {term} is not a unary operator")]
	NotUnaryOperator { term: SearchTerm },

	#[error("`term`: {term} is not a flag predicate")]
	NotFlagTerm { term: SearchTerm },

	#[error("`term`: {term} does not take a text argument")]
	NotTextTerm { term: SearchTerm },

	#[error("`term`: {term} does not take a date argument")]
	NotDateTerm { term: SearchTerm },

	#[error("`term`: {term} does not take a size argument")]
	NotSizeTerm { term: SearchTerm },

	#[error("`text` must not be empty")]
	EmptyText,

	#[error("`field` must not be empty")]
	EmptyHeaderField,

	#[error("`uids` must not be empty")]
	EmptyUidSet,

	#[error("`uids`: 0 is not a valid message uid")]
	ZeroUid,

	/// Failure raised inside an optimizer's `reduce`; it surfaces to the
	/// optimize caller unchanged.
	#[error("optimize failed: {reason}")]
	Optimize { reason: String },
}
