// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Mailsearch

//! The IMAP query optimizer.
//!
//! Applies the reductions that hold for any RFC 3501 server. The optimize
//! pass hands every node here bottom-up with its children already
//! reduced, so a single non-recursive rewrite per node is enough: inner
//! simplifications have already happened by the time the enclosing node
//! arrives.

use std::sync::Arc;

use mailsearch_query::{
	BinaryQuery, Query, QueryError, QueryOptimizer, SearchQuery, SearchTerm, UnaryQuery,
};
use tracing::trace;

/// Stateless reducer for the IMAP `SEARCH` dialect.
///
/// Reductions:
/// - `AND` with an `ALL` operand collapses to the other operand
/// - `OR` with an `ALL` operand collapses to `ALL`
/// - `AND`/`OR` over the identical node collapses to that node
/// - `NOT NOT x` collapses to `x`
/// - `NOT` of a flag predicate with a direct complement becomes the
///   complementary flag (`NOT SEEN` becomes `UNSEEN`)
///
/// `NOT ALL` is left intact: IMAP defines no empty-set keyword.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImapQueryOptimizer;

impl QueryOptimizer for ImapQueryOptimizer {
	fn reduce(&self, query: Query) -> Result<Query, QueryError> {
		match query.as_ref() {
			SearchQuery::Binary(binary) => Ok(reduce_binary(&query, binary)),
			SearchQuery::Unary(unary) => reduce_unary(&query, unary),
			_ => Ok(query),
		}
	}
}

fn is_all(query: &Query) -> bool {
	query.term() == SearchTerm::All
}

fn reduce_binary(query: &Query, binary: &BinaryQuery) -> Query {
	if Arc::ptr_eq(binary.left(), binary.right()) {
		trace!(term = %binary.term(), "collapsing duplicate operands");
		return Arc::clone(binary.left());
	}

	match binary.term() {
		// ALL is the AND identity.
		SearchTerm::And if is_all(binary.left()) => {
			trace!("AND absorbed ALL on the left");
			Arc::clone(binary.right())
		}
		SearchTerm::And if is_all(binary.right()) => {
			trace!("AND absorbed ALL on the right");
			Arc::clone(binary.left())
		}
		// ALL absorbs OR.
		SearchTerm::Or if is_all(binary.left()) => {
			trace!("OR collapsed to ALL");
			Arc::clone(binary.left())
		}
		SearchTerm::Or if is_all(binary.right()) => {
			trace!("OR collapsed to ALL");
			Arc::clone(binary.right())
		}
		_ => Arc::clone(query),
	}
}

fn reduce_unary(query: &Query, unary: &UnaryQuery) -> Result<Query, QueryError> {
	match unary.operand().as_ref() {
		SearchQuery::Unary(inner) => {
			trace!("collapsing double negation");
			Ok(Arc::clone(inner.operand()))
		}
		SearchQuery::Flag(flag) => match flag.term().negated() {
			Some(negated) => {
				trace!(from = %flag.term(), to = %negated, "negating flag predicate");
				SearchQuery::flag(negated)
			}
			None => Ok(Arc::clone(query)),
		},
		_ => Ok(Arc::clone(query)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn optimize(query: &Query) -> Query {
		query.optimize(&ImapQueryOptimizer).unwrap()
	}

	#[test]
	fn test_and_absorbs_all() {
		let subject = SearchQuery::subject_contains("hello").unwrap();

		let root = SearchQuery::and(SearchQuery::all(), Arc::clone(&subject));
		assert!(Arc::ptr_eq(&optimize(&root), &subject));

		let root = SearchQuery::and(Arc::clone(&subject), SearchQuery::all());
		assert!(Arc::ptr_eq(&optimize(&root), &subject));
	}

	#[test]
	fn test_or_collapses_to_all() {
		let subject = SearchQuery::subject_contains("hello").unwrap();
		let root = SearchQuery::or(Arc::clone(&subject), SearchQuery::all());
		assert_eq!(optimize(&root).term(), SearchTerm::All);
	}

	#[test]
	fn test_duplicate_operands_collapse() {
		let seen = SearchQuery::seen();
		let root = SearchQuery::and(Arc::clone(&seen), Arc::clone(&seen));
		assert!(Arc::ptr_eq(&optimize(&root), &seen));

		let root = SearchQuery::or(Arc::clone(&seen), Arc::clone(&seen));
		assert!(Arc::ptr_eq(&optimize(&root), &seen));
	}

	#[test]
	fn test_double_negation_collapses() {
		let subject = SearchQuery::subject_contains("hello").unwrap();
		let root = SearchQuery::not(SearchQuery::not(Arc::clone(&subject)));
		assert!(Arc::ptr_eq(&optimize(&root), &subject));
	}

	#[test]
	fn test_not_flag_becomes_complement() {
		let root = SearchQuery::not(SearchQuery::seen());
		assert_eq!(optimize(&root).term(), SearchTerm::NotSeen);

		let root = SearchQuery::not(SearchQuery::not_flagged());
		assert_eq!(optimize(&root).term(), SearchTerm::Flagged);
	}

	#[test]
	fn test_not_all_is_left_intact() {
		let root = SearchQuery::not(SearchQuery::all());
		let optimized = optimize(&root);
		assert!(Arc::ptr_eq(&optimized, &root));
	}

	#[test]
	fn test_unreducible_tree_is_identical() {
		let root = SearchQuery::and(
			SearchQuery::not_seen(),
			SearchQuery::from_contains("alice").unwrap(),
		);
		assert!(Arc::ptr_eq(&optimize(&root), &root));
	}

	#[test]
	fn test_reductions_cascade_bottom_up() {
		// AND(ALL, AND(ALL, SUBJECT)) reduces to the SUBJECT leaf alone.
		let subject = SearchQuery::subject_contains("hello").unwrap();
		let inner = SearchQuery::and(SearchQuery::all(), Arc::clone(&subject));
		let root = SearchQuery::and(SearchQuery::all(), inner);
		assert!(Arc::ptr_eq(&optimize(&root), &subject));
	}
}
