// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Mailsearch

//! The bottom-up optimize pass.
//!
//! Optimization is a synchronous post-order walk: children are optimized
//! first, a composite is rebuilt only when a child actually changed, and
//! every rebuilt (or reused) node is handed to the injected
//! [`QueryOptimizer`] for reduction. "Changed" means pointer identity
//! ([`Arc::ptr_eq`]), so an untouched subtree comes back as the identical
//! `Arc` and no allocation happens for already-optimal trees.

use std::sync::Arc;

use tracing::trace;

use crate::{
	error::QueryError,
	query::{BinaryQuery, Query, SearchQuery, UnaryQuery},
};

/// Simplification policy applied to every node of a query tree.
///
/// The optimizer is an injected capability: it is passed into
/// [`SearchQuery::optimize`] by reference and never stored on a node.
/// There is no default optimizer; every call site supplies one.
pub trait QueryOptimizer {
	/// Reduces an already-rebuilt node (its children are optimized) into
	/// an equivalent, possibly simpler node.
	///
	/// Returning the input unchanged is valid and common. The result must
	/// produce the same match set as the input when evaluated by the
	/// remote search service. Any error returned here propagates to the
	/// optimize caller unchanged.
	fn reduce(&self, query: Query) -> Result<Query, QueryError>;
}

impl SearchQuery {
	/// Returns a query semantically equivalent to `self`, simplified by
	/// `optimizer`.
	///
	/// Visits children before the node itself; within a binary node the
	/// right operand is visited before the left one, which optimizers
	/// with order-sensitive state may rely on. If nothing below a node
	/// changed, the node itself is reused rather than copied, so a no-op
	/// optimizer gets back the identical `Arc` it started from.
	pub fn optimize<O>(self: &Arc<Self>, optimizer: &O) -> Result<Query, QueryError>
	where
		O: QueryOptimizer + ?Sized,
	{
		match self.as_ref() {
			SearchQuery::Binary(binary) => {
				let right = binary.right().optimize(optimizer)?;
				let left = binary.left().optimize(optimizer)?;

				let rebuilt = if Arc::ptr_eq(&left, binary.left())
					&& Arc::ptr_eq(&right, binary.right())
				{
					Arc::clone(self)
				} else {
					trace!(term = %binary.term(), "rebuilding binary node");
					Arc::new(SearchQuery::Binary(BinaryQuery::rebuild(
						binary.term(),
						left,
						right,
					)))
				};

				optimizer.reduce(rebuilt)
			}
			SearchQuery::Unary(unary) => {
				let operand = unary.operand().optimize(optimizer)?;

				let rebuilt = if Arc::ptr_eq(&operand, unary.operand()) {
					Arc::clone(self)
				} else {
					trace!(term = %unary.term(), "rebuilding unary node");
					Arc::new(SearchQuery::Unary(UnaryQuery::rebuild(
						unary.term(),
						operand,
					)))
				};

				optimizer.reduce(rebuilt)
			}
			// Leaves have nothing to recurse into.
			_ => optimizer.reduce(Arc::clone(self)),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::{Cell, RefCell};

	use super::*;
	use crate::term::SearchTerm;

	/// Returns every node unchanged.
	struct NoopOptimizer;

	impl QueryOptimizer for NoopOptimizer {
		fn reduce(&self, query: Query) -> Result<Query, QueryError> {
			Ok(query)
		}
	}

	/// Counts reductions and records each argument, otherwise a no-op.
	#[derive(Default)]
	struct SpyOptimizer {
		calls: Cell<usize>,
		seen: RefCell<Vec<Query>>,
	}

	impl QueryOptimizer for SpyOptimizer {
		fn reduce(&self, query: Query) -> Result<Query, QueryError> {
			self.calls.set(self.calls.get() + 1);
			self.seen.borrow_mut().push(Arc::clone(&query));
			Ok(query)
		}
	}

	#[test]
	fn test_identity_preserving_optimize() {
		let root = SearchQuery::and(SearchQuery::seen(), SearchQuery::flagged());
		let optimized = root.optimize(&NoopOptimizer).unwrap();
		assert!(Arc::ptr_eq(&optimized, &root));
	}

	#[test]
	fn test_reduce_consulted_once_per_node() {
		let root = SearchQuery::and(
			SearchQuery::or(SearchQuery::seen(), SearchQuery::flagged()),
			SearchQuery::not(SearchQuery::deleted()),
		);
		let spy = SpyOptimizer::default();
		root.optimize(&spy).unwrap();
		// Two leaves + OR + one leaf + NOT + AND.
		assert_eq!(spy.calls.get(), 6);
		// The root reduction received the reused root itself.
		assert!(Arc::ptr_eq(spy.seen.borrow().last().unwrap(), &root));
	}

	#[test]
	fn test_right_visited_before_left() {
		let left = SearchQuery::from_contains("alice").unwrap();
		let right = SearchQuery::to_contains("bob").unwrap();
		let root = SearchQuery::and(Arc::clone(&left), Arc::clone(&right));

		let spy = SpyOptimizer::default();
		root.optimize(&spy).unwrap();

		let seen = spy.seen.borrow();
		assert_eq!(seen.len(), 3);
		assert!(Arc::ptr_eq(&seen[0], &right));
		assert!(Arc::ptr_eq(&seen[1], &left));
		assert!(Arc::ptr_eq(&seen[2], &root));
	}

	/// Rewrites a single target leaf into a replacement, spying on the
	/// composite that arrives afterwards.
	struct RewriteLeaf {
		target: Query,
		replacement: Query,
		rebuilt: RefCell<Option<Query>>,
	}

	impl QueryOptimizer for RewriteLeaf {
		fn reduce(&self, query: Query) -> Result<Query, QueryError> {
			if Arc::ptr_eq(&query, &self.target) {
				return Ok(Arc::clone(&self.replacement));
			}
			if matches!(query.as_ref(), SearchQuery::Binary(_)) {
				*self.rebuilt.borrow_mut() = Some(Arc::clone(&query));
			}
			Ok(query)
		}
	}

	#[test]
	fn test_rebuild_on_change() {
		let left = SearchQuery::from_contains("alice").unwrap();
		let right = SearchQuery::to_contains("bob").unwrap();
		let root = SearchQuery::and(Arc::clone(&left), Arc::clone(&right));

		let optimizer = RewriteLeaf {
			target: Arc::clone(&left),
			replacement: SearchQuery::from_contains("carol").unwrap(),
			rebuilt: RefCell::new(None),
		};
		let optimized = root.optimize(&optimizer).unwrap();

		// A changed child forces a new composite; the unchanged child is
		// carried over as the identical Arc.
		assert!(!Arc::ptr_eq(&optimized, &root));
		let rebuilt = optimizer.rebuilt.borrow();
		let rebuilt = rebuilt.as_ref().unwrap();
		assert!(Arc::ptr_eq(rebuilt, &optimized));
		match rebuilt.as_ref() {
			SearchQuery::Binary(binary) => {
				assert_eq!(binary.term(), SearchTerm::And);
				assert!(Arc::ptr_eq(binary.left(), &optimizer.replacement));
				assert!(Arc::ptr_eq(binary.right(), &right));
			}
			other => panic!("expected a binary node, got {other}"),
		}
	}

	#[test]
	fn test_unary_rebuild_on_change() {
		let operand = SearchQuery::from_contains("alice").unwrap();
		let root = SearchQuery::not(Arc::clone(&operand));

		let optimizer = RewriteLeaf {
			target: Arc::clone(&operand),
			replacement: SearchQuery::seen(),
			rebuilt: RefCell::new(None),
		};
		let optimized = root.optimize(&optimizer).unwrap();

		assert!(!Arc::ptr_eq(&optimized, &root));
		match optimized.as_ref() {
			SearchQuery::Unary(unary) => {
				assert_eq!(unary.term(), SearchTerm::Not);
				assert!(Arc::ptr_eq(unary.operand(), &optimizer.replacement));
			}
			other => panic!("expected a unary node, got {other}"),
		}
	}

	/// Collapses every AND to its left operand.
	struct CollapseAnd;

	impl QueryOptimizer for CollapseAnd {
		fn reduce(&self, query: Query) -> Result<Query, QueryError> {
			match query.as_ref() {
				SearchQuery::Binary(binary) if binary.term() == SearchTerm::And => {
					Ok(Arc::clone(binary.left()))
				}
				_ => Ok(query),
			}
		}
	}

	#[test]
	fn test_deep_tree_collapses_to_single_node() {
		let leaf = SearchQuery::subject_contains("deep").unwrap();
		let mut root = Arc::clone(&leaf);
		for _ in 0..50 {
			root = SearchQuery::and(root, SearchQuery::seen());
		}

		let optimized = root.optimize(&CollapseAnd).unwrap();
		assert!(Arc::ptr_eq(&optimized, &leaf));
	}

	/// Fails on the first composite it sees.
	struct FailingOptimizer;

	impl QueryOptimizer for FailingOptimizer {
		fn reduce(&self, query: Query) -> Result<Query, QueryError> {
			if matches!(query.as_ref(), SearchQuery::Binary(_)) {
				return Err(QueryError::Optimize {
					reason: "boom".into(),
				});
			}
			Ok(query)
		}
	}

	#[test]
	fn test_optimizer_failure_propagates_unchanged() {
		let root = SearchQuery::and(SearchQuery::seen(), SearchQuery::flagged());
		let err = root.optimize(&FailingOptimizer).unwrap_err();
		assert_eq!(
			err,
			QueryError::Optimize {
				reason: "boom".into()
			}
		);
	}
}
