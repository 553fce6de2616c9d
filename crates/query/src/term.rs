// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Mailsearch

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// The operator or predicate tag carried by every query node.
///
/// Every node has exactly one term, fixed at construction. Operator terms
/// (`And`, `Or`, `Not`) identify composite nodes; every other term
/// identifies a leaf predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchTerm {
	All,
	And,
	Answered,
	BccContains,
	BodyContains,
	CcContains,
	Deleted,
	DeliveredAfter,
	DeliveredBefore,
	DeliveredOn,
	Draft,
	Flagged,
	FromContains,
	HeaderContains,
	Keyword,
	LargerThan,
	MessageContains,
	New,
	Not,
	NotAnswered,
	NotDeleted,
	NotDraft,
	NotFlagged,
	NotKeyword,
	NotRecent,
	NotSeen,
	Old,
	Or,
	Recent,
	Seen,
	SentAfter,
	SentBefore,
	SentOn,
	SmallerThan,
	SubjectContains,
	ToContains,
	Uids,
}

impl SearchTerm {
	/// Whether this term combines two operands.
	pub fn is_binary(&self) -> bool {
		matches!(self, SearchTerm::And | SearchTerm::Or)
	}

	/// Whether this term wraps a single operand.
	pub fn is_unary(&self) -> bool {
		matches!(self, SearchTerm::Not)
	}

	/// Whether this term is a payload-free flag predicate (`All` included).
	pub fn is_flag(&self) -> bool {
		matches!(
			self,
			SearchTerm::All
				| SearchTerm::Answered
				| SearchTerm::Deleted
				| SearchTerm::Draft
				| SearchTerm::Flagged
				| SearchTerm::New
				| SearchTerm::NotAnswered
				| SearchTerm::NotDeleted
				| SearchTerm::NotDraft
				| SearchTerm::NotFlagged
				| SearchTerm::NotRecent
				| SearchTerm::NotSeen
				| SearchTerm::Old
				| SearchTerm::Recent
				| SearchTerm::Seen
		)
	}

	/// Whether this term matches a substring of some message part.
	pub fn is_text(&self) -> bool {
		matches!(
			self,
			SearchTerm::BccContains
				| SearchTerm::BodyContains
				| SearchTerm::CcContains
				| SearchTerm::FromContains
				| SearchTerm::Keyword
				| SearchTerm::MessageContains
				| SearchTerm::NotKeyword
				| SearchTerm::SubjectContains
				| SearchTerm::ToContains
		)
	}

	/// Whether this term compares against a calendar date.
	pub fn is_date(&self) -> bool {
		matches!(
			self,
			SearchTerm::DeliveredAfter
				| SearchTerm::DeliveredBefore
				| SearchTerm::DeliveredOn
				| SearchTerm::SentAfter
				| SearchTerm::SentBefore
				| SearchTerm::SentOn
		)
	}

	/// Whether this term compares against a message size in octets.
	pub fn is_size(&self) -> bool {
		matches!(self, SearchTerm::LargerThan | SearchTerm::SmallerThan)
	}

	/// The flag predicate matching the complement of this one, where the
	/// protocol defines a direct negation pair.
	pub fn negated(&self) -> Option<SearchTerm> {
		match self {
			SearchTerm::Answered => Some(SearchTerm::NotAnswered),
			SearchTerm::Deleted => Some(SearchTerm::NotDeleted),
			SearchTerm::Draft => Some(SearchTerm::NotDraft),
			SearchTerm::Flagged => Some(SearchTerm::NotFlagged),
			SearchTerm::Recent => Some(SearchTerm::NotRecent),
			SearchTerm::Seen => Some(SearchTerm::NotSeen),
			SearchTerm::NotAnswered => Some(SearchTerm::Answered),
			SearchTerm::NotDeleted => Some(SearchTerm::Deleted),
			SearchTerm::NotDraft => Some(SearchTerm::Draft),
			SearchTerm::NotFlagged => Some(SearchTerm::Flagged),
			SearchTerm::NotRecent => Some(SearchTerm::Recent),
			SearchTerm::NotSeen => Some(SearchTerm::Seen),
			_ => None,
		}
	}
}

impl Display for SearchTerm {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			SearchTerm::All => f.write_str("ALL"),
			SearchTerm::And => f.write_str("AND"),
			SearchTerm::Answered => f.write_str("ANSWERED"),
			SearchTerm::BccContains => f.write_str("BCC"),
			SearchTerm::BodyContains => f.write_str("BODY"),
			SearchTerm::CcContains => f.write_str("CC"),
			SearchTerm::Deleted => f.write_str("DELETED"),
			SearchTerm::DeliveredAfter => f.write_str("SINCE"),
			SearchTerm::DeliveredBefore => f.write_str("BEFORE"),
			SearchTerm::DeliveredOn => f.write_str("ON"),
			SearchTerm::Draft => f.write_str("DRAFT"),
			SearchTerm::Flagged => f.write_str("FLAGGED"),
			SearchTerm::FromContains => f.write_str("FROM"),
			SearchTerm::HeaderContains => f.write_str("HEADER"),
			SearchTerm::Keyword => f.write_str("KEYWORD"),
			SearchTerm::LargerThan => f.write_str("LARGER"),
			SearchTerm::MessageContains => f.write_str("TEXT"),
			SearchTerm::New => f.write_str("NEW"),
			SearchTerm::Not => f.write_str("NOT"),
			SearchTerm::NotAnswered => f.write_str("UNANSWERED"),
			SearchTerm::NotDeleted => f.write_str("UNDELETED"),
			SearchTerm::NotDraft => f.write_str("UNDRAFT"),
			SearchTerm::NotFlagged => f.write_str("UNFLAGGED"),
			SearchTerm::NotKeyword => f.write_str("UNKEYWORD"),
			// No UN* keyword exists for RECENT; OLD is its protocol
			// complement.
			SearchTerm::NotRecent => f.write_str("OLD"),
			SearchTerm::NotSeen => f.write_str("UNSEEN"),
			SearchTerm::Old => f.write_str("OLD"),
			SearchTerm::Or => f.write_str("OR"),
			SearchTerm::Recent => f.write_str("RECENT"),
			SearchTerm::Seen => f.write_str("SEEN"),
			SearchTerm::SentAfter => f.write_str("SENTSINCE"),
			SearchTerm::SentBefore => f.write_str("SENTBEFORE"),
			SearchTerm::SentOn => f.write_str("SENTON"),
			SearchTerm::SmallerThan => f.write_str("SMALLER"),
			SearchTerm::SubjectContains => f.write_str("SUBJECT"),
			SearchTerm::ToContains => f.write_str("TO"),
			SearchTerm::Uids => f.write_str("UID"),
		}
	}
}
