// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Mailsearch

//! The query node data model.
//!
//! A search query is a tree of immutable nodes: leaf predicates combined
//! by `AND`/`OR`/`NOT` operators. Children are shared `Arc` references;
//! nothing mutates a node after construction, so a fully built tree is
//! `Send + Sync` and safe to hand to the optimize pass from any thread.

use std::{
	fmt::{self, Display, Formatter},
	sync::Arc,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{error::QueryError, term::SearchTerm};

/// A shared, immutable query node.
pub type Query = Arc<SearchQuery>;

/// A node in the search-predicate expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchQuery {
	Flag(FlagQuery),

	Binary(BinaryQuery),

	Unary(UnaryQuery),

	Text(TextQuery),

	Date(DateQuery),

	Size(SizeQuery),

	Header(HeaderQuery),

	Uids(UidQuery),
}

impl SearchQuery {
	/// The term tag of this node, fixed for its lifetime.
	pub fn term(&self) -> SearchTerm {
		match self {
			SearchQuery::Flag(flag) => flag.term(),
			SearchQuery::Binary(binary) => binary.term(),
			SearchQuery::Unary(unary) => unary.term(),
			SearchQuery::Text(text) => text.term(),
			SearchQuery::Date(date) => date.term(),
			SearchQuery::Size(size) => size.term(),
			SearchQuery::Header(_) => SearchTerm::HeaderContains,
			SearchQuery::Uids(_) => SearchTerm::Uids,
		}
	}
}

/// A payload-free flag predicate such as `SEEN` or `DELETED`. `ALL`
/// belongs here too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagQuery {
	term: SearchTerm,
}

impl FlagQuery {
	pub fn new(term: SearchTerm) -> Result<Self, QueryError> {
		if !term.is_flag() {
			return Err(QueryError::NotFlagTerm {
				term,
			});
		}
		Ok(Self {
			term,
		})
	}

	pub fn term(&self) -> SearchTerm {
		self.term
	}
}

/// A two-operand boolean combination (`AND`/`OR`) of two query nodes.
///
/// Both children are set at construction and never reassigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryQuery {
	term: SearchTerm,
	left: Query,
	right: Query,
}

impl BinaryQuery {
	pub fn new(term: SearchTerm, left: Query, right: Query) -> Result<Self, QueryError> {
		if !term.is_binary() {
			return Err(QueryError::NotBinaryOperator {
				term,
			});
		}
		Ok(Self {
			term,
			left,
			right,
		})
	}

	// Rebuilds during optimize reuse the already-validated term.
	pub(crate) fn rebuild(term: SearchTerm, left: Query, right: Query) -> Self {
		Self {
			term,
			left,
			right,
		}
	}

	pub fn term(&self) -> SearchTerm {
		self.term
	}

	/// The left operand of the expression.
	pub fn left(&self) -> &Query {
		&self.left
	}

	/// The right operand of the expression.
	pub fn right(&self) -> &Query {
		&self.right
	}
}

/// A single-operand operator node; the only unary term is `NOT`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryQuery {
	term: SearchTerm,
	operand: Query,
}

impl UnaryQuery {
	pub fn new(term: SearchTerm, operand: Query) -> Result<Self, QueryError> {
		if !term.is_unary() {
			return Err(QueryError::NotUnaryOperator {
				term,
			});
		}
		Ok(Self {
			term,
			operand,
		})
	}

	pub(crate) fn rebuild(term: SearchTerm, operand: Query) -> Self {
		Self {
			term,
			operand,
		}
	}

	pub fn term(&self) -> SearchTerm {
		self.term
	}

	pub fn operand(&self) -> &Query {
		&self.operand
	}
}

/// A substring predicate over some message part (`SUBJECT`, `FROM`,
/// `BODY`, ...). The text must be non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextQuery {
	term: SearchTerm,
	text: String,
}

impl TextQuery {
	pub fn new(term: SearchTerm, text: impl Into<String>) -> Result<Self, QueryError> {
		if !term.is_text() {
			return Err(QueryError::NotTextTerm {
				term,
			});
		}
		let text = text.into();
		if text.is_empty() {
			return Err(QueryError::EmptyText);
		}
		Ok(Self {
			term,
			text,
		})
	}

	pub fn term(&self) -> SearchTerm {
		self.term
	}

	pub fn text(&self) -> &str {
		&self.text
	}
}

/// A calendar-date comparison against the delivery or sent date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateQuery {
	term: SearchTerm,
	date: NaiveDate,
}

impl DateQuery {
	pub fn new(term: SearchTerm, date: NaiveDate) -> Result<Self, QueryError> {
		if !term.is_date() {
			return Err(QueryError::NotDateTerm {
				term,
			});
		}
		Ok(Self {
			term,
			date,
		})
	}

	pub fn term(&self) -> SearchTerm {
		self.term
	}

	pub fn date(&self) -> NaiveDate {
		self.date
	}
}

/// A message-size comparison in octets (`LARGER`/`SMALLER`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeQuery {
	term: SearchTerm,
	octets: u64,
}

impl SizeQuery {
	pub fn new(term: SearchTerm, octets: u64) -> Result<Self, QueryError> {
		if !term.is_size() {
			return Err(QueryError::NotSizeTerm {
				term,
			});
		}
		Ok(Self {
			term,
			octets,
		})
	}

	pub fn term(&self) -> SearchTerm {
		self.term
	}

	pub fn octets(&self) -> u64 {
		self.octets
	}
}

/// Matches messages whose named header contains the given value. An
/// empty value matches any message that has the header at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderQuery {
	field: String,
	value: String,
}

impl HeaderQuery {
	pub fn new(field: impl Into<String>, value: impl Into<String>) -> Result<Self, QueryError> {
		let field = field.into();
		if field.is_empty() {
			return Err(QueryError::EmptyHeaderField);
		}
		Ok(Self {
			field,
			value: value.into(),
		})
	}

	pub fn field(&self) -> &str {
		&self.field
	}

	pub fn value(&self) -> &str {
		&self.value
	}
}

/// Restricts the search to an explicit set of message uids.
///
/// The set is stored sorted and deduplicated; uid 0 is reserved by the
/// protocol and rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UidQuery {
	uids: Vec<u32>,
}

impl UidQuery {
	pub fn new(uids: impl Into<Vec<u32>>) -> Result<Self, QueryError> {
		let mut uids = uids.into();
		if uids.is_empty() {
			return Err(QueryError::EmptyUidSet);
		}
		if uids.contains(&0) {
			return Err(QueryError::ZeroUid);
		}
		uids.sort_unstable();
		uids.dedup();
		Ok(Self {
			uids,
		})
	}

	pub fn uids(&self) -> &[u32] {
		&self.uids
	}
}

// Builder surface. Combinators take already-owned children, so they
// cannot fail; leaf builders validate their payload.
impl SearchQuery {
	fn flag_unchecked(term: SearchTerm) -> Query {
		Arc::new(SearchQuery::Flag(FlagQuery {
			term,
		}))
	}

	/// A flag predicate for any payload-free term.
	pub fn flag(term: SearchTerm) -> Result<Query, QueryError> {
		Ok(Arc::new(SearchQuery::Flag(FlagQuery::new(term)?)))
	}

	/// Matches every message in the mailbox.
	pub fn all() -> Query {
		Self::flag_unchecked(SearchTerm::All)
	}

	pub fn answered() -> Query {
		Self::flag_unchecked(SearchTerm::Answered)
	}

	pub fn deleted() -> Query {
		Self::flag_unchecked(SearchTerm::Deleted)
	}

	pub fn draft() -> Query {
		Self::flag_unchecked(SearchTerm::Draft)
	}

	pub fn flagged() -> Query {
		Self::flag_unchecked(SearchTerm::Flagged)
	}

	pub fn new_messages() -> Query {
		Self::flag_unchecked(SearchTerm::New)
	}

	pub fn old() -> Query {
		Self::flag_unchecked(SearchTerm::Old)
	}

	pub fn recent() -> Query {
		Self::flag_unchecked(SearchTerm::Recent)
	}

	pub fn seen() -> Query {
		Self::flag_unchecked(SearchTerm::Seen)
	}

	pub fn not_answered() -> Query {
		Self::flag_unchecked(SearchTerm::NotAnswered)
	}

	pub fn not_deleted() -> Query {
		Self::flag_unchecked(SearchTerm::NotDeleted)
	}

	pub fn not_draft() -> Query {
		Self::flag_unchecked(SearchTerm::NotDraft)
	}

	pub fn not_flagged() -> Query {
		Self::flag_unchecked(SearchTerm::NotFlagged)
	}

	pub fn not_recent() -> Query {
		Self::flag_unchecked(SearchTerm::NotRecent)
	}

	pub fn not_seen() -> Query {
		Self::flag_unchecked(SearchTerm::NotSeen)
	}

	fn text(term: SearchTerm, text: impl Into<String>) -> Result<Query, QueryError> {
		Ok(Arc::new(SearchQuery::Text(TextQuery::new(term, text)?)))
	}

	pub fn bcc_contains(text: impl Into<String>) -> Result<Query, QueryError> {
		Self::text(SearchTerm::BccContains, text)
	}

	pub fn body_contains(text: impl Into<String>) -> Result<Query, QueryError> {
		Self::text(SearchTerm::BodyContains, text)
	}

	pub fn cc_contains(text: impl Into<String>) -> Result<Query, QueryError> {
		Self::text(SearchTerm::CcContains, text)
	}

	pub fn from_contains(text: impl Into<String>) -> Result<Query, QueryError> {
		Self::text(SearchTerm::FromContains, text)
	}

	pub fn message_contains(text: impl Into<String>) -> Result<Query, QueryError> {
		Self::text(SearchTerm::MessageContains, text)
	}

	pub fn subject_contains(text: impl Into<String>) -> Result<Query, QueryError> {
		Self::text(SearchTerm::SubjectContains, text)
	}

	pub fn to_contains(text: impl Into<String>) -> Result<Query, QueryError> {
		Self::text(SearchTerm::ToContains, text)
	}

	pub fn keyword(flag: impl Into<String>) -> Result<Query, QueryError> {
		Self::text(SearchTerm::Keyword, flag)
	}

	pub fn not_keyword(flag: impl Into<String>) -> Result<Query, QueryError> {
		Self::text(SearchTerm::NotKeyword, flag)
	}

	fn date(term: SearchTerm, date: NaiveDate) -> Query {
		Arc::new(SearchQuery::Date(DateQuery {
			term,
			date,
		}))
	}

	pub fn delivered_after(date: NaiveDate) -> Query {
		Self::date(SearchTerm::DeliveredAfter, date)
	}

	pub fn delivered_before(date: NaiveDate) -> Query {
		Self::date(SearchTerm::DeliveredBefore, date)
	}

	pub fn delivered_on(date: NaiveDate) -> Query {
		Self::date(SearchTerm::DeliveredOn, date)
	}

	pub fn sent_after(date: NaiveDate) -> Query {
		Self::date(SearchTerm::SentAfter, date)
	}

	pub fn sent_before(date: NaiveDate) -> Query {
		Self::date(SearchTerm::SentBefore, date)
	}

	pub fn sent_on(date: NaiveDate) -> Query {
		Self::date(SearchTerm::SentOn, date)
	}

	pub fn larger_than(octets: u64) -> Query {
		Arc::new(SearchQuery::Size(SizeQuery {
			term: SearchTerm::LargerThan,
			octets,
		}))
	}

	pub fn smaller_than(octets: u64) -> Query {
		Arc::new(SearchQuery::Size(SizeQuery {
			term: SearchTerm::SmallerThan,
			octets,
		}))
	}

	pub fn header_contains(
		field: impl Into<String>,
		value: impl Into<String>,
	) -> Result<Query, QueryError> {
		Ok(Arc::new(SearchQuery::Header(HeaderQuery::new(field, value)?)))
	}

	pub fn uids(uids: impl Into<Vec<u32>>) -> Result<Query, QueryError> {
		Ok(Arc::new(SearchQuery::Uids(UidQuery::new(uids)?)))
	}

	/// Matches messages that match both operands.
	pub fn and(left: Query, right: Query) -> Query {
		Arc::new(SearchQuery::Binary(BinaryQuery {
			term: SearchTerm::And,
			left,
			right,
		}))
	}

	/// Matches messages that match either operand.
	pub fn or(left: Query, right: Query) -> Query {
		Arc::new(SearchQuery::Binary(BinaryQuery {
			term: SearchTerm::Or,
			left,
			right,
		}))
	}

	/// Matches messages that do not match the operand.
	pub fn not(operand: Query) -> Query {
		Arc::new(SearchQuery::Unary(UnaryQuery {
			term: SearchTerm::Not,
			operand,
		}))
	}
}

impl Display for SearchQuery {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			SearchQuery::Flag(flag) => write!(f, "{}", flag.term()),
			SearchQuery::Binary(BinaryQuery {
				term,
				left,
				right,
			}) => {
				write!(f, "({left} {term} {right})")
			}
			SearchQuery::Unary(UnaryQuery {
				term,
				operand,
			}) => write!(f, "{term} {operand}"),
			SearchQuery::Text(text) => write!(f, "{} {:?}", text.term(), text.text()),
			SearchQuery::Date(date) => write!(f, "{} {}", date.term(), date.date()),
			SearchQuery::Size(size) => write!(f, "{} {}", size.term(), size.octets()),
			SearchQuery::Header(header) => {
				write!(f, "HEADER {} {:?}", header.field(), header.value())
			}
			SearchQuery::Uids(uids) => {
				let set = uids
					.uids()
					.iter()
					.map(|uid| uid.to_string())
					.collect::<Vec<_>>()
					.join(",");
				write!(f, "UID {set}")
			}
		}
	}
}
