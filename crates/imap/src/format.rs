// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Mailsearch

//! Rendering a query tree as the argument list of an IMAP `SEARCH`
//! command (RFC 3501, section 6.4.4).
//!
//! `AND` is juxtaposition in the SEARCH grammar; `OR` and `NOT` are
//! prefix keywords. Strings are sent as quoted strings; text that needs
//! a literal (CR/LF or non-ASCII bytes) is rejected here because literal
//! continuation belongs to the protocol client.

use chrono::NaiveDate;
use mailsearch_query::{SearchQuery, SearchTerm};

use crate::error::ImapError;

/// Renders `query` as an IMAP `SEARCH` program, e.g.
/// `UNSEEN FROM "alice" SENTSINCE 5-Jan-2026`.
pub fn format_query(query: &SearchQuery) -> Result<String, ImapError> {
	let mut out = String::new();
	write_query(&mut out, query)?;
	Ok(out)
}

fn write_query(out: &mut String, query: &SearchQuery) -> Result<(), ImapError> {
	match query {
		SearchQuery::Flag(flag) => out.push_str(&flag.term().to_string()),
		SearchQuery::Binary(binary) => match binary.term() {
			SearchTerm::Or => {
				out.push_str("OR ");
				write_query(out, binary.left())?;
				out.push(' ');
				write_query(out, binary.right())?;
			}
			_ => {
				write_query(out, binary.left())?;
				out.push(' ');
				write_query(out, binary.right())?;
			}
		},
		SearchQuery::Unary(unary) => {
			out.push_str("NOT ");
			write_query(out, unary.operand())?;
		}
		SearchQuery::Text(text) => {
			out.push_str(&text.term().to_string());
			out.push(' ');
			write_quoted(out, text.text())?;
		}
		SearchQuery::Date(date) => {
			out.push_str(&date.term().to_string());
			out.push(' ');
			out.push_str(&format_date(date.date()));
		}
		SearchQuery::Size(size) => {
			out.push_str(&size.term().to_string());
			out.push(' ');
			out.push_str(&size.octets().to_string());
		}
		SearchQuery::Header(header) => {
			out.push_str("HEADER ");
			write_quoted(out, header.field())?;
			out.push(' ');
			write_quoted(out, header.value())?;
		}
		SearchQuery::Uids(uids) => {
			out.push_str("UID ");
			out.push_str(&format_uid_set(uids.uids()));
		}
	}
	Ok(())
}

fn write_quoted(out: &mut String, text: &str) -> Result<(), ImapError> {
	if text.bytes().any(|b| b == b'\r' || b == b'\n' || !b.is_ascii()) {
		return Err(ImapError::UnquotableText {
			text: text.to_string(),
		});
	}
	out.push('"');
	for c in text.chars() {
		if c == '"' || c == '\\' {
			out.push('\\');
		}
		out.push(c);
	}
	out.push('"');
	Ok(())
}

/// IMAP date-text: day without a leading zero, abbreviated English
/// month, four-digit year.
fn format_date(date: NaiveDate) -> String {
	date.format("%-d-%b-%Y").to_string()
}

/// Compresses a sorted uid set into sequence-set syntax: `1:3,5,9:12`.
fn format_uid_set(uids: &[u32]) -> String {
	let mut parts = Vec::new();
	let mut iter = uids.iter().copied().peekable();

	while let Some(start) = iter.next() {
		let mut end = start;
		while let Some(&next) = iter.peek() {
			if Some(next) != end.checked_add(1) {
				break;
			}
			end = next;
			iter.next();
		}
		if end > start {
			parts.push(format!("{start}:{end}"));
		} else {
			parts.push(start.to_string());
		}
	}

	parts.join(",")
}
