// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Mailsearch

/// Errors raised while rendering a query as an IMAP `SEARCH` program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImapError {
	/// The text contains CR, LF or non-ASCII bytes and cannot be sent as
	/// a quoted string. Literal continuation is the protocol client's
	/// job, not the serializer's.
	#[error("text cannot be sent as an IMAP quoted string: {text:?}")]
	UnquotableText { text: String },
}
