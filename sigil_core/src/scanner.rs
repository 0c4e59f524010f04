use logos::Logos;
use snailquote::unescape;

use crate::tokens::Argument;
use crate::tokens::OrderedFloat;
use crate::tokens::Token;

/// Raw tokens produced by logos for flat tokenization of the input text.
///
/// Quote characters are deliberately absent: a quoted run only has meaning
/// inside an argument list, where it is scanned from the raw bytes. Treating
/// quotes lexically everywhere would make the scanner blind to tokens inside
/// quoted runs of the host format.
#[derive(Logos, Debug, PartialEq)]
enum RawToken {
	#[token("$")]
	Sigil,
	#[token(".")]
	Dot,
	#[token("(")]
	OpenParen,
	#[token(")")]
	CloseParen,
	#[token(",")]
	Comma,
	#[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
	Ident,
	#[regex(r"-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
	Number,
	#[regex(r"[ \t\r\n\u{0c}]+")]
	Whitespace,
}

/// Walks the logos token stream, emitting one [`Token`] per well-formed
/// construct. Malformed constructs (a bare sigil, an unterminated or invalid
/// argument list) emit nothing and leave the text untouched.
struct TokenWalker<'a> {
	/// The input text being scanned.
	source: &'a str,
	/// The collected raw tokens and their byte spans.
	raw_tokens: Vec<(Result<RawToken, ()>, std::ops::Range<usize>)>,
	/// Current index into `raw_tokens`.
	cursor: usize,
	/// Collected well-formed tokens, in ascending source order.
	tokens: Vec<Token>,
}

impl<'a> TokenWalker<'a> {
	fn new(source: &'a str) -> Self {
		let raw_tokens: Vec<_> = RawToken::lexer(source).spanned().collect();

		Self {
			source,
			raw_tokens,
			cursor: 0,
			tokens: vec![],
		}
	}

	fn raw_at(&self, index: usize) -> Option<&Result<RawToken, ()>> {
		self.raw_tokens.get(index).map(|(result, _)| result)
	}

	fn span_at(&self, index: usize) -> std::ops::Range<usize> {
		self.raw_tokens[index].1.clone()
	}

	/// Get the text slice for the raw token at `index`.
	fn slice_at(&self, index: usize) -> &'a str {
		let (_, span) = &self.raw_tokens[index];
		&self.source[span.clone()]
	}

	/// Main processing loop: every sigil is a candidate token site; anything
	/// that fails to match a full construct is skipped byte-for-byte.
	fn process(&mut self) {
		while self.cursor < self.raw_tokens.len() {
			if matches!(self.raw_at(self.cursor), Some(Ok(RawToken::Sigil))) {
				if let Some((token, next)) = self.try_scan_token() {
					self.tokens.push(token);
					self.cursor = next;
					continue;
				}
			}

			self.cursor += 1;
		}
	}

	/// Attempt to match a full construct starting at the sigil under the
	/// cursor. Returns the token and the raw index one past it, or `None`
	/// without consuming anything.
	fn try_scan_token(&self) -> Option<(Token, usize)> {
		let start = self.span_at(self.cursor).start;
		let mut index = self.cursor + 1;

		// Dotted path. The first segment must sit immediately after the
		// sigil; a `.` not followed by a further segment ends the path.
		if !matches!(self.raw_at(index)?, Ok(RawToken::Ident)) {
			return None;
		}
		let mut path = vec![self.slice_at(index).to_string()];
		index += 1;

		while matches!(self.raw_at(index), Some(Ok(RawToken::Dot)))
			&& matches!(self.raw_at(index + 1), Some(Ok(RawToken::Ident)))
		{
			path.push(self.slice_at(index + 1).to_string());
			index += 2;
		}

		let mut end = self.span_at(index - 1).end;

		// Call-style argument list, only when the paren is adjacent.
		let mut args = None;
		if matches!(self.raw_at(index), Some(Ok(RawToken::OpenParen))) {
			let (list, next) = self.scan_arguments(index + 1)?;
			args = Some(list);
			index = next;
			end = self.span_at(index - 1).end;
		}

		// Unit-like suffix run, scanned directly from the bytes. Suffix
		// bytes never include `$`, so skipping covered raw tokens cannot
		// skip a later sigil.
		let bytes = self.source.as_bytes();
		let mut suffix_end = end;
		while suffix_end < bytes.len() && is_suffix_byte(bytes[suffix_end]) {
			suffix_end += 1;
		}
		let suffix = self.source[end..suffix_end].to_string();
		while index < self.raw_tokens.len() && self.span_at(index).start < suffix_end {
			index += 1;
		}

		let token = Token {
			path,
			args,
			suffix,
			start,
			end: suffix_end,
		};

		Some((token, index))
	}

	/// Scan a comma-separated literal list after an opening paren. Returns
	/// the arguments and the raw index one past the closing paren, or `None`
	/// when the list is malformed or unterminated.
	fn scan_arguments(&self, mut index: usize) -> Option<(Vec<Argument>, usize)> {
		let mut args = Vec::new();

		index = self.skip_whitespace(index);
		if matches!(self.raw_at(index)?, Ok(RawToken::CloseParen)) {
			return Some((args, index + 1));
		}

		loop {
			index = self.skip_whitespace(index);
			let (argument, next) = self.scan_literal(index)?;
			args.push(argument);

			index = self.skip_whitespace(next);
			match self.raw_at(index)? {
				Ok(RawToken::Comma) => index += 1,
				Ok(RawToken::CloseParen) => return Some((args, index + 1)),
				_ => return None,
			}
		}
	}

	/// Scan a single argument literal: quoted string, number, or boolean.
	fn scan_literal(&self, index: usize) -> Option<(Argument, usize)> {
		match self.raw_at(index)? {
			Ok(RawToken::Number) => {
				let value: f64 = self.slice_at(index).parse().ok()?;
				Some((Argument::Number(OrderedFloat(value)), index + 1))
			}
			Ok(RawToken::Ident) => {
				match self.slice_at(index) {
					"true" => Some((Argument::Boolean(true), index + 1)),
					"false" => Some((Argument::Boolean(false), index + 1)),
					_ => None,
				}
			}
			Err(()) => {
				let byte = self.source.as_bytes()[self.span_at(index).start];
				if byte == b'"' || byte == b'\'' {
					self.scan_string(index, byte)
				} else {
					None
				}
			}
			_ => None,
		}
	}

	/// Scan a quoted string argument from the raw bytes, starting at the raw
	/// token holding the opening quote. Strips quotes and unescapes if
	/// needed.
	fn scan_string(&self, index: usize, delimiter: u8) -> Option<(Argument, usize)> {
		let open = self.span_at(index).start;
		let bytes = self.source.as_bytes();
		let mut pos = open + 1;

		while pos < bytes.len() && bytes[pos] != delimiter {
			if bytes[pos] == b'\\' {
				pos += 2;
			} else {
				pos += 1;
			}
		}
		if pos >= bytes.len() {
			// Unterminated string: reject the whole construct.
			return None;
		}

		let inner = &self.source[open + 1..pos];
		let value = if inner.contains('\\') {
			unescape(inner).ok()?
		} else {
			inner.to_string()
		};

		let close = pos + 1;
		let mut next = index;
		while next < self.raw_tokens.len() && self.span_at(next).start < close {
			next += 1;
		}

		Some((Argument::String(value), next))
	}

	fn skip_whitespace(&self, mut index: usize) -> usize {
		while matches!(self.raw_at(index), Some(Ok(RawToken::Whitespace))) {
			index += 1;
		}
		index
	}
}

/// Bytes allowed in a suffix run: unit trailers such as `px`, `rem`, `%`.
/// Host-format punctuation (`}`, `;`, `:`) and whitespace terminate the run.
fn is_suffix_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'%'
}

/// Scan `content` for token occurrences.
///
/// A pure function of the input text: tokens are returned in ascending
/// `start` order with non-overlapping spans, and repeated calls yield the
/// same sequence. The scanner does not recurse into matched argument
/// literals.
pub fn scan(content: &str) -> Vec<Token> {
	let mut walker = TokenWalker::new(content);
	walker.process();
	walker.tokens
}
