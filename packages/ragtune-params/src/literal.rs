//! Parser for the literal expressions config files use to spell tuples, e.g. `(0.3, 0.7)`.
//!
//! Accepted: integers (decimal, or `0x`/`0o`/`0b` prefixed), floats, single- or double-quoted
//! strings, `True`, `False`, `None`, tuples, lists, and string-keyed dicts. `(x)` without a comma
//! is just `x`. Complex numbers, sets, and bytes are not supported.

use crate::{Error, ParamMap, ParamValue, Result};

pub fn parse_literal(input: &str) -> Result<ParamValue> {
	let mut parser = Parser { input, pos: 0 };
	let value = parser.value()?;

	parser.skip_whitespace();

	if parser.pos != input.len() {
		return Err(parser.error("unexpected trailing input"));
	}

	Ok(value)
}

struct Parser<'a> {
	input: &'a str,
	pos: usize,
}
impl Parser<'_> {
	fn peek(&self) -> Option<char> {
		self.input[self.pos..].chars().next()
	}

	fn bump(&mut self) -> Option<char> {
		let ch = self.peek()?;

		self.pos += ch.len_utf8();

		Some(ch)
	}

	fn skip_whitespace(&mut self) {
		while self.peek().is_some_and(char::is_whitespace) {
			self.bump();
		}
	}

	fn eat(&mut self, expected: char) -> bool {
		self.skip_whitespace();

		if self.peek() == Some(expected) {
			self.bump();

			return true;
		}

		false
	}

	fn error(&self, message: &str) -> Error {
		Error::MalformedLiteral {
			input: self.input.to_string(),
			message: format!("{message} at offset {}", self.pos),
		}
	}

	fn value(&mut self) -> Result<ParamValue> {
		self.skip_whitespace();

		match self.peek() {
			Some('(') => self.tuple(),
			Some('[') => {
				self.bump();

				self.sequence(']').map(|(items, _)| ParamValue::List(items))
			},
			Some('{') => self.dict(),
			Some(quote @ ('\'' | '"')) => self.string(quote).map(ParamValue::Str),
			Some(ch) if ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.') => self.number(),
			Some(ch) if ch.is_alphabetic() => self.keyword(),
			Some(_) => Err(self.error("unexpected character")),
			None => Err(self.error("unexpected end of input")),
		}
	}

	fn tuple(&mut self) -> Result<ParamValue> {
		self.bump();

		let (mut items, saw_comma) = self.sequence(')')?;

		if items.len() == 1 && !saw_comma {
			return Ok(items.remove(0));
		}

		Ok(ParamValue::Tuple(items))
	}

	/// Parses comma-separated values up to `close`, reporting whether any comma was seen.
	fn sequence(&mut self, close: char) -> Result<(Vec<ParamValue>, bool)> {
		let mut items = Vec::new();
		let mut saw_comma = false;

		loop {
			if self.eat(close) {
				return Ok((items, saw_comma));
			}

			items.push(self.value()?);

			if self.eat(',') {
				saw_comma = true;

				continue;
			}
			if self.eat(close) {
				return Ok((items, saw_comma));
			}

			return Err(self.error(&format!("expected ',' or '{close}'")));
		}
	}

	fn dict(&mut self) -> Result<ParamValue> {
		self.bump();

		let mut map = ParamMap::new();

		loop {
			if self.eat('}') {
				return Ok(ParamValue::Map(map));
			}

			self.skip_whitespace();

			let key = match self.peek() {
				Some(quote @ ('\'' | '"')) => self.string(quote)?,
				_ => return Err(self.error("dict keys must be strings")),
			};

			if !self.eat(':') {
				return Err(self.error("expected ':'"));
			}

			let value = self.value()?;

			map.insert(key, value);

			if self.eat(',') {
				continue;
			}
			if self.eat('}') {
				return Ok(ParamValue::Map(map));
			}

			return Err(self.error("expected ',' or '}'"));
		}
	}

	fn string(&mut self, quote: char) -> Result<String> {
		self.bump();

		let mut out = String::new();

		loop {
			match self.bump() {
				Some(ch) if ch == quote => return Ok(out),
				Some('\\') => {
					let escaped = match self.bump() {
						Some('n') => '\n',
						Some('t') => '\t',
						Some('r') => '\r',
						Some('0') => '\0',
						Some(ch @ ('\\' | '\'' | '"')) => ch,
						Some(ch) => {
							out.push('\\');

							ch
						},
						None => return Err(self.error("unterminated string")),
					};

					out.push(escaped);
				},
				Some(ch) => out.push(ch),
				None => return Err(self.error("unterminated string")),
			}
		}
	}

	fn number(&mut self) -> Result<ParamValue> {
		let start = self.pos;
		let negative = self.peek() == Some('-');

		if matches!(self.peek(), Some('-' | '+')) {
			self.bump();
		}

		if let Some(radix) = self.radix_prefix() {
			return self.prefixed_integer(radix, negative);
		}

		let mut is_float = false;

		while let Some(ch) = self.peek() {
			match ch {
				'0'..='9' | '_' => {},
				'.' => is_float = true,
				'e' | 'E' => {
					is_float = true;

					self.bump();

					if matches!(self.peek(), Some('-' | '+')) {
						self.bump();
					}

					continue;
				},
				_ => break,
			}

			self.bump();
		}

		let raw = self.input[start..self.pos].replace('_', "");

		if is_float {
			return raw
				.parse::<f64>()
				.map(ParamValue::Float)
				.map_err(|err| self.error(&format!("invalid float {raw:?}: {err}")));
		}

		raw.parse::<i64>()
			.map(ParamValue::Int)
			.map_err(|err| self.error(&format!("invalid integer {raw:?}: {err}")))
	}

	/// Consumes a `0x`, `0o`, or `0b` prefix and returns its radix.
	fn radix_prefix(&mut self) -> Option<u32> {
		let mut ahead = self.input[self.pos..].chars();

		if ahead.next() != Some('0') {
			return None;
		}

		let radix = match ahead.next()? {
			'x' | 'X' => 16,
			'o' | 'O' => 8,
			'b' | 'B' => 2,
			_ => return None,
		};

		self.pos += 2;

		Some(radix)
	}

	fn prefixed_integer(&mut self, radix: u32, negative: bool) -> Result<ParamValue> {
		let start = self.pos;

		while self.peek().is_some_and(|ch| ch.is_digit(radix) || ch == '_') {
			self.bump();
		}

		let digits = self.input[start..self.pos].replace('_', "");
		let magnitude = i64::from_str_radix(&digits, radix)
			.map_err(|err| self.error(&format!("invalid base-{radix} integer {digits:?}: {err}")))?;

		Ok(ParamValue::Int(if negative { -magnitude } else { magnitude }))
	}

	fn keyword(&mut self) -> Result<ParamValue> {
		let start = self.pos;

		while self.peek().is_some_and(|ch| ch.is_alphanumeric() || ch == '_') {
			self.bump();
		}

		match &self.input[start..self.pos] {
			"True" => Ok(ParamValue::Bool(true)),
			"False" => Ok(ParamValue::Bool(false)),
			"None" => Ok(ParamValue::Null),
			other => Err(self.error(&format!("unknown name {other:?}"))),
		}
	}
}
