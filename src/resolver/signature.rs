// Signature tokenizer
//
// Signal/slot signatures arrive as the macro-stringified form
// `"1clicked(int,QMap<int,int>)"`: one type-tag digit, the method name, and
// a parenthesized type list. The scanner walks the argument list one token
// at a time so the caller can prune candidates between tokens, tracking
// bracket depth and, separately, angle-bracket depth so a comma inside
// `QMap<int,int>` does not split the argument.

use thiserror::Error;

/// Why a signature string could not be consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("signature is too short to carry a method name")]
    TooShort,
    #[error("signature has no parenthesized argument list")]
    MissingParens,
    #[error("argument list is not terminated")]
    UnterminatedArguments,
}

/// A validated signature string: type tag, method name, argument list.
#[derive(Debug, Clone, Copy)]
pub struct Signature<'s> {
    text: &'s str,
    lparen: usize,
}

impl<'s> Signature<'s> {
    /// Validate the raw literal text. Surrounding whitespace is ignored and
    /// an embedded NUL truncates the text (the macro convention appends a
    /// `"\0file:line"` suffix in some build modes).
    pub fn parse(raw: &'s str) -> Result<Self, SignatureError> {
        let mut text = raw.trim();
        if text.len() < 4 {
            return Err(SignatureError::TooShort);
        }
        if let Some(nul) = text.find('\0') {
            text = text[..nul].trim();
        }

        let lparen = text.find('(');
        let rparen = text.find(')');
        match (lparen, rparen) {
            (Some(l), Some(r)) if l < r && l >= 2 => Ok(Self { text, lparen: l }),
            _ => Err(SignatureError::MissingParens),
        }
    }

    /// The method name, with the one-character type tag dropped.
    pub fn method_name(&self) -> &'s str {
        self.text[1..self.lparen].trim()
    }

    /// Scanner over the argument list, starting just after the `(`.
    pub fn arguments(&self) -> ArgumentScanner<'s> {
        ArgumentScanner {
            text: self.text,
            pos: self.lparen + 1,
        }
    }
}

/// One argument token, trimmed and const-reference-stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgToken<'s> {
    pub text: &'s str,
    /// Whether the token was delimited by the closing `)` rather than a comma.
    pub at_close: bool,
}

/// Incremental argument scanner. The caller drives it token by token and is
/// responsible for checking [`fully_consumed`](Self::fully_consumed) once it
/// stops: a signature with text after the closing `)` is malformed.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentScanner<'s> {
    text: &'s str,
    pos: usize,
}

impl<'s> ArgumentScanner<'s> {
    /// Whether any input is left to scan.
    pub fn has_more_input(&self) -> bool {
        self.pos < self.text.len()
    }

    /// Whether the scanner stopped exactly at end-of-input.
    pub fn fully_consumed(&self) -> bool {
        self.pos == self.text.len()
    }

    /// Extract the next argument up to the next top-level `,` or `)`.
    ///
    /// Returns `Ok(None)` once the input is exhausted; running off the end
    /// while still looking for a delimiter is an error that must abort the
    /// whole resolution.
    pub fn next_argument(&mut self) -> Result<Option<ArgToken<'s>>, SignatureError> {
        if !self.has_more_input() {
            return Ok(None);
        }

        let delimiter = self
            .find_delimiter()
            .ok_or(SignatureError::UnterminatedArguments)?;
        let token = strip_const_ref(self.text[self.pos..delimiter].trim());
        let at_close = self.text.as_bytes()[delimiter] == b')';
        self.pos = delimiter + 1;

        Ok(Some(ArgToken {
            text: token,
            at_close,
        }))
    }

    /// Two-counter scan: `(`/`[`/`{` nest the bracket counter, `<`/`>` nest
    /// the angle counter but only at bracket depth 0, and a delimiter only
    /// counts when both are at 0.
    fn find_delimiter(&self) -> Option<usize> {
        let bytes = self.text.as_bytes();
        let mut depth: i32 = 0;
        let mut angle: i32 = 0;

        for (i, &b) in bytes.iter().enumerate().skip(self.pos) {
            match b {
                b',' | b')' if depth == 0 && angle == 0 => return Some(i),
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => depth -= 1,
                b'<' if depth == 0 => angle += 1,
                b'>' if depth == 0 => angle -= 1,
                _ => {}
            }
        }
        None
    }
}

/// Strip one layer of `const ... &` from an argument spelling; the matcher
/// strips the same layer off parameter types, so `const QString &` and
/// `QString` compare equal.
fn strip_const_ref(token: &str) -> &str {
    if let Some(rest) = token.strip_prefix("const ") {
        if let Some(inner) = rest.strip_suffix('&') {
            return inner.trim();
        }
    }
    token
}
