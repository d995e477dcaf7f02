use super::{SignatureParameters, ALGORITHM, HEADERS, KEY_ID, SIGNATURE};
use logos::{Lexer, Logos, Span};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Signature header parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum ParseError {
    /// One of the parameters the verifier relies on was declared twice
    #[error("Duplicate parameter")]
    DuplicateParameter {
        #[label("declared again here")]
        span: SourceSpan,
    },

    /// Input was empty or only contained whitespace
    #[error("Empty signature header")]
    Empty,

    /// Input ended in the middle of a `key="value"` pair
    #[error("Unexpected end of input")]
    UnexpectedEnd {
        #[label("expected more input")]
        span: SourceSpan,
    },

    /// Token was illegal or in the wrong position
    #[error("Unexpected token")]
    UnexpectedToken {
        #[label("this token")]
        span: SourceSpan,
    },
}

#[derive(Debug, Logos)]
#[logos(skip r"[ \t]+")]
enum TokenTy {
    #[regex(r"[A-Za-z0-9_-]+")]
    Key,

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#)]
    Value,

    #[token(",")]
    Comma,
}

#[derive(Debug)]
struct Token {
    pub ty: TokenTy,
    pub span: Span,
}

impl Token {
    pub fn parse(input: &str) -> impl Iterator<Item = Result<Token, Span>> + '_ {
        Lexer::<'_, TokenTy>::new(input)
            .spanned()
            .map(|(ty, span)| match ty {
                Ok(ty) => Ok(Token { ty, span }),
                Err(()) => Err(span),
            })
    }
}

macro_rules! ensure {
    ($self:expr, $value:expr, $pattern:pat) => {{
        let token = match $value {
            Some(Ok(token)) => token,
            Some(Err(span)) => {
                return Some(Err($self.broken(ParseError::UnexpectedToken {
                    span: span.into(),
                })));
            }
            None => {
                return Some(Err($self.broken(ParseError::UnexpectedEnd {
                    span: ($self.input.len(), 0).into(),
                })));
            }
        };

        if !matches!(token.ty, $pattern) {
            return Some(Err($self.broken(ParseError::UnexpectedToken {
                span: token.span.into(),
            })));
        }

        token
    }};
}

struct ParseIter<'a, I> {
    /// Stream of tokens wrapped into a result
    inner: I,

    /// Reference to the original input that was fed to the lexer
    input: &'a str,

    /// Marker whether we encountered any error or illegal token
    ///
    /// If we did, the iterator will stop yielding any results
    is_broken: bool,
}

impl<I> ParseIter<'_, I> {
    fn broken(&mut self, error: ParseError) -> ParseError {
        self.is_broken = true;
        error
    }
}

impl<'a, I> Iterator for ParseIter<'a, I>
where
    I: Iterator<Item = Result<Token, Span>>,
{
    type Item = Result<(Span, &'a str, &'a str), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_broken {
            return None;
        }

        let key = ensure!(self, Some(self.inner.next()?), TokenTy::Key);
        ensure!(self, self.inner.next(), TokenTy::Equals);
        let value = ensure!(self, self.inner.next(), TokenTy::Value);

        if let Some(next) = self.inner.next() {
            ensure!(self, Some(next), TokenTy::Comma);
        }

        let name = &self.input[key.span.clone()];
        // Values can't contain quotes, there is no escaping
        let value = self.input[value.span].trim_matches('"');

        Some(Ok((key.span, name, value)))
    }
}

/// Parameters that must not be declared more than once
const UNIQUE_PARAMETERS: [&str; 4] = [KEY_ID, ALGORITHM, HEADERS, SIGNATURE];

/// Parse a cavage `Signature` header value (without any `Signature ` scheme prefix) into its parameters
///
/// Grammar: comma-separated `key="value"` pairs. Unknown keys are kept, repeats included.
/// Commas inside a quoted value belong to the value.
#[inline]
pub fn parse(input: &str) -> Result<SignatureParameters<'_>, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let kv_iter = ParseIter {
        inner: Token::parse(input),
        input,
        is_broken: false,
    };

    let mut pairs = Vec::new();
    for kv in kv_iter {
        let (span, key, value) = kv?;
        let is_unique = UNIQUE_PARAMETERS.iter().any(|name| *name == key);
        if is_unique && pairs.iter().any(|(existing, _)| *existing == key) {
            return Err(ParseError::DuplicateParameter { span: span.into() });
        }

        pairs.push((key, value));
    }

    Ok(pairs.into_iter().collect())
}
