//! Parsing of a single line of notation into a [Value].
//!
//! ## Modes
//! Level and catalog files in the wild carry tokens this parser knows nothing
//! about. In [ParseMode::Permissive] an unknown identifier or constructor call
//! evaluates to the integer `0` and anything following a complete expression is
//! ignored. [ParseMode::Strict] turns both into errors. Malformed numbers,
//! unterminated strings and unbalanced brackets are errors in both modes.

use glam::DVec2;
use log::debug;
use thiserror::Error;

use crate::lexer::{Lexer, Spanned, Token};
use crate::ser::stringify;
use crate::value::{Color, Map, Rect, Scalar, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    #[default]
    Permissive,
    Strict,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Malformed number {found:?} at {at}")]
    InvalidNumber { at: usize, found: String },
    #[error("Unterminated string at {at}: {found:?}")]
    UnterminatedString { at: usize, found: String },
    #[error("Bracket opened at {at} is never closed")]
    UnmatchedBracket { at: usize },
    #[error("Unexpected {found:?} at {at}")]
    UnexpectedToken { at: usize, found: String },
    #[error("Unexpected end of input")]
    UnexpectedEnd,
    #[error("Unknown identifier {found:?} at {at}")]
    UnknownIdentifier { at: usize, found: String },
    #[error("Bad arguments for {name}() at {at}")]
    BadArguments { at: usize, name: String },
    #[error("Trailing input at {at}: {found:?}")]
    TrailingInput { at: usize, found: String },
}

/// Parses `src` in [ParseMode::Permissive].
pub fn parse(src: &str) -> Result<Value, ParseError> {
    parse_with(src, ParseMode::Permissive)
}

pub fn parse_with(src: &str, mode: ParseMode) -> Result<Value, ParseError> {
    let mut parser = Parser::new(src, mode)?;
    parser.parse_document()
}

pub struct Parser<'a> {
    src: &'a str,
    lexer: Lexer<'a>,
    current: Spanned,
    mode: ParseMode,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str, mode: ParseMode) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(src);
        let current = lexer.next_token()?;
        Ok(Self {
            src,
            lexer,
            current,
            mode,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn unexpected(&self) -> ParseError {
        match self.current.token {
            Token::Eof => ParseError::UnexpectedEnd,
            _ => ParseError::UnexpectedToken {
                at: self.current.start,
                found: self.src[self.current.start..self.current.end].to_string(),
            },
        }
    }

    fn expect(&mut self, t: Token) -> Result<(), ParseError> {
        if self.current.token != t {
            return Err(self.unexpected());
        }
        self.advance()
    }

    fn is_strict(&self) -> bool {
        self.mode == ParseMode::Strict
    }

    pub fn parse_document(&mut self) -> Result<Value, ParseError> {
        let value = self.parse_expression()?;
        if self.current.token != Token::Eof {
            if self.is_strict() {
                return Err(ParseError::TrailingInput {
                    at: self.current.start,
                    found: self.src[self.current.start..].to_string(),
                });
            }
            debug!("Ignoring trailing input at {}", self.current.start);
        }
        Ok(value)
    }

    fn parse_expression(&mut self) -> Result<Value, ParseError> {
        let first = self.parse_atom()?;
        self.parse_concat(first)
    }

    /// Continues an expression whose first atom is already parsed.
    fn parse_concat(&mut self, first: Value) -> Result<Value, ParseError> {
        if !matches!(self.current.token, Token::Amp | Token::AmpAmp) {
            return Ok(first);
        }

        let mut out = stringify(&first);
        loop {
            let spaced = match self.current.token {
                Token::Amp => false,
                Token::AmpAmp => true,
                _ => break,
            };
            self.advance()?;
            let next = self.parse_atom()?;
            if spaced {
                out.push(' ');
            }
            out.push_str(&stringify(&next));
        }
        Ok(Value::from(out))
    }

    fn parse_atom(&mut self) -> Result<Value, ParseError> {
        match self.current.token.clone() {
            Token::Int(i) => {
                self.advance()?;
                Ok(Value::from(i))
            }
            Token::Float(f) => {
                self.advance()?;
                Ok(Value::from(f))
            }
            Token::Minus => {
                self.advance()?;
                match self.current.token {
                    Token::Int(i) => {
                        self.advance()?;
                        Ok(Value::from(-i))
                    }
                    Token::Float(f) => {
                        self.advance()?;
                        Ok(Value::from(-f))
                    }
                    _ => Err(self.unexpected()),
                }
            }
            Token::Str(s) => {
                self.advance()?;
                Ok(Value::from(s))
            }
            Token::Symbol(s) => {
                self.advance()?;
                Ok(Value::from(s))
            }
            Token::LBracket => self.parse_list_or_map(),
            Token::LParen => {
                self.advance()?;
                let inner = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) => self.parse_ident(name),
            Token::Unknown(c) => {
                if self.is_strict() {
                    return Err(self.unexpected());
                }
                debug!("Unknown character {c:?} parsed as 0");
                self.advance()?;
                Ok(Value::void())
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_ident(&mut self, name: String) -> Result<Value, ParseError> {
        let at = self.current.start;
        self.advance()?;

        if self.current.token == Token::LParen {
            let args = self.parse_args(at)?;
            return self.construct(at, &name, args);
        }

        if let Some(value) = named_constant(&name) {
            return Ok(value);
        }
        if self.is_strict() {
            return Err(ParseError::UnknownIdentifier { at, found: name });
        }
        debug!("Unknown identifier {name:?} parsed as 0");
        Ok(Value::void())
    }

    fn parse_args(&mut self, open_at: usize) -> Result<Vec<Value>, ParseError> {
        self.expect(Token::LParen)?;
        let mut args = Vec::new();
        if self.current.token == Token::RParen {
            self.advance()?;
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            match self.current.token {
                Token::Comma => self.advance()?,
                Token::RParen => {
                    self.advance()?;
                    return Ok(args);
                }
                Token::Eof => return Err(ParseError::UnmatchedBracket { at: open_at }),
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn construct(&self, at: usize, name: &str, args: Vec<Value>) -> Result<Value, ParseError> {
        let nums = args.iter().map(Value::as_f64).collect::<Option<Vec<_>>>();
        let value = match (name.to_ascii_lowercase().as_str(), nums.as_deref()) {
            ("point", Some(&[x, y])) => Some(Value::from(DVec2::new(x, y))),
            ("color", Some(&[r, g, b])) => Some(Value::from(Color::from_rgb255(r, g, b))),
            ("rect", Some(&[x0, y0, x1, y1])) => Some(Value::from(Rect::new(
                DVec2::new(x0, y0),
                DVec2::new(x1, y1),
            ))),
            ("point" | "color" | "rect", _) => {
                return Err(ParseError::BadArguments {
                    at,
                    name: name.to_string(),
                });
            }
            _ => None,
        };

        match value {
            Some(value) => Ok(value),
            None if self.is_strict() => Err(ParseError::UnknownIdentifier {
                at,
                found: name.to_string(),
            }),
            None => {
                debug!("Unknown constructor {name:?} parsed as 0");
                Ok(Value::void())
            }
        }
    }

    fn parse_list_or_map(&mut self) -> Result<Value, ParseError> {
        let open_at = self.current.start;
        self.expect(Token::LBracket)?;

        match self.current.token.clone() {
            Token::RBracket => {
                self.advance()?;
                Ok(Value::List(Vec::new()))
            }
            Token::Colon => {
                self.advance()?;
                self.close(open_at)?;
                Ok(Value::Map(Map::new()))
            }
            Token::Symbol(first) => {
                self.advance()?;
                if self.current.token == Token::Colon {
                    self.advance()?;
                    self.parse_map_rest(open_at, first)
                } else {
                    let first = self.parse_concat(Value::from(first))?;
                    self.parse_list_rest(open_at, first)
                }
            }
            _ => {
                let first = self.parse_expression()?;
                if self.current.token == Token::Colon {
                    if let Some(key) = first.as_str().map(str::to_string) {
                        self.advance()?;
                        return self.parse_map_rest(open_at, key);
                    }
                }
                self.parse_list_rest(open_at, first)
            }
        }
    }

    /// Keys are symbols or string expressions such as `"a" & QUOTE`.
    fn parse_key(&mut self, open_at: usize) -> Result<String, ParseError> {
        let at = self.current.start;
        match self.current.token.clone() {
            Token::Symbol(key) => {
                self.advance()?;
                Ok(key)
            }
            Token::Eof => Err(ParseError::UnmatchedBracket { at: open_at }),
            _ => {
                let key = self.parse_expression()?;
                match key.as_str() {
                    Some(key) => Ok(key.to_string()),
                    None => Err(ParseError::UnexpectedToken {
                        at,
                        found: self.src[at..self.current.start].trim_end().to_string(),
                    }),
                }
            }
        }
    }

    fn close(&mut self, open_at: usize) -> Result<(), ParseError> {
        match self.current.token {
            Token::RBracket => self.advance(),
            Token::Eof => Err(ParseError::UnmatchedBracket { at: open_at }),
            _ => Err(self.unexpected()),
        }
    }

    /// Whether the list/map element that was just parsed is followed by
    /// another one.
    fn next_element(&mut self, open_at: usize) -> Result<bool, ParseError> {
        match self.current.token {
            Token::Comma => {
                self.advance()?;
                Ok(true)
            }
            _ => {
                self.close(open_at)?;
                Ok(false)
            }
        }
    }

    fn parse_list_rest(&mut self, open_at: usize, first: Value) -> Result<Value, ParseError> {
        let mut items = vec![first];
        while self.next_element(open_at)? {
            items.push(self.parse_expression()?);
        }
        Ok(Value::List(items))
    }

    fn parse_map_rest(&mut self, open_at: usize, first_key: String) -> Result<Value, ParseError> {
        let mut map = Map::new();
        let value = self.parse_expression()?;
        map.set(first_key, value);

        while self.next_element(open_at)? {
            let key = self.parse_key(open_at)?;
            self.expect(Token::Colon)?;
            let value = self.parse_expression()?;
            map.set(key, value);
        }
        Ok(Value::Map(map))
    }
}

fn named_constant(name: &str) -> Option<Value> {
    let value = match name.to_ascii_uppercase().as_str() {
        "QUOTE" => Value::from("\""),
        "TAB" => Value::from("\t"),
        "RETURN" => Value::from("\r"),
        "NEWLINE" => Value::from("\n"),
        "SPACE" => Value::from(" "),
        "BACKSPACE" => Value::from("\u{8}"),
        "EMPTY" => Value::from(""),
        "PI" => Value::from(std::f64::consts::PI),
        "VOID" | "FALSE" => Value::Scalar(Scalar::Int(0)),
        "TRUE" => Value::Scalar(Scalar::Int(1)),
        _ => return None,
    };
    Some(value)
}
