use crate::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Int(i32),
    Float(f64),
    Str(String),
    /// `#name`
    Symbol(String),
    Ident(String),

    LBracket, // [
    RBracket, // ]
    LParen,   // (
    RParen,   // )
    Comma,    // ,
    Colon,    // :
    Amp,      // &
    AmpAmp,   // &&
    Minus,    // -

    /// A character the grammar has no use for.
    Unknown(char),
    Eof,
}

/// A token together with the byte range it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub start: usize,
    pub end: usize,
}

#[derive(Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    chars: std::str::CharIndices<'a>,
    peek: Option<(usize, char)>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        let mut chars = src.char_indices();
        let peek = chars.next();
        Self { src, chars, peek }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let cur = self.peek;
        self.peek = self.chars.next();
        cur
    }

    fn offset(&self) -> usize {
        self.peek.map(|(at, _)| at).unwrap_or(self.src.len())
    }

    fn peek_char(&self) -> Option<char> {
        self.peek.map(|(_, c)| c)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek_char(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) {
        while matches!(self.peek_char(), Some(c) if pred(c)) {
            self.bump();
        }
    }

    pub fn next_token(&mut self) -> Result<Spanned, ParseError> {
        self.skip_ws();

        let Some((start, c)) = self.bump() else {
            let at = self.src.len();
            return Ok(Spanned {
                token: Token::Eof,
                start: at,
                end: at,
            });
        };

        let token = match c {
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            ':' => Token::Colon,
            '-' => Token::Minus,
            '&' => {
                if self.peek_char() == Some('&') {
                    self.bump();
                    Token::AmpAmp
                } else {
                    Token::Amp
                }
            }

            '"' => {
                let body_start = self.offset();
                loop {
                    match self.bump() {
                        Some((at, '"')) => break Token::Str(self.src[body_start..at].to_string()),
                        Some(_) => continue,
                        None => {
                            return Err(ParseError::UnterminatedString {
                                at: start,
                                found: self.src[start..].to_string(),
                            });
                        }
                    }
                }
            }

            '#' => {
                let name_start = self.offset();
                self.take_while(is_ident_char);
                let name = &self.src[name_start..self.offset()];
                if name.is_empty() {
                    Token::Unknown('#')
                } else {
                    Token::Symbol(name.to_string())
                }
            }

            c if c.is_ascii_digit() || c == '.' => {
                self.take_while(|p| p.is_ascii_digit() || p == '.' || p.is_ascii_alphabetic());
                let text = &self.src[start..self.offset()];
                parse_number(text).ok_or_else(|| ParseError::InvalidNumber {
                    at: start,
                    found: text.to_string(),
                })?
            }

            c if c.is_alphabetic() || c == '_' => {
                self.take_while(is_ident_char);
                Token::Ident(self.src[start..self.offset()].to_string())
            }

            c => Token::Unknown(c),
        };

        Ok(Spanned {
            token,
            start,
            end: self.offset(),
        })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Integers are digit runs that fit into `i32`. Everything else with at most
/// one decimal point is a float.
fn parse_number(text: &str) -> Option<Token> {
    if !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    if text.chars().filter(|c| *c == '.').count() > 1 || text == "." {
        return None;
    }
    if !text.contains('.') {
        if let Ok(i) = text.parse::<i32>() {
            return Some(Token::Int(i));
        }
    }
    text.parse::<f64>().ok().map(Token::Float)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap().token;
            if tok == Token::Eof {
                break;
            }
            out.push(tok);
        }
        out
    }

    #[test]
    fn numbers() {
        assert_eq!(tokens("12 1.5 .25"), [
            Token::Int(12),
            Token::Float(1.5),
            Token::Float(0.25)
        ]);
        assert_eq!(tokens("3000000000"), [Token::Float(3000000000.0)]);
    }

    #[test]
    fn bad_number() {
        let mut lexer = Lexer::new("1.2.3");
        assert!(matches!(
            lexer.next_token(),
            Err(ParseError::InvalidNumber { .. })
        ));
        let mut lexer = Lexer::new("12abc");
        assert!(matches!(
            lexer.next_token(),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn symbols_and_concat() {
        assert_eq!(tokens("#nm: \"a\" && QUOTE"), [
            Token::Symbol("nm".to_string()),
            Token::Colon,
            Token::Str("a".to_string()),
            Token::AmpAmp,
            Token::Ident("QUOTE".to_string()),
        ]);
    }

    #[test]
    fn unterminated_string() {
        let mut lexer = Lexer::new("\"abc");
        assert!(matches!(
            lexer.next_token(),
            Err(ParseError::UnterminatedString { at: 0, .. })
        ));
    }
}
