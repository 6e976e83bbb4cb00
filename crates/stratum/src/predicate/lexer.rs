use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Tok {
    Word(String),
    Str(String),
    Eq,
    Ne,
    Tilde,
    And,
    Or,
    Not,
    LParen,
    RParen,
}

pub(super) type Spanned = (usize, Tok, usize);

pub(super) struct Lexer<'input> {
    input: &'input str,
    pos: usize,
}

impl<'input> Lexer<'input> {
    pub(super) fn new(input: &'input str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn is_word_byte(b: u8) -> bool {
        !b.is_ascii_whitespace()
            && !matches!(b, b'(' | b')' | b'!' | b'=' | b'~' | b'&' | b'|' | b'"' | b'\'')
    }

    fn lex_punct(&mut self) -> Option<Tok> {
        const PUNCT: &[(&str, Tok)] = &[
            ("&&", Tok::And),
            ("||", Tok::Or),
            ("!=", Tok::Ne),
            ("==", Tok::Eq),
            ("=", Tok::Eq),
            ("~", Tok::Tilde),
            ("!", Tok::Not),
            ("(", Tok::LParen),
            (")", Tok::RParen),
        ];
        let (text, tok) = PUNCT.iter().find(|(text, _)| self.starts_with(text))?;
        self.pos += text.len();
        Some(tok.clone())
    }

    fn lex_str(&mut self, quote: u8) -> Result<Tok> {
        let start = self.pos;
        self.pos += 1;
        let Some(rel_end) = self.input[self.pos..].find(quote as char) else {
            return Err(Error::PredicateParse {
                offset: start,
                message: format!("unterminated string literal; missing '{}'", quote as char),
            });
        };
        let s = self.input[self.pos..self.pos + rel_end].to_string();
        self.pos += rel_end + 1;
        Ok(Tok::Str(s))
    }

    fn lex_word(&mut self) -> Option<Tok> {
        let start = self.pos;
        while self.peek().is_some_and(Self::is_word_byte) {
            self.pos += 1;
        }
        (self.pos > start).then(|| Tok::Word(self.input[start..self.pos].to_string()))
    }

    fn next_token(&mut self) -> Option<Result<Spanned>> {
        self.skip_ws();
        let start = self.pos;
        let b = self.peek()?;
        let tok = match b {
            b'"' | b'\'' => match self.lex_str(b) {
                Ok(tok) => tok,
                Err(err) => return Some(Err(err)),
            },
            _ => match self.lex_punct().or_else(|| self.lex_word()) {
                Some(tok) => tok,
                None => {
                    return Some(Err(Error::PredicateParse {
                        offset: start,
                        message: format!("unexpected character '{}'", b as char),
                    }));
                }
            },
        };
        Some(Ok((start, tok, self.pos)))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Spanned>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
