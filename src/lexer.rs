use crate::token::{Span, Token, TokenKind};

pub mod error;

pub use self::error::{LexError, LexResult};

/// Byte-cursor tokenizer over a single source buffer.
///
/// The lexer never fails outright: unrecognised input produces an
/// [`TokenKind::Illegal`] token and latches the first [`LexError`]. Callers stop
/// consuming after an `Illegal` or `EOF` token.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    cursor: usize,
    line: usize,
    line_start: usize,
    error: Option<LexError>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: 0,
            line: 0,
            line_start: 0,
            error: None,
            finished: false,
        }
    }

    pub fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<LexError> {
        self.error.take()
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.cursor;
        let line = self.line;
        let column = self.cursor - self.line_start;

        let Some(byte) = self.peek_byte() else {
            return Token::new(
                TokenKind::EOF,
                "",
                Span {
                    start,
                    end: start,
                    line,
                    column,
                },
            );
        };

        match byte {
            b if b.is_ascii_alphabetic() || b == b'_' => self.read_identifier(start, line, column),
            b if b.is_ascii_digit() => self.read_number(start, line, column),
            b'"' => self.read_string(start, line, column),
            _ => self.read_symbol(start, line, column),
        }
    }

    /// Drain the buffer, returning every token up to and including the first
    /// `EOF` or `Illegal` one.
    pub fn lex_all(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    fn read_identifier(&mut self, start: usize, line: usize, column: usize) -> Token {
        while let Some(b) = self.peek_byte() {
            if b.is_ascii_alphabetic() || b == b'_' {
                self.cursor += 1;
            } else {
                break;
            }
        }

        let word = &self.input[start..self.cursor];
        let kind = match TokenKind::keyword(word) {
            Some(TokenKind::Else) => return self.read_else(start, line, column),
            Some(kind) => kind,
            None => TokenKind::Name,
        };
        Token::new(kind, word, self.span(start, line, column))
    }

    /// `else` followed by `if` becomes a single `ElseIf` token. Only the next
    /// word is scanned, so a miss leaves the lexer untouched.
    fn read_else(&mut self, start: usize, line: usize, column: usize) -> Token {
        let bytes = self.input.as_bytes();
        let mut word_start = self.cursor;
        while bytes
            .get(word_start)
            .is_some_and(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
        {
            word_start += 1;
        }
        let mut word_end = word_start;
        while bytes
            .get(word_end)
            .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_')
        {
            word_end += 1;
        }

        if &self.input[word_start..word_end] == "if" {
            self.skip_whitespace();
            self.cursor = word_end;
            return Token::new(TokenKind::ElseIf, "else if", self.span(start, line, column));
        }
        Token::new(TokenKind::Else, "else", self.span(start, line, column))
    }

    fn read_number(&mut self, start: usize, line: usize, column: usize) -> Token {
        while let Some(b) = self.peek_byte() {
            if b.is_ascii_digit() {
                self.cursor += 1;
            } else {
                break;
            }
        }
        Token::new(
            TokenKind::Number,
            &self.input[start..self.cursor],
            self.span(start, line, column),
        )
    }

    fn read_string(&mut self, start: usize, line: usize, column: usize) -> Token {
        self.cursor += 1; // opening quote
        let content_start = self.cursor;
        while let Some(b) = self.peek_byte() {
            match b {
                b'"' => {
                    let content = &self.input[content_start..self.cursor];
                    self.cursor += 1;
                    return Token::new(TokenKind::String, content, self.span(start, line, column));
                }
                b'\n' => break,
                _ => self.cursor += 1,
            }
        }

        self.record(LexError::UnterminatedString { line, column });
        Token::new(
            TokenKind::Illegal,
            &self.input[start..self.cursor],
            self.span(start, line, column),
        )
    }

    fn read_symbol(&mut self, start: usize, line: usize, column: usize) -> Token {
        let Some(ch) = self.input[start..].chars().next() else {
            return Token::new(TokenKind::EOF, "", self.span(start, line, column));
        };
        self.cursor += ch.len_utf8();

        let kind = match ch {
            '=' => self.select(b'=', TokenKind::Eq, TokenKind::Assign),
            '!' => self.select(b'=', TokenKind::NotEq, TokenKind::Bang),
            '<' => self.select(b'=', TokenKind::LessEq, TokenKind::Less),
            '>' => self.select(b'=', TokenKind::GreaterEq, TokenKind::Greater),
            '+' => self.select(b'=', TokenKind::PlusAssign, TokenKind::Plus),
            '-' => self.select(b'=', TokenKind::MinusAssign, TokenKind::Minus),
            '*' => self.select(b'=', TokenKind::StarAssign, TokenKind::Star),
            '/' => self.select(b'=', TokenKind::SlashAssign, TokenKind::Slash),
            '&' => self.select(b'&', TokenKind::AmpAmp, TokenKind::Amp),
            '|' => self.select(b'|', TokenKind::PipePipe, TokenKind::Pipe),
            ';' => TokenKind::Semi,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            _ => {
                self.record(LexError::IllegalCharacter {
                    character: ch,
                    line,
                    column,
                });
                TokenKind::Illegal
            }
        };

        Token::new(
            kind,
            &self.input[start..self.cursor],
            self.span(start, line, column),
        )
    }

    /// One-character lookahead for two-character operators.
    fn select(&mut self, expected: u8, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek_byte() == Some(expected) {
            self.cursor += 1;
            matched
        } else {
            single
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek_byte() {
            match b {
                b'\n' => {
                    self.cursor += 1;
                    self.line += 1;
                    self.line_start = self.cursor;
                }
                b' ' | b'\t' | b'\r' => self.cursor += 1,
                _ => break,
            }
        }
    }

    fn record(&mut self, error: LexError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.cursor).copied()
    }

    fn span(&self, start: usize, line: usize, column: usize) -> Span {
        Span {
            start,
            end: self.cursor,
            line,
            column,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.kind.is_terminal();
        Some(token)
    }
}

/// Lex a whole buffer, failing with the first recorded error.
pub fn tokenize(input: &str) -> LexResult<Vec<Token>> {
    let mut lexer = Lexer::new(input);
    let tokens = lexer.lex_all();
    match lexer.take_error() {
        Some(error) => Err(error),
        None => Ok(tokens),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(Token::kind).collect()
    }

    fn positions(tokens: &[Token]) -> Vec<(usize, usize)> {
        tokens
            .iter()
            .map(|token| (token.line(), token.column()))
            .collect()
    }

    #[test]
    fn lexes_a_declaration() {
        let tokens = tokenize("let a = 9;").expect("tokenize should succeed");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Let,
                TokenKind::Name,
                TokenKind::Assign,
                TokenKind::Number,
                TokenKind::Semi,
                TokenKind::EOF,
            ]
        );
        let literals = tokens
            .iter()
            .map(|token| token.literal.as_str())
            .collect::<Vec<_>>();
        assert_eq!(literals, vec!["let", "a", "=", "9", ";", ""]);
        assert_eq!(
            positions(&tokens[..5]),
            vec![(0, 0), (0, 4), (0, 6), (0, 8), (0, 9)]
        );
    }

    #[test]
    fn tracks_lines_and_columns_across_newlines() {
        let source = indoc! {"
            func add(a, b) {
                return a + b;
            }"};
        let tokens = tokenize(source).expect("tokenize should succeed");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Func,
                TokenKind::Name,
                TokenKind::LParen,
                TokenKind::Name,
                TokenKind::Comma,
                TokenKind::Name,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::Return,
                TokenKind::Name,
                TokenKind::Plus,
                TokenKind::Name,
                TokenKind::Semi,
                TokenKind::RBrace,
                TokenKind::EOF,
            ]
        );
        assert_eq!(
            positions(&tokens[..14]),
            vec![
                (0, 0),
                (0, 5),
                (0, 8),
                (0, 9),
                (0, 10),
                (0, 12),
                (0, 13),
                (0, 15),
                (1, 4),
                (1, 11),
                (1, 13),
                (1, 15),
                (1, 16),
                (2, 0),
            ]
        );
    }

    #[test]
    fn distinguishes_single_and_double_character_operators() {
        let tokens = tokenize("a == b = c != !d <= < >= > += + -= - *= * /= / && & || |")
            .expect("tokenize should succeed");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Name,
                TokenKind::Eq,
                TokenKind::Name,
                TokenKind::Assign,
                TokenKind::Name,
                TokenKind::NotEq,
                TokenKind::Bang,
                TokenKind::Name,
                TokenKind::LessEq,
                TokenKind::Less,
                TokenKind::GreaterEq,
                TokenKind::Greater,
                TokenKind::PlusAssign,
                TokenKind::Plus,
                TokenKind::MinusAssign,
                TokenKind::Minus,
                TokenKind::StarAssign,
                TokenKind::Star,
                TokenKind::SlashAssign,
                TokenKind::Slash,
                TokenKind::AmpAmp,
                TokenKind::Amp,
                TokenKind::PipePipe,
                TokenKind::Pipe,
                TokenKind::EOF,
            ]
        );
    }

    #[test]
    fn fuses_else_if_into_one_token() {
        let tokens = tokenize("if true { return; } else if false { return; } else {}")
            .expect("tokenize should succeed");
        let else_if = &tokens[6];
        assert_eq!(else_if.kind, TokenKind::ElseIf);
        assert_eq!(else_if.literal, "else if");
        assert_eq!((else_if.line(), else_if.column()), (0, 20));
        assert_eq!(tokens[7].kind, TokenKind::False);
        assert_eq!((tokens[7].line(), tokens[7].column()), (0, 28));
        assert_eq!(tokens[12].kind, TokenKind::Else);
        assert_eq!(tokens[13].kind, TokenKind::LBrace);
    }

    #[test]
    fn long_runs_of_else_lex_one_token_each() {
        let source = "else ".repeat(50_000);
        let tokens = tokenize(&source).expect("tokenize should succeed");
        assert_eq!(tokens.len(), 50_001);
        assert!(tokens[..50_000].iter().all(|t| t.kind == TokenKind::Else));
        assert_eq!(tokens[50_000].kind, TokenKind::EOF);

        let mut lexer = Lexer::new(&source);
        assert_eq!(lexer.next_token().kind, TokenKind::Else);
    }

    #[test]
    fn else_fuses_only_with_the_whole_word_if() {
        let tokens = tokenize("else iffy else\n  if x").expect("tokenize should succeed");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Else,
                TokenKind::Name,
                TokenKind::ElseIf,
                TokenKind::Name,
                TokenKind::EOF,
            ]
        );
        assert_eq!(tokens[1].literal, "iffy");
        assert_eq!((tokens[2].line(), tokens[2].column()), (0, 10));
        assert_eq!((tokens[3].line(), tokens[3].column()), (1, 5));
    }

    #[test]
    fn else_at_end_of_input_stays_plain() {
        let tokens = tokenize("else").expect("tokenize should succeed");
        assert_eq!(kinds(&tokens), vec![TokenKind::Else, TokenKind::EOF]);
    }

    #[test]
    fn lexes_strings_arrays_and_keywords() {
        let tokens = tokenize("for x in [1, 2] { print(\"hi there\") }")
            .expect("tokenize should succeed");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::For,
                TokenKind::Name,
                TokenKind::In,
                TokenKind::LBracket,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::RBracket,
                TokenKind::LBrace,
                TokenKind::Name,
                TokenKind::LParen,
                TokenKind::String,
                TokenKind::RParen,
                TokenKind::RBrace,
                TokenKind::EOF,
            ]
        );
        assert_eq!(tokens[11].literal, "hi there");
    }

    #[test]
    fn identifiers_stop_at_digits() {
        let tokens = tokenize("my_var2").expect("tokenize should succeed");
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Name, TokenKind::Number, TokenKind::EOF]
        );
        assert_eq!(tokens[0].literal, "my_var");
    }

    #[test]
    fn empty_and_blank_input_yield_only_eof() {
        assert_eq!(kinds(&tokenize("").unwrap()), vec![TokenKind::EOF]);
        assert_eq!(kinds(&tokenize(" \n\t ").unwrap()), vec![TokenKind::EOF]);
    }

    #[test]
    fn errors_on_illegal_character_with_position() {
        let err = tokenize("let a = 1;\nlet b = a @ 2;").expect_err("expected lexing failure");
        assert_eq!(err.message(), "Illegal character");
        assert_eq!((err.line(), err.column()), (1, 10));
        assert!(err.to_string().contains("'@'"));
        assert!(err.to_string().contains("line 2, column 11"));
    }

    #[test]
    fn lex_all_stops_at_the_illegal_token() {
        let mut lexer = Lexer::new("a # b");
        let tokens = lexer.lex_all();
        assert_eq!(kinds(&tokens), vec![TokenKind::Name, TokenKind::Illegal]);
        assert_eq!(tokens[1].literal, "#");
        assert!(lexer.error().is_some());
    }

    #[test]
    fn first_error_wins() {
        let mut lexer = Lexer::new("@ $");
        assert_eq!(lexer.next_token().kind, TokenKind::Illegal);
        assert_eq!(lexer.next_token().kind, TokenKind::Illegal);
        assert_eq!(
            lexer.error(),
            Some(&LexError::IllegalCharacter {
                character: '@',
                line: 0,
                column: 0,
            })
        );
    }

    #[test]
    fn errors_on_unterminated_string() {
        let err = tokenize("print(\"oops)\n").expect_err("expected lexing failure");
        assert_eq!(err, LexError::UnterminatedString { line: 0, column: 6 });
    }

    #[test]
    fn non_ascii_characters_are_illegal() {
        let err = tokenize("let é = 1").expect_err("expected lexing failure");
        assert_eq!(
            err,
            LexError::IllegalCharacter {
                character: 'é',
                line: 0,
                column: 4,
            }
        );
    }
}
