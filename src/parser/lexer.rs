//! Logos-based lexer for the R-like surface syntax.
//!
//! Produces every token, trivia included; the annotation pass folds trivia
//! into flags on the significant tokens. Concatenating the text of all raw
//! tokens reproduces the input exactly.

use logos::Logos;
use text_size::TextSize;

use super::token_kind::TokenKind;

/// A raw token with its kind, text, and byte offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, RawToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: RawToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match raw {
            Ok(t) => t.into(),
            Err(()) => TokenKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum RawToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"\r\n|\n|\r")]
    Newline,

    #[regex(r"#[^\n\r]*")]
    Comment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[\p{L}._][\p{L}\p{N}._]*")]
    Ident,

    // Back-quoted names may contain anything; `\\` escapes the back-quote
    #[regex(r"`([^`\\]|\\[\s\S])*`")]
    QuotedIdent,

    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?[Li]?")]
    #[regex(r"0[xX][0-9a-fA-F]+[Li]?", priority = 10)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?[Li]?", priority = 10)]
    Number,

    #[regex(r#""([^"\\]|\\[\s\S])*""#)]
    #[regex(r"'([^'\\]|\\[\s\S])*'")]
    String,

    // =========================================================================
    // MULTI-CHARACTER OPERATORS (longest match wins in logos)
    // =========================================================================
    #[token("<<-")]
    SuperLeftAssign,

    #[token("<-")]
    LeftAssign,

    #[token("->>")]
    SuperRightAssign,

    #[token("->")]
    RightAssign,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token(":::")]
    ColonColonColon,

    #[token("::")]
    ColonColon,

    #[token("**")]
    StarStar,

    // Anything between two '%' is a user operator (%%, %in%, %o%, ...)
    #[regex(r"%[^%\n\r]*%")]
    SpecialOp,

    #[token("[[")]
    LDbracket,

    #[token("]]")]
    RDbracket,

    // =========================================================================
    // SINGLE-CHARACTER TOKENS
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("!")]
    Bang,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token("%")]
    Percent,
    #[token(":")]
    Colon,
    #[token("~")]
    Tilde,
    #[token("?")]
    Question,
    #[token("$")]
    Dollar,
    #[token("@")]
    At,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("if")]
    IfKw,
    #[token("else")]
    ElseKw,
    #[token("for")]
    ForKw,
    #[token("while")]
    WhileKw,
    #[token("repeat")]
    RepeatKw,
    #[token("function")]
    FunctionKw,
    #[token("in")]
    InKw,
    #[token("break")]
    BreakKw,
    #[token("next")]
    NextKw,
    #[token("return")]
    ReturnKw,
    #[token("TRUE")]
    TrueKw,
    #[token("FALSE")]
    FalseKw,
    #[token("NULL")]
    NullKw,
    #[token("NA")]
    #[token("NA_integer_")]
    #[token("NA_real_")]
    #[token("NA_character_")]
    #[token("NA_complex_")]
    NaKw,
    #[token("Inf")]
    InfKw,
    #[token("NaN")]
    NanKw,
}

impl From<RawToken> for TokenKind {
    fn from(token: RawToken) -> Self {
        use RawToken::*;
        match token {
            Whitespace => TokenKind::WHITESPACE,
            Newline => TokenKind::NEWLINE,
            Comment => TokenKind::COMMENT,

            Ident | QuotedIdent => TokenKind::IDENT,
            Number => TokenKind::NUMBER,
            String => TokenKind::STRING,

            SuperLeftAssign => TokenKind::SUPER_LEFT_ASSIGN,
            LeftAssign => TokenKind::LEFT_ASSIGN,
            SuperRightAssign => TokenKind::SUPER_RIGHT_ASSIGN,
            RightAssign => TokenKind::RIGHT_ASSIGN,
            LtEq => TokenKind::LT_EQ,
            GtEq => TokenKind::GT_EQ,
            EqEq => TokenKind::EQ_EQ,
            BangEq => TokenKind::BANG_EQ,
            AmpAmp => TokenKind::AMP_AMP,
            PipePipe => TokenKind::PIPE_PIPE,
            ColonColonColon => TokenKind::COLON_COLON_COLON,
            ColonColon => TokenKind::COLON_COLON,
            StarStar => TokenKind::STAR_STAR,
            SpecialOp => TokenKind::SPECIAL_OP,
            LDbracket => TokenKind::L_DBRACKET,
            RDbracket => TokenKind::R_DBRACKET,

            LParen => TokenKind::L_PAREN,
            RParen => TokenKind::R_PAREN,
            LBrace => TokenKind::L_BRACE,
            RBrace => TokenKind::R_BRACE,
            LBracket => TokenKind::L_BRACKET,
            RBracket => TokenKind::R_BRACKET,
            Comma => TokenKind::COMMA,
            Semicolon => TokenKind::SEMICOLON,
            Eq => TokenKind::EQ,
            Lt => TokenKind::LT,
            Gt => TokenKind::GT,
            Amp => TokenKind::AMP,
            Pipe => TokenKind::PIPE,
            Bang => TokenKind::BANG,
            Plus => TokenKind::PLUS,
            Minus => TokenKind::MINUS,
            Star => TokenKind::STAR,
            Slash => TokenKind::SLASH,
            Caret => TokenKind::CARET,
            Percent => TokenKind::PERCENT,
            Colon => TokenKind::COLON,
            Tilde => TokenKind::TILDE,
            Question => TokenKind::QUESTION,
            Dollar => TokenKind::DOLLAR,
            At => TokenKind::AT,

            IfKw => TokenKind::IF_KW,
            ElseKw => TokenKind::ELSE_KW,
            ForKw => TokenKind::FOR_KW,
            WhileKw => TokenKind::WHILE_KW,
            RepeatKw => TokenKind::REPEAT_KW,
            FunctionKw => TokenKind::FUNCTION_KW,
            InKw => TokenKind::IN_KW,
            BreakKw => TokenKind::BREAK_KW,
            NextKw => TokenKind::NEXT_KW,
            ReturnKw => TokenKind::RETURN_KW,
            TrueKw => TokenKind::TRUE_KW,
            FalseKw => TokenKind::FALSE_KW,
            NullKw => TokenKind::NULL_KW,
            NaKw => TokenKind::NA_KW,
            InfKw => TokenKind::INF_KW,
            NanKw => TokenKind::NAN_KW,
        }
    }
}
