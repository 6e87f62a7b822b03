//! Token kinds for the R-like surface syntax.
//!
//! A single flat enum covers trivia, literals, operators, delimiters, and
//! keywords. Tokens are leaves; there are no composite nodes because the
//! parser never builds a syntax tree.

/// All token kinds in the analyzed language
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA (folded into the next significant token's flags)
    // =========================================================================
    WHITESPACE = 0,
    NEWLINE,
    COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,   // foo, .x, ..., `quoted name`
    NUMBER,  // 42, 3.14, 1e5, 0xFF, 2L, 1i
    STRING,  // "text" or 'text'

    // =========================================================================
    // DELIMITERS
    // =========================================================================
    L_PAREN,    // (
    R_PAREN,    // )
    L_BRACE,    // {
    R_BRACE,    // }
    L_BRACKET,  // [
    R_BRACKET,  // ]
    L_DBRACKET, // [[
    R_DBRACKET, // ]]

    // =========================================================================
    // SEPARATORS
    // =========================================================================
    COMMA,     // ,
    SEMICOLON, // ;

    // =========================================================================
    // OPERATORS
    // =========================================================================
    LEFT_ASSIGN,        // <-
    SUPER_LEFT_ASSIGN,  // <<-
    RIGHT_ASSIGN,       // ->
    SUPER_RIGHT_ASSIGN, // ->>
    EQ,                 // =
    EQ_EQ,              // ==
    BANG_EQ,            // !=
    LT,                 // <
    GT,                 // >
    LT_EQ,              // <=
    GT_EQ,              // >=
    AMP,                // &
    AMP_AMP,            // &&
    PIPE,               // |
    PIPE_PIPE,          // ||
    BANG,               // !
    PLUS,               // +
    MINUS,              // -
    STAR,               // *
    STAR_STAR,          // ** (exponent alias)
    SLASH,              // /
    CARET,              // ^
    PERCENT,            // %
    SPECIAL_OP,         // %op% user operators, %in%, %%
    COLON,              // :
    COLON_COLON,        // ::
    COLON_COLON_COLON,  // :::
    TILDE,              // ~
    QUESTION,           // ?
    DOLLAR,             // $
    AT,                 // @

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    IF_KW,
    ELSE_KW,
    FOR_KW,
    WHILE_KW,
    REPEAT_KW,
    FUNCTION_KW,
    IN_KW,
    BREAK_KW,
    NEXT_KW,
    RETURN_KW,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,
    NA_KW,  // NA and the typed NA_*_ constants
    INF_KW,
    NAN_KW,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    ERROR, // unrecognized character
    EOF,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::WHITESPACE | TokenKind::NEWLINE | TokenKind::COMMENT
        )
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::IF_KW
                | TokenKind::ELSE_KW
                | TokenKind::FOR_KW
                | TokenKind::WHILE_KW
                | TokenKind::REPEAT_KW
                | TokenKind::FUNCTION_KW
                | TokenKind::IN_KW
                | TokenKind::BREAK_KW
                | TokenKind::NEXT_KW
                | TokenKind::RETURN_KW
                | TokenKind::TRUE_KW
                | TokenKind::FALSE_KW
                | TokenKind::NULL_KW
                | TokenKind::NA_KW
                | TokenKind::INF_KW
                | TokenKind::NAN_KW
        )
    }

    pub fn is_opening_delimiter(self) -> bool {
        matches!(
            self,
            TokenKind::L_PAREN
                | TokenKind::L_BRACE
                | TokenKind::L_BRACKET
                | TokenKind::L_DBRACKET
        )
    }

    pub fn is_closing_delimiter(self) -> bool {
        matches!(
            self,
            TokenKind::R_PAREN
                | TokenKind::R_BRACE
                | TokenKind::R_BRACKET
                | TokenKind::R_DBRACKET
        )
    }

    /// The matching delimiter for an opener or closer
    pub fn complement(self) -> Option<TokenKind> {
        match self {
            TokenKind::L_PAREN => Some(TokenKind::R_PAREN),
            TokenKind::R_PAREN => Some(TokenKind::L_PAREN),
            TokenKind::L_BRACE => Some(TokenKind::R_BRACE),
            TokenKind::R_BRACE => Some(TokenKind::L_BRACE),
            TokenKind::L_BRACKET => Some(TokenKind::R_BRACKET),
            TokenKind::R_BRACKET => Some(TokenKind::L_BRACKET),
            TokenKind::L_DBRACKET => Some(TokenKind::R_DBRACKET),
            TokenKind::R_DBRACKET => Some(TokenKind::L_DBRACKET),
            _ => None,
        }
    }

    /// Can a token of this kind end an expression?
    ///
    /// Used to decide whether a newline terminates a single-expression body
    /// and whether `+`/`-` are binary or unary.
    pub fn ends_expression(self) -> bool {
        matches!(
            self,
            TokenKind::IDENT
                | TokenKind::NUMBER
                | TokenKind::STRING
                | TokenKind::TRUE_KW
                | TokenKind::FALSE_KW
                | TokenKind::NULL_KW
                | TokenKind::NA_KW
                | TokenKind::INF_KW
                | TokenKind::NAN_KW
                | TokenKind::BREAK_KW
                | TokenKind::NEXT_KW
                | TokenKind::R_PAREN
                | TokenKind::R_BRACE
                | TokenKind::R_BRACKET
                | TokenKind::R_DBRACKET
        )
    }

    /// Operators that bind tightly and reject surrounding whitespace
    pub fn is_tight_operator(self) -> bool {
        matches!(
            self,
            TokenKind::COLON
                | TokenKind::COLON_COLON
                | TokenKind::COLON_COLON_COLON
                | TokenKind::DOLLAR
                | TokenKind::AT
        )
    }

    /// Binary operators that require whitespace on each side.
    ///
    /// `::`, `:::`, `:`, `$`, `@`, `^`, `?`, `!`, `~`, and unary `+`/`-` are
    /// exempt; `+`/`-` are filtered by the caller based on context.
    pub fn requires_surrounding_whitespace(self) -> bool {
        matches!(
            self,
            TokenKind::LEFT_ASSIGN
                | TokenKind::SUPER_LEFT_ASSIGN
                | TokenKind::RIGHT_ASSIGN
                | TokenKind::SUPER_RIGHT_ASSIGN
                | TokenKind::EQ
                | TokenKind::EQ_EQ
                | TokenKind::BANG_EQ
                | TokenKind::LT
                | TokenKind::GT
                | TokenKind::LT_EQ
                | TokenKind::GT_EQ
                | TokenKind::AMP
                | TokenKind::AMP_AMP
                | TokenKind::PIPE
                | TokenKind::PIPE_PIPE
                | TokenKind::PLUS
                | TokenKind::MINUS
                | TokenKind::STAR
                | TokenKind::STAR_STAR
                | TokenKind::SLASH
                | TokenKind::PERCENT
                | TokenKind::SPECIAL_OP
        )
    }
}

/// Convert a TokenKind to a human-readable name for error messages
pub fn kind_to_name(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::WHITESPACE => "whitespace",
        TokenKind::NEWLINE => "newline",
        TokenKind::COMMENT => "comment",

        TokenKind::IDENT => "identifier",
        TokenKind::NUMBER => "number",
        TokenKind::STRING => "string",

        TokenKind::L_PAREN => "'('",
        TokenKind::R_PAREN => "')'",
        TokenKind::L_BRACE => "'{'",
        TokenKind::R_BRACE => "'}'",
        TokenKind::L_BRACKET => "'['",
        TokenKind::R_BRACKET => "']'",
        TokenKind::L_DBRACKET => "'[['",
        TokenKind::R_DBRACKET => "']]'",

        TokenKind::COMMA => "','",
        TokenKind::SEMICOLON => "';'",

        TokenKind::LEFT_ASSIGN => "'<-'",
        TokenKind::SUPER_LEFT_ASSIGN => "'<<-'",
        TokenKind::RIGHT_ASSIGN => "'->'",
        TokenKind::SUPER_RIGHT_ASSIGN => "'->>'",
        TokenKind::EQ => "'='",
        TokenKind::EQ_EQ => "'=='",
        TokenKind::BANG_EQ => "'!='",
        TokenKind::LT => "'<'",
        TokenKind::GT => "'>'",
        TokenKind::LT_EQ => "'<='",
        TokenKind::GT_EQ => "'>='",
        TokenKind::AMP => "'&'",
        TokenKind::AMP_AMP => "'&&'",
        TokenKind::PIPE => "'|'",
        TokenKind::PIPE_PIPE => "'||'",
        TokenKind::BANG => "'!'",
        TokenKind::PLUS => "'+'",
        TokenKind::MINUS => "'-'",
        TokenKind::STAR => "'*'",
        TokenKind::STAR_STAR => "'**'",
        TokenKind::SLASH => "'/'",
        TokenKind::CARET => "'^'",
        TokenKind::PERCENT => "'%'",
        TokenKind::SPECIAL_OP => "special operator",
        TokenKind::COLON => "':'",
        TokenKind::COLON_COLON => "'::'",
        TokenKind::COLON_COLON_COLON => "':::'",
        TokenKind::TILDE => "'~'",
        TokenKind::QUESTION => "'?'",
        TokenKind::DOLLAR => "'$'",
        TokenKind::AT => "'@'",

        TokenKind::IF_KW => "'if'",
        TokenKind::ELSE_KW => "'else'",
        TokenKind::FOR_KW => "'for'",
        TokenKind::WHILE_KW => "'while'",
        TokenKind::REPEAT_KW => "'repeat'",
        TokenKind::FUNCTION_KW => "'function'",
        TokenKind::IN_KW => "'in'",
        TokenKind::BREAK_KW => "'break'",
        TokenKind::NEXT_KW => "'next'",
        TokenKind::RETURN_KW => "'return'",
        TokenKind::TRUE_KW => "'TRUE'",
        TokenKind::FALSE_KW => "'FALSE'",
        TokenKind::NULL_KW => "'NULL'",
        TokenKind::NA_KW => "'NA'",
        TokenKind::INF_KW => "'Inf'",
        TokenKind::NAN_KW => "'NaN'",

        TokenKind::ERROR => "unrecognized character",
        TokenKind::EOF => "end of document",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement_is_symmetric() {
        for kind in [
            TokenKind::L_PAREN,
            TokenKind::L_BRACE,
            TokenKind::L_BRACKET,
            TokenKind::L_DBRACKET,
        ] {
            let closer = kind.complement().unwrap();
            assert_eq!(closer.complement(), Some(kind));
            assert!(kind.is_opening_delimiter());
            assert!(closer.is_closing_delimiter());
        }
    }

    #[test]
    fn test_tight_operators_do_not_require_whitespace() {
        assert!(TokenKind::COLON_COLON.is_tight_operator());
        assert!(!TokenKind::COLON_COLON.requires_surrounding_whitespace());
        assert!(TokenKind::PLUS.requires_surrounding_whitespace());
        assert!(!TokenKind::CARET.requires_surrounding_whitespace());
        assert!(!TokenKind::TILDE.requires_surrounding_whitespace());
    }
}
