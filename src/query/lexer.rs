use crate::error::{Result, SearchError};
use std::fmt;

/// Binary operator of the query language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `&` - documents matching both sides
    And,
    /// `|` - documents matching either side
    Or,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::And => '&',
            Operator::Or => '|',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Lexical token of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LParen,
    RParen,
    BinOp(Operator),
    /// Maximal run of alphanumeric characters within one chunk
    Literal(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::BinOp(op) => write!(f, "{}", op),
            Token::Literal(text) => write!(f, "{}", text),
        }
    }
}

/// Convert raw argument chunks into a flat token stream.
///
/// Chunk boundaries always end a literal: `["ab", "cd"]` yields two literals.
/// Any character that is not alphanumeric and not one of `(`, `)`, `|`, `&`
/// rejects the whole query with [`SearchError::InvalidChunk`].
pub fn tokenize<I, S>(chunks: I) -> Result<Vec<Token>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens = Vec::new();
    for chunk in chunks {
        tokenize_chunk(chunk.as_ref(), &mut tokens)?;
    }
    Ok(tokens)
}

fn tokenize_chunk(chunk: &str, tokens: &mut Vec<Token>) -> Result<()> {
    let mut literal = String::new();

    for ch in chunk.chars() {
        let structural = match ch {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '&' => Some(Token::BinOp(Operator::And)),
            '|' => Some(Token::BinOp(Operator::Or)),
            c if c.is_alphanumeric() => {
                literal.push(c);
                None
            }
            _ => return Err(SearchError::InvalidChunk(chunk.to_string())),
        };

        if let Some(token) = structural {
            flush_literal(&mut literal, tokens);
            tokens.push(token);
        }
    }

    flush_literal(&mut literal, tokens);
    Ok(())
}

fn flush_literal(literal: &mut String, tokens: &mut Vec<Token>) {
    if !literal.is_empty() {
        tokens.push(Token::Literal(std::mem::take(literal)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Token {
        Token::Literal(s.to_string())
    }

    #[test]
    fn test_structural_characters_split_literals() {
        let tokens = tokenize(["(butter", "|", "potato)", "&", "salt"]).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                lit("butter"),
                Token::BinOp(Operator::Or),
                lit("potato"),
                Token::RParen,
                Token::BinOp(Operator::And),
                lit("salt"),
            ]
        );
    }

    #[test]
    fn test_single_chunk_expression() {
        let tokens = tokenize(["a&(b|c)"]).unwrap();
        assert_eq!(tokens.len(), 7);
        assert_eq!(tokens[0], lit("a"));
        assert_eq!(tokens[6], Token::RParen);
    }

    #[test]
    fn test_chunk_boundary_is_token_boundary() {
        let tokens = tokenize(["to", "mato"]).unwrap();
        assert_eq!(tokens, vec![lit("to"), lit("mato")]);
    }

    #[test]
    fn test_invalid_chunk_named() {
        match tokenize(["ok", "bad-chunk"]) {
            Err(SearchError::InvalidChunk(chunk)) => assert_eq!(chunk, "bad-chunk"),
            other => panic!("expected InvalidChunk, got {other:?}"),
        }
    }

    #[test]
    fn test_whitespace_is_invalid() {
        assert!(matches!(tokenize(["a b"]), Err(SearchError::InvalidChunk(_))));
    }

    #[test]
    fn test_empty_chunks() {
        assert!(tokenize(["", ""]).unwrap().is_empty());
        assert!(tokenize(Vec::<String>::new()).unwrap().is_empty());
    }

    #[test]
    fn test_unicode_alphanumerics() {
        assert_eq!(tokenize(["café42"]).unwrap(), vec![lit("café42")]);
    }

    #[test]
    fn test_display() {
        let rendered: Vec<String> = tokenize(["(a|b)&c"])
            .unwrap()
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(rendered.concat(), "(a|b)&c");
    }
}
