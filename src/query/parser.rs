use crate::error::{Result, SearchError};
use crate::query::lexer::{tokenize, Operator, Token};
use std::fmt;

/// Query AST node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryNode {
    /// Exact token lookup
    Literal(String),
    /// Set combination of two sub-queries
    BinaryOp {
        op: Operator,
        left: Box<QueryNode>,
        right: Box<QueryNode>,
    },
}

impl QueryNode {
    pub fn literal<S: Into<String>>(text: S) -> Self {
        QueryNode::Literal(text.into())
    }

    pub fn binary(op: Operator, left: QueryNode, right: QueryNode) -> Self {
        QueryNode::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryNode::Literal(text) => write!(f, "{}", text),
            QueryNode::BinaryOp { op, left, right } => write!(f, "({} {} {})", left, op, right),
        }
    }
}

/// Parse raw argument chunks into a query tree
pub fn parse_query<I, S>(chunks: I) -> Result<QueryNode>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse(tokenize(chunks)?)
}

/// Build a query tree from a token stream.
///
/// Parentheses are the only grouping mechanism. Every clause, including the
/// unparenthesized top level, must be a single operand or exactly
/// `operand OP operand`; `a & b & c` is rejected rather than chained.
pub fn parse(tokens: Vec<Token>) -> Result<QueryNode> {
    QueryParser::default().parse(tokens)
}

/// Entry of a paren level: either a finished sub-tree or an operator that
/// has not been combined yet
#[derive(Debug)]
enum Fragment {
    Node(QueryNode),
    Operator(Operator),
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Node(node) => write!(f, "{}", node),
            Fragment::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// Paren-level reduction parser
#[derive(Default)]
struct QueryParser {
    /// Fragments collected since the innermost unmatched `(`
    current: Vec<Fragment>,
    /// Enclosing levels, outermost first
    enclosing: Vec<Vec<Fragment>>,
}

impl QueryParser {
    fn parse(mut self, tokens: Vec<Token>) -> Result<QueryNode> {
        for token in tokens {
            match token {
                Token::LParen => {
                    let outer = std::mem::take(&mut self.current);
                    self.enclosing.push(outer);
                }
                Token::RParen => self.close_level()?,
                Token::BinOp(op) => self.current.push(Fragment::Operator(op)),
                Token::Literal(text) => self.current.push(Fragment::Node(QueryNode::Literal(text))),
            }
        }

        if !self.enclosing.is_empty() {
            return Err(SearchError::UnclosedParenthesis);
        }

        reduce(self.current)?.ok_or(SearchError::UnknownParseError)
    }

    fn close_level(&mut self) -> Result<()> {
        let outer = self
            .enclosing
            .pop()
            .ok_or(SearchError::UnexpectedClosingParenthesis)?;
        let clause = std::mem::replace(&mut self.current, outer);

        // `()` contributes nothing
        if let Some(node) = reduce(clause)? {
            self.current.push(Fragment::Node(node));
        }
        Ok(())
    }
}

/// Collapse one level into a single node, `None` for an empty level
fn reduce(clause: Vec<Fragment>) -> Result<Option<QueryNode>> {
    let shape = describe(&clause);
    let mut parts = clause.into_iter();

    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (None, _, _, _) => Ok(None),
        (Some(Fragment::Node(node)), None, _, _) => Ok(Some(node)),
        (
            Some(Fragment::Node(left)),
            Some(Fragment::Operator(op)),
            Some(Fragment::Node(right)),
            None,
        ) => Ok(Some(QueryNode::binary(op, left, right))),
        _ => Err(SearchError::invalid_clause(shape)),
    }
}

fn describe(clause: &[Fragment]) -> String {
    let parts: Vec<String> = clause.iter().map(|f| f.to_string()).collect();
    format!("[{}]", parts.join(", "))
}
