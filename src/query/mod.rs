pub mod evaluator;
pub mod lexer;
pub mod parser;

pub use evaluator::{query, QueryEvaluator};
pub use lexer::{tokenize, Operator, Token};
pub use parser::{parse, parse_query, QueryNode};
