use crate::error::Result;
use crate::index::trie::TrieIndex;
use crate::index::types::DocId;
use crate::query::lexer::Operator;
use crate::query::parser::{parse_query, QueryNode};
use std::collections::HashSet;

/// Evaluates query trees against an index
pub struct QueryEvaluator<'a> {
    index: &'a TrieIndex,
}

impl<'a> QueryEvaluator<'a> {
    pub fn new(index: &'a TrieIndex) -> Self {
        Self { index }
    }

    /// Matching document ids.
    ///
    /// A literal with no trie path aborts the whole evaluation with
    /// `TokenNotIndexed`; there is no partial result. Only membership of the
    /// returned ids is meaningful, not their order.
    pub fn evaluate(&self, node: &QueryNode) -> Result<Vec<DocId>> {
        match node {
            QueryNode::Literal(text) => Ok(self.index.lookup(text)?.to_vec()),
            QueryNode::BinaryOp { op, left, right } => {
                let lhs = self.evaluate(left)?;
                let rhs = self.evaluate(right)?;
                Ok(combine(*op, lhs, rhs))
            }
        }
    }
}

/// Lex, parse and evaluate `chunks` against `index`
pub fn query<I, S>(index: &TrieIndex, chunks: I) -> Result<Vec<DocId>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let node = parse_query(chunks)?;
    QueryEvaluator::new(index).evaluate(&node)
}

fn combine(op: Operator, lhs: Vec<DocId>, rhs: Vec<DocId>) -> Vec<DocId> {
    match op {
        Operator::Or => {
            let mut seen: HashSet<DocId> = HashSet::with_capacity(lhs.len() + rhs.len());
            lhs.into_iter()
                .chain(rhs)
                .filter(|id| seen.insert(*id))
                .collect()
        }
        Operator::And => {
            let rhs: HashSet<DocId> = rhs.into_iter().collect();
            let mut seen = HashSet::with_capacity(rhs.len());
            lhs.into_iter()
                .filter(|id| rhs.contains(id) && seen.insert(*id))
                .collect()
        }
    }
}
