//! Parser for the SELECT...WHERE filter grammar.
//!
//! The grammar is deliberately small: `SELECT * FROM <table> WHERE
//! <comparison> [AND <comparison>]...`, where each comparison is a
//! column name, a comparison operator and a numeric literal.

use crate::error::AnalysisError;
use once_cell::sync::Lazy;
use regex::Regex;

static SELECT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*SELECT\s+\*\s+FROM\s+([A-Za-z_]\w*)\s+WHERE\s+(.+?)\s*$")
        .expect("select regex is valid")
});

static AND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+AND\s+").expect("and regex is valid"));

static COMPARISON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z_][\w ()./-]*?)\s*(>=|<=|!=|>|<|=)\s*(-?\d+(?:\.\d+)?)\s*$")
        .expect("comparison regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompareOp {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl CompareOp {
    pub(crate) fn eval(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
        }
    }

    fn parse(op: &str) -> Option<Self> {
        match op {
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Ge),
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            "=" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            _ => None,
        }
    }
}

/// One `column op literal` term of a WHERE conjunction.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Comparison {
    pub column: String,
    pub op: CompareOp,
    pub value: f64,
}

/// A parsed `SELECT * FROM ... WHERE ...` statement.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SelectQuery {
    pub table: String,
    pub comparisons: Vec<Comparison>,
}

pub(crate) fn parse_select(sql: &str) -> Result<SelectQuery, AnalysisError> {
    let caps = SELECT_RE.captures(sql).ok_or_else(|| {
        AnalysisError::InvalidQuery(
            "expected 'SELECT * FROM <table> WHERE <predicate>'".to_string(),
        )
    })?;

    let table = caps[1].to_string();
    let mut comparisons = Vec::new();
    for term in AND_RE.split(&caps[2]) {
        comparisons.push(parse_comparison(term)?);
    }

    Ok(SelectQuery { table, comparisons })
}

fn parse_comparison(term: &str) -> Result<Comparison, AnalysisError> {
    let caps = COMPARISON_RE.captures(term).ok_or_else(|| {
        AnalysisError::InvalidQuery(format!("cannot parse comparison '{}'", term.trim()))
    })?;

    let op = CompareOp::parse(&caps[2])
        .ok_or_else(|| AnalysisError::InvalidQuery(format!("unknown operator in '{}'", term)))?;
    let value: f64 = caps[3]
        .parse()
        .map_err(|_| AnalysisError::InvalidQuery(format!("bad numeric literal in '{}'", term)))?;

    Ok(Comparison {
        column: caps[1].trim().to_string(),
        op,
        value,
    })
}
