//! Comparison operators accepted by predicate queries.

use crate::traits::IndexError;
use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

/// A comparison between a stored key and a query key.
///
/// The stored key is always the left operand: `Lt` selects entries whose key
/// is less than the query key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

impl Operator {
    /// All operators, in token order.
    pub const ALL: [Operator; 6] = [
        Operator::Lt,
        Operator::Le,
        Operator::Gt,
        Operator::Ge,
        Operator::Eq,
        Operator::Ne,
    ];

    /// Returns the textual token for this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Eq => "==",
            Operator::Ne => "!=",
        }
    }

    /// Returns true for the four ordering operators.
    pub fn is_range(&self) -> bool {
        !matches!(self, Operator::Eq | Operator::Ne)
    }

    /// Returns true if `stored <op> key` holds.
    pub fn matches<K: Ord>(&self, stored: &K, key: &K) -> bool {
        match self {
            Operator::Lt => stored < key,
            Operator::Le => stored <= key,
            Operator::Gt => stored > key,
            Operator::Ge => stored >= key,
            Operator::Eq => stored == key,
            Operator::Ne => stored != key,
        }
    }
}

impl FromStr for Operator {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Le),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Ge),
            "==" => Ok(Operator::Eq),
            "!=" => Ok(Operator::Ne),
            other => Err(IndexError::InvalidOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_parse_all_tokens() {
        for op in Operator::ALL {
            assert_eq!(op.as_str().parse::<Operator>(), Ok(op));
            assert_eq!(op.to_string(), op.as_str());
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(" >= ".parse::<Operator>(), Ok(Operator::Ge));
        assert_eq!("\t<\n".parse::<Operator>(), Ok(Operator::Lt));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            "=>".parse::<Operator>(),
            Err(IndexError::InvalidOperator("=>".into()))
        );
        assert_eq!(
            "".parse::<Operator>(),
            Err(IndexError::InvalidOperator("".into()))
        );
        assert!("= =".parse::<Operator>().is_err());
        assert!("<>".parse::<Operator>().is_err());
    }

    #[test]
    fn test_is_range() {
        assert!(Operator::Lt.is_range());
        assert!(Operator::Le.is_range());
        assert!(Operator::Gt.is_range());
        assert!(Operator::Ge.is_range());
        assert!(!Operator::Eq.is_range());
        assert!(!Operator::Ne.is_range());
    }

    #[test]
    fn test_matches() {
        assert!(Operator::Lt.matches(&4, &5));
        assert!(!Operator::Lt.matches(&5, &5));
        assert!(Operator::Le.matches(&5, &5));
        assert!(Operator::Gt.matches(&6, &5));
        assert!(!Operator::Gt.matches(&5, &5));
        assert!(Operator::Ge.matches(&5, &5));
        assert!(Operator::Eq.matches(&"a", &"a"));
        assert!(Operator::Ne.matches(&"a", &"b"));
        assert!(!Operator::Ne.matches(&"a", &"a"));
    }
}
