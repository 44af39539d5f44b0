use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A letter of the input alphabet `{a, b, c}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    A,
    B,
    C,
}

impl Symbol {
    pub const ALL: [Symbol; 3] = [Symbol::A, Symbol::B, Symbol::C];

    pub fn as_char(&self) -> char {
        match self {
            Symbol::A => 'a',
            Symbol::B => 'b',
            Symbol::C => 'c',
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

/// A character outside of the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSymbol(pub char);

impl Display for InvalidSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Character {} is not in alphabet", self.0)
    }
}

impl std::error::Error for InvalidSymbol {}

impl TryFrom<char> for Symbol {
    type Error = InvalidSymbol;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'a' => Ok(Symbol::A),
            'b' => Ok(Symbol::B),
            'c' => Ok(Symbol::C),
            _ => Err(InvalidSymbol(c)),
        }
    }
}

impl From<Symbol> for char {
    fn from(symbol: Symbol) -> Self {
        symbol.as_char()
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_from_char() {
        assert_eq!(Symbol::try_from('a'), Ok(Symbol::A));
        assert_eq!(Symbol::try_from('b'), Ok(Symbol::B));
        assert_eq!(Symbol::try_from('c'), Ok(Symbol::C));
    }

    #[test]
    fn test_invalid_symbols() {
        for c in ['d', 'A', ' ', '\n', 'ä', '0'] {
            assert_eq!(Symbol::try_from(c), Err(InvalidSymbol(c)));
        }
        assert_eq!(
            InvalidSymbol('x').to_string(),
            "Character x is not in alphabet"
        );
    }
}
