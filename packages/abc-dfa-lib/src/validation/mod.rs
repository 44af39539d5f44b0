use crate::automaton::{Alphabet, Language, symbol::Symbol};

pub mod same_language;

/// Membership test for `(a + bc)*` that does not use the automaton: the word
/// is split greedily into the tokens `a` and `bc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceLanguage;

impl ReferenceLanguage {
    pub fn contains(&self, word: &[Symbol]) -> bool {
        let mut rest = word;
        loop {
            rest = match rest {
                [] => return true,
                [Symbol::A, tail @ ..] => tail,
                [Symbol::B, Symbol::C, tail @ ..] => tail,
                _ => return false,
            };
        }
    }

    /// Parses `input` into symbols first. Strings with a character outside of
    /// the alphabet are never part of the language.
    pub fn contains_str(&self, input: &str) -> bool {
        input
            .chars()
            .map(Symbol::try_from)
            .collect::<Result<Vec<_>, _>>()
            .is_ok_and(|word| self.contains(&word))
    }
}

impl Alphabet for ReferenceLanguage {
    type Letter = Symbol;

    fn alphabet(&self) -> &[Symbol] {
        &Symbol::ALL
    }
}

impl Language for ReferenceLanguage {
    fn accepts_word<'a>(&self, word: impl IntoIterator<Item = &'a Symbol>) -> bool {
        let word: Vec<Symbol> = word.into_iter().copied().collect();
        self.contains(&word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_language() {
        let lang = ReferenceLanguage;

        for word in ["", "a", "bc", "abca", "bcbc", "aaabcaa"] {
            assert!(lang.contains_str(word), "{word:?} should be accepted");
        }

        for word in ["b", "c", "cb", "bb", "bca d", "abcb", "x"] {
            assert!(!lang.contains_str(word), "{word:?} should be rejected");
        }
    }
}
