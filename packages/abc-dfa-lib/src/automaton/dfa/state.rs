use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A state of the `(a + bc)*` automaton.
///
/// Invariant: a state is never both accepting and a trap state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// Initial state. Everything read so far is a word of the language.
    Q0,
    /// A `b` was read and the matching `c` is still missing.
    Q1,
    /// Trap state, no accepting state is reachable from here.
    Q2,
}

impl State {
    pub const ALL: [State; 3] = [State::Q0, State::Q1, State::Q2];

    pub fn name(&self) -> &'static str {
        match self {
            State::Q0 => "q0",
            State::Q1 => "q1",
            State::Q2 => "q2",
        }
    }

    pub fn is_accepting(&self) -> bool {
        matches!(self, State::Q0)
    }

    /// Whether every word read from this state is rejected.
    pub fn is_trap(&self) -> bool {
        matches!(self, State::Q2)
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_accepting_state() {
        let accepting = State::ALL.iter().filter(|s| s.is_accepting()).count();
        assert_eq!(accepting, 1);
        assert!(State::Q0.is_accepting());
    }

    #[test]
    fn test_no_state_is_accepting_and_trap() {
        for state in State::ALL {
            assert!(!(state.is_accepting() && state.is_trap()), "{state}");
        }
    }

    #[test]
    fn test_index_matches_declaration_order() {
        for (i, state) in State::ALL.iter().enumerate() {
            assert_eq!(state.index(), i);
        }
    }
}
