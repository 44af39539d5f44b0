use std::{fmt::Debug, hash::Hash};

pub mod dfa;
pub mod symbol;

pub trait Letter: Debug + Clone + PartialEq + Eq + Hash + Ord {}

impl<T: Debug + Clone + PartialEq + Eq + Hash + Ord> Letter for T {}

pub trait Alphabet {
    type Letter: Letter;

    fn alphabet(&self) -> &[Self::Letter];
}

/// An automaton with a closed, fixed set of states.
pub trait Automaton: Alphabet {
    /// The state type. States are plain values, not indices into storage.
    type State: Debug + Copy + PartialEq + Eq + Hash;

    /// Returns all states of the automaton.
    fn states(&self) -> &[Self::State];
}

/// An automaton whose transition function is total: every state has exactly
/// one successor for every letter of the alphabet.
pub trait TransitionSystem: Automaton {
    fn successor(&self, state: Self::State, letter: &Self::Letter) -> Self::State;

    /// All distinct successors of `state`, in alphabet order.
    fn successors(&self, state: Self::State) -> Vec<Self::State> {
        let mut successors: Vec<Self::State> = vec![];
        for letter in self.alphabet() {
            let next = self.successor(state, letter);
            if !successors.contains(&next) {
                successors.push(next);
            }
        }
        successors
    }
}

pub trait InitializedAutomaton: TransitionSystem {
    /// Returns the start state of the automaton.
    fn initial(&self) -> Self::State;

    /// Returns true if the passed in state is accepting / a final state.
    fn is_accepting(&self, state: Self::State) -> bool;

    /// Runs the automaton over `word` from the start state and returns the
    /// state it ends in.
    fn run<'a>(&self, word: impl IntoIterator<Item = &'a Self::Letter>) -> Self::State
    where
        Self::Letter: 'a,
    {
        word.into_iter()
            .fold(self.initial(), |state, letter| self.successor(state, letter))
    }
}

/// The basic trait for anything that defines a language over a set alphabet.
pub trait Language: Alphabet {
    fn accepts_word<'a>(&self, word: impl IntoIterator<Item = &'a Self::Letter>) -> bool
    where
        Self::Letter: 'a;
}
