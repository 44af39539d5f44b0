use std::fmt::Debug;

use itertools::Itertools;
use state::State;

use crate::{
    automaton::{
        Alphabet, Automaton, InitializedAutomaton, Language, TransitionSystem,
        symbol::{InvalidSymbol, Symbol},
    },
    trace::{NoTrace, TraceEvent, TraceSink},
};

pub mod state;

/// Transition table of `(a + bc)*`, indexed by `[state][symbol]`.
///
/// ```text
///       a   b   c
/// q0   q0  q1  q2
/// q1   q2  q2  q0
/// q2   q2  q2  q2
/// ```
const TRANSITIONS: [[State; 3]; 3] = [
    [State::Q0, State::Q1, State::Q2],
    [State::Q2, State::Q2, State::Q0],
    [State::Q2, State::Q2, State::Q2],
];

/// Outcome of a single recognition run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recognition {
    pub accepted: bool,
    /// The state the run ended in. On an invalid character this is the state
    /// the character was read in.
    pub final_state: State,
    /// Number of characters that caused a transition.
    pub consumed: usize,
    /// The first character outside of the alphabet, if any.
    pub invalid: Option<char>,
}

/// The deterministic automaton for `(a + bc)*` over `{a, b, c}`.
///
/// The table is fixed at construction. Recognition takes `&self` and keeps
/// its cursor on the stack, so a single instance can be shared between
/// threads.
#[derive(Clone, PartialEq, Eq)]
pub struct AbcDfa {
    table: [[State; 3]; 3],
    initial: State,
}

impl AbcDfa {
    pub fn new() -> Self {
        AbcDfa {
            table: TRANSITIONS,
            initial: State::Q0,
        }
    }

    pub fn initial(&self) -> State {
        self.initial
    }

    pub fn successor(&self, state: State, symbol: Symbol) -> State {
        self.table[state.index()][symbol.index()]
    }

    /// Reads `input` from the start state, reporting every step to `trace`.
    ///
    /// Stops at the first character outside of the alphabet; the characters
    /// after it are never looked at. A verdict event is only emitted when the
    /// whole input was consumed.
    pub fn recognize<S: TraceSink + ?Sized>(&self, input: &str, trace: &mut S) -> Recognition {
        let tracing = trace.enabled();
        let mut current = self.initial;
        let mut consumed = 0;

        for c in input.chars() {
            let symbol = match Symbol::try_from(c) {
                Ok(symbol) => symbol,
                Err(InvalidSymbol(character)) => {
                    if tracing {
                        trace.record(TraceEvent::InvalidSymbol { character });
                    }
                    return Recognition {
                        accepted: false,
                        final_state: current,
                        consumed,
                        invalid: Some(character),
                    };
                }
            };

            let next = self.successor(current, symbol);
            if tracing {
                trace.record(TraceEvent::Transition {
                    from: current,
                    symbol,
                    to: next,
                });
            }
            current = next;
            consumed += 1;
        }

        let accepted = current.is_accepting();
        if tracing {
            trace.record(TraceEvent::Verdict {
                input: input.to_string(),
                accepted,
            });
        }

        Recognition {
            accepted,
            final_state: current,
            consumed,
            invalid: None,
        }
    }

    /// Whether `input` is a word of `(a + bc)*`.
    pub fn accepts(&self, input: &str) -> bool {
        self.recognize(input, &mut NoTrace).accepted
    }

    pub fn to_graphviz(&self) -> String {
        let mut dot = String::new();
        dot.push_str("digraph finite_state_machine {\n");
        dot.push_str("fontname=\"Helvetica,Arial,sans-serif\"\n");
        dot.push_str("node [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("edge [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("rankdir=LR;\n");
        dot.push_str("node [shape=point,label=\"\"]START\n");

        dot.push_str(&format!(
            "node [shape = doublecircle]; {};\n",
            State::ALL
                .iter()
                .filter(|state| state.is_accepting())
                .join(" ")
        ));
        dot.push_str("node [shape = circle];\n");
        dot.push_str(&format!("START -> {};\n", self.initial));

        // one edge per (from, to) pair, labelled with all symbols taking it
        for from in State::ALL {
            let grouped = Symbol::ALL
                .iter()
                .map(|symbol| (self.successor(from, *symbol), *symbol))
                .into_group_map();

            for to in State::ALL {
                if let Some(symbols) = grouped.get(&to) {
                    dot.push_str(&format!(
                        "{} -> {} [ label=\"{}\" ];\n",
                        from,
                        to,
                        symbols.iter().join(", ")
                    ));
                }
            }
        }

        dot.push_str("}\n");

        dot
    }
}

impl Default for AbcDfa {
    fn default() -> Self {
        AbcDfa::new()
    }
}

impl Alphabet for AbcDfa {
    type Letter = Symbol;

    fn alphabet(&self) -> &[Symbol] {
        &Symbol::ALL
    }
}

impl Automaton for AbcDfa {
    type State = State;

    fn states(&self) -> &[State] {
        &State::ALL
    }
}

impl TransitionSystem for AbcDfa {
    fn successor(&self, state: State, letter: &Symbol) -> State {
        AbcDfa::successor(self, state, *letter)
    }
}

impl InitializedAutomaton for AbcDfa {
    fn initial(&self) -> State {
        self.initial
    }

    fn is_accepting(&self, state: State) -> bool {
        state.is_accepting()
    }
}

impl Language for AbcDfa {
    fn accepts_word<'a>(&self, word: impl IntoIterator<Item = &'a Symbol>) -> bool {
        self.run(word).is_accepting()
    }
}

impl Debug for AbcDfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbcDfa")
            .field("alphabet", &Symbol::ALL)
            .field("states", &State::ALL)
            .field("initial_state", &self.initial)
            .field(
                "final_states",
                &State::ALL
                    .iter()
                    .filter(|state| state.is_accepting())
                    .collect_vec(),
            )
            .field(
                "edges",
                &State::ALL
                    .iter()
                    .cartesian_product(Symbol::ALL.iter())
                    .map(|(from, symbol)| {
                        format!(
                            "{} --- {} --> {}",
                            from,
                            symbol,
                            self.successor(*from, *symbol)
                        )
                    })
                    .collect_vec(),
            )
            .finish()
    }
}
