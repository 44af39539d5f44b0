use abc_dfa_lib::{
    automaton::{
        Automaton, InitializedAutomaton, Language,
        dfa::{AbcDfa, state::State},
        symbol::Symbol,
    },
    trace::{NoTrace, TraceEvent, WriterTrace, render_trace},
};

fn traced(dfa: &AbcDfa, input: &str) -> (bool, String) {
    let mut sink = WriterTrace::new(Vec::new());
    let res = dfa.recognize(input, &mut sink);
    let bytes = sink.finish().unwrap();
    (res.accepted, String::from_utf8(bytes).unwrap())
}

#[test]
fn test_dfa() {
    let dfa = AbcDfa::new();

    assert!(dfa.accepts(""));
    assert!(dfa.accepts("a"));
    assert!(dfa.accepts("aaa"));
    assert!(dfa.accepts("bc"));
    assert!(dfa.accepts("abcabca"));
    assert!(dfa.accepts("bca"));

    assert!(!dfa.accepts("b"));
    assert!(!dfa.accepts("ba"));
    assert!(!dfa.accepts("d"));
    assert!(!dfa.accepts("bcx"));
}

#[test]
fn test_dfa_structure() {
    let dfa = AbcDfa::default();

    assert_eq!(dfa.states().len(), 3);
    assert_eq!(dfa.initial(), State::Q0);
    assert_eq!(
        dfa.states().iter().filter(|s| dfa.is_accepting(**s)).count(),
        1
    );

    let expected = [
        (State::Q0, [State::Q0, State::Q1, State::Q2]),
        (State::Q1, [State::Q2, State::Q2, State::Q0]),
        (State::Q2, [State::Q2, State::Q2, State::Q2]),
    ];
    for (from, targets) in expected {
        for (symbol, to) in Symbol::ALL.iter().zip(targets) {
            assert_eq!(dfa.successor(from, *symbol), to, "{from} --{symbol}-->");
        }
    }
}

#[test]
fn test_only_a() {
    let dfa = AbcDfa::new();

    for n in 0..50 {
        assert!(dfa.accepts(&"a".repeat(n)));
    }
}

#[test]
fn test_concatenations_of_a_and_bc() {
    let dfa = AbcDfa::new();
    let parts = ["a", "bc"];

    // every concatenation of up to 6 parts, encoded in the bits of `mask`
    for len in 0..=6 {
        for mask in 0..(1u32 << len) {
            let word: String = (0..len).map(|i| parts[((mask >> i) & 1) as usize]).collect();
            assert!(dfa.accepts(&word), "{word:?}");
        }
    }
}

#[test]
fn test_dangling_b() {
    let dfa = AbcDfa::new();

    for word in ["b", "bb", "ba", "abcb", "bcbb", "aab", "bcba", "cbc"] {
        assert!(!dfa.accepts(word), "{word:?}");
    }
}

#[test]
fn test_trap_state_is_final() {
    let dfa = AbcDfa::new();

    let res = dfa.recognize("babcbcaaa", &mut NoTrace);
    assert!(!res.accepted);
    assert_eq!(res.final_state, State::Q2);
    assert_eq!(res.consumed, 9);
}

#[test]
fn test_invalid_character_short_circuits() {
    let dfa = AbcDfa::new();

    let mut events = vec![];
    let res = dfa.recognize("axbc", &mut events);

    assert!(!res.accepted);
    assert_eq!(res.invalid, Some('x'));
    assert_eq!(res.consumed, 1);
    assert_eq!(
        events,
        vec![
            TraceEvent::Transition {
                from: State::Q0,
                symbol: Symbol::A,
                to: State::Q0,
            },
            TraceEvent::InvalidSymbol { character: 'x' },
        ]
    );

    // whatever follows the invalid character does not matter
    for suffix in ["", "a", "bc", "b", "xyz"] {
        assert!(!dfa.accepts(&format!("a!{suffix}")));
    }
}

#[test]
fn test_idempotent() {
    let dfa = AbcDfa::new();

    for input in ["", "abc", "bca", "ba", "d", "bcx"] {
        assert_eq!(dfa.accepts(input), dfa.accepts(input), "{input:?}");
    }

    let (first, first_trace) = traced(&dfa, "abcb");
    let (second, second_trace) = traced(&dfa, "abcb");
    assert_eq!(first, second);
    assert_eq!(first_trace, second_trace);
}

#[test]
fn test_trace_accepted() {
    let (accepted, trace) = traced(&AbcDfa::new(), "bca");

    assert!(accepted);
    assert_eq!(
        trace,
        "In state: q0\nReading character: b\nMoving to state: q1\n\n\
         In state: q1\nReading character: c\nMoving to state: q0\n\n\
         In state: q0\nReading character: a\nMoving to state: q0\n\n\
         String bca is accepted by the automata\n"
    );
}

#[test]
fn test_trace_rejected() {
    let (accepted, trace) = traced(&AbcDfa::new(), "ba");

    assert!(!accepted);
    assert!(trace.ends_with(
        "In state: q1\nReading character: a\nMoving to state: q2\n\n\
         String ba is rejected by the automata\n"
    ));
}

#[test]
fn test_trace_invalid_character() {
    let (accepted, trace) = traced(&AbcDfa::new(), "bcx");

    assert!(!accepted);
    assert_eq!(
        trace,
        "In state: q0\nReading character: b\nMoving to state: q1\n\n\
         In state: q1\nReading character: c\nMoving to state: q0\n\n\
         Character x is not in alphabet, exiting...\n"
    );

    let (_, trace) = traced(&AbcDfa::new(), "d");
    assert_eq!(trace, "Character d is not in alphabet, exiting...\n");
}

#[test]
fn test_trace_empty_input() {
    let dfa = AbcDfa::new();
    let mut events = vec![];

    assert!(dfa.recognize("", &mut events).accepted);
    assert_eq!(
        render_trace(&events),
        "String  is accepted by the automata\n"
    );
}

#[test]
fn test_language_trait_matches_str() {
    let dfa = AbcDfa::new();

    let word = [Symbol::A, Symbol::B, Symbol::C];
    assert!(dfa.accepts_word(&word));
    assert_eq!(dfa.run(&word), State::Q0);

    let word = [Symbol::C];
    assert!(!dfa.accepts_word(&word));
    assert_eq!(dfa.run(&word), State::Q2);
}

#[test]
fn test_shared_between_threads() {
    let dfa = &AbcDfa::new();

    std::thread::scope(|s| {
        let handles: Vec<_> = ["abc", "bb", "bcbcbc", "x"]
            .into_iter()
            .map(|input| s.spawn(move || (input, dfa.accepts(input))))
            .collect();

        for handle in handles {
            let (input, accepted) = handle.join().unwrap();
            assert_eq!(accepted, matches!(input, "abc" | "bcbcbc"));
        }
    });
}

#[test]
fn test_graphviz() {
    let dot = AbcDfa::new().to_graphviz();

    assert!(dot.starts_with("digraph finite_state_machine {\n"));
    assert!(dot.contains("node [shape = doublecircle]; q0;\n"));
    assert!(dot.contains("START -> q0;\n"));
    assert!(dot.contains("q0 -> q1 [ label=\"b\" ];\n"));
    assert!(dot.contains("q1 -> q2 [ label=\"a, b\" ];\n"));
    assert!(dot.contains("q2 -> q2 [ label=\"a, b, c\" ];\n"));
    assert!(dot.ends_with("}\n"));
}
