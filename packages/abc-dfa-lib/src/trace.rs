use std::{
    fmt::Display,
    io::{self, Write},
};

use serde::Serialize;

use crate::{
    automaton::{dfa::state::State, symbol::Symbol},
    logger::Logger,
};

/// One step of a recognition run, as reported to a [TraceSink].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    Transition {
        from: State,
        symbol: Symbol,
        to: State,
    },
    InvalidSymbol {
        character: char,
    },
    Verdict {
        input: String,
        accepted: bool,
    },
}

impl Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceEvent::Transition { from, symbol, to } => {
                writeln!(f, "In state: {}", from)?;
                writeln!(f, "Reading character: {}", symbol)?;
                writeln!(f, "Moving to state: {}", to)
            }
            TraceEvent::InvalidSymbol { character } => {
                write!(f, "Character {} is not in alphabet, exiting...", character)
            }
            TraceEvent::Verdict { input, accepted } => write!(
                f,
                "String {} is {} by the automata",
                input,
                if *accepted { "accepted" } else { "rejected" }
            ),
        }
    }
}

/// Receives the events of a recognition run.
pub trait TraceSink {
    fn record(&mut self, event: TraceEvent);

    /// Sinks returning `false` are never handed any event, which spares the
    /// automaton from building them.
    fn enabled(&self) -> bool {
        true
    }
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn record(&mut self, event: TraceEvent) {
        (**self).record(event);
    }

    fn enabled(&self) -> bool {
        (**self).enabled()
    }
}

impl TraceSink for Vec<TraceEvent> {
    fn record(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Hands every event to both sinks.
impl<A: TraceSink, B: TraceSink> TraceSink for (A, B) {
    fn record(&mut self, event: TraceEvent) {
        match (self.0.enabled(), self.1.enabled()) {
            (true, true) => {
                self.0.record(event.clone());
                self.1.record(event);
            }
            (true, false) => self.0.record(event),
            (false, true) => self.1.record(event),
            (false, false) => {}
        }
    }

    fn enabled(&self) -> bool {
        self.0.enabled() || self.1.enabled()
    }
}

/// Discards everything, i.e. tracing disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    fn record(&mut self, _event: TraceEvent) {}

    fn enabled(&self) -> bool {
        false
    }
}

/// Renders every event as text into a writer, one event per line.
///
/// The first write error is kept and returned from [WriterTrace::finish];
/// later events are dropped.
#[derive(Debug)]
pub struct WriterTrace<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> WriterTrace<W> {
    pub fn new(writer: W) -> Self {
        WriterTrace {
            writer,
            error: None,
        }
    }

    pub fn finish(mut self) -> io::Result<W> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(self.writer),
        }
    }
}

impl<W: Write> TraceSink for WriterTrace<W> {
    fn record(&mut self, event: TraceEvent) {
        if self.error.is_some() {
            return;
        }

        if let Err(e) = writeln!(self.writer, "{}", event) {
            self.error = Some(e);
        }
    }
}

/// Forwards every event to a [Logger] at debug level.
#[derive(Debug, Clone, Copy)]
pub struct LoggerTrace<'a> {
    logger: &'a Logger,
}

impl<'a> LoggerTrace<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        LoggerTrace { logger }
    }
}

impl TraceSink for LoggerTrace<'_> {
    fn record(&mut self, event: TraceEvent) {
        self.logger.debug(event.to_string().trim_end());
    }
}

/// Renders a list of events exactly like [WriterTrace] would.
pub fn render_trace<'a>(events: impl IntoIterator<Item = &'a TraceEvent>) -> String {
    events
        .into_iter()
        .map(|event| format!("{}\n", event))
        .collect()
}
