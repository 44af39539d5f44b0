use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::{
    automaton::dfa::{AbcDfa, Recognition, state::State},
    config::RecognizerConfig,
    logger::{LogLevel, Logger},
    trace::{LoggerTrace, NoTrace, TraceEvent, TraceSink},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionStatus {
    Accepted,
    Rejected,
    /// Recognition stopped at a character outside of the alphabet.
    InvalidSymbol(char),
}

impl RecognitionStatus {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RecognitionStatus::Accepted)
    }

    pub fn is_rejected(&self) -> bool {
        !self.is_accepted()
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, RecognitionStatus::InvalidSymbol(_))
    }
}

impl From<&Recognition> for RecognitionStatus {
    fn from(recognition: &Recognition) -> Self {
        match (recognition.invalid, recognition.accepted) {
            (Some(c), _) => RecognitionStatus::InvalidSymbol(c),
            (None, true) => RecognitionStatus::Accepted,
            (None, false) => RecognitionStatus::Rejected,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionStatistics {
    pub symbols_read: usize,
    pub time: Duration,
}

impl RecognitionStatistics {
    pub fn new(symbols_read: usize, time: Duration) -> Self {
        RecognitionStatistics { symbols_read, time }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    pub status: RecognitionStatus,
    pub final_state: State,
    pub statistics: RecognitionStatistics,
    /// Collected trace events. Empty unless tracing is enabled and the result
    /// came from [Recognizer::recognize].
    pub trace: Vec<TraceEvent>,
}

impl RecognitionResult {
    pub fn is_accepted(&self) -> bool {
        self.status.is_accepted()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SerializableRecognitionStatus {
    Accepted,
    Rejected,
    InvalidSymbol { character: char },
}

impl From<RecognitionStatus> for SerializableRecognitionStatus {
    fn from(status: RecognitionStatus) -> Self {
        match status {
            RecognitionStatus::Accepted => SerializableRecognitionStatus::Accepted,
            RecognitionStatus::Rejected => SerializableRecognitionStatus::Rejected,
            RecognitionStatus::InvalidSymbol(character) => {
                SerializableRecognitionStatus::InvalidSymbol { character }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerializableRecognitionResult {
    pub input: String,
    pub accepted: bool,
    #[serde(flatten)]
    pub status: SerializableRecognitionStatus,
    pub final_state: State,
    pub statistics: RecognitionStatistics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<TraceEvent>,
}

impl SerializableRecognitionResult {
    pub fn new(input: &str, result: RecognitionResult) -> Self {
        SerializableRecognitionResult {
            input: input.to_string(),
            accepted: result.is_accepted(),
            status: result.status.into(),
            final_state: result.final_state,
            statistics: result.statistics,
            trace: result.trace,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Runs an automaton according to a [RecognizerConfig].
///
/// Tracing is decided by the config: with `trace` disabled every sink handed
/// to [Recognizer::recognize_into] is ignored. A logger, when set, receives
/// every trace event at debug level either way.
#[derive(Debug, Clone)]
pub struct Recognizer<'a> {
    dfa: &'a AbcDfa,
    config: RecognizerConfig,
    logger: Option<&'a Logger>,
}

impl<'a> Recognizer<'a> {
    pub fn new(dfa: &'a AbcDfa, config: RecognizerConfig, logger: Option<&'a Logger>) -> Self {
        Recognizer {
            dfa,
            config,
            logger,
        }
    }

    pub fn with_logger(mut self, logger: &'a Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Recognizes `input`, collecting the trace into the result.
    pub fn recognize(&self, input: &str) -> RecognitionResult {
        let mut events = vec![];
        let mut result = self.recognize_into(input, &mut events);
        result.trace = events;
        result
    }

    /// Recognizes `input`, streaming the trace into `sink`.
    pub fn recognize_into<S: TraceSink + ?Sized>(
        &self,
        input: &str,
        sink: &mut S,
    ) -> RecognitionResult {
        let _span = tracing::debug_span!("recognize", len = input.len()).entered();
        self.log_info(&format!("Recognizing input of {} bytes", input.len()));

        let start = Instant::now();
        let recognition = match (*self.config.get_trace(), self.logger) {
            (true, Some(logger)) => self
                .dfa
                .recognize(input, &mut (sink, LoggerTrace::new(logger))),
            (true, None) => self.dfa.recognize(input, sink),
            (false, Some(logger)) => self.dfa.recognize(input, &mut LoggerTrace::new(logger)),
            (false, None) => self.dfa.recognize(input, &mut NoTrace),
        };
        let time = start.elapsed();

        let status = RecognitionStatus::from(&recognition);
        tracing::debug!(?status, consumed = recognition.consumed, "recognition finished");

        if let Some(logger) = self.logger {
            if let RecognitionStatus::InvalidSymbol(c) = status {
                logger.warn(&format!("Input contains character {:?} outside of the alphabet", c));
            }

            logger
                .object("Recognition")
                .add_field("input", input)
                .add_field("status", format!("{:?}", status))
                .add_field("final_state", recognition.final_state)
                .add_field("symbols_read", recognition.consumed)
                .add_field("time", format!("{:?}", time))
                .log(LogLevel::Debug);
        }

        RecognitionResult {
            status,
            final_state: recognition.final_state,
            statistics: RecognitionStatistics::new(recognition.consumed, time),
            trace: vec![],
        }
    }

    fn log_info(&self, message: &str) {
        if let Some(logger) = self.logger {
            logger.info(message);
        }
    }
}
