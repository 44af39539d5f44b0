pub mod automaton;
pub mod config;
pub mod logger;
pub mod recognizer;
pub mod trace;
pub mod validation;
