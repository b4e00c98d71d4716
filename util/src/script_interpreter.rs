//! # Script interpreter module
//!
//! This module provides an interpreter for timed scripts. A script is a text
//! file made of entries of the form
//!
//! ```text
//! <time_s>: <json payload>;
//! ```
//!
//! where each JSON payload is deserialised into the script's item type. Any
//! line not matching this form (for example `# comments`) is ignored.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use serde::de::DeserializeOwned;
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An item which is scripted to occur at a specific time.
struct Entry<T> {
    /// The time the item is supposed to execute at
    exec_time_s: f64,

    item: T
}

/// A script interpreter.
///
/// After initialising with the path to the script use `.get_pending` to
/// acquire the items that are due.
pub struct ScriptInterpreter<T> {
    _script_path: PathBuf,
    entries: VecDeque<Entry<T>>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid item at {0} s: {1}")]
    InvalidItem(f64, serde_json::Error)
}

/// Items returned by the interpreter on a particular cycle.
pub enum Pending<T> {
    None,
    Some(Vec<T>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<T: DeserializeOwned> ScriptInterpreter<T> {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        let path = PathBuf::from(script_path.as_ref());
        
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        let script = fs::read_to_string(&path)
            .map_err(ScriptError::ScriptLoadError)?;

        let entries = Self::parse(&script)?;

        Ok(ScriptInterpreter {
            _script_path: path,
            entries
        })
    }

    /// Create an interpreter directly from the script's text.
    pub fn parse_str(script: &str) -> Result<Self, ScriptError> {
        Ok(ScriptInterpreter {
            _script_path: PathBuf::new(),
            entries: Self::parse(script)?
        })
    }

    fn parse(script: &str) -> Result<VecDeque<Entry<T>>, ScriptError> {
        let mut entries: VecDeque<Entry<T>> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .expect("script regex is valid");

        for cap in re.captures_iter(script) {
            let exec_time_s: f64 = cap[1].parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            let item = serde_json::from_str(&cap[3])
                .map_err(|e| ScriptError::InvalidItem(exec_time_s, e))?;

            entries.push_back(Entry {
                exec_time_s,
                item
            });
        }

        if entries.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(entries)
    }
}

impl<T> ScriptInterpreter<T> {

    /// Return the items due at or before `current_time_s`.
    pub fn get_pending(&mut self, current_time_s: f64) -> Pending<T> {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.entries.is_empty() {
            return Pending::EndOfScript
        }

        let mut items: Vec<T> = vec![];

        // Pop items from the queue while their exec time has passed
        while self.entries
            .front()
            .map(|e| e.exec_time_s <= current_time_s)
            .unwrap_or(false)
        {
            if let Some(e) = self.entries.pop_front() {
                items.push(e.item);
            }
        }

        if items.len() > 0 {
            Pending::Some(items)
        }
        else {
            Pending::None
        }
    }

    /// Get the number of items remaining in the script
    pub fn get_num_items(&self) -> usize {
        self.entries.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.entries.back() {
            Some(e) => e.exec_time_s,
            None => 0f64
        }
    }
}
