//! Attendance command vocabulary and the single command parser.
//!
//! Command parsing lives here and nowhere else: the router matches on the
//! verb token to pick a dispatch path, and the engine calls [`parse`] to
//! validate the full line. A line is well-formed only if it has exactly two
//! whitespace-separated tokens — the verb itself and a non-empty member id.

use serde::{Deserialize, Serialize};

/// The two structured attendance verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandVerb {
    CheckIn,
    CheckOut,
}

impl CommandVerb {
    /// The literal token members type (`/in` or `/out`).
    pub fn token(&self) -> &'static str {
        match self {
            CommandVerb::CheckIn => "/in",
            CommandVerb::CheckOut => "/out",
        }
    }

    /// The usage form shown when a line is malformed.
    pub fn usage(&self) -> &'static str {
        match self {
            CommandVerb::CheckIn => "/in <user_id>",
            CommandVerb::CheckOut => "/out <user_id>",
        }
    }
}

impl std::fmt::Display for CommandVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Parse a command line against an expected verb.
///
/// Returns the member id when the line is exactly `<verb> <id>`, `None` for
/// anything else — wrong verb, missing id, extra tokens. Callers must not
/// touch the roster or the ledger on a `None`.
pub fn parse(verb: CommandVerb, line: &str) -> Option<String> {
    let mut tokens = line.split_whitespace();
    let first = tokens.next()?;
    let user_id = tokens.next()?;
    if tokens.next().is_some() || first != verb.token() {
        return None;
    }
    Some(user_id.to_string())
}
