//! Randomized template expansion
//!
//! A template document is a JSON object mapping keys to strings or arrays.
//! Expansion starts from the literal token `SENTENCES` and substitutes key
//! occurrences until none remains:
//!
//! - keys are tried in document order; each one matches case-sensitively
//!   against its upper-cased spelling, and the first occurrence of the
//!   first matching key is rewritten each round
//! - a string renders as itself, and may contain further key names that
//!   get expanded on a later round
//! - an array picks one element uniformly at random; an element that is
//!   itself an array renders all of its elements in order, joined by
//!   single spaces, each again as a random pick
//!
//! Any other JSON value kind at a point where rendering is required is a
//! fatal template error.

use crate::{Result, SaycmdError};
use log::debug;
use rand::Rng;
use serde_json::Value;

/// The token the working string starts from.
const START_TOKEN: &str = "SENTENCES";

/// Substitution ceiling. A document whose values keep producing their own
/// key names would otherwise never terminate.
const MAX_SUBSTITUTIONS: usize = 10_000;

/// Expand a raw JSON template document to literal text.
pub fn expand<R: Rng>(raw: &str, rng: &mut R) -> Result<String> {
    let document: Value = serde_json::from_str(raw)?;
    let map = document.as_object().ok_or_else(|| {
        SaycmdError::Template("the top level of a template must be an object".to_string())
    })?;

    let mut working = String::from(START_TOKEN);
    let mut substitutions = 0;
    loop {
        let mut matched = false;
        for (key, value) in map {
            let token = key.to_uppercase();
            // An empty key would match everywhere without making progress.
            if token.is_empty() {
                continue;
            }
            if let Some(position) = working.find(&token) {
                let rendered = render(value, Mode::Pick, rng)?;
                working.replace_range(position..position + token.len(), &rendered);
                matched = true;
                break;
            }
        }
        if !matched {
            break;
        }

        substitutions += 1;
        if substitutions >= MAX_SUBSTITUTIONS {
            return Err(SaycmdError::Template(format!(
                "expansion did not terminate after {} substitutions",
                MAX_SUBSTITUTIONS
            )));
        }
    }

    debug!("Template expanded after {} substitution(s)", substitutions);
    Ok(working)
}

/// How an array value renders
#[derive(Clone, Copy)]
enum Mode {
    /// Choose one element at random
    Pick,
    /// Render every element in order, space-joined
    Sequence,
}

fn render<R: Rng>(value: &Value, mode: Mode, rng: &mut R) -> Result<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Array(items) => match mode {
            Mode::Pick => {
                if items.is_empty() {
                    return Err(SaycmdError::Template(
                        "cannot pick from an empty array".to_string(),
                    ));
                }
                let choice = rng.gen_range(0..items.len());
                render(&items[choice], Mode::Sequence, rng)
            }
            Mode::Sequence => {
                let parts = items
                    .iter()
                    .map(|item| render(item, Mode::Pick, rng))
                    .collect::<Result<Vec<_>>>()?;
                Ok(parts.join(" "))
            }
        },
        other => Err(SaycmdError::Template(format!(
            "cannot render a {} value",
            kind_name(other)
        ))),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
