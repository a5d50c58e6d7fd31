//! SSML rendering
//!
//! Renders a finalized event list as an SSML document, mainly for debug
//! logging and tests. Default-valued style fields and the not-found voice
//! marker produce no markup, so a consumer falls back to its own defaults
//! exactly where the engine would.

use crate::prompt::{PromptEvent, Scope, StyleRecord};
use crate::speech::VoiceSelection;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Prosody rate names by rate step (1 fastest .. 5 slowest)
static RATE_NAMES: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(1, "x-fast");
    m.insert(2, "fast");
    m.insert(3, "medium");
    m.insert(4, "slow");
    m.insert(5, "x-slow");
    m
});

/// Emphasis level names by emphasis step (1 strongest .. 4 reduced)
static EMPHASIS_NAMES: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(1, "strong");
    m.insert(2, "moderate");
    m.insert(3, "none");
    m.insert(4, "reduced");
    m
});

/// Prosody volume names by voice-volume step (1 silent .. 7 default)
static VOLUME_NAMES: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(1, "silent");
    m.insert(2, "x-soft");
    m.insert(3, "soft");
    m.insert(4, "medium");
    m.insert(5, "loud");
    m.insert(6, "x-loud");
    m.insert(7, "default");
    m
});

/// Render one spoken segment's events as an SSML `<speak>` document.
///
/// Events must be balanced; each end event closes whatever elements its
/// matching begin opened, which may be none.
pub fn render(events: &[PromptEvent]) -> String {
    let mut out = String::from(
        "<speak version=\"1.0\" xmlns=\"http://www.w3.org/2001/10/synthesis\" xml:lang=\"en-US\">",
    );
    // Element names opened per scope, innermost last.
    let mut opened: Vec<Vec<&'static str>> = Vec::new();

    for event in events {
        match event {
            PromptEvent::Text(text) => out.push_str(&escape(text)),
            PromptEvent::Begin(scope) => {
                let elements = open_scope(&mut out, scope);
                opened.push(elements);
            }
            PromptEvent::End(_) => {
                if let Some(elements) = opened.pop() {
                    for name in elements.iter().rev() {
                        out.push_str("</");
                        out.push_str(name);
                        out.push('>');
                    }
                }
            }
        }
    }

    out.push_str("</speak>");
    out
}

/// Write a scope's opening elements and report their names in open order.
fn open_scope(out: &mut String, scope: &Scope) -> Vec<&'static str> {
    match scope {
        Scope::Voice(VoiceSelection::Resolved(voice)) => {
            out.push_str(&format!("<voice name=\"{}\">", escape(voice.name())));
            vec!["voice"]
        }
        // An unmatched voice keeps its scope but contributes no markup.
        Scope::Voice(VoiceSelection::NotFound) => Vec::new(),
        Scope::Style(style) => open_style(out, style),
        Scope::Sentence => {
            out.push_str("<s>");
            vec!["s"]
        }
        Scope::Paragraph => {
            out.push_str("<p>");
            vec!["p"]
        }
    }
}

fn open_style(out: &mut String, style: &StyleRecord) -> Vec<&'static str> {
    let mut elements = Vec::new();

    let rate = RATE_NAMES.get(&style.rate.get());
    let volume = VOLUME_NAMES.get(&style.voice_volume.get());
    if rate.is_some() || volume.is_some() {
        out.push_str("<prosody");
        if let Some(rate) = rate {
            out.push_str(&format!(" rate=\"{}\"", rate));
        }
        if let Some(volume) = volume {
            out.push_str(&format!(" volume=\"{}\"", volume));
        }
        out.push('>');
        elements.push("prosody");
    }

    if let Some(level) = EMPHASIS_NAMES.get(&style.emphasis.get()) {
        out.push_str(&format!("<emphasis level=\"{}\">", level));
        elements.push("emphasis");
    }

    elements
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
