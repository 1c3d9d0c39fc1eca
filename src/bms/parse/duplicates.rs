//! Bookkeeping of duplicated definitions, active only with [`StrictFlag::DuplicateDefinition`](super::StrictFlag::DuplicateDefinition).

use std::collections::BTreeSet;

use itertools::Itertools;
use thiserror::Error;

use crate::bms::command::{ObjId, channel::Channel, time::Track};

fn summarize(
    definitions: &BTreeSet<String>,
    messages: &BTreeSet<(Track, Channel)>,
    wav: &BTreeSet<ObjId>,
    bmp: &BTreeSet<ObjId>,
) -> String {
    let definitions = definitions.iter().map(|key| format!("#{}", key.to_ascii_uppercase()));
    let messages = messages
        .iter()
        .map(|(track, channel)| format!("#{track}{channel}"));
    let wav = wav.iter().map(|id| format!("#WAV{id}"));
    let bmp = bmp.iter().map(|id| format!("#BMP{id}"));
    definitions.chain(messages).chain(wav).chain(bmp).join(", ")
}

/// Everything assigned more than once in a source, reported at once after the whole source was read.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("duplicated definitions: {}", summarize(.definitions, .messages, .wav, .bmp))]
pub struct DuplicateDefinitions {
    /// Keywords of definitions, in lowercase.
    pub definitions: BTreeSet<String>,
    /// Pairs of track and channel of messages.
    pub messages: BTreeSet<(Track, Channel)>,
    /// Object ids of `#WAVxx`.
    pub wav: BTreeSet<ObjId>,
    /// Object ids of `#BMPxx`.
    pub bmp: BTreeSet<ObjId>,
}

impl DuplicateDefinitions {
    /// Returns whether nothing was duplicated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
            && self.messages.is_empty()
            && self.wav.is_empty()
            && self.bmp.is_empty()
    }

    pub(crate) fn record_definition(&mut self, key: &str) {
        self.definitions.insert(key.to_string());
    }

    pub(crate) fn record_message(&mut self, track: Track, channel: Channel) {
        self.messages.insert((track, channel));
    }

    pub(crate) fn record_wav(&mut self, id: ObjId) {
        self.wav.insert(id);
    }

    pub(crate) fn record_bmp(&mut self, id: ObjId) {
        self.bmp.insert(id);
    }

    /// Turns the record into the result of parsing.
    pub(crate) fn check(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}
