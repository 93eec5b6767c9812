// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::ByteSpan;
use crate::cursor::ByteCursor;
use crate::error::BankError;
use crate::graph::AudioGraph;
use crate::hirc::ObjectTable;
use crate::names::{AliasTable, EventNameResolver};
use crate::section::scan_sections;
use crate::tree::TreeRenderer;

/// Knobs for decoding a bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Drop records that don't use up exactly as many bytes as they declare. When turned off, the
    /// unread bytes are ignored instead.
    ///
    /// This is on by default, but records in banks shipped with games usually carry properties
    /// past the fields we decode. Those records get dropped, and the bank decodes to empty
    /// maps, so turn this off for real banks.
    pub strict_record_length: bool,
    /// Also render the event hierarchy into [`BankResolution::tree`].
    pub render_tree: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict_record_length: true,
            render_tree: false,
        }
    }
}

/// Which events and sound objects lead to each audio stream in a bank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BankResolution {
    /// Audio stream id to the names of every event that can play it.
    pub audio_to_events: BTreeMap<u32, BTreeSet<String>>,
    /// Audio stream id to the ids of every sound object that plays it.
    pub audio_to_sounds: BTreeMap<u32, BTreeSet<u32>>,
    /// The rendered event hierarchy, if [`DecodeOptions::render_tree`] was set.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub tree: Option<String>,
}

/// A decoded sound bank.
#[derive(Debug, Clone)]
pub struct Bank {
    /// Every object in the bank's hierarchy, including switches split out of their containers.
    pub objects: ObjectTable,
}

impl Bank {
    /// Decodes the object hierarchy of an existing bank.
    pub fn from_existing(buffer: ByteSpan) -> Result<Bank, BankError> {
        Self::from_existing_with_options(buffer, &DecodeOptions::default())
    }

    pub fn from_existing_with_options(
        buffer: ByteSpan,
        options: &DecodeOptions,
    ) -> Result<Bank, BankError> {
        Ok(Bank {
            objects: decode_objects(buffer, options)?,
        })
    }

    /// Maps every audio stream back to the events and sounds that lead to it.
    pub fn resolve(&self, names: &EventNameResolver, render_tree: bool) -> BankResolution {
        let mut resolution = BankResolution::default();

        for sound in self.objects.sounds() {
            resolution
                .audio_to_sounds
                .entry(sound.audio_id)
                .or_default()
                .insert(sound.id);
        }

        let graph = AudioGraph::new(&self.objects);
        for event in self.objects.events() {
            let name = names.resolve(event.id);

            for audio_id in graph.event_audio(event) {
                resolution
                    .audio_to_events
                    .entry(audio_id)
                    .or_default()
                    .insert(name.clone());
            }
        }

        if render_tree {
            resolution.tree = Some(TreeRenderer::new(&self.objects, names).render());
        }

        resolution
    }
}

/// Decodes every section of a bank into one object table.
pub fn decode_objects(buffer: ByteSpan, options: &DecodeOptions) -> Result<ObjectTable, BankError> {
    let mut table = ObjectTable::new();
    scan_sections(&mut ByteCursor::new(buffer), options, &mut table)?;

    Ok(table)
}

/// Decodes a bank and resolves which events lead to which audio streams.
///
/// This uses the default [`DecodeOptions`], which drop any record with bytes left over after
/// the fields we decode. Banks shipped with games carry extra per-record data, so for those use
/// [`decode_with_options`] with [`DecodeOptions::strict_record_length`] turned off:
///
/// ```
/// # use hircus::{DecodeOptions, decode_with_options};
/// let options = DecodeOptions {
///     strict_record_length: false,
///     ..Default::default()
/// };
/// let resolution = decode_with_options(&[], ["Play_Test"], None, &options).unwrap();
/// assert!(resolution.audio_to_events.is_empty());
/// ```
///
/// # Example
///
/// ```
/// # use hircus::decode;
/// let resolution = decode(&[], ["Play_Test"], None).unwrap();
/// assert!(resolution.audio_to_events.is_empty());
/// ```
pub fn decode<I, S>(
    bank_bytes: ByteSpan,
    known_event_names: I,
    aliases: Option<&AliasTable>,
) -> Result<BankResolution, BankError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    decode_with_options(
        bank_bytes,
        known_event_names,
        aliases,
        &DecodeOptions::default(),
    )
}

pub fn decode_with_options<I, S>(
    bank_bytes: ByteSpan,
    known_event_names: I,
    aliases: Option<&AliasTable>,
    options: &DecodeOptions,
) -> Result<BankResolution, BankError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let names = EventNameResolver::new(known_event_names, aliases);
    decode_with_resolver(bank_bytes, &names, options)
}

/// Like [`decode_with_options`], but reuses names that were already hashed.
pub fn decode_with_resolver(
    bank_bytes: ByteSpan,
    names: &EventNameResolver,
    options: &DecodeOptions,
) -> Result<BankResolution, BankError> {
    debug!(size = bank_bytes.len(), "Decoding bank");

    let bank = Bank::from_existing_with_options(bank_bytes, options)?;
    let resolution = bank.resolve(names, options.render_tree);

    debug!(
        objects = bank.objects.len(),
        audio = resolution.audio_to_sounds.len(),
        "Decoded bank"
    );

    Ok(resolution)
}

/// Decodes many banks in parallel. A bank that fails to decode doesn't affect the others.
#[cfg(feature = "parallel")]
pub fn decode_many<B>(
    banks: &[B],
    names: &EventNameResolver,
    options: &DecodeOptions,
) -> Vec<Result<BankResolution, BankError>>
where
    B: AsRef<[u8]> + Sync,
{
    use rayon::prelude::*;

    banks
        .par_iter()
        .map(|bank| decode_with_resolver(bank.as_ref(), names, options))
        .collect()
}
