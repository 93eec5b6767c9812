// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use binrw::binread;

/// Where a sound's audio data lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedType {
    /// Stored inside the bank's data section.
    Embedded,
    /// Streamed from a separate media file.
    Streamed,
    Other(u8),
}

impl From<u8> for EmbedType {
    fn from(value: u8) -> Self {
        match value {
            0 => EmbedType::Embedded,
            1 => EmbedType::Streamed,
            other => EmbedType::Other(other),
        }
    }
}

/// Location of embedded audio data.
#[binread]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[br(little)]
pub struct EmbeddedFile {
    pub file_index: u32,
    pub file_length: u32,
}

/// A leaf object that plays a single audio stream.
#[binread]
#[derive(Debug, Clone, PartialEq)]
#[br(little, import(id: u32))]
pub struct Sound {
    #[br(calc = id)]
    pub id: u32,

    #[br(pad_before = 4)]
    #[br(map = |x: u8| EmbedType::from(x))]
    pub embed_type: EmbedType,

    /// The audio stream this sound plays. This is *not* the same as the object id.
    pub audio_id: u32,
    pub source_id: u32,

    /// Only present for embedded sounds.
    #[br(if(embed_type == EmbedType::Embedded))]
    pub file: Option<EmbeddedFile>,

    pub sound_type: u32,
}
