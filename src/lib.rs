// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decodes sound banks, and figures out which game events end up playing which audio streams.
//!
//! Event ids in a bank are hashes of the event names, so you'll need a list of names the game
//! uses to get anything readable back out. See [`decode`] to get started.

/// Represents a continuous block of memory which is not owned, and comes either from an in-memory location or from a file.
pub type ByteSpan<'a> = &'a [u8];

/// Represents a continuous block of memory which is owned.
pub type ByteBuffer = Vec<u8>;

/// Errors that can happen while decoding a bank.
pub mod error;

/// Bounds-checked reading of bank data.
pub mod cursor;

/// The FNV-1 hash used for object ids.
pub mod fnv;

/// Objects in a bank's hierarchy (HIRC) section.
pub mod hirc;

/// Walking the top-level sections of a bank.
pub mod section;

/// Resolving event ids back into names.
pub mod names;

/// Following events down to the audio they play.
pub mod graph;

/// Rendering the event hierarchy as text.
pub mod tree;

/// Decoding whole banks.
pub mod bank;

pub use bank::{
    Bank, BankResolution, DecodeOptions, decode, decode_objects, decode_with_options,
    decode_with_resolver,
};
#[cfg(feature = "parallel")]
pub use bank::decode_many;
pub use error::BankError;
pub use names::{AliasTable, EventNameResolver};

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod tests {
    use std::fs::read;
    use std::path::PathBuf;

    use super::*;
    use crate::cursor::ByteCursor;
    use crate::hirc::decode_object;

    fn random_data() -> ByteBuffer {
        let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        d.push("resources/tests");
        d.push("random");

        read(d).unwrap()
    }

    #[test]
    fn test_invalid() {
        let data = random_data();

        // Feeding it invalid data should not panic
        let _ = decode(&data, ["Play_Test"], None);
        let _ = Bank::from_existing(&data);
    }

    #[test]
    fn test_invalid_hierarchy() {
        let data = random_data();

        // wrap it in a HIRC section, so it gets past the section scanner
        let mut bank = b"HIRC".to_vec();
        bank.extend_from_slice(&(data.len() as u32).to_le_bytes());
        bank.extend_from_slice(&data);

        let _ = decode(&bank, ["Play_Test"], None);
    }

    #[test]
    fn test_invalid_records() {
        let data = random_data();

        for type_tag in 0..=16 {
            for start in (0..64).step_by(7) {
                let mut cursor = ByteCursor::new(&data[start..start + 256]);
                let _ = decode_object(1, type_tag, &mut cursor);
            }
        }
    }
}
