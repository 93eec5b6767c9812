// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use tracing::{debug, trace, warn};

use crate::bank::DecodeOptions;
use crate::cursor::ByteCursor;
use crate::error::BankError;
use crate::hirc::{DecodedRecord, HircObject, ObjectTable, decode_object};

/// Bank header. We don't need anything from it.
pub const BKHD: [u8; 4] = *b"BKHD";
/// The object hierarchy.
pub const HIRC: [u8; 4] = *b"HIRC";

/// Walks every top-level section in `cursor`, adding decoded objects to `table`.
///
/// Sections other than the header and the hierarchy (such as DIDX and DATA) are skipped.
pub fn scan_sections(
    cursor: &mut ByteCursor,
    options: &DecodeOptions,
    table: &mut ObjectTable,
) -> Result<(), BankError> {
    while !cursor.is_end() {
        let offset = cursor.absolute_position();
        let tag = cursor.read_tag()?;
        let size = cursor.read::<u32>()? as u64;

        if size > cursor.remaining() {
            return Err(BankError::LengthOverflow {
                offset,
                declared: size,
                remaining: cursor.remaining(),
            });
        }

        match tag {
            HIRC => {
                let mut section = cursor.sub(size)?;
                read_hierarchy(&mut section, options, table)?;
            }
            BKHD => cursor.skip(size)?,
            _ => {
                warn!(
                    tag = %String::from_utf8_lossy(&tag),
                    size,
                    offset,
                    "Unknown bank section"
                );
                cursor.skip(size)?;
            }
        }
    }

    Ok(())
}

fn read_hierarchy(
    section: &mut ByteCursor,
    options: &DecodeOptions,
    table: &mut ObjectTable,
) -> Result<(), BankError> {
    let object_count = section.read::<u32>()?;
    debug!(object_count, "Reading HIRC section");

    for _ in 0..object_count {
        let offset = section.absolute_position();
        let type_tag = section.read::<u8>()?;
        let length = section.read::<u32>()?;
        let id = section.read::<u32>()?;

        trace!(id, type_tag, length, offset, "HIRC object");

        // the length includes the id we just read
        if length < 4 {
            return Err(BankError::InvalidRecordLength { offset, length });
        }
        let payload_length = (length - 4) as u64;
        if payload_length > section.remaining() {
            return Err(BankError::LengthOverflow {
                offset,
                declared: length as u64,
                remaining: section.remaining() + 4,
            });
        }

        let mut record = section.sub(payload_length)?;

        match decode_record(id, type_tag, &mut record, options) {
            Ok((object, extras)) => {
                table.extend(object);
                table.extend(extras);
            }
            Err(err) if !err.is_fatal() => {
                warn!(%err, type_tag, "Dropping record");
            }
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

/// Decodes a record, and checks that it used up exactly the bytes it declared.
fn decode_record(
    id: u32,
    type_tag: u8,
    record: &mut ByteCursor,
    options: &DecodeOptions,
) -> Result<DecodedRecord, BankError> {
    let (object, extras) = decode_object(id, type_tag, record)?;

    // ignored and unknown objects never read their payload
    let decoded = matches!(&object, Some(object) if !matches!(object, HircObject::Unknown(_)));

    if decoded && !record.is_end() {
        let err = BankError::RecordLengthMismatch {
            id,
            declared: record.len(),
            consumed: record.tell(),
        };

        if options.strict_record_length {
            return Err(err);
        }

        debug!(%err, "Ignoring trailing record bytes");
    }

    Ok((object, extras))
}
