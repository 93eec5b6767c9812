// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

/// Errors that abort decoding of a single bank.
///
/// Anything that isn't listed here (unknown sections, unknown object types, dangling references)
/// is logged through `tracing` and decoding continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    /// A read went past the end of the buffer, or past the end of a bounded sub-cursor.
    BufferUnderrun {
        /// Absolute offset into the bank where the read started.
        offset: u64,
        /// How many bytes the read needed, if known up front.
        requested: Option<u64>,
        /// How many bytes were actually left.
        available: u64,
    },
    /// A section or record declared a size larger than what's left of its parent.
    LengthOverflow {
        /// Absolute offset of the size field's owner.
        offset: u64,
        /// The declared size.
        declared: u64,
        /// How many bytes were actually left.
        remaining: u64,
    },
    /// A HIRC record declared a length too small to even contain its own id.
    InvalidRecordLength {
        /// Absolute offset of the record header.
        offset: u64,
        /// The declared length.
        length: u32,
    },
    /// A record decoded fine, but left some of its declared bytes unread.
    RecordLengthMismatch {
        /// The object id.
        id: u32,
        /// The declared payload length, not counting the id.
        declared: u64,
        /// How many bytes the decoder actually consumed.
        consumed: u64,
    },
    /// binrw rejected the data for a reason other than running out of bytes.
    ParsingFailed {
        /// Absolute offset where parsing failed.
        offset: u64,
        /// What binrw had to say about it.
        message: String,
    },
    /// The alias table couldn't be loaded.
    InvalidAliasTable {
        /// Why it couldn't be loaded.
        message: String,
    },
}

impl BankError {
    /// Converts a binrw error that happened inside a cursor starting at `base`.
    pub(crate) fn from_binrw(err: binrw::Error, base: u64, offset: u64, available: u64) -> Self {
        if err.is_eof() {
            BankError::BufferUnderrun {
                offset: base + offset,
                requested: None,
                available,
            }
        } else {
            BankError::ParsingFailed {
                offset: base + offset,
                message: err.to_string(),
            }
        }
    }

    /// Whether this error aborts the whole bank, rather than just the record it happened in.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, BankError::RecordLengthMismatch { .. })
    }
}

impl std::fmt::Display for BankError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BankError::BufferUnderrun {
                offset,
                requested: Some(requested),
                available,
            } => write!(
                f,
                "buffer underrun at {offset:#x}: needed {requested} bytes, {available} left"
            ),
            BankError::BufferUnderrun {
                offset,
                requested: None,
                available,
            } => write!(f, "buffer underrun at {offset:#x}: only {available} bytes left"),
            BankError::LengthOverflow {
                offset,
                declared,
                remaining,
            } => write!(
                f,
                "declared length {declared} at {offset:#x} exceeds the {remaining} remaining bytes"
            ),
            BankError::InvalidRecordLength { offset, length } => {
                write!(f, "invalid record length {length} at {offset:#x}")
            }
            BankError::RecordLengthMismatch {
                id,
                declared,
                consumed,
            } => write!(
                f,
                "record {id} declared {declared} bytes but only {consumed} were consumed"
            ),
            BankError::ParsingFailed { offset, message } => {
                write!(f, "parsing failed at {offset:#x}: {message}")
            }
            BankError::InvalidAliasTable { message } => {
                write!(f, "invalid alias table: {message}")
            }
        }
    }
}

impl std::error::Error for BankError {}
