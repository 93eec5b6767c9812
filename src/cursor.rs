// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Cursor;

use binrw::BinRead;

use crate::ByteSpan;
use crate::error::BankError;

/// A bounds-checked, little-endian reader over an in-memory buffer.
///
/// Sub-cursors created with [`ByteCursor::sub`] can only see their own slice, so a decoder that
/// misjudges a record's layout fails instead of reading into the next record.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    cursor: Cursor<ByteSpan<'a>>,
    /// Where this cursor's slice starts within the root buffer.
    base: u64,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor at the start of `buffer`.
    pub fn new(buffer: ByteSpan<'a>) -> Self {
        Self {
            cursor: Cursor::new(buffer),
            base: 0,
        }
    }

    /// Size of the slice this cursor can see.
    pub fn len(&self) -> u64 {
        self.cursor.get_ref().len() as u64
    }

    /// Whether the slice this cursor can see is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current position, relative to the start of this cursor.
    pub fn tell(&self) -> u64 {
        self.cursor.position()
    }

    /// Current position within the root buffer.
    pub fn absolute_position(&self) -> u64 {
        self.base + self.tell()
    }

    pub fn remaining(&self) -> u64 {
        self.len().saturating_sub(self.tell())
    }

    pub fn is_end(&self) -> bool {
        self.remaining() == 0
    }

    fn ensure(&self, requested: u64) -> Result<(), BankError> {
        if requested > self.remaining() {
            return Err(BankError::BufferUnderrun {
                offset: self.absolute_position(),
                requested: Some(requested),
                available: self.remaining(),
            });
        }

        Ok(())
    }

    /// Reads a value that doesn't need any arguments, such as an integer or a fixed-size array.
    pub fn read<T>(&mut self) -> Result<T, BankError>
    where
        T: for<'b> BinRead<Args<'b> = ()>,
    {
        self.read_args::<T>(())
    }

    /// Reads a value with binrw import arguments.
    pub fn read_args<'b, T: BinRead>(&mut self, args: T::Args<'b>) -> Result<T, BankError> {
        let start = self.tell();
        let available = self.remaining();
        let base = self.base;

        let value = match T::read_le_args(&mut self.cursor, args) {
            Ok(value) => value,
            Err(err) => {
                // a failed read leaves the cursor where it was
                self.cursor.set_position(start);
                return Err(BankError::from_binrw(err, base, start, available));
            }
        };

        // padding is skipped by seeking, which a Cursor happily does past the end
        if self.tell() > self.len() {
            return Err(BankError::BufferUnderrun {
                offset: base + start,
                requested: Some(self.tell() - start),
                available,
            });
        }

        Ok(value)
    }

    /// Reads `count` consecutive values.
    pub fn read_array<T>(&mut self, count: usize) -> Result<Vec<T>, BankError>
    where
        T: for<'b> BinRead<Args<'b> = ()>,
    {
        (0..count).map(|_| self.read::<T>()).collect()
    }

    /// Reads a four character section tag.
    pub fn read_tag(&mut self) -> Result<[u8; 4], BankError> {
        self.read::<[u8; 4]>()
    }

    /// Moves to an absolute position within this cursor.
    pub fn seek(&mut self, pos: u64) -> Result<(), BankError> {
        if pos > self.len() {
            return Err(BankError::BufferUnderrun {
                offset: self.base + pos,
                requested: Some(pos - self.tell().min(pos)),
                available: self.remaining(),
            });
        }

        self.cursor.set_position(pos);
        Ok(())
    }

    /// Skips over `n` bytes.
    pub fn skip(&mut self, n: u64) -> Result<(), BankError> {
        self.ensure(n)?;
        self.cursor.set_position(self.tell() + n);
        Ok(())
    }

    /// Splits off the next `len` bytes into their own cursor, and moves past them.
    pub fn sub(&mut self, len: u64) -> Result<ByteCursor<'a>, BankError> {
        self.ensure(len)?;

        let start = self.tell();
        let end = start + len;
        let buffer: ByteSpan<'a> = *self.cursor.get_ref();

        let sub = ByteCursor {
            cursor: Cursor::new(&buffer[start as usize..end as usize]),
            base: self.base + start,
        };

        self.cursor.set_position(end);

        Ok(sub)
    }
}
