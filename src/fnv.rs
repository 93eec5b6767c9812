// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

const FNV_OFFSET_BASIS: u32 = 0x811c9dc5;
const FNV_PRIME: u32 = 0x01000193;

/// 32-bit FNV-1 (multiply, then xor), the hash banks use to turn names into object ids.
///
/// Note that this is *not* FNV-1a, which does the xor first.
pub const fn fnv1(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash = hash.wrapping_mul(FNV_PRIME);
        hash ^= bytes[i] as u32;
        i += 1;
    }

    hash
}

/// Hashes a name the way the sound engine does, which is case-insensitive.
pub fn hash_name(name: &str) -> u32 {
    fnv1(name.to_ascii_lowercase().as_bytes())
}
