// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Builds small synthetic banks for tests.

use crate::ByteBuffer;

fn push_ids(data: &mut ByteBuffer, ids: &[u32]) {
    data.extend_from_slice(&(ids.len() as u32).to_le_bytes());
    for id in ids {
        data.extend_from_slice(&id.to_le_bytes());
    }
}

/// A HIRC record: type tag, length (which counts the id), id, and then the payload.
pub(crate) fn record(type_tag: u8, id: u32, payload: &[u8]) -> ByteBuffer {
    let mut data = vec![type_tag];
    data.extend_from_slice(&(payload.len() as u32 + 4).to_le_bytes());
    data.extend_from_slice(&id.to_le_bytes());
    data.extend_from_slice(payload);
    data
}

/// A streamed sound.
pub(crate) fn sound(id: u32, audio_id: u32) -> ByteBuffer {
    let mut payload = vec![0u8; 4];
    payload.push(1);
    payload.extend_from_slice(&audio_id.to_le_bytes());
    payload.extend_from_slice(&0u32.to_le_bytes());
    payload.extend_from_slice(&0u32.to_le_bytes());
    record(2, id, &payload)
}

/// A play action without any parameters.
pub(crate) fn action(id: u32, target_id: u32) -> ByteBuffer {
    let mut payload = vec![3u8, 4];
    payload.extend_from_slice(&target_id.to_le_bytes());
    payload.extend_from_slice(&[0, 0]);
    record(3, id, &payload)
}

pub(crate) fn event(id: u32, action_ids: &[u32]) -> ByteBuffer {
    let mut payload = vec![action_ids.len() as u8];
    for action_id in action_ids {
        payload.extend_from_slice(&action_id.to_le_bytes());
    }
    record(4, id, &payload)
}

fn empty_param_table() -> ByteBuffer {
    let mut payload = vec![0u8; 3 + 4 + 4 + 1];
    payload.push(0);
    payload.extend_from_slice(&[0, 0]);
    payload
}

pub(crate) fn container(id: u32, child_ids: &[u32]) -> ByteBuffer {
    let mut payload = empty_param_table();
    payload.extend_from_slice(&[0u8; 35]);
    push_ids(&mut payload, child_ids);
    record(5, id, &payload)
}

pub(crate) fn switch_container(id: u32, shared: &[u32], switches: &[(u32, &[u32])]) -> ByteBuffer {
    let mut payload = empty_param_table();
    payload.extend_from_slice(&[0u8; 12]);
    payload.extend_from_slice(&1u32.to_le_bytes());
    payload.extend_from_slice(&2u32.to_le_bytes());
    payload.push(0);
    push_ids(&mut payload, shared);
    payload.extend_from_slice(&(switches.len() as u32).to_le_bytes());
    for (switch_id, members) in switches {
        payload.extend_from_slice(&switch_id.to_le_bytes());
        push_ids(&mut payload, members);
    }
    record(6, id, &payload)
}

/// Appends top-level sections one after another.
#[derive(Default)]
pub(crate) struct BankBuilder {
    data: ByteBuffer,
}

impl BankBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn section(mut self, tag: &[u8; 4], payload: &[u8]) -> Self {
        self.data.extend_from_slice(tag);
        self.data.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        self.data.extend_from_slice(payload);
        self
    }

    pub(crate) fn header(self) -> Self {
        self.section(b"BKHD", &[0x8C, 0, 0, 0, 0x10, 0x20, 0x30, 0x40])
    }

    pub(crate) fn hirc(self, records: &[ByteBuffer]) -> Self {
        let mut payload = (records.len() as u32).to_le_bytes().to_vec();
        for record in records {
            payload.extend_from_slice(record);
        }
        self.section(b"HIRC", &payload)
    }

    pub(crate) fn build(self) -> ByteBuffer {
        self.data
    }
}
