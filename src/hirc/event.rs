// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use binrw::binread;

/// A named trigger the game fires. Its id is the FNV-1 hash of its name.
#[binread]
#[derive(Debug, Clone, PartialEq, Eq)]
#[br(little, import(id: u32))]
pub struct Event {
    #[br(calc = id)]
    pub id: u32,

    #[br(temp)]
    action_count: u8,

    /// Ids of the [`EventAction`](super::EventAction)s this event runs, in order.
    #[br(count = action_count)]
    pub action_ids: Vec<u32>,
}
