// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use binrw::binread;

/// Sets a state group to a value.
pub const ACTION_SET_STATE: u8 = 0x12;
/// Sets a switch group to a value.
pub const ACTION_SET_SWITCH: u8 = 0x19;

fn has_condition(action_type: u8) -> bool {
    action_type == ACTION_SET_STATE || action_type == ACTION_SET_SWITCH
}

/// A single tagged parameter on an action.
///
/// Every parameter is four bytes wide, whether it's an integer or a float. Which one it is depends
/// on the tag.
#[binread]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[br(little)]
pub struct ActionParam {
    pub tag: u8,
    pub value: u32,
}

impl ActionParam {
    /// Tags known to hold floats (delays and transition times).
    pub fn is_float(&self) -> bool {
        self.tag == 0x0E || self.tag == 0x0F
    }

    /// Reinterprets the raw value as a float.
    pub fn value_f32(&self) -> f32 {
        f32::from_bits(self.value)
    }
}

/// The group and value a set-state or set-switch action applies.
#[binread]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[br(little)]
pub struct ActionCondition {
    #[br(pad_before = 1)]
    pub group_id: u32,
    pub condition_id: u32,
}

/// Something an event does, like playing or stopping an object.
#[binread]
#[derive(Debug, Clone, PartialEq)]
#[br(little, import(id: u32))]
pub struct EventAction {
    #[br(calc = id)]
    pub id: u32,

    pub scope: u8,
    pub action_type: u8,
    /// The object this action operates on. Can be any kind of object.
    pub target_id: u32,

    #[br(temp)]
    #[br(pad_before = 1)]
    param_count: u8,

    #[br(count = param_count)]
    pub params: Vec<ActionParam>,

    #[br(if(has_condition(action_type)))]
    pub condition: Option<ActionCondition>,
}
