// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use binrw::{BinReaderExt, BinResult, binread};
use tracing::warn;

/// Which set of addition flags a parameter table understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParamLayout {
    Container,
    SwitchContainer,
}

/// Extra data trailing a container parameter, depending on its addition flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamExtra {
    /// Flag 3.
    Byte(u8),
    /// Flag 2, only seen on plain containers.
    Pair(u32, u32),
}

/// A parameter on a container. Most of these aren't understood yet, and are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamDescriptor {
    pub type_tag: u8,
    pub value: u16,
    pub addition_flag: u8,
    pub extra: Option<ParamExtra>,
}

// The parameter table stores all of the type tags first, and then the values.
#[binrw::parser(reader, endian)]
fn param_table_parser(layout: ParamLayout) -> BinResult<Vec<ParamDescriptor>> {
    let count: u8 = reader.read_type(endian)?;

    let mut type_tags = Vec::with_capacity(count as usize);
    for _ in 0..count {
        type_tags.push(reader.read_type::<u8>(endian)?);
    }

    // always zero
    reader.read_type::<[u8; 2]>(endian)?;

    let mut params = Vec::with_capacity(type_tags.len());
    for type_tag in type_tags {
        let value: u16 = reader.read_type(endian)?;
        reader.read_type::<u8>(endian)?;
        let addition_flag: u8 = reader.read_type(endian)?;

        let extra = match (layout, addition_flag) {
            (_, 3) => Some(ParamExtra::Byte(reader.read_type(endian)?)),
            (ParamLayout::Container, 2) => {
                let first = reader.read_type(endian)?;
                let second = reader.read_type(endian)?;
                reader.read_type::<u8>(endian)?;
                Some(ParamExtra::Pair(first, second))
            }
            (ParamLayout::Container, 0 | 204) | (ParamLayout::SwitchContainer, 0) => None,
            (layout, flag) => {
                warn!(?layout, flag, type_tag, "Unknown param addition, assuming no extra data");
                None
            }
        };

        params.push(ParamDescriptor {
            type_tag,
            value,
            addition_flag,
            extra,
        });
    }

    Ok(params)
}

/// Groups several sounds together, such as a random or sequence container.
#[binread]
#[derive(Debug, Clone, PartialEq)]
#[br(little, import(id: u32))]
pub struct Container {
    #[br(calc = id)]
    pub id: u32,

    // three unknown bytes, two unknown ids and a zero byte
    #[br(pad_before = 3 + 4 + 4 + 1)]
    #[br(parse_with = param_table_parser, args(ParamLayout::Container))]
    pub params: Vec<ParamDescriptor>,

    // unknown ids and padding:
    // 00 00, two ids, 00, two ids, two ids, 00 00, a short and 00, a short and 00
    #[br(temp)]
    #[br(pad_before = 2 + 4 + 4 + 1 + 4 + 4 + 4 + 4 + 2 + 3 + 3)]
    sound_count: u32,

    #[br(count = sound_count)]
    pub child_ids: Vec<u32>,
}

/// One branch of a switch container: the sounds to play when the switch group has this value.
///
/// These are pulled out of their container into the object table, so they can be looked up by id
/// like everything else. The id is the switch value itself.
#[binread]
#[derive(Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct Switch {
    pub id: u32,

    #[br(temp)]
    member_count: u32,

    #[br(count = member_count)]
    pub member_ids: Vec<u32>,
}

/// A container that picks which children to play based on a switch group.
#[binread]
#[derive(Debug, Clone, PartialEq)]
#[br(little, import(id: u32))]
pub struct SwitchContainer {
    #[br(calc = id)]
    pub id: u32,

    #[br(pad_before = 3 + 4 + 4 + 1)]
    #[br(parse_with = param_table_parser, args(ParamLayout::SwitchContainer))]
    pub params: Vec<ParamDescriptor>,

    // 00 00, two unknown ids, 00 00
    #[br(pad_before = 2 + 4 + 4 + 2)]
    pub group_id: u32,
    pub default_switch_id: u32,

    #[br(temp)]
    #[br(pad_before = 1)]
    sound_count: u32,

    /// Children shared between every branch.
    #[br(count = sound_count)]
    pub child_ids: Vec<u32>,

    #[br(temp)]
    switch_count: u32,

    #[br(count = switch_count)]
    pub switches: Vec<Switch>,
}

impl SwitchContainer {
    /// Ids of every branch, in the order they were stored.
    pub fn switch_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.switches.iter().map(|switch| switch.id)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use binrw::BinRead;

    use super::*;

    fn lead(params: &[(u8, u16, u8, &[u8])]) -> Vec<u8> {
        let mut data = vec![0u8; 3 + 4 + 4 + 1];
        data.push(params.len() as u8);
        for (type_tag, _, _, _) in params {
            data.push(*type_tag);
        }
        data.extend_from_slice(&[0, 0]);
        for (_, value, flag, extra) in params {
            data.extend_from_slice(&value.to_le_bytes());
            data.push(0);
            data.push(*flag);
            data.extend_from_slice(extra);
        }
        data
    }

    fn push_ids(data: &mut Vec<u8>, ids: &[u32]) {
        data.extend_from_slice(&(ids.len() as u32).to_le_bytes());
        for id in ids {
            data.extend_from_slice(&id.to_le_bytes());
        }
    }

    #[test]
    fn container_with_params() {
        let mut data = lead(&[
            (0x3A, 100, 3, &[9]),
            (0x3B, 200, 2, &[1, 0, 0, 0, 2, 0, 0, 0, 0]),
            (0x3C, 300, 204, &[]),
            (0x3D, 400, 0, &[]),
        ]);
        data.extend_from_slice(&[0u8; 35]);
        push_ids(&mut data, &[10, 11]);

        let mut cursor = Cursor::new(&data);
        let container = Container::read_le_args(&mut cursor, (42,)).unwrap();

        assert_eq!(container.id, 42);
        assert_eq!(container.child_ids, vec![10, 11]);
        assert_eq!(container.params.len(), 4);
        assert_eq!(container.params[0].extra, Some(ParamExtra::Byte(9)));
        assert_eq!(container.params[1].extra, Some(ParamExtra::Pair(1, 2)));
        assert_eq!(container.params[2].extra, None);
        assert_eq!(
            container.params[3],
            ParamDescriptor {
                type_tag: 0x3D,
                value: 400,
                addition_flag: 0,
                extra: None
            }
        );
        assert_eq!(cursor.position(), data.len() as u64);
    }

    #[test]
    fn unknown_addition_is_not_fatal() {
        let mut data = lead(&[(0x3A, 100, 77, &[])]);
        data.extend_from_slice(&[0u8; 35]);
        push_ids(&mut data, &[10]);

        let container = Container::read_le_args(&mut Cursor::new(&data), (42,)).unwrap();
        assert_eq!(container.params[0].extra, None);
        assert_eq!(container.child_ids, vec![10]);
    }

    #[test]
    fn switch_container() {
        let mut data = lead(&[(0x3A, 100, 3, &[1])]);
        data.extend_from_slice(&[0u8; 12]);
        data.extend_from_slice(&5u32.to_le_bytes()); // group
        data.extend_from_slice(&6u32.to_le_bytes()); // default switch
        data.push(0);
        push_ids(&mut data, &[30]);
        data.extend_from_slice(&2u32.to_le_bytes());
        data.extend_from_slice(&100u32.to_le_bytes());
        push_ids(&mut data, &[10]);
        data.extend_from_slice(&200u32.to_le_bytes());
        push_ids(&mut data, &[20, 21]);

        let mut cursor = Cursor::new(&data);
        let container = SwitchContainer::read_le_args(&mut cursor, (1,)).unwrap();

        assert_eq!(container.group_id, 5);
        assert_eq!(container.default_switch_id, 6);
        assert_eq!(container.child_ids, vec![30]);
        assert_eq!(container.switch_ids().collect::<Vec<_>>(), vec![100, 200]);
        assert_eq!(container.switches[1].member_ids, vec![20, 21]);
        assert_eq!(cursor.position(), data.len() as u64);
    }

    #[test]
    fn switch_container_ignores_pair_addition() {
        // flag 2 carries no extra bytes in a switch container
        let mut data = lead(&[(0x3A, 100, 2, &[])]);
        data.extend_from_slice(&[0u8; 12]);
        data.extend_from_slice(&[0u8; 8]);
        data.push(0);
        push_ids(&mut data, &[]);
        push_ids(&mut data, &[]);

        let mut cursor = Cursor::new(&data);
        let container = SwitchContainer::read_le_args(&mut cursor, (1,)).unwrap();
        assert_eq!(container.params[0].extra, None);
        assert!(container.switches.is_empty());
        assert_eq!(cursor.position(), data.len() as u64);
    }
}
