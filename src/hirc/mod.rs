// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, error};

use crate::cursor::ByteCursor;
use crate::error::BankError;

mod action;
pub use action::ACTION_SET_STATE;
pub use action::ACTION_SET_SWITCH;
pub use action::ActionCondition;
pub use action::ActionParam;
pub use action::EventAction;

mod container;
pub use container::Container;
pub use container::ParamDescriptor;
pub use container::ParamExtra;
pub use container::Switch;
pub use container::SwitchContainer;

mod event;
pub use event::Event;

mod sound;
pub use sound::EmbedType;
pub use sound::EmbeddedFile;
pub use sound::Sound;

/// The type tag in front of every object in the HIRC section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HircType {
    Sound,
    EventAction,
    Event,
    Container,
    SwitchContainer,
    ActorMixer,
    Attenuation,
    Other(u8),
}

impl From<u8> for HircType {
    fn from(value: u8) -> Self {
        match value {
            2 => HircType::Sound,
            3 => HircType::EventAction,
            4 => HircType::Event,
            5 => HircType::Container,
            6 => HircType::SwitchContainer,
            7 => HircType::ActorMixer,
            14 => HircType::Attenuation,
            other => HircType::Other(other),
        }
    }
}

/// An object whose type we don't decode. Only kept around so it shows up in the object table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownObject {
    pub id: u32,
    pub type_tag: u8,
}

/// Which variant a [`HircObject`] is, without any of its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Sound,
    EventAction,
    Event,
    Container,
    SwitchContainer,
    Switch,
    Unknown,
}

/// An object in a bank's hierarchy.
///
/// All objects share one id namespace, so any reference (an action's target, a container's child)
/// may point at any variant.
#[derive(Debug, Clone, PartialEq)]
pub enum HircObject {
    Sound(Sound),
    EventAction(EventAction),
    Event(Event),
    Container(Container),
    SwitchContainer(SwitchContainer),
    /// Doesn't exist on its own in the bank, but is split out of a [`SwitchContainer`].
    Switch(Switch),
    Unknown(UnknownObject),
}

impl HircObject {
    pub fn id(&self) -> u32 {
        match self {
            HircObject::Sound(sound) => sound.id,
            HircObject::EventAction(action) => action.id,
            HircObject::Event(event) => event.id,
            HircObject::Container(container) => container.id,
            HircObject::SwitchContainer(container) => container.id,
            HircObject::Switch(switch) => switch.id,
            HircObject::Unknown(unknown) => unknown.id,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            HircObject::Sound(_) => ObjectKind::Sound,
            HircObject::EventAction(_) => ObjectKind::EventAction,
            HircObject::Event(_) => ObjectKind::Event,
            HircObject::Container(_) => ObjectKind::Container,
            HircObject::SwitchContainer(_) => ObjectKind::SwitchContainer,
            HircObject::Switch(_) => ObjectKind::Switch,
            HircObject::Unknown(_) => ObjectKind::Unknown,
        }
    }
}

impl fmt::Display for HircObject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HircObject::Sound(sound) => write!(
                f,
                "Sound:{} audio:{} source:{} {:?}",
                sound.id, sound.audio_id, sound.source_id, sound.embed_type
            ),
            HircObject::EventAction(action) => write!(
                f,
                "EventAction:{} type:{:#04x} scope:{} target:{}",
                action.id, action.action_type, action.scope, action.target_id
            ),
            HircObject::Event(event) => {
                write!(f, "Event:{} actions:{}", event.id, event.action_ids.len())
            }
            HircObject::Container(container) => write!(
                f,
                "Container:{} children:{}",
                container.id,
                container.child_ids.len()
            ),
            HircObject::SwitchContainer(container) => write!(
                f,
                "SwitchContainer:{} group:{} default:{} children:{} switches:{}",
                container.id,
                container.group_id,
                container.default_switch_id,
                container.child_ids.len(),
                container.switches.len()
            ),
            HircObject::Switch(switch) => {
                write!(f, "Switch:{} members:{}", switch.id, switch.member_ids.len())
            }
            HircObject::Unknown(unknown) => {
                write!(f, "Unknown:{} type:{}", unknown.id, unknown.type_tag)
            }
        }
    }
}

/// The primary object decoded from a record (if it isn't ignored), and any objects split out of it.
pub type DecodedRecord = (Option<HircObject>, Vec<HircObject>);

/// Decodes a single HIRC record, whose payload `cursor` is bounded to.
pub fn decode_object(
    id: u32,
    type_tag: u8,
    cursor: &mut ByteCursor,
) -> Result<DecodedRecord, BankError> {
    let object = match HircType::from(type_tag) {
        HircType::Sound => HircObject::Sound(cursor.read_args::<Sound>((id,))?),
        HircType::EventAction => HircObject::EventAction(cursor.read_args::<EventAction>((id,))?),
        HircType::Event => HircObject::Event(cursor.read_args::<Event>((id,))?),
        HircType::Container => HircObject::Container(cursor.read_args::<Container>((id,))?),
        HircType::SwitchContainer => {
            let container = cursor.read_args::<SwitchContainer>((id,))?;
            let extras = container
                .switches
                .iter()
                .cloned()
                .map(HircObject::Switch)
                .collect();

            return Ok((Some(HircObject::SwitchContainer(container)), extras));
        }
        HircType::ActorMixer | HircType::Attenuation => return Ok((None, Vec::new())),
        HircType::Other(type_tag) => {
            error!(id, type_tag, "Unknown HIRC object type");
            HircObject::Unknown(UnknownObject { id, type_tag })
        }
    };

    Ok((Some(object), Vec::new()))
}

/// Every object decoded from a bank, in the order they were decoded.
#[derive(Debug, Default, Clone)]
pub struct ObjectTable {
    objects: Vec<HircObject>,
    index: HashMap<u32, usize>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an object. If the id is already taken, lookups keep returning the first one.
    pub fn push(&mut self, object: HircObject) {
        let id = object.id();
        if self.index.contains_key(&id) {
            debug!(id, kind = ?object.kind(), "Duplicate object id");
        } else {
            self.index.insert(id, self.objects.len());
        }

        self.objects.push(object);
    }

    pub fn get(&self, id: u32) -> Option<&HircObject> {
        self.index.get(&id).map(|i| &self.objects[*i])
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HircObject> {
        self.objects.iter()
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.objects.iter().filter_map(|object| match object {
            HircObject::Event(event) => Some(event),
            _ => None,
        })
    }

    pub fn sounds(&self) -> impl Iterator<Item = &Sound> {
        self.objects.iter().filter_map(|object| match object {
            HircObject::Sound(sound) => Some(sound),
            _ => None,
        })
    }
}

impl Extend<HircObject> for ObjectTable {
    fn extend<T: IntoIterator<Item = HircObject>>(&mut self, iter: T) {
        for object in iter {
            self.push(object);
        }
    }
}
