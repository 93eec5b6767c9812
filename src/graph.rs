// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, warn};

use crate::hirc::{Event, HircObject, ObjectKind, ObjectTable, Switch};

type Visited = HashSet<(ObjectKind, u32)>;

enum Node<'b> {
    Object(&'b HircObject),
    Switch(&'b Switch),
}

/// Walks from events down to the audio streams they can play.
#[derive(Debug, Clone, Copy)]
pub struct AudioGraph<'a> {
    table: &'a ObjectTable,
}

impl<'a> AudioGraph<'a> {
    pub fn new(table: &'a ObjectTable) -> Self {
        Self { table }
    }

    /// The object an event action points at, if both exist.
    pub fn action_target(&self, event_id: u32, action_id: u32) -> Option<&'a HircObject> {
        let action = match self.table.get(action_id) {
            Some(HircObject::EventAction(action)) => action,
            Some(other) => {
                warn!(event_id, action_id, kind = ?other.kind(), "Event action is not an action");
                return None;
            }
            None => {
                warn!(event_id, action_id, "Missing event action");
                return None;
            }
        };

        let target = self.table.get(action.target_id);
        if target.is_none() && action.target_id != 0 {
            warn!(event_id, action_id, target_id = action.target_id, "Missing action target");
        }

        target
    }

    /// Every audio stream id reachable from `event`.
    pub fn event_audio(&self, event: &Event) -> BTreeSet<u32> {
        let mut audio = BTreeSet::new();
        let mut visited = Visited::new();

        for action_id in &event.action_ids {
            if let Some(target) = self.action_target(event.id, *action_id) {
                self.expand(target, &mut visited, &mut audio);
            }
        }

        audio
    }

    /// Every audio stream id reachable from `object`.
    pub fn object_audio(&self, object: &HircObject) -> BTreeSet<u32> {
        let mut audio = BTreeSet::new();
        self.expand(object, &mut Visited::new(), &mut audio);
        audio
    }

    fn expand(&self, root: &HircObject, visited: &mut Visited, audio: &mut BTreeSet<u32>) {
        // deep hierarchies are legal, so this walks a worklist instead of recursing
        let mut pending = vec![Node::Object(root)];

        while let Some(node) = pending.pop() {
            let object = match node {
                Node::Object(object) => object,
                Node::Switch(switch) => {
                    // branches are expanded from their container, rather than looked up in the
                    // table, since switch values can be shared between containers
                    if !visited.insert((ObjectKind::Switch, switch.id)) {
                        debug!(id = switch.id, "Already visited switch");
                        continue;
                    }

                    self.push_children(&switch.member_ids, &mut pending);
                    continue;
                }
            };

            if !visited.insert((object.kind(), object.id())) {
                debug!(id = object.id(), kind = ?object.kind(), "Already visited");
                continue;
            }

            match object {
                HircObject::Sound(sound) => {
                    audio.insert(sound.audio_id);
                }
                HircObject::Container(container) => {
                    self.push_children(&container.child_ids, &mut pending);
                }
                HircObject::SwitchContainer(container) => {
                    self.push_children(&container.child_ids, &mut pending);
                    pending.extend(container.switches.iter().map(Node::Switch));
                }
                HircObject::Switch(switch) => {
                    self.push_children(&switch.member_ids, &mut pending);
                }
                HircObject::Event(_) | HircObject::EventAction(_) | HircObject::Unknown(_) => {
                    warn!(id = object.id(), kind = ?object.kind(), "Object doesn't lead to audio");
                }
            }
        }
    }

    fn push_children<'b>(&'b self, ids: &[u32], pending: &mut Vec<Node<'b>>) {
        for id in ids {
            match self.table.get(*id) {
                Some(child) => pending.push(Node::Object(child)),
                None if *id != 0 => warn!(id, "Missing child object"),
                None => {}
            }
        }
    }
}
