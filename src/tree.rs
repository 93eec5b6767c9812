// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::borrow::Cow;
use std::collections::HashSet;

use crate::hirc::{HircObject, ObjectKind, ObjectTable};
use crate::names::EventNameResolver;

/// Renders the event hierarchy as tab-indented text, for debugging.
pub struct TreeRenderer<'a> {
    table: &'a ObjectTable,
    names: &'a EventNameResolver<'a>,
}

enum Step<'b> {
    Enter(Cow<'b, HircObject>, usize),
    Missing(u32, usize),
    Leave((ObjectKind, u32)),
}

impl<'a> TreeRenderer<'a> {
    pub fn new(table: &'a ObjectTable, names: &'a EventNameResolver<'a>) -> Self {
        Self { table, names }
    }

    /// Renders every event in the table, each followed by a blank line.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        for object in self.table.iter() {
            if let HircObject::Event(_) = object {
                self.render_event(object, &mut lines);
                lines.push(String::new());
            }
        }

        lines.join("\n")
    }

    // Uses an explicit stack, since hierarchies can nest deeper than the call stack allows.
    fn render_event(&self, event: &HircObject, lines: &mut Vec<String>) {
        let mut path = HashSet::new();
        let mut steps = vec![Step::Enter(Cow::Borrowed(event), 0)];

        while let Some(step) = steps.pop() {
            let (object, level) = match step {
                Step::Enter(object, level) => (object, level),
                Step::Missing(id, level) => {
                    push_line(lines, level, format!("UnknownObject:{id}"));
                    continue;
                }
                Step::Leave(key) => {
                    path.remove(&key);
                    continue;
                }
            };

            let label = match object.as_ref() {
                HircObject::Event(event) => format!("{object} {}", self.names.resolve(event.id)),
                _ => object.to_string(),
            };

            let key = (object.kind(), object.id());
            if !path.insert(key) {
                push_line(lines, level, format!("{label} (cycle)"));
                continue;
            }

            push_line(lines, level, label);
            steps.push(Step::Leave(key));

            let mut children = Vec::new();
            match object.as_ref() {
                HircObject::Event(event) => {
                    self.references(&event.action_ids, level + 1, &mut children);
                }
                HircObject::EventAction(action) => {
                    self.references(&[action.target_id], level + 1, &mut children);
                }
                HircObject::Container(container) => {
                    self.references(&container.child_ids, level + 1, &mut children);
                }
                HircObject::SwitchContainer(container) => {
                    // owned by the container, so rendered directly instead of through the table
                    for switch in &container.switches {
                        children.push(Step::Enter(
                            Cow::Owned(HircObject::Switch(switch.clone())),
                            level + 1,
                        ));
                    }
                    self.references(&container.child_ids, level + 1, &mut children);
                }
                HircObject::Switch(switch) => {
                    self.references(&switch.member_ids, level + 1, &mut children);
                }
                HircObject::Sound(_) | HircObject::Unknown(_) => {}
            }

            // popped in reverse, so children come out in order
            steps.extend(children.into_iter().rev());
        }
    }

    fn references<'b>(&'b self, ids: &[u32], level: usize, steps: &mut Vec<Step<'b>>) {
        for id in ids {
            match self.table.get(*id) {
                Some(object) => steps.push(Step::Enter(Cow::Borrowed(object), level)),
                None if *id != 0 => steps.push(Step::Missing(*id, level)),
                None => {}
            }
        }
    }
}

fn push_line(lines: &mut Vec<String>, level: usize, text: String) {
    lines.push(format!("{}{}", "\t".repeat(level), text));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{DecodeOptions, decode_objects};
    use crate::test_support::*;

    fn render(records: &[Vec<u8>], names: &[&str]) -> String {
        let data = BankBuilder::new().hirc(records).build();
        let table = decode_objects(&data, &DecodeOptions::default()).unwrap();
        let names = EventNameResolver::new(names.iter().copied(), None);

        TreeRenderer::new(&table, &names).render()
    }

    #[test]
    fn simple_event() {
        let tree = render(
            &[event(0xbdfd7fca, &[2]), action(2, 3), sound(3, 7)],
            &["Play_Test"],
        );

        assert_eq!(
            tree,
            "Event:3187507146 actions:1 Play_Test\n\
             \tEventAction:2 type:0x04 scope:3 target:3\n\
             \t\tSound:3 audio:7 source:0 Streamed\n"
        );
    }

    #[test]
    fn switch_branches_and_missing_objects() {
        let tree = render(
            &[
                event(1, &[2, 9]),
                action(2, 5),
                switch_container(5, &[8], &[(100, &[10])]),
                sound(10, 70),
            ],
            &[],
        );

        assert_eq!(
            tree,
            "Event:1 actions:2 1\n\
             \tEventAction:2 type:0x04 scope:3 target:5\n\
             \t\tSwitchContainer:5 group:1 default:2 children:1 switches:1\n\
             \t\t\tSwitch:100 members:1\n\
             \t\t\t\tSound:10 audio:70 source:0 Streamed\n\
             \t\t\tUnknownObject:8\n\
             \tUnknownObject:9\n"
        );
    }

    #[test]
    fn cycles_are_marked() {
        let tree = render(
            &[event(1, &[2]), action(2, 5), container(5, &[6]), container(6, &[5])],
            &[],
        );

        assert_eq!(
            tree,
            "Event:1 actions:1 1\n\
             \tEventAction:2 type:0x04 scope:3 target:5\n\
             \t\tContainer:5 children:1\n\
             \t\t\tContainer:6 children:1\n\
             \t\t\t\tContainer:5 children:1 (cycle)\n"
        );
    }

    #[test]
    fn no_events() {
        assert_eq!(render(&[sound(3, 7)], &[]), "");
    }

    #[test]
    fn deep_chains_dont_overflow() {
        let depth = 3000;
        let mut records = vec![event(1, &[2]), action(2, 10)];
        for i in 0..depth {
            records.push(container(10 + i, &[11 + i]));
        }
        records.push(sound(10 + depth, 7));

        let tree = render(&records, &[]);
        let lines: Vec<_> = tree.lines().collect();

        // event, action, every container and the sound
        assert_eq!(lines.len(), depth as usize + 3);

        let indent = "\t".repeat(depth as usize + 2);
        assert_eq!(
            lines[lines.len() - 1],
            format!("{indent}Sound:{} audio:7 source:0 Streamed", 10 + depth)
        );
    }
}
