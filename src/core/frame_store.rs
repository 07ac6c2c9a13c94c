use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::{AnimationError, AnimationResult};

use super::{Frame, FrameDefinition};

/// Selects frames for an animation: one frame-or-group name, or an explicit
/// ordered list of frame names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSelector {
    Single(String),
    List(Vec<String>),
}

impl From<&str> for FrameSelector {
    fn from(name: &str) -> Self {
        Self::Single(name.to_owned())
    }
}

impl From<String> for FrameSelector {
    fn from(name: String) -> Self {
        Self::Single(name)
    }
}

impl From<Vec<String>> for FrameSelector {
    fn from(names: Vec<String>) -> Self {
        Self::List(names)
    }
}

impl From<&[&str]> for FrameSelector {
    fn from(names: &[&str]) -> Self {
        Self::List(names.iter().map(|name| (*name).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FrameSelector {
    fn from(names: [&str; N]) -> Self {
        Self::from(names.as_slice())
    }
}

/// Order-preserving store of named [`Frame`] definitions and the group
/// sequences derived from them.
#[derive(Debug, Default)]
pub struct FrameStore {
    frames: IndexMap<String, Frame>,
    /// Group tag -> member frame names, in first-submission order.
    groups: IndexMap<String, Vec<String>>,
    generated_names: u64,
}

impl FrameStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts each definition by name, merging supplied fields over any
    /// existing frame of the same name. Anonymous definitions receive a
    /// generated `frame N` name that skips names already taken.
    pub fn add_frames(&mut self, definitions: Vec<FrameDefinition>) {
        for definition in definitions {
            let name = match definition.name.clone() {
                Some(name) => name,
                None => self.next_generated_name(),
            };
            self.upsert(name, definition);
        }
        debug!(
            frames = self.frames.len(),
            groups = self.groups.len(),
            "frame store updated"
        );
    }

    /// Resolves a selector to an ordered frame sequence.
    ///
    /// Resolution is all-or-nothing: an unknown group name, or any unknown
    /// frame name in a list, fails without partial results.
    pub fn resolve(&self, selector: &FrameSelector) -> AnimationResult<Vec<Frame>> {
        match selector {
            FrameSelector::Single(name) => {
                if let Some(members) = self.groups.get(name) {
                    members.iter().map(|member| self.lookup(member)).collect()
                } else if let Some(frame) = self.frames.get(name) {
                    Ok(vec![frame.clone()])
                } else {
                    Err(AnimationError::NotFound { name: name.clone() })
                }
            }
            FrameSelector::List(names) => {
                names.iter().map(|name| self.lookup(name)).collect()
            }
        }
    }

    #[must_use]
    pub fn frame(&self, name: &str) -> Option<&Frame> {
        self.frames.get(name)
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Member frame names of `group`, in first-submission order.
    #[must_use]
    pub fn group(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    #[must_use]
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }

    fn lookup(&self, name: &str) -> AnimationResult<Frame> {
        self.frames
            .get(name)
            .cloned()
            .ok_or_else(|| AnimationError::NotFound {
                name: name.to_owned(),
            })
    }

    fn upsert(&mut self, name: String, definition: FrameDefinition) {
        if let Some(existing) = self.frames.get_mut(&name) {
            let previous_group = existing.group.clone();
            existing.merge(definition);
            let next_group = existing.group.clone();
            if previous_group != next_group {
                if let Some(previous) = previous_group {
                    self.leave_group(&previous, &name);
                }
                if let Some(next) = next_group {
                    self.join_group(next, &name);
                }
            }
            trace!(frame = %name, "merged frame definition");
        } else {
            let frame = Frame::from_definition(name.clone(), definition);
            let group = frame.group.clone();
            self.frames.insert(name.clone(), frame);
            if let Some(group) = group {
                self.join_group(group, &name);
            }
            trace!(frame = %name, "inserted frame");
        }
    }

    fn join_group(&mut self, group: String, name: &str) {
        let members = self.groups.entry(group).or_default();
        if !members.iter().any(|member| member == name) {
            members.push(name.to_owned());
        }
    }

    fn leave_group(&mut self, group: &str, name: &str) {
        if let Some(members) = self.groups.get_mut(group) {
            members.retain(|member| member != name);
            if members.is_empty() {
                self.groups.shift_remove(group);
            }
        }
    }

    fn next_generated_name(&mut self) -> String {
        loop {
            let candidate = format!("frame {}", self.generated_names);
            self.generated_names += 1;
            if !self.frames.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}
