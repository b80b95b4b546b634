use std::collections::{HashSet, VecDeque};

use crate::{Object, ObjectId};

#[derive(Debug, Clone, Copy)]
pub struct Selector<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone)]
pub enum LookupResult {
    None,
    Found {
        /// The object whose slot matched (the receiver itself or an
        /// ancestor reached through parent slots).
        holder: Object,
        /// Contents of the matching slot.
        target: Object,
        /// Breadth-first distance from the receiver to `holder`.
        depth: usize,
    },
}

impl LookupResult {
    pub fn target(self) -> Option<Object> {
        match self {
            LookupResult::None => None,
            LookupResult::Found { target, .. } => Some(target),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LookupResult::Found { .. })
    }
}

impl<'a> Selector<'a> {
    pub fn new(name: &'a str) -> Self {
        Self { name }
    }

    /// Breadth-first search over slots and parent slots.
    ///
    /// Direct slots are checked before any parent, parents are explored
    /// in declaration order, and all parents at one depth are exhausted
    /// before their own parents. Every object is expanded at most once.
    pub fn lookup_object(self, receiver: &Object) -> LookupResult {
        let mut queue = VecDeque::from([(receiver.clone(), 0usize)]);
        let mut visited: HashSet<ObjectId> = HashSet::new();

        while let Some((current, depth)) = queue.pop_front() {
            if !visited.insert(current.id()) {
                continue;
            }

            let data = current.data().read();
            if let Some(target) = data.slots.get(self.name) {
                log::trace!(
                    "'{}' found on #{} at depth {}",
                    self.name,
                    current.id().as_u64(),
                    depth
                );
                return LookupResult::Found {
                    holder: current.clone(),
                    target: target.clone(),
                    depth,
                };
            }

            queue.extend(
                data.parent_slots
                    .iter()
                    .filter(|parent| !visited.contains(&parent.id()))
                    .map(|parent| (parent.clone(), depth + 1)),
            );
        }

        log::debug!(
            "'{}' not reachable from #{} ({} objects searched)",
            self.name,
            receiver.id().as_u64(),
            visited.len()
        );
        LookupResult::None
    }
}

impl Object {
    pub fn lookup(&self, name: &str) -> LookupResult {
        Selector::new(name).lookup_object(self)
    }
}
