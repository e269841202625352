use std::fmt;

use serde_json::Value;

/// Which mapping a change notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Option,
    Default,
}

/// A single write, delivered to listeners after the value is stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Change<'a> {
    pub kind: EventKind,
    /// Dotted key that was written
    pub key: &'a str,
    /// Value now stored at `key`
    pub value: Option<&'a Value>,
}

/// Handle returned by [`crate::OptionStore::on`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&Change<'_>)>;

/// Listeners in registration order.
#[derive(Default)]
pub(crate) struct Emitter {
    next_id: u64,
    listeners: Vec<(ListenerId, EventKind, Listener)>,
}

impl Emitter {
    pub(crate) fn on(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, kind, listener));
        id
    }

    pub(crate) fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn emit(&mut self, change: &Change<'_>) {
        for (_, kind, listener) in self.listeners.iter_mut() {
            if *kind == change.kind {
                listener(change);
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
