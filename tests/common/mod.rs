use std::cell::RefCell;
use std::rc::Rc;

use optcache::{EventKind, OptionStore};
use serde_json::{Map, Value};

#[allow(dead_code)]
pub type Recorded = Rc<RefCell<Vec<(String, Option<Value>)>>>;

#[allow(dead_code)]
pub fn create_store() -> OptionStore {
    OptionStore::new()
}

#[allow(dead_code)]
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// Record every `(key, value)` notification of `kind` emitted by `store`.
#[allow(dead_code)]
pub fn record(store: &mut OptionStore, kind: EventKind) -> Recorded {
    let seen: Recorded = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.on(kind, move |change| {
        sink.borrow_mut()
            .push((change.key.to_string(), change.value.cloned()));
    });
    seen
}

#[allow(dead_code)]
pub fn keys(recorded: &Recorded) -> Vec<String> {
    recorded.borrow().iter().map(|(key, _)| key.clone()).collect()
}
