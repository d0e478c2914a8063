//! Tracks which UI component is currently rendering.
//!
//! Panics are reported with the innermost entry attached as component context.

use std::cell::RefCell;

use crate::protocol::{ComponentContext, Map};

thread_local!(static COMPONENTS: RefCell<Vec<ComponentContext>> = RefCell::new(Vec::new()));

/// Marks `name` as rendering until the returned guard is dropped.
#[must_use = "the component is only tracked while the guard is alive"]
pub fn enter(name: impl Into<String>, props: Map<String, String>) -> Entered {
    let context = ComponentContext {
        name: name.into(),
        props: Some(props),
    };
    COMPONENTS.with(|cell| cell.borrow_mut().push(context));

    Entered(())
}

/// The innermost component currently rendering.
pub fn current() -> Option<ComponentContext> {
    COMPONENTS.with(|cell| cell.borrow().last().cloned())
}

pub struct Entered(());

impl Drop for Entered {
    fn drop(&mut self) {
        COMPONENTS.with(|cell| cell.borrow_mut().pop());
    }
}
