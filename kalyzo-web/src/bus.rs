//! Page-wide broadcast of dispatcher output to mounted islands.
//!
//! Each island is its own yew root, so they cannot share context; they
//! subscribe here instead.
use kalyzo_storefront::Effect;
use std::cell::{Cell, RefCell};
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Effect(Effect),
    /// The variant selector changed; product islands re-read it.
    SelectorChanged,
}

thread_local! {
    static SUBSCRIBERS: RefCell<Vec<(usize, Callback<PageEvent>)>> = const { RefCell::new(Vec::new()) };
    static NEXT_ID: Cell<usize> = const { Cell::new(0) };
}

/// Removes its callback from the bus when dropped.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription(usize);

impl Drop for Subscription {
    fn drop(&mut self) {
        let id = self.0;
        SUBSCRIBERS.with(|subs| subs.borrow_mut().retain(|(sub_id, _)| *sub_id != id));
    }
}

pub fn subscribe(callback: Callback<PageEvent>) -> Subscription {
    let id = NEXT_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });
    SUBSCRIBERS.with(|subs| subs.borrow_mut().push((id, callback)));
    Subscription(id)
}

/// Deliver `event` to every subscriber. Callbacks may subscribe or publish
/// re-entrantly.
pub fn publish(event: &PageEvent) {
    let targets: Vec<Callback<PageEvent>> =
        SUBSCRIBERS.with(|subs| subs.borrow().iter().map(|(_, cb)| cb.clone()).collect());
    for callback in targets {
        callback.emit(event.clone());
    }
}

/// Subscribe a component for as long as it stays mounted.
#[hook]
pub fn use_page_events(on_event: Callback<PageEvent>) {
    use_effect_with((), move |()| {
        let subscription = subscribe(on_event);
        move || drop(subscription)
    });
}
