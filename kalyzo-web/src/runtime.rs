//! The page's single dispatcher and the entry point islands use to reach it.
use crate::bus::{self, PageEvent};
use crate::config;
use crate::page::PageSink;
use crate::transport::{DomTokenSource, FetchTransport};
use kalyzo_storefront::{Dispatcher, SelectorState, StoreApi, UiAction};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

pub type PageDispatcher = Dispatcher<FetchTransport, DomTokenSource>;

thread_local! {
    static DISPATCHER: RefCell<Option<Rc<PageDispatcher>>> = const { RefCell::new(None) };
}

/// Create the dispatcher for this page. Replaces any previous one.
pub fn install(selector: SelectorState) {
    let config = config::storefront().clone();
    let api = StoreApi::new(FetchTransport, DomTokenSource, config.endpoints.clone());
    let dispatcher = Rc::new(Dispatcher::new(api, config, selector));
    DISPATCHER.with(|slot| slot.replace(Some(dispatcher)));
}

fn current() -> Option<Rc<PageDispatcher>> {
    DISPATCHER.with(|slot| slot.borrow().clone())
}

const fn touches_selector(action: &UiAction) -> bool {
    matches!(
        action,
        UiAction::SelectVariant(_) | UiAction::SelectOption { .. } | UiAction::SetQuantity(_)
    )
}

/// Run `action` in the background, applying its effects to the page.
pub fn dispatch(action: UiAction) {
    let Some(dispatcher) = current() else {
        log::warn!("storefront not mounted; dropping {action:?}");
        return;
    };
    let notify = touches_selector(&action);
    spawn_local(async move {
        dispatcher.dispatch_into(action, &PageSink).await;
        if notify {
            bus::publish(&PageEvent::SelectorChanged);
        }
    });
}

/// Read the selector state, if a dispatcher is installed.
pub fn with_selector<R>(read: impl FnOnce(&SelectorState) -> R) -> Option<R> {
    current().map(|dispatcher| read(&dispatcher.selector()))
}
