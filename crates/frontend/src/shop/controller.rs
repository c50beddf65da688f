//! Owner of the shop session and dispatch table for user input.
//!
//! The UI layer turns DOM events into [`ShopEvent`]s and host messages into
//! [`HostMessage`]s; everything else happens here. Work that waits on the
//! host is spawned on the single-threaded executor and never holds a borrow
//! of the session across an await.

use super::gateway::{self, HostGateway};
use super::session::ShopSession;
use super::settings::ShopSettings;
use contracts::shop::{HostMessage, Item, SessionConfig};
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;
pub type Spawner = Rc<dyn Fn(LocalTask)>;

/// User input, already decoded from the DOM
#[derive(Debug, Clone, PartialEq)]
pub enum ShopEvent {
    SearchInput(String),
    PrevPage,
    NextPage,
    SelectItem(Item),
    QuantityInput(String),
    DismissModal,
    ConfirmOrder,
    CloseRequested,
    KeyDown(String),
}

impl ShopEvent {
    /// Whether the event is dropped while the overlay is closed.
    ///
    /// Order confirmation and the close button have never been gated on the
    /// open flag; that is kept as is.
    pub fn requires_open(&self) -> bool {
        !matches!(self, ShopEvent::ConfirmOrder | ShopEvent::CloseRequested)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Handled,
    /// Dropped because the overlay is closed
    Inert,
    /// Key event whose browser default must be prevented
    PreventDefault,
}

struct Inner<G> {
    session: RefCell<ShopSession>,
    gateway: G,
    settings: ShopSettings,
    spawner: Spawner,
    /// Monotonic across sessions so stale replies from a previous open stay stale
    search_seq: Cell<u64>,
    listeners: RefCell<Vec<Rc<dyn Fn()>>>,
}

pub struct ShopController<G> {
    inner: Rc<Inner<G>>,
}

impl<G> Clone for ShopController<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<G: HostGateway + 'static> ShopController<G> {
    /// Controller driven by the browser's microtask queue
    pub fn new(gateway: G, settings: ShopSettings) -> Self {
        Self::with_spawner(
            gateway,
            settings,
            Rc::new(|task: LocalTask| wasm_bindgen_futures::spawn_local(task)),
        )
    }

    pub fn with_spawner(gateway: G, settings: ShopSettings, spawner: Spawner) -> Self {
        Self {
            inner: Rc::new(Inner {
                session: RefCell::new(ShopSession::default()),
                gateway,
                settings,
                spawner,
                search_seq: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn settings(&self) -> &ShopSettings {
        &self.inner.settings
    }

    pub fn gateway(&self) -> &G {
        &self.inner.gateway
    }

    /// Register a callback run after every state change
    pub fn subscribe(&self, listener: Rc<dyn Fn()>) {
        self.inner.listeners.borrow_mut().push(listener);
    }

    pub fn with_session<R>(&self, f: impl FnOnce(&ShopSession) -> R) -> R {
        f(&self.inner.session.borrow())
    }

    pub fn is_open(&self) -> bool {
        self.with_session(ShopSession::is_open)
    }

    fn update<R>(&self, f: impl FnOnce(&mut ShopSession) -> R) -> R {
        let result = f(&mut self.inner.session.borrow_mut());
        self.notify();
        result
    }

    fn notify(&self) {
        // Listeners may read the session, so run them on a snapshot of the list
        let listeners = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
    }

    fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        (self.inner.spawner)(Box::pin(task));
    }

    // ------------------------------------------------------------------------
    // Host messages
    // ------------------------------------------------------------------------

    pub fn handle_host_message(&self, message: HostMessage) {
        match message {
            HostMessage::Open(payload) => self.open(SessionConfig::from(&payload)),
            HostMessage::Close => self.close(),
        }
    }

    /// Start a fresh session and load the unfiltered catalog
    pub fn open(&self, config: SessionConfig) {
        log::info!(
            "Shop opened (max_qty={}, per_page={})",
            config.max_qty,
            config.per_page
        );
        self.update(|s| *s = ShopSession::opened(config));
        let this = self.clone();
        self.spawn(async move {
            this.search(String::new()).await;
        });
    }

    /// Hide the overlay and tell the host; in-flight requests are not aborted
    pub fn close(&self) {
        log::info!("Shop closed");
        self.update(ShopSession::close);
        let this = self.clone();
        self.spawn(async move {
            gateway::notify_closed(&this.inner.gateway).await;
        });
    }

    // ------------------------------------------------------------------------
    // Dispatch table
    // ------------------------------------------------------------------------

    pub fn dispatch(&self, event: ShopEvent) -> Outcome {
        if event.requires_open() && !self.is_open() {
            log::debug!("Ignoring {:?} while closed", event);
            return Outcome::Inert;
        }

        match event {
            ShopEvent::SearchInput(text) => {
                let this = self.clone();
                self.spawn(async move {
                    this.search(text).await;
                });
            }
            ShopEvent::PrevPage => self.update(|s| s.catalog.set_page(-1)),
            ShopEvent::NextPage => self.update(|s| s.catalog.set_page(1)),
            ShopEvent::SelectItem(item) => self.update(|s| s.selection.select(item)),
            ShopEvent::QuantityInput(raw) => {
                self.update(|s| s.selection.set_quantity(&raw));
            }
            ShopEvent::DismissModal => self.update(|s| s.selection.cancel()),
            ShopEvent::ConfirmOrder => {
                let this = self.clone();
                self.spawn(async move {
                    this.confirm_order().await;
                });
            }
            ShopEvent::CloseRequested => self.close(),
            ShopEvent::KeyDown(key) => return self.key_down(&key),
        }
        Outcome::Handled
    }

    fn key_down(&self, key: &str) -> Outcome {
        if key == "Escape" && self.with_session(|s| s.selection.selected().is_some()) {
            self.update(|s| s.selection.cancel());
            return Outcome::Handled;
        }
        if self.inner.settings.is_blocked_key(key) {
            Outcome::PreventDefault
        } else {
            Outcome::Handled
        }
    }

    // ------------------------------------------------------------------------
    // Host round trips
    // ------------------------------------------------------------------------

    /// Refetch the catalog for `filter`; returns whether the reply was applied
    pub async fn search(&self, filter: String) -> bool {
        let seq = self.inner.search_seq.get() + 1;
        self.inner.search_seq.set(seq);
        self.inner.session.borrow_mut().mark_search_issued(seq);
        log::debug!("Catalog search #{} '{}'", seq, filter);

        let response = gateway::fetch_catalog(&self.inner.gateway, &filter).await;

        let ordering = self.inner.settings.search_ordering;
        let applied = self
            .inner
            .session
            .borrow_mut()
            .apply_catalog(seq, response, ordering);
        if applied {
            self.notify();
        }
        applied
    }

    /// Send the current selection as an order, then clear it whatever the
    /// host answered. Returns `false` when nothing was selected.
    pub async fn confirm_order(&self) -> bool {
        let Some(order) = self.with_session(|s| s.selection.order_request()) else {
            return false;
        };
        log::debug!("Placing order {} x{}", order.name, order.amount);

        gateway::place_order(&self.inner.gateway, &order).await;

        self.update(|s| s.selection.cancel());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::gateway::testing::FakeHost;
    use crate::shop::gateway::{GatewayError, HostGateway};
    use crate::shop::settings::SearchOrdering;
    use async_trait::async_trait;
    use contracts::shop::OpenPayload;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use serde_json::{json, Value};
    use std::collections::VecDeque;

    fn catalog_json(n: usize) -> Value {
        let items: Vec<Value> = (1..=n)
            .map(|i| json!({ "name": format!("item{i}"), "label": format!("Item {i}"), "price": i }))
            .collect();
        json!({ "ok": true, "items": items })
    }

    /// Controller whose spawned tasks run on a local pool
    fn controller_on_pool<G: HostGateway + 'static>(
        gateway: G,
        settings: ShopSettings,
    ) -> (ShopController<G>, LocalPool) {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        let controller = ShopController::with_spawner(
            gateway,
            settings,
            Rc::new(move |task: LocalTask| {
                spawner.spawn_local(task).expect("spawn");
            }),
        );
        (controller, pool)
    }

    fn open_with(host: FakeHost, config: SessionConfig) -> (ShopController<FakeHost>, LocalPool) {
        let (controller, mut pool) = controller_on_pool(host, ShopSettings::default());
        controller.open(config);
        pool.run_until_stalled();
        (controller, pool)
    }

    #[test]
    fn test_open_fetches_unfiltered_catalog() {
        let host = FakeHost::default();
        host.reply(Ok(catalog_json(13)));
        let (controller, _pool) = open_with(host, SessionConfig::default());

        assert!(controller.is_open());
        assert_eq!(
            controller.gateway().calls.borrow()[0],
            ("shop:getCatalog".to_string(), json!({ "filter": "" }))
        );
        controller.with_session(|s| {
            assert_eq!(s.catalog.items().len(), 13);
            assert_eq!(s.catalog.total_pages(), 2);
        });
    }

    #[test]
    fn test_host_open_message_applies_defaults() {
        let (controller, mut pool) = controller_on_pool(FakeHost::default(), ShopSettings::default());
        controller.handle_host_message(HostMessage::Open(OpenPayload {
            max_qty: Some(3),
            per_page: None,
        }));
        pool.run_until_stalled();

        controller.with_session(|s| {
            assert_eq!(
                s.config(),
                SessionConfig {
                    max_qty: 3,
                    per_page: 12
                }
            );
        });
    }

    #[test]
    fn test_pagination_through_dispatch() {
        let host = FakeHost::default();
        host.reply(Ok(catalog_json(13)));
        let (controller, _pool) = open_with(host, SessionConfig::default());

        assert_eq!(controller.dispatch(ShopEvent::NextPage), Outcome::Handled);
        controller.with_session(|s| {
            assert_eq!(s.catalog.page(), 2);
            assert_eq!(s.catalog.visible_slice().len(), 1);
            assert_eq!(s.catalog.visible_slice()[0].name, "item13");
        });

        controller.dispatch(ShopEvent::NextPage);
        controller.with_session(|s| assert_eq!(s.catalog.page(), 2));

        controller.dispatch(ShopEvent::PrevPage);
        controller.dispatch(ShopEvent::PrevPage);
        controller.with_session(|s| assert_eq!(s.catalog.page(), 1));
    }

    #[test]
    fn test_failed_search_leaves_state() {
        let host = FakeHost::default();
        host.reply(Ok(catalog_json(30)));
        let (controller, mut pool) = open_with(host, SessionConfig::default());
        controller.dispatch(ShopEvent::NextPage);
        let before = controller.with_session(|s| s.catalog.clone());

        controller.gateway().reply(Ok(json!({ "ok": false })));
        controller.dispatch(ShopEvent::SearchInput("xyz".to_string()));
        pool.run_until_stalled();

        controller.gateway().reply(Err(GatewayError::Send("offline".to_string())));
        assert!(!block_on(controller.search("xyz".to_string())));

        controller.with_session(|s| assert_eq!(s.catalog, before));
        assert_eq!(
            controller.gateway().calls.borrow()[1].1,
            json!({ "filter": "xyz" })
        );
    }

    #[test]
    fn test_successful_search_resets_page() {
        let host = FakeHost::default();
        host.reply(Ok(catalog_json(30)));
        let (controller, _pool) = open_with(host, SessionConfig::default());
        controller.dispatch(ShopEvent::NextPage);

        controller.gateway().reply(Ok(catalog_json(2)));
        assert!(block_on(controller.search("item".to_string())));
        controller.with_session(|s| {
            assert_eq!(s.catalog.page(), 1);
            assert_eq!(s.catalog.items().len(), 2);
        });
    }

    #[test]
    fn test_quantity_flow() {
        let (controller, _pool) = open_with(FakeHost::default(), SessionConfig::default());

        controller.dispatch(ShopEvent::SelectItem(Item::new("bread", "Bread", 5.0)));
        controller.dispatch(ShopEvent::QuantityInput("7".to_string()));
        controller.with_session(|s| assert_eq!(s.selection.compute_total(), Some(35.0)));

        controller.dispatch(ShopEvent::QuantityInput("abc".to_string()));
        controller.with_session(|s| {
            assert_eq!(s.selection.quantity(), 1);
            assert_eq!(s.selection.compute_total(), Some(5.0));
        });

        controller.dispatch(ShopEvent::QuantityInput("9999".to_string()));
        controller.with_session(|s| assert_eq!(s.selection.quantity(), 50));

        controller.dispatch(ShopEvent::DismissModal);
        controller.with_session(|s| assert!(s.selection.selected().is_none()));
    }

    #[test]
    fn test_confirm_order_clears_selection_even_on_failure() {
        let (controller, mut pool) = open_with(FakeHost::default(), SessionConfig::default());
        controller.dispatch(ShopEvent::SelectItem(Item::new("water", "Water", 2.0)));
        controller.dispatch(ShopEvent::QuantityInput("4".to_string()));

        controller.gateway().reply(Err(GatewayError::Status(500)));
        controller.dispatch(ShopEvent::ConfirmOrder);
        pool.run_until_stalled();

        let calls = controller.gateway().calls.borrow().clone();
        assert_eq!(
            calls.last().cloned(),
            Some((
                "shop:placeOrder".to_string(),
                json!({ "name": "water", "amount": 4 })
            ))
        );
        controller.with_session(|s| assert!(s.selection.selected().is_none()));
        assert!(controller.is_open());
    }

    #[test]
    fn test_confirm_without_selection_sends_nothing() {
        let (controller, _pool) = open_with(FakeHost::default(), SessionConfig::default());
        assert!(!block_on(controller.confirm_order()));
        assert_eq!(controller.gateway().commands(), vec!["shop:getCatalog"]);
    }

    #[test]
    fn test_closed_overlay_is_inert_except_confirm_and_close() {
        let (controller, mut pool) = open_with(FakeHost::default(), SessionConfig::default());
        controller.dispatch(ShopEvent::SelectItem(Item::new("bread", "Bread", 5.0)));
        controller.handle_host_message(HostMessage::Close);
        pool.run_until_stalled();
        assert!(!controller.is_open());

        for event in [
            ShopEvent::SearchInput("a".to_string()),
            ShopEvent::NextPage,
            ShopEvent::PrevPage,
            ShopEvent::QuantityInput("3".to_string()),
            ShopEvent::DismissModal,
            ShopEvent::KeyDown("F5".to_string()),
        ] {
            assert_eq!(controller.dispatch(event), Outcome::Inert);
        }
        controller.with_session(|s| assert_eq!(s.selection.quantity(), 1));

        assert_eq!(controller.dispatch(ShopEvent::ConfirmOrder), Outcome::Handled);
        pool.run_until_stalled();
        assert_eq!(
            controller.dispatch(ShopEvent::CloseRequested),
            Outcome::Handled
        );
        pool.run_until_stalled();

        assert_eq!(
            controller.gateway().commands(),
            vec![
                "shop:getCatalog",
                "shop:close",
                "shop:placeOrder",
                "shop:close"
            ]
        );
    }

    #[test]
    fn test_reopen_starts_fresh_session() {
        let host = FakeHost::default();
        host.reply(Ok(catalog_json(30)));
        let (controller, mut pool) = open_with(host, SessionConfig::default());
        controller.dispatch(ShopEvent::NextPage);
        controller.dispatch(ShopEvent::SelectItem(Item::new("bread", "Bread", 5.0)));
        controller.close();

        controller.gateway().reply(Ok(Value::Null)); // close ack
        controller.gateway().reply(Ok(json!({ "ok": false })));
        controller.open(SessionConfig {
            max_qty: 10,
            per_page: 6,
        });
        pool.run_until_stalled();

        controller.with_session(|s| {
            assert!(s.is_open());
            assert!(s.catalog.items().is_empty());
            assert_eq!(s.catalog.page(), 1);
            assert_eq!(s.catalog.per_page(), 6);
            assert!(s.selection.selected().is_none());
        });
    }

    #[test]
    fn test_keys() {
        let (controller, _pool) = open_with(FakeHost::default(), SessionConfig::default());
        assert_eq!(
            controller.dispatch(ShopEvent::KeyDown("F12".to_string())),
            Outcome::PreventDefault
        );
        assert_eq!(
            controller.dispatch(ShopEvent::KeyDown("a".to_string())),
            Outcome::Handled
        );

        controller.dispatch(ShopEvent::SelectItem(Item::new("bread", "Bread", 5.0)));
        controller.dispatch(ShopEvent::KeyDown("Escape".to_string()));
        controller.with_session(|s| assert!(s.selection.selected().is_none()));
    }

    #[test]
    fn test_listeners_notified_on_change() {
        let (controller, _pool) = open_with(FakeHost::default(), SessionConfig::default());
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        controller.subscribe(Rc::new(move || counter.set(counter.get() + 1)));

        controller.dispatch(ShopEvent::NextPage);
        controller.dispatch(ShopEvent::SelectItem(Item::new("bread", "Bread", 5.0)));
        assert_eq!(hits.get(), 2);

        controller.handle_host_message(HostMessage::Close);
        controller.dispatch(ShopEvent::NextPage);
        assert_eq!(hits.get(), 3);
    }

    /// Host whose catalog replies are released by the test, in any order
    #[derive(Default)]
    struct GatedHost {
        pending: RefCell<VecDeque<oneshot::Receiver<Value>>>,
    }

    #[async_trait(?Send)]
    impl HostGateway for GatedHost {
        async fn post(&self, _command: &str, _payload: Value) -> Result<Value, GatewayError> {
            let rx = self.pending.borrow_mut().pop_front();
            match rx {
                Some(rx) => rx.await.map_err(|e| GatewayError::Send(e.to_string())),
                None => Ok(Value::Null),
            }
        }
    }

    /// Two searches whose replies arrive newest-first
    fn race(ordering: SearchOrdering) -> usize {
        let host = GatedHost::default();
        let (tx_first, rx_first) = oneshot::channel();
        let (tx_second, rx_second) = oneshot::channel();
        host.pending.borrow_mut().push_back(rx_first);
        host.pending.borrow_mut().push_back(rx_second);

        let settings = ShopSettings {
            search_ordering: ordering,
            ..ShopSettings::default()
        };
        let (controller, mut pool) = controller_on_pool(host, settings);
        // Open without the initial fetch consuming a gate
        controller.update(|s| *s = ShopSession::opened(SessionConfig::default()));

        controller.dispatch(ShopEvent::SearchInput("b".to_string()));
        controller.dispatch(ShopEvent::SearchInput("br".to_string()));
        pool.run_until_stalled();

        tx_second.send(catalog_json(1)).expect("second reply");
        pool.run_until_stalled();
        tx_first.send(catalog_json(5)).expect("first reply");
        pool.run_until_stalled();

        controller.with_session(|s| s.catalog.items().len())
    }

    #[test]
    fn test_overlapping_searches_last_resolved_wins() {
        assert_eq!(race(SearchOrdering::LastResolved), 5);
    }

    #[test]
    fn test_overlapping_searches_last_issued_wins() {
        assert_eq!(race(SearchOrdering::LastIssued), 1);
    }
}
