//! Session facade: the command and query surface a UI drives.
//!
//! A session owns one transport, one dispatcher and one store. Inbound
//! messages flow transport -> dispatcher -> store; commands encode and send
//! through the transport and record rejected sends in the store.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use trickline_core::model::{PlayerId, RoundOutcome, Snapshot, TrickRecord};
use trickline_core::protocol::{
    EmptyPayload, JoinGamePayload, Outbound, PlayCardPayload, StartRoundPayload,
};
use trickline_core::rules::{can_act, predict_card_legality, ExclusionRule, Legality, RoundPlan};
use trickline_core::{Result, TricklineError};

use crate::config::ClientConfig;
use crate::dispatch::{Dispatcher, TrickCompleted};
use crate::listeners::Subscription;
use crate::obs::ClientMetrics;
use crate::store::{
    EventLogEntry, FileSlot, JoinInfo, MemorySlot, ReconciliationStore, ScoreSlot, ScoreTable,
};
use crate::transport::{ConnectionState, Connector, Transport, WsConnector};

/// Stored when a command could not be sent.
pub const NOT_SENT_MESSAGE: &str = "Message not sent: not connected";

#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    cfg: ClientConfig,
    transport: Transport,
    dispatcher: Arc<Dispatcher>,
    store: Arc<Mutex<ReconciliationStore>>,
    metrics: Arc<ClientMetrics>,
    _inbound: Subscription,
}

impl Session {
    /// WebSocket session with the score slot named in the config.
    /// Must be called from within a tokio runtime.
    pub fn new(cfg: ClientConfig) -> Result<Self> {
        let slot: Box<dyn ScoreSlot> = match &cfg.scores.path {
            Some(path) => Box::new(FileSlot::new(path)),
            None => Box::new(MemorySlot::new()),
        };
        Self::with_parts(cfg, Arc::new(WsConnector), slot)
    }

    pub fn with_parts(
        cfg: ClientConfig,
        connector: Arc<dyn Connector>,
        slot: Box<dyn ScoreSlot>,
    ) -> Result<Self> {
        let metrics = Arc::new(ClientMetrics::new());
        let transport = Transport::new(
            connector,
            cfg.server.reconnect_delay(),
            Arc::clone(&metrics),
        )?;
        let store = Arc::new(Mutex::new(ReconciliationStore::new(slot)));
        let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&store)));

        let sink = Arc::clone(&dispatcher);
        let inbound = transport.on_message(move |msg| {
            sink.dispatch(msg);
        });

        Ok(Self {
            inner: Arc::new(SessionInner {
                cfg,
                transport,
                dispatcher,
                store,
                metrics,
                _inbound: inbound,
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.cfg
    }

    // --------------------
    // Connection
    // --------------------

    /// Connect to the configured endpoint.
    pub fn connect(&self) {
        self.inner.transport.connect(self.inner.cfg.server.endpoint.clone());
    }

    pub fn connect_to(&self, endpoint: impl Into<String>) {
        self.inner.transport.connect(endpoint);
    }

    pub fn disconnect(&self) {
        self.inner.transport.disconnect();
    }

    pub fn reconnect_now(&self) {
        self.inner.transport.reconnect_now();
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.inner.transport.state()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.transport.is_connected()
    }

    // --------------------
    // Commands
    // --------------------

    /// Join the configured table as the configured player.
    pub fn join(&self) -> Result<()> {
        let table = &self.inner.cfg.table;
        self.send(&Outbound::JoinGame(JoinGamePayload {
            game_id: table.game_id.clone(),
            player_id: table.player_id,
        }))
    }

    /// Start a round with the configured seed and exclusions.
    pub fn start_round(&self) -> Result<()> {
        let round = &self.inner.cfg.round;
        self.start_round_with(&round.exclusions(), round.seed)
    }

    /// Start a round once the exclusions are valid and leave enough cards.
    ///
    /// On success the local trick history and last round outcome are cleared;
    /// the server answers with fresh state.
    pub fn start_round_with(&self, rule: &ExclusionRule, seed: Option<u64>) -> Result<()> {
        let plan = {
            let store = self.inner.store.lock();
            if store.joined().is_none() {
                return Err(TricklineError::BadRequest("join a table first".into()));
            }
            rule.plan(store.connected_players())
        };
        if !plan.ready() {
            return Err(TricklineError::Validation(plan.errors()));
        }

        self.send(&Outbound::StartRound(StartRoundPayload {
            seed,
            rules: rule.to_payload(),
        }))?;
        self.inner.store.lock().reset_round();
        info!(
            ?seed,
            excluded_ranks = rule.ranks.len(),
            excluded_cards = rule.cards.len(),
            "round start sent"
        );
        Ok(())
    }

    pub fn get_state(&self) -> Result<()> {
        self.send(&Outbound::GetState(EmptyPayload {}))
    }

    /// Play a card if the latest snapshot predicts it legal.
    pub fn play_card(&self, card: &str) -> Result<()> {
        let card = card.trim().to_uppercase();
        let legality = self.can_play_card(&card);
        if let Some(reason) = legality.reason {
            info!(%card, %reason, "play refused locally");
            return Err(TricklineError::IllegalPlay(reason));
        }
        self.send(&Outbound::PlayCard(PlayCardPayload { card }))
    }

    /// Leave the table: close the connection and forget session state.
    /// Cumulative scores survive.
    pub fn exit_session(&self) {
        self.inner.transport.disconnect();
        self.inner.store.lock().reset_session();
    }

    pub fn clear_error(&self) {
        self.inner.store.lock().clear_error();
    }

    pub fn reset_scores(&self) {
        self.inner.store.lock().reset_scores();
    }

    fn send(&self, msg: &Outbound) -> Result<()> {
        match self.inner.transport.send(msg) {
            Ok(()) => Ok(()),
            Err(TricklineError::NotConnected) => {
                self.inner.store.lock().set_error(NOT_SENT_MESSAGE);
                Err(TricklineError::NotConnected)
            }
            Err(e) => {
                warn!(kind = msg.kind().as_str(), error = %e, "send failed");
                self.inner.store.lock().set_error(e.to_string());
                Err(e)
            }
        }
    }

    // --------------------
    // Rule queries
    // --------------------

    pub fn can_play(&self) -> bool {
        can_act(self.inner.store.lock().current_snapshot())
    }

    pub fn can_play_card(&self, card: &str) -> Legality {
        let card = card.trim().to_uppercase();
        predict_card_legality(self.inner.store.lock().current_snapshot(), &card)
    }

    /// Deck prediction for `rule` at the current table.
    pub fn round_plan(&self, rule: &ExclusionRule) -> RoundPlan {
        rule.plan(self.inner.store.lock().connected_players())
    }

    // --------------------
    // State queries
    // --------------------

    pub fn joined(&self) -> Option<JoinInfo> {
        self.inner.store.lock().joined().cloned()
    }

    pub fn error(&self) -> Option<String> {
        self.inner.store.lock().error().map(str::to_owned)
    }

    pub fn events(&self) -> Vec<EventLogEntry> {
        self.inner.store.lock().events()
    }

    pub fn current_snapshot(&self) -> Option<Snapshot> {
        self.inner.store.lock().current_snapshot().cloned()
    }

    pub fn completed_tricks(&self) -> Vec<TrickRecord> {
        self.inner.store.lock().completed_tricks()
    }

    pub fn scores(&self) -> ScoreTable {
        self.inner.store.lock().scores().clone()
    }

    pub fn round_winner(&self) -> Option<PlayerId> {
        self.inner.store.lock().round_winner()
    }

    pub fn last_round(&self) -> Option<RoundOutcome> {
        self.inner.store.lock().last_round().cloned()
    }

    pub fn metrics_text(&self) -> String {
        self.inner.metrics.render()
    }

    pub fn metrics(&self) -> &ClientMetrics {
        &self.inner.metrics
    }

    // --------------------
    // Observers
    // --------------------

    pub fn on_status(&self, f: impl Fn(&bool) + Send + Sync + 'static) -> Subscription {
        self.inner.transport.on_status(f)
    }

    pub fn on_trick_complete(
        &self,
        f: impl Fn(&TrickCompleted) + Send + Sync + 'static,
    ) -> Subscription {
        self.inner.dispatcher.on_trick_complete(f)
    }

    pub fn on_round_complete(
        &self,
        f: impl Fn(&RoundOutcome) + Send + Sync + 'static,
    ) -> Subscription {
        self.inner.dispatcher.on_round_complete(f)
    }

    pub fn on_error(&self, f: impl Fn(&String) + Send + Sync + 'static) -> Subscription {
        self.inner.dispatcher.on_error(f)
    }
}
