//! Reconnecting transport driver.
//!
//! Owns the [`LinkMachine`] and performs its actions on the tokio runtime
//! captured at construction:
//! - `Open` spawns a task that opens the connector and then pumps inbound
//!   frames until the connection ends
//! - `Close` aborts that task and drops the outbound sender, which closes the
//!   socket before any replacement opens
//! - `StartTimer`/`CancelTimer` manage the single reconnect sleep task
//!
//! Tasks hold only a `Weak` to the driver, so dropping the last [`Transport`]
//! stops everything.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use trickline_core::protocol::{decode_frame, encode_outbound, Frame, Inbound, Outbound};
use trickline_core::{Result, TricklineError};

use crate::listeners::{Listeners, Subscription};
use crate::obs::ClientMetrics;
use crate::transport::connector::Connector;
use crate::transport::machine::{ConnectionState, LinkAction, LinkEvent, LinkMachine};

#[derive(Default)]
struct Io {
    outbound: Option<mpsc::UnboundedSender<Frame>>,
    reader: Option<AbortHandle>,
    timer: Option<AbortHandle>,
}

impl Io {
    fn close(&mut self) {
        self.outbound = None;
        if let Some(h) = self.reader.take() {
            h.abort();
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(h) = self.timer.take() {
            h.abort();
        }
    }
}

struct Link {
    machine: LinkMachine,
    io: Io,
}

struct Inner {
    link: Mutex<Link>,
    connector: Arc<dyn Connector>,
    runtime: Handle,
    messages: Listeners<Inbound>,
    status: Listeners<bool>,
    metrics: Arc<ClientMetrics>,
}

/// One logical connection with automatic recovery.
#[derive(Clone)]
pub struct Transport {
    inner: Arc<Inner>,
}

impl Transport {
    /// Must be called from within a tokio runtime.
    pub fn new(
        connector: Arc<dyn Connector>,
        reconnect_delay: Duration,
        metrics: Arc<ClientMetrics>,
    ) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| TricklineError::Internal(format!("no tokio runtime: {e}")))?;
        Ok(Self {
            inner: Arc::new(Inner {
                link: Mutex::new(Link {
                    machine: LinkMachine::new(reconnect_delay),
                    io: Io::default(),
                }),
                connector,
                runtime,
                messages: Listeners::new(),
                status: Listeners::new(),
                metrics,
            }),
        })
    }

    pub fn connect(&self, endpoint: impl Into<String>) {
        let endpoint = endpoint.into();
        info!(%endpoint, "connect requested");
        self.inner.apply(LinkEvent::Connect { endpoint });
    }

    /// Intentional close; no retry until the next `connect`.
    pub fn disconnect(&self) {
        info!("disconnect requested");
        self.inner.apply(LinkEvent::Disconnect);
    }

    pub fn reconnect_now(&self) {
        self.inner.apply(LinkEvent::ReconnectNow);
    }

    /// Submit one message; fails with `NotConnected` unless a connection is open.
    pub fn send(&self, msg: &Outbound) -> Result<()> {
        let kind = msg.kind().as_str();
        let text = encode_outbound(msg)?;

        let link = self.inner.link.lock();
        let sent = match (&link.io.outbound, link.machine.state()) {
            (Some(tx), ConnectionState::Connected) => tx.send(Frame::Text(text)).is_ok(),
            _ => false,
        };
        drop(link);

        if sent {
            self.inner.metrics.sends.inc(&[("kind", kind), ("result", "ok")]);
            Ok(())
        } else {
            self.inner
                .metrics
                .sends
                .inc(&[("kind", kind), ("result", "rejected")]);
            warn!(kind, "send rejected: not connected");
            Err(TricklineError::NotConnected)
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.inner.link.lock().machine.state()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    pub fn endpoint(&self) -> Option<String> {
        self.inner.link.lock().machine.endpoint().map(str::to_owned)
    }

    /// Decoded inbound messages, in arrival order.
    pub fn on_message(&self, f: impl Fn(&Inbound) + Send + Sync + 'static) -> Subscription {
        self.inner.messages.subscribe(f)
    }

    /// `true` when a connection opens, `false` when one is lost or closed.
    pub fn on_status(&self, f: impl Fn(&bool) + Send + Sync + 'static) -> Subscription {
        self.inner.status.subscribe(f)
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let link = self.link.get_mut();
        link.io.close();
        link.io.cancel_timer();
    }
}

impl Inner {
    fn apply(self: &Arc<Self>, event: LinkEvent) {
        let statuses = {
            let mut link = self.link.lock();
            let actions = link.machine.handle(event);
            self.perform(&mut link, actions)
        };
        self.publish(statuses);
    }

    /// An open finished: install its sender if the attempt is still current.
    fn opened(self: &Arc<Self>, attempt: u64, outbound: mpsc::UnboundedSender<Frame>) -> bool {
        let statuses = {
            let mut link = self.link.lock();
            if !link.machine.is_opening(attempt) {
                debug!(attempt, "stale open discarded");
                return false;
            }
            link.io.outbound = Some(outbound);
            let actions = link.machine.handle(LinkEvent::Opened { attempt });
            self.perform(&mut link, actions)
        };
        self.metrics.transport.inc(&[("event", "opened")]);
        self.publish(statuses);
        true
    }

    /// Runs under the link lock; status events are returned for emission after unlock.
    fn perform(self: &Arc<Self>, link: &mut Link, actions: Vec<LinkAction>) -> Vec<bool> {
        let mut statuses = Vec::new();
        for action in actions {
            match action {
                LinkAction::Close => link.io.close(),
                LinkAction::CancelTimer => link.io.cancel_timer(),
                LinkAction::Open { attempt, endpoint } => {
                    self.metrics.transport.inc(&[("event", "open")]);
                    let task = self
                        .runtime
                        .spawn(run_link(Arc::downgrade(self), attempt, endpoint));
                    link.io.reader = Some(task.abort_handle());
                }
                LinkAction::StartTimer { timer, delay } => {
                    self.metrics
                        .transport
                        .inc(&[("event", "reconnect_scheduled")]);
                    info!(timer, delay_ms = delay.as_millis() as u64, "reconnect scheduled");
                    let weak = Arc::downgrade(self);
                    let task = self.runtime.spawn(async move {
                        tokio::time::sleep(delay).await;
                        if let Some(inner) = weak.upgrade() {
                            inner.apply(LinkEvent::TimerFired { timer });
                        }
                    });
                    link.io.timer = Some(task.abort_handle());
                }
                LinkAction::Status(up) => statuses.push(up),
            }
        }
        statuses
    }

    fn publish(&self, statuses: Vec<bool>) {
        for up in statuses {
            self.status.emit(&up);
        }
    }

    fn deliver(&self, frame: Frame) {
        match decode_frame(&frame) {
            Ok(inbound) => {
                self.metrics.frames_in.inc(&[("kind", inbound.tag())]);
                self.messages.emit(&inbound);
            }
            Err(e) => {
                self.metrics.frames_in.inc(&[("kind", "malformed")]);
                debug!(error = %e, bytes = frame.len(), "inbound frame dropped");
            }
        }
    }
}

async fn run_link(weak: Weak<Inner>, attempt: u64, endpoint: String) {
    let Some(connector) = weak.upgrade().map(|inner| Arc::clone(&inner.connector)) else {
        return;
    };
    let opened = connector.open(&endpoint).await;

    let Some(inner) = weak.upgrade() else { return };
    let mut inbound = match opened {
        Ok(conn) => {
            if !inner.opened(attempt, conn.outbound) {
                return;
            }
            conn.inbound
        }
        Err(e) => {
            warn!(attempt, error = %e, "open failed");
            inner.metrics.transport.inc(&[("event", "lost")]);
            inner.apply(LinkEvent::Lost { attempt });
            return;
        }
    };
    drop(inner);

    while let Some(frame) = inbound.recv().await {
        let Some(inner) = weak.upgrade() else { return };
        inner.deliver(frame);
    }

    if let Some(inner) = weak.upgrade() {
        info!(attempt, "connection lost");
        inner.metrics.transport.inc(&[("event", "lost")]);
        inner.apply(LinkEvent::Lost { attempt });
    }
}
