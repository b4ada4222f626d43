//! Connection lifecycle as a pure state machine.
//!
//! The driver feeds [`LinkEvent`]s in and performs the returned
//! [`LinkAction`]s. Every open attempt and every reconnect timer carries an id;
//! completions for an id that is no longer current are stale and produce no
//! actions, so a late callback from a replaced socket cannot disturb the
//! session. At most one timer id is live at a time.

use std::time::Duration;

/// Default fixed delay before an automatic reconnect.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(1500);

/// Coarse state visible to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    ReconnectPending,
}

impl ConnectionState {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::ReconnectPending => "reconnect_pending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Connecting { attempt: u64 },
    Connected { attempt: u64 },
    ReconnectPending { timer: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    Connect { endpoint: String },
    Disconnect,
    ReconnectNow,
    Opened { attempt: u64 },
    /// Open failed, or an open connection closed or errored.
    Lost { attempt: u64 },
    TimerFired { timer: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Tear down the current connection, if any.
    Close,
    Open { attempt: u64, endpoint: String },
    StartTimer { timer: u64, delay: Duration },
    CancelTimer,
    Status(bool),
}

#[derive(Debug)]
pub struct LinkMachine {
    phase: Phase,
    endpoint: Option<String>,
    delay: Duration,
    next_id: u64,
}

impl Default for LinkMachine {
    fn default() -> Self {
        Self::new(DEFAULT_RECONNECT_DELAY)
    }
}

impl LinkMachine {
    pub fn new(delay: Duration) -> Self {
        Self {
            phase: Phase::Disconnected,
            endpoint: None,
            delay,
            next_id: 1,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> ConnectionState {
        match self.phase {
            Phase::Disconnected => ConnectionState::Disconnected,
            Phase::Connecting { .. } => ConnectionState::Connecting,
            Phase::Connected { .. } => ConnectionState::Connected,
            Phase::ReconnectPending { .. } => ConnectionState::ReconnectPending,
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// True while `attempt` is the open in flight.
    pub fn is_opening(&self, attempt: u64) -> bool {
        self.phase == Phase::Connecting { attempt }
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn was_live(&self) -> bool {
        matches!(self.phase, Phase::Connecting { .. } | Phase::Connected { .. })
    }

    /// Replace whatever is running with a fresh open of the recorded endpoint.
    fn reopen(&mut self, endpoint: String) -> Vec<LinkAction> {
        let mut actions = vec![LinkAction::CancelTimer, LinkAction::Close];
        if matches!(self.phase, Phase::Connected { .. }) {
            actions.push(LinkAction::Status(false));
        }
        let attempt = self.fresh_id();
        self.phase = Phase::Connecting { attempt };
        actions.push(LinkAction::Open { attempt, endpoint });
        actions
    }

    /// The single transition function.
    pub fn handle(&mut self, event: LinkEvent) -> Vec<LinkAction> {
        match event {
            LinkEvent::Connect { endpoint } => {
                self.endpoint = Some(endpoint.clone());
                self.reopen(endpoint)
            }
            LinkEvent::Disconnect => {
                let mut actions = vec![LinkAction::CancelTimer, LinkAction::Close];
                if self.was_live() {
                    actions.push(LinkAction::Status(false));
                }
                self.phase = Phase::Disconnected;
                actions
            }
            LinkEvent::ReconnectNow => match self.endpoint.clone() {
                Some(endpoint) => self.reopen(endpoint),
                None => Vec::new(),
            },
            LinkEvent::Opened { attempt } => {
                if self.phase != (Phase::Connecting { attempt }) {
                    return Vec::new();
                }
                self.phase = Phase::Connected { attempt };
                vec![LinkAction::CancelTimer, LinkAction::Status(true)]
            }
            LinkEvent::Lost { attempt } => match self.phase {
                Phase::Connecting { attempt: a } | Phase::Connected { attempt: a } if a == attempt => {
                    let timer = self.fresh_id();
                    self.phase = Phase::ReconnectPending { timer };
                    vec![
                        LinkAction::Close,
                        LinkAction::Status(false),
                        LinkAction::CancelTimer,
                        LinkAction::StartTimer {
                            timer,
                            delay: self.delay,
                        },
                    ]
                }
                _ => Vec::new(),
            },
            LinkEvent::TimerFired { timer } => {
                if self.phase != (Phase::ReconnectPending { timer }) {
                    return Vec::new();
                }
                let Some(endpoint) = self.endpoint.clone() else {
                    self.phase = Phase::Disconnected;
                    return Vec::new();
                };
                let attempt = self.fresh_id();
                self.phase = Phase::Connecting { attempt };
                vec![LinkAction::Open { attempt, endpoint }]
            }
        }
    }
}
