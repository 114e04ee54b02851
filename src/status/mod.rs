use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use log::{debug, info, warn};

use crate::networking::{ApiError, ServerInfo, ServerStatus};
use crate::notify::{Notification, Notifier, ToastKind};
use crate::ui::i18n::I18n;

pub mod poller;

pub const SERVER_ID: u32 = 1;
pub const SERVER_NAME: &str = "Area Of Decay (AoD)";
const PLACEHOLDER_MAX_PLAYERS: u32 = 100;
const LOAD_ERROR_DURATION: Duration = Duration::from_millis(6_000);
const OFFLINE_WARNING_DURATION: Duration = Duration::from_millis(4_000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSnapshot {
    pub id: u32,
    pub name: String,
    pub is_online: bool,
    pub online_count: u32,
    pub max_players: u32,
    pub next_restart: Option<String>,
    pub server_address: Option<String>,
    pub server_port: Option<u16>,
}

impl ServerSnapshot {
    pub fn from_poll(status: &ServerStatus, info: &ServerInfo) -> Self {
        Self {
            id: SERVER_ID,
            name: SERVER_NAME.to_owned(),
            is_online: status.is_online,
            online_count: status.online_players,
            max_players: status.total_slots,
            next_restart: Some(info.next_restart.clone()),
            server_address: Some(status.server_address.clone()),
            server_port: Some(status.server_port),
        }
    }

    /// Entry shown when the very first poll fails.
    pub fn offline_placeholder(now: DateTime<Utc>) -> Self {
        Self {
            id: SERVER_ID,
            name: SERVER_NAME.to_owned(),
            is_online: false,
            online_count: 0,
            max_players: PLACEHOLDER_MAX_PLAYERS,
            next_restart: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
            server_address: None,
            server_port: None,
        }
    }

    pub fn restart_label(&self, i18n: I18n) -> String {
        if !self.is_online {
            return i18n.server_offline().to_owned();
        }
        let time = match &self.next_restart {
            Some(raw) => format_restart_time(raw, i18n),
            None => i18n.unknown().to_owned(),
        };
        i18n.restart_at(&time)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub online_players: u32,
    pub queue_size: u32,
}

impl From<&ServerStatus> for StatsSnapshot {
    fn from(status: &ServerStatus) -> Self {
        Self {
            online_players: status.online_players,
            queue_size: status.queue_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollKind {
    Initial,
    Background,
}

/// Server list as shown in the side panel.
#[derive(Debug, Clone)]
pub struct ServerList {
    servers: Vec<ServerSnapshot>,
    loading: bool,
    selected: Option<u32>,
}

impl Default for ServerList {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerList {
    pub fn new() -> Self {
        Self {
            servers: Vec::new(),
            loading: true,
            selected: None,
        }
    }

    pub fn servers(&self) -> &[ServerSnapshot] {
        &self.servers
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    /// Fold one polling tick into the list.
    ///
    /// Returns the stats carried by a successful tick so the banner can be
    /// refreshed from the same response. A failed background tick leaves
    /// everything as it was; a failed initial load notifies once and shows
    /// an offline placeholder.
    pub fn apply_poll(
        &mut self,
        kind: PollKind,
        result: Result<(ServerStatus, ServerInfo), ApiError>,
        notifier: &mut impl Notifier,
        i18n: I18n,
        now: DateTime<Utc>,
    ) -> Option<StatsSnapshot> {
        if kind == PollKind::Initial {
            self.loading = false;
        }
        // Ticks overlap, so a slow first tick can land after a later one.
        let kind = if kind == PollKind::Initial && !self.servers.is_empty() {
            debug!("status: initial poll arrived after a newer snapshot");
            PollKind::Background
        } else {
            kind
        };
        match result {
            Ok((status, info)) => {
                let snapshot = ServerSnapshot::from_poll(&status, &info);
                debug!("status: replacing server list with {snapshot:?}");
                self.loading = false;
                self.servers = vec![snapshot];
                self.auto_select();
                Some(StatsSnapshot::from(&status))
            }
            Err(err) => {
                match kind {
                    PollKind::Initial => {
                        warn!("status: initial load failed ({err}); using offline placeholder");
                        notifier.notify(
                            Notification::new(ToastKind::Error, i18n.server_load_failed_title())
                                .description(i18n.server_load_failed_body(&err.to_string()))
                                .duration(LOAD_ERROR_DURATION),
                        );
                        self.servers = vec![ServerSnapshot::offline_placeholder(now)];
                        self.auto_select();
                    }
                    PollKind::Background => {
                        warn!("status: background refresh failed ({err}); keeping last snapshot");
                    }
                }
                None
            }
        }
    }

    /// Select a server; offline servers are flagged but still selected.
    pub fn select(&mut self, id: u32, notifier: &mut impl Notifier, i18n: I18n) {
        let offline = self
            .servers
            .iter()
            .find(|server| server.id == id)
            .is_some_and(|server| !server.is_online);
        if offline {
            notifier.notify(
                Notification::new(ToastKind::Warning, i18n.server_unavailable_title())
                    .description(i18n.server_unavailable_body())
                    .duration(OFFLINE_WARNING_DURATION),
            );
        }
        info!("status: selected server {id}");
        self.selected = Some(id);
    }

    fn auto_select(&mut self) {
        if self.selected.is_none()
            && let Some(first) = self.servers.first()
        {
            debug!("status: auto-selecting server {}", first.id);
            self.selected = Some(first.id);
        }
    }
}

/// Player counts for the top banner, fed by its own poller.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsBanner {
    stats: StatsSnapshot,
}

impl StatsBanner {
    pub fn stats(&self) -> StatsSnapshot {
        self.stats
    }

    pub fn replace(&mut self, stats: StatsSnapshot) {
        self.stats = stats;
    }

    pub fn apply_status(&mut self, result: Result<ServerStatus, ApiError>) {
        match result {
            Ok(status) => self.stats = StatsSnapshot::from(&status),
            Err(err) => debug!("stats: refresh failed ({err}); keeping previous values"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartTime {
    Exact(DateTime<Local>),
    /// `HH:MM` lifted out of a timestamp that did not parse.
    Extracted(String),
    Unknown,
}

impl RestartTime {
    pub fn label(&self, unknown: &str) -> String {
        match self {
            RestartTime::Exact(time) => time.format("%H:%M").to_string(),
            RestartTime::Extracted(time) => time.clone(),
            RestartTime::Unknown => unknown.to_owned(),
        }
    }
}

const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%#z",
    "%Y-%m-%dT%H:%M%#z",
];

const UTC_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.fZ", "%Y-%m-%dT%H:%MZ"];

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse the upstream restart timestamp, whose format is not guaranteed.
pub fn parse_restart_time(raw: &str) -> RestartTime {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return RestartTime::Exact(parsed.with_timezone(&Local));
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(trimmed, format) {
            return RestartTime::Exact(parsed.with_timezone(&Local));
        }
    }
    for format in UTC_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return RestartTime::Exact(Utc.from_utc_datetime(&naive).with_timezone(&Local));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format)
            && let Some(local) = Local.from_local_datetime(&naive).earliest()
        {
            return RestartTime::Exact(local);
        }
    }

    debug!("status: restart time {raw:?} is not a timestamp, scanning for HH:MM");
    match embedded_clock_time(raw) {
        Some(time) => RestartTime::Extracted(time),
        None => RestartTime::Unknown,
    }
}

pub fn format_restart_time(raw: &str, i18n: I18n) -> String {
    parse_restart_time(raw).label(i18n.unknown())
}

fn embedded_clock_time(raw: &str) -> Option<String> {
    raw.as_bytes()
        .windows(6)
        .find(|w| {
            w[0] == b'T'
                && w[1].is_ascii_digit()
                && w[2].is_ascii_digit()
                && w[3] == b':'
                && w[4].is_ascii_digit()
                && w[5].is_ascii_digit()
        })
        .map(|w| String::from_utf8_lossy(&w[1..]).into_owned())
}
