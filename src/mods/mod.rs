use std::time::{Duration, Instant};

use chrono::NaiveDate;
use log::{debug, info};

use crate::notify::{Notification, Notifier, ToastKind};
use crate::ui::i18n::I18n;
use crate::util::elapsed_between;

/// How long a simulated install/update takes.
pub const UPDATE_DURATION: Duration = Duration::from_millis(3_000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModEntry {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub last_update: String,
    pub version: String,
    pub size_mb: u32,
    pub is_updating: bool,
    pub is_installed: bool,
}

impl ModEntry {
    fn new(
        id: u32,
        name: &str,
        description: &str,
        last_update: &str,
        version: &str,
        size_mb: u32,
        is_installed: bool,
    ) -> Self {
        Self {
            id,
            name: name.to_owned(),
            description: description.to_owned(),
            last_update: last_update.to_owned(),
            version: version.to_owned(),
            size_mb,
            is_updating: false,
            is_installed,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingUpdate {
    id: u32,
    started: Instant,
}

/// Mods shown in the mods modal. Installing or updating is a timed
/// simulation; nothing is downloaded.
#[derive(Debug, Clone)]
pub struct ModCatalog {
    mods: Vec<ModEntry>,
    pending: Vec<PendingUpdate>,
}

impl ModCatalog {
    pub fn bundled() -> Self {
        Self {
            mods: vec![
                ModEntry::new(
                    1,
                    "Anomaly Enhancement Pack",
                    "Улучшенные эффекты аномалий и более реалистичное поведение",
                    "15.01.2025",
                    "v2.1.3",
                    145,
                    true,
                ),
                ModEntry::new(
                    2,
                    "Weapon Rebalance Mod",
                    "Перебалансировка оружия для более реалистичного геймплея",
                    "12.01.2025",
                    "v1.8.2",
                    89,
                    true,
                ),
                ModEntry::new(
                    3,
                    "Graphics Overhaul",
                    "Улучшенная графика и визуальные эффекты",
                    "08.01.2025",
                    "v3.0.1",
                    512,
                    false,
                ),
                ModEntry::new(
                    4,
                    "Sound Enhancement",
                    "Улучшенные звуковые эффекты и атмосферные звуки",
                    "05.01.2025",
                    "v1.4.7",
                    256,
                    true,
                ),
            ],
            pending: Vec::new(),
        }
    }

    pub fn mods(&self) -> &[ModEntry] {
        &self.mods
    }

    pub fn installed_size_mb(&self) -> u32 {
        self.mods
            .iter()
            .filter(|entry| entry.is_installed)
            .map(|entry| entry.size_mb)
            .sum()
    }

    /// Start installing or updating a mod. Returns `false` for unknown ids and
    /// for mods that are already updating.
    pub fn begin_update(
        &mut self,
        id: u32,
        now: Instant,
        notifier: &mut impl Notifier,
        i18n: I18n,
    ) -> bool {
        let Some(entry) = self.mods.iter_mut().find(|entry| entry.id == id) else {
            debug!("mods: unknown mod {id}");
            return false;
        };
        if entry.is_updating {
            debug!("mods: {} already updating", entry.name);
            return false;
        }

        let title = if entry.is_installed {
            i18n.mod_updating(&entry.name)
        } else {
            i18n.mod_installing(&entry.name)
        };
        notifier.notify(Notification::new(ToastKind::Info, title));
        info!("mods: updating {} ({})", entry.name, entry.version);
        entry.is_updating = true;
        self.pending.push(PendingUpdate { id, started: now });
        true
    }

    /// Finish every update whose time has come.
    pub fn advance(
        &mut self,
        now: Instant,
        today: NaiveDate,
        notifier: &mut impl Notifier,
        i18n: I18n,
    ) {
        let (done, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|pending| elapsed_between(pending.started, now) >= UPDATE_DURATION);
        self.pending = waiting;

        for finished in done {
            if let Some(entry) = self.mods.iter_mut().find(|entry| entry.id == finished.id) {
                entry.is_updating = false;
                entry.is_installed = true;
                entry.last_update = today.format("%d.%m.%Y").to_string();
                info!("mods: {} installed", entry.name);
                notifier.notify(Notification::new(
                    ToastKind::Success,
                    i18n.mod_installed(&entry.name),
                ));
            }
        }
    }

    pub fn next_completion_in(&self, now: Instant) -> Option<Duration> {
        self.pending
            .iter()
            .map(|pending| UPDATE_DURATION.saturating_sub(elapsed_between(pending.started, now)))
            .min()
    }
}
