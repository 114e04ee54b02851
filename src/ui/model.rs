use std::time::Duration;

use chrono::{Local, Utc};
use log::{debug, info};

use crate::engine::LaunchSequencer;
use crate::engine::state::{ActivateOutcome, LaunchState, UserAction};
use crate::mods::ModCatalog;
use crate::news::{NewsCategory, NewsItem, filter_news};
use crate::notify::ToastQueue;
use crate::status::poller::PollUpdate;
use crate::status::{ServerList, StatsBanner};
use crate::ui::i18n::{I18n, Language};
use crate::util::Clock;

/// Longest the UI sleeps between two frames when nothing is animating.
pub const IDLE_REPAINT: Duration = Duration::from_millis(500);

/// Everything the launcher window shows, minus the widgets.
pub struct LauncherModel<C: Clock> {
    language: Language,
    launch: LaunchSequencer,
    servers: ServerList,
    banner: StatsBanner,
    toasts: ToastQueue<C>,
    mods: ModCatalog,
    news: Vec<NewsItem>,
    news_tab: NewsCategory,
    show_mods: bool,
}

impl<C: Clock> LauncherModel<C> {
    pub fn new(language: Language, news: Vec<NewsItem>, clock: C) -> Self {
        Self {
            language,
            launch: LaunchSequencer::new(),
            servers: ServerList::new(),
            banner: StatsBanner::default(),
            toasts: ToastQueue::new(clock),
            mods: ModCatalog::bundled(),
            news,
            news_tab: NewsCategory::All,
            show_mods: false,
        }
    }

    pub fn i18n(&self) -> I18n {
        I18n::new(self.language)
    }

    pub fn launch(&self) -> &LaunchState {
        self.launch.state()
    }

    pub fn servers(&self) -> &ServerList {
        &self.servers
    }

    pub fn banner(&self) -> &StatsBanner {
        &self.banner
    }

    pub fn toasts(&self) -> &ToastQueue<C> {
        &self.toasts
    }

    pub fn mods(&self) -> &ModCatalog {
        &self.mods
    }

    pub fn news_tab(&self) -> NewsCategory {
        self.news_tab
    }

    pub fn visible_news(&self) -> Vec<&NewsItem> {
        filter_news(&self.news, self.news_tab)
    }

    pub fn mods_open(&self) -> bool {
        self.show_mods
    }

    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.dismiss(id);
    }

    pub fn handle_action(&mut self, action: UserAction) {
        let i18n = self.i18n();
        match action {
            UserAction::EditNickname(nickname) => self.launch.set_nickname(nickname),
            UserAction::ClickPlay => match self.launch.activate() {
                ActivateOutcome::Started => info!("ui: launch sequence started"),
                ActivateOutcome::Rejected(err) => debug!("ui: play rejected ({err:?})"),
                ActivateOutcome::Busy => {}
            },
            UserAction::SelectServer(id) => self.servers.select(id, &mut self.toasts, i18n),
            UserAction::SelectNewsTab(tab) => self.news_tab = tab,
            UserAction::InstallMod(id) => {
                let now = self.toasts.clock().now();
                self.mods.begin_update(id, now, &mut self.toasts, i18n);
            }
            UserAction::OpenMods => self.show_mods = true,
            UserAction::CloseMods => self.show_mods = false,
        }
    }

    /// Fold one message from the pollers into the view state.
    pub fn apply_poll_update(&mut self, update: PollUpdate) {
        let i18n = self.i18n();
        match update {
            PollUpdate::Servers { kind, result } => {
                if let Some(stats) =
                    self.servers
                        .apply_poll(kind, result, &mut self.toasts, i18n, Utc::now())
                {
                    self.banner.replace(stats);
                }
            }
            PollUpdate::Stats(result) => self.banner.apply_status(result),
        }
    }

    /// Catch every timer up with the clock.
    pub fn tick(&mut self) {
        let i18n = self.i18n();
        self.launch.sync(self.toasts.clock());
        let now = self.toasts.clock().now();
        self.mods
            .advance(now, Local::now().date_naive(), &mut self.toasts, i18n);
        self.toasts.prune();
    }

    pub fn next_repaint_in(&self) -> Duration {
        let now = self.toasts.clock().now();
        [
            self.launch.next_event_in(),
            self.toasts.next_expiry_in(),
            self.mods.next_completion_in(now),
        ]
        .into_iter()
        .flatten()
        .fold(IDLE_REPAINT, Duration::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::{LaunchPhase, NicknameError};
    use crate::networking::{ApiError, ServerInfo, ServerStatus};
    use crate::news::bundled_news;
    use crate::notify::ToastKind;
    use crate::status::{PollKind, SERVER_ID, StatsSnapshot};
    use crate::util::ManualClock;

    fn model() -> LauncherModel<ManualClock> {
        LauncherModel::new(Language::Russian, bundled_news(), ManualClock::new())
    }

    fn advance(model: &mut LauncherModel<ManualClock>, by: Duration) {
        model.toasts.clock().advance(by);
        model.tick();
    }

    fn status(online: bool, players: u32, queue: u32) -> ServerStatus {
        ServerStatus {
            server_address: "203.0.113.7".into(),
            server_port: 2302,
            is_online: online,
            is_offline: !online,
            total_slots: 100,
            online_players: players,
            queue_size: queue,
        }
    }

    fn info() -> ServerInfo {
        ServerInfo {
            uptime_seconds: 0,
            uptime_minutes: 0,
            uptime_hours: 0,
            next_restart: "2025-01-15T14:30:00Z".into(),
            game_time: "12:00".into(),
        }
    }

    fn toast_kinds(model: &LauncherModel<ManualClock>) -> Vec<ToastKind> {
        model
            .toasts()
            .visible()
            .iter()
            .map(|toast| toast.notification.kind)
            .collect()
    }

    #[test]
    fn play_needs_a_nickname_then_runs_the_full_cycle() {
        let mut model = model();
        model.tick();

        model.handle_action(UserAction::ClickPlay);
        assert_eq!(model.launch().phase, LaunchPhase::Idle);
        assert_eq!(model.launch().nickname_error, Some(NicknameError::Missing));

        model.handle_action(UserAction::EditNickname("Stalker".into()));
        assert_eq!(model.launch().nickname_error, None);

        model.handle_action(UserAction::ClickPlay);
        assert_eq!(model.launch().phase, LaunchPhase::Checking);
        assert_eq!(model.next_repaint_in(), Duration::from_millis(100));

        advance(&mut model, Duration::from_millis(300));
        assert_eq!(model.launch().progress, 30);

        advance(&mut model, Duration::from_millis(3_700));
        assert_eq!(model.launch().phase, LaunchPhase::Idle);
        assert_eq!(model.next_repaint_in(), IDLE_REPAINT);
    }

    #[test]
    fn failed_first_poll_shows_placeholder_and_one_toast() {
        let mut model = model();
        model.apply_poll_update(PollUpdate::Servers {
            kind: PollKind::Initial,
            result: Err(ApiError::Network("connection refused".into())),
        });
        model.apply_poll_update(PollUpdate::Servers {
            kind: PollKind::Background,
            result: Err(ApiError::Network("connection refused".into())),
        });

        assert_eq!(toast_kinds(&model), [ToastKind::Error]);
        assert!(!model.servers().is_loading());
        assert!(!model.servers().servers()[0].is_online);

        advance(&mut model, Duration::from_millis(6_000));
        assert!(model.toasts().visible().is_empty());
    }

    #[test]
    fn poll_results_feed_the_banner() {
        let mut model = model();
        model.apply_poll_update(PollUpdate::Servers {
            kind: PollKind::Initial,
            result: Ok((status(true, 42, 3), info())),
        });
        assert_eq!(
            model.banner().stats(),
            StatsSnapshot {
                online_players: 42,
                queue_size: 3
            }
        );

        model.apply_poll_update(PollUpdate::Stats(Ok(status(true, 50, 0))));
        model.apply_poll_update(PollUpdate::Stats(Err(ApiError::Malformed(
            "expected value".into(),
        ))));
        assert_eq!(model.banner().stats().online_players, 50);
        assert_eq!(model.servers().servers()[0].online_count, 42);
    }

    #[test]
    fn selecting_an_offline_server_warns() {
        let mut model = model();
        model.apply_poll_update(PollUpdate::Servers {
            kind: PollKind::Initial,
            result: Ok((status(false, 0, 0), info())),
        });
        model.handle_action(UserAction::SelectServer(SERVER_ID));

        assert_eq!(model.servers().selected(), Some(SERVER_ID));
        assert_eq!(toast_kinds(&model), [ToastKind::Warning]);
    }

    #[test]
    fn mod_install_completes_on_the_clock() {
        let mut model = model();
        model.handle_action(UserAction::OpenMods);
        assert!(model.mods_open());

        model.handle_action(UserAction::InstallMod(3));
        assert!(model.mods().mods()[2].is_updating);
        assert_eq!(model.next_repaint_in(), IDLE_REPAINT);

        advance(&mut model, Duration::from_millis(2_900));
        assert!(model.mods().mods()[2].is_updating);
        assert_eq!(model.next_repaint_in(), Duration::from_millis(100));

        advance(&mut model, Duration::from_millis(100));
        assert!(model.mods().mods()[2].is_installed);
        assert_eq!(toast_kinds(&model), [ToastKind::Info, ToastKind::Success]);

        model.handle_action(UserAction::CloseMods);
        assert!(!model.mods_open());
    }

    #[test]
    fn news_tabs_filter_the_feed() {
        let mut model = model();
        assert_eq!(model.visible_news().len(), 4);
        model.handle_action(UserAction::SelectNewsTab(NewsCategory::Announcements));
        assert_eq!(model.news_tab(), NewsCategory::Announcements);
        assert_eq!(model.visible_news().len(), 1);
    }

    #[test]
    fn dismissed_toasts_disappear() {
        let mut model = model();
        model.handle_action(UserAction::InstallMod(1));
        let id = model.toasts().visible()[0].id;
        model.dismiss_toast(id);
        assert!(model.toasts().visible().is_empty());
    }
}
