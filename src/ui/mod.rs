use std::sync::Arc;

use eframe::egui::{
    self, Align, Align2, Color32, CornerRadius, Frame, Id, Layout, Margin, RichText, Sense,
    Stroke, Vec2,
};
use log::{error, info, warn};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;

use crate::config::LauncherConfig;
use crate::engine::state::{LaunchPhase, UserAction};
use crate::networking::ServerApi;
use crate::news::{NewsCategory, load_news};
use crate::notify::ToastKind;
use crate::status::ServerSnapshot;
use crate::status::poller::{PollUpdate, PollerHandle, spawn_server_poller, spawn_stats_poller};
use crate::util::{SystemClock, occupancy_fraction, progress_fraction};
use crate::window::{
    DONATE_URL, EguiBridge, FACTIONS_URL, FAQ_URL, HostBridge, LORE_URL, RULES_URL,
    WindowCommand,
};

pub mod i18n;
mod model;

use self::i18n::I18n;
use self::model::LauncherModel;

const NEWS_PANEL_WIDTH: f32 = 520.0;
const PLAY_BUTTON_HEIGHT: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    bg: Color32,
    panel: Color32,
    surface: Color32,
    surface_hover: Color32,
    sunken: Color32,
    border: Color32,
    border_strong: Color32,
    text_primary: Color32,
    text_muted: Color32,
    text_faint: Color32,
    accent: Color32,
    online: Color32,
    gold: Color32,
    info: Color32,
    success: Color32,
    warning: Color32,
}

impl Palette {
    const fn dark() -> Self {
        Self {
            bg: Color32::from_rgb(6, 6, 6),
            panel: Color32::from_rgb(12, 12, 13),
            surface: Color32::from_rgb(20, 20, 22),
            surface_hover: Color32::from_rgb(30, 30, 33),
            sunken: Color32::from_rgb(3, 3, 3),
            border: Color32::from_rgb(34, 34, 37),
            border_strong: Color32::from_rgb(60, 60, 64),
            text_primary: Color32::from_rgb(240, 240, 240),
            text_muted: Color32::from_rgb(160, 160, 166),
            text_faint: Color32::from_rgb(110, 110, 116),
            accent: Color32::from_rgb(196, 77, 86),
            online: Color32::from_rgb(77, 196, 182),
            gold: Color32::from_rgb(221, 169, 50),
            info: Color32::from_rgb(122, 186, 255),
            success: Color32::from_rgb(92, 219, 140),
            warning: Color32::from_rgb(246, 195, 111),
        }
    }

    fn toast(&self, kind: ToastKind) -> Color32 {
        match kind {
            ToastKind::Success => self.success,
            ToastKind::Error => self.accent,
            ToastKind::Warning => self.warning,
            ToastKind::Info => self.info,
        }
    }
}

fn tint(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn chip_frame(color: Color32) -> Frame {
    Frame::new()
        .fill(tint(color, 24))
        .stroke(Stroke::new(1.0, tint(color, 140)))
        .corner_radius(CornerRadius::same(255))
        .inner_margin(Margin::symmetric(8, 3))
}

fn card_frame(fill: Color32, stroke: Color32) -> Frame {
    Frame::new()
        .fill(fill)
        .stroke(Stroke::new(1.0, stroke))
        .corner_radius(CornerRadius::same(14))
        .inner_margin(Margin::symmetric(18, 14))
}

fn apply_theme(ctx: &egui::Context, colors: &Palette) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = colors.bg;
    visuals.window_fill = colors.panel;
    visuals.window_stroke = Stroke::new(1.0, colors.border);
    visuals.override_text_color = Some(colors.text_primary);
    visuals.hyperlink_color = colors.gold;
    visuals.widgets.noninteractive.bg_fill = colors.surface;
    visuals.widgets.inactive.bg_fill = colors.surface;
    visuals.widgets.inactive.weak_bg_fill = colors.surface;
    visuals.widgets.hovered.bg_fill = colors.surface_hover;
    visuals.widgets.hovered.weak_bg_fill = colors.surface_hover;
    visuals.widgets.active.bg_fill = colors.accent;
    visuals.widgets.active.weak_bg_fill = colors.accent;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, colors.border);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, colors.border);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, colors.border_strong);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, colors.accent);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors.text_muted);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, colors.text_primary);
    visuals.selection.bg_fill = tint(colors.accent, 180);
    visuals.selection.stroke = Stroke::new(1.0, colors.text_primary);
    visuals.faint_bg_color = colors.panel;
    visuals.extreme_bg_color = colors.sunken;
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = Vec2::new(10.0, 10.0);
        style.spacing.button_padding = Vec2::new(14.0, 8.0);
    });
}

fn build_runtime() -> Arc<Runtime> {
    match Runtime::new() {
        Ok(rt) => Arc::new(rt),
        Err(err) => {
            warn!("ui: failed to create multithreaded runtime ({err}); trying single-threaded runtime");
            match Builder::new_current_thread().enable_all().build() {
                Ok(rt) => Arc::new(rt),
                Err(fallback_err) => {
                    error!("ui: failed to create any Tokio runtime ({fallback_err}); terminating launcher");
                    std::process::exit(1);
                }
            }
        }
    }
}

fn queue_label(queue_size: u32) -> String {
    format!("+{queue_size}")
}

/// Requests for the host window collected while drawing a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ChromeAction {
    Window(WindowCommand),
    Open(String),
}

fn dispatch_chrome(actions: Vec<ChromeAction>, bridge: &mut impl HostBridge) {
    for action in actions {
        match action {
            ChromeAction::Window(command) => bridge.invoke(command),
            ChromeAction::Open(url) => bridge.open_external(&url),
        }
    }
}

pub struct LauncherApp {
    // Declared before the runtime so polling stops before it shuts down.
    _server_poller: PollerHandle,
    _stats_poller: PollerHandle,
    _runtime: Arc<Runtime>,
    poll_rx: mpsc::UnboundedReceiver<PollUpdate>,
    model: LauncherModel<SystemClock>,
}

impl LauncherApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: LauncherConfig) -> Self {
        let runtime = build_runtime();
        let api = Arc::new(ServerApi::new(
            &config.api_base_url,
            config.request_timeout,
            config.strict_tls,
        ));
        if !config.strict_tls {
            info!("ui: accepting any certificate from {}", api.base_url());
        }

        let (poll_tx, poll_rx) = mpsc::unbounded_channel();
        let server_poller = spawn_server_poller(
            runtime.handle(),
            api.clone(),
            config.poll_interval,
            poll_tx.clone(),
        );
        let stats_poller = spawn_stats_poller(runtime.handle(), api, config.poll_interval, poll_tx);

        let news = load_news(config.news_file.as_deref());
        apply_theme(&cc.egui_ctx, &Palette::dark());

        Self {
            _server_poller: server_poller,
            _stats_poller: stats_poller,
            _runtime: runtime,
            poll_rx,
            model: LauncherModel::new(config.language, news, SystemClock),
        }
    }

    fn sync_poll_updates(&mut self) {
        while let Ok(update) = self.poll_rx.try_recv() {
            self.model.apply_poll_update(update);
        }
    }

    fn render_navbar(
        &self,
        ui: &mut egui::Ui,
        colors: &Palette,
        i18n: I18n,
        chrome: &mut Vec<ChromeAction>,
    ) {
        let drag = ui.interact(ui.max_rect(), Id::new("title_bar_drag"), Sense::click_and_drag());
        if drag.drag_started() {
            chrome.push(ChromeAction::Window(WindowCommand::StartDrag));
        }

        ui.horizontal_centered(|ui| {
            ui.label(
                RichText::new("COLD BLOOD")
                    .size(20.0)
                    .strong()
                    .color(colors.text_primary),
            );
            ui.add_space(24.0);
            let links = [
                (i18n.nav_lore(), LORE_URL),
                (i18n.nav_rules(), RULES_URL),
                (i18n.nav_factions(), FACTIONS_URL),
                (i18n.nav_faq(), FAQ_URL),
            ];
            for (label, url) in links {
                let link = egui::Button::new(RichText::new(label).color(colors.text_muted))
                    .frame(false);
                if ui.add(link).clicked() {
                    chrome.push(ChromeAction::Open(url.to_owned()));
                }
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let close = egui::Button::new(RichText::new("❌").color(colors.text_muted))
                    .frame(false);
                if ui.add(close).clicked() {
                    chrome.push(ChromeAction::Window(WindowCommand::Close));
                }
                let minimize = egui::Button::new(RichText::new("🗕").color(colors.text_muted))
                    .frame(false);
                if ui.add(minimize).clicked() {
                    chrome.push(ChromeAction::Window(WindowCommand::Minimize));
                }
                ui.add_space(12.0);
                let donate = egui::Button::new(
                    RichText::new(i18n.donate()).strong().color(colors.bg),
                )
                .fill(colors.gold)
                .corner_radius(CornerRadius::same(8));
                if ui.add(donate).clicked() {
                    chrome.push(ChromeAction::Open(DONATE_URL.to_owned()));
                }
            });
        });
    }

    fn render_news(
        &self,
        ui: &mut egui::Ui,
        colors: &Palette,
        i18n: I18n,
        actions: &mut Vec<UserAction>,
        chrome: &mut Vec<ChromeAction>,
    ) {
        ui.horizontal(|ui| {
            for tab in NewsCategory::TABS {
                let selected = self.model.news_tab() == tab;
                let color = if selected {
                    colors.text_primary
                } else {
                    colors.text_faint
                };
                let button = egui::Button::new(RichText::new(i18n.news_tab(tab)).color(color))
                    .selected(selected)
                    .corner_radius(CornerRadius::same(8));
                if ui.add(button).clicked() && !selected {
                    actions.push(UserAction::SelectNewsTab(tab));
                }
            }
        });
        ui.add_space(6.0);

        let items = self.model.visible_news();
        if items.is_empty() {
            ui.label(RichText::new(i18n.no_news()).color(colors.text_faint));
            return;
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for item in items {
                    card_frame(colors.surface, colors.border).show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            chip_frame(colors.accent).show(ui, |ui| {
                                ui.label(
                                    RichText::new(&item.category_label)
                                        .small()
                                        .color(colors.text_primary),
                                );
                            });
                            ui.label(RichText::new(&item.time).small().color(colors.text_faint));
                        });
                        ui.label(
                            RichText::new(&item.title)
                                .strong()
                                .size(16.0)
                                .color(colors.text_primary),
                        );
                        ui.label(RichText::new(&item.description).color(colors.text_muted));
                        if !item.image.is_empty() {
                            let link = egui::Button::new(
                                RichText::new(i18n.open_image()).small().color(colors.gold),
                            )
                            .frame(false);
                            if ui.add(link).clicked() {
                                chrome.push(ChromeAction::Open(item.image.clone()));
                            }
                        }
                    });
                    ui.add_space(4.0);
                }
            });
    }

    fn render_stats_banner(&self, ui: &mut egui::Ui, colors: &Palette, i18n: I18n) {
        let stats = self.model.banner().stats();
        Frame::new()
            .fill(colors.panel)
            .stroke(Stroke::new(1.0, colors.border))
            .corner_radius(CornerRadius::same(255))
            .inner_margin(Margin::symmetric(16, 8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("●").color(colors.online));
                    ui.label(
                        RichText::new(i18n.stats_in_zone(stats.online_players))
                            .color(colors.text_primary),
                    );
                    chip_frame(colors.gold).show(ui, |ui| {
                        ui.label(
                            RichText::new(queue_label(stats.queue_size))
                                .small()
                                .color(colors.gold),
                        );
                    });
                });
            });
    }

    fn render_server_card(
        &self,
        ui: &mut egui::Ui,
        colors: &Palette,
        i18n: I18n,
        server: &ServerSnapshot,
        actions: &mut Vec<UserAction>,
    ) {
        let selected = self.model.servers().selected() == Some(server.id);
        let (fill, stroke) = match (selected, server.is_online) {
            (true, true) => (tint(Color32::WHITE, 13), tint(Color32::WHITE, 51)),
            (true, false) => (tint(colors.accent, 13), tint(colors.accent, 51)),
            (false, _) => (tint(Color32::WHITE, 5), tint(Color32::WHITE, 13)),
        };
        let status_color = if server.is_online {
            colors.online
        } else {
            colors.accent
        };

        let response = card_frame(fill, stroke)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(&server.name)
                            .strong()
                            .size(16.0)
                            .color(colors.text_primary),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(RichText::new("●").color(status_color));
                        if !server.is_online {
                            ui.add(egui::Spinner::new().size(14.0).color(colors.accent));
                        }
                    });
                });
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(server.restart_label(i18n))
                            .small()
                            .color(colors.text_muted),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        chip_frame(status_color).show(ui, |ui| {
                            ui.label(
                                RichText::new(format!(
                                    "{}/{}",
                                    server.online_count, server.max_players
                                ))
                                .small()
                                .color(colors.text_primary),
                            );
                        });
                    });
                });
                let bar_fill = if server.is_online {
                    Color32::WHITE
                } else {
                    colors.text_faint
                };
                ui.add(
                    egui::ProgressBar::new(occupancy_fraction(
                        server.online_count,
                        server.max_players,
                    ))
                    .desired_height(6.0)
                    .fill(bar_fill),
                );
            })
            .response
            .interact(Sense::click());
        if response.clicked() {
            actions.push(UserAction::SelectServer(server.id));
        }
    }

    fn render_servers(
        &self,
        ui: &mut egui::Ui,
        colors: &Palette,
        i18n: I18n,
        actions: &mut Vec<UserAction>,
    ) {
        let servers = self.model.servers();
        if servers.is_loading() {
            card_frame(tint(Color32::WHITE, 5), tint(Color32::WHITE, 13)).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.add_space(18.0);
                ui.vertical_centered(|ui| {
                    ui.add(egui::Spinner::new().size(20.0).color(colors.text_muted));
                });
                ui.add_space(18.0);
            });
        } else {
            for server in servers.servers() {
                self.render_server_card(ui, colors, i18n, server, actions);
            }
        }

        card_frame(tint(Color32::WHITE, 3), tint(Color32::WHITE, 8)).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new().size(14.0).color(colors.text_faint));
                ui.label(RichText::new(i18n.server_in_development()).color(colors.text_faint));
            });
        });
    }

    fn render_launch(
        &self,
        ui: &mut egui::Ui,
        colors: &Palette,
        i18n: I18n,
        actions: &mut Vec<UserAction>,
    ) {
        let state = self.model.launch();

        let mut nickname = state.nickname.clone();
        let stroke_color = if state.nickname_error.is_some() {
            colors.accent
        } else {
            colors.border
        };
        Frame::new()
            .stroke(Stroke::new(1.0, stroke_color))
            .corner_radius(CornerRadius::same(10))
            .show(ui, |ui| {
                let edit = egui::TextEdit::singleline(&mut nickname)
                    .hint_text(i18n.nickname_placeholder())
                    .desired_width(f32::INFINITY)
                    .margin(Margin::symmetric(12, 10));
                if ui.add_enabled(state.is_interactive(), edit).changed() {
                    actions.push(UserAction::EditNickname(nickname.clone()));
                }
            });
        if let Some(err) = state.nickname_error {
            ui.label(
                RichText::new(i18n.nickname_error(err))
                    .small()
                    .color(colors.accent),
            );
        }

        ui.horizontal(|ui| {
            let mods = egui::Button::new(RichText::new(i18n.mods_button()).color(colors.text_primary))
                .min_size(Vec2::new(120.0, PLAY_BUTTON_HEIGHT))
                .corner_radius(CornerRadius::same(10));
            if ui.add(mods).clicked() {
                actions.push(UserAction::OpenMods);
            }

            let width = ui.available_width();
            if state.is_interactive() {
                let play = egui::Button::new(
                    RichText::new(i18n.launch_label(LaunchPhase::Idle))
                        .size(18.0)
                        .strong()
                        .color(Color32::WHITE),
                )
                .fill(colors.accent)
                .min_size(Vec2::new(width, PLAY_BUTTON_HEIGHT))
                .corner_radius(CornerRadius::same(10));
                if ui.add(play).clicked() {
                    actions.push(UserAction::ClickPlay);
                }
            } else {
                ui.add(
                    egui::ProgressBar::new(progress_fraction(state.progress))
                        .desired_width(width)
                        .desired_height(PLAY_BUTTON_HEIGHT)
                        .fill(colors.accent)
                        .corner_radius(CornerRadius::same(10))
                        .animate(true)
                        .text(
                            RichText::new(i18n.launch_progress(state.phase, state.progress))
                                .strong()
                                .color(Color32::WHITE),
                        ),
                );
            }
        });
    }

    fn render_mods_modal(
        &self,
        ctx: &egui::Context,
        colors: &Palette,
        i18n: I18n,
        actions: &mut Vec<UserAction>,
    ) {
        if !self.model.mods_open() {
            return;
        }
        let catalog = self.model.mods();

        let modal = egui::Modal::new(Id::new("mods_modal")).show(ctx, |ui| {
            ui.set_width(780.0);
            ui.horizontal(|ui| {
                ui.heading(RichText::new(i18n.mods_title()).color(colors.text_primary));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let close = egui::Button::new(RichText::new("❌").color(colors.text_muted))
                        .frame(false);
                    if ui.add(close).clicked() {
                        actions.push(UserAction::CloseMods);
                    }
                });
            });
            ui.separator();

            egui::Grid::new("mods_grid")
                .num_columns(5)
                .striped(true)
                .spacing([14.0, 10.0])
                .show(ui, |ui| {
                    for header in [
                        i18n.mods_column_name(),
                        i18n.mods_column_status(),
                        i18n.mods_column_size(),
                        i18n.mods_column_updated(),
                    ] {
                        ui.label(RichText::new(header).small().color(colors.text_faint));
                    }
                    ui.label("");
                    ui.end_row();

                    for entry in catalog.mods() {
                        ui.vertical(|ui| {
                            ui.set_max_width(300.0);
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(&entry.name).strong());
                                ui.label(
                                    RichText::new(&entry.version)
                                        .small()
                                        .color(colors.text_faint),
                                );
                            });
                            ui.label(
                                RichText::new(&entry.description)
                                    .small()
                                    .color(colors.text_muted),
                            );
                        });

                        let status_color = if entry.is_updating {
                            colors.gold
                        } else if entry.is_installed {
                            colors.online
                        } else {
                            colors.text_faint
                        };
                        ui.horizontal(|ui| {
                            if entry.is_updating {
                                ui.add(egui::Spinner::new().size(12.0).color(colors.gold));
                            }
                            chip_frame(status_color).show(ui, |ui| {
                                ui.label(
                                    RichText::new(
                                        i18n.mod_status(entry.is_updating, entry.is_installed),
                                    )
                                    .small()
                                    .color(status_color),
                                );
                            });
                        });
                        ui.label(RichText::new(i18n.size_mb(entry.size_mb)).color(colors.text_muted));
                        ui.label(RichText::new(&entry.last_update).color(colors.text_muted));

                        let action = egui::Button::new(i18n.mod_action(entry.is_installed))
                            .corner_radius(CornerRadius::same(8));
                        if ui.add_enabled(!entry.is_updating, action).clicked() {
                            actions.push(UserAction::InstallMod(entry.id));
                        }
                        ui.end_row();
                    }
                });

            ui.separator();
            ui.horizontal(|ui| {
                ui.label(RichText::new(i18n.mods_installed_total()).color(colors.text_muted));
                ui.label(
                    RichText::new(i18n.size_mb(catalog.installed_size_mb()))
                        .strong()
                        .color(colors.text_primary),
                );
            });
        });
        if modal.should_close() {
            actions.push(UserAction::CloseMods);
        }
    }

    fn render_toasts(&self, ctx: &egui::Context, colors: &Palette, dismissed: &mut Vec<u64>) {
        let toasts = self.model.toasts().visible();
        if toasts.is_empty() {
            return;
        }
        egui::Area::new(Id::new("toasts"))
            .anchor(Align2::RIGHT_TOP, Vec2::new(-16.0, 72.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in toasts {
                    let color = colors.toast(toast.notification.kind);
                    Frame::new()
                        .fill(colors.surface)
                        .stroke(Stroke::new(1.0, tint(color, 140)))
                        .corner_radius(CornerRadius::same(12))
                        .inner_margin(Margin::same(12))
                        .show(ui, |ui| {
                            ui.set_width(320.0);
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(&toast.notification.title).strong().color(color));
                                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                    if ui.small_button("❌").clicked() {
                                        dismissed.push(toast.id);
                                    }
                                });
                            });
                            if let Some(description) = &toast.notification.description {
                                ui.label(RichText::new(description).small().color(colors.text_muted));
                            }
                        });
                    ui.add_space(6.0);
                }
            });
    }
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.model.tick();
        self.sync_poll_updates();

        let colors = Palette::dark();
        let i18n = self.model.i18n();
        let mut actions = Vec::new();
        let mut chrome = Vec::new();
        let mut dismissed = Vec::new();

        egui::TopBottomPanel::top("navbar")
            .exact_height(64.0)
            .frame(
                Frame::new()
                    .fill(colors.panel)
                    .stroke(Stroke::new(1.0, colors.border))
                    .inner_margin(Margin::symmetric(20, 12)),
            )
            .show(ctx, |ui| self.render_navbar(ui, &colors, i18n, &mut chrome));

        egui::SidePanel::left("news_panel")
            .exact_width(NEWS_PANEL_WIDTH)
            .resizable(false)
            .frame(
                Frame::new()
                    .fill(colors.bg)
                    .inner_margin(Margin::symmetric(20, 16)),
            )
            .show(ctx, |ui| {
                self.render_news(ui, &colors, i18n, &mut actions, &mut chrome)
            });

        egui::CentralPanel::default()
            .frame(
                Frame::new()
                    .fill(colors.bg)
                    .inner_margin(Margin::symmetric(20, 16)),
            )
            .show(ctx, |ui| {
                ui.with_layout(Layout::top_down(Align::RIGHT), |ui| {
                    self.render_stats_banner(ui, &colors, i18n);
                });
                ui.add_space(8.0);
                self.render_servers(ui, &colors, i18n, &mut actions);
                ui.add_space(12.0);
                ui.separator();
                self.render_launch(ui, &colors, i18n, &mut actions);
            });

        self.render_mods_modal(ctx, &colors, i18n, &mut actions);
        self.render_toasts(ctx, &colors, &mut dismissed);

        for id in dismissed {
            self.model.dismiss_toast(id);
        }
        dispatch_chrome(chrome, &mut EguiBridge::new(ctx));
        for action in actions {
            self.model.handle_action(action);
        }
        ctx.request_repaint_after(self.model.next_repaint_in());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::tests::RecordingBridge;

    #[test]
    fn chrome_actions_reach_the_bridge_in_order() {
        let mut bridge = RecordingBridge::default();
        dispatch_chrome(
            vec![
                ChromeAction::Window(WindowCommand::StartDrag),
                ChromeAction::Open(RULES_URL.to_owned()),
                ChromeAction::Window(WindowCommand::Minimize),
                ChromeAction::Open(DONATE_URL.to_owned()),
                ChromeAction::Window(WindowCommand::Close),
            ],
            &mut bridge,
        );
        assert_eq!(
            bridge.commands,
            [
                WindowCommand::StartDrag,
                WindowCommand::Minimize,
                WindowCommand::Close
            ]
        );
        assert_eq!(bridge.opened, [RULES_URL, DONATE_URL]);
    }

    #[test]
    fn queue_label_is_shown_even_when_empty() {
        assert_eq!(queue_label(0), "+0");
        assert_eq!(queue_label(12), "+12");
    }

    #[test]
    fn palette_keeps_brand_colors() {
        let colors = Palette::dark();
        assert_eq!(colors.bg, Color32::from_rgb(0x06, 0x06, 0x06));
        assert_eq!(colors.accent, Color32::from_rgb(0xC4, 0x4D, 0x56));
        assert_eq!(colors.online, Color32::from_rgb(0x4D, 0xC4, 0xB6));
        assert_eq!(colors.gold, Color32::from_rgb(0xDD, 0xA9, 0x32));
        assert_eq!(colors.toast(ToastKind::Error), colors.accent);
    }
}
