use eframe::egui::{self, ViewportCommand};
use log::{debug, warn};

pub const LORE_URL: &str = "https://cold-blood.online/lor";
pub const RULES_URL: &str = "https://cold-blood.online/rules";
pub const FACTIONS_URL: &str = "https://cold-blood.online/factions";
pub const FAQ_URL: &str = "https://cold-blood.online/faq";
pub const DONATE_URL: &str = "http://cold-blood.ru/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    Minimize,
    Close,
    StartDrag,
}

impl WindowCommand {
    pub fn viewport_command(self) -> ViewportCommand {
        match self {
            WindowCommand::Minimize => ViewportCommand::Minimized(true),
            WindowCommand::Close => ViewportCommand::Close,
            WindowCommand::StartDrag => ViewportCommand::StartDrag,
        }
    }
}

/// Window chrome and link handling offered by the host. Fire and forget.
pub trait HostBridge {
    fn invoke(&mut self, command: WindowCommand);
    fn open_external(&mut self, url: &str);
}

pub struct EguiBridge<'a> {
    ctx: &'a egui::Context,
}

impl<'a> EguiBridge<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl HostBridge for EguiBridge<'_> {
    fn invoke(&mut self, command: WindowCommand) {
        debug!("window: {command:?}");
        self.ctx.send_viewport_cmd(command.viewport_command());
    }

    fn open_external(&mut self, url: &str) {
        debug!("window: opening {url}");
        if let Err(err) = open::that_detached(url) {
            warn!("window: failed to open {url}: {err}");
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Default)]
    pub(crate) struct RecordingBridge {
        pub commands: Vec<WindowCommand>,
        pub opened: Vec<String>,
    }

    impl HostBridge for RecordingBridge {
        fn invoke(&mut self, command: WindowCommand) {
            self.commands.push(command);
        }

        fn open_external(&mut self, url: &str) {
            self.opened.push(url.to_owned());
        }
    }

    #[test]
    fn maps_commands_to_viewport() {
        assert!(matches!(
            WindowCommand::Minimize.viewport_command(),
            ViewportCommand::Minimized(true)
        ));
        assert!(matches!(
            WindowCommand::Close.viewport_command(),
            ViewportCommand::Close
        ));
        assert!(matches!(
            WindowCommand::StartDrag.viewport_command(),
            ViewportCommand::StartDrag
        ));
    }
}
