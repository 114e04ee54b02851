use crate::news::NewsCategory;

// Phases of the Play button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LaunchPhase {
    #[default]
    Idle,
    Checking,
    Downloading,
}

impl LaunchPhase {
    /// Percentage added per step while in this phase.
    pub const fn increment(self) -> u8 {
        match self {
            LaunchPhase::Idle => 0,
            LaunchPhase::Checking => 10,
            LaunchPhase::Downloading => 5,
        }
    }

    /// Phase entered once this one reaches 100%.
    pub const fn next(self) -> LaunchPhase {
        match self {
            LaunchPhase::Idle => LaunchPhase::Checking,
            LaunchPhase::Checking => LaunchPhase::Downloading,
            LaunchPhase::Downloading => LaunchPhase::Idle,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NicknameError {
    Missing,
}

// The central source of truth for the Play button.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LaunchState {
    pub phase: LaunchPhase,
    pub progress: u8,
    pub nickname: String,
    pub nickname_error: Option<NicknameError>,
}

impl LaunchState {
    pub fn is_interactive(&self) -> bool {
        self.phase == LaunchPhase::Idle
    }
}

// Actions triggered by the user from the UI layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    EditNickname(String),
    ClickPlay,
    SelectServer(u32),
    SelectNewsTab(NewsCategory),
    InstallMod(u32),
    OpenMods,
    CloseMods,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivateOutcome {
    Started,
    Rejected(NicknameError),
    Busy,
}
