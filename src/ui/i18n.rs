use clap::ValueEnum;

use crate::engine::state::{LaunchPhase, NicknameError};
use crate::news::NewsCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Language {
    #[value(name = "ru")]
    Russian,
    #[value(name = "en")]
    English,
}

const LOCALE_LANGUAGE_CODES: [(&[&str], Language); 2] = [
    (&["ru", "rus", "be", "bel", "kk", "kaz"], Language::Russian),
    (&["en", "eng"], Language::English),
];

pub fn parse_locale_token(token: &str) -> Option<Language> {
    let normalized = token
        .split(['.', '@'])
        .next()
        .unwrap_or(token)
        .replace('-', "_")
        .to_ascii_lowercase();
    let language_code = normalized.split('_').next().unwrap_or(&normalized);

    LOCALE_LANGUAGE_CODES.iter().find_map(|(codes, language)| {
        codes
            .iter()
            .any(|code| *code == language_code)
            .then_some(*language)
    })
}

/// Language from the usual locale variables, Russian when none match.
pub fn detect_system_language() -> Language {
    for var in ["LC_ALL", "LANGUAGE", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            for token in value.split(':') {
                if let Some(language) = parse_locale_token(token) {
                    return language;
                }
            }
        }
    }

    Language::Russian
}

#[derive(Debug, Clone, Copy)]
pub struct I18n {
    language: Language,
}

impl I18n {
    #[must_use]
    pub const fn new(language: Language) -> Self {
        Self { language }
    }

    fn pick<'a>(self, russian: &'a str, english: &'a str) -> &'a str {
        match self.language {
            Language::Russian => russian,
            Language::English => english,
        }
    }

    pub fn nav_lore(self) -> &'static str {
        self.pick("Лор", "Lore")
    }

    pub fn nav_rules(self) -> &'static str {
        self.pick("Правила", "Rules")
    }

    pub fn nav_factions(self) -> &'static str {
        self.pick("Группировки", "Factions")
    }

    pub fn nav_faq(self) -> &'static str {
        "FAQ"
    }

    pub fn donate(self) -> &'static str {
        self.pick("Пожертвования", "Donate")
    }

    pub fn news_tab(self, tab: NewsCategory) -> &'static str {
        match tab {
            NewsCategory::All => self.pick("Все новости", "All news"),
            NewsCategory::Announcements => self.pick("Дневник разработки", "Dev diary"),
            NewsCategory::Groups => self.pick("Объявления", "Announcements"),
        }
    }

    pub fn no_news(self) -> &'static str {
        self.pick("Новостей пока нет.", "No news yet.")
    }

    pub fn open_image(self) -> &'static str {
        self.pick("Изображение", "Image")
    }

    pub fn stats_in_zone(self, players: u32) -> String {
        match self.language {
            Language::Russian => format!("В зоне {players} сталкеров"),
            Language::English => format!("{players} stalkers in the Zone"),
        }
    }

    pub fn server_in_development(self) -> &'static str {
        self.pick("Сервер в разработке", "Server in development")
    }

    pub fn restart_at(self, time: &str) -> String {
        match self.language {
            Language::Russian => format!("Рестарт в {time}"),
            Language::English => format!("Restart at {time}"),
        }
    }

    pub fn server_offline(self) -> &'static str {
        self.pick("Сервер выключен", "Server is offline")
    }

    pub fn unknown(self) -> &'static str {
        self.pick("Неизвестно", "Unknown")
    }

    pub fn server_load_failed_title(self) -> &'static str {
        self.pick(
            "Ошибка загрузки данных сервера",
            "Failed to load server data",
        )
    }

    pub fn server_load_failed_body(self, err: &str) -> String {
        match self.language {
            Language::Russian => {
                format!("Не удалось получить актуальную информацию о сервере: {err}")
            }
            Language::English => format!("Could not fetch current server information: {err}"),
        }
    }

    pub fn server_unavailable_title(self) -> &'static str {
        self.pick(
            "Этот сервер в данный момент не доступен",
            "This server is currently unavailable",
        )
    }

    pub fn server_unavailable_body(self) -> &'static str {
        self.pick(
            "Выберите другой сервер для игры",
            "Pick another server to play on",
        )
    }

    pub fn nickname_placeholder(self) -> &'static str {
        self.pick("Введите ник", "Enter nickname")
    }

    pub fn nickname_error(self, err: NicknameError) -> &'static str {
        match err {
            NicknameError::Missing => self.pick("Вы не ввели ник", "You did not enter a nickname"),
        }
    }

    pub fn launch_label(self, phase: LaunchPhase) -> &'static str {
        match phase {
            LaunchPhase::Idle => self.pick("Играть", "Play"),
            LaunchPhase::Checking => self.pick("Проверка файлов...", "Checking files..."),
            LaunchPhase::Downloading => self.pick("Загрузка файлов...", "Downloading files..."),
        }
    }

    pub fn launch_progress(self, phase: LaunchPhase, progress: u8) -> String {
        format!("{} ({progress}%)", self.launch_label(phase))
    }

    pub fn mods_button(self) -> &'static str {
        self.pick("Моды", "Mods")
    }

    pub fn mods_title(self) -> &'static str {
        self.pick("Управление модами", "Mod management")
    }

    pub fn mods_column_name(self) -> &'static str {
        self.pick("Название", "Name")
    }

    pub fn mods_column_status(self) -> &'static str {
        self.pick("Статус", "Status")
    }

    pub fn mods_column_size(self) -> &'static str {
        self.pick("Размер", "Size")
    }

    pub fn mods_column_updated(self) -> &'static str {
        self.pick("Обновлено", "Updated")
    }

    pub fn mod_status(self, updating: bool, installed: bool) -> &'static str {
        if updating {
            self.pick("Обновляется", "Updating")
        } else if installed {
            self.pick("Установлен", "Installed")
        } else {
            self.pick("Не установлен", "Not installed")
        }
    }

    pub fn mod_action(self, installed: bool) -> &'static str {
        if installed {
            self.pick("Обновить", "Update")
        } else {
            self.pick("Установить", "Install")
        }
    }

    pub fn size_mb(self, megabytes: u32) -> String {
        match self.language {
            Language::Russian => format!("{megabytes} МБ"),
            Language::English => format!("{megabytes} MB"),
        }
    }

    pub fn mods_installed_total(self) -> &'static str {
        self.pick(
            "Общий размер установленных модов:",
            "Total size of installed mods:",
        )
    }

    pub fn mod_updating(self, name: &str) -> String {
        match self.language {
            Language::Russian => format!("Обновление мода \"{name}\"..."),
            Language::English => format!("Updating mod \"{name}\"..."),
        }
    }

    pub fn mod_installing(self, name: &str) -> String {
        match self.language {
            Language::Russian => format!("Установка мода \"{name}\"..."),
            Language::English => format!("Installing mod \"{name}\"..."),
        }
    }

    pub fn mod_installed(self, name: &str) -> String {
        match self.language {
            Language::Russian => format!("Мод \"{name}\" успешно установлен!"),
            Language::English => format!("Mod \"{name}\" installed successfully!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_languages_from_locale_tokens() {
        let samples = [
            ("ru_RU.UTF-8", Language::Russian),
            ("ru-RU", Language::Russian),
            ("be_BY", Language::Russian),
            ("kk_KZ.UTF-8", Language::Russian),
            ("en_US.UTF-8", Language::English),
            ("en-GB@euro", Language::English),
            ("eng_US", Language::English),
        ];

        for (token, expected) in samples {
            assert_eq!(parse_locale_token(token), Some(expected));
        }
    }

    #[test]
    fn ignores_unknown_language_tokens() {
        assert_eq!(parse_locale_token("pl_PL"), None);
        assert_eq!(parse_locale_token("C"), None);
    }

    #[test]
    fn renders_launch_progress() {
        let ru = I18n::new(Language::Russian);
        assert_eq!(ru.launch_label(LaunchPhase::Idle), "Играть");
        assert_eq!(
            ru.launch_progress(LaunchPhase::Checking, 40),
            "Проверка файлов... (40%)"
        );
        let en = I18n::new(Language::English);
        assert_eq!(
            en.launch_progress(LaunchPhase::Downloading, 5),
            "Downloading files... (5%)"
        );
    }
}
