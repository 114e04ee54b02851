use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

const BUNDLED_NEWS: &str = include_str!("../../assets/news.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    All,
    Announcements,
    Groups,
}

impl NewsCategory {
    pub const TABS: [NewsCategory; 3] = [
        NewsCategory::All,
        NewsCategory::Announcements,
        NewsCategory::Groups,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: u32,
    pub category: NewsCategory,
    pub title: String,
    pub description: String,
    pub time: String,
    pub category_label: String,
    pub image: String,
}

fn parse_news(raw: &str) -> Result<Vec<NewsItem>, String> {
    serde_json::from_str(raw).map_err(|err| format!("invalid news feed: {err}"))
}

/// News compiled into the binary.
pub fn bundled_news() -> Vec<NewsItem> {
    parse_news(BUNDLED_NEWS).unwrap_or_else(|err| {
        warn!("news: {err}");
        Vec::new()
    })
}

/// News from `path` when given and readable, the bundled feed otherwise.
pub fn load_news(path: Option<&Path>) -> Vec<NewsItem> {
    let Some(path) = path else {
        return bundled_news();
    };
    match fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))
        .and_then(|raw| parse_news(&raw))
    {
        Ok(items) => {
            info!("news: loaded {} items from {}", items.len(), path.display());
            items
        }
        Err(err) => {
            warn!("news: {err}; using bundled feed");
            bundled_news()
        }
    }
}

/// Items shown under `tab`; the All tab shows everything.
pub fn filter_news(items: &[NewsItem], tab: NewsCategory) -> Vec<&NewsItem> {
    items
        .iter()
        .filter(|item| tab == NewsCategory::All || item.category == tab)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[&NewsItem]) -> Vec<u32> {
        items.iter().map(|item| item.id).collect()
    }

    #[test]
    fn bundled_feed_parses() {
        let news = bundled_news();
        assert_eq!(news.len(), 4);
        assert_eq!(news[0].category, NewsCategory::Groups);
        assert_eq!(news[1].category_label, "Анонсы");
    }

    #[test]
    fn filters_by_tab() {
        let news = bundled_news();
        assert_eq!(ids(&filter_news(&news, NewsCategory::All)), [1, 2, 3, 4]);
        assert_eq!(ids(&filter_news(&news, NewsCategory::Groups)), [1, 4]);
        assert_eq!(ids(&filter_news(&news, NewsCategory::Announcements)), [2]);
    }

    #[test]
    fn missing_override_falls_back_to_bundled() {
        let news = load_news(Some(Path::new("/nonexistent/cold-blood-news.json")));
        assert_eq!(news.len(), 4);
    }

    #[test]
    fn rejects_malformed_feed() {
        assert!(parse_news("{\"id\": 1}").is_err());
    }
}
