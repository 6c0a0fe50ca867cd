use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./data/viewer.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DDRAGON_BASE: &str = "https://ddragon.leagueoflegends.com/cdn";
pub const DEFAULT_DDRAGON_VERSION: &str = "14.24.1";
pub const DEFAULT_LOCALE: &str = "ko_KR";
pub const DEFAULT_CHAMPIONS_URL: &str = "http://127.0.0.1:8080/data/champions.json";
pub const DEFAULT_OBJECTS_URL: &str = "http://127.0.0.1:8080/data/objects.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub catalog: CatalogConfig,
}

/// Where the read-only catalogs are fetched from.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub champions_url: String,
    pub objects_url: String,
    pub ddragon_base: String,
    pub ddragon_version: String,
    pub locale: String,
}

impl CatalogConfig {
    pub fn ddragon_root(&self) -> String {
        format!(
            "{}/{}",
            self.ddragon_base.trim_end_matches('/'),
            self.ddragon_version
        )
    }

    pub fn items_url(&self) -> String {
        format!("{}/data/{}/item.json", self.ddragon_root(), self.locale)
    }

    pub fn champion_detail_url(&self, name_en: &str) -> String {
        format!(
            "{}/data/{}/champion/{}.json",
            self.ddragon_root(),
            self.locale,
            name_en
        )
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            champions_url: DEFAULT_CHAMPIONS_URL.to_string(),
            objects_url: DEFAULT_OBJECTS_URL.to_string(),
            ddragon_base: DEFAULT_DDRAGON_BASE.to_string(),
            ddragon_version: DEFAULT_DDRAGON_VERSION.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: var_or("VIEWER_DATABASE_URL", DEFAULT_DATABASE_URL),
            bind_addr: var_or("VIEWER_BIND_ADDR", DEFAULT_BIND_ADDR),
            catalog: CatalogConfig {
                champions_url: var_or("VIEWER_CHAMPIONS_URL", DEFAULT_CHAMPIONS_URL),
                objects_url: var_or("VIEWER_OBJECTS_URL", DEFAULT_OBJECTS_URL),
                ddragon_base: var_or("VIEWER_DDRAGON_BASE", DEFAULT_DDRAGON_BASE),
                ddragon_version: var_or("VIEWER_DDRAGON_VERSION", DEFAULT_DDRAGON_VERSION),
                locale: var_or("VIEWER_LOCALE", DEFAULT_LOCALE),
            },
        }
    }
}
