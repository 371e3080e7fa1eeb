use std::env;

/// Runtime settings read from the environment (and `.env`, see `main`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub input_path: Option<String>,
    pub replays_folder: Option<String>,
    pub show_map: bool,
    pub ansi: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_bool = |key: &str| {
            lookup(key)
                .and_then(|val| val.parse::<bool>().ok())
                .unwrap_or(false)
        };
        let get_string = |key: &str| lookup(key).filter(|val| !val.is_empty());

        Self {
            input_path: get_string("RICKBOT_INPUT"),
            replays_folder: get_string("RICKBOT_REPLAYS_FOLDER"),
            show_map: get_bool("RICKBOT_SHOW_MAP"),
            ansi: get_bool("RICKBOT_ANSI"),
        }
    }
}
