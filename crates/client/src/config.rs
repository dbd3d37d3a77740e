use config::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;

const ENV_PREFIX: &str = "RAFIKI_CLIENT_";

#[derive(Deserialize, Clone, Debug)]
pub struct ClientSettings {
    pub api: ApiSettings,
    pub state: StateSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApiSettings {
    pub base_url: String,
    pub session_token: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StateSettings {
    /// Directory holding the persisted like/bookmark maps.
    pub dir: String,
}

impl ClientSettings {
    pub fn new() -> Result<Self, ConfigError> {
        let env_map = collect_env_vars(std::env::vars());

        let s = config::Config::builder()
            .set_default("api.base_url", "http://127.0.0.1:3000")?
            .set_default("state.dir", "data/client-state")?
            .add_source(config::File::with_name("client").required(false))
            .add_source(config::File::from_str(
                &serde_json::to_string(&env_map)
                    .map_err(|e| ConfigError::Foreign(Box::new(e)))?,
                config::FileFormat::Json,
            ))
            .build()?;

        s.try_deserialize()
    }
}

fn collect_env_vars(vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
    vars.filter(|(k, _)| k.starts_with(ENV_PREFIX))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches(ENV_PREFIX)
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}
