//! Configuration management module.
//!
//! This module handles loading and saving the configuration file, which holds
//! the API credentials, the API base URL and the optional timeline endpoint.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use crate::timeline::{HttpPinSink, LogPinSink, TimelineSink};
use crate::trello::{TrelloClient, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/trello-pocket";
const AUTHORIZE_URL: &str = "https://trello.com/1/authorize";
const APP_NAME: &str = "Trello Pocket";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub base_url: String,
    pub timeline_url: Option<String>,
    pub timeline_token: Option<String>,
    file_path: Option<PathBuf>,
}

/// Define layout of configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline_token: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new empty instance.
    ///
    pub fn new() -> Config {
        Config {
            api_key: None,
            access_token: None,
            base_url: default_base_url(),
            timeline_url: None,
            timeline_token: None,
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. A missing file leaves the credentials unset.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if file_path.exists() {
            let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.api_key = data.api_key.filter(|k| !k.is_empty());
            self.access_token = data.access_token.filter(|t| !t.is_empty());
            self.base_url = data.base_url;
            self.timeline_url = data.timeline_url.filter(|u| !u.is_empty());
            self.timeline_token = data.timeline_token.filter(|t| !t.is_empty());
        }

        Ok(())
    }

    /// Serialize the configuration and write it to the disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            api_key: self.api_key.clone(),
            access_token: self.access_token.clone(),
            base_url: self.base_url.clone(),
            timeline_url: self.timeline_url.clone(),
            timeline_token: self.timeline_token.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Store a new access token and persist the configuration.
    ///
    pub fn save_token(&mut self, token: String) -> Result<(), AppError> {
        if token.trim().is_empty() {
            return Err(ConfigError::AccessTokenNotSet.into());
        }
        self.access_token = Some(token);
        if self.file_path.is_none() {
            self.file_path = Some(Config::default_path()?.join(Path::new(FILE_NAME)));
        }
        self.save()
    }

    /// Returns true when both the API key and the access token are present.
    ///
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.access_token.is_some()
    }

    /// Returns the URL the user opens in a browser to grant access. The token
    /// comes back in the fragment of the redirect.
    ///
    pub fn authorize_url(&self) -> Result<String, ConfigError> {
        let api_key = self.api_key.as_ref().ok_or(ConfigError::ApiKeyNotSet)?;
        let url = reqwest::Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("callback_method", "fragment"),
                ("scope", "read,write"),
                ("expiration", "never"),
                ("name", APP_NAME),
                ("key", api_key.as_str()),
                ("response_type", "token"),
            ],
        )
        .map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
        Ok(url.to_string())
    }

    /// Returns an API client for the configured credentials.
    ///
    pub fn client(&self) -> TrelloClient {
        TrelloClient::new(
            self.api_key.as_deref(),
            self.access_token.as_deref(),
            &self.base_url,
        )
    }

    /// Returns the pin sink for the timeline settings. Without both a URL
    /// and a token, pins are only logged.
    ///
    pub fn timeline_sink(&self) -> TimelineSink {
        match (&self.timeline_url, &self.timeline_token) {
            (Some(url), Some(token)) => TimelineSink::Http(HttpPinSink::new(url, token)),
            _ => TimelineSink::Log(LogPinSink),
        }
    }

    /// Returns the path of the configuration file, once loaded.
    ///
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}
