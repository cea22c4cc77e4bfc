//! Layered configuration: built-in defaults, then an optional file, then
//! `RINSE_`-prefixed environment variables (`__` separates sections, so
//! `RINSE_TEXT__LINE_CACHE=4096` sets `text.line_cache`).

pub mod error;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use rinse_decode::{DEFAULT_PREFIX_BYTES, DecoderOptions, DetectorKind};
use rinse_markup::{DEFAULT_DUBIOUS_MIN_CHILDREN, DEFAULT_SNIFF_CHARS, LoaderOptions};
use rinse_text::{DEFAULT_CHAR_CACHE, DEFAULT_LINE_CACHE, DEFAULT_TRIM_CACHE, Form, SanitizerOptions};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ErrorKind, Result};

const ENV_PREFIX: &str = "RINSE_";
const ENV_SEPARATOR: &str = "__";
const FILE_STEM: &str = "rinse";

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub decode: DecodeConfig,
    pub markup: MarkupConfig,
    pub text: TextConfig,
}
impl Config {
    /// Defaults, overridden by `rinse.{toml,yaml,json}` in the user's
    /// configuration directory, overridden by the environment.
    pub fn load() -> Result<Self> {
        ConfigLoader::new().with_default_locations().load()
    }

    /// Reject values that would make the pipeline misbehave. Cache sizes of
    /// zero are fine: they turn the cache off.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (self.decode.prefix_bytes, "decode.prefix_bytes"),
            (self.markup.sniff_chars, "markup.sniff_chars"),
        ];
        for (value, field) in checks {
            if value == 0 {
                exn::bail!(ErrorKind::Invalid(field));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Attempt Brotli on payloads that aren't gzip or bzip2.
    pub brotli: bool,
    /// Leading bytes inspected by encoding detectors before the whole buffer.
    pub prefix_bytes: usize,
    /// Encoding detectors, consulted in order.
    pub detectors: Vec<DetectorKind>,
}
impl Default for DecodeConfig {
    fn default() -> Self {
        let options = DecoderOptions::default();
        Self { brotli: options.brotli, prefix_bytes: DEFAULT_PREFIX_BYTES, detectors: options.detectors }
    }
}
impl DecodeConfig {
    pub fn options(&self) -> DecoderOptions {
        DecoderOptions { brotli: self.brotli, prefix_bytes: self.prefix_bytes, detectors: self.detectors.clone() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Leading characters inspected for `html` and `doctype`.
    pub sniff_chars: usize,
    /// Children needed before markup that doesn't mention `html` is believed.
    pub dubious_min_children: usize,
}
impl Default for MarkupConfig {
    fn default() -> Self {
        Self { sniff_chars: DEFAULT_SNIFF_CHARS, dubious_min_children: DEFAULT_DUBIOUS_MIN_CHILDREN }
    }
}
impl MarkupConfig {
    pub fn options(&self) -> LoaderOptions {
        LoaderOptions { sniff_chars: self.sniff_chars, dubious_min_children: self.dubious_min_children }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TextConfig {
    /// Cache capacities; `0` disables the cache.
    pub char_cache: usize,
    pub line_cache: usize,
    pub trim_cache: usize,
    /// Form used when no other is asked for.
    pub unicode_form: Form,
}
impl Default for TextConfig {
    fn default() -> Self {
        Self {
            char_cache: DEFAULT_CHAR_CACHE,
            line_cache: DEFAULT_LINE_CACHE,
            trim_cache: DEFAULT_TRIM_CACHE,
            unicode_form: Form::default(),
        }
    }
}
impl TextConfig {
    pub fn options(&self) -> SanitizerOptions {
        SanitizerOptions { char_cache: self.char_cache, line_cache: self.line_cache, trim_cache: self.trim_cache }
    }
}

/// Builder for a [`Config`]. Sources merge in the order they're added; the
/// environment is always merged last.
#[derive(Debug)]
pub struct ConfigLoader {
    figment: Figment,
}
impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
impl ConfigLoader {
    pub fn new() -> Self {
        Self { figment: Figment::from(Serialized::defaults(Config::default())) }
    }

    /// The user's configuration directory, e.g. `~/.config/rinse` on Linux.
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", FILE_STEM).map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Merge `rinse.toml`, `rinse.yaml` and `rinse.json` from
    /// [`default_dir`](Self::default_dir), those that exist.
    pub fn with_default_locations(mut self) -> Self {
        if let Some(dir) = Self::default_dir() {
            self.figment = self
                .figment
                .merge(Toml::file(dir.join(format!("{FILE_STEM}.toml"))))
                .merge(Yaml::file(dir.join(format!("{FILE_STEM}.yaml"))))
                .merge(Json::file(dir.join(format!("{FILE_STEM}.json"))));
        }
        self
    }

    /// Merge a file, picking the format from its extension. A missing file
    /// is skipped.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnsupportedFormat`] if the extension isn't recognised.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default().to_lowercase();
        self.figment = match extension.as_str() {
            "toml" => self.figment.merge(Toml::file(path)),
            "yaml" | "yml" => self.figment.merge(Yaml::file(path)),
            "json" => self.figment.merge(Json::file(path)),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(path.display().to_string())),
        };
        Ok(self)
    }

    /// Merge inline TOML.
    ///
    /// ```rust
    /// use rinse_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().with_toml_str("[markup]\nsniff_chars = 80").load().unwrap();
    /// assert_eq!(config.markup.sniff_chars, 80);
    /// assert_eq!(config.text.line_cache, 1024);
    /// ```
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.figment = self.figment.merge(Toml::string(toml));
        self
    }

    /// Merge the environment, extract and validate.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Load`] if a source can't be read or doesn't fit the schema
    /// - [`ErrorKind::Invalid`] if a value is out of range
    #[instrument(skip(self))]
    pub fn load(self) -> Result<Config> {
        let config: Config = self
            .figment
            .merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR))
            .extract()
            .or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}
