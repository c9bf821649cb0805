//! Badge configuration.
//!
//! [`BadgeConfig`] is the validated, immutable description the controller
//! runs against: which state file to use, the name in the header, the
//! counters and the ordered page list. It is built once at startup, either
//! directly or from a serde [`BadgeProfile`] whose picture specs are resolved
//! against storage and a QR encoder.

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::pages::{AboutMePage, CounterPage, Page, StatusPage};
use crate::picture::{Picture, PictureError, QrEncoder};
use crate::storage::{ErrorMessage, Storage, truncated};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Config has no pages")]
    NoPages,
    #[error("Counter key {0} is configured twice")]
    DuplicateCounter(String),
    #[error("Failed to parse profile: {0}")]
    Parse(ErrorMessage),
    #[error("Failed to prepare picture: {0}")]
    Picture(PictureError),
}

/// A tally counter: `key` names it in the state file, `label` is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSpec {
    pub key: String,
    pub label: String,
}

impl CounterSpec {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeConfig {
    profile: String,
    display_name: String,
    counters: Vec<CounterSpec>,
    pages: Vec<Page>,
}

impl BadgeConfig {
    /// Validate and assemble a config.
    ///
    /// Fails when there are no pages or a counter key repeats.
    pub fn new(
        profile: &str,
        display_name: &str,
        counters: Vec<CounterSpec>,
        pages: Vec<Page>,
    ) -> Result<Self, ConfigError> {
        if pages.is_empty() {
            return Err(ConfigError::NoPages);
        }

        for (index, counter) in counters.iter().enumerate() {
            if counters[..index].iter().any(|c| c.key == counter.key) {
                return Err(ConfigError::DuplicateCounter(counter.key.clone()));
            }
        }

        Ok(Self {
            profile: profile.to_string(),
            display_name: display_name.to_string(),
            counters,
            pages,
        })
    }

    /// Identifier selecting the state file.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn counters(&self) -> &[CounterSpec] {
        &self.counters
    }

    /// Number of pages, always at least one.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }
}

/// Where a page thumbnail comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PictureSpec {
    /// Packed 96x96 1-bit bitmap at `path`.
    Image { path: String },
    /// QR code encoding `url`.
    Qr { url: String },
}

impl PictureSpec {
    fn build<S: Storage>(
        &self,
        storage: &mut S,
        encoder: &impl QrEncoder,
    ) -> Result<Picture, PictureError> {
        match self {
            PictureSpec::Image { path } => Picture::image(storage, path),
            PictureSpec::Qr { url } => Picture::qr(url, encoder),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageSpec {
    Counter {
        picture: PictureSpec,
    },
    AboutMe {
        lines: Vec<String>,
        picture: PictureSpec,
    },
    Status,
}

/// Serializable badge description, e.g. read from a JSON file.
///
/// ```json
/// {
///   "profile": "furry",
///   "display_name": "Noah",
///   "counters": [{ "key": "drinks", "label": "Drinks" }],
///   "pages": [
///     { "kind": "counter", "picture": { "kind": "qr", "url": "example.com" } },
///     { "kind": "status" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeProfile {
    pub profile: String,
    pub display_name: String,
    #[serde(default)]
    pub counters: Vec<CounterSpec>,
    pub pages: Vec<PageSpec>,
}

impl BadgeProfile {
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        serde_json::from_slice(bytes).map_err(|e| ConfigError::Parse(truncated(e)))
    }

    /// Resolve every picture and validate the result.
    ///
    /// Pictures are loaded or encoded here, once, so a missing bitmap or an
    /// unencodable URL fails startup instead of a later render.
    pub fn build<S: Storage>(
        &self,
        storage: &mut S,
        encoder: &impl QrEncoder,
    ) -> Result<BadgeConfig, ConfigError> {
        let mut pages = Vec::with_capacity(self.pages.len());
        for spec in &self.pages {
            let page = match spec {
                PageSpec::Counter { picture } => {
                    let picture = picture.build(storage, encoder).map_err(ConfigError::Picture)?;
                    Page::Counter(CounterPage::new(picture))
                }
                PageSpec::AboutMe { lines, picture } => {
                    let picture = picture.build(storage, encoder).map_err(ConfigError::Picture)?;
                    Page::AboutMe(AboutMePage::new(lines.clone(), picture))
                }
                PageSpec::Status => Page::Status(StatusPage::new()),
            };
            debug!("Prepared page {}", pages.len());
            pages.push(page);
        }

        let config = BadgeConfig::new(
            &self.profile,
            &self.display_name,
            self.counters.clone(),
            pages,
        )?;
        info!(
            "Built profile {} with {} pages and {} counters",
            config.profile(),
            config.page_count(),
            config.counters().len()
        );
        Ok(config)
    }
}

impl Default for BadgeProfile {
    /// The stock badge: two bio cards, two counter pages and a status page,
    /// each thumbnail pair showing the photo and then the QR link.
    fn default() -> Self {
        let bio = || {
            vec![
                "barq.social".to_string(),
                "Backend Engnr".to_string(),
                "Free hugs!!".to_string(),
            ]
        };
        let photo = || PictureSpec::Image {
            path: "/pfp.bin".to_string(),
        };
        let link = || PictureSpec::Qr {
            url: "f.noahstride.co.uk".to_string(),
        };

        Self {
            profile: "furry".to_string(),
            display_name: "Noah".to_string(),
            counters: vec![
                CounterSpec::new("drinks", "Drinks"),
                CounterSpec::new("twinks", "Boys"),
                CounterSpec::new("boops", "Boops"),
            ],
            pages: vec![
                PageSpec::AboutMe {
                    lines: bio(),
                    picture: photo(),
                },
                PageSpec::AboutMe {
                    lines: bio(),
                    picture: link(),
                },
                PageSpec::Counter { picture: photo() },
                PageSpec::Counter { picture: link() },
                PageSpec::Status,
            ],
        }
    }
}
