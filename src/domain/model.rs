use crate::domain::error::TranslationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// 翻译服务标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceId {
    Google,
    Lingva,
    DeepL,
}

impl ServiceId {
    pub const ALL: [ServiceId; 3] = [ServiceId::Google, ServiceId::Lingva, ServiceId::DeepL];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Lingva => "lingva",
            Self::DeepL => "deepl",
        }
    }

    /// Slot in [`StoredApiKeys`] holding this service's key, if it uses one.
    pub fn credential_slot(self) -> Option<CredentialSlot> {
        match self {
            Self::DeepL => Some(CredentialSlot::DeepL),
            Self::Google | Self::Lingva => None,
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "lingva" => Ok(Self::Lingva),
            "deepl" => Ok(Self::DeepL),
            other => Err(format!("Unknown translation service: {}", other)),
        }
    }
}

// 服务等级 (免费/付费)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Pro,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => f.write_str("free"),
            Self::Pro => f.write_str("pro"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    pub text: String,
    pub source: String, // 语言代码或 "auto"
    pub target: String,
    pub api_key: Option<String>,
    pub tier: Option<Tier>,
}

impl TranslateRequest {
    pub fn new(text: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            target: target.into(),
            api_key: None,
            tier: None,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResult {
    pub text: String,
    pub detected_language: Option<String>, // 仅当源语言为 auto 时有意义
    pub service: ServiceId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResultWithMeta {
    #[serde(flatten)]
    pub result: TranslateResult,
    pub used_fallback: bool,
    pub cached: bool,
}

// 已保存的 API 凭据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub key: String,
    #[serde(default)]
    pub tier: Option<Tier>,
    #[serde(default)]
    pub validated: bool,
    #[serde(default)]
    pub validated_at: Option<i64>,
}

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            tier: None,
            validated: false,
            validated_at: None,
        }
    }

    pub fn is_usable(&self) -> bool {
        self.validated && !self.key.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSlot {
    DeepL,
}

impl CredentialSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeepL => "deepl",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredApiKeys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deepl: Option<Credential>,
}

impl StoredApiKeys {
    pub fn get(&self, slot: CredentialSlot) -> Option<&Credential> {
        match slot {
            CredentialSlot::DeepL => self.deepl.as_ref(),
        }
    }

    pub fn set(&mut self, slot: CredentialSlot, credential: Credential) {
        match slot {
            CredentialSlot::DeepL => self.deepl = Some(credential),
        }
    }

    pub fn for_service(&self, id: ServiceId) -> Option<&Credential> {
        id.credential_slot().and_then(|slot| self.get(slot))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Position 0 is the primary service, the rest is the fallback order.
    #[serde(default = "default_enabled_services")]
    pub enabled_services: Vec<ServiceId>,
    #[serde(default = "default_source")]
    pub default_source: String,
    #[serde(default = "default_target")]
    pub default_target: String,
    #[serde(default)]
    pub language_overrides: HashMap<String, String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            enabled_services: default_enabled_services(),
            default_source: default_source(),
            default_target: default_target(),
            language_overrides: HashMap::new(),
        }
    }
}

fn default_enabled_services() -> Vec<ServiceId> {
    vec![ServiceId::Google, ServiceId::Lingva]
}
fn default_source() -> String {
    "auto".to_string()
}
fn default_target() -> String {
    "en".to_string()
}

/// Outcome of checking an API key against its service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialValidation {
    pub valid: bool,
    pub tier: Option<Tier>,
    pub error: Option<TranslationError>,
}

impl CredentialValidation {
    pub fn valid(tier: Option<Tier>) -> Self {
        Self {
            valid: true,
            tier,
            error: None,
        }
    }

    pub fn invalid(error: TranslationError) -> Self {
        Self {
            valid: false,
            tier: None,
            error: Some(error),
        }
    }
}

// 缓存条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub text: String,
    pub created_at: i64, // unix 毫秒
    pub service: ServiceId,
    pub detected_language: Option<String>,
}
