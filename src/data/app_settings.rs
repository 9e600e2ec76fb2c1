use crate::calc::WeekStart;
use crate::data::persistence::{get_data_dir, Persistable};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Phrase {
    pub label: String,
    pub text: String,
}

impl Phrase {
    fn new(label: &str, text: &str) -> Self {
        Phrase {
            label: label.to_string(),
            text: text.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SpeechSettings {
    /// External program that performs the synthesis.
    pub command: String,
    /// Arguments; `{text}` and `{lang}` are substituted per call.
    pub args: Vec<String>,
    pub language: String,
    pub phrases: Vec<Phrase>,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        SpeechSettings {
            command: "espeak-ng".to_string(),
            args: vec!["-v".to_string(), "{lang}".to_string(), "{text}".to_string()],
            language: "ko".to_string(),
            phrases: vec![
                Phrase::new("Toilet", "화장실 가고 싶어요"),
                Phrase::new("Help", "도움이 필요해요"),
                Phrase::new("Hungry", "배고파요"),
            ],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ChatSettings {
    pub greeting: String,
    pub canned_reply: String,
    pub reply_delay_ms: u64,
}

impl Default for ChatSettings {
    fn default() -> Self {
        ChatSettings {
            greeting: "안녕하세요! 무엇을 도와드릴까요?".to_string(),
            canned_reply: "챗봇의 응답입니다.".to_string(),
            reply_delay_ms: 1000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub week_start: WeekStart,
    pub speech: SpeechSettings,
    pub chat: ChatSettings,
}

/// Wrapper that reads the `settings` key from config.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: AppSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
}

impl AppSettings {
    /// Reads config.yaml from the data dir set at startup.
    pub fn load() -> Result<Self> {
        Self::load_from(&get_data_dir()?)
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        Ok(SettingsWrapper::load_from(dir)?.settings)
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        wrapper.save_to(dir)
    }
}
