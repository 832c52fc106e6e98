/*!
 * Translated interface strings.
 *
 * Labels, placeholders and button captions are looked up by fixed keys.
 * Nothing in the workflow logic reads them; status texts stay in English.
 */

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    /// The other language, as the language switch flips between the two
    pub fn toggle(&self) -> Self {
        match self {
            Self::En => Self::Zh,
            Self::Zh => Self::En,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "zh" => Ok(Self::Zh),
            _ => Err(anyhow::anyhow!("Unsupported locale: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Title,
    TabExtract,
    TabMerge,
    TabBatch,
    InputVideoPath,
    InputChsSubtitle,
    InputEngSubtitle,
    InputFolderPath,
    PlaceholderVideoPath,
    PlaceholderChsSubtitle,
    PlaceholderEngSubtitle,
    PlaceholderFolderPath,
    ButtonProcess,
    ButtonProcessing,
    ButtonMerge,
    ButtonMerging,
    ButtonProcessFolder,
}

impl MessageKey {
    /// Dotted identifier of the key in message files
    pub fn id(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::TabExtract => "tabs.extract",
            Self::TabMerge => "tabs.merge",
            Self::TabBatch => "tabs.batch",
            Self::InputVideoPath => "inputs.videoPath",
            Self::InputChsSubtitle => "inputs.chsSubtitle",
            Self::InputEngSubtitle => "inputs.engSubtitle",
            Self::InputFolderPath => "inputs.folderPath",
            Self::PlaceholderVideoPath => "placeholders.videoPath",
            Self::PlaceholderChsSubtitle => "placeholders.chsSubtitle",
            Self::PlaceholderEngSubtitle => "placeholders.engSubtitle",
            Self::PlaceholderFolderPath => "placeholders.folderPath",
            Self::ButtonProcess => "buttons.process",
            Self::ButtonProcessing => "buttons.processing",
            Self::ButtonMerge => "buttons.merge",
            Self::ButtonMerging => "buttons.merging",
            Self::ButtonProcessFolder => "buttons.processFolder",
        }
    }
}

/// Source of translated strings
pub trait MessageCatalog: Send + Sync {
    fn locale(&self) -> Locale;

    /// Text for `key`, falling back to the key id when untranslated
    fn text(&self, key: MessageKey) -> &str;
}

static EN_MESSAGES: Lazy<HashMap<MessageKey, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (MessageKey::Title, "Fusionn"),
        (MessageKey::TabExtract, "Extract"),
        (MessageKey::TabMerge, "Merge"),
        (MessageKey::TabBatch, "Batch"),
        (MessageKey::InputVideoPath, "Video file path"),
        (MessageKey::InputChsSubtitle, "Chinese subtitle path"),
        (MessageKey::InputEngSubtitle, "English subtitle path"),
        (MessageKey::InputFolderPath, "Folder path"),
        (MessageKey::PlaceholderVideoPath, "/path/to/video.mkv"),
        (MessageKey::PlaceholderChsSubtitle, "/path/to/subtitle.chs.srt"),
        (MessageKey::PlaceholderEngSubtitle, "/path/to/subtitle.eng.srt"),
        (MessageKey::PlaceholderFolderPath, "/path/to/folder"),
        (MessageKey::ButtonProcess, "Process"),
        (MessageKey::ButtonProcessing, "Processing..."),
        (MessageKey::ButtonMerge, "Merge"),
        (MessageKey::ButtonMerging, "Merging..."),
        (MessageKey::ButtonProcessFolder, "Process folder"),
    ])
});

static ZH_MESSAGES: Lazy<HashMap<MessageKey, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (MessageKey::Title, "Fusionn"),
        (MessageKey::TabExtract, "提取"),
        (MessageKey::TabMerge, "合并"),
        (MessageKey::TabBatch, "批量"),
        (MessageKey::InputVideoPath, "视频文件路径"),
        (MessageKey::InputChsSubtitle, "中文字幕路径"),
        (MessageKey::InputEngSubtitle, "英文字幕路径"),
        (MessageKey::InputFolderPath, "文件夹路径"),
        (MessageKey::PlaceholderVideoPath, "/path/to/video.mkv"),
        (MessageKey::PlaceholderChsSubtitle, "/path/to/subtitle.chs.srt"),
        (MessageKey::PlaceholderEngSubtitle, "/path/to/subtitle.eng.srt"),
        (MessageKey::PlaceholderFolderPath, "/path/to/folder"),
        (MessageKey::ButtonProcess, "处理"),
        (MessageKey::ButtonProcessing, "处理中..."),
        (MessageKey::ButtonMerge, "合并"),
        (MessageKey::ButtonMerging, "合并中..."),
        (MessageKey::ButtonProcessFolder, "处理文件夹"),
    ])
});

/// Catalog compiled into the binary
#[derive(Debug, Clone, Copy)]
pub struct BuiltinCatalog {
    locale: Locale,
}

impl BuiltinCatalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl MessageCatalog for BuiltinCatalog {
    fn locale(&self) -> Locale {
        self.locale
    }

    fn text(&self, key: MessageKey) -> &str {
        let table = match self.locale {
            Locale::En => &*EN_MESSAGES,
            Locale::Zh => &*ZH_MESSAGES,
        };
        table.get(&key).copied().unwrap_or(key.id())
    }
}
