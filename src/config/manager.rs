//! 設定ファイルの読み込みと辞書の準備

use std::io;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use super::{
    ConfigError,
    I18nSettings,
};
use crate::diagnostics::TracingObserver;
use crate::dictionary::{
    Dictionaries,
    DictionaryError,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".hubtrac-i18n.json";

/// Validated settings together with the directory they were read from.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    settings: I18nSettings,
    /// 相対パスの基準ディレクトリ (設定ファイルの置き場所)
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    /// デフォルト設定 (ワークスペースなし)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `workspace_root/.hubtrac-i18n.json` を読み込んで検証する
    ///
    /// ファイルが無ければデフォルト設定のまま。失敗した場合は何も変更しない。
    ///
    /// # Errors
    /// - ファイル読み込みエラー (存在しない場合を除く)
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        let settings = match &workspace_root {
            Some(root) => read_settings_file(&root.join(CONFIG_FILE_NAME))?.unwrap_or_default(),
            None => I18nSettings::default(),
        };
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(?workspace_root, ?settings, "Settings loaded");
        self.settings = settings;
        self.workspace_root = workspace_root;
        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &I18nSettings {
        &self.settings
    }

    /// 設定された辞書ディレクトリ。相対パスはワークスペース基準で解決する。
    #[must_use]
    pub fn dictionary_dir(&self) -> Option<PathBuf> {
        self.settings.dictionary_dir.as_deref().map(|dir| self.resolve_path(Path::new(dir)))
    }

    /// 辞書を開き、区切り文字とフォールバックのログ出力を設定する
    ///
    /// `dir` が指定されればそれを、無ければ `dictionaryDir`、どちらも無ければ
    /// バンドルされた辞書を使う。
    ///
    /// # Errors
    /// - 辞書ファイルの読み込みエラー
    /// - 辞書の内容エラー
    pub fn open_dictionaries(&self, dir: Option<&Path>) -> Result<Dictionaries, DictionaryError> {
        let dir = dir.map(|dir| self.resolve_path(dir)).or_else(|| self.dictionary_dir());
        let dictionaries = match dir {
            Some(dir) => Dictionaries::load_from_dir(&dir)?,
            None => Dictionaries::bundled()?,
        }
        .with_key_separator(self.settings.key_separator.clone());

        Ok(if self.settings.diagnostics.log_fallbacks {
            dictionaries.with_observer(Arc::new(TracingObserver))
        } else {
            dictionaries
        })
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.workspace_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Reads a settings file, or `None` if there is none.
fn read_settings_file(path: &Path) -> Result<Option<I18nSettings>, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No configuration file");
            return Ok(None);
        }
        Err(error) => return Err(error.into()),
    };
    Ok(Some(serde_json::from_str(&text)?))
}
