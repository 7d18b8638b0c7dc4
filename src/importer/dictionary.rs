// ==========================================
// UIGF 导出工具 - 字典解析器
// ==========================================
// 职责: 获取 (游戏, 语言) 对应的 名称 → 物品ID 映射
// 顺序: 本地缓存 → 远程下载（成功后写回缓存）
// 红线: 空字典与下载失败同等对待；失败时不写缓存
// ==========================================

use crate::domain::Game;
use crate::i18n::t_with_args;
use crate::importer::error::DictionaryError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

// ==========================================
// Dictionary - 名称 → 物品ID
// ==========================================
// 加载后只读
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<String, u64>,
}

/// 查表结果（0 号 ID 视为未解析）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLookup {
    Resolved(u64),
    Unresolved,
}

impl Dictionary {
    /// 解析字典 JSON（{"名称": 物品ID, ...}）
    pub fn from_json(payload: &str) -> Result<Self, DictionaryError> {
        let entries: HashMap<String, u64> =
            serde_json::from_str(payload).map_err(|e| DictionaryError::Parse(e.to_string()))?;
        Ok(Self { entries })
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// 按名称查表（全函数，不会越界）
    pub fn lookup(&self, name: &str) -> ItemLookup {
        match self.entries.get(name) {
            Some(&id) if id != 0 => ItemLookup::Resolved(id),
            _ => ItemLookup::Unresolved,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ==========================================
// DictionarySource Trait
// ==========================================
// 用途: 远程字典来源（返回原始 JSON 文本）
// 实现者: HttpDictionarySource；测试中使用内存实现
pub trait DictionarySource: Send + Sync {
    fn fetch(&self, game: Game, locale: &str) -> Result<String, DictionaryError>;
}

// ==========================================
// HttpDictionarySource - UIGF 字典接口
// ==========================================
pub struct HttpDictionarySource {
    client: reqwest::blocking::Client,
    url_template: String,
}

impl HttpDictionarySource {
    /// # 参数
    /// - url_template: 含 {game} / {lang} 占位的地址
    /// - timeout: 请求超时
    pub fn new(url_template: &str, timeout: Duration) -> Result<Self, DictionaryError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DictionaryError::Fetch(e.to_string()))?;
        Ok(Self {
            client,
            url_template: url_template.to_string(),
        })
    }

    pub fn url_for(&self, game: Game, locale: &str) -> String {
        self.url_template
            .replace("{game}", game.dict_key())
            .replace("{lang}", locale)
    }
}

impl DictionarySource for HttpDictionarySource {
    fn fetch(&self, game: Game, locale: &str) -> Result<String, DictionaryError> {
        let url = self.url_for(game, locale);
        debug!(url = %url, "下载字典");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DictionaryError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DictionaryError::Fetch(format!("HTTP {} ({})", status, url)));
        }

        response
            .text()
            .map_err(|e| DictionaryError::Fetch(e.to_string()))
    }
}

// ==========================================
// DictionaryResolver - 缓存优先的字典解析
// ==========================================
// 同一 (游戏, 语言) 在解析器生命周期内只解析一次
pub struct DictionaryResolver<S: DictionarySource> {
    cache_dir: PathBuf,
    source: S,
    resolved: Mutex<HashMap<(Game, String), Arc<Dictionary>>>,
}

impl<S: DictionarySource> DictionaryResolver<S> {
    pub fn new(cache_dir: impl Into<PathBuf>, source: S) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            source,
            resolved: Mutex::new(HashMap::new()),
        }
    }

    /// 缓存文件路径: <cache_dir>/dict_<game>_<locale>.json
    pub fn cache_path(&self, game: Game, locale: &str) -> PathBuf {
        self.cache_dir
            .join(format!("dict_{}_{}.json", game.dict_key(), locale))
    }

    /// 解析字典
    ///
    /// # 返回
    /// - Ok(Arc<Dictionary>): 非空字典
    /// - Err(DictionaryError::Unavailable): 缓存与远程均无可用字典
    pub fn resolve(&self, game: Game, locale: &str) -> Result<Arc<Dictionary>, DictionaryError> {
        let key = (game, locale.to_string());
        let mut resolved = self.resolved.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(dict) = resolved.get(&key) {
            return Ok(Arc::clone(dict));
        }

        let path = self.cache_path(game, locale);
        let dict = match Self::load_cache(&path) {
            Some(dict) => {
                info!(
                    entries = dict.len(),
                    "{}",
                    t_with_args("dict.loaded", &[("path", &path.display().to_string())])
                );
                dict
            }
            None => self.fetch_and_cache(game, locale, &path)?,
        };

        let dict = Arc::new(dict);
        resolved.insert(key, Arc::clone(&dict));
        Ok(dict)
    }

    /// 读取缓存；不存在、无法解析或为空都视为未命中
    fn load_cache(path: &Path) -> Option<Dictionary> {
        if !path.exists() {
            return None;
        }

        let loaded = fs::read_to_string(path)
            .map_err(|e| DictionaryError::Parse(e.to_string()))
            .and_then(|raw| Dictionary::from_json(&raw));

        let shown = path.display().to_string();
        let message = || t_with_args("dict.cache_invalid", &[("path", &shown)]);
        match loaded {
            Ok(dict) if !dict.is_empty() => Some(dict),
            Ok(_) => {
                warn!("{}", message());
                None
            }
            Err(e) => {
                warn!(error = %e, "{}", message());
                None
            }
        }
    }

    fn fetch_and_cache(
        &self,
        game: Game,
        locale: &str,
        path: &Path,
    ) -> Result<Dictionary, DictionaryError> {
        let unavailable = |reason: String| {
            warn!(
                game = %game,
                locale = %locale,
                reason = %reason,
                "{}",
                crate::i18n::t("dict.unavailable")
            );
            DictionaryError::Unavailable {
                game: game.dict_key().to_string(),
                locale: locale.to_string(),
                reason,
            }
        };

        let payload = self
            .source
            .fetch(game, locale)
            .map_err(|e| unavailable(e.to_string()))?;

        let dict = Dictionary::from_json(&payload).map_err(|e| unavailable(e.to_string()))?;
        if dict.is_empty() {
            return Err(unavailable("字典为空".to_string()));
        }

        // 缓存写入失败不影响本次导出
        let written = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|_| fs::write(path, &payload));
        match written {
            Ok(()) => info!(
                entries = dict.len(),
                "{}",
                t_with_args("dict.downloaded", &[("path", &path.display().to_string())])
            ),
            Err(e) => warn!(
                "{}",
                t_with_args(
                    "dict.cache_write_failed",
                    &[("path", &path.display().to_string()), ("error", &e.to_string())]
                )
            ),
        }

        Ok(dict)
    }
}
