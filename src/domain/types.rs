// ==========================================
// UIGF 导出工具 - 领域类型定义
// ==========================================
// 职责: 游戏标识（决定字典与工作表映射表）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 游戏 (Game)
// ==========================================
// 字典接口键: genshin / starrail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Genshin,  // 原神
    StarRail, // 崩坏：星穹铁道
}

impl Game {
    /// 字典接口 / 缓存文件名使用的键
    pub fn dict_key(&self) -> &'static str {
        match self {
            Game::Genshin => "genshin",
            Game::StarRail => "starrail",
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dict_key())
    }
}

impl FromStr for Game {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "genshin" | "hk4e" => Ok(Game::Genshin),
            "starrail" | "hkrpg" => Ok(Game::StarRail),
            other => Err(format!("未知游戏: {}（可选: genshin / starrail）", other)),
        }
    }
}
