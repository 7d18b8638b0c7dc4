// ==========================================
// UIGF 导出工具 - 领域模型层
// ==========================================
// 职责: 定义原始行、规范化记录、导出文档与游戏标识
// 红线: 不含文件读取 / 网络逻辑
// ==========================================

pub mod export;
pub mod record;
pub mod types;

// 重导出核心类型
pub use export::{ExportDocument, ExportInfo, UidSection, UIGF_VERSION};
pub use record::{CellTime, DropReason, DroppedRow, NormalizedRecord, RawRow};
pub use types::Game;
