// ==========================================
// UIGF 导出工具 - Schema 校验器
// ==========================================
// 阶段 5: 组装后的文档 → 外部 JSON Schema 结构校验
// 红线: 不修改、不强转文档；只报告第一个违规
// 说明: 与 Schema 版本无关，给什么 Schema 就按什么校验
// ==========================================

use crate::domain::ExportDocument;
use crate::importer::error::SchemaError;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

pub struct SchemaValidator {
    compiled: JSONSchema,
}

impl SchemaValidator {
    /// 编译 Schema
    pub fn compile(schema: &Value) -> Result<Self, SchemaError> {
        let compiled = JSONSchema::options()
            .compile(schema)
            .map_err(|e| SchemaError::Invalid(e.to_string()))?;
        Ok(Self { compiled })
    }

    /// 校验导出文档（先序列化为 JSON 值）
    pub fn validate(&self, document: &ExportDocument) -> Result<(), SchemaError> {
        let instance =
            serde_json::to_value(document).map_err(|e| SchemaError::Invalid(e.to_string()))?;
        self.validate_value(&instance)
    }

    /// 校验任意 JSON 值，返回第一个违规
    pub fn validate_value(&self, instance: &Value) -> Result<(), SchemaError> {
        let first = match self.compiled.validate(instance) {
            Ok(()) => None,
            Err(mut errors) => errors.next().map(|e| {
                let path = e.instance_path.to_string();
                SchemaError::Violation {
                    path: if path.is_empty() { "/".to_string() } else { path },
                    detail: e.to_string(),
                }
            }),
        };

        match first {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }
}

/// 单次校验（编译 + 校验）
pub fn validate(document: &ExportDocument, schema: &Value) -> Result<(), SchemaError> {
    SchemaValidator::compile(schema)?.validate(document)
}

// ==========================================
// SchemaSource Trait
// ==========================================
// 用途: 每次运行获取一次 Schema（不落盘缓存）
// 实现者: HttpSchemaSource, FileSchemaSource
pub trait SchemaSource {
    fn load(&self) -> Result<Value, SchemaError>;
}

pub struct HttpSchemaSource {
    url: String,
    timeout: Duration,
}

impl HttpSchemaSource {
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            timeout,
        }
    }
}

impl SchemaSource for HttpSchemaSource {
    fn load(&self) -> Result<Value, SchemaError> {
        debug!(url = %self.url, "下载 Schema");
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| SchemaError::Unavailable(e.to_string()))?;

        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| SchemaError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SchemaError::Unavailable(format!("HTTP {} ({})", status, self.url)));
        }

        response
            .json::<Value>()
            .map_err(|e| SchemaError::Unavailable(e.to_string()))
    }
}

pub struct FileSchemaSource {
    path: PathBuf,
}

impl FileSchemaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SchemaSource for FileSchemaSource {
    fn load(&self) -> Result<Value, SchemaError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            SchemaError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| SchemaError::Unavailable(format!("{}: {}", self.path.display(), e)))
    }
}
