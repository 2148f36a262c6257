//! 文件操作错误定义

use aerocad_core::GeometryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// 目标路径缺少文件名等
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// 输出 AVL 时参考量未设置
    #[error("Missing reference quantity: {0}")]
    MissingReference(&'static str),

    /// 名称无法作为单行记录写出
    #[error("Invalid name {0:?}: {1}")]
    InvalidName(String, &'static str),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),
}
