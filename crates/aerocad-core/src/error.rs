//! 几何计算错误定义

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// 没有可用于聚合的几何（例如整机没有任何翼面）
    #[error("Empty geometry: {0}")]
    EmptyGeometry(String),

    /// 翼面截面不足或尺寸退化，无法计算比值类参数
    #[error("Degenerate surface '{name}': {reason}")]
    DegenerateSurface { name: String, reason: String },

    #[error("Invalid airfoil: {0}")]
    InvalidAirfoil(String),
}

impl GeometryError {
    pub(crate) fn degenerate(name: &str, reason: impl Into<String>) -> Self {
        Self::DegenerateSurface {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
