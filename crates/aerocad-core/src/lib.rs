//! AeroCAD 核心几何模型
//!
//! 以参数化翼面和机身组合描述整机，并派生参考量、气动中心和对称性等工程量。
//!
//! # 架构设计
//!
//! - `Airplane`: 整机聚合，独占所有部件，构造时解析参考量
//! - `Wing` / `WingXSec`: 升力面及其截面
//! - `Fuselage` / `FuselageXSec`: 机身及其截面
//! - `Airfoil`: 翼型坐标与薄翼理论气动响应
//! - `Mesh`: 部件表面网格
//!
//! # 示例
//!
//! ```rust
//! use aerocad_core::prelude::*;
//!
//! let wing = Wing::new("Main Wing")
//!     .with_symmetric(true)
//!     .with_xsecs(vec![
//!         WingXSec::new(Point3::origin(), 1.0),
//!         WingXSec::new(Point3::new(0.0, 5.0, 0.0), 1.0),
//!     ]);
//! let airplane = Airplane::new(AirplaneDefinition::new("Glider").with_wing(wing));
//!
//! assert_eq!(airplane.s_ref(), Some(10.0));
//! assert!(airplane.is_entirely_symmetric());
//! ```

pub mod aero_center;
pub mod airfoil;
pub mod airplane;
pub mod error;
pub mod fuselage;
pub mod math;
pub mod mesh;
pub mod symmetry;
pub mod wing;

pub use error::GeometryError;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::aero_center::DEFAULT_CHORD_FRACTION;
    pub use crate::airfoil::{Airfoil, PolarModel};
    pub use crate::airplane::{Airplane, AirplaneDefinition};
    pub use crate::error::GeometryError;
    pub use crate::fuselage::{Fuselage, FuselageXSec};
    pub use crate::math::{Point2, Point3, Vector2, Vector3};
    pub use crate::mesh::{Face, Mesh, MeshMethod};
    pub use crate::symmetry::{Asymmetry, SYMMETRY_TOLERANCE};
    pub use crate::wing::{AreaType, SpanType, Spacing, Wing, WingXSec};
}
