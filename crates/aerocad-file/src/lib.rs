//! AeroCAD 文件格式处理
//!
//! 支持：
//! - `.avl` AVL 涡格法输入文件导出（含机身轮廓 BFIL 文件）
//! - `.dat` 翼型坐标读写
//! - `.json` 整机定义读写
//! - `.stl` 二进制网格导出

pub mod avl;
pub mod dat;
pub mod definition;
pub mod error;
pub mod stl;

pub use avl::{write_avl, AvlDocument, AvlOptions, AvlSection};
pub use error::FileError;
