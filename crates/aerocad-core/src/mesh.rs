//! 表面网格
//!
//! 各部件（机翼、机身）自行生成网格，整机网格由 [`Mesh::stack`] 合并。

use crate::math::Point3;
use serde::{Deserialize, Serialize};

/// 网格面类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MeshMethod {
    /// 四边形面
    Quad,
    /// 三角形面（每个四边形拆成两个三角形）
    #[default]
    Tri,
}

/// 网格面（顶点索引）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Face {
    Tri([usize; 3]),
    Quad([usize; 4]),
}

impl Face {
    /// 所有索引加上偏移量
    fn offset(self, by: usize) -> Self {
        match self {
            Face::Tri([a, b, c]) => Face::Tri([a + by, b + by, c + by]),
            Face::Quad([a, b, c, d]) => Face::Quad([a + by, b + by, c + by, d + by]),
        }
    }

    /// 反转绕序
    fn reversed(self) -> Self {
        match self {
            Face::Tri([a, b, c]) => Face::Tri([c, b, a]),
            Face::Quad([a, b, c, d]) => Face::Quad([d, c, b, a]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub points: Vec<Point3>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new(points: Vec<Point3>, faces: Vec<Face>) -> Self {
        Self { points, faces }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// 按指定方式添加一个四边形面
    ///
    /// `Tri` 模式下拆分为 `[a, b, d]` 与 `[b, c, d]`
    pub fn add_quad(&mut self, method: MeshMethod, [a, b, c, d]: [usize; 4]) {
        match method {
            MeshMethod::Quad => self.faces.push(Face::Quad([a, b, c, d])),
            MeshMethod::Tri => {
                self.faces.push(Face::Tri([a, b, d]));
                self.faces.push(Face::Tri([b, c, d]));
            }
        }
    }

    /// 合并多个网格，后续网格的面索引按已有顶点数偏移
    pub fn stack(meshes: impl IntoIterator<Item = Mesh>) -> Mesh {
        let mut stacked = Mesh::default();
        for mesh in meshes {
            let offset = stacked.points.len();
            stacked.points.extend(mesh.points);
            stacked
                .faces
                .extend(mesh.faces.into_iter().map(|f| f.offset(offset)));
        }
        stacked
    }

    /// 关于 XZ 平面的镜像（同时反转绕序以保持法向朝外）
    pub fn mirrored_y(&self) -> Mesh {
        Mesh {
            points: self
                .points
                .iter()
                .map(|p| Point3::new(p.x, -p.y, p.z))
                .collect(),
            faces: self.faces.iter().map(|f| f.reversed()).collect(),
        }
    }

    /// 原网格与其镜像合并
    pub fn with_mirror_y(self) -> Mesh {
        let mirror = self.mirrored_y();
        Mesh::stack([self, mirror])
    }

    /// 以三角形形式遍历所有面
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.faces.iter().flat_map(|face| {
            let (first, second) = match *face {
                Face::Tri(tri) => (tri, None),
                Face::Quad([a, b, c, d]) => ([a, b, d], Some([b, c, d])),
            };
            std::iter::once(first).chain(second)
        })
    }
}
