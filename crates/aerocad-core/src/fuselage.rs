//! 机身（非升力体）
//!
//! 目前假设所有截面为圆形，且机身轴线大致沿 X 轴。

use crate::math::{linspace, lerp_points, Point3, Vector3, EPSILON};
use crate::mesh::{Mesh, MeshMethod};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// 机身网格默认纵向分辨率（每段）
pub const DEFAULT_CHORDWISE_RESOLUTION: usize = 6;
/// 机身网格默认周向分辨率
pub const DEFAULT_CIRCUMFERENTIAL_RESOLUTION: usize = 36;

/// 机身截面
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuselageXSec {
    /// 截面中心（相对机身基准点）
    pub xyz_c: Point3,
    pub radius: f64,
}

impl Default for FuselageXSec {
    fn default() -> Self {
        Self {
            xyz_c: Point3::origin(),
            radius: 0.0,
        }
    }
}

impl FuselageXSec {
    pub fn new(xyz_c: Point3, radius: f64) -> Self {
        Self { xyz_c, radius }
    }

    /// 截面面积
    pub fn xsec_area(&self) -> f64 {
        PI * self.radius * self.radius
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fuselage {
    pub name: String,
    /// 基准点（通常为机头）
    pub xyz_le: Point3,
    pub xsecs: Vec<FuselageXSec>,
    /// 是否关于 XZ 平面镜像（例如翼尖吊舱）
    pub symmetric: bool,
}

impl Default for Fuselage {
    fn default() -> Self {
        Self {
            name: "Untitled Fuselage".to_string(),
            xyz_le: Point3::origin(),
            xsecs: Vec::new(),
            symmetric: false,
        }
    }
}

impl std::fmt::Display for Fuselage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fuselage '{}' ({} xsecs)", self.name, self.xsecs.len())
    }
}

impl Fuselage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_xyz_le(mut self, xyz_le: Point3) -> Self {
        self.xyz_le = xyz_le;
        self
    }

    pub fn with_xsecs(mut self, xsecs: Vec<FuselageXSec>) -> Self {
        self.xsecs = xsecs;
        self
    }

    pub fn with_symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }

    fn mirror_factor(&self) -> f64 {
        if self.symmetric {
            2.0
        } else {
            1.0
        }
    }

    /// 浸润面积（圆台侧面积之和），对称时计两侧
    pub fn area_wetted(&self) -> f64 {
        let area: f64 = self
            .xsecs
            .windows(2)
            .map(|pair| {
                let (r_a, r_b) = (pair[0].radius, pair[1].radius);
                let dx = pair[1].xyz_c.x - pair[0].xyz_c.x;
                PI * (r_a + r_b) * ((r_a - r_b).powi(2) + dx * dx).sqrt()
            })
            .sum();
        area * self.mirror_factor()
    }

    /// XY 平面投影面积，对称时计两侧
    pub fn area_projected(&self) -> f64 {
        let area: f64 = self
            .xsecs
            .windows(2)
            .map(|pair| (pair[0].radius + pair[1].radius) * (pair[1].xyz_c.x - pair[0].xyz_c.x))
            .sum();
        area * self.mirror_factor()
    }

    /// 首尾截面的 X 向距离
    pub fn length(&self) -> f64 {
        match (self.xsecs.first(), self.xsecs.last()) {
            (Some(first), Some(last)) => (last.xyz_c.x - first.xyz_c.x).abs(),
            _ => 0.0,
        }
    }

    /// 体积（逐段圆台）
    pub fn volume(&self) -> f64 {
        self.xsecs
            .windows(2)
            .map(|pair| {
                let (r_a, r_b) = (pair[0].radius, pair[1].radius);
                let h = (pair[1].xyz_c.x - pair[0].xyz_c.x).abs();
                PI * h / 3.0 * (r_a * r_a + r_a * r_b + r_b * r_b)
            })
            .sum()
    }

    /// AVL 机身轮廓（BFIL）文本
    ///
    /// 先从机尾到机头输出上轮廓 `x z+r`，再从第二个截面到机尾输出下轮廓 `x z-r`。
    pub fn avl_profile(&self, include_name: bool) -> String {
        let mut lines = Vec::with_capacity(self.xsecs.len() * 2);
        if include_name {
            lines.push(self.name.clone());
        }
        lines.extend(
            self.xsecs
                .iter()
                .rev()
                .map(|xsec| format!("{} {}", xsec.xyz_c.x, xsec.xyz_c.z + xsec.radius)),
        );
        lines.extend(
            self.xsecs
                .iter()
                .skip(1)
                .map(|xsec| format!("{} {}", xsec.xyz_c.x, xsec.xyz_c.z - xsec.radius)),
        );
        lines.join("\n")
    }

    /// 第 `index` 个截面的局部坐标系 `(xg, yg, zg)`
    ///
    /// `xg` 沿机身轴线，`zg` 固定为 +Z。
    fn section_frame(&self, index: usize) -> (Vector3, Vector3, Vector3) {
        let n = self.xsecs.len();
        let xg = if n >= 2 {
            let i = index.min(n - 2);
            (self.xsecs[i + 1].xyz_c - self.xsecs[i].xyz_c)
                .try_normalize(EPSILON)
                .unwrap_or_else(Vector3::x)
        } else {
            Vector3::x()
        };
        let zg = Vector3::z();
        let yg = zg.cross(&xg);
        (xg, yg, zg)
    }

    /// 截面上无量纲位置对应的全局坐标（以半径为单位）
    fn xsec_point(&self, index: usize, y_nondim: f64, z_nondim: f64) -> Point3 {
        let (_, yg, zg) = self.section_frame(index);
        let xsec = &self.xsecs[index];
        self.xyz_le + xsec.xyz_c.coords + (yg * y_nondim + zg * z_nondim) * xsec.radius
    }

    /// 沿机身轴线的一条网格线
    fn mesh_line(&self, y_nondim: f64, z_nondim: f64, chordwise_resolution: usize) -> Vec<Point3> {
        let section_points: Vec<Point3> = (0..self.xsecs.len())
            .map(|i| self.xsec_point(i, y_nondim, z_nondim))
            .collect();
        let params = linspace(0.0, 1.0, chordwise_resolution + 1);
        let n_segments = section_points.len().saturating_sub(1);

        let mut line = Vec::new();
        for (i, pair) in section_points.windows(2).enumerate() {
            let mut segment = lerp_points(&pair[0], &pair[1], &params);
            if i + 1 != n_segments {
                segment.pop();
            }
            line.extend(segment);
        }
        line
    }

    /// 机身表面网格（首尾不封口）
    pub fn mesh_body(
        &self,
        method: MeshMethod,
        chordwise_resolution: usize,
        circumferential_resolution: usize,
    ) -> Mesh {
        if self.xsecs.len() < 2 || circumferential_resolution == 0 {
            return Mesh::default();
        }

        let thetas = linspace(0.0, 2.0 * PI, circumferential_resolution + 1);
        let mut points = Vec::new();
        for &theta in &thetas[..circumferential_resolution] {
            points.extend(self.mesh_line(theta.sin(), theta.cos(), chordwise_resolution));
        }

        let num_i = circumferential_resolution;
        let num_j = chordwise_resolution * (self.xsecs.len() - 1);
        let index_of = |i: usize, j: usize| j + (i % circumferential_resolution) * (num_j + 1);

        let mut mesh = Mesh::new(points, Vec::new());
        for i in 0..num_i {
            for j in 0..num_j {
                mesh.add_quad(
                    method,
                    [index_of(i, j), index_of(i, j + 1), index_of(i + 1, j + 1), index_of(i + 1, j)],
                );
            }
        }

        if self.symmetric {
            mesh.with_mirror_y()
        } else {
            mesh
        }
    }
}
