//! 机翼（升力面）
//!
//! 机翼由有序的截面 [`WingXSec`] 定义。若机翼关于 XZ 平面对称，只需定义右半翼
//! 并设置 `symmetric = true`，展长和面积会自动按左右两侧计算。
//!
//! 截面局部坐标系：
//! - `xg`：弦向，经扭转角旋转后的 X 轴
//! - `yg`：展向，相邻截面前缘连线在 YZ 平面上的投影（也是扭转轴）
//! - `zg`：`xg × yg` 方向，经扭转角旋转

use crate::airfoil::Airfoil;
use crate::error::GeometryError;
use crate::math::{cosspace, lerp_points, linspace, rotation_about_axis, Point3, Vector3, EPSILON};
use crate::mesh::{Mesh, MeshMethod};
use crate::symmetry::SYMMETRY_TOLERANCE;
use serde::{Deserialize, Serialize};

/// 机翼网格默认弦向分辨率
pub const DEFAULT_CHORDWISE_RESOLUTION: usize = 32;
/// 机翼网格默认展向分辨率（每段）
pub const DEFAULT_SPANWISE_RESOLUTION: usize = 16;

/// 展长的度量方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpanType {
    /// 逐段累加 YZ 平面内的距离
    #[default]
    Wetted,
    /// 逐段累加 Y 向距离
    Y,
    /// 逐段累加 Z 向距离
    Z,
    /// XZ 平面到翼尖截面 `(0.25c, 0.25c)` 处点的 Y 向距离，不计镜像
    YFull,
}

/// 面积的度量方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AreaType {
    /// 浸润面积（沿展向实际长度）
    #[default]
    Wetted,
    /// XY 平面投影面积（俯视）
    Projected,
}

/// 网格点分布方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spacing {
    #[default]
    Uniform,
    Cosine,
}

impl Spacing {
    fn params(self, n: usize) -> Vec<f64> {
        match self {
            Spacing::Uniform => linspace(0.0, 1.0, n),
            Spacing::Cosine => cosspace(0.0, 1.0, n),
        }
    }
}

/// 机翼截面
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WingXSec {
    /// 前缘位置（相对机翼基准点）
    pub xyz_le: Point3,
    pub chord: f64,
    /// 扭转角（度），绕前缘
    pub twist: f64,
    pub airfoil: Airfoil,
    /// 舵面是否对称偏转（襟翼为 true，副翼为 false）
    pub control_surface_is_symmetric: bool,
    /// 舵面铰链位置（弦长比例）
    pub control_surface_hinge_point: f64,
    /// 舵面偏角（度），下偏为正
    pub control_surface_deflection: f64,
}

impl Default for WingXSec {
    fn default() -> Self {
        Self {
            xyz_le: Point3::origin(),
            chord: 1.0,
            twist: 0.0,
            airfoil: Airfoil::default(),
            control_surface_is_symmetric: true,
            control_surface_hinge_point: 0.75,
            control_surface_deflection: 0.0,
        }
    }
}

impl WingXSec {
    pub fn new(xyz_le: Point3, chord: f64) -> Self {
        Self {
            xyz_le,
            chord,
            ..Default::default()
        }
    }

    pub fn with_twist(mut self, twist: f64) -> Self {
        self.twist = twist;
        self
    }

    pub fn with_airfoil(mut self, airfoil: Airfoil) -> Self {
        self.airfoil = airfoil;
        self
    }

    /// 设置舵面偏角及其对称性
    pub fn with_control_surface(mut self, deflection: f64, is_symmetric: bool) -> Self {
        self.control_surface_deflection = deflection;
        self.control_surface_is_symmetric = is_symmetric;
        self
    }
}

impl std::fmt::Display for WingXSec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WingXSec (Airfoil: {}, chord: {:.3}, twist: {:.3})",
            self.airfoil.name, self.chord, self.twist
        )
    }
}

/// 截面局部坐标系
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionFrame {
    pub xg: Vector3,
    pub yg: Vector3,
    pub zg: Vector3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wing {
    pub name: String,
    /// 机翼基准点（通常为翼根前缘）
    pub xyz_le: Point3,
    pub xsecs: Vec<WingXSec>,
    /// 是否关于 XZ 平面镜像
    pub symmetric: bool,
}

impl Default for Wing {
    fn default() -> Self {
        Self {
            name: "Untitled Wing".to_string(),
            xyz_le: Point3::origin(),
            xsecs: Vec::new(),
            symmetric: false,
        }
    }
}

impl std::fmt::Display for Wing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.xsecs.len();
        write!(
            f,
            "Wing '{}' ({} {}, {})",
            self.name,
            n,
            if n == 1 { "xsec" } else { "xsecs" },
            if self.symmetric { "symmetric" } else { "asymmetric" }
        )
    }
}

impl Wing {
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

    pub fn with_xsecs(mut self, xsecs: Vec<WingXSec>) -> Self {
        self.xsecs = xsecs;
        self
    }

    pub fn with_symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }

    fn require_sections(&self) -> Result<(), GeometryError> {
        if self.xsecs.len() < 2 {
            return Err(GeometryError::degenerate(
                &self.name,
                format!("needs at least 2 xsecs, has {}", self.xsecs.len()),
            ));
        }
        Ok(())
    }

    /// 第 `index` 个截面的局部坐标系
    ///
    /// 最后一个截面沿用前一段的展向；截面在 YZ 平面内重合时退化为 Y 轴。
    pub fn section_frame(&self, index: usize) -> SectionFrame {
        let n = self.xsecs.len();
        let twist = self.xsecs[index].twist;

        let yg = if n >= 2 {
            let i = index.min(n - 2);
            let mut between = self.xsecs[i + 1].xyz_le - self.xsecs[i].xyz_le;
            between.x = 0.0;
            between.try_normalize(EPSILON).unwrap_or_else(Vector3::y)
        } else {
            Vector3::y()
        };

        let xg = Vector3::x();
        let zg = xg.cross(&yg);

        let rot = rotation_about_axis(twist.to_radians(), &yg);
        SectionFrame {
            xg: rot * xg,
            yg,
            zg: rot * zg,
        }
    }

    /// 第 `index` 个截面的扭转轴（单位向量）
    pub fn twist_axis(&self, index: usize) -> Vector3 {
        self.section_frame(index).yg
    }

    /// 截面上无量纲位置 `(x_nondim, y_nondim)` 对应的全局坐标
    pub fn xsec_point(&self, index: usize, x_nondim: f64, y_nondim: f64) -> Point3 {
        let frame = self.section_frame(index);
        let xsec = &self.xsecs[index];
        let origin = self.xyz_le + xsec.xyz_le.coords;
        origin + frame.xg * (x_nondim * xsec.chord) + frame.zg * (y_nondim * xsec.chord)
    }

    fn quarter_chord_points(&self) -> Vec<Point3> {
        (0..self.xsecs.len())
            .map(|i| self.xsec_point(i, 0.25, 0.0))
            .collect()
    }

    /// 各段展长（不含镜像）
    pub fn sectional_spans(&self, span_type: SpanType) -> Vec<f64> {
        self.quarter_chord_points()
            .windows(2)
            .map(|pair| {
                let v = pair[1] - pair[0];
                match span_type {
                    SpanType::Wetted => (v.y * v.y + v.z * v.z).sqrt(),
                    SpanType::Y | SpanType::YFull => v.y.abs(),
                    SpanType::Z => v.z.abs(),
                }
            })
            .collect()
    }

    /// 总展长，对称机翼计两侧
    pub fn span(&self, span_type: SpanType) -> f64 {
        if span_type == SpanType::YFull {
            return match self.xsecs.len() {
                0 => 0.0,
                n => self.xsec_point(n - 1, 0.25, 0.25).y,
            };
        }
        let span: f64 = self.sectional_spans(span_type).iter().sum();
        if self.symmetric {
            span * 2.0
        } else {
            span
        }
    }

    /// 各段面积（梯形近似，不含镜像）
    pub fn sectional_areas(&self, area_type: AreaType) -> Vec<f64> {
        let spans = match area_type {
            AreaType::Wetted => self.sectional_spans(SpanType::Wetted),
            AreaType::Projected => self.sectional_spans(SpanType::Y),
        };
        self.xsecs
            .windows(2)
            .zip(spans)
            .map(|(pair, span)| (pair[0].chord + pair[1].chord) / 2.0 * span)
            .collect()
    }

    /// 总面积，对称机翼计两侧
    pub fn area(&self, area_type: AreaType) -> f64 {
        let area: f64 = self.sectional_areas(area_type).iter().sum();
        if self.symmetric {
            area * 2.0
        } else {
            area
        }
    }

    /// 展弦比 b²/S
    pub fn aspect_ratio(&self) -> Result<f64, GeometryError> {
        let area = self.area(AreaType::Wetted);
        if area.abs() < EPSILON {
            return Err(GeometryError::degenerate(&self.name, "zero area"));
        }
        Ok(self.span(SpanType::Wetted).powi(2) / area)
    }

    /// 几何平均弦长 S/b
    pub fn mean_geometric_chord(&self) -> Result<f64, GeometryError> {
        let span = self.span(SpanType::Wetted);
        if span.abs() < EPSILON {
            return Err(GeometryError::degenerate(&self.name, "zero span"));
        }
        Ok(self.area(AreaType::Wetted) / span)
    }

    /// 面积加权求和，返回 `Σ(value·area) / Σarea`
    fn area_weighted<T>(
        &self,
        values: impl IntoIterator<Item = T>,
        zero: T,
    ) -> Result<T, GeometryError>
    where
        T: std::ops::Add<Output = T> + std::ops::Mul<f64, Output = T> + std::ops::Div<f64, Output = T>,
    {
        self.require_sections()?;
        let areas = self.sectional_areas(AreaType::Wetted);
        let total: f64 = areas.iter().sum();
        if total.abs() < EPSILON {
            return Err(GeometryError::degenerate(&self.name, "zero area"));
        }
        let sum = values
            .into_iter()
            .zip(areas)
            .fold(zero, |acc, (value, area)| acc + value * area);
        Ok(sum / total)
    }

    /// 平均气动弦长
    ///
    /// 每段按梯形翼公式 `2/3·c_r·(1+λ+λ²)/(1+λ)` 计算，再按面积加权。
    pub fn mean_aerodynamic_chord(&self) -> Result<f64, GeometryError> {
        let lengths: Vec<f64> = self
            .xsecs
            .windows(2)
            .map(|pair| section_mac(&pair[0], &pair[1]).0)
            .collect();
        self.area_weighted(lengths, 0.0)
    }

    /// 面积加权的平均扭转角（度）
    ///
    /// 仅当所有截面扭转轴相同时结果精确。
    pub fn mean_twist_angle(&self) -> Result<f64, GeometryError> {
        let twists: Vec<f64> = self
            .xsecs
            .windows(2)
            .map(|pair| (pair[0].twist + pair[1].twist) / 2.0)
            .collect();
        self.area_weighted(twists, 0.0)
    }

    /// 四分之一弦线后掠角（度），后掠为正
    pub fn mean_sweep_angle(&self) -> Result<f64, GeometryError> {
        self.require_sections()?;
        let root = self.xsec_point(0, 0.25, 0.0);
        let tip = self.xsec_point(self.xsecs.len() - 1, 0.25, 0.0);
        let direction = (tip - root)
            .try_normalize(EPSILON)
            .ok_or_else(|| GeometryError::degenerate(&self.name, "root and tip coincide"))?;
        Ok(direction.x.asin().to_degrees())
    }

    /// 气动中心
    ///
    /// `chord_fraction` 为气动中心在平均气动弦上的位置（亚声速通常取 0.25）。
    /// 对称机翼的气动中心位于对称面上。
    pub fn aerodynamic_center(&self, chord_fraction: f64) -> Result<Point3, GeometryError> {
        let centers: Vec<Vector3> = self
            .xsecs
            .windows(2)
            .map(|pair| {
                let (inner, outer) = (&pair[0], &pair[1]);
                let (mac, le_fraction) = section_mac(inner, outer);
                let mac_le = inner.xyz_le + (outer.xyz_le - inner.xyz_le) * le_fraction;
                mac_le.coords + Vector3::new(chord_fraction * mac, 0.0, 0.0)
            })
            .collect();

        let mut center = self.xyz_le + self.area_weighted(centers, Vector3::zeros())?;
        if self.symmetric {
            center.y = 0.0;
        }
        Ok(center)
    }

    /// 梯度比（翼尖弦长 / 翼根弦长），仅对梯形翼严格成立
    pub fn taper_ratio(&self) -> Result<f64, GeometryError> {
        self.require_sections()?;
        let root = self.xsecs[0].chord;
        if root.abs() < EPSILON {
            return Err(GeometryError::degenerate(&self.name, "zero root chord"));
        }
        Ok(self.xsecs[self.xsecs.len() - 1].chord / root)
    }

    /// 机翼自身是否完全对称：镜像且所有舵面对称偏转或未偏转
    pub fn is_entirely_symmetric(&self) -> bool {
        self.symmetric
            && self.xsecs.iter().all(|x| {
                x.control_surface_is_symmetric
                    || x.control_surface_deflection.abs() <= SYMMETRY_TOLERANCE
            })
    }

    /// 沿展向的一条网格线，每个截面取相同的无量纲位置
    pub fn mesh_line(
        &self,
        x_nondim: f64,
        y_nondim: f64,
        add_camber: bool,
        spanwise_resolution: usize,
        spacing: Spacing,
    ) -> Vec<Point3> {
        let n = self.xsecs.len();
        let y_nondim: Vec<f64> = self
            .xsecs
            .iter()
            .map(|xsec| {
                if add_camber {
                    y_nondim + xsec.airfoil.local_camber(x_nondim)
                } else {
                    y_nondim
                }
            })
            .collect();
        self.mesh_line_sections(&vec![x_nondim; n], &y_nondim, spanwise_resolution, spacing)
    }

    /// 沿展向的一条网格线，每个截面给定各自的无量纲位置
    fn mesh_line_sections(
        &self,
        x_nondim: &[f64],
        y_nondim: &[f64],
        spanwise_resolution: usize,
        spacing: Spacing,
    ) -> Vec<Point3> {
        let section_points: Vec<Point3> = (0..self.xsecs.len())
            .map(|i| self.xsec_point(i, x_nondim[i], y_nondim[i]))
            .collect();

        let params = spacing.params(spanwise_resolution + 1);
        let n_segments = section_points.len().saturating_sub(1);
        let mut line = Vec::with_capacity(n_segments * spanwise_resolution + 1);
        for (i, pair) in section_points.windows(2).enumerate() {
            let mut segment = lerp_points(&pair[0], &pair[1], &params);
            if i + 1 != n_segments {
                segment.pop();
            }
            line.extend(segment);
        }
        line
    }

    /// 机翼实体表面网格（含翼根、翼尖封口和后缘封口）
    pub fn mesh_body(
        &self,
        method: MeshMethod,
        chordwise_resolution: usize,
        spanwise_resolution: usize,
    ) -> Mesh {
        if self.xsecs.len() < 2 {
            return Mesh::default();
        }

        let airfoils: Vec<Airfoil> = self
            .xsecs
            .iter()
            .map(|xsec| xsec.airfoil.repanel(chordwise_resolution + 1))
            .collect();
        let n_around = airfoils[0].coordinates.len();

        let mut points = Vec::new();
        for j in 0..n_around {
            let x_nondim: Vec<f64> = airfoils.iter().map(|af| af.coordinates[j].x).collect();
            let y_nondim: Vec<f64> = airfoils.iter().map(|af| af.coordinates[j].y).collect();
            points.extend(self.mesh_line_sections(
                &x_nondim,
                &y_nondim,
                spanwise_resolution,
                Spacing::Uniform,
            ));
        }

        let num_i = spanwise_resolution * (self.xsecs.len() - 1);
        let num_j = n_around - 1;
        let index_of = |i: usize, j: usize| i + j * (num_i + 1);

        let mut mesh = Mesh::new(points, Vec::new());
        for i in 0..num_i {
            for j in 0..num_j {
                mesh.add_quad(
                    method,
                    [index_of(i, j), index_of(i + 1, j), index_of(i + 1, j + 1), index_of(i, j + 1)],
                );
            }
        }

        // 翼根与翼尖封口
        for j in 0..num_j / 2 {
            mesh.add_quad(
                method,
                [
                    index_of(0, num_j - j),
                    index_of(0, j),
                    index_of(0, j + 1),
                    index_of(0, num_j - j - 1),
                ],
            );
            mesh.add_quad(
                method,
                [
                    index_of(num_i, j),
                    index_of(num_i, j + 1),
                    index_of(num_i, num_j - j - 1),
                    index_of(num_i, num_j - j),
                ],
            );
        }

        // 后缘封口
        for i in 0..num_i {
            mesh.add_quad(
                method,
                [
                    index_of(i + 1, 0),
                    index_of(i + 1, num_j),
                    index_of(i, num_j),
                    index_of(i, 0),
                ],
            );
        }

        if self.symmetric {
            mesh.with_mirror_y()
        } else {
            mesh
        }
    }

    /// 薄面（中弧面）网格，用于涡格类方法
    pub fn mesh_thin_surface(
        &self,
        method: MeshMethod,
        chordwise_resolution: usize,
        spanwise_resolution: usize,
        chordwise_spacing: Spacing,
        add_camber: bool,
    ) -> Mesh {
        if self.xsecs.len() < 2 {
            return Mesh::default();
        }

        let mut points = Vec::new();
        let x_nondim = chordwise_spacing.params(chordwise_resolution + 1);
        for &x in &x_nondim {
            points.extend(self.mesh_line(x, 0.0, add_camber, spanwise_resolution, Spacing::Uniform));
        }

        let num_i = spanwise_resolution * (self.xsecs.len() - 1);
        let num_j = x_nondim.len() - 1;
        let index_of = |i: usize, j: usize| i + j * (num_i + 1);

        let mut mesh = Mesh::new(points, Vec::new());
        for i in 0..num_i {
            for j in 0..num_j {
                mesh.add_quad(
                    method,
                    [index_of(i, j), index_of(i + 1, j), index_of(i + 1, j + 1), index_of(i, j + 1)],
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

/// 梯形段的平均气动弦长，以及其前缘在段内的展向位置比例
fn section_mac(inner: &WingXSec, outer: &WingXSec) -> (f64, f64) {
    let taper = outer.chord / inner.chord;
    let length = 2.0 / 3.0 * inner.chord * (1.0 + taper + taper * taper) / (1.0 + taper);
    let le_fraction = (1.0 + 2.0 * taper) / (3.0 + 3.0 * taper);
    (length, le_fraction)
}
