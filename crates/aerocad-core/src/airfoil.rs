//! 翼型
//!
//! 坐标采用 Selig 顺序：上表面后缘 → 前缘 → 下表面后缘，弦长归一化为 1。
//!
//! 气动响应（升力、俯仰力矩系数）由 [`PolarModel`] 给出，默认基于薄翼理论。

use crate::error::GeometryError;
use crate::math::{cosspace, interp, Point2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// 默认每侧坐标点数
pub const DEFAULT_POINTS_PER_SIDE: usize = 100;

/// 简单襟翼铰链位置（弦长比例）
const FLAP_HINGE_X: f64 = 0.75;

/// 薄翼理论积分采样数
const THIN_AIRFOIL_SAMPLES: usize = 200;

/// 翼型气动响应模型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum PolarModel {
    /// 基于中弧线的薄翼理论（无黏，忽略雷诺数）
    #[default]
    ThinAirfoil,
    /// 线性升力线：`Cl = cl_0 + cl_alpha * α`（α 为弧度）
    Linear { cl_0: f64, cl_alpha: f64, cm_0: f64 },
}

/// 翼型
///
/// 反序列化时经过 [`Airfoil::from_coordinates`] 的校验。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AirfoilRecord")]
pub struct Airfoil {
    pub name: String,
    pub coordinates: Vec<Point2>,
    pub polar: PolarModel,
}

/// 未校验的翼型记录
#[derive(Deserialize)]
struct AirfoilRecord {
    name: String,
    coordinates: Vec<Point2>,
    #[serde(default)]
    polar: PolarModel,
}

impl TryFrom<AirfoilRecord> for Airfoil {
    type Error = GeometryError;

    fn try_from(record: AirfoilRecord) -> Result<Self, Self::Error> {
        Ok(Airfoil::from_coordinates(record.name, record.coordinates)?.with_polar(record.polar))
    }
}

impl Default for Airfoil {
    fn default() -> Self {
        Self::naca4_from_params("naca0012", 0.0, 0.0, 0.12, DEFAULT_POINTS_PER_SIDE)
    }
}

impl Airfoil {
    /// 由坐标创建翼型（至少 3 个有限值点）
    pub fn from_coordinates(
        name: impl Into<String>,
        coordinates: Vec<Point2>,
    ) -> Result<Self, GeometryError> {
        let name = name.into();
        if coordinates.len() < 3 {
            return Err(GeometryError::InvalidAirfoil(format!(
                "'{}' needs at least 3 coordinates, got {}",
                name,
                coordinates.len()
            )));
        }
        if let Some(i) = coordinates.iter().position(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(GeometryError::InvalidAirfoil(format!(
                "'{}' has a non-finite coordinate at index {}",
                name, i
            )));
        }
        Ok(Self {
            name,
            coordinates,
            polar: PolarModel::default(),
        })
    }

    /// 生成 NACA 四位数翼型，接受 `"naca2412"` 或 `"2412"`
    pub fn naca4(designation: &str, n_points_per_side: usize) -> Result<Self, GeometryError> {
        let lower = designation.trim().to_ascii_lowercase();
        let digits = lower.strip_prefix("naca").unwrap_or(&lower).trim();

        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(GeometryError::InvalidAirfoil(format!(
                "'{}' is not a NACA 4-digit designation",
                designation
            )));
        }
        if n_points_per_side < 2 {
            return Err(GeometryError::InvalidAirfoil(format!(
                "need at least 2 points per side, got {}",
                n_points_per_side
            )));
        }

        let digit = |i: usize| f64::from(digits.as_bytes()[i] - b'0');
        let max_camber = digit(0) / 100.0;
        let camber_loc = digit(1) / 10.0;
        let thickness = (digit(2) * 10.0 + digit(3)) / 100.0;

        Ok(Self::naca4_from_params(
            &format!("naca{}", digits),
            max_camber,
            camber_loc,
            thickness,
            n_points_per_side,
        ))
    }

    fn naca4_from_params(
        name: &str,
        max_camber: f64,
        camber_loc: f64,
        thickness: f64,
        n_points_per_side: usize,
    ) -> Self {
        let xs = cosspace(0.0, 1.0, n_points_per_side);

        let camber = |x: f64| -> (f64, f64) {
            if max_camber == 0.0 || camber_loc == 0.0 {
                return (0.0, 0.0);
            }
            let (m, p) = (max_camber, camber_loc);
            if x < p {
                (m / (p * p) * (2.0 * p * x - x * x), 2.0 * m / (p * p) * (p - x))
            } else {
                let q = (1.0 - p) * (1.0 - p);
                (
                    m / q * ((1.0 - 2.0 * p) + 2.0 * p * x - x * x),
                    2.0 * m / q * (p - x),
                )
            }
        };

        // 后缘闭合的厚度分布
        let half_thickness = |x: f64| {
            5.0 * thickness
                * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * x.powi(2) + 0.2843 * x.powi(3)
                    - 0.1036 * x.powi(4))
        };

        let mut upper = Vec::with_capacity(xs.len());
        let mut lower = Vec::with_capacity(xs.len());
        for &x in &xs {
            let (yc, dyc) = camber(x);
            let yt = half_thickness(x);
            let theta = dyc.atan();
            upper.push(Point2::new(x - yt * theta.sin(), yc + yt * theta.cos()));
            lower.push(Point2::new(x + yt * theta.sin(), yc - yt * theta.cos()));
        }

        let mut coordinates: Vec<Point2> = upper.into_iter().rev().collect();
        coordinates.extend(lower.into_iter().skip(1));

        Self {
            name: name.to_string(),
            coordinates,
            polar: PolarModel::default(),
        }
    }

    /// 设置气动响应模型
    pub fn with_polar(mut self, polar: PolarModel) -> Self {
        self.polar = polar;
        self
    }

    /// 前缘点索引（x 最小的点）
    fn leading_edge_index(&self) -> usize {
        self.coordinates
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.x.total_cmp(&b.1.x))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// 上表面坐标（后缘 → 前缘），坐标为空时返回空切片
    pub fn upper_coordinates(&self) -> &[Point2] {
        let end = (self.leading_edge_index() + 1).min(self.coordinates.len());
        &self.coordinates[..end]
    }

    /// 下表面坐标（前缘 → 后缘）
    pub fn lower_coordinates(&self) -> &[Point2] {
        &self.coordinates[self.leading_edge_index()..]
    }

    /// 按 x 升序拆分的上下表面采样，用于插值
    fn surfaces(&self) -> ((Vec<f64>, Vec<f64>), (Vec<f64>, Vec<f64>)) {
        let upper: (Vec<f64>, Vec<f64>) = self
            .upper_coordinates()
            .iter()
            .rev()
            .map(|p| (p.x, p.y))
            .unzip();
        let lower: (Vec<f64>, Vec<f64>) =
            self.lower_coordinates().iter().map(|p| (p.x, p.y)).unzip();
        (upper, lower)
    }

    /// 以余弦分布重新布点，每侧 `n_points_per_side` 个点（前缘共用）
    pub fn repanel(&self, n_points_per_side: usize) -> Airfoil {
        let ((ux, uy), (lx, ly)) = self.surfaces();
        let xs = cosspace(0.0, 1.0, n_points_per_side);

        let mut coordinates: Vec<Point2> = xs
            .iter()
            .rev()
            .map(|&x| Point2::new(x, interp(x, &ux, &uy)))
            .collect();
        coordinates.extend(
            xs.iter()
                .skip(1)
                .map(|&x| Point2::new(x, interp(x, &lx, &ly))),
        );

        Airfoil {
            name: self.name.clone(),
            coordinates,
            polar: self.polar.clone(),
        }
    }

    /// 弦向位置 `x_over_c` 处的厚度
    pub fn local_thickness(&self, x_over_c: f64) -> f64 {
        let ((ux, uy), (lx, ly)) = self.surfaces();
        interp(x_over_c, &ux, &uy) - interp(x_over_c, &lx, &ly)
    }

    /// 弦向位置 `x_over_c` 处的中弧线高度
    pub fn local_camber(&self, x_over_c: f64) -> f64 {
        let ((ux, uy), (lx, ly)) = self.surfaces();
        (interp(x_over_c, &ux, &uy) + interp(x_over_c, &lx, &ly)) / 2.0
    }

    /// 最大厚度（弦长比例）
    pub fn max_thickness(&self) -> f64 {
        let ((ux, uy), (lx, ly)) = self.surfaces();
        cosspace(0.0, 1.0, 501)
            .into_iter()
            .map(|x| interp(x, &ux, &uy) - interp(x, &lx, &ly))
            .fold(0.0, f64::max)
    }

    /// 最大弯度（按绝对值，保留符号）
    pub fn max_camber(&self) -> f64 {
        let ((ux, uy), (lx, ly)) = self.surfaces();
        cosspace(0.0, 1.0, 501)
            .into_iter()
            .map(|x| (interp(x, &ux, &uy) + interp(x, &lx, &ly)) / 2.0)
            .fold(0.0, |acc: f64, c| if c.abs() > acc.abs() { c } else { acc })
    }

    /// 坐标文本（`.dat` 格式），每行 `x y`，保留 6 位小数
    pub fn to_dat_string(&self, include_name: bool) -> String {
        let mut lines = Vec::with_capacity(self.coordinates.len() + 1);
        if include_name {
            lines.push(self.name.clone());
        }
        lines.extend(
            self.coordinates
                .iter()
                .map(|p| format!("{:.6} {:.6}", p.x, p.y)),
        );
        lines.join("\n")
    }

    /// 升力系数
    ///
    /// `alpha` 与 `control_deflection` 单位为度；`control_deflection` 为
    /// 0.75c 处简单襟翼的偏角（下偏为正）。
    pub fn lift_coefficient(
        &self,
        alpha: f64,
        _reynolds: f64,
        mach: f64,
        control_deflection: f64,
    ) -> f64 {
        let alpha = alpha.to_radians();
        let base = match &self.polar {
            PolarModel::ThinAirfoil => {
                let coeffs = self.camber_fourier_coefficients();
                2.0 * PI * (alpha - coeffs.zero_lift_alpha)
            }
            PolarModel::Linear { cl_0, cl_alpha, .. } => cl_0 + cl_alpha * alpha,
        };
        let flap = flap_lift_increment(control_deflection.to_radians());
        (base + flap) / prandtl_glauert(mach)
    }

    /// 四分之一弦长处的俯仰力矩系数（参数同 [`Self::lift_coefficient`]）
    pub fn moment_coefficient(
        &self,
        _alpha: f64,
        _reynolds: f64,
        mach: f64,
        control_deflection: f64,
    ) -> f64 {
        let base = match &self.polar {
            PolarModel::ThinAirfoil => {
                let coeffs = self.camber_fourier_coefficients();
                PI / 4.0 * (coeffs.a2 - coeffs.a1)
            }
            PolarModel::Linear { cm_0, .. } => *cm_0,
        };
        let flap = flap_moment_increment(control_deflection.to_radians());
        (base + flap) / prandtl_glauert(mach)
    }

    /// 中弧线斜率的傅里叶系数（θ 坐标下中点积分）
    fn camber_fourier_coefficients(&self) -> CamberCoefficients {
        let ((ux, uy), (lx, ly)) = self.surfaces();
        let camber = |x: f64| (interp(x, &ux, &uy) + interp(x, &lx, &ly)) / 2.0;
        let h = 1e-4;

        let d_theta = PI / THIN_AIRFOIL_SAMPLES as f64;
        let mut zero_lift = 0.0;
        let mut a1 = 0.0;
        let mut a2 = 0.0;
        for i in 0..THIN_AIRFOIL_SAMPLES {
            let theta = (i as f64 + 0.5) * d_theta;
            let x = (1.0 - theta.cos()) / 2.0;
            let lo = (x - h).max(0.0);
            let hi = (x + h).min(1.0);
            let slope = (camber(hi) - camber(lo)) / (hi - lo);

            zero_lift += slope * (theta.cos() - 1.0) * d_theta;
            a1 += slope * theta.cos() * d_theta;
            a2 += slope * (2.0 * theta).cos() * d_theta;
        }

        CamberCoefficients {
            zero_lift_alpha: zero_lift / PI,
            a1: a1 * 2.0 / PI,
            a2: a2 * 2.0 / PI,
        }
    }
}

struct CamberCoefficients {
    zero_lift_alpha: f64,
    a1: f64,
    a2: f64,
}

/// 铰链角 θh，满足 x_h = (1 - cos θh) / 2
fn hinge_angle() -> f64 {
    (1.0 - 2.0 * FLAP_HINGE_X).acos()
}

fn flap_lift_increment(deflection: f64) -> f64 {
    let theta_h = hinge_angle();
    2.0 * (PI - theta_h + theta_h.sin()) * deflection
}

fn flap_moment_increment(deflection: f64) -> f64 {
    let theta_h = hinge_angle();
    -0.5 * theta_h.sin() * (1.0 - theta_h.cos()) * deflection
}

/// 亚声速压缩性修正系数的倒数项，M >= 1 时不做修正
fn prandtl_glauert(mach: f64) -> f64 {
    if (0.0..1.0).contains(&mach) {
        (1.0 - mach * mach).sqrt()
    } else {
        1.0
    }
}
