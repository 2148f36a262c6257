//! 数学类型与离散化工具
//!
//! 几何计算统一使用 nalgebra 的 f64 类型。坐标系约定：
//! - X 轴指向机尾（弦向）
//! - Y 轴指向右翼（展向）
//! - Z 轴指向上方

use nalgebra::Unit;

pub type Point2 = nalgebra::Point2<f64>;
pub type Vector2 = nalgebra::Vector2<f64>;
pub type Point3 = nalgebra::Point3<f64>;
pub type Vector3 = nalgebra::Vector3<f64>;
pub type Rotation3 = nalgebra::Rotation3<f64>;

/// 通用几何容差
pub const EPSILON: f64 = 1e-10;

/// 均匀分布的 `n` 个点（包含两端）
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// 余弦分布的 `n` 个点（两端加密），端点精确等于 `start` 和 `end`
pub fn cosspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let mean = (start + end) / 2.0;
    let amp = (end - start) / 2.0;
    linspace(std::f64::consts::PI, 0.0, n)
        .into_iter()
        .enumerate()
        .map(|(i, theta)| {
            if i == 0 {
                start
            } else if i == n - 1 {
                end
            } else {
                mean + amp * theta.cos()
            }
        })
        .collect()
}

/// 两点之间按参数序列插值
pub fn lerp_points(a: &Point3, b: &Point3, params: &[f64]) -> Vec<Point3> {
    params.iter().map(|&t| a + (b - a) * t).collect()
}

/// 分段线性插值，`xs` 需升序；超出范围时取端点值
pub fn interp(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    if xs.is_empty() {
        return 0.0;
    }
    if x <= xs[0] {
        return ys[0];
    }
    let last = xs.len() - 1;
    if x >= xs[last] {
        return ys[last];
    }

    // 二分查找所在区间
    let upper = xs.partition_point(|&xi| xi <= x).min(last);
    let lower = upper - 1;
    let span = xs[upper] - xs[lower];
    if span.abs() < EPSILON {
        return ys[lower];
    }
    let t = (x - xs[lower]) / span;
    ys[lower] + (ys[upper] - ys[lower]) * t
}

/// 绕任意轴旋转（角度单位：弧度）
pub fn rotation_about_axis(angle: f64, axis: &Vector3) -> Rotation3 {
    match Unit::try_new(*axis, EPSILON) {
        Some(axis) => Rotation3::from_axis_angle(&axis, angle),
        None => Rotation3::identity(),
    }
}
