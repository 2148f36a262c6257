//! 整机气动中心
//!
//! 各翼面气动中心按投影面积加权平均。

use crate::airplane::Airplane;
use crate::error::GeometryError;
use crate::math::{Point3, Vector3, EPSILON};
use crate::wing::AreaType;

/// 气动中心在平均气动弦上的默认位置（亚声速）
pub const DEFAULT_CHORD_FRACTION: f64 = 0.25;

impl Airplane {
    /// 整机气动中心
    ///
    /// `chord_fraction` 直接传给各翼面的 [`Wing::aerodynamic_center`](crate::wing::Wing::aerodynamic_center)。
    /// 没有翼面或总投影面积为零时返回 [`GeometryError::EmptyGeometry`]。
    pub fn aerodynamic_center(&self, chord_fraction: f64) -> Result<Point3, GeometryError> {
        if self.wings().is_empty() {
            return Err(GeometryError::EmptyGeometry(format!(
                "airplane '{}' has no wings",
                self.name
            )));
        }

        let mut weighted = Vector3::zeros();
        let mut total_area = 0.0;
        for wing in self.wings() {
            let area = wing.area(AreaType::Projected);
            let center = wing.aerodynamic_center(chord_fraction)?;
            weighted += center.coords * area;
            total_area += area;
        }

        if total_area.abs() < EPSILON {
            return Err(GeometryError::EmptyGeometry(format!(
                "airplane '{}' has zero projected wing area",
                self.name
            )));
        }

        Ok(Point3::from(weighted / total_area))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airplane::AirplaneDefinition;
    use crate::wing::{Wing, WingXSec};

    /// 弦长 1 的矩形对称翼，气动中心位于 `xyz_le + (0.25, 0, 0)`，投影面积为 `2·half_span`
    fn rectangular(name: &str, x_le: f64, half_span: f64) -> Wing {
        Wing::new(name)
            .with_xyz_le(Point3::new(x_le, 0.0, 0.0))
            .with_symmetric(true)
            .with_xsecs(vec![
                WingXSec::new(Point3::origin(), 1.0),
                WingXSec::new(Point3::new(0.0, half_span, 0.0), 1.0),
            ])
    }

    fn airplane(wings: Vec<Wing>) -> Airplane {
        Airplane::new(AirplaneDefinition {
            wings,
            ..AirplaneDefinition::new("AC")
        })
    }

    #[test]
    fn test_equal_areas_average() {
        let plane = airplane(vec![
            rectangular("A", 0.75, 1.0),
            rectangular("B", 2.75, 1.0),
        ]);
        let ac = plane.aerodynamic_center(DEFAULT_CHORD_FRACTION).unwrap();
        assert!((ac - Point3::new(2.0, 0.0, 0.0)).norm() < EPSILON);
    }

    #[test]
    fn test_area_weighting() {
        // 面积 1 与 3，气动中心 (0,0,0) 与 (4,0,0)
        let plane = airplane(vec![
            rectangular("Small", -0.25, 0.5),
            rectangular("Large", 3.75, 1.5),
        ]);
        let ac = plane.aerodynamic_center(DEFAULT_CHORD_FRACTION).unwrap();
        assert!((ac - Point3::new(3.0, 0.0, 0.0)).norm() < EPSILON);
    }

    #[test]
    fn test_chord_fraction_passed_through() {
        let plane = airplane(vec![rectangular("A", 0.0, 1.0)]);
        let ac = plane.aerodynamic_center(0.5).unwrap();
        assert!((ac.x - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_no_wings() {
        let plane = airplane(Vec::new());
        assert!(matches!(
            plane.aerodynamic_center(DEFAULT_CHORD_FRACTION),
            Err(GeometryError::EmptyGeometry(_))
        ));
    }

    #[test]
    fn test_vertical_only() {
        let fin = Wing::new("Fin").with_xsecs(vec![
            WingXSec::new(Point3::origin(), 1.0),
            WingXSec::new(Point3::new(0.0, 0.0, 1.0), 1.0),
        ]);
        assert!(matches!(
            airplane(vec![fin]).aerodynamic_center(DEFAULT_CHORD_FRACTION),
            Err(GeometryError::EmptyGeometry(_))
        ));
    }

    #[test]
    fn test_degenerate_wing_error_propagates() {
        let stub = Wing::new("Stub").with_xsecs(vec![WingXSec::default()]);
        assert!(matches!(
            airplane(vec![rectangular("A", 0.0, 1.0), stub]).aerodynamic_center(DEFAULT_CHORD_FRACTION),
            Err(GeometryError::DegenerateSurface { .. })
        ));
    }
}
