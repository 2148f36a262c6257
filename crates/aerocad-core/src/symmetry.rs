//! 整机对称性检查
//!
//! 判断整机在关于 XZ 平面镜像后是否保持几何与气动特性不变。
//! 与零比较时使用 [`SYMMETRY_TOLERANCE`]，避免翼型数值积分的舍入误差造成误判。

use crate::airplane::Airplane;
use crate::wing::Wing;
use std::fmt;

/// 对称性检查中"等于零"的容差
pub const SYMMETRY_TOLERANCE: f64 = 1e-10;

/// 检查翼型零升力/零力矩时使用的雷诺数
pub const NOMINAL_REYNOLDS: f64 = 1e6;

fn is_zero(value: f64) -> bool {
    value.abs() <= SYMMETRY_TOLERANCE
}

/// 导致整机不对称的原因
#[derive(Debug, Clone, PartialEq)]
pub enum Asymmetry {
    /// 翼面自身不对称（未镜像，或存在非对称偏转的舵面）
    WingNotSymmetric { wing: String },
    /// 舵面非对称偏转
    AsymmetricDeflection { wing: String, xsec: usize },
    /// 未镜像翼面的截面偏离对称面
    LateralOffset { wing: String, xsec: usize, y: f64 },
    /// 扭转使截面转出对称面
    TwistOutOfPlane { wing: String, xsec: usize },
    /// 翼型在零迎角下产生升力或力矩
    CamberedAirfoil {
        wing: String,
        xsec: usize,
        cl: f64,
        cm: f64,
    },
}

impl fmt::Display for Asymmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asymmetry::WingNotSymmetric { wing } => {
                write!(f, "wing '{}' is not symmetric", wing)
            }
            Asymmetry::AsymmetricDeflection { wing, xsec } => {
                write!(f, "wing '{}' xsec {}: asymmetric control deflection", wing, xsec)
            }
            Asymmetry::LateralOffset { wing, xsec, y } => {
                write!(f, "wing '{}' xsec {}: off the symmetry plane (y = {})", wing, xsec, y)
            }
            Asymmetry::TwistOutOfPlane { wing, xsec } => {
                write!(f, "wing '{}' xsec {}: twist axis leaves the symmetry plane", wing, xsec)
            }
            Asymmetry::CamberedAirfoil { wing, xsec, cl, cm } => write!(
                f,
                "wing '{}' xsec {}: airfoil not symmetric (Cl = {}, Cm = {})",
                wing, xsec, cl, cm
            ),
        }
    }
}

/// 检查翼面的单个截面
///
/// 依次检查：舵面偏转；未镜像翼面时截面 y 坐标为零、扭转轴仅沿展向、翼型在
/// 零迎角下不产生升力和力矩。`index` 越界时返回 `None`。
pub fn check_section(wing: &Wing, index: usize) -> Option<Asymmetry> {
    let xsec = wing.xsecs.get(index)?;

    if !(xsec.control_surface_is_symmetric || is_zero(xsec.control_surface_deflection)) {
        return Some(Asymmetry::AsymmetricDeflection {
            wing: wing.name.clone(),
            xsec: index,
        });
    }

    if wing.symmetric {
        return None;
    }

    if !is_zero(xsec.xyz_le.y) {
        return Some(Asymmetry::LateralOffset {
            wing: wing.name.clone(),
            xsec: index,
            y: xsec.xyz_le.y,
        });
    }

    if !is_zero(xsec.twist) {
        let axis = wing.twist_axis(index);
        if !(is_zero(axis.x) && is_zero(axis.z)) {
            return Some(Asymmetry::TwistOutOfPlane {
                wing: wing.name.clone(),
                xsec: index,
            });
        }
    }

    let cl = xsec.airfoil.lift_coefficient(0.0, NOMINAL_REYNOLDS, 0.0, 0.0);
    let cm = xsec.airfoil.moment_coefficient(0.0, NOMINAL_REYNOLDS, 0.0, 0.0);
    if !(is_zero(cl) && is_zero(cm)) {
        return Some(Asymmetry::CamberedAirfoil {
            wing: wing.name.clone(),
            xsec: index,
            cl,
            cm,
        });
    }

    None
}

impl Airplane {
    /// 查找第一个导致整机不对称的原因，对称时返回 `None`
    pub fn find_asymmetry(&self) -> Option<Asymmetry> {
        for wing in self.wings() {
            if !wing.is_entirely_symmetric() {
                let found = Asymmetry::WingNotSymmetric {
                    wing: wing.name.clone(),
                };
                tracing::debug!("{} is asymmetric: {}", self.name, found);
                return Some(found);
            }
            for index in 0..wing.xsecs.len() {
                if let Some(found) = check_section(wing, index) {
                    tracing::debug!("{} is asymmetric: {}", self.name, found);
                    return Some(found);
                }
            }
        }
        None
    }

    /// 整机是否关于 XZ 平面完全对称
    pub fn is_entirely_symmetric(&self) -> bool {
        self.find_asymmetry().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::Airfoil;
    use crate::airplane::AirplaneDefinition;
    use crate::math::Point3;
    use crate::wing::WingXSec;

    fn symmetric_wing(name: &str) -> Wing {
        Wing::new(name).with_symmetric(true).with_xsecs(vec![
            WingXSec::new(Point3::origin(), 1.0),
            WingXSec::new(Point3::new(0.1, 3.0, 0.2), 0.6),
        ])
    }

    /// 位于对称面内的垂尾
    fn fin() -> Wing {
        Wing::new("Fin").with_xsecs(vec![
            WingXSec::new(Point3::origin(), 0.8),
            WingXSec::new(Point3::new(0.3, 0.0, 1.0), 0.5),
        ])
    }

    fn airplane(wings: Vec<Wing>) -> Airplane {
        let definition = AirplaneDefinition {
            wings,
            ..AirplaneDefinition::new("Test")
        };
        Airplane::new(definition)
    }

    #[test]
    fn test_symmetric_airplane() {
        let plane = airplane(vec![symmetric_wing("Wing"), symmetric_wing("Stabilizer")]);
        assert!(plane.is_entirely_symmetric());
        assert_eq!(plane.find_asymmetry(), None);
    }

    #[test]
    fn test_empty_airplane_is_symmetric() {
        assert!(airplane(Vec::new()).is_entirely_symmetric());
    }

    #[test]
    fn test_unmirrored_wing_makes_airplane_asymmetric() {
        let plane = airplane(vec![symmetric_wing("Wing"), fin()]);
        assert_eq!(
            plane.find_asymmetry(),
            Some(Asymmetry::WingNotSymmetric {
                wing: "Fin".to_string()
            })
        );
        assert!(!plane.is_entirely_symmetric());
    }

    #[test]
    fn test_aileron_deflection_detected() {
        let mut wing = symmetric_wing("Wing");
        wing.xsecs[1] = wing.xsecs[1].clone().with_control_surface(10.0, false);
        let plane = airplane(vec![wing]);
        assert!(!plane.is_entirely_symmetric());

        let mut wing = symmetric_wing("Wing");
        wing.xsecs[0].control_surface_is_symmetric = false;
        assert_eq!(check_section(&wing, 0), None);
    }

    #[test]
    fn test_deflection_condition() {
        let mut wing = fin();
        wing.xsecs[0] = wing.xsecs[0].clone().with_control_surface(5.0, false);
        assert_eq!(
            check_section(&wing, 0),
            Some(Asymmetry::AsymmetricDeflection {
                wing: "Fin".to_string(),
                xsec: 0
            })
        );
    }

    #[test]
    fn test_lateral_offset_condition() {
        let mut wing = fin();
        wing.xsecs[1].xyz_le.y = 0.5;
        assert!(matches!(
            check_section(&wing, 1),
            Some(Asymmetry::LateralOffset { xsec: 1, .. })
        ));

        wing.xsecs[1].xyz_le.y = 1e-13;
        assert_eq!(check_section(&wing, 1), None);
    }

    #[test]
    fn test_twist_condition() {
        let mut wing = fin();
        // 垂尾扭转轴沿 Z 轴，扭转会使翼型转出对称面
        wing.xsecs[0].twist = 2.0;
        assert!(matches!(
            check_section(&wing, 0),
            Some(Asymmetry::TwistOutOfPlane { xsec: 0, .. })
        ));

        // 扭转轴沿 Y 轴时不影响对称性
        let mut on_plane = Wing::new("Keel").with_xsecs(vec![
            WingXSec::new(Point3::origin(), 1.0).with_twist(3.0),
            WingXSec::new(Point3::new(1.0, 0.0, 0.0), 1.0),
        ]);
        on_plane.xsecs[1].twist = 3.0;
        assert_eq!(check_section(&on_plane, 0), None);
    }

    #[test]
    fn test_cambered_airfoil_condition() {
        let mut wing = fin();
        wing.xsecs[1].airfoil = Airfoil::naca4("naca4412", 60).unwrap();
        assert!(matches!(
            check_section(&wing, 1),
            Some(Asymmetry::CamberedAirfoil { xsec: 1, .. })
        ));
        assert_eq!(check_section(&wing, 0), None);
    }

    #[test]
    fn test_check_section_out_of_range() {
        let mut wing = fin();
        wing.xsecs[1].xyz_le.y = 0.5;
        assert_eq!(check_section(&wing, 2), None);
        assert_eq!(check_section(&Wing::new("Empty"), 0), None);
    }

    #[test]
    fn test_roundoff_deflection_is_symmetric() {
        let mut wing = symmetric_wing("Wing");
        wing.xsecs[1] = wing.xsecs[1].clone().with_control_surface(1e-12, false);
        assert!(airplane(vec![wing]).is_entirely_symmetric());
    }

    #[test]
    fn test_cambered_airfoil_on_mirrored_wing_is_symmetric() {
        let mut wing = symmetric_wing("Wing");
        for xsec in &mut wing.xsecs {
            xsec.airfoil = Airfoil::naca4("2412", 60).unwrap();
            xsec.twist = 3.0;
        }
        assert!(airplane(vec![wing]).is_entirely_symmetric());
    }
}
