//! 整机聚合模型
//!
//! [`Airplane`] 独占其所有翼面和机身，构造时一次性确定参考面积、参考弦长和参考展长。
//! 其余派生量（对称性、气动中心、网格）每次调用时重新计算，不做缓存。

use crate::fuselage::{self, Fuselage};
use crate::math::Point3;
use crate::mesh::{Mesh, MeshMethod};
use crate::wing::{self, AreaType, SpanType, Wing};
use crate::GeometryError;
use serde::{Deserialize, Serialize};

/// 整机定义（构造参数）
///
/// 所有字段都有默认值，可直接从 JSON 反序列化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirplaneDefinition {
    pub name: String,
    /// 力矩参考点（通常为重心）
    pub xyz_ref: Point3,
    /// 翼面列表，第一个为主翼
    pub wings: Vec<Wing>,
    pub fuselages: Vec<Fuselage>,
    /// 参考面积，缺省时取主翼浸润面积
    pub s_ref: Option<f64>,
    /// 参考弦长，缺省时取主翼平均气动弦长
    pub c_ref: Option<f64>,
    /// 参考展长，缺省时取主翼展长
    pub b_ref: Option<f64>,
}

impl Default for AirplaneDefinition {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            xyz_ref: Point3::origin(),
            wings: Vec::new(),
            fuselages: Vec::new(),
            s_ref: None,
            c_ref: None,
            b_ref: None,
        }
    }
}

impl AirplaneDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_xyz_ref(mut self, xyz_ref: Point3) -> Self {
        self.xyz_ref = xyz_ref;
        self
    }

    pub fn with_wing(mut self, wing: Wing) -> Self {
        self.wings.push(wing);
        self
    }

    pub fn with_fuselage(mut self, fuselage: Fuselage) -> Self {
        self.fuselages.push(fuselage);
        self
    }

    /// 显式指定参考量（`None` 表示由主翼推导）
    pub fn with_references(mut self, s_ref: Option<f64>, c_ref: Option<f64>, b_ref: Option<f64>) -> Self {
        self.s_ref = s_ref;
        self.c_ref = c_ref;
        self.b_ref = b_ref;
        self
    }
}

/// 整机
#[derive(Debug, Clone, PartialEq)]
pub struct Airplane {
    pub name: String,
    pub xyz_ref: Point3,
    wings: Vec<Wing>,
    fuselages: Vec<Fuselage>,
    s_ref: Option<f64>,
    c_ref: Option<f64>,
    b_ref: Option<f64>,
}

impl Default for Airplane {
    fn default() -> Self {
        Self::new(AirplaneDefinition::default())
    }
}

impl Airplane {
    /// 由定义构造整机，并解析缺省的参考量
    pub fn new(definition: AirplaneDefinition) -> Self {
        let AirplaneDefinition {
            name,
            xyz_ref,
            wings,
            fuselages,
            s_ref,
            c_ref,
            b_ref,
        } = definition;

        let primary = wings.first();
        let s_ref = resolve_reference("s_ref", s_ref, primary, |w| Ok(w.area(AreaType::Wetted)));
        let c_ref = resolve_reference("c_ref", c_ref, primary, Wing::mean_aerodynamic_chord);
        let b_ref = resolve_reference("b_ref", b_ref, primary, |w| Ok(w.span(SpanType::Wetted)));

        Self {
            name,
            xyz_ref,
            wings,
            fuselages,
            s_ref,
            c_ref,
            b_ref,
        }
    }

    pub fn wings(&self) -> &[Wing] {
        &self.wings
    }

    /// 可变访问翼面；修改不会重新解析参考量
    pub fn wings_mut(&mut self) -> &mut Vec<Wing> {
        &mut self.wings
    }

    pub fn fuselages(&self) -> &[Fuselage] {
        &self.fuselages
    }

    /// 可变访问机身
    pub fn fuselages_mut(&mut self) -> &mut Vec<Fuselage> {
        &mut self.fuselages
    }

    pub fn s_ref(&self) -> Option<f64> {
        self.s_ref
    }

    pub fn c_ref(&self) -> Option<f64> {
        self.c_ref
    }

    pub fn b_ref(&self) -> Option<f64> {
        self.b_ref
    }

    /// 转回定义，已解析的参考量以显式值写出
    pub fn to_definition(&self) -> AirplaneDefinition {
        AirplaneDefinition {
            name: self.name.clone(),
            xyz_ref: self.xyz_ref,
            wings: self.wings.clone(),
            fuselages: self.fuselages.clone(),
            s_ref: self.s_ref,
            c_ref: self.c_ref,
            b_ref: self.b_ref,
        }
    }

    /// 各部件的网格（先翼面后机身），使用各自的默认分辨率
    pub fn meshes(&self, method: MeshMethod) -> Vec<Mesh> {
        let wings = self.wings.iter().map(|w| {
            w.mesh_body(
                method,
                wing::DEFAULT_CHORDWISE_RESOLUTION,
                wing::DEFAULT_SPANWISE_RESOLUTION,
            )
        });
        let fuselages = self.fuselages.iter().map(|f| {
            f.mesh_body(
                method,
                fuselage::DEFAULT_CHORDWISE_RESOLUTION,
                fuselage::DEFAULT_CIRCUMFERENTIAL_RESOLUTION,
            )
        });
        wings.chain(fuselages).collect()
    }

    /// 整机网格
    pub fn mesh_body(&self, method: MeshMethod) -> Mesh {
        Mesh::stack(self.meshes(method))
    }
}

impl std::fmt::Display for Airplane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Airplane '{}' ({} wing(s), {} fuselage(s))",
            self.name,
            self.wings.len(),
            self.fuselages.len()
        )
    }
}

/// 解析单个参考量：显式值优先，否则由主翼推导
fn resolve_reference(
    label: &str,
    explicit: Option<f64>,
    primary: Option<&Wing>,
    derive: impl FnOnce(&Wing) -> Result<f64, GeometryError>,
) -> Option<f64> {
    if explicit.is_some() {
        return explicit;
    }
    let wing = primary?;
    match derive(wing) {
        Ok(value) => {
            tracing::debug!("{} = {} derived from wing '{}'", label, value, wing.name);
            Some(value)
        }
        Err(e) => {
            tracing::warn!("Could not derive {} from wing '{}': {}", label, wing.name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuselage::FuselageXSec;
    use crate::math::EPSILON;
    use crate::wing::WingXSec;

    fn main_wing() -> Wing {
        Wing::new("Main Wing").with_symmetric(true).with_xsecs(vec![
            WingXSec::new(Point3::origin(), 1.5),
            WingXSec::new(Point3::new(0.25, 4.0, 0.3), 0.75),
        ])
    }

    fn tail() -> Wing {
        Wing::new("Tail").with_symmetric(true).with_xsecs(vec![
            WingXSec::new(Point3::origin(), 0.5),
            WingXSec::new(Point3::new(0.1, 1.0, 0.0), 0.4),
        ])
    }

    #[test]
    fn test_references_from_primary_wing() {
        let wing = main_wing();
        let airplane = Airplane::new(
            AirplaneDefinition::new("Glider")
                .with_wing(wing.clone())
                .with_wing(tail()),
        );
        assert_eq!(airplane.s_ref(), Some(wing.area(AreaType::Wetted)));
        assert_eq!(airplane.c_ref(), wing.mean_aerodynamic_chord().ok());
        assert_eq!(airplane.b_ref(), Some(wing.span(SpanType::Wetted)));
    }

    #[test]
    fn test_explicit_references_kept() {
        let airplane = Airplane::new(
            AirplaneDefinition::new("Explicit")
                .with_wing(main_wing())
                .with_references(Some(12.0), Some(1.1), None),
        );
        assert_eq!(airplane.s_ref(), Some(12.0));
        assert_eq!(airplane.c_ref(), Some(1.1));
        assert!((airplane.b_ref().unwrap() - main_wing().span(SpanType::Wetted)).abs() < EPSILON);
    }

    #[test]
    fn test_no_wings_leaves_references_unset() {
        let airplane = Airplane::new(AirplaneDefinition::new("Blimp").with_fuselage(
            Fuselage::new("Hull").with_xsecs(vec![
                FuselageXSec::new(Point3::origin(), 1.0),
                FuselageXSec::new(Point3::new(10.0, 0.0, 0.0), 1.0),
            ]),
        ));
        assert_eq!(airplane.s_ref(), None);
        assert_eq!(airplane.c_ref(), None);
        assert_eq!(airplane.b_ref(), None);
    }

    #[test]
    fn test_degenerate_primary_wing() {
        let stub = Wing::new("Stub").with_xsecs(vec![WingXSec::default()]);
        let airplane = Airplane::new(AirplaneDefinition::new("Stub").with_wing(stub));
        assert_eq!(airplane.c_ref(), None);
        assert_eq!(airplane.s_ref(), Some(0.0));
    }

    #[test]
    fn test_mutation_does_not_reresolve() {
        let mut airplane = Airplane::new(AirplaneDefinition::new("Mutable").with_wing(main_wing()));
        let s_ref = airplane.s_ref();
        airplane.wings_mut()[0].xsecs[1].chord = 3.0;
        assert_eq!(airplane.s_ref(), s_ref);
        assert!((airplane.wings()[0].xsecs[1].chord - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_default_airplane() {
        let airplane = Airplane::default();
        assert_eq!(airplane.name, "Untitled");
        assert_eq!(airplane.xyz_ref, Point3::origin());
        assert!(airplane.wings().is_empty());
        assert_eq!(airplane.to_string(), "Airplane 'Untitled' (0 wing(s), 0 fuselage(s))");
    }

    #[test]
    fn test_mesh_body_stacks_parts() {
        let airplane = Airplane::new(
            AirplaneDefinition::new("Meshed")
                .with_wing(main_wing())
                .with_fuselage(Fuselage::new("Body").with_xsecs(vec![
                    FuselageXSec::new(Point3::origin(), 0.2),
                    FuselageXSec::new(Point3::new(3.0, 0.0, 0.0), 0.2),
                ])),
        );
        let parts = airplane.meshes(MeshMethod::Tri);
        assert_eq!(parts.len(), 2);
        let total_points: usize = parts.iter().map(Mesh::point_count).sum();
        let total_faces: usize = parts.iter().map(Mesh::face_count).sum();

        let stacked = airplane.mesh_body(MeshMethod::Tri);
        assert_eq!(stacked.point_count(), total_points);
        assert_eq!(stacked.face_count(), total_faces);
    }

    #[test]
    fn test_to_definition_makes_references_explicit() {
        let airplane = Airplane::new(AirplaneDefinition::new("RoundTrip").with_wing(main_wing()));
        let definition = airplane.to_definition();
        assert_eq!(definition.s_ref, airplane.s_ref());
        assert_eq!(Airplane::new(definition), airplane);
    }
}
