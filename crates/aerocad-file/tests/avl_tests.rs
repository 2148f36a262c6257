//! AVL 导出端到端测试：整机 → `.avl` + 机身轮廓文件

use aerocad_core::prelude::*;
use aerocad_file::avl::{self, AvlOptions};
use aerocad_file::FileError;
use std::path::{Path, PathBuf};

fn vanilla() -> Airplane {
    let wing = Wing::new("Wing")
        .with_symmetric(true)
        .with_xyz_le(Point3::new(0.25, 0.0, 0.0))
        .with_xsecs(vec![
            WingXSec::new(Point3::origin(), 0.25),
            WingXSec::new(Point3::new(0.02, 0.5, 0.04), 0.125)
                .with_airfoil(Airfoil::naca4("naca4412", 80).unwrap()),
        ]);
    let stabilizer = Wing::new("Horizontal Stabilizer")
        .with_symmetric(true)
        .with_xyz_le(Point3::new(0.75, 0.0, 0.0))
        .with_xsecs(vec![
            WingXSec::new(Point3::origin(), 0.1).with_twist(-3.0),
            WingXSec::new(Point3::new(0.02, 0.17, 0.0), 0.08).with_twist(-3.0),
        ]);
    let fuselage = Fuselage::new("Fuselage").with_xsecs(
        [0.0, 0.25, 0.5, 0.75, 1.0]
            .iter()
            .map(|&x| FuselageXSec::new(Point3::new(x, 0.0, 0.0), 0.05 * (1.0 - (2.0 * x - 1.0).powi(2)).sqrt()))
            .collect(),
    );

    Airplane::new(
        AirplaneDefinition::new("Vanilla")
            .with_xyz_ref(Point3::new(0.3, 0.0, 0.0))
            .with_wing(wing)
            .with_wing(stabilizer)
            .with_fuselage(fuselage.clone())
            .with_fuselage(fuselage.with_xyz_le(Point3::new(0.0, 0.0, -0.1))),
    )
}

/// 测试输出目录，每个测试独立
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("aerocad_avl_{}_{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).expect("Failed to create scratch dir");
    dir
}

/// 取出 `#label` 行之后的一行数值
fn values_after(text: &str, label: &str) -> Vec<f64> {
    let mut lines = text.lines();
    lines
        .by_ref()
        .find(|line| line.starts_with(label))
        .expect("label not found");
    lines
        .next()
        .expect("no value line")
        .split_whitespace()
        .map(|v| v.parse().expect("not a number"))
        .collect()
}

#[test]
fn test_write_avl_with_bodies() {
    let dir = scratch_dir("bodies");
    let destination = dir.join("vanilla.avl");
    let airplane = vanilla();

    let text = avl::write_avl(&airplane, &AvlOptions::default(), &destination).expect("Failed to write");

    // 主文件内容与返回值一致
    let on_disk = std::fs::read_to_string(&destination).expect("Failed to read back");
    assert_eq!(on_disk, text);

    // 每个机身一个轮廓文件
    for i in 0..2 {
        let profile_path = PathBuf::from(format!("{}.fuse{}", destination.display(), i));
        let profile = std::fs::read_to_string(&profile_path).expect("missing body profile");
        assert!(profile.starts_with("Fuselage\n"));
        // 名称行 + 5 个上轮廓点 + 4 个下轮廓点
        assert_eq!(profile.lines().count(), 10);
        assert!(text.contains(&format!("BFIL\n{}\n", profile_path.display())));
    }
    assert!(!Path::new(&format!("{}.fuse2", destination.display())).exists());

    assert_eq!(text.matches("\nSURFACE\n").count(), 2);
    assert_eq!(text.matches("\nBODY\n").count(), 2);
    assert!(text.find("\nWing\n").unwrap() < text.find("\nHorizontal Stabilizer\n").unwrap());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_header_reparses_exactly() {
    let airplane = vanilla();
    let text = avl::to_avl_string(&airplane, &AvlOptions::default()).unwrap();

    assert_eq!(text.lines().next(), Some("Vanilla"));
    assert_eq!(
        values_after(&text, "#Sref"),
        vec![
            airplane.s_ref().unwrap(),
            airplane.c_ref().unwrap(),
            airplane.b_ref().unwrap()
        ]
    );
    assert_eq!(values_after(&text, "#Xref"), vec![0.3, 0.0, 0.0]);
    assert_eq!(values_after(&text, "#IYsym"), vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_claf_and_panels() {
    let options = AvlOptions {
        chordwise_panels: 8,
        spanwise_panels: 20,
        fuselage_panels: 30,
    };
    let text = avl::to_avl_string(&vanilla(), &options).unwrap();

    assert_eq!(values_after(&text, "#Nchordwise"), vec![8.0, 1.0, 20.0, 1.0]);
    assert!(text.contains("\n30 1\n"));

    let claf = values_after(&text, "CLAF");
    let expected = 1.0 + 0.77 * Airfoil::default().max_thickness();
    assert!((claf[0] - expected).abs() < 1e-12);
    assert!((claf[0] - 1.0924).abs() < 1e-3);
}

#[test]
fn test_string_mode_writes_nothing() {
    let airplane = vanilla();
    let text = avl::to_avl_string(&airplane, &AvlOptions::default()).unwrap();
    assert!(text.contains("BFIL\nVanilla.avl.fuse0\n"));
    assert!(!Path::new("Vanilla.avl.fuse0").exists());
}

#[test]
fn test_invalid_destination() {
    let result = avl::write_avl(&vanilla(), &AvlOptions::default(), Path::new("/"));
    assert!(matches!(result, Err(FileError::InvalidPath(_))));
}

#[test]
fn test_multiline_name_writes_nothing() {
    let dir = scratch_dir("bad_name");
    let destination = dir.join("bad.avl");
    let mut airplane = vanilla();
    airplane.name = "Vanilla\r\nDraft".to_string();

    let result = avl::write_avl(&airplane, &AvlOptions::default(), &destination);
    assert!(matches!(result, Err(FileError::InvalidName(..))));
    assert!(!destination.exists());
    assert!(!Path::new(&format!("{}.fuse0", destination.display())).exists());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_stl_of_airplane_mesh() {
    let dir = scratch_dir("stl");
    let destination = dir.join("vanilla.stl");
    let mesh = vanilla().mesh_body(MeshMethod::Quad);

    aerocad_file::stl::write(&mesh, &destination).expect("Failed to write STL");
    let bytes = std::fs::read(&destination).expect("Failed to read back");
    assert_eq!(bytes.len(), 84 + 50 * mesh.triangles().count());

    std::fs::remove_dir_all(&dir).ok();
}
