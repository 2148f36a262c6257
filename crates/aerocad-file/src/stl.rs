//! 二进制 STL 导出
//!
//! 文件布局：
//! - 80 字节文件头
//! - `u32` 小端三角形数量
//! - 每个三角形 50 字节：法向（3 × `f32`）、三个顶点（9 × `f32`）、`u16` 属性字节数（0）
//!
//! 四边形面拆分为两个三角形。

use crate::error::FileError;
use aerocad_core::math::{Point3, Vector3};
use aerocad_core::mesh::Mesh;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADER: &[u8] = b"AeroCAD binary STL";
const HEADER_LEN: usize = 80;
const TRIANGLE_LEN: usize = 50;

/// 网格转换为二进制 STL
pub fn to_stl_bytes(mesh: &Mesh) -> Vec<u8> {
    let triangles: Vec<[usize; 3]> = mesh.triangles().collect();
    let mut buf = Vec::with_capacity(HEADER_LEN + 4 + triangles.len() * TRIANGLE_LEN);

    buf.extend_from_slice(HEADER);
    buf.resize(HEADER_LEN, 0);
    buf.extend_from_slice(&(triangles.len() as u32).to_le_bytes());

    for [a, b, c] in triangles {
        let vertices = [mesh.points[a], mesh.points[b], mesh.points[c]];
        let normal = face_normal(&vertices);

        for component in normal.iter() {
            buf.extend_from_slice(&(*component as f32).to_le_bytes());
        }
        for vertex in &vertices {
            for component in vertex.coords.iter() {
                buf.extend_from_slice(&(*component as f32).to_le_bytes());
            }
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    buf
}

/// 三角形单位法向，退化三角形返回零向量
fn face_normal([v0, v1, v2]: &[Point3; 3]) -> Vector3 {
    (v1 - v0)
        .cross(&(v2 - v0))
        .try_normalize(1e-12)
        .unwrap_or_else(Vector3::zeros)
}

/// 写入 STL 文件
pub fn write(mesh: &Mesh, path: &Path) -> Result<(), FileError> {
    let bytes = to_stl_bytes(mesh);

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes)?;
    writer.flush()?;

    tracing::info!(
        "Saved {} triangles to {} ({} bytes)",
        (bytes.len() - HEADER_LEN - 4) / TRIANGLE_LEN,
        path.display(),
        bytes.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerocad_core::mesh::{Face, MeshMethod};

    fn read_f32(bytes: &[u8], offset: usize) -> f32 {
        f32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
    }

    #[test]
    fn test_empty_mesh() {
        let stl = to_stl_bytes(&Mesh::default());
        assert_eq!(stl.len(), 84);
        assert!(stl.starts_with(HEADER));
        assert_eq!(u32::from_le_bytes([stl[80], stl[81], stl[82], stl[83]]), 0);
    }

    #[test]
    fn test_single_triangle() {
        let mesh = Mesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![Face::Tri([0, 1, 2])],
        );
        let stl = to_stl_bytes(&mesh);
        assert_eq!(stl.len(), 134);
        assert!((read_f32(&stl, 92) - 1.0).abs() < 1e-6);
        // 第二个顶点的 x
        assert!((read_f32(&stl, 84 + 12 + 12) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_quads_split() {
        let mut mesh = Mesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            Vec::new(),
        );
        mesh.add_quad(MeshMethod::Quad, [0, 1, 2, 3]);
        let stl = to_stl_bytes(&mesh);
        assert_eq!(stl.len(), 84 + 2 * 50);
        assert_eq!(u32::from_le_bytes([stl[80], stl[81], stl[82], stl[83]]), 2);
    }

    #[test]
    fn test_write_file() {
        let file_path = std::env::temp_dir().join("aerocad_test_mesh.stl");
        let mesh = Mesh::new(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 0.0, 1.0)],
            vec![Face::Tri([0, 1, 2])],
        );
        write(&mesh, &file_path).expect("Failed to write");
        let bytes = std::fs::read(&file_path).expect("Failed to read back");
        assert_eq!(bytes.len(), 134);
        std::fs::remove_file(&file_path).ok();
    }
}
