//! 翼型坐标文件（`.dat`，Selig 格式）
//!
//! 第一行为翼型名称，其后每行 `x y`。

use crate::error::FileError;
use aerocad_core::airfoil::Airfoil;
use aerocad_core::math::Point2;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 解析 `.dat` 文本
///
/// 名称行之后的空行或无法解析的行会报告行号（从 1 开始）。
/// 文件末尾的空行被忽略。
pub fn parse(text: &str) -> Result<Airfoil, FileError> {
    let mut lines = text.lines().enumerate();

    let name = match lines.next() {
        Some((_, line)) if !line.trim().is_empty() => line.trim().to_string(),
        _ => return Err(FileError::InvalidFormat("missing airfoil name line".to_string())),
    };

    let body: Vec<(usize, &str)> = lines.collect();
    let last_content = body
        .iter()
        .rposition(|(_, line)| !line.trim().is_empty())
        .map_or(0, |i| i + 1);

    let mut coordinates = Vec::with_capacity(last_content);
    for &(index, line) in &body[..last_content] {
        coordinates.push(parse_row(line).ok_or_else(|| {
            FileError::InvalidFormat(format!("line {}: expected 'x y', got '{}'", index + 1, line))
        })?);
    }

    Ok(Airfoil::from_coordinates(name, coordinates)?)
}

fn parse_row(line: &str) -> Option<Point2> {
    let mut fields = line.split_whitespace();
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(Point2::new(x, y))
}

/// 读取 `.dat` 文件
pub fn read(path: &Path) -> Result<Airfoil, FileError> {
    let text = std::fs::read_to_string(path)?;
    let airfoil = parse(&text)?;

    tracing::info!(
        "Loaded airfoil '{}' ({} points) from {}",
        airfoil.name,
        airfoil.coordinates.len(),
        path.display()
    );

    Ok(airfoil)
}

/// 写入 `.dat` 文件（含名称行）
pub fn write(airfoil: &Airfoil, path: &Path) -> Result<(), FileError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(airfoil.to_dat_string(true).as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!(
        "Saved airfoil '{}' ({} points) to {}",
        airfoil.name,
        airfoil.coordinates.len(),
        path.display()
    );

    Ok(())
}
