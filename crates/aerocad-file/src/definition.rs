//! 整机定义文件（`.json`）
//!
//! 文件内容为 [`AirplaneDefinition`] 的 JSON 序列化。加载时构造 [`Airplane`]，
//! 未显式给出的参考量由主翼推导。

use crate::error::FileError;
use aerocad_core::airplane::{Airplane, AirplaneDefinition};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// 保存整机到文件
///
/// 已解析的参考量以显式值写出，重新加载得到相同的整机。
pub fn save(airplane: &Airplane, path: &Path) -> Result<(), FileError> {
    save_definition(&airplane.to_definition(), path)?;

    tracing::info!(
        "Saved airplane '{}' ({} wings, {} fuselages) to {}",
        airplane.name,
        airplane.wings().len(),
        airplane.fuselages().len(),
        path.display()
    );

    Ok(())
}

/// 保存整机定义到文件
pub fn save_definition(definition: &AirplaneDefinition, path: &Path) -> Result<(), FileError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, definition)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// 读取整机定义
pub fn load_definition(path: &Path) -> Result<AirplaneDefinition, FileError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// 从文件加载整机
pub fn load(path: &Path) -> Result<Airplane, FileError> {
    let airplane = Airplane::new(load_definition(path)?);

    tracing::info!(
        "Loaded airplane '{}' ({} wings, {} fuselages) from {}",
        airplane.name,
        airplane.wings().len(),
        airplane.fuselages().len(),
        path.display()
    );

    Ok(airplane)
}
