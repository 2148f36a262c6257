//! AVL 输入文件（`.avl`）导出
//!
//! 先由整机构建有序的 [`AvlSection`] 记录，再一次性渲染为文本。
//! 每个块渲染后逐行去除首尾空白（见 [`clean_block`]）。
//!
//! 机身轮廓不内嵌在主文件中，而是写入 `<目标路径>.fuse<i>` 并由 `BFIL` 引用。
//!
//! 数值使用 `f64` 的 `Display` 输出（最短可往返表示），重新解析可得到原值。

use crate::error::FileError;
use aerocad_core::airplane::Airplane;
use aerocad_core::fuselage::Fuselage;
use aerocad_core::math::Point3;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// 翼型重新布点时每侧的点数
pub const AIRFOIL_POINTS_PER_SIDE: usize = 50;

/// 分隔线长度
const RULE_WIDTH: usize = 50;

/// 导出选项（面元数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvlOptions {
    /// 弦向面元数
    pub chordwise_panels: usize,
    /// 展向面元数（每个翼面）
    pub spanwise_panels: usize,
    /// 机身面元数
    pub fuselage_panels: usize,
}

impl Default for AvlOptions {
    fn default() -> Self {
        Self {
            chordwise_panels: 12,
            spanwise_panels: 12,
            fuselage_panels: 24,
        }
    }
}

impl AvlOptions {
    /// 检查面元数均为正
    pub fn validate(&self) -> Result<(), FileError> {
        let counts = [
            ("chordwise_panels", self.chordwise_panels),
            ("spanwise_panels", self.spanwise_panels),
            ("fuselage_panels", self.fuselage_panels),
        ];
        match counts.iter().find(|(_, n)| *n == 0) {
            Some((field, _)) => Err(FileError::InvalidOptions(format!("{} must be positive", field))),
            None => Ok(()),
        }
    }
}

/// AVL 文件中的一个块
#[derive(Debug, Clone, PartialEq)]
pub enum AvlSection {
    /// 文件头：名称、马赫数、对称标志、参考量、力矩参考点、CDp
    Header {
        name: String,
        s_ref: f64,
        c_ref: f64,
        b_ref: f64,
        xyz_ref: Point3,
    },
    /// 升力面
    Surface {
        name: String,
        chordwise_panels: usize,
        spanwise_panels: usize,
        symmetric: bool,
        xyz_le: Point3,
    },
    /// 翼面截面
    Section {
        xyz_le: Point3,
        chord: f64,
        twist: f64,
        /// 不含名称行的翼型坐标
        airfoil: String,
        claf: f64,
    },
    /// 机身
    Body {
        name: String,
        panels: usize,
        xyz_le: Point3,
        profile_path: PathBuf,
    },
}

/// 按行缓存的文本块
struct BlockWriter {
    lines: Vec<String>,
}

impl BlockWriter {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn line(&mut self, value: impl Display) -> &mut Self {
        self.lines.push(value.to_string());
        self
    }

    fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    fn rule(&mut self, fill: char) -> &mut Self {
        let rule: String = std::iter::once('#')
            .chain(std::iter::repeat(fill).take(RULE_WIDTH))
            .collect();
        self.lines.push(rule);
        self
    }

    fn point(&mut self, p: &Point3) -> &mut Self {
        self.line(format!("{} {} {}", p.x, p.y, p.z))
    }

    fn finish(&mut self) -> String {
        let mut block = self.lines.join("\n");
        block.push('\n');
        block
    }
}

impl AvlSection {
    /// 渲染为文本块（已逐行去除首尾空白）
    pub fn render(&self) -> String {
        let mut w = BlockWriter::new();
        match self {
            AvlSection::Header {
                name,
                s_ref,
                c_ref,
                b_ref,
                xyz_ref,
            } => {
                w.line(name)
                    .line("#Mach")
                    .line(0)
                    .line("#IYsym   IZsym   Zsym")
                    .line(" 0       0       0.0")
                    .line("#Sref    Cref    Bref")
                    .line(format!("{} {} {}", s_ref, c_ref, b_ref))
                    .line("#Xref    Yref    Zref")
                    .point(xyz_ref)
                    .line("# CDp")
                    .line(0);
            }
            AvlSection::Surface {
                name,
                chordwise_panels,
                spanwise_panels,
                symmetric,
                xyz_le,
            } => {
                w.rule('=')
                    .line("SURFACE")
                    .line(name)
                    .line("#Nchordwise  Cspace   Nspanwise   Sspace")
                    .line(format!("{}   1.0   {}   1.0", chordwise_panels, spanwise_panels))
                    .line("#");
                if *symmetric {
                    w.line("YDUPLICATE").line(0);
                } else {
                    w.blank();
                }
                w.line("#")
                    .line("TRANSLATE")
                    .point(xyz_le)
                    .line("ANGLE")
                    .line(0);
            }
            AvlSection::Section {
                xyz_le,
                chord,
                twist,
                airfoil,
                claf,
            } => {
                w.rule('-')
                    .line("SECTION")
                    .line("#Xle    Yle    Zle     Chord   Ainc")
                    .line(format!("{} {} {} {} {}", xyz_le.x, xyz_le.y, xyz_le.z, chord, twist))
                    .blank()
                    .line("AIRFOIL")
                    .line(airfoil)
                    .blank()
                    .line("#Cname   Cgain  Xhinge  HingeVec     SgnDup")
                    .line("#CONTROL")
                    .line("#csurf     1.0   0.75    0.0 0.0 0.0   1.0")
                    .blank()
                    .line("CLAF")
                    .line(claf);
            }
            AvlSection::Body {
                name,
                panels,
                xyz_le,
                profile_path,
            } => {
                w.rule('=')
                    .line("BODY")
                    .line(name)
                    .line(format!("{} 1", panels))
                    .blank()
                    .line("TRANSLATE")
                    .point(xyz_le)
                    .blank()
                    .line("BFIL")
                    .line(profile_path.display())
                    .blank();
            }
        }
        clean_block(&w.finish())
    }
}

/// AVL 文档
#[derive(Debug, Clone, PartialEq)]
pub struct AvlDocument {
    sections: Vec<AvlSection>,
}

impl AvlDocument {
    /// 由整机构建文档
    ///
    /// `destination` 用于确定机身轮廓文件路径，本函数不写文件。
    pub fn from_airplane(
        airplane: &Airplane,
        options: &AvlOptions,
        destination: &Path,
    ) -> Result<Self, FileError> {
        options.validate()?;

        let mut sections = vec![AvlSection::Header {
            name: record_name(&airplane.name)?,
            s_ref: airplane.s_ref().ok_or(FileError::MissingReference("Sref"))?,
            c_ref: airplane.c_ref().ok_or(FileError::MissingReference("Cref"))?,
            b_ref: airplane.b_ref().ok_or(FileError::MissingReference("Bref"))?,
            xyz_ref: airplane.xyz_ref,
        }];

        for wing in airplane.wings() {
            sections.push(AvlSection::Surface {
                name: record_name(&wing.name)?,
                chordwise_panels: options.chordwise_panels,
                spanwise_panels: options.spanwise_panels,
                symmetric: wing.symmetric,
                xyz_le: wing.xyz_le,
            });
            for xsec in &wing.xsecs {
                sections.push(AvlSection::Section {
                    xyz_le: xsec.xyz_le,
                    chord: xsec.chord,
                    twist: xsec.twist,
                    airfoil: xsec
                        .airfoil
                        .repanel(AIRFOIL_POINTS_PER_SIDE)
                        .to_dat_string(false),
                    claf: camber_correction_factor(xsec.airfoil.max_thickness()),
                });
            }
        }

        for (i, fuselage) in airplane.fuselages().iter().enumerate() {
            sections.push(AvlSection::Body {
                name: record_name(&fuselage.name)?,
                panels: options.fuselage_panels,
                xyz_le: fuselage.xyz_le,
                profile_path: body_profile_path(destination, i)?,
            });
        }

        Ok(Self { sections })
    }

    pub fn sections(&self) -> &[AvlSection] {
        &self.sections
    }

    /// 渲染整个文档
    pub fn render(&self) -> String {
        self.sections.iter().map(AvlSection::render).collect()
    }
}

/// 检查名称能原样写成一行：非空、无控制字符、无首尾空白
fn record_name(name: &str) -> Result<String, FileError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.chars().any(char::is_control) {
        "contains a line break or control character"
    } else if name.trim() != name {
        "has leading or trailing whitespace"
    } else {
        return Ok(name.to_string());
    };
    Err(FileError::InvalidName(name.to_string(), reason))
}

/// 逐行去除首尾空白
pub fn clean_block(block: &str) -> String {
    block
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

/// AVL 的 CLAF 修正系数：`1 + 0.77·t/c`
pub fn camber_correction_factor(max_thickness: f64) -> f64 {
    1.0 + 0.77 * max_thickness
}

/// 第 `index` 个机身的轮廓文件路径：`<destination>.fuse<index>`
pub fn body_profile_path(destination: &Path, index: usize) -> Result<PathBuf, FileError> {
    if destination.file_name().is_none() {
        return Err(FileError::InvalidPath(format!(
            "'{}' has no file name",
            destination.display()
        )));
    }
    let mut path = OsString::from(destination.as_os_str());
    path.push(format!(".fuse{}", index));
    Ok(PathBuf::from(path))
}

/// 不写文件时使用的名义路径：由整机名称生成
fn nominal_destination(airplane: &Airplane) -> PathBuf {
    let stem: String = airplane
        .name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    PathBuf::from(format!("{}.avl", stem))
}

/// 生成 AVL 文本但不写任何文件
///
/// `BFIL` 路径基于名义文件名 `<整机名称>.avl`。
pub fn to_avl_string(airplane: &Airplane, options: &AvlOptions) -> Result<String, FileError> {
    let document = AvlDocument::from_airplane(airplane, options, &nominal_destination(airplane))?;
    Ok(document.render())
}

/// 写出机身轮廓文件（含名称行），返回写入的文本
pub fn write_body_profile(fuselage: &Fuselage, path: &Path) -> Result<String, FileError> {
    let contents = fuselage.avl_profile(true);

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents.as_bytes())?;
    writer.flush()?;

    tracing::info!(
        "Saved body profile '{}' ({} xsecs) to {}",
        fuselage.name,
        fuselage.xsecs.len(),
        path.display()
    );

    Ok(contents)
}

/// 写出 AVL 文件及各机身轮廓文件，返回主文件文本
///
/// 先写轮廓文件，再写主文件；已存在的文件会被覆盖。
pub fn write_avl(
    airplane: &Airplane,
    options: &AvlOptions,
    destination: &Path,
) -> Result<String, FileError> {
    let document = AvlDocument::from_airplane(airplane, options, destination)?;

    for (i, fuselage) in airplane.fuselages().iter().enumerate() {
        write_body_profile(fuselage, &body_profile_path(destination, i)?)?;
    }

    let contents = document.render();
    let file = File::create(destination)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents.as_bytes())?;
    writer.flush()?;

    tracing::info!(
        "Saved AVL file for '{}' ({} wings, {} fuselages) to {} ({} bytes)",
        airplane.name,
        airplane.wings().len(),
        airplane.fuselages().len(),
        destination.display(),
        contents.len()
    );

    Ok(contents)
}
