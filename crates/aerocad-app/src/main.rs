//! AeroCAD 命令行入口
//!
//! 读取整机定义文件，输出派生量摘要，并按需写出 AVL / STL 文件。

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use aerocad_core::aero_center::DEFAULT_CHORD_FRACTION;
use aerocad_core::airplane::Airplane;
use aerocad_core::mesh::MeshMethod;
use aerocad_file::avl::{self, AvlOptions};
use aerocad_file::{definition, stl};

/// 读取整机定义，输出派生量并导出 AVL / STL 文件
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "aerocad", version)]
struct Args {
    /// 整机定义文件（JSON）
    definition: PathBuf,

    /// AVL 输出路径
    #[arg(long)]
    avl: Option<PathBuf>,

    /// 二进制 STL 输出路径
    #[arg(long)]
    stl: Option<PathBuf>,

    /// 弦向面元数
    #[arg(long, default_value_t = 12)]
    chordwise: usize,

    /// 展向面元数（每个翼面）
    #[arg(long, default_value_t = 12)]
    spanwise: usize,

    /// 机身面元数
    #[arg(long, default_value_t = 24)]
    fuselage: usize,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn avl_options(&self) -> AvlOptions {
        AvlOptions {
            chordwise_panels: self.chordwise,
            spanwise_panels: self.spanwise,
            fuselage_panels: self.fuselage,
        }
    }
}

/// 输出整机摘要
fn log_summary(airplane: &Airplane) {
    info!("{}", airplane);

    let show = |value: Option<f64>| value.map_or_else(|| "unset".to_string(), |v| format!("{:.4}", v));
    info!(
        "Sref = {}, Cref = {}, Bref = {}",
        show(airplane.s_ref()),
        show(airplane.c_ref()),
        show(airplane.b_ref())
    );
    info!(
        "Xref = ({:.4}, {:.4}, {:.4})",
        airplane.xyz_ref.x, airplane.xyz_ref.y, airplane.xyz_ref.z
    );

    match airplane.find_asymmetry() {
        None => info!("Symmetric about the XZ plane"),
        Some(reason) => info!("Not symmetric: {}", reason),
    }

    match airplane.aerodynamic_center(DEFAULT_CHORD_FRACTION) {
        Ok(ac) => info!("Aerodynamic center = ({:.4}, {:.4}, {:.4})", ac.x, ac.y, ac.z),
        Err(e) => warn!("Aerodynamic center unavailable: {}", e),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing::subscriber::set_global_default(FmtSubscriber::builder().with_max_level(level).finish())?;

    let airplane = definition::load(&args.definition)
        .with_context(|| format!("Failed to load {}", args.definition.display()))?;

    log_summary(&airplane);

    if let Some(path) = &args.avl {
        avl::write_avl(&airplane, &args.avl_options(), path)
            .with_context(|| format!("Failed to write AVL file {}", path.display()))?;
    }

    if let Some(path) = &args.stl {
        let mesh = airplane.mesh_body(MeshMethod::Tri);
        stl::write(&mesh, path).with_context(|| format!("Failed to write STL file {}", path.display()))?;
    }

    Ok(())
}
