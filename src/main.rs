// ==========================================
// 房地产估价引擎 - 命令行入口
// ==========================================
// 用法:
//   property-valuation [params.json|-]         完整估价报告
//   property-valuation compare [params.json|-] 四种方法对比
//   property-valuation validate [params.json|-] 仅校验参数
//   property-valuation batch <file.csv|file.json>
//   任意位置加 --auto-fix 启用自动修复校验模式
// ==========================================
// 结果以 JSON 输出到 stdout，日志输出到 stderr
// ==========================================

use anyhow::{Context, Result};
use property_valuation::i18n::{t, t_with_args};
use property_valuation::{logging, PropertyParams, ValidationMode, ValuationApi};
use serde::Serialize;
use std::io::Read;

fn main() -> Result<()> {
    logging::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let auto_fix = take_flag(&mut args, "--auto-fix");
    if take_flag(&mut args, "--help") || take_flag(&mut args, "-h") {
        println!("{}", t("cli.usage"));
        return Ok(());
    }

    tracing::info!(
        version = property_valuation::VERSION,
        "{} 启动",
        property_valuation::APP_NAME
    );

    let mode = if auto_fix {
        ValidationMode::AutoFix
    } else {
        ValidationMode::Strict
    };
    let api = ValuationApi::load(mode).context("加载估价配置失败")?;

    let mut args = args.into_iter();
    match args.next().as_deref() {
        Some("batch") => {
            let path = args.next().context(t("cli.usage"))?;
            let results = api.batch_from_file(&path)?;

            let failed = results.iter().filter(|r| !r.success).count();
            eprintln!(
                "{}",
                t_with_args(
                    "cli.batch_summary",
                    &[
                        ("total", &results.len().to_string()),
                        ("failed", &failed.to_string())
                    ],
                )
            );
            print_json(&results)
        }
        Some("compare") => {
            let params = read_params(args.next().as_deref())?;
            print_json(&api.compare_methods(&params)?)
        }
        Some("validate") => {
            let params = read_params(args.next().as_deref())?;
            print_json(&api.validate(&params))
        }
        source => {
            let params = read_params(source)?;
            print_json(&api.perform_valuation(&params)?)
        }
    }
}

fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    let before = args.len();
    args.retain(|a| a != flag);
    args.len() != before
}

/// 读取单个估价参数（无参数或 "-" 时读 stdin）
fn read_params(source: Option<&str>) -> Result<PropertyParams> {
    let raw = match source {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("读取标准输入失败")?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("读取参数文件失败: {}", path))?,
    };

    serde_json::from_str(&raw).context("估价参数 JSON 格式错误")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
