// ==========================================
// UIGF 导出工具 - 命令行入口
// ==========================================
// 用法: uigf-export <FILE> [--uid UID] [--game genshin|starrail] [--lang zh|en] ...
// 红线: 每次调用只做一次导出尝试；任何具名错误都以非零码退出
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use uigf_export::config::ExportConfig;
use uigf_export::domain::Game;
use uigf_export::i18n::{self, t, t_with_args};
use uigf_export::importer::{
    extract_uid_from_filename, is_valid_uid, ExportError, ExportRequest, FileSchemaSource,
    HttpDictionarySource, HttpSchemaSource, SchemaSource, UigfExporter,
};
use uigf_export::logging;

/// 将抽卡记录电子表格导出为 UIGF v4.0 JSON
#[derive(Parser, Debug)]
#[command(name = "uigf-export", version, about = "Export gacha spreadsheets to UIGF v4.0 JSON")]
struct Cli {
    /// 源电子表格（.xlsx/.xlsm/.xls/.ods/.csv）。
    /// CSV 视为单张工作表，表名取文件名（不含扩展名），如 角色活动祈愿.csv；
    /// 表名不在映射表中时类别码为 500，可用 --sheet-name 指定
    file: PathBuf,

    /// 单表来源（CSV 或仅含一张表的工作簿）的工作表名，决定卡池类别码
    #[arg(long)]
    sheet_name: Option<String>,

    /// UID（默认从文件名 抽卡记录<UID>_... 中提取）
    #[arg(long)]
    uid: Option<String>,

    /// 游戏: genshin | starrail
    #[arg(long, default_value = "genshin")]
    game: Game,

    /// 界面语言: zh | en（同时决定导出的 lang 标签）
    #[arg(long, default_value = "zh")]
    lang: String,

    /// 字典语言代码（chs, cht, jp, en, ...）
    #[arg(long)]
    dict_lang: Option<String>,

    /// 时区偏移（小时）
    #[arg(long, allow_hyphen_values = true)]
    timezone: Option<i32>,

    /// 配置文件（TOML）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 本地 Schema 文件（默认下载）
    #[arg(long)]
    schema: Option<PathBuf>,

    /// 输出目录
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// 字典缓存目录
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// 以 JSON 行格式输出日志
    #[arg(long)]
    json_log: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.json_log {
        logging::init_json();
    } else {
        logging::init();
    }
    i18n::set_locale(i18n::locale_for_interface(&cli.lang));
    tracing::debug!("{} v{}", uigf_export::APP_NAME, uigf_export::VERSION);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ExportConfig::load_or_default(cli.config.as_deref())?;

    // 命令行参数优先于配置文件
    if let Some(timezone) = cli.timezone {
        config.timezone = timezone;
    }
    if let Some(dict_lang) = cli.dict_lang {
        config.dict_locale = dict_lang;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(cache_dir) = cli.cache_dir {
        config.cache_dir = Some(cache_dir);
    }

    let lang = config.locales.uigf_lang(&cli.lang)?.to_string();
    let dict_locale = config
        .locales
        .check_dict_locale(&config.dict_locale)?
        .to_string();

    if !cli.file.exists() {
        bail!(t_with_args(
            "import.file_not_found",
            &[("path", &cli.file.display().to_string())]
        ));
    }

    let uid = cli
        .uid
        .or_else(|| extract_uid_from_filename(&cli.file))
        .ok_or_else(|| anyhow!(t("import.uid_not_found")))?;
    if !is_valid_uid(&uid) {
        bail!(t_with_args("import.invalid_uid", &[("uid", &uid)]));
    }

    let timeout = Duration::from_secs(config.http_timeout_secs);
    let schema = match &cli.schema {
        Some(path) => FileSchemaSource::new(path).load(),
        None => HttpSchemaSource::new(&config.schema_url, timeout).load(),
    }
    .map_err(ExportError::from)?;

    let source = HttpDictionarySource::new(&config.dict_url_template, timeout)
        .context("无法创建 HTTP 客户端")?;
    let exporter = UigfExporter::new(&config, source);

    let request = ExportRequest {
        source_path: cli.file,
        uid,
        game: cli.game,
        dict_locale,
        lang,
        timezone: config.timezone,
        sheet_label: cli.sheet_name,
    };
    let outcome = exporter.export(&request, &schema)?;

    if let Some(path) = &outcome.output_path {
        println!(
            "{}",
            t_with_args("export.exported", &[("path", &path.display().to_string())])
        );
    }
    println!(
        "{}",
        t_with_args(
            "export.summary",
            &[
                ("total", &outcome.report.total_rows.to_string()),
                ("exported", &outcome.report.exported_rows.to_string()),
                ("dropped", &outcome.report.dropped.len().to_string()),
            ]
        )
    );

    Ok(())
}
