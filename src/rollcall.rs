use log::{debug, info, warn};

use roster_core::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::rollcall::config_reader::*;
use crate::rollcall::io_common::*;
use crate::rollcall::io_export::*;

pub mod config_reader;
pub mod io_common;
pub mod io_docx;
pub mod io_export;
pub mod io_xlsx;
pub mod shell;

const DEFAULT_SESSION_NAME: &str = "點名";

#[derive(Debug, Snafu)]
pub enum RollcallError {
    #[snafu(display("請上傳有效的 Word (.docx) 或 Excel (.xlsx) 文件！ ({path})"))]
    UnsupportedFileType { path: String },
    #[snafu(display("無法讀取檔案！ ({path})"))]
    ReadingInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("無法解析 Word 文件！ ({path})"))]
    ParsingWordArchive {
        source: zip::result::ZipError,
        path: String,
    },
    #[snafu(display("無法解析 Word 文件！ ({path})"))]
    ReadingWordPart {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("無法解析 Word 文件！ ({path})"))]
    ParsingWordXml {
        source: quick_xml::Error,
        path: String,
    },
    #[snafu(display("無法解析 Excel 文件！ ({path})"))]
    ParsingExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("無法解析 Excel 文件！ ({path}: 沒有工作表)"))]
    EmptyExcel { path: String },
    #[snafu(display("無法開啟 JSON 檔案！ ({path})"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("無法解析 JSON 檔案！"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("無法寫入點名結果！ ({path})"))]
    WritingXlsx {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(display("無法寫入點名結果！ ({path})"))]
    WritingCsv { source: csv::Error, path: String },
    #[snafu(display("無法建立資料夾！ ({path})"))]
    CreatingDirectory {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("無法寫出結果！"))]
    WritingOutput { source: std::io::Error },
    #[snafu(display("{source}"))]
    Roster { source: RosterErrors },
    #[snafu(display("點名統計與參考檔不一致！"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

type RollcallResult<T> = Result<T, RollcallError>;

/// Where the result sheet goes.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum OutputTarget {
    Stdout,
    Directory(PathBuf),
}

impl OutputTarget {
    pub fn parse(s: &str) -> OutputTarget {
        match s {
            "stdout" => OutputTarget::Stdout,
            dir => OutputTarget::Directory(PathBuf::from(dir)),
        }
    }
}

/// Everything needed to run a session, after merging the configuration file
/// and the command line.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SessionPlan {
    pub session_name: String,
    pub documents: Vec<String>,
    pub raw_names: Vec<String>,
    pub marks: Vec<StatusMark>,
    pub target: Option<OutputTarget>,
    pub format: OutputFormat,
    pub reference: Option<String>,
    pub interactive: bool,
}

impl SessionPlan {
    /// The command line wins over the configuration file. Documents and names of
    /// both are kept, the ones from the configuration first.
    pub fn new(config: Option<(SessionConfig, PathBuf)>, args: &Args) -> RollcallResult<SessionPlan> {
        let mut plan = SessionPlan {
            session_name: DEFAULT_SESSION_NAME.to_string(),
            documents: Vec::new(),
            raw_names: Vec::new(),
            marks: Vec::new(),
            target: None,
            format: OutputFormat::Xlsx,
            reference: args.reference.clone(),
            interactive: args.interactive,
        };
        if let Some((config, root)) = config {
            plan.session_name = config.output_settings.session_name.clone();
            for source in config.sources.iter() {
                plan.documents.push(resolve_path(&root, &source.file_path));
            }
            plan.raw_names.extend(config.names.clone());
            plan.marks = config.marks.clone();
            plan.target = config
                .output_settings
                .output_directory
                .as_ref()
                .map(|d| OutputTarget::Directory(PathBuf::from(resolve_path(&root, d))));
            if let Some(f) = config.output_settings.output_format.as_ref() {
                plan.format = f.parse()?;
            }
        }
        plan.documents.extend(args.input.iter().cloned());
        plan.raw_names.extend(args.names.clone());
        if let Some(out) = args.out.as_ref() {
            plan.target = Some(OutputTarget::parse(out));
        }
        if let Some(f) = args.format.as_ref() {
            plan.format = f.parse()?;
        }
        Ok(plan)
    }
}

fn resolve_path(root: &Path, p: &str) -> String {
    let pb: PathBuf = [root, Path::new(p)].iter().collect();
    pb.display().to_string()
}

/// Imports one document. The roster is only touched once the document has
/// been fully read, so a failure leaves it as it was.
pub fn import_document(roster: &mut Roster, path: &str) -> RollcallResult<usize> {
    info!("Attempting to read names from {:?}", path);
    let text = read_document(path)?;
    let added = roster.import_text(&text);
    info!(
        "import_document: {}: {} new names",
        simplify_file_name(path),
        added
    );
    Ok(added)
}

/// Applies the statuses to every entry with the given name.
pub fn apply_marks(roster: &mut Roster, marks: &[StatusMark]) -> RollcallResult<()> {
    for mark in marks {
        let status = mark.status()?;
        let entries = roster.find(&mark.name);
        if entries.is_empty() {
            warn!("apply_marks: {:?} is not on the roster, skipping", mark.name);
        }
        for entry in entries {
            roster.set_status(entry, status).context(RosterSnafu {})?;
        }
    }
    Ok(())
}

pub fn build_summary_js(session_name: &str, roster: &Roster) -> JSValue {
    let stats = roster.stats();
    let entries: Vec<JSValue> = roster
        .snapshot()
        .iter()
        .map(|e| json!({"name": e.name(), "status": e.status().code()}))
        .collect();
    json!({
        "config": { "session": session_name },
        "stats": {
            "present": stats.present_count,
            "absent": stats.absent_count,
            "leave": stats.leave_count,
            "total": stats.total_count,
            "attendanceRate": stats.attendance_rate_percent,
        },
        "roster": entries,
    })
}

/// Writes the result sheet. Returns the path of the written file, if any.
pub fn write_export<W: Write>(
    table: &ExportTable,
    target: &OutputTarget,
    format: OutputFormat,
    out: &mut W,
) -> RollcallResult<Option<PathBuf>> {
    match target {
        OutputTarget::Stdout => {
            for row in table.rows() {
                writeln!(out, "{}", row.join("\t")).context(WritingOutputSnafu {})?;
            }
            Ok(None)
        }
        OutputTarget::Directory(dir) => {
            fs::create_dir_all(dir).context(CreatingDirectorySnafu {
                path: dir.display().to_string(),
            })?;
            let writer = format.writer();
            let p = dir.join(writer.file_name());
            writer.write_table(table, &p)?;
            info!("write_export: wrote {:?}", p);
            Ok(Some(p))
        }
    }
}

fn check_reference(summary_path: &str, pretty_js_stats: &str) -> RollcallResult<()> {
    let summary_ref = read_summary(summary_path)?;
    debug!("summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return ReferenceMismatchSnafu {}.fail();
    }
    Ok(())
}

pub fn run_session(args: &Args) -> RollcallResult<()> {
    let config = match args.config.as_ref() {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let root = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            Some((config, root))
        }
        None => None,
    };
    let plan = SessionPlan::new(config, args)?;
    debug!("run_session: plan: {:?}", plan);

    let mut roster = Roster::new().context(RosterSnafu {})?;
    for doc in plan.documents.iter() {
        import_document(&mut roster, doc)?;
    }
    for raw in plan.raw_names.iter() {
        roster.import_text(raw);
    }
    apply_marks(&mut roster, &plan.marks)?;

    if plan.interactive {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let settings = shell::ShellSettings {
            target: plan.target.clone(),
            format: plan.format,
        };
        shell::run_shell(&mut roster, stdin.lock(), stdout.lock(), &settings)?;
    }

    let summary_js = build_summary_js(&plan.session_name, &roster);
    let pretty_js_stats = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
    println!("{}", pretty_js_stats);

    if let Some(reference) = plan.reference.as_ref() {
        check_reference(reference, &pretty_js_stats)?;
    }

    if let Some(target) = plan.target.as_ref() {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        write_export(&roster.export(), target, plan.format, &mut handle)?;
    } else {
        debug!("run_session: no output requested");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn test_dir(name: &str) -> PathBuf {
        let p = std::env::temp_dir().join(format!("rollcall-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&p);
        fs::create_dir_all(&p).unwrap();
        p
    }

    #[test]
    fn plan_merges_config_and_args() {
        let config: SessionConfig = serde_json::from_str(
            r#"{
                "outputSettings": {"sessionName": "一年甲班", "outputDirectory": "out"},
                "sources": [{"filePath": "students.xlsx"}],
                "names": "王五",
                "marks": [{"name": "王五", "status": "present"}]
            }"#,
        )
        .unwrap();
        let args = Args::parse_from([
            "rollcall",
            "--input",
            "late.docx",
            "--names",
            "李四",
            "--format",
            "csv",
        ]);
        let plan = SessionPlan::new(Some((config, PathBuf::from("data"))), &args).unwrap();
        assert_eq!(plan.session_name, "一年甲班");
        assert_eq!(
            plan.documents,
            vec![resolve_path(Path::new("data"), "students.xlsx"), "late.docx".to_string()]
        );
        assert_eq!(plan.raw_names, vec!["王五".to_string(), "李四".to_string()]);
        assert_eq!(
            plan.target,
            Some(OutputTarget::Directory(PathBuf::from(resolve_path(
                Path::new("data"),
                "out"
            ))))
        );
        assert_eq!(plan.format, OutputFormat::Csv);
        assert_eq!(plan.marks.len(), 1);
    }

    #[test]
    fn out_flag_overrides_config() {
        let args = Args::parse_from(["rollcall", "--out", "stdout"]);
        let plan = SessionPlan::new(None, &args).unwrap();
        assert_eq!(plan.target, Some(OutputTarget::Stdout));
        assert_eq!(plan.session_name, DEFAULT_SESSION_NAME);
        assert_eq!(plan.format, OutputFormat::Xlsx);
    }

    #[test]
    fn rejected_document_leaves_roster_unchanged() {
        let mut roster = Roster::new().unwrap();
        roster.import_text("張三");
        let err = import_document(&mut roster, "names.pdf").unwrap_err();
        assert!(matches!(err, RollcallError::UnsupportedFileType { .. }));
        assert!(err.to_string().starts_with("請上傳有效的 Word (.docx) 或 Excel (.xlsx) 文件！"));

        let dir = test_dir("broken");
        let broken = dir.join("broken.docx");
        fs::write(&broken, b"not a zip file").unwrap();
        let err = import_document(&mut roster, broken.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("無法解析 Word 文件！"));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn marks_apply_to_every_homonym() {
        let mut roster = Roster::new().unwrap();
        roster.import_text("張三,李四");
        roster.insert_one_forced("張三").unwrap();
        let marks = vec![
            StatusMark {
                name: "張三".to_string(),
                status: "出席".to_string(),
            },
            StatusMark {
                name: "趙六".to_string(),
                status: "leave".to_string(),
            },
        ];
        apply_marks(&mut roster, &marks).unwrap();
        let stats = roster.stats();
        assert_eq!(stats.present_count, 2);
        assert_eq!(stats.leave_count, 0);

        let bad = vec![StatusMark {
            name: "李四".to_string(),
            status: "late".to_string(),
        }];
        assert!(apply_marks(&mut roster, &bad).is_err());
    }

    #[test]
    fn summary_js() {
        let mut roster = Roster::new().unwrap();
        roster.import_text("張三,李四,王五");
        roster
            .set_status(roster.find("張三")[0], Status::Present)
            .unwrap();
        roster.set_status(roster.find("李四")[0], Status::Absent).unwrap();
        let js = build_summary_js("一年甲班", &roster);
        assert_eq!(
            js,
            json!({
                "config": {"session": "一年甲班"},
                "stats": {"present": 1, "absent": 1, "leave": 0, "total": 3, "attendanceRate": "33.33"},
                "roster": [
                    {"name": "王五", "status": "unset"},
                    {"name": "李四", "status": "absent"},
                    {"name": "張三", "status": "present"}
                ]
            })
        );
    }

    #[test]
    fn export_to_stdout_is_tab_separated() {
        let mut roster = Roster::new().unwrap();
        roster.import_text("張三,李四");
        roster
            .set_status(roster.find("張三")[0], Status::Present)
            .unwrap();
        let mut out: Vec<u8> = Vec::new();
        let written =
            write_export(&roster.export(), &OutputTarget::Stdout, OutputFormat::Xlsx, &mut out)
                .unwrap();
        assert_eq!(written, None);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "未到\t請假\t出席\n\t\t張三\n\n總計: 出席: 1, 請假: 0, 未到: 0, 出席率: 50.00%\n"
        );
    }

    #[test]
    fn reference_mismatch_is_an_error() {
        let dir = test_dir("reference");
        let mut roster = Roster::new().unwrap();
        roster.import_text("張三");
        let js = build_summary_js("s", &roster);
        let pretty = serde_json::to_string_pretty(&js).unwrap();
        let good = dir.join("good.json");
        fs::write(&good, &pretty).unwrap();
        assert!(check_reference(good.to_str().unwrap(), &pretty).is_ok());

        roster.import_text("李四");
        let other = serde_json::to_string_pretty(&build_summary_js("s", &roster)).unwrap();
        let err = check_reference(good.to_str().unwrap(), &other).unwrap_err();
        assert!(matches!(err, RollcallError::ReferenceMismatch {}));
        assert_eq!(err.to_string(), "點名統計與參考檔不一致！");
    }
}
