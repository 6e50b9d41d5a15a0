// A line-oriented shell over a roster.

use std::fmt::Display;
use std::io::{BufRead, Lines};

use crate::rollcall::*;

const HELP: &str = "\
add <名字>               新增一位 (重複時會詢問)
import <檔案>            匯入 Word (.docx) 或 Excel (.xlsx) 文件
paste                    貼上名單，以單獨一行 . 結束
mark <編號|名字> <狀態>  設定狀態: present/出席, absent/請假, leave/未到, unset
delete <編號|名字>       刪除一位 (會詢問)
clear                    清除所有名單 (會詢問)
search <關鍵字>          搜尋名字
list                     列出名單
stats                    出席統計
export [目錄|stdout]     匯出點名結果
help                     顯示說明
quit                     結束";

// Terminates a pasted block.
const END_OF_PASTE: &str = ".";

pub struct ShellSettings {
    pub target: Option<OutputTarget>,
    pub format: OutputFormat,
}

struct Terminal<R, W> {
    lines: Lines<R>,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// None at the end of the input. A read error also ends the input.
    fn read_line(&mut self) -> Option<String> {
        match self.lines.next()? {
            Ok(l) => Some(l),
            Err(e) => {
                warn!("read_line: {}", e);
                None
            }
        }
    }

    fn say<D: Display>(&mut self, msg: D) -> RollcallResult<()> {
        writeln!(self.output, "{}", msg).context(WritingOutputSnafu {})
    }

    fn prompt(&mut self, msg: &str) -> RollcallResult<()> {
        write!(self.output, "{}", msg).context(WritingOutputSnafu {})?;
        self.output.flush().context(WritingOutputSnafu {})
    }

    /// Only an explicit yes counts. The end of the input declines.
    fn ask(&mut self, prompt: &Prompt) -> bool {
        if self.prompt(&format!("{} (y/n) ", prompt)).is_err() {
            return false;
        }
        match self.read_line() {
            Some(answer) => matches!(
                answer.trim().to_lowercase().as_str(),
                "y" | "yes" | "是" | "確定"
            ),
            None => false,
        }
    }
}

fn status_text(status: Status) -> &'static str {
    match status {
        Status::Unset => "未點名",
        s => s.label(),
    }
}

/// An entry given as a 1-based position in the list or as a name.
fn resolve_entry(roster: &Roster, target: &str) -> Result<EntryRef, String> {
    let target = target.trim();
    if let Ok(idx) = target.parse::<usize>() {
        return match idx.checked_sub(1).and_then(|i| roster.snapshot().get(i)) {
            Some(e) => Ok(e.entry_ref()),
            None => Err(format!("沒有編號 {}", idx)),
        };
    }
    let found = roster.find(target);
    match found.as_slice() {
        [] => Err(format!("名單中沒有 \"{}\"", target)),
        [entry] => Ok(*entry),
        _ => Err(format!("名單中有 {} 位 \"{}\"，請使用編號", found.len(), target)),
    }
}

fn position(roster: &Roster, entry: EntryRef) -> usize {
    roster
        .snapshot()
        .iter()
        .position(|e| e.entry_ref() == entry)
        .map(|i| i + 1)
        .unwrap_or(0)
}

fn list_line(idx: usize, entry: &RosterEntry) -> String {
    format!("{:>3}. {} [{}]", idx, entry.name(), status_text(entry.status()))
}

/// Reads commands until `quit` or the end of the input.
///
/// Mistakes (unknown names, unreadable documents, bad statuses) are reported
/// and the shell keeps going. Only a failure to write to `output` stops it.
pub fn run_shell<R: BufRead, W: Write>(
    roster: &mut Roster,
    input: R,
    output: W,
    settings: &ShellSettings,
) -> RollcallResult<()> {
    let mut term = Terminal {
        lines: input.lines(),
        output,
    };
    term.say("輸入 help 查看指令")?;
    loop {
        term.prompt("> ")?;
        let line = match term.read_line() {
            Some(l) => l,
            None => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };
        debug!("run_shell: {:?} {:?}", cmd, rest);
        match cmd {
            "add" => {
                let added = roster.add_name(rest, &mut |p: &Prompt| term.ask(p));
                match added {
                    Ok(Confirmation::Done(entry)) => {
                        let idx = position(roster, entry);
                        let name = roster.get(entry).map(|e| e.name()).unwrap_or(rest);
                        term.say(format!("已新增 {}. {}", idx, name))?;
                    }
                    Ok(Confirmation::Declined) => term.say("已取消")?,
                    Err(e) => term.say(e)?,
                }
            }
            "import" => {
                if rest.is_empty() {
                    term.say("請指定檔案")?;
                    continue;
                }
                match import_document(roster, rest) {
                    Ok(added) => term.say(format!("已匯入 {} 位", added))?,
                    Err(e) => term.say(e)?,
                }
            }
            "paste" => {
                let mut block: Vec<String> = Vec::new();
                while let Some(l) = term.read_line() {
                    if l.trim() == END_OF_PASTE {
                        break;
                    }
                    block.push(l);
                }
                let added = roster.import_text(&block.join("\n"));
                term.say(format!("已匯入 {} 位", added))?;
            }
            "mark" => {
                let (target, status) = match rest.rsplit_once(char::is_whitespace) {
                    Some(x) => x,
                    None => {
                        term.say("用法: mark <編號|名字> <狀態>")?;
                        continue;
                    }
                };
                let status = match status.parse::<Status>() {
                    Ok(s) => s,
                    Err(e) => {
                        term.say(e)?;
                        continue;
                    }
                };
                match resolve_entry(roster, target) {
                    Ok(entry) => match roster.set_status(entry, status) {
                        Ok(()) => term.say(format!("{} [{}]", target.trim(), status_text(status)))?,
                        Err(e) => term.say(e)?,
                    },
                    Err(msg) => term.say(msg)?,
                }
            }
            "delete" => {
                let entry = match resolve_entry(roster, rest) {
                    Ok(entry) => entry,
                    Err(msg) => {
                        term.say(msg)?;
                        continue;
                    }
                };
                let removed = roster.remove_confirmed(entry, &mut |p: &Prompt| term.ask(p));
                match removed {
                    Ok(Confirmation::Done(removed)) => {
                        term.say(format!("已刪除 {}", removed.name()))?
                    }
                    Ok(Confirmation::Declined) => term.say("已取消")?,
                    Err(e) => term.say(e)?,
                }
            }
            "clear" => {
                let cleared = roster.clear_confirmed(&mut |p: &Prompt| term.ask(p));
                match cleared {
                    Confirmation::Done(count) => term.say(format!("已清除 {} 位", count))?,
                    Confirmation::Declined => term.say("已取消")?,
                }
            }
            "search" => {
                let found: Vec<String> = roster
                    .search(rest)
                    .iter()
                    .map(|e| list_line(position(roster, e.entry_ref()), e))
                    .collect();
                if found.is_empty() {
                    term.say("找不到符合的名字")?;
                }
                for l in found {
                    term.say(l)?;
                }
            }
            "list" => {
                if roster.is_empty() {
                    term.say("名單是空的")?;
                }
                for (i, e) in roster.snapshot().iter().enumerate() {
                    term.say(list_line(i + 1, e))?;
                }
            }
            "stats" => {
                let line = roster.export().summary_line();
                term.say(line)?;
            }
            "export" => {
                let target = if rest.is_empty() {
                    settings.target.clone()
                } else {
                    Some(OutputTarget::parse(rest))
                };
                let target = match target {
                    Some(t) => t,
                    None => {
                        term.say("請指定匯出目錄")?;
                        continue;
                    }
                };
                match write_export(&roster.export(), &target, settings.format, &mut term.output) {
                    Ok(Some(p)) => term.say(format!("已匯出 {}", p.display()))?,
                    Ok(None) => {}
                    Err(e) => term.say(e)?,
                }
            }
            "help" => term.say(HELP)?,
            "quit" | "exit" => break,
            x => term.say(format!("未知的指令 {:?}，輸入 help 查看指令", x))?,
        }
    }
    info!("run_shell: done with {} entries", roster.len());
    Ok(())
}
