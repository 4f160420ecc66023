//! 対話式ラベリングモジュール
//!
//! 1件ずつレコードを表示し、フラグ（必須）・タグ・メモを編集して保存する。
//! 編集内容は Save & Next でのみ反映され、Prev / Skip では破棄される。

use crate::error::{LabelerError, Result};
use crate::export::export_session;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};
use labeler_common::{
    cheat_sheet_line, get_or_blank, normalize_url, record_heading, CsFlag, DisplayField,
    ExportOptions, Record, Session, Slot, StagingBuffer, Tag, TagGroup,
};
use std::path::Path;

/// メニューの操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    SetFlag,
    EditTags,
    EditNotes,
    Prev,
    Skip,
    SaveNext,
    ToggleFilter,
    Export,
    Quit,
}

impl MenuAction {
    fn label(self, session: &Session) -> String {
        match self {
            MenuAction::SetFlag => "Compound semiconductor (REQUIRED): Y / N".to_string(),
            MenuAction::EditTags => "Select categories (multi-select)".to_string(),
            MenuAction::EditNotes => "Notes (optional)".to_string(),
            MenuAction::Prev => "⬅ Prev".to_string(),
            MenuAction::Skip => "Skip ➡".to_string(),
            MenuAction::SaveNext if session.can_save() => "✅ Save & Next".to_string(),
            MenuAction::SaveNext => "✅ Save & Next (choose Y or N first)".to_string(),
            MenuAction::ToggleFilter if session.show_only_unlabeled() => {
                "Show all records".to_string()
            }
            MenuAction::ToggleFilter => "Show only unlabeled".to_string(),
            MenuAction::Export => "📤 Export".to_string(),
            MenuAction::Quit => "Quit".to_string(),
        }
    }
}

/// 表示中レコードの有無に応じたメニュー
pub fn menu_actions(has_record: bool) -> Vec<MenuAction> {
    if has_record {
        vec![
            MenuAction::SetFlag,
            MenuAction::EditTags,
            MenuAction::EditNotes,
            MenuAction::SaveNext,
            MenuAction::Skip,
            MenuAction::Prev,
            MenuAction::ToggleFilter,
            MenuAction::Export,
            MenuAction::Quit,
        ]
    } else {
        vec![MenuAction::ToggleFilter, MenuAction::Export, MenuAction::Quit]
    }
}

/// MultiSelect の選択結果（タググループ内の位置）を staging buffer へ反映
pub fn apply_tag_selection(session: &mut Session, group: TagGroup, selected: &[usize]) -> Result<()> {
    for (i, &tag) in group.tags().iter().enumerate() {
        session.toggle_tag(tag, selected.contains(&i))?;
    }
    Ok(())
}

/// 書き出し先の情報
pub struct ExportTarget<'a> {
    pub path: &'a Path,
    pub options: ExportOptions,
}

/// 対話式でラベル付け
pub fn run_label_session(session: &mut Session, target: &ExportTarget<'_>) -> Result<()> {
    println!("操作: 矢印キーで選択、Enterで決定");
    println!("---\n");

    let mut unsaved = false;

    loop {
        print_progress(session);

        let has_record = match session.load_record() {
            Slot::NoRecordLoaded => {
                if session.show_only_unlabeled() {
                    println!("✔ All records are labeled. You can export the CSV below.\n");
                } else {
                    println!("⚠ No records loaded\n");
                }
                false
            }
            Slot::Viewing { position, view_len, record, staged } => {
                print_record(position, view_len, record, staged);
                true
            }
        };

        let actions = menu_actions(has_record);
        let labels: Vec<String> = actions.iter().map(|a| a.label(session)).collect();
        let choice = Select::new()
            .with_prompt("操作")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        match actions[choice] {
            MenuAction::SetFlag => prompt_flag(session)?,
            MenuAction::EditTags => prompt_tags(session)?,
            MenuAction::EditNotes => prompt_notes(session)?,
            MenuAction::Prev => session.prev(),
            MenuAction::Skip => {
                session.skip();
                println!("  → スキップ（未記録）\n");
            }
            MenuAction::SaveNext => {
                if !session.can_save() {
                    println!("  ⚠ Choose Y or N before saving.\n");
                    continue;
                }
                let order = session.save()?;
                unsaved = true;
                println!("  → 保存しました: #{}\n", order);
            }
            MenuAction::ToggleFilter => {
                let value = !session.show_only_unlabeled();
                session.set_show_only_unlabeled(value);
            }
            MenuAction::Export => {
                if prompt_export(session, target)? {
                    unsaved = false;
                }
            }
            MenuAction::Quit => {
                if unsaved && confirm("未出力のラベルがあります。終了前にエクスポートしますか?", true)? {
                    prompt_export(session, target)?;
                }
                println!("終了します");
                break;
            }
        }
    }

    Ok(())
}

fn print_progress(session: &Session) {
    let summary = session.summary();
    let bar = ProgressBar::new(summary.total as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.green/white} {pos}/{len} labeled ({percent}%)") {
        bar.set_style(style);
    }
    bar.set_position(summary.labeled as u64);
    bar.abandon();
    println!("Remaining to label: {}", summary.remaining);
}

fn print_record(position: usize, view_len: usize, record: &Record, staged: &StagingBuffer) {
    println!("\n{}", record_heading(position, view_len, record.order));

    for field in DisplayField::ALL {
        let value = get_or_blank(record, field.column());
        if field == DisplayField::Website {
            let url = normalize_url(&value);
            if url.is_empty() {
                println!("  {}: {}", field.label(), value);
            } else {
                println!("  {}: {} <{}>", field.label(), value, url);
            }
        } else {
            println!("  {}: {}", field.label(), value);
        }
    }

    println!("---");
    let flag = staged.flag.map(CsFlag::as_str).unwrap_or("(select)");
    println!("  Compound semiconductor: {}", flag);
    for group in TagGroup::ALL {
        let selected: Vec<&str> = group
            .tags()
            .iter()
            .filter(|&&t| staged.tags.get(t))
            .map(|t| t.label())
            .collect();
        let text = if selected.is_empty() { "-".to_string() } else { selected.join(", ") };
        println!("  {}: {}", group.title(), text);
    }
    if !staged.notes.is_empty() {
        println!("  Notes: {}", staged.notes);
    }
    println!();
}

fn prompt_flag(session: &mut Session) -> Result<()> {
    let current = session.staged().and_then(|s| s.flag);
    let options = ["(select)", "Y", "N"];
    let default = match current {
        None => 0,
        Some(CsFlag::Y) => 1,
        Some(CsFlag::N) => 2,
    };
    let choice = Select::new()
        .with_prompt("Belongs to compound semiconductor? *")
        .items(&options)
        .default(default)
        .interact()
        .map_err(prompt_error)?;

    let flag = match choice {
        1 => Some(CsFlag::Y),
        2 => Some(CsFlag::N),
        _ => None,
    };
    session.set_flag(flag)?;
    Ok(())
}

fn prompt_tags(session: &mut Session) -> Result<()> {
    for group in TagGroup::ALL {
        println!("\n{}", group.title());
        println!("  {}", cheat_sheet_line(group));

        let staged_tags = session.staged().map(|s| s.tags).unwrap_or_default();
        let labels: Vec<&str> = group.tags().iter().map(|t| t.label()).collect();
        let defaults: Vec<bool> = group.tags().iter().map(|&t| staged_tags.get(t)).collect();

        let selected = MultiSelect::new()
            .with_prompt(format!("{} (Spaceで切替、Enterで決定)", group.title()))
            .items(&labels)
            .defaults(&defaults)
            .interact()
            .map_err(prompt_error)?;
        apply_tag_selection(session, group, &selected)?;
    }
    Ok(())
}

fn prompt_notes(session: &mut Session) -> Result<()> {
    let current = session.staged().map(|s| s.notes.clone()).unwrap_or_default();
    let notes: String = Input::new()
        .with_prompt("Notes (optional)")
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    session.set_notes(notes)?;
    Ok(())
}

/// エクスポート。書き出した場合 true
fn prompt_export(session: &mut Session, target: &ExportTarget<'_>) -> Result<bool> {
    let gate = session.export_gate();
    if let Some(warning) = gate.warning() {
        println!("⚠ {}", warning);
        if !session.export_acknowledged() {
            let allow = confirm("I understand — allow export anyway", false)?;
            session.set_export_acknowledged(allow);
            if !allow {
                println!("  → エクスポートを中止しました\n");
                return Ok(false);
            }
        }
    }

    let file_name: String = Input::new()
        .with_prompt("Output file name")
        .with_initial_text(target.path.to_string_lossy().to_string())
        .interact_text()
        .map_err(prompt_error)?;

    export_session(session, Path::new(file_name.trim()), &target.options)?;
    println!();
    Ok(true)
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(prompt_error)
}

fn prompt_error(e: dialoguer::Error) -> LabelerError {
    LabelerError::Prompt(e.to_string())
}
