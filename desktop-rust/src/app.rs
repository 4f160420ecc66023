use std::path::Path;

use eframe::egui::{self, Color32, RichText};
use labeler_common::{
    cheat_sheet_line, get_or_blank, normalize_url, record_heading, CsFlag, DisplayField,
    ExportFormat, Record, Session, StagingBuffer, TagGroup,
};
use tracing::{debug, warn};

use crate::io::{default_save_name, export_dataset, load_dataset};
use crate::model::{AppState, UiAction};

const WARN_COLOR: Color32 = Color32::from_rgb(246, 196, 69);
const OK_COLOR: Color32 = Color32::from_rgb(110, 200, 120);

/// 会社情報の下に並べる表示列
const DETAIL_FIELDS: [DisplayField; 5] = [
    DisplayField::BvdSectors,
    DisplayField::TradeDescription,
    DisplayField::Description,
    DisplayField::PrimaryIndustry,
    DisplayField::SecondaryIndustry,
];

pub struct LabelerApp {
    state: AppState,
    status: String,
}

impl Default for LabelerApp {
    fn default() -> Self {
        Self {
            state: AppState {
                save_name: default_save_name(ExportFormat::Csv),
                ..Default::default()
            },
            status: String::new(),
        }
    }
}

impl LabelerApp {
    fn open_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV / Excel", &["csv", "xlsx", "xlsm", "xls"])
            .pick_file()
        {
            self.load_from_path(&path);
        }
    }

    /// 失敗しても読み込み済みのデータはそのまま残す
    pub fn load_from_path(&mut self, path: &Path) {
        match load_dataset(path) {
            Ok(dataset) => {
                let count = dataset.len();
                match self.state.session.as_mut() {
                    Some(session) => session.replace_dataset(dataset),
                    None => self.state.session = Some(Session::new(dataset, true)),
                }
                self.state.source_path = Some(path.to_path_buf());
                debug!(path = %path.display(), records = count, "dataset loaded");
                self.status = format!("Loaded {} records from {}", count, path.display());
            }
            Err(err) => {
                warn!(path = %path.display(), "load failed: {err:#}");
                self.status = format!("Failed to load data: {err:#}");
            }
        }
    }

    fn export(&mut self) {
        let Some(session) = &self.state.session else {
            self.status = "No data loaded".to_string();
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(self.state.save_name.trim())
            .save_file()
        else {
            return;
        };

        let mut options = self.state.options;
        if let Some(format) = ExportFormat::from_path(&path) {
            options.format = format;
        }
        match export_dataset(session, &path, &options) {
            Ok(()) => {
                debug!(path = %path.display(), format = %options.format, "exported");
                self.status = format!("Exported {}", path.display());
            }
            Err(err) => {
                warn!(path = %path.display(), "export failed: {err:#}");
                self.status = format!("Export failed: {err:#}");
            }
        }
    }

    fn apply(&mut self, action: UiAction) {
        if action == UiAction::Export {
            self.export();
            return;
        }
        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        let result = match action {
            UiAction::SetFlag(flag) => session.set_flag(flag),
            UiAction::ToggleTag(tag, value) => session.toggle_tag(tag, value),
            UiAction::SetNotes(notes) => session.set_notes(notes),
            UiAction::Prev => {
                session.prev();
                Ok(())
            }
            UiAction::Skip => {
                session.skip();
                Ok(())
            }
            UiAction::Save => session.save().map(|_| ()),
            UiAction::SetFilter(value) => {
                session.set_show_only_unlabeled(value);
                Ok(())
            }
            UiAction::SetAcknowledged(value) => {
                session.set_export_acknowledged(value);
                Ok(())
            }
            UiAction::Export => Ok(()),
        };
        if let Err(err) = result {
            debug!("action rejected: {err}");
            self.status = err.to_string();
        }
    }
}

impl eframe::App for LabelerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut open_requested = false;
        let mut actions = Vec::new();

        egui::SidePanel::left("data").resizable(true).show(ctx, |ui| {
            ui.heading("Data");
            if ui.button("Upload data: CSV (recommended) or Excel (with 'Results' sheet)").clicked() {
                open_requested = true;
            }
            if let Some(path) = &self.state.source_path {
                ui.label(RichText::new(path.display().to_string()).color(Color32::from_gray(170)));
            }
            ui.separator();
            ui.heading("Export");
            ui.label("Output file name");
            ui.text_edit_singleline(&mut self.state.save_name);
            ui.checkbox(&mut self.state.options.include_order_column, "Include __row_order column");
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let text = if self.status.is_empty() { "Ready" } else { self.status.as_str() };
            ui.label(RichText::new(text).color(Color32::from_gray(170)));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("REWIRE Compound Semiconductor Classification App");
            match self.state.session.as_mut() {
                None => {
                    ui.label("Please upload a CSV/Excel file to begin.");
                }
                Some(session) => {
                    session.load_record();
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        render_session(ui, session, &mut actions);
                    });
                }
            }
        });

        if open_requested {
            self.open_file();
        }
        for action in actions {
            self.apply(action);
        }
    }
}

fn render_session(ui: &mut egui::Ui, session: &Session, actions: &mut Vec<UiAction>) {
    let mut filter = session.show_only_unlabeled();
    if ui
        .checkbox(&mut filter, "Show only unlabeled (sum of all tags == 0 and CS flag not set)")
        .changed()
    {
        actions.push(UiAction::SetFilter(filter));
    }

    let summary = session.summary();
    ui.horizontal(|ui| {
        ui.label("Remaining to label");
        ui.label(RichText::new(summary.remaining.to_string()).size(22.0).strong());
    });
    ui.add(egui::ProgressBar::new(summary.progress()).show_percentage());
    ui.separator();

    match (session.current(), session.staged()) {
        (Some(record), Some(staged)) => {
            let heading = record_heading(session.cursor(), session.view().len(), record.order);
            ui.heading(heading);
            ui.columns(2, |cols| {
                render_info(&mut cols[0], record);
                render_classification(&mut cols[1], staged, actions);
            });
            ui.separator();
            render_navigation(ui, session, actions);
        }
        _ => {
            ui.label(
                RichText::new("All records are labeled. You can export the CSV below.").color(OK_COLOR),
            );
        }
    }

    ui.separator();
    render_export(ui, session, actions);
}

fn render_info(ui: &mut egui::Ui, record: &Record) {
    let company = get_or_blank(record, DisplayField::CompanyName.column());
    ui.label(RichText::new(format!("Company: {}", company)).strong());

    let web = get_or_blank(record, DisplayField::Website.column());
    let url = normalize_url(&web);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Website:").strong());
        if url.is_empty() {
            ui.label(&*web);
        } else {
            ui.hyperlink_to(&*web, url);
        }
    });

    for field in DETAIL_FIELDS {
        ui.add_space(4.0);
        ui.label(RichText::new(format!("{}:", field.label())).strong());
        ui.label(&*get_or_blank(record, field.column()));
    }
}

fn render_classification(ui: &mut egui::Ui, staged: &StagingBuffer, actions: &mut Vec<UiAction>) {
    ui.label(RichText::new("Compound semiconductor (REQUIRED)").strong());
    let mut flag = staged.flag;
    ui.horizontal(|ui| {
        ui.label("Belongs to compound semiconductor? *");
        ui.radio_value(&mut flag, None, "(select)");
        ui.radio_value(&mut flag, Some(CsFlag::Y), "Y");
        ui.radio_value(&mut flag, Some(CsFlag::N), "N");
    });
    if flag != staged.flag {
        actions.push(UiAction::SetFlag(flag));
    }

    ui.separator();
    ui.label(RichText::new("Select categories (multi-select)").strong());
    for group in TagGroup::ALL {
        ui.add_space(4.0);
        ui.label(RichText::new(group.title()).small());
        ui.label(RichText::new(cheat_sheet_line(group)).small().weak());
        for &tag in group.tags() {
            let mut value = staged.tags.get(tag);
            if ui.checkbox(&mut value, tag.label()).changed() {
                actions.push(UiAction::ToggleTag(tag, value));
            }
        }
    }

    ui.add_space(4.0);
    ui.label("Notes (optional)");
    let mut notes = staged.notes.clone();
    if ui.add(egui::TextEdit::multiline(&mut notes).desired_rows(5)).changed() {
        actions.push(UiAction::SetNotes(notes));
    }
}

fn render_navigation(ui: &mut egui::Ui, session: &Session, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        if ui.button("Prev").clicked() {
            actions.push(UiAction::Prev);
        }
        if ui.button("Skip").clicked() {
            actions.push(UiAction::Skip);
        }
        let can_save = session.can_save();
        if ui.add_enabled(can_save, egui::Button::new("Save & Next")).clicked() {
            actions.push(UiAction::Save);
        }
        if !can_save {
            ui.label(RichText::new("Choose Y or N before saving.").color(WARN_COLOR));
        }
    });
}

fn render_export(ui: &mut egui::Ui, session: &Session, actions: &mut Vec<UiAction>) {
    ui.heading("Export");
    let gate = session.export_gate();
    if let Some(warning) = gate.warning() {
        ui.label(RichText::new(warning).color(WARN_COLOR));
        let mut acknowledged = gate.acknowledged;
        if ui
            .checkbox(&mut acknowledged, "I understand — allow export anyway")
            .changed()
        {
            actions.push(UiAction::SetAcknowledged(acknowledged));
        }
    }
    if ui.add_enabled(gate.is_enabled(), egui::Button::new("Export")).clicked() {
        actions.push(UiAction::Export);
    }
}
