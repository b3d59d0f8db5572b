//! Output renderers and formatting helpers for CLI commands.

use std::io::{self, Write};

use anyhow::anyhow;
use pdpmon_config::{
    AppView, ControlId, FeatureFlag, SettingsBinding, SettingsSnapshot, SettingsView,
};
use pdpmon_events::{Event, EventEnvelope};
use pdpmon_ui::{
    DisplayOptions, EditorSection, MainContent, OptionAction, OptionRow, PanelRenderer,
    SettingsPanel, TreeEditor,
};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::context::{CliError, CliResult};

/// Tree editor that captures the rendered document and replays one edit.
#[derive(Debug, Default)]
pub(crate) struct CliEditor {
    pending: Option<Value>,
    shown: Option<Value>,
}

impl CliEditor {
    pub(crate) const fn with_payload(payload: Value) -> Self {
        Self {
            pending: Some(payload),
            shown: None,
        }
    }
}

impl TreeEditor for CliEditor {
    fn render(&mut self, data: &Value, on_change: &mut dyn FnMut(Value), _options: &DisplayOptions) {
        self.shown = Some(data.clone());
        if let Some(payload) = self.pending.take() {
            on_change(payload);
        }
    }
}

/// Page description produced by a panel render.
#[derive(Debug, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub(crate) enum PageView {
    Main {
        heading: &'static str,
        back: &'static str,
        sections: Vec<SectionView>,
    },
    Editor {
        title: &'static str,
        collection: &'static str,
        back: &'static str,
        root_name: &'static str,
        data: Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        template: Option<Value>,
    },
}

#[derive(Debug, Serialize)]
pub(crate) struct SectionView {
    title: &'static str,
    options: Vec<OptionView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OptionView {
    index: usize,
    label: &'static str,
    action: &'static str,
    target: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<bool>,
    hovered: bool,
}

impl OptionView {
    fn from_row(index: usize, row: &OptionRow) -> Self {
        let (action, target) = match row.option().action {
            OptionAction::Navigate(view) => ("navigate", view.as_str()),
            OptionAction::Toggle(flag) => ("toggle", flag.key()),
        };
        Self {
            index,
            label: row.option().label,
            action,
            target,
            value: row.toggle_state(),
            hovered: row.elevation() > 0,
        }
    }
}

fn main_page_view(content: &MainContent) -> PageView {
    let mut index = 0;
    let sections = content
        .sections()
        .iter()
        .map(|section| SectionView {
            title: section.title,
            options: section
                .rows
                .iter()
                .map(|row| {
                    let view = OptionView::from_row(index, row);
                    index += 1;
                    view
                })
                .collect(),
        })
        .collect();
    PageView::Main {
        heading: content.heading(),
        back: AppView::Dashboard.as_str(),
        sections,
    }
}

/// Panel renderer that records the page for later formatting.
#[derive(Debug, Default)]
pub(crate) struct CapturingRenderer {
    page: Option<PageView>,
    editor: CliEditor,
}

impl CapturingRenderer {
    /// Rendered page with the editor's document filled in.
    pub(crate) fn into_page(self) -> Option<PageView> {
        let mut page = self.page?;
        if let PageView::Editor { data, .. } = &mut page
            && let Some(shown) = self.editor.shown
        {
            *data = shown;
        }
        Some(page)
    }
}

impl PanelRenderer for CapturingRenderer {
    type Editor = CliEditor;

    fn main_page(&mut self, content: &MainContent) {
        self.page = Some(main_page_view(content));
    }

    fn editor_page(&mut self, section: &EditorSection) {
        self.page = Some(PageView::Editor {
            title: section.title,
            collection: section.collection.as_str(),
            back: SettingsView::Main.as_str(),
            root_name: section.options.root_name,
            data: Value::Null,
            template: section.options.default_value.clone(),
        });
    }

    fn tree_editor(&mut self) -> &mut Self::Editor {
        &mut self.editor
    }
}

/// Render the panel's mounted view to `out`.
pub(crate) fn render_panel<B, W>(
    panel: &mut SettingsPanel,
    binding: &mut B,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()>
where
    B: SettingsBinding + ?Sized,
    W: Write + ?Sized,
{
    let mut renderer = CapturingRenderer::default();
    panel.render(binding, &mut renderer)?;
    let page = renderer
        .into_page()
        .ok_or_else(|| CliError::failure(anyhow!("panel rendered no page")))?;
    write_page(&page, format, out)
}

pub(crate) fn write_page<W: Write + ?Sized>(
    page: &PageView,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => write_json(page, out),
        OutputFormat::Table => write_page_table(page, out).map_err(write_failed),
    }
}

fn write_page_table<W: Write + ?Sized>(page: &PageView, out: &mut W) -> io::Result<()> {
    match page {
        PageView::Main {
            heading,
            back,
            sections,
        } => {
            writeln!(out, "{heading}  (back: {back})")?;
            for section in sections {
                writeln!(out, "{}", section.title)?;
                for option in &section.options {
                    let hover = if option.hovered { '*' } else { ' ' };
                    let marker = match option.value {
                        None => ">",
                        Some(true) => "[x]",
                        Some(false) => "[ ]",
                    };
                    writeln!(
                        out,
                        "{hover}{:>3}  {marker:<4} {:<32} {}",
                        option.index, option.label, option.target
                    )?;
                }
            }
        }
        PageView::Editor {
            title,
            collection,
            back,
            root_name,
            data,
            template,
        } => {
            writeln!(out, "{title}  (back: {back})")?;
            writeln!(out, "{root_name} [{collection}]")?;
            let text = serde_json::to_string_pretty(data).map_err(io::Error::other)?;
            writeln!(out, "{text}")?;
            if let Some(template) = template {
                writeln!(out, "new record template: {template}")?;
            }
        }
    }
    Ok(())
}

pub(crate) fn write_snapshot<W: Write + ?Sized>(
    snapshot: &SettingsSnapshot,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => write_json(snapshot, out),
        OutputFormat::Table => write_snapshot_table(snapshot, out).map_err(write_failed),
    }
}

fn write_snapshot_table<W: Write + ?Sized>(
    snapshot: &SettingsSnapshot,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "instrumentation: {} sensors", snapshot.instrumentation.len())?;
    for sensor in &snapshot.instrumentation {
        writeln!(
            out,
            "  {:<14} {:<24} size {}",
            sensor.key().unwrap_or("<no key>"),
            sensor.label().unwrap_or("<unlabelled>"),
            sensor
                .size()
                .map_or_else(|| "-".to_string(), |size| size.to_string())
        )?;
    }
    let controls: Vec<_> = snapshot.controls.iter().map(ControlId::to_string).collect();
    writeln!(out, "controls: {}", controls.join(", "))?;
    writeln!(out, "automation: {} profiles", snapshot.automation.len())?;
    writeln!(out, "flags:")?;
    for flag in FeatureFlag::ALL {
        writeln!(out, "  {:<24} {}", flag.key(), on_off(snapshot.ui.get(flag)))?;
    }
    Ok(())
}

pub(crate) fn write_events<W: Write + ?Sized>(
    events: &[EventEnvelope],
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()> {
    for envelope in events {
        match format {
            OutputFormat::Json => {
                let text = serde_json::to_string(envelope)
                    .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
                writeln!(out, "{text}").map_err(write_failed)?;
            }
            OutputFormat::Table => {
                writeln!(
                    out,
                    "{:>4} {:<22} {}",
                    envelope.id,
                    envelope.event.kind(),
                    describe_event(&envelope.event)
                )
                .map_err(write_failed)?;
            }
        }
    }
    Ok(())
}

fn describe_event(event: &Event) -> String {
    match event {
        Event::SettingsViewChanged { from, to } | Event::AppViewChanged { from, to } => {
            format!("{from} -> {to}")
        }
        Event::CollectionReplaced { collection, len } => format!("{collection} ({len} records)"),
        Event::FlagToggled { flag, value } => format!("{flag} {}", on_off(*value)),
    }
}

pub(crate) const fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn write_json<T: Serialize + ?Sized, W: Write + ?Sized>(value: &T, out: &mut W) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    writeln!(out, "{text}").map_err(write_failed)
}

pub(crate) fn write_failed(err: io::Error) -> CliError {
    CliError::failure(anyhow!("failed to write output: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdpmon_config::SettingsStore;
    use serde_json::json;

    fn rendered(store: &mut SettingsStore, format: OutputFormat) -> String {
        let mut panel = SettingsPanel::new(&*store);
        let mut out = Vec::new();
        render_panel(&mut panel, store, format, &mut out).expect("render");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn main_page_table_lists_every_option() {
        let mut store = SettingsStore::default();
        store.toggle(FeatureFlag::ControlsDock, true);
        let text = rendered(&mut store, OutputFormat::Table);
        assert!(text.starts_with("Settings  (back: dashboard)"));
        assert!(text.contains("  0  >    Automation Profiles"));
        assert!(text.contains("  4  [x]  Controls Dock"));
        assert!(text.contains("  6  [ ]  Feed System Panel"));
        assert!(text.contains("feed_system.show"));
    }

    #[test]
    fn main_page_json_carries_indices_and_values() {
        let mut store = SettingsStore::default();
        let text = rendered(&mut store, OutputFormat::Json);
        let page: Value = serde_json::from_str(&text).expect("json");
        assert_eq!(page["page"], "main");
        assert_eq!(page["sections"][2]["title"], "Controls");
        assert_eq!(page["sections"][2]["options"][1]["index"], 4);
        assert_eq!(page["sections"][2]["options"][1]["value"], false);
        assert!(page["sections"][0]["options"][0].get("value").is_none());
    }

    #[test]
    fn editor_page_includes_collection_document() {
        let mut store = SettingsStore::default();
        store.update_controls_list(vec!["NCV".into()]);
        store.set_view(SettingsView::Controls);
        let text = rendered(&mut store, OutputFormat::Json);
        let page: Value = serde_json::from_str(&text).expect("json");
        assert_eq!(page["page"], "editor");
        assert_eq!(page["title"], "Controls Configuration");
        assert_eq!(page["data"], json!(["NCV"]));
        assert!(page.get("template").is_none());

        store.set_view(SettingsView::Instrumentation);
        let text = rendered(&mut store, OutputFormat::Table);
        assert!(text.starts_with("Instrumentation Configuration  (back: main)"));
        assert!(text.contains("Config [instrumentation]"));
        assert!(text.contains("\"P_RUN_TANK\""));
        assert!(text.contains("new record template:"));
    }

    #[test]
    fn snapshot_table_summarises_flags() {
        let mut store = SettingsStore::default();
        store.toggle(FeatureFlag::InstrumentationGraphs, true);
        let mut out = Vec::new();
        write_snapshot(&store.snapshot(), OutputFormat::Table, &mut out).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("instrumentation: 11 sensors"));
        assert!(text.contains("instrumentation.graphs"));
        assert!(text.contains("controls: \n"));
    }

    #[test]
    fn events_render_one_per_line() {
        let mut store = SettingsStore::default();
        let mut events = store.subscribe(None);
        store.set_view(SettingsView::Automation);
        store.toggle(FeatureFlag::ControlsPanel, true);
        store.update_controls_list(Vec::new());
        let drained = events.drain();

        let mut out = Vec::new();
        write_events(&drained, OutputFormat::Table, &mut out).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("settings_view_changed  main -> automation"));
        assert!(lines[1].contains("controls.panel on"));
        assert!(lines[2].contains("controls (0 records)"));

        let mut out = Vec::new();
        write_events(&drained, OutputFormat::Json, &mut out).expect("write");
        let first: Value = serde_json::from_str(
            String::from_utf8(out).expect("utf8").lines().next().expect("line"),
        )
        .expect("json");
        assert_eq!(first["event"]["type"], "settings_view_changed");
    }
}
