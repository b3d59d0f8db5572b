use pdpmon_config::{
    AppView, CollectionKind, FeatureFlag, SettingsBinding, SettingsSnapshot, SettingsStore,
    SettingsView,
};
use pdpmon_ui::{
    DisplayOptions, EditorSection, MainContent, MountedView, PanelRenderer, SettingsPanel,
    TreeEditor,
};
use serde_json::{Value, json};

/// Editor that records what it was shown and replays queued edits.
#[derive(Default)]
struct QueueEditor {
    shown: Vec<Value>,
    template: Option<Value>,
    queued: Vec<Value>,
}

impl TreeEditor for QueueEditor {
    fn render(&mut self, data: &Value, on_change: &mut dyn FnMut(Value), options: &DisplayOptions) {
        self.shown.push(data.clone());
        self.template.clone_from(&options.default_value);
        for payload in self.queued.drain(..) {
            on_change(payload);
        }
    }
}

#[derive(Default)]
struct Screen {
    lines: Vec<String>,
    editor: QueueEditor,
}

impl PanelRenderer for Screen {
    type Editor = QueueEditor;

    fn main_page(&mut self, content: &MainContent) {
        for section in content.sections() {
            self.lines.push(section.title.to_string());
        }
    }

    fn editor_page(&mut self, section: &EditorSection) {
        self.lines.push(section.title.to_string());
    }

    fn tree_editor(&mut self) -> &mut Self::Editor {
        &mut self.editor
    }
}

#[test]
fn edited_sensor_array_round_trips_unchanged() {
    let mut store = SettingsStore::new(SettingsSnapshot::default());
    let mut panel = SettingsPanel::new(&store);
    let mut screen = Screen::default();

    panel.select(&mut store, 1).expect("open instrumentation");
    let edited = json!([
        {
            "label": "Runtank Pressure",
            "key": "P_RUN_TANK",
            "type": "P",
            "display": false,
            "visualizationType": "graph",
            "size": 12,
            "units": "psi"
        },
        { "key": "T_NEW" }
    ]);
    screen.editor.queued.push(edited.clone());
    let applied = panel.render(&mut store, &mut screen).expect("render");
    assert_eq!(applied, 1);
    assert_eq!(screen.lines, ["Instrumentation Configuration"]);
    assert_eq!(
        screen.editor.template.as_ref().map(|template| &template["key"]),
        Some(&json!("{TYPE}_{LABEL}"))
    );
    assert_eq!(screen.editor.shown[0].as_array().map(Vec::len), Some(11));

    assert_eq!(store.read_json(CollectionKind::Instrumentation).expect("read"), edited);
    panel.render(&mut store, &mut screen).expect("render again");
    assert_eq!(screen.editor.shown[1], edited);
}

#[test]
fn full_settings_tour() {
    let mut store = SettingsStore::default();
    let mut panel = SettingsPanel::new(&store);
    let mut screen = Screen::default();

    panel.render(&mut store, &mut screen).expect("render main");
    assert_eq!(
        screen.lines,
        ["Automation", "Instrumentation", "Controls", "Feed System"]
    );

    assert!(panel.switch(&mut store, 2).expect("graphs"));
    assert!(panel.switch(&mut store, 5).expect("controls panel"));
    assert!(store.flag(FeatureFlag::InstrumentationGraphs));
    assert!(store.flag(FeatureFlag::ControlsPanel));

    panel.select(&mut store, 0).expect("automation");
    screen
        .editor
        .queued
        .push(json!([{ "name": "cold-flow", "steps": 3 }]));
    panel.render(&mut store, &mut screen).expect("render automation");
    let profiles = store.automation_profiles();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].name(), Some("cold-flow"));

    panel.back(&mut store);
    assert!(matches!(panel.mounted(), MountedView::Main(_)));
    panel.back(&mut store);
    assert_eq!(store.app_view(), AppView::Dashboard);
}

#[test]
fn panel_follows_views_set_elsewhere() {
    let mut store = SettingsStore::default();
    let mut panel = SettingsPanel::new(&store);
    for view in SettingsView::ALL {
        store.set_view(view);
        panel.sync(&store);
        assert_eq!(panel.view(), view);
        let is_editor = matches!(panel.mounted(), MountedView::Editor(_));
        assert_eq!(is_editor, view != SettingsView::Main);
    }
}
