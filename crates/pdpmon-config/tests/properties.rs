use pdpmon_config::{
    AutomationProfile, CollectionKind, ControlId, FeatureFlag, InstrumentationSensor,
    SettingsBinding, SettingsSnapshot, SettingsStore, SettingsView,
};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn control_ids() -> impl Strategy<Value = Vec<ControlId>> {
    prop::collection::vec("[A-Z0-9_]{1,10}".prop_map(ControlId::from), 0..16)
}

fn sensors() -> impl Strategy<Value = Vec<InstrumentationSensor>> {
    let sensor = ("[A-Za-z .]{1,20}", "[PTL]_[A-Z0-9_]{1,10}", any::<bool>(), 1u32..=12).prop_map(
        |(label, key, display, size)| {
            InstrumentationSensor::from(json!({
                "label": label,
                "type": &key[..1],
                "key": key,
                "display": display,
                "visualizationType": "graph",
                "size": size,
            }))
        },
    );
    prop::collection::vec(sensor, 0..12)
}

fn profiles() -> impl Strategy<Value = Vec<AutomationProfile>> {
    let profile = (prop::option::of("[a-z-]{1,16}"), prop::option::of(0u64..100)).prop_map(
        |(name, delay)| {
            let mut body = Map::new();
            if let Some(name) = name {
                body.insert("name".to_string(), Value::from(name));
            }
            if let Some(delay) = delay {
                body.insert("delay_ms".to_string(), Value::from(delay));
            }
            AutomationProfile::from(Value::Object(body))
        },
    );
    prop::collection::vec(profile, 0..8)
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1.0e9f64..1.0e9).prop_map(Value::from),
        "[ -~]{0,12}".prop_map(Value::from),
    ]
}

/// Records of any shape, including known fields holding unexpected types.
fn loose_records() -> impl Strategy<Value = Value> {
    let key = prop_oneof![
        Just("label".to_string()),
        Just("key".to_string()),
        Just("type".to_string()),
        Just("display".to_string()),
        Just("visualizationType".to_string()),
        Just("size".to_string()),
        Just("name".to_string()),
        "[a-z]{1,8}",
    ];
    let object = prop::collection::btree_map(key, scalar(), 0..6)
        .prop_map(|fields| Value::Object(fields.into_iter().collect()));
    let record = prop_oneof![3 => object, 1 => scalar()];
    prop::collection::vec(record, 0..8).prop_map(Value::Array)
}

fn store() -> SettingsStore {
    SettingsStore::new(SettingsSnapshot::default())
}

proptest! {
    #[test]
    fn set_view_is_observed(target in prop::sample::select(SettingsView::ALL.to_vec())) {
        let mut store = store();
        store.set_view(target);
        prop_assert_eq!(store.current_view(), target);
    }

    #[test]
    fn controls_round_trip(controls in control_ids()) {
        let mut store = store();
        store.update_controls_list(controls.clone());
        prop_assert_eq!(store.controls_list(), controls);
    }

    #[test]
    fn instrumentation_round_trip(sensors in sensors()) {
        let mut store = store();
        store.update_instrumentation_config(sensors.clone());
        prop_assert_eq!(store.instrumentation_config(), sensors);
    }

    #[test]
    fn automation_round_trip(profiles in profiles()) {
        let mut store = store();
        store.update_automation_profiles(profiles.clone());
        prop_assert_eq!(store.automation_profiles(), profiles);
    }

    #[test]
    fn any_json_array_is_stored_verbatim(
        collection in prop::sample::select(CollectionKind::ALL.to_vec()),
        payload in loose_records(),
    ) {
        let mut store = store();
        prop_assert!(store.write_json(collection, payload.clone()).is_ok());
        prop_assert_eq!(store.read_json(collection).ok(), Some(payload));
    }

    #[test]
    fn double_toggle_is_identity(
        flag in prop::sample::select(FeatureFlag::ALL.to_vec()),
        initial in any::<bool>(),
    ) {
        let mut store = store();
        store.toggle(flag, initial);
        store.toggle(flag, !initial);
        store.toggle(flag, initial);
        prop_assert_eq!(store.flag(flag), initial);
    }
}
