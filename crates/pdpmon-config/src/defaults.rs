//! Built-in instrumentation channels and new-record templates.
//!
//! # Design
//! - Mirror the test stand's channel layout: pressures, temperatures, loads.
//! - Full-width channels span the whole grid; the rest share a row of three.

use serde_json::json;

use crate::model::InstrumentationSensor;

/// Grid width of a channel that spans the full dashboard row.
pub const FULL_WIDTH_SENSOR_SIZE: u32 = 12;
/// Grid width of a channel sharing a row with two others.
pub const THIRD_WIDTH_SENSOR_SIZE: u32 = 4;
/// Grid width given to sensors created from the editor template.
pub const TEMPLATE_SENSOR_SIZE: u32 = 9;

const CHANNELS: [(&str, &str, u32); 11] = [
    ("P_RUN_TANK", "Runtank Pressure", FULL_WIDTH_SENSOR_SIZE),
    ("P_COMB_CHMBR", "Comb Chmbr. Pressure", THIRD_WIDTH_SENSOR_SIZE),
    ("P_N2O_FLOW", "N2O Flow Pressure", THIRD_WIDTH_SENSOR_SIZE),
    ("P_N2_FLOW", "N2 Flow Pressure", THIRD_WIDTH_SENSOR_SIZE),
    ("P_INJECTOR", "Injector Pressure", THIRD_WIDTH_SENSOR_SIZE),
    ("T_RUN_TANK", "Runtank Temp", THIRD_WIDTH_SENSOR_SIZE),
    ("T_INJECTOR", "Injector Temp", THIRD_WIDTH_SENSOR_SIZE),
    ("T_COMB_CHMBR", "Comb Chmbr. Temp", THIRD_WIDTH_SENSOR_SIZE),
    ("T_POST_COMB", "Post Comb Chmbr. Temp", THIRD_WIDTH_SENSOR_SIZE),
    ("L_THRUST", "Thrust", THIRD_WIDTH_SENSOR_SIZE),
    ("L_RUN_TANK", "Runtank Mass", FULL_WIDTH_SENSOR_SIZE),
];

/// Instrumentation collection used when no seed supplies one.
#[must_use]
pub fn default_instrumentation() -> Vec<InstrumentationSensor> {
    CHANNELS
        .iter()
        .map(|(key, label, size)| InstrumentationSensor::graph(key, label, *size))
        .collect()
}

/// Record inserted when a new instrumentation element is created in the editor.
///
/// The `{TYPE}` and `{LABEL}` placeholders are left for the operator to fill in.
#[must_use]
pub fn sensor_template() -> InstrumentationSensor {
    InstrumentationSensor::from(json!({
        "label": "Default Label",
        "key": "{TYPE}_{LABEL}",
        "type": "{TYPE}",
        "display": true,
        "visualizationType": "graph",
        "size": TEMPLATE_SENSOR_SIZE,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_channels_are_unique_and_typed() {
        let sensors = default_instrumentation();
        assert_eq!(sensors.len(), 11);
        let keys: HashSet<_> = sensors.iter().filter_map(InstrumentationSensor::key).collect();
        assert_eq!(keys.len(), 11);
        for sensor in &sensors {
            let key = sensor.key().expect("key");
            let kind = sensor.sensor_type().expect("type");
            assert!(key.starts_with(kind));
            assert!(matches!(kind, "P" | "T" | "L"));
        }
    }

    #[test]
    fn full_width_channels_are_run_tank_pressure_and_mass() {
        let wide: Vec<_> = default_instrumentation()
            .into_iter()
            .filter(|s| s.size() == Some(u64::from(FULL_WIDTH_SENSOR_SIZE)))
            .filter_map(|s| s.key().map(str::to_string))
            .collect();
        assert_eq!(wide, vec!["P_RUN_TANK", "L_RUN_TANK"]);
    }

    #[test]
    fn template_serializes_with_placeholders() {
        let value = serde_json::to_value(sensor_template()).expect("encode template");
        assert_eq!(value["key"], "{TYPE}_{LABEL}");
        assert_eq!(value["visualizationType"], "graph");
        assert_eq!(value["size"], 9);
    }
}
