//! Project schema definitions.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use wsp_catalog::{FixtureCatalog, FixtureKey, material_code};
use wsp_engine::DesignSettings;
use wsp_network::{NodeInput, NodeKind};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pipes: Vec<PipeRecord>,
    /// Empty means the built-in catalog.
    #[serde(default)]
    pub fixture_specs: FixtureCatalog,
    #[serde(default)]
    pub settings: DesignSettings,
}

impl Project {
    pub fn record(&self, id: &str) -> Option<&PipeRecord> {
        self.pipes.iter().find(|p| p.id == id)
    }

    pub fn record_mut(&mut self, id: &str) -> Option<&mut PipeRecord> {
        self.pipes.iter_mut().find(|p| p.id == id)
    }

    /// The parentless record, if there is exactly one.
    pub fn root(&self) -> Option<&PipeRecord> {
        let mut roots = self.pipes.iter().filter(|p| p.parent.is_none());
        match (roots.next(), roots.next()) {
            (Some(root), None) => Some(root),
            _ => None,
        }
    }

    /// Fixture catalog a calculation should use.
    pub fn fixture_catalog(&self) -> FixtureCatalog {
        if self.fixture_specs.is_empty() {
            FixtureCatalog::builtin()
        } else {
            self.fixture_specs.clone()
        }
    }
}

/// One flat node record as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipeRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub fixtures: BTreeMap<FixtureKey, u32>,
    /// `None` means automatic sizing.
    #[serde(default, deserialize_with = "optional_choice")]
    pub manual_size: Option<String>,
    #[serde(default = "default_dwelling_count")]
    pub dwelling_count: u32,
    #[serde(default)]
    pub person_count: u32,
    /// `None` means the project's default material. Legacy
    /// `"<code> (<description>)"` names are stored as the bare code.
    #[serde(default, deserialize_with = "material_choice")]
    pub specific_pipe_type: Option<String>,
    #[serde(default = "default_length")]
    pub length: f64,
    #[serde(default)]
    pub is_fixed_flow: bool,
    #[serde(default)]
    pub fixed_flow_val: f64,
    #[serde(default)]
    pub is_manual_critical: bool,
    #[serde(default)]
    pub static_head: f64,
    #[serde(default)]
    pub required_pressure: f64,
    #[serde(default)]
    pub equivalent_length: f64,
    #[serde(default = "default_length")]
    pub inner_pipe_length: f64,
    #[serde(default)]
    pub fixture_type: Option<FixtureKey>,
}

fn default_dwelling_count() -> u32 {
    1
}

fn default_length() -> f64 {
    2.0
}

/// Placeholder values meaning "no override".
const NO_CHOICE: &[&str] = &["", "auto", "自動計算", "(基本)", "(基本設定に従う)"];

fn optional_choice<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|v| !NO_CHOICE.contains(&v.trim())))
}

fn material_choice<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(optional_choice(deserializer)?.map(|name| material_code(&name).to_string()))
}

impl PipeRecord {
    /// A record with every optional field at its default.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: NodeKind,
        parent: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            parent,
            fixtures: BTreeMap::new(),
            manual_size: None,
            dwelling_count: default_dwelling_count(),
            person_count: 0,
            specific_pipe_type: None,
            length: default_length(),
            is_fixed_flow: false,
            fixed_flow_val: 0.0,
            is_manual_critical: false,
            static_head: 0.0,
            required_pressure: 0.0,
            equivalent_length: 0.0,
            inner_pipe_length: default_length(),
            fixture_type: None,
        }
    }

    /// Design inputs for the calculation tree.
    pub fn to_input(&self) -> NodeInput {
        NodeInput {
            fixtures: self.fixtures.clone(),
            fixture_type: self.fixture_type.clone(),
            dwelling_count: self.dwelling_count,
            person_count: self.person_count,
            fixed_flow_lpm: self.is_fixed_flow.then_some(self.fixed_flow_val),
            length_m: self.length,
            equivalent_length_m: self.equivalent_length,
            manual_size: self.manual_size.clone(),
            material: self.specific_pipe_type.clone(),
            static_head_m: self.static_head,
            required_pressure: self.required_pressure,
            is_manual_critical: self.is_manual_critical,
            inner_pipe_length_m: self.inner_pipe_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_defaults_fill_missing_fields() {
        let json = r#"{ "id": "s1", "name": "Unit", "type": "system", "parent": "root" }"#;
        let record: PipeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, PipeRecord::new("s1", "Unit", NodeKind::System, Some("root".into())));
    }

    #[test]
    fn placeholder_choices_mean_none() {
        let json = r#"{
            "id": "s1", "name": "Unit", "type": "system", "parent": null,
            "manual_size": "自動計算", "specific_pipe_type": ""
        }"#;
        let record: PipeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.manual_size, None);
        assert_eq!(record.specific_pipe_type, None);

        let json = r#"{ "id": "s1", "name": "Unit", "type": "system", "manual_size": "25A" }"#;
        let record: PipeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.manual_size.as_deref(), Some("25A"));
    }

    #[test]
    fn fixed_flow_flag_gates_value() {
        let mut record = PipeRecord::new("s1", "Unit", NodeKind::System, None);
        record.fixed_flow_val = 40.0;
        assert_eq!(record.to_input().fixed_flow_lpm, None);
        record.is_fixed_flow = true;
        assert_eq!(record.to_input().fixed_flow_lpm, Some(40.0));
    }

    #[test]
    fn fixture_keys_parse_from_persisted_strings() {
        let json = r#"{
            "id": "s1", "name": "Unit", "type": "system",
            "fixtures": { "大便器 (タンク) (私)": 1, "洗面器 (公)": 2 },
            "fixture_type": "浴槽 (私)"
        }"#;
        let record: PipeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.fixtures[&FixtureKey::private("大便器 (タンク)")], 1);
        assert_eq!(record.fixtures[&FixtureKey::public("洗面器")], 2);
        assert_eq!(record.fixture_type, Some(FixtureKey::private("浴槽")));
    }
}
