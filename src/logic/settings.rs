//! Settings form definitions
//!
//! Static description of the two settings tabs and the pure helpers that
//! turn server values into form values and back into a POST payload.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    #[default]
    General,
    Translation,
}

impl SettingsTab {
    pub fn all() -> [SettingsTab; 2] {
        [SettingsTab::General, SettingsTab::Translation]
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            SettingsTab::General => "/setting/",
            SettingsTab::Translation => "/setting/trans/",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SettingsTab::General => "General",
            SettingsTab::Translation => "Translation",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SettingsTab::General => SettingsTab::Translation,
            SettingsTab::Translation => SettingsTab::General,
        }
    }
}

/// Typed value of a select option, posted back with its original JSON type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionValue {
    Int(i64),
    Bool(bool),
}

impl OptionValue {
    pub fn to_json(self) -> Value {
        match self {
            OptionValue::Int(n) => Value::from(n),
            OptionValue::Bool(b) => Value::Bool(b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: OptionValue,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Select(&'static [SelectOption]),
    Input { disabled: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingDef {
    pub id: &'static str,
    pub label: &'static str,
    pub desc: &'static str,
    pub kind: FieldKind,
    /// Definition default, used before the first option
    pub default: Option<&'static str>,
}

impl SettingDef {
    pub fn options(&self) -> &'static [SelectOption] {
        match self.kind {
            FieldKind::Select(options) => options,
            FieldKind::Input { .. } => &[],
        }
    }

    pub fn is_editable(&self) -> bool {
        !matches!(self.kind, FieldKind::Input { disabled: true })
    }
}

const MODEL_TYPES: &[SelectOption] = &[
    SelectOption { value: OptionValue::Int(1), label: "1" },
    SelectOption { value: OptionValue::Int(2), label: "2" },
    SelectOption { value: OptionValue::Int(3), label: "3" },
];

const DEVICES: &[SelectOption] = &[
    SelectOption { value: OptionValue::Int(0), label: "GPU" },
    SelectOption { value: OptionValue::Int(1), label: "CPU" },
];

const OFF_ON_INT: &[SelectOption] = &[
    SelectOption { value: OptionValue::Int(0), label: "Disabled" },
    SelectOption { value: OptionValue::Int(1), label: "Enabled" },
];

const OFF_ON: &[SelectOption] = &[
    SelectOption { value: OptionValue::Bool(false), label: "Disabled" },
    SelectOption { value: OptionValue::Bool(true), label: "Enabled" },
];

const ON_OFF: &[SelectOption] = &[
    SelectOption { value: OptionValue::Bool(true), label: "Enabled" },
    SelectOption { value: OptionValue::Bool(false), label: "Disabled" },
];

const GENERAL: &[SettingDef] = &[
    SettingDef {
        id: "model_type",
        label: "Model type",
        desc: "Model size. Larger models are better and heavier.",
        kind: FieldKind::Select(MODEL_TYPES),
        default: None,
    },
    SettingDef {
        id: "model_device",
        label: "Model device",
        desc: "Device the model runs on.",
        kind: FieldKind::Select(DEVICES),
        default: None,
    },
    SettingDef {
        id: "device_map",
        label: "Device map",
        desc: "Split the model across CPU and GPU. Loading gets slower.",
        kind: FieldKind::Select(OFF_ON_INT),
        default: None,
    },
    SettingDef {
        id: "debug_mod",
        label: "Debug mode",
        desc: "Write debug lines to the server log.",
        kind: FieldKind::Select(OFF_ON),
        default: None,
    },
    SettingDef {
        id: "log_path",
        label: "Log path",
        desc: "Folder all server logs are written to.",
        kind: FieldKind::Input { disabled: true },
        default: Some("/log"),
    },
];

const TRANSLATION: &[SettingDef] = &[
    SettingDef {
        id: "nomal_trans",
        label: "Model translation",
        desc: "Translate with the local model.",
        kind: FieldKind::Select(ON_OFF),
        default: None,
    },
    SettingDef {
        id: "per_post_trans",
        label: "Dictionary translation",
        desc: "Apply the selected custom dictionary.",
        kind: FieldKind::Select(ON_OFF),
        default: None,
    },
    SettingDef {
        id: "gemini_integration",
        label: "Gemini refinement",
        desc: "Let Gemini polish the sentence.",
        kind: FieldKind::Select(ON_OFF),
        default: None,
    },
    SettingDef {
        id: "gemini_api",
        label: "Gemini API key",
        desc: "Required for Gemini refinement.",
        kind: FieldKind::Input { disabled: false },
        default: None,
    },
];

pub fn definitions(tab: SettingsTab) -> &'static [SettingDef] {
    match tab {
        SettingsTab::General => GENERAL,
        SettingsTab::Translation => TRANSLATION,
    }
}

/// Server-managed or display-only keys never posted back
fn stripped_keys(tab: SettingsTab) -> &'static [&'static str] {
    match tab {
        SettingsTab::General => &["log_path"],
        SettingsTab::Translation => &["tkdic_path", "tkdic_list", "tkdic_select"],
    }
}

/// String form used to compare values against options ("1", "true", ...)
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Convert a raw form string back to the option's original type.
///
/// Unknown strings and input fields stay strings.
pub fn coerce_value(def: &SettingDef, raw: &str) -> Value {
    def.options()
        .iter()
        .find(|opt| value_to_string(&opt.value.to_json()) == raw)
        .map(|opt| opt.value.to_json())
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

/// Form values for a tab.
///
/// Per field: server value, else the definition default, else the first
/// option, else "". Extra server keys are carried along untouched.
pub fn initial_values(tab: SettingsTab, server: Option<&Map<String, Value>>) -> Map<String, Value> {
    let mut values = server.cloned().unwrap_or_default();

    for def in definitions(tab) {
        let from_server = values.get(def.id).filter(|v| !v.is_null()).cloned();
        let value = from_server.unwrap_or_else(|| {
            if let Some(default) = def.default {
                Value::String(default.to_string())
            } else if let Some(first) = def.options().first() {
                first.value.to_json()
            } else {
                Value::String(String::new())
            }
        });
        values.insert(def.id.to_string(), value);
    }

    values
}

pub fn option_index(def: &SettingDef, value: &Value) -> Option<usize> {
    let current = value_to_string(value);
    def.options()
        .iter()
        .position(|opt| value_to_string(&opt.value.to_json()) == current)
}

/// Next (or previous) option value, wrapping around
pub fn cycle_option(def: &SettingDef, current: &Value, forward: bool) -> Option<Value> {
    let options = def.options();
    if options.is_empty() {
        return None;
    }
    let len = options.len();
    let next = match option_index(def, current) {
        Some(idx) if forward => (idx + 1) % len,
        Some(idx) => (idx + len - 1) % len,
        None => 0,
    };
    Some(options[next].value.to_json())
}

/// Payload for `POST <tab endpoint>`: form fields only, minus stripped keys
pub fn strip_payload(tab: SettingsTab, values: &Map<String, Value>) -> Map<String, Value> {
    let stripped = stripped_keys(tab);
    definitions(tab)
        .iter()
        .filter(|def| !stripped.contains(&def.id))
        .filter_map(|def| {
            let value = values.get(def.id)?;
            let value = match def.kind {
                FieldKind::Select(_) => coerce_value(def, &value_to_string(value)),
                FieldKind::Input { .. } => Value::String(value_to_string(value)),
            };
            Some((def.id.to_string(), value))
        })
        .collect()
}

/// Text shown for a field's value (option label for selects)
pub fn display_value(def: &SettingDef, value: &Value) -> String {
    match def.kind {
        FieldKind::Select(options) => option_index(def, value)
            .map(|idx| options[idx].label.to_string())
            .unwrap_or_else(|| value_to_string(value)),
        FieldKind::Input { .. } => value_to_string(value),
    }
}
