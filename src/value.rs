use crate::statics;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::time::SystemTime;

/// One node of a parsed config.plist document.
///
/// Every type a property list can carry gets an explicit tag, so consumers
/// dispatch with exhaustive matches instead of runtime casts. Dictionaries
/// keep document key order for stable round-trips; equality ignores it.
#[derive(Debug, Clone, PartialEq)]
pub enum CfgValue {
    String(String),
    Bool(bool),
    Int(i64),
    Double(f64),
    Data(Vec<u8>),
    Date(DateTime<Utc>),
    Array(Vec<CfgValue>),
    Dict(IndexMap<String, CfgValue>),
}

impl CfgValue {
    pub fn as_dict(&self) -> Option<&IndexMap<String, CfgValue>> {
        match self {
            CfgValue::Dict(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut IndexMap<String, CfgValue>> {
        match self {
            CfgValue::Dict(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[CfgValue]> {
        match self {
            CfgValue::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<CfgValue>> {
        match self {
            CfgValue::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CfgValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&CfgValue> {
        self.as_dict().and_then(|m| m.get(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut CfgValue> {
        self.as_dict_mut().and_then(|m| m.get_mut(key))
    }

    pub fn type_label(&self) -> &'static str {
        match self {
            CfgValue::String(_) => statics::TYPE_STRING,
            CfgValue::Bool(_) => statics::TYPE_BOOLEAN,
            CfgValue::Int(_) => statics::TYPE_INTEGER,
            CfgValue::Double(_) => statics::TYPE_DOUBLE,
            CfgValue::Data(_) => statics::TYPE_DATA,
            CfgValue::Date(_) => statics::TYPE_DATE,
            CfgValue::Array(_) => statics::TYPE_ARRAY,
            CfgValue::Dict(_) => statics::TYPE_DICTIONARY,
        }
    }

    /// Human-readable one-line rendering, as shown in the entry table.
    pub fn rendered_string(&self) -> String {
        match self {
            CfgValue::String(s) => s.clone(),
            CfgValue::Bool(v) => (if *v { "true" } else { "false" }).to_string(),
            CfgValue::Int(v) => v.to_string(),
            CfgValue::Double(v) => format!("{v:.2}"),
            CfgValue::Data(bytes) => format!("Data ({} bytes)", bytes.len()),
            CfgValue::Date(date) => date.format(statics::DATE_FORMAT).to_string(),
            CfgValue::Array(values) => format!("{} items", values.len()),
            CfgValue::Dict(map) => format!("{} keys", map.len()),
        }
    }

    /// True only for `Array([])` and `Dict({})`. Scalars are never "empty".
    pub fn is_empty_container(&self) -> bool {
        match self {
            CfgValue::Array(values) => values.is_empty(),
            CfgValue::Dict(map) => map.is_empty(),
            _ => false,
        }
    }

    pub fn from_plist(value: plist::Value) -> CfgValue {
        match value {
            plist::Value::String(s) => CfgValue::String(s),
            plist::Value::Boolean(v) => CfgValue::Bool(v),
            plist::Value::Integer(i) => match i.as_signed() {
                Some(v) => CfgValue::Int(v),
                // u64 values above i64::MAX degrade to Double.
                None => CfgValue::Double(i.as_unsigned().map_or(0.0, |v| v as f64)),
            },
            plist::Value::Real(v) => CfgValue::Double(v),
            plist::Value::Data(bytes) => CfgValue::Data(bytes),
            plist::Value::Date(date) => CfgValue::Date(SystemTime::from(date).into()),
            plist::Value::Array(values) => {
                CfgValue::Array(values.into_iter().map(CfgValue::from_plist).collect())
            }
            plist::Value::Dictionary(dict) => {
                let mut map = IndexMap::new();
                for (key, value) in dict {
                    map.insert(key, CfgValue::from_plist(value));
                }
                CfgValue::Dict(map)
            }
            plist::Value::Uid(uid) => CfgValue::Int(uid.get() as i64),
            // plist::Value is non_exhaustive; future variants degrade to an empty string.
            _ => CfgValue::String(String::new()),
        }
    }

    pub fn into_plist(self) -> plist::Value {
        match self {
            CfgValue::String(s) => plist::Value::String(s),
            CfgValue::Bool(v) => plist::Value::Boolean(v),
            CfgValue::Int(v) => plist::Value::Integer(v.into()),
            CfgValue::Double(v) => plist::Value::Real(v),
            CfgValue::Data(bytes) => plist::Value::Data(bytes),
            CfgValue::Date(date) => plist::Value::Date(SystemTime::from(date).into()),
            CfgValue::Array(values) => {
                plist::Value::Array(values.into_iter().map(CfgValue::into_plist).collect())
            }
            CfgValue::Dict(map) => {
                let mut dict = plist::Dictionary::new();
                for (key, value) in map {
                    dict.insert(key, value.into_plist());
                }
                plist::Value::Dictionary(dict)
            }
        }
    }

    /// Diagnostic JSON view: pretty-printed, keys sorted lexicographically.
    /// Data and Date collapse to their display strings, so this is one-way.
    pub fn to_json_pretty(&self) -> String {
        let mut out = String::new();
        self.write_json(&mut out, 0);
        out.push('\n');
        out
    }

    fn write_json(&self, out: &mut String, indent: usize) {
        match self {
            CfgValue::String(s) => write_escaped_string(out, s),
            CfgValue::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
            CfgValue::Int(v) => out.push_str(&v.to_string()),
            CfgValue::Double(v) => {
                let mut buf = ryu::Buffer::new();
                out.push_str(buf.format(*v));
            }
            CfgValue::Data(_) | CfgValue::Date(_) => {
                write_escaped_string(out, &self.rendered_string());
            }
            CfgValue::Array(values) => {
                out.push('[');
                if !values.is_empty() {
                    out.push('\n');
                    for (i, v) in values.iter().enumerate() {
                        out.push_str(&" ".repeat(indent + 4));
                        v.write_json(out, indent + 4);
                        if i + 1 != values.len() {
                            out.push(',');
                        }
                        out.push('\n');
                    }
                    out.push_str(&" ".repeat(indent));
                }
                out.push(']');
            }
            CfgValue::Dict(map) => {
                out.push('{');
                if !map.is_empty() {
                    out.push('\n');
                    let mut keys: Vec<&String> = map.keys().collect();
                    keys.sort();
                    for (i, k) in keys.iter().enumerate() {
                        out.push_str(&" ".repeat(indent + 4));
                        write_escaped_string(out, k);
                        out.push_str(": ");
                        map[*k].write_json(out, indent + 4);
                        if i + 1 != keys.len() {
                            out.push(',');
                        }
                        out.push('\n');
                    }
                    out.push_str(&" ".repeat(indent));
                }
                out.push('}');
            }
        }
    }
}

fn write_escaped_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write as _;
                write!(out, "\\u{:04X}", c as u32).ok();
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
