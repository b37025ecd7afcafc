use anyhow::{Context, Result, bail};
use schemars::Schema;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

/// One parameter of a tagged choice, as read back from its JSON schema.
#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Parameters of the `kind` branch of a `{"type", "params"}` tagged schema.
/// A branch without params yields an empty list.
pub fn param_specs(root: &Schema, kind: &str) -> Result<Vec<ParamSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;
    let branches = root_obj
        .get("oneOf")
        .or_else(|| root_obj.get("anyOf"))
        .and_then(Value::as_array)
        .context("schema has no oneOf/anyOf branches")?;

    for branch in branches {
        let Some(props) = branch.get("properties").and_then(Value::as_object) else {
            continue;
        };
        if !tag_matches(props, kind) {
            continue;
        }
        let Some(params) = props
            .get("params")
            .and_then(Value::as_object)
            .and_then(|p| resolve_ref(root_obj, p))
        else {
            return Ok(Vec::new());
        };
        let Some(fields) = params.get("properties").and_then(Value::as_object) else {
            return Ok(Vec::new());
        };

        let mut out = Vec::new();
        for (name, field) in fields {
            let Some(field) = field.as_object().and_then(|f| resolve_ref(root_obj, f)) else {
                continue;
            };
            let Some(kind) = field_kind(field.get("type")) else {
                continue;
            };
            out.push(ParamSpec {
                name: name.clone(),
                title: field
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or(name)
                    .to_string(),
                description: field
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                kind,
                default: field.get("default").cloned(),
                min: field
                    .get("minimum")
                    .or_else(|| field.get("exclusiveMinimum"))
                    .and_then(Value::as_f64),
                max: field
                    .get("maximum")
                    .or_else(|| field.get("exclusiveMaximum"))
                    .and_then(Value::as_f64),
            });
        }
        return Ok(out);
    }

    bail!("no branch found for type={kind}");
}

fn tag_matches(props: &Map<String, Value>, kind: &str) -> bool {
    let Some(tag) = props.get("type").and_then(Value::as_object) else {
        return false;
    };
    if tag.get("const").and_then(Value::as_str) == Some(kind) {
        return true;
    }
    matches!(
        tag.get("enum").and_then(Value::as_array).map(Vec::as_slice),
        Some([only]) if only.as_str() == Some(kind)
    )
}

/// Follows a local `#/...` reference. Objects without `$ref` resolve to themselves.
fn resolve_ref<'a>(
    root: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    let Some(Value::String(reference)) = obj.get("$ref") else {
        return Some(obj);
    };
    let mut cur = root;
    for raw in reference.strip_prefix("#/")?.split('/') {
        let seg = raw.replace("~1", "/").replace("~0", "~");
        cur = cur.get(&seg)?.as_object()?;
    }
    Some(cur)
}

fn field_kind(ty: Option<&Value>) -> Option<FieldKind> {
    let named = |s: &str| match s {
        "string" => Some(FieldKind::String),
        "integer" => Some(FieldKind::Integer),
        "number" => Some(FieldKind::Number),
        "boolean" => Some(FieldKind::Boolean),
        _ => None,
    };
    match ty {
        Some(Value::String(s)) => named(s),
        // nullable fields come through as ["null", "<type>"]
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).find_map(named),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{Choice, LearnerChoice, VotingChoice, WeightingChoice};
    use serde_json::json;

    #[test]
    fn exponent_branch_lists_power() {
        let specs = param_specs(&WeightingChoice::schema(), "exponential-train-accuracy").unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "power");
        assert_eq!(specs[0].kind, FieldKind::Number);
        assert_eq!(specs[0].default, Some(json!(4.0)));
        assert_eq!(specs[0].min, Some(0.0));
    }

    #[test]
    fn parameterless_branch_is_empty() {
        assert!(param_specs(&VotingChoice::schema(), "majority-vote")
            .unwrap()
            .is_empty());
        assert!(param_specs(&WeightingChoice::schema(), "equal")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn learner_branch_has_bounded_fraction() {
        let specs = param_specs(&LearnerChoice::schema(), "random-centroid").unwrap();
        assert_eq!(specs[0].name, "sample_fraction");
        assert_eq!(specs[0].min, Some(0.0));
        assert_eq!(specs[0].max, Some(1.0));
    }

    #[test]
    fn unknown_kind_errors() {
        let err = param_specs(&VotingChoice::schema(), "plurality").unwrap_err();
        assert!(err.to_string().contains("no branch found"));
    }

    #[test]
    fn nullable_union_reads_inner_type() {
        assert_eq!(
            field_kind(Some(&json!(["null", "integer"]))),
            Some(FieldKind::Integer)
        );
        assert_eq!(field_kind(Some(&json!("object"))), None);
    }

    #[test]
    fn refs_are_unescaped() {
        let root = json!({ "$defs": { "a~b": { "c/d": { "type": "number" } } } });
        let obj = json!({ "$ref": "#/$defs/a~0b/c~1d" });
        let out = resolve_ref(root.as_object().unwrap(), obj.as_object().unwrap()).unwrap();
        assert_eq!(out.get("type"), Some(&json!("number")));
    }
}
