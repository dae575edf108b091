//! Field extraction from loosely typed request bodies

use serde_json::Value;

use crate::{
    animation::AnimationId,
    color::{Rgb, clamp_rgb},
    emotion::FALLBACK_MOOD,
};

/// Parse a body, treating anything that is not JSON as an empty object
pub fn parse_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

fn field<'a>(body: &'a Value, name: &str) -> Option<&'a Value> {
    body.get(name).filter(|value| !value.is_null())
}

#[allow(clippy::cast_possible_truncation)]
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>().ok().or_else(|| {
                text.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}

/// `brightness` as a whole number, unclamped
pub fn brightness(body: &Value) -> Result<i64, String> {
    let value = field(body, "brightness").ok_or("brightness parameter missing")?;
    as_integer(value).ok_or_else(|| format!("brightness must be a number, got {value}"))
}

/// `emotion` label, `neutral` when absent
pub fn emotion(body: &Value) -> Result<String, String> {
    match field(body, "emotion") {
        None => Ok(FALLBACK_MOOD.to_string()),
        Some(Value::String(label)) => Ok(label.clone()),
        Some(other) => Err(format!("emotion must be a string, got {other}")),
    }
}

/// `message` text; numbers and booleans are accepted as their text
pub fn message(body: &Value) -> Result<String, String> {
    let text = match field(body, "message") {
        Some(Value::String(text)) => text.clone(),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => value.to_string(),
        Some(_) => return Err("message must be text".to_string()),
        None => String::new(),
    };
    if text.is_empty() {
        return Err("message parameter missing".to_string());
    }
    Ok(text)
}

/// `r`, `g` and `b` channels, clamped into 0-255
pub fn color(body: &Value) -> Result<Rgb, String> {
    let channel = |name: &str| {
        field(body, name)
            .and_then(as_integer)
            .ok_or_else(|| format!("{name} must be an integer"))
    };
    Ok(clamp_rgb(channel("r")?, channel("g")?, channel("b")?))
}

/// `animation` name, plus a color when any of `r`, `g` or `b` is present
pub fn animation(body: &Value) -> Result<(AnimationId, Option<Rgb>), String> {
    let name = match field(body, "animation") {
        Some(Value::String(name)) => name.trim().to_ascii_lowercase(),
        Some(other) => return Err(format!("animation must be a string, got {other}")),
        None => return Err("animation parameter missing".to_string()),
    };
    let id = AnimationId::parse_from_str(&name).ok_or_else(|| {
        let known: Vec<&str> = AnimationId::ALL.iter().map(|id| id.as_str()).collect();
        format!("unknown animation {name:?}, expected one of {}", known.join(", "))
    })?;

    let colored = ["r", "g", "b"]
        .iter()
        .any(|name| field(body, name).is_some());
    let color = if colored { Some(color(body)?) } else { None };
    Ok((id, color))
}
