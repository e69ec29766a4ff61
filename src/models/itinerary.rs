use chrono::{Days, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, DefaultOnNull, DisplayFromStr, PickFirst};
use thiserror::Error;

/// The model output did not have the shape of an itinerary.
#[derive(Debug, Error, PartialEq)]
#[error("{path}: {message}")]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Food,
    Sightseeing,
    /// Anything the model invents beyond the three known kinds lands here.
    #[default]
    #[serde(other)]
    Relax,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub activity: String,
    #[serde(rename = "type")]
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub kind: ActivityType,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde_as(as = "DefaultOnNull<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub day: u32,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub theme: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rate: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tips: String,
}

/// The itinerary returned to the client. Fields the model adds beyond the
/// known ones are kept in `extra` and serialized back at the top level.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDocument {
    #[serde(default, deserialize_with = "lenient_string")]
    pub trip_title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub currency: Currency,
    #[serde(default, deserialize_with = "lenient_string")]
    pub weather: String,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub packing_list: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub local_tips: Vec<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub days: Vec<DayPlan>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hero_image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ItineraryDocument {
    /// Turns parsed model output into a typed document.
    ///
    /// Missing fields become empty, `day` is renumbered to its position and
    /// days without a `date` get one derived from `start_date`. Anything with
    /// the wrong structure is rejected with the path that failed.
    pub fn from_model_output(
        value: Value,
        start_date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        if !value.is_object() {
            return Err(ValidationError {
                path: "<root>".to_string(),
                message: format!("expected a JSON object, found {}", value_kind(&value)),
            });
        }

        let mut document: ItineraryDocument =
            serde_path_to_error::deserialize(value).map_err(|err| {
                let path = err.path().to_string();
                ValidationError {
                    path: if path == "." { "<root>".to_string() } else { path },
                    message: err.into_inner().to_string(),
                }
            })?;

        document.repair(start_date);
        Ok(document)
    }

    fn repair(&mut self, start_date: Option<NaiveDate>) {
        for (idx, day) in self.days.iter_mut().enumerate() {
            let position = idx as u32 + 1;
            if day.day != position {
                log::debug!("Renumbering day {} to {}", day.day, position);
                day.day = position;
            }

            let missing_date = day.date.as_deref().map_or(true, |d| d.trim().is_empty());
            if missing_date {
                day.date = start_date
                    .and_then(|start| start.checked_add_days(Days::new(u64::from(position - 1))))
                    .map(|date| date.format("%Y-%m-%d").to_string());
            }
        }
    }

    /// Every activity across all days, in order.
    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.days.iter().flat_map(|day| day.activities.iter())
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn scalar_text<E: de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(E::custom(format!(
            "expected a string, found {}",
            value_kind(&other)
        ))),
    }
}

/// Accepts strings, numbers and booleans as text, and null as empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = scalar_text::<D::Error>(Value::deserialize(deserializer)?)?;
    Ok(text.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_text(Value::deserialize(deserializer)?)
}

/// A list of scalars as text. Null elements are dropped, a null list is empty.
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (idx, item) in items.into_iter().enumerate() {
                let text = scalar_text::<D::Error>(item)
                    .map_err(|e| <D::Error as de::Error>::custom(format!("[{}]: {}", idx, e)))?;
                out.extend(text);
            }
            Ok(out)
        }
        other => Err(de::Error::custom(format!(
            "expected a list, found {}",
            value_kind(&other)
        ))),
    }
}
