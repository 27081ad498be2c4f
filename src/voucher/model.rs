use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Room counts of a booking. Any count missing from the stored record is 0.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Accommodations {
    #[serde(deserialize_with = "count")]
    pub single: u32,
    #[serde(deserialize_with = "count")]
    pub double: u32,
    #[serde(deserialize_with = "count")]
    pub triple: u32,
}

impl Accommodations {
    /// `Single {n} | Double {n} | Triple {n}`, always listing all three counts
    pub fn summary(&self) -> String {
        format!(
            "Single {} | Double {} | Triple {}",
            self.single, self.double, self.triple
        )
    }
}

/// A voucher record as it is stored.
///
/// Every field is optional on the way in: missing values, `null`s, and numbers where
/// text was expected all degrade to an empty string (or zero, or `false`) instead of
/// failing, so a partially filled record still renders.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Voucher {
    #[serde(deserialize_with = "optional_text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "text")]
    pub empresa: String,
    #[serde(deserialize_with = "text")]
    pub operacao: String,
    #[serde(deserialize_with = "optional_text")]
    pub checkin: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub checkout: Option<String>,
    #[serde(deserialize_with = "names")]
    pub hospedes: Vec<String>,
    #[serde(deserialize_with = "accommodations")]
    pub acomodacoes: Accommodations,
    #[serde(deserialize_with = "text")]
    pub hotel_nome: String,
    #[serde(deserialize_with = "text")]
    pub hotel_endereco: String,
    #[serde(deserialize_with = "text")]
    pub hotel_cafe: String,
    #[serde(deserialize_with = "text")]
    pub hotel_lavanderia: String,
    #[serde(deserialize_with = "text")]
    pub restaurante_nome: String,
    #[serde(deserialize_with = "text")]
    pub restaurante_horario: String,
    #[serde(deserialize_with = "text")]
    pub restaurante_endereco: String,
    #[serde(deserialize_with = "flag")]
    pub faturado_empresa: bool,
    #[serde(deserialize_with = "optional_text")]
    pub empresa_faturada: Option<String>,
    #[serde(deserialize_with = "text")]
    pub responsavel_reserva: String,
    #[serde(deserialize_with = "text")]
    pub responsavel_operacional: String,
    #[serde(deserialize_with = "text")]
    pub email_contato: String,
    #[serde(deserialize_with = "text")]
    pub telefone_contato: String,
    #[serde(deserialize_with = "optional_text")]
    pub observacoes: Option<String>,
}

impl Voucher {
    /// Parse a single voucher from JSON
    pub fn from_json(json: &str) -> Result<Voucher, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The voucher id, unless it is missing or blank
    pub fn reference(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// The guests as a 1-indexed list, one per line: `1. Ana\n2. Bruno`
    pub fn guest_list(&self) -> String {
        self.hospedes
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{}. {}", i + 1, name.trim()))
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Who the stay is invoiced to
    pub fn billing_note(&self) -> String {
        if !self.faturado_empresa {
            return "Não faturado para empresa".to_string();
        }
        let company = self
            .empresa_faturada
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.empresa);
        format!("Faturado para: {company}")
    }

    /// The observations, if there is anything other than whitespace in them
    pub fn observations(&self) -> Option<&str> {
        self.observacoes
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn checkin_display(&self) -> String {
        format_date_br(self.checkin.as_deref())
    }

    pub fn checkout_display(&self) -> String {
        format_date_br(self.checkout.as_deref())
    }
}

/// Formats a stored date as `dd/mm/yyyy`.
///
/// Plain `YYYY-MM-DD` dates and timestamps (RFC 3339, or ISO 8601 without an offset)
/// are understood. Anything else is returned unchanged.
///
/// ```
/// use voucher_pdf::voucher::format_date_br;
///
/// assert_eq!(format_date_br(Some("2025-03-10")), "10/03/2025");
/// assert_eq!(format_date_br(Some("2025-03-10T14:00:00-03:00")), "10/03/2025");
/// assert_eq!(format_date_br(None), "");
/// ```
pub fn format_date_br(raw: Option<&str>) -> String {
    const DISPLAY: &str = "%d/%m/%Y";

    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return String::new();
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format(DISPLAY).to_string();
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.format(DISPLAY).to_string();
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return timestamp.format(DISPLAY).to_string();
    }

    log::warn!("unrecognised date {raw:?}, showing it as-is");
    raw.to_string()
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(value_to_text))
}

fn names<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let names = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.into_iter().filter_map(value_to_text).collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    };
    Ok(names)
}

fn accommodations<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Accommodations, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .map(accommodations_from_value)
        .unwrap_or_default())
}

/// Room counts from whatever shape the store kept them in. Objects are read field
/// by field, JSON-encoded strings are decoded first, anything else counts as no rooms.
fn accommodations_from_value(value: Value) -> Accommodations {
    match value {
        Value::Object(_) | Value::Array(_) => serde_json::from_value(value).unwrap_or_default(),
        Value::String(encoded) => serde_json::from_str::<Value>(&encoded)
            .map(accommodations_from_value)
            .unwrap_or_default(),
        _ => Accommodations::default(),
    }
}

fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let count = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().map(|n| n.min(u32::MAX as u64) as u32),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(count.unwrap_or(0))
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let flag = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => matches!(s.trim(), "true" | "TRUE" | "True" | "1"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    };
    Ok(flag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_complete_record() {
        let voucher = Voucher::from_json(
            r#"{
                "id": 42,
                "created_at": "2025-02-01T12:00:00+00:00",
                "empresa": "ACME Mineração",
                "operacao": "Parada 2025",
                "checkin": "2025-03-10",
                "checkout": "2025-03-14",
                "hospedes": ["Ana", "Bruno"],
                "acomodacoes": {"single": 1, "double": 2},
                "hotel_nome": "Pousada Pedra Branca",
                "faturado_empresa": true,
                "empresa_faturada": "ACME Holding",
                "observacoes": "Chegada tardia"
            }"#,
        )
        .unwrap();

        assert_eq!(voucher.id.as_deref(), Some("42"));
        assert_eq!(voucher.hospedes, vec!["Ana", "Bruno"]);
        assert_eq!(voucher.acomodacoes.summary(), "Single 1 | Double 2 | Triple 0");
        assert_eq!(voucher.checkin_display(), "10/03/2025");
        assert_eq!(voucher.billing_note(), "Faturado para: ACME Holding");
        assert_eq!(voucher.observations(), Some("Chegada tardia"));
        assert_eq!(voucher.restaurante_nome, "");
    }

    #[test]
    fn nulls_and_missing_fields_degrade_to_defaults() {
        let voucher = Voucher::from_json(
            r#"{"empresa": null, "hospedes": null, "acomodacoes": null,
                "faturado_empresa": null, "checkin": null, "observacoes": "   "}"#,
        )
        .unwrap();
        assert_eq!(voucher.empresa, "");
        assert!(voucher.hospedes.is_empty());
        assert_eq!(voucher.acomodacoes, Accommodations::default());
        assert!(!voucher.faturado_empresa);
        assert_eq!(voucher.checkin_display(), "");
        assert_eq!(voucher.observations(), None);
        assert_eq!(voucher.guest_list(), "");
    }

    #[test]
    fn empty_accommodations_summarise_as_zeroes() {
        let voucher = Voucher::from_json(r#"{"acomodacoes": {}}"#).unwrap();
        assert_eq!(voucher.acomodacoes.summary(), "Single 0 | Double 0 | Triple 0");
        let partial = Voucher::from_json(r#"{"acomodacoes": {"triple": "3", "double": null}}"#).unwrap();
        assert_eq!(partial.acomodacoes.summary(), "Single 0 | Double 0 | Triple 3");
    }

    #[test]
    fn encoded_accommodations_are_decoded() {
        let voucher =
            Voucher::from_json(r#"{"empresa": "ACME", "acomodacoes": "{\"single\": 1, \"triple\": 2}"}"#)
                .unwrap();
        assert_eq!(voucher.acomodacoes.summary(), "Single 1 | Double 0 | Triple 2");
        assert_eq!(voucher.empresa, "ACME");
    }

    #[test]
    fn unreadable_accommodations_count_as_no_rooms() {
        for raw in [r#"0"#, r#"true"#, r#""não informado""#, r#""""#, r#"[]"#] {
            let voucher = Voucher::from_json(&format!(r#"{{"empresa": "ACME", "acomodacoes": {raw}}}"#))
                .unwrap_or_else(|e| panic!("acomodacoes {raw} should not fail: {e}"));
            assert_eq!(voucher.acomodacoes, Accommodations::default(), "acomodacoes {raw}");
            assert_eq!(voucher.empresa, "ACME");
        }
    }

    #[test]
    fn blank_ids_have_no_reference() {
        let mut voucher = Voucher {
            id: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(voucher.reference(), None);
        voucher.id = Some(" 42 ".into());
        assert_eq!(voucher.reference(), Some("42"));
    }

    #[test]
    fn guests_are_numbered_from_one() {
        let voucher = Voucher {
            hospedes: vec!["Ana".into(), "Bruno".into(), "Carla".into()],
            ..Default::default()
        };
        assert_eq!(voucher.guest_list(), "1. Ana\n2. Bruno\n3. Carla");
    }

    #[test]
    fn billing_falls_back_to_the_booking_company() {
        let mut voucher = Voucher {
            empresa: "ACME".into(),
            faturado_empresa: true,
            empresa_faturada: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(voucher.billing_note(), "Faturado para: ACME");
        voucher.faturado_empresa = false;
        assert_eq!(voucher.billing_note(), "Não faturado para empresa");
    }

    #[test]
    fn dates_are_shown_in_brazilian_format() {
        assert_eq!(format_date_br(Some("2025-12-01")), "01/12/2025");
        assert_eq!(format_date_br(Some("2025-12-01T00:00:00")), "01/12/2025");
        assert_eq!(format_date_br(Some("2025-12-01T23:30:00.000Z")), "01/12/2025");
        assert_eq!(format_date_br(Some("  ")), "");
        assert_eq!(format_date_br(Some("amanhã")), "amanhã");
    }
}
