//! Analysis result schema
//!
//! The backend owns this format and nothing guarantees its shape, so every
//! field is optional. The raw JSON value is kept next to the typed view:
//! exports write the raw value back out untouched.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder shown for any field the backend did not return.
pub const NOT_AVAILABLE: &str = "N/A";

/// Typed result-or-default accessor over the optional schema.
pub trait OrNotAvailable {
    fn or_not_available(self) -> String;
}

impl OrNotAvailable for Option<String> {
    fn or_not_available(self) -> String {
        match self {
            Some(value) if !value.trim().is_empty() => value,
            _ => NOT_AVAILABLE.to_string(),
        }
    }
}

impl OrNotAvailable for Option<&str> {
    fn or_not_available(self) -> String {
        self.map(str::to_string).or_not_available()
    }
}

/// One analyzed document: the verbatim response plus its typed view.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    raw: Value,
    data: AnalysisData,
}

/// `data` payload of the analysis response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisData {
    #[serde(deserialize_with = "null_as_default")]
    pub documento: Documento,
    #[serde(deserialize_with = "null_as_default")]
    pub dados_remessa: DadosRemessa,
    #[serde(deserialize_with = "null_as_default")]
    pub transporte: Transporte,
    #[serde(deserialize_with = "null_items_as_default")]
    pub tabelas_detectadas: Vec<TabelaDetectada>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Documento {
    #[serde(deserialize_with = "lenient_text")]
    pub tipo_documento: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    /// Raw OCR text.
    #[serde(deserialize_with = "lenient_text")]
    pub conteudo_completo: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(deserialize_with = "lenient_text")]
    pub nome_arquivo: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub processado_em: Option<String>,
    pub tamanho: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DadosRemessa {
    #[serde(rename = "número_do_documento", deserialize_with = "null_as_default")]
    pub numero_documento: Campo,
    #[serde(rename = "data_de_saída", deserialize_with = "null_as_default")]
    pub data_saida: Campo,
    #[serde(rename = "responsável_pela_expedição", deserialize_with = "null_as_default")]
    pub responsavel_expedicao: Campo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transporte {
    #[serde(deserialize_with = "null_as_default")]
    pub nome_do_caminhoneiro: Campo,
    #[serde(rename = "placa_do_veículo", deserialize_with = "null_as_default")]
    pub placa_veiculo: Campo,
    #[serde(deserialize_with = "null_as_default")]
    pub valor_do_frete: Campo,
}

/// Extracted field, wrapped by the backend as `{ "valor": ... }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Campo {
    pub valor: Option<Value>,
}

impl Campo {
    pub fn text(&self) -> Option<String> {
        self.valor.as_ref().and_then(scalar_to_string)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabelaDetectada {
    /// Row 0 and row 1 are header-like, data starts at row 2.
    #[serde(deserialize_with = "null_items_as_default")]
    pub dados_estruturados: Vec<Vec<Value>>,
}

impl TabelaDetectada {
    /// All rows with every cell rendered as text.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.dados_estruturados
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| scalar_to_string(cell).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

/// `null` reads as the type's default; any other value must still fit `T`.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A list where both the list and any of its entries may be `null`.
fn null_items_as_default<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Display text from any JSON scalar; numbers and booleans are stringified.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

impl AnalysisResult {
    /// Builds a result from an API value.
    ///
    /// Accepts both the `{ "data": { ... } }` envelope returned by the upload
    /// endpoint and the bare payload some list entries carry. Missing or `null`
    /// fields become `None` or empty; a section or table of the wrong JSON type
    /// is an error.
    pub fn from_value(raw: Value) -> Result<Self> {
        let payload = match &raw {
            Value::Object(map) => match map.get("data") {
                Some(inner @ Value::Object(_)) => inner.clone(),
                Some(Value::Null) | None => raw.clone(),
                Some(other) => {
                    return Err(Error::Schema(format!(
                        "`data` must be an object, got {}",
                        json_kind(other)
                    )))
                }
            },
            other => {
                return Err(Error::Schema(format!(
                    "expected an object, got {}",
                    json_kind(other)
                )))
            }
        };
        let data: AnalysisData = serde_json::from_value(payload)?;
        Ok(Self { raw, data })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// The response exactly as received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn data(&self) -> &AnalysisData {
        &self.data
    }

    pub fn file_name(&self) -> Option<String> {
        non_empty(self.data.documento.metadata.nome_arquivo.as_deref())
    }

    pub fn document_type(&self) -> Option<String> {
        non_empty(self.data.documento.tipo_documento.as_deref())
    }

    pub fn processed_at(&self) -> Option<String> {
        non_empty(self.data.documento.metadata.processado_em.as_deref())
    }

    pub fn file_size(&self) -> Option<String> {
        self.data
            .documento
            .metadata
            .tamanho
            .as_ref()
            .and_then(scalar_to_string)
    }

    pub fn status(&self) -> Option<String> {
        non_empty(self.data.documento.status.as_deref())
    }

    pub fn raw_text(&self) -> Option<String> {
        self.data.documento.conteudo_completo.clone()
    }

    pub fn document_number(&self) -> Option<String> {
        self.data.dados_remessa.numero_documento.text()
    }

    pub fn departure_date(&self) -> Option<String> {
        self.data.dados_remessa.data_saida.text()
    }

    pub fn dispatcher(&self) -> Option<String> {
        self.data.dados_remessa.responsavel_expedicao.text()
    }

    pub fn driver(&self) -> Option<String> {
        self.data.transporte.nome_do_caminhoneiro.text()
    }

    pub fn plate(&self) -> Option<String> {
        self.data.transporte.placa_veiculo.text()
    }

    pub fn freight_value(&self) -> Option<String> {
        self.data.transporte.valor_do_frete.text()
    }

    /// First detected table, if the backend found any.
    pub fn first_table(&self) -> Option<&TabelaDetectada> {
        self.data.tabelas_detectadas.first()
    }
}

impl Serialize for AnalysisResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AnalysisResult {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        AnalysisResult::from_value(raw).map_err(serde::de::Error::custom)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    pub fn sample_response() -> Value {
        json!({
            "data": {
                "documento": {
                    "tipo_documento": "nota_de_remessa",
                    "metadata": {
                        "nome_arquivo": "remessa_0042.png",
                        "processado_em": "2025-03-14T09:26:53.589793",
                        "tamanho": 183245
                    },
                    "conteudo_completo": "NOTA DE REMESSA\nN° 0042\nMotorista: João Silva"
                },
                "dados_remessa": {
                    "número_do_documento": { "valor": "0042" },
                    "data_de_saída": { "valor": "13/03/2025" },
                    "responsável_pela_expedição": { "valor": "Maria Souza" }
                },
                "transporte": {
                    "nome_do_caminhoneiro": { "valor": "João Silva" },
                    "placa_do_veículo": { "valor": "ABC-1D23" },
                    "valor_do_frete": { "valor": 350.5 }
                },
                "tabelas_detectadas": [
                    {
                        "dados_estruturados": [
                            ["Produto", "Qtd", "Unidade"],
                            ["", "", ""],
                            ["Cimento CP-II", 40, "saco"],
                            ["Areia média", "2", "m³"]
                        ]
                    }
                ]
            },
            "extra_backend_field": { "kept": true }
        })
    }
}
