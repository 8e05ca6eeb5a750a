use std::fmt;

use crate::republica::tools::model::Value;

/// Coarse grouping of the delivery modality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalityBucket {
    Presencial,
    Semi,
    Distance,
}

impl ModalityBucket {
    /// Maps an uppercased MODALIDAD onto its bucket. Values outside the known
    /// set have no bucket.
    pub fn classify(modalidad: &str) -> Option<Self> {
        match modalidad {
            "DIARIO(REGULAR)" | "FIN DE SEMANA" => Some(ModalityBucket::Presencial),
            "SEMIPRESENCIAL" => Some(ModalityBucket::Semi),
            "A DISTANCIA" | "VIRTUAL A DISTANCIA" => Some(ModalityBucket::Distance),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModalityBucket::Presencial => "presencial",
            ModalityBucket::Semi => "semi",
            ModalityBucket::Distance => "distance",
        }
    }
}

impl fmt::Display for ModalityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// MOD_BUCKET cell for a MODALIDAD cell.
pub fn bucket_value(modalidad: &Value) -> Value {
    modalidad
        .as_text()
        .and_then(|text| ModalityBucket::classify(&text.to_uppercase()))
        .map(|bucket| Value::Text(bucket.to_string()))
        .unwrap_or(Value::Null)
}
