use serde::Serialize;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Airport {
    pub name: &'static str,
    pub icao: &'static str,
}

impl Airport {
    /// Dropdown label, e.g. "Sydney - YSSY".
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.icao)
    }
}

/// Airports offered by the dashboard dropdown, in display order.
pub const AIRPORTS: [Airport; 8] = [
    Airport { name: "Sydney", icao: "YSSY" },
    Airport { name: "Melbourne", icao: "YMML" },
    Airport { name: "Brisbane", icao: "YBBN" },
    Airport { name: "Frankfurt", icao: "EDDF" },
    Airport { name: "London Heathrow", icao: "EGLL" },
    Airport { name: "Los Angeles", icao: "KLAX" },
    Airport { name: "Paris Charles de Gaulle", icao: "LFPG" },
    Airport { name: "Amsterdam", icao: "EHAM" },
];

pub fn lookup(icao: &str) -> Option<&'static Airport> {
    let icao = icao.trim();
    AIRPORTS.iter().find(|a| a.icao.eq_ignore_ascii_case(icao))
}

/// Normalizes a user-supplied code to upper case and checks it has the ICAO
/// shape of four ASCII letters or digits. Codes outside the catalogue pass.
pub fn normalize_icao(code: &str) -> Result<String> {
    let code = code.trim().to_ascii_uppercase();
    if code.len() != 4 || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(AppError::BadRequest(format!(
            "airport must be a four character ICAO code, got {:?}",
            code
        )));
    }
    Ok(code)
}
