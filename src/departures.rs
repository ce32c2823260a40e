//! Departure records and the destination frequency table derived from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Keys every departure row is decoded from.
pub const REQUIRED_KEYS: [&str; 3] = ["estDepartureAirport", "estArrivalAirport", "callsign"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartureRecord {
    pub from: String,
    pub to: String,
    pub callsign: String,
}

/// Raw row from the OpenSky departures endpoint. Every field is optional
/// because the API returns `null` for unknown airports.
#[derive(Debug, Deserialize)]
pub struct RawDeparture {
    #[serde(rename = "estDepartureAirport", default)]
    pub est_departure_airport: Option<String>,
    #[serde(rename = "estArrivalAirport", default)]
    pub est_arrival_airport: Option<String>,
    #[serde(default)]
    pub callsign: Option<String>,
}

impl RawDeparture {
    /// Returns `None` when any required field is missing or blank.
    pub fn into_record(self) -> Option<DepartureRecord> {
        Some(DepartureRecord {
            from: present(self.est_departure_airport)?,
            to: present(self.est_arrival_airport)?,
            callsign: present(self.callsign)?,
        })
    }
}

fn present(field: Option<String>) -> Option<String> {
    let value = field?.trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// First required key that appears in none of `rows`. A key present with a
/// `null` value counts as present. Always `None` for an empty slice.
pub fn missing_column(rows: &[Map<String, Value>]) -> Option<&'static str> {
    if rows.is_empty() {
        return None;
    }
    REQUIRED_KEYS
        .into_iter()
        .find(|key| rows.iter().all(|row| !row.contains_key(*key)))
}

/// Keeps only complete rows, preserving upstream order.
pub fn complete_records(rows: Vec<RawDeparture>) -> Vec<DepartureRecord> {
    rows.into_iter().filter_map(RawDeparture::into_record).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationFrequency {
    pub destination: String,
    pub count: usize,
}

/// Counts records per destination, highest count first. Ties keep the order
/// in which destinations were first seen.
pub fn destination_frequencies(records: &[DepartureRecord]) -> Vec<DestinationFrequency> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<DestinationFrequency> = Vec::new();

    for record in records {
        match index.get(record.to.as_str()) {
            Some(&i) => rows[i].count += 1,
            None => {
                index.insert(record.to.as_str(), rows.len());
                rows.push(DestinationFrequency {
                    destination: record.to.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

pub fn top(rows: &[DestinationFrequency], n: usize) -> &[DestinationFrequency] {
    &rows[..rows.len().min(n)]
}

/// Plain-text two column table for embedding in a prompt.
pub fn frequency_table(rows: &[DestinationFrequency]) -> String {
    const HEADER: &str = "Destination";
    let width = rows
        .iter()
        .map(|r| r.destination.len())
        .max()
        .unwrap_or(0)
        .max(HEADER.len());

    let mut table = String::with_capacity((rows.len() + 1) * (width + 8));
    table.push_str(&format!("{:<width$}  Count", HEADER));
    for row in rows {
        table.push('\n');
        table.push_str(&format!("{:<width$}  {}", row.destination, row.count));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(to: &str) -> DepartureRecord {
        DepartureRecord {
            from: "EGLL".into(),
            to: to.into(),
            callsign: format!("BAW{}", to),
        }
    }

    fn raw(json: &str) -> Vec<RawDeparture> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn incomplete_rows_are_dropped() {
        let rows = raw(r#"[
            {"estDepartureAirport": "EGLL", "estArrivalAirport": "KJFK", "callsign": "BAW117  "},
            {"estDepartureAirport": "EGLL", "estArrivalAirport": null, "callsign": "BAW9"},
            {"estDepartureAirport": "EGLL", "callsign": "VIR3"},
            {"estDepartureAirport": "EGLL", "estArrivalAirport": "LFPG", "callsign": "   "},
            {"estDepartureAirport": "EGLL", "estArrivalAirport": "EDDF", "callsign": "DLH903", "icao24": "3c6444"}
        ]"#);

        let records = complete_records(rows);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].callsign, "BAW117");
        assert_eq!(records[1].to, "EDDF");
    }

    #[test]
    fn missing_column_needs_key_absent_everywhere() {
        let objects = |json: &str| -> Vec<Map<String, Value>> { serde_json::from_str(json).unwrap() };

        assert_eq!(missing_column(&objects("[]")), None);
        assert_eq!(
            missing_column(&objects(r#"[{"estDepartureAirport": "EGLL", "estArrivalAirport": "KJFK"}]"#)),
            Some("callsign")
        );
        assert_eq!(
            missing_column(&objects(r#"[{"callsign": "A"}, {"estDepartureAirport": null, "estArrivalAirport": "KJFK"}]"#)),
            None
        );
        assert_eq!(missing_column(&objects(r#"[{"callsign": "A"}]"#)), Some("estDepartureAirport"));
    }

    #[test]
    fn frequencies_sorted_with_stable_ties() {
        // B is seen before C, both have three departures.
        let tos = ["D", "B", "A", "C", "A", "B", "A", "C", "B", "A", "C", "A"];
        let records: Vec<_> = tos.iter().map(|t| record(t)).collect();

        let freq = destination_frequencies(&records);
        let order: Vec<_> = freq.iter().map(|f| (f.destination.as_str(), f.count)).collect();
        assert_eq!(order, vec![("A", 5), ("B", 3), ("C", 3), ("D", 1)]);
    }

    #[test]
    fn top_limits_rows() {
        let records: Vec<_> = ["A", "B", "C", "D", "E", "F", "G"].iter().map(|t| record(t)).collect();
        let freq = destination_frequencies(&records);
        assert_eq!(top(&freq, 5).len(), 5);
        assert_eq!(top(&freq[..2], 5).len(), 2);
        assert!(top(&[], 5).is_empty());
    }

    #[test]
    fn table_layout() {
        let rows = vec![
            DestinationFrequency { destination: "KJFK".into(), count: 5 },
            DestinationFrequency { destination: "EDDF".into(), count: 12 },
        ];
        assert_eq!(
            frequency_table(&rows),
            "Destination  Count\nKJFK         5\nEDDF         12"
        );
    }
}
