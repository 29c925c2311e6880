extern crate anyhow;
extern crate reqwest;
extern crate serde;
extern crate serde_json;

use crate::result;

use anyhow::Context;

pub const SLOTS_PER_STATION: usize = 2;

pub struct StationEndpoint {
    pub name: &'static str,
    pub url: &'static str,
}

// The three monitored stops, inbound platforms, feed pre-sorted by
// arrival_time.
pub const STATIONS: [StationEndpoint; 3] = [
    StationEndpoint{
        name: "Chiswick Road",
        url: "https://api-v3.mbta.com/predictions?filter[stop]=place-chswk&route=Green-B&direction_id=0&sort=arrival_time",
    },
    StationEndpoint{
        name: "Cleveland Circle",
        url: "https://api-v3.mbta.com/predictions?filter[stop]=place-clmnl&route=Green-C&direction_id=0&sort=arrival_time",
    },
    StationEndpoint{
        name: "Reservoir",
        url: "https://api-v3.mbta.com/predictions?filter[stop]=place-rsmnl&route=Green-D&direction_id=0&sort=arrival_time",
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    pub status: String,
    pub arrival_time: String,
}

#[derive(Serialize, Deserialize, Debug)]
struct MbtaResponse {
    data: Vec<MbtaPrediction>,
}

#[derive(Serialize, Deserialize, Debug)]
struct MbtaPrediction {
    attributes: MbtaAttributes,
}

// The feed sends null rather than omitting fields it has no value for.
#[derive(Serialize, Deserialize, Debug)]
struct MbtaAttributes {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    arrival_time: Option<String>,
}

pub fn fetch_predictions(endpoint: &StationEndpoint) -> result::GreendashResult<Vec<PredictionRecord>> {
    return fetch_predictions_ext(endpoint, real_fetch_json_fn);
}

fn fetch_predictions_ext(endpoint: &StationEndpoint, fetch_json_fn: fn(&str) -> result::GreendashResult<String>) -> result::GreendashResult<Vec<PredictionRecord>> {
    let body = fetch_json_fn(endpoint.url)?;
    let records = parse_predictions(&body)
        .with_context(|| format!("in predictions feed for {}", endpoint.name))?;
    return Ok(records);
}

pub fn parse_predictions(body: &str) -> result::GreendashResult<Vec<PredictionRecord>> {
    let response: MbtaResponse = serde_json::from_str(body)?;

    if response.data.len() < SLOTS_PER_STATION {
        return Err(result::make_error(&format!(
            "expected {} predictions, feed returned {}",
            SLOTS_PER_STATION, response.data.len())));
    }

    return Ok(response.data.into_iter()
        .take(SLOTS_PER_STATION)
        .map(|prediction| PredictionRecord{
            status: prediction.attributes.status.unwrap_or_default(),
            arrival_time: prediction.attributes.arrival_time.unwrap_or_default(),
        })
        .collect());
}

fn real_fetch_json_fn(url: &str) -> result::GreendashResult<String> {
    debug!("Fetching {}", url);
    let response = reqwest::blocking::get(url)?;
    if !response.status().is_success() {
        return Err(result::make_error(&format!(
            "HTTP {} from {}", response.status(), url)));
    }
    return Ok(response.text()?);
}

#[cfg(test)]
mod tests {
    use crate::result;

    #[test]
    fn parse_json() {
        let raw_json = r#"{"data":[{"attributes":{"arrival_time":"2024-01-01T12:10:00-05:00","departure_time":"2024-01-01T12:11:00-05:00","direction_id":0,"status":null,"stop_sequence":1},"id":"prediction-1","type":"prediction"},{"attributes":{"arrival_time":"2024-01-01T12:24:00-05:00","departure_time":null,"direction_id":0,"status":"","stop_sequence":1},"id":"prediction-2","type":"prediction"}],"jsonapi":{"version":"1.0"}}"#;

        let records = super::parse_predictions(&raw_json).expect("parse_predictions");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, "");
        assert_eq!(records[0].arrival_time, "2024-01-01T12:10:00-05:00");
        assert_eq!(records[1].status, "");
        assert_eq!(records[1].arrival_time, "2024-01-01T12:24:00-05:00");
    }

    #[test]
    fn parse_json_fixture() {
        let raw_json = std::fs::read_to_string("testdata/predictions.json")
            .expect("Error reading predictions.json");

        let records = super::parse_predictions(&raw_json).expect("parse_predictions");

        assert_eq!(records.len(), super::SLOTS_PER_STATION);
        assert_eq!(records[0].status, "");
        assert_eq!(records[1].status, "STOPPED 1 STOP AWAY");
    }

    #[test]
    fn parse_json_too_few_records() {
        let raw_json = r#"{"data":[{"attributes":{"arrival_time":"2024-01-01T12:10:00-05:00","status":null}}]}"#;

        assert!(super::parse_predictions(&raw_json).is_err());
    }

    #[test]
    fn parse_json_malformed() {
        assert!(super::parse_predictions("not json at all").is_err());
    }

    #[test]
    fn fetch_uses_endpoint_url() {
        let fake_fetch_fn = |url: &str| -> result::GreendashResult<String> {
            assert!(url.contains("place-chswk"));
            return Ok(r#"{"data":[{"attributes":{"arrival_time":"2024-01-01T12:10:00-05:00","status":null}},{"attributes":{"arrival_time":"2024-01-01T12:24:00-05:00","status":null}}]}"#.to_string());
        };

        let records = super::fetch_predictions_ext(&super::STATIONS[0], fake_fetch_fn)
            .expect("fetch_predictions_ext");
        assert_eq!(records[0].arrival_time, "2024-01-01T12:10:00-05:00");
    }
}
