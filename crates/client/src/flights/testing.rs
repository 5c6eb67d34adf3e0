//! Fakes shared by the pipeline tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use flightagg_core::{Error, Flight, FlightStore};

use crate::fetch::Transport;

type ErrorFactory = Box<dyn Fn() -> Error + Send + Sync>;

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<Bytes, Error>>,
    fallback: Option<ErrorFactory>,
    delay: Option<Duration>,
    calls: usize,
}

/// Transport that replays canned replies per URL and counts calls.
///
/// Once a URL's replies run out it answers with the `always_fail` error, or
/// a 404 if none was set.
#[derive(Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<String, Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(self, url: &str, edit: impl FnOnce(&mut Script)) -> Self {
        edit(self.scripts.lock().unwrap().entry(url.to_string()).or_default());
        self
    }

    pub fn respond(self, url: &str, body: impl Into<String>) -> Self {
        let body = Bytes::from(body.into());
        self.script(url, |s| s.replies.push_back(Ok(body)))
    }

    pub fn fail(self, url: &str, err: Error) -> Self {
        self.script(url, |s| s.replies.push_back(Err(err)))
    }

    pub fn always_fail(self, url: &str, err: impl Fn() -> Error + Send + Sync + 'static) -> Self {
        self.script(url, |s| s.fallback = Some(Box::new(err)))
    }

    pub fn delay(self, url: &str, delay: Duration) -> Self {
        self.script(url, |s| s.delay = Some(delay))
    }

    pub fn calls(&self, url: &str) -> usize {
        self.scripts.lock().unwrap().get(url).map_or(0, |s| s.calls)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<Bytes, Error> {
        let (reply, delay) = {
            let mut scripts = self.scripts.lock().unwrap();
            let script = scripts.entry(url.to_string()).or_default();
            script.calls += 1;
            let reply = match script.replies.pop_front() {
                Some(reply) => reply,
                None => Err(script.fallback.as_ref().map_or_else(|| Error::HttpStatus(404), |f| f())),
            };
            (reply, script.delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        reply
    }
}

/// Store whose every operation fails, as if the backend were down.
pub struct FailingStore;

#[async_trait]
impl FlightStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<Flight>>, Error> {
        Err(Error::Cache("store unavailable".into()))
    }

    async fn set(&self, _key: &str, _flights: &[Flight], _ttl: Duration) -> Result<(), Error> {
        Err(Error::Cache("store unavailable".into()))
    }

    async fn purge_expired(&self) -> Result<u64, Error> {
        Err(Error::Cache("store unavailable".into()))
    }
}

/// A source body with one flight group priced `price`.
pub fn body(price: f64, slices: &[(&str, &str, &str)]) -> String {
    let slices: Vec<String> = slices
        .iter()
        .map(|(number, departure, origin)| {
            format!(
                r#"{{"origin_name":"{origin}","destination_name":"Paris","departure_date_time_utc":"{departure}","arrival_date_time_utc":"{departure}","flight_number":"{number}","duration":100}}"#
            )
        })
        .collect();
    format!(r#"{{"flights":[{{"price":{price},"slices":[{}]}}]}}"#, slices.join(","))
}

pub fn london_paris_body() -> String {
    body(100.0, &[("1234", "2020-01-01T00:00:00.000Z", "London")])
}

/// The flight `london_paris_body` normalizes to, at the given price.
pub fn london_paris(price: f64) -> Flight {
    let at: DateTime<Utc> = "2020-01-01T00:00:00.000Z".parse().unwrap();
    Flight {
        id: "1234-2020-01-01T00:00:00.000Z".into(),
        origin: "London".into(),
        destination: "Paris".into(),
        departure_date: at,
        arrival_date: at,
        duration: 100.0,
        price,
        flight_number: "1234".into(),
    }
}
