use anyhow::anyhow;
use serde_json::Value;

use crate::cli::SearchArgs;
use crate::geo::{GeoPoint, distance_display};
use crate::hospital::{Hospital, normalize_records};
use crate::maps::build_map_url;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchPhase {
    Idle,
    Loading,
    Results(Vec<Hospital>),
    Empty,
}

/// Tracks one search flow: idle until the first submission, loading while a
/// request is out, then results or empty. Each submission gets a sequence
/// number; only the outcome matching the latest submission is applied, so a
/// slow stale response can never overwrite a newer one.
pub struct SearchSession {
    phase: SearchPhase,
    searched_pincode: String,
    latest_seq: u64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            phase: SearchPhase::Idle,
            searched_pincode: String::new(),
            latest_seq: 0,
        }
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn searched_pincode(&self) -> &str {
        &self.searched_pincode
    }

    /// Record a submission and return its sequence number.
    pub fn begin(&mut self, pincode: &str) -> u64 {
        self.latest_seq += 1;
        self.searched_pincode = pincode.to_string();
        self.phase = SearchPhase::Loading;
        self.latest_seq
    }

    /// Apply a search outcome. Returns false (and changes nothing) when a
    /// newer submission has superseded `seq`. A failed fetch clears results.
    pub fn finish(&mut self, seq: u64, outcome: anyhow::Result<Vec<Hospital>>) -> bool {
        if seq != self.latest_seq {
            tracing::debug!("Discarding stale response for request {}", seq);
            return false;
        }
        self.phase = match outcome {
            Ok(hospitals) if hospitals.is_empty() => SearchPhase::Empty,
            Ok(hospitals) => SearchPhase::Results(hospitals),
            Err(e) => {
                tracing::error!("Fetch error: {e:#}");
                SearchPhase::Empty
            }
        };
        true
    }
}

pub async fn run(opts: SearchArgs) -> anyhow::Result<()> {
    let user = match (opts.lat, opts.lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
        _ => None,
    };

    let mut session = SearchSession::new();
    let seq = session.begin(&opts.pincode);
    let outcome = fetch_from_proxy(&opts.server, &opts.pincode).await;
    session.finish(seq, outcome);

    render(&session, user);
    Ok(())
}

async fn fetch_from_proxy(server: &str, pincode: &str) -> anyhow::Result<Vec<Hospital>> {
    let base = format!("{}/hospitals", server.trim_end_matches('/'));
    let url = reqwest::Url::parse_with_params(&base, &[("pincode", pincode)])?;

    let resp = reqwest::get(url.clone()).await?;
    if !resp.status().is_success() {
        return Err(anyhow!("backend error ({}): {}", resp.status(), url));
    }
    let data: Value = resp.json().await?;
    Ok(normalize_records(&data, pincode))
}

fn render(session: &SearchSession, user: Option<GeoPoint>) {
    match session.phase() {
        SearchPhase::Results(hospitals) => {
            println!(
                "{} hospital(s) in pincode {}:\n",
                hospitals.len(),
                session.searched_pincode()
            );
            for h in hospitals {
                println!("{}", h.name);
                println!("  {}", h.address);
                match distance_display(user, h) {
                    Some(d) => println!("  {}  ({})", h.pincode, d),
                    None => println!("  {}", h.pincode),
                }
                println!("  Map: {}", build_map_url(h, user));
                println!();
            }
        }
        SearchPhase::Empty => {
            println!(
                "No hospitals found for pincode {}.",
                session.searched_pincode()
            );
            println!("Check the pincode, or try a nearby or larger-city pincode.");
        }
        SearchPhase::Idle | SearchPhase::Loading => {}
    }
}
