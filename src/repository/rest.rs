use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{AccountTier, SegmentDefinition, Stage};
use crate::repository::{ReferenceData, SegmentRepository};

const BALANCE_TABLE: &str = "account_balances";

/// Numeric columns come back as JSON numbers or as strings depending on
/// the column type, so accept both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn value(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SegmentRow {
    segment: String,
    #[serde(default)]
    pf_lot_100k: Option<Numeric>,
    #[serde(default)]
    real_lot_100k: Option<Numeric>,
    #[serde(default)]
    pf_lot_50k: Option<Numeric>,
    #[serde(default)]
    real_lot_50k: Option<Numeric>,
    #[serde(default)]
    pf_lot_25k: Option<Numeric>,
    #[serde(default)]
    real_lot_25k: Option<Numeric>,
    #[serde(default)]
    pf_lot_5k: Option<Numeric>,
    #[serde(default)]
    real_lot_5k: Option<Numeric>,
    tp: Numeric,
    sl: Numeric,
}

impl SegmentRow {
    fn lot_columns(&self, tier: AccountTier) -> (Option<&Numeric>, Option<&Numeric>) {
        match tier {
            AccountTier::K100 => (self.pf_lot_100k.as_ref(), self.real_lot_100k.as_ref()),
            AccountTier::K50 => (self.pf_lot_50k.as_ref(), self.real_lot_50k.as_ref()),
            AccountTier::K25 => (self.pf_lot_25k.as_ref(), self.real_lot_25k.as_ref()),
            AccountTier::K5 => (self.pf_lot_5k.as_ref(), self.real_lot_5k.as_ref()),
        }
    }

    fn into_segment(self) -> Result<SegmentDefinition> {
        let tp = self
            .tp
            .value()
            .with_context(|| format!("Segment '{}' has a non-numeric tp", self.segment))?;
        let sl = self
            .sl
            .value()
            .with_context(|| format!("Segment '{}' has a non-numeric sl", self.segment))?;

        let mut seg = SegmentDefinition::new(&self.segment, tp, sl);
        for tier in AccountTier::ALL {
            let (pf, real) = self.lot_columns(tier);
            match (pf.and_then(Numeric::value), real.and_then(Numeric::value)) {
                (Some(pf), Some(real)) => seg = seg.with_lots(tier, pf, real),
                _ => debug!(
                    "Segment '{}' has no usable {} lot columns (pf_lot_{}, real_lot_{})",
                    self.segment,
                    tier,
                    tier.column_suffix(),
                    tier.column_suffix()
                ),
            }
        }
        Ok(seg)
    }
}

#[derive(Debug, Deserialize)]
struct BalanceRow {
    account_type: String,
    balance: Numeric,
}

fn segments_from_rows(rows: Vec<SegmentRow>) -> Result<Vec<SegmentDefinition>> {
    rows.into_iter().map(SegmentRow::into_segment).collect()
}

fn balances_from_rows(rows: Vec<BalanceRow>) -> BTreeMap<AccountTier, f64> {
    rows.into_iter()
        .filter_map(|row| {
            let tier = match row.account_type.parse::<AccountTier>() {
                Ok(t) => t,
                Err(e) => {
                    warn!("Skipping balance row: {}", e);
                    return None;
                }
            };
            match row.balance.value() {
                Some(balance) => Some((tier, balance)),
                None => {
                    warn!("Skipping balance row for {}: non-numeric balance", tier);
                    None
                }
            }
        })
        .collect()
}

/// Segment tables served by a PostgREST-compatible store.
pub struct RestRepository {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestRepository {
    pub fn new(cfg: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: cfg.data_url.trim_end_matches('/').to_string(),
            api_key: cfg.data_api_key.clone(),
        }
    }

    async fn fetch_table<T: DeserializeOwned>(&self, table: &str, order: &str) -> Result<Vec<T>> {
        if self.base_url.is_empty() {
            anyhow::bail!("TRADE_DATA_URL is not set; cannot fetch {}", table);
        }

        let url = format!("{}/rest/v1/{}", self.base_url, table);
        debug!("GET {} (order={})", url, order);

        let resp = self
            .client
            .get(&url)
            .query(&[("select", "*"), ("order", order)])
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", table))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Reference store error {} on {}: {}", status, table, body);
        }

        resp.json()
            .await
            .with_context(|| format!("Failed to parse {} response", table))
    }

    async fn fetch_segments(&self, stage: Stage) -> Result<Vec<SegmentDefinition>> {
        let rows: Vec<SegmentRow> = self.fetch_table(stage.table_name(), "segment").await?;
        segments_from_rows(rows)
    }

    pub async fn fetch(&self) -> Result<ReferenceData> {
        let evaluation = self.fetch_segments(Stage::Evaluation).await?;
        let funded = self.fetch_segments(Stage::Funded).await?;
        let balance_rows: Vec<BalanceRow> = self.fetch_table(BALANCE_TABLE, "account_type").await?;
        let balances = balances_from_rows(balance_rows);

        let data = ReferenceData::new(evaluation, funded, balances, self.name())
            .context("Remote reference data failed validation")?;

        info!(
            "Fetched reference data from {}: {} evaluation / {} funded segments, {} balances",
            self.base_url,
            data.segments(Stage::Evaluation).len(),
            data.segments(Stage::Funded).len(),
            data.balances().len()
        );

        Ok(data)
    }
}

#[async_trait]
impl SegmentRepository for RestRepository {
    fn name(&self) -> &str {
        "remote"
    }

    async fn load(&mut self) -> Result<ReferenceData> {
        self.fetch().await
    }
}
