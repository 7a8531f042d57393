//! Metrics fold
//!
//! A single pass over the entire current log accumulates every aggregate.
//! The fold runs after each append, so the persisted metrics are always
//! consistent with the (possibly trimmed) log they were computed from.
//! O(log length) per write, which is fine at the 10,000-event cap.

use std::collections::{HashMap, HashSet};

use crate::types::{CollectorRank, Event, EventPayload, Metrics};
use crate::utils::now_iso8601;

use super::store::StoreConfig;

#[derive(Default)]
struct CollectorSpending {
    items: u64,
    spent: f64,
}

/// Recompute all aggregates from the given log
pub fn compute_metrics(events: &[Event], config: &StoreConfig) -> Metrics {
    let mut metrics = Metrics::empty();

    let mut unique_sessions: HashSet<&str> = HashSet::new();
    let mut page_load_times: Vec<f64> = Vec::new();
    let mut api_response_times: Vec<f64> = Vec::new();
    let mut collector_spending: HashMap<&str, CollectorSpending> = HashMap::new();

    for event in events {
        match &event.payload {
            EventPayload::Visitor => {
                metrics.total_visitors += 1;
            }

            EventPayload::PageView => {
                metrics.total_page_views += 1;
            }

            EventPayload::SessionStart => {
                if let Some(session_id) = &event.session_id {
                    unique_sessions.insert(session_id);
                }
            }

            EventPayload::ProductView(data) => {
                *metrics.product_views.entry(data.product_id.clone()).or_insert(0) += 1;
            }

            EventPayload::ProductClick(data) => {
                *metrics.product_clicks.entry(data.product_id.clone()).or_insert(0) += 1;
            }

            EventPayload::ProductLike(data) => {
                *metrics.product_likes.entry(data.product_id.clone()).or_insert(0) += 1;
            }

            EventPayload::ProductUnlike(data) => {
                // Likes never go below zero
                let count = metrics.product_likes.entry(data.product_id.clone()).or_insert(0);
                *count = count.saturating_sub(1);
            }

            EventPayload::AddToCart(_) => {
                metrics.add_to_cart_events += 1;
            }

            EventPayload::PurchaseCompleted(data) => {
                metrics.total_sales += 1;
                metrics.total_revenue += data.price;

                let spending = collector_spending
                    .entry(data.buyer_nickname.as_str())
                    .or_default();
                spending.items += 1;
                spending.spent += data.price;
            }

            EventPayload::OfferMade(_) => {
                metrics.total_offers += 1;
            }

            EventPayload::OfferAccepted(_) => {
                metrics.accepted_offers += 1;
            }

            EventPayload::ResaleSold(data) => {
                metrics.resale_volume += 1;

                // Running weighted average over resales that appreciated
                if let Some(original) = data.original_price {
                    if original > 0.0 && data.price > original {
                        let appreciation = data.price - original;
                        let n = metrics.resale_volume as f64;
                        metrics.average_price_appreciation =
                            (metrics.average_price_appreciation * (n - 1.0) + appreciation) / n;
                    }
                }
            }

            EventPayload::PageLoadTime(data) => {
                page_load_times.push(data.value);
            }

            EventPayload::ApiResponseTime(data) => {
                api_response_times.push(data.value);
            }

            _ => {}
        }
    }

    metrics.total_sessions = unique_sessions.len() as u64;
    metrics.average_transaction_value = if metrics.total_sales > 0 {
        metrics.total_revenue / metrics.total_sales as f64
    } else {
        0.0
    };
    metrics.average_page_load_time = average(&page_load_times);
    metrics.average_api_response_time = average(&api_response_times);

    let mut ranking: Vec<CollectorRank> = collector_spending
        .into_iter()
        .map(|(nickname, spending)| CollectorRank {
            nickname: nickname.to_string(),
            items_owned: spending.items,
            total_spent: spending.spent,
        })
        .collect();
    // Biggest spenders first; nickname breaks ties so the ranking is stable
    ranking.sort_by(|a, b| {
        b.total_spent
            .partial_cmp(&a.total_spent)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.nickname.cmp(&b.nickname))
    });
    ranking.truncate(config.top_collectors_limit);
    metrics.top_collectors = ranking;

    metrics.last_updated = now_iso8601();

    metrics
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
