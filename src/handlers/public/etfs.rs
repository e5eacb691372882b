// handlers/public/etfs.rs - GET /etfs handler

use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Etf {
    pub id: u64,
    pub name: &'static str,
    pub isin: &'static str,
    /// Total expense ratio in percent
    pub ter: f64,
}

pub static CATALOGUE: [Etf; 3] = [
    Etf { id: 1, name: "iShares Core MSCI World", isin: "IE00B4L5Y983", ter: 0.20 },
    Etf { id: 2, name: "Vanguard FTSE All-World", isin: "IE00B3RBWM25", ter: 0.22 },
    Etf { id: 3, name: "Xtrackers MSCI EM IMI", isin: "IE00BTJRMP35", ter: 0.18 },
];

/// GET /etfs - Static catalogue of well-known ETFs
pub async fn etfs_get() -> Json<&'static [Etf]> {
    Json(CATALOGUE.as_slice())
}
