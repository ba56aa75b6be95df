//! Fuel cost per day and per delivered kWh.

use pgc_components::fuel::HOURS_PER_DAY;
use serde::{Deserialize, Serialize};

/// Gas prices evaluated by default ($/McF).
pub const DEFAULT_GAS_PRICES: [f64; 3] = [2.50, 4.00, 6.00];

/// Fuel cost at one gas price.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuelCost {
    pub price_per_mcf: f64,
    pub fuel_cost_per_day: f64,
    /// Fuel cost per net electrical kWh; infinite when the plant makes no
    /// net power.
    pub cost_per_kwh: f64,
}

impl FuelCost {
    pub fn new(price_per_mcf: f64, mcf_per_day: f64, net_kw: f64) -> Self {
        let fuel_cost_per_day = mcf_per_day * price_per_mcf;
        let daily_kwh = net_kw * HOURS_PER_DAY;
        let cost_per_kwh = if daily_kwh > 0.0 {
            fuel_cost_per_day / daily_kwh
        } else {
            f64::INFINITY
        };
        Self {
            price_per_mcf,
            fuel_cost_per_day,
            cost_per_kwh,
        }
    }

    pub fn monthly(&self) -> f64 {
        self.fuel_cost_per_day * 30.0
    }

    pub fn yearly(&self) -> f64 {
        self.fuel_cost_per_day * 365.0
    }
}

/// Costs at every price in `prices`, in order.
pub fn fuel_costs(prices: &[f64], mcf_per_day: f64, net_kw: f64) -> Vec<FuelCost> {
    prices
        .iter()
        .map(|&p| FuelCost::new(p, mcf_per_day, net_kw))
        .collect()
}

/// Cost entry for a price, matched to the cent.
pub fn cost_at(costs: &[FuelCost], price_per_mcf: f64) -> Option<&FuelCost> {
    costs
        .iter()
        .find(|c| (c.price_per_mcf - price_per_mcf).abs() < 0.005)
}
