//! Fuel balance, TEG-count sizing for a target output, and sweep points.

use crate::economics::{FuelCost, fuel_costs};
use crate::error::{DesignError, DesignResult};
use crate::model::{DesignConfig, DesignPoint, TEGS_PER_PCM, run_design};
use pgc_components::DeliveryChain;
use pgc_components::fuel::{HOURS_PER_DAY, kwh_thermal_per_mcf};
use pgc_core::units::w;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Heat a single 150 m borehole takes continuously (kW).
pub const HEAT_PER_BOREHOLE_KW: f64 = 6.0;

/// Largest array considered when sizing.
pub const MAX_TEG_COUNT: usize = 50_000;

/// Round a TEG count to whole PCM boards, at least one board.
pub fn round_to_boards(count: usize) -> usize {
    let boards = (count + TEGS_PER_PCM / 2) / TEGS_PER_PCM;
    boards.max(1) * TEGS_PER_PCM
}

/// Boreholes needed to absorb a steady rejection load.
pub fn boreholes_for(reject_kw: f64) -> usize {
    if reject_kw <= 0.0 {
        return 0;
    }
    (reject_kw / HEAT_PER_BOREHOLE_KW).ceil() as usize
}

/// Energy chain from fuel to net electricity for one design point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuelBalance {
    pub teg_count: usize,
    pub mcf_per_day: f64,
    /// Fuel chemical power (kW)
    pub thermal_input_kw: f64,
    /// Heat reaching the exchangers (kW)
    pub hx_delivery_kw: f64,
    pub gross_kw: f64,
    pub parasitic_kw: f64,
    pub net_kw: f64,
    pub delivery_efficiency: f64,
    pub teg_efficiency: f64,
    /// Fuel to net electric
    pub system_efficiency: f64,
    pub heat_rejection_kw: f64,
    pub hot_gpm: f64,
    pub costs: Vec<FuelCost>,
}

impl FuelBalance {
    pub fn from_design(point: &DesignPoint, chain: &DeliveryChain, prices: &[f64]) -> Self {
        let hx_delivery_kw = point.total_heat_input_w / 1000.0;
        let thermal_input_kw = chain.fuel_power_for(w(point.total_heat_input_w)).value / 1000.0;
        let mcf_per_day = thermal_input_kw * HOURS_PER_DAY / kwh_thermal_per_mcf();
        let net_kw = point.net_electrical_kw();
        let system_efficiency = if thermal_input_kw > 0.0 {
            net_kw / thermal_input_kw
        } else {
            0.0
        };

        Self {
            teg_count: point.teg_count,
            mcf_per_day,
            thermal_input_kw,
            hx_delivery_kw,
            gross_kw: point.gross_electrical_w / 1000.0,
            parasitic_kw: point.parasitics.total_w() / 1000.0,
            net_kw,
            delivery_efficiency: chain.delivery_efficiency(),
            teg_efficiency: point.teg_efficiency,
            system_efficiency,
            heat_rejection_kw: point.total_heat_rejection_w / 1000.0,
            hot_gpm: point.flows.hot_gpm,
            costs: fuel_costs(prices, mcf_per_day, net_kw),
        }
    }

    pub fn boreholes(&self) -> usize {
        boreholes_for(self.heat_rejection_kw)
    }
}

/// Outcome of sizing a plant for a net output target.
#[derive(Clone, Debug)]
pub struct Sizing {
    pub target_kw: f64,
    /// False when no array size reaches the target; `point` is then the
    /// size with the highest net output.
    pub meets_target: bool,
    pub point: DesignPoint,
    pub balance: FuelBalance,
}

fn design_at(base: &DesignConfig, boards: usize) -> DesignResult<DesignPoint> {
    run_design(&base.with_teg_count(boards * TEGS_PER_PCM))
}

/// Board count with the highest net output in `[lo, hi]`.
///
/// Parasitic loads grow faster than the gross output, so net output rises
/// to a single peak and falls after it.
fn peak_boards(base: &DesignConfig, mut lo: usize, mut hi: usize) -> DesignResult<DesignPoint> {
    while hi - lo > 2 {
        let m1 = lo + (hi - lo) / 3;
        let m2 = hi - (hi - lo) / 3;
        if design_at(base, m1)?.net_electrical_w < design_at(base, m2)?.net_electrical_w {
            lo = m1 + 1;
        } else {
            hi = m2 - 1;
        }
    }
    let mut best = design_at(base, lo)?;
    for boards in lo + 1..=hi {
        let p = design_at(base, boards)?;
        if p.net_electrical_w > best.net_electrical_w {
            best = p;
        }
    }
    Ok(best)
}

/// Smallest array, in whole PCM boards, whose net output meets `target_kw`.
///
/// Board counts double until the target is met or net output starts to
/// fall, then the bracket is bisected. When the peak of the net output
/// curve is below the target the peak is returned with `meets_target`
/// cleared.
pub fn size_for_target(
    target_kw: f64,
    base: &DesignConfig,
    chain: &DeliveryChain,
    prices: &[f64],
) -> DesignResult<Sizing> {
    if !target_kw.is_finite() {
        return Err(DesignError::InvalidArg {
            what: "target output must be finite",
        });
    }
    let max_boards = (MAX_TEG_COUNT / TEGS_PER_PCM).max(1);

    // Largest board count known to fall short, zero for none.
    let mut failing = 0;
    let mut before_failing = 0;
    let mut prev_net = f64::NEG_INFINITY;
    let mut boards = 1;
    let (mut meeting_boards, mut meeting) = loop {
        let p = design_at(base, boards)?;
        if p.net_electrical_kw() >= target_kw {
            break (boards, p);
        }
        if p.net_electrical_w < prev_net || boards == max_boards {
            let lo = before_failing.max(1);
            let peak = peak_boards(base, lo, boards)?;
            if peak.net_electrical_kw() < target_kw {
                debug!(
                    target_kw,
                    peak_kw = peak.net_electrical_kw(),
                    "target above peak net output"
                );
                let balance = FuelBalance::from_design(&peak, chain, prices);
                return Ok(Sizing {
                    target_kw,
                    meets_target: false,
                    point: peak,
                    balance,
                });
            }
            break (peak.teg_count / TEGS_PER_PCM, peak);
        }
        prev_net = p.net_electrical_w;
        before_failing = failing;
        failing = boards;
        boards = (boards * 2).min(max_boards);
    };

    // Rising branch: `failing` falls short, `meeting_boards` meets.
    let mut lo = if failing < meeting_boards {
        failing
    } else {
        before_failing
    };
    while meeting_boards - lo > 1 {
        let mid = (lo + meeting_boards) / 2;
        let p = design_at(base, mid)?;
        if p.net_electrical_kw() >= target_kw {
            meeting_boards = mid;
            meeting = p;
        } else {
            lo = mid;
        }
    }
    debug!(
        target_kw,
        teg_count = meeting.teg_count,
        net_kw = meeting.net_electrical_kw(),
        "sized array"
    );

    let balance = FuelBalance::from_design(&meeting, chain, prices);
    Ok(Sizing {
        target_kw,
        meets_target: true,
        point: meeting,
        balance,
    })
}
