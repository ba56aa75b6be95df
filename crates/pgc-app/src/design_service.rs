//! Design-point and fuel sizing requests.

use pgc_components::{DeliveryChain, lookup_module};
use pgc_core::units::degc;
use pgc_design::{DesignConfig, DesignPoint, Sizing, round_to_boards, run_design, size_for_target};
use rayon::prelude::*;
use tracing::info;

use crate::error::{AppError, AppResult};

/// Module, array size and loop temperatures for one design point.
#[derive(Debug, Clone)]
pub struct DesignRequest {
    pub teg_key: String,
    pub teg_count: usize,
    pub hot_c: f64,
    pub cold_c: f64,
    /// Fluid temperature change across each exchanger (K)
    pub fluid_dt_c: f64,
}

impl Default for DesignRequest {
    fn default() -> Self {
        Self {
            teg_key: "marlow".to_string(),
            teg_count: 1620,
            hot_c: 200.0,
            cold_c: 40.0,
            fluid_dt_c: 10.0,
        }
    }
}

impl DesignRequest {
    pub fn config(&self) -> AppResult<DesignConfig> {
        if !self.hot_c.is_finite() || !self.cold_c.is_finite() {
            return Err(AppError::InvalidInput(
                "loop temperatures must be finite".to_string(),
            ));
        }
        let module = lookup_module(&self.teg_key)?;
        let mut cfg = DesignConfig::new(
            *module,
            round_to_boards(self.teg_count),
            degc(self.hot_c),
            degc(self.cold_c),
        );
        cfg.fluid_dt = self.fluid_dt_c;
        Ok(cfg)
    }
}

pub fn design_point(request: &DesignRequest) -> AppResult<DesignPoint> {
    Ok(run_design(&request.config()?)?)
}

/// Size the array for each target output.
pub fn size_targets(
    request: &DesignRequest,
    targets_kw: &[f64],
    chain: &DeliveryChain,
    prices: &[f64],
    parallelize: bool,
) -> AppResult<Vec<Sizing>> {
    let base = request.config()?;
    info!(
        module = %request.teg_key,
        targets = targets_kw.len(),
        "sizing for target outputs"
    );
    let size = |target: &f64| size_for_target(*target, &base, chain, prices);
    let sized: Result<Vec<_>, _> = if parallelize {
        targets_kw.par_iter().map(size).collect()
    } else {
        targets_kw.iter().map(size).collect()
    };
    Ok(sized?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgc_design::DEFAULT_GAS_PRICES;

    #[test]
    fn request_rounds_to_boards() {
        let request = DesignRequest {
            teg_count: 1000,
            ..Default::default()
        };
        assert_eq!(request.config().unwrap().teg_count, 1008);
    }

    #[test]
    fn unknown_module_is_reported() {
        let request = DesignRequest {
            teg_key: "nope".to_string(),
            ..Default::default()
        };
        assert!(matches!(design_point(&request), Err(AppError::Compile(_))));
    }

    #[test]
    fn parallel_sizing_matches_sequential() {
        let request = DesignRequest::default();
        let chain = DeliveryChain::default();
        let targets = [0.5, 1.0, 2.0];
        let a = size_targets(&request, &targets, &chain, &DEFAULT_GAS_PRICES, true).unwrap();
        let b = size_targets(&request, &targets, &chain, &DEFAULT_GAS_PRICES, false).unwrap();
        let counts = |v: &[Sizing]| v.iter().map(|s| s.point.teg_count).collect::<Vec<_>>();
        assert_eq!(counts(&a), counts(&b));
        for pair in a.windows(2) {
            assert!(pair[1].point.teg_count >= pair[0].point.teg_count);
        }
    }
}
