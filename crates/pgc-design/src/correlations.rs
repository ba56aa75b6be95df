//! Convection and friction correlations for channel and pipe flow.

/// Reynolds number below which flow is treated as laminar.
pub const RE_LAMINAR: f64 = 2300.0;
/// Reynolds number above which Dittus-Boelter applies unblended.
pub const RE_TURBULENT: f64 = 6000.0;
/// Fully developed laminar Nusselt number, constant wall temperature.
pub const NU_LAMINAR: f64 = 3.66;
/// Drawn copper / steel tube roughness (m)
pub const DEFAULT_ROUGHNESS_M: f64 = 1e-6;

/// Nusselt number from Dittus-Boelter with a laminar floor.
///
/// `Nu = 0.023 Re^0.8 Pr^n`, `n = 0.4` when the fluid is heated and `0.3`
/// when it is cooled. Between `RE_LAMINAR` and `RE_TURBULENT` the value is
/// blended linearly from the laminar constant.
pub fn nusselt_dittus_boelter(re: f64, pr: f64, heating: bool) -> f64 {
    let n = if heating { 0.4 } else { 0.3 };
    if re < RE_LAMINAR {
        return NU_LAMINAR;
    }
    let nu_turb = 0.023 * re.powf(0.8) * pr.powf(n);
    if re < RE_TURBULENT {
        let frac = (re - RE_LAMINAR) / (RE_TURBULENT - RE_LAMINAR);
        NU_LAMINAR + frac * (nu_turb - NU_LAMINAR)
    } else {
        nu_turb
    }
}

/// Darcy friction factor: `64/Re` laminar, Colebrook-White otherwise.
pub fn friction_factor(re: f64, roughness_m: f64, d_h: f64) -> f64 {
    if re < RE_LAMINAR {
        return 64.0 / re.max(1.0);
    }

    let eps_d = roughness_m / d_h;
    let mut f: f64 = 0.02;
    for _ in 0..20 {
        let rhs = -2.0 * (eps_d / 3.7 + 2.51 / (re * f.sqrt())).log10();
        let f_new = 1.0 / (rhs * rhs);
        if (f_new - f).abs() < 1e-8 {
            break;
        }
        f = f_new;
    }
    f
}

/// Darcy-Weisbach pressure drop `f (L/D) rho v^2 / 2`.
pub fn darcy_pressure_drop(f: f64, length: f64, d_h: f64, rho: f64, velocity: f64) -> f64 {
    f * (length / d_h) * 0.5 * rho * velocity * velocity
}

/// Pressure drop of a round duct carrying `vol_flow` (m³/s).
pub fn duct_pressure_drop(vol_flow: f64, diameter: f64, length: f64, rho: f64, mu: f64) -> f64 {
    let area = std::f64::consts::PI * (diameter / 2.0).powi(2);
    let velocity = if area > 0.0 { vol_flow / area } else { 0.0 };
    let re = rho * velocity * diameter / mu;
    let f = friction_factor(re, DEFAULT_ROUGHNESS_M, diameter);
    darcy_pressure_drop(f, length, diameter, rho, velocity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laminar_nusselt_is_constant() {
        assert_eq!(nusselt_dittus_boelter(100.0, 7.0, true), NU_LAMINAR);
        assert_eq!(nusselt_dittus_boelter(-5.0, 7.0, false), NU_LAMINAR);
    }

    #[test]
    fn turbulent_nusselt() {
        let nu = nusselt_dittus_boelter(10_000.0, 5.0, true);
        let expected = 0.023 * 10_000f64.powf(0.8) * 5f64.powf(0.4);
        assert!((nu - expected).abs() < 1e-9);
        // Cooling exponent gives a lower value for Pr > 1
        assert!(nusselt_dittus_boelter(10_000.0, 5.0, false) < nu);
    }

    #[test]
    fn transition_blends_continuously() {
        let below = nusselt_dittus_boelter(RE_LAMINAR, 6.8, true);
        assert!((below - NU_LAMINAR).abs() < 1e-12);
        let above = nusselt_dittus_boelter(RE_TURBULENT - 1e-9, 6.8, true);
        let turb = nusselt_dittus_boelter(RE_TURBULENT, 6.8, true);
        assert!((above - turb).abs() < 1e-6);
    }

    #[test]
    fn laminar_friction() {
        assert!((friction_factor(1000.0, DEFAULT_ROUGHNESS_M, 0.005) - 0.064).abs() < 1e-15);
        assert_eq!(friction_factor(0.0, DEFAULT_ROUGHNESS_M, 0.005), 64.0);
    }

    #[test]
    fn colebrook_smooth_pipe() {
        // Smooth pipe at Re = 1e5 is close to 0.018
        let f = friction_factor(1e5, 1e-7, 0.05);
        assert!((f - 0.018).abs() < 0.001);
        let rhs = -2.0 * (1e-7 / 0.05 / 3.7 + 2.51 / (1e5 * f.sqrt())).log10();
        assert!((1.0 / f.sqrt() - rhs).abs() < 1e-3);
    }

    #[test]
    fn rough_pipe_raises_turbulent_friction() {
        let smooth = friction_factor(5e4, 1e-7, 0.038);
        let rough = friction_factor(5e4, 5e-4, 0.038);
        assert!(smooth.is_finite() && rough.is_finite());
        assert!(rough > smooth);
        assert!(smooth < 64.0 / 2300.0);
    }

    #[test]
    fn duct_drop_scales_with_length() {
        let a = duct_pressure_drop(0.004, 0.038, 30.0, 1040.0, 0.0008);
        let b = duct_pressure_drop(0.004, 0.038, 60.0, 1040.0, 0.0008);
        assert!(a > 0.0);
        assert!((b - 2.0 * a).abs() < 1e-9 * b);
    }
}
