//! Fin-channel heat exchanger geometry for one TEG cell.

use serde::{Deserialize, Serialize};

/// Geometry of the exchanger plate clamped to a single TEG.
///
/// Both faces of the TEG sit on identical copper fin blocks; each carries
/// `n_channels` rectangular channels separated by `n_fins` fins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HxGeometry {
    pub n_channels: usize,
    pub channel_width_m: f64,
    pub channel_height_m: f64,
    /// Flow path length through the block
    pub channel_length_m: f64,
    pub fin_thickness_m: f64,
    /// Fin conductivity (W/m-K), C110 copper
    pub fin_conductivity: f64,
    pub n_fins: usize,
    /// Header inner diameter
    pub manifold_id_m: f64,
    /// Hot-side interface (flexible graphite)
    pub hot_tim_k: f64,
    pub hot_tim_thickness_m: f64,
    /// Cold-side interface (silicone pad)
    pub cold_tim_k: f64,
    pub cold_tim_thickness_m: f64,
}

impl Default for HxGeometry {
    fn default() -> Self {
        Self {
            n_channels: 9,
            channel_width_m: 0.003,
            channel_height_m: 0.040,
            channel_length_m: 0.040,
            fin_thickness_m: 0.001,
            fin_conductivity: 385.0,
            n_fins: 10,
            manifold_id_m: 0.038,
            hot_tim_k: 7.5,
            hot_tim_thickness_m: 0.000375,
            cold_tim_k: 4.5,
            cold_tim_thickness_m: 0.0005,
        }
    }
}

impl HxGeometry {
    /// Hydraulic diameter of one channel, 4A/P.
    pub fn hydraulic_diameter(&self) -> f64 {
        let a = self.channel_area();
        let p = 2.0 * (self.channel_width_m + self.channel_height_m);
        4.0 * a / p
    }

    pub fn channel_area(&self) -> f64 {
        self.channel_width_m * self.channel_height_m
    }

    /// Flow area of all channels in one cell.
    pub fn total_flow_area(&self) -> f64 {
        self.n_channels as f64 * self.channel_area()
    }

    /// Block-to-TEG contact area; the fins span the whole face.
    pub fn teg_contact_area(&self) -> f64 {
        self.channel_length_m
            * (self.n_channels as f64 * self.channel_width_m
                + self.n_fins as f64 * self.fin_thickness_m)
    }

    pub fn wetted_area_per_channel(&self) -> f64 {
        2.0 * (self.channel_width_m + self.channel_height_m) * self.channel_length_m
    }

    /// Convective area of one block.
    pub fn wetted_area(&self) -> f64 {
        self.wetted_area_per_channel() * self.n_channels as f64
    }

    /// Conduction resistance of the hot interface (K/W).
    pub fn hot_tim_resistance(&self) -> f64 {
        self.hot_tim_thickness_m / (self.hot_tim_k * self.teg_contact_area())
    }

    /// Conduction resistance of the cold interface (K/W).
    pub fn cold_tim_resistance(&self) -> f64 {
        self.cold_tim_thickness_m / (self.cold_tim_k * self.teg_contact_area())
    }

    pub fn is_valid(&self) -> bool {
        let positive = [
            self.channel_width_m,
            self.channel_height_m,
            self.channel_length_m,
            self.manifold_id_m,
            self.hot_tim_k,
            self.hot_tim_thickness_m,
            self.cold_tim_k,
            self.cold_tim_thickness_m,
        ];
        self.n_channels > 0
            && positive.iter().all(|v| v.is_finite() && *v > 0.0)
            && self.fin_thickness_m.is_finite()
            && self.fin_thickness_m >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_block() {
        let g = HxGeometry::default();
        // 4 * 1.2e-4 / 0.086
        assert!((g.hydraulic_diameter() - 0.0055813953488372).abs() < 1e-12);
        assert!((g.total_flow_area() - 1.08e-3).abs() < 1e-15);
        // 0.04 * (0.027 + 0.010)
        assert!((g.teg_contact_area() - 1.48e-3).abs() < 1e-15);
        assert!((g.wetted_area() - 9.0 * 0.086 * 0.04).abs() < 1e-12);
    }

    #[test]
    fn interface_resistances() {
        let g = HxGeometry::default();
        assert!((g.hot_tim_resistance() - 0.000375 / (7.5 * 1.48e-3)).abs() < 1e-12);
        assert!((g.cold_tim_resistance() - 0.0005 / (4.5 * 1.48e-3)).abs() < 1e-12);
        assert!(g.is_valid());
    }

    #[test]
    fn zero_channels_invalid() {
        let g = HxGeometry {
            n_channels: 0,
            ..HxGeometry::default()
        };
        assert!(!g.is_valid());
    }
}
