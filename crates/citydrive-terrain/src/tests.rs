#[cfg(test)]
mod tests {
    use citydrive_core::constants::TERRAIN_WATER_LEVEL;
    use citydrive_core::enums::{TerrainBand, TerrainSurface};

    use crate::heightfield::{build, classify, raw_height, HeightFieldSpec};
    use crate::noise::NoiseGenerator;

    fn spec() -> HeightFieldSpec {
        HeightFieldSpec {
            world_half_extent: 300.0,
            city_half_extent: 100.0,
            cell_size: 20.0,
            pass_x: 0.0,
            pass_half_width: 12.0,
        }
    }

    // ---- Noise ----

    #[test]
    fn test_noise_same_seed_is_deterministic() {
        let a = NoiseGenerator::new(0.37);
        let b = NoiseGenerator::new(0.37);
        for i in 0..200 {
            let x = i as f64 * 0.173;
            let z = i as f64 * -0.291;
            assert_eq!(a.sample(x, 0.5, z), b.sample(x, 0.5, z));
        }
    }

    #[test]
    fn test_noise_reseed_resets_table() {
        let mut a = NoiseGenerator::new(0.1);
        let b = NoiseGenerator::new(0.9);
        a.seed(0.9);
        assert_eq!(a.sample(1.3, 2.7, 0.4), b.sample(1.3, 2.7, 0.4));
    }

    #[test]
    fn test_noise_output_in_unit_range() {
        for seed in [0.0, 0.25, 0.5, 0.999] {
            let noise = NoiseGenerator::new(seed);
            for i in 0..500 {
                let t = i as f64 * 0.37;
                let v = noise.sample(t, t * 0.5 - 3.0, -t * 1.7);
                assert!((-1.0..=1.0).contains(&v), "sample {v} out of range");
            }
        }
    }

    #[test]
    fn test_noise_is_zero_on_lattice_points() {
        let noise = NoiseGenerator::new(0.61);
        assert_eq!(noise.sample(3.0, 7.0, -2.0), 0.0);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = NoiseGenerator::new(0.2);
        let b = NoiseGenerator::new(0.8);
        let differs = (0..50).any(|i| {
            let t = i as f64 * 0.41 + 0.13;
            a.sample(t, 0.3, t) != b.sample(t, 0.3, t)
        });
        assert!(differs, "different seeds should produce different tables");
    }

    // ---- Height-field ----

    #[test]
    fn test_classify_clamps_water() {
        assert_eq!(classify(0.5), (TERRAIN_WATER_LEVEL, TerrainBand::Water));
        assert_eq!(classify(4.0), (4.0, TerrainBand::Sand));
        assert_eq!(classify(80.0), (80.0, TerrainBand::Snow));
    }

    #[test]
    fn test_edge_rise_forces_height_at_boundary() {
        let noise = NoiseGenerator::new(0.5);
        let edge = raw_height(&noise, 299.0, 0.0, 300.0);
        assert!(edge >= 90.0, "edge height {edge} should be mountainous");
    }

    #[test]
    fn test_build_skips_city_footprint() {
        let noise = NoiseGenerator::new(0.42);
        let cells = build(&noise, &spec());
        // 30 x 30 grid minus the 10 x 10 city interior.
        assert_eq!(cells.len(), 800);
        assert!(cells
            .iter()
            .all(|c| c.center_x.abs() > 100.0 || c.center_z.abs() > 100.0));
    }

    #[test]
    fn test_every_block_falls_in_its_band() {
        let noise = NoiseGenerator::new(0.42);
        for cell in build(&noise, &spec()) {
            match cell.surface {
                TerrainSurface::Block(band) => {
                    assert_eq!(band, TerrainBand::from_height(cell.height));
                    assert!(cell.height >= TERRAIN_WATER_LEVEL);
                    if band == TerrainBand::Water {
                        assert_eq!(cell.height, TERRAIN_WATER_LEVEL);
                    }
                }
                TerrainSurface::PassRoad => assert_eq!(cell.height, 0.0),
            }
        }
    }

    #[test]
    fn test_pass_strip_is_flat_and_not_collidable() {
        let noise = NoiseGenerator::new(0.42);
        let cells = build(&noise, &spec());
        let pass: Vec<_> = cells
            .iter()
            .filter(|c| c.surface == TerrainSurface::PassRoad)
            .collect();
        // Two columns (x = -10, 10) on both the north and south side.
        assert_eq!(pass.len(), 2 * 2 * 10);
        assert!(pass.iter().all(|c| !c.is_collidable()));
        assert!(pass.iter().all(|c| c.center_z.abs() > 100.0));
        assert!(cells
            .iter()
            .filter(|c| c.center_x.abs() < 20.0 && c.center_z.abs() > 100.0)
            .all(|c| c.surface == TerrainSurface::PassRoad));
    }

    #[test]
    fn test_build_is_reproducible() {
        let a = build(&NoiseGenerator::new(0.11), &spec());
        let b = build(&NoiseGenerator::new(0.11), &spec());
        assert_eq!(a, b);
    }
}
