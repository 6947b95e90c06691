use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use subitize::{
    layout::{self, Role, DOMAIN_SIZE},
    settings::{CountRange, RoundConfig, MAX_COUNT},
};

fn config_strategy() -> impl Strategy<Value = RoundConfig> {
    (
        1..=MAX_COUNT,
        0..=MAX_COUNT,
        any::<bool>(),
        1..=MAX_COUNT,
        0..=MAX_COUNT,
        5.0f64..80.0,
    )
        .prop_map(|(t_min, t_span, distractors, d_min, d_span, sep)| {
            let t_max = (t_min + t_span).min(MAX_COUNT);
            let d_max = (d_min + d_span).min(MAX_COUNT);
            RoundConfig {
                target_range: CountRange::new(t_min, t_max),
                distractors_enabled: distractors,
                distractor_range: CountRange::new(d_min, d_max),
                min_separation: sep,
                ..RoundConfig::default()
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn points_keep_their_distance(cfg in config_strategy(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = layout::generate(&cfg, &mut rng);

        for (i, a) in layout.points.iter().enumerate() {
            prop_assert!((0.0..DOMAIN_SIZE).contains(&a.x));
            prop_assert!((0.0..DOMAIN_SIZE).contains(&a.y));
            for b in &layout.points[i + 1..] {
                prop_assert!(a.distance_to(b.x, b.y) >= cfg.min_separation);
            }
        }
    }

    #[test]
    fn counts_match_points_and_range(cfg in config_strategy(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = layout::generate(&cfg, &mut rng);

        prop_assert_eq!(layout.targets().count() as u32, layout.target_count);
        prop_assert_eq!(layout.distractors().count() as u32, layout.distractor_count);

        if !cfg.distractors_enabled {
            prop_assert_eq!(layout.distractor_count, 0);
        }
        if !layout.degraded {
            prop_assert!(cfg.target_range.contains(layout.target_count));
            if cfg.distractors_enabled {
                prop_assert!(cfg.distractor_range.contains(layout.distractor_count));
            }
        } else {
            prop_assert!(layout.target_count <= cfg.target_range.max);
        }

        // targets always come first
        let first_distractor = layout.points.iter().position(|p| p.role == Role::Distractor);
        if let Some(idx) = first_distractor {
            prop_assert!(layout.points[idx..].iter().all(|p| p.role == Role::Distractor));
        }
    }
}
