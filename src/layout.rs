use crate::settings::{CountRange, RoundConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Side length of the square the dots are placed in.
pub const DOMAIN_SIZE: f64 = 200.0;

/// Draws allowed per dot before the layout gives up on it.
pub const MAX_ATTEMPTS_PER_POINT: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Target,
    Distractor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub role: Role,
}

impl Point {
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        ((self.x - x).powi(2) + (self.y - y).powi(2)).sqrt()
    }
}

/// One round's worth of dots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub points: Vec<Point>,
    pub target_count: u32,
    pub distractor_count: u32,
    /// Set when the domain was too crowded to place every requested dot.
    pub degraded: bool,
}

impl Layout {
    pub fn targets(&self) -> impl Iterator<Item = &Point> {
        self.points.iter().filter(|p| p.role == Role::Target)
    }

    pub fn distractors(&self) -> impl Iterator<Item = &Point> {
        self.points.iter().filter(|p| p.role == Role::Distractor)
    }
}

fn draw_count<R: Rng + ?Sized>(range: &CountRange, rng: &mut R) -> u32 {
    rng.gen_range(range.iter())
}

/// Rejection-sample one point that keeps `min_separation` from everything
/// already placed. Returns `None` when the attempt budget runs out.
fn sample_point<R: Rng + ?Sized>(
    placed: &[Point],
    role: Role,
    min_separation: f64,
    rng: &mut R,
) -> Option<Point> {
    for _ in 0..MAX_ATTEMPTS_PER_POINT {
        let x = rng.gen_range(0.0..DOMAIN_SIZE);
        let y = rng.gen_range(0.0..DOMAIN_SIZE);
        if placed.iter().all(|p| p.distance_to(x, y) >= min_separation) {
            return Some(Point { x, y, role });
        }
    }
    None
}

fn place<R: Rng + ?Sized>(
    points: &mut Vec<Point>,
    count: u32,
    role: Role,
    min_separation: f64,
    rng: &mut R,
) -> u32 {
    for placed in 0..count {
        match sample_point(points, role, min_separation, rng) {
            Some(p) => points.push(p),
            None => return placed,
        }
    }
    count
}

/// Produce the dots for a round. Targets are placed before distractors.
///
/// The counts in the returned layout are what was actually placed, so they
/// are the values to score against even when `degraded` is set.
pub fn generate<R: Rng + ?Sized>(config: &RoundConfig, rng: &mut R) -> Layout {
    let wanted_targets = draw_count(&config.target_range, rng);
    let wanted_distractors = if config.distractors_enabled {
        draw_count(&config.distractor_range, rng)
    } else {
        0
    };

    let capacity = (wanted_targets + wanted_distractors) as usize;
    let mut points = Vec::with_capacity(capacity);

    let target_count = place(
        &mut points,
        wanted_targets,
        Role::Target,
        config.min_separation,
        rng,
    );
    let distractor_count = place(
        &mut points,
        wanted_distractors,
        Role::Distractor,
        config.min_separation,
        rng,
    );

    let degraded = target_count < wanted_targets || distractor_count < wanted_distractors;
    if degraded {
        log::warn!(
            "crowded layout: placed {}/{} targets and {}/{} distractors at separation {}",
            target_count,
            wanted_targets,
            distractor_count,
            wanted_distractors,
            config.min_separation
        );
    }

    Layout {
        points,
        target_count,
        distractor_count,
        degraded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::CountRange;
    use rand::{rngs::StdRng, SeedableRng};

    fn config(targets: (u32, u32), distractors: Option<(u32, u32)>) -> RoundConfig {
        RoundConfig {
            target_range: CountRange::new(targets.0, targets.1),
            distractors_enabled: distractors.is_some(),
            distractor_range: distractors
                .map(|(a, b)| CountRange::new(a, b))
                .unwrap_or(CountRange::new(1, 5)),
            ..RoundConfig::default()
        }
    }

    #[test]
    fn counts_stay_in_range_without_distractors() {
        let mut rng = StdRng::seed_from_u64(7);
        let cfg = config((1, 10), None);
        for _ in 0..200 {
            let layout = generate(&cfg, &mut rng);
            assert!(!layout.degraded);
            assert!((1..=10).contains(&layout.target_count));
            assert_eq!(layout.distractor_count, 0);
            assert_eq!(layout.targets().count() as u32, layout.target_count);
            assert_eq!(layout.distractors().count(), 0);
        }
    }

    #[test]
    fn distractors_follow_targets() {
        let mut rng = StdRng::seed_from_u64(11);
        let layout = generate(&config((3, 3), Some((2, 2))), &mut rng);

        assert_eq!(layout.target_count, 3);
        assert_eq!(layout.distractor_count, 2);
        let roles: Vec<Role> = layout.points.iter().map(|p| p.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::Target,
                Role::Target,
                Role::Target,
                Role::Distractor,
                Role::Distractor
            ]
        );
    }

    #[test]
    fn points_are_separated_and_inside_domain() {
        let mut rng = StdRng::seed_from_u64(3);
        let layout = generate(&config((8, 8), Some((6, 6))), &mut rng);

        for (i, a) in layout.points.iter().enumerate() {
            assert!((0.0..DOMAIN_SIZE).contains(&a.x));
            assert!((0.0..DOMAIN_SIZE).contains(&a.y));
            for b in &layout.points[i + 1..] {
                assert!(a.distance_to(b.x, b.y) >= 25.0);
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let cfg = config((1, 10), Some((1, 5)));
        let a = generate(&cfg, &mut StdRng::seed_from_u64(42));
        let b = generate(&cfg, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn impossible_separation_degrades_instead_of_hanging() {
        let mut rng = StdRng::seed_from_u64(1);
        let cfg = RoundConfig {
            min_separation: 150.0,
            ..config((25, 25), Some((5, 5)))
        };
        let layout = generate(&cfg, &mut rng);

        assert!(layout.degraded);
        assert!(layout.target_count < 25);
        assert!(layout.target_count >= 1);
        assert_eq!(layout.targets().count() as u32, layout.target_count);
        assert_eq!(layout.distractors().count() as u32, layout.distractor_count);
    }
}
