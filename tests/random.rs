mod tests {
    use button_lamp::{Instant, RandomSource, SplitMixRandom};

    #[test]
    fn test_random_bounded_stays_in_range() {
        let mut rng = SplitMixRandom::new(42);
        for bound in [1, 2, 3, 200, 255, u32::MAX] {
            for _ in 0..1000 {
                assert!(rng.random_bounded(bound) < bound);
            }
        }
    }

    #[test]
    fn test_empty_range() {
        let mut rng = SplitMixRandom::new(7);
        assert_eq!(rng.random_bounded(0), 0);
        assert_eq!(rng.random_bounded(1), 0);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SplitMixRandom::from_instant(Instant::from_millis(1234));
        let mut b = SplitMixRandom::from_instant(Instant::from_millis(1234));
        for _ in 0..64 {
            assert_eq!(a.random_bounded(255), b.random_bounded(255));
        }
    }

    #[test]
    fn test_values_spread_over_range() {
        let mut rng = SplitMixRandom::new(0);
        let mut seen = [false; 8];
        for _ in 0..1000 {
            seen[rng.random_bounded(8) as usize] = true;
        }
        assert!(seen.iter().all(|&hit| hit));
    }
}
