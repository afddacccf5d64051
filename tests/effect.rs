mod tests {
    use button_lamp::color::{BLACK, RED, scale_intensity};
    use button_lamp::effect::{
        AmbientBlinkEffect, Effect, EffectContext, EffectKind, FIXED_POINT_FACTOR, PixelFade,
        StaticColorEffect, TaskStatus,
    };
    use button_lamp::{
        BlinkConfig, BrightnessConfig, DEFAULT_EFFECTS, Duration, EffectState, PixelSink,
        RandomSource, Rgb, SplitMixRandom,
    };

    /// Random source replaying a fixed script
    struct ScriptedRandom {
        values: Vec<u32>,
        next: usize,
    }

    impl ScriptedRandom {
        fn new(values: &[u32]) -> Self {
            Self {
                values: values.to_vec(),
                next: 0,
            }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn random_bounded(&mut self, bound: u32) -> u32 {
            let value = self.values[self.next % self.values.len()];
            self.next += 1;
            if bound == 0 { 0 } else { value % bound }
        }
    }

    struct RecordingSink {
        pixels: Vec<Rgb>,
        flushes: usize,
    }

    impl RecordingSink {
        fn new(len: usize) -> Self {
            Self {
                pixels: vec![Rgb::new(1, 1, 1); len],
                flushes: 0,
            }
        }
    }

    impl PixelSink for RecordingSink {
        fn len(&self) -> usize {
            self.pixels.len()
        }

        fn fill(&mut self, color: Rgb) {
            self.pixels.fill(color);
        }

        fn set(&mut self, index: usize, color: Rgb) {
            if let Some(pixel) = self.pixels.get_mut(index) {
                *pixel = color;
            }
        }

        fn flush(&mut self) {
            self.flushes += 1;
        }
    }

    fn state(total: usize, active: usize) -> EffectState {
        EffectState::new(total, active, &BrightnessConfig::default()).unwrap()
    }

    fn blink_config(fade_steps: u16, max_wait_ticks: u32) -> BlinkConfig {
        BlinkConfig {
            interval: Duration::from_millis(10),
            fade_steps,
            max_wait_ticks,
        }
    }

    #[test]
    fn test_static_color_writes_on_brightness_change_only() {
        let mut sink = RecordingSink::new(4);
        let mut rng = ScriptedRandom::new(&[0]);
        let mut effect = StaticColorEffect::new(1, RED, Duration::from_millis(50));
        let mut state = state(6, 1);

        for _ in 0..3 {
            let mut ctx = EffectContext {
                sink: &mut sink,
                rng: &mut rng,
                state: &state,
            };
            assert_eq!(effect.tick(&mut ctx), TaskStatus::Running);
        }
        assert_eq!(sink.flushes, 1);
        assert_eq!(sink.pixels, vec![Rgb::new(25, 0, 0); 4]);

        state.on_hold_tick(false);
        let mut ctx = EffectContext {
            sink: &mut sink,
            rng: &mut rng,
            state: &state,
        };
        assert_eq!(effect.tick(&mut ctx), TaskStatus::Running);
        assert_eq!(sink.flushes, 2);
        assert_eq!(sink.pixels, vec![Rgb::new(30, 0, 0); 4]);
    }

    #[test]
    fn test_static_color_reset_forces_redraw() {
        let mut sink = RecordingSink::new(2);
        let mut rng = ScriptedRandom::new(&[0]);
        let mut effect = StaticColorEffect::new(0, RED, Duration::from_millis(50));
        let state = state(2, 0);

        let mut ctx = EffectContext {
            sink: &mut sink,
            rng: &mut rng,
            state: &state,
        };
        effect.tick(&mut ctx);
        effect.reset();
        effect.tick(&mut ctx);
        assert_eq!(sink.flushes, 2);
    }

    #[test]
    fn test_static_color_retires_without_writing() {
        let mut sink = RecordingSink::new(3);
        let mut rng = ScriptedRandom::new(&[0]);
        let mut effect = StaticColorEffect::new(1, RED, Duration::from_millis(50));
        let state = state(6, 2);

        let mut ctx = EffectContext {
            sink: &mut sink,
            rng: &mut rng,
            state: &state,
        };
        assert_eq!(effect.tick(&mut ctx), TaskStatus::Finished);
        assert_eq!(sink.flushes, 0);
        assert_eq!(sink.pixels, vec![Rgb::new(1, 1, 1); 3]);
    }

    #[test]
    fn test_pixel_fade_cycle() {
        // Targets 200, 100, 50 and no pause
        let mut rng = ScriptedRandom::new(&[200, 100, 50, 0]);
        let config = blink_config(33, 200);
        let mut fade = PixelFade::new(&mut rng, &config);

        assert_eq!(fade.target(), [20_000, 10_000, 5_000]);
        assert_eq!(fade.steps(), [606, 303, 151]);
        assert_eq!(fade.wait_ticks(), 0);
        assert_eq!(fade.color(), BLACK);

        for _ in 0..33 {
            fade.advance(&mut rng, &config);
        }
        assert_eq!(fade.current(), [19_998, 9_999, 4_983]);
        assert_eq!(fade.color(), Rgb::new(199, 99, 49));

        // Direction reverses at the midpoint
        fade.advance(&mut rng, &config);
        assert_eq!(fade.steps(), [-606, -303, -151]);
        for _ in 0..32 {
            fade.advance(&mut rng, &config);
        }
        assert_eq!(fade.phase(), 66);
        assert_eq!(fade.current(), [0, 0, 0]);

        // The next tick starts a new cycle
        let mut rng = ScriptedRandom::new(&[10, 20, 30, 5]);
        assert_eq!(fade.advance(&mut rng, &config), BLACK);
        assert_eq!(fade.phase(), 0);
        assert_eq!(fade.target(), [1_000, 2_000, 3_000]);
        assert_eq!(fade.wait_ticks(), 5);
    }

    #[test]
    fn test_pixel_fade_symmetry() {
        let mut rng = SplitMixRandom::new(99);
        for fade_steps in [1, 2, 7, 33, 100] {
            let config = blink_config(fade_steps, 0);
            for _ in 0..20 {
                let mut fade = PixelFade::new(&mut rng, &config);
                for _ in 0..2 * u32::from(fade_steps) {
                    fade.advance(&mut rng, &config);
                    let current = fade.current();
                    assert!(current.iter().all(|&value| value >= 0));
                    assert!(current.iter().all(|&value| value <= 254 * FIXED_POINT_FACTOR));
                }
                assert_eq!(fade.current(), [0, 0, 0]);
            }
        }
    }

    #[test]
    fn test_pixel_fade_waits_before_fading() {
        let mut rng = ScriptedRandom::new(&[100, 100, 100, 3]);
        let config = blink_config(33, 200);
        let mut fade = PixelFade::new(&mut rng, &config);
        assert_eq!(fade.wait_ticks(), 3);

        for remaining in (0..3).rev() {
            assert_eq!(fade.advance(&mut rng, &config), BLACK);
            assert_eq!(fade.wait_ticks(), remaining);
            assert_eq!(fade.phase(), 0);
        }
        fade.advance(&mut rng, &config);
        assert_eq!(fade.phase(), 1);
        assert_eq!(fade.current(), [303, 303, 303]);
    }

    #[test]
    fn test_ambient_blink_renders_scaled_frame() {
        let mut sink = RecordingSink::new(4);
        let mut rng = ScriptedRandom::new(&[200, 100, 50, 0]);
        let mut effect = AmbientBlinkEffect::<8>::new(0, blink_config(33, 200));
        let state = state(6, 0);
        let mut ctx = EffectContext {
            sink: &mut sink,
            rng: &mut rng,
            state: &state,
        };

        effect.start(&mut ctx);
        assert_eq!(effect.pixels().len(), 4);
        for _ in 0..33 {
            assert_eq!(effect.tick(&mut ctx), TaskStatus::Running);
        }

        let expected = scale_intensity(Rgb::new(199, 99, 49), 100, 1000);
        assert_eq!(expected, Rgb::new(19, 9, 4));
        assert_eq!(sink.pixels, vec![expected; 4]);
        // One flush for the blank frame, then one per tick
        assert_eq!(sink.flushes, 34);
    }

    #[test]
    fn test_ambient_blink_start_blanks_strip() {
        let mut sink = RecordingSink::new(5);
        let mut rng = SplitMixRandom::new(1);
        let mut effect = AmbientBlinkEffect::<8>::new(0, BlinkConfig::default());
        let state = state(6, 0);
        let mut ctx = EffectContext {
            sink: &mut sink,
            rng: &mut rng,
            state: &state,
        };

        effect.start(&mut ctx);
        assert_eq!(sink.pixels, vec![BLACK; 5]);
        assert_eq!(sink.flushes, 1);
    }

    #[test]
    fn test_ambient_blink_is_bounded_by_buffer() {
        let mut sink = RecordingSink::new(12);
        let mut rng = SplitMixRandom::new(1);
        let mut effect = AmbientBlinkEffect::<8>::new(0, BlinkConfig::default());
        let state = state(1, 0);
        let mut ctx = EffectContext {
            sink: &mut sink,
            rng: &mut rng,
            state: &state,
        };
        effect.start(&mut ctx);
        assert_eq!(effect.pixels().len(), 8);
    }

    #[test]
    fn test_ambient_blink_retires_with_blank_frame() {
        let mut sink = RecordingSink::new(4);
        let mut rng = ScriptedRandom::new(&[200, 100, 50, 0]);
        let mut effect = AmbientBlinkEffect::<8>::new(0, blink_config(33, 200));
        let active = state(6, 0);
        let mut ctx = EffectContext {
            sink: &mut sink,
            rng: &mut rng,
            state: &active,
        };
        effect.start(&mut ctx);
        for _ in 0..10 {
            effect.tick(&mut ctx);
        }
        assert_ne!(sink.pixels, vec![BLACK; 4]);

        let moved_on = state(6, 1);
        let flushes = sink.flushes;
        let mut ctx = EffectContext {
            sink: &mut sink,
            rng: &mut rng,
            state: &moved_on,
        };
        assert_eq!(effect.tick(&mut ctx), TaskStatus::Finished);
        assert_eq!(sink.pixels, vec![BLACK; 4]);
        assert_eq!(sink.flushes, flushes + 1);
    }

    #[test]
    fn test_effect_kind_to_slot() {
        let blink = BlinkConfig::default();
        let interval = Duration::from_millis(50);
        for (index, kind) in DEFAULT_EFFECTS.iter().enumerate() {
            let slot = kind.to_slot::<8>(index, interval, &blink);
            assert_eq!(slot.index(), index);
            assert_eq!(slot.kind(), *kind);
        }

        let slot = EffectKind::AmbientBlink.to_slot::<8>(0, interval, &blink);
        assert_eq!(slot.interval(), Duration::from_millis(10));
        let slot = EffectKind::StaticColor(RED).to_slot::<8>(1, interval, &blink);
        assert_eq!(slot.interval(), interval);
        assert_eq!(EffectKind::StaticColor(RED).as_str(), "static");
        assert_eq!(EffectKind::AmbientBlink.as_str(), "ambient_blink");
    }

    #[test]
    fn test_default_effects_match_stock_lamp() {
        assert_eq!(DEFAULT_EFFECTS.len(), 6);
        assert_eq!(DEFAULT_EFFECTS[0], EffectKind::AmbientBlink);
        assert_eq!(
            DEFAULT_EFFECTS[5],
            EffectKind::StaticColor(Rgb::new(180, 100, 53))
        );
    }
}
