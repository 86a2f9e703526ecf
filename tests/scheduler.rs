mod tests {
    use christmas_tree_display::{
        Duration, Instant, RedrawScheduler, animation_interval,
        frame_scheduler::{HUE_STEP, POLL_INTERVAL},
    };

    fn ms(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    #[test]
    fn test_animation_interval() {
        assert_eq!(animation_interval(1), Duration::from_millis(500));
        assert_eq!(animation_interval(5), Duration::from_millis(100));
        assert_eq!(animation_interval(10), Duration::from_millis(50));
        // Zero is treated as the slowest speed
        assert_eq!(animation_interval(0), Duration::from_millis(500));
    }

    #[test]
    fn test_animation_interval_never_increases_with_speed() {
        for speed in 1..10u8 {
            assert!(animation_interval(speed + 1) <= animation_interval(speed));
        }
    }

    #[test]
    fn test_new_scheduler_wants_a_redraw() {
        let scheduler = RedrawScheduler::new();
        assert!(scheduler.needs_redraw());
        assert_eq!(scheduler.frame(), 0);
        assert_eq!(scheduler.hue(), 0);
        assert!(!scheduler.is_backlight_off());
    }

    #[test]
    fn test_animation_step_gate() {
        let mut scheduler = RedrawScheduler::new();
        assert!(scheduler.begin_redraw(ms(0)));

        assert!(!scheduler.animation_step(ms(99), 5));
        assert!(!scheduler.needs_redraw());

        assert!(scheduler.animation_step(ms(100), 5));
        assert_eq!(scheduler.frame(), 1);
        assert_eq!(scheduler.hue(), HUE_STEP);
        assert!(scheduler.needs_redraw());

        // Interval restarts from the step
        assert!(!scheduler.animation_step(ms(150), 5));
        assert!(scheduler.animation_step(ms(200), 5));
        assert_eq!(scheduler.frame(), 2);
    }

    #[test]
    fn test_frame_and_hue_wrap() {
        let mut scheduler = RedrawScheduler::new();
        for step in 1..=256u64 {
            assert!(scheduler.animation_step(ms(step * 50), 10));
        }
        assert_eq!(scheduler.frame(), 0);
        assert_eq!(scheduler.hue(), 0);

        assert!(scheduler.animation_step(ms(257 * 50), 10));
        assert_eq!(scheduler.frame(), 1);
        assert_eq!(scheduler.hue(), 5);
    }

    #[test]
    fn test_poll_gate() {
        let mut scheduler = RedrawScheduler::new();
        assert!(!scheduler.poll_due(ms(50)));
        assert!(scheduler.poll_due(ms(100)));
        assert!(!scheduler.poll_due(ms(100)));
        assert!(!scheduler.poll_due(ms(199)));
        assert!(scheduler.poll_due(ms(100) + POLL_INTERVAL));
    }

    #[test]
    fn test_begin_redraw_consumes_request() {
        let mut scheduler = RedrawScheduler::new();
        assert!(scheduler.begin_redraw(ms(300)));
        assert_eq!(scheduler.last_redraw(), ms(300));
        assert!(!scheduler.begin_redraw(ms(400)));
        assert_eq!(scheduler.last_redraw(), ms(300));

        scheduler.request_redraw();
        assert!(scheduler.begin_redraw(ms(500)));
        assert_eq!(scheduler.last_redraw(), ms(500));
    }

    #[test]
    fn test_backlight_expires_until_marked_off() {
        let timeout = Some(Duration::from_secs(1));
        let mut scheduler = RedrawScheduler::new();
        assert!(scheduler.begin_redraw(ms(0)));

        assert!(!scheduler.backlight_expired(ms(1000), timeout));
        assert!(scheduler.backlight_expired(ms(1001), timeout));
        // Nothing is recorded until the pin was actually switched
        assert!(!scheduler.is_backlight_off());
        assert!(scheduler.backlight_expired(ms(1100), timeout));

        scheduler.mark_backlight_off();
        assert!(scheduler.is_backlight_off());
        assert!(!scheduler.backlight_expired(ms(5000), timeout));

        assert!(scheduler.wake());
        assert!(!scheduler.wake());
        assert!(!scheduler.is_backlight_off());
    }

    #[test]
    fn test_backlight_timeout_measured_from_redraw() {
        let timeout = Some(Duration::from_secs(1));
        let mut scheduler = RedrawScheduler::new();
        assert!(scheduler.begin_redraw(ms(0)));

        // Animation steps alone do not keep the backlight on
        for step in 1..=20u64 {
            scheduler.animation_step(ms(step * 100), 5);
        }
        assert!(scheduler.backlight_expired(ms(2000), timeout));

        scheduler.mark_backlight_off();
        scheduler.wake();
        assert!(scheduler.begin_redraw(ms(2000)));
        assert!(!scheduler.backlight_expired(ms(2500), timeout));
    }

    #[test]
    fn test_no_timeout_never_expires() {
        let mut scheduler = RedrawScheduler::new();
        assert!(!scheduler.backlight_expired(ms(u64::from(u32::MAX)), None));
        assert!(!scheduler.is_backlight_off());
    }
}
