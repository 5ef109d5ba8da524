//! Integration tests for the animation module.

use std::time::Duration;

use tactile_core::animation::*;

const MS_16: Duration = Duration::from_millis(16);

#[test]
fn spring_survives_one_huge_frame() {
    let mut spring = Spring::new(300.0, 0.0).critically_damped();
    // A stalled frame clock delivering two seconds at once.
    spring.tick(Duration::from_secs(2));
    assert!(spring.is_complete());
    assert_eq!(spring.position(), 0.0);
}

#[test]
fn delay_and_spring_tick_independently() {
    let mut delay = Delay::new(Duration::from_millis(150));
    let mut spring = Spring::new(60.0, 0.0);
    let mut frames = 0;
    while !delay.is_complete() {
        delay.tick(MS_16);
        spring.tick(MS_16);
        frames += 1;
    }
    assert_eq!(frames, 10, "150ms at 16ms/frame rounds up to 10 frames");
    assert!(spring.position() < 60.0);
}

#[test]
fn spring_progress_is_monotonic_when_critically_damped() {
    let mut spring = Spring::new(-240.0, 0.0).critically_damped();
    let mut prev = 0.0f32;
    for _ in 0..100 {
        spring.tick(MS_16);
        let v = spring.value();
        assert!(v >= prev - 0.001, "progress went backwards: {v} < {prev}");
        prev = v;
    }
}
