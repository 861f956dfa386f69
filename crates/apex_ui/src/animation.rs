//! Motion primitives: easing curves, tweens, springs and looping keyframes.
//!
//! Everything here is advanced by an explicit `dt` (seconds). Nothing reads
//! a clock, so a frame that never arrives simply never moves anything.

use crate::style::Color;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Linear interpolation (marquee, progress mapping).
    Linear,
    /// CSS `ease-out`, cubic-bezier(0, 0, 0.58, 1).
    #[default]
    EaseOut,
    /// CSS `ease-in-out`, cubic-bezier(0.42, 0, 0.58, 1).
    EaseInOut,
    /// Exponential ease-out: `1 - 2^(-10t)`.
    ExponentialOut,
    /// Smooth-scroll curve: `min(1, 1.001 - 2^(-10t))`.
    ExpoClamped,
    /// Arbitrary cubic bezier with control points (x1, y1) and (x2, y2).
    CubicBezier(f32, f32, f32, f32),
    /// Instant (no animation).
    Instant,
}

impl Easing {
    /// The card reveal curve, `cubic-bezier(0.215, 0.61, 0.355, 1)`.
    pub const EASE_OUT_CUBIC: Self = Self::CubicBezier(0.215, 0.61, 0.355, 1.0);
    /// Tailwind's `animate-pulse` curve.
    pub const PULSE: Self = Self::CubicBezier(0.4, 0.0, 0.6, 1.0);

    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Self::ExpoClamped => (1.001 - 2.0_f32.powf(-10.0 * t)).min(1.0),
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
            Self::Instant => 1.0,
        }
    }
}

/// Evaluates a CSS cubic-bezier timing function at `x`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;
    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample_x = |t: f32| ((ax * t + bx) * t + cx) * t;
    let sample_y = |t: f32| ((ay * t + by) * t + cy) * t;
    let slope_x = |t: f32| (3.0 * ax * t + 2.0 * bx) * t + cx;

    // Newton first, bisection if the slope flattens out.
    let mut t = x;
    for _ in 0..8 {
        let error = sample_x(t) - x;
        if error.abs() < 1e-6 {
            return sample_y(t);
        }
        let slope = slope_x(t);
        if slope.abs() < 1e-6 {
            break;
        }
        t -= error / slope;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    t = x;
    for _ in 0..32 {
        let value = sample_x(t);
        if (value - x).abs() < 1e-6 {
            break;
        }
        if value < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }
    sample_y(t)
}

/// A time-based tween from a start value to a target.
#[derive(Debug, Clone)]
pub struct Animation {
    /// Current value.
    current: f32,
    /// Target value.
    target: f32,
    /// Animation progress (0-1).
    progress: f32,
    /// Animation duration (seconds).
    duration: f32,
    /// Delay before the tween starts moving (seconds).
    delay: f32,
    /// Delay still to wait for the running tween.
    delay_left: f32,
    /// Easing function.
    easing: Easing,
    /// Start value (for interpolation).
    start: f32,
}

impl Animation {
    /// Default animation duration (300ms, CSS transition default of the page).
    pub const DEFAULT_DURATION: f32 = 0.3;

    /// Creates a new animation resting at the given value.
    #[must_use]
    pub fn new(value: f32, easing: Easing) -> Self {
        Self {
            current: value,
            target: value,
            progress: 1.0,
            duration: Self::DEFAULT_DURATION,
            delay: 0.0,
            delay_left: 0.0,
            easing,
            start: value,
        }
    }

    /// Creates an animation with custom duration.
    #[must_use]
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Creates an animation that waits `delay` seconds after each retarget.
    #[must_use]
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Returns the target value.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Returns true if the animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Sets a new target value, starting animation from current value.
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() > 0.0001 {
            self.start = self.current;
            self.target = target;
            self.progress = 0.0;
            self.delay_left = self.delay;
        }
    }

    /// Immediately sets the value without animation.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.start = value;
        self.progress = 1.0;
        self.delay_left = 0.0;
    }

    /// Updates the animation.
    ///
    /// `dt` is delta time in seconds.
    pub fn update(&mut self, dt: f32) {
        if self.progress >= 1.0 {
            return;
        }

        let mut dt = dt;
        if self.delay_left > 0.0 {
            self.delay_left -= dt;
            if self.delay_left > 0.0 {
                return;
            }
            dt = -self.delay_left;
            self.delay_left = 0.0;
        }

        if self.duration > 0.0 {
            self.progress += dt / self.duration;
        } else {
            self.progress = 1.0;
        }
        self.progress = self.progress.min(1.0);

        let eased = self.easing.apply(self.progress);
        self.current = self.start + (self.target - self.start) * eased;

        if self.progress >= 1.0 {
            self.current = self.target;
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(0.0, Easing::EaseOut)
    }
}

/// Physical parameters of a damped spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Spring constant `k`.
    pub stiffness: f32,
    /// Damping coefficient `c`.
    pub damping: f32,
    /// Mass `m`.
    pub mass: f32,
    /// Displacement below which the spring may come to rest.
    pub rest_delta: f32,
    /// Speed below which the spring may come to rest.
    pub rest_speed: f32,
}

impl SpringConfig {
    /// Cursor follower: stiffness 250, damping 30, mass 0.5.
    pub const CURSOR: Self = Self::new(250.0, 30.0, 0.5);
    /// Scroll progress bar: stiffness 100, damping 30, rest delta 0.001.
    pub const PROGRESS: Self = Self::new(100.0, 30.0, 1.0).with_rest(0.001, 0.001);
    /// Project card pop-in: stiffness 400, damping 25.
    pub const CARD_SCALE: Self = Self::new(400.0, 25.0, 1.0);
    /// Default spring for transforms: stiffness 500, damping 25.
    pub const TRANSFORM: Self = Self::new(500.0, 25.0, 1.0);

    /// Creates a spring with the default rest thresholds.
    #[must_use]
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }

    /// Overrides the rest thresholds.
    #[must_use]
    pub const fn with_rest(mut self, rest_delta: f32, rest_speed: f32) -> Self {
        self.rest_delta = rest_delta;
        self.rest_speed = rest_speed;
        self
    }

    /// Damping ratio `c / (2 * sqrt(k * m))`. At or above 1.0 the spring never overshoots.
    #[must_use]
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::TRANSFORM
    }
}

/// A value pulled toward its target by a damped spring.
#[derive(Debug, Clone)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    config: SpringConfig,
    delay: f32,
    delay_left: f32,
    at_rest: bool,
}

impl Spring {
    /// Integration step (seconds).
    const STEP: f32 = 0.001;
    /// Longest frame gap simulated in one update (seconds).
    const MAX_FRAME: f32 = 1.0;

    /// Creates a spring resting at `value`.
    #[must_use]
    pub fn new(value: f32, config: SpringConfig) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            config,
            delay: 0.0,
            delay_left: 0.0,
            at_rest: true,
        }
    }

    /// Waits `delay` seconds after each retarget before moving.
    #[must_use]
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Returns the current velocity (units per second).
    #[must_use]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Returns the target value.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Returns true once the spring has come to rest on its target.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Retargets the spring, keeping its current velocity.
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() > f32::EPSILON {
            self.target = target;
            self.at_rest = false;
            self.delay_left = self.delay;
        }
    }

    /// Jumps to `value` and stops.
    pub fn set_immediate(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.delay_left = 0.0;
        self.at_rest = true;
    }

    /// Advances the simulation by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.at_rest {
            return;
        }

        let mut dt = dt.min(Self::MAX_FRAME);
        if self.delay_left > 0.0 {
            self.delay_left -= dt;
            if self.delay_left > 0.0 {
                return;
            }
            dt = -self.delay_left;
            self.delay_left = 0.0;
        }
        if dt <= 0.0 {
            return;
        }

        let SpringConfig {
            stiffness,
            damping,
            mass,
            rest_delta,
            rest_speed,
        } = self.config;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = (dt / Self::STEP).ceil().max(1.0) as usize;
        let h = dt / steps as f32;
        for _ in 0..steps {
            let displacement = self.value - self.target;
            let acceleration = (-stiffness * displacement - damping * self.velocity) / mass;
            self.velocity += acceleration * h;
            self.value += self.velocity * h;
        }

        if (self.value - self.target).abs() < rest_delta && self.velocity.abs() < rest_speed {
            self.value = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

/// How a [`Motion`] travels to its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Time-based tween.
    Tween {
        /// Duration in seconds.
        duration: f32,
        /// Delay in seconds.
        delay: f32,
        /// Easing curve.
        easing: Easing,
    },
    /// Physics-based spring.
    Spring {
        /// Spring parameters.
        config: SpringConfig,
        /// Delay in seconds.
        delay: f32,
    },
}

impl Transition {
    /// A tween without delay.
    #[must_use]
    pub const fn tween(duration: f32, easing: Easing) -> Self {
        Self::Tween {
            duration,
            delay: 0.0,
            easing,
        }
    }

    /// A spring without delay.
    #[must_use]
    pub const fn spring(config: SpringConfig) -> Self {
        Self::Spring { config, delay: 0.0 }
    }

    /// Returns the same transition starting `delay` seconds later.
    #[must_use]
    pub const fn with_delay(self, delay: f32) -> Self {
        match self {
            Self::Tween {
                duration, easing, ..
            } => Self::Tween {
                duration,
                delay,
                easing,
            },
            Self::Spring { config, .. } => Self::Spring { config, delay },
        }
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::tween(Animation::DEFAULT_DURATION, Easing::EaseOut)
    }
}

#[derive(Debug, Clone)]
enum Driver {
    Tween(Animation),
    Spring(Spring),
}

/// An animated scalar driven by a [`Transition`].
#[derive(Debug, Clone)]
pub struct Motion {
    driver: Driver,
}

impl Motion {
    /// Creates a motion resting at `value`.
    #[must_use]
    pub fn new(value: f32, transition: Transition) -> Self {
        let driver = match transition {
            Transition::Tween {
                duration,
                delay,
                easing,
            } => Driver::Tween(
                Animation::new(value, easing)
                    .with_duration(duration)
                    .with_delay(delay),
            ),
            Transition::Spring { config, delay } => {
                Driver::Spring(Spring::new(value, config).with_delay(delay))
            }
        };
        Self { driver }
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        match &self.driver {
            Driver::Tween(anim) => anim.value(),
            Driver::Spring(spring) => spring.value(),
        }
    }

    /// Returns the target value.
    #[must_use]
    pub fn target(&self) -> f32 {
        match &self.driver {
            Driver::Tween(anim) => anim.target(),
            Driver::Spring(spring) => spring.target(),
        }
    }

    /// Returns true once the value sits on its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        match &self.driver {
            Driver::Tween(anim) => anim.is_complete(),
            Driver::Spring(spring) => spring.is_at_rest(),
        }
    }

    /// Retargets the motion.
    pub fn set_target(&mut self, target: f32) {
        match &mut self.driver {
            Driver::Tween(anim) => anim.set_target(target),
            Driver::Spring(spring) => spring.set_target(target),
        }
    }

    /// Jumps to `value`.
    pub fn set_immediate(&mut self, value: f32) {
        match &mut self.driver {
            Driver::Tween(anim) => anim.set_immediate(value),
            Driver::Spring(spring) => spring.set_immediate(value),
        }
    }

    /// Advances by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        match &mut self.driver {
            Driver::Tween(anim) => anim.update(dt),
            Driver::Spring(spring) => spring.update(dt),
        }
    }
}

/// A looping (or one-shot) keyframe track sampled by elapsed time.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    values: Vec<f32>,
    duration: f32,
    easing: Easing,
    repeat: bool,
}

impl Keyframes {
    /// Creates a track that plays once over `duration` seconds.
    #[must_use]
    pub fn new(values: impl Into<Vec<f32>>, duration: f32) -> Self {
        Self {
            values: values.into(),
            duration,
            easing: Easing::EaseInOut,
            repeat: false,
        }
    }

    /// Loops forever.
    #[must_use]
    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Sets the per-segment easing.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Samples the track `elapsed` seconds after it started.
    #[must_use]
    pub fn sample(&self, elapsed: f32) -> f32 {
        match self.values.as_slice() {
            [] => 0.0,
            [only] => *only,
            values => {
                let t = if self.duration <= 0.0 {
                    1.0
                } else if self.repeat {
                    elapsed.max(0.0).rem_euclid(self.duration) / self.duration
                } else {
                    (elapsed / self.duration).clamp(0.0, 1.0)
                };

                let segments = values.len() - 1;
                let position = t * segments as f32;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let index = (position.floor() as usize).min(segments - 1);
                let local = self.easing.apply(position - index as f32);
                values[index] + (values[index + 1] - values[index]) * local
            }
        }
    }
}

/// A color that eases toward its target through a [`Motion`] on a mix factor.
#[derive(Debug, Clone)]
pub struct AnimatedColor {
    from: Color,
    to: Color,
    mix: Motion,
}

impl AnimatedColor {
    /// Creates an animated color resting at `color`.
    #[must_use]
    pub fn new(color: Color, transition: Transition) -> Self {
        Self {
            from: color,
            to: color,
            mix: Motion::new(1.0, transition),
        }
    }

    /// Returns the current color.
    #[must_use]
    pub fn value(&self) -> Color {
        self.from.lerp(self.to, self.mix.value().clamp(0.0, 1.0))
    }

    /// Returns the target color.
    #[must_use]
    pub fn target(&self) -> Color {
        self.to
    }

    /// Returns true once the color sits on its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.mix.is_settled()
    }

    /// Sets a new target color, blending from the current color.
    pub fn set_target(&mut self, color: Color) {
        if color == self.to {
            return;
        }
        self.from = self.value();
        self.to = color;
        self.mix.set_immediate(0.0);
        self.mix.set_target(1.0);
    }

    /// Jumps to `color`.
    pub fn set_immediate(&mut self, color: Color) {
        self.from = color;
        self.to = color;
        self.mix.set_immediate(1.0);
    }

    /// Updates the animation.
    pub fn update(&mut self, dt: f32) {
        self.mix.update(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(motion: &mut Motion, seconds: f32) {
        let frames = (seconds / 0.016).ceil() as usize;
        for _ in 0..frames {
            motion.update(0.016);
        }
    }

    #[test]
    fn test_exponential_out_is_sharp() {
        let value = Easing::ExponentialOut.apply(0.3);
        assert!(value > 0.8, "Exponential out should snap quickly: {value}");
    }

    #[test]
    fn test_expo_clamped_never_exceeds_one() {
        assert!((Easing::ExpoClamped.apply(0.0) - 0.001).abs() < 1e-6);
        assert_eq!(Easing::ExpoClamped.apply(1.0), 1.0);
        assert!(Easing::ExpoClamped.apply(0.99) <= 1.0);
    }

    #[test]
    fn test_cubic_bezier_endpoints_and_shape() {
        let ease = Easing::EASE_OUT_CUBIC;
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        // ease-out: ahead of linear at the midpoint
        assert!(ease.apply(0.5) > 0.5);

        let linear = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        assert!((linear.apply(0.37) - 0.37).abs() < 1e-3);
    }

    #[test]
    fn test_animation_reaches_target() {
        let mut anim = Animation::new(0.0, Easing::ExponentialOut).with_duration(0.15);
        anim.set_target(100.0);

        for _ in 0..20 {
            anim.update(0.016);
        }

        assert!((anim.value() - 100.0).abs() < 0.01);
        assert!(anim.is_complete());
    }

    #[test]
    fn test_animation_waits_for_delay() {
        let mut anim = Animation::new(0.0, Easing::Linear)
            .with_duration(1.0)
            .with_delay(0.5);
        anim.set_target(1.0);

        anim.update(0.4);
        assert_eq!(anim.value(), 0.0);

        anim.update(0.2);
        assert!((anim.value() - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut spring = Spring::new(0.0, SpringConfig::CURSOR);
        spring.set_target(200.0);

        for _ in 0..120 {
            spring.update(0.016);
        }

        assert!(spring.is_at_rest());
        assert_eq!(spring.value(), 200.0);
    }

    #[test]
    fn test_overdamped_spring_never_overshoots() {
        let config = SpringConfig::PROGRESS;
        assert!(config.damping_ratio() >= 1.0);

        let mut spring = Spring::new(0.0, config);
        spring.set_target(1.0);
        let mut previous = 0.0;
        for _ in 0..300 {
            spring.update(0.016);
            assert!(spring.value() <= 1.0);
            assert!(spring.value() >= previous);
            previous = spring.value();
        }
        assert!(spring.is_at_rest());
    }

    #[test]
    fn test_underdamped_spring_overshoots() {
        let mut spring = Spring::new(0.95, SpringConfig::CARD_SCALE);
        spring.set_target(1.0);
        let mut peak: f32 = 0.0;
        for _ in 0..120 {
            spring.update(0.016);
            peak = peak.max(spring.value());
        }
        assert!(peak > 1.0);
        assert!(spring.is_at_rest());
    }

    #[test]
    fn test_motion_spring_delay() {
        let mut motion = Motion::new(0.0, Transition::spring(SpringConfig::TRANSFORM).with_delay(0.3));
        motion.set_target(1.0);
        motion.update(0.2);
        assert_eq!(motion.value(), 0.0);
        run(&mut motion, 2.0);
        assert!(motion.is_settled());
        assert_eq!(motion.value(), 1.0);
    }

    #[test]
    fn test_keyframes_bob_loops() {
        let bob = Keyframes::new([0.0, 10.0, 0.0], 2.0).repeating();
        assert_eq!(bob.sample(0.0), 0.0);
        assert!((bob.sample(1.0) - 10.0).abs() < 1e-4);
        assert!((bob.sample(2.0) - 0.0).abs() < 1e-4);
        assert!((bob.sample(3.0) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_animated_color_blends() {
        let mut color = AnimatedColor::new(Color::TRANSPARENT, Transition::tween(0.3, Easing::Linear));
        color.set_target(Color::WHITE);
        color.update(0.15);
        assert!((color.value().a - 0.5).abs() < 1e-3);
        color.update(0.2);
        assert!(color.is_settled());
        assert_eq!(color.value(), Color::WHITE);
    }
}
