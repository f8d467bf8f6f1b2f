//! Damped spring animation.
//!
//! A channel is a single `f32` moving toward a target under a unit-mass
//! spring. Integration uses the closed-form solution of the damped harmonic
//! oscillator, so the result does not depend on frame timing.

// Critical damping is detected with a tolerance so specs built from
// arithmetic still take the critical branch.
const CRITICAL_TOLERANCE: f32 = 1e-4;

/// Stiffness of a slow, soft spring.
pub const STIFFNESS_LOW: f32 = 200.0;

/// Visibility threshold for positional channels, in logical pixels.
pub const PIXEL_THRESHOLD: f32 = 0.5;

/// Visibility threshold for plain float channels (corner radius, scale, z-index).
pub const UNIT_THRESHOLD: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 is critically damped, below 1.0 overshoots, above 1.0 is sluggish.
    pub damping_ratio: f32,
    pub stiffness: f32,
}

impl SpringSpec {
    pub const fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
        }
    }

    /// Advances a spring with displacement `x0` (value minus target) and
    /// velocity `v0` by `dt` seconds. Returns the new displacement and velocity.
    ///
    /// A spring without stiffness has no motion to integrate and lands on its
    /// target immediately.
    pub fn step(&self, x0: f32, v0: f32, dt: f32) -> (f32, f32) {
        let omega = self.stiffness.max(0.0).sqrt();
        if omega <= f32::EPSILON {
            return (0.0, 0.0);
        }
        let zeta = self.damping_ratio.max(0.0);

        if (zeta - 1.0).abs() < CRITICAL_TOLERANCE {
            let c1 = x0;
            let c2 = omega.mul_add(x0, v0);
            let decay = (-omega * dt).exp();
            let position = c2.mul_add(dt, c1);
            let x = position * decay;
            let v = omega.mul_add(-position, c2) * decay;
            (x, v)
        } else if zeta < 1.0 {
            let damped = omega * (1.0 - zeta * zeta).sqrt();
            let a = zeta * omega;
            let cos_coef = x0;
            let sin_coef = a.mul_add(x0, v0) / damped;
            let decay = (-a * dt).exp();
            let (sin, cos) = (damped * dt).sin_cos();
            let x = decay * cos_coef.mul_add(cos, sin_coef * sin);
            let v = decay
                * sin_coef
                    .mul_add(damped, -a * cos_coef)
                    .mul_add(cos, (-cos_coef).mul_add(damped, -a * sin_coef) * sin);
            (x, v)
        } else {
            let root = omega * (zeta * zeta - 1.0).sqrt();
            let r1 = (-zeta).mul_add(omega, root);
            let r2 = (-zeta).mul_add(omega, -root);
            let c2 = r1.mul_add(x0, -v0) / (r1 - r2);
            let c1 = x0 - c2;
            let e1 = (r1 * dt).exp();
            let e2 = (r2 * dt).exp();
            let x = c1.mul_add(e1, c2 * e2);
            let v = (c1 * r1).mul_add(e1, c2 * r2 * e2);
            (x, v)
        }
    }
}

/// One animated number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringChannel {
    value: f32,
    velocity: f32,
    target: f32,
    threshold: f32,
}

impl SpringChannel {
    /// A channel resting at `value`.
    pub const fn at_rest(value: f32, threshold: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            threshold,
        }
    }

    pub const fn value(&self) -> f32 {
        self.value
    }

    pub const fn velocity(&self) -> f32 {
        self.velocity
    }

    pub const fn target(&self) -> f32 {
        self.target
    }

    /// Points the channel at a new target. Value and velocity carry over, so
    /// an in-flight animation bends toward the new target instead of restarting.
    pub const fn retarget(&mut self, target: f32) {
        self.target = target;
    }

    pub fn is_settled(&self) -> bool {
        self.velocity == 0.0 && self.value.to_bits() == self.target.to_bits()
    }

    pub fn tick(&mut self, spec: &SpringSpec, dt: f32) {
        if self.is_settled() {
            return;
        }

        let (displacement, velocity) = spec.step(self.value - self.target, self.velocity, dt);
        if displacement.abs() < self.threshold && velocity.abs() < self.threshold {
            self.value = self.target;
            self.velocity = 0.0;
        } else {
            self.value = self.target + displacement;
            self.velocity = velocity;
        }
    }
}
