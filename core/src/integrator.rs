//! Fixed-step fourth-order Runge-Kutta.

/// A state vector the integrator can combine component-wise.
pub trait Phase: Copy {
    #[must_use]
    fn add(self, other: Self) -> Self;

    #[must_use]
    fn scale(self, factor: f64) -> Self;

    fn is_finite(&self) -> bool;
}

impl Phase for f64 {
    fn add(self, other: Self) -> Self {
        self + other
    }

    fn scale(self, factor: f64) -> Self {
        self * factor
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

impl<const N: usize> Phase for [f64; N] {
    fn add(self, other: Self) -> Self {
        let mut out = self;
        for (a, b) in out.iter_mut().zip(other) {
            *a += b;
        }
        out
    }

    fn scale(self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    fn is_finite(&self) -> bool {
        self.iter().all(|v| v.is_finite())
    }
}

/// A first-order system `dy/dt = f(t, y)`.
pub trait OdeSystem {
    type State: Phase;

    fn derivative(&self, t: f64, state: &Self::State) -> Self::State;
}

/// Advance `y` from `t` to `t + h` with one classic RK4 step.
///
/// No validation happens here: a non-finite result is returned as is and left
/// for the caller to detect.
pub fn rk4_step<S: OdeSystem>(system: &S, t: f64, y: S::State, h: f64) -> S::State {
    let half = h / 2.0;

    let k1 = system.derivative(t, &y).scale(h);
    let k2 = system.derivative(t + half, &y.add(k1.scale(0.5))).scale(h);
    let k3 = system.derivative(t + half, &y.add(k2.scale(0.5))).scale(h);
    let k4 = system.derivative(t + h, &y.add(k3)).scale(h);

    let weighted = k1.add(k2.scale(2.0)).add(k3.scale(2.0)).add(k4);
    y.add(weighted.scale(1.0 / 6.0))
}
