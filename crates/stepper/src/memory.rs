/// Ring buffer of correction pairs `(s, y)` stored in borrowed workspace.
///
/// `ring[0]` is the number of stored pairs and `ring[1]` the slot the next
/// pair is written to.
pub(crate) struct Memory<'a> {
    n: usize,
    m: usize,
    s: &'a mut [f64],
    y: &'a mut [f64],
    rho: &'a mut [f64],
    alpha: &'a mut [f64],
    ring: &'a mut [i64],
}

/// Relative threshold below which a pair's curvature `sᵀy` is rejected.
const CURVATURE_EPS: f64 = 2.2e-16;

impl<'a> Memory<'a> {
    pub(crate) fn new(
        n: usize,
        m: usize,
        s: &'a mut [f64],
        y: &'a mut [f64],
        rho: &'a mut [f64],
        alpha: &'a mut [f64],
        ring: &'a mut [i64],
    ) -> Self {
        Self {
            n,
            m,
            s,
            y,
            rho,
            alpha,
            ring,
        }
    }

    /// Number of stored pairs.
    pub(crate) fn len(&self) -> usize {
        usize::try_from(self.ring[0]).unwrap_or(0).min(self.m)
    }

    fn head(&self) -> usize {
        usize::try_from(self.ring[1]).unwrap_or(0) % self.m.max(1)
    }

    /// Forgets every stored pair.
    pub(crate) fn clear(&mut self) {
        self.ring[0] = 0;
        self.ring[1] = 0;
    }

    /// Slot of the `k`-th newest pair (`k = 0` is the newest).
    fn slot(&self, k: usize) -> usize {
        (self.head() + self.m - 1 - k) % self.m
    }

    fn pair(&self, slot: usize) -> (&[f64], &[f64]) {
        let range = slot * self.n..(slot + 1) * self.n;
        (&self.s[range.clone()], &self.y[range])
    }

    /// Stores a new pair, overwriting the oldest once full.
    ///
    /// Returns false and stores nothing if the pair lacks positive curvature.
    pub(crate) fn push(&mut self, s: &[f64], y: &[f64]) -> bool {
        let sy = dot(s, y);
        let yy = dot(y, y);
        if sy.is_nan() || sy <= CURVATURE_EPS * yy {
            return false;
        }

        let slot = self.head();
        let range = slot * self.n..(slot + 1) * self.n;
        self.s[range.clone()].copy_from_slice(s);
        self.y[range].copy_from_slice(y);
        self.rho[slot] = 1.0 / sy;

        self.ring[1] = i64::try_from((slot + 1) % self.m).unwrap_or(0);
        self.ring[0] = i64::try_from((self.len() + 1).min(self.m)).unwrap_or(0);
        true
    }

    /// Writes the quasi-Newton direction `d = -H g` using the two-loop recursion.
    ///
    /// With no stored pairs this is steepest descent.
    pub(crate) fn direction(&mut self, g: &[f64], d: &mut [f64]) {
        d.copy_from_slice(g);
        let len = self.len();

        for k in 0..len {
            let slot = self.slot(k);
            let (s, y) = self.pair(slot);
            let a = self.rho[slot] * dot(s, d);
            axpy(-a, y, d);
            self.alpha[slot] = a;
        }

        if len > 0 {
            let (s, y) = self.pair(self.slot(0));
            let gamma = dot(s, y) / dot(y, y);
            d.iter_mut().for_each(|v| *v *= gamma);
        }

        for k in (0..len).rev() {
            let slot = self.slot(k);
            let (s, y) = self.pair(slot);
            let beta = self.rho[slot] * dot(y, d);
            axpy(self.alpha[slot] - beta, s, d);
        }

        d.iter_mut().for_each(|v| *v = -*v);
    }
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// `out += a * x`
fn axpy(a: f64, x: &[f64], out: &mut [f64]) {
    for (o, xi) in out.iter_mut().zip(x) {
        *o += a * xi;
    }
}
