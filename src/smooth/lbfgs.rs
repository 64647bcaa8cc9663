use super::SmoothObjective;
use ndarray::prelude::*;
use ndarray::NdFloat;
use std::collections::VecDeque;

/// A point together with the objective value and gradient there
///
/// Iterates are plain values owned by the caller: [`LbfgsState::advance`]
/// consumes one and returns the next. Between calls the caller may rewrite
/// `value` and `gradient`, e.g. when the objective has shifted by a linear
/// term, and the solver continues from the edited pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Iterate<S> {
    pub point: Array1<S>,
    pub value: S,
    pub gradient: Array1<S>,
}

impl<S: NdFloat> Iterate<S> {
    /// Evaluate `f` at `point`
    pub fn at<F>(f: &F, point: Array1<S>) -> Iterate<S>
    where
        F: SmoothObjective<S> + ?Sized,
    {
        let (value, gradient) = f.evaluate(point.view());
        Iterate {
            point,
            value,
            gradient,
        }
    }

    pub fn gradient_norm(&self) -> S {
        self.gradient.dot(&self.gradient).sqrt()
    }
}

/// Limited-memory BFGS with a backtracking line search
///
/// Minimizes a smooth objective function $`f`$ using the limited-memory
/// Broyden Fletcher Goldfarb Shanno (BFGS) algorithm [\[N80\]](#references).
/// See also [Wikipedia](https://en.wikipedia.org/wiki/Limited-memory_BFGS).
///
/// Algorithm
/// ---------
/// ```math
/// \begin{aligned}
/// g_k &= \nabla f(x_k) \\
/// d_k &= -H_kg_k \\
/// \alpha_k &= \max\{\beta^j : f(x_k + \beta^j d_k) \leq f(x_k) + c_1\beta^j d_k^Hg_k\} \\
/// x_{k+1} &= x_k + \alpha_k d_k \\
/// s_k &= x_{k+1} - x_k, \quad y_k = g_{k+1} - g_k, \quad \rho_k = 1/y_k^Hs_k
/// \end{aligned}
/// ```
/// where $`H_k`$ is applied implicitly by the two-loop recursion over the
/// last `memory_len` pairs $`(s_k, y_k)`$, scaled by
/// $`\gamma = s^Hy / y^Hy`$ of the newest pair. Pairs with
/// $`s^Hy \leq 0`$ are not stored.
///
/// Parameters
/// ----------
/// - __memory_len:__     number of corrections to remember, 3 to 7 is usually sufficient  
/// - __maxiter:__        number of iterations for [`Lbfgs::minimize`]  
/// - __gtol:__           stop once $`\|\nabla f(x)\|_2 \leq`$ gtol  
/// - __c1:__             sufficient decrease constant of the Armijo condition  
/// - __shrink:__         backtracking factor $`\beta \in (0, 1)`$  
/// - __max_backtracks:__ give up on a step after this many reductions  
///
/// Two ways of running it are offered: [`Lbfgs::minimize`] runs to
/// convergence from a starting point, while [`Lbfgs::start`] returns a
/// resumable [`LbfgsState`] that keeps its curvature memory between calls to
/// [`LbfgsState::advance`].
///
/// References
/// ----------
/// \[N80\]: [ Nocedal, J,
///      "Updating Quasi-Newton Matrices With Limited Storage",
///         Mathematics of Computation, Vol 35, #151, July 1980, 773-782 ](https://courses.engr.illinois.edu/ece544na/fa2014/nocedal80.pdf)
#[derive(Clone, Debug, PartialEq)]
pub struct Lbfgs<S> {
    memory_len: usize,
    maxiter: usize,
    gtol: S,
    c1: S,
    shrink: S,
    max_backtracks: usize,
}

impl<S: NdFloat> Default for Lbfgs<S> {
    fn default() -> Self {
        Lbfgs {
            memory_len: 5,
            maxiter: 200,
            gtol: S::from(1e-8).unwrap(),
            c1: S::from(1e-4).unwrap(),
            shrink: S::from(0.5).unwrap(),
            max_backtracks: 50,
        }
    }
}

impl<S: NdFloat> Lbfgs<S> {
    pub fn new() -> Lbfgs<S> {
        Lbfgs::default()
    }

    pub fn with_memory(mut self, memory_len: usize) -> Self {
        self.memory_len = memory_len;
        self
    }

    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    pub fn with_gtol(mut self, gtol: S) -> Self {
        self.gtol = gtol;
        self
    }

    pub fn with_line_search(mut self, c1: S, shrink: S, max_backtracks: usize) -> Self {
        self.c1 = c1;
        self.shrink = shrink;
        self.max_backtracks = max_backtracks;
        self
    }

    /// Run up to `maxiter` iterations from `x0` and return the final point
    pub fn minimize<F>(&self, f: &F, x0: ArrayView1<S>) -> Array1<S>
    where
        F: SmoothObjective<S> + ?Sized,
    {
        let (mut state, iterate) = self.start(f, x0.to_owned());
        state.advance(f, iterate, self.maxiter).point
    }

    /// Evaluate `f` at `x0` and return an empty solver state with the
    /// first iterate
    pub fn start<F>(&self, f: &F, x0: Array1<S>) -> (LbfgsState<S>, Iterate<S>)
    where
        F: SmoothObjective<S> + ?Sized,
    {
        let state = LbfgsState {
            config: self.clone(),
            memory: VecDeque::with_capacity(self.memory_len),
            gamma: S::one(),
            steps: 0,
        };
        (state, Iterate::at(f, x0))
    }
}

/// Curvature memory of a running [`Lbfgs`] solve
pub struct LbfgsState<S> {
    config: Lbfgs<S>,
    memory: VecDeque<(S, Array1<S>, Array1<S>)>,
    gamma: S,
    steps: usize,
}

impl<S: NdFloat> LbfgsState<S> {
    /// Total accepted steps so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Take up to `nsteps` steps starting from `iterate`
    ///
    /// Stops early when the gradient norm drops to `gtol` or the line
    /// search cannot find a decrease; the last accepted iterate is returned
    /// either way.
    pub fn advance<F>(&mut self, f: &F, iterate: Iterate<S>, nsteps: usize) -> Iterate<S>
    where
        F: SmoothObjective<S> + ?Sized,
    {
        let mut iterate = iterate;
        for _ in 0..nsteps {
            if iterate.gradient_norm() <= self.config.gtol {
                break;
            }
            match self.step(f, &iterate) {
                Some(next) => iterate = next,
                None => break,
            }
        }
        iterate
    }

    // Two-loop recursion
    fn direction(&self, grad: &Array1<S>) -> Array1<S> {
        let mut dir = grad.mapv(|g| -g);
        let mut alphas = Vec::with_capacity(self.memory.len());
        for (rho, s, y) in self.memory.iter().rev() {
            let alpha = s.dot(&dir) * (*rho);
            dir.scaled_add(-alpha, y);
            alphas.push(alpha);
        }
        dir *= self.gamma;
        for (alpha, (rho, s, y)) in alphas.iter().rev().zip(self.memory.iter()) {
            let beta = y.dot(&dir) * (*rho);
            dir.scaled_add(*alpha - beta, s);
        }
        dir
    }

    fn step<F>(&mut self, f: &F, iterate: &Iterate<S>) -> Option<Iterate<S>>
    where
        F: SmoothObjective<S> + ?Sized,
    {
        let mut dir = self.direction(&iterate.gradient);
        let mut slope = dir.dot(&iterate.gradient);
        if !(slope < S::zero()) {
            // stale curvature, fall back to steepest descent
            self.memory.clear();
            self.gamma = S::one();
            dir = iterate.gradient.mapv(|g| -g);
            slope = dir.dot(&iterate.gradient);
            if !(slope < S::zero()) {
                return None;
            }
        }

        let mut alpha = S::one();
        for _ in 0..self.config.max_backtracks {
            let mut point = iterate.point.clone();
            point.scaled_add(alpha, &dir);
            let (value, gradient) = f.evaluate(point.view());
            if value <= iterate.value + self.config.c1 * alpha * slope {
                let s = &point - &iterate.point;
                let y = &gradient - &iterate.gradient;
                self.remember(s, y);
                self.steps += 1;
                return Some(Iterate {
                    point,
                    value,
                    gradient,
                });
            }
            alpha = alpha * self.config.shrink;
        }
        log::trace!(
            "lbfgs: no decrease after {} backtracks (|g| = {:e})",
            self.config.max_backtracks,
            iterate.gradient_norm()
        );
        None
    }

    fn remember(&mut self, s: Array1<S>, y: Array1<S>) {
        let y_s = y.dot(&s);
        if self.config.memory_len == 0 || !(y_s > S::zero()) {
            return;
        }
        if self.memory.len() == self.config.memory_len {
            // forget
            self.memory.pop_front();
        }
        self.gamma = y_s / y.dot(&y);
        self.memory.push_back((S::one() / y_s, s, y));
    }
}
