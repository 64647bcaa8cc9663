//! Alternating Direction Method of Multipliers

use super::AugmentedObjective;
use super::ProximalOperator;
use crate::error::{real, ConfigError, Result};
use crate::smooth::{nop, Iterate, Lbfgs, LbfgsState, SmoothObjective};
use ndarray::prelude::*;
use ndarray::{Data, NdFloat};
use ndarray_rand::RandomExt;
use rand::distributions::uniform::SampleUniform;
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// How the inner solver is invoked for each $`x`$-update
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InnerPolicy {
    /// A fresh [`Lbfgs::minimize`] from the previous iterate, capped at
    /// `cold_steps` iterations
    ColdRestart,
    /// One [`LbfgsState`] kept for the whole solve and advanced
    /// `warm_steps` iterations at a time. Its stored gradient is shifted by
    /// the change in $`u - \rho z`$ after every outer iteration, so the
    /// curvature memory stays valid.
    WarmResume,
}

/// Settings of the [`Admm`] driver
///
/// Defaults: $`\rho = 1`$, absolute and relative tolerance `1e-4`,
/// no over-relaxation ($`\alpha = 1`$), iteration cap
/// $`\max(1000, 40n)`$, seed `0`, [`InnerPolicy::ColdRestart`] with 10
/// inner steps, 1 warm step.
#[derive(Clone, Debug, PartialEq)]
pub struct AdmmConfig<S> {
    rho: S,
    abstol: S,
    reltol: S,
    alpha: S,
    max_iter: Option<usize>,
    seed: u64,
    policy: InnerPolicy,
    cold_steps: usize,
    warm_steps: usize,
}

impl<S: NdFloat> Default for AdmmConfig<S> {
    fn default() -> Self {
        AdmmConfig {
            rho: S::one(),
            abstol: S::from(1e-4).unwrap(),
            reltol: S::from(1e-4).unwrap(),
            alpha: S::one(),
            max_iter: None,
            seed: 0,
            policy: InnerPolicy::ColdRestart,
            cold_steps: 10,
            warm_steps: 1,
        }
    }
}

impl<S: NdFloat> AdmmConfig<S> {
    pub fn new() -> AdmmConfig<S> {
        AdmmConfig::default()
    }

    pub fn with_rho(mut self, rho: S) -> Self {
        self.rho = rho;
        self
    }

    pub fn with_tolerances(mut self, abstol: S, reltol: S) -> Self {
        self.abstol = abstol;
        self.reltol = reltol;
        self
    }

    /// Over-relaxation factor $`\alpha \in (0, 2)`$
    pub fn with_relaxation(mut self, alpha: S) -> Self {
        self.alpha = alpha;
        self
    }

    /// Replace the default cap of $`\max(1000, 40n)`$ outer iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    /// Seed of the random initial iterate used by [`Admm::minimize`]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_policy(mut self, policy: InnerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Inner iterations per outer iteration for each policy
    pub fn with_inner_steps(mut self, cold_steps: usize, warm_steps: usize) -> Self {
        self.cold_steps = cold_steps;
        self.warm_steps = warm_steps;
        self
    }

    pub fn rho(&self) -> S {
        self.rho
    }

    pub fn policy(&self) -> InnerPolicy {
        self.policy
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Outer iteration cap for a problem of dimension `n`
    pub fn iteration_cap(&self, n: usize) -> usize {
        self.max_iter.unwrap_or_else(|| std::cmp::max(1000, 40 * n))
    }

    fn check(&self) -> Result<()> {
        if !(self.rho > S::zero()) {
            return Err(ConfigError::NonPositivePenalty(real(self.rho)));
        }
        if !(self.abstol > S::zero()) {
            return Err(ConfigError::NonPositiveTolerance(real(self.abstol)));
        }
        if !(self.reltol >= S::zero()) {
            return Err(ConfigError::NegativeRelativeTolerance(real(self.reltol)));
        }
        let two = S::one() + S::one();
        if !(self.alpha > S::zero() && self.alpha < two) {
            return Err(ConfigError::RelaxationOutOfRange(real(self.alpha)));
        }
        if self.max_iter == Some(0) {
            return Err(ConfigError::EmptyBudget {
                what: "iteration cap",
            });
        }
        if self.cold_steps == 0 {
            return Err(ConfigError::EmptyBudget {
                what: "cold restart inner steps",
            });
        }
        if self.warm_steps == 0 {
            return Err(ConfigError::EmptyBudget {
                what: "warm resume inner steps",
            });
        }
        Ok(())
    }
}

/// Result of an [`Admm`] solve
///
/// When `converged` is false the iteration cap was reached (or the callback
/// asked to stop) and the fields hold the last iterate.
#[derive(Clone, Debug, PartialEq)]
pub struct OptimizationState<S> {
    /// Primal iterate, minimizer of the last augmented objective
    pub x: Array1<S>,
    /// Dual variable
    pub u: Array1<S>,
    /// Consensus variable, always in the domain of $`g`$
    pub z: Array1<S>,
    pub iterations: usize,
    pub converged: bool,
    /// $`\|x - z\|_2`$ of the last iteration
    pub primal_residual: S,
    /// $`\rho\|z - z_{old}\|_2`$ of the last iteration
    pub dual_residual: S,
}

impl<S: NdFloat> OptimizationState<S> {
    /// Composite objective $`f(z) + g(z)`$
    pub fn objective<F>(&self, f: &F, g: &ProximalOperator<S>) -> S
    where
        F: SmoothObjective<S> + ?Sized,
    {
        f.value(self.z.view()) + g.penalty(&self.z)
    }
}

/// ADMM for Composite Minimization
///
/// Minimizes $`f(x) + g(x)`$ for smooth $`f`$ and a prox-friendly $`g`$ by
/// splitting it into $`f(x) + g(z)`$ subject to $`x = z`$ [\[B11\]](#references).
///
/// Algorithm
/// ---------
/// ```math
/// \begin{aligned}
/// x_{k+1} &= \mathrm{arg}\!\min_x f(x) + u_k^H(x - z_k) + \frac{\rho}{2}\|x - z_k\|_2^2 \\
/// \hat x_{k+1} &= \alpha x_{k+1} + (1 - \alpha) z_k \\
/// z_{k+1} &= \mathrm{prox}_{g/\rho}(\hat x_{k+1} + u_k) \\
/// u_{k+1} &= u_k + \hat x_{k+1} - z_{k+1}
/// \end{aligned}
/// ```
/// The $`x`$-update is done inexactly by [`Lbfgs`] according to the
/// [`InnerPolicy`]. Iteration stops once
/// ```math
/// \|x - z\|_2 < \sqrt{n}\,\epsilon_{abs} + \epsilon_{rel}\max(\|x\|_2, \|z\|_2)
/// \quad\text{and}\quad
/// \rho\|z_{k+1} - z_k\|_2 < \sqrt{n}\,\epsilon_{abs} + \epsilon_{rel}\|\rho u\|_2
/// ```
/// With [`ProximalOperator::NoOp`] there is nothing to split and the inner
/// solver runs once on $`f`$ itself.
///
/// The driver holds only settings; every call to [`Admm::minimize`] owns
/// its iterates, so one driver can serve several threads.
///
/// References
/// ----------
/// \[B11\]: [ Boyd, S, Parikh, N, Chu, E, Peleato, B, Eckstein, J,
///      "Distributed Optimization and Statistical Learning via the Alternating
///      Direction Method of Multipliers",
///         Foundations and Trends in Machine Learning, Vol 3, #1, 2011, 1-122 ](https://stanford.edu/~boyd/papers/pdf/admm_distr_stats.pdf)
#[derive(Clone, Debug)]
pub struct Admm<S> {
    n: usize,
    operator: ProximalOperator<S>,
    config: AdmmConfig<S>,
    inner: Lbfgs<S>,
}

impl<S: NdFloat> Admm<S> {
    pub fn new(n: usize, operator: ProximalOperator<S>, config: AdmmConfig<S>) -> Result<Admm<S>> {
        if n == 0 {
            return Err(ConfigError::EmptyBudget { what: "dimension" });
        }
        operator.check(n)?;
        config.check()?;
        Ok(Admm {
            n,
            operator,
            config,
            inner: Lbfgs::default(),
        })
    }

    /// Replace the default inner solver settings
    pub fn with_inner(mut self, inner: Lbfgs<S>) -> Self {
        self.inner = inner;
        self
    }

    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn operator(&self) -> &ProximalOperator<S> {
        &self.operator
    }

    pub fn config(&self) -> &AdmmConfig<S> {
        &self.config
    }

    /// Minimize from a uniformly random point in $`[0, 1)^n`$ drawn with
    /// the configured seed
    pub fn minimize<F>(&self, f: &F) -> OptimizationState<S>
    where
        F: SmoothObjective<S> + ?Sized,
        S: SampleUniform,
    {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let x0 = Array1::random_using(self.n, Uniform::new(S::zero(), S::one()), &mut rng);
        self.minimize_from(f, x0, nop)
    }

    /// Minimize from `x0`
    ///
    /// Parameters
    /// ----------
    /// - __f:__         smooth part of the objective
    /// - __x0:__        initial guess, of length `n`
    /// - __callback:__  user-defined function to be evaluated with two arguments (z,iter)
    ///                   after each outer iteration.
    ///                   If it returns True, the solve stops unconverged.
    ///
    /// # Panics
    ///
    /// If `x0.len()` differs from the driver's dimension.
    pub fn minimize_from<F>(
        &self,
        f: &F,
        x0: Array1<S>,
        mut callback: impl FnMut(ArrayView1<S>, usize) -> bool,
    ) -> OptimizationState<S>
    where
        F: SmoothObjective<S> + ?Sized,
    {
        let n = self.n;
        assert_eq!(x0.len(), n, "initial point has the wrong dimension");

        if self.operator.is_noop() {
            let x = self.inner.minimize(f, x0.view());
            log::debug!("admm: unconstrained problem, solved by the inner solver alone");
            return OptimizationState {
                z: x.clone(),
                x,
                u: Array1::zeros(n),
                iterations: 0,
                converged: true,
                primal_residual: S::zero(),
                dual_residual: S::zero(),
            };
        }

        let cfg = &self.config;
        let rho = cfg.rho;
        let alpha = cfg.alpha;
        let cap = cfg.iteration_cap(n);
        let eps_abs = S::from(n).unwrap().sqrt() * cfg.abstol;
        let cold = self.inner.clone().with_maxiter(cfg.cold_steps);

        let mut x = x0;
        let mut u = Array1::<S>::zeros(n);
        let mut z = Array1::<S>::zeros(n);
        let mut z_old = Array1::<S>::zeros(n);
        let mut x_hat = Array1::<S>::zeros(n);
        let mut warm: Option<(LbfgsState<S>, Iterate<S>)> = None;
        let mut primal = S::infinity();
        let mut dual = S::infinity();

        for iter in 1..=cap {
            x = {
                let aug = AugmentedObjective::new(f, u.view(), z.view(), rho);
                match cfg.policy {
                    InnerPolicy::ColdRestart => cold.minimize(&aug, x.view()),
                    InnerPolicy::WarmResume => {
                        let (mut state, iterate) = match warm.take() {
                            Some(resumed) => resumed,
                            None => self.inner.start(&aug, x.clone()),
                        };
                        let iterate = state.advance(&aug, iterate, cfg.warm_steps);
                        let point = iterate.point.clone();
                        warm = Some((state, iterate));
                        point
                    }
                }
            };

            // shift of the augmented objective seen by the warm iterate
            let before = warm.as_ref().map(|(_, iterate)| {
                let aug = AugmentedObjective::new(f, u.view(), z.view(), rho);
                (aug.correction(), aug.coupling(iterate.point.view()))
            });

            z_old.assign(&z);
            x_hat.assign(&x);
            if alpha != S::one() {
                x_hat *= alpha;
                x_hat.scaled_add(S::one() - alpha, &z_old);
            }

            z.assign(&x_hat);
            z += &u;
            self.operator.apply_mut(&mut z, rho);

            u += &x_hat;
            u -= &z;

            if let (Some((_, iterate)), Some((c_old, l_old))) = (warm.as_mut(), before) {
                let aug = AugmentedObjective::new(f, u.view(), z.view(), rho);
                iterate.gradient -= &c_old;
                iterate.gradient += &aug.correction();
                iterate.value = iterate.value - l_old + aug.coupling(iterate.point.view());
            }

            primal = norm(&(&x - &z));
            dual = rho * norm(&(&z - &z_old));
            let eps_primal = eps_abs + cfg.reltol * norm(&x).max(norm(&z));
            let eps_dual = eps_abs + cfg.reltol * rho * norm(&u);
            log::trace!(
                "admm: iter {} r = {:e} (< {:e}), s = {:e} (< {:e})",
                iter,
                primal,
                eps_primal,
                dual,
                eps_dual
            );

            if primal < eps_primal && dual < eps_dual {
                log::debug!("admm: converged after {} iterations", iter);
                return OptimizationState {
                    x,
                    u,
                    z,
                    iterations: iter,
                    converged: true,
                    primal_residual: primal,
                    dual_residual: dual,
                };
            }
            if callback(z.view(), iter) {
                log::debug!("admm: stopped by callback after {} iterations", iter);
                return OptimizationState {
                    x,
                    u,
                    z,
                    iterations: iter,
                    converged: false,
                    primal_residual: primal,
                    dual_residual: dual,
                };
            }
        }

        log::warn!(
            "admm: iteration cap of {} reached (r = {:e}, s = {:e})",
            cap,
            primal,
            dual
        );
        OptimizationState {
            x,
            u,
            z,
            iterations: cap,
            converged: false,
            primal_residual: primal,
            dual_residual: dual,
        }
    }
}

fn norm<S, D>(v: &ArrayBase<D, Ix1>) -> S
where
    S: NdFloat,
    D: Data<Elem = S>,
{
    v.dot(v).sqrt()
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::smooth::Quadratic;
    use approx::assert_abs_diff_eq;

    fn random_quadratic(n: usize, seed: u64) -> Quadratic<Array2<f64>, f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let A = Array2::random_using((n, n), Uniform::new(0., 1.), &mut rng);
        let Q = A.t().dot(&A) + Array2::<f64>::eye(n) * 0.5;
        let b = Array1::random_using(n, Uniform::new(-1., 1.), &mut rng);
        Quadratic::new(Q, b)
    }

    fn tight() -> AdmmConfig<f64> {
        AdmmConfig::new().with_tolerances(1e-6, 1e-6)
    }

    #[test]
    fn unconstrained_reduces_to_the_inner_solver() {
        let f = random_quadratic(6, 11);
        let admm = Admm::new(6, ProximalOperator::NoOp, AdmmConfig::new()).unwrap();
        let state = admm.minimize(&f);
        assert!(admm.operator().is_noop());
        assert_eq!(admm.config(), &AdmmConfig::new());
        assert!(state.converged);
        assert_eq!(state.iterations, 0);
        assert_eq!(state.x, state.z);
        let (_, g) = f.evaluate(state.x.view());
        assert!(norm(&g) < 1e-5);

        let x0 = array![0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let direct = Lbfgs::new().minimize(&f, x0.view());
        let state = admm.minimize_from(&f, x0, nop);
        assert_eq!(state.x, direct);
    }

    #[test]
    fn nonnegative_five_dimensional() {
        let f = random_quadratic(5, 7);
        let config = AdmmConfig::new().with_rho(1.0).with_seed(42);
        let admm = Admm::new(5, ProximalOperator::NonNegative, config).unwrap();
        let state = admm.minimize(&f);
        assert!(state.converged);
        assert!(state.iterations >= 1 && state.iterations <= 1000);
        assert_eq!(state.z.len(), 5);
        assert!(state.z.iter().all(|&zi| zi >= 0.));
        assert!(state.primal_residual.is_finite() && state.dual_residual.is_finite());
    }

    #[test]
    fn nonnegative_solution_satisfies_kkt() {
        let f = random_quadratic(8, 3);
        for &policy in &[InnerPolicy::ColdRestart, InnerPolicy::WarmResume] {
            let config = tight().with_policy(policy).with_max_iter(5000);
            let admm = Admm::new(8, ProximalOperator::NonNegative, config).unwrap();
            let state = admm.minimize(&f);
            assert!(state.converged, "{:?} did not converge", policy);
            let (_, g) = f.evaluate(state.z.view());
            for (&zi, &gi) in state.z.iter().zip(g.iter()) {
                assert!(zi >= 0.);
                if zi > 1e-4 {
                    assert_abs_diff_eq!(gi, 0., epsilon = 1e-4);
                } else {
                    assert!(gi > -1e-4);
                }
            }
        }
    }

    #[test]
    fn box_solution_stays_in_bounds() {
        let n = 6;
        let mut rng = StdRng::seed_from_u64(5);
        let Q = Array2::<f64>::eye(n) * 2.;
        let b = Array1::random_using(n, Uniform::new(-4., 4.), &mut rng);
        let f = Quadratic::new(Q, b.clone());
        let lower = Array1::from_elem(n, -0.5);
        let upper = Array1::from_elem(n, 1.);
        let op = ProximalOperator::box_bounds(lower.clone(), upper.clone()).unwrap();
        let state = Admm::new(n, op, tight()).unwrap().minimize(&f);
        assert!(state.converged);
        for i in 0..n {
            assert!(state.z[i] >= lower[i] && state.z[i] <= upper[i]);
            // separable, so the solution is the clamped unconstrained one
            let expect = (b[i] / 2.).max(-0.5).min(1.);
            assert_abs_diff_eq!(state.z[i], expect, epsilon = 1e-4);
        }
    }

    #[test]
    fn hyperplane_sum_to_one() {
        let n = 10;
        let f = random_quadratic(n, 21);
        let op = ProximalOperator::hyperplane(Array1::ones(n), 1.).unwrap();
        for &policy in &[InnerPolicy::ColdRestart, InnerPolicy::WarmResume] {
            let config = AdmmConfig::new().with_policy(policy).with_max_iter(5000);
            let state = Admm::new(n, op.clone(), config).unwrap().minimize(&f);
            assert!(state.converged, "{:?} did not converge", policy);
            assert_abs_diff_eq!(state.z.sum(), 1., epsilon = 1e-3);
        }
    }

    #[test]
    fn l1_sparsity_is_monotone_in_lambda() {
        let b = array![3., -2.5, 1.5, -0.8, 0.3, 0.05];
        let n = b.len();
        let f = Quadratic::new(Array2::<f64>::eye(n), b.clone());
        let lambdas = [0.1, 0.5, 1.0, 2.0, 4.0];
        let expected = [5, 4, 3, 2, 0];

        let mut last = n;
        for (&lambda, &nnz_expected) in lambdas.iter().zip(expected.iter()) {
            let op = ProximalOperator::l1(lambda).unwrap();
            let state = Admm::new(n, op, tight()).unwrap().minimize(&f);
            assert!(state.converged);
            let nnz = state.z.iter().filter(|&&zi| zi != 0.).count();
            assert_eq!(nnz, nnz_expected, "lambda = {}", lambda);
            assert!(nnz <= last);
            last = nnz;

            let soft = b.mapv(|v: f64| v.signum() * (v.abs() - lambda).max(0.));
            assert_abs_diff_eq!(state.z, soft, epsilon = 1e-4);
        }
    }

    #[test]
    fn policies_agree() {
        let n = 8;
        let f = random_quadratic(n, 99);
        let op = ProximalOperator::NonNegative;
        let solve = |policy| {
            let config = tight().with_policy(policy).with_seed(3).with_max_iter(5000);
            Admm::new(n, op.clone(), config).unwrap().minimize(&f)
        };
        let cold = solve(InnerPolicy::ColdRestart);
        let warm = solve(InnerPolicy::WarmResume);
        assert!(cold.converged && warm.converged);

        let scale = norm(&cold.z).max(1.);
        assert!(norm(&(&cold.z - &warm.z)) / scale < 1e-3);
        let (f_cold, f_warm) = (cold.objective(&f, &op), warm.objective(&f, &op));
        assert!((f_cold - f_warm).abs() / f_cold.abs().max(1.) < 1e-3);
    }

    #[test]
    fn l1_threshold_scales_with_rho() {
        // the fixed point minimizes f + (lambda / rho) |x|_1
        let b = array![3., -2.5, 1.5, -0.8, 0.3];
        let n = b.len();
        let f = Quadratic::new(Array2::<f64>::eye(n), b.clone());
        let op = ProximalOperator::l1(1.).unwrap();
        for &policy in &[InnerPolicy::ColdRestart, InnerPolicy::WarmResume] {
            let config = tight().with_rho(2.).with_policy(policy).with_max_iter(5000);
            let state = Admm::new(n, op.clone(), config).unwrap().minimize(&f);
            assert!(state.converged, "{:?} did not converge", policy);
            assert_abs_diff_eq!(state.z, array![2.5, -2., 1., -0.3, 0.], epsilon = 1e-4);
        }
    }

    #[test]
    fn policies_agree_for_every_operator_and_rho() {
        let n = 6;
        let f = random_quadratic(n, 41);
        let operators = vec![
            ProximalOperator::box_bounds(Array1::from_elem(n, -0.5), Array1::from_elem(n, 0.5))
                .unwrap(),
            ProximalOperator::hyperplane(Array1::ones(n), 1.).unwrap(),
            ProximalOperator::l1(0.5).unwrap(),
        ];
        for op in &operators {
            for &rho in &[0.5, 3.] {
                let solve = |policy| {
                    let config = tight()
                        .with_rho(rho)
                        .with_policy(policy)
                        .with_seed(3)
                        .with_max_iter(5000);
                    Admm::new(n, op.clone(), config).unwrap().minimize(&f)
                };
                let cold = solve(InnerPolicy::ColdRestart);
                let warm = solve(InnerPolicy::WarmResume);
                assert!(cold.converged && warm.converged, "{:?} at rho = {}", op, rho);

                let scale = norm(&cold.z).max(1.);
                assert!(norm(&(&cold.z - &warm.z)) / scale < 1e-3, "{:?} at rho = {}", op, rho);
                let (f_cold, f_warm) = (cold.objective(&f, op), warm.objective(&f, op));
                assert!((f_cold - f_warm).abs() / f_cold.abs().max(1.) < 1e-3);
            }
        }
    }

    #[test]
    fn custom_inner_solver() {
        let f = random_quadratic(5, 7);
        let plain = Admm::new(5, ProximalOperator::NonNegative, tight())
            .unwrap()
            .minimize(&f);
        let inner = Lbfgs::new().with_memory(3).with_line_search(1e-4, 0.7, 60);
        let custom = Admm::new(5, ProximalOperator::NonNegative, tight())
            .unwrap()
            .with_inner(inner)
            .minimize(&f);
        assert!(plain.converged && custom.converged);
        assert_abs_diff_eq!(plain.z, custom.z, epsilon = 1e-4);
    }

    #[test]
    fn iteration_cap_of_one() {
        let f = random_quadratic(5, 7);
        for &policy in &[InnerPolicy::ColdRestart, InnerPolicy::WarmResume] {
            let config = AdmmConfig::new().with_max_iter(1).with_policy(policy);
            let state = Admm::new(5, ProximalOperator::NonNegative, config)
                .unwrap()
                .minimize(&f);
            assert!(!state.converged);
            assert_eq!(state.iterations, 1);
            assert!(state.x.iter().chain(state.z.iter()).all(|v| v.is_finite()));
            assert!(state.u.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn callback_stops_the_solve() {
        let f = random_quadratic(5, 7);
        let admm = Admm::new(5, ProximalOperator::NonNegative, tight()).unwrap();
        let mut seen = Vec::new();
        let state = admm.minimize_from(&f, Array1::zeros(5), |z, iter| {
            assert!(z.iter().all(|&zi| zi >= 0.));
            seen.push(iter);
            iter == 3
        });
        assert!(!state.converged);
        assert_eq!(state.iterations, 3);
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "wrong dimension")]
    fn wrong_initial_dimension_panics() {
        let f = random_quadratic(5, 7);
        let admm = Admm::new(5, ProximalOperator::NonNegative, AdmmConfig::new()).unwrap();
        admm.minimize_from(&f, Array1::zeros(4), nop);
    }

    #[test]
    fn over_relaxation_reaches_the_same_point() {
        let f = random_quadratic(5, 13);
        let plain = Admm::new(5, ProximalOperator::NonNegative, tight())
            .unwrap()
            .minimize(&f);
        let relaxed = Admm::new(5, ProximalOperator::NonNegative, tight().with_relaxation(1.6))
            .unwrap()
            .minimize(&f);
        assert!(plain.converged && relaxed.converged);
        assert_abs_diff_eq!(plain.z, relaxed.z, epsilon = 1e-4);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let f = random_quadratic(5, 17);
        let admm = Admm::new(5, ProximalOperator::NonNegative, AdmmConfig::new().with_seed(9)).unwrap();
        assert_eq!(admm.minimize(&f), admm.minimize(&f));
    }

    #[test]
    fn independent_solves_in_parallel() {
        let sequential: Vec<_> = (0..2u64)
            .map(|seed| {
                let f = random_quadratic(6, seed);
                Admm::new(6, ProximalOperator::NonNegative, AdmmConfig::new().with_seed(seed))
                    .unwrap()
                    .minimize(&f)
            })
            .collect();
        let handles: Vec<_> = (0..2u64)
            .map(|seed| {
                std::thread::spawn(move || {
                    let f = random_quadratic(6, seed);
                    Admm::new(6, ProximalOperator::NonNegative, AdmmConfig::new().with_seed(seed))
                        .unwrap()
                        .minimize(&f)
                })
            })
            .collect();
        for (handle, expected) in handles.into_iter().zip(sequential.iter()) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn default_iteration_cap() {
        let config = AdmmConfig::<f64>::new();
        assert_eq!(config.rho(), 1.);
        assert_eq!(config.policy(), InnerPolicy::ColdRestart);
        assert_eq!(config.seed(), 0);
        assert_eq!(config.iteration_cap(5), 1000);
        assert_eq!(config.iteration_cap(100), 4000);
        assert_eq!(config.with_max_iter(7).iteration_cap(100), 7);
    }

    #[test]
    fn rejects_bad_configuration() {
        let op = ProximalOperator::<f64>::NonNegative;
        let new = |config| Admm::new(3, op.clone(), config).map(|_| ());
        assert_eq!(
            new(AdmmConfig::new().with_rho(0.)),
            Err(ConfigError::NonPositivePenalty(0.))
        );
        assert_eq!(
            new(AdmmConfig::new().with_relaxation(2.)),
            Err(ConfigError::RelaxationOutOfRange(2.))
        );
        assert_eq!(
            new(AdmmConfig::new().with_tolerances(0., 1e-4)),
            Err(ConfigError::NonPositiveTolerance(0.))
        );
        assert!(new(AdmmConfig::new().with_tolerances(1e-4, 0.)).is_ok());
        assert_eq!(
            new(AdmmConfig::new().with_tolerances(1e-4, -1e-3)),
            Err(ConfigError::NegativeRelativeTolerance(-1e-3))
        );
        assert_eq!(
            new(AdmmConfig::new().with_max_iter(0)),
            Err(ConfigError::EmptyBudget {
                what: "iteration cap"
            })
        );
        assert!(new(AdmmConfig::new().with_inner_steps(0, 1)).is_err());

        let wrong_size =
            ProximalOperator::<f64>::box_bounds(Array1::zeros(2), Array1::ones(2)).unwrap();
        assert_eq!(
            Admm::new(3, wrong_size, AdmmConfig::new()).map(|_| ()),
            Err(ConfigError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
        let flat = ProximalOperator::Hyperplane {
            normal: Array1::zeros(3),
            offset: 1.,
        };
        assert_eq!(
            Admm::new(3, flat, AdmmConfig::new()).map(|_| ()),
            Err(ConfigError::ZeroNormal)
        );
    }
}

#[cfg(all(rustc_nightly, test))]
mod benches {
    use super::*;
    use crate::smooth::Quadratic;
    use test::Bencher;

    fn problem(n: usize) -> Quadratic<Array2<f64>, f64> {
        let mut rng = StdRng::seed_from_u64(0);
        let a = Array2::random_using((n, n), Uniform::new(0., 1.), &mut rng);
        let b = Array1::random_using(n, Uniform::new(-1., 1.), &mut rng);
        Quadratic::new(a.t().dot(&a) + Array2::<f64>::eye(n), b)
    }

    #[bench]
    fn cold_restart_nonnegative_50(bench: &mut Bencher) {
        let f = problem(50);
        let admm = Admm::new(50, ProximalOperator::NonNegative, AdmmConfig::new()).unwrap();
        bench.iter(|| admm.minimize(&f));
    }

    #[bench]
    fn warm_resume_nonnegative_50(bench: &mut Bencher) {
        let f = problem(50);
        let config = AdmmConfig::new().with_policy(InnerPolicy::WarmResume);
        let admm = Admm::new(50, ProximalOperator::NonNegative, config).unwrap();
        bench.iter(|| admm.minimize(&f));
    }
}
