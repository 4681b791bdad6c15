// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Simulated Annealing.
//!
//! A temperature-driven search that occasionally accepts worsening moves to
//! escape local optima. Each iteration walks the neighborhood in order and
//! accepts the first candidate passing the Metropolis criterion: a move with
//! cost change `delta` is accepted iff `delta < 0` or
//! `U(0,1) < exp(-delta / (K * T))` for the current temperature `T` and
//! Boltzmann constant `K`. On acceptance the move is applied and the
//! remaining candidates are skipped; either way the temperature is cooled
//! once per iteration, so time passes even through iterations that accept
//! nothing. The run ends when the termination criterion fires or the
//! temperature reaches the stop threshold.
//!
//! If `K * T` underflows to zero, the acceptance probability for
//! non-improving moves is treated as zero and the iteration degrades to
//! strict descent; this is deliberate, not an error.
//!
//! Cooling is pluggable through `CoolingSchedule`. Exponential cooling
//! multiplies the temperature by a factor in `(0, 1)` each iteration; linear
//! cooling subtracts a fixed decrement and clamps at zero, after which the
//! stop-temperature guard ends the run. The acceptance randomness comes from
//! an injected PRNG, so a fixed seed reproduces a run bit for bit.

use crate::observer::{SearchEvent, SearchObserver, SearchStep, SubscriberList};
use crate::recorder::SolutionRecorder;
use crate::result::SearchOutcome;
use crate::stats::SearchStatistics;
use crate::termination::TerminationCriterion;
use capstan_model::moves::Move;
use capstan_model::neighborhood::MoveManager;
use capstan_model::solution::Evaluable;
use num_traits::{ToPrimitive, Zero};
use rand::Rng;
use std::time::Instant;

/// The thermodynamics of an annealing run: maps the current temperature
/// (and, for adaptive schedules, the working solution) to the next
/// temperature. Called once per iteration.
pub trait CoolingSchedule<S> {
    /// Returns the temperature for the next iteration.
    fn update(&mut self, temperature: f64, solution: &S) -> f64;
}

/// Exponential cooling: `T' = alpha * T` with `0 < alpha < 1`.
///
/// Cools fast at high temperatures and ever slower near zero; the classic
/// schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialCooling {
    factor: f64,
}

impl ExponentialCooling {
    /// Creates an exponential schedule with decay factor `alpha`.
    ///
    /// # Panics
    ///
    /// Panics if `alpha` is not strictly between `0.0` and `1.0`.
    #[inline]
    pub fn new(alpha: f64) -> Self {
        assert!(
            alpha > 0.0 && alpha < 1.0,
            "called `ExponentialCooling::new()` with invalid alpha: {}. Must be in (0.0, 1.0)",
            alpha
        );
        Self { factor: alpha }
    }
}

impl<S> CoolingSchedule<S> for ExponentialCooling {
    #[inline]
    fn update(&mut self, temperature: f64, _solution: &S) -> f64 {
        temperature * self.factor
    }
}

/// Linear cooling: `T' = max(0, T - delta)` with `delta > 0`.
///
/// Reaches zero in a predictable number of iterations, after which the
/// stop-temperature guard ends the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearCooling {
    decrement: f64,
}

impl LinearCooling {
    /// Creates a linear schedule subtracting `delta` per iteration.
    ///
    /// # Panics
    ///
    /// Panics if `delta` is not strictly positive.
    #[inline]
    pub fn new(delta: f64) -> Self {
        assert!(
            delta > 0.0,
            "called `LinearCooling::new()` with invalid delta: {}. Must be greater than 0.0",
            delta
        );
        Self { decrement: delta }
    }
}

impl<S> CoolingSchedule<S> for LinearCooling {
    #[inline]
    fn update(&mut self, temperature: f64, _solution: &S) -> f64 {
        (temperature - self.decrement).max(0.0)
    }
}

/// A simulated annealing engine over a working solution.
///
/// Owns the move manager, recorder, termination criterion, cooling schedule,
/// and PRNG; the working solution is borrowed per `search()` call. The
/// current temperature is readable after a run.
pub struct SimulatedAnnealing<S, MM, R, TC, CS, G>
where
    S: Evaluable,
    MM: MoveManager<S>,
    R: SolutionRecorder<S>,
    TC: TerminationCriterion<S>,
    CS: CoolingSchedule<S>,
    G: Rng,
{
    manager: MM,
    recorder: R,
    termination: TC,
    cooling: CS,
    rng: G,
    starting_temperature: f64,
    stop_temperature: f64,
    boltzmann: f64,
    current_temperature: f64,
    observers: SubscriberList<S, MM::Move>,
}

impl<S, MM, R, TC, CS, G> SimulatedAnnealing<S, MM, R, TC, CS, G>
where
    S: Evaluable,
    MM: MoveManager<S>,
    R: SolutionRecorder<S>,
    TC: TerminationCriterion<S>,
    CS: CoolingSchedule<S>,
    G: Rng,
{
    /// Creates a simulated annealing engine.
    ///
    /// `starting_temperature` at or below `stop_temperature` is legal and
    /// yields a run that performs zero iterations.
    ///
    /// # Panics
    ///
    /// Panics if `stop_temperature` or `boltzmann` is not strictly positive.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        recorder: R,
        manager: MM,
        termination: TC,
        cooling: CS,
        starting_temperature: f64,
        stop_temperature: f64,
        boltzmann: f64,
        rng: G,
    ) -> Self {
        assert!(
            stop_temperature > 0.0,
            "called `SimulatedAnnealing::new()` with stop temperature {}, but it must be greater than 0",
            stop_temperature
        );
        assert!(
            boltzmann > 0.0,
            "called `SimulatedAnnealing::new()` with Boltzmann constant {}, but it must be greater than 0",
            boltzmann
        );

        Self {
            manager,
            recorder,
            termination,
            cooling,
            rng,
            starting_temperature,
            stop_temperature,
            boltzmann,
            current_temperature: starting_temperature,
            observers: SubscriberList::new(),
        }
    }

    /// Subscribes an observer to this engine's events.
    #[inline]
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: SearchObserver<S, MM::Move> + 'static,
    {
        self.observers.subscribe(observer);
    }

    /// The recorder holding the best solution found.
    #[inline]
    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Consumes the engine and returns its recorder.
    #[inline]
    pub fn into_recorder(self) -> R {
        self.recorder
    }

    /// The current annealing temperature (the last temperature of the most
    /// recent run, or the starting temperature before any run).
    #[inline]
    pub fn current_temperature(&self) -> f64 {
        self.current_temperature
    }

    /// The configured starting temperature.
    #[inline]
    pub fn starting_temperature(&self) -> f64 {
        self.starting_temperature
    }

    /// The configured stop temperature.
    #[inline]
    pub fn stop_temperature(&self) -> f64 {
        self.stop_temperature
    }

    /// Mutable access to the termination criterion, e.g. to reset it
    /// between runs.
    #[inline]
    pub fn termination_mut(&mut self) -> &mut TC {
        &mut self.termination
    }

    /// Runs the annealing on `working` until the termination criterion
    /// fires or the temperature reaches the stop threshold.
    pub fn search(&mut self, working: &mut S) -> SearchOutcome {
        let start_time = Instant::now();
        let mut stats = SearchStatistics::default();
        self.current_temperature = self.starting_temperature;

        let criterion_fired = loop {
            if self.termination.should_terminate(&*working) {
                break true;
            }
            if self.current_temperature <= self.stop_temperature {
                break false;
            }

            stats.on_iteration();
            let actual_cost = working.objective_value();
            self.manager.refresh(&*working);

            let kt = self.boltzmann * self.current_temperature;
            let mut applied: Option<usize> = None;
            for (index, mv) in self.manager.moves().iter().enumerate() {
                let cost = mv.evaluate(&*working);
                stats.on_evaluated_move();
                let delta = cost - actual_cost;

                let accept = if delta < S::Cost::zero() {
                    true
                } else {
                    // On conversion failure or an underflowed K*T the
                    // probability degrades to zero: improving moves only.
                    match delta.to_f64() {
                        Some(delta) if kt > 0.0 => {
                            self.rng.random::<f64>() < (-delta / kt).exp()
                        }
                        _ => false,
                    }
                };

                if accept {
                    applied = Some(index);
                    break;
                }
            }

            if let Some(index) = applied {
                let mv = &self.manager.moves()[index];
                mv.apply(working);
                stats.on_accepted_move();

                if self.recorder.accept(&*working) {
                    stats.on_improvement();
                    self.observers.notify(&SearchEvent::new(
                        SearchStep::ImprovementMade,
                        &*working,
                        Some(mv),
                    ));
                }
                self.observers
                    .notify(&SearchEvent::new(SearchStep::MoveMade, &*working, Some(mv)));
            }

            // Time passes whether or not a move was accepted.
            self.current_temperature = self.cooling.update(self.current_temperature, &*working);
        };

        stats.set_total_time(start_time.elapsed());
        if criterion_fired {
            SearchOutcome::criterion_met(stats)
        } else {
            SearchOutcome::temperature_floor(stats)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::BestEverRecorder;
    use crate::result::SearchTermination;
    use crate::termination::{Forever, IterationLimit};
    use capstan_model::neighborhood::StochasticSwapNeighborhood;
    use capstan_model::permutation::{PermutationObjective, PermutationSolution};
    use capstan_model::solution::CopyFrom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[derive(Debug, Clone, PartialEq)]
    struct Level {
        cost: f64,
    }

    impl Evaluable for Level {
        type Cost = f64;

        fn objective_value(&self) -> f64 {
            self.cost
        }
    }

    impl CopyFrom for Level {
        fn copy_from(&mut self, other: &Self) {
            self.cost = other.cost;
        }
    }

    // A move that worsens the cost by a fixed amount; every iteration then
    // presents the same delta to the acceptance rule.
    #[derive(Debug, Clone)]
    struct Worsen {
        amount: f64,
    }

    impl Move<Level> for Worsen {
        fn evaluate(&self, solution: &Level) -> f64 {
            solution.cost + self.amount
        }

        fn apply(&self, solution: &mut Level) {
            solution.cost += self.amount;
        }
    }

    #[derive(Debug)]
    struct ScriptedManager {
        moves: Vec<Worsen>,
    }

    impl MoveManager<Level> for ScriptedManager {
        type Move = Worsen;

        fn refresh(&mut self, _solution: &Level) {}

        fn moves(&self) -> &[Worsen] {
            &self.moves
        }
    }

    // Keeps the temperature constant; used to measure acceptance rates.
    #[derive(Debug)]
    struct HoldTemperature;

    impl CoolingSchedule<Level> for HoldTemperature {
        fn update(&mut self, temperature: f64, _solution: &Level) -> f64 {
            temperature
        }
    }

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_zero_iterations_when_start_not_above_stop() {
        let mut working = Level { cost: 5.0 };
        let mut engine = SimulatedAnnealing::new(
            BestEverRecorder::new(&working),
            ScriptedManager {
                moves: vec![Worsen { amount: 1.0 }],
            },
            Forever,
            ExponentialCooling::new(0.9),
            0.5,
            1.0,
            1.0,
            rng(1),
        );

        let outcome = engine.search(&mut working);

        assert_eq!(outcome.termination(), SearchTermination::TemperatureFloor);
        assert_eq!(outcome.statistics().iterations, 0);
        assert_eq!(working.cost, 5.0);
        assert_eq!(engine.current_temperature(), 0.5);
    }

    #[test]
    fn test_improving_moves_are_always_accepted() {
        #[derive(Debug)]
        struct Improve;

        impl Move<Level> for Improve {
            fn evaluate(&self, solution: &Level) -> f64 {
                solution.cost - 1.0
            }

            fn apply(&self, solution: &mut Level) {
                solution.cost -= 1.0;
            }
        }

        #[derive(Debug)]
        struct ImproveManager {
            moves: Vec<Improve>,
        }

        impl MoveManager<Level> for ImproveManager {
            type Move = Improve;

            fn refresh(&mut self, _solution: &Level) {}

            fn moves(&self) -> &[Improve] {
                &self.moves
            }
        }

        let mut working = Level { cost: 10.0 };
        let mut engine = SimulatedAnnealing::new(
            BestEverRecorder::new(&working),
            ImproveManager {
                moves: vec![Improve],
            },
            IterationLimit::new(4),
            ExponentialCooling::new(0.5),
            1.0,
            1e-9,
            1.0,
            rng(2),
        );

        let outcome = engine.search(&mut working);

        assert_eq!(outcome.termination(), SearchTermination::CriterionMet);
        assert_eq!(outcome.statistics().accepted_moves, 4);
        assert_eq!(working.cost, 6.0);
        assert_eq!(engine.recorder().best_cost(), 6.0);
    }

    #[test]
    fn test_acceptance_rate_approximates_metropolis_probability() {
        // With T = 1, K = 1 and a constant worsening delta of 0.7, the
        // long-run acceptance rate must approximate exp(-0.7).
        let trials = 10_000u64;
        let mut working = Level { cost: 0.0 };
        let mut engine = SimulatedAnnealing::new(
            BestEverRecorder::new(&working),
            ScriptedManager {
                moves: vec![Worsen { amount: 0.7 }],
            },
            IterationLimit::new(trials),
            HoldTemperature,
            1.0,
            1e-9,
            1.0,
            rng(42),
        );

        let outcome = engine.search(&mut working);

        assert_eq!(outcome.statistics().iterations, trials);
        let observed = outcome.statistics().accepted_moves as f64 / trials as f64;
        let expected = (-0.7f64).exp();
        assert!(
            (observed - expected).abs() < 0.02,
            "observed acceptance rate {} must be within 2% of {}",
            observed,
            expected
        );
    }

    #[test]
    fn test_acceptance_decisions_are_reproducible() {
        let run = |seed: u64| {
            let mut working = Level { cost: 0.0 };
            let mut engine = SimulatedAnnealing::new(
                BestEverRecorder::new(&working),
                ScriptedManager {
                    moves: vec![Worsen { amount: 0.3 }],
                },
                IterationLimit::new(500),
                HoldTemperature,
                1.0,
                1e-9,
                1.0,
                rng(seed),
            );
            let outcome = engine.search(&mut working);
            (working.cost, outcome.statistics().accepted_moves)
        };

        assert_eq!(run(7), run(7), "identical seeds must reproduce the run exactly");
    }

    #[test]
    fn test_cooling_happens_even_without_accepted_moves() {
        // An enormous delta is effectively never accepted, yet the
        // temperature must still decay to the floor.
        let mut working = Level { cost: 0.0 };
        let mut engine = SimulatedAnnealing::new(
            BestEverRecorder::new(&working),
            ScriptedManager {
                moves: vec![Worsen { amount: 1e12 }],
            },
            Forever,
            LinearCooling::new(0.25),
            1.0,
            0.1,
            1.0,
            rng(3),
        );

        let outcome = engine.search(&mut working);

        assert_eq!(outcome.termination(), SearchTermination::TemperatureFloor);
        assert_eq!(outcome.statistics().accepted_moves, 0);
        // 1.0 -> 0.75 -> 0.5 -> 0.25 -> 0.0 <= 0.1 stops the run.
        assert_eq!(outcome.statistics().iterations, 4);
        assert_eq!(engine.current_temperature(), 0.0);
    }

    #[test]
    fn test_underflowed_temperature_degrades_to_descent() {
        // With K*T denormal-small, exp(-delta/(K*T)) is 0: the equal-cost
        // move must be rejected instead of producing NaN-driven behavior.
        let mut working = Level { cost: 1.0 };
        let mut engine = SimulatedAnnealing::new(
            BestEverRecorder::new(&working),
            ScriptedManager {
                moves: vec![Worsen { amount: 0.0 }],
            },
            IterationLimit::new(10),
            HoldTemperature,
            1e-300,
            1e-308,
            1e-300,
            rng(4),
        );

        let outcome = engine.search(&mut working);

        // K*T == 1e-600 underflows to 0.0, so nothing is ever accepted.
        assert_eq!(outcome.statistics().accepted_moves, 0);
        assert_eq!(outcome.termination(), SearchTermination::CriterionMet);
    }

    #[test]
    fn test_equal_cost_moves_accepted_at_positive_temperature() {
        let mut working = Level { cost: 1.0 };
        let mut engine = SimulatedAnnealing::new(
            BestEverRecorder::new(&working),
            ScriptedManager {
                moves: vec![Worsen { amount: 0.0 }],
            },
            IterationLimit::new(5),
            HoldTemperature,
            1.0,
            1e-9,
            1.0,
            rng(5),
        );

        let outcome = engine.search(&mut working);

        // exp(0) = 1 and U(0,1) < 1 always holds: a plateau random walk.
        assert_eq!(outcome.statistics().accepted_moves, 5);
    }

    #[test]
    fn test_end_to_end_on_permutation_problem() {
        #[derive(Debug, Clone, PartialEq)]
        struct Arrangement {
            weights: Vec<f64>,
        }

        impl PermutationObjective for Arrangement {
            type Cost = f64;

            fn full_cost(&self, permutation: &[usize]) -> f64 {
                permutation
                    .iter()
                    .enumerate()
                    .map(|(position, &element)| position as f64 * self.weights[element])
                    .sum()
            }

            fn swap_delta(&self, permutation: &[usize], i: usize, j: usize) -> f64 {
                let wi = self.weights[permutation[i]];
                let wj = self.weights[permutation[j]];
                (i as f64 - j as f64) * (wj - wi)
            }
        }

        let objective = Arrangement {
            weights: (0..10).map(|w| (w + 1) as f64).collect(),
        };
        let mut working = PermutationSolution::new(objective, 10);
        let initial_cost = working.objective_value();

        let mut engine = SimulatedAnnealing::new(
            BestEverRecorder::new(&working),
            StochasticSwapNeighborhood::new(rng(100), 30),
            Forever,
            ExponentialCooling::new(0.995),
            10.0,
            1e-3,
            1.0,
            rng(200),
        );

        let outcome = engine.search(&mut working);

        assert_eq!(outcome.termination(), SearchTermination::TemperatureFloor);
        assert!(
            engine.recorder().best_cost() < initial_cost,
            "annealing must improve on the identity arrangement: best {} vs initial {}",
            engine.recorder().best_cost(),
            initial_cost
        );
        assert!(engine.current_temperature() <= 1e-3);
    }

    #[test]
    #[should_panic(expected = "called `ExponentialCooling::new()` with invalid alpha: 1")]
    fn test_exponential_cooling_rejects_alpha_of_one() {
        let _schedule = ExponentialCooling::new(1.0);
    }

    #[test]
    #[should_panic(expected = "called `LinearCooling::new()` with invalid delta: 0")]
    fn test_linear_cooling_rejects_zero_delta() {
        let _schedule = LinearCooling::new(0.0);
    }

    #[test]
    #[should_panic(expected = "called `SimulatedAnnealing::new()` with stop temperature 0")]
    fn test_non_positive_stop_temperature_panics() {
        let working = Level { cost: 0.0 };
        let _engine = SimulatedAnnealing::new(
            BestEverRecorder::new(&working),
            ScriptedManager { moves: vec![] },
            Forever,
            ExponentialCooling::new(0.9),
            1.0,
            0.0,
            1.0,
            rng(0),
        );
    }

    #[test]
    #[should_panic(expected = "called `SimulatedAnnealing::new()` with Boltzmann constant 0")]
    fn test_non_positive_boltzmann_panics() {
        let working = Level { cost: 0.0 };
        let _engine = SimulatedAnnealing::new(
            BestEverRecorder::new(&working),
            ScriptedManager { moves: vec![] },
            Forever,
            ExponentialCooling::new(0.9),
            1.0,
            0.1,
            0.0,
            rng(0),
        );
    }

    #[test]
    fn test_exponential_cooling_never_raises_temperature() {
        let mut schedule = ExponentialCooling::new(0.999_999);
        let solution = Level { cost: 0.0 };
        let mut temperature = 1.0;
        for _ in 0..1000 {
            let next = CoolingSchedule::<Level>::update(&mut schedule, temperature, &solution);
            assert!(next < temperature, "exponential cooling must strictly decrease");
            temperature = next;
        }
    }

    #[test]
    fn test_linear_cooling_clamps_at_zero() {
        let mut schedule = LinearCooling::new(0.4);
        let solution = Level { cost: 0.0 };
        let t1 = CoolingSchedule::<Level>::update(&mut schedule, 1.0, &solution);
        let t2 = CoolingSchedule::<Level>::update(&mut schedule, t1, &solution);
        let t3 = CoolingSchedule::<Level>::update(&mut schedule, t2, &solution);

        assert!((t1 - 0.6).abs() < 1e-12);
        assert!((t2 - 0.2).abs() < 1e-12);
        assert_eq!(t3, 0.0, "linear cooling reaches exactly zero");
    }
}
