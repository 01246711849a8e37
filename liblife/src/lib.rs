use board::{Board, CellState};
use history::History;
use rule::Rule;

pub mod board;
pub mod history;
pub mod pos;
pub mod rule;

/// Immutable per-run parameters.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub rule: Rule,

    /// The run halts once the generation counter passes this.
    pub max_generations: usize,

    /// Display pacing hint for front ends; never consulted by the engine, so
    /// it cannot affect the computed state sequence.
    pub fps: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rule: Rule::default(),
            max_generations: 50,
            fps: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// The current configuration was generated before: a fixed point or a
    /// longer cycle.
    StateRepeated,

    /// No alive cells remain.
    Extinction,

    /// The configured generation cap was passed.
    MaxGenerationsReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted(HaltReason),
}

/// Drives one run: owns the current board, the rule set, and the recurrence
/// history. Generations are numbered from 1, with the externally supplied
/// seed board as generation 1.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub board: Board,
    config: SimulationConfig,
    history: History,
    generation: usize,
    status: Status,
}

impl Simulation {
    pub fn new(board: Board, config: SimulationConfig) -> Self {
        Self {
            board,
            config,
            history: History::new(),
            generation: 1,
            status: Status::Running,
        }
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs the halting checks for the current configuration, in order:
    /// recurrence, extinction, generation cap. Records the configuration in
    /// the history as a side effect, so call this once per generation;
    /// [`Simulation::run`] and [`Simulation::step`] do.
    pub fn poll(&mut self) -> Option<HaltReason> {
        if let Status::Halted(reason) = self.status {
            return Some(reason);
        }

        let reason = if self.history.record_and_check(self.board.canonical_key()) {
            Some(HaltReason::StateRepeated)
        } else if self.board.count_alive_cells() == 0 {
            Some(HaltReason::Extinction)
        } else if self.generation > self.config.max_generations {
            Some(HaltReason::MaxGenerationsReached)
        } else {
            None
        };

        if let Some(reason) = reason {
            self.status = Status::Halted(reason);
        }

        reason
    }

    /// One full engine iteration: halting checks, then the transition into
    /// the next generation. Once halted, further calls return the same
    /// reason without touching the board.
    pub fn step(&mut self) -> Status {
        match self.poll() {
            Some(reason) => Status::Halted(reason),
            None => {
                self.advance_with(&mut |_, _| {});
                Status::Running
            }
        }
    }

    /// Border pre-pass + rule transition, unconditionally.
    pub fn advance(&mut self) {
        self.advance_with(&mut |_, _| {});
    }

    /// Loops until a halting condition fires. `observe` sees each generation
    /// exactly once, after the border pre-pass and before the next board
    /// replaces it; the terminal repeated or all-dead configuration is not
    /// emitted.
    pub fn run<F>(&mut self, mut observe: F) -> HaltReason
    where
        F: FnMut(&Board, usize),
    {
        loop {
            if let Some(reason) = self.poll() {
                return reason;
            }

            self.advance_with(&mut observe);
        }
    }

    fn advance_with<F>(&mut self, observe: &mut F)
    where
        F: FnMut(&Board, usize),
    {
        self.board.mark_birth_candidates();
        let next = self.next_board();

        observe(&self.board, self.generation);

        self.board = next;
        self.generation += 1;
    }

    /// Applies the rule set to every alive cell and every birth candidate,
    /// reading all neighbor counts from the current board and writing into a
    /// fresh one. Candidate marks are never carried over; the next board
    /// starts with plain alive/dead cells only.
    fn next_board(&self) -> Board {
        let mut next = self.board.clone();

        for pos in self.board.interior_positions() {
            match self.board.get(pos) {
                CellState::Alive => {
                    let live = self.board.count_live_neighbors(pos);
                    if !self.config.rule.survives(live) {
                        next.set(pos, CellState::Dead);
                    }
                }
                CellState::Border => {
                    let live = self.board.count_live_neighbors(pos);
                    let state = if self.config.rule.is_born(live) {
                        CellState::Alive
                    } else {
                        CellState::Dead
                    };
                    next.set(pos, state);
                }
                CellState::Dead => {}
            }
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CellState;

    fn board_from(rows: &[&str]) -> Board {
        let height = rows.len();
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let mut board = Board::new(width, height);

        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '*' {
                    board.set([x + 1, y + 1], CellState::Alive);
                }
            }
        }

        board
    }

    fn conway(max_generations: usize) -> SimulationConfig {
        SimulationConfig {
            rule: Rule::default(),
            max_generations,
            fps: 0,
        }
    }

    fn glider() -> Board {
        board_from(&[
            " *        ",
            "  *       ",
            "***       ",
            "          ",
            "          ",
            "          ",
            "          ",
            "          ",
            "          ",
            "          ",
        ])
    }

    #[test]
    fn empty_board_goes_extinct_at_generation_one() {
        let mut sim = Simulation::new(Board::new(5, 5), conway(50));

        let mut frames = 0;
        let reason = sim.run(|_, _| frames += 1);

        assert_eq!(reason, HaltReason::Extinction);
        assert_eq!(sim.generation(), 1);
        assert_eq!(frames, 0);
    }

    #[test]
    fn blinker_repeats_at_generation_three() {
        let mut sim = Simulation::new(
            board_from(&[
                "     ", //
                "     ",
                " *** ",
                "     ",
                "     ",
            ]),
            conway(50),
        );

        let mut keys = Vec::new();
        let reason = sim.run(|board, _| keys.push(board.canonical_key()));

        assert_eq!(reason, HaltReason::StateRepeated);
        assert_eq!(sim.generation(), 3);

        // Two emitted frames with distinct layouts, then the period-2
        // oscillator comes back around to generation 1's configuration.
        assert_eq!(keys.len(), 2);
        assert_ne!(keys[0], keys[1]);
        assert_eq!(sim.board.canonical_key(), keys[0]);
    }

    #[test]
    fn block_still_life_repeats_at_generation_two() {
        let mut sim = Simulation::new(
            board_from(&[
                "    ", //
                " ** ",
                " ** ",
                "    ",
            ]),
            conway(50),
        );

        let mut frames = 0;
        let reason = sim.run(|_, _| frames += 1);

        assert_eq!(reason, HaltReason::StateRepeated);
        assert_eq!(sim.generation(), 2);
        assert_eq!(frames, 1);
    }

    #[test]
    fn generation_cap_allows_exactly_one_transition() {
        let mut sim = Simulation::new(glider(), conway(1));

        let mut frames = 0;
        let reason = sim.run(|_, _| frames += 1);

        assert_eq!(reason, HaltReason::MaxGenerationsReached);
        assert_eq!(sim.generation(), 2);
        assert_eq!(frames, 1);
    }

    #[test]
    fn runs_are_deterministic() {
        let trace = || {
            let mut sim = Simulation::new(glider(), conway(20));
            let mut keys = Vec::new();
            let reason = sim.run(|board, _| keys.push(board.canonical_key()));
            (keys, reason, sim.generation())
        };

        assert_eq!(trace(), trace());
    }

    #[test]
    fn padding_ring_stays_dead_across_generations() {
        let mut sim = Simulation::new(
            board_from(&[
                "***", //
                "   ",
                "   ",
            ]),
            conway(10),
        );

        loop {
            let status = sim.step();

            for y in 0..sim.board.height() {
                for x in 0..sim.board.width() {
                    if !sim.board.is_interior([x, y].into()) {
                        assert_eq!(sim.board.get([x, y]), CellState::Dead, "ring cell ({x}, {y})");
                    }
                }
            }

            if let Status::Halted(_) = status {
                break;
            }
        }
    }

    #[test]
    fn halted_simulation_stays_halted() {
        let mut sim = Simulation::new(Board::new(3, 3), conway(50));

        assert_eq!(sim.step(), Status::Halted(HaltReason::Extinction));
        assert_eq!(sim.step(), Status::Halted(HaltReason::Extinction));
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn custom_rules_change_the_outcome() {
        // Under Seeds (B2/S) every alive cell dies each step; a lone pair
        // births on its flanks and the pattern keeps churning until the cap.
        let seeds = SimulationConfig {
            rule: Rule::parse("B2/S").unwrap(),
            max_generations: 3,
            fps: 0,
        };

        let mut sim = Simulation::new(
            board_from(&[
                "        ", //
                "        ",
                "        ",
                "   **   ",
                "        ",
                "        ",
                "        ",
                "        ",
            ]),
            seeds,
        );

        let reason = sim.run(|_, _| {});
        assert_eq!(reason, HaltReason::MaxGenerationsReached);
    }
}
