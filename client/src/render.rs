use colored::Colorize;
use liblife::{
    HaltReason,
    board::{Board, CellState},
};

/// Prints one generation frame: alive cells as `alive_char`, everything else
/// (including birth-candidate marks) blank.
pub fn print_frame(board: &Board, generation: usize, alive_char: char) {
    println!("{}", format!("Generation {generation}:").bold());

    for row in board.logical_rows() {
        let line: String = row
            .iter()
            .map(|cell| match cell {
                CellState::Alive => alive_char,
                CellState::Dead | CellState::Border => ' ',
            })
            .collect();

        println!("[{line}]");
    }

    println!();
}

pub fn print_halt_report(reason: HaltReason, generation: usize) {
    let message = match reason {
        HaltReason::StateRepeated => "population is stable, configuration seen before".yellow(),
        HaltReason::Extinction => "population went extinct".red(),
        HaltReason::MaxGenerationsReached => "generation cap reached".green(),
    };

    println!(
        "{} {} (generation {})",
        "Simulation halted:".bold(),
        message,
        generation,
    );
}
