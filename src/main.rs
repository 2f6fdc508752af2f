// src/main.rs
use clap::{Parser, ValueEnum};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::io::{self, Write};

use economy_chess::render::RenderStyle;
use economy_chess::{Color, CommandError, Game, DEFAULT_LOG_FILENAME};

// --- Command Line ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side { White, Black }

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side { Side::White => Color::White, Side::Black => Color::Black }
    }
}

/// Two-player pseudo-legal chess in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// File the session log is written to on exit
    #[arg(long, default_value = DEFAULT_LOG_FILENAME)]
    log_file: String,

    /// Let the computer play this side with random moves
    #[arg(long, value_enum)]
    computer: Option<Side>,

    /// Seed for the computer's move choice
    #[arg(long)]
    seed: Option<u64>,

    /// Draw pieces as letters instead of chess symbols
    #[arg(long)]
    ascii: bool,
}

// --- Input Parsing ---

#[derive(Debug, PartialEq, Eq)]
enum UserInput {
    /// A number from the printed move list.
    Index(usize),
    /// Coordinate text such as `e2e4`.
    Coordinates(String),
    Command(Command),
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Moves, History, Help, Quit,
    Save(String),
}

/// Parses user input into a UserInput variant or returns a CommandError.
fn parse_user_input(input: &str) -> Result<UserInput, CommandError> {
    let trimmed_input = input.trim();

    let mut parts = trimmed_input.splitn(2, char::is_whitespace);
    let command_word = parts.next().unwrap_or("").to_lowercase();
    let argument = parts.next().unwrap_or("").trim();

    match command_word.as_str() {
        "moves" | "list" => return Ok(UserInput::Command(Command::Moves)),
        "history" => return Ok(UserInput::Command(Command::History)),
        "help" | "?" => return Ok(UserInput::Command(Command::Help)),
        "quit" | "exit" => return Ok(UserInput::Command(Command::Quit)),
        "save" => {
            let filename = if argument.is_empty() { DEFAULT_LOG_FILENAME } else { argument }.to_string();
            return Ok(UserInput::Command(Command::Save(filename)));
        }
        _ => {}
    }

    if trimmed_input.chars().all(|c| c.is_ascii_digit()) {
        return trimmed_input.parse::<usize>()
            .map(UserInput::Index)
            .map_err(|_| CommandError::InvalidArgument(trimmed_input.to_string()));
    }

    if trimmed_input.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && trimmed_input.chars().nth(1).is_some_and(|c| c.is_ascii_digit())
    {
        return Ok(UserInput::Coordinates(trimmed_input.to_string()));
    }

    Err(CommandError::UnknownCommand(trimmed_input.to_string()))
}

fn print_moves(game: &Game) {
    let moves = game.legal_moves();
    println!("Available moves for {}:", game.board().turn());
    for (i, mv) in moves.iter().enumerate() {
        print!("{:>3}: {:<12}", i, mv.to_string());
        if i % 4 == 3 { println!(); }
    }
    if moves.len() % 4 != 0 { println!(); }
}

fn save_log(game: &Game, filename: &str) {
    match game.save_log_to_file(filename) {
        Ok(()) => println!("Game log saved to '{}'.", filename),
        Err(e) => eprintln!("Warning: Failed to save game log: {}", e),
    }
}

// --- Main Game Loop ---

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut game = Game::new();
    if args.ascii { game.render_style = RenderStyle::Ascii; }
    let computer: Option<Color> = args.computer.map(Color::from);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    info!("starting session, computer plays {:?}", computer);

    println!("==============================");
    println!("|      Economy Chess         |");
    println!("==============================");
    print_help();

    'game_loop: loop {
        println!("------------------------------------------");
        println!("{}", game);

        if game.legal_moves().is_empty() {
            println!("\n=== {} has no moves. Session over. ===", game.board().turn());
            break 'game_loop;
        }

        if computer == Some(game.board().turn()) {
            // Non-empty list checked above.
            if let Some(mv) = game.random_move(&mut rng) {
                println!("Computer ({}) plays {}", game.board().turn(), mv);
                if let Err(e) = game.play_move(mv) {
                    warn!("computer move {} was rejected: {}", mv, e);
                    break 'game_loop;
                }
            }
            continue 'game_loop;
        }

        print_moves(&game);
        print!("\n{}'s turn. Enter a move number, coordinates (e.g. e2e4) or command: ", game.board().turn());
        io::stdout().flush()?;

        let mut input_line = String::new();
        match io::stdin().read_line(&mut input_line) {
            Ok(0) => {
                println!("\nEnd of input detected. Quitting game.");
                break 'game_loop;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}. Try again or use 'quit'/'exit'.", e);
                continue 'game_loop;
            }
        }

        let input_trimmed = input_line.trim();
        if input_trimmed.is_empty() { continue 'game_loop; }

        match parse_user_input(input_trimmed) {
            Ok(UserInput::Index(index)) => {
                if let Err(e) = game.play_index(index) {
                    println!("Error making move: {}", e);
                }
            }
            Ok(UserInput::Coordinates(text)) => {
                if let Err(e) = game.play_text(&text) {
                    println!("Error making move: {}", e);
                }
            }
            Ok(UserInput::Command(command)) => match command {
                Command::Moves => print_moves(&game),
                Command::History => {
                    println!("(Move history is shown below the board each turn)");
                }
                Command::Help => print_help(),
                Command::Quit => {
                    println!("Quit command received.");
                    break 'game_loop;
                }
                Command::Save(filename) => save_log(&game, &filename),
            },
            Err(e) => println!("Input Error: {}", e),
        }
    }

    save_log(&game, &args.log_file);
    println!("\nGame session finished.");
    Ok(())
}

/// Prints available commands.
fn print_help() {
    println!("\nAvailable Commands:");
    println!("  <number>       Play the move with that number in the printed list.");
    println!("  <move>         Enter a move by coordinates (e.g., e2e4 or e2-e4).");
    println!("  moves          List the available moves again.");
    println!("  history        Show move history (usually displayed automatically).");
    println!("  save [file]    Save the game log (default: {}).", DEFAULT_LOG_FILENAME);
    println!("  help           Show this help message.");
    println!("  quit / exit    Exit the game (saves the log).");
    println!("Moves are pseudo-legal: there is no check, castling or promotion.");
    println!();
}
