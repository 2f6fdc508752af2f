use std::error::Error;
use std::fmt;
use std::io;

// --- Engine Errors ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// A coordinate outside the 8x8 grid.
    OutOfBounds { row: i8, col: i8 },
    /// The requested move is not in the freshly generated move list.
    IllegalSelection(String),
    /// The move's source square is empty or belongs to the side not to move.
    InconsistentState(String),
    /// A square value outside `-6..=6`.
    InvalidSquareValue(i8),
    InvalidFormat(String),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfBounds { row, col } => write!(f, "Coordinate ({}, {}) is off the board", row, col),
            MoveError::IllegalSelection(mv) => write!(f, "Move '{}' is not among the available moves", mv),
            MoveError::InconsistentState(reason) => write!(f, "Cannot apply move: {}", reason),
            MoveError::InvalidSquareValue(value) => write!(f, "Invalid square value: {}", value),
            MoveError::InvalidFormat(input) => write!(f, "Invalid move format: '{}'. Use a move number or coordinates like 'e2e4'.", input),
        }
    }
}

impl Error for MoveError {}

// --- Log Persistence Errors ---

#[derive(Debug)]
pub enum SaveLoadError {
    Serialization(serde_json::Error),
    Io(String, io::Error),
}

impl fmt::Display for SaveLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveLoadError::Serialization(e) => write!(f, "Serialization error: {}", e),
            SaveLoadError::Io(file, e) => write!(f, "I/O error with file '{}': {}", file, e),
        }
    }
}

impl Error for SaveLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SaveLoadError::Serialization(e) => Some(e),
            SaveLoadError::Io(_, e) => Some(e),
        }
    }
}

// --- Interactive Command Errors ---

#[derive(Debug)]
pub enum CommandError {
    UnknownCommand(String),
    InvalidArgument(String),
    Move(MoveError),
    SaveLoad(SaveLoadError),
    Io(io::Error),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::UnknownCommand(cmd) => write!(f, "Unknown command: '{}'. Type 'help' for commands.", cmd),
            CommandError::InvalidArgument(arg) => write!(f, "Invalid argument: '{}'", arg),
            CommandError::Move(e) => write!(f, "{}", e),
            CommandError::SaveLoad(e) => write!(f, "Log save error: {}", e),
            CommandError::Io(e) => write!(f, "Input/Output error: {}", e),
        }
    }
}

impl Error for CommandError {}

impl From<MoveError> for CommandError {
    fn from(e: MoveError) -> Self { CommandError::Move(e) }
}
impl From<SaveLoadError> for CommandError {
    fn from(e: SaveLoadError) -> Self { CommandError::SaveLoad(e) }
}
impl From<io::Error> for CommandError {
    fn from(e: io::Error) -> Self { CommandError::Io(e) }
}
